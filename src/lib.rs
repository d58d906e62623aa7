//! # Multi-Radix Arithmetic Coding
//!
//! *Exact entropy coding into any digit alphabet.*
//!
//! ## Intuition First
//!
//! Imagine the unit interval as a number line. Each symbol of your message
//! slices the current interval into sub-intervals proportional to the symbol
//! probabilities, and coding a symbol means zooming into its slice. After the
//! whole message the interval is tiny, and *any* number inside it identifies
//! the message exactly. Writing that number out, digit by digit in some base
//! B, is arithmetic coding.
//!
//! The twist this crate cares about: nothing forces B to be 2. The same
//! zooming works when the output alphabet has 10 digits, or 256, or any
//! radix at all, binary is just the cheapest case to implement with shifts.
//!
//! ## The Problem
//!
//! Real implementations cannot zoom forever in rational arithmetic; they
//! keep a fixed-width window onto the interval and must decide when a
//! leading digit is final so it can leave the window. Two buffering layers
//! make this exact rather than approximate:
//!
//! - **Carry (underflow) buffering**: the interval can shrink onto a digit
//!   boundary without deciding which side it will land on. Those undecided
//!   digits are held as a provisional run and settled later by one carry.
//! - **Trailing-zero suppression**: the final zeros of a stream carry no
//!   information, because a reader past end-of-data sees zeros anyway; the
//!   encoder never writes them.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon            Entropy as the fundamental limit
//! 1963  Elias              Interval coding idea (unbounded precision)
//! 1976  Pasco, Rissanen    Fixed-precision arithmetic coding made practical
//! 1979  Rubin              Carry problem analyzed, streaming coders
//! 1987  Witten-Neal-Cleary CACM reference implementation (binary, E3 rule)
//! 1998  Moffat-Neal-Witten Revisited: range coding with digit output
//! 2004  Said               Survey of renormalization and carry strategies
//! 2009  Duda               ANS: the modern successor for speed
//! ```
//!
//! ## Mathematical Formulation
//!
//! With cumulative frequencies $f_{-1} = 0 \le f_0 \le \dots \le f_{n-1} = T$
//! and current interval $[L, L + R)$, coding symbol $s$ performs
//!
//! ```text
//! q <- floor(R / T);  L <- L + f_{s-1} * q;  R <- q * (f_s - f_{s-1})
//! ```
//!
//! and renormalization emits the leading base-B digit whenever
//! $\lfloor L / B^{d-1} \rfloor = \lfloor (L + R - 1) / B^{d-1} \rfloor$,
//! then rescales by B. All arithmetic is exact in 64 bits; one headroom bit
//! keeps the final rounding from wrapping.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(1)$ amortized per symbol plus $O(n)$ for the linear table
//!   scan while decoding ($n$ = alphabet size).
//! - **Space**: $O(1)$: three 64-bit registers and two counters.
//!
//! ## Failure Modes
//!
//! 1. **Precision exhaustion**: a frequency total too large for the
//!    remaining window makes `range / total` collapse to zero. Keep totals
//!    at or below the strategy's [`threshold`](radix::RadixOps::threshold).
//! 2. **Missing underflow handling**: the power-of-two strategy, unlike the
//!    other two, carries no carry-buffering loop; a workload that parks the
//!    interval on a cell boundary exhausts it (loudly, never silently).
//!
//! ## Implementation Notes
//!
//! This crate provides one generic interval coder over three radix
//! strategies:
//! - **Binary**: radix 2, compile-time constants, bit operations.
//! - **PowerOfTwoRadix**: radix `2^k`, bit operations, no underflow loop.
//! - **ArbitraryRadix**: any radix up to `2^31`, division and modulo.
//!
//! Digits travel through the [`digits`] traits, so the coder never sees
//! physical storage; in-memory vectors and bit-packed `std::io` streams are
//! included.
//!
//! ## References
//!
//! - Witten, I. H., Neal, R. M., Cleary, J. G. (1987). "Arithmetic coding
//!   for data compression." Communications of the ACM 30(6).
//! - Moffat, A., Neal, R. M., Witten, I. H. (1998). "Arithmetic coding
//!   revisited." ACM Transactions on Information Systems 16(3).
//! - Said, A. (2004). "Introduction to arithmetic coding - theory and
//!   practice." HP Labs report HPL-2004-76.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coder;
pub mod digits;
pub mod error;
mod freq;
pub mod radix;

pub use coder::{
    ArbitraryDecoder, ArbitraryEncoder, BinaryDecoder, BinaryEncoder, Decoder, Encoder,
    PowerOfTwoDecoder, PowerOfTwoEncoder,
};
pub use digits::{DigitRead, DigitSlice, DigitWrite, PackedDigitReader, PackedDigitWriter};
pub use error::Error;
pub use radix::{ArbitraryRadix, Binary, PowerOfTwoRadix, RadixOps};
