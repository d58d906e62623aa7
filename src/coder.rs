//! The generalized interval coder.
//!
//! One scale/renormalize state machine serves all three radix strategies.
//! The encoder keeps the current interval `[low, low + range)` inside a
//! fixed 64-bit window; every time both endpoints agree on their leading
//! digit that digit is final and leaves the window (renormalization). When
//! the interval instead shrinks onto a digit-cell boundary without deciding
//! it (the classical E3 underflow condition), the boundary digit is held
//! back as a provisional run and settled later by a single carry. Zero
//! digits pass through one more buffering layer, so a zero run that turns
//! out to end the stream is never physically written.
//!
//! The decoder runs the identical interval updates and additionally tracks
//! `code`, the window view of the literal digit stream, consuming one digit
//! per shift. Encoder and decoder stay in lockstep purely through the digit
//! values that pass between them.

use crate::digits::{DigitRead, DigitWrite};
use crate::error::{Error, Result};
use crate::freq;
use crate::radix::{ArbitraryRadix, Binary, PowerOfTwoRadix, RadixOps};

/// The coding interval `[low, low + range)` within the register window.
///
/// Invariants while coding is in progress: `range > 0` and
/// `low + range <= full`.
#[derive(Debug, Clone, Copy)]
struct Interval {
    low: u64,
    range: u64,
}

impl Interval {
    fn new(full: u64) -> Self {
        Self { low: 0, range: full }
    }

    /// The value of one frequency unit at the current precision.
    fn quantum(&self, total: u64) -> Result<u64> {
        match self.range / total {
            0 => Err(Error::IrrecoverableUnderflow),
            q => Ok(q),
        }
    }

    /// Shrink to the sub-range `[start, start + size)` frequency units.
    fn scale(&mut self, quantum: u64, start: u64, size: u64) {
        self.low += start * quantum;
        self.range = quantum * size;
    }

    /// Top digit shared by both endpoints, if they agree.
    fn agreed_digit<O: RadixOps>(&self, ops: &O) -> Option<u64> {
        let digit = ops.digit_at(self.low);
        if digit == ops.digit_at(self.low + self.range - 1) {
            Some(digit)
        } else {
            None
        }
    }
}

/// Holds back zero digits so trailing runs are never written.
///
/// Sound because every [`DigitRead`] yields zeros past the physical end of
/// the stream: a reader reconstructs the suppressed tail for free.
#[derive(Debug, Default)]
struct ZeroSuppression {
    pending: u64,
}

impl ZeroSuppression {
    fn write<W: DigitWrite>(&mut self, digit: u64, sink: &mut W) -> Result<()> {
        if digit == 0 {
            self.pending = self.pending.checked_add(1).ok_or(Error::TooManyZeros)?;
            return Ok(());
        }
        while self.pending > 0 {
            sink.write_digit(0)?;
            self.pending -= 1;
        }
        sink.write_digit(digit)
    }
}

/// A run of provisional digits awaiting carry resolution.
///
/// `head` is the cell index of `low` when the run began; `tail` counts the
/// provisional shifts since. The next genuine digit is the carry indicator:
/// the run resolves to `head + carry` followed by `tail` filler digits,
/// all-highest when no carry arrived, all-zero when one did.
#[derive(Debug, Default)]
struct UnderflowBuffer {
    head: u64,
    tail: u64,
}

impl UnderflowBuffer {
    fn push(&mut self, digit: u64) -> Result<()> {
        if self.tail == 0 {
            self.head = digit;
        }
        self.tail = self.tail.checked_add(1).ok_or(Error::TooManyUnderflows)?;
        Ok(())
    }

    fn take(&mut self) -> (u64, u64) {
        let run = (self.head, self.tail);
        self.head = 0;
        self.tail = 0;
        run
    }
}

/// Arithmetic encoder over a radix strategy and a digit sink.
///
/// Construct once per stream, feed symbols with [`write`](Self::write),
/// terminate with [`flush`](Self::flush). Any error leaves the encoder in an
/// unspecified state that must not be reused.
pub struct Encoder<O: RadixOps, W: DigitWrite> {
    ops: O,
    interval: Interval,
    zeros: ZeroSuppression,
    underflow: Option<UnderflowBuffer>,
    sink: W,
}

/// [`Encoder`] fixed to the binary strategy.
pub type BinaryEncoder<W> = Encoder<Binary, W>;
/// [`Encoder`] fixed to a power-of-two radix.
pub type PowerOfTwoEncoder<W> = Encoder<PowerOfTwoRadix, W>;
/// [`Encoder`] fixed to an arbitrary radix.
pub type ArbitraryEncoder<W> = Encoder<ArbitraryRadix, W>;

impl<W: DigitWrite> Encoder<Binary, W> {
    /// Bit-granularity encoder.
    pub fn binary(sink: W) -> Self {
        Self::new(Binary, sink)
    }
}

impl<W: DigitWrite> Encoder<PowerOfTwoRadix, W> {
    /// Encoder emitting `digit_bits`-bit digits.
    pub fn power_of_two(digit_bits: u32, sink: W) -> Result<Self> {
        Ok(Self::new(PowerOfTwoRadix::new(digit_bits)?, sink))
    }
}

impl<W: DigitWrite> Encoder<ArbitraryRadix, W> {
    /// Encoder emitting digits of any radix in `2..=2^31`.
    pub fn arbitrary(radix: u64, sink: W) -> Result<Self> {
        Ok(Self::new(ArbitraryRadix::new(radix)?, sink))
    }
}

impl<O: RadixOps, W: DigitWrite> Encoder<O, W> {
    /// Create an encoder from an already-built strategy.
    pub fn new(ops: O, sink: W) -> Self {
        Self {
            interval: Interval::new(ops.full()),
            zeros: ZeroSuppression::default(),
            underflow: O::HANDLES_UNDERFLOW.then(UnderflowBuffer::default),
            ops,
            sink,
        }
    }

    /// Encode one symbol under the given cumulative frequency table.
    pub fn write(&mut self, symbol: usize, freqs: &[u32]) -> Result<()> {
        let (start, size, total) = freq::span(freqs, symbol)?;
        let quantum = self.interval.quantum(total)?;
        self.interval.scale(quantum, start, size);
        self.renormalize()?;
        self.drain_underflow()
    }

    /// Terminate the stream: round `low` up to the next cell boundary, emit
    /// the digit that pins the decoder inside the final interval, and return
    /// the sink. Suppressed trailing zeros stay unwritten.
    pub fn flush(mut self) -> Result<W> {
        self.interval.low += self.ops.cell() - 1;
        let digit = self.ops.digit_at(self.interval.low);
        debug_assert!(digit <= self.ops.highest_digit());
        self.emit(digit)?;
        Ok(self.sink)
    }

    fn renormalize(&mut self) -> Result<()> {
        while let Some(digit) = self.interval.agreed_digit(&self.ops) {
            self.emit(digit)?;
            self.interval.low = self.ops.shift(self.interval.low);
            self.interval.range *= self.ops.radix();
        }
        Ok(())
    }

    /// The E3 loop: while the interval is narrower than one threshold cell
    /// it must straddle a single cell boundary, so pin it into the lower
    /// cell and buffer the undecided boundary digit.
    fn drain_underflow(&mut self) -> Result<()> {
        if !O::HANDLES_UNDERFLOW {
            return Ok(());
        }
        while self.interval.range < self.ops.threshold() {
            let provisional = self.ops.digit_at(self.interval.low);
            if let Some(buffer) = self.underflow.as_mut() {
                buffer.push(provisional)?;
            }
            let pin = self.ops.highest_digit() * self.ops.threshold();
            debug_assert!(self.interval.low % self.ops.cell() >= pin);
            self.interval.low = self.ops.shift(self.interval.low - pin);
            self.interval.range *= self.ops.radix();
        }
        Ok(())
    }

    /// A genuine emission: settles any buffered provisional run with the
    /// carry carried by `digit`, then routes through zero suppression.
    fn emit(&mut self, digit: u64) -> Result<()> {
        let run = self.underflow.as_mut().map(UnderflowBuffer::take);
        if let Some((head, tail)) = run {
            if tail > 0 {
                // After a provisional run the window straddles its lowest
                // cell boundary, so the resolving digit is the carry: 0 or 1.
                debug_assert!(digit <= 1);
                let filler = if digit == 0 { self.ops.highest_digit() } else { 0 };
                self.zeros.write(head + digit, &mut self.sink)?;
                for _ in 0..tail {
                    self.zeros.write(filler, &mut self.sink)?;
                }
                return Ok(());
            }
        }
        self.zeros.write(digit, &mut self.sink)
    }
}

/// Arithmetic decoder over a radix strategy and a digit source.
///
/// Mirrors [`Encoder`] update for update; the extra `code` register is the
/// window view of the literal digit stream and absorbs one fresh digit per
/// shift. Reading past the encoded data yields arbitrary symbols, not an
/// error; the caller knows how many symbols to ask for.
pub struct Decoder<O: RadixOps, R: DigitRead> {
    ops: O,
    interval: Interval,
    code: u64,
    source: R,
}

/// [`Decoder`] fixed to the binary strategy.
pub type BinaryDecoder<R> = Decoder<Binary, R>;
/// [`Decoder`] fixed to a power-of-two radix.
pub type PowerOfTwoDecoder<R> = Decoder<PowerOfTwoRadix, R>;
/// [`Decoder`] fixed to an arbitrary radix.
pub type ArbitraryDecoder<R> = Decoder<ArbitraryRadix, R>;

impl<R: DigitRead> Decoder<Binary, R> {
    /// Bit-granularity decoder.
    pub fn binary(source: R) -> Result<Self> {
        Self::new(Binary, source)
    }
}

impl<R: DigitRead> Decoder<PowerOfTwoRadix, R> {
    /// Decoder consuming `digit_bits`-bit digits.
    pub fn power_of_two(digit_bits: u32, source: R) -> Result<Self> {
        Self::new(PowerOfTwoRadix::new(digit_bits)?, source)
    }
}

impl<R: DigitRead> Decoder<ArbitraryRadix, R> {
    /// Decoder consuming digits of any radix in `2..=2^31`.
    pub fn arbitrary(radix: u64, source: R) -> Result<Self> {
        Self::new(ArbitraryRadix::new(radix)?, source)
    }
}

impl<O: RadixOps, R: DigitRead> Decoder<O, R> {
    /// Create a decoder and prime `code` with one full window of leading
    /// digits, mirroring the encoder's initial full-window interval.
    pub fn new(ops: O, source: R) -> Result<Self> {
        let mut decoder = Self {
            interval: Interval { low: 0, range: 1 },
            code: 0,
            ops,
            source,
        };
        while decoder.interval.range < decoder.ops.full() {
            decoder.interval.range *= decoder.ops.radix();
            let digit = decoder.pull()?;
            decoder.code = decoder.code * decoder.ops.radix() + digit;
        }
        Ok(decoder)
    }

    /// Decode one symbol under the given cumulative frequency table.
    pub fn read(&mut self, freqs: &[u32]) -> Result<usize> {
        let total = freq::total(freqs)?;
        let quantum = self.interval.quantum(total)?;
        let count = self.code.saturating_sub(self.interval.low) / quantum;
        let symbol = freq::find(freqs, count)?;
        let (start, size, _) = freq::span(freqs, symbol)?;
        self.interval.scale(quantum, start, size);
        self.renormalize()?;
        self.drain_underflow()?;
        Ok(symbol)
    }

    fn renormalize(&mut self) -> Result<()> {
        while self.interval.agreed_digit(&self.ops).is_some() {
            self.interval.low = self.ops.shift(self.interval.low);
            self.interval.range *= self.ops.radix();
            self.code = self.ops.shift(self.code) + self.pull()?;
        }
        Ok(())
    }

    /// Mirror of the encoder's E3 loop: `code` receives the same affine
    /// window map as `low`, so the carry the encoder deferred reappears in
    /// `code`'s top cell without any decoder-side bookkeeping.
    fn drain_underflow(&mut self) -> Result<()> {
        if !O::HANDLES_UNDERFLOW {
            return Ok(());
        }
        while self.interval.range < self.ops.threshold() {
            let boundary_cell = self.ops.digit_at(self.interval.low);
            let pin = self.ops.highest_digit() * self.ops.threshold();
            debug_assert!(self.interval.low % self.ops.cell() >= pin);
            self.interval.low = self.ops.shift(self.interval.low - pin);
            self.interval.range *= self.ops.radix();
            let rebased = self.code.saturating_sub(boundary_cell * self.ops.cell() + pin);
            self.code = self.ops.shift(rebased) + self.pull()?;
        }
        Ok(())
    }

    fn pull(&mut self) -> Result<u64> {
        let digit = self.source.read_digit()?;
        debug_assert!(digit <= self.ops.highest_digit());
        Ok(digit)
    }
}
