//! Error types for arithmetic coding.

use thiserror::Error;

/// Error variants for coder operations.
///
/// Every variant is fatal: the encoder or decoder that returned it is left in
/// an unspecified state and must not be used again.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied a symbol with zero cumulative-frequency mass, an
    /// out-of-range symbol index, or a decoded value that maps to no symbol.
    #[error("symbol has no probability mass")]
    UnexpectedSymbol,

    /// `range / total` reached zero: the frequency table's `total` is too
    /// coarse for the precision left in the interval.
    #[error("interval precision exhausted")]
    IrrecoverableUnderflow,

    /// A run of provisional (underflow) digits exceeded the 64-bit counter.
    #[error("underflow run exceeded counter range")]
    TooManyUnderflows,

    /// A run of pending zero digits exceeded the 64-bit counter.
    #[error("pending zero run exceeded counter range")]
    TooManyZeros,

    /// A radix strategy was constructed with an unusable radix or digit width.
    #[error("invalid radix: {0}")]
    InvalidRadix(u64),

    /// An I/O error occurred on the underlying digit stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for coder operations.
pub type Result<T> = std::result::Result<T, Error>;
