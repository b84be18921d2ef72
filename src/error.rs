use thiserror::Error;

/// Errors that can occur while writing a number into an output buffer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("Value too large: the output buffer cannot hold the formatted number")]
    ValueTooLarge,
}

/// Errors that can occur while reading a number from an input buffer
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid argument: no digits could be read")]
    InvalidArgument,

    #[error("Out of range: the numeral spanning {consumed} bytes does not fit the target type")]
    OutOfRange { consumed: usize },
}

impl ParseError {
    /// Position in the input where parsing stopped.
    ///
    /// [`InvalidArgument`](Self::InvalidArgument) never consumes input, so its
    /// cursor is always `0`. [`OutOfRange`](Self::OutOfRange) points past the
    /// last character that belonged to the numeral, so callers can skip it.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        match self {
            Self::InvalidArgument => 0,
            Self::OutOfRange { consumed } => *consumed,
        }
    }
}

/// Result type for formatting operations; `Ok` carries the number of bytes written
pub type FormatResult<T> = Result<T, FormatError>;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
