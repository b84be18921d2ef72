//! # charconv
//!
//! Locale-independent conversion between numbers and their text form,
//! working entirely in caller-owned byte buffers.
//!
//! - **No allocation**: every function writes into a `&mut [u8]` or reads
//!   from a `&[u8]`
//! - **No partial output**: a format call that does not fit returns
//!   [`FormatError::ValueTooLarge`] and leaves the buffer as it was
//! - **Exact round trips**: shortest float output parses back to the same
//!   bits, including every NaN class and signed zero
//! - **Any base**: integers of every width in bases 2 through 36
//!
//! ## Examples
//!
//! ```rust
//! use charconv::{format_float, format_integer, parse_float, parse_integer, CharsFormat};
//!
//! let mut buf = [0u8; 64];
//!
//! // Integers
//! let n = format_integer(&mut buf, -1234i32, 16).unwrap();
//! assert_eq!(&buf[..n], b"-4d2");
//! assert_eq!(parse_integer::<i32>(&buf[..n], 16), Ok((-1234, n)));
//!
//! // Floats, shortest round trip
//! let n = format_float(&mut buf, 1.0_f64 / 3.0, CharsFormat::General, None).unwrap();
//! assert_eq!(&buf[..n], b"0.3333333333333333");
//! assert_eq!(
//!     parse_float::<f64>(&buf[..n], CharsFormat::General),
//!     Ok((1.0 / 3.0, n))
//! );
//!
//! // Floats, fixed precision
//! let n = format_float(&mut buf, 2.675_f64, CharsFormat::Fixed, Some(2)).unwrap();
//! assert_eq!(&buf[..n], b"2.67");
//! ```
//!
//! ## Formats
//!
//! | [`CharsFormat`] | shortest (`None`)          | with precision `p`          |
//! |-----------------|----------------------------|-----------------------------|
//! | `Fixed`         | `1234.5`                   | `p` digits after the point  |
//! | `Scientific`    | `1.2345e+03`               | `p` digits after the point  |
//! | `General`       | `%g` pick of the above     | `p` significant digits      |
//! | `Hex`           | `1.34ap+10`                | `p` hex digits              |
//!
//! Infinities and NaNs are always written as one of `inf`, `-inf`, `nan`,
//! `-nan(ind)`, `nan(snan)` and `-nan(snan)`.
//!
//! Every format, and parsing, also covers x87 80-bit and IEEE 128-bit values
//! through the [`F80`] and [`F128`] bit containers:
//!
//! ```rust
//! use charconv::{format_float, parse_float, CharsFormat, F128};
//!
//! let mut buf = [0u8; 64];
//! let (tenth, n) = parse_float::<F128>(b"0.1", CharsFormat::General).unwrap();
//! assert_eq!(n, 3);
//! let n = format_float(&mut buf, tenth, CharsFormat::Scientific, Some(36)).unwrap();
//! assert_eq!(&buf[..n], b"1.000000000000000000000000000000000048e-01");
//! ```

pub(crate) mod bignum;
pub(crate) mod buffer;
pub(crate) mod decoder;
pub(crate) mod digits;
pub(crate) mod dispatch;
pub(crate) mod dragon;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod extended;
pub(crate) mod fixed;
pub(crate) mod float_decoder;
pub(crate) mod hex;
pub(crate) mod integer;
pub(crate) mod layout;
pub(crate) mod nonfinite;
pub(crate) mod oracle;
pub(crate) mod precise;

// Re-export main types and functions
pub use decoder::parse_integer;
pub use digits::digit_value;
pub use dispatch::{
    format_float, format_float_with, format_hex, CharsFormat, FixedWindow, FormatSpec,
};
pub use encoder::format_integer;
pub use error::{FormatError, FormatResult, ParseError, ParseResult};
pub use float_decoder::{parse_float, ParseFloat};
pub use integer::Integer;
pub use layout::{classify, Classification, FloatBits, FloatClass, Layout, RawParts, F128, F80};
pub use oracle::DecimalFloat;
