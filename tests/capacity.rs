//! Every writer either fits its output exactly or fails without touching the
//! buffer.

use charconv::{format_float, format_hex, format_integer, CharsFormat, FormatError, F128, F80};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const FILL: u8 = b'#';

/// Check one call at exact length and one byte short.
fn check_exact_fit<W>(write: W)
where
    W: Fn(&mut [u8]) -> Result<usize, FormatError>,
{
    let mut big = [0u8; 512];
    let len = write(&mut big).unwrap();
    let expected = &big[..len];

    let mut exact = vec![FILL; len];
    assert_eq!(write(&mut exact), Ok(len));
    assert_eq!(exact, expected);

    let mut short = vec![FILL; len - 1];
    assert_eq!(
        write(&mut short),
        Err(FormatError::ValueTooLarge),
        "{}",
        String::from_utf8_lossy(expected)
    );
    assert!(
        short.iter().all(|&b| b == FILL),
        "partial write for {}",
        String::from_utf8_lossy(expected)
    );
}

fn sample_doubles() -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut values = vec![
        0.0,
        -0.0,
        1.0,
        -2.5,
        0.1,
        1e15,
        -1e16,
        1e21,
        -5e-324,
        f64::MAX,
        f64::MIN_POSITIVE,
        f64::INFINITY,
        -f64::NAN,
        f64::from_bits(0x7ff4_0000_0000_0000),
    ];
    while values.len() < 200 {
        let value = f64::from_bits(rng.gen());
        if value.is_finite() {
            values.push(value);
        }
    }
    values
}

#[test]
fn test_float_formats_exact_fit() {
    let formats = [
        CharsFormat::General,
        CharsFormat::Scientific,
        CharsFormat::Fixed,
        CharsFormat::Hex,
    ];
    for value in sample_doubles() {
        for format in formats {
            check_exact_fit(|out| format_float(out, value, format, None));
            for precision in [0, 1, 6, 17, 40] {
                if format == CharsFormat::Fixed && value.abs() > 1e100 {
                    // fixed with a precision prints every integral digit
                    continue;
                }
                check_exact_fit(|out| format_float(out, value, format, Some(precision)));
            }
        }
    }
}

#[test]
fn test_f32_exact_fit() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..200 {
        let value = f32::from_bits(rng.gen());
        for format in [CharsFormat::General, CharsFormat::Scientific, CharsFormat::Hex] {
            check_exact_fit(|out| format_float(out, value, format, None));
            check_exact_fit(|out| format_float(out, value, format, Some(5)));
        }
    }
}

#[test]
fn test_extended_hex_exact_fit() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..200 {
        let bits: u128 = rng.gen();
        let f80 = F80::from_bits(bits);
        let f128 = F128::from_bits(bits);
        for precision in [None, Some(0), Some(3), Some(30)] {
            check_exact_fit(|out| format_hex(out, f80, precision));
            check_exact_fit(|out| format_hex(out, f128, precision));
        }
    }
}

#[test]
fn test_integers_exact_fit() {
    let mut rng = SmallRng::seed_from_u64(42);
    for base in 2..=36 {
        for value in [i128::MIN, i128::MAX, 0, -1] {
            check_exact_fit(|out| format_integer(out, value, base));
        }
        for _ in 0..20 {
            let value: i64 = rng.gen();
            check_exact_fit(|out| format_integer(out, value, base));
            let value: u8 = rng.gen();
            check_exact_fit(|out| format_integer(out, value, base));
        }
    }
}

#[test]
fn test_empty_buffer() {
    assert_eq!(
        format_float(&mut [], 0.0_f64, CharsFormat::General, None),
        Err(FormatError::ValueTooLarge)
    );
    assert_eq!(format_integer(&mut [], 0u8, 10), Err(FormatError::ValueTooLarge));
    assert_eq!(format_hex(&mut [], F80::NAN, None), Err(FormatError::ValueTooLarge));
}
