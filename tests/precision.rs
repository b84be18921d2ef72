use charconv::{format_float, CharsFormat, DecimalFloat};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn render<F: DecimalFloat>(value: F, format: CharsFormat, precision: usize) -> String {
    let mut buf = [0u8; 512];
    let n = format_float(&mut buf, value, format, Some(precision)).unwrap();
    String::from_utf8(buf[..n].to_vec()).unwrap()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Mantissa and decimal exponent of `value` rounded to `precision`
/// significant digits, from core's exact `{:.*e}`.
fn rounded<F: DecimalFloat>(value: F, precision: usize) -> (String, i32) {
    let text = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = text.split_once('e').unwrap();
    (mantissa.to_string(), exponent.parse().unwrap())
}

/// C's `%.{precision}g`.
fn printf_g<F: DecimalFloat>(value: F, precision: usize) -> String {
    let precision = precision.max(1);
    let (mantissa, exponent) = rounded(value, precision);
    let significant = i32::try_from(precision).unwrap();
    if exponent < -4 || exponent >= significant {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(&mantissa), exponent.abs())
    } else {
        let decimals = usize::try_from(significant - 1 - exponent).unwrap();
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// `precision` significant digits in plain decimal, zeros standing in for
/// the digits left of the point that were rounded away.
fn significant_fixed<F: DecimalFloat>(value: F, precision: usize) -> String {
    let precision = precision.max(1);
    let (mantissa, exponent) = rounded(value, precision);
    let significant = i32::try_from(precision).unwrap();
    if exponent < significant {
        let decimals = usize::try_from(significant - 1 - exponent).unwrap();
        return trim_fraction(&format!("{value:.decimals$}")).to_string();
    }
    let zeros = usize::try_from(exponent - (significant - 1)).unwrap();
    format!("{}{}", mantissa.replace('.', ""), "0".repeat(zeros))
}

fn expected<F: DecimalFloat>(value: F, magnitude: f64, precision: usize) -> String {
    let window = F::WINDOW;
    if (window.min_precise..window.max_fractional).contains(&magnitude) {
        significant_fixed(value, precision)
    } else {
        printf_g(value, precision)
    }
}

// =============================================================================
// General with a precision, against a printf reference
// =============================================================================

#[test]
fn test_general_precision_sweep_f64() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut checked = 0;
    while checked < 3000 {
        let value = f64::from_bits(rng.gen());
        if !value.is_finite() || value == 0.0 {
            continue;
        }
        let precision = rng.gen_range(0..=25);
        assert_eq!(
            render(value, CharsFormat::General, precision),
            expected(value, value.abs(), precision),
            "{value:e} at {precision}"
        );
        checked += 1;
    }
}

#[test]
fn test_general_precision_sweep_f64_near_window() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..3000 {
        let scale = 10f64.powi(rng.gen_range(-7..20));
        let value = (rng.gen::<f64>() - 0.5) * scale;
        if value == 0.0 {
            continue;
        }
        let precision = rng.gen_range(0..=20);
        assert_eq!(
            render(value, CharsFormat::General, precision),
            expected(value, value.abs(), precision),
            "{value:e} at {precision}"
        );
    }
}

#[test]
fn test_general_precision_sweep_f32() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut checked = 0;
    while checked < 3000 {
        let value = f32::from_bits(rng.gen());
        if !value.is_finite() || value == 0.0 {
            continue;
        }
        let precision = rng.gen_range(0..=12);
        assert_eq!(
            render(value, CharsFormat::General, precision),
            expected(value, f64::from(value.abs()), precision),
            "{value:e} at {precision}"
        );
        checked += 1;
    }
}

// =============================================================================
// Fixed and scientific with a precision, against core
// =============================================================================

#[test]
fn test_fixed_and_scientific_precision_match_core() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..1000 {
        let scale = 10f64.powi(rng.gen_range(-30..30));
        let value = (rng.gen::<f64>() - 0.5) * scale;
        let precision = rng.gen_range(0..=30);
        assert_eq!(
            render(value, CharsFormat::Fixed, precision),
            format!("{value:.precision$}")
        );

        let (mantissa, exponent) = rounded(value, precision + 1);
        let sign = if exponent < 0 { '-' } else { '+' };
        assert_eq!(
            render(value, CharsFormat::Scientific, precision),
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        );
    }
}
