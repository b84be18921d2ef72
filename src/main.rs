use charconv::{
    classify, format_float, format_hex, format_integer, parse_float, parse_integer, CharsFormat,
    F128, F80,
};

fn show(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or("<invalid utf-8>")
}

fn print_float_row(value: f64) {
    let mut buf = [0u8; 400];
    print!("{:<24}", format!("{value:?}"));
    for format in [
        CharsFormat::General,
        CharsFormat::Scientific,
        CharsFormat::Fixed,
        CharsFormat::Hex,
    ] {
        match format_float(&mut buf, value, format, None) {
            Ok(n) if n <= 24 => print!(" {:<24}", show(&buf[..n])),
            Ok(n) => print!(" {:<24}", format!("<{n} bytes>")),
            Err(e) => print!(" {:<24}", e.to_string()),
        }
    }
    println!();
}

#[allow(clippy::cast_possible_truncation)]
fn main() {
    println!("=== Shortest float output ===\n");
    println!(
        "{:<24} {:<24} {:<24} {:<24} {:<24}",
        "value", "general", "scientific", "fixed", "hex"
    );
    for value in [
        0.0,
        -0.0,
        1.0,
        0.1,
        -2.5,
        1.0 / 3.0,
        1e15,
        1e16,
        1e21,
        1e-5,
        f64::MAX,
        5e-324,
        f64::INFINITY,
        -f64::NAN,
        f64::from_bits(0x7ff4_0000_0000_0000),
    ] {
        print_float_row(value);
    }

    println!("\n=== Precision ===\n");
    let mut buf = [0u8; 128];
    for precision in [0, 1, 2, 6, 17] {
        print!("p={precision:<3}");
        for format in [
            CharsFormat::General,
            CharsFormat::Scientific,
            CharsFormat::Fixed,
            CharsFormat::Hex,
        ] {
            match format_float(&mut buf, std::f64::consts::PI, format, Some(precision)) {
                Ok(n) => print!(" {:<24}", show(&buf[..n])),
                Err(e) => print!(" {:<24}", e.to_string()),
            }
        }
        println!();
    }

    println!("\n=== Hex across layouts ===\n");
    for value in [1.0, 0.1, -1.5e-310] {
        let n32 = format_hex(&mut buf, value as f32, None).unwrap_or(0);
        print!("{:<12} f32 {:<16}", format!("{value:e}"), show(&buf[..n32]));
        let n64 = format_hex(&mut buf, value, None).unwrap_or(0);
        print!(" f64 {:<24}", show(&buf[..n64]));
        let n80 = format_hex(&mut buf, F80::from_f64(value), None).unwrap_or(0);
        print!(" f80 {:<26}", show(&buf[..n80]));
        let n128 = format_hex(&mut buf, F128::from_f64(value), None).unwrap_or(0);
        println!(" f128 {}", show(&buf[..n128]));
    }

    println!("\n=== Decimal across layouts ===\n");
    let third = 1.0 / 3.0;
    for format in [CharsFormat::General, CharsFormat::Scientific] {
        let n64 = format_float(&mut buf, third, format, None).unwrap_or(0);
        print!("{format:<12?} f64 {:<24}", show(&buf[..n64]));
        let n80 = format_float(&mut buf, F80::from_f64(third), format, None).unwrap_or(0);
        print!(" f80 {:<26}", show(&buf[..n80]));
        let n128 = format_float(&mut buf, F128::from_f64(third), format, None).unwrap_or(0);
        println!(" f128 {}", show(&buf[..n128]));
    }
    if let Ok((tenth, n)) = parse_float::<F128>(b"0.1", CharsFormat::General) {
        let written = format_float(&mut buf, tenth, CharsFormat::Scientific, Some(40)).unwrap_or(0);
        println!("0.1 as f128 ({n} bytes read): {}", show(&buf[..written]));
    }

    println!("\n=== Integers ===\n");
    for base in [2, 8, 10, 16, 36] {
        let n = format_integer(&mut buf, i64::MIN, base).unwrap_or(0);
        println!("i64::MIN base {base:<2} {}", show(&buf[..n]));
    }

    println!("\n=== Parsing ===\n");
    for input in ["255", "-128", "256", "-", "12abc"] {
        println!(
            "{input:<8} as u8 (base 10): {:?}",
            parse_integer::<u8>(input.as_bytes(), 10)
        );
    }
    for (input, format) in [
        ("1.5e+03", CharsFormat::General),
        ("1e400", CharsFormat::General),
        ("1.8p+1", CharsFormat::Hex),
        ("-nan(ind)", CharsFormat::General),
        ("nan(snan)", CharsFormat::General),
    ] {
        match parse_float::<f64>(input.as_bytes(), format) {
            Ok((value, n)) => println!(
                "{input:<10} -> {value:?} ({:?}), {n} bytes",
                classify(value).class
            ),
            Err(e) => println!("{input:<10} -> {e}"),
        }
    }
}
