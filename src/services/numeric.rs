//! 数值转换与格式化
//!
//! 参数值的数值转换遵循宽松规则：空串、`null`、`false` 视为 0，
//! 无法识别的文本视为 NaN，而不是报错。BMI 格式化与
//! `Number.prototype.toFixed` 一致，非有限值输出 `NaN` / `Infinity`。

use serde_json::Value;

/// 将参数值转换为数值
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => match single {
                Value::Array(_) | Value::Object(_) => to_number(single),
                Value::Null => 0.0,
                Value::String(s) => parse_numeric_str(s),
                other => parse_numeric_str(&other.to_string()),
            },
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// 缺失字段按 0 处理
pub fn to_number_or_zero(value: Option<&Value>) -> f64 {
    value.map(to_number).unwrap_or(0.0)
}

/// 解析数值文本，无法识别时返回 NaN
pub fn parse_numeric_str(raw: &str) -> f64 {
    // U+FEFF counts as whitespace for numeric text but not for `char::is_whitespace`
    let s = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(radix_value) = parse_prefixed_integer(s) {
        return radix_value;
    }

    // `str::parse::<f64>` also accepts "inf"/"nan", which are not numeric literals here
    let is_decimal_literal = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };

    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut acc = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * radix as f64 + d as f64,
            None => return Some(f64::NAN),
        }
    }
    Some(acc)
}

/// 计算 BMI，身高单位为厘米
///
/// 身高为 0 时结果为 ±Infinity 或 NaN，按 IEEE-754 语义原样返回。
pub fn compute_bmi(weight: f64, height: f64) -> f64 {
    weight / ((height * height) / 10000.0)
}

/// 按固定小数位格式化，平分时远离 0 舍入
pub fn format_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // -0 formats without a sign
    let value = if value == 0.0 { 0.0 } else { value };
    if !is_exact_tie(value, digits) {
        return format!("{:.*}", digits, value);
    }

    // 精确平分的情况（例如 22.125）取绝对值更大的一侧
    let scale = 10f64.powi(digits as i32);
    let rounded = (value.abs() * scale).floor() + 1.0;
    let sign = if value < 0.0 { "-" } else { "" };
    let int_part = (rounded / scale).trunc();
    let frac_part = rounded - int_part * scale;
    if digits == 0 {
        format!("{}{}", sign, int_part)
    } else {
        format!(
            "{}{}.{:0width$}",
            sign,
            int_part,
            frac_part as u64,
            width = digits
        )
    }
}

/// 精确十进制展开中第 `digits + 1` 位为 5 且其后全为 0
///
/// f64 的精确展开不超过 1074 位小数。
fn is_exact_tie(value: f64, digits: usize) -> bool {
    let expansion = format!("{:.1100}", value.abs());
    let Some(fraction) = expansion.split('.').nth(1) else {
        return false;
    };
    let rest = &fraction[digits..];
    rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(70), 70.0)]
    #[case(json!(70.5), 70.5)]
    #[case(json!("175"), 175.0)]
    #[case(json!("  62.5\n"), 62.5)]
    #[case(json!("\u{feff}12"), 12.0)]
    #[case(json!("\u{a0}70\u{feff}"), 70.0)]
    #[case(json!("\u{feff}"), 0.0)]
    #[case(json!(""), 0.0)]
    #[case(json!("   "), 0.0)]
    #[case(json!(null), 0.0)]
    #[case(json!(true), 1.0)]
    #[case(json!(false), 0.0)]
    #[case(json!(".5"), 0.5)]
    #[case(json!("5."), 5.0)]
    #[case(json!("1e3"), 1000.0)]
    #[case(json!("-12"), -12.0)]
    #[case(json!("0x1A"), 26.0)]
    #[case(json!("0b101"), 5.0)]
    #[case(json!("0o17"), 15.0)]
    #[case(json!([]), 0.0)]
    #[case(json!(["80"]), 80.0)]
    #[case(json!([80]), 80.0)]
    fn test_to_number(#[case] input: Value, #[case] expected: f64) {
        assert_eq!(to_number(&input), expected);
    }

    #[rstest]
    #[case(json!("abc"))]
    #[case(json!("70kg"))]
    #[case(json!("nan"))]
    #[case(json!("inf"))]
    #[case(json!("1e"))]
    #[case(json!("0x"))]
    #[case(json!("0xZZ"))]
    #[case(json!("-0x10"))]
    #[case(json!([1, 2]))]
    #[case(json!({ "value": 70 }))]
    fn test_to_number_nan(#[case] input: Value) {
        assert!(to_number(&input).is_nan(), "{input} should convert to NaN");
    }

    #[test]
    fn test_infinity_literals() {
        assert_eq!(parse_numeric_str("Infinity"), f64::INFINITY);
        assert_eq!(parse_numeric_str("+Infinity"), f64::INFINITY);
        assert_eq!(parse_numeric_str(" -Infinity "), f64::NEG_INFINITY);
        assert!(parse_numeric_str("infinity").is_nan());
    }

    #[test]
    fn test_missing_field_is_zero() {
        assert_eq!(to_number_or_zero(None), 0.0);
        assert_eq!(to_number_or_zero(Some(&json!("42"))), 42.0);
    }

    #[test]
    fn test_compute_bmi() {
        let bmi = compute_bmi(70.0, 175.0);
        assert!((bmi - 22.857142857142858).abs() < 1e-12);
    }

    #[test]
    fn test_compute_bmi_zero_height() {
        assert_eq!(compute_bmi(50.0, 0.0), f64::INFINITY);
        assert_eq!(compute_bmi(-50.0, 0.0), f64::NEG_INFINITY);
        assert!(compute_bmi(0.0, 0.0).is_nan());
    }

    #[rstest]
    #[case(22.857142857142858, "22.86")]
    #[case(22.0, "22.00")]
    #[case(0.0, "0.00")]
    #[case(22.125, "22.13")]
    #[case(-22.125, "-22.13")]
    #[case(0.5, "0.50")]
    #[case(18.004, "18.00")]
    #[case(-0.001, "-0.00")]
    #[case(-0.0, "0.00")]
    #[case(f64::NAN, "NaN")]
    #[case(f64::INFINITY, "Infinity")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    fn test_format_fixed_two_digits(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_fixed(value, 2), expected);
    }

    #[test]
    fn test_format_fixed_other_precisions() {
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(1.25, 1), "1.3");
        assert_eq!(format_fixed(1.005, 2), "1.00");
    }
}
