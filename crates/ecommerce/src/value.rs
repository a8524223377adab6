//! Value helpers shared by every normalization step.
//!
//! Event payloads arrive from browser tag managers, so coercions follow the
//! rules those producers apply: `String(v)` for stringification and
//! `parseInt` for integer parsing.

use serde_json::{Number, Value};

/// Presence test used wherever a field is checked before forwarding.
///
/// `null`, NaN, `[]` and `{}` are absent; every string (including empty and
/// whitespace-only) is present.
pub fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Number(n) => n.as_f64().map_or(true, |f| !f.is_nan()),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(_) | Value::Bool(_) => true,
    }
}

/// Stringify a value the way the event producer would.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    let abs = f.abs();
    if f == 0.0 {
        "0".to_string()
    } else if abs >= 1e21 || abs < 1e-6 {
        // Exponent form always carries a sign: 1e+21, 1.5e-7
        let formatted = format!("{f:e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        }
    } else if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Parse the leading integer of a string: optional whitespace, optional sign,
/// optional `0x` prefix, then the longest run of digits. `None` when no digit
/// is found.
pub fn parse_int(input: &str) -> Option<Number> {
    let s = input.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let digits: &str = {
        let end = s
            .char_indices()
            .find(|(_, c)| !c.is_digit(radix))
            .map_or(s.len(), |(i, _)| i);
        &s[..end]
    };
    if digits.is_empty() {
        return None;
    }

    if let Ok(parsed) = i64::from_str_radix(digits, radix) {
        return Some(Number::from(if negative { -parsed } else { parsed }));
    }

    // Beyond i64: fall back to a float accumulation
    let magnitude = digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0f64, |acc, d| acc * radix as f64 + d as f64);
    Number::from_f64(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_meaningful() {
        assert!(!is_meaningful(&json!(null)));
        assert!(!is_meaningful(&json!([])));
        assert!(!is_meaningful(&json!({})));

        assert!(is_meaningful(&json!("")));
        assert!(is_meaningful(&json!("   ")));
        assert!(is_meaningful(&json!(0)));
        assert!(is_meaningful(&json!(false)));
        assert!(is_meaningful(&json!([null])));
        assert!(is_meaningful(&json!({"a": null})));
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!(10)), "10");
        assert_eq!(stringify(&json!(-3)), "-3");
        assert_eq!(stringify(&json!(10.0)), "10");
        assert_eq!(stringify(&json!(29.99)), "29.99");
        assert_eq!(stringify(&json!(1e21)), "1e+21");
        assert_eq!(stringify(&json!(1.5e-7)), "1.5e-7");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(["a", 1, null, [2, 3]])), "a,1,,2,3");
        assert_eq!(stringify(&json!({"k": "v"})), "[object Object]");
        assert_eq!(stringify(&json!("as-is")), "as-is");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(Number::from(42)));
        assert_eq!(parse_int("  -7 apples"), Some(Number::from(-7)));
        assert_eq!(parse_int("+3.9"), Some(Number::from(3)));
        assert_eq!(parse_int("0x1A"), Some(Number::from(26)));
        assert_eq!(parse_int("1670502437000"), Some(Number::from(1_670_502_437_000i64)));
        assert!(parse_int("abc").is_none());
        assert!(parse_int("").is_none());
        assert!(parse_int("-").is_none());
        assert!(parse_int("true").is_none());

        let huge = parse_int("123456789012345678901234567890").unwrap();
        assert!(huge.as_f64().unwrap() > 1e29);
    }
}
