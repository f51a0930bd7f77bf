//! Runtime value conventions
//!
//! FSL has a single runtime type: every variable holds a string. A string is
//! numeric when it parses as an `f64`. Two text renderings of numbers exist and
//! must stay distinct: [`format_stored`] for values written back by arithmetic
//! and [`format_printed`] for the `print` built-in.

use serde_json::Value as Json;

/// Marker produced when an indirect argument names a variable that is not bound
pub const UNDEFINED: &str = "undefined";

/// Decimal places used when arithmetic stores its result
pub const STORED_PRECISION: usize = 6;

/// Decimal places used by `print`
pub const PRINTED_PRECISION: usize = 4;

/// Parse a variable value as a 64-bit float
///
/// Accepts everything `f64::from_str` accepts, including `inf`/`+Inf`/`NaN`
/// in any letter case, so non-finite results of arithmetic round-trip. A finite
/// literal too large for an `f64` (`1e400`) is out of range, not infinite.
pub fn parse_number(text: &str) -> Option<f64> {
    let value = text.parse::<f64>().ok()?;
    if value.is_infinite() && !spells_infinity(text) {
        return None;
    }
    Some(value)
}

fn spells_infinity(text: &str) -> bool {
    let magnitude = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    magnitude.eq_ignore_ascii_case("inf") || magnitude.eq_ignore_ascii_case("infinity")
}

/// Render an arithmetic result for storage (`7` -> `7.000000`)
pub fn format_stored(value: f64) -> String {
    format_fixed(value, STORED_PRECISION)
}

/// Render a number for `print` (`3.5` -> `3.5000`)
pub fn format_printed(value: f64) -> String {
    format_fixed(value, PRINTED_PRECISION)
}

fn format_fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Render a JSON scalar as FSL text
///
/// Numbers keep their shortest form (`5`, `3.5`), strings pass through and
/// booleans become `true`/`false`. Returns `None` for null, arrays and objects.
pub fn stringify_scalar(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(number_text(n)),
        Json::Bool(b) => Some(b.to_string()),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

/// Shortest text for a JSON number
///
/// JSON numbers are read as `f64`. Decimal exponents below -4 or from 6 up are
/// written in exponent form with a signed, two-digit exponent (`1e-07`,
/// `1e+21`, `1.5e+06`); everything else in plain decimal (`5`, `3.5`, `0.0001`).
pub fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) => shortest_text(f),
        None => n.to_string(),
    }
}

fn shortest_text(value: f64) -> String {
    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    match exponent.parse::<i32>() {
        Ok(exp) if !(-4..6).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => value.to_string(),
    }
}

/// Human-readable JSON type name for diagnostics
pub fn json_type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
