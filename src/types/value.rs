//! # Values and the Literal Codec
//!
//! A [`Value`] is a tagged datum: `Null`, or a payload whose variant matches
//! its column's [`DataType`]. The codec here converts between textual
//! literals and typed values.
//!
//! ## Parsing Policy
//!
//! Parsing is lossy by design: a literal that fails to parse as its target
//! type becomes that type's zero value (`0`, `0.0`, `false`) rather than an
//! error. TEXT payloads are truncated to 255 bytes. BOOL accepts `true`
//! (any case) or `1`.
//!
//! ## Formatting
//!
//! Canonical textual forms: integers unpadded, floats with six significant
//! digits, booleans as `true`/`false`, NULL as the literal string `NULL`.

use super::{DataType, MAX_TEXT_LEN};

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    /// Parses a textual literal against a target column type.
    ///
    /// Never fails: ill-formed INT/FLOAT literals yield 0 / 0.0, and any
    /// literal other than `true`/`1` is a false BOOL.
    pub fn parse(literal: &str, ty: DataType) -> Value {
        match ty {
            DataType::Int => Value::Int(literal.trim().parse().unwrap_or(0)),
            DataType::Float => Value::Float(literal.trim().parse().unwrap_or(0.0)),
            DataType::Text => Value::Text(truncate_to_boundary(literal, MAX_TEXT_LEN).to_string()),
            DataType::Bool => {
                let t = literal.trim();
                Value::Bool(t.eq_ignore_ascii_case("true") || t == "1")
            }
        }
    }

    /// Canonical textual form, as returned in result-set cells.
    pub fn format(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Text(s) => s.clone(),
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True when the variant is NULL or matches the column type (I2).
    pub fn matches_type(&self, ty: DataType) -> bool {
        matches!(
            (self, ty),
            (Value::Null, _)
                | (Value::Int(_), DataType::Int)
                | (Value::Float(_), DataType::Float)
                | (Value::Text(_), DataType::Text)
                | (Value::Bool(_), DataType::Bool)
        )
    }
}

/// Formats a float with six significant digits, switching to scientific
/// notation outside [1e-4, 1e6) the way `%.6g` does.
pub fn format_float(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return v.to_string();
    }

    let exp = v.abs().log10().floor() as i32;
    if !(-4..6).contains(&exp) {
        let mantissa = v / 10f64.powi(exp);
        let m = format!("{:.5}", mantissa);
        let m = m.trim_end_matches('0').trim_end_matches('.');
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", m, sign, exp.abs())
    } else {
        let decimals = (5 - exp).max(0) as usize;
        let s = format!("{:.*}", decimals, v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        s.to_string()
    }
}

/// Truncates to at most `max` bytes without splitting a UTF-8 sequence.
pub fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
