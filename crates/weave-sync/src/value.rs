//! Control values.

use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;
use weave_syntax::parse_flag;

/// The current value of a control, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Toggle state.
    Bool(bool),
    /// Whole number.
    Int(i64),
    /// Decimal number.
    Float(f64),
    /// Text or combo selection.
    Text(SmolStr),
}

impl Value {
    /// Reads a value from parsed JSON.
    ///
    /// Numbers become `Int` when they fit an `i64` and `Float` otherwise;
    /// `null`, arrays and objects have no value form.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Bool(flag) => Some(Self::Bool(*flag)),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Int)
                .or_else(|| number.as_f64().map(Self::Float)),
            serde_json::Value::String(text) => Some(Self::Text(SmolStr::new(text))),
            _ => None,
        }
    }

    /// Reads a value from command-line style text.
    ///
    /// `true`/`false` become booleans, then integers and finite floats are
    /// tried; anything else is text.
    #[must_use]
    pub fn from_literal(text: &str) -> Self {
        match text {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(int) = text.parse::<i64>() {
            return Self::Int(int);
        }
        match text.parse::<f64>() {
            Ok(float) if float.is_finite() => Self::Float(float),
            _ => Self::Text(SmolStr::new(text)),
        }
    }

    /// Truthiness used by toggles and flags.
    ///
    /// Numbers are true when non-zero; text uses the flag token set.
    #[must_use]
    pub fn as_flag(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Int(int) => *int != 0,
            Self::Float(float) => *float != 0.0,
            Self::Text(text) => parse_flag(text),
        }
    }

    /// Numeric view of the value, if it has one.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(int) => Some(*int as f64),
            Self::Float(float) => Some(*float).filter(|float| float.is_finite()),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|float| float.is_finite()),
            Self::Bool(_) => None,
        }
    }

    /// Returns the text content, if the value is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(int) => write!(f, "{int}"),
            Self::Float(float) => write_float(f, *float),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Shortest round-trip form that always reads as a float: `2.0`, `0.1`,
/// and an exponent outside `1e-4..1e16` (`1e+16`, `1.5e-05`).
fn write_float(f: &mut fmt::Formatter<'_>, float: f64) -> fmt::Result {
    if float.is_nan() {
        return f.write_str("nan");
    }
    if float.is_infinite() {
        return f.write_str(if float > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = float.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let text = format!("{float:e}");
        let (mantissa, exponent) = text.split_once('e').unwrap_or((&text, "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return write!(f, "{mantissa}e{sign}{digits:0>2}");
    }
    if float.fract() == 0.0 {
        write!(f, "{float:.1}")
    } else {
        write!(f, "{float}")
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(SmolStr::new(value))
    }
}
