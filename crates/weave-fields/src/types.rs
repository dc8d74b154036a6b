//! Type mapping: type token to control kind, port kind and numeric shape.

use crate::kind::{FieldKind, PortKind};

/// Precision of `FLOAT`/`REAL` without a digit suffix.
pub const DEFAULT_FLOAT_PRECISION: u32 = 1;

/// Everything a control needs to know about a field's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeInfo {
    /// Control kind.
    pub kind: FieldKind,
    /// Kind of the external input port.
    pub port: PortKind,
    /// Number of decimals shown; 0 for whole numbers and non-numeric kinds.
    pub precision: u32,
    /// Increment between adjacent values, `10^-precision` (1 when precision is 0).
    pub step: f64,
    /// Lower bound, if given and parsable.
    pub min: Option<f64>,
    /// Upper bound, if given and parsable.
    pub max: Option<f64>,
}

/// Clamps `value` into `[min, max]`, leaving open sides unbounded.
#[must_use]
pub fn clamp_to_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let value = min.map_or(value, |min| value.max(min));
    max.map_or(value, |max| value.min(max))
}

/// Maps a type token and its bound tokens to a [`TypeInfo`].
///
/// Bounds are parsed as the field's numeric type (`i64` for integers,
/// finite `f64` otherwise). A token that does not parse leaves that side
/// unbounded. Non-numeric kinds never have bounds. If both bounds parse and
/// `min > max`, they are swapped.
#[must_use]
pub fn map_type(type_token: &str, min_token: &str, max_token: &str) -> TypeInfo {
    let (kind, suffix) = FieldKind::classify_with_suffix(type_token);

    let precision = match kind {
        FieldKind::Float => suffix.map_or(DEFAULT_FLOAT_PRECISION, |digits| digits.max(1)),
        FieldKind::Slider | FieldKind::Knob => suffix.unwrap_or(0),
        _ => 0,
    };

    let (mut min, mut max) = if kind.is_numeric() {
        (parse_bound(kind, min_token), parse_bound(kind, max_token))
    } else {
        (None, None)
    };
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            (min, max) = (Some(hi), Some(lo));
        }
    }

    TypeInfo {
        kind,
        port: kind.port_kind(),
        precision,
        step: step_for(precision),
        min,
        max,
    }
}

/// `10^-precision`, or 1 when that is not a usable positive step.
#[must_use]
pub fn step_for(precision: u32) -> f64 {
    if precision == 0 {
        return 1.0;
    }
    let exponent = i32::try_from(precision).unwrap_or(i32::MAX);
    let step = 10f64.powi(-exponent);
    if step.is_finite() && step > 0.0 {
        step
    } else {
        1.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn parse_bound(kind: FieldKind, token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    match kind {
        FieldKind::Integer => token.parse::<i64>().ok().map(|value| value as f64),
        _ => token.parse::<f64>().ok().filter(|value| value.is_finite()),
    }
}
