//! Live controls.
//!
//! A [`Control`] is the realization of one declared field: its kind, the
//! options derived from the field's tokens, its current value and whether an
//! input port is attached.

use smol_str::SmolStr;
use weave_fields::{clamp_to_bounds, FieldDecl, FieldKind, PortKind};

use crate::error::SyncError;
use crate::value::Value;

/// Kind-specific options of a control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlOptions {
    /// Lower bound of a numeric control.
    pub min: Option<f64>,
    /// Upper bound of a numeric control.
    pub max: Option<f64>,
    /// Decimals shown by a numeric control.
    pub precision: u32,
    /// Increment of a numeric control.
    pub step: f64,
    /// Options of a combo control.
    pub values: Vec<SmolStr>,
    /// Exclusivity group of a toggle.
    pub group: Option<SmolStr>,
}

impl ControlOptions {
    /// Derives the options of `decl`.
    #[must_use]
    pub fn from_decl(decl: &FieldDecl) -> Self {
        let kind = decl.kind();
        Self {
            min: decl.info.min,
            max: decl.info.max,
            precision: decl.info.precision,
            step: decl.info.step,
            values: if kind == FieldKind::Combo {
                decl.combo_options()
            } else {
                Vec::new()
            },
            group: decl.group.clone(),
        }
    }
}

/// A live control.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Field name.
    pub name: SmolStr,
    /// Control kind.
    pub kind: FieldKind,
    /// Current value.
    pub value: Value,
    /// Kind-specific options.
    pub options: ControlOptions,
    /// Kind of the attached input port, if any.
    pub port: Option<PortKind>,
}

impl Control {
    /// Creates a control for `decl` holding `value`, with no port attached.
    #[must_use]
    pub fn new(decl: &FieldDecl, value: Value) -> Self {
        Self {
            name: decl.name.clone(),
            kind: decl.kind(),
            value,
            options: ControlOptions::from_decl(decl),
            port: None,
        }
    }

    /// Returns true for a toggle currently set.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.kind == FieldKind::Toggle && self.value == Value::Bool(true)
    }

    /// Converts `value` to this control's kind and options.
    pub fn coerce(&self, value: &Value) -> Result<Value, SyncError> {
        coerce(self.kind, &self.options, value).ok_or_else(|| SyncError::InvalidValue {
            name: self.name.clone(),
            kind: self.kind,
            value: SmolStr::new(value.to_string()),
        })
    }
}

/// Converts `value` for a control of `kind`.
///
/// - toggles take the truthiness of any value
/// - integers take whole numbers, rounding finite floats and parsing text
/// - float-like kinds take any finite number or numeric text
/// - text takes the display form of any value
/// - combos take one of their options
///
/// Numbers are clamped into the bounds. Booleans are not numbers.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#[must_use]
pub fn coerce(kind: FieldKind, options: &ControlOptions, value: &Value) -> Option<Value> {
    match kind {
        FieldKind::Toggle => Some(Value::Bool(value.as_flag())),
        FieldKind::Integer => {
            let number = match value {
                Value::Int(int) => *int as f64,
                Value::Float(_) | Value::Text(_) => value.as_f64()?.round(),
                Value::Bool(_) => return None,
            };
            let clamped = clamp_to_bounds(number, options.min, options.max);
            if clamped < i64::MIN as f64 || clamped >= i64::MAX as f64 {
                return None;
            }
            Some(Value::Int(clamped as i64))
        }
        FieldKind::Float | FieldKind::Slider | FieldKind::Knob => {
            let number = value.as_f64()?;
            Some(Value::Float(clamp_to_bounds(number, options.min, options.max)))
        }
        FieldKind::Text => Some(match value {
            Value::Text(text) => Value::Text(text.clone()),
            other => Value::Text(SmolStr::new(other.to_string())),
        }),
        FieldKind::Combo => {
            let text = value.to_string();
            options
                .values
                .iter()
                .find(|option| option.as_str() == text)
                .map(|option| Value::Text(option.clone()))
        }
    }
}

/// Initial value of a newly created control for `decl`.
#[must_use]
pub fn default_value(decl: &FieldDecl, toggle_default: bool) -> Value {
    match decl.kind() {
        FieldKind::Toggle => Value::Bool(decl.flag_default(toggle_default)),
        FieldKind::Integer => {
            coerce(FieldKind::Integer, &ControlOptions::from_decl(decl), &Value::Int(0))
                .unwrap_or(Value::Int(0))
        }
        FieldKind::Float | FieldKind::Slider | FieldKind::Knob => {
            Value::Float(clamp_to_bounds(0.0, decl.info.min, decl.info.max))
        }
        FieldKind::Text => Value::Text(decl.text_default()),
        FieldKind::Combo => Value::Text(decl.combo_default().unwrap_or_default()),
    }
}
