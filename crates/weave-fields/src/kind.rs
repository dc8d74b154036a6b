//! Field and port kinds.

use std::fmt;

/// The control kind a field is realized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Selection from an enumerated list of strings.
    Combo,
    /// Whole number entry.
    Integer,
    /// Decimal number entry.
    Float,
    /// Decimal number on a slider.
    Slider,
    /// Decimal number on a knob.
    Knob,
    /// Boolean switch.
    Toggle,
    /// Free text.
    Text,
}

/// Kind of the external input port a field may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Boolean input.
    Boolean,
    /// Integer input.
    Integer,
    /// Float input.
    Float,
    /// String input.
    String,
    /// Enumerated (combo) input.
    Enumerated,
}

const COMBO_TOKENS: [&str; 4] = ["COMBO", "CMB", "SELECT", "SEL"];
const INTEGER_TOKENS: [&str; 4] = ["INT", "INTEGER", "NUM", "NUMBER"];
const TOGGLE_TOKENS: [&str; 6] = ["B", "BOOL", "BOOLEAN", "FLAG", "FLG", "CHECK"];
const MAX_PRECISION_SUFFIX: u32 = 5;

impl FieldKind {
    /// Classifies a type token, ignoring case. Unknown tokens are [`FieldKind::Text`].
    #[must_use]
    pub fn classify(type_token: &str) -> Self {
        Self::classify_with_suffix(type_token).0
    }

    /// Classifies a type token and returns its trailing precision digit, if any.
    ///
    /// Only `REAL`, `FLOAT`, `SLIDER` and `KNOB` accept a suffix, `1` to `5`.
    #[must_use]
    pub fn classify_with_suffix(type_token: &str) -> (Self, Option<u32>) {
        let upper = type_token.trim().to_ascii_uppercase();
        let token = upper.as_str();

        if COMBO_TOKENS.contains(&token) {
            return (Self::Combo, None);
        }
        if INTEGER_TOKENS.contains(&token) {
            return (Self::Integer, None);
        }
        if TOGGLE_TOKENS.contains(&token) {
            return (Self::Toggle, None);
        }

        let (base, suffix) = split_precision_suffix(token);
        let kind = match base {
            "REAL" | "FLOAT" => Self::Float,
            "SLIDER" => Self::Slider,
            "KNOB" => Self::Knob,
            _ => return (Self::Text, None),
        };
        (kind, suffix)
    }

    /// Returns true for kinds that hold a number.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Slider | Self::Knob)
    }

    /// Returns the port kind used when the field asks for an external input.
    #[must_use]
    pub fn port_kind(self) -> PortKind {
        match self {
            Self::Combo => PortKind::Enumerated,
            Self::Integer => PortKind::Integer,
            Self::Float | Self::Slider | Self::Knob => PortKind::Float,
            Self::Toggle => PortKind::Boolean,
            Self::Text => PortKind::String,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Combo => "combo",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Slider => "slider",
            Self::Knob => "knob",
            Self::Toggle => "toggle",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PortKind {
    /// Lowercase display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Enumerated => "enumerated",
        }
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn split_precision_suffix(token: &str) -> (&str, Option<u32>) {
    let Some(last) = token.chars().last() else {
        return (token, None);
    };
    match last.to_digit(10) {
        Some(digit @ 1..=MAX_PRECISION_SUFFIX) => (&token[..token.len() - 1], Some(digit)),
        _ => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        let cases = [
            ("combo", FieldKind::Combo),
            ("SEL", FieldKind::Combo),
            ("int", FieldKind::Integer),
            ("Number", FieldKind::Integer),
            ("REAL", FieldKind::Float),
            ("float5", FieldKind::Float),
            ("slider", FieldKind::Slider),
            ("SLIDER3", FieldKind::Slider),
            ("knob1", FieldKind::Knob),
            ("b", FieldKind::Toggle),
            ("check", FieldKind::Toggle),
            ("STRING", FieldKind::Text),
            ("", FieldKind::Text),
            ("whatever", FieldKind::Text),
        ];
        for (token, kind) in cases {
            assert_eq!(FieldKind::classify(token), kind, "{token}");
        }
    }

    #[test]
    fn suffix_limits() {
        assert_eq!(FieldKind::classify("FLOAT6"), FieldKind::Text);
        assert_eq!(FieldKind::classify("FLOAT0"), FieldKind::Text);
        assert_eq!(FieldKind::classify("INT2"), FieldKind::Text);
        assert_eq!(
            FieldKind::classify_with_suffix("real3"),
            (FieldKind::Float, Some(3))
        );
        assert_eq!(
            FieldKind::classify_with_suffix("knob"),
            (FieldKind::Knob, None)
        );
    }

    #[test]
    fn port_kinds() {
        assert_eq!(FieldKind::Combo.port_kind(), PortKind::Enumerated);
        assert_eq!(FieldKind::Slider.port_kind(), PortKind::Float);
        assert_eq!(FieldKind::Toggle.port_kind(), PortKind::Boolean);
        assert_eq!(FieldKind::Text.port_kind(), PortKind::String);
    }
}
