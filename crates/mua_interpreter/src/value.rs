use std::{borrow::Cow, fmt::Display};

/// The six kinds a runtime value can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Number,
    Word,
    List,
    Error,
    Function,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        use Kind::*;

        match self {
            Bool => "BOOL",
            Number => "NUMBER",
            Word => "WORD",
            List => "LIST",
            Error => "ERROR",
            Function => "FUNCTION",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A number together with its canonical text.
///
/// Literals keep the spelling they were written with (`5` stays `5`), computed
/// numbers are rendered once at construction. The lenient literal grammar lets
/// through text such as `-` or `1.2.3`, which has no float value.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    value: Option<f64>,
    text: String,
}

impl Number {
    pub fn literal(text: &str) -> Self {
        Number {
            value: text.parse().ok(),
            text: text.to_owned(),
        }
    }

    pub fn from_f64(value: f64) -> Self {
        Number {
            value: Some(value),
            text: format_float(value),
        }
    }

    pub fn from_integer(value: i64) -> Self {
        Number {
            value: Some(value as f64),
            text: value.to_string(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Default float rendering: shortest round-trip digits, always with a
/// fractional part for finite values (`8.0`, `0.30000000000000004`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".into()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".into()
        } else {
            "-Infinity".into()
        }
    } else {
        ryu::Buffer::new().format_finite(value).to_owned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(Number),
    Word(String),
    /// Full bracketed text, outer brackets included
    List(String),
    /// `[[params][body]]` literal text; never invoked
    Function(String),
    Error(String),
    /// What `erase` leaves behind: same kind, empty text
    Erased(Kind),
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number(Number::from_f64(value))
    }

    pub fn integer(value: i64) -> Self {
        Value::Number(Number::from_integer(value))
    }

    pub fn number_literal(text: &str) -> Self {
        Value::Number(Number::literal(text))
    }

    pub fn empty_list() -> Self {
        Value::List("[]".into())
    }

    pub fn kind(&self) -> Kind {
        use Value::*;

        match self {
            Bool(_) => Kind::Bool,
            Number(_) => Kind::Number,
            Word(_) => Kind::Word,
            List(_) => Kind::List,
            Function(_) => Kind::Function,
            Error(_) => Kind::Error,
            Erased(kind) => *kind,
        }
    }

    /// Canonical text. Comparisons (`eq`/`gt`/`lt`) work on this, whatever the kind.
    pub fn text(&self) -> Cow<'_, str> {
        use Value::*;

        match self {
            Bool(true) => Cow::Borrowed("true"),
            Bool(false) => Cow::Borrowed("false"),
            Number(number) => Cow::Borrowed(number.text()),
            Word(text) | List(text) | Function(text) | Error(text) => Cow::Borrowed(text),
            Erased(_) => Cow::Borrowed(""),
        }
    }

    /// Text between the outermost brackets of a List or Function.
    pub fn interior(&self) -> Option<&str> {
        match self {
            Value::List(text) | Value::Function(text) => {
                text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']'))
            }
            _ => None,
        }
    }

    /// What `print` writes: lists lose their outer brackets and surrounding blanks.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            Value::List(_) => match self.interior() {
                Some(interior) => Cow::Borrowed(interior.trim()),
                None => self.text(),
            },
            _ => self.text(),
        }
    }

    /// Truth value of a Bool. An erased Bool reads as `false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            Value::Erased(Kind::Bool) => Some(false),
            _ => None,
        }
    }

    pub fn erased(&self) -> Value {
        Value::Erased(self.kind())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::value::{format_float, Kind, Number, Value};

    #[test]
    fn float_formatting() {
        let tests = vec![
            (8.0, "8.0"),
            (0.0, "0.0"),
            (-2.5, "-2.5"),
            (0.1 + 0.2, "0.30000000000000004"),
            (1e-7, "1e-7"),
            (f64::NAN, "NaN"),
            (f64::INFINITY, "Infinity"),
            (f64::NEG_INFINITY, "-Infinity"),
        ];

        for (input, expected) in tests {
            assert_eq!(format_float(input), expected);
        }
    }

    #[test]
    fn number_literals_keep_their_spelling() {
        let tests = vec![
            ("5", Some(5.0), "5"),
            ("007", Some(7.0), "007"),
            ("-1.50", Some(-1.5), "-1.50"),
            ("-", None, "-"),
            ("1.2.3", None, "1.2.3"),
        ];

        for (input, value, text) in tests {
            let number = Number::literal(input);
            assert_eq!(number.value(), value);
            assert_eq!(number.text(), text);
        }

        assert_eq!(Number::from_integer(-3).text(), "-3");
        assert_eq!(Number::from_f64(8.0).text(), "8.0");
    }

    #[test]
    fn canonical_text() {
        let tests = vec![
            (Value::Bool(true), "true"),
            (Value::Bool(false), "false"),
            (Value::number_literal("42"), "42"),
            (Value::number(42.0), "42.0"),
            (Value::Word("hello".into()), "hello"),
            (Value::List("[a [b c]]".into()), "[a [b c]]"),
            (Value::Function("[[x][print :x]]".into()), "[[x][print :x]]"),
            (Value::Erased(Kind::Number), ""),
        ];

        for (value, expected) in tests {
            assert_eq!(value.text(), expected);
            assert_eq!(value.to_string(), expected);
        }
    }

    #[test]
    fn list_display_strips_outer_brackets() {
        let tests = vec![
            ("[a b [c d] e]", "a b [c d] e"),
            ("[ a b ]", "a b"),
            ("[]", ""),
            ("[[x]]", "[x]"),
        ];

        for (input, expected) in tests {
            assert_eq!(Value::List(input.into()).display_text(), expected);
        }

        // Only lists lose their brackets
        assert_eq!(
            Value::Word("[a]".into()).display_text(),
            "[a]"
        );
        assert_eq!(
            Value::Function("[[x][y]]".into()).display_text(),
            "[[x][y]]"
        );
    }

    #[test]
    fn erase_keeps_kind() {
        let values = vec![
            Value::Bool(true),
            Value::number(1.0),
            Value::Word("w".into()),
            Value::List("[a]".into()),
            Value::Function("[[a][b]]".into()),
        ];

        for value in values {
            let erased = value.erased();
            assert_eq!(erased.kind(), value.kind());
            assert_eq!(erased.text(), "");
        }

        assert_eq!(Value::Bool(true).erased().as_bool(), Some(false));
        assert_eq!(Value::Word("true".into()).as_bool(), None);
    }
}
