use std::fmt;

/// How the dispatcher reads a single raw token, before any builtin lookup.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token<'a> {
    /// `"abc` quoted word, quote stripped
    Word(&'a str),
    /// Anything passing the lenient numeric check
    Number(&'a str),
    Bool(bool),
    /// The `thing` keyword
    Thing,
    /// `:name` variable reference, colon stripped
    Variable(&'a str),
    /// First token of a bracketed literal (`[...`)
    ListStart(&'a str),
    /// Builtin name or unknown instruction
    Name(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Token<'a> {
        use Token::*;

        if let Some(word) = raw.strip_prefix('"') {
            Word(word)
        } else if is_numeric(raw) {
            Number(raw)
        } else if raw == "true" {
            Bool(true)
        } else if raw == "false" {
            Bool(false)
        } else if raw == "thing" {
            Thing
        } else if let Some(name) = raw.strip_prefix(':') {
            Variable(name)
        } else if raw.starts_with('[') {
            ListStart(raw)
        } else {
            Name(raw)
        }
    }
}

/// Lenient numeric check: one leading `0` or `-` is skipped, then every
/// remaining character must be an ASCII digit or `.`.
///
/// This deliberately accepts `-`, `.`, `1.2.3` and `007`; whether the text
/// actually parses as a float is decided later.
pub fn is_numeric(raw: &str) -> bool {
    if raw.is_empty() {
        return false;
    }

    let rest = match raw.as_bytes()[0] {
        b'0' | b'-' => &raw[1..],
        _ => raw,
    };

    rest.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Token::*;

        match self {
            Word(word) => write!(f, "\"{}", word),
            Number(text) => write!(f, "{}", text),
            Bool(value) => write!(f, "{}", value),
            Thing => write!(f, "thing"),
            Variable(name) => write!(f, ":{}", name),
            ListStart(text) | Name(text) => write!(f, "{}", text),
        }
    }
}
