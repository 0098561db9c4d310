//! Element access over list text.
//!
//! Lists are kept as bracketed text, so elements are recovered by scanning
//! with a running bracket depth rather than from a parsed tree.

use crate::value::{Kind, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    First,
    Last,
    ButFirst,
    ButLast,
}

/// Split list interior text into its top-level elements.
///
/// Whitespace at depth 0 ends an element; nested lists stay whole, brackets
/// included. Runs of whitespace never produce empty elements.
pub fn split_top_level(interior: &str) -> Vec<&str> {
    let mut elements = Vec::new();
    let mut depth: i64 = 0;
    let mut start = None;

    for (i, ch) in interior.char_indices() {
        if ch.is_whitespace() && depth == 0 {
            if let Some(s) = start.take() {
                elements.push(&interior[s..i]);
            }
            continue;
        }

        match ch {
            '[' => depth += 1,
            ']' => depth -= 1,
            _ => {}
        }

        if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        elements.push(&interior[s..]);
    }

    elements
}

/// Bracketed groups at the top level of an interior, e.g. `[x y]` and
/// `[add :x :y]` in `[x y][add :x :y]`. Text outside the groups is skipped.
pub fn top_level_groups(interior: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth: i64 = 0;
    let mut start = 0;

    for (i, ch) in interior.char_indices() {
        match ch {
            '[' => {
                depth += 1;
                if depth == 1 {
                    start = i;
                }
            }
            ']' => {
                depth -= 1;
                if depth == 0 {
                    groups.push(&interior[start..=i]);
                }
            }
            _ => {}
        }
    }

    groups
}

/// Element classification: bracketed text is a List, anything else a Word.
fn element_value(element: &str) -> Value {
    if element.starts_with('[') {
        Value::List(element.to_owned())
    } else {
        Value::Word(element.to_owned())
    }
}

fn access_word(word: &str, accessor: Accessor) -> Value {
    let mut chars = word.chars();

    let result: String = match accessor {
        Accessor::First => chars.next().into_iter().collect(),
        Accessor::Last => chars.next_back().into_iter().collect(),
        Accessor::ButFirst => {
            chars.next();
            chars.collect()
        }
        Accessor::ButLast => {
            chars.next_back();
            chars.collect()
        }
    };

    Value::Word(result)
}

fn access_list(interior: &str, accessor: Accessor) -> Value {
    let elements = split_top_level(interior);

    match accessor {
        Accessor::First => elements
            .first()
            .map_or_else(Value::empty_list, |e| element_value(e)),
        Accessor::Last => elements
            .last()
            .map_or_else(Value::empty_list, |e| element_value(e)),
        Accessor::ButFirst => {
            let rest = elements.get(1..).unwrap_or_default();
            Value::List(format!("[{}]", rest.join(" ")))
        }
        Accessor::ButLast => {
            let rest = &elements[..elements.len().saturating_sub(1)];
            Value::List(format!("[{}]", rest.join(" ")))
        }
    }
}

/// `first`, `last`, `butfirst`, `butlast` over a Word or a List.
/// Returns `None` for any other kind.
pub fn access(value: &Value, accessor: Accessor) -> Option<Value> {
    match value {
        Value::Word(word) => Some(access_word(word, accessor)),
        Value::List(text) => {
            let interior = value.interior().unwrap_or(text.as_str());
            Some(access_list(interior.trim(), accessor))
        }
        Value::Erased(Kind::Word) => Some(access_word("", accessor)),
        Value::Erased(Kind::List) => Some(access_list("", accessor)),
        _ => None,
    }
}
