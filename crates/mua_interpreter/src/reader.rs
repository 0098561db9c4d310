use mua_parser::TokenSource;

use crate::{error::RuntimeError, list::top_level_groups, value::Value};

fn bracket_balance(text: &str) -> i64 {
    text.chars().fold(0, |depth, ch| match ch {
        '[' => depth + 1,
        ']' => depth - 1,
        _ => depth,
    })
}

/// Read a bracketed literal starting at `first`, pulling tokens until the
/// brackets balance. Tokens are joined with a single space.
pub fn read_bracketed(
    first: &str,
    source: &mut dyn TokenSource,
) -> Result<Value, RuntimeError> {
    let mut body = first.to_owned();
    let mut depth = bracket_balance(first);

    while depth != 0 {
        let token = source.next_token().ok_or(RuntimeError::EndOfInput)?;
        depth += bracket_balance(&token);
        body.push(' ');
        body.push_str(&token);
    }

    Ok(classify(body))
}

/// A literal is a Function when its interior is exactly two top-level
/// bracketed groups and starts and ends with a bracket; otherwise a List.
pub fn classify(body: String) -> Value {
    let is_function = match body.strip_prefix('[').and_then(|b| b.strip_suffix(']')) {
        Some(interior) => {
            let trimmed = interior.trim();
            top_level_groups(interior).len() == 2
                && trimmed.starts_with('[')
                && trimmed.ends_with(']')
        }
        None => false,
    };

    if is_function {
        Value::Function(body)
    } else {
        Value::List(body)
    }
}
