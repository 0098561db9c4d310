use std::iter::Peekable;
use std::str::SplitWhitespace;

use crate::source::TokenSource;

/// In-memory token source over a borrowed string.
///
/// Used for the interior of `run`/`if` bodies and for the contents of
/// loaded files.
pub struct Lexer<'a> {
    words: Peekable<SplitWhitespace<'a>>,
    consumed: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            words: input.split_whitespace().peekable(),
            consumed: 0,
        }
    }

    /// Number of tokens taken so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<'a> TokenSource for Lexer<'a> {
    fn has_next(&mut self) -> bool {
        self.words.peek().is_some()
    }

    fn next_token(&mut self) -> Option<String> {
        let word = self.words.next()?;
        self.consumed += 1;
        Some(word.to_owned())
    }
}
