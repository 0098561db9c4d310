use std::collections::VecDeque;
use std::io::{self, BufRead};

/// A pull-based cursor over whitespace-delimited tokens.
///
/// Nested evaluation (`run`, `if`, `load`) hands the evaluator a different
/// source for the duration of the call; the outer source is left untouched
/// and picks up where it stopped once the nested call returns.
pub trait TokenSource {
    /// Whether another token can be taken. May block waiting for input.
    fn has_next(&mut self) -> bool;

    /// Take the next token, or `None` once the source is exhausted.
    fn next_token(&mut self) -> Option<String>;

    /// The read failure that ended the source early, if there was one.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}

/// Token source that reads lines lazily from a buffered reader.
///
/// Lines are only read when a token is needed, so a list literal can span
/// several lines of standard input. Invalid UTF-8 is replaced rather than
/// ending the stream.
pub struct ReaderSource<R> {
    reader: R,
    pending: VecDeque<String>,
    exhausted: bool,
    error: Option<io::Error>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            pending: VecDeque::new(),
            exhausted: false,
            error: None,
        }
    }

    /// Read lines until at least one token is pending or the reader ends.
    fn fill(&mut self) {
        let mut line = Vec::new();

        while self.pending.is_empty() && !self.exhausted {
            line.clear();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => self.exhausted = true,
                Ok(_) => self.pending.extend(
                    String::from_utf8_lossy(&line)
                        .split_whitespace()
                        .map(str::to_owned),
                ),
                Err(err) => {
                    tracing::error!("failed to read input: {}", err);
                    self.error = Some(err);
                    self.exhausted = true;
                }
            }
        }
    }
}

impl<R: BufRead> TokenSource for ReaderSource<R> {
    fn has_next(&mut self) -> bool {
        self.fill();
        !self.pending.is_empty()
    }

    fn next_token(&mut self) -> Option<String> {
        self.fill();
        self.pending.pop_front()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}
