use std::{collections::VecDeque, io::Write};

use rustyline::error::ReadlineError;
use rustyline::Editor;

use mua_interpreter::{Evaluator, RuntimeError};
use mua_parser::TokenSource;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";

/// Token source backed by the line editor. A new line is only prompted for
/// when the evaluator needs another token, so a list can be typed over
/// several lines.
pub struct EditorSource {
    editor: Editor<()>,
    pending: VecDeque<String>,
    exhausted: bool,
}

impl EditorSource {
    pub fn new() -> Self {
        EditorSource {
            // `()` can be used when no completer is required
            editor: Editor::<()>::new(),
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    fn fill(&mut self) {
        while self.pending.is_empty() && !self.exhausted {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    // Skip empty lines
                    if line.trim().is_empty() {
                        continue;
                    }

                    self.editor.add_history_entry(line.as_str());
                    self.pending
                        .extend(line.split_whitespace().map(str::to_owned));
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.exhausted = true
                }
                Err(err) => {
                    tracing::warn!("line editor failed: {err}");
                    println!("Error: {:?}", err);
                    self.exhausted = true;
                }
            }
        }
    }
}

impl TokenSource for EditorSource {
    fn has_next(&mut self) -> bool {
        self.fill();
        !self.pending.is_empty()
    }

    fn next_token(&mut self) -> Option<String> {
        self.fill();
        self.pending.pop_front()
    }
}

pub fn repl<W: Write>(evaluator: &mut Evaluator<W>) -> Result<(), RuntimeError> {
    println!("mua language v{}", VERSION);

    let mut source = EditorSource::new();
    evaluator.run(&mut source)?;

    Ok(())
}
