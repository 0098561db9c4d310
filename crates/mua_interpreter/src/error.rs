use thiserror::Error;

use crate::{builtin::Builtin, value::Kind};

/// Every runtime error is fatal: it unwinds to the top level, which prints it
/// and stops the program.
#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    /// A token that is neither a literal, a variable reference nor a builtin
    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),
    /// Lookup of a name absent from the current frame
    #[error("The variable [{0}] cannot be found in table.")]
    UndefinedVariable(String),
    /// A builtin got an operand of a kind it does not accept
    #[error("Type of [{builtin}] should be {expected} but got {found}.")]
    TypeMismatch {
        builtin: Builtin,
        expected: &'static str,
        found: Kind,
    },
    #[error("The division cannot be 0.")]
    DivisionByZero,
    /// A Number whose text has no float value (e.g. `1.2.3`)
    #[error("[{0}] is not a valid number.")]
    MalformedNumber(String),
    #[error("This is not a LIST: {0}")]
    NotAList(String),
    /// `erase` wants a `:name` token
    #[error("Expected a variable in the form :name but got {0}")]
    ExpectedVariable(String),
    #[error("{path} ({reason})")]
    FileNotFound { path: String, reason: String },
    /// A token was needed but the token source ran dry
    #[error("Unexpected end of input.")]
    EndOfInput,
    #[error("Failed to read input: {0}")]
    Input(String),
    #[error("Failed to write output: {0}")]
    Output(String),
}

impl RuntimeError {
    pub fn type_mismatch(builtin: Builtin, expected: &'static str, found: Kind) -> Self {
        RuntimeError::TypeMismatch {
            builtin,
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{builtin::Builtin, error::RuntimeError, value::Kind};

    #[test]
    fn messages() {
        let tests = vec![
            (
                RuntimeError::UnknownInstruction("foo".into()),
                "Unknown instruction: foo",
            ),
            (
                RuntimeError::UndefinedVariable("x".into()),
                "The variable [x] cannot be found in table.",
            ),
            (
                RuntimeError::type_mismatch(Builtin::Add, "NUMBER", Kind::Word),
                "Type of [add] should be NUMBER but got WORD.",
            ),
            (RuntimeError::DivisionByZero, "The division cannot be 0."),
            (
                RuntimeError::FileNotFound {
                    path: "missing.mua".into(),
                    reason: "No such file or directory".into(),
                },
                "missing.mua (No such file or directory)",
            ),
        ];

        for (error, expected) in tests {
            assert_eq!(error.to_string(), expected);
        }
    }
}
