pub mod lexer;
pub mod source;
pub mod token;

pub use lexer::Lexer;
pub use source::{ReaderSource, TokenSource};
pub use token::Token;
