pub mod builtin;
pub mod environment;
pub mod error;
mod evaluator;
pub mod function;
pub mod list;
pub mod reader;
pub mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use evaluator::{EvalResult, Evaluator};
pub use value::{Kind, Value};
