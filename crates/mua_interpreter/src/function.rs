use crate::{environment::Frame, list::top_level_groups, value::Value};

/// A user function definition: parameter list, body and a private table of
/// locals.
///
/// Functions are recognised and described but never called; `make` on a
/// function value does not bind it.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    parameters: Value,
    body: Value,
    locals: Frame,
}

impl Function {
    pub fn new(name: String, parameters: Value, body: Value) -> Self {
        Function {
            name,
            parameters,
            body,
            locals: Frame::new(),
        }
    }

    /// Split a `[[params][body]]` literal into its two groups.
    pub fn from_literal(name: &str, literal: &Value) -> Option<Function> {
        let interior = match literal {
            Value::Function(_) => literal.interior()?,
            _ => return None,
        };

        match top_level_groups(interior).as_slice() {
            [parameters, body] => Some(Function::new(
                name.to_owned(),
                Value::List((*parameters).to_owned()),
                Value::List((*body).to_owned()),
            )),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Parameter names, in order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters
            .interior()
            .map(|p| p.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn locals(&self) -> &Frame {
        &self.locals
    }

    /// Literal text, `[` params body `]`.
    pub fn text(&self) -> String {
        format!("[{}{}]", self.parameters.text(), self.body.text())
    }
}
