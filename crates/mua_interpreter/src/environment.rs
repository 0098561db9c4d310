use std::{collections::HashMap, rc::Rc};

use crate::value::Value;

/// One level of variables. Last write wins.
pub type Frame = HashMap<String, Rc<Value>>;

/// Stack of variable frames. The top frame is the one `make`, `thing` and
/// `:name` work against.
///
/// Only the global frame exists while function calls are unsupported, but
/// lookups that span frames (`isname`) already walk the whole stack.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::new()],
        }
    }

    /// Global environment with the built-in constants (`pi`).
    pub fn with_constants() -> Self {
        let mut env = Self::new();
        env.define("pi".into(), Rc::new(Value::number_literal("3.14159")));
        env
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Pop the top frame. The global frame is never popped.
    pub fn pop_frame(&mut self) -> Option<Frame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Look a name up in the top frame only.
    pub fn get(&self, name: &str) -> Option<Rc<Value>> {
        self.top().get(name).map(Rc::clone)
    }

    pub fn define(&mut self, name: String, value: Rc<Value>) {
        self.top_mut().insert(name, value);
    }

    /// Whether any frame, top to bottom, binds the name. Leaves the stack as is.
    pub fn contains(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|frame| frame.contains_key(name))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn top(&self) -> &Frame {
        // The constructor pushes the global frame and `pop_frame` keeps it
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        environment::{Environment, Frame},
        value::Value,
    };

    #[test]
    pub fn test_depth() {
        let mut env = Environment::new();
        assert_eq!(env.depth(), 1);

        env.push_frame(Frame::new());
        assert_eq!(env.depth(), 2);

        env.push_frame(Frame::new());
        assert_eq!(env.depth(), 3);

        assert!(env.pop_frame().is_some());
        assert!(env.pop_frame().is_some());
        assert!(env.pop_frame().is_none());
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn constants_are_seeded() {
        let env = Environment::with_constants();
        assert_eq!(
            env.get("pi").as_deref(),
            Some(&Value::number_literal("3.14159"))
        );
        assert!(Environment::new().get("pi").is_none());
    }

    #[test]
    fn last_write_wins() {
        let mut env = Environment::new();
        env.define("x".into(), Rc::new(Value::number_literal("1")));
        env.define("x".into(), Rc::new(Value::Word("two".into())));

        assert_eq!(env.get("x").as_deref(), Some(&Value::Word("two".into())));
    }

    #[test]
    fn get_only_sees_top_frame() {
        let mut env = Environment::new();
        env.define("outer".into(), Rc::new(Value::Bool(true)));
        env.push_frame(Frame::new());
        env.define("inner".into(), Rc::new(Value::Bool(false)));

        assert!(env.get("outer").is_none());
        assert!(env.get("inner").is_some());
    }

    #[test]
    fn contains_walks_every_frame_without_popping() {
        let mut env = Environment::new();
        env.define("outer".into(), Rc::new(Value::Bool(true)));
        env.push_frame(Frame::new());
        env.push_frame(Frame::new());

        assert!(env.contains("outer"));
        assert!(!env.contains("missing"));
        assert_eq!(env.depth(), 3);
        assert!(env.contains("outer"));
    }
}
