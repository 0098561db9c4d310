use std::{fs, io::Write, rc::Rc};

use mua_parser::{Lexer, Token, TokenSource};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    builtin::{self, Builtin},
    environment::Environment,
    error::RuntimeError,
    function::Function,
    list::{self, Accessor},
    reader,
    value::{Kind, Value},
};

pub type EvalResult = Result<Rc<Value>, RuntimeError>;

/// Token-driven evaluator.
///
/// There is no parse phase: a builtin takes its operands by evaluating the
/// following tokens, so `add mul 2 3 1` reads `mul 2 3` as the first operand.
/// The token source is passed explicitly to every call, which lets `run`,
/// `if` and `load` evaluate a different source and leave the caller's as it was.
pub struct Evaluator<W> {
    env: Environment,
    out: W,
    rng: StdRng,
    halted: bool,
}

fn next_raw(source: &mut dyn TokenSource) -> Result<String, RuntimeError> {
    match source.next_token() {
        Some(token) => Ok(token),
        None => Err(input_error(source).unwrap_or(RuntimeError::EndOfInput)),
    }
}

fn input_error(source: &mut dyn TokenSource) -> Option<RuntimeError> {
    source
        .take_error()
        .map(|err| RuntimeError::Input(err.to_string()))
}

impl<W: Write> Evaluator<W> {
    /// Evaluator over the global environment (with `pi`), printing to `out`.
    pub fn new(out: W) -> Self {
        Self::new_with_env(Environment::with_constants(), out)
    }

    pub fn new_with_env(env: Environment, out: W) -> Self {
        Evaluator {
            env,
            out,
            rng: StdRng::from_entropy(),
            halted: false,
        }
    }

    /// Use a fixed seed for `random`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Whether `exit` has been evaluated.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Evaluate tokens until the source is exhausted or `exit` is reached.
    /// Returns the last value produced, if any.
    pub fn run(&mut self, source: &mut dyn TokenSource) -> Result<Option<Rc<Value>>, RuntimeError> {
        let mut last = None;

        while !self.halted && source.has_next() {
            last = Some(self.eval_next(source)?);
        }

        match input_error(source) {
            Some(err) => Err(err),
            None => Ok(last),
        }
    }

    /// Take one token and evaluate the expression it starts.
    pub fn eval_next(&mut self, source: &mut dyn TokenSource) -> EvalResult {
        let token = next_raw(source)?;
        self.eval_token(&token, source)
    }

    pub fn eval_token(&mut self, raw: &str, source: &mut dyn TokenSource) -> EvalResult {
        tracing::trace!(token = raw, "evaluating token");

        match Token::classify(raw) {
            Token::Word(word) => Ok(Rc::new(Value::Word(word.to_owned()))),
            Token::Number(text) => Ok(Rc::new(Value::number_literal(text))),
            Token::Bool(value) => Ok(Rc::new(Value::Bool(value))),
            Token::Thing => {
                let name = self.eval_next(source)?;
                self.lookup(&name.text())
            }
            Token::Variable(name) => self.lookup(name),
            Token::ListStart(first) => Ok(Rc::new(reader::read_bracketed(first, source)?)),
            Token::Name(name) => match Builtin::lookup(name) {
                Some(builtin) => self.apply_builtin(builtin, source),
                None => Err(RuntimeError::UnknownInstruction(name.to_owned())),
            },
        }
    }

    fn lookup(&self, name: &str) -> EvalResult {
        self.env
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_owned()))
    }

    fn apply_builtin(&mut self, builtin: Builtin, source: &mut dyn TokenSource) -> EvalResult {
        use Builtin::*;

        tracing::trace!(builtin = builtin.name(), "applying builtin");

        let value = match builtin {
            Add | Sub | Mul | Div | Mod => {
                let left = self.eval_next(source)?;
                let right = self.eval_next(source)?;
                builtin::arithmetic(builtin, &left, &right)?
            }
            And | Or => {
                let left = self.eval_next(source)?;
                let right = self.eval_next(source)?;
                builtin::logic(builtin, &left, &right)?
            }
            Eq | Gt | Lt => {
                let left = self.eval_next(source)?;
                let right = self.eval_next(source)?;
                builtin::compare(builtin, &left, &right)?
            }
            Not => builtin::not(&*self.eval_next(source)?)?,

            IsNumber => builtin::is_kind(Kind::Number, &*self.eval_next(source)?),
            IsBool => builtin::is_kind(Kind::Bool, &*self.eval_next(source)?),
            IsWord => builtin::is_kind(Kind::Word, &*self.eval_next(source)?),
            IsList => builtin::is_kind(Kind::List, &*self.eval_next(source)?),
            IsEmpty => builtin::is_empty(&*self.eval_next(source)?)?,
            IsName => {
                let name = self.eval_next(source)?;
                Value::Bool(self.env.contains(&name.text()))
            }

            First => self.access(builtin, Accessor::First, source)?,
            Last => self.access(builtin, Accessor::Last, source)?,
            ButFirst => self.access(builtin, Accessor::ButFirst, source)?,
            ButLast => self.access(builtin, Accessor::ButLast, source)?,

            Random => {
                let bound = builtin::numeric_text(&*self.eval_next(source)?)?.trunc();
                Value::number(self.rng.gen::<f64>() * bound)
            }
            Int => Value::integer(builtin::truncate(&*self.eval_next(source)?)?),
            // Negative input gives NaN
            Sqrt => Value::number(builtin::numeric_text(&*self.eval_next(source)?)?.sqrt()),

            Make => return self.make(source),
            Print => return self.print(source),
            Erase => {
                let token = next_raw(source)?;
                return self.erase(&token);
            }
            Load => {
                let token = next_raw(source)?;
                return self.load(token.strip_prefix('"').unwrap_or(&token));
            }
            Run => {
                let list = self.eval_next(source)?;
                return self.run_list(&list);
            }
            If => {
                let condition = self.eval_next(source)?;
                let flag = condition.as_bool().ok_or_else(|| {
                    RuntimeError::type_mismatch(Builtin::If, "BOOL", condition.kind())
                })?;
                let consequence = self.eval_next(source)?;
                let alternative = self.eval_next(source)?;

                return self.run_list(if flag { &consequence } else { &alternative });
            }

            Read => Value::Word(next_raw(source)?),
            Exit => {
                tracing::debug!("exit requested");
                self.halted = true;
                Value::Bool(false)
            }
        };

        Ok(Rc::new(value))
    }

    fn access(
        &mut self,
        builtin: Builtin,
        accessor: Accessor,
        source: &mut dyn TokenSource,
    ) -> Result<Value, RuntimeError> {
        let value = self.eval_next(source)?;
        list::access(&value, accessor)
            .ok_or_else(|| RuntimeError::type_mismatch(builtin, "WORD or LIST", value.kind()))
    }

    fn make(&mut self, source: &mut dyn TokenSource) -> EvalResult {
        let name_value = self.eval_next(source)?;
        let value = self.eval_next(source)?;
        let name = name_value.text().into_owned();

        match Function::from_literal(&name, &value) {
            // Function definitions are recognised but not bound
            Some(func) => tracing::debug!(
                name = func.name(),
                parameters = ?func.parameter_names(),
                "skipping function definition"
            ),
            None => {
                tracing::debug!(name = name.as_str(), kind = %value.kind(), "binding variable");
                self.env.define(name, Rc::clone(&value));
            }
        }

        Ok(value)
    }

    fn print(&mut self, source: &mut dyn TokenSource) -> EvalResult {
        let value = self.eval_next(source)?;

        writeln!(self.out, "{}", value.display_text())
            .and_then(|_| self.out.flush())
            .map_err(|err| RuntimeError::Output(err.to_string()))?;

        Ok(value)
    }

    fn erase(&mut self, token: &str) -> EvalResult {
        let name = token
            .strip_prefix(':')
            .ok_or_else(|| RuntimeError::ExpectedVariable(token.to_owned()))?;

        let erased = Rc::new(self.lookup(name)?.erased());
        tracing::debug!(name, kind = %erased.kind(), "erasing variable");
        self.env.define(name.to_owned(), Rc::clone(&erased));

        Ok(erased)
    }

    /// Evaluate the interior of a list as a token stream. Yields the last
    /// value, or an empty list for an empty body.
    fn run_list(&mut self, list: &Value) -> EvalResult {
        let text = list.text();
        let interior = text
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| RuntimeError::NotAList(text.to_string()))?;

        tracing::debug!(body = interior, "running list");
        let mut lexer = Lexer::new(interior);
        let last = self.run(&mut lexer)?;

        Ok(last.unwrap_or_else(|| Rc::new(Value::empty_list())))
    }

    /// Evaluate a whole file, then carry on with the caller's token source.
    /// Yields the last value, or `true` for an empty file.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &str) -> EvalResult {
        let bytes = fs::read(path).map_err(|err| RuntimeError::FileNotFound {
            path: path.to_owned(),
            reason: err.to_string(),
        })?;
        let contents = String::from_utf8_lossy(&bytes);

        let mut lexer = Lexer::new(&contents);
        let last = self.run(&mut lexer)?;
        tracing::debug!(tokens = lexer.consumed(), "file evaluated");

        Ok(last.unwrap_or_else(|| Rc::new(Value::Bool(true))))
    }
}
