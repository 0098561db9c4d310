use std::{cmp::Ordering, fmt::Display};

use crate::{
    error::RuntimeError,
    value::{Kind, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Make,
    Print,
    Erase,
    Random,
    Int,
    Sqrt,
    Load,
    IsName,
    IsNumber,
    IsBool,
    IsWord,
    IsList,
    IsEmpty,
    And,
    Or,
    Not,
    Run,
    If,
    Eq,
    Gt,
    Lt,
    First,
    Last,
    ButFirst,
    ButLast,
    Read,
    Exit,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        use Builtin::*;

        let builtin = match name {
            "add" => Add,
            "sub" => Sub,
            "mul" => Mul,
            "div" => Div,
            "mod" => Mod,
            "make" => Make,
            "print" => Print,
            "erase" => Erase,
            "random" => Random,
            "int" => Int,
            "sqrt" => Sqrt,
            "load" => Load,
            "isname" => IsName,
            "isnumber" => IsNumber,
            "isbool" => IsBool,
            "isword" => IsWord,
            "islist" => IsList,
            "isempty" => IsEmpty,
            "and" => And,
            "or" => Or,
            "not" => Not,
            "run" => Run,
            "if" => If,
            "eq" => Eq,
            "gt" => Gt,
            "lt" => Lt,
            "first" => First,
            "last" => Last,
            "butfirst" => ButFirst,
            "butlast" => ButLast,
            "read" => Read,
            "exit" => Exit,
            _ => return None,
        };

        Some(builtin)
    }

    pub fn name(&self) -> &'static str {
        use Builtin::*;

        match self {
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Div => "div",
            Mod => "mod",
            Make => "make",
            Print => "print",
            Erase => "erase",
            Random => "random",
            Int => "int",
            Sqrt => "sqrt",
            Load => "load",
            IsName => "isname",
            IsNumber => "isnumber",
            IsBool => "isbool",
            IsWord => "isword",
            IsList => "islist",
            IsEmpty => "isempty",
            And => "and",
            Or => "or",
            Not => "not",
            Run => "run",
            If => "if",
            Eq => "eq",
            Gt => "gt",
            Lt => "lt",
            First => "first",
            Last => "last",
            ButFirst => "butfirst",
            ButLast => "butlast",
            Read => "read",
            Exit => "exit",
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Float value of an arithmetic operand, which must be a Number.
pub fn number_operand(builtin: Builtin, value: &Value) -> Result<f64, RuntimeError> {
    match value {
        Value::Number(number) => number
            .value()
            .ok_or_else(|| RuntimeError::MalformedNumber(number.text().to_owned())),
        Value::Erased(Kind::Number) => Err(RuntimeError::MalformedNumber(String::new())),
        other => Err(RuntimeError::type_mismatch(builtin, "NUMBER", other.kind())),
    }
}

/// Float value of any operand whose text reads as a number (`random`, `int`, `sqrt`).
pub fn numeric_text(value: &Value) -> Result<f64, RuntimeError> {
    if let Value::Number(number) = value {
        if let Some(v) = number.value() {
            return Ok(v);
        }
    }

    let text = value.text();
    text.trim()
        .parse()
        .map_err(|_| RuntimeError::MalformedNumber(text.into_owned()))
}

/// Integer part of a numeric operand. Values outside the `i64` range,
/// including NaN and the infinities, are rejected.
pub fn truncate(value: &Value) -> Result<i64, RuntimeError> {
    let truncated = numeric_text(value)?.trunc();

    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Ok(truncated as i64)
    } else {
        Err(RuntimeError::MalformedNumber(value.text().into_owned()))
    }
}

pub fn arithmetic(builtin: Builtin, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let left_value = number_operand(builtin, left)?;
    let right_value = number_operand(builtin, right)?;

    let result = match builtin {
        Builtin::Add => left_value + right_value,
        Builtin::Sub => left_value - right_value,
        Builtin::Mul => left_value * right_value,
        Builtin::Div | Builtin::Mod if right_value == 0.0 => {
            return Err(RuntimeError::DivisionByZero)
        }
        Builtin::Div => left_value / right_value,
        Builtin::Mod => left_value % right_value,
        other => return Err(RuntimeError::UnknownInstruction(other.name().into())),
    };

    Ok(Value::number(result))
}

fn bool_operand(builtin: Builtin, value: &Value) -> Result<bool, RuntimeError> {
    value
        .as_bool()
        .ok_or_else(|| RuntimeError::type_mismatch(builtin, "BOOL", value.kind()))
}

/// `and` / `or`. Both operands are already evaluated; there is no short circuit.
pub fn logic(builtin: Builtin, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let left_value = bool_operand(builtin, left)?;
    let right_value = bool_operand(builtin, right)?;

    match builtin {
        Builtin::And => Ok(Value::Bool(left_value && right_value)),
        Builtin::Or => Ok(Value::Bool(left_value || right_value)),
        other => Err(RuntimeError::UnknownInstruction(other.name().into())),
    }
}

pub fn not(value: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Bool(!bool_operand(Builtin::Not, value)?))
}

/// `eq` / `gt` / `lt` order the canonical text, never the numeric value:
/// `gt 9 10` is true.
pub fn compare(builtin: Builtin, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let ordering = left.text().cmp(&right.text());

    let result = match builtin {
        Builtin::Eq => ordering == Ordering::Equal,
        Builtin::Gt => ordering == Ordering::Greater,
        Builtin::Lt => ordering == Ordering::Less,
        other => return Err(RuntimeError::UnknownInstruction(other.name().into())),
    };

    Ok(Value::Bool(result))
}

pub fn is_kind(kind: Kind, value: &Value) -> Value {
    Value::Bool(value.kind() == kind)
}

pub fn is_empty(value: &Value) -> Result<Value, RuntimeError> {
    let empty = match value {
        Value::Word(text) => text.trim().is_empty(),
        Value::List(text) => value.interior().unwrap_or(text.as_str()).trim().is_empty(),
        Value::Erased(Kind::Word) | Value::Erased(Kind::List) => true,
        other => {
            return Err(RuntimeError::type_mismatch(
                Builtin::IsEmpty,
                "WORD or LIST",
                other.kind(),
            ))
        }
    };

    Ok(Value::Bool(empty))
}
