//! The BASIC value type and its coercion rules.

use crate::error::{EngineError, EngineResult, SourcePos};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Number(f64),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn as_number(&self, pos: Option<SourcePos>) -> EngineResult<f64> {
        match self {
            Value::Integer(i) => Ok(*i as f64),
            Value::Number(n) => Ok(*n),
            Value::Str(_) => Err(EngineError::TypeMismatch(pos)),
        }
    }

    pub fn as_integer(&self, pos: Option<SourcePos>) -> EngineResult<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            Value::Number(n) => Ok(n.trunc() as i64),
            Value::Str(_) => Err(EngineError::TypeMismatch(pos)),
        }
    }

    pub fn as_str(&self, pos: Option<SourcePos>) -> EngineResult<&str> {
        match self {
            Value::Str(s) => Ok(s),
            _ => Err(EngineError::TypeMismatch(pos)),
        }
    }

    /// The zero value for a freshly-`DIM`'d or implicitly-created variable,
    /// inferred from its sigil: `$` -> empty string, `%` -> integer zero,
    /// bare -> numeric zero.
    pub fn default_for_name(name: &str) -> Value {
        if name.ends_with('$') {
            Value::Str(String::new())
        } else if name.ends_with('%') {
            Value::Integer(0)
        } else {
            Value::Number(0.0)
        }
    }

    /// Boolean-as-integer per historical BASIC: -1 true, 0 false.
    pub fn from_bool(b: bool) -> Value {
        Value::Integer(if b { -1 } else { 0 })
    }

    pub fn is_truthy(&self, pos: Option<SourcePos>) -> EngineResult<bool> {
        Ok(self.as_number(pos)? != 0.0)
    }
}

impl fmt::Display for Value {
    /// PRINT's numeric formatting: a leading space for non-negatives, a
    /// trailing space always; strings print bare.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => {
                if *i >= 0 {
                    write!(f, " {} ", i)
                } else {
                    write!(f, "{} ", i)
                }
            }
            Value::Number(n) => {
                if *n >= 0.0 {
                    write!(f, " {} ", format_float(*n))
                } else {
                    write!(f, "{} ", format_float(*n))
                }
            }
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

fn format_float(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let s = format!("{n}");
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_integer_prints_with_leading_and_trailing_space() {
        assert_eq!(Value::Integer(55).to_string(), " 55 ");
    }

    #[test]
    fn negative_integer_has_no_leading_space() {
        assert_eq!(Value::Integer(-5).to_string(), "-5 ");
    }

    #[test]
    fn string_prints_bare() {
        assert_eq!(Value::Str("HI".into()).to_string(), "HI");
    }

    #[test]
    fn default_for_dollar_name_is_empty_string() {
        assert_eq!(Value::default_for_name("A$"), Value::Str(String::new()));
    }
}
