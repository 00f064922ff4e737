//! Builtin function table: numeric, string, and utility functions callable
//! from BASIC expressions.

use crate::basic::value::Value;
use crate::error::{EngineError, EngineResult, SourcePos};
use rand::Rng;

pub fn is_builtin(name: &str) -> bool {
    matches!(
        name,
        "ABS" | "INT" | "RND" | "SIN" | "COS" | "TAN" | "ATN" | "EXP" | "LOG" | "SQR" | "ASC"
            | "CHR$" | "LEFT$" | "RIGHT$" | "MID$" | "LEN" | "STR$" | "VAL"
    )
}

/// Dispatches a builtin call. `rng` drives `RND`; callers own its seeding.
pub fn call(
    name: &str,
    args: &[Value],
    pos: SourcePos,
    rng: &mut impl Rng,
) -> EngineResult<Value> {
    let p = Some(pos);
    let num_arg = |i: usize| -> EngineResult<f64> { args[i].as_number(p) };
    let str_arg = |i: usize| -> EngineResult<&str> { args[i].as_str(p) };

    match name {
        "ABS" => Ok(Value::Number(num_arg(0)?.abs())),
        "INT" => Ok(Value::Integer(num_arg(0)?.floor() as i64)),
        "RND" => Ok(Value::Number(rng.gen_range(0.0, 1.0))),
        "SIN" => Ok(Value::Number(num_arg(0)?.sin())),
        "COS" => Ok(Value::Number(num_arg(0)?.cos())),
        "TAN" => Ok(Value::Number(num_arg(0)?.tan())),
        "ATN" => Ok(Value::Number(num_arg(0)?.atan())),
        "EXP" => Ok(Value::Number(num_arg(0)?.exp())),
        "LOG" => {
            let x = num_arg(0)?;
            if x <= 0.0 {
                return Err(EngineError::IllegalFunctionCall);
            }
            Ok(Value::Number(x.ln()))
        }
        "SQR" => {
            let x = num_arg(0)?;
            if x < 0.0 {
                return Err(EngineError::IllegalFunctionCall);
            }
            Ok(Value::Number(x.sqrt()))
        }
        "ASC" => {
            let s = str_arg(0)?;
            let c = s.chars().next().ok_or(EngineError::IllegalFunctionCall)?;
            Ok(Value::Integer(c as i64))
        }
        "CHR$" => {
            let n = args[0].as_integer(p)?;
            let c = u8::try_from(n).map_err(|_| EngineError::IllegalFunctionCall)? as char;
            Ok(Value::Str(c.to_string()))
        }
        "LEFT$" => {
            let s = str_arg(0)?;
            let n = args[1].as_integer(p)?.max(0) as usize;
            Ok(Value::Str(s.chars().take(n).collect()))
        }
        "RIGHT$" => {
            let s = str_arg(0)?;
            let n = args[1].as_integer(p)?.max(0) as usize;
            let len = s.chars().count();
            let skip = len.saturating_sub(n);
            Ok(Value::Str(s.chars().skip(skip).collect()))
        }
        "MID$" => {
            let s = str_arg(0)?;
            let start = args[1].as_integer(p)?.max(1) as usize - 1;
            let chars: Vec<char> = s.chars().collect();
            let take_len = if args.len() > 2 {
                args[2].as_integer(p)?.max(0) as usize
            } else {
                chars.len().saturating_sub(start)
            };
            Ok(Value::Str(
                chars.into_iter().skip(start).take(take_len).collect(),
            ))
        }
        "LEN" => Ok(Value::Integer(str_arg(0)?.chars().count() as i64)),
        "STR$" => Ok(Value::Str(args[0].to_string().trim().to_string())),
        "VAL" => {
            let s = str_arg(0)?.trim();
            let end = s
                .char_indices()
                .take_while(|(i, c)| {
                    c.is_ascii_digit()
                        || *c == '.'
                        || (*i == 0 && (*c == '-' || *c == '+'))
                        || *c == 'e'
                        || *c == 'E'
                })
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            Ok(Value::Number(s[..end].parse().unwrap_or(0.0)))
        }
        _ => Err(EngineError::IllegalFunctionCall),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(1)
    }

    #[test]
    fn left_dollar_and_right_dollar_concat() {
        let mut r = rng();
        let pos = SourcePos::new(1, 1);
        let hel = call("LEFT$", &[Value::Str("HELLO".into()), Value::Integer(3)], pos, &mut r).unwrap();
        let rld = call("RIGHT$", &[Value::Str("WORLD".into()), Value::Integer(3)], pos, &mut r).unwrap();
        assert_eq!(hel, Value::Str("HEL".into()));
        assert_eq!(rld, Value::Str("RLD".into()));
    }

    #[test]
    fn sqr_of_negative_is_illegal_function_call() {
        let mut r = rng();
        let pos = SourcePos::new(1, 1);
        let err = call("SQR", &[Value::Number(-1.0)], pos, &mut r);
        assert!(matches!(err, Err(EngineError::IllegalFunctionCall)));
    }

    #[test]
    fn val_parses_leading_numeric_prefix() {
        let mut r = rng();
        let pos = SourcePos::new(1, 1);
        let v = call("VAL", &[Value::Str("42ABC".into())], pos, &mut r).unwrap();
        assert_eq!(v, Value::Number(42.0));
    }
}
