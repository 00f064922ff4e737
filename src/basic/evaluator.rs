//! Expression evaluation: type coercion, operator semantics, and call
//! dispatch (arrays, builtins, user-defined `FN`) against an `EvalContext`
//! supplied by the interpreter.

use crate::basic::ast::{BinaryOp, Expr, UnaryOp};
use crate::basic::builtins;
use crate::basic::value::Value;
use crate::error::{EngineError, EngineResult, SourcePos};
use rand::RngCore;

/// What the evaluator needs from the interpreter: variable/array storage,
/// the user-defined-function table, and a source of randomness for `RND`.
pub trait EvalContext {
    fn get_var(&mut self, name: &str) -> EngineResult<Value>;
    fn get_array(&mut self, name: &str, indices: &[i64], pos: SourcePos) -> EngineResult<Value>;
    /// `Ok(None)` if `name` (without its `FN` prefix) is not defined.
    fn call_user_fn(&mut self, name: &str, args: &[Value], pos: SourcePos) -> EngineResult<Option<Value>>;
    fn rng(&mut self) -> &mut dyn RngCore;
}

pub fn eval(expr: &Expr, ctx: &mut dyn EvalContext) -> EngineResult<Value> {
    match expr {
        Expr::IntegerLit(n) => Ok(Value::Integer(*n)),
        Expr::NumberLit(n) => Ok(Value::Number(*n)),
        Expr::StringLit(s) => Ok(Value::Str(s.clone())),
        Expr::Var(name) => ctx.get_var(name),
        Expr::Call(name, arg_exprs) => eval_call(name, arg_exprs, ctx),
        Expr::Unary(op, inner, pos) => eval_unary(*op, inner, *pos, ctx),
        Expr::Binary(op, lhs, rhs, pos) => eval_binary(*op, lhs, rhs, *pos, ctx),
    }
}

fn eval_call(name: &str, arg_exprs: &[Expr], ctx: &mut dyn EvalContext) -> EngineResult<Value> {
    let mut args = Vec::with_capacity(arg_exprs.len());
    for e in arg_exprs {
        args.push(eval(e, ctx)?);
    }
    let pos = SourcePos::default();
    if let Some(bare) = name.strip_prefix("FN") {
        if let Some(v) = ctx.call_user_fn(bare, &args, pos)? {
            return Ok(v);
        }
    }
    if builtins::is_builtin(name) {
        let mut rng_holder = RngAdapter(ctx.rng());
        return builtins::call(name, &args, pos, &mut rng_holder);
    }
    let indices: Vec<i64> = args
        .iter()
        .map(|v| v.as_integer(Some(pos)))
        .collect::<EngineResult<_>>()?;
    ctx.get_array(name, &indices, pos)
}

/// Adapts `&mut dyn RngCore` to `rand::Rng`'s blanket trait bound.
struct RngAdapter<'a>(&'a mut dyn RngCore);
impl<'a> RngCore for RngAdapter<'a> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

fn eval_unary(op: UnaryOp, inner: &Expr, pos: SourcePos, ctx: &mut dyn EvalContext) -> EngineResult<Value> {
    let v = eval(inner, ctx)?;
    match op {
        UnaryOp::Neg => Ok(Value::Number(-v.as_number(Some(pos))?)),
        UnaryOp::Pos => Ok(Value::Number(v.as_number(Some(pos))?)),
        UnaryOp::Not => Ok(Value::from_bool(!v.is_truthy(Some(pos))?)),
    }
}

fn eval_binary(
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    pos: SourcePos,
    ctx: &mut dyn EvalContext,
) -> EngineResult<Value> {
    let l = eval(lhs, ctx)?;
    let r = eval(rhs, ctx)?;
    let p = Some(pos);

    match op {
        BinaryOp::Add => {
            if l.is_string() && r.is_string() {
                Ok(Value::Str(format!("{}{}", l.as_str(p)?, r.as_str(p)?)))
            } else if l.is_string() || r.is_string() {
                Err(EngineError::TypeMismatch(p))
            } else {
                Ok(numeric_result(&l, &r, l.as_number(p)? + r.as_number(p)?))
            }
        }
        BinaryOp::Sub => Ok(numeric_result(&l, &r, l.as_number(p)? - r.as_number(p)?)),
        BinaryOp::Mul => Ok(numeric_result(&l, &r, l.as_number(p)? * r.as_number(p)?)),
        BinaryOp::Div => {
            let divisor = r.as_number(p)?;
            if divisor == 0.0 {
                return Err(EngineError::DivisionByZero);
            }
            Ok(Value::Number(l.as_number(p)? / divisor))
        }
        BinaryOp::Mod => {
            let divisor = r.as_integer(p)?;
            if divisor == 0 {
                return Err(EngineError::DivisionByZero);
            }
            Ok(Value::Integer(l.as_integer(p)? % divisor))
        }
        BinaryOp::Pow => Ok(Value::Number(l.as_number(p)?.powf(r.as_number(p)?))),
        BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            compare(op, &l, &r, pos)
        }
        BinaryOp::And => Ok(Value::from_bool(l.is_truthy(p)? && r.is_truthy(p)?)),
        BinaryOp::Or => Ok(Value::from_bool(l.is_truthy(p)? || r.is_truthy(p)?)),
    }
}

/// `+ -` promote Integer to Number only when the operands actually mix;
/// two integers stay integral.
fn numeric_result(l: &Value, r: &Value, result: f64) -> Value {
    match (l, r) {
        (Value::Integer(_), Value::Integer(_)) => Value::Integer(result as i64),
        _ => Value::Number(result),
    }
}

fn compare(op: BinaryOp, l: &Value, r: &Value, pos: SourcePos) -> EngineResult<Value> {
    let p = Some(pos);
    let ordering = if l.is_string() && r.is_string() {
        l.as_str(p)?.cmp(r.as_str(p)?)
    } else if !l.is_string() && !r.is_string() {
        l.as_number(p)?
            .partial_cmp(&r.as_number(p)?)
            .ok_or(EngineError::TypeMismatch(p))?
    } else {
        return Err(EngineError::TypeMismatch(p));
    };
    use std::cmp::Ordering::*;
    let truth = match (op, ordering) {
        (BinaryOp::Eq, Equal) => true,
        (BinaryOp::Ne, Less) | (BinaryOp::Ne, Greater) => true,
        (BinaryOp::Lt, Less) => true,
        (BinaryOp::Le, Less) | (BinaryOp::Le, Equal) => true,
        (BinaryOp::Gt, Greater) => true,
        (BinaryOp::Ge, Greater) | (BinaryOp::Ge, Equal) => true,
        _ => false,
    };
    Ok(Value::from_bool(truth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestCtx {
        vars: HashMap<String, Value>,
        rng: rand::rngs::StdRng,
    }

    impl EvalContext for TestCtx {
        fn get_var(&mut self, name: &str) -> EngineResult<Value> {
            Ok(self.vars.get(name).cloned().unwrap_or(Value::default_for_name(name)))
        }
        fn get_array(&mut self, _name: &str, _indices: &[i64], _pos: SourcePos) -> EngineResult<Value> {
            Err(EngineError::SubscriptOutOfRange)
        }
        fn call_user_fn(&mut self, _name: &str, _args: &[Value], _pos: SourcePos) -> EngineResult<Option<Value>> {
            Ok(None)
        }
        fn rng(&mut self) -> &mut dyn RngCore {
            &mut self.rng
        }
    }

    fn ctx() -> TestCtx {
        use rand::SeedableRng;
        TestCtx {
            vars: HashMap::new(),
            rng: rand::rngs::StdRng::seed_from_u64(0),
        }
    }

    #[test]
    fn string_plus_string_concatenates() {
        let mut c = ctx();
        let e = Expr::Binary(
            BinaryOp::Add,
            Box::new(Expr::StringLit("HEL".into())),
            Box::new(Expr::StringLit("-RLD".into())),
            SourcePos::default(),
        );
        assert_eq!(eval(&e, &mut c).unwrap(), Value::Str("HEL-RLD".into()));
    }

    #[test]
    fn division_by_zero_errors() {
        let mut c = ctx();
        let e = Expr::Binary(
            BinaryOp::Div,
            Box::new(Expr::IntegerLit(1)),
            Box::new(Expr::IntegerLit(0)),
            SourcePos::default(),
        );
        assert!(matches!(eval(&e, &mut c), Err(EngineError::DivisionByZero)));
    }

    #[test]
    fn comparison_yields_negative_one_for_true() {
        let mut c = ctx();
        let e = Expr::Binary(
            BinaryOp::Lt,
            Box::new(Expr::IntegerLit(1)),
            Box::new(Expr::IntegerLit(2)),
            SourcePos::default(),
        );
        assert_eq!(eval(&e, &mut c).unwrap(), Value::Integer(-1));
    }

    #[test]
    fn mixed_int_and_number_addition_promotes_to_number() {
        let mut c = ctx();
        let e = Expr::Binary(
            BinaryOp::Add,
            Box::new(Expr::IntegerLit(1)),
            Box::new(Expr::NumberLit(0.5)),
            SourcePos::default(),
        );
        assert_eq!(eval(&e, &mut c).unwrap(), Value::Number(1.5));
    }
}
