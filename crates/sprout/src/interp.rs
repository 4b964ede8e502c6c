//! Tree-walking evaluator.

use std::cell::Cell;
use std::collections::HashMap;

use crate::ast::{BinOp, Block, Expr, FnDef, Stmt, UnOp};
use crate::env::Env;
use crate::error::EvalError;
use crate::value::Value;

/// Maximum user-function call depth. Recursion past this point fails
/// with `EvalError::RecursionLimit` instead of overflowing the stack.
pub const MAX_CALL_DEPTH: usize = 128;

/// Evaluator over a module's function table and global bindings.
pub(crate) struct Interp<'m> {
    functions: &'m HashMap<String, FnDef>,
    globals: &'m HashMap<String, Value>,
    depth: Cell<usize>,
}

impl<'m> Interp<'m> {
    pub(crate) fn new(
        functions: &'m HashMap<String, FnDef>,
        globals: &'m HashMap<String, Value>,
    ) -> Self {
        Self {
            functions,
            globals,
            depth: Cell::new(0),
        }
    }

    /// Call a user-defined function with already-evaluated arguments.
    pub(crate) fn call_function(
        &self,
        def: &FnDef,
        args: &[Value],
    ) -> Result<Value, EvalError> {
        if def.params.len() != args.len() {
            return Err(EvalError::WrongArgCount {
                function: def.name.clone(),
                expected: def.params.len(),
                actual: args.len(),
            });
        }
        if self.depth.get() >= MAX_CALL_DEPTH {
            return Err(EvalError::RecursionLimit(MAX_CALL_DEPTH));
        }
        self.depth.set(self.depth.get() + 1);
        let mut env = Env::new();
        for (param, arg) in def.params.iter().zip(args) {
            env.define(param.clone(), arg.clone());
        }
        let result = self.eval_block(&def.body, &env);
        self.depth.set(self.depth.get() - 1);
        result
    }

    pub(crate) fn eval_block(&self, block: &Block, env: &Env<'_>) -> Result<Value, EvalError> {
        let mut scope = env.child();
        for stmt in &block.stmts {
            match stmt {
                Stmt::Let { name, value } => {
                    let value = self.eval_expr(value, &scope)?;
                    scope.define(name.clone(), value);
                }
                Stmt::Expr(expr) => {
                    self.eval_expr(expr, &scope)?;
                }
            }
        }
        match &block.tail {
            Some(expr) => self.eval_expr(expr, &scope),
            None => Ok(Value::Null),
        }
    }

    pub(crate) fn eval_expr(&self, expr: &Expr, env: &Env<'_>) -> Result<Value, EvalError> {
        match expr {
            Expr::Null => Ok(Value::Null),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Int(i) => Ok(Value::Int(*i)),
            Expr::Float(x) => Ok(Value::Float(*x)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval_expr(item, env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(values))
            }
            Expr::Ident(name) => env
                .get(name)
                .or_else(|| self.globals.get(name))
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            Expr::Unary { op, expr } => {
                let value = self.eval_expr(expr, env)?;
                self.eval_unary(*op, value)
            }
            Expr::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs, env),
            Expr::Call { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                match self.functions.get(name) {
                    Some(def) => self.call_function(def, &values),
                    None => builtin(name, &values),
                }
            }
            Expr::If {
                cond,
                then_block,
                else_block,
            } => {
                let cond = self.eval_expr(cond, env)?;
                match cond {
                    Value::Bool(true) => self.eval_block(then_block, env),
                    Value::Bool(false) => match else_block {
                        Some(block) => self.eval_block(block, env),
                        None => Ok(Value::Null),
                    },
                    other => Err(type_mismatch("bool", &other)),
                }
            }
        }
    }

    fn eval_unary(&self, op: UnOp, value: Value) -> Result<Value, EvalError> {
        match (op, value) {
            (UnOp::Neg, Value::Int(i)) => {
                i.checked_neg().map(Value::Int).ok_or(EvalError::Overflow)
            }
            (UnOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
            (UnOp::Neg, other) => Err(type_mismatch("number", &other)),
            (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnOp::Not, other) => Err(type_mismatch("bool", &other)),
        }
    }

    fn eval_binary(
        &self,
        op: BinOp,
        lhs: &Expr,
        rhs: &Expr,
        env: &Env<'_>,
    ) -> Result<Value, EvalError> {
        // Short-circuit forms evaluate the right side lazily.
        if matches!(op, BinOp::And | BinOp::Or) {
            let lhs = match self.eval_expr(lhs, env)? {
                Value::Bool(b) => b,
                other => return Err(type_mismatch("bool", &other)),
            };
            if (op == BinOp::And && !lhs) || (op == BinOp::Or && lhs) {
                return Ok(Value::Bool(lhs));
            }
            return match self.eval_expr(rhs, env)? {
                Value::Bool(b) => Ok(Value::Bool(b)),
                other => Err(type_mismatch("bool", &other)),
            };
        }

        let lhs = self.eval_expr(lhs, env)?;
        let rhs = self.eval_expr(rhs, env)?;
        match op {
            BinOp::Add => add(lhs, rhs),
            BinOp::Sub => arith(lhs, rhs, "-", |a, b| a - b, checked(i64::checked_sub)),
            BinOp::Mul => arith(lhs, rhs, "*", |a, b| a * b, checked(i64::checked_mul)),
            BinOp::Div => arith(lhs, rhs, "/", |a, b| a / b, |a, b| {
                if b == 0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    a.checked_div(b).ok_or(EvalError::Overflow)
                }
            }),
            BinOp::Rem => arith(lhs, rhs, "%", |a, b| a % b, |a, b| {
                if b == 0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    a.checked_rem(b).ok_or(EvalError::Overflow)
                }
            }),
            BinOp::Eq => Ok(Value::Bool(loose_eq(&lhs, &rhs))),
            BinOp::Ne => Ok(Value::Bool(!loose_eq(&lhs, &rhs))),
            BinOp::Lt => compare(lhs, rhs).map(|o| Value::Bool(o == std::cmp::Ordering::Less)),
            BinOp::Le => compare(lhs, rhs).map(|o| Value::Bool(o != std::cmp::Ordering::Greater)),
            BinOp::Gt => compare(lhs, rhs).map(|o| Value::Bool(o == std::cmp::Ordering::Greater)),
            BinOp::Ge => compare(lhs, rhs).map(|o| Value::Bool(o != std::cmp::Ordering::Less)),
            BinOp::And | BinOp::Or => unreachable!("handled above"),
        }
    }
}

/// `+` adds numbers and concatenates strings and lists.
fn add(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
        (Value::List(mut a), Value::List(b)) => {
            a.extend(b);
            Ok(Value::List(a))
        }
        (lhs, rhs) => arith(lhs, rhs, "+", |a, b| a + b, checked(i64::checked_add)),
    }
}

/// Adapt a checked i64 op into the `arith` error contract.
fn checked(op: fn(i64, i64) -> Option<i64>) -> impl Fn(i64, i64) -> Result<i64, EvalError> {
    move |a, b| op(a, b).ok_or(EvalError::Overflow)
}

/// Numeric binary op: Int op Int stays Int, any Float operand promotes.
/// Integer paths use checked arithmetic; scripts are external input and
/// must never be able to panic the interpreter.
fn arith(
    lhs: Value,
    rhs: Value,
    op: &str,
    float_op: fn(f64, f64) -> f64,
    int_op: impl Fn(i64, i64) -> Result<i64, EvalError>,
) -> Result<Value, EvalError> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => int_op(*a, *b).map(Value::Int),
        _ => {
            let a = lhs.as_f64().ok_or_else(|| operand_mismatch(op, &lhs))?;
            let b = rhs.as_f64().ok_or_else(|| operand_mismatch(op, &rhs))?;
            Ok(Value::Float(float_op(a, b)))
        }
    }
}

/// Equality that treats `1 == 1.0` as true; everything else uses
/// structural equality.
fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => lhs == rhs,
    }
}

/// Ordering for numbers (with promotion) and strings.
fn compare(lhs: Value, rhs: Value) -> Result<std::cmp::Ordering, EvalError> {
    if let (Some(a), Some(b)) = (lhs.as_f64(), rhs.as_f64()) {
        return a
            .partial_cmp(&b)
            .ok_or_else(|| type_mismatch("comparable numbers", &Value::Float(f64::NAN)));
    }
    match (&lhs, &rhs) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => Err(EvalError::TypeMismatch {
            expected: "two numbers or two strings".to_string(),
            actual: format!("{} and {}", lhs.type_name(), rhs.type_name()),
        }),
    }
}

/// Builtin functions, consulted after user-defined functions.
fn builtin(name: &str, args: &[Value]) -> Result<Value, EvalError> {
    match name {
        "len" => {
            let [arg] = expect_args::<1>(name, args)?;
            match arg {
                Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
                Value::List(items) => Ok(Value::Int(items.len() as i64)),
                other => Err(type_mismatch("string or list", other)),
            }
        }
        "str" => {
            let [arg] = expect_args::<1>(name, args)?;
            Ok(Value::Str(arg.to_string()))
        }
        "abs" => {
            let [arg] = expect_args::<1>(name, args)?;
            match arg {
                Value::Int(i) => i.checked_abs().map(Value::Int).ok_or(EvalError::Overflow),
                Value::Float(x) => Ok(Value::Float(x.abs())),
                other => Err(type_mismatch("number", other)),
            }
        }
        "min" => {
            let [a, b] = expect_args::<2>(name, args)?;
            pick(a, b, |ord| ord != std::cmp::Ordering::Greater)
        }
        "max" => {
            let [a, b] = expect_args::<2>(name, args)?;
            pick(a, b, |ord| ord != std::cmp::Ordering::Less)
        }
        "join" => {
            let [list, sep] = expect_args::<2>(name, args)?;
            let items = match list {
                Value::List(items) => items,
                other => return Err(type_mismatch("list", other)),
            };
            let sep = match sep {
                Value::Str(s) => s,
                other => return Err(type_mismatch("string", other)),
            };
            let joined = items
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(sep);
            Ok(Value::Str(joined))
        }
        "fail" => {
            let [message] = expect_args::<1>(name, args)?;
            Err(EvalError::Script(message.to_string()))
        }
        _ => Err(EvalError::UndefinedFunction(name.to_string())),
    }
}

fn pick(
    a: &Value,
    b: &Value,
    keep_first: fn(std::cmp::Ordering) -> bool,
) -> Result<Value, EvalError> {
    let ord = compare(a.clone(), b.clone())?;
    Ok(if keep_first(ord) { a.clone() } else { b.clone() })
}

fn expect_args<'v, const N: usize>(
    name: &str,
    args: &'v [Value],
) -> Result<&'v [Value; N], EvalError> {
    args.try_into().map_err(|_| EvalError::WrongArgCount {
        function: name.to_string(),
        expected: N,
        actual: args.len(),
    })
}

fn type_mismatch(expected: &str, actual: &Value) -> EvalError {
    EvalError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.type_name().to_string(),
    }
}

fn operand_mismatch(op: &str, actual: &Value) -> EvalError {
    EvalError::TypeMismatch {
        expected: format!("number for `{}`", op),
        actual: actual.type_name().to_string(),
    }
}
