//! End-to-end language tests: source in, value out.

use sprout::{EvalError, Module, Value};

/// Evaluate a single zero-argument function and return its value.
fn run(source: &str, function: &str) -> Result<Value, EvalError> {
    Module::eval("test", source)?.call(function, &[])
}

// =============================================================================
// Arithmetic and operators
// =============================================================================

#[test]
fn integer_arithmetic_stays_integer() {
    assert_eq!(run("fn f() { 7 + 3 * 2 }", "f").unwrap(), Value::Int(13));
    assert_eq!(run("fn f() { 7 / 2 }", "f").unwrap(), Value::Int(3));
    assert_eq!(run("fn f() { 7 % 2 }", "f").unwrap(), Value::Int(1));
}

#[test]
fn float_operand_promotes() {
    assert_eq!(run("fn f() { 1 + 0.5 }", "f").unwrap(), Value::Float(1.5));
    assert_eq!(run("fn f() { 5.0 / 2 }", "f").unwrap(), Value::Float(2.5));
}

#[test]
fn integer_overflow_fails_instead_of_panicking() {
    // i64::MAX is the largest literal the lexer accepts; i64::MIN is
    // reachable only by arithmetic.
    let max = "9223372036854775807";
    let min = format!("(0 - {} - 1)", max);

    let cases = [
        format!("fn f() {{ {} + 1 }}", max),
        format!("fn f() {{ {} - 2 }}", min),
        format!("fn f() {{ {} * 2 }}", max),
        format!("fn f() {{ {} / (0 - 1) }}", min),
        format!("fn f() {{ -{} }}", min),
        format!("fn f() {{ abs({}) }}", min),
    ];
    for source in &cases {
        assert_eq!(
            run(source, "f").unwrap_err(),
            EvalError::Overflow,
            "expected overflow for: {}",
            source
        );
    }
}

#[test]
fn division_by_zero_fails() {
    assert_eq!(run("fn f() { 1 / 0 }", "f").unwrap_err(), EvalError::DivisionByZero);
    assert_eq!(run("fn f() { 1 % 0 }", "f").unwrap_err(), EvalError::DivisionByZero);
}

#[test]
fn string_and_list_concatenation() {
    assert_eq!(
        run("fn f() { \"grow \" + \"a garden\" }", "f").unwrap(),
        Value::Str("grow a garden".into())
    );
    assert_eq!(
        run("fn f() { [1] + [2, 3] }", "f").unwrap(),
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn comparisons_and_loose_numeric_equality() {
    assert_eq!(run("fn f() { 2 < 3 }", "f").unwrap(), Value::Bool(true));
    assert_eq!(run("fn f() { \"a\" < \"b\" }", "f").unwrap(), Value::Bool(true));
    assert_eq!(run("fn f() { 1 == 1.0 }", "f").unwrap(), Value::Bool(true));
    assert_eq!(run("fn f() { 1 == \"1\" }", "f").unwrap(), Value::Bool(false));
}

#[test]
fn logical_operators_short_circuit() {
    // The right side would raise; short-circuiting must skip it.
    assert_eq!(
        run("fn f() { false && fail(\"never\") }", "f").unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        run("fn f() { true || fail(\"never\") }", "f").unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn comparing_mixed_types_fails() {
    let err = run("fn f() { 1 < \"two\" }", "f").unwrap_err();
    assert!(matches!(err, EvalError::TypeMismatch { .. }));
}

// =============================================================================
// Control flow and scoping
// =============================================================================

#[test]
fn if_is_an_expression() {
    let source = "fn f(n) { if n > 0 { \"pos\" } else { \"neg\" } }";
    let module = Module::eval("test", source).unwrap();
    assert_eq!(
        module.call("f", &[Value::Int(5)]).unwrap(),
        Value::Str("pos".into())
    );
    assert_eq!(
        module.call("f", &[Value::Int(-5)]).unwrap(),
        Value::Str("neg".into())
    );
}

#[test]
fn if_without_else_yields_null() {
    assert_eq!(run("fn f() { if false { 1 } }", "f").unwrap(), Value::Null);
}

#[test]
fn block_without_tail_yields_null() {
    assert_eq!(run("fn f() { let a = 1; }", "f").unwrap(), Value::Null);
}

#[test]
fn lets_shadow_and_scope_to_their_block() {
    let source = "fn f() { let a = 1; let b = if true { let a = 10; a } else { 0 }; a + b }";
    assert_eq!(run(source, "f").unwrap(), Value::Int(11));
}

#[test]
fn undefined_variable_fails() {
    let err = run("fn f() { nowhere }", "f").unwrap_err();
    assert_eq!(err, EvalError::UndefinedVariable("nowhere".into()));
}

// =============================================================================
// Functions
// =============================================================================

#[test]
fn recursion_works() {
    let source = "fn fact(n) { if n <= 1 { 1 } else { n * fact(n - 1) } }";
    let module = Module::eval("test", source).unwrap();
    assert_eq!(module.call("fact", &[Value::Int(10)]).unwrap(), Value::Int(3628800));
}

#[test]
fn runaway_recursion_is_cut_off() {
    let source = "fn spin(n) { spin(n + 1) }";
    let module = Module::eval("test", source).unwrap();
    let err = module.call("spin", &[Value::Int(0)]).unwrap_err();
    assert!(matches!(err, EvalError::RecursionLimit(_)));
}

#[test]
fn arity_is_checked() {
    let module = Module::eval("test", "fn f(a, b) { a + b }").unwrap();
    let err = module.call("f", &[Value::Int(1)]).unwrap_err();
    assert_eq!(
        err,
        EvalError::WrongArgCount {
            function: "f".into(),
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn user_functions_shadow_builtins() {
    assert_eq!(
        run("fn len(x) { 99 }\nfn f() { len(\"abc\") }", "f").unwrap(),
        Value::Int(99)
    );
}

// =============================================================================
// Builtins
// =============================================================================

#[test]
fn builtin_len_str_abs() {
    assert_eq!(run("fn f() { len(\"abc\") }", "f").unwrap(), Value::Int(3));
    assert_eq!(run("fn f() { len([1, 2]) }", "f").unwrap(), Value::Int(2));
    assert_eq!(run("fn f() { str(42) }", "f").unwrap(), Value::Str("42".into()));
    assert_eq!(run("fn f() { abs(-3) }", "f").unwrap(), Value::Int(3));
}

#[test]
fn builtin_min_max_join() {
    assert_eq!(run("fn f() { min(2, 1) }", "f").unwrap(), Value::Int(1));
    assert_eq!(run("fn f() { max(2, 1.5) }", "f").unwrap(), Value::Int(2));
    assert_eq!(
        run("fn f() { join([\"a\", \"b\"], \"-\") }", "f").unwrap(),
        Value::Str("a-b".into())
    );
}

#[test]
fn builtin_fail_raises() {
    let err = run("fn f() { fail(\"boom\") }", "f").unwrap_err();
    assert_eq!(err, EvalError::Script("boom".into()));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn values_round_trip_through_serde() {
    let value = run("fn f() { [1, \"two\", 3.5, true, null] }", "f").unwrap();
    let json = serde_json::to_string(&value).unwrap();
    let back: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}
