use std::sync::atomic::AtomicBool;

use crate::{
    binder::prelude::bind_global_scope,
    environment::prelude::{Environment, Value, FALSE, TRUE},
    parser::prelude::SyntaxTree,
    utils::prelude::Error,
};

use super::eval;

fn run(input: &str) -> Result<Option<Value>, Error> {
    run_with(input, &mut Environment::new(), None)
}

fn run_with(input: &str, env: &mut Environment, interrupt: Option<&AtomicBool>) -> Result<Option<Value>, Error> {
    let scope = bind_global_scope(None, &SyntaxTree::parse_text(input));
    assert!(scope.diagnostics.is_empty(), "Unexpected diagnostics for {input:?}");

    eval(&scope.statement, env, interrupt)
}

fn int(value: i32) -> Option<Value> {
    Some(Value::Integer { value })
}

#[test]
fn test_arithmetic() -> Result<(), Error> {
    let cases = [
        ("1 + 2 * 3", 7),
        ("(1 + 2) * 3", 9),
        ("10 - 4 - 3", 3),
        ("7 / 2", 3),
        ("-7 / 2", -3),
        ("--5", 5),
        ("-5", -5),
        ("+5", 5),
        ("~0", -1),
        ("2147483647 + 1", i32::MIN),
        ("-2147483647 - 2", i32::MAX),
    ];

    for (input, expected) in cases {
        assert_eq!(run(input)?, int(expected), "Wrong value for {input:?}");
    }

    Ok(())
}

#[test]
fn test_logic_and_comparison() -> Result<(), Error> {
    let cases = [
        ("true && false", FALSE),
        ("true || false", TRUE),
        ("!true", FALSE),
        ("1 == 1", TRUE),
        ("1 != 2", TRUE),
        ("true == false", FALSE),
        ("3 < 3", FALSE),
        ("3 <= 3", TRUE),
        ("4 > 3", TRUE),
        ("2 >= 3", FALSE),
        ("1 + 1 == 2 && 3 > 2 || false", TRUE),
    ];

    for (input, expected) in cases {
        assert_eq!(run(input)?, Some(expected), "Wrong value for {input:?}");
    }

    Ok(())
}

#[test]
fn test_division_by_zero() {
    assert_eq!(run("1 / 0"), Err(Error::DivideByZero));
    assert!(!Error::DivideByZero.is_internal());
}

#[test]
fn test_blocks_and_control_flow() -> Result<(), Error> {
    let cases = [
        ("{ var x = 1 x = x + 41 }", int(42)),
        ("{ var a = 0 if a == 0 a = 10 else a = 20 }", int(10)),
        ("{ var a = 1 if a == 0 a = 10 else a = 20 }", int(20)),
        ("{ var i = 0 while i < 5 i = i + 1 }", int(5)),
        ("{ }", None),
        ("if false 1", None),
        ("{ var n = 3 while false n = 0 }", int(3)),
    ];

    for (input, expected) in cases {
        assert_eq!(run(input)?, expected, "Wrong value for {input:?}");
    }

    Ok(())
}

#[test]
fn test_for_is_inclusive_and_ascending() -> Result<(), Error> {
    let input = "{ var sum = 0 var order = 0 for i = 1 to 4 { sum = sum + i order = order * 10 + i } order }";
    assert_eq!(run(input)?, int(1234));

    let input = "{ var sum = 0 for i = 1 to 10 sum = sum + i sum }";
    assert_eq!(run(input)?, int(55));

    let input = "{ var count = 0 for i = 3 to 1 count = count + 1 count }";
    assert_eq!(run(input)?, int(0));

    Ok(())
}

#[test]
fn test_for_bounds_evaluated_once() -> Result<(), Error> {
    let input = "{ var n = 3 var runs = 0 for i = 1 to n { n = 10 runs = runs + 1 } runs }";
    assert_eq!(run(input)?, int(3));

    Ok(())
}

#[test]
fn test_logical_operators_evaluate_both_sides() -> Result<(), Error> {
    let input = "{ var hits = 0 var b = false b = false && (hits = hits + 1) == 1 hits }";
    assert_eq!(run(input)?, int(1));

    let input = "{ var hits = 0 var b = false b = true || (hits = hits + 1) == 1 hits }";
    assert_eq!(run(input)?, int(1));

    Ok(())
}

#[test]
fn test_store_persists_between_runs() -> Result<(), Error> {
    let mut env = Environment::new();
    let scope = bind_global_scope(None, &SyntaxTree::parse_text("var x = 5"));

    assert_eq!(eval(&scope.statement, &mut env, None)?, int(5));
    assert_eq!(env.get(&scope.variables[0]), Some(&Value::Integer { value: 5 }));

    Ok(())
}

#[test]
fn test_interrupted_loop() {
    let flag = AtomicBool::new(true);
    let mut env = Environment::new();

    let result = run_with("while true { }", &mut env, Some(&flag));
    assert_eq!(result, Err(Error::Interrupted));

    let result = run_with("for i = 1 to 2147483647 { }", &mut env, Some(&flag));
    assert_eq!(result, Err(Error::Interrupted));
}

#[test]
fn test_unassigned_variable_is_internal() {
    use crate::{
        binder::prelude::{BoundExpression, BoundStatement},
        environment::prelude::{SymbolId, ValueType, VariableSymbol},
    };

    let variable = VariableSymbol::new(SymbolId(7), "ghost", false, ValueType::Integer);
    let statement = BoundStatement::Expression {
        expression: BoundExpression::Variable { variable },
    };

    let error = eval(&statement, &mut Environment::new(), None).unwrap_err();
    assert_eq!(error, Error::UnassignedVariable { name: "ghost".into() });
    assert!(error.is_internal());
}
