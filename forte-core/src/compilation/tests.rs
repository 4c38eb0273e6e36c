use std::sync::{atomic::{AtomicBool, Ordering}, Arc};

use crate::{
    binder::prelude::BindError,
    compilation::prelude::*,
    environment::prelude::{Environment, Value, FALSE, TRUE},
    parser::prelude::SyntaxTree,
    utils::prelude::{DiagnosticKind, Error},
};

fn int(value: i32) -> Option<Value> {
    Some(Value::Integer { value })
}

fn semantic_errors(result: &EvaluationResult) -> Vec<BindError> {
    result.diagnostics.iter()
        .filter_map(|diagnostic| match &diagnostic.kind {
            DiagnosticKind::Semantic(error) => Some(error.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_compilation_evaluates() -> Result<(), Error> {
    let compilation = Compilation::new(SyntaxTree::parse_text("1 + 2 * 3"));
    let result = compilation.evaluate(&mut Environment::new())?;

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.value, int(7));

    Ok(())
}

#[test]
fn test_continue_with_sees_earlier_variables() -> Result<(), Error> {
    let mut env = Environment::new();

    let first = Compilation::new(SyntaxTree::parse_text("let x = 10"));
    first.evaluate(&mut env)?;

    let second = first.continue_with(SyntaxTree::parse_text("x + 1"));
    let result = second.evaluate(&mut env)?;

    assert_eq!(result.value, int(11));

    Ok(())
}

#[test]
fn test_free_submit_threads_state() -> Result<(), Error> {
    let (result, state) = submit("let x = 10", None);
    assert_eq!(result?.value, int(10));

    let (result, _) = submit("x + 1", Some(state));
    let result = result?;

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.value, int(11));

    Ok(())
}

#[test]
fn test_single_fragment_properties() -> Result<(), Error> {
    let cases = [
        ("1 + 2 * 3", int(7)),
        ("(1 + 2) * 3", int(9)),
        ("--5", int(5)),
        ("-5", int(-5)),
        ("true && false", Some(FALSE)),
        ("1 == 1", Some(TRUE)),
        ("1 != 2", Some(TRUE)),
    ];

    for (input, expected) in cases {
        let mut session = SessionState::new();
        let result = session.submit(input)?;

        assert!(result.diagnostics.is_empty(), "Unexpected diagnostics for {input:?}");
        assert_eq!(result.value, expected, "Wrong value for {input:?}");
    }

    Ok(())
}

#[test]
fn test_redeclaration_reports_once() -> Result<(), Error> {
    let mut session = SessionState::new();
    let result = session.submit("{ let x = 1 let x = 2 }")?;

    assert_eq!(result.value, None);
    assert_eq!(semantic_errors(&result), vec![BindError::VariableAlreadyDeclared { name: "x".into() }]);
    assert_eq!(result.diagnostics.len(), 1);

    Ok(())
}

#[test]
fn test_assignment_to_let_across_fragments() -> Result<(), Error> {
    let mut session = SessionState::new();
    session.submit("let x = 1")?;

    let result = session.submit("x = 2")?;

    assert_eq!(result.value, None);
    assert_eq!(semantic_errors(&result), vec![BindError::CannotAssign { name: "x".into() }]);

    Ok(())
}

#[test]
fn test_type_mismatches() -> Result<(), Error> {
    let mut session = SessionState::new();

    let result = session.submit("1 + true")?;
    assert_eq!(result.value, None);
    assert!(matches!(
        semantic_errors(&result).as_slice(),
        [BindError::UndefinedBinaryOperator { .. }]
    ));

    session.submit("let x = 1")?;
    let result = session.submit("x = true")?;
    assert_eq!(result.value, None);
    assert!(semantic_errors(&result).iter().any(|error| matches!(error, BindError::CannotConvert { .. })));

    Ok(())
}

#[test]
fn test_failed_fragment_is_not_committed() -> Result<(), Error> {
    let mut session = SessionState::new();
    session.submit("var x = 1")?;

    let result = session.submit("var y = nope")?;
    assert_eq!(result.value, None);

    let result = session.submit("x + 1")?;
    assert!(result.diagnostics.is_empty(), "Old diagnostics must not leak into later fragments");
    assert_eq!(result.value, int(2));

    let result = session.submit("y")?;
    assert_eq!(semantic_errors(&result), vec![BindError::UndefinedName { name: "y".into() }]);

    Ok(())
}

#[test]
fn test_for_accumulates_into_outer_variable() -> Result<(), Error> {
    let mut session = SessionState::new();
    session.submit("var total = 0")?;
    session.submit("for i = 1 to 5 total = total + i")?;

    assert_eq!(session.submit("total")?.value, int(15));

    Ok(())
}

#[test]
fn test_resubmission_is_idempotent() -> Result<(), Error> {
    let mut session = SessionState::new();
    session.submit("var x = 20")?;

    let first = session.submit("x / 2 + 1")?;
    let second = session.submit("x / 2 + 1")?;

    assert_eq!(first, second);
    assert_eq!(first.value, int(11));

    Ok(())
}

#[test]
fn test_shadowing_across_fragments() -> Result<(), Error> {
    let mut session = SessionState::new();
    session.submit("let x = 1")?;
    session.submit("let x = true")?;

    assert_eq!(session.submit("x")?.value, Some(TRUE));
    assert_eq!(session.submit("!x")?.value, Some(FALSE));

    Ok(())
}

#[test]
fn test_runtime_error_rolls_back_new_variables() -> Result<(), Error> {
    let mut session = SessionState::new();
    session.submit("var x = 1")?;

    let result = session.submit("{ var y = 5 x = 2 x / 0 }");
    assert_eq!(result, Err(Error::DivideByZero));

    assert_eq!(session.environment().len(), 1);
    assert_eq!(session.submit("x")?.value, int(2), "Writes to older variables are kept");

    let result = session.submit("y")?;
    assert_eq!(semantic_errors(&result), vec![BindError::UndefinedName { name: "y".into() }]);

    Ok(())
}

#[test]
fn test_body_declarations_do_not_reach_later_fragments() -> Result<(), Error> {
    let mut session = SessionState::new();

    assert_eq!(session.submit("while false var x = 1")?.value, None);
    assert_eq!(semantic_errors(&session.submit("x")?), vec![BindError::UndefinedName { name: "x".into() }]);

    assert_eq!(session.submit("if false let z = 1")?.value, None);
    assert_eq!(semantic_errors(&session.submit("z")?), vec![BindError::UndefinedName { name: "z".into() }]);

    let result = session.submit("{ while false var y = 1 y }")?;
    assert_eq!(semantic_errors(&result), vec![BindError::UndefinedName { name: "y".into() }]);

    assert_eq!(session.submit("{ var i = 0 while i < 2 { i = i + 1 } i }")?.value, int(2));

    Ok(())
}

#[test]
fn test_deep_nesting_is_a_diagnostic() -> Result<(), Error> {
    let mut session = SessionState::new();

    let input = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(session.submit(&input)?.value, int(1));

    let input = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    let result = session.submit(&input)?;
    assert_eq!(result.diagnostics.len(), 1);
    assert!(matches!(result.diagnostics[0].kind, DiagnosticKind::Syntax(_)));
    assert_eq!(result.value, None);

    Ok(())
}

#[test]
fn test_interrupt_flag() -> Result<(), Error> {
    let flag = Arc::new(AtomicBool::new(false));
    let mut session = SessionState::with_interrupt(flag.clone());

    assert_eq!(session.submit("{ var i = 0 while i < 3 i = i + 1 }")?.value, int(3));

    flag.store(true, Ordering::SeqCst);
    assert_eq!(session.submit("while true { }"), Err(Error::Interrupted));

    Ok(())
}

#[test]
fn test_reset() -> Result<(), Error> {
    let mut session = SessionState::new();
    session.submit("var x = 1")?;
    session.reset();

    assert!(session.environment().is_empty());
    assert!(session.previous().is_none());
    assert_eq!(semantic_errors(&session.submit("x")?), vec![BindError::UndefinedName { name: "x".into() }]);

    Ok(())
}
