#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;

use crate::{
    binder::prelude::{
        BoundBinaryOperator, BoundBinaryOperatorKind, BoundExpression, BoundStatement,
        BoundUnaryOperator, BoundUnaryOperatorKind,
    },
    environment::prelude::{Environment, Value, VariableSymbol},
    utils::prelude::Error,
};

/// Runs a bound statement against `env`.
///
/// Returns the value of the last expression statement or declaration that ran,
/// or `None` if none did. `interrupt` is polled once per loop iteration.
pub fn eval(
    statement: &BoundStatement,
    env: &mut Environment,
    interrupt: Option<&AtomicBool>
) -> Result<Option<Value>, Error> {
    eval_statement(statement, env, interrupt)
}

fn eval_statement(
    statement: &BoundStatement,
    env: &mut Environment,
    interrupt: Option<&AtomicBool>
) -> Result<Option<Value>, Error> {
    match statement {
        BoundStatement::Block { statements } => {
            let mut last = None;

            for statement in statements {
                if let Some(value) = eval_statement(statement, env, interrupt)? {
                    last = Some(value);
                }
            }

            Ok(last)
        },
        BoundStatement::VariableDeclaration { variable, initializer } => {
            let value = eval_expression(initializer, env)?;
            env.set(variable.clone(), value);

            Ok(Some(value))
        },
        BoundStatement::If { condition, then_statement, else_statement } => {
            if eval_expression(condition, env)?.as_boolean()? {
                eval_statement(then_statement, env, interrupt)
            } else {
                match else_statement {
                    Some(else_statement) => eval_statement(else_statement, env, interrupt),
                    None => Ok(None)
                }
            }
        },
        BoundStatement::While { condition, body } => {
            let mut last = None;

            while eval_expression(condition, env)?.as_boolean()? {
                check_interrupt(interrupt)?;
                trace!("while iteration");

                if let Some(value) = eval_statement(body, env, interrupt)? {
                    last = Some(value);
                }
            }

            Ok(last)
        },
        BoundStatement::For { variable, lower_bound, upper_bound, body } => {
            let lower = eval_expression(lower_bound, env)?.as_integer()?;
            let upper = eval_expression(upper_bound, env)?.as_integer()?;
            let mut last = None;

            for index in lower..=upper {
                check_interrupt(interrupt)?;
                trace!("for {} = {index}", variable.name);

                env.set(variable.clone(), Value::Integer { value: index });

                if let Some(value) = eval_statement(body, env, interrupt)? {
                    last = Some(value);
                }
            }

            Ok(last)
        },
        BoundStatement::Expression { expression } => {
            eval_expression(expression, env).map(Some)
        }
    }
}

fn check_interrupt(interrupt: Option<&AtomicBool>) -> Result<(), Error> {
    match interrupt {
        Some(flag) if flag.load(Ordering::SeqCst) => Err(Error::Interrupted),
        _ => Ok(())
    }
}

pub fn eval_expression(expression: &BoundExpression, env: &mut Environment) -> Result<Value, Error> {
    match expression {
        BoundExpression::Literal { value } => Ok(*value),
        BoundExpression::Variable { variable } => read_variable(variable, env),
        BoundExpression::Assignment { variable, expression } => {
            let value = eval_expression(expression, env)?;
            env.set(variable.clone(), value);

            Ok(value)
        },
        BoundExpression::Unary { operator, operand } => {
            let operand = eval_expression(operand, env)?;

            eval_unary(operator, operand)
        },
        BoundExpression::Binary { left, operator, right } => {
            // Both sides always run, `&&` and `||` included.
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;

            eval_binary(operator, left, right)
        }
    }
}

fn read_variable(variable: &VariableSymbol, env: &Environment) -> Result<Value, Error> {
    env.get(variable)
        .copied()
        .ok_or_else(|| Error::UnassignedVariable { name: variable.name.clone() })
}

fn eval_unary(operator: &BoundUnaryOperator, operand: Value) -> Result<Value, Error> {
    Ok(match operator.kind {
        BoundUnaryOperatorKind::Identity => Value::from(operand.as_integer()?),
        BoundUnaryOperatorKind::Negation => Value::from(operand.as_integer()?.wrapping_neg()),
        BoundUnaryOperatorKind::OnesComplement => Value::from(!operand.as_integer()?),
        BoundUnaryOperatorKind::LogicalNegation => Value::from(!operand.as_boolean()?),
    })
}

fn eval_binary(operator: &BoundBinaryOperator, left: Value, right: Value) -> Result<Value, Error> {
    use BoundBinaryOperatorKind as Kind;

    Ok(match operator.kind {
        Kind::Addition => Value::from(left.as_integer()?.wrapping_add(right.as_integer()?)),
        Kind::Subtraction => Value::from(left.as_integer()?.wrapping_sub(right.as_integer()?)),
        Kind::Multiplication => Value::from(left.as_integer()?.wrapping_mul(right.as_integer()?)),
        Kind::Division => {
            let divisor = right.as_integer()?;

            if divisor == 0 {
                return Err(Error::DivideByZero);
            }

            Value::from(left.as_integer()?.wrapping_div(divisor))
        },
        Kind::LogicalAnd => Value::from(left.as_boolean()? & right.as_boolean()?),
        Kind::LogicalOr => Value::from(left.as_boolean()? | right.as_boolean()?),
        Kind::Equals => Value::from(left == right),
        Kind::NotEquals => Value::from(left != right),
        Kind::Less => Value::from(left.as_integer()? < right.as_integer()?),
        Kind::LessOrEquals => Value::from(left.as_integer()? <= right.as_integer()?),
        Kind::Greater => Value::from(left.as_integer()? > right.as_integer()?),
        Kind::GreaterOrEquals => Value::from(left.as_integer()? >= right.as_integer()?),
    })
}
