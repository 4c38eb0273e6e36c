use std::fmt::Display;

use crate::environment::prelude::ValueType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A name that no visible scope declares.
    ///
    /// ```text
    /// y + 1
    /// ^ Variable 'y' doesn't exist.
    /// ```
    UndefinedName {
        name: String,
    },
    /// A second declaration of a name in the same scope.
    ///
    /// ```text
    /// { let x = 1 let x = 2 }
    ///                 ^ Variable 'x' is already declared.
    /// ```
    VariableAlreadyDeclared {
        name: String,
    },
    /// Assignment to a `let` variable or a `for` loop variable.
    CannotAssign {
        name: String,
    },
    /// An expression whose type differs from the one its position requires.
    ///
    /// ```text
    /// var x = 1
    /// x = true
    ///     ^^^^ Cannot convert type Boolean to Integer.
    /// ```
    CannotConvert {
        from: ValueType,
        to: ValueType,
    },
    UndefinedUnaryOperator {
        operator: String,
        operand: ValueType,
    },
    /// ```text
    /// 1 + true
    ///   ^ Binary operator '+' is not defined for types Integer and Boolean.
    /// ```
    UndefinedBinaryOperator {
        operator: String,
        left: ValueType,
        right: ValueType,
    },
}

impl BindError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self {
            BindError::UndefinedName { .. } => ("Not declared in this scope", vec![]),
            BindError::VariableAlreadyDeclared { .. } => ("Declared again here", vec![]),
            BindError::CannotAssign { .. } => (
                "Assignment to a read-only variable",
                vec!["Hint: declare the variable with `var` to make it mutable.".to_string()]
            ),
            BindError::CannotConvert { to, .. } => match to {
                ValueType::Integer => ("Expected an Integer", vec![]),
                ValueType::Boolean => ("Expected a Boolean", vec![]),
            },
            BindError::UndefinedUnaryOperator { .. }
            | BindError::UndefinedBinaryOperator { .. } => ("Operator undefined for these operands", vec![]),
        }
    }
}

impl Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::UndefinedName { name } => write!(f, "Variable '{name}' doesn't exist."),
            BindError::VariableAlreadyDeclared { name } => write!(f, "Variable '{name}' is already declared."),
            BindError::CannotAssign { name } => write!(f, "Variable '{name}' is read-only and cannot be assigned to."),
            BindError::CannotConvert { from, to } => write!(f, "Cannot convert type {from} to {to}."),
            BindError::UndefinedUnaryOperator { operator, operand } => {
                write!(f, "Unary operator '{operator}' is not defined for type {operand}.")
            },
            BindError::UndefinedBinaryOperator { operator, left, right } => {
                write!(f, "Binary operator '{operator}' is not defined for types {left} and {right}.")
            },
        }
    }
}
