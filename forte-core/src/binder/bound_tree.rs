use crate::environment::prelude::{Value, ValueType, VariableSymbol};
use super::operators::{BoundBinaryOperator, BoundUnaryOperator};

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStatement {
    Block {
        statements: Vec<BoundStatement>,
    },
    VariableDeclaration {
        variable: VariableSymbol,
        initializer: BoundExpression,
    },
    If {
        condition: BoundExpression,
        then_statement: Box<BoundStatement>,
        else_statement: Option<Box<BoundStatement>>,
    },
    While {
        condition: BoundExpression,
        body: Box<BoundStatement>,
    },
    For {
        variable: VariableSymbol,
        lower_bound: BoundExpression,
        upper_bound: BoundExpression,
        body: Box<BoundStatement>,
    },
    Expression {
        expression: BoundExpression,
    },
}

/// Typed expression. Every node knows its result type.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpression {
    Literal {
        value: Value,
    },
    Variable {
        variable: VariableSymbol,
    },
    Assignment {
        variable: VariableSymbol,
        expression: Box<BoundExpression>,
    },
    Unary {
        operator: &'static BoundUnaryOperator,
        operand: Box<BoundExpression>,
    },
    Binary {
        left: Box<BoundExpression>,
        operator: &'static BoundBinaryOperator,
        right: Box<BoundExpression>,
    },
}

impl BoundExpression {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Literal { value } => value.value_type(),
            Self::Variable { variable } => variable.value_type,
            Self::Assignment { expression, .. } => expression.value_type(),
            Self::Unary { operator, .. } => operator.value_type,
            Self::Binary { operator, .. } => operator.value_type,
        }
    }
}
