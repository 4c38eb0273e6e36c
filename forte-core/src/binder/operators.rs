use crate::{environment::prelude::ValueType, lexer::prelude::TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundUnaryOperatorKind {
    Identity,
    Negation,
    LogicalNegation,
    OnesComplement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundBinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    LogicalAnd,
    LogicalOr,
    Equals,
    NotEquals,
    Less,
    LessOrEquals,
    Greater,
    GreaterOrEquals,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub token_kind: TokenKind,
    pub kind: BoundUnaryOperatorKind,
    pub operand_type: ValueType,
    pub value_type: ValueType,
}

#[derive(Debug, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub token_kind: TokenKind,
    pub kind: BoundBinaryOperatorKind,
    pub left_type: ValueType,
    pub right_type: ValueType,
    pub value_type: ValueType,
}

const fn unary(
    token_kind: TokenKind,
    kind: BoundUnaryOperatorKind,
    operand_type: ValueType,
    value_type: ValueType,
) -> BoundUnaryOperator {
    BoundUnaryOperator { token_kind, kind, operand_type, value_type }
}

const fn binary(
    token_kind: TokenKind,
    kind: BoundBinaryOperatorKind,
    operands: ValueType,
    value_type: ValueType,
) -> BoundBinaryOperator {
    BoundBinaryOperator { token_kind, kind, left_type: operands, right_type: operands, value_type }
}

static UNARY_OPERATORS: [BoundUnaryOperator; 4] = {
    use BoundUnaryOperatorKind::*;
    use ValueType::{Boolean, Integer};

    [
        unary(TokenKind::Bang, LogicalNegation, Boolean, Boolean),
        unary(TokenKind::Plus, Identity, Integer, Integer),
        unary(TokenKind::Minus, Negation, Integer, Integer),
        unary(TokenKind::Tilde, OnesComplement, Integer, Integer),
    ]
};

static BINARY_OPERATORS: [BoundBinaryOperator; 14] = {
    use BoundBinaryOperatorKind::*;
    use ValueType::{Boolean, Integer};

    [
        binary(TokenKind::Plus, Addition, Integer, Integer),
        binary(TokenKind::Minus, Subtraction, Integer, Integer),
        binary(TokenKind::Star, Multiplication, Integer, Integer),
        binary(TokenKind::Slash, Division, Integer, Integer),

        binary(TokenKind::EqualsEquals, Equals, Integer, Boolean),
        binary(TokenKind::BangEquals, NotEquals, Integer, Boolean),
        binary(TokenKind::Less, Less, Integer, Boolean),
        binary(TokenKind::LessEquals, LessOrEquals, Integer, Boolean),
        binary(TokenKind::Greater, Greater, Integer, Boolean),
        binary(TokenKind::GreaterEquals, GreaterOrEquals, Integer, Boolean),

        binary(TokenKind::AmpersandAmpersand, LogicalAnd, Boolean, Boolean),
        binary(TokenKind::PipePipe, LogicalOr, Boolean, Boolean),
        binary(TokenKind::EqualsEquals, Equals, Boolean, Boolean),
        binary(TokenKind::BangEquals, NotEquals, Boolean, Boolean),
    ]
};

impl BoundUnaryOperator {
    /// Linear lookup; `None` means the operator is undefined for `operand_type`.
    pub fn bind(token_kind: TokenKind, operand_type: ValueType) -> Option<&'static Self> {
        UNARY_OPERATORS.iter()
            .find(|operator| operator.token_kind == token_kind && operator.operand_type == operand_type)
    }
}

impl BoundBinaryOperator {
    pub fn bind(token_kind: TokenKind, left_type: ValueType, right_type: ValueType) -> Option<&'static Self> {
        BINARY_OPERATORS.iter()
            .find(|operator| {
                operator.token_kind == token_kind
                    && operator.left_type == left_type
                    && operator.right_type == right_type
            })
    }
}
