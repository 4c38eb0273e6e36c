use std::fmt::{Display, Write};

use crate::{
    environment::prelude::Value,
    lexer::prelude::{Token, TokenKind},
    utils::prelude::TextSpan,
};
use super::ast::{CompilationUnit, ElseClause, Expression, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Token(TokenKind),

    CompilationUnit,
    ElseClause,

    BlockStatement,
    VariableDeclaration,
    IfStatement,
    WhileStatement,
    ForStatement,
    ExpressionStatement,

    LiteralExpression,
    NameExpression,
    AssignmentExpression,
    UnaryExpression,
    BinaryExpression,
    ParenthesizedExpression,
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxKind::Token(kind) => write!(f, "{kind}Token"),
            node => write!(f, "{node:?}"),
        }
    }
}

/// Read-only view over any node or token of a parsed tree.
#[derive(Debug, Clone, Copy)]
pub enum SyntaxNode<'a> {
    CompilationUnit(&'a CompilationUnit),
    Statement(&'a Statement),
    ElseClause(&'a ElseClause),
    Expression(&'a Expression),
    Token(&'a Token),
}

impl<'a> SyntaxNode<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::CompilationUnit(_) => SyntaxKind::CompilationUnit,
            SyntaxNode::ElseClause(_) => SyntaxKind::ElseClause,
            SyntaxNode::Token(token) => SyntaxKind::Token(token.kind),
            SyntaxNode::Statement(statement) => match statement {
                Statement::Block(_) => SyntaxKind::BlockStatement,
                Statement::VariableDeclaration(_) => SyntaxKind::VariableDeclaration,
                Statement::If(_) => SyntaxKind::IfStatement,
                Statement::While(_) => SyntaxKind::WhileStatement,
                Statement::For(_) => SyntaxKind::ForStatement,
                Statement::Expression(_) => SyntaxKind::ExpressionStatement,
            },
            SyntaxNode::Expression(expression) => match expression {
                Expression::Literal(_) => SyntaxKind::LiteralExpression,
                Expression::Name(_) => SyntaxKind::NameExpression,
                Expression::Assignment(_) => SyntaxKind::AssignmentExpression,
                Expression::Unary(_) => SyntaxKind::UnaryExpression,
                Expression::Binary(_) => SyntaxKind::BinaryExpression,
                Expression::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
            },
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            SyntaxNode::CompilationUnit(unit) => unit.span(),
            SyntaxNode::Statement(statement) => statement.span(),
            SyntaxNode::ElseClause(else_clause) => else_clause.span(),
            SyntaxNode::Expression(expression) => expression.span(),
            SyntaxNode::Token(token) => token.span,
        }
    }

    /// Literal value carried by a token leaf.
    pub fn value(&self) -> Option<Value> {
        match self {
            SyntaxNode::Token(token) => token.value,
            _ => None,
        }
    }

    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        use SyntaxNode as N;

        match *self {
            N::CompilationUnit(unit) => vec![N::Statement(&unit.statement), N::Token(&unit.end_of_file)],
            N::ElseClause(else_clause) => vec![
                N::Token(&else_clause.else_keyword),
                N::Statement(&else_clause.else_statement),
            ],
            N::Token(_) => vec![],
            N::Statement(statement) => match statement {
                Statement::Block(block) => std::iter::once(N::Token(&block.open_brace))
                    .chain(block.statements.iter().map(N::Statement))
                    .chain(std::iter::once(N::Token(&block.close_brace)))
                    .collect(),
                Statement::VariableDeclaration(declaration) => vec![
                    N::Token(&declaration.keyword),
                    N::Token(&declaration.identifier),
                    N::Token(&declaration.equals),
                    N::Expression(&declaration.initializer),
                ],
                Statement::If(conditional) => {
                    let mut children = vec![
                        N::Token(&conditional.if_keyword),
                        N::Expression(&conditional.condition),
                        N::Statement(&conditional.then_statement),
                    ];

                    if let Some(else_clause) = &conditional.else_clause {
                        children.push(N::ElseClause(else_clause));
                    }

                    children
                },
                Statement::While(conditional_loop) => vec![
                    N::Token(&conditional_loop.while_keyword),
                    N::Expression(&conditional_loop.condition),
                    N::Statement(&conditional_loop.body),
                ],
                Statement::For(fixed_loop) => vec![
                    N::Token(&fixed_loop.for_keyword),
                    N::Token(&fixed_loop.identifier),
                    N::Token(&fixed_loop.equals),
                    N::Expression(&fixed_loop.lower_bound),
                    N::Token(&fixed_loop.to_keyword),
                    N::Expression(&fixed_loop.upper_bound),
                    N::Statement(&fixed_loop.body),
                ],
                Statement::Expression(statement) => vec![N::Expression(&statement.expression)],
            },
            N::Expression(expression) => match expression {
                Expression::Literal(literal) => vec![N::Token(&literal.literal_token)],
                Expression::Name(name) => vec![N::Token(&name.identifier)],
                Expression::Assignment(assignment) => vec![
                    N::Token(&assignment.identifier),
                    N::Token(&assignment.equals),
                    N::Expression(&assignment.expression),
                ],
                Expression::Unary(unary) => vec![
                    N::Token(&unary.operator),
                    N::Expression(&unary.operand),
                ],
                Expression::Binary(binary) => vec![
                    N::Expression(&binary.left),
                    N::Token(&binary.operator),
                    N::Expression(&binary.right),
                ],
                Expression::Parenthesized(parenthesized) => vec![
                    N::Token(&parenthesized.open_parenthesis),
                    N::Expression(&parenthesized.expression),
                    N::Token(&parenthesized.close_parenthesis),
                ],
            },
        }
    }

    /// Writes the node and its descendants as an indented tree:
    ///
    /// ```text
    /// └──BinaryExpression
    ///    ├──LiteralExpression
    ///    │  └──NumberToken 1
    ///    ...
    /// ```
    pub fn write_tree(&self, out: &mut impl Write) -> std::fmt::Result {
        self.write_tree_node(out, "", true)
    }

    fn write_tree_node(&self, out: &mut impl Write, indent: &str, is_last: bool) -> std::fmt::Result {
        let marker = if is_last { "└──" } else { "├──" };

        write!(out, "{indent}{marker}{}", self.kind())?;

        if let Some(value) = self.value() {
            write!(out, " {value}")?;
        }

        writeln!(out)?;

        let indent = format!("{indent}{}", if is_last { "   " } else { "│  " });
        let children = self.children();
        let last = children.len().saturating_sub(1);

        for (index, child) in children.iter().enumerate() {
            child.write_tree_node(out, &indent, index == last)?;
        }

        Ok(())
    }
}

impl<'a> Display for SyntaxNode<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_tree(f)
    }
}

impl<'a> From<&'a CompilationUnit> for SyntaxNode<'a> {
    fn from(unit: &'a CompilationUnit) -> Self {
        SyntaxNode::CompilationUnit(unit)
    }
}
