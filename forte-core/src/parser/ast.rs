use std::fmt::Display;

use crate::{
    environment::prelude::{Value, ZERO},
    lexer::prelude::{Token, TokenKind},
    utils::prelude::TextSpan,
};
use super::parser::{Parse, Parser, Precedence};

// compilation_unit -> <statement> <eof>
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub statement: Statement,
    pub end_of_file: Token,
}

impl Parse for CompilationUnit {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let statement = Statement::parse(parser, None);
        let end_of_file = parser.expect_one(TokenKind::EndOfFile);

        Self { statement, end_of_file }
    }
}

impl CompilationUnit {
    pub fn span(&self) -> TextSpan {
        self.statement.span().cover(self.end_of_file.span)
    }
}

impl Display for CompilationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.statement)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(BlockStatement),
    VariableDeclaration(VariableDeclaration),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Expression(ExpressionStatement),
}

impl Parse for Statement {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        if !parser.enter_nested() {
            return Self::Expression(ExpressionStatement { expression: Expression::missing(parser) });
        }

        let statement = match parser.current().kind {
            TokenKind::OpenBrace => Self::Block(BlockStatement::parse(parser, None)),
            TokenKind::Let | TokenKind::Var => Self::VariableDeclaration(VariableDeclaration::parse(parser, None)),
            TokenKind::If => Self::If(IfStatement::parse(parser, None)),
            TokenKind::While => Self::While(WhileStatement::parse(parser, None)),
            TokenKind::For => Self::For(ForStatement::parse(parser, None)),
            _ => Self::Expression(ExpressionStatement::parse(parser, None)),
        };

        parser.leave_nested();
        statement
    }
}

impl Statement {
    pub fn span(&self) -> TextSpan {
        match self {
            Self::Block(block) => block.span(),
            Self::VariableDeclaration(declaration) => declaration.span(),
            Self::If(conditional) => conditional.span(),
            Self::While(conditional_loop) => conditional_loop.span(),
            Self::For(fixed_loop) => fixed_loop.span(),
            Self::Expression(statement) => statement.expression.span(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Block(block) => write!(f, "{block}"),
            Self::VariableDeclaration(declaration) => write!(f, "{declaration}"),
            Self::If(conditional) => write!(f, "{conditional}"),
            Self::While(conditional_loop) => write!(f, "{conditional_loop}"),
            Self::For(fixed_loop) => write!(f, "{fixed_loop}"),
            Self::Expression(statement) => write!(f, "{}", statement.expression),
        }
    }
}

// block -> { {<statement>} }
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub open_brace: Token,
    pub statements: Vec<Statement>,
    pub close_brace: Token,
}

impl Parse for BlockStatement {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let open_brace = parser.expect_one(TokenKind::OpenBrace);
        let mut statements = vec![];

        while !matches!(parser.current().kind, TokenKind::CloseBrace | TokenKind::EndOfFile) {
            let start = parser.position();

            statements.push(Statement::parse(parser, None));

            // The failed statement already reported the token it got stuck on.
            if parser.position() == start {
                parser.next_token();
            }
        }

        let close_brace = parser.expect_one(TokenKind::CloseBrace);

        Self { open_brace, statements, close_brace }
    }
}

impl BlockStatement {
    pub fn span(&self) -> TextSpan {
        self.open_brace.span.cover(self.close_brace.span)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{statement}"))
            .collect::<Vec<String>>();

        if statements.is_empty() {
            write!(f, "{{ }}")
        } else {
            write!(f, "{{ {} }}", statements.join(" "))
        }
    }
}

// declaration -> (let | var) <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub keyword: Token,
    pub identifier: Token,
    pub equals: Token,
    pub initializer: Expression,
}

impl Parse for VariableDeclaration {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let keyword = match parser.current().kind {
            TokenKind::Var => parser.next_token(),
            _ => parser.expect_one(TokenKind::Let),
        };
        let identifier = parser.expect_one(TokenKind::Identifier);
        let equals = parser.expect_one(TokenKind::Equals);
        let initializer = Expression::parse(parser, None);

        Self { keyword, identifier, equals, initializer }
    }
}

impl VariableDeclaration {
    pub fn is_read_only(&self) -> bool {
        self.keyword.kind == TokenKind::Let
    }

    pub fn span(&self) -> TextSpan {
        self.keyword.span.cover(self.initializer.span())
    }
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = {}", self.keyword.text, self.identifier.text, self.initializer)
    }
}

// if -> if <expression> <statement> [else <statement>]
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub if_keyword: Token,
    pub condition: Expression,
    pub then_statement: Box<Statement>,
    pub else_clause: Option<ElseClause>,
}

impl Parse for IfStatement {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let if_keyword = parser.expect_one(TokenKind::If);
        let condition = Expression::parse(parser, None);
        let then_statement = Box::new(Statement::parse(parser, None));

        let else_clause = match parser.current().kind {
            TokenKind::Else => Some(ElseClause::parse(parser, None)),
            _ => None,
        };

        Self { if_keyword, condition, then_statement, else_clause }
    }
}

impl IfStatement {
    pub fn span(&self) -> TextSpan {
        let end = match &self.else_clause {
            Some(else_clause) => else_clause.span(),
            None => self.then_statement.span(),
        };

        self.if_keyword.span.cover(end)
    }
}

impl Display for IfStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if {} {}", self.condition, self.then_statement)?;

        if let Some(else_clause) = &self.else_clause {
            write!(f, " {else_clause}")?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    pub else_keyword: Token,
    pub else_statement: Box<Statement>,
}

impl Parse for ElseClause {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let else_keyword = parser.expect_one(TokenKind::Else);
        let else_statement = Box::new(Statement::parse(parser, None));

        Self { else_keyword, else_statement }
    }
}

impl ElseClause {
    pub fn span(&self) -> TextSpan {
        self.else_keyword.span.cover(self.else_statement.span())
    }
}

impl Display for ElseClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "else {}", self.else_statement)
    }
}

// while -> while <expression> <statement>
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub while_keyword: Token,
    pub condition: Expression,
    pub body: Box<Statement>,
}

impl Parse for WhileStatement {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let while_keyword = parser.expect_one(TokenKind::While);
        let condition = Expression::parse(parser, None);
        let body = Box::new(Statement::parse(parser, None));

        Self { while_keyword, condition, body }
    }
}

impl WhileStatement {
    pub fn span(&self) -> TextSpan {
        self.while_keyword.span.cover(self.body.span())
    }
}

impl Display for WhileStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while {} {}", self.condition, self.body)
    }
}

// for -> for <identifier> = <expression> to <expression> <statement>
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub for_keyword: Token,
    pub identifier: Token,
    pub equals: Token,
    pub lower_bound: Expression,
    pub to_keyword: Token,
    pub upper_bound: Expression,
    pub body: Box<Statement>,
}

impl Parse for ForStatement {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let for_keyword = parser.expect_one(TokenKind::For);
        let identifier = parser.expect_one(TokenKind::Identifier);
        let equals = parser.expect_one(TokenKind::Equals);
        let lower_bound = Expression::parse(parser, None);
        let to_keyword = parser.expect_one(TokenKind::To);
        let upper_bound = Expression::parse(parser, None);
        let body = Box::new(Statement::parse(parser, None));

        Self { for_keyword, identifier, equals, lower_bound, to_keyword, upper_bound, body }
    }
}

impl ForStatement {
    pub fn span(&self) -> TextSpan {
        self.for_keyword.span.cover(self.body.span())
    }
}

impl Display for ForStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for {} = {} to {} {}",
            self.identifier.text,
            self.lower_bound,
            self.upper_bound,
            self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

impl Parse for ExpressionStatement {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        Self { expression: Expression::parse(parser, None) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Name(Name),
    Assignment(Assignment),
    Unary(Unary),
    Binary(Binary),
    Parenthesized(Parenthesized),
}

impl Parse for Expression {
    /// `None` starts at the outermost level, where assignments are recognised.
    /// `Some(precedence)` only accepts operators binding tighter than `precedence`.
    fn parse(parser: &mut Parser, precedence: Option<Precedence>) -> Self {
        if !parser.enter_nested() {
            return Self::missing(parser);
        }

        let expression = match precedence {
            None if parser.peek(0).kind == TokenKind::Identifier
                && parser.peek(1).kind == TokenKind::Equals =>
            {
                Self::Assignment(Assignment::parse(parser, None))
            },
            None => Self::parse_operators(parser, Precedence::Lowest),
            Some(precedence) => Self::parse_operators(parser, precedence),
        };

        parser.leave_nested();
        expression
    }
}

impl Expression {
    /// Name with a synthesised identifier, bound later without a further diagnostic.
    fn missing(parser: &Parser) -> Self {
        let position = parser.current().span.start;

        Self::Name(Name { identifier: Token::missing(TokenKind::Identifier, position) })
    }

    fn parse_operators(parser: &mut Parser, parent: Precedence) -> Self {
        let unary = Precedence::unary(parser.current().kind);

        let mut left = if unary != Precedence::Lowest && unary >= parent {
            Self::Unary(Unary::parse(parser, Some(unary)))
        } else {
            Self::parse_primary(parser)
        };

        loop {
            let precedence = Precedence::binary(parser.current().kind);

            if precedence == Precedence::Lowest || precedence <= parent {
                break;
            }

            let operator = parser.next_token();
            let right = Self::parse(parser, Some(precedence));

            left = Self::Binary(Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            });
        }

        left
    }

    fn parse_primary(parser: &mut Parser) -> Self {
        match parser.current().kind {
            TokenKind::OpenParenthesis => Self::Parenthesized(Parenthesized::parse(parser, None)),
            TokenKind::True | TokenKind::False | TokenKind::Number => Self::Literal(Literal::parse(parser, None)),
            _ => Self::Name(Name::parse(parser, None)),
        }
    }

    pub fn span(&self) -> TextSpan {
        match self {
            Self::Literal(literal) => literal.literal_token.span,
            Self::Name(name) => name.identifier.span,
            Self::Assignment(assignment) => assignment.span(),
            Self::Unary(unary) => unary.span(),
            Self::Binary(binary) => binary.span(),
            Self::Parenthesized(parenthesized) => parenthesized.span(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{}", literal.value),
            Self::Name(name) => write!(f, "{}", name.identifier.text),
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Unary(unary) => write!(f, "{unary}"),
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::Parenthesized(parenthesized) => write!(f, "{parenthesized}"),
        }
    }
}

// literal -> <number> | true | false
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub literal_token: Token,
    pub value: Value,
}

impl Parse for Literal {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let literal_token = match parser.current().kind {
            TokenKind::True | TokenKind::False => parser.next_token(),
            _ => parser.expect_one(TokenKind::Number),
        };

        // Numbers that failed to lex carry no value.
        let value = literal_token.value.unwrap_or(ZERO);

        Self { literal_token, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub identifier: Token,
}

impl Parse for Name {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        Self { identifier: parser.expect_one(TokenKind::Identifier) }
    }
}

// assignment -> <identifier> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Token,
    pub equals: Token,
    pub expression: Box<Expression>,
}

impl Parse for Assignment {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let identifier = parser.expect_one(TokenKind::Identifier);
        let equals = parser.expect_one(TokenKind::Equals);
        let expression = Box::new(Expression::parse(parser, None));

        Self { identifier, equals, expression }
    }
}

impl Assignment {
    pub fn span(&self) -> TextSpan {
        self.identifier.span.cover(self.expression.span())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier.text, self.expression)
    }
}

// unary -> <unary_operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: Token,
    pub operand: Box<Expression>,
}

impl Parse for Unary {
    fn parse(parser: &mut Parser, precedence: Option<Precedence>) -> Self {
        let operator = parser.next_token();
        let operand = Box::new(Expression::parse(parser, Some(precedence.unwrap_or(Precedence::Prefix))));

        Self { operator, operand }
    }
}

impl Unary {
    pub fn span(&self) -> TextSpan {
        self.operator.span.cover(self.operand.span())
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator.text, self.operand)
    }
}

// binary -> <expression> <binary_operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

impl Binary {
    pub fn span(&self) -> TextSpan {
        self.left.span().cover(self.right.span())
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.text, self.right)
    }
}

// parenthesized -> ( <expression> )
#[derive(Debug, Clone, PartialEq)]
pub struct Parenthesized {
    pub open_parenthesis: Token,
    pub expression: Box<Expression>,
    pub close_parenthesis: Token,
}

impl Parse for Parenthesized {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Self {
        let open_parenthesis = parser.expect_one(TokenKind::OpenParenthesis);
        let expression = Box::new(Expression::parse(parser, None));
        let close_parenthesis = parser.expect_one(TokenKind::CloseParenthesis);

        Self { open_parenthesis, expression, close_parenthesis }
    }
}

impl Parenthesized {
    pub fn span(&self) -> TextSpan {
        self.open_parenthesis.span.cover(self.close_parenthesis.span)
    }
}

impl Display for Parenthesized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.expression)
    }
}
