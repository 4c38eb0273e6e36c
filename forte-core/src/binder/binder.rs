use log::trace;

use crate::{
    environment::prelude::{SymbolId, ValueType, VariableSymbol, ZERO},
    lexer::prelude::Token,
    parser::prelude::{
        Assignment, Binary, BlockStatement, Expression, ForStatement, IfStatement, Name,
        Statement, Unary, VariableDeclaration, WhileStatement,
    },
    utils::prelude::{DiagnosticBag, SourceText},
};
use super::{
    bound_tree::{BoundExpression, BoundStatement},
    error::BindError,
    operators::{BoundBinaryOperator, BoundUnaryOperator},
    scope::{ScopeArena, ScopeId},
    BoundGlobalScope,
};

#[derive(Debug)]
pub struct Binder {
    scopes: ScopeArena,
    scope: ScopeId,
    next_symbol: SymbolId,
    diagnostics: DiagnosticBag,
}

impl Binder {
    /// Rebuilds the scope chain of `previous`, one scope per earlier fragment
    /// with the oldest outermost, and opens the global scope of the new fragment on top.
    pub fn new(source: SourceText, previous: Option<&BoundGlobalScope>) -> Self {
        let mut chain = vec![];
        let mut current = previous;

        while let Some(global_scope) = current {
            chain.push(global_scope);
            current = global_scope.previous.as_deref();
        }

        let mut scopes = ScopeArena::new();
        let mut parent = None;

        for global_scope in chain.iter().rev() {
            let scope = scopes.push(parent);

            for variable in &global_scope.variables {
                scopes.try_declare(scope, variable.clone());
            }

            parent = Some(scope);
        }

        let scope = scopes.push(parent);
        trace!("replayed {} earlier fragments", chain.len());

        Self {
            scopes,
            scope,
            next_symbol: previous.map(|global_scope| global_scope.next_symbol).unwrap_or_default(),
            diagnostics: DiagnosticBag::new(source),
        }
    }

    /// Variables declared by this fragment, the next free symbol id and the bind diagnostics.
    pub fn finish(self) -> (Vec<VariableSymbol>, SymbolId, DiagnosticBag) {
        let variables = self.scopes.declared_variables(self.scope);

        (variables, self.next_symbol, self.diagnostics)
    }

    fn push_scope(&mut self) -> ScopeId {
        let parent = self.scope;
        self.scope = self.scopes.push(Some(parent));
        trace!("enter scope {:?} (parent {:?})", self.scope, parent);

        parent
    }

    fn pop_scope(&mut self, parent: ScopeId) {
        trace!("leave scope {:?}", self.scope);
        self.scope = parent;
    }

    fn new_variable(&mut self, name: &str, is_read_only: bool, value_type: ValueType) -> VariableSymbol {
        let id = self.next_symbol;
        self.next_symbol = id.next();

        VariableSymbol::new(id, name, is_read_only, value_type)
    }

    pub fn bind_statement(&mut self, statement: &Statement) -> BoundStatement {
        match statement {
            Statement::Block(block) => self.bind_block(block),
            Statement::VariableDeclaration(declaration) => self.bind_variable_declaration(declaration),
            Statement::If(conditional) => self.bind_if(conditional),
            Statement::While(conditional_loop) => self.bind_while(conditional_loop),
            Statement::For(fixed_loop) => self.bind_for(fixed_loop),
            Statement::Expression(statement) => BoundStatement::Expression {
                expression: self.bind_expression(&statement.expression),
            },
        }
    }

    fn bind_block(&mut self, block: &BlockStatement) -> BoundStatement {
        let parent = self.push_scope();

        let statements = block.statements.iter()
            .map(|statement| self.bind_statement(statement))
            .collect();

        self.pop_scope(parent);

        BoundStatement::Block { statements }
    }

    /// Binds a branch or loop body in its own scope, so declarations it makes
    /// without braces stay inside it.
    fn bind_nested_statement(&mut self, statement: &Statement) -> BoundStatement {
        let parent = self.push_scope();
        let bound = self.bind_statement(statement);
        self.pop_scope(parent);

        bound
    }

    fn bind_variable_declaration(&mut self, declaration: &VariableDeclaration) -> BoundStatement {
        let initializer = self.bind_expression(&declaration.initializer);
        let variable = self.declare(&declaration.identifier, declaration.is_read_only(), initializer.value_type());

        BoundStatement::VariableDeclaration { variable, initializer }
    }

    /// Declares in the current scope. A rejected symbol is still returned.
    fn declare(&mut self, identifier: &Token, is_read_only: bool, value_type: ValueType) -> VariableSymbol {
        let variable = self.new_variable(&identifier.text, is_read_only, value_type);

        if !identifier.is_missing() && !self.scopes.try_declare(self.scope, variable.clone()) {
            self.diagnostics.report_semantic(
                identifier.span,
                BindError::VariableAlreadyDeclared { name: identifier.text.clone() }
            );
        }

        variable
    }

    fn bind_if(&mut self, conditional: &IfStatement) -> BoundStatement {
        let condition = self.bind_expression_expecting(&conditional.condition, ValueType::Boolean);
        let then_statement = Box::new(self.bind_nested_statement(&conditional.then_statement));
        let else_statement = conditional.else_clause.as_ref()
            .map(|else_clause| Box::new(self.bind_nested_statement(&else_clause.else_statement)));

        BoundStatement::If { condition, then_statement, else_statement }
    }

    fn bind_while(&mut self, conditional_loop: &WhileStatement) -> BoundStatement {
        let condition = self.bind_expression_expecting(&conditional_loop.condition, ValueType::Boolean);
        let body = Box::new(self.bind_nested_statement(&conditional_loop.body));

        BoundStatement::While { condition, body }
    }

    fn bind_for(&mut self, fixed_loop: &ForStatement) -> BoundStatement {
        let lower_bound = self.bind_expression_expecting(&fixed_loop.lower_bound, ValueType::Integer);
        let upper_bound = self.bind_expression_expecting(&fixed_loop.upper_bound, ValueType::Integer);

        let parent = self.push_scope();
        let variable = self.declare(&fixed_loop.identifier, true, ValueType::Integer);
        let body = Box::new(self.bind_statement(&fixed_loop.body));
        self.pop_scope(parent);

        BoundStatement::For { variable, lower_bound, upper_bound, body }
    }

    fn bind_expression_expecting(&mut self, expression: &Expression, target: ValueType) -> BoundExpression {
        let bound = self.bind_expression(expression);

        if bound.value_type() != target {
            self.diagnostics.report_semantic(
                expression.span(),
                BindError::CannotConvert { from: bound.value_type(), to: target }
            );
        }

        bound
    }

    pub fn bind_expression(&mut self, expression: &Expression) -> BoundExpression {
        match expression {
            Expression::Literal(literal) => BoundExpression::Literal { value: literal.value },
            Expression::Name(name) => self.bind_name(name),
            Expression::Assignment(assignment) => self.bind_assignment(assignment),
            Expression::Unary(unary) => self.bind_unary(unary),
            Expression::Binary(binary) => self.bind_binary(binary),
            Expression::Parenthesized(parenthesized) => self.bind_expression(&parenthesized.expression),
        }
    }

    fn lookup(&mut self, identifier: &Token) -> Option<VariableSymbol> {
        let variable = self.scopes.try_lookup(self.scope, &identifier.text).cloned();

        if variable.is_none() {
            self.diagnostics.report_semantic(
                identifier.span,
                BindError::UndefinedName { name: identifier.text.clone() }
            );
        }

        variable
    }

    fn bind_name(&mut self, name: &Name) -> BoundExpression {
        // The parser already reported the missing identifier.
        if name.identifier.is_missing() {
            return BoundExpression::Literal { value: ZERO };
        }

        match self.lookup(&name.identifier) {
            Some(variable) => BoundExpression::Variable { variable },
            None => BoundExpression::Literal { value: ZERO },
        }
    }

    fn bind_assignment(&mut self, assignment: &Assignment) -> BoundExpression {
        let expression = self.bind_expression(&assignment.expression);

        let Some(variable) = self.lookup(&assignment.identifier) else {
            return BoundExpression::Literal { value: ZERO };
        };

        if variable.is_read_only {
            self.diagnostics.report_semantic(
                assignment.equals.span,
                BindError::CannotAssign { name: variable.name.clone() }
            );
        }

        if expression.value_type() != variable.value_type {
            self.diagnostics.report_semantic(
                assignment.expression.span(),
                BindError::CannotConvert { from: expression.value_type(), to: variable.value_type }
            );
        }

        BoundExpression::Assignment { variable, expression: Box::new(expression) }
    }

    fn bind_unary(&mut self, unary: &Unary) -> BoundExpression {
        let operand = self.bind_expression(&unary.operand);

        match BoundUnaryOperator::bind(unary.operator.kind, operand.value_type()) {
            Some(operator) => BoundExpression::Unary { operator, operand: Box::new(operand) },
            None => {
                self.diagnostics.report_semantic(
                    unary.operator.span,
                    BindError::UndefinedUnaryOperator {
                        operator: unary.operator.text.clone(),
                        operand: operand.value_type(),
                    }
                );

                operand
            }
        }
    }

    fn bind_binary(&mut self, binary: &Binary) -> BoundExpression {
        let left = self.bind_expression(&binary.left);
        let right = self.bind_expression(&binary.right);

        match BoundBinaryOperator::bind(binary.operator.kind, left.value_type(), right.value_type()) {
            Some(operator) => BoundExpression::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            },
            None => {
                self.diagnostics.report_semantic(
                    binary.operator.span,
                    BindError::UndefinedBinaryOperator {
                        operator: binary.operator.text.clone(),
                        left: left.value_type(),
                        right: right.value_type(),
                    }
                );

                left
            }
        }
    }
}
