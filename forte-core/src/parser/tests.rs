use crate::{
    lexer::prelude::TokenKind,
    parser::prelude::{Expression, ParseError, Statement, SyntaxKind, SyntaxNode, SyntaxTree, MAX_NESTING_DEPTH},
    utils::prelude::{DiagnosticKind, TextSpan},
};

fn parse_clean(input: &str) -> SyntaxTree {
    let tree = SyntaxTree::parse_text(input);

    assert!(
        tree.diagnostics.is_empty(),
        "Unexpected diagnostics for {input:?}: {:?}",
        tree.diagnostics.iter().map(|d| d.message()).collect::<Vec<_>>()
    );

    tree
}

fn syntax_errors(tree: &SyntaxTree) -> Vec<ParseError> {
    tree.diagnostics.iter()
        .filter_map(|diagnostic| match &diagnostic.kind {
            DiagnosticKind::Syntax(error) => Some(error.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_precedence() {
    let cases = [
        ("1 + 2 * 3", "(1 + (2 * 3))"),
        ("1 * 2 + 3", "((1 * 2) + 3)"),
        ("(1 + 2) * 3", "(((1 + 2)) * 3)"),
        ("a - b - c", "((a - b) - c)"),
        ("a / b * c", "((a / b) * c)"),
        ("1 + 2 == 3", "((1 + 2) == 3)"),
        ("a < b == c >= d", "(((a < b) == c) >= d)"),
        ("a || b && c", "(a || (b && c))"),
        ("a == b && c != d || e", "(((a == b) && (c != d)) || e)"),
        ("-a * b", "((-a) * b)"),
        ("a * -b", "(a * (-b))"),
        ("!a && b", "((!a) && b)"),
    ];

    for (input, expected) in cases {
        let tree = parse_clean(input);
        assert_eq!(tree.root.to_string(), expected, "Wrong grouping for {input:?}");
    }
}

#[test]
fn test_unary_is_right_associative() {
    let tree = parse_clean("--5");
    assert_eq!(tree.root.to_string(), "(-(-5))");

    let tree = parse_clean("!~-x");
    assert_eq!(tree.root.to_string(), "(!(~(-x)))");
}

#[test]
fn test_assignment_is_right_associative() {
    let tree = parse_clean("a = b = 1 + 2");
    assert_eq!(tree.root.to_string(), "a = b = (1 + 2)");

    let Statement::Expression(statement) = &tree.root.statement else {
        panic!("Expected an expression statement");
    };
    let Expression::Assignment(outer) = &statement.expression else {
        panic!("Expected an assignment");
    };

    assert!(matches!(*outer.expression, Expression::Assignment(_)));
}

#[test]
fn test_statements() {
    let cases = [
        ("{ }", "{ }"),
        ("{ let x = 1 var y = x }", "{ let x = 1 var y = x }"),
        ("if a b else c", "if a b else c"),
        ("if a if b c else d", "if a if b c else d"),
        ("while x < 10 x = x + 1", "while (x < 10) x = (x + 1)"),
        ("for i = 1 to 10 { s = s + i }", "for i = 1 to 10 { s = (s + i) }"),
    ];

    for (input, expected) in cases {
        let tree = parse_clean(input);
        assert_eq!(tree.root.to_string(), expected, "Wrong tree for {input:?}");
    }
}

#[test]
fn test_else_attaches_to_nearest_if() {
    let tree = parse_clean("if a if b c else d");

    let Statement::If(outer) = &tree.root.statement else {
        panic!("Expected an if statement");
    };

    assert!(outer.else_clause.is_none());
    assert!(matches!(&*outer.then_statement, Statement::If(inner) if inner.else_clause.is_some()));
}

#[test]
fn test_missing_close_parenthesis() {
    let tree = SyntaxTree::parse_text("(1 + 2");

    assert_eq!(
        syntax_errors(&tree),
        vec![ParseError::UnexpectedToken {
            found: TokenKind::EndOfFile,
            expected: TokenKind::CloseParenthesis,
        }]
    );
    assert_eq!(tree.diagnostics[0].span(), TextSpan::new(6, 0));
    assert_eq!(tree.diagnostics[0].message(), "Unexpected token <EndOfFile>, expected <CloseParenthesis>.");
    assert_eq!(tree.root.to_string(), "((1 + 2))");
}

#[test]
fn test_trailing_tokens() {
    let tree = SyntaxTree::parse_text("1 2");

    assert_eq!(
        syntax_errors(&tree),
        vec![ParseError::UnexpectedToken {
            found: TokenKind::Number,
            expected: TokenKind::EndOfFile,
        }]
    );
}

#[test]
fn test_missing_name_is_synthesized() {
    let tree = SyntaxTree::parse_text("1 +");

    let Statement::Expression(statement) = &tree.root.statement else {
        panic!("Expected an expression statement");
    };
    let Expression::Binary(binary) = &statement.expression else {
        panic!("Expected a binary expression");
    };
    let Expression::Name(name) = &*binary.right else {
        panic!("Expected a placeholder name");
    };

    assert!(name.identifier.is_missing());
    assert_eq!(syntax_errors(&tree).len(), 1);
}

#[test]
fn test_unclosed_block_makes_progress() {
    let tree = SyntaxTree::parse_text("{ ) let x = 1");

    let Statement::Block(block) = &tree.root.statement else {
        panic!("Expected a block");
    };

    assert_eq!(block.statements.len(), 2);
    assert!(block.close_brace.is_missing());
    assert_eq!(
        syntax_errors(&tree),
        vec![
            ParseError::UnexpectedToken { found: TokenKind::CloseParenthesis, expected: TokenKind::Identifier },
            ParseError::UnexpectedToken { found: TokenKind::EndOfFile, expected: TokenKind::CloseBrace },
        ]
    );
}

#[test]
fn test_lexical_diagnostics_come_first() {
    let tree = SyntaxTree::parse_text("1 $ (");

    let kinds = tree.diagnostics.iter()
        .map(|diagnostic| match diagnostic.kind {
            DiagnosticKind::Lexical(_) => "lexical",
            DiagnosticKind::Syntax(_) => "syntax",
            DiagnosticKind::Semantic(_) => "semantic",
        })
        .collect::<Vec<_>>();

    assert_eq!(kinds, vec!["lexical", "syntax"]);
}

#[test]
fn test_spans() {
    let tree = parse_clean("let answer = (4 + 2) * 7");

    assert_eq!(tree.root.statement.span(), TextSpan::new(0, 24));

    let Statement::VariableDeclaration(declaration) = &tree.root.statement else {
        panic!("Expected a declaration");
    };

    assert_eq!(declaration.initializer.span(), TextSpan::new(13, 11));
    assert!(declaration.is_read_only());
}

#[test]
fn test_syntax_node_children() {
    let tree = parse_clean("x = 1 + 2");
    let root = SyntaxNode::from(&tree.root);

    assert_eq!(root.kind(), SyntaxKind::CompilationUnit);

    let children = root.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].kind(), SyntaxKind::ExpressionStatement);
    assert_eq!(children[1].kind(), SyntaxKind::Token(TokenKind::EndOfFile));

    let assignment = children[0].children()[0];
    assert_eq!(assignment.kind(), SyntaxKind::AssignmentExpression);

    let kinds = assignment.children().iter().map(|child| child.kind()).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Token(TokenKind::Identifier),
            SyntaxKind::Token(TokenKind::Equals),
            SyntaxKind::BinaryExpression,
        ]
    );
}

#[test]
fn test_write_tree() {
    let tree = parse_clean("-1");
    let rendered = SyntaxNode::from(&tree.root).to_string();

    let expected = "\
└──CompilationUnit
   ├──ExpressionStatement
   │  └──UnaryExpression
   │     ├──MinusToken
   │     └──LiteralExpression
   │        └──NumberToken 1
   └──EndOfFileToken
";

    assert_eq!(rendered, expected);
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING_DEPTH + 50;

    let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let tree = SyntaxTree::parse_text(&input);
    assert_eq!(syntax_errors(&tree), vec![ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH }]);
    assert_eq!(tree.diagnostics.len(), 1, "Skipped input must not report again");

    let input = format!("{}{}", "{".repeat(depth), "}".repeat(depth));
    let tree = SyntaxTree::parse_text(&input);
    assert_eq!(syntax_errors(&tree), vec![ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH }]);

    let input = format!("{}x", "-".repeat(depth));
    let tree = SyntaxTree::parse_text(&input);
    assert_eq!(syntax_errors(&tree), vec![ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH }]);

    parse_clean(&format!("{}1{}", "(".repeat(100), ")".repeat(100)));
}
