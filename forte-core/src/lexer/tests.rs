use super::prelude::{lex_tokens, Lexer, LexicalError, Token, TokenKind};
use crate::{
    environment::prelude::Value,
    utils::prelude::{DiagnosticKind, SourceText, TextSpan},
};

fn kinds(text: &str) -> Vec<TokenKind> {
    let source = SourceText::from_text(text);
    let (tokens, _) = lex_tokens(&source);

    tokens.into_iter()
        .map(|token| token.kind)
        .filter(|kind| *kind != TokenKind::Whitespace)
        .collect()
}

#[test]
fn test_operators() {
    let input = "+ - * / ! ~ && || == != < <= > >= = ( ) { }";

    let expected = vec![
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Bang,
        TokenKind::Tilde,
        TokenKind::AmpersandAmpersand,
        TokenKind::PipePipe,
        TokenKind::EqualsEquals,
        TokenKind::BangEquals,
        TokenKind::Less,
        TokenKind::LessEquals,
        TokenKind::Greater,
        TokenKind::GreaterEquals,
        TokenKind::Equals,
        TokenKind::OpenParenthesis,
        TokenKind::CloseParenthesis,
        TokenKind::OpenBrace,
        TokenKind::CloseBrace,
        TokenKind::EndOfFile,
    ];

    assert_eq!(kinds(input), expected);
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        kinds("a<=b!=!c"),
        vec![
            TokenKind::Identifier,
            TokenKind::LessEquals,
            TokenKind::Identifier,
            TokenKind::BangEquals,
            TokenKind::Bang,
            TokenKind::Identifier,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    let source = SourceText::from_text("true false if else while for to let var tobe");
    let (tokens, diagnostics) = lex_tokens(&source);

    let words = tokens.iter()
        .filter(|token| token.kind != TokenKind::Whitespace && token.kind != TokenKind::EndOfFile)
        .collect::<Vec<&Token>>();

    let expected = [
        TokenKind::True,
        TokenKind::False,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::For,
        TokenKind::To,
        TokenKind::Let,
        TokenKind::Var,
        TokenKind::Identifier,
    ];

    assert!(diagnostics.is_empty());
    assert_eq!(words.len(), expected.len());

    for (idx, (token, kind)) in words.iter().zip(expected).enumerate() {
        assert_eq!(token.kind, kind, "Token {idx} ({}) has unexpected kind", token.text);
    }

    assert_eq!(words[0].value, Some(Value::Boolean { value: true }));
    assert_eq!(words[1].value, Some(Value::Boolean { value: false }));
    assert_eq!(words[9].text, "tobe");
}

#[test]
fn test_numbers() {
    let source = SourceText::from_text("0 42 2147483647");
    let (tokens, diagnostics) = lex_tokens(&source);

    let values = tokens.iter()
        .filter(|token| token.kind == TokenKind::Number)
        .map(|token| token.value)
        .collect::<Vec<_>>();

    assert!(diagnostics.is_empty());
    assert_eq!(
        values,
        vec![
            Some(Value::Integer { value: 0 }),
            Some(Value::Integer { value: 42 }),
            Some(Value::Integer { value: i32::MAX }),
        ]
    );
}

#[test]
fn test_invalid_number_still_yields_token() {
    let source = SourceText::from_text("1 + 99999999999");
    let (tokens, diagnostics) = lex_tokens(&source);

    let number = tokens.iter()
        .filter(|token| token.kind == TokenKind::Number)
        .last()
        .cloned()
        .unwrap();

    assert_eq!(number.value, None);
    assert_eq!(number.span, TextSpan::new(4, 11));

    let reported = diagnostics.iter().collect::<Vec<_>>();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].span(), TextSpan::new(4, 11));
    assert_eq!(reported[0].message(), "The number 99999999999 isn't a valid Integer.");
}

#[test]
fn test_bad_characters() {
    let source = SourceText::from_text("1 & 2 $ |");
    let (tokens, diagnostics) = lex_tokens(&source);

    let bad = tokens.iter()
        .filter(|token| token.kind == TokenKind::Bad)
        .map(|token| token.text.as_str())
        .collect::<Vec<_>>();

    assert_eq!(bad, vec!["&", "$", "|"]);

    let errors = diagnostics.iter()
        .map(|diagnostic| diagnostic.kind.clone())
        .collect::<Vec<_>>();

    assert_eq!(
        errors,
        vec![
            DiagnosticKind::Lexical(LexicalError::BadCharacter { character: '&' }),
            DiagnosticKind::Lexical(LexicalError::BadCharacter { character: '$' }),
            DiagnosticKind::Lexical(LexicalError::BadCharacter { character: '|' }),
        ]
    );
    assert_eq!(diagnostics.iter().next().unwrap().message(), "Bad character input: '&'.");
}

#[test]
fn test_spans_cover_source() {
    let text = "let x = 10\n{ x }";
    let source = SourceText::from_text(text);
    let (tokens, _) = lex_tokens(&source);

    let mut position = 0;
    for token in &tokens {
        assert_eq!(token.span.start, position, "Gap before {token}");
        assert_eq!(token.text, &text[token.span.range()]);
        position = token.span.end();
    }

    assert_eq!(position, text.len());
}

#[test]
fn test_end_of_file_repeats() {
    let source = SourceText::from_text("x");
    let mut lexer = Lexer::new(&source);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);

    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EndOfFile);
        assert_eq!(token.span, TextSpan::new(1, 0));
        assert_eq!(token.text, "");
    }
}

#[test]
fn test_iterator_stops_after_end_of_file() {
    let source = SourceText::from_text("");
    let tokens = Lexer::new(&source).collect::<Vec<_>>();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EndOfFile);
}

#[test]
fn test_unicode_letters_and_whitespace() {
    let source = SourceText::from_text("λ\u{a0}+\r\n1");
    let (tokens, diagnostics) = lex_tokens(&source);

    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].span, TextSpan::new(0, 2));
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[2].kind, TokenKind::Plus);
}
