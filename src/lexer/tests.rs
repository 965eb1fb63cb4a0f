//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Integer literals
//! - String literals with escape sequences
//! - Operators and punctuation
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "let var fn if for return true false".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Var);
    assert_eq!(tokens[2].kind, TokenKind::Fn);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::For);
    assert_eq!(tokens[5].kind, TokenKind::Return);
    assert_eq!(tokens[6].kind, TokenKind::True);
    assert_eq!(tokens[7].kind, TokenKind::False);
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let source = "letter variable fnord".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 100".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "100");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "multiple words""#.to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "backslash\\" "quote\"d""#.to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "backslash\\");
    assert_eq!(tokens[3].value, "quote\"d");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_string_span_covers_quotes() {
    let source = r#"x = "ab""#.to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[2].span.start.0, 4);
    assert_eq!(tokens[2].span.end.0, 8);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < > <= >= = && ||".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Plus);
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].kind, TokenKind::Star);
    assert_eq!(tokens[3].kind, TokenKind::Slash);
    assert_eq!(tokens[4].kind, TokenKind::Percent);
    assert_eq!(tokens[5].kind, TokenKind::Equals);
    assert_eq!(tokens[6].kind, TokenKind::NotEquals);
    assert_eq!(tokens[7].kind, TokenKind::Less);
    assert_eq!(tokens[8].kind, TokenKind::Greater);
    assert_eq!(tokens[9].kind, TokenKind::LessEquals);
    assert_eq!(tokens[10].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[11].kind, TokenKind::Assignment);
    assert_eq!(tokens[12].kind, TokenKind::And);
    assert_eq!(tokens[13].kind, TokenKind::Or);
    assert_eq!(tokens[14].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] . , ; : ->".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::OpenBracket);
    assert_eq!(tokens[5].kind, TokenKind::CloseBracket);
    assert_eq!(tokens[6].kind, TokenKind::Dot);
    assert_eq!(tokens[7].kind, TokenKind::Comma);
    assert_eq!(tokens[8].kind, TokenKind::Semicolon);
    assert_eq!(tokens[9].kind, TokenKind::Colon);
    assert_eq!(tokens[10].kind, TokenKind::Arrow);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_comments() {
    let source = "let x = 5 // this is a comment\nlet y = 10".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert_eq!(tokens[5].value, "y");
    assert_eq!(tokens[7].value, "10");
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_function_literal() {
    let source = "let f = fn(a: Integer) -> Integer { return a }".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Fn,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Arrow,
            TokenKind::Identifier,
            TokenKind::OpenCurly,
            TokenKind::Return,
            TokenKind::Identifier,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "let x = @".to_string();
    let result = tokenize(source, Some("test.hb".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_tokenize_whitespace_handling() {
    let source = "  let   x   =   42  ".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Assignment);
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_empty_string() {
    let source = r#""""#.to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_method_chain() {
    let source = "\"abc\".uppercase()".to_string();
    let tokens = tokenize(source, Some("test.hb".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].value, "uppercase");
    assert_eq!(tokens[3].kind, TokenKind::OpenParen);
    assert_eq!(tokens[4].kind, TokenKind::CloseParen);
}
