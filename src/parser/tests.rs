//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Variable bindings with and without annotations
//! - Function literals
//! - Binary expressions and precedence
//! - Call chains
//! - Control flow statements

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, Root, Stmt},
        expressions::{ChainItem, Literal},
        statements::Lvalue,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Root, Error> {
    let tokens = tokenize(source.to_string(), Some("test.hb".to_string()))?;
    parse(tokens, Rc::new("test.hb".to_string()))
}

fn rvalue(stmt: &Stmt) -> &Expr {
    match stmt {
        Stmt::Assignment(assignment) => &assignment.rvalue,
        other => panic!("expected assignment, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_let_declaration() {
    let root = parse_source("let x = 42;").unwrap();

    assert_eq!(root.statements.len(), 1);
    match &root.statements[0] {
        Stmt::Assignment(assignment) => {
            assert!(matches!(&assignment.lvalue, Lvalue::Let { name, annotation: None } if name == "x"));
            assert!(matches!(&assignment.rvalue, Expr::Literal(lit) if lit.value == Literal::Integer(42)));
        },
        other => panic!("expected assignment, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_var_declaration_with_annotation() {
    let root = parse_source("var s: String = \"abc\"").unwrap();

    match &root.statements[0] {
        Stmt::Assignment(assignment) => match &assignment.lvalue {
            Lvalue::Var { name, annotation: Some(annotation) } => {
                assert_eq!(name, "s");
                assert_eq!(annotation.name, "String");
            },
            other => panic!("expected var lvalue, got {}", other.kind_name()),
        },
        other => panic!("expected assignment, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_declaration_requires_rhs() {
    let result = parse_source("let x;");

    assert!(matches!(
        result.map(|_| ()).unwrap_err().get_internal_error(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_semicolons_are_optional() {
    let root = parse_source("let a = 1\nlet b = 2\nb").unwrap();

    assert_eq!(root.statements.len(), 3);
    assert!(matches!(root.statements[2], Stmt::Expression(_)));
}

#[test]
fn test_parse_function_literal() {
    let root = parse_source("let f = fn(n: Integer, m) -> Integer { return n }").unwrap();

    match rvalue(&root.statements[0]) {
        Expr::Function(function) => {
            assert_eq!(function.parameters.len(), 2);
            assert_eq!(function.parameters[0].name, "n");
            assert_eq!(function.parameters[0].annotation.as_ref().map(|a| a.name.as_str()), Some("Integer"));
            assert!(function.parameters[1].annotation.is_none());
            assert_eq!(function.return_type.as_ref().map(|a| a.name.as_str()), Some("Integer"));
            assert_eq!(function.body.body.len(), 1);
        },
        _ => panic!("expected function literal"),
    }
}

#[test]
fn test_parse_function_without_return_type() {
    let root = parse_source("let f = fn() { }").unwrap();

    match rvalue(&root.statements[0]) {
        Expr::Function(function) => {
            assert!(function.parameters.is_empty());
            assert!(function.return_type.is_none());
            assert!(function.body.body.is_empty());
        },
        _ => panic!("expected function literal"),
    }
}

#[test]
fn test_binary_precedence() {
    let root = parse_source("let x = 1 + 2 * 3").unwrap();

    match rvalue(&root.statements[0]) {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator.kind, TokenKind::Plus);
            assert!(matches!(*binary.left, Expr::Literal(_)));
            match &*binary.right {
                Expr::Binary(right) => assert_eq!(right.operator.kind, TokenKind::Star),
                _ => panic!("expected multiplication on the right"),
            }
        },
        _ => panic!("expected binary expression"),
    }
}

#[test]
fn test_binary_is_left_associative() {
    let root = parse_source("let x = 1 - 2 - 3").unwrap();

    match rvalue(&root.statements[0]) {
        Expr::Binary(binary) => {
            assert!(matches!(*binary.left, Expr::Binary(_)));
            assert!(matches!(*binary.right, Expr::Literal(_)));
        },
        _ => panic!("expected binary expression"),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    let root = parse_source("let x = (1 + 2) * 3").unwrap();

    match rvalue(&root.statements[0]) {
        Expr::Binary(binary) => {
            assert_eq!(binary.operator.kind, TokenKind::Star);
            assert!(matches!(*binary.left, Expr::Group(_)));
        },
        _ => panic!("expected binary expression"),
    }
}

#[test]
fn test_parse_call_chain() {
    let root = parse_source("console.log(\"hi\", 1)[0]").unwrap();

    match &root.statements[0] {
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Chain(chain) => {
                assert_eq!(chain.name, "console");
                assert_eq!(chain.tail.len(), 3);
                assert!(matches!(&chain.tail[0], ChainItem::Property(p) if p.name == "log"));
                assert!(matches!(&chain.tail[1], ChainItem::Call(c) if c.arguments.len() == 2));
                assert!(matches!(&chain.tail[2], ChainItem::Index(_)));
            },
            _ => panic!("expected chain"),
        },
        other => panic!("expected expression statement, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_path_assignment() {
    let root = parse_source("a.b = 1").unwrap();

    match &root.statements[0] {
        Stmt::Assignment(assignment) => assert!(matches!(assignment.lvalue, Lvalue::Path(_))),
        other => panic!("expected assignment, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_if_statement() {
    let root = parse_source("if s { let t = s }").unwrap();

    match &root.statements[0] {
        Stmt::If(stmt) => {
            assert!(matches!(stmt.condition, Expr::Chain(_)));
            assert!(matches!(&*stmt.body, Stmt::Block(block) if block.body.len() == 1));
        },
        other => panic!("expected if, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_if_with_non_block_body() {
    let root = parse_source("if x let y = 1").unwrap();

    match &root.statements[0] {
        Stmt::If(stmt) => assert!(matches!(*stmt.body, Stmt::Assignment(_))),
        other => panic!("expected if, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_for_statement() {
    let root = parse_source("for var i = 0; i < 10; i + 1 { console }").unwrap();

    match &root.statements[0] {
        Stmt::For(stmt) => {
            assert!(matches!(*stmt.init, Stmt::Assignment(_)));
            assert!(matches!(&stmt.condition, Expr::Binary(b) if b.operator.kind == TokenKind::Less));
            assert!(matches!(&stmt.increment, Expr::Binary(b) if b.operator.kind == TokenKind::Plus));
            assert_eq!(stmt.body.body.len(), 1);
        },
        other => panic!("expected for, got {}", other.kind_name()),
    }
}

#[test]
fn test_parse_return_without_value() {
    let root = parse_source("let f = fn() -> Integer { return }").unwrap();

    match rvalue(&root.statements[0]) {
        Expr::Function(function) => {
            assert!(matches!(&function.body.body[0], Stmt::Return(ret) if ret.value.is_none()));
        },
        _ => panic!("expected function literal"),
    }
}

#[test]
fn test_parse_bare_block() {
    let root = parse_source("{ let a = 1 }").unwrap();

    assert!(matches!(&root.statements[0], Stmt::Block(block) if block.body.len() == 1));
}

#[test]
fn test_parse_literals() {
    let root = parse_source("let a = true\nlet b = false\nlet c = \"x\"").unwrap();

    assert!(matches!(rvalue(&root.statements[0]), Expr::Literal(l) if l.value == Literal::Boolean(true)));
    assert!(matches!(rvalue(&root.statements[1]), Expr::Literal(l) if l.value == Literal::Boolean(false)));
    assert!(matches!(rvalue(&root.statements[2]), Expr::Literal(l) if l.value == Literal::String("x".to_string())));
}

#[test]
fn test_integer_overflow_is_reported() {
    let result = parse_source("let a = 99999999999999999999999");

    assert!(matches!(
        result.map(|_| ()).unwrap_err().get_internal_error(),
        ErrorImpl::NumberParseError { .. }
    ));
}

#[test]
fn test_unclosed_block_is_an_error() {
    assert!(parse_source("let f = fn() -> Integer { return 1").is_err());
}

#[test]
fn test_unexpected_token_in_expression() {
    let result = parse_source("let a = )");

    assert!(matches!(
        result.map(|_| ()).unwrap_err().get_internal_error(),
        ErrorImpl::UnexpectedToken { token } if token == ")"
    ));
}

#[test]
fn test_empty_source() {
    let root = parse_source("").unwrap();

    assert!(root.statements.is_empty());
}
