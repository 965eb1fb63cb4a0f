//! Integration tests for the whole pipeline.
//!
//! These tests drive source code through tokenization, parsing and the
//! type system walk, and check the types recorded on the AST.

use std::rc::Rc;

use hummingbird::{
    ast::{
        ast::{Root, Stmt},
        statements::Lvalue,
    },
    errors::errors::{Error, ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_system::type_system::TypeSystem,
};

fn run(source: &str) -> Result<(TypeSystem, Root), Error> {
    let tokens = tokenize(source.to_string(), Some("test.hb".to_string()))?;
    let root = parse(tokens, Rc::new("test.hb".to_string()))?;
    let mut type_system = TypeSystem::new()?;
    type_system.walk(&root)?;
    Ok((type_system, root))
}

fn describe_binding(type_system: &TypeSystem, root: &Root, name: &str) -> Option<String> {
    root.statements.iter().find_map(|stmt| {
        let Stmt::Assignment(assignment) = stmt else { return None };
        match &assignment.lvalue {
            Lvalue::Let { name: bound, .. } | Lvalue::Var { name: bound, .. } if bound == name => {
                assignment.ty.get().map(|ty| type_system.describe(ty))
            },
            _ => None,
        }
    })
}

#[test]
fn test_program_with_functions_and_control_flow() {
    let source = r#"
        // Recursion through the let placeholder
        let count = fn(n: Integer) -> Integer {
            if n { return count(n - 1) }
            return n
        }

        var total = count(10) * 2
        let greeting = "hello"

        for var i = 0; i < total; i + 1 {
            let doubled = i * 2
        }
    "#;

    let (type_system, root) = run(source).unwrap();

    assert_eq!(describe_binding(&type_system, &root, "count").as_deref(), Some("(Integer) -> Integer"));
    assert_eq!(describe_binding(&type_system, &root, "total").as_deref(), Some("Integer"));
    assert_eq!(describe_binding(&type_system, &root, "greeting").as_deref(), Some("String"));
}

#[test]
fn test_higher_order_function_returns() {
    let source = "
        let id = fn(s: String) -> String { return s }
        let twice = fn(s: String) -> String { return id(id(s)) }
        let out = twice(\"x\")
    ";

    let (type_system, root) = run(source).unwrap();

    assert_eq!(describe_binding(&type_system, &root, "out").as_deref(), Some("String"));
}

#[test]
fn test_semantic_error_position_points_at_operator() {
    let source = "let x = 1 + \"a\"";

    let error = run(source).map(|_| ()).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Semantic);
    assert_eq!(error.get_error_name(), "BinaryTypeMismatch");
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.to_string(), "unequal types in binary operation: Integer </> String");
}

#[test]
fn test_syntax_errors_are_reported_before_typing() {
    let error = run("let x = @").map(|_| ()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);

    let error = run("let = 1").map(|_| ()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);
}

#[test]
fn test_unknown_variable_in_nested_function() {
    let source = "
        let outer = fn() -> Integer {
            let inner = fn() -> Integer { return missing }
            return inner()
        }
    ";

    let error = run(source).map(|_| ()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnknownVariable");
    assert_eq!(error.to_string(), "unknown variable: missing");
}

#[test]
fn test_locals_do_not_leak_out_of_blocks() {
    let source = "
        let flag = true
        if flag { let hidden = 1 }
        let seen = hidden
    ";

    let error = run(source).map(|_| ()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnknownVariable");
}

#[test]
fn test_separate_type_systems_are_independent() {
    let (first, first_root) = run("let a = 1").unwrap();
    let (second, _) = run("let b = \"b\"").unwrap();

    assert_eq!(first.types().len(), second.types().len());
    assert_eq!(describe_binding(&first, &first_root, "a").as_deref(), Some("Integer"));
    assert!(first.lookup("a").is_err());
}
