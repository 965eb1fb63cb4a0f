use std::slice::Iter;

use crate::Span;

use super::{
    ast::{Expr, Stmt, TypeSlot},
    expressions::TypeAnnotation,
};

#[derive(Debug, Clone)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone)]
pub enum Lvalue {
    Let {
        name: String,
        annotation: Option<TypeAnnotation>,
    },
    Var {
        name: String,
        annotation: Option<TypeAnnotation>,
    },
    /// Assignment to an existing location, e.g. `a.b = 1`.
    Path(Expr),
}

impl Lvalue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Lvalue::Let { .. } => "let",
            Lvalue::Var { .. } => "var",
            Lvalue::Path(_) => "path",
        }
    }
}

/// `let x = ...`, `var x = ...` or `path = ...`.
#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub lvalue: Lvalue,
    pub rvalue: Expr,
    pub span: Span,
    pub ty: TypeSlot,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

/// `for init; condition; increment { body }`
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init: Box<Stmt>,
    pub condition: Expr,
    pub increment: Expr,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
    pub ty: TypeSlot,
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
    pub ty: TypeSlot,
}
