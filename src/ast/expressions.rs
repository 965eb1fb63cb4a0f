use crate::{lexer::tokens::Token, Position, Span};

use super::{
    ast::{Expr, TypeSlot},
    statements::Block,
};

/// A type written by name in the source, e.g. the `Integer` in `n: Integer`.
#[derive(Debug, Clone)]
pub struct TypeAnnotation {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<TypeAnnotation>,
    pub span: Span,
}

/// `fn(a: A, b: B) -> R { ... }`
#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Block,
    pub span: Span,
    pub ty: TypeSlot,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
    pub ty: TypeSlot,
}

/// A name followed by any number of calls, property accesses or indexes,
/// e.g. `f(1)(2)` or `console.log`.
#[derive(Debug, Clone)]
pub struct ChainExpr {
    pub name: String,
    pub tail: Vec<ChainItem>,
    pub span: Span,
    pub ty: TypeSlot,
}

#[derive(Debug, Clone)]
pub enum ChainItem {
    Call(CallItem),
    Property(PropertyItem),
    Index(IndexItem),
}

impl ChainItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChainItem::Call(_) => "Call",
            ChainItem::Property(_) => "Property",
            ChainItem::Index(_) => "Index",
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            ChainItem::Call(item) => &item.span,
            ChainItem::Property(item) => &item.span,
            ChainItem::Index(item) => &item.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallItem {
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PropertyItem {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IndexItem {
    pub index: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    String(String),
    Boolean(bool),
}

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
    pub ty: TypeSlot,
}

/// A parenthesised expression.
#[derive(Debug, Clone)]
pub struct GroupExpr {
    pub inner: Box<Expr>,
    pub span: Span,
    pub ty: TypeSlot,
}
