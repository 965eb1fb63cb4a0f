use std::cell::OnceCell;

use crate::{type_system::types::TypeId, Span};

use super::{
    expressions::{BinaryExpr, ChainExpr, FunctionExpr, GroupExpr, LiteralExpr},
    statements::{AssignmentStmt, Block, ExpressionStmt, ForStmt, IfStmt, ReturnStmt},
};

/// Resolved-type slot carried by typed nodes.
///
/// Starts empty and may be written once by the type system. A second write
/// is rejected so a node's type can never silently change.
#[derive(Debug, Clone, Default)]
pub struct TypeSlot(OnceCell<TypeId>);

impl TypeSlot {
    pub fn new() -> Self {
        TypeSlot(OnceCell::new())
    }

    pub fn get(&self) -> Option<TypeId> {
        self.0.get().copied()
    }

    /// Stores `ty`, returning it back as the error if the slot was already
    /// written.
    pub fn set(&self, ty: TypeId) -> Result<(), TypeId> {
        self.0.set(ty)
    }

    pub fn is_set(&self) -> bool {
        self.0.get().is_some()
    }
}

/// The root of a parsed compilation unit.
#[derive(Debug, Clone)]
pub struct Root {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// Statement kinds.
#[derive(Debug, Clone)]
pub enum Stmt {
    Assignment(AssignmentStmt),
    If(IfStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
    Block(Block),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Block(block) => &block.span,
        }
    }

    /// Name of the statement kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Assignment(_) => "Assignment",
            Stmt::If(_) => "If",
            Stmt::For(_) => "For",
            Stmt::Return(_) => "Return",
            Stmt::Expression(_) => "Expression",
            Stmt::Block(_) => "Block",
        }
    }

    /// The type recorded on this statement, for the statement kinds that
    /// carry one.
    pub fn ty(&self) -> Option<TypeId> {
        match self {
            Stmt::Assignment(stmt) => stmt.ty.get(),
            Stmt::Return(stmt) => stmt.ty.get(),
            Stmt::Expression(stmt) => stmt.ty.get(),
            Stmt::If(_) | Stmt::For(_) | Stmt::Block(_) => None,
        }
    }
}

/// Expression kinds.
#[derive(Debug, Clone)]
pub enum Expr {
    Function(FunctionExpr),
    Binary(BinaryExpr),
    Chain(ChainExpr),
    Literal(LiteralExpr),
    Group(GroupExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Function(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Chain(expr) => &expr.span,
            Expr::Literal(expr) => &expr.span,
            Expr::Group(expr) => &expr.span,
        }
    }

    pub fn slot(&self) -> &TypeSlot {
        match self {
            Expr::Function(expr) => &expr.ty,
            Expr::Binary(expr) => &expr.ty,
            Expr::Chain(expr) => &expr.ty,
            Expr::Literal(expr) => &expr.ty,
            Expr::Group(expr) => &expr.ty,
        }
    }

    pub fn ty(&self) -> Option<TypeId> {
        self.slot().get()
    }
}
