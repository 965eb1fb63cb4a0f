use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Expr, Root, Stmt, TypeSlot},
        expressions::{BinaryExpr, ChainExpr, ChainItem, FunctionExpr, Literal, LiteralExpr, TypeAnnotation},
        statements::{AssignmentStmt, Block, ForStmt, IfStmt, Lvalue, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    bootstrap::{bootstrap, Intrinsics},
    scope::Scope,
    types::{Type, TypeArena, TypeId},
};

/// Called with a Function type as soon as it is allocated, before its body
/// is visited. Lets a `let` placeholder be filled for recursive references.
type Immediate<'a> = Option<&'a dyn Fn(&TypeArena, TypeId) -> Result<(), ErrorImpl>>;

/// Owns the type arena and the bootstrapped root scope, and annotates ASTs
/// with their types.
#[derive(Debug)]
pub struct TypeSystem {
    types: TypeArena,
    root: Scope<'static>,
    intrinsics: Intrinsics,
}

impl TypeSystem {
    pub fn new() -> Result<Self, Error> {
        let mut types = TypeArena::new();
        let mut root = Scope::new();
        let intrinsics = bootstrap(&mut types, &mut root)?;

        Ok(TypeSystem { types, root, intrinsics })
    }

    pub fn types(&self) -> &TypeArena {
        &self.types
    }

    pub fn root_scope(&self) -> &Scope<'static> {
        &self.root
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub fn describe(&self, id: TypeId) -> String {
        self.types.describe(id)
    }

    /// Looks a name up in the root scope.
    pub fn lookup(&self, name: &str) -> Result<TypeId, Error> {
        self.root.get(name).map_err(|error| error.at(Position::null()))
    }

    /// Resolves a dotted path such as `std.core.types.string` or
    /// `console.log`. Each segment is tried as a child module first, then as
    /// a property.
    pub fn lookup_path(&self, path: &str) -> Result<TypeId, Error> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = self.lookup(first)?;

        for segment in segments {
            current = match self.types.child_module(current, segment) {
                Some(child) => child,
                None => self
                    .types
                    .property_of(current, segment)
                    .and_then(|property| property.ty)
                    .ok_or_else(|| {
                        ErrorImpl::UnknownProperty {
                            owner: self.types.describe(current),
                            property: segment.to_string(),
                        }
                        .at(Position::null())
                    })?,
            };
        }

        Ok(current)
    }

    /// Annotates every typed node of `root`. The first error aborts the walk.
    pub fn walk(&mut self, root: &Root) -> Result<(), Error> {
        let TypeSystem { types, root: root_scope, intrinsics } = self;
        let mut walker = Walker { types, intrinsics };
        let mut top_level = Scope::child(root_scope);

        for stmt in &root.statements {
            walker.visit_statement(stmt, &mut top_level)?;
        }

        debug!(statements = root.statements.len(), types = walker.types.len(), "walk finished");
        Ok(())
    }
}

struct Walker<'a> {
    types: &'a mut TypeArena,
    intrinsics: &'a Intrinsics,
}

/// Stores `ty` in `slot`. Re-recording the type already there is allowed so a
/// tree can be walked more than once.
fn record(slot: &TypeSlot, ty: TypeId, position: &Position) -> Result<(), Error> {
    if slot.get() == Some(ty) {
        return Ok(());
    }
    slot.set(ty)
        .map_err(|_| ErrorImpl::TypeAlreadyResolved.at(position.clone()))
}

impl Walker<'_> {
    fn visit_statement(&mut self, stmt: &Stmt, scope: &mut Scope<'_>) -> Result<(), Error> {
        trace!(kind = stmt.kind_name(), depth = scope.depth(), "visiting statement");
        match stmt {
            Stmt::Assignment(assignment) => match &assignment.lvalue {
                Lvalue::Let { name, annotation } | Lvalue::Var { name, annotation } => {
                    self.visit_let(assignment, name, annotation.as_ref(), scope)
                },
                Lvalue::Path(_) => Err(ErrorImpl::MalformedLvalue {
                    lvalue: assignment.lvalue.kind_name().to_string(),
                }
                .at(assignment.span.start.clone())),
            },
            Stmt::If(stmt) => self.visit_if(stmt, scope),
            Stmt::For(stmt) => self.visit_for(stmt, scope),
            Stmt::Return(stmt) => self.visit_return(stmt, scope),
            Stmt::Expression(stmt) => {
                let ty = self.resolve_expression(&stmt.expression, scope, None)?;
                record(&stmt.ty, ty, &stmt.span.start)
            },
            Stmt::Block(block) => Err(ErrorImpl::UnsupportedStatement {
                kind: stmt.kind_name().to_string(),
            }
            .at(block.span.start.clone())),
        }
    }

    fn visit_block(&mut self, block: &Block, scope: &mut Scope<'_>) -> Result<(), Error> {
        for stmt in block.iter() {
            self.visit_statement(stmt, scope)?;
        }
        Ok(())
    }

    fn visit_let(
        &mut self,
        stmt: &AssignmentStmt,
        name: &str,
        annotation: Option<&TypeAnnotation>,
        scope: &mut Scope<'_>,
    ) -> Result<(), Error> {
        let position = &stmt.span.start;
        let placeholder = self.types.alloc_unknown();

        let rvalue_ty = {
            // The name is visible inside its own initializer through the
            // placeholder, which a function literal fills immediately.
            let mut let_scope = Scope::child(scope);
            let_scope
                .set_local(name, placeholder)
                .map_err(|error| error.at(position.clone()))?;

            let fill: &dyn Fn(&TypeArena, TypeId) -> Result<(), ErrorImpl> =
                &|types, ty| types.resolve_unknown(placeholder, ty);
            self.resolve_expression(&stmt.rvalue, &let_scope, Some(fill))?
        };

        if let Some(annotation) = annotation {
            let expected = self.resolve_type_name(annotation, scope)?;
            if !self.types.equals(expected, rvalue_ty) {
                return Err(ErrorImpl::AnnotationMismatch {
                    expected: self.types.describe(expected),
                    received: self.types.describe(rvalue_ty),
                }
                .at(annotation.position.clone()));
            }
        }

        scope
            .set_local(name, rvalue_ty)
            .map_err(|error| error.at(position.clone()))?;
        record(&stmt.ty, rvalue_ty, position)?;

        debug!(name, ty = %self.types.describe(rvalue_ty), depth = scope.depth(), "bound local");
        Ok(())
    }

    fn visit_if(&mut self, stmt: &IfStmt, scope: &mut Scope<'_>) -> Result<(), Error> {
        let Stmt::Block(block) = stmt.body.as_ref() else {
            return Err(ErrorImpl::ExpectedBlock {
                found: stmt.body.kind_name().to_string(),
            }
            .at(stmt.body.get_span().start.clone()));
        };

        // TODO: require the condition to be Boolean once the type system has
        // a notion of truthiness.
        self.resolve_expression(&stmt.condition, scope, None)?;

        let mut block_scope = Scope::child(scope);
        self.visit_block(block, &mut block_scope)
    }

    fn visit_for(&mut self, stmt: &ForStmt, scope: &mut Scope<'_>) -> Result<(), Error> {
        self.visit_statement(&stmt.init, scope)?;
        self.resolve_expression(&stmt.condition, scope, None)?;
        self.resolve_expression(&stmt.increment, scope, None)?;

        let mut block_scope = Scope::child(scope);
        self.visit_block(&stmt.body, &mut block_scope)
    }

    fn visit_return(&mut self, stmt: &ReturnStmt, scope: &mut Scope<'_>) -> Result<(), Error> {
        let Some(value) = &stmt.value else {
            return Err(ErrorImpl::EmptyReturn.at(stmt.span.start.clone()));
        };

        let ty = self.resolve_expression(value, scope, None)?;
        record(&stmt.ty, ty, &stmt.span.start)
    }

    /// Returns the type of `expr`, visiting it only if its slot is empty.
    fn resolve_expression(&mut self, expr: &Expr, scope: &Scope<'_>, immediate: Immediate) -> Result<TypeId, Error> {
        if let Some(ty) = expr.ty() {
            return Ok(ty);
        }

        let ty = match expr {
            Expr::Function(function) => self.visit_function(function, scope, immediate)?,
            Expr::Binary(binary) => self.visit_binary(binary, scope)?,
            Expr::Chain(chain) => self.visit_chain(chain, scope)?,
            Expr::Literal(literal) => self.visit_literal(literal),
            Expr::Group(group) => self.resolve_expression(&group.inner, scope, immediate)?,
        };

        record(expr.slot(), ty, &expr.get_span().start)?;
        Ok(ty)
    }

    fn visit_function(&mut self, function: &FunctionExpr, scope: &Scope<'_>, immediate: Immediate) -> Result<TypeId, Error> {
        let ret = match &function.return_type {
            Some(annotation) => Some(self.resolve_type_name(annotation, scope)?),
            None => None,
        };

        let mut params = Vec::with_capacity(function.parameters.len());
        for parameter in &function.parameters {
            let Some(annotation) = &parameter.annotation else {
                return Err(ErrorImpl::MissingParameterType {
                    parameter: parameter.name.clone(),
                }
                .at(parameter.span.start.clone()));
            };
            params.push(self.resolve_type_name(annotation, scope)?);
        }

        let ty = self.types.alloc_function(self.intrinsics.root_object, params.clone(), ret);
        if let Some(immediate) = immediate {
            immediate(self.types, ty).map_err(|error| error.at(function.span.start.clone()))?;
        }

        let mut function_scope = Scope::child(scope);
        for (parameter, param_ty) in function.parameters.iter().zip(params) {
            function_scope
                .set_local(&parameter.name, param_ty)
                .map_err(|error| error.at(parameter.span.start.clone()))?;
        }

        self.visit_block(&function.body, &mut function_scope)?;

        if ret.is_none() {
            return Err(ErrorImpl::MissingReturnType.at(function.span.start.clone()));
        }

        Ok(ty)
    }

    fn visit_binary(&mut self, binary: &BinaryExpr, scope: &Scope<'_>) -> Result<TypeId, Error> {
        let left = self.resolve_expression(&binary.left, scope, None)?;
        let right = self.resolve_expression(&binary.right, scope, None)?;

        if self.types.equals(left, right) {
            Ok(left)
        } else {
            Err(ErrorImpl::BinaryTypeMismatch {
                left: self.types.describe(left),
                right: self.types.describe(right),
            }
            .at(binary.operator.span.start.clone()))
        }
    }

    fn visit_chain(&mut self, chain: &ChainExpr, scope: &Scope<'_>) -> Result<TypeId, Error> {
        let position = &chain.span.start;
        let bound = scope.get(&chain.name).map_err(|error| error.at(position.clone()))?;
        let mut ty = self.types.known(bound).ok_or_else(|| {
            ErrorImpl::UnresolvedPlaceholder { name: chain.name.clone() }.at(position.clone())
        })?;

        for item in &chain.tail {
            let ChainItem::Call(call) = item else {
                return Err(ErrorImpl::UnsupportedChainItem {
                    item: item.kind_name().to_string(),
                }
                .at(item.get_span().start.clone()));
            };

            let ret = match &self.types[ty] {
                Type::Function(function) => function.ret,
                _ => {
                    return Err(ErrorImpl::NotCallable { found: self.types.describe(ty) }
                        .at(call.span.start.clone()))
                },
            };

            // TODO: check argument types against the callee's parameters.
            for argument in &call.arguments {
                self.resolve_expression(argument, scope, None)?;
            }

            ty = ret.ok_or_else(|| {
                ErrorImpl::UnknownReturnType { function: chain.name.clone() }.at(call.span.start.clone())
            })?;
        }

        Ok(ty)
    }

    fn visit_literal(&self, literal: &LiteralExpr) -> TypeId {
        match literal.value {
            Literal::Integer(_) => self.intrinsics.integer,
            Literal::String(_) => self.intrinsics.string,
            Literal::Boolean(_) => self.intrinsics.boolean,
        }
    }

    /// Resolves an annotation to an Object type through the scope chain.
    fn resolve_type_name(&self, annotation: &TypeAnnotation, scope: &Scope<'_>) -> Result<TypeId, Error> {
        let not_found = || ErrorImpl::TypeNotFound { name: annotation.name.clone() }.at(annotation.position.clone());

        let ty = scope.get(&annotation.name).map_err(|_| not_found())?;
        match &self.types[ty] {
            Type::Object(_) => Ok(ty),
            _ => Err(not_found()),
        }
    }
}
