use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::DuplicateLocal { .. } => "DuplicateLocal",
            ErrorImpl::TypeNotFound { .. } => "TypeNotFound",
            ErrorImpl::BinaryTypeMismatch { .. } => "BinaryTypeMismatch",
            ErrorImpl::AnnotationMismatch { .. } => "AnnotationMismatch",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::UnresolvedPlaceholder { .. } => "UnresolvedPlaceholder",
            ErrorImpl::UnsupportedChainItem { .. } => "UnsupportedChainItem",
            ErrorImpl::MalformedLvalue { .. } => "MalformedLvalue",
            ErrorImpl::UnknownProperty { .. } => "UnknownProperty",
            ErrorImpl::UnsupportedStatement { .. } => "UnsupportedStatement",
            ErrorImpl::ExpectedBlock { .. } => "ExpectedBlock",
            ErrorImpl::MissingReturnType => "MissingReturnType",
            ErrorImpl::MissingParameterType { .. } => "MissingParameterType",
            ErrorImpl::EmptyReturn => "EmptyReturn",
            ErrorImpl::UnknownReturnType { .. } => "UnknownReturnType",
            ErrorImpl::PlaceholderAlreadyResolved => "PlaceholderAlreadyResolved",
            ErrorImpl::TypeAlreadyResolved => "TypeAlreadyResolved",
            ErrorImpl::NotPropertyBearing { .. } => "NotPropertyBearing",
            ErrorImpl::ModuleAlreadyParented { .. } => "ModuleAlreadyParented",
            ErrorImpl::ModuleAlreadyChild { .. } => "ModuleAlreadyChild",
            ErrorImpl::UnknownPropertyFlag { .. } => "UnknownPropertyFlag",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, is a bracket or operand missing?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnknownVariable { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` is not declared in this scope", name))
            }
            ErrorImpl::DuplicateLocal { name } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope, declare it in a nested block to shadow it",
                name
            )),
            ErrorImpl::TypeNotFound { name } => {
                ErrorTip::Suggestion(format!("No type named `{}` is in scope", name))
            }
            ErrorImpl::BinaryTypeMismatch { left, right } => ErrorTip::Suggestion(format!(
                "Both operands must have the same type, found `{}` and `{}`",
                left, right
            )),
            ErrorImpl::AnnotationMismatch { expected, received } => ErrorTip::Suggestion(
                format!("Expected type `{}`, received `{}`", expected, received),
            ),
            ErrorImpl::NotCallable { found } => {
                ErrorTip::Suggestion(format!("Trying to call non-Function of type `{}`", found))
            }
            ErrorImpl::UnresolvedPlaceholder { name } => ErrorTip::Suggestion(format!(
                "`{}` is used inside its own initializer before its type is known",
                name
            )),
            ErrorImpl::UnsupportedChainItem { item } => ErrorTip::Suggestion(format!(
                "Only calls may follow a name, found {}",
                item
            )),
            ErrorImpl::MalformedLvalue { .. } => ErrorTip::Suggestion(String::from(
                "Only `let` and `var` declarations may be assigned",
            )),
            ErrorImpl::UnknownProperty { owner, property } => ErrorTip::Suggestion(format!(
                "`{}` has no property `{}`",
                owner, property
            )),
            ErrorImpl::UnsupportedStatement { kind } => {
                ErrorTip::Suggestion(format!("Don't know how to visit {} statements", kind))
            }
            ErrorImpl::ExpectedBlock { found } => {
                ErrorTip::Suggestion(format!("Expected a block, found {} statement", found))
            }
            ErrorImpl::MissingReturnType => ErrorTip::Suggestion(String::from(
                "Inferred return types are not supported, annotate it with `-> Type`",
            )),
            ErrorImpl::MissingParameterType { parameter } => ErrorTip::Suggestion(format!(
                "Parameter `{}` needs a type annotation",
                parameter
            )),
            ErrorImpl::EmptyReturn => {
                ErrorTip::Suggestion(String::from("Return statements must return a value"))
            }
            ErrorImpl::UnknownReturnType { function } => ErrorTip::Suggestion(format!(
                "Return type of `{}` is not known yet",
                function
            )),
            ErrorImpl::PlaceholderAlreadyResolved
            | ErrorImpl::TypeAlreadyResolved
            | ErrorImpl::NotPropertyBearing { .. }
            | ErrorImpl::ModuleAlreadyParented { .. }
            | ErrorImpl::ModuleAlreadyChild { .. } => ErrorTip::None,
            ErrorImpl::UnknownPropertyFlag { flag } => {
                ErrorTip::Suggestion(format!("Unknown property flag `{}`, expected `r`", flag))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Broad classification of an error, used by drivers to decide how to
/// present it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source text could not be tokenized or parsed.
    Syntax,
    /// The program is well formed but not well typed.
    Semantic,
    /// The AST uses a form the type system has no rule for, or an internal
    /// invariant was broken.
    Structural,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },
    #[error("can't redefine local: {name}")]
    DuplicateLocal { name: String },
    #[error("type not found: {name}")]
    TypeNotFound { name: String },
    #[error("unequal types in binary operation: {left} </> {right}")]
    BinaryTypeMismatch { left: String, right: String },
    #[error("types do not match: expected {expected}, received {received}")]
    AnnotationMismatch { expected: String, received: String },
    #[error("trying to call non-Function: {found}")]
    NotCallable { found: String },
    #[error("unknown type for {name:?}")]
    UnresolvedPlaceholder { name: String },
    #[error("cannot handle chain item of type: {item}")]
    UnsupportedChainItem { item: String },
    #[error("cannot visit assignment to {lvalue}")]
    MalformedLvalue { lvalue: String },
    #[error("{owner} has no property {property:?}")]
    UnknownProperty { owner: String, property: String },

    #[error("don't know how to visit: {kind}")]
    UnsupportedStatement { kind: String },
    #[error("expected block, found {found}")]
    ExpectedBlock { found: String },
    #[error("inferred return types not supported yet")]
    MissingReturnType,
    #[error("parameter {parameter:?} has no type annotation")]
    MissingParameterType { parameter: String },
    #[error("cannot handle empty return")]
    EmptyReturn,
    #[error("return type of {function} is not known")]
    UnknownReturnType { function: String },
    #[error("placeholder type already resolved")]
    PlaceholderAlreadyResolved,
    #[error("node type already resolved")]
    TypeAlreadyResolved,
    #[error("{type_} cannot hold properties")]
    NotPropertyBearing { type_: String },
    #[error("module {module:?} already has a parent")]
    ModuleAlreadyParented { module: String },
    #[error("module {module:?} is already a child")]
    ModuleAlreadyChild { module: String },
    #[error("unknown property flag {flag:?}")]
    UnknownPropertyFlag { flag: char },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            ErrorImpl::UnknownVariable { .. }
            | ErrorImpl::DuplicateLocal { .. }
            | ErrorImpl::TypeNotFound { .. }
            | ErrorImpl::BinaryTypeMismatch { .. }
            | ErrorImpl::AnnotationMismatch { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::UnresolvedPlaceholder { .. }
            | ErrorImpl::UnsupportedChainItem { .. }
            | ErrorImpl::MalformedLvalue { .. }
            | ErrorImpl::UnknownProperty { .. } => ErrorKind::Semantic,
            ErrorImpl::UnsupportedStatement { .. }
            | ErrorImpl::ExpectedBlock { .. }
            | ErrorImpl::MissingReturnType
            | ErrorImpl::MissingParameterType { .. }
            | ErrorImpl::EmptyReturn
            | ErrorImpl::UnknownReturnType { .. }
            | ErrorImpl::PlaceholderAlreadyResolved
            | ErrorImpl::TypeAlreadyResolved
            | ErrorImpl::NotPropertyBearing { .. }
            | ErrorImpl::ModuleAlreadyParented { .. }
            | ErrorImpl::ModuleAlreadyChild { .. }
            | ErrorImpl::UnknownPropertyFlag { .. } => ErrorKind::Structural,
        }
    }

    /// Attaches a source position, turning this into a reportable [`Error`].
    pub fn at(self, position: Position) -> Error {
        Error::new(self, position)
    }
}
