//! Type inference and checking over the AST.
//!
//! - types: the type arena and the type variants
//! - scope: lexical name-to-type scopes
//! - bootstrap: built-in types, `std` modules and the `console` value
//! - type_system: the walk that annotates AST nodes with their types

pub mod bootstrap;
pub mod scope;
pub mod type_system;
pub mod types;
