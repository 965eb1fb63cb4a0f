//! Error types and error handling for the front end.
//!
//! This module defines the single error type used by every phase:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and type checking
//! - A coarse [`errors::ErrorKind`] split between syntax, semantic and
//!   structural failures
//! - Helpful error messages and suggestions

pub mod errors;
