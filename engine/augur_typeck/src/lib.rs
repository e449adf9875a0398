//! Augur Typeck - analysis and typeclass registry.
//!
//! This crate drives the type machinery in `augur_types`:
//!
//! # Main Entry Points
//!
//! - [`Term`]: the typed-lambda-calculus AST whose `analyze` method infers
//!   an expression's type in an environment
//! - [`Signature`] / [`SigType`]: declarative type signatures, lowered into
//!   a pool at declaration or call time
//! - [`ClassRegistry`] / [`SharedClasses`]: typeclass instances keyed by
//!   (class, type-constructor) pairs, with supertype dependency enforcement
//!
//! # Module Organization
//!
//! - `term`: AST nodes and type inference
//! - `signature`: signature trees and lowering
//! - `classes`: the instance registry
//! - `shared`: the shared registry handle

mod classes;
mod shared;
mod signature;
mod term;

pub use classes::{ClassError, ClassRegistry, Instance, MethodTable};
pub use shared::SharedClasses;
pub use signature::{SigType, Signature, SignatureError};
pub use term::Term;
