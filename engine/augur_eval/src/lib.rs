//! Augur Eval - runtime values and call-time checking.
//!
//! The host-facing layer of the Augur runtime type system:
//!
//! # Main Entry Points
//!
//! - [`Value`]: the runtime value model
//! - [`type_of`]: lifts a value into a type expression in a pool
//! - [`TypedFunc`]: wraps a native function with a declared signature;
//!   every invocation is type-checked before the native runs, with
//!   currying and checked composition
//! - [`lookup_for_value`]: typeclass method dispatch for a value
//!
//! # Checking model
//!
//! Checking is lazy: nothing is verified until a wrapped function is
//! actually invoked with concrete arguments. Each invocation gets a
//! private clone of the wrapper's type pool, so concurrent calls never
//! share a mutable unification graph.

mod error;
mod func;
mod type_of;
mod value;

pub use error::CallError;
pub use func::{NativeFn, TypedFunc};
pub use type_of::{lookup_for_value, type_key, type_of};
pub use value::Value;
