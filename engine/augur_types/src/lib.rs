//! Augur Types - type representation and unification.
//!
//! This crate provides the mutable type graph at the heart of the Augur
//! runtime type system, based on Hindley-Milner inference:
//!
//! - [`Pool`]: per-session arena of type nodes ([`TyKind`]), addressed by
//!   [`Idx`] handles
//! - [`UnifyEngine`]: link-based unification with path compression
//! - [`instantiate`]: per-use-site copying of polymorphic types
//! - [`TypeEnv`] / [`NonGeneric`]: scoped identifier bindings and the set of
//!   variables pinned by enclosing scopes
//!
//! # Sessions
//!
//! A `Pool` is one inference session: variable identities, link state, and
//! display names all live inside it. There is no global counter anywhere;
//! cloning a pool yields an independent session, which is how call-time
//! checking gives every invocation a private unification graph.
//!
//! # Module Organization
//!
//! - `pool`: type nodes, variable state, construction, resolution
//! - `unify`: the unification engine and its errors
//! - `instantiate`: generalization/instantiation (`fresh`)
//! - `env`: type environments
//! - `class_env`: the seam through which unification consults a typeclass
//!   registry

mod class_env;
mod env;
mod error;
mod format;
mod idx;
mod instantiate;
mod pool;
pub mod unify;

pub use class_env::ClassEnv;
pub use env::TypeEnv;
pub use error::TypeError;
pub use idx::Idx;
pub use instantiate::{instantiate, is_generic, NonGeneric};
pub use pool::{Builtins, ConstraintSet, Pool, TyKind, VarState};
pub use unify::{UnifyEngine, UnifyError};
