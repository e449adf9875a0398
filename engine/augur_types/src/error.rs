//! User-facing type errors.
//!
//! The unification engine reports errors as [`UnifyError`] values carrying
//! pool indices; at the analysis boundary those are rendered into this
//! self-contained taxonomy. Every failure here is terminal for the analysis
//! that produced it: nothing in the engine retries or recovers.

use std::fmt;

use crate::{Pool, UnifyError};

/// A type error, with types rendered for display.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypeError {
    /// An identifier was not found in the type environment.
    UndefinedSymbol {
        /// The missing identifier.
        name: String,
    },

    /// Two types could not be made equal.
    Mismatch {
        /// The type expected by context.
        expected: String,
        /// The type actually found.
        found: String,
    },

    /// Occurs check failed: unification would build an infinite type.
    InfiniteType {
        /// The variable that would recurse.
        var: String,
        /// The type containing it.
        ty: String,
    },

    /// Two constructor applications with different argument counts.
    ArityMismatch {
        /// Expected argument count.
        expected: usize,
        /// Found argument count.
        found: usize,
    },

    /// A constrained variable was bound to a type with no instance of the
    /// required typeclass.
    MissingInstance {
        /// The typeclass named by the constraint.
        class: String,
        /// The offending type.
        ty: String,
    },
}

impl TypeError {
    /// Render a unification failure against the pool it occurred in.
    pub fn from_unify(err: UnifyError, pool: &mut Pool) -> Self {
        match err {
            UnifyError::Mismatch { expected, found } => TypeError::Mismatch {
                expected: pool.display(expected),
                found: pool.display(found),
            },
            UnifyError::InfiniteType { var, ty } => TypeError::InfiniteType {
                var: pool.display(var),
                ty: pool.display(ty),
            },
            UnifyError::ArityMismatch { expected, found } => {
                TypeError::ArityMismatch { expected, found }
            }
            UnifyError::MissingInstance { class, ty } => TypeError::MissingInstance {
                class: pool.interner().lookup(class).to_owned(),
                ty: pool.display(ty),
            },
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UndefinedSymbol { name } => {
                write!(f, "undefined symbol `{name}`")
            }
            TypeError::Mismatch { expected, found } => {
                write!(f, "type mismatch: expected `{expected}`, found `{found}`")
            }
            TypeError::InfiniteType { var, ty } => {
                write!(
                    f,
                    "cannot construct infinite type: `{var}` occurs in `{ty}`"
                )
            }
            TypeError::ArityMismatch { expected, found } => {
                write!(
                    f,
                    "constructor arity mismatch: expected {expected} type arguments, found {found}"
                )
            }
            TypeError::MissingInstance { class, ty } => {
                write!(f, "no instance of `{class}` for `{ty}`")
            }
        }
    }
}

impl std::error::Error for TypeError {}
