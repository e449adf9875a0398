//! Unification error types.

use augur_ir::Name;

use crate::Idx;

/// Error from type unification.
///
/// Carries pool indices; rendering into user-facing text happens at the
/// analysis boundary via `TypeError::from_unify`, where the pool is still
/// at hand.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnifyError {
    /// Types could not be unified.
    Mismatch {
        /// The expected type (from context).
        expected: Idx,
        /// The actual type found.
        found: Idx,
    },

    /// Infinite/recursive type detected (occurs check failed).
    ///
    /// Example: unifying `a` with `a -> a` would recurse forever.
    InfiniteType {
        /// The variable that would recurse.
        var: Idx,
        /// The type that contains the variable.
        ty: Idx,
    },

    /// Constructor applications with different argument counts.
    ArityMismatch {
        /// Expected count.
        expected: usize,
        /// Found count.
        found: usize,
    },

    /// A constrained variable was bound to a type whose head constructor
    /// has no instance of the required typeclass.
    MissingInstance {
        /// The required typeclass.
        class: Name,
        /// The offending type.
        ty: Idx,
    },
}
