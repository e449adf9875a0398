//! Type unification engine.
//!
//! Link-based unification over a [`Pool`]: variables are linked directly to
//! the type they were equated with, and resolution compresses link chains,
//! so unification stays near constant time per step.
//!
//! # Usage
//!
//! ```ignore
//! let mut pool = Pool::new(interner);
//! let var = pool.fresh_var();
//! let int = pool.con(pool.builtins().int);
//!
//! let mut engine = UnifyEngine::new(&mut pool);
//! engine.unify(var, int)?;
//!
//! // Now var resolves to int
//! assert_eq!(engine.pool_mut().resolve(var), int);
//! ```
//!
//! Failures are terminal: a failed unification means the enclosing analysis
//! is ill-typed and must abort. The engine never retries.

mod error;

pub use error::UnifyError;

use crate::{ClassEnv, ConstraintSet, Idx, Pool, TyKind};

/// The unification engine.
///
/// Holds mutable access to the session pool and, optionally, a [`ClassEnv`]
/// consulted when a constrained variable is bound to a concrete type.
pub struct UnifyEngine<'p, 'c> {
    /// The type pool (mutable access for setting links).
    pool: &'p mut Pool,
    /// Typeclass membership oracle, when attached.
    classes: Option<&'c dyn ClassEnv>,
}

impl<'p, 'c> UnifyEngine<'p, 'c> {
    /// Create an engine with no typeclass validation.
    pub fn new(pool: &'p mut Pool) -> Self {
        Self {
            pool,
            classes: None,
        }
    }

    /// Create an engine that validates constraints against `classes`.
    pub fn with_classes(pool: &'p mut Pool, classes: &'c dyn ClassEnv) -> Self {
        Self {
            pool,
            classes: Some(classes),
        }
    }

    /// Get read-only access to the pool.
    #[inline]
    pub fn pool(&self) -> &Pool {
        self.pool
    }

    /// Get mutable access to the pool (for type construction).
    #[inline]
    pub fn pool_mut(&mut self) -> &mut Pool {
        self.pool
    }

    /// Create a fresh unbound type variable.
    pub fn fresh_var(&mut self) -> Idx {
        self.pool.fresh_var()
    }

    /// Unify two types, making them equivalent.
    ///
    /// After success both sides resolve to the same type and any typeclass
    /// constraints have been merged or validated. On failure the pool may
    /// hold partial bindings from already-unified subterms; callers treat
    /// the whole analysis as failed, so nothing inspects them.
    pub fn unify(&mut self, a: Idx, b: Idx) -> Result<(), UnifyError> {
        let a = self.pool.resolve(a);
        let b = self.pool.resolve(b);
        if a == b {
            return Ok(());
        }

        let a_is_var = matches!(self.pool.kind(a), TyKind::Var(_));
        let b_is_var = matches!(self.pool.kind(b), TyKind::Var(_));

        if a_is_var {
            return self.unify_var(a, b);
        }
        if b_is_var {
            return self.unify_var(b, a);
        }

        match (self.pool.kind(a).clone(), self.pool.kind(b).clone()) {
            (
                TyKind::App {
                    head: head_a,
                    args: args_a,
                },
                TyKind::App {
                    head: head_b,
                    args: args_b,
                },
            ) => {
                // Arity first: a placeholder head may only adopt a
                // constructor of the same arity.
                if args_a.len() != args_b.len() {
                    return Err(UnifyError::ArityMismatch {
                        expected: args_a.len(),
                        found: args_b.len(),
                    });
                }
                self.unify(head_a, head_b).map_err(|err| match err {
                    // A head mismatch is a mismatch of the whole types;
                    // report them rather than the bare constructors.
                    UnifyError::Mismatch { .. } => UnifyError::Mismatch {
                        expected: a,
                        found: b,
                    },
                    other => other,
                })?;
                for (&p, &q) in args_a.iter().zip(args_b.iter()) {
                    self.unify(p, q)?;
                }
                Ok(())
            }
            (TyKind::Con(n1), TyKind::Con(n2)) if n1 == n2 => Ok(()),
            _ => Err(UnifyError::Mismatch {
                expected: a,
                found: b,
            }),
        }
    }

    /// Unify a pruned unbound variable with a pruned type.
    fn unify_var(&mut self, var: Idx, ty: Idx) -> Result<(), UnifyError> {
        debug_assert_ne!(var, ty, "identical sides handled by unify");

        let var_id = match self.pool.kind(var) {
            TyKind::Var(id) => *id,
            _ => {
                return Err(UnifyError::Mismatch {
                    expected: var,
                    found: ty,
                })
            }
        };

        if let Some(ty_id) = self.pool.var_id(ty) {
            // Variable-variable: constraint propagation is symmetric and
            // idempotent, so both ends carry the union.
            let mut union: ConstraintSet = self.pool.constraints_of(var);
            for class in self.pool.constraints_of(ty) {
                if !union.contains(&class) {
                    union.push(class);
                }
            }
            union.sort_unstable();
            self.pool.set_constraints(var_id, union.clone());
            self.pool.set_constraints(ty_id, union);
        } else if let Some(classes) = self.classes {
            // Binding to a concrete type: every constraint must be
            // satisfied by its head constructor. A type whose head is
            // still a placeholder carries the constraints forward
            // unvalidated.
            if let Some(key) = self.pool.head_name(ty) {
                for class in self.pool.constraints_of(var) {
                    if !classes.satisfies(key, class) {
                        return Err(UnifyError::MissingInstance { class, ty });
                    }
                }
            }
        }

        if self.pool.occurs_in(var, ty) {
            return Err(UnifyError::InfiniteType { var, ty });
        }

        tracing::trace!(?var, ?ty, "binding type variable");
        self.pool.bind(var_id, ty);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
