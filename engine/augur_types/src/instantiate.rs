//! Generalization and instantiation.
//!
//! A polymorphic binding is copied per use site: generic variables are
//! replaced with fresh ones so each use gets independent unknowns, while
//! variables still being solved in an enclosing scope (the non-generic set)
//! are shared, not copied. This is what gives let-polymorphism.

use rustc_hash::FxHashMap;
use std::rc::Rc;

use crate::{ConstraintSet, Idx, Pool, TyKind, VarState};

/// The set of type variables pinned by enclosing scopes.
///
/// Extended by copy on entering a lambda or let definition; a child set
/// shares its parent through an `Rc` chain, so extension is O(1) and the
/// enclosing scope's view never changes.
#[derive(Clone, Default)]
pub struct NonGeneric(Option<Rc<NonGenericNode>>);

struct NonGenericNode {
    var: Idx,
    parent: NonGeneric,
}

impl NonGeneric {
    /// The empty set.
    pub fn new() -> Self {
        NonGeneric(None)
    }

    /// A child set additionally containing `var`.
    #[must_use]
    pub fn with(&self, var: Idx) -> Self {
        NonGeneric(Some(Rc::new(NonGenericNode {
            var,
            parent: self.clone(),
        })))
    }

    /// Iterate over the pinned variables, innermost first.
    pub fn iter(&self) -> impl Iterator<Item = Idx> + '_ {
        let mut current = self.0.as_deref();
        std::iter::from_fn(move || {
            let node = current?;
            current = node.parent.0.as_deref();
            Some(node.var)
        })
    }
}

/// Whether `var` is generalizable: safe to freshen per use site.
///
/// A variable is generic unless it occurs in (a type reachable from) the
/// non-generic set. `var` must be pruned.
pub fn is_generic(pool: &Pool, var: Idx, non_generic: &NonGeneric) -> bool {
    !pool.occurs_in_any(var, non_generic.iter())
}

/// Copy a type expression for one use site.
///
/// Generic variables are freshened — memoized per call, so repeated
/// occurrences of one variable map to the same fresh variable, which
/// inherits the original's constraint set. Non-generic variables are
/// returned shared. Applications are rebuilt with instantiated head and
/// arguments.
pub fn instantiate(pool: &mut Pool, ty: Idx, non_generic: &NonGeneric) -> Idx {
    let mut mapping = FxHashMap::default();
    instantiate_rec(pool, ty, non_generic, &mut mapping)
}

fn instantiate_rec(
    pool: &mut Pool,
    ty: Idx,
    non_generic: &NonGeneric,
    mapping: &mut FxHashMap<u32, Idx>,
) -> Idx {
    let ty = pool.resolve(ty);
    match pool.kind(ty).clone() {
        TyKind::Var(var_id) => {
            if !is_generic(pool, ty, non_generic) {
                return ty;
            }
            if let Some(&fresh) = mapping.get(&var_id) {
                return fresh;
            }
            let constraints = match pool.var_state(var_id) {
                VarState::Unbound { constraints, .. } => constraints.clone(),
                VarState::Link { .. } => ConstraintSet::new(),
            };
            let fresh = pool.fresh_var_with(constraints);
            mapping.insert(var_id, fresh);
            fresh
        }
        TyKind::Con(_) => ty,
        TyKind::App { head, args } => {
            let new_head = instantiate_rec(pool, head, non_generic, mapping);
            let new_args = args
                .iter()
                .map(|&a| instantiate_rec(pool, a, non_generic, mapping))
                .collect();
            pool.app(new_head, new_args)
        }
    }
}
