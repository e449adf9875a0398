//! Type environment for the inference engine.
//!
//! Name → type bindings with scope support.

use augur_ir::Name;
use rustc_hash::FxHashMap;
use std::rc::Rc;

use crate::Idx;

/// Internal storage for `TypeEnv`.
#[derive(Clone, Debug)]
struct TypeEnvInner {
    /// Name → type bindings.
    bindings: FxHashMap<Name, Idx>,
    /// Parent scope for lookup chaining.
    parent: Option<TypeEnv>,
}

/// Type environment.
///
/// Maps identifier names to type expressions. Entering a lambda or let
/// scope extends the environment by copy — a child scope never mutates its
/// parent's view.
///
/// # Performance
///
/// Uses `Rc` for O(1) parent chain cloning. Creating a child scope doesn't
/// clone the entire parent chain.
#[derive(Clone, Debug)]
pub struct TypeEnv(Rc<TypeEnvInner>);

impl TypeEnv {
    /// Create a new empty environment.
    pub fn new() -> Self {
        TypeEnv(Rc::new(TypeEnvInner {
            bindings: FxHashMap::default(),
            parent: None,
        }))
    }

    /// Create a child scope.
    ///
    /// This is O(1) due to Rc-based parent sharing.
    #[must_use]
    pub fn child(&self) -> Self {
        TypeEnv(Rc::new(TypeEnvInner {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Bind a name to a type in the current scope.
    pub fn bind(&mut self, name: Name, ty: Idx) {
        Rc::make_mut(&mut self.0).bindings.insert(name, ty);
    }

    /// Look up a name, searching parent scopes.
    pub fn lookup(&self, name: Name) -> Option<Idx> {
        self.0
            .bindings
            .get(&name)
            .copied()
            .or_else(|| self.0.parent.as_ref().and_then(|p| p.lookup(name)))
    }
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}
