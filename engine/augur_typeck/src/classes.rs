//! Typeclass instance registry.
//!
//! Maintains mappings for:
//! - Typeclass definitions and their supertype dependency chains
//! - Instances indexed by (class, type-constructor) pair
//!
//! Instances are keyed by the interned `Name` of a type's head constructor,
//! assigned at declaration time. The registry is generic over the method
//! payload `F` so it stays independent of any particular runtime value
//! representation; the evaluation layer instantiates it with its native
//! function type.

use augur_ir::{Name, SharedInterner};
use augur_types::ClassEnv;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use thiserror::Error;

/// Method tables as supplied at registration time.
pub type MethodTable<F> = FxHashMap<Name, F>;

/// Error from typeclass declaration, registration, or lookup.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum ClassError {
    /// A typeclass was referenced before being declared.
    #[error("unknown typeclass `{class}`")]
    UnknownClass {
        /// The undeclared class.
        class: String,
    },

    /// An instance was registered before a required supertype instance.
    #[error("missing dependency: no instance of `{dependency}` for `{ty}` (required by `{class}`)")]
    MissingDependency {
        /// The class being registered.
        class: String,
        /// The first unmet ancestor class.
        dependency: String,
        /// The type being registered.
        ty: String,
    },

    /// No instance is registered for a (class, type) pair.
    #[error("no instance of `{class}` for `{ty}`")]
    NoInstance {
        /// The class looked up.
        class: String,
        /// The type looked up.
        ty: String,
    },
}

/// An immutable method table for one (class, type) pair.
///
/// Created once at registration and never mutated afterward; every
/// typeclass-polymorphic call looks one of these up by the value's type
/// key.
#[derive(Clone, Debug)]
pub struct Instance<F> {
    methods: FxHashMap<Name, F>,
}

impl<F> Instance<F> {
    fn new(methods: MethodTable<F>) -> Self {
        Instance { methods }
    }

    /// The implementation registered under `name`, if any.
    pub fn method(&self, name: Name) -> Option<&F> {
        self.methods.get(&name)
    }

    /// Number of methods in the table.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Entry for a declared typeclass.
#[derive(Clone, Debug)]
struct ClassInfo {
    /// Ordered transitive ancestor classes, computed once at declaration.
    deps: Vec<Name>,
}

/// Registry for typeclasses and their instances.
#[derive(Clone)]
pub struct ClassRegistry<F> {
    classes: FxHashMap<Name, ClassInfo>,
    instances: FxHashMap<(Name, Name), Arc<Instance<F>>>,
    interner: SharedInterner,
}

impl<F> ClassRegistry<F> {
    /// Create an empty registry rendering errors through `interner`.
    pub fn new(interner: SharedInterner) -> Self {
        ClassRegistry {
            classes: FxHashMap::default(),
            instances: FxHashMap::default(),
            interner,
        }
    }

    /// The interner this registry renders errors through.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    fn render(&self, name: Name) -> String {
        self.interner.lookup(name).to_owned()
    }

    /// Declare a typeclass and capture its dependency chain.
    ///
    /// The chain is the ordered transitive closure of `supers` (each
    /// supertype followed by its own ancestors, deduplicated), computed
    /// once here and fixed for the lifetime of the class. Every supertype
    /// must already be declared.
    pub fn declare_class(&mut self, name: Name, supers: &[Name]) -> Result<(), ClassError> {
        let mut deps: Vec<Name> = Vec::new();
        for &super_class in supers {
            let info = self
                .classes
                .get(&super_class)
                .ok_or_else(|| ClassError::UnknownClass {
                    class: self.render(super_class),
                })?;
            if !deps.contains(&super_class) {
                deps.push(super_class);
            }
            for &ancestor in &info.deps {
                if !deps.contains(&ancestor) {
                    deps.push(ancestor);
                }
            }
        }
        self.classes.insert(name, ClassInfo { deps });
        Ok(())
    }

    /// Whether `name` has been declared as a typeclass.
    pub fn is_class(&self, name: Name) -> bool {
        self.classes.contains_key(&name)
    }

    /// Ordered ancestor classes of `class`, if declared.
    pub fn dependencies(&self, class: Name) -> Option<&[Name]> {
        self.classes.get(&class).map(|info| info.deps.as_slice())
    }

    /// Register an instance of `class` for the type keyed by `ty`.
    ///
    /// Fails with `MissingDependency` naming the first ancestor class that
    /// has no instance for `ty`. Re-registering the same (class, type) pair
    /// overwrites silently; callers are expected not to do this.
    pub fn register_instance(
        &mut self,
        class: Name,
        ty: Name,
        methods: MethodTable<F>,
    ) -> Result<(), ClassError> {
        let info = self
            .classes
            .get(&class)
            .ok_or_else(|| ClassError::UnknownClass {
                class: self.render(class),
            })?;
        if let Some(&missing) = info
            .deps
            .iter()
            .find(|&&dep| !self.instances.contains_key(&(dep, ty)))
        {
            return Err(ClassError::MissingDependency {
                class: self.render(class),
                dependency: self.render(missing),
                ty: self.render(ty),
            });
        }

        tracing::debug!(
            class = self.interner.lookup(class),
            ty = self.interner.lookup(ty),
            "registering typeclass instance"
        );
        self.instances
            .insert((class, ty), Arc::new(Instance::new(methods)));
        Ok(())
    }

    /// The instance of `class` for the type keyed by `ty`.
    pub fn lookup_instance(&self, class: Name, ty: Name) -> Result<&Arc<Instance<F>>, ClassError> {
        self.instances
            .get(&(class, ty))
            .ok_or_else(|| ClassError::NoInstance {
                class: self.render(class),
                ty: self.render(ty),
            })
    }

    /// Whether the type keyed by `ty` has an instance of `class`.
    pub fn has_instance(&self, ty: Name, class: Name) -> bool {
        self.instances.contains_key(&(class, ty))
    }
}

impl<F> ClassEnv for ClassRegistry<F> {
    fn satisfies(&self, key: Name, class: Name) -> bool {
        self.has_instance(key, class)
    }
}
