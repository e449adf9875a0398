//! Shared handle for the instance registry.

use augur_ir::Name;
use augur_types::ClassEnv;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::ClassRegistry;

/// Thread-safe shared handle to a [`ClassRegistry`].
///
/// Instance registration happens at startup/declaration time and lookups
/// dominate afterward, so the registry sits behind a read-write lock:
/// writers (declarations) are rare, readers (every typeclass-polymorphic
/// call) are cheap and concurrent.
pub struct SharedClasses<F>(Arc<RwLock<ClassRegistry<F>>>);

impl<F> SharedClasses<F> {
    /// Wrap a registry for sharing.
    pub fn new(registry: ClassRegistry<F>) -> Self {
        SharedClasses(Arc::new(RwLock::new(registry)))
    }

    /// Read access for lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, ClassRegistry<F>> {
        self.0.read()
    }

    /// Write access for declarations and registrations.
    pub fn write(&self) -> RwLockWriteGuard<'_, ClassRegistry<F>> {
        self.0.write()
    }
}

// Manual impl: a handle is clonable whether or not `F` is.
impl<F> Clone for SharedClasses<F> {
    fn clone(&self) -> Self {
        SharedClasses(Arc::clone(&self.0))
    }
}

impl<F> ClassEnv for SharedClasses<F> {
    fn satisfies(&self, key: Name, class: Name) -> bool {
        self.read().satisfies(key, class)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use augur_ir::SharedInterner;

    #[test]
    fn shared_handle_sees_registrations() {
        let interner = SharedInterner::new();
        let shared = SharedClasses::new(ClassRegistry::<&'static str>::new(interner.clone()));
        let handle = shared.clone();

        let eq = interner.intern("Eq");
        let int = interner.intern("int");
        shared.write().declare_class(eq, &[]).unwrap();
        shared
            .write()
            .register_instance(eq, int, Default::default())
            .unwrap();

        assert!(handle.satisfies(int, eq));
    }
}
