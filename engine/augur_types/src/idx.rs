//! Type node handle.

use std::fmt;

/// Handle to a type node in a [`Pool`](crate::Pool).
///
/// An `Idx` is only meaningful together with the pool that allocated it;
/// moving a type between pools goes through `Pool::import`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    /// Create from a raw index.
    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Idx(raw)
    }

    /// Position in the pool's node table.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.0)
    }
}
