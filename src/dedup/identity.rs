//! Instance identity for object references.
//!
//! Deduplication never looks at the referenced value. It only needs to know
//! whether two references denote the same instance, and (for the keyed
//! strategies) a key that is stable while the instance is alive and distinct
//! from every other live instance.

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Key reserved for the null reference (`None`).
pub const NULL_KEY: usize = 0;

/// A reference that can be compared by instance identity.
pub trait Identity {
    /// Stable per-instance key. Two live references share a key iff they
    /// denote the same instance.
    fn identity_key(&self) -> usize;

    /// Whether `self` and `other` denote the same instance.
    #[inline]
    fn same_instance(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

/// Data address of a possibly fat pointer; metadata is dropped.
#[inline(always)]
fn addr_of<T: ?Sized>(ptr: *const T) -> usize {
    ptr.cast::<()>() as usize
}

/// Address identity of the referent.
///
/// A `&Arc<T>` is keyed by where the handle lives, not by the shared
/// allocation; pass the `Arc` itself to compare allocations. Zero-sized
/// referents may share addresses, so give them an [`InstanceId`] instead.
impl<T: ?Sized> Identity for &T {
    #[inline]
    fn identity_key(&self) -> usize {
        addr_of(*self)
    }

    #[inline]
    fn same_instance(&self, other: &Self) -> bool {
        std::ptr::addr_eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    #[inline]
    fn identity_key(&self) -> usize {
        addr_of(Rc::as_ptr(self))
    }

    #[inline]
    fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    #[inline]
    fn identity_key(&self) -> usize {
        addr_of(Arc::as_ptr(self))
    }

    #[inline]
    fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

/// `None` is the null reference. A `Some` whose inner key is null, such as
/// `Some(None)`, is the same null reference.
impl<R: Identity> Identity for Option<R> {
    #[inline]
    fn identity_key(&self) -> usize {
        self.as_ref().map_or(NULL_KEY, Identity::identity_key)
    }

    #[inline]
    fn same_instance(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_instance(b),
            _ => self.identity_key() == other.identity_key(),
        }
    }
}

/// Explicit instance handle for object models that assign ids at
/// construction rather than relying on addresses.
///
/// Ids come from a process-wide counter starting at 1, so they never collide
/// with [`NULL_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

static NEXT_INSTANCE_ID: AtomicUsize = AtomicUsize::new(1);

impl InstanceId {
    /// Mint a fresh id.
    pub fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Identity for InstanceId {
    #[inline]
    fn identity_key(&self) -> usize {
        self.0
    }
}
