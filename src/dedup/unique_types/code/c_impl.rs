//! FFI bindings for the C implementation.

use crate::dedup::identity::Identity;

#[cfg(c_implementation_active)]
mod ffi {
    use libc::{c_void, size_t};

    extern "C" {
        pub fn unique_types_c(
            items: *const *const c_void,
            len: size_t,
            out_indices: *mut size_t,
        ) -> size_t;

        #[cfg(test)]
        pub fn unique_types_c_linear(
            items: *const *const c_void,
            len: size_t,
            out_indices: *mut size_t,
        ) -> size_t;
    }
}

/// C open-addressing implementation wrapper.
///
/// Identity keys are handed over as pointers; the C side reports which
/// indices to keep.
#[cfg(c_implementation_active)]
pub fn unique_types_c<R: Identity + Clone>(items: &[R]) -> Vec<R> {
    if items.is_empty() {
        return Vec::new();
    }

    let keys: Vec<*const libc::c_void> = items
        .iter()
        .map(|item| item.identity_key() as *const libc::c_void)
        .collect();
    let mut kept = vec![0usize; items.len()];

    // SAFETY: `keys` and `kept` both hold `items.len()` elements and outlive
    // the call; the C side only reads `keys` and writes at most `len` indices.
    let count = unsafe { ffi::unique_types_c(keys.as_ptr(), keys.len(), kept.as_mut_ptr()) };

    kept[..count].iter().map(|&idx| items[idx].clone()).collect()
}

/// Check if the C implementation is available
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

/// Without a C compiler the variant is never registered; this fallback keeps
/// direct callers working.
#[cfg(not(c_implementation_active))]
pub fn unique_types_c<R: Identity + Clone>(items: &[R]) -> Vec<R> {
    super::seen_set::unique_types_seen_set(items)
}
