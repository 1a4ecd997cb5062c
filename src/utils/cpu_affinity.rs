//! Thread pinning for stable measurements.
//!
//! On Linux the guard pins the calling thread to the core it is currently
//! running on (falling back to the first online core) through `libc`, and
//! restores the saved affinity mask on drop. Other platforms get a guard that
//! does nothing and reports itself as unpinned.

#[cfg(target_os = "linux")]
mod platform {
    use std::mem;

    pub type SavedMask = libc::cpu_set_t;

    pub fn online_cores() -> usize {
        // SAFETY: sysconf has no memory-safety preconditions.
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        if n > 0 {
            n as usize
        } else {
            0
        }
    }

    pub fn current_core() -> Option<usize> {
        // SAFETY: sched_getcpu has no preconditions.
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }

    pub fn save() -> Option<SavedMask> {
        // SAFETY: the set is plain data and sized by size_of.
        unsafe {
            let mut set: libc::cpu_set_t = mem::zeroed();
            (libc::sched_getaffinity(0, mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(set)
        }
    }

    pub fn pin(core: usize) -> bool {
        // SAFETY: as above; callers only pass cores reported online.
        unsafe {
            let mut set: libc::cpu_set_t = mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core, &mut set);
            libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), &set) == 0
        }
    }

    pub fn restore(set: &SavedMask) -> bool {
        // SAFETY: `set` came from sched_getaffinity.
        unsafe { libc::sched_setaffinity(0, mem::size_of::<libc::cpu_set_t>(), set) == 0 }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub type SavedMask = ();

    pub fn online_cores() -> usize {
        std::thread::available_parallelism().map_or(0, |n| n.get())
    }

    pub fn current_core() -> Option<usize> {
        None
    }

    pub fn save() -> Option<SavedMask> {
        None
    }

    pub fn pin(_core: usize) -> bool {
        false
    }

    pub fn restore(_set: &SavedMask) -> bool {
        true
    }
}

/// Number of online CPU cores (0 if unknown)
pub fn online_cores() -> usize {
    platform::online_cores()
}

/// RAII guard for CPU pinning - pins on creation, restores on drop.
///
/// # Example
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new(); // Thread pinned
///     // ... do timing measurements ...
/// } // Original affinity restored here
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    saved: Option<platform::SavedMask>,
}

impl CpuPinGuard {
    /// Pin to the current core, or the first core if that fails.
    pub fn new() -> Self {
        let Some(saved) = platform::save() else {
            return Self::unpinned();
        };

        let candidates = platform::current_core().into_iter().chain(
            (online_cores() > 0).then_some(0),
        );
        for core in candidates {
            if platform::pin(core) {
                return Self {
                    pinned_core: Some(core),
                    saved: Some(saved),
                };
            }
        }

        tracing::debug!("CPU pinning unavailable; measuring unpinned");
        Self::unpinned()
    }

    fn unpinned() -> Self {
        Self {
            pinned_core: None,
            saved: None,
        }
    }

    /// Core the thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if !platform::restore(&saved) {
                tracing::warn!("failed to restore CPU affinity after measurement");
            }
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
