//! CPU cycle counter for precise micro-benchmarking.
//!
//! x86/x86_64 read the TSC fenced by LFENCE; aarch64 reads the virtual timer
//! `CNTVCT_EL0`, a fixed-frequency counter accessible from userspace.

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub const UNIT: &str = "cycles";

#[cfg(target_arch = "aarch64")]
pub const UNIT: &str = "ticks";

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
compile_error!("cpu_cycles feature requires x86, x86_64, or aarch64; build with --features use_time");

/// Read the current cycle counter.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{_mm_lfence, _rdtsc};
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{_mm_lfence, _rdtsc};

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        // Fences keep out-of-order execution from leaking across the read.
        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let ticks: u64;
        unsafe {
            core::arch::asm!("mrs {}, cntvct_el0", out(reg) ticks, options(nomem, nostack));
        }
        ticks
    }
}
