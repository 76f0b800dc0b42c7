//! # Physical Memory Probe
//!
//! Best-effort size of installed physical memory.
//!
//! Exactly one probe is compiled in, chosen by the build script for the target
//! platform (`cfg(physmem_probe = "...")`):
//!
//! - **sysconf**: Linux and Android, `_SC_PHYS_PAGES * _SC_PAGESIZE`
//!   - See: [sysconf(3)](https://man7.org/linux/man-pages/man3/sysconf.3.html)
//! - **sysctl**: macOS (`HW_MEMSIZE`), NetBSD/OpenBSD (`HW_PHYSMEM64`),
//!   FreeBSD/DragonFly (`HW_PHYSMEM`)
//!   - See: [sysctl(3)](https://man.freebsd.org/cgi/man.cgi?query=sysctl&sektion=3)
//! - **none**: anything else; always reports unknown
//!
//! Readings are clamped to a ceiling so a bogus or overflowing report can
//! never exceed it. Zero means "unknown" and is never an error.
//!
//! ## Example
//!
//! ```rust
//! use hostkit_core::memory::{physical_memory, DEFAULT_MEMORY_CEILING};
//!
//! let sample = physical_memory();
//! assert!(sample.bytes() <= DEFAULT_MEMORY_CEILING);
//! ```

use std::fmt;

use tracing::debug;

#[cfg(physmem_probe = "sysconf")]
mod sysconf;
#[cfg(physmem_probe = "sysctl")]
mod sysctl;

#[cfg(physmem_probe = "sysconf")]
pub use sysconf::SysconfProbe as PlatformProbe;
#[cfg(physmem_probe = "sysctl")]
pub use sysctl::SysctlProbe as PlatformProbe;

/// The probe compiled in for this target.
#[cfg(not(any(physmem_probe = "sysconf", physmem_probe = "sysctl")))]
pub type PlatformProbe = NoProbe;

/// Default ceiling: 1 TiB on 64-bit targets, 3 GiB on 32-bit targets.
pub const DEFAULT_MEMORY_CEILING: u64 = if cfg!(target_pointer_width = "64") {
    1 << 40
} else {
    3 << 30
};

/// Installed physical memory in bytes, or zero for unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MemorySample(u64);

impl MemorySample
{
    /// No mechanism was available or the query failed.
    pub const UNKNOWN: Self = MemorySample(0);

    /// Byte count; zero when unknown.
    #[must_use]
    pub const fn bytes(self) -> u64
    {
        self.0
    }

    /// Whether the size could not be determined.
    #[must_use]
    pub const fn is_unknown(self) -> bool
    {
        self.0 == 0
    }
}

impl From<MemorySample> for u64
{
    fn from(sample: MemorySample) -> Self
    {
        sample.0
    }
}

impl fmt::Display for MemorySample
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        const GIB: u64 = 1 << 30;
        const MIB: u64 = 1 << 20;

        if self.is_unknown() {
            return f.write_str("unknown");
        }
        // Integer formatting keeps exact byte counts exact
        if self.0 >= GIB {
            write!(f, "{}.{:02} GiB", self.0 / GIB, (self.0 % GIB) * 100 / GIB)
        } else {
            write!(f, "{}.{:02} MiB", self.0 / MIB, (self.0 % MIB) * 100 / MIB)
        }
    }
}

/// A way of asking the OS how much physical memory is installed.
pub trait MemoryProbe
{
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Raw total in bytes, or `None` if the query failed or is unsupported.
    fn total_bytes(&self) -> Option<u64>;
}

/// Probe for platforms with no supported mechanism.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl MemoryProbe for NoProbe
{
    fn name(&self) -> &'static str
    {
        "none"
    }

    fn total_bytes(&self) -> Option<u64>
    {
        None
    }
}

/// The probe selected at build time.
#[must_use]
pub fn platform_probe() -> PlatformProbe
{
    PlatformProbe::default()
}

/// Installed physical memory, clamped to [`DEFAULT_MEMORY_CEILING`].
#[must_use]
pub fn physical_memory() -> MemorySample
{
    physical_memory_with_ceiling(DEFAULT_MEMORY_CEILING)
}

/// Installed physical memory, clamped to `ceiling`.
#[must_use]
pub fn physical_memory_with_ceiling(ceiling: u64) -> MemorySample
{
    sample_with(&platform_probe(), ceiling)
}

/// Query `probe` and clamp its reading to `ceiling`.
///
/// Failed or unsupported queries yield [`MemorySample::UNKNOWN`].
pub fn sample_with<P>(probe: &P, ceiling: u64) -> MemorySample
where
    P: MemoryProbe + ?Sized,
{
    match probe.total_bytes() {
        Some(bytes) if bytes > ceiling => {
            debug!(probe = probe.name(), bytes, ceiling, "Clamping physical memory to ceiling");
            MemorySample(ceiling)
        }
        Some(bytes) => MemorySample(bytes),
        None => {
            debug!(probe = probe.name(), "Physical memory unknown");
            MemorySample::UNKNOWN
        }
    }
}
