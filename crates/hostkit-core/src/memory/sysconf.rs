//! `sysconf(3)` probe for Linux and Android.

use super::MemoryProbe;

/// Multiplies `_SC_PHYS_PAGES` by `_SC_PAGESIZE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysconfProbe;

impl MemoryProbe for SysconfProbe
{
    fn name(&self) -> &'static str
    {
        "sysconf"
    }

    fn total_bytes(&self) -> Option<u64>
    {
        // SAFETY: sysconf only reads system configuration values.
        let (pages, page_size) = unsafe { (libc::sysconf(libc::_SC_PHYS_PAGES), libc::sysconf(libc::_SC_PAGESIZE)) };
        if pages <= 0 || page_size <= 0 {
            return None;
        }

        let pages = u64::try_from(pages).ok()?;
        let page_size = u64::try_from(page_size).ok()?;
        // Saturate so the ceiling clamp applies instead of wrapping
        Some(pages.saturating_mul(page_size))
    }
}
