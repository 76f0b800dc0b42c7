//! `sysctl(3)` probe for macOS and the BSDs.
//!
//! The hardware memory-size node has a different name and width per OS family:
//!
//! | OS                 | Node           | Width       |
//! |--------------------|----------------|-------------|
//! | macOS, iOS         | `HW_MEMSIZE`   | 64-bit      |
//! | NetBSD, OpenBSD    | `HW_PHYSMEM64` | 64-bit      |
//! | FreeBSD, DragonFly | `HW_PHYSMEM`   | native long |

use std::{mem, ptr};

use libc::c_int;

use super::MemoryProbe;

#[cfg(any(target_os = "macos", target_os = "ios"))]
const MEMORY_NODE: c_int = libc::HW_MEMSIZE;
#[cfg(any(target_os = "macos", target_os = "ios"))]
type RawSize = u64;

#[cfg(any(target_os = "netbsd", target_os = "openbsd"))]
const MEMORY_NODE: c_int = libc::HW_PHYSMEM64;
#[cfg(any(target_os = "netbsd", target_os = "openbsd"))]
type RawSize = u64;

#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
const MEMORY_NODE: c_int = libc::HW_PHYSMEM;
#[cfg(any(target_os = "freebsd", target_os = "dragonfly"))]
type RawSize = libc::c_ulong;

/// Reads `CTL_HW` / memory-size node.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysctlProbe;

impl MemoryProbe for SysctlProbe
{
    fn name(&self) -> &'static str
    {
        "sysctl"
    }

    fn total_bytes(&self) -> Option<u64>
    {
        let mut mib: [c_int; 2] = [libc::CTL_HW, MEMORY_NODE];
        let mut value: RawSize = 0;
        let mut len = mem::size_of::<RawSize>();

        // SAFETY: `value` and `len` describe a valid, writable buffer of the
        // width the kernel uses for this node; no new value is written.
        let rc = unsafe {
            libc::sysctl(
                mib.as_mut_ptr(),
                2,
                ptr::addr_of_mut!(value).cast(),
                &mut len,
                ptr::null_mut(),
                0,
            )
        };

        if rc != 0 || len != mem::size_of::<RawSize>() {
            return None;
        }
        #[allow(clippy::useless_conversion)]
        Some(u64::from(value))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_reports_memory()
    {
        assert!(SysctlProbe.total_bytes().is_some_and(|bytes| bytes > 0));
    }
}
