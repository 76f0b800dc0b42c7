//! Build script for hostkit-core
//!
//! This script runs two checks before compilation:
//! - Minimum Rust version (Edition 2021 = Rust 1.56.0+, `OnceCell` helpers need 1.70.0)
//! - Selection of the physical memory probe for the target platform
//!
//! ## Memory probe selection
//!
//! The probe is picked once, here, and exposed to the crate as
//! `cfg(physmem_probe = "...")`:
//!
//! - **sysconf**: Linux and Android (`_SC_PHYS_PAGES * _SC_PAGESIZE`)
//! - **sysctl**: macOS, iOS and the BSDs (`CTL_HW` family)
//! - **none**: everything else, GNU Hurd, and x32 targets
//!
//! The target is read from the `CARGO_CFG_*` variables because `#[cfg]` inside a
//! build script describes the host, not the target.

use std::env;

const PROBE_CFG: &str = "physmem_probe";

fn main()
{
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(rustc_version) = rustc_version::version() {
        let min_rust_version = rustc_version::Version::new(1, 70, 0);

        if rustc_version < min_rust_version {
            panic!(
                "hostkit-core requires Rust {} or newer, found {}",
                min_rust_version, rustc_version
            );
        }
    } else {
        // If we can't get version (e.g., in some build environments), just warn
        println!("cargo:warning=could not verify Rust version");
    }

    println!("cargo:rustc-check-cfg=cfg({PROBE_CFG}, values(\"sysconf\", \"sysctl\", \"none\"))");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let pointer_width = env::var("CARGO_CFG_TARGET_POINTER_WIDTH").unwrap_or_default();

    let probe = select_probe(&target_os, &target_arch, &pointer_width);
    println!("cargo:rustc-cfg={PROBE_CFG}=\"{probe}\"");
}

fn select_probe(target_os: &str, target_arch: &str, pointer_width: &str) -> &'static str
{
    // x32 (ILP32 on x86_64) reports page counts that overflow the native long
    if target_arch == "x86_64" && pointer_width == "32" {
        return "none";
    }

    match target_os {
        "linux" | "android" => "sysconf",
        "macos" | "ios" | "netbsd" | "openbsd" | "freebsd" | "dragonfly" => "sysctl",
        _ => "none",
    }
}
