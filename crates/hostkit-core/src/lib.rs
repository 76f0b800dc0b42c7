//! # hostkit-core
//!
//! Platform-abstraction layer for hostkit.
//!
//! This crate provides three services:
//! - Temp files: creation, naming, enumeration and cleanup ([`temp`])
//! - Path text: canonicalization of user text for use in file names ([`text`])
//! - Physical memory: best-effort total installed memory ([`memory`])
//!
//! plus a fatal-error reporter for the one unrecoverable case ([`fatal`]).
//!
//! ## Platform Support
//!
//! - **Linux/Android**: memory via `sysconf`
//! - **macOS/BSD**: memory via `sysctl`
//! - **Everything else**: temp files and text work; memory reports unknown
//!
//! ## Why unsafe code is needed
//!
//! The memory probes call `sysconf(3)` and `sysctl(3)` through `libc`. Those
//! calls are wrapped in safe functions in [`memory`]; nothing else is unsafe.

#![allow(unsafe_code)] // Required for libc memory queries (sysconf, sysctl)

pub mod config;
pub mod error;
pub mod fatal;
pub mod memory;
pub mod path;
pub mod temp;
pub mod text;

// Re-export commonly used types
pub use config::HostConfig;
pub use error::{HostError, HostResult};
pub use memory::{physical_memory, MemorySample};
pub use temp::{TempFileFactory, TempFileHandle, TempFileKind, TempFileRegistry};
pub use text::{CanonicalPathText, TextNormalizer};
