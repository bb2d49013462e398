//! # kernport-core
//!
//! Kernel task port acquisition primitives for Kernport.
//!
//! This crate solves one security-sensitive problem: obtaining a Mach port
//! that grants control over the kernel task (PID 0), when no single API
//! reliably yields it on all macOS configurations. It provides:
//! - An ordered set of acquisition strategies (host special-port scan, then
//!   `task_for_pid(0)`)
//! - Identity validation, so a port is only trusted once the kernel confirms
//!   it really controls PID 0
//! - A strict release discipline for rejected candidates
//! - An append-only error record describing total acquisition failure
//!
//! What happens with the port afterwards - kernel memory reads and writes,
//! symbol resolution, patching - is the business of consumers; they receive
//! it as an opaque [`Port`] value.
//!
//! ## Why unsafe code is needed
//!
//! The macOS host implementation calls restricted Mach APIs through FFI.
//! These calls are inherently unsafe because they manipulate kernel-managed
//! resources and can target any process on the system. The unsafe surface is
//! confined to [`platform::macos`]; the acquisition logic itself is safe and
//! runs against any [`HostPorts`] implementation, including test mocks.

#![allow(unsafe_code)] // Required for low-level system APIs (Mach FFI)

pub mod acquire;
pub mod error;
pub mod host;
pub mod platform;
pub mod record;
pub mod types;

// Re-export commonly used types
pub use acquire::{AcquireState, KernelTask};
pub use error::{CoreError, Result};
pub use host::{HostError, HostPorts};
#[cfg(target_os = "macos")]
pub use platform::macos::MachHost;
pub use record::{ErrorKind, ErrorRecord};
pub use types::{Port, ProcessId, KERNEL_PID};
