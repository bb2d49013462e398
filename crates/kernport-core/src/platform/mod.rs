//! # Platform-Specific Host Implementations
//!
//! This module contains the real, kernel-backed implementations of the
//! [`HostPorts`](crate::host::HostPorts) trait.
//!
//! There is exactly one today:
//!
//! - **macOS**: the Mach APIs (`host_get_special_port`, `task_for_pid`,
//!   `pid_for_task`) - the kernel task port is a Mach concept, so this is
//!   the only platform where acquisition means anything.
//!
//! On other platforms the crate still builds: the strategy and validation
//! logic is platform-neutral and fully exercised against mock hosts in the
//! test suite.

#[cfg(target_os = "macos")]
pub mod macos;
