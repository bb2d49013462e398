//! # macOS Mach Host Implementation
//!
//! The kernel-backed [`HostPorts`](crate::host::HostPorts) implementation.
//!
//! macOS exposes kernel objects through Mach ports: a **task port** is a
//! send right that grants control over a process, and the kernel itself is
//! reachable as the task of PID 0. The two acquisition sources map onto:
//!
//! - `host_get_special_port()`: read one slot of the per-host directory of
//!   well-known privileged ports
//! - `task_for_pid()`: request a task port by PID directly
//!
//! with `pid_for_task()` supplying the identity check that separates the
//! real kernel task port from whatever else those calls may return.
//!
//! ## Dependencies
//!
//! We use a hybrid approach:
//! - **mach2 crate**: For well-maintained Mach APIs (`mach_task_self`,
//!   `mach_host_self`, `KERN_SUCCESS`)
//! - **libc crate**: For type definitions (`mach_port_t`, `kern_return_t`)
//! - **extern "C"**: For restricted functions not in mach2
//!   (`task_for_pid`, `pid_for_task`, `host_get_special_port`)
//!
//! ## References
//!
//! - [Apple Mach Kernel Programming](https://developer.apple.com/library/archive/documentation/Darwin/Conceptual/KernelProgramming/Mach/Mach.html)
//! - [XNU host_special_ports.h](https://github.com/apple-oss-distributions/xnu)

pub mod constants;
pub mod ffi;
pub mod host;

pub use host::MachHost;
