//! # macOS Mach API FFI Declarations
//!
//! This module contains all unsafe extern "C" function declarations for Mach
//! APIs that are not provided by the `mach2` crate. These functions are
//! either restricted (require root or debugging entitlements) or live in the
//! BSD layer rather than the Mach layer, and are therefore not included in
//! the standard Mach bindings.
//!
//! ## Why Centralize These?
//!
//! - **Visibility**: All FFI declarations in one place for easy review
//! - **Safety**: Clear separation between safe Rust code and unsafe FFI
//! - **Maintenance**: Easier to update when macOS APIs change
//!
//! These functions are wrapped in safe abstractions in
//! [`host`](super::host); nothing else in the crate touches them directly.
//!
//! ## References
//!
//! - [Apple Mach Kernel Programming](https://developer.apple.com/library/archive/documentation/Darwin/Conceptual/KernelProgramming/Mach/Mach.html)
//! - [XNU Kernel Source](https://github.com/apple-oss-distributions/xnu)

use libc::{c_int, kern_return_t, mach_port_t};

#[link(name = "c", kind = "dylib")]
extern "C" {
    /// Get a Mach task port for a process by PID
    ///
    /// The task port allows you to control and inspect the process. For
    /// PID 0 this is the kernel task itself, which is exactly what this
    /// crate is after.
    ///
    /// ## Security
    ///
    /// Requires root or debugging entitlements; for PID 0 specifically,
    /// modern macOS denies the call outright unless the system is
    /// configured to allow it. A denied call returns
    /// `KERN_PROTECTION_FAILURE` or `KERN_FAILURE` - and on some
    /// configurations it "succeeds" while leaving `MACH_PORT_NULL` in the
    /// output parameter, which is why results must be validated.
    ///
    /// ## Parameters
    ///
    /// - `target_task`: Our own task port (use `mach_task_self()`)
    /// - `pid`: Process ID of the target process
    /// - `task`: Output parameter - receives the task port
    ///
    /// ## Safety
    ///
    /// `task` must point to writable memory for one `mach_port_t`. The
    /// returned port holds a reference in the host's port table and must be
    /// deallocated if discarded.
    ///
    /// **Note**: `task_for_pid` is not publicly documented in Apple's
    /// current developer documentation due to security restrictions. See the
    /// XNU kernel source for implementation details.
    pub fn task_for_pid(target_task: mach_port_t, pid: c_int, task: *mut mach_port_t) -> kern_return_t;

    /// Look up the PID of the process a task port controls
    ///
    /// This is the inverse of `task_for_pid()` and the basis of the
    /// validator: the kernel task port is the port for which this reports
    /// PID 0.
    ///
    /// ## Parameters
    ///
    /// - `task`: The task port to query
    /// - `pid`: Output parameter - receives the PID
    ///
    /// ## Returns
    ///
    /// - `KERN_SUCCESS` (0) on success
    /// - `KERN_FAILURE` if the port does not name a task
    ///
    /// ## Safety
    ///
    /// `pid` must point to writable memory for one `c_int`.
    pub fn pid_for_task(task: mach_port_t, pid: *mut c_int) -> kern_return_t;

    /// Read one slot of the host special-port directory
    ///
    /// Host special ports are a small fixed-size table of well-known
    /// privileged ports maintained per host. Slot assignments are defined in
    /// XNU's `host_special_ports.h`; third-party code (notably jailbreaks)
    /// registers the kernel task port in one of the free slots.
    ///
    /// ## Parameters
    ///
    /// - `host_priv`: Host port from `mach_host_self()`
    /// - `node`: Must be `HOST_LOCAL_NODE` (0); remote nodes are vestigial
    /// - `which`: Slot identifier, `0..=HOST_MAX_SPECIAL_PORT`
    /// - `port`: Output parameter - receives the registered port
    ///
    /// ## Returns
    ///
    /// - `KERN_SUCCESS` (0) on success (possibly with `MACH_PORT_NULL` for
    ///   an empty slot - results must be validated)
    /// - `KERN_INVALID_ARGUMENT` for an out-of-range slot
    ///
    /// ## Safety
    ///
    /// `port` must point to writable memory for one `mach_port_t`.
    ///
    /// See: [host_get_special_port documentation](https://developer.apple.com/documentation/kernel/1502546-host_get_special_port)
    pub fn host_get_special_port(
        host_priv: mach_port_t,
        node: c_int,
        which: c_int,
        port: *mut mach_port_t,
    ) -> kern_return_t;

    /// Get a port for the current host
    ///
    /// This is the "directory reference" for the special-port table: it is
    /// the first argument to `host_get_special_port()`. Like any other port
    /// obtained here it holds a reference and must be deallocated after the
    /// scan.
    ///
    /// ## Returns
    ///
    /// The host port, or `MACH_PORT_NULL` on failure (this trap reports
    /// failure through the sentinel, not through a return code).
    ///
    /// See: [mach_host_self documentation](https://developer.apple.com/documentation/kernel/1502514-mach_host_self)
    pub fn mach_host_self() -> mach_port_t;

    /// Deallocate a Mach port
    ///
    /// Releases one reference to a port previously obtained (e.g. from
    /// `task_for_pid()` or `host_get_special_port()`). Every candidate port
    /// this crate does not keep goes through here exactly once.
    ///
    /// ## Parameters
    ///
    /// - `target_task`: Task port that owns the name (use `mach_task_self()`)
    /// - `name`: The Mach port to deallocate
    ///
    /// ## Safety
    ///
    /// Deallocating a name twice, or a name the task never held, returns
    /// `KERN_INVALID_RIGHT`; callers treat the call as best effort.
    ///
    /// See: [mach_port_deallocate documentation](https://developer.apple.com/documentation/kernel/1578777-mach_port_deallocate/)
    pub fn mach_port_deallocate(target_task: mach_port_t, name: mach_port_t) -> kern_return_t;
}
