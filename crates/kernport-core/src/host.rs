//! # Host Port Interface
//!
//! The seam between the acquisition core and the host operating system.
//!
//! Every kernel call the core makes goes through the [`HostPorts`] trait:
//! looking up host special ports, requesting a task port by PID, querying
//! which process a port controls, and releasing ports. The production
//! implementation ([`MachHost`](crate::platform::macos::MachHost)) forwards
//! to the Mach APIs; tests substitute a mock that scripts each call.
//!
//! ## Why use a trait?
//!
//! `task_for_pid()` and `host_get_special_port()` require root (or special
//! entitlements) and behave differently across macOS configurations. A trait
//! seam lets the acquisition logic - strategy ordering, validation, release
//! discipline - be tested deterministically without any privileges at all.
//!
//! ## Error Model
//!
//! Mach calls report failure as a non-zero `kern_return_t`. [`HostError`]
//! mirrors the handful of codes the core actually encounters; everything
//! else is preserved in [`HostError::Other`] so it can be looked up.

use thiserror::Error;

use crate::types::{Port, ProcessId};

/// A failed host call
///
/// The variants mirror the `kern_return_t` codes that matter during port
/// acquisition. The core absorbs all of these locally (a failed call just
/// means "try the next source"), so the distinction is only surfaced in
/// debug logging.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError
{
    /// `KERN_PROTECTION_FAILURE` (error code 5)
    ///
    /// The call was blocked by the security policy. `task_for_pid(0)`
    /// returns this when the caller lacks root or the required entitlement.
    #[error("KERN_PROTECTION_FAILURE: permission denied")]
    ProtectionFailure,

    /// `KERN_INVALID_ARGUMENT` (error code 4)
    ///
    /// A bad port name, PID, or special-port id was passed to the call.
    #[error("KERN_INVALID_ARGUMENT: invalid argument")]
    InvalidArgument,

    /// `KERN_FAILURE` (error code 14)
    ///
    /// General failure. For `host_get_special_port()` this usually means the
    /// slot is defined but nothing is registered in it.
    #[error("KERN_FAILURE: general failure")]
    Failure,

    /// Any other non-success `kern_return_t`
    ///
    /// The integer value is preserved so you can look it up.
    #[error("kernel return code {0}")]
    Other(i32),
}

/// Convenience alias for host call results.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Host operations needed to acquire the kernel task port
///
/// This is the complete set of kernel interactions the core performs. The
/// contracts below are what the acquisition logic relies on; the Mach-backed
/// implementation documents how each maps onto a real API.
///
/// ## Thread Safety
///
/// Implementations are used from a single thread; the core never shares a
/// host between threads and takes `&mut self` on every call that can have
/// side effects.
pub trait HostPorts
{
    /// A port naming the caller's own task (`mach_task_self()`)
    ///
    /// Used as the requester identity for `task_for_pid()`. This port is
    /// owned by the runtime, not by the core, and is never released here.
    fn self_task(&self) -> Port;

    /// Open the host's special-port directory (`mach_host_self()`)
    ///
    /// The returned port must be handed back via [`HostPorts::release`]
    /// once the scan is finished, on every exit path.
    fn host_self(&mut self) -> HostResult<Port>;

    /// Upper bound (inclusive) of valid special-port slot identifiers.
    fn max_special_port(&self) -> u32;

    /// Look up the port registered in one special-port slot
    ///
    /// A failure is not fatal to the scan; it means "no handle in this slot".
    fn special_port(&mut self, host: Port, id: u32) -> HostResult<Port>;

    /// Request the task port of the process with the given PID
    ///
    /// The call may also "fail silently" by succeeding with [`Port::NULL`];
    /// callers must not trust the result without validating it.
    fn task_for_pid(&mut self, requester: Port, pid: ProcessId) -> HostResult<Port>;

    /// Query which process a task port controls (`pid_for_task()`)
    ///
    /// This is the identity check the validator is built on: a port is only
    /// the kernel task port if this query succeeds and returns
    /// [`KERNEL_PID`](crate::types::KERNEL_PID).
    fn pid_for_task(&mut self, task: Port) -> HostResult<ProcessId>;

    /// Return a port to the host (`mach_port_deallocate()`)
    ///
    /// Best effort: implementations ignore errors. Must be called exactly
    /// once for every port obtained from this trait that is not kept.
    fn release(&mut self, port: Port);
}
