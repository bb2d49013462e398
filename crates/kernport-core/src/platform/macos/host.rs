//! # Mach-backed Host Implementation
//!
//! [`MachHost`] implements [`HostPorts`] directly over the Mach APIs.
//!
//! Each trait method is a thin safe wrapper around one kernel call: the
//! unsafe FFI surface stays inside this module, and everything above it
//! (strategies, validation, release discipline) is ordinary safe Rust.

use libc::c_int;
use mach2::kern_return::KERN_SUCCESS;
use mach2::port::mach_port_t;
use mach2::traps::mach_task_self;

use crate::host::{HostError, HostPorts, HostResult};
use crate::platform::macos::constants::{HOST_LOCAL_NODE, HOST_MAX_SPECIAL_PORT};
use crate::platform::macos::ffi;
use crate::types::{Port, ProcessId};

/// Map a non-success `kern_return_t` to a [`HostError`]
///
/// The named variants cover the codes acquisition actually runs into;
/// anything else is preserved verbatim in [`HostError::Other`].
fn host_error(code: libc::kern_return_t) -> HostError
{
    match code {
        libc::KERN_PROTECTION_FAILURE => HostError::ProtectionFailure,
        libc::KERN_INVALID_ARGUMENT => HostError::InvalidArgument,
        libc::KERN_FAILURE => HostError::Failure,
        _ => HostError::Other(code),
    }
}

/// The real host: Mach APIs on macOS
///
/// Stateless - every call goes straight to the kernel. Construct one and
/// hand it to [`KernelTask::new`](crate::acquire::KernelTask::new).
///
/// ## Example
///
/// ```rust,no_run
/// use kernport_core::platform::macos::MachHost;
/// use kernport_core::KernelTask;
///
/// let mut task = KernelTask::new(MachHost::new());
/// let acquired = task.acquire();
/// ```
#[derive(Debug, Default)]
pub struct MachHost;

impl MachHost
{
    /// Create a new Mach host interface.
    #[must_use]
    pub fn new() -> Self
    {
        MachHost
    }
}

impl HostPorts for MachHost
{
    fn self_task(&self) -> Port
    {
        // mach_task_self() reads a cached port name; it cannot fail and the
        // name is owned by the runtime, so it is never released.
        Port(unsafe { mach_task_self() })
    }

    fn host_self(&mut self) -> HostResult<Port>
    {
        // This trap reports failure through the null sentinel rather than a
        // return code.
        let host = unsafe { ffi::mach_host_self() };
        if host == 0 {
            return Err(HostError::Failure);
        }
        Ok(Port(host))
    }

    fn max_special_port(&self) -> u32
    {
        HOST_MAX_SPECIAL_PORT as u32
    }

    fn special_port(&mut self, host: Port, id: u32) -> HostResult<Port>
    {
        let mut port: mach_port_t = 0;
        let kr = unsafe { ffi::host_get_special_port(host.raw(), HOST_LOCAL_NODE, id as c_int, &mut port) };
        if kr != KERN_SUCCESS {
            return Err(host_error(kr));
        }
        Ok(Port(port))
    }

    fn task_for_pid(&mut self, requester: Port, pid: ProcessId) -> HostResult<Port>
    {
        let mut task: mach_port_t = 0;
        let kr = unsafe { ffi::task_for_pid(requester.raw(), pid.raw() as c_int, &mut task) };
        if kr != KERN_SUCCESS {
            return Err(host_error(kr));
        }
        // A denied call can still report success with MACH_PORT_NULL in the
        // output parameter; the validator rejects that sentinel.
        Ok(Port(task))
    }

    fn pid_for_task(&mut self, task: Port) -> HostResult<ProcessId>
    {
        let mut pid: c_int = 0;
        let kr = unsafe { ffi::pid_for_task(task.raw(), &mut pid) };
        if kr != KERN_SUCCESS {
            return Err(host_error(kr));
        }
        Ok(ProcessId(pid))
    }

    fn release(&mut self, port: Port)
    {
        if port.is_null() {
            return;
        }
        // Best effort - ignore errors
        unsafe {
            let _ = ffi::mach_port_deallocate(mach_task_self(), port.raw());
        }
    }
}
