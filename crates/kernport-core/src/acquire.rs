//! # Kernel Task Port Acquisition
//!
//! The orchestrator that obtains a validated kernel task port.
//!
//! No single API reliably yields the kernel task port on all macOS
//! configurations, so acquisition runs an ordered list of strategies and
//! keeps the first result that survives validation:
//!
//! 1. **Host special ports**: scan every slot of the host special-port
//!    directory. Jailbreaks and research kexts commonly stash the kernel
//!    task port in one of these slots (slot 4, `host_get_special_port(4)`,
//!    is the traditional choice).
//! 2. **`task_for_pid(0)`**: ask the kernel directly for the task port of
//!    PID 0. Works on older or suitably configured systems when running
//!    as root.
//!
//! Either source can hand back a port that is *not* the kernel task - an
//! unpopulated slot, a repurposed slot, or a silent failure leaving the
//! null sentinel - so every candidate is checked with `pid_for_task()`
//! before it is trusted, and rejected candidates are released back to the
//! host so no reference leaks.
//!
//! ## Design
//!
//! All state lives in an explicit [`KernelTask`] context rather than in
//! process-wide globals: the injected host, the acquisition state machine,
//! and the error record travel together, which keeps the core testable and
//! makes the single-threaded ownership story visible in the types.
//!
//! ## Thread Safety
//!
//! Not thread-safe. Acquisition is a synchronous, single-threaded affair;
//! use one `KernelTask` from one thread, or wrap it in a `Mutex`.

use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::host::HostPorts;
use crate::record::{ErrorKind, ErrorRecord};
use crate::types::{Port, KERNEL_PID};

/// Acquisition state machine
///
/// ## State Transitions
///
/// - `Unacquired` → `Acquired(port)`: a strategy produced a validated port
/// - `Unacquired` → `Failed`: every strategy was exhausted
/// - `Acquired(_)`/`Failed` → `Unacquired`: a re-run of `acquire()` resets
///   the machine (releasing any previously held port) before trying again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireState
{
    /// No acquisition attempt has completed (or a re-run is in progress).
    Unacquired,
    /// A validated kernel task port is held.
    Acquired(Port),
    /// The last attempt exhausted every strategy.
    Failed,
}

/// Kernel task port acquisition context
///
/// Owns the host interface, the current acquisition state, and the error
/// record. Once `acquire()` succeeds the stored port is trusted until the
/// context is dropped - there is no expiry or revalidation model.
///
/// ## Lifecycle
///
/// 1. Create: `KernelTask::new(host)`
/// 2. Acquire: `acquire()` - runs the strategies in order
/// 3. Use: `port()` / `acquired_port()` hand the port to consumers as an
///    opaque value
/// 4. Drop: the held port (if any) is released back to the host
///
/// ## Example
///
/// ```rust,no_run
/// use kernport_core::host::HostPorts;
/// use kernport_core::KernelTask;
///
/// fn report(host: impl HostPorts) {
///     let mut task = KernelTask::new(host);
///     if task.acquire() {
///         println!("kernel task port: {}", task.port());
///     } else {
///         for entry in task.errors().entries() {
///             eprintln!("{entry}");
///         }
///     }
/// }
/// ```
pub struct KernelTask<H: HostPorts>
{
    host: H,
    state: AcquireState,
    errors: ErrorRecord,
}

impl<H: HostPorts> KernelTask<H>
{
    /// Create a new context around the given host interface
    ///
    /// No kernel calls are made until `acquire()` runs.
    pub fn new(host: H) -> Self
    {
        Self {
            host,
            state: AcquireState::Unacquired,
            errors: ErrorRecord::new(),
        }
    }

    /// Run the acquisition strategies in order
    ///
    /// Tries the host special-port scan first, then `task_for_pid(0)`,
    /// short-circuiting on the first validated port. The order is load
    /// bearing: on systems where both sources work, consumers get the
    /// special-port result, and the fallback is only ever consulted when
    /// the scan comes up empty.
    ///
    /// On total failure, appends exactly one entry naming both exhausted
    /// strategies to the error record and returns `false`. Per-strategy
    /// failures are absorbed and never recorded individually.
    ///
    /// ## Re-invocation
    ///
    /// Calling `acquire()` again is allowed: any previously held port is
    /// released before the strategies re-run, so repeated calls cannot leak
    /// host references. Each failed re-run appends its own record entry.
    pub fn acquire(&mut self) -> bool
    {
        // Re-entry guard: never overwrite a held port without releasing it.
        if let AcquireState::Acquired(previous) = self.state {
            debug!("releasing previously acquired kernel task port {previous}");
            self.host.release(previous);
        }
        self.state = AcquireState::Unacquired;

        if self.try_special_ports() || self.try_task_for_pid_zero() {
            return true;
        }

        warn!("all kernel task port acquisition strategies exhausted");
        self.errors.push(ErrorKind::Core, CoreError::KernelPortUnavailable);
        self.state = AcquireState::Failed;
        false
    }

    /// The currently held kernel task port
    ///
    /// Returns [`Port::NULL`] if `acquire()` has not been called or failed.
    #[must_use]
    pub fn port(&self) -> Port
    {
        match self.state {
            AcquireState::Acquired(port) => port,
            AcquireState::Unacquired | AcquireState::Failed => Port::NULL,
        }
    }

    /// The held port as a `Result`
    ///
    /// ## Errors
    ///
    /// Returns [`CoreError::KernelPortUnavailable`] while no validated port
    /// is held.
    pub fn acquired_port(&self) -> Result<Port>
    {
        match self.state {
            AcquireState::Acquired(port) => Ok(port),
            AcquireState::Unacquired | AcquireState::Failed => Err(CoreError::KernelPortUnavailable),
        }
    }

    /// Current state of the acquisition machine.
    #[must_use]
    pub fn state(&self) -> AcquireState
    {
        self.state
    }

    /// The accumulated error record.
    #[must_use]
    pub fn errors(&self) -> &ErrorRecord
    {
        &self.errors
    }

    /// Borrow the underlying host interface.
    #[must_use]
    pub fn host(&self) -> &H
    {
        &self.host
    }

    /// Check whether a candidate port really is the kernel task port
    ///
    /// The null sentinel is rejected immediately, without touching the host:
    /// it is the documented "silent failure" value and carries no reference
    /// to release. Any other port is checked with `pid_for_task()`; only a
    /// successful query that reports PID 0 validates it.
    ///
    /// An invalid non-null candidate is released exactly once before this
    /// returns. A slot lookup can legitimately return a port to some other
    /// process (an unpopulated or repurposed slot), so skipping this check
    /// would hand consumers control of the wrong task.
    fn validate(&mut self, candidate: Port) -> bool
    {
        if candidate.is_null() {
            return false;
        }

        match self.host.pid_for_task(candidate) {
            Ok(pid) if pid == KERNEL_PID => true,
            Ok(pid) => {
                debug!("candidate port {candidate} belongs to pid {pid}, rejecting");
                self.host.release(candidate);
                false
            }
            Err(err) => {
                debug!("pid_for_task failed for candidate {candidate}: {err}");
                self.host.release(candidate);
                false
            }
        }
    }

    /// Strategy 1: scan the host special-port directory
    ///
    /// Iterates slot identifiers from 0 through `max_special_port()`
    /// inclusive, in ascending order. The fixed order decides which source
    /// wins when several slots are populated: the lowest-numbered valid
    /// slot. A failed lookup for one slot just moves the scan along.
    ///
    /// The directory port from `host_self()` is released before returning,
    /// whatever the outcome.
    fn try_special_ports(&mut self) -> bool
    {
        let directory = match self.host.host_self() {
            Ok(port) if !port.is_null() => port,
            Ok(_) | Err(_) => {
                debug!("host special port directory unavailable");
                return false;
            }
        };

        let mut acquired = None;
        for slot in 0..=self.host.max_special_port() {
            let candidate = match self.host.special_port(directory, slot) {
                Ok(port) => port,
                // No handle in this slot; keep scanning.
                Err(_) => continue,
            };
            if self.validate(candidate) {
                debug!("kernel task port {candidate} found in host special port {slot}");
                acquired = Some(candidate);
                break;
            }
        }

        self.host.release(directory);

        match acquired {
            Some(port) => {
                self.state = AcquireState::Acquired(port);
                true
            }
            None => false,
        }
    }

    /// Strategy 2: request the kernel task port via `task_for_pid(0)`
    ///
    /// Issues a single request using our own task as the requester. The
    /// call may fail outright or "succeed" with the null sentinel; both
    /// cases fall out of validation as a rejection.
    fn try_task_for_pid_zero(&mut self) -> bool
    {
        let requester = self.host.self_task();
        let candidate = match self.host.task_for_pid(requester, KERNEL_PID) {
            Ok(port) => port,
            Err(err) => {
                debug!("task_for_pid(0) failed: {err}");
                return false;
            }
        };

        if self.validate(candidate) {
            debug!("kernel task port {candidate} obtained via task_for_pid(0)");
            self.state = AcquireState::Acquired(candidate);
            true
        } else {
            false
        }
    }
}

impl<H: HostPorts> Drop for KernelTask<H>
{
    fn drop(&mut self)
    {
        // Best effort release of the held port - errors are ignored.
        if let AcquireState::Acquired(port) = self.state {
            self.host.release(port);
        }
    }
}
