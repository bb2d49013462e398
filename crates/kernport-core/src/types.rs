//! Port and process identifier types.

use std::fmt;

/// A raw Mach port name
///
/// A Mach port is an opaque handle issued by the kernel that represents a
/// send right to some kernel object - most importantly for this crate, a
/// task. Holding a task port grants control over the process it names.
///
/// ## Why wrap it in a struct?
///
/// Using a newtype pattern (`struct Port(u32)`) instead of a raw `u32`
/// provides:
/// - **Type safety**: Prevents mixing port names with PIDs, slot ids, or other integers
/// - **A named sentinel**: `Port::NULL` replaces scattered `== 0` comparisons
/// - **Self-documenting code**: Makes it clear what the value represents
///
/// ## Example
///
/// ```rust
/// use kernport_core::types::Port;
///
/// let port = Port::from(0x103);
/// assert!(!port.is_null());
/// assert!(Port::NULL.is_null());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port(pub u32);

impl Port
{
    /// The null port sentinel (`MACH_PORT_NULL`)
    ///
    /// Mach uses port name `0` to mean "no port". Kernel calls that fail
    /// silently leave this value in their output parameter, so the sentinel
    /// must always be treated as "nothing was returned".
    pub const NULL: Port = Port(0);

    /// Whether this is the null sentinel.
    #[must_use]
    pub fn is_null(self) -> bool
    {
        self.0 == 0
    }

    /// Get the raw `u32` port name
    ///
    /// Use this when handing the port back to a Mach API.
    #[must_use]
    pub fn raw(self) -> u32
    {
        self.0
    }
}

impl From<u32> for Port
{
    fn from(name: u32) -> Self
    {
        Port(name)
    }
}

impl fmt::Display for Port
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:x}", self.0)
    }
}

/// Process identifier (PID)
///
/// On macOS the kernel itself is addressable as a process: it is the process
/// with PID 0 (`kernel_task` in Activity Monitor). That reserved identifier
/// is what the validator checks a candidate port against.
///
/// ## Example
///
/// ```rust
/// use kernport_core::types::{ProcessId, KERNEL_PID};
///
/// assert_eq!(KERNEL_PID, ProcessId::from(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(pub i32);

impl ProcessId
{
    /// Get the raw `i32` PID value.
    #[must_use]
    pub fn raw(self) -> i32
    {
        self.0
    }
}

impl From<i32> for ProcessId
{
    fn from(pid: i32) -> Self
    {
        ProcessId(pid)
    }
}

impl fmt::Display for ProcessId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

/// The PID conventionally reserved for the kernel task.
pub const KERNEL_PID: ProcessId = ProcessId(0);
