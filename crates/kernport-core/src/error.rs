//! # Error Types
//!
//! Error handling for the acquisition core.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.
//!
//! The error taxonomy here is deliberately flat: everything that goes wrong
//! inside a strategy is absorbed locally ("try the next source"), so the
//! only failure the core surfaces is total exhaustion of all strategies.
//! Diagnosis detail is limited to the one-sentence message on
//! [`CoreError::KernelPortUnavailable`] - the same contract memory tools on
//! macOS have converged on, since the individual failure reasons (no
//! entitlement, SIP, unpopulated slots) are not reliably distinguishable.

use thiserror::Error;

use crate::host::HostError;

/// Errors surfaced by the acquisition core
#[derive(Error, Debug)]
pub enum CoreError
{
    /// Every acquisition strategy was exhausted without a validated port
    ///
    /// The message names both attempted sources. This is the value the
    /// orchestrator renders into the
    /// [`ErrorRecord`](crate::record::ErrorRecord) on total failure, and
    /// what [`acquired_port`](crate::acquire::KernelTask::acquired_port)
    /// returns while no port is held.
    #[error("could not obtain kernel task port via host_get_special_port() or task_for_pid(0)")]
    KernelPortUnavailable,

    /// A host call failed in a context where the failure is not absorbed
    ///
    /// Strategies never produce this; it exists for consumers that talk to
    /// the [`HostPorts`](crate::host::HostPorts) layer directly.
    #[error("host call failed: {0}")]
    Host(#[from] HostError),
}

/// Convenience type alias for `Result<T, CoreError>`.
pub type Result<T> = std::result::Result<T, CoreError>;
