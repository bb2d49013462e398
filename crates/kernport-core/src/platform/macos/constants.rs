//! # macOS Platform Constants
//!
//! Host special-port constants from XNU's `host_special_ports.h`.
//!
//! The special-port directory is a fixed-size table; these constants name
//! the slots the acquisition scan walks. Only the bounds matter to the
//! scan itself - every slot in range is probed and validated - but the
//! well-known assignments are kept here for reference and logging.

use libc::c_int;

/// Node argument for `host_get_special_port()`
///
/// Multi-node Mach is vestigial; the local node is always 0.
pub const HOST_LOCAL_NODE: c_int = 0;

/// Slot of the host name port (unprivileged).
pub const HOST_PORT: c_int = 1;

/// Slot of the privileged host control port.
pub const HOST_PRIV_PORT: c_int = 2;

/// Slot of the I/O master port.
pub const HOST_IO_MAIN_PORT: c_int = 3;

/// Highest defined special-port slot identifier (inclusive)
///
/// The table has grown with macOS releases (XNU defines it as the last
/// named slot, 32 as of recent SDKs). Scanning up to a bound that is ahead
/// of the running kernel is harmless: out-of-range slots fail the lookup
/// with `KERN_INVALID_ARGUMENT` and the scan moves on.
pub const HOST_MAX_SPECIAL_PORT: c_int = 32;
