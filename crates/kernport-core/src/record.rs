//! # Error Record
//!
//! A process-lifetime, append-only record of acquisition failures.
//!
//! The record outlives any single `acquire()` call: entries accumulate until
//! a caller explicitly clears them. The orchestrator appends exactly one
//! entry per failed acquisition attempt - never per-strategy partials - so
//! the record length is a direct count of total failures.
//!
//! Messages are rendered to text at push time, not lazily. A diagnostic that
//! borrows from transient state would otherwise have to keep that state
//! alive for as long as the record does.

use std::fmt;

/// Type tag carried by every recorded entry
///
/// The acquisition core only produces one kind of error, but the tag keeps
/// entries self-describing if the record is ever shared with other layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{
    /// An error raised by the acquisition core itself.
    Core,
}

impl fmt::Display for ErrorKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            ErrorKind::Core => write!(f, "core error"),
        }
    }
}

/// One recorded failure: a type tag plus a pre-rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry
{
    kind: ErrorKind,
    message: String,
}

impl ErrorEntry
{
    /// The type tag of this entry.
    #[must_use]
    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// The rendered human-readable message.
    #[must_use]
    pub fn message(&self) -> &str
    {
        &self.message
    }
}

impl fmt::Display for ErrorEntry
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Ordered, append-only sequence of error entries
///
/// ## Example
///
/// ```rust
/// use kernport_core::record::{ErrorKind, ErrorRecord};
///
/// let mut record = ErrorRecord::new();
/// record.push(ErrorKind::Core, "something went wrong");
/// assert_eq!(record.len(), 1);
/// assert_eq!(record.entries()[0].message(), "something went wrong");
/// ```
#[derive(Debug, Default)]
pub struct ErrorRecord
{
    entries: Vec<ErrorEntry>,
}

impl ErrorRecord
{
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Append one entry, rendering the message immediately.
    pub fn push(&mut self, kind: ErrorKind, message: impl fmt::Display)
    {
        self.entries.push(ErrorEntry {
            kind,
            message: message.to_string(),
        });
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ErrorEntry]
    {
        &self.entries
    }

    /// The most recently appended entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ErrorEntry>
    {
        self.entries.last()
    }

    /// Number of entries currently recorded.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    /// Whether the record is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }

    /// Discard all entries
    ///
    /// The core never calls this itself; clearing is a caller decision.
    pub fn clear(&mut self)
    {
        self.entries.clear();
    }
}
