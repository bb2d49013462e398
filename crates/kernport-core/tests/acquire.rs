//! Acquisition behavior tests
//!
//! These tests run the orchestrator against a scripted mock host, so they
//! need no privileges and behave identically on every platform. The mock
//! counts every host call and records every release, which is what lets the
//! short-circuit, scan-order, and no-leak properties be asserted directly.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use kernport_core::host::{HostError, HostPorts, HostResult};
use kernport_core::types::{Port, ProcessId};
use kernport_core::{AcquireState, CoreError, KernelTask, KERNEL_PID};

/// Port name the mock reports for the caller's own task.
const SELF_TASK: Port = Port(0x99);
/// Port name the mock hands out as the special-port directory reference.
const DIRECTORY: Port = Port(0xd1);

#[derive(Default)]
struct MockState
{
    /// Whether `host_self()` succeeds.
    directory_available: bool,
    /// Populated special-port slots; a missing id makes the lookup fail.
    slots: BTreeMap<u32, Port>,
    /// Highest slot id the mock advertises.
    max_special_port: u32,
    /// Identity table: raw port name -> PID. Missing means the query fails.
    identities: BTreeMap<u32, i32>,
    /// Result of `task_for_pid()`; `None` makes the call fail.
    task_for_pid_result: Option<Port>,
    special_port_calls: usize,
    task_for_pid_calls: usize,
    identity_queries: usize,
    released: Vec<Port>,
}

/// Scripted host with shared, inspectable state
///
/// Cloning shares the state, so tests keep a probe handle around while the
/// acquisition context owns the other.
#[derive(Clone, Default)]
struct MockHost
{
    state: Rc<RefCell<MockState>>,
}

impl MockHost
{
    fn new() -> Self
    {
        Self::default()
    }

    fn with_directory(self, max_special_port: u32) -> Self
    {
        {
            let mut state = self.state.borrow_mut();
            state.directory_available = true;
            state.max_special_port = max_special_port;
        }
        self
    }

    fn with_slot(self, id: u32, port: Port) -> Self
    {
        self.state.borrow_mut().slots.insert(id, port);
        self
    }

    fn with_identity(self, port: Port, pid: i32) -> Self
    {
        self.state.borrow_mut().identities.insert(port.raw(), pid);
        self
    }

    fn with_task_for_pid(self, port: Port) -> Self
    {
        self.state.borrow_mut().task_for_pid_result = Some(port);
        self
    }

    fn special_port_calls(&self) -> usize
    {
        self.state.borrow().special_port_calls
    }

    fn task_for_pid_calls(&self) -> usize
    {
        self.state.borrow().task_for_pid_calls
    }

    fn identity_queries(&self) -> usize
    {
        self.state.borrow().identity_queries
    }

    fn release_count(&self, port: Port) -> usize
    {
        self.state.borrow().released.iter().filter(|p| **p == port).count()
    }
}

impl HostPorts for MockHost
{
    fn self_task(&self) -> Port
    {
        SELF_TASK
    }

    fn host_self(&mut self) -> HostResult<Port>
    {
        if self.state.borrow().directory_available {
            Ok(DIRECTORY)
        } else {
            Err(HostError::Failure)
        }
    }

    fn max_special_port(&self) -> u32
    {
        self.state.borrow().max_special_port
    }

    fn special_port(&mut self, host: Port, id: u32) -> HostResult<Port>
    {
        assert_eq!(host, DIRECTORY, "scan must use the directory reference it opened");
        let mut state = self.state.borrow_mut();
        state.special_port_calls += 1;
        state.slots.get(&id).copied().ok_or(HostError::InvalidArgument)
    }

    fn task_for_pid(&mut self, requester: Port, pid: ProcessId) -> HostResult<Port>
    {
        assert_eq!(requester, SELF_TASK, "direct request must use the caller's own task");
        assert_eq!(pid, KERNEL_PID, "direct request must target the kernel PID");
        let mut state = self.state.borrow_mut();
        state.task_for_pid_calls += 1;
        state.task_for_pid_result.ok_or(HostError::ProtectionFailure)
    }

    fn pid_for_task(&mut self, task: Port) -> HostResult<ProcessId>
    {
        let mut state = self.state.borrow_mut();
        state.identity_queries += 1;
        state
            .identities
            .get(&task.raw())
            .copied()
            .map(ProcessId::from)
            .ok_or(HostError::Failure)
    }

    fn release(&mut self, port: Port)
    {
        self.state.borrow_mut().released.push(port);
    }
}

// Scenario A: a populated slot with kernel identity wins, and the direct
// request strategy is never consulted (P1).
#[test]
fn test_special_slot_hit_short_circuits()
{
    let kernel_port = Port(0x300);
    let host = MockHost::new()
        .with_directory(7)
        .with_slot(3, kernel_port)
        .with_identity(kernel_port, 0);
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(task.acquire());

    assert_eq!(task.port(), kernel_port);
    assert_eq!(task.state(), AcquireState::Acquired(kernel_port));
    assert_eq!(probe.task_for_pid_calls(), 0, "strategy B must not run after a slot hit");
    assert_eq!(probe.release_count(DIRECTORY), 1, "directory reference must be returned");
    assert_eq!(probe.release_count(kernel_port), 0, "the stored port must not be released");
    assert!(task.errors().is_empty());
}

// P2: with several valid slots, the lowest-indexed one is stored.
#[test]
fn test_lowest_populated_slot_wins()
{
    let low = Port(0x200);
    let high = Port(0x500);
    let host = MockHost::new()
        .with_directory(7)
        .with_slot(2, low)
        .with_slot(5, high)
        .with_identity(low, 0)
        .with_identity(high, 0);
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(task.acquire());

    assert_eq!(task.port(), low);
    // Slots 0 and 1 fail the lookup, slot 2 validates; the scan stops there.
    assert_eq!(probe.special_port_calls(), 3);
    assert_eq!(probe.release_count(high), 0, "slot 5 must never be looked up");
}

// P3: a port controlling some other process is rejected and released once.
#[test]
fn test_foreign_identity_rejected_and_released()
{
    let impostor = Port(0x111);
    let host = MockHost::new()
        .with_directory(3)
        .with_slot(1, impostor)
        .with_identity(impostor, 42);
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(!task.acquire());

    assert_eq!(task.port(), Port::NULL);
    assert_eq!(probe.release_count(impostor), 1);
    assert_eq!(task.errors().len(), 1);
}

// P4: the null sentinel is rejected without any identity query, and is
// never released (there is no reference behind it).
#[test]
fn test_null_candidates_rejected_without_host_calls()
{
    let host = MockHost::new()
        .with_directory(1)
        .with_slot(0, Port::NULL)
        .with_slot(1, Port::NULL)
        .with_task_for_pid(Port::NULL);
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(!task.acquire());

    assert_eq!(probe.identity_queries(), 0);
    assert_eq!(probe.release_count(Port::NULL), 0);
    assert_eq!(task.errors().len(), 1);
}

// P5: total exhaustion appends exactly one entry naming both strategies.
#[test]
fn test_total_failure_records_single_entry()
{
    let host = MockHost::new();
    let mut task = KernelTask::new(host);

    assert!(!task.acquire());
    assert_eq!(task.state(), AcquireState::Failed);
    assert_eq!(task.errors().len(), 1);

    let entry = task.errors().last().expect("one entry");
    assert!(entry.message().contains("host_get_special_port"));
    assert!(entry.message().contains("task_for_pid"));
    assert_eq!(format!("{}", entry.kind()), "core error");
}

// Scenario B: directory open fails entirely, the direct request succeeds.
#[test]
fn test_fallback_to_task_for_pid()
{
    let kernel_port = Port(0x42);
    let host = MockHost::new()
        .with_task_for_pid(kernel_port)
        .with_identity(kernel_port, 0);
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(task.acquire());

    assert_eq!(task.port(), kernel_port);
    assert_eq!(probe.special_port_calls(), 0);
    assert!(task.errors().is_empty());
}

// Scenario C: every source yields a foreign port; nothing is stored, every
// candidate is released once, and the record grows by exactly one.
#[test]
fn test_all_sources_invalid()
{
    let slot_ports = [Port(0x10), Port(0x11), Port(0x12)];
    let direct = Port(0x42);
    let mut host = MockHost::new().with_directory(2).with_task_for_pid(direct).with_identity(direct, 7);
    for (id, port) in slot_ports.iter().enumerate() {
        host = host.with_slot(id as u32, *port).with_identity(*port, 1000 + id as i32);
    }
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(!task.acquire());

    assert_eq!(task.errors().len(), 1);
    for port in slot_ports {
        assert_eq!(probe.release_count(port), 1);
    }
    assert_eq!(probe.release_count(direct), 1);
    assert_eq!(probe.release_count(DIRECTORY), 1);
}

// Scenario D: the directory opens but every lookup fails; the scan makes no
// validation calls and acquisition falls through to the direct request.
#[test]
fn test_empty_directory_falls_through()
{
    let kernel_port = Port(0x42);
    let host = MockHost::new()
        .with_directory(7)
        .with_task_for_pid(kernel_port)
        .with_identity(kernel_port, 0);
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(task.acquire());

    assert_eq!(task.port(), kernel_port);
    // Slots 0..=7 all probed, none validated.
    assert_eq!(probe.special_port_calls(), 8);
    assert_eq!(probe.identity_queries(), 1, "only the direct-request candidate is validated");
    assert_eq!(probe.release_count(DIRECTORY), 1);
}

// Re-running acquire() must release the previously held port before it can
// be overwritten.
#[test]
fn test_reacquire_releases_previous_port()
{
    let kernel_port = Port(0x300);
    let host = MockHost::new()
        .with_directory(7)
        .with_slot(3, kernel_port)
        .with_identity(kernel_port, 0);
    let probe = host.clone();

    let mut task = KernelTask::new(host);
    assert!(task.acquire());
    assert_eq!(probe.release_count(kernel_port), 0);

    assert!(task.acquire());
    assert_eq!(task.port(), kernel_port);
    assert_eq!(probe.release_count(kernel_port), 1, "first acquisition must be released by the guard");
}

// Each failed attempt appends its own record entry; the record is
// append-only across re-runs.
#[test]
fn test_failed_reruns_accumulate_entries()
{
    let mut task = KernelTask::new(MockHost::new());
    assert!(!task.acquire());
    assert!(!task.acquire());
    assert_eq!(task.errors().len(), 2);
}

#[test]
fn test_drop_releases_held_port()
{
    let kernel_port = Port(0x300);
    let host = MockHost::new()
        .with_directory(7)
        .with_slot(3, kernel_port)
        .with_identity(kernel_port, 0);
    let probe = host.clone();

    {
        let mut task = KernelTask::new(host);
        assert!(task.acquire());
    }

    assert_eq!(probe.release_count(kernel_port), 1);
}

#[test]
fn test_acquired_port_accessor()
{
    let kernel_port = Port(0x42);
    let host = MockHost::new()
        .with_task_for_pid(kernel_port)
        .with_identity(kernel_port, 0);

    let mut task = KernelTask::new(host);
    assert!(matches!(task.acquired_port(), Err(CoreError::KernelPortUnavailable)));

    assert!(task.acquire());
    assert_eq!(task.acquired_port().expect("port held"), kernel_port);
}
