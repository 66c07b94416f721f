//! Process record and scheduling state.

use crate::task::scheduler::{NICE_RANGE, PRIO_USER, QUEUE_AMOUNT};

/// Process ID type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProcessId(u64);

impl ProcessId {
    /// PID of the idle sentinel, pinned in table slot 0.
    pub const IDLE: ProcessId = ProcessId(0);

    pub const fn new(id: u64) -> Self {
        ProcessId(id)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Process state, as far as scheduling is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Runnable, waiting in its feedback queue
    Ready,
    /// Currently owns the processor
    Running,
    /// Parked until resumed
    Stopped,
    /// Terminated; never selected again
    Dead,
}

/// A process record as seen by the scheduler.
///
/// Records are owned by the process table; the scheduler only ever mutates
/// the scheduling fields of already-existing records.
#[derive(Debug, Clone, Copy)]
pub struct Process {
    pub pid: ProcessId,

    pub state: ProcessState,

    /// Feedback-queue band in `1..=QUEUE_AMOUNT`; lower is higher priority.
    pub queue: i32,

    /// Remaining quantum while running; queue-residency age while waiting.
    pub counter: i32,

    /// Reset to `PRIO_USER` on every dispatch.
    pub priority: i32,

    /// Static user-settable bias, clamped to `[-NICE_RANGE, NICE_RANGE]`.
    pub nice: i32,

    /// Absolute tick at which SIGALRM fires; 0 means disarmed.
    pub alarm: u64,

    /// Non-owning backlink for child-status notification, resolved through
    /// the table at delivery time.
    pub parent: Option<ProcessId>,
}

impl Process {
    /// A freshly admitted process: runnable, top band, zero credit.
    pub fn new(pid: ProcessId, parent: Option<ProcessId>) -> Self {
        Process {
            pid,
            state: ProcessState::Ready,
            queue: 1,
            counter: 0,
            priority: PRIO_USER,
            nice: 0,
            alarm: 0,
            parent,
        }
    }

    /// The idle sentinel: always eligible, lowest band, owns the processor
    /// at boot.
    pub fn idle() -> Self {
        Process {
            pid: ProcessId::IDLE,
            state: ProcessState::Running,
            queue: QUEUE_AMOUNT,
            counter: 0,
            priority: PRIO_USER,
            nice: 0,
            alarm: 0,
            parent: None,
        }
    }

    /// Arm (or disarm, with 0) the alarm. Returns the previously armed tick.
    pub fn set_alarm(&mut self, at_tick: u64) -> u64 {
        let previous = self.alarm;
        self.alarm = at_tick;
        previous
    }

    /// Set the nice bias, clamped to the legal range.
    pub fn set_nice(&mut self, nice: i32) {
        self.nice = nice.clamp(-NICE_RANGE, NICE_RANGE);
    }
}
