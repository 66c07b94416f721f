//! Multilevel-feedback-queue scheduler.
//!
//! Four entry points form the scheduling contract: [`Scheduler::schedule`]
//! admits a process for execution, [`Scheduler::stop_current`] parks the
//! running process, [`Scheduler::resume`] unparks a stopped one, and
//! [`Scheduler::reschedule`] runs the decision cycle that picks who gets the
//! processor next.
//!
//! The policy is the classic interactivity heuristic: a process that burns
//! its whole quantum sinks one band toward the background queues, a process
//! that blocks early climbs one band toward the interactive queues, and any
//! process passed over long enough is promoted by aging so nothing starves.
//! Selection is a single deterministic pass over the table in slot order,
//! which keeps every cycle reproducible.

use spin::Mutex;

use crate::process::{ProcessId, ProcessState, ProcessTable, MAX_PROCESSES};
use crate::signal::{SignalSink, SIGALRM, SIGCHLD};
use crate::task::context::ContextSwitch;
use crate::time::Clock;

/// Number of priority bands; `queue` ranges over `1..=QUEUE_AMOUNT`.
pub const QUEUE_AMOUNT: i32 = 4;

/// Quantum scale per band: a dispatched process gets `queue * QUANTUM_UNIT`
/// ticks of credit, so high-priority bands run short responsive slices and
/// background bands run long throughput slices.
pub const QUANTUM_UNIT: i32 = 50;

/// Scales the per-band aging threshold
/// `((QUEUE_AMOUNT + 1) - queue) * AGING_FACTOR`; deeper bands need more
/// accumulated age before promotion.
pub const AGING_FACTOR: i32 = 10;

/// Priority assigned to every process at dispatch.
pub const PRIO_USER: i32 = 20;

/// Bound for the user-settable nice bias.
pub const NICE_RANGE: i32 = 20;

/// The scheduling context: who owns the processor, and who owned it last.
///
/// Exactly one instance lives for the kernel's entire run. The process
/// table is always passed in, never owned; the scheduler only transitions
/// fields of records the process-management layer keeps valid.
pub struct Scheduler {
    current: ProcessId,
    last: ProcessId,
}

impl Scheduler {
    /// At boot the idle sentinel is the sole process and owns the processor.
    pub fn new() -> Self {
        Scheduler {
            current: ProcessId::IDLE,
            last: ProcessId::IDLE,
        }
    }

    /// PID of the process occupying the processor right now.
    pub fn current(&self) -> ProcessId {
        self.current
    }

    /// PID of the process that most recently held the processor.
    pub fn last(&self) -> ProcessId {
        self.last
    }

    /// Admit `pid` for execution: runnable, with its credit counter cleared.
    ///
    /// Callable on any valid record regardless of prior state, and
    /// idempotent on already-ready processes. An unknown PID is a freed
    /// table slot and is skipped.
    pub fn schedule(&mut self, table: &mut ProcessTable, pid: ProcessId) {
        if let Some(p) = table.get_mut(pid) {
            p.state = ProcessState::Ready;
            p.counter = 0;
        }
    }

    /// Park the running process, notify its parent, and relinquish the
    /// processor immediately.
    ///
    /// From the stopped process's point of view this call returns only
    /// after a later [`resume`](Self::resume) and a successful dispatch.
    pub fn stop_current(
        &mut self,
        table: &mut ProcessTable,
        clock: &Clock,
        signals: &mut dyn SignalSink,
        switch: &mut dyn ContextSwitch,
    ) {
        let parent = match table.get_mut(self.current) {
            Some(p) => {
                p.state = ProcessState::Stopped;
                p.parent
            }
            None => None,
        };

        // The backlink is non-owning: a parent that already exited makes
        // the notification a no-op.
        if let Some(ppid) = parent {
            if table.get(ppid).is_some() {
                signals.send_signal(ppid, SIGCHLD);
            }
        }

        log::debug!("Stopped PID {}", self.current.as_u64());

        self.reschedule(table, clock, signals, switch);
    }

    /// Make a previously stopped process runnable again.
    ///
    /// Only a stopped process is resumed; any other state is left untouched
    /// so double-resume bugs elsewhere in the kernel cannot corrupt
    /// scheduling state.
    pub fn resume(&mut self, table: &mut ProcessTable, pid: ProcessId) {
        if table.get(pid).map(|p| p.state) == Some(ProcessState::Stopped) {
            log::debug!("Resumed PID {}", pid.as_u64());
            self.schedule(table, pid);
        }
    }

    /// The decision cycle: re-classify the outgoing process, deliver
    /// expired alarms, then select and dispatch the next process.
    ///
    /// Runs to completion and always dispatches something (worst case the
    /// idle sentinel). The caller must uphold the one-active-cycle
    /// discipline: no other entry into the scheduler may interleave with
    /// the three phases below.
    pub fn reschedule(
        &mut self,
        table: &mut ProcessTable,
        clock: &Clock,
        signals: &mut dyn SignalSink,
        switch: &mut dyn ContextSwitch,
    ) {
        let prev = self.current;

        // Phase 1: re-classify the outgoing process. Still RUNNING means it
        // was preempted with its quantum spent, so it sinks one band and
        // goes back to READY. Anything else (bar DEAD and the idle
        // sentinel) left through a blocking call and is rewarded with a
        // climb of one band.
        if let Some(curr) = table.get_mut(prev) {
            if curr.state == ProcessState::Running {
                if curr.queue < QUEUE_AMOUNT {
                    curr.queue += 1;
                }
                curr.state = ProcessState::Ready;
                curr.counter = 0;
            } else if curr.state != ProcessState::Dead && prev != ProcessId::IDLE {
                if curr.queue > 1 {
                    curr.queue -= 1;
                }
            }
        }

        self.last = prev;

        // Phase 2: deliver expired alarms, each exactly once. Disarming
        // before delivery guarantees a given alarm cannot fire again, and
        // running this before selection lets a synchronous handler
        // influence this same cycle's choice.
        let ticks = clock.ticks();
        for idx in 1..MAX_PROCESSES {
            if let Some(p) = table.slot_mut(idx) {
                if p.alarm != 0 && p.alarm <= ticks {
                    p.alarm = 0;
                    let pid = p.pid;
                    signals.send_signal(pid, SIGALRM);
                }
            }
        }

        // Phase 3: pick the next process. The idle sentinel opens as the
        // candidate; every READY user slot is compared against the
        // incumbent in table order. A strictly higher band wins outright;
        // within a band the lower weight (priority + nice - counter) wins,
        // with the incumbent kept on equality. Whoever loses a comparison
        // has its counter aged one step, and any scanned process whose
        // counter reaches its band's threshold is promoted on the spot.
        let mut next = 0usize;
        let (mut next_queue, mut next_weight) = {
            let idle = table.idle();
            (idle.queue, weight(idle.priority, idle.nice, idle.counter))
        };

        for idx in 1..MAX_PROCESSES {
            let (p_queue, p_weight) = match table.slot(idx) {
                Some(p) if p.state == ProcessState::Ready => {
                    (p.queue, weight(p.priority, p.nice, p.counter))
                }
                _ => continue,
            };

            if p_queue < next_queue || (p_queue == next_queue && p_weight < next_weight) {
                if let Some(displaced) = table.slot_mut(next) {
                    displaced.counter += 1;
                }
                next = idx;
                next_queue = p_queue;
                next_weight = p_weight;
            } else if let Some(p) = table.slot_mut(idx) {
                p.counter += 1;
            }

            // Aging, in the same pass: long enough in a band forces a
            // promotion and resets the age. Deeper bands need more
            // accumulated counter, so background work enjoys progressively
            // stronger starvation protection.
            if let Some(p) = table.slot_mut(idx) {
                let aging = ((QUEUE_AMOUNT + 1) - p.queue) * AGING_FACTOR;
                if p.counter >= aging && p.queue != 1 {
                    p.counter = 0;
                    p.queue -= 1;
                    log::trace!(
                        "Aging promoted PID {} to band {}",
                        p.pid.as_u64(),
                        p.queue
                    );
                }
            }

            // A promotion of the incumbent itself must be visible to the
            // comparisons that follow.
            if idx == next {
                if let Some(p) = table.slot(idx) {
                    next_queue = p.queue;
                    next_weight = weight(p.priority, p.nice, p.counter);
                }
            }
        }

        // Dispatch: reset priority, grant the band-scaled quantum, and hand
        // over the processor. Everything up to the switch is pure
        // bookkeeping; the switch itself is the one irreversible action.
        let next_pid = {
            let p = table
                .slot_mut(next)
                .expect("process table corrupted: selected slot is empty");
            p.priority = PRIO_USER;
            p.state = ProcessState::Running;
            p.counter = p.queue * QUANTUM_UNIT;
            p.pid
        };

        self.current = next_pid;

        log::trace!(
            "Dispatching PID {} (band {}) after PID {}",
            next_pid.as_u64(),
            next_queue,
            prev.as_u64()
        );

        switch.switch_to(prev, next_pid);
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new()
    }
}

/// Tie-break score within a band; lower wins, and every lost comparison
/// lowers it further through the counter.
#[inline]
fn weight(priority: i32, nice: i32, counter: i32) -> i32 {
    priority + nice - counter
}

/// Global scheduler instance
static SCHEDULER: Mutex<Option<Scheduler>> = Mutex::new(None);

/// Initialize the global scheduler.
pub fn init() {
    *SCHEDULER.lock() = Some(Scheduler::new());
    log::info!("Scheduler initialized");
}

/// Execute a function against the global scheduler.
///
/// Entry points reached from interrupt context must run with interrupts
/// disabled; the lock orders concurrent callers but cannot make re-entry
/// from the same execution unit safe. When the process table is needed as
/// well, take this lock first and `process::with_table` inside.
pub fn with_scheduler<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Scheduler) -> R,
{
    let mut scheduler_lock = SCHEDULER.lock();
    scheduler_lock.as_mut().map(f)
}
