//! Bounded process table.
//!
//! A fixed array of slots, randomly accessible and iterated in slot order.
//! Slot 0 permanently holds the idle sentinel; user processes occupy slots
//! `1..MAX_PROCESSES`. Slot order is the scan order the scheduler relies on
//! for its deterministic selection pass.

use core::sync::atomic::{AtomicU64, Ordering};

use super::process::{Process, ProcessId, ProcessState};

/// Size of the process table, idle sentinel included.
pub const MAX_PROCESSES: usize = 64;

/// All process records in the system, indexed by slot.
pub struct ProcessTable {
    slots: [Option<Process>; MAX_PROCESSES],

    /// Next available PID (PID 0 is the idle sentinel)
    next_pid: AtomicU64,
}

impl ProcessTable {
    /// Create a table holding only the idle sentinel.
    pub fn new() -> Self {
        let mut slots = [None; MAX_PROCESSES];
        slots[0] = Some(Process::idle());
        ProcessTable {
            slots,
            next_pid: AtomicU64::new(1),
        }
    }

    /// Admit a new process into the first free user slot.
    pub fn create(&mut self, parent: Option<ProcessId>) -> Result<ProcessId, &'static str> {
        let slot = self.slots[1..]
            .iter()
            .position(|s| s.is_none())
            .map(|i| i + 1)
            .ok_or("process table full")?;

        let pid = ProcessId::new(self.next_pid.fetch_add(1, Ordering::SeqCst));
        self.slots[slot] = Some(Process::new(pid, parent));

        log::info!("Created process PID {} (slot {})", pid.as_u64(), slot);

        Ok(pid)
    }

    /// Look up a process by PID.
    pub fn get(&self, pid: ProcessId) -> Option<&Process> {
        self.slots.iter().flatten().find(|p| p.pid == pid)
    }

    /// Look up a process by PID, mutably.
    pub fn get_mut(&mut self, pid: ProcessId) -> Option<&mut Process> {
        self.slots.iter_mut().flatten().find(|p| p.pid == pid)
    }

    /// Mark a process terminated. The slot stays occupied until reaped so
    /// the parent can still be resolved through the table.
    pub fn mark_dead(&mut self, pid: ProcessId) {
        if pid == ProcessId::IDLE {
            return;
        }
        if let Some(p) = self.get_mut(pid) {
            p.state = ProcessState::Dead;
            log::debug!("Process PID {} marked dead", pid.as_u64());
        }
    }

    /// Free the slot of a dead process.
    pub fn reap(&mut self, pid: ProcessId) -> Result<(), &'static str> {
        if pid == ProcessId::IDLE {
            return Err("cannot reap the idle sentinel");
        }
        let slot = self
            .slots
            .iter()
            .position(|s| s.as_ref().map(|p| p.pid) == Some(pid))
            .ok_or("no such process")?;
        match self.slots[slot] {
            Some(p) if p.state == ProcessState::Dead => {
                self.slots[slot] = None;
                log::debug!("Reaped process PID {} (slot {})", pid.as_u64(), slot);
                Ok(())
            }
            _ => Err("process is not dead"),
        }
    }

    /// The idle sentinel, always present in slot 0.
    pub fn idle(&self) -> &Process {
        // Slot 0 is created in `new` and `reap` refuses to free it.
        self.slots[0].as_ref().expect("idle sentinel missing")
    }

    /// Number of live processes, idle sentinel included.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        false // the idle sentinel is always present
    }

    /// Slot access in table order; `None` for unused/freed slots.
    pub(crate) fn slot(&self, idx: usize) -> Option<&Process> {
        self.slots[idx].as_ref()
    }

    pub(crate) fn slot_mut(&mut self, idx: usize) -> Option<&mut Process> {
        self.slots[idx].as_mut()
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        ProcessTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_holds_only_idle() {
        let table = ProcessTable::new();
        assert_eq!(table.len(), 1);
        assert_eq!(table.idle().pid, ProcessId::IDLE);
        assert_eq!(table.idle().state, ProcessState::Running);
    }

    #[test]
    fn create_assigns_fresh_pids_in_slot_order() {
        let mut table = ProcessTable::new();
        let a = table.create(None).unwrap();
        let b = table.create(Some(a)).unwrap();
        assert_ne!(a, b);
        assert_eq!(table.get(b).unwrap().parent, Some(a));
        assert_eq!(table.get(a).unwrap().state, ProcessState::Ready);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn create_fails_when_table_is_full() {
        let mut table = ProcessTable::new();
        for _ in 1..MAX_PROCESSES {
            table.create(None).unwrap();
        }
        assert_eq!(table.create(None), Err("process table full"));
    }

    #[test]
    fn reap_frees_slot_for_reuse() {
        let mut table = ProcessTable::new();
        let a = table.create(None).unwrap();
        let b = table.create(None).unwrap();

        assert_eq!(table.reap(a), Err("process is not dead"));
        table.mark_dead(a);
        table.reap(a).unwrap();
        assert!(table.get(a).is_none());
        assert!(table.get(b).is_some());

        // The freed slot is handed out again.
        let c = table.create(None).unwrap();
        assert_ne!(c, a);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn idle_sentinel_cannot_be_removed() {
        let mut table = ProcessTable::new();
        table.mark_dead(ProcessId::IDLE);
        assert_eq!(table.idle().state, ProcessState::Running);
        assert_eq!(
            table.reap(ProcessId::IDLE),
            Err("cannot reap the idle sentinel")
        );
    }
}
