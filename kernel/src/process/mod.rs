//! Process records and the bounded process table.

use spin::Mutex;

pub mod process;
pub mod table;

pub use process::{Process, ProcessId, ProcessState};
pub use table::{ProcessTable, MAX_PROCESSES};

/// Global process table
static PROCESS_TABLE: Mutex<Option<ProcessTable>> = Mutex::new(None);

/// Initialize the global process table. At boot it holds only the idle
/// sentinel.
pub fn init() {
    *PROCESS_TABLE.lock() = Some(ProcessTable::new());
    log::info!("Process table initialized ({} slots)", MAX_PROCESSES);
}

/// Execute a function against the global process table.
///
/// Callers that may race with the timer interrupt must run this with
/// interrupts disabled; the table lock alone does not make re-entry from an
/// interrupt handler safe.
pub fn with_table<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut ProcessTable) -> R,
{
    let mut table_lock = PROCESS_TABLE.lock();
    table_lock.as_mut().map(f)
}
