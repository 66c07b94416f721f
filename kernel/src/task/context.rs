//! Context-switch boundary.
//!
//! The low-level save/restore of execution state is the surrounding
//! kernel's arch layer; the scheduler only names the process the processor
//! is handed to.

use crate::process::ProcessId;

/// Transfer of processor control, the single irreversible step of a
/// decision cycle.
pub trait ContextSwitch {
    /// Hand the processor to `next`.
    ///
    /// This does not return in the ordinary sense: the caller's execution
    /// resumes only when `prev` is itself dispatched again and its saved
    /// context restored.
    fn switch_to(&mut self, prev: ProcessId, next: ProcessId);
}
