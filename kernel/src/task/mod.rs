//! Scheduling: the decision core and its context-switch seam.

pub mod context;
pub mod scheduler;

pub use context::ContextSwitch;
pub use scheduler::Scheduler;
