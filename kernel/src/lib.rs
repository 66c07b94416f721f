//! Process-scheduling core for a monolithic kernel.
//!
//! This crate owns every scheduling decision: on each timer tick or
//! voluntary yield it re-classifies the outgoing process, delivers expired
//! alarms, and selects the next runnable process from a fixed-size process
//! table. The policy is a multilevel feedback queue with priority/nice
//! weighting and aging-based starvation avoidance.
//!
//! The surrounding kernel supplies the collaborators this core only names:
//! the low-level context-switch primitive ([`task::context::ContextSwitch`]),
//! signal delivery ([`signal::SignalSink`]), and the timer interrupt that
//! advances the [`time::Clock`]. Everything here is plain bookkeeping with
//! no heap allocation; the only irreversible step in a decision cycle is the
//! final transfer of control.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod process;
pub mod signal;
pub mod task;
pub mod time;
