//! Signal-delivery boundary.
//!
//! The scheduler decides *that* a signal must be raised (a stopped child, an
//! expired alarm); the delivery mechanism itself lives in the surrounding
//! kernel. [`SignalSink`] is the seam between the two.

pub mod constants;

pub use constants::*;

use crate::process::ProcessId;

/// Fire-and-forget signal delivery.
///
/// The scheduler never consumes a result from delivery: a raised signal
/// against a process that has since exited is simply dropped by the
/// implementation.
pub trait SignalSink {
    fn send_signal(&mut self, pid: ProcessId, signal: u32);
}
