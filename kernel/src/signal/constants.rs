//! Signal numbers following Linux x86_64 conventions.
//!
//! The scheduler only ever raises SIGCHLD (child status changed) and
//! SIGALRM (timer expired); the rest of the job-control set is listed so the
//! surrounding kernel and this core agree on numbering.

pub const SIGKILL: u32 = 9; // Cannot be caught or blocked
pub const SIGALRM: u32 = 14;
pub const SIGTERM: u32 = 15;
pub const SIGCHLD: u32 = 17;
pub const SIGCONT: u32 = 18;
pub const SIGSTOP: u32 = 19; // Cannot be caught or blocked

/// Maximum signal number supported
pub const NSIG: u32 = 64;
