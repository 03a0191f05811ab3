//! Lottery simulation driven by tokio: workers run on the blocking pool and
//! a timer task cancels them when the run duration elapses.

pub mod simulation;
