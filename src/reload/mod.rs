//! Reload Module
//!
//! Change detection and minimal-diff reconciliation for watched notebooks.
//!
//! # Architecture
//!
//! ```text
//! Poller -> ReloadCycle -> Parser -> Reconciler -> host edit
//! (signal)    (read)      (cells)    (range)      (apply)
//! ```
//!
//! # Modules
//!
//! - `compare` - live/canonical cell equality
//! - `cycle` - one read -> parse -> diff -> apply pass
//! - `diff` - minimal replace-range computation
//! - `poller` - polling timer, signal baselines, suppression

pub mod compare;
pub mod cycle;
pub mod diff;
pub mod poller;
