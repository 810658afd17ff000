//! Schemaguard CLI library
//!
//! Snapshot file loading and report rendering used by the `schemaguard`
//! binary (main.rs).

pub mod report;
pub mod snapshot_loader;
