//! Scan reporting.
//!
//! Aggregates scan entries into a [`ScanSummary`] that front ends print or
//! serialize once the scan is over.

pub mod summary;

pub use summary::ScanSummary;
