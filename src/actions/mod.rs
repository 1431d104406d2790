//! Command implementations.
//!
//! Every action returns the line to print on success and leaves printing
//! and exit codes to the binary.

pub mod cache_settings;
pub mod config;
pub mod edge_applications;
