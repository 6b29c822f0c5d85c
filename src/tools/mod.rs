//! The tools module provides helper functions for prefixzip.
//!
//! The tools are:
//! - cli: Command line interface, turning arguments into the options for one run.
//! - freq_count: Frequency count of the input bytes, the starting point for both code builders.
//!
pub mod cli;
pub mod freq_count;
