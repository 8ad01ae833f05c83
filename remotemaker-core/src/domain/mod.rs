//! Core domain types
//!
//! This module contains the domain structures shared between the launcher,
//! the monitor, and the HTTP client: what a job is, what its log looks like,
//! and how a finished monitoring run is reported.

pub mod job;
pub mod log;
pub mod outcome;
