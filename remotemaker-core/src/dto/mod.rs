//! Data Transfer Objects for the flatmap server API
//!
//! This module contains the request and response bodies exchanged with the
//! remote map server: job submission and incremental status/log polling.

pub mod log;
pub mod make;
