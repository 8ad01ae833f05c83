//! Remotemaker Core
//!
//! Core types for the remotemaker tool.
//!
//! This crate contains:
//! - Domain types: job handle, status, log lines, monitoring outcome
//! - DTOs: request/response bodies of the flatmap server API

pub mod domain;
pub mod dto;
