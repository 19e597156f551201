//! Shared utilities for mutuals.
//!
//! This crate provides the cross-cutting concerns used by every other
//! mutuals crate: the unified error types and the terminal status and
//! progress helpers used by the CLI.

pub mod errors;
pub mod progress;
