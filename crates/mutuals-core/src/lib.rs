//! Core data types for mutuals.
//!
//! This crate defines the identifiers that flow through every layer
//! (usernames, follower/following relations) and the global configuration
//! that is injected into the provider and the search at construction time.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod relation;
pub mod username;
