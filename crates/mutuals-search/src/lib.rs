//! Mutual-friend path search.
//!
//! [`graph::MutualFriendGraph`] derives the mutual-friend neighbor set of an
//! account from a provider, and [`search::BoundedSearch`] walks that implicit
//! graph breadth-first, up to a depth ceiling, to find the shortest chain of
//! mutual friends between two accounts.

pub mod cancel;
pub mod graph;
pub mod search;
pub mod state;
