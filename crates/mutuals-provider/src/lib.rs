//! Social graph provider: the follower/following data source behind the
//! mutual-friend search.
//!
//! [`provider::GraphProvider`] is the seam the search consumes. The
//! [`paginate`] module turns any cursor-paginated [`page::PageSource`] into
//! a provider, [`client::ScraperClient`] is the HTTP page source, and
//! [`memory::MemoryProvider`] serves a fixed graph from memory.

pub mod auth;
pub mod client;
pub mod memory;
pub mod page;
pub mod paginate;
pub mod provider;
