//! The provider contract consumed by the mutual-friend graph.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mutuals_core::relation::Relation;
use mutuals_core::username::Username;
use mutuals_util::errors::ProviderError;

/// A source of follower/following sets.
///
/// Implementations hide pagination and batching: every call returns the
/// complete set for the user, or fails. Nothing is retried at this level.
#[async_trait]
pub trait GraphProvider: Send + Sync {
    /// Fetch every account related to `user` through `relation`.
    async fn fetch_all(
        &self,
        user: &Username,
        relation: Relation,
    ) -> Result<HashSet<Username>, ProviderError>;

    /// Accounts that follow `user`.
    async fn followers(&self, user: &Username) -> Result<HashSet<Username>, ProviderError> {
        self.fetch_all(user, Relation::Followers).await
    }

    /// Accounts `user` follows.
    async fn followings(&self, user: &Username) -> Result<HashSet<Username>, ProviderError> {
        self.fetch_all(user, Relation::Followings).await
    }
}

#[async_trait]
impl<P: GraphProvider + ?Sized> GraphProvider for Arc<P> {
    async fn fetch_all(
        &self,
        user: &Username,
        relation: Relation,
    ) -> Result<HashSet<Username>, ProviderError> {
        (**self).fetch_all(user, relation).await
    }
}
