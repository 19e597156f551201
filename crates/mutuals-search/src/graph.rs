//! The implicit mutual-friend graph.

use std::collections::HashSet;
use std::sync::Arc;

use mutuals_core::username::Username;
use mutuals_provider::provider::GraphProvider;
use mutuals_util::errors::ProviderError;
use tracing::debug;

/// Graph whose nodes are usernames and whose edges join mutual friends.
///
/// Neighbor sets are fetched from the provider on every call; nothing is
/// memoized, so two calls may disagree if the live graph changed between
/// them.
#[derive(Clone)]
pub struct MutualFriendGraph {
    provider: Arc<dyn GraphProvider>,
}

impl MutualFriendGraph {
    pub fn new(provider: Arc<dyn GraphProvider>) -> Self {
        Self { provider }
    }

    /// Accounts that both follow `user` and are followed by `user`.
    ///
    /// Followers and followings are fetched concurrently; if either fetch
    /// fails the whole call fails and no partial set is returned.
    pub async fn mutual_friends(
        &self,
        user: &Username,
    ) -> Result<HashSet<Username>, ProviderError> {
        let (followers, followings) = tokio::try_join!(
            self.provider.followers(user),
            self.provider.followings(user)
        )?;

        let (small, large) = if followers.len() <= followings.len() {
            (followers, followings)
        } else {
            (followings, followers)
        };
        let mutual: HashSet<Username> = small.into_iter().filter(|u| large.contains(u)).collect();

        debug!("{user}: {} mutual friend(s)", mutual.len());
        Ok(mutual)
    }
}

impl std::fmt::Debug for MutualFriendGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutualFriendGraph").finish_non_exhaustive()
    }
}
