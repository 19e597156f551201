//! In-memory provider over a fixed follow graph.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use mutuals_core::relation::Relation;
use mutuals_core::username::Username;
use mutuals_util::errors::ProviderError;

use crate::provider::GraphProvider;

/// Serves follower/following sets from memory and counts every call.
///
/// ```
/// use mutuals_provider::memory::MemoryProvider;
///
/// let provider = MemoryProvider::new()
///     .befriend("alice", "bob")
///     .follow("carol", "alice");
/// assert_eq!(provider.calls(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MemoryProvider {
    followers: HashMap<Username, HashSet<Username>>,
    followings: HashMap<Username, HashSet<Username>>,
    failing: HashSet<Username>,
    calls: AtomicUsize,
    calls_per_user: Mutex<HashMap<Username, usize>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// `who` follows `whom`.
    pub fn follow(mut self, who: &str, whom: &str) -> Self {
        self.followings
            .entry(Username::from(who))
            .or_default()
            .insert(Username::from(whom));
        self.followers
            .entry(Username::from(whom))
            .or_default()
            .insert(Username::from(who));
        self
    }

    /// `a` and `b` follow each other, making them mutual friends.
    pub fn befriend(self, a: &str, b: &str) -> Self {
        self.follow(a, b).follow(b, a)
    }

    /// Build a graph from mutual-friend adjacency lists.
    pub fn from_mutuals(adjacency: &[(&str, &[&str])]) -> Self {
        adjacency
            .iter()
            .fold(Self::new(), |provider, (user, friends)| {
                friends
                    .iter()
                    .fold(provider, |provider, friend| provider.befriend(user, friend))
            })
    }

    /// Make every fetch for `user` fail.
    pub fn fail_for(mut self, user: &str) -> Self {
        self.failing.insert(Username::from(user));
        self
    }

    /// Total number of `fetch_all` calls served (including failures).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_all` calls made for `user`.
    pub fn calls_for(&self, user: &str) -> usize {
        self.calls_per_user
            .lock()
            .map(|calls| calls.get(user).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl GraphProvider for MemoryProvider {
    async fn fetch_all(
        &self,
        user: &Username,
        relation: Relation,
    ) -> Result<HashSet<Username>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut per_user) = self.calls_per_user.lock() {
            *per_user.entry(user.clone()).or_default() += 1;
        }

        if self.failing.contains(user) {
            return Err(ProviderError::Unavailable {
                user: user.to_string(),
                message: format!("{relation} lookup refused"),
            });
        }

        let map = match relation {
            Relation::Followers => &self.followers,
            Relation::Followings => &self.followings,
        };
        Ok(map.get(user).cloned().unwrap_or_default())
    }
}
