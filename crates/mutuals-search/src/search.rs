//! Bounded breadth-first search for the shortest mutual-friend chain.
//!
//! Each expansion costs at least two paginated provider listings, so the
//! search is capped at `max_depth` hops: nodes at the ceiling are visited but
//! never expanded. Within a layer, up to `concurrency` nodes are expanded at
//! once; their results are then applied in frontier order by the driving
//! task, so neither the returned chain nor a reported failure depends on
//! which fetch finishes first. A failed fetch only aborts the search if no
//! node ahead of it in the frontier already reaches the target.
//!
//! Neighbors are enqueued in lexicographic order. When several shortest
//! chains exist, the one returned is therefore the first found in that
//! order, and repeated runs over an unchanged graph return the same chain.

use std::collections::HashSet;
use std::fmt;

use mutuals_core::username::Username;
use mutuals_util::errors::ProviderError;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::cancel::CancellationToken;
use crate::graph::MutualFriendGraph;
use crate::state::SearchState;

/// Default number of nodes expanded concurrently within a layer.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of mutual-friend hops considered.
    pub max_depth: usize,
    /// Nodes of the same layer expanded concurrently (at least 1).
    pub concurrency: usize,
}

impl SearchOptions {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// A chain of mutual friends from source to target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Number of hops; always `path.len() - 1`.
    pub distance: usize,
    pub path: Vec<Username>,
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, user) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{user}")?;
        }
        Ok(())
    }
}

/// Terminal result of a search that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(PathResult),
    /// No chain of at most `max_depth` hops connects the two accounts.
    NotFound,
    /// The cancellation token fired before the search finished.
    Cancelled,
}

/// Work done by one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose mutual friends were applied to the frontier.
    pub expanded: usize,
    /// Distinct accounts discovered, including the source.
    pub visited: usize,
    /// Deepest layer that was expanded.
    pub deepest_layer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Breadth-first search over a [`MutualFriendGraph`].
#[derive(Debug, Clone)]
pub struct BoundedSearch {
    graph: MutualFriendGraph,
    options: SearchOptions,
    cancel: CancellationToken,
}

impl BoundedSearch {
    pub fn new(graph: MutualFriendGraph, options: SearchOptions) -> Self {
        Self {
            graph,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort the search (and its in-flight fetches) when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Shortest mutual-friend chain from `source` to `target`.
    ///
    /// A provider failure anywhere aborts the search with that error; it is
    /// never reported as [`SearchOutcome::NotFound`].
    pub async fn shortest_mutual_path(
        &self,
        source: &Username,
        target: &Username,
    ) -> Result<SearchOutcome, ProviderError> {
        Ok(self.run(source, target).await?.outcome)
    }

    /// Like [`Self::shortest_mutual_path`], also reporting search statistics.
    pub async fn run(
        &self,
        source: &Username,
        target: &Username,
    ) -> Result<SearchReport, ProviderError> {
        if source == target {
            return Ok(SearchReport {
                outcome: SearchOutcome::Found(PathResult {
                    distance: 0,
                    path: vec![source.clone()],
                }),
                stats: SearchStats {
                    visited: 1,
                    ..SearchStats::default()
                },
            });
        }

        let max_depth = self.options.max_depth;
        let width = self.options.concurrency.max(1);
        let mut state = SearchState::new(source.clone());
        let mut stats = SearchStats::default();
        let mut current_layer = None;

        info!("Searching {source} -> {target} (depth <= {max_depth})");

        while let Some(distance) = state.front_distance() {
            if distance >= max_depth {
                // Frontier distances never decrease, so nothing left is expandable.
                let skipped = state.clear_frontier();
                debug!("Depth ceiling reached; {skipped} node(s) left unexpanded");
                break;
            }

            if current_layer != Some(distance) {
                current_layer = Some(distance);
                info!(
                    "Layer {distance}: {} node(s) to expand",
                    state.frontier_len()
                );
            }

            if self.cancel.is_cancelled() {
                return Ok(self.cancelled(&state, stats));
            }

            let batch = state.pop_batch(width);
            let Some(fetched) = self.expand(&batch).await else {
                return Ok(self.cancelled(&state, stats));
            };
            stats.deepest_layer = distance;

            for ((current, distance), neighbors) in batch.into_iter().zip(fetched) {
                let neighbors = neighbors?;
                stats.expanded += 1;
                if neighbors.contains(target) {
                    let path = state.path_to(&current, target.clone());
                    stats.visited = state.visited_len() + 1;
                    info!(
                        "Found {source} -> {target} at distance {} after {} expansion(s)",
                        distance + 1,
                        stats.expanded
                    );
                    return Ok(SearchReport {
                        outcome: SearchOutcome::Found(PathResult {
                            distance: distance + 1,
                            path,
                        }),
                        stats,
                    });
                }

                let mut ordered: Vec<Username> = neighbors.into_iter().collect();
                ordered.sort();
                for neighbor in ordered {
                    state.discover(neighbor, &current, distance + 1);
                }
            }
        }

        stats.visited = state.visited_len();
        info!(
            "No chain {source} -> {target} within {max_depth} hop(s) ({} expansion(s))",
            stats.expanded
        );
        Ok(SearchReport {
            outcome: SearchOutcome::NotFound,
            stats,
        })
    }

    /// Fetch the mutual friends of every node in `batch` concurrently.
    ///
    /// One result per node, in `batch` order; a failure does not stop the
    /// other fetches. `None` means the token was cancelled; dropping the join
    /// set aborts whatever was still running.
    async fn expand(
        &self,
        batch: &[(Username, usize)],
    ) -> Option<Vec<Result<HashSet<Username>, ProviderError>>> {
        let mut tasks = JoinSet::new();
        for (index, (user, _)) in batch.iter().enumerate() {
            let graph = self.graph.clone();
            let user = user.clone();
            tasks.spawn(async move { (index, graph.mutual_friends(&user).await) });
        }

        let mut results: Vec<Option<Result<HashSet<Username>, ProviderError>>> =
            batch.iter().map(|_| None).collect();
        let collect = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, result)) => results[index] = Some(result),
                    Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                    Err(_) => {}
                }
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return None,
            _ = collect => {}
        }

        results.into_iter().collect()
    }

    fn cancelled(&self, state: &SearchState, mut stats: SearchStats) -> SearchReport {
        stats.visited = state.visited_len();
        info!("Search cancelled after {} expansion(s)", stats.expanded);
        SearchReport {
            outcome: SearchOutcome::Cancelled,
            stats,
        }
    }
}

/// One-shot search without concurrency or cancellation.
pub async fn shortest_mutual_path(
    graph: &MutualFriendGraph,
    source: &Username,
    target: &Username,
    max_depth: usize,
) -> Result<SearchOutcome, ProviderError> {
    BoundedSearch::new(graph.clone(), SearchOptions::new(max_depth).with_concurrency(1))
        .shortest_mutual_path(source, target)
        .await
}
