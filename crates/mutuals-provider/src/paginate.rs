//! Cursor pagination: turns a [`PageSource`] into a [`GraphProvider`].
//!
//! Every listing starts with a one-entry probe whose only purpose is to read
//! the total count. The relation is then walked in batches of at most
//! `max_batch` entries, following the continuation token of each page, until
//! the requested entries add up to the count or the provider stops handing
//! out tokens.

use std::collections::HashSet;

use async_trait::async_trait;
use mutuals_core::config::MAX_BATCH_SIZE;
use mutuals_core::relation::Relation;
use mutuals_core::username::Username;
use mutuals_util::errors::ProviderError;
use tracing::{debug, warn};

use crate::page::{PageRequest, PageSource};
use crate::provider::GraphProvider;

/// Fetch a complete relation listing from `source`.
pub async fn fetch_all<S: PageSource + ?Sized>(
    source: &S,
    user: &Username,
    relation: Relation,
    max_batch: u32,
) -> Result<HashSet<Username>, ProviderError> {
    let max_batch = max_batch.clamp(1, MAX_BATCH_SIZE);

    let probe = source
        .page(PageRequest {
            user,
            relation,
            amount: 1,
            token: None,
        })
        .await?;
    let total = probe.count.ok_or_else(|| ProviderError::Decode {
        message: format!("response for {relation} of '{user}' has no count"),
    })?;
    debug!("{user}: {total} {relation} reported");

    let mut names = HashSet::new();
    let mut remaining = total;
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    while remaining > 0 {
        let batch = remaining.min(u64::from(max_batch)) as u32;
        let page = source
            .page(PageRequest {
                user,
                relation,
                amount: batch,
                token: token.as_deref(),
            })
            .await?;
        pages += 1;

        let before = names.len();
        names.extend(page.usernames().map(Username::from));
        debug!(
            "{user}: {relation} page {pages} asked {batch}, got {} new",
            names.len() - before
        );

        remaining -= u64::from(batch);

        match page.continuation() {
            Some(next) => token = Some(next.to_string()),
            // Stops even after a full batch, where the API's rule only stops on a
            // short one; asking again without a cursor would restart at page one.
            None => {
                if remaining > 0 {
                    warn!(
                        "{user}: provider stopped paginating {relation} with {remaining} of {total} outstanding"
                    );
                }
                break;
            }
        }
    }

    debug!(
        "{user}: collected {} {relation} in {pages} page(s)",
        names.len()
    );
    Ok(names)
}

/// A [`GraphProvider`] backed by a paginated [`PageSource`].
pub struct PagedProvider<S> {
    source: S,
    max_batch: u32,
}

impl<S: PageSource> PagedProvider<S> {
    pub fn new(source: S, max_batch: u32) -> Self {
        Self {
            source,
            max_batch: max_batch.clamp(1, MAX_BATCH_SIZE),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn max_batch(&self) -> u32 {
        self.max_batch
    }
}

#[async_trait]
impl<S: PageSource> GraphProvider for PagedProvider<S> {
    async fn fetch_all(
        &self,
        user: &Username,
        relation: Relation,
    ) -> Result<HashSet<Username>, ProviderError> {
        fetch_all(&self.source, user, relation, self.max_batch).await
    }
}
