//! One page of a cursor-paginated relation listing.

use async_trait::async_trait;
use mutuals_core::relation::Relation;
use mutuals_core::username::Username;
use mutuals_util::errors::ProviderError;

/// Parameters of a single page request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub user: &'a Username,
    pub relation: Relation,
    /// Number of entries asked for (the provider caps this at 1000).
    pub amount: u32,
    /// Continuation token returned with the previous page.
    pub token: Option<&'a str>,
}

/// An entry of a page. Entries without a username are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageItem {
    pub username: Option<String>,
}

impl PageItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            username: Some(name.into()),
        }
    }
}

/// What the provider returned for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Total size of the relation as reported by the provider. Advisory.
    pub count: Option<u64>,
    pub items: Vec<PageItem>,
    pub next_token: Option<String>,
}

impl Page {
    /// The continuation token, treating an empty string as "no more pages".
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Usernames carried by this page, dropping entries without one.
    pub fn usernames(&self) -> impl Iterator<Item = &str> + '_ {
        self.items
            .iter()
            .filter_map(|item| item.username.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// Anything that can serve single pages of a relation.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn page(&self, request: PageRequest<'_>) -> Result<Page, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_means_no_continuation() {
        let page = Page {
            next_token: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(page.continuation(), None);
    }

    #[test]
    fn usernames_skip_missing_and_empty() {
        let page = Page {
            count: Some(4),
            items: vec![
                PageItem::named("alice"),
                PageItem::default(),
                PageItem::named(""),
                PageItem::named("bob"),
            ],
            next_token: None,
        };
        let names: Vec<&str> = page.usernames().collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }
}
