//! The two directed relations the provider exposes for an account.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of the follow graph to fetch for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Accounts that follow the user.
    Followers,
    /// Accounts the user follows.
    Followings,
}

impl Relation {
    /// Path segment used by the scraper API (`/v1/{segment}`).
    pub fn api_segment(self) -> &'static str {
        match self {
            Relation::Followers => "followers",
            Relation::Followings => "following",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Followers => f.write_str("followers"),
            Relation::Followings => f.write_str("followings"),
        }
    }
}

impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "followers" | "follower" => Ok(Relation::Followers),
            "followings" | "following" => Ok(Relation::Followings),
            other => Err(format!(
                "unknown relation '{other}' (expected 'followers' or 'followings')"
            )),
        }
    }
}
