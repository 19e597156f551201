//! Command dispatch and handler modules.

mod config;
mod fetch;
mod friends;
mod path;

use std::sync::Arc;

use miette::Result;
use mutuals_core::config::GlobalConfig;
use mutuals_provider::client::ScraperClient;
use mutuals_search::graph::MutualFriendGraph;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let api_key = cli.api_key;
    match cli.command {
        Command::Path {
            from,
            to,
            depth,
            concurrency,
            timeout,
        } => {
            let opts = path::PathArgs {
                depth,
                concurrency,
                timeout,
                verbose: cli.verbose,
            };
            path::exec(&from, &to, &opts, api_key).await
        }
        Command::Friends { user } => friends::exec(&user, api_key).await,
        Command::Fetch { user, relation } => fetch::exec(&user, relation, api_key).await,
        Command::Config { reveal } => config::exec(reveal, api_key),
    }
}

/// Load the global configuration, letting `--api-key` win over file and env.
fn load_config(api_key: Option<String>) -> Result<GlobalConfig> {
    let mut config = GlobalConfig::load()?;
    if let Some(key) = api_key {
        config.api.key = Some(key);
    }
    tracing::debug!(
        "Using {} (batch {}, depth {})",
        config.api.base_url(),
        config.api.effective_batch_size(),
        config.search.max_depth
    );
    Ok(config)
}

/// Mutual-friend graph backed by the configured scraper API.
fn build_graph(config: &GlobalConfig) -> Result<MutualFriendGraph> {
    let provider = ScraperClient::provider_from_config(&config.api)?;
    Ok(MutualFriendGraph::new(Arc::new(provider)))
}
