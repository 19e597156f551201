//! CLI argument definitions for mutuals.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};
use mutuals_core::relation::Relation;

#[derive(Parser, Debug)]
#[command(
    name = "mutuals",
    version,
    about = "Find the shortest chain of mutual friends between two accounts",
    long_about = "mutuals walks the mutual-friend graph (accounts that follow each other) \
                  breadth-first through a social data API, up to a depth limit, and \
                  reports the shortest chain connecting two accounts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API key (overrides config file and MUTUALS_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the shortest mutual-friend chain between two accounts
    Path {
        /// Account to start from
        from: String,
        /// Account to reach
        to: String,
        /// Maximum number of mutual-friend hops (default from config, 3)
        #[arg(short, long)]
        depth: Option<usize>,
        /// Accounts expanded concurrently within one search layer
        #[arg(short = 'j', long)]
        concurrency: Option<usize>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// List the mutual friends of an account
    Friends {
        /// Account name
        user: String,
    },

    /// List the followers or followings of an account
    Fetch {
        /// Account name
        user: String,
        /// Relation to list: followers or followings
        #[arg(short, long, default_value = "followers")]
        relation: Relation,
    },

    /// Show the effective configuration
    Config {
        /// Show the API key instead of masking it
        #[arg(long)]
        reveal: bool,
    },
}

/// Parse CLI arguments from the environment.
pub fn parse() -> Cli {
    Cli::parse()
}
