//! Handler for `mutuals path`.

use std::time::Duration;

use miette::Result;
use mutuals_core::username::Username;
use mutuals_search::cancel::CancellationToken;
use mutuals_search::search::{BoundedSearch, SearchOptions, SearchOutcome};
use mutuals_util::errors::MutualsError;
use mutuals_util::progress;

pub struct PathArgs {
    pub depth: Option<usize>,
    pub concurrency: Option<usize>,
    pub timeout: Option<u64>,
    pub verbose: bool,
}

pub async fn exec(from: &str, to: &str, args: &PathArgs, api_key: Option<String>) -> Result<()> {
    let from = Username::parse(from)?;
    let to = Username::parse(to)?;
    let config = super::load_config(api_key)?;
    let max_depth = args.depth.unwrap_or(config.search.max_depth);

    if from == to {
        println!("{from} and {to} are the same user (distance 0).");
        return Ok(());
    }

    let graph = super::build_graph(&config)?;
    let options = SearchOptions::new(max_depth)
        .with_concurrency(args.concurrency.unwrap_or(config.search.concurrency));

    let token = CancellationToken::new();
    if let Some(secs) = args.timeout {
        token.cancel_after(Duration::from_secs(secs));
    }
    let interrupt = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    };

    progress::status("Searching", &format!("{from} -> {to} (depth <= {max_depth})"));
    let pb = progress::spinner("Fetching mutual friends...");
    let report = BoundedSearch::new(graph, options)
        .with_cancellation(token)
        .run(&from, &to)
        .await;
    pb.finish_and_clear();
    interrupt.abort();

    let report = report.map_err(MutualsError::from)?;
    if args.verbose {
        progress::status_info(
            "Expanded",
            &format!(
                "{} account(s), {} discovered, deepest layer {}",
                report.stats.expanded, report.stats.visited, report.stats.deepest_layer
            ),
        );
    }

    match report.outcome {
        SearchOutcome::Found(result) => {
            println!(
                "{from} is {} mutual-friend hop(s) away from {to}.",
                result.distance
            );
            println!("Path: {result}");
            Ok(())
        }
        SearchOutcome::NotFound => {
            println!(
                "No mutual-friend connection found between {from} and {to} (depth <= {max_depth})."
            );
            Ok(())
        }
        SearchOutcome::Cancelled => Err(MutualsError::Cancelled {
            message: match args.timeout {
                Some(secs) => format!("no result within {secs}s or interrupted"),
                None => "interrupted".to_string(),
            },
        }
        .into()),
    }
}
