//! Handler for `mutuals friends`.

use miette::Result;
use mutuals_core::username::Username;
use mutuals_util::errors::MutualsError;
use mutuals_util::progress;

pub async fn exec(user: &str, api_key: Option<String>) -> Result<()> {
    let user = Username::parse(user)?;
    let config = super::load_config(api_key)?;
    let graph = super::build_graph(&config)?;

    let pb = progress::spinner(&format!("Fetching mutual friends of {user}..."));
    let result = graph.mutual_friends(&user).await;
    pb.finish_and_clear();

    let mut friends: Vec<Username> = result.map_err(MutualsError::from)?.into_iter().collect();
    if friends.is_empty() {
        println!("{user} has no mutual friends.");
        return Ok(());
    }

    friends.sort();
    progress::status_info("Found", &format!("{} mutual friend(s) of {user}", friends.len()));
    for friend in &friends {
        println!("{friend}");
    }
    Ok(())
}
