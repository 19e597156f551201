//! Handler for `mutuals fetch`.

use miette::Result;
use mutuals_core::relation::Relation;
use mutuals_core::username::Username;
use mutuals_provider::client::ScraperClient;
use mutuals_provider::provider::GraphProvider;
use mutuals_util::errors::MutualsError;
use mutuals_util::progress;

pub async fn exec(user: &str, relation: Relation, api_key: Option<String>) -> Result<()> {
    let user = Username::parse(user)?;
    let config = super::load_config(api_key)?;
    let provider = ScraperClient::provider_from_config(&config.api)?;

    let pb = progress::spinner(&format!("Fetching {relation} of {user}..."));
    let result = provider.fetch_all(&user, relation).await;
    pb.finish_and_clear();

    let mut names: Vec<Username> = result.map_err(MutualsError::from)?.into_iter().collect();
    names.sort();

    progress::status_info("Fetched", &format!("{} {relation} of {user}", names.len()));
    for name in &names {
        println!("{name}");
    }
    Ok(())
}
