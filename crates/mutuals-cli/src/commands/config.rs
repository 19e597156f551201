//! Handler for `mutuals config`.

use miette::Result;
use mutuals_core::config::GlobalConfig;

pub fn exec(reveal: bool, api_key: Option<String>) -> Result<()> {
    let path = GlobalConfig::default_path();
    let config = super::load_config(api_key)?;

    if path.is_file() {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: {} (not found, using defaults)", path.display());
    }

    let key = match config.api.key.as_deref() {
        Some(key) if reveal => key.to_string(),
        Some(_) => "********".to_string(),
        None => "(not set)".to_string(),
    };

    println!("[api]");
    println!("  host = {}", config.api.host);
    println!("  base-url = {}", config.api.base_url());
    println!("  key = {key}");
    println!("  batch-size = {}", config.api.effective_batch_size());
    println!("  timeout-secs = {}", config.api.timeout_secs);
    println!("  max-in-flight = {}", config.api.max_in_flight);
    println!("[search]");
    println!("  max-depth = {}", config.search.max_depth);
    println!("  concurrency = {}", config.search.concurrency);

    Ok(())
}
