//! Config command - show the resolved configuration

use anyhow::Result;
use owo_colors::OwoColorize;
use storefront_api_client::ClientConfig;
use storefront_cli::{OutputFormat, Status, output::print_json};
use storefront_core::config::Config;

/// Print the settings file in use and the resolved API client settings
pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let client = ClientConfig::from_settings(&config.schema.api).map_err(storefront_core::Error::from)?;

    if format.is_json() {
        print_json(&serde_json::json!({
            "path": config.path,
            "settings": config.schema,
            "client": client,
        }))?;
        return Ok(());
    }

    match &config.path {
        Some(path) => Status::info(&format!("Using {}", path.display())),
        None => Status::info("No configuration file found, using defaults"),
    }

    Status::header("Settings");
    print!("{}", toml::to_string_pretty(&config.schema)?);

    Status::header("Storefront API");
    println!("  Base URL:     {}", client.base_url.cyan());
    println!("  Environment:  {:?}", client.environment);
    println!("  Timeout:      {}s", client.timeout.as_secs());
    println!(
        "  API key:      {}",
        if client.api_key.is_some() { "set".green().to_string() } else { "not set".dimmed().to_string() }
    );
    Ok(())
}
