//! Place search command handlers.

use wayfind_core::{AppConfig, Candidate, GeoPoint};
use wayfind_places::{CurationConfig, Curator, OlaMapsClient};

/// Builds the Ola Maps client from config, failing when no API key is set.
fn build_client(config: &AppConfig) -> anyhow::Result<OlaMapsClient> {
    let api_key = config.require_places_api_key()?;
    let client = OlaMapsClient::with_base_url(
        api_key,
        &config.places_base_url,
        config.places_request_timeout_secs,
        &config.places_user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Ola Maps client: {e}"))?
    .with_retry_policy(
        config.places_max_retries,
        config.places_retry_backoff_base_ms,
    );
    Ok(client)
}

/// Curate places for `query` near `origin` and print them.
///
/// # Errors
///
/// Returns an error if the API key is missing or the client cannot be
/// built. Provider failures during curation only shorten the result list.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    origin: GeoPoint,
    json: bool,
) -> anyhow::Result<()> {
    let curator = Curator::new(build_client(config)?, CurationConfig::from_app_config(config));
    let candidates = curator.curate(query, origin).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("no places found for '{query}' near {origin}");
        return Ok(());
    }

    print_table(&candidates);
    Ok(())
}

fn print_table(candidates: &[Candidate]) {
    println!("{:<4}{:<40}{:<10}{:<8}ADDRESS", "#", "NAME", "DISTANCE", "RATING");
    for (index, candidate) in candidates.iter().enumerate() {
        let name = if candidate.name.chars().count() > 38 {
            format!("{}...", candidate.name.chars().take(35).collect::<String>())
        } else {
            candidate.name.clone()
        };
        let rating = candidate.rating.to_string();
        println!(
            "{:<4}{:<40}{:<10}{:<8}{}",
            index + 1,
            name,
            candidate.distance_label(),
            rating,
            candidate.address.as_deref().unwrap_or("-"),
        );
    }
}

/// Reverse-geocode `point` and print the best match.
///
/// # Errors
///
/// Returns an error if the API key is missing or the provider call fails.
pub(crate) async fn run_locate(config: &AppConfig, point: GeoPoint) -> anyhow::Result<()> {
    let client = build_client(config)?;
    match client.reverse_geocode(point).await? {
        Some(hit) => {
            if let Some(name) = hit.name.as_deref() {
                println!("{name}");
            }
            println!("{}", hit.formatted_address.as_deref().unwrap_or("(no address)"));
        }
        None => println!("no address found for {point}"),
    }
    Ok(())
}
