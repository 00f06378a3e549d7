use anyhow::Context;
use clap::{Parser, Subcommand};

use crowdmap_analysis::{analyze_intensity, build_crowd_profile, Poi};
use crowdmap_core::{AppConfig, Coordinates, Place, PlaceTags};
use crowdmap_osm::{NominatimClient, OsmClientConfig, OverpassClient, OverpassElement};

#[derive(Debug, Parser)]
#[command(name = "crowdmap-cli")]
#[command(about = "Crowdmap command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for a location by free-text query via Nominatim.
    Search {
        query: String,
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// List amenities around a point with their estimated crowd profiles.
    Places {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },
    /// Analyze crowd intensity sectors around a point.
    Intensity {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },
    /// Print the estimated crowd profile for a set of OSM tags.
    Profile {
        /// Tags as key=value pairs, e.g. `amenity=restaurant`.
        tags: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = crowdmap_core::load_app_config_from_env()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { query, limit } => search(&config, &query, limit).await?,
        Commands::Places { lat, lon } => places(&config, lat, lon).await?,
        Commands::Intensity { lat, lon } => intensity(&config, lat, lon).await?,
        Commands::Profile { tags } => profile(&tags)?,
    }

    Ok(())
}

fn osm_config(config: &AppConfig) -> OsmClientConfig {
    OsmClientConfig {
        user_agent: config.osm_user_agent.clone(),
        timeout_secs: config.osm_timeout_secs,
        max_retries: config.osm_max_retries,
        retry_backoff_base_ms: config.osm_retry_backoff_base_ms,
    }
}

async fn search(config: &AppConfig, query: &str, limit: u32) -> anyhow::Result<()> {
    let client = NominatimClient::with_base_url(&osm_config(config), &config.nominatim_base_url)?;
    let results = client.search(query, limit).await?;
    tracing::debug!(query, hits = results.len(), "nominatim search completed");
    if results.is_empty() {
        println!("no results for {query:?}");
        return Ok(());
    }
    for result in results {
        println!("{} ({}, {})", result.display_name, result.lat, result.lon);
    }
    Ok(())
}

async fn places(config: &AppConfig, lat: f64, lon: f64) -> anyhow::Result<()> {
    let client = OverpassClient::with_base_url(&osm_config(config), &config.overpass_base_url)?;
    let elements = client
        .amenities_around(lat, lon, config.search_radius_m)
        .await?;

    let places: Vec<Place> = elements
        .iter()
        .filter_map(|element| {
            let (latitude, longitude) = element.position()?;
            Some(Place {
                osm_id: element.id,
                osm_type: element.element_type.clone(),
                latitude,
                longitude,
                tags: collect_tags(element),
            })
        })
        .collect();
    let skipped = elements.len() - places.len();
    if skipped > 0 {
        tracing::warn!(skipped, "elements without a resolvable position were dropped");
    }

    for place in &places {
        let profile = build_crowd_profile(&place.tags);
        println!(
            "{} ({}, {})",
            place.display_name(),
            place.latitude,
            place.longitude
        );
        println!("  {}", profile.best_time_label);
    }
    println!("{} places within {}m", places.len(), config.search_radius_m);
    Ok(())
}

async fn intensity(config: &AppConfig, lat: f64, lon: f64) -> anyhow::Result<()> {
    let client = OverpassClient::with_base_url(&osm_config(config), &config.overpass_base_url)?;
    let elements = client.pois_around(lat, lon, config.search_radius_m).await?;

    let pois: Vec<Poi> = elements
        .iter()
        .filter_map(|element| {
            let (latitude, longitude) = element.position()?;
            Some(Poi {
                latitude,
                longitude,
                name: element.tag("name").to_string(),
                kind: element.tag("amenity").to_string(),
            })
        })
        .collect();

    let center = Coordinates {
        latitude: lat,
        longitude: lon,
    };
    let report = analyze_intensity(center, &pois, f64::from(config.search_radius_m));
    tracing::debug!(
        pois = report.total_pois,
        high = report.high.len(),
        "intensity analysis completed"
    );
    println!(
        "{} POIs: {} high, {} medium, {} low sectors",
        report.total_pois,
        report.high.len(),
        report.medium.len(),
        report.low.len()
    );
    for area in report.high.iter().chain(&report.medium).chain(&report.low) {
        println!(
            "  sector {}: {} POIs near ({:.5}, {:.5})",
            area.sector, area.count, area.latitude, area.longitude
        );
    }
    Ok(())
}

fn profile(tags: &[String]) -> anyhow::Result<()> {
    let tags: PlaceTags = tags
        .iter()
        .map(|pair| parse_tag(pair))
        .collect::<anyhow::Result<_>>()?;
    let profile = build_crowd_profile(&tags);
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn collect_tags(element: &OverpassElement) -> PlaceTags {
    element
        .tags
        .clone()
        .map(PlaceTags::from)
        .unwrap_or_default()
}

fn parse_tag(pair: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .with_context(|| format!("tag {pair:?} is not key=value"))?;
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tag_splits_on_the_first_equals() {
        let (key, value) = parse_tag("amenity=restaurant").expect("valid");
        assert_eq!(key, "amenity");
        assert_eq!(value, "restaurant");

        let (key, value) = parse_tag("note=a=b").expect("valid");
        assert_eq!(key, "note");
        assert_eq!(value, "a=b");
    }

    #[test]
    fn parse_tag_rejects_pairs_without_equals() {
        assert!(parse_tag("amenity").is_err());
    }
}
