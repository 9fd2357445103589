use crate::fixtures::load_fixtures;
use crate::server::ROUTES;
use crate::timeseries::normalizer::time_offset;
use crate::utils::config::{AUDIENCE_CHANNEL, CDN_CHANNEL};
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use std::path::Path;

/// Validate a fixture directory and print a summary
pub fn validate_fixtures(data_dir: &Path) -> Result<()> {
    println!("Validating fixtures: {}", data_dir.display());

    let loaded = load_fixtures(data_dir)
        .with_context(|| format!("Invalid fixtures in {}", data_dir.display()))?;

    let now = Utc::now().timestamp_millis();

    println!("✓ Valid fixture directory");
    println!("  Clients: {}", loaded.clients.len());
    println!("  Points: {}", loaded.store.point_count());
    println!("  Notifications: {}", loaded.store.notifications.len());
    println!(
        "  Stats: {} countries, {} ISPs, {} platforms",
        loaded.store.countries.len(),
        loaded.store.isps.len(),
        loaded.store.platforms.len()
    );

    let mut ids: Vec<_> = loaded.clients.ids().collect();
    ids.sort_unstable();

    for id in ids {
        let dataset = loaded.store.dataset(id)?;
        let audience = dataset.audience.get(AUDIENCE_CHANNEL).map(Vec::as_slice).unwrap_or(&[]);
        let cdn = dataset.bandwidth.get(CDN_CHANNEL).map(Vec::as_slice).unwrap_or(&[]);

        let recorded_end = cdn
            .last()
            .or(audience.last())
            .and_then(|p| Utc.timestamp_millis_opt(p.timestamp).single())
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "no data".to_string());

        println!(
            "  Client {}: {} audience points, {} streams, last sample {} (shift {} ms)",
            id,
            audience.len(),
            dataset.streams.len(),
            recorded_end,
            time_offset(cdn, now)
        );
    }

    Ok(())
}

/// Display the route table
pub fn display_routes() {
    println!("Mock Dashboard API Routes");
    println!();

    for route in ROUTES {
        println!("  {:<5} {:<15} {}", route.method, route.path, route.description);
        println!("        body: {}", route.body);
    }

    println!();
    println!("Every failure answers 403 with {{\"error\": kind, \"message\": text}}.");
}

/// Display version information
pub fn display_version() {
    println!("Mock Dashboard API v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Canned audience, bandwidth and traffic statistics for frontend development.");
}
