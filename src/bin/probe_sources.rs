//! Probe every source of one matches endpoint and print which ones answer.
//!
//! Usage: probe_sources [endpoint]   (default: live)

use streamed_sports_lib::api::{MatchFeed, StreamedClient};
use streamed_sports_lib::config::AppConfig;
use streamed_sports_lib::validate::StreamValidator;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let endpoint = std::env::args().nth(1).unwrap_or_else(|| "live".to_string());
    let config = AppConfig::load()?;

    println!("API: {}", config.base_url);
    let client = StreamedClient::new(
        &config.base_url,
        &config.user_agent,
        config.request_timeout_secs,
    )?;

    let matches = match client.fetch_matches(&endpoint).await {
        Ok(matches) => matches,
        Err(e) => {
            println!("Fetching /matches/{} failed: {}", endpoint, e);
            println!("{}", e.diagnostics());
            return Ok(());
        }
    };
    println!("/matches/{}: {} matches", endpoint, matches.len());

    let validator = StreamValidator::new(&client);
    let (mut ok, mut dead) = (0usize, 0usize);

    for m in &matches {
        if m.sources.is_empty() {
            println!("\n--- {} (no sources) ---", m.title);
            continue;
        }
        println!("\n--- {} ---", m.title);
        for s in &m.sources {
            if validator.check_stream_availability(&s.source, &s.id).await {
                ok += 1;
                println!("  OK    {}/{}", s.source, s.id);
            } else {
                dead += 1;
                println!("  DEAD  {}/{}", s.source, s.id);
            }
        }
    }

    println!("\nSources working: {} / {}", ok, ok + dead);
    Ok(())
}
