use streamscout_core::{ClientConfig, MediaType, ScraperRegistry, DEFAULT_SEARCH_LIMIT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "heat".to_string());

    let registry = ScraperRegistry::with_builtin(ClientConfig::default())?;
    println!("Available scrapers: {:?}\n", registry.names());

    let scraper = registry
        .get("vadapav")
        .ok_or("vadapav scraper not registered")?;

    println!("🔍 Searching '{query}'...\n");
    let results = scraper.search(&query, DEFAULT_SEARCH_LIMIT).await?;

    println!("Found {} results:", results.len());
    for (i, item) in results.iter().enumerate() {
        let year = item.year.as_deref().unwrap_or("—");
        println!("  {}. {} ({year}) [{:?}]", i + 1, item.title, item.media_type);
    }

    if let Some(first) = results.first() {
        println!("\n🎬 Resolving '{}'...\n", first.title);

        if first.media_type == MediaType::Series {
            let episodes = scraper.scrape_episodes(first).await?;
            for (season, count) in &episodes {
                println!("  Season {season}: {count} episodes");
            }
        }

        let media = scraper.scrape(first, None).await?;
        println!("Playable URL: {}", media.url());
        if let Some(referrer) = media.referrer() {
            println!("Referrer:     {referrer}");
        }
    }

    Ok(())
}
