//! Developer tool: resolve trailers for titles given on the command line.
//!
//! Usage: `resolve-trailer "The Matrix:1999" Dune:2021 "Breaking Bad"`
//!
//! Reads `TMDB_API_TOKEN` (required) and `TMDB_BASE_URL` (optional), plus the
//! usual `TRAILER_*` overrides. Prints one JSON result per title.

use anyhow::{bail, Context};
use trailer_resolver::provider::tmdb::DEFAULT_BASE_URL;
use trailer_resolver::provider::{TmdbCatalog, TmdbProvider};
use trailer_resolver::{MediaRef, ResolverConfig, TrailerResolverBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let titles: Vec<String> = std::env::args().skip(1).collect();
    if titles.is_empty() {
        bail!("usage: resolve-trailer <Title[:year]>...");
    }

    let token = std::env::var("TMDB_API_TOKEN").context("TMDB_API_TOKEN is not set")?;
    let base_url = std::env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    let config = ResolverConfig::default().with_env_overrides();
    let timeout = config.request_timeout();
    let movies = TmdbProvider::with_base_url(&base_url, token.clone(), timeout)?;
    let shows =
        TmdbProvider::with_base_url(&base_url, token, timeout)?.with_catalog(TmdbCatalog::Tv);

    let resolver = TrailerResolverBuilder::new()
        .config(config)
        .with_provider(movies)
        .with_provider(shows)
        .build()?;

    for raw in &titles {
        let media = MediaRef::parse_shorthand(raw);
        let result = resolver.resolve(&media).await;
        println!("{}", serde_json::to_string(&result)?);
    }

    let stats = resolver.cache_stats();
    eprintln!(
        "cache: {} entries, {} hits, {} misses",
        resolver.cache_len(),
        stats.hits,
        stats.misses
    );
    Ok(())
}
