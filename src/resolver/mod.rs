//! 解析编排器：缓存优先、按优先级依次尝试各提供者。
//!
//! # Resolution Orchestrator
//!
//! [`TrailerResolver`] is the public entry point. A resolution reads the
//! cache first; on a miss it asks each configured provider in priority order
//! until one produces a trailer, stores the result and returns it. When every
//! provider fails the caller receives `success: false` with a stable error
//! text. Resolution never returns `Err` and never panics on provider failure.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use trailer_resolver::provider::{TmdbCatalog, TmdbProvider};
//! use trailer_resolver::{MediaRef, TrailerResolver};
//!
//! # async fn run() -> trailer_resolver::Result<()> {
//! let token = std::env::var("TMDB_API_TOKEN").unwrap_or_default();
//! let timeout = Duration::from_secs(10);
//! let resolver = TrailerResolver::builder()
//!     .with_provider(TmdbProvider::new(token.clone(), timeout)?)
//!     .with_provider(TmdbProvider::new(token, timeout)?.with_catalog(TmdbCatalog::Tv))
//!     .build()?;
//!
//! let result = resolver.resolve(&MediaRef::new("Dune").with_year(2021)).await;
//! if let Some(locator) = result.locator() {
//!     println!("https://www.youtube.com/watch?v={}", locator);
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod core;

pub use self::builder::TrailerResolverBuilder;
pub use self::core::TrailerResolver;
