//! # trailer-resolver
//!
//! 预告片解析引擎：按优先级查询多个上游来源，带有界重试、错误分类与进程内 TTL 缓存。
//!
//! Resolves a media title (and optional release year) to a single playable
//! trailer reference by querying independent, unreliable upstream providers
//! in a fixed priority order.
//!
//! ## Core Behavior
//!
//! - **Cache first**: a live cache entry answers without any network I/O
//! - **Strict fallback order**: providers are tried one at a time, in the
//!   order they were registered, until one succeeds
//! - **Bounded retries**: each provider network step is retried with
//!   exponential backoff on transient failures only
//! - **Failures are values**: resolution always yields a [`ResolutionResult`];
//!   provider errors never escape as `Err` or panics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use trailer_resolver::provider::TmdbProvider;
//! use trailer_resolver::{MediaRef, TrailerResolver};
//!
//! #[tokio::main]
//! async fn main() -> trailer_resolver::Result<()> {
//!     let resolver = TrailerResolver::builder()
//!         .with_provider(TmdbProvider::new("tmdb-read-token", Duration::from_secs(10))?)
//!         .max_cache_size(500)
//!         .build()?;
//!
//!     let result = resolver.resolve(&MediaRef::new("The Matrix").with_year(1999)).await;
//!     match result.reference {
//!         Some(r) => println!("{} via {}", r.locator(), r.source()),
//!         None => println!("no trailer: {}", result.error.unwrap_or_default()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`resolver`] | Resolution orchestrator and its builder |
//! | [`client`] | Provider Client: step execution, retries, classification, selection |
//! | [`provider`] | Upstream provider trait and the TMDB implementation |
//! | [`cache`] | Bounded in-process cache with TTL |
//! | [`batch`] | Concurrent cache preloading |
//! | [`resilience`] | Backoff policy |
//! | [`transport`] | HTTP transport and raw provider errors |
//! | [`types`] | Data model |
//! | [`config`] | Configuration surface |

pub mod batch;
pub mod cache;
pub mod client;
pub mod config;
pub mod error_code;
pub mod provider;
pub mod resilience;
pub mod resolver;
pub mod transport;
pub mod types;

pub use batch::PreloadSummary;
pub use cache::{derive_key, CacheKey, CacheStats};
pub use config::ResolverConfig;
pub use error_code::ErrorKind;
pub use provider::TrailerProvider;
pub use resolver::{TrailerResolver, TrailerResolverBuilder};
pub use types::outcome::ALL_SOURCES_FAILED;
pub use types::{
    MediaRef, ProviderAttemptLog, ProviderOutcome, ResolutionResult, Source, TrailerReference,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
