//! 类型模块：定义预告片解析引擎的核心数据类型。
//!
//! # Types Module
//!
//! Strongly-typed values that flow through the resolution engine: what the
//! caller asks for, what a provider reports back, and what the caller
//! finally receives.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MediaRef`] | Inbound media descriptor (title, optional year and id) |
//! | [`TrailerReference`] | The resolved, immutable video locator |
//! | [`Source`] | Tag naming the upstream provider that produced a reference |
//! | [`TrailerListing`] | One trailer entry as listed by a provider |
//! | [`ProviderOutcome`] | Normalized result of a single provider lookup |
//! | [`ResolutionResult`] | Uniform result handed back to the caller |
//!
//! ## Example
//!
//! ```rust
//! use trailer_resolver::types::{MediaRef, Source, TrailerReference};
//!
//! let media = MediaRef::new("Dune").with_year(2021);
//! assert_eq!(media.year, Some(2021));
//!
//! let reference = TrailerReference::new("n9xhJrPXop4", Source::TMDB);
//! assert!(!reference.is_cached());
//! assert!(reference.clone().into_cached().is_cached());
//! ```

pub mod media;
pub mod outcome;
pub mod trailer;

pub use media::MediaRef;
pub use outcome::{ProviderAttemptLog, ProviderFailure, ProviderOutcome, ResolutionResult};
pub use trailer::{Source, TrailerKind, TrailerListing, TrailerReference};
