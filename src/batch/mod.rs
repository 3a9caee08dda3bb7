//! 批量预加载模块：并发预热预告片缓存。
//!
//! # Batch Preloading
//!
//! Best-effort cache warming. Each title gets its own independent resolution,
//! all started together with no concurrency cap, and the batch settles when
//! every one of them has finished. Failures are logged and counted only.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trailer_resolver::{MediaRef, TrailerResolver};
//!
//! # async fn warm(resolver: Arc<TrailerResolver>) {
//! let titles = vec![
//!     MediaRef::new("Alien").with_year(1979),
//!     MediaRef::new("Aliens").with_year(1986),
//! ];
//! // Detached: the UI thread does not wait on it.
//! let _ = resolver.spawn_preload(titles);
//! # }
//! ```

mod preload;

pub use preload::PreloadSummary;
