//! # Preroll Core
//!
//! Adaptive media-loading scheduler: given many deferred video resources
//! registered by a host, it decides which one to fetch next under a strict
//! concurrency cap, using viewport visibility and explicit priority hints as
//! signals, then streams the bytes, tracks progress, and swaps the result
//! into a playable element with a defined fallback path on failure.
//!
//! ## Overview
//!
//! - [`MediaLoader`]: the facade and only public entry point; explicitly
//!   constructed, lifetime owned by the host.
//! - [`visibility::VisibilityTracker`]: host-driven enter/leave detection
//!   against a margin-expanded viewport.
//! - [`scheduler::DispatchQueue`]: score-ordered pending queue with a
//!   concurrency cap and an idle-prefetch rule.
//! - [`fetcher::StreamingFetcher`]: chunked transfer with progress, buffered
//!   assembly, and direct-URL fallback.
//!
//! Collaborator seams (playable elements, transport, presentation) live in
//! `preroll-contracts`; shared records live in `preroll-model`.
//!
//! ## Feature Flags
//!
//! - `http` (default): bundles [`transport::HttpTransport`] over `reqwest`.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use preroll_core::{LoaderConfig, MediaLoader, transport::HttpTransport};
//! use preroll_contracts::NoopHooks;
//!
//! # async fn wire(videos: Vec<Arc<dyn preroll_contracts::MediaElement>>) {
//! let loader = MediaLoader::new(
//!     LoaderConfig::default(),
//!     Arc::new(HttpTransport::new()),
//!     Arc::new(NoopHooks),
//! );
//! loader.register_many(videos).await;
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod scheduler;
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub mod transport;
pub mod visibility;

pub use config::{LoadStrategy, LoaderConfig};
pub use engine::{LoaderStats, MediaLoader};
pub use error::{LoaderError, Result};
pub use fetcher::{FetchOutcome, StreamingFetcher};
pub use scheduler::DispatchQueue;
pub use visibility::{VisibilityTracker, VisibilityTransition};

// Re-export the collaborator surface so hosts can depend on one crate.
pub use preroll_contracts as contracts;
pub use preroll_model as model;
