//! # autopilot-core
//!
//! Core library for Social Autopilot - relationship health from message logs.
//!
//! This library provides:
//! - Domain types for message events and per-contact analyses
//! - Event ingestion with strict timestamp validation
//! - The analytics engine (aggregation, scoring, decay projection)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three stages, all pure and synchronous:
//! - **Aggregator:** groups events into one time-ordered thread per contact
//! - **Scorer/Classifier:** turns thread statistics into a health score,
//!   a relationship state, a trend direction and a suggested action
//! - **Decay Simulator (optional):** projects computed analyses through
//!   30 days of silence without touching raw events
//!
//! ## Example
//!
//! ```rust,no_run
//! use autopilot_core::analytics::analyze_relationships;
//! use autopilot_core::{parse_events, Config, RawEvent};
//!
//! let config = Config::load().expect("failed to load config");
//! let raw: Vec<RawEvent> = Vec::new();
//! let events = parse_events(&raw, &config.engine.self_identity).expect("malformed input");
//! let analyses = analyze_relationships(&events, chrono::Utc::now(), &config.policy())
//!     .expect("analysis failed");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{parse_events, RawEvent};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod demo;
pub mod error;
pub mod features;
pub mod ingest;
pub mod logging;
pub mod timestamp;
pub mod types;
