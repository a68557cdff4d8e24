#![forbid(unsafe_code)]

//! Core domain model and computation for the Titer compound tracker.
//!
//! This crate provides:
//! - Domain types (dose events, profiles, projection points)
//! - Compound reference catalog
//! - Decay model and projection engine
//! - Key-value persistence and the dose event store
//! - Profile coordination (tracker)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod kv;
pub mod store;
pub mod decay;
pub mod projection;
pub mod tracker;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use kv::{FileKv, KvStore, MemKv};
pub use store::DoseStore;
pub use decay::level_at;
pub use projection::{project, sample_window};
pub use tracker::Tracker;
pub use export::write_log_csv;
