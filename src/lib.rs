// src/lib.rs
//! Buckets Hebrew lexicon words into equivalence classes of their numeral
//! values ("mispar"), e.g. one class per day of the week.

pub mod config;
pub mod core;
pub mod errors;
pub mod loader;
pub mod persistence;
pub mod tracing_setup;

pub use crate::config::{MisparConfig, ResolvedConfig};
pub use crate::core::engine::{Pipeline, RunSummary};
pub use crate::errors::PipelineError;
