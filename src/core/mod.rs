// src/core/mod.rs
pub mod aggregator;
pub mod classifier;
pub mod encoder;
pub mod engine;
pub mod grouper;
pub mod normalizer;
pub mod types;
