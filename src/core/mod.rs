//! Core module: parsing, classification, storage and reporting

pub mod batch;
pub mod classify;
pub mod config;
pub mod models;
pub mod normalizer;
pub mod parser;
pub mod report;
pub mod storage;

/// Returns the current version of the `transcript-analytics` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
