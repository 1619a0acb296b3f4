//! Shared library for `transcript-analytics`
//! Contains the transcript parser, classification rules, storage and reporting
//! used by the `transcripts` CLI.

pub mod core;

pub use crate::core::{config, get_version};
