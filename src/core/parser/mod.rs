//! Plaintext transcript parser
//!
//! Pipeline: newline normalization, term segmentation, per-term body parsing,
//! then assembly into a [`Student`](crate::core::models::Student).

pub mod assembler;
pub mod patterns;
pub mod segmenter;
pub mod term_body;

pub use assembler::{normalize_newlines, parse_transcript, parse_transcript_file, parse_transcript_with};
pub use patterns::PatternLibrary;
pub use segmenter::{segment, TermSegment};
pub use term_body::parse_term;
