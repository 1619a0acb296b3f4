//! Splits a normalized transcript into raw term blocks

use super::patterns::PatternLibrary;
use crate::core::models::Season;

/// One term's header fields and its unparsed body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSegment<'t> {
    /// Session offering
    pub season: Season,
    /// First calendar year
    pub start_year: u16,
    /// Last calendar year; the start year when the header names one year
    pub end_year: u16,
    /// Indented lines following the header
    pub body: &'t str,
}

/// Extract all term blocks from `text` in document order
///
/// Text without any term header yields an empty list.
#[must_use]
pub fn segment<'t>(patterns: &PatternLibrary, text: &'t str) -> Vec<TermSegment<'t>> {
    patterns
        .term_blocks(text)
        .filter_map(|caps| {
            // The pattern only admits SUMMER|WINTER and four ASCII digits.
            let season = caps.season.parse::<Season>().ok()?;
            let start_year = caps.start_year.parse::<u16>().ok()?;
            let end_year = match caps.end_year {
                Some(year) => year.parse::<u16>().ok()?,
                None => start_year,
            };
            Some(TermSegment {
                season,
                start_year,
                end_year,
                body: caps.body,
            })
        })
        .collect()
}
