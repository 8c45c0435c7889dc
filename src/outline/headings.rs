use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::cli::{NoiseThreshold, PageNumbering};
use crate::model::OutlineEntry;

use super::levels::classify_level;
use super::noise::NoiseFilter;
use super::pages::PageText;
use super::text::{clean_text, leading_indent};

/// A line that matched the heading pattern, before deduplication and leveling.
#[derive(Debug, Clone)]
pub struct HeadingCandidate<'a> {
    pub page_index: usize,
    pub raw: &'a str,
    pub text: String,
    pub indent: usize,
}

impl<'a> HeadingCandidate<'a> {
    fn new(page_index: usize, raw: &'a str) -> Self {
        Self {
            page_index,
            raw,
            text: clean_text(raw),
            indent: leading_indent(raw),
        }
    }
}

pub struct HeadingDetector {
    heading: Regex,
    noise_threshold: NoiseThreshold,
    page_numbering: PageNumbering,
}

impl HeadingDetector {
    pub fn new(noise_threshold: NoiseThreshold, page_numbering: PageNumbering) -> Result<Self> {
        Ok(Self {
            heading: Regex::new(
                r"^(?:Section|Chapter|Part|Appendix)\s+[A-Z0-9]+|^[A-Z][A-Za-z\s:-]{5,}$",
            )
            .context("failed to compile heading regex")?,
            noise_threshold,
            page_numbering,
        })
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.heading.is_match(line)
    }

    /// Scans pages in order and returns accepted headings in scan order.
    /// The indentation reference resets to zero at the start of every page.
    pub fn detect(&self, pages: &[PageText]) -> Vec<OutlineEntry> {
        let noise = NoiseFilter::new(pages, self.noise_threshold);
        self.detect_with(pages, &noise)
    }

    /// Noise is only consulted for lines that already look like a new heading;
    /// the filter scans every page per distinct line.
    pub fn detect_with(&self, pages: &[PageText], noise: &NoiseFilter<'_>) -> Vec<OutlineEntry> {
        let mut outline = Vec::<OutlineEntry>::new();
        let mut seen = HashSet::<String>::new();

        for page in pages {
            let mut previous_indent = 0usize;
            for raw in page.lines() {
                let line = raw.trim();
                if line.is_empty() || !self.is_heading(line) {
                    continue;
                }

                let candidate = HeadingCandidate::new(page.index(), raw);
                if seen.contains(&candidate.text) || noise.is_noise(line) {
                    continue;
                }

                let level = classify_level(candidate.raw, previous_indent);
                debug!(
                    page = candidate.page_index,
                    level = level.as_str(),
                    indent = candidate.indent,
                    text = %candidate.text,
                    "accepted heading"
                );

                previous_indent = candidate.indent;
                seen.insert(candidate.text.clone());
                outline.push(OutlineEntry {
                    level,
                    text: candidate.text,
                    page: self.page_numbering.page_number(candidate.page_index),
                });
            }
        }

        outline
    }
}
