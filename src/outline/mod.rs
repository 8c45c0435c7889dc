mod headings;
mod levels;
mod noise;
mod pages;
#[cfg(test)]
mod tests;
mod text;
mod title;

use anyhow::Result;

use crate::cli::{NoiseThreshold, PageNumbering};
use crate::error::DocumentError;
use crate::model::Document;

use headings::HeadingDetector;
use pages::{PageText, segment_pages};
use title::infer_title;

#[derive(Copy, Clone, Debug, Default)]
pub struct OutlineOptions {
    pub noise_threshold: NoiseThreshold,
    pub page_numbering: PageNumbering,
}

/// Turns extracted text into a [`Document`]. Holds only compiled patterns,
/// so one instance is shared read-only across worker threads.
pub struct OutlineParser {
    headings: HeadingDetector,
}

impl OutlineParser {
    pub fn new(options: OutlineOptions) -> Result<Self> {
        Ok(Self {
            headings: HeadingDetector::new(options.noise_threshold, options.page_numbering)?,
        })
    }

    pub fn parse_text(&self, file: &str, raw: &str) -> Result<Document, DocumentError> {
        let pages = segment_pages(file, raw)?;
        Ok(self.build_document(&pages))
    }

    pub fn build_document(&self, pages: &[PageText]) -> Document {
        Document {
            title: infer_title(pages),
            outline: self.headings.detect(pages),
        }
    }
}
