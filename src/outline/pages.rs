use crate::error::DocumentError;

/// Page separator emitted by pdftotext.
pub const PAGE_BREAK: char = '\u{000C}';

/// Raw text of a single page, identified by its 0-based position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    index: usize,
    text: String,
}

impl PageText {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Splits extractor output on page breaks. The chunk after the final break is
/// whitespace-only for well-formed output and is dropped, along with any other
/// trailing blank pages.
pub fn segment_pages(file: &str, raw: &str) -> Result<Vec<PageText>, DocumentError> {
    let mut chunks: Vec<String> = raw
        .split(PAGE_BREAK)
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = chunks.last() {
        if last_page.trim().is_empty() {
            chunks.pop();
            continue;
        }
        break;
    }

    if chunks.is_empty() {
        return Err(DocumentError::EmptyDocument {
            file: file.to_string(),
        });
    }

    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(index, text)| PageText::new(index, text))
        .collect())
}
