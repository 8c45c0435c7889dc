use std::collections::{HashMap, HashSet};

use super::pages::PageText;
use super::text::{char_len, clean_text};

pub const UNTITLED: &str = "Untitled";

const MIN_TITLE_CHARS: usize = 5;
const MAX_TITLE_CHARS: usize = 100;
const LONG_LINE_CHARS: usize = 20;

/// Picks the first prominent line on page one, then a line repeated on most
/// pages, then [`UNTITLED`].
pub fn infer_title(pages: &[PageText]) -> String {
    if let Some(first_page) = pages.first() {
        let prominent = first_page
            .lines()
            .map(str::trim)
            .filter(|line| title_sized(line))
            .find(|line| is_prominent(line));
        if let Some(line) = prominent {
            return clean_text(line);
        }
    }

    if let Some(line) = find_repeated_line(pages) {
        return clean_text(line);
    }

    UNTITLED.to_string()
}

/// Majority-uppercase or longer than twenty characters.
pub fn is_prominent(line: &str) -> bool {
    let total = char_len(line);
    let upper = line.chars().filter(|character| character.is_uppercase()).count();
    upper * 2 > total || total > LONG_LINE_CHARS
}

/// First line, in document scan order, that appears on more than half of the
/// pages. A line repeated within one page counts once for that page.
pub fn find_repeated_line(pages: &[PageText]) -> Option<&str> {
    if pages.len() < 2 {
        return None;
    }

    let mut first_seen = Vec::<&str>::new();
    let mut page_counts = HashMap::<&str, usize>::new();
    for page in pages {
        let mut on_this_page = HashSet::<&str>::new();
        for line in page.lines().map(str::trim) {
            if !title_sized(line) || !on_this_page.insert(line) {
                continue;
            }
            let count = page_counts.entry(line).or_insert_with(|| {
                first_seen.push(line);
                0
            });
            *count += 1;
        }
    }

    first_seen.into_iter().find(|line| {
        page_counts
            .get(line)
            .is_some_and(|count| count * 2 > pages.len())
    })
}

fn title_sized(line: &str) -> bool {
    let length = char_len(line);
    length > MIN_TITLE_CHARS && length < MAX_TITLE_CHARS
}
