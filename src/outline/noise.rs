use std::cell::RefCell;
use std::collections::HashMap;

use crate::cli::NoiseThreshold;

use super::pages::PageText;

/// Below this page count the majority rule would flag ordinary headings.
const MIN_PAGES_FOR_MAJORITY: usize = 3;

/// Verdicts are cached per distinct line for the lifetime of one document.
pub struct NoiseFilter<'a> {
    pages: &'a [PageText],
    threshold: NoiseThreshold,
    verdicts: RefCell<HashMap<String, bool>>,
}

impl<'a> NoiseFilter<'a> {
    pub fn new(pages: &'a [PageText], threshold: NoiseThreshold) -> Self {
        Self {
            pages,
            threshold,
            verdicts: RefCell::new(HashMap::new()),
        }
    }

    /// Pages whose raw text contains `line` anywhere, not only as a whole line.
    pub fn pages_containing(&self, line: &str) -> usize {
        self.pages
            .iter()
            .filter(|page| page.text().contains(line))
            .count()
    }

    pub fn is_noise(&self, line: &str) -> bool {
        let total = self.pages.len();
        match self.threshold {
            // At most every page contains the line, so `count > 2 * total` cannot hold.
            NoiseThreshold::Literal => false,
            NoiseThreshold::Majority => {
                if total < MIN_PAGES_FOR_MAJORITY {
                    return false;
                }
                if let Some(&verdict) = self.verdicts.borrow().get(line) {
                    return verdict;
                }
                let verdict = self.pages_containing(line) * 2 > total;
                self.verdicts.borrow_mut().insert(line.to_string(), verdict);
                verdict
            }
        }
    }

    pub fn cached_lines(&self) -> usize {
        self.verdicts.borrow().len()
    }
}
