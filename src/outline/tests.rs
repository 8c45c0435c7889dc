use std::collections::HashSet;

use super::*;
use crate::model::HeadingLevel;
use super::levels::classify_level;
use super::noise::NoiseFilter;
use super::text::{clean_text, leading_indent};
use super::title::{UNTITLED, find_repeated_line, is_prominent};

fn pages_from(texts: &[&str]) -> Vec<PageText> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| PageText::new(index, *text))
        .collect()
}

fn parser() -> OutlineParser {
    OutlineParser::new(OutlineOptions::default()).unwrap()
}

#[test]
fn segment_pages_splits_on_form_feed_and_drops_trailing_blank_page() {
    let pages = segment_pages("a.pdf", "first page\n\u{000C}second page\n\u{000C}").unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].index(), 0);
    assert_eq!(pages[1].text(), "second page\n");
}

#[test]
fn segment_pages_keeps_blank_pages_in_the_middle() {
    let pages = segment_pages("a.pdf", "one\u{000C}\u{000C}three\u{0000}\u{000C}").unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[1].text(), "");
    assert_eq!(pages[2].text(), "three");
}

#[test]
fn segment_pages_rejects_empty_output() {
    let error = segment_pages("blank.pdf", "  \n\u{000C}\n").unwrap_err();
    assert!(matches!(error, DocumentError::EmptyDocument { ref file } if file == "blank.pdf"));

    assert!(segment_pages("nothing.pdf", "").is_err());
}

#[test]
fn clean_text_collapses_whitespace_runs() {
    assert_eq!(clean_text("   Chapter   2 \t Results  "), "Chapter 2 Results");
}

#[test]
fn leading_indent_counts_spaces_only() {
    assert_eq!(leading_indent("    Heading"), 4);
    assert_eq!(leading_indent("Heading"), 0);
    assert_eq!(leading_indent("\tHeading"), 0);
}

#[test]
fn prominence_accepts_majority_uppercase_or_long_lines() {
    assert!(is_prominent("ANNUAL PLAN"));
    assert!(is_prominent("a fairly long sentence of text"));
    assert!(!is_prominent("see inside"));
    assert!(!is_prominent("Mixed Case"));
}

#[test]
fn title_is_first_prominent_line_on_first_page() {
    let pages = pages_from(&[
        "\n   INTRODUCTION TO SYSTEMS\n\nthis is body text on the cover\n",
        "other page",
    ]);
    assert_eq!(infer_title(&pages), "INTRODUCTION TO SYSTEMS");
}

#[test]
fn title_ignores_lines_outside_length_bounds() {
    let long_line = "X".repeat(120);
    let text = format!("ABCDE\n{long_line}\n   QUARTERLY   REVIEW  \n");
    let pages = pages_from(&[text.as_str()]);
    assert_eq!(infer_title(&pages), "QUARTERLY REVIEW");
}

#[test]
fn title_falls_back_to_line_repeated_on_most_pages() {
    let mut texts = Vec::new();
    texts.push("see inside\nnotes".to_string());
    for page in 1..10 {
        if page <= 6 {
            texts.push(format!("Annual Report 2024\nbody {page}"));
        } else {
            texts.push(format!("body {page}"));
        }
    }
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let pages = pages_from(&refs);

    assert_eq!(find_repeated_line(&pages), Some("Annual Report 2024"));
    assert_eq!(infer_title(&pages), "Annual Report 2024");
}

#[test]
fn repeated_line_tie_break_is_first_in_scan_order() {
    let pages = pages_from(&[
        "short\nBeta header\nAlpha header",
        "Alpha header\nBeta header",
        "Beta header\nAlpha header",
    ]);
    assert_eq!(find_repeated_line(&pages), Some("Beta header"));
}

#[test]
fn repeated_line_counts_each_page_once() {
    let pages = pages_from(&[
        "short\nRunning head\nRunning head\nRunning head",
        "page two",
        "page three",
    ]);
    assert_eq!(find_repeated_line(&pages), None);
}

#[test]
fn title_is_untitled_when_nothing_qualifies() {
    let pages = pages_from(&["abc\nsee inside"]);
    assert_eq!(infer_title(&pages), UNTITLED);
    assert!(!infer_title(&pages).is_empty());
}

#[test]
fn literal_noise_threshold_never_fires() {
    let pages = pages_from(&["Confidential", "Confidential", "Confidential"]);
    let filter = NoiseFilter::new(&pages, NoiseThreshold::Literal);
    assert_eq!(filter.pages_containing("Confidential"), 3);
    assert!(!filter.is_noise("Confidential"));
}

#[test]
fn majority_noise_threshold_flags_substring_repeats() {
    let pages = pages_from(&[
        "ACME Internal Draft - page 1",
        "ACME Internal Draft - page 2",
        "Results",
    ]);
    let filter = NoiseFilter::new(&pages, NoiseThreshold::Majority);
    assert!(filter.is_noise("ACME Internal Draft"));
    assert!(!filter.is_noise("Results"));

    let short = pages_from(&["Chapter 1", "Chapter 1"]);
    assert!(!NoiseFilter::new(&short, NoiseThreshold::Majority).is_noise("Chapter 1"));
}

#[test]
fn majority_noise_lines_never_reach_outline() {
    let parser = OutlineParser::new(OutlineOptions {
        noise_threshold: NoiseThreshold::Majority,
        page_numbering: PageNumbering::Zero,
    })
    .unwrap();
    let pages = pages_from(&[
        "Company Confidential\nIntroduction Overview",
        "Company Confidential\nMethods Overview",
        "Company Confidential\nResults Overview",
        "Company Confidential\nClosing Remarks",
    ]);

    let document = parser.build_document(&pages);
    assert!(
        document
            .outline
            .iter()
            .all(|entry| entry.text != "Company Confidential")
    );
    assert_eq!(document.outline.len(), 4);
}

#[test]
fn heading_pattern_matches_keywords_and_titled_lines() {
    let detector = HeadingDetector::new(NoiseThreshold::Literal, PageNumbering::Zero).unwrap();
    assert!(detector.is_heading("Section 1: Overview"));
    assert!(detector.is_heading("Chapter 1"));
    assert!(detector.is_heading("Appendix B"));
    assert!(detector.is_heading("Background and Scope"));
    assert!(detector.is_heading("Risk-Based Review:"));
    assert!(!detector.is_heading("Intro"));
    assert!(!detector.is_heading("lowercase start here"));
    assert!(!detector.is_heading("Table 3 shows results."));
    assert!(!detector.is_heading("Part of the plan."));
}

#[test]
fn classify_level_uses_indentation_delta_first() {
    assert_eq!(classify_level("    Deeper Heading", 0), HeadingLevel::H2);
    assert_eq!(classify_level("Shallower Heading", 4), HeadingLevel::H1);
}

#[test]
fn classify_level_falls_back_to_text_cues_on_equal_indent() {
    assert_eq!(classify_level("Section 1: Overview", 0), HeadingLevel::H3);
    assert_eq!(classify_level("  EXECUTIVE SUMMARY", 2), HeadingLevel::H1);
    assert_eq!(classify_level("Background and Scope", 0), HeadingLevel::H2);
}

#[test]
fn section_with_colon_at_same_indent_is_h3() {
    let pages = pages_from(&["Section 1: Overview\nbody text follows here."]);
    let document = parser().build_document(&pages);
    assert_eq!(document.outline.len(), 1);
    assert_eq!(document.outline[0].level, HeadingLevel::H3);
    assert_eq!(document.outline[0].text, "Section 1: Overview");
    assert_eq!(document.outline[0].page, 0);
}

#[test]
fn duplicate_headings_keep_first_occurrence() {
    let pages = pages_from(&["Chapter 1\nsome text", "body\n   Chapter 1\nmore"]);
    let document = parser().build_document(&pages);
    let chapters: Vec<_> = document
        .outline
        .iter()
        .filter(|entry| entry.text == "Chapter 1")
        .collect();
    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].page, 0);
}

#[test]
fn indentation_tracker_resets_per_page() {
    let pages = pages_from(&[
        "PART ONE\n    Nested Topic Here\nBack To Margin",
        "    Indented Start Heading",
    ]);
    let document = parser().build_document(&pages);
    let levels: Vec<HeadingLevel> = document.outline.iter().map(|entry| entry.level).collect();
    assert_eq!(
        levels,
        vec![
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H1,
            HeadingLevel::H2,
        ]
    );
    assert_eq!(document.outline[3].page, 1);
}

#[test]
fn outline_keeps_scan_order_and_allows_level_jumps() {
    let pages = pages_from(&["OVERVIEW OF WORK\nScope: Included Items\nSUMMARY OF TERMS"]);
    let document = parser().build_document(&pages);
    let levels: Vec<HeadingLevel> = document.outline.iter().map(|entry| entry.level).collect();
    assert_eq!(
        levels,
        vec![HeadingLevel::H1, HeadingLevel::H3, HeadingLevel::H1]
    );
}

#[test]
fn one_based_numbering_shifts_pages() {
    let parser = OutlineParser::new(OutlineOptions {
        noise_threshold: NoiseThreshold::Literal,
        page_numbering: PageNumbering::One,
    })
    .unwrap();
    let document = parser
        .parse_text("a.pdf", "cover\u{000C}Chapter 2\n")
        .unwrap();
    assert_eq!(document.outline[0].page, 2);
}

#[test]
fn outline_text_is_normalized_and_unique() {
    let raw = "TITLE   OF  THE   REPORT\n  Methods   and   Data\n\u{000C}Methods and Data\nFindings  Summary  Table\n";
    let document = parser().parse_text("r.pdf", raw).unwrap();

    let mut seen = HashSet::new();
    for entry in &document.outline {
        assert_eq!(entry.text, entry.text.trim());
        assert!(!entry.text.contains("  "));
        assert!(seen.insert(entry.text.clone()));
    }
    assert_eq!(document.title, "TITLE OF THE REPORT");
}

#[test]
fn parsing_is_idempotent() {
    let raw = "ANNUAL PLAN\nChapter 1\n  Goals: Near Term\n\u{000C}Appendix A\n";
    let parser = parser();
    let first = parser.parse_text("p.pdf", raw).unwrap();
    let second = parser.parse_text("p.pdf", raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        crate::util::to_json_pretty(&first).unwrap(),
        crate::util::to_json_pretty(&second).unwrap()
    );
}

#[test]
fn noise_is_only_checked_for_new_heading_candidates() {
    let detector = HeadingDetector::new(NoiseThreshold::Majority, PageNumbering::Zero).unwrap();
    let texts: Vec<String> = (0..50)
        .map(|page| {
            let mut text = String::from("Company Confidential\n");
            if page < 2 {
                text.push_str("Chapter 1\n");
            }
            for line in 0..20 {
                text.push_str(&format!("body text line {line} on page {page}\n"));
            }
            text
        })
        .collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let pages = pages_from(&refs);

    let noise = NoiseFilter::new(&pages, NoiseThreshold::Majority);
    let outline = detector.detect_with(&pages, &noise);

    assert_eq!(outline.len(), 1);
    assert_eq!(outline[0].text, "Chapter 1");
    assert_eq!(noise.cached_lines(), 2);
}

#[test]
fn literal_noise_threshold_skips_page_scans() {
    let pages = pages_from(&["Confidential", "Confidential", "Confidential"]);
    let filter = NoiseFilter::new(&pages, NoiseThreshold::Literal);
    assert!(!filter.is_noise("Confidential"));
    assert_eq!(filter.cached_lines(), 0);
}

#[test]
fn single_page_document_has_no_repetition_fallback() {
    let pages = pages_from(&["see inside\nshort notes"]);
    assert_eq!(find_repeated_line(&pages), None);
    assert_eq!(infer_title(&pages), UNTITLED);
}
