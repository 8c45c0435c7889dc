use crate::model::HeadingLevel;

use super::text::leading_indent;

/// Assigns a level from the indentation delta against the previously accepted
/// heading on the same page, falling back to textual cues on a tie.
///
/// There is no level stack: `H1` may be followed directly by `H3`.
pub fn classify_level(raw_line: &str, previous_indent: usize) -> HeadingLevel {
    let indent = leading_indent(raw_line);
    if indent > previous_indent {
        return HeadingLevel::H2;
    }
    if indent < previous_indent {
        return HeadingLevel::H1;
    }

    let line = raw_line.trim();
    if line.contains(':') {
        HeadingLevel::H3
    } else if is_all_caps(line) {
        HeadingLevel::H1
    } else {
        HeadingLevel::H2
    }
}

fn is_all_caps(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|character| character.is_ascii_uppercase() || character.is_whitespace())
}
