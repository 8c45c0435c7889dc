/// Collapses whitespace runs to one space and trims both ends.
pub fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Number of leading ASCII spaces on the untrimmed line.
pub fn leading_indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

pub fn char_len(line: &str) -> usize {
    line.chars().count()
}
