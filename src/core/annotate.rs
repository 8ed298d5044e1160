/// Dominant-tag insertion into the first header-like line of a block.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)\*\*(.+?)\*\*(.*)$").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}) (.*)$").unwrap());

/// Insert `marker` into the first non-blank line of `content`.
///
/// Bold-delimited headers receive the marker just before the closing
/// delimiter, markdown headings and plain lines receive it appended.
/// Every other line is left byte-identical; empty content or an empty
/// marker returns the content unchanged.
pub fn append_dominant_tag(content: &str, marker: &str) -> String {
    if content.is_empty() || marker.is_empty() {
        return content.to_string();
    }

    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    for line in lines.iter_mut() {
        if line.trim().is_empty() {
            continue;
        }
        *line = tag_line(line, marker);
        break;
    }
    lines.join("\n")
}

fn tag_line(line: &str, marker: &str) -> String {
    if let Some(caps) = BOLD_HEADER.captures(line) {
        return format!("{}**{} {}**{}", &caps[1], &caps[2], marker, &caps[3]);
    }
    if let Some(caps) = HEADING.captures(line) {
        return format!("{} {} {}", &caps[1], caps[2].trim_end(), marker);
    }
    format!("{line} {marker}")
}
