/// Inline bracket-tag extraction and legacy personality splitting.

use once_cell::sync::Lazy;
use regex::Regex;

static IMG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[lumia_img=([^\]]*)\]").unwrap());
static AUTHOR_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[lumia_author=([^\]]*)\]").unwrap());
static LEGACY_BEHAVIOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{setvar::lumia_behavior_\w+::(.*?)\}\}").unwrap());
static LEGACY_PERSONALITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{setglobalvar::lumia_personality_\w+::(.*?)\}\}").unwrap());

/// Result of scanning a definition body for inline metadata tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMetadata {
    pub image: Option<String>,
    pub author: Option<String>,
    pub content: String,
}

/// Strip `[lumia_img=…]` and `[lumia_author=…]` tags out of a definition
/// body. Each tag is matched independently, first occurrence only; the
/// matched tag text (brackets included) is removed from the returned
/// content, which is then trimmed.
pub fn extract_metadata(content: &str) -> ExtractedMetadata {
    let mut cleaned = content.to_string();
    let image = strip_tag(&IMG_TAG, &mut cleaned);
    let author = strip_tag(&AUTHOR_TAG, &mut cleaned);

    ExtractedMetadata {
        image,
        author,
        content: cleaned.trim().to_string(),
    }
}

fn strip_tag(pattern: &Regex, content: &mut String) -> Option<String> {
    let (value, span) = {
        let caps = pattern.captures(content)?;
        (caps[1].trim().to_string(), caps.get(0)?.range())
    };
    content.replace_range(span, "");
    Some(value)
}

/// Behavior/personality payloads recovered from a legacy personality body.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacySplit {
    pub behavior: Option<String>,
    pub personality: String,
}

/// Recover behavior and personality text historically embedded as
/// per-trait template-variable assignments inside a single personality
/// body. When no personality assignment is present the whole body is
/// treated as personality text.
pub fn split_legacy_personality(content: &str) -> LegacySplit {
    let behavior = LEGACY_BEHAVIOR
        .captures(content)
        .map(|caps| caps[1].trim().to_string());
    let personality = LEGACY_PERSONALITY
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| content.to_string());

    LegacySplit {
        behavior,
        personality,
    }
}
