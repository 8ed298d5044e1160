/// Entry classification — decides whether one raw entry describes a
/// narrative fragment, a character field update, or nothing usable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::extract::{extract_metadata, split_legacy_personality};
use crate::schema::document::RawEntry;
use crate::schema::record::{LoomCategory, NarrativeFragment};

/// Outlet-name sentinels that force a content type regardless of the
/// comment text.
pub const OUTLET_DEFINITION: &str = "lumia_definition";
pub const OUTLET_BEHAVIOR: &str = "lumia_behavior";
pub const OUTLET_PERSONALITY: &str = "lumia_personality";

/// Text preceding the first `(` in a comment.
static CATEGORY_PHRASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\s*\(").unwrap());

/// Strict loom comment shape. The greedy capture keeps balanced nested
/// parentheses inside the fragment name.
static LOOM_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Loom Utilities|Retrofits|Narrative Style)\s*\((.+)\)\s*$").unwrap()
});

/// First parenthetical pair anywhere in a comment, non-greedy. Unlike
/// the loom rule this truncates a name carrying its own parenthetical;
/// the asymmetry is intentional and load-bearing for existing documents.
static LUMIA_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());

/// The kind of content an entry contributes to a character record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Definition,
    Behavior,
    Personality,
}

/// Content-type rules, evaluated top to bottom; the first match wins.
const OUTLET_RULES: &[(&str, ContentKind)] = &[
    (OUTLET_DEFINITION, ContentKind::Definition),
    (OUTLET_BEHAVIOR, ContentKind::Behavior),
    (OUTLET_PERSONALITY, ContentKind::Personality),
];

const COMMENT_HINT_RULES: &[(&str, ContentKind)] = &[
    ("definition", ContentKind::Definition),
    ("behavior", ContentKind::Behavior),
    ("personality", ContentKind::Personality),
];

/// A field-level update to a character record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Cleaned physical definition plus any inline metadata found.
    Definition {
        image: Option<String>,
        author: Option<String>,
        physical: String,
    },
    /// Full overwrite of the behavior field.
    Behavior(String),
    /// Personality text plus a legacy behavior payload that only lands
    /// if the record's behavior field is still unset.
    Personality {
        legacy_behavior: Option<String>,
        personality: String,
    },
    /// The entry names a character but contributes no field.
    Touch,
}

/// Outcome of classifying one raw entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Loom(NarrativeFragment),
    Lumia { name: String, update: FieldUpdate },
    Skip,
}

/// Classify one raw entry. Malformed entries are skipped, never errors.
pub fn classify(entry: &RawEntry) -> Classification {
    let Some(content) = entry.content.as_deref() else {
        log::debug!("skipping entry with missing content: {:?}", entry.comment);
        return Classification::Skip;
    };

    let comment = entry.comment.trim();
    let category_phrase = CATEGORY_PHRASE
        .captures(comment)
        .map(|caps| caps[1].to_string());

    if let Some(category) = category_phrase.as_deref().and_then(loom_category) {
        return match LOOM_COMMENT.captures(comment) {
            Some(caps) => Classification::Loom(NarrativeFragment {
                name: caps[2].trim().to_string(),
                category,
                content: content.trim().to_string(),
            }),
            None => {
                log::debug!("skipping loom entry with malformed comment: {comment:?}");
                Classification::Skip
            }
        };
    }

    // An entry with no parenthetical name is never a character fragment.
    let Some(name) = LUMIA_NAME
        .captures(comment)
        .map(|caps| caps[1].trim().to_string())
    else {
        log::debug!("skipping entry with no parenthetical name: {comment:?}");
        return Classification::Skip;
    };

    let update = match content_kind(entry, comment, category_phrase.as_deref()) {
        Some(ContentKind::Definition) => {
            let meta = extract_metadata(content);
            FieldUpdate::Definition {
                image: meta.image,
                author: meta.author,
                physical: meta.content,
            }
        }
        Some(ContentKind::Behavior) => FieldUpdate::Behavior(content.to_string()),
        Some(ContentKind::Personality) => {
            let split = split_legacy_personality(content);
            FieldUpdate::Personality {
                legacy_behavior: split.behavior,
                personality: split.personality,
            }
        }
        None => FieldUpdate::Touch,
    };

    Classification::Lumia { name, update }
}

fn loom_category(phrase: &str) -> Option<LoomCategory> {
    match phrase {
        "Loom Utilities" => Some(LoomCategory::Utility),
        "Retrofits" => Some(LoomCategory::Retrofit),
        "Narrative Style" => Some(LoomCategory::NarrativeStyle),
        _ => None,
    }
}

fn content_kind(
    entry: &RawEntry,
    comment: &str,
    category_phrase: Option<&str>,
) -> Option<ContentKind> {
    if let Some(outlet) = entry.outlet_name.as_deref() {
        for (sentinel, kind) in OUTLET_RULES {
            if outlet == *sentinel {
                return Some(*kind);
            }
        }
    }

    let lowered = comment.to_lowercase();
    for (hint, kind) in COMMENT_HINT_RULES {
        if lowered.contains(hint) {
            return Some(*kind);
        }
    }

    if category_phrase.is_some_and(|phrase| phrase.trim().to_lowercase() == "lumia") {
        return Some(ContentKind::Definition);
    }

    None
}
