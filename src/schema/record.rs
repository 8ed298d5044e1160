/// Normalized library records produced by classification.

use serde::{Deserialize, Serialize};

/// A merged-by-name character definition ("Lumia" record).
///
/// Later entries for the same name overwrite only the fields they
/// target; nothing ever clears a previously stored field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub image: Option<String>,
    pub author: Option<String>,
    pub physical_definition: Option<String>,
    pub personality: Option<String>,
    pub behavior: Option<String>,
}

impl CharacterRecord {
    /// A record with every field unset, created on first sight of a name.
    pub fn blank(name: impl Into<String>) -> Self {
        CharacterRecord {
            name: name.into(),
            image: None,
            author: None,
            physical_definition: None,
            personality: None,
            behavior: None,
        }
    }
}

/// Category of a narrative fragment ("Loom" record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoomCategory {
    Utility,
    Retrofit,
    NarrativeStyle,
}

/// A standalone narrative fragment. Never merged — duplicate names
/// produce duplicate fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeFragment {
    pub name: String,
    pub category: LoomCategory,
    pub content: String,
}

/// One record of a built library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LibraryItem {
    Character(CharacterRecord),
    Fragment(NarrativeFragment),
}

impl LibraryItem {
    pub fn name(&self) -> &str {
        match self {
            LibraryItem::Character(record) => &record.name,
            LibraryItem::Fragment(fragment) => &fragment.name,
        }
    }

    pub fn as_character(&self) -> Option<&CharacterRecord> {
        match self {
            LibraryItem::Character(record) => Some(record),
            LibraryItem::Fragment(_) => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&NarrativeFragment> {
        match self {
            LibraryItem::Fragment(fragment) => Some(fragment),
            LibraryItem::Character(_) => None,
        }
    }
}

/// An ordered collection of classified records: character records in
/// first-seen order followed by narrative fragments in entry order.
/// Immutable after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    items: Vec<LibraryItem>,
}

impl Library {
    pub fn new(items: Vec<LibraryItem>) -> Self {
        Library { items }
    }

    pub fn items(&self) -> &[LibraryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item with the given name, if any.
    pub fn find(&self, name: &str) -> Option<&LibraryItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn characters(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.items.iter().filter_map(LibraryItem::as_character)
    }

    pub fn fragments(&self) -> impl Iterator<Item = &NarrativeFragment> {
        self.items.iter().filter_map(LibraryItem::as_fragment)
    }
}
