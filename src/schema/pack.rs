/// Packs, the pack collection, and name-based selections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::record::{CharacterRecord, Library, LibraryItem, LoomCategory, NarrativeFragment};

/// A named container holding one built library plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub name: String,
    pub items: Library,
    /// Empty for documents ingested from a local file.
    pub source_url: String,
}

/// A name-based weak reference into a pack's library. May dangle if the
/// pack or item was removed; lookup then yields nothing, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub pack_name: String,
    pub item_name: String,
}

impl Selection {
    pub fn new(pack_name: impl Into<String>, item_name: impl Into<String>) -> Self {
        Selection {
            pack_name: pack_name.into(),
            item_name: item_name.into(),
        }
    }
}

/// The pack collection, keyed by pack name. Insertion-ordered so that
/// cross-pack iteration (and the seeded random pick built on it) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackSet {
    packs: IndexMap<String, Pack>,
}

impl PackSet {
    pub fn new() -> Self {
        PackSet::default()
    }

    /// Insert a pack, replacing any existing pack of the same name.
    pub fn insert(&mut self, pack: Pack) {
        self.packs.insert(pack.name.clone(), pack);
    }

    pub fn get(&self, name: &str) -> Option<&Pack> {
        self.packs.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Pack> {
        self.packs.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pack> {
        self.packs.values()
    }

    /// Resolve a selection to a library item.
    pub fn find(&self, selection: &Selection) -> Option<&LibraryItem> {
        self.packs
            .get(&selection.pack_name)?
            .items
            .find(&selection.item_name)
    }

    /// Resolve a selection against character records only.
    pub fn find_character(&self, selection: &Selection) -> Option<&CharacterRecord> {
        self.packs
            .get(&selection.pack_name)?
            .items
            .characters()
            .find(|record| record.name == selection.item_name)
    }

    /// Resolve a selection against narrative fragments only. Duplicate
    /// names resolve to the first fragment in library order.
    pub fn find_fragment(&self, selection: &Selection) -> Option<&NarrativeFragment> {
        self.packs
            .get(&selection.pack_name)?
            .items
            .fragments()
            .find(|fragment| fragment.name == selection.item_name)
    }

    /// Every character record across every pack, in pack order.
    pub fn characters(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.packs.values().flat_map(|pack| pack.items.characters())
    }

    /// Total character records across all packs, backing `*.len` macros.
    pub fn character_count(&self) -> usize {
        self.characters().count()
    }

    /// Total fragments of one category across all packs.
    pub fn fragment_count(&self, category: LoomCategory) -> usize {
        self.packs
            .values()
            .flat_map(|pack| pack.items.fragments())
            .filter(|fragment| fragment.category == category)
            .count()
    }
}
