/// Selection resolution — name-based pointers to final text.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::annotate::append_dominant_tag;
use crate::core::expand::{expand_macros, RandomPickCache};
use crate::schema::pack::{PackSet, Selection};
use crate::schema::record::CharacterRecord;

/// Resolves selections against a pack set, expanding macros through an
/// injected random-pick cache. Resolution is infallible: dangling
/// pointers and unset fields degrade to omission, never to an error.
pub struct Resolver<'a> {
    packs: &'a PackSet,
    cache: &'a mut RandomPickCache,
    rng: StdRng,
}

impl<'a> Resolver<'a> {
    pub fn new(packs: &'a PackSet, cache: &'a mut RandomPickCache) -> Self {
        Resolver {
            packs,
            cache,
            rng: StdRng::from_entropy(),
        }
    }

    /// Resolver with a fixed seed, for deterministic output.
    pub fn with_seed(packs: &'a PackSet, cache: &'a mut RandomPickCache, seed: u64) -> Self {
        Resolver {
            packs,
            cache,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resolve a single definition pointer to macro-expanded text.
    /// Empty when the record or its definition field is absent.
    pub fn definition(&mut self, selection: &Selection) -> String {
        let text = self
            .packs
            .find_character(selection)
            .and_then(|record| record.physical_definition.clone())
            .unwrap_or_default();
        self.expand(&text)
    }

    /// Resolve an ordered list of behavior pointers, joined with single
    /// newlines. The piece matching `dominant` is annotated with `marker`
    /// after macro expansion.
    pub fn behavior(
        &mut self,
        selections: &[Selection],
        dominant: Option<&Selection>,
        marker: &str,
    ) -> String {
        self.character_fields(selections, dominant, marker, |r| r.behavior.as_deref(), "\n")
    }

    /// Resolve an ordered list of personality pointers, joined with blank
    /// lines. Dominant annotation as for [`Resolver::behavior`].
    pub fn personality(
        &mut self,
        selections: &[Selection],
        dominant: Option<&Selection>,
        marker: &str,
    ) -> String {
        self.character_fields(
            selections,
            dominant,
            marker,
            |r| r.personality.as_deref(),
            "\n\n",
        )
    }

    /// Resolve loom-style pointers to fragment content, joined with blank
    /// lines. Missing fragments are omitted.
    pub fn loom(&mut self, selections: &[Selection]) -> String {
        let mut pieces = Vec::new();
        for selection in selections {
            let Some(content) = self
                .packs
                .find_fragment(selection)
                .map(|fragment| fragment.content.clone())
            else {
                continue;
            };
            pieces.push(self.expand(&content));
        }
        pieces.join("\n\n").trim().to_string()
    }

    fn character_fields(
        &mut self,
        selections: &[Selection],
        dominant: Option<&Selection>,
        marker: &str,
        field: impl Fn(&CharacterRecord) -> Option<&str>,
        separator: &str,
    ) -> String {
        let mut pieces = Vec::new();
        for selection in selections {
            let Some(text) = self
                .packs
                .find_character(selection)
                .and_then(|record| field(record).map(str::to_string))
            else {
                continue;
            };
            if text.is_empty() {
                continue;
            }

            let mut piece = self.expand(&text);
            if dominant == Some(selection) {
                piece = append_dominant_tag(&piece, marker);
            }
            pieces.push(piece);
        }
        pieces.join(separator).trim().to_string()
    }

    fn expand(&mut self, text: &str) -> String {
        expand_macros(text, self.cache, self.packs, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::pack::Pack;
    use crate::schema::record::{Library, LibraryItem, LoomCategory, NarrativeFragment};

    fn sample_packs() -> PackSet {
        let mut packs = PackSet::new();
        packs.insert(Pack {
            name: "base".to_string(),
            items: Library::new(vec![
                LibraryItem::Character(CharacterRecord {
                    physical_definition: Some("A tall figure.".to_string()),
                    behavior: Some("Calm.".to_string()),
                    personality: Some("Warm.".to_string()),
                    ..CharacterRecord::blank("Aria")
                }),
                LibraryItem::Character(CharacterRecord {
                    behavior: Some("Restless.".to_string()),
                    ..CharacterRecord::blank("Zed")
                }),
                LibraryItem::Fragment(NarrativeFragment {
                    name: "Noir".to_string(),
                    category: LoomCategory::NarrativeStyle,
                    content: "Short sentences.".to_string(),
                }),
            ]),
            source_url: String::new(),
        });
        packs
    }

    #[test]
    fn definition_resolves_field() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        assert_eq!(
            resolver.definition(&Selection::new("base", "Aria")),
            "A tall figure."
        );
    }

    #[test]
    fn definition_dangling_pointer_is_empty() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        assert_eq!(resolver.definition(&Selection::new("base", "Gone")), "");
        assert_eq!(resolver.definition(&Selection::new("gone", "Aria")), "");
    }

    #[test]
    fn behavior_joins_with_single_newline() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        let out = resolver.behavior(
            &[Selection::new("base", "Aria"), Selection::new("base", "Zed")],
            None,
            "",
        );
        assert_eq!(out, "Calm.\nRestless.");
    }

    #[test]
    fn missing_fields_are_omitted() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        // Zed has no personality; only Aria's text survives the join.
        let out = resolver.personality(
            &[Selection::new("base", "Zed"), Selection::new("base", "Aria")],
            None,
            "",
        );
        assert_eq!(out, "Warm.");
    }

    #[test]
    fn dominant_piece_annotated_after_join() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        let selections = [Selection::new("base", "Aria"), Selection::new("base", "Zed")];
        let out = resolver.behavior(&selections, Some(&selections[1]), "(Dominant)");
        assert_eq!(out, "Calm.\nRestless. (Dominant)");
    }

    #[test]
    fn dominant_pointer_outside_list_is_noop() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        let selections = [Selection::new("base", "Aria")];
        let stranger = Selection::new("base", "Zed");
        let out = resolver.behavior(&selections, Some(&stranger), "(Dominant)");
        assert_eq!(out, "Calm.");
    }

    #[test]
    fn loom_joins_with_blank_line_and_skips_missing() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        let out = resolver.loom(&[
            Selection::new("base", "Noir"),
            Selection::new("base", "Missing"),
            Selection::new("base", "Noir"),
        ]);
        assert_eq!(out, "Short sentences.\n\nShort sentences.");
    }

    #[test]
    fn empty_selection_lists_resolve_empty() {
        let packs = sample_packs();
        let mut cache = RandomPickCache::new();
        let mut resolver = Resolver::with_seed(&packs, &mut cache, 0);
        assert_eq!(resolver.behavior(&[], None, ""), "");
        assert_eq!(resolver.loom(&[]), "");
    }
}
