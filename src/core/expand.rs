/// Random-pick macro expansion — bounded fixed-point text rewriting.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::schema::pack::PackSet;
use crate::schema::record::CharacterRecord;

/// Which field of the cached record a macro form expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MacroField {
    Name,
    Personality,
    Behavior,
    Physical,
}

/// Recognized macro forms, most specific first. The bare form's text is
/// a strict prefix of every suffixed form, so it must be replaced last
/// or it corrupts the suffixed occurrences.
const MACRO_RULES: &[(&str, MacroField)] = &[
    ("{{randomLumia.name}}", MacroField::Name),
    ("{{randomLumia.pers}}", MacroField::Personality),
    ("{{randomLumia.behav}}", MacroField::Behavior),
    ("{{randomLumia.phys}}", MacroField::Physical),
    ("{{randomLumia}}", MacroField::Physical),
];

/// Shared prefix of every macro form, used for the fast path.
const MACRO_PREFIX: &str = "{{randomLumia";

/// Iteration cap for content that re-introduces macro text. The cached
/// record is static within a pass, so real content converges in one or
/// two iterations; the cap only guards adversarial input.
const MAX_EXPANSION_PASSES: usize = 10;

/// Session cache holding the one randomly chosen character record that
/// backs the `randomLumia` macro family. Populated lazily, cleared only
/// by the surrounding session lifecycle via [`RandomPickCache::reset`].
#[derive(Debug, Clone, Default)]
pub struct RandomPickCache {
    record: Option<CharacterRecord>,
}

impl RandomPickCache {
    pub fn new() -> Self {
        RandomPickCache::default()
    }

    /// Clear the cached pick; the next expansion re-rolls.
    pub fn reset(&mut self) {
        self.record = None;
    }

    /// The cached record, choosing one uniformly over every character in
    /// every pack on first use. `None` when no characters exist anywhere.
    pub fn ensure<R: Rng>(&mut self, packs: &PackSet, rng: &mut R) -> Option<&CharacterRecord> {
        if self.record.is_none() {
            let pool: Vec<&CharacterRecord> = packs.characters().collect();
            self.record = pool.choose(rng).copied().cloned();
        }
        self.record.as_ref()
    }
}

/// Expand every `randomLumia` macro form in `content` against the cached
/// random record. Content without macro text is returned unchanged; with
/// no characters available anywhere, macros are deliberately left visible
/// so broken configuration shows up as placeholder text.
pub fn expand_macros<R: Rng>(
    content: &str,
    cache: &mut RandomPickCache,
    packs: &PackSet,
    rng: &mut R,
) -> String {
    if !content.contains(MACRO_PREFIX) {
        return content.to_string();
    }
    let Some(record) = cache.ensure(packs, rng) else {
        log::debug!("no character records available for random pick");
        return content.to_string();
    };

    let mut output = content.to_string();
    for _ in 0..MAX_EXPANSION_PASSES {
        let before = output.clone();
        for (pattern, field) in MACRO_RULES {
            if output.contains(pattern) {
                output = output.replace(pattern, field_text(record, *field));
            }
        }
        if output == before {
            break;
        }
    }
    output
}

fn field_text(record: &CharacterRecord, field: MacroField) -> &str {
    match field {
        MacroField::Name => &record.name,
        MacroField::Personality => record.personality.as_deref().unwrap_or(""),
        MacroField::Behavior => record.behavior.as_deref().unwrap_or(""),
        MacroField::Physical => record.physical_definition.as_deref().unwrap_or(""),
    }
}
