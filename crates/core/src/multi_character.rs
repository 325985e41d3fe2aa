//! Multi-character scene prompt generator.
//!
//! Combines up to five character slots with scene settings into a single
//! prompt, prefixed by a Danbooru-style character count (`1girl`,
//! `2girls, 1boy`, ...). Two input shapes are supported:
//!
//! - pairs of pre-built description plus a type tag chosen from a list
//!   ([`generate_from_pairs`]);
//! - full per-character field groups rendered with the character builder
//!   ([`generate_from_groups`]).

use crate::character::{build_description, CharacterFields};
use crate::prompt::{
    camera_angle_fragment, is_blank, resolve_negative_prompt, PromptParts, DEFAULT_CAMERA_ANGLE,
    DEFAULT_NEGATIVE_PROMPT, DEFAULT_QUALITY_TAGS,
};
use crate::prompt_generator::GeneratedPrompt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of character slots.
pub const MAX_CHARACTERS: usize = 5;

/// Type tags selectable for a character slot.
pub const CHARACTER_TYPES: &[&str] = &[
    "girl",
    "boy",
    "elf",
    "demon",
    "maid",
    "magical girl",
    "nun",
    "witch",
];

/// Default description of the first slot.
pub const DEFAULT_FIRST_DESCRIPTION: &str = "black hair, long hair, straight hair, blue eyes, \
     slim, school uniform, standing, looking at viewer, smiling";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Gender bucket used for the count prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Girl,
    Boy,
    Other,
}

impl Gender {
    /// Exact, case-insensitive match of a type tag against `girl` / `boy`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "girl" => Self::Girl,
            "boy" => Self::Boy,
            _ => Self::Other,
        }
    }

    /// Substring detection on a free-text type; `girl` wins over `boy`.
    pub fn detect(free_text: &str) -> Self {
        let lower = free_text.to_lowercase();
        if lower.contains("girl") {
            Self::Girl
        } else if lower.contains("boy") {
            Self::Boy
        } else {
            Self::Other
        }
    }
}

/// One resolved character for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub description: String,
    pub gender: Gender,
    pub slot: usize,
}

/// Tallies of active characters by gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterCount {
    pub girls: usize,
    pub boys: usize,
    pub others: usize,
}

impl CharacterCount {
    pub fn tally(records: &[CharacterRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            match r.gender {
                Gender::Girl => acc.girls += 1,
                Gender::Boy => acc.boys += 1,
                Gender::Other => acc.others += 1,
            }
            acc
        })
    }
}

/// Scene-level fragments appended after the characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSettings {
    pub camera_angle: String,
    pub composition: String,
    pub location: String,
    pub lighting: String,
    pub time_of_day: String,
    pub scene_description: String,
    pub art_style: String,
    pub quality_tags: String,
    pub negative_prompt: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            camera_angle: DEFAULT_CAMERA_ANGLE.into(),
            composition: String::new(),
            location: "bedroom".into(),
            lighting: "soft lighting".into(),
            time_of_day: "daytime".into(),
            scene_description: String::new(),
            art_style: "anime".into(),
            quality_tags: DEFAULT_QUALITY_TAGS.into(),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.into(),
        }
    }
}

/// A `(description, type tag)` slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSlot {
    pub description: String,
    pub type_tag: String,
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Format girls and boys counts, girls first.
///
/// Returns an empty string when both are zero.
pub fn format_character_count(girls: usize, boys: usize) -> String {
    let mut parts = Vec::with_capacity(2);
    match girls {
        0 => {}
        1 => parts.push("1girl".to_string()),
        n => parts.push(format!("{n}girls")),
    }
    match boys {
        0 => {}
        1 => parts.push("1boy".to_string()),
        n => parts.push(format!("{n}boys")),
    }
    parts.join(", ")
}

/// Count label for free-text types: gendered tags when any character has
/// one, otherwise `"1 character"` / `"{n} characters"`.
pub fn format_generic_count(count: &CharacterCount) -> String {
    if count.girls > 0 || count.boys > 0 {
        return format_character_count(count.girls, count.boys);
    }
    match count.others {
        0 => String::new(),
        1 => "1 character".to_string(),
        n => format!("{n} characters"),
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Collect active (non-blank description) slots from `(description, tag)` pairs.
pub fn records_from_pairs(slots: &[CharacterSlot]) -> Vec<CharacterRecord> {
    slots
        .iter()
        .take(MAX_CHARACTERS)
        .enumerate()
        .filter(|(_, slot)| !is_blank(&slot.description))
        .map(|(slot, c)| CharacterRecord {
            description: c.description.clone(),
            gender: Gender::from_tag(&c.type_tag),
            slot,
        })
        .collect()
}

/// Collect active slots from per-character field groups.
pub fn records_from_groups(groups: &[CharacterFields]) -> Vec<CharacterRecord> {
    groups
        .iter()
        .take(MAX_CHARACTERS)
        .enumerate()
        .filter_map(|(slot, fields)| {
            let description = build_description(fields);
            if description.is_empty() {
                return None;
            }
            Some(CharacterRecord {
                description,
                gender: Gender::detect(&fields.character_type),
                slot,
            })
        })
        .collect()
}

fn assemble(count_prefix: String, records: &[CharacterRecord], scene: &SceneSettings) -> GeneratedPrompt {
    let mut parts = PromptParts::new();
    parts.push(&count_prefix);
    for record in records {
        parts.push(&record.description);
    }

    parts.push_opt(camera_angle_fragment(&scene.camera_angle));
    parts.push(&scene.composition);
    parts.push(&scene.location);
    parts.push(&scene.lighting);
    parts.push(&scene.time_of_day);
    parts.push(&scene.scene_description);
    parts.push(&scene.art_style);
    parts.push(&scene.quality_tags);

    GeneratedPrompt {
        positive: parts.join(),
        negative: resolve_negative_prompt(&scene.negative_prompt),
    }
}

/// Generate a scene prompt from `(description, type tag)` slots.
///
/// Only the exact tags `girl` and `boy` are counted; other tags still emit
/// their description.
pub fn generate_from_pairs(slots: &[CharacterSlot], scene: &SceneSettings) -> GeneratedPrompt {
    let records = records_from_pairs(slots);
    let count = CharacterCount::tally(&records);
    assemble(
        format_character_count(count.girls, count.boys),
        &records,
        scene,
    )
}

/// Generate a scene prompt from per-character field groups.
pub fn generate_from_groups(groups: &[CharacterFields], scene: &SceneSettings) -> GeneratedPrompt {
    let records = records_from_groups(groups);
    let count = CharacterCount::tally(&records);
    assemble(format_generic_count(&count), &records, scene)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(description: &str, type_tag: &str) -> CharacterSlot {
        CharacterSlot {
            description: description.into(),
            type_tag: type_tag.into(),
        }
    }

    fn bare_scene() -> SceneSettings {
        SceneSettings {
            camera_angle: "eye level".into(),
            composition: String::new(),
            location: String::new(),
            lighting: String::new(),
            time_of_day: String::new(),
            scene_description: String::new(),
            art_style: String::new(),
            quality_tags: String::new(),
            negative_prompt: String::new(),
        }
    }

    // --- Count formatting ---

    #[test]
    fn count_formatting_cases() {
        assert_eq!(format_character_count(0, 0), "");
        assert_eq!(format_character_count(1, 0), "1girl");
        assert_eq!(format_character_count(2, 0), "2girls");
        assert_eq!(format_character_count(1, 1), "1girl, 1boy");
        assert_eq!(format_character_count(0, 3), "3boys");
        assert_eq!(format_character_count(2, 2), "2girls, 2boys");
    }

    #[test]
    fn generic_count_without_gender() {
        let one = CharacterCount { girls: 0, boys: 0, others: 1 };
        let three = CharacterCount { girls: 0, boys: 0, others: 3 };
        assert_eq!(format_generic_count(&one), "1 character");
        assert_eq!(format_generic_count(&three), "3 characters");
        assert_eq!(format_generic_count(&CharacterCount::default()), "");
    }

    #[test]
    fn generic_count_prefers_gendered_tags() {
        let mixed = CharacterCount { girls: 1, boys: 0, others: 2 };
        assert_eq!(format_generic_count(&mixed), "1girl");
    }

    // --- Gender ---

    #[test]
    fn tag_match_is_exact_and_case_insensitive() {
        assert_eq!(Gender::from_tag("GIRL"), Gender::Girl);
        assert_eq!(Gender::from_tag(" Boy "), Gender::Boy);
        assert_eq!(Gender::from_tag("magical girl"), Gender::Other);
    }

    #[test]
    fn detection_uses_substrings() {
        assert_eq!(Gender::detect("Elf Girl"), Gender::Girl);
        assert_eq!(Gender::detect("cowboy"), Gender::Boy);
        assert_eq!(Gender::detect("demon"), Gender::Other);
    }

    // --- Pairs ---

    #[test]
    fn pairs_count_and_emit_in_slot_order() {
        let slots = vec![
            slot("red hair", "girl"),
            slot("", "boy"),
            slot("spiky hair", "Boy"),
            slot("wings", "angel"),
            slot("  ", "girl"),
        ];
        let out = generate_from_pairs(&slots, &bare_scene());
        assert_eq!(out.positive, "1girl, 1boy, red hair, spiky hair, wings");
        assert_eq!(out.negative, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn pairs_without_descriptions_emit_no_prefix() {
        let slots = vec![slot("", "girl"), slot(" ", "boy")];
        let out = generate_from_pairs(&slots, &bare_scene());
        assert_eq!(out.positive, "");
    }

    #[test]
    fn pairs_two_girls() {
        let slots = vec![slot("a", "girl"), slot("b", "girl")];
        let out = generate_from_pairs(&slots, &bare_scene());
        assert!(out.positive.starts_with("2girls, a, b"));
    }

    #[test]
    fn scene_fragments_follow_characters() {
        let scene = SceneSettings {
            camera_angle: "overhead".into(),
            composition: "side by side".into(),
            scene_description: "holding hands".into(),
            negative_prompt: "extra arms".into(),
            ..SceneSettings::default()
        };
        let out = generate_from_pairs(&[slot("blonde", "girl")], &scene);
        assert_eq!(
            out.positive,
            "1girl, blonde, overhead view, side by side, bedroom, soft lighting, daytime, \
             holding hands, anime, high quality, masterpiece, detailed"
        );
        assert_eq!(out.negative, "extra arms");
    }

    #[test]
    fn slots_beyond_five_are_ignored() {
        let slots: Vec<_> = (0..7).map(|i| slot(&format!("c{i}"), "girl")).collect();
        let records = records_from_pairs(&slots);
        assert_eq!(records.len(), MAX_CHARACTERS);
        assert_eq!(records[4].slot, 4);
    }

    // --- Field groups ---

    #[test]
    fn groups_render_descriptions_and_detect_gender() {
        let groups = vec![
            CharacterFields {
                character_type: "elf girl".into(),
                hair_color: "silver".into(),
                ..CharacterFields::default()
            },
            CharacterFields::default(),
            CharacterFields {
                character_type: "boy".into(),
                expression: "grinning".into(),
                ..CharacterFields::default()
            },
        ];
        let out = generate_from_groups(&groups, &bare_scene());
        assert_eq!(out.positive, "1girl, 1boy, elf girl, silver hair, boy, grinning");
    }

    #[test]
    fn groups_without_gender_use_generic_label() {
        let groups = vec![
            CharacterFields {
                character_type: "robot".into(),
                ..CharacterFields::default()
            },
            CharacterFields {
                character_type: "demon".into(),
                ..CharacterFields::default()
            },
        ];
        let out = generate_from_groups(&groups, &bare_scene());
        assert_eq!(out.positive, "2 characters, robot, demon");
    }
}
