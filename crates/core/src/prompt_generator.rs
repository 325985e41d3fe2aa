//! Structured single-character prompt generator.
//!
//! Combines character, appearance, pose, camera, setting and style fields
//! into one positive prompt in a fixed order, paired with a negative prompt.

use crate::character::CharacterFields;
use crate::prompt::{
    camera_angle_fragment, resolve_negative_prompt, PromptParts, DEFAULT_CAMERA_ANGLE,
    DEFAULT_NEGATIVE_PROMPT, DEFAULT_QUALITY_TAGS,
};

/// Character count tags offered by the generator, default first.
pub const CHARACTER_COUNTS: &[&str] = &[
    "1girl",
    "1boy",
    "2girls",
    "2boys",
    "1girl, 1boy",
    "3girls",
    "3boys",
    "5girls",
    "group",
];

/// All inputs of the prompt generator.
///
/// `character.special_traits` is not emitted; traits belong to the
/// character builder's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub character_count: String,
    pub character: CharacterFields,
    pub camera_angle: String,
    pub composition: String,
    pub location: String,
    pub lighting: String,
    pub time_of_day: String,
    pub background_detail: String,
    pub art_style: String,
    pub quality_tags: String,
    pub negative_prompt: String,
    pub custom_tags: String,
    /// Weighted tokens such as `"(very beautiful:1.5)"`, emitted last.
    pub weight_emphasis: String,
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            character_count: CHARACTER_COUNTS[0].into(),
            character: CharacterFields {
                character_type: String::new(),
                ..CharacterFields::builder_defaults()
            },
            camera_angle: DEFAULT_CAMERA_ANGLE.into(),
            composition: String::new(),
            location: "bedroom".into(),
            lighting: "soft lighting".into(),
            time_of_day: "daytime".into(),
            background_detail: String::new(),
            art_style: "anime".into(),
            quality_tags: DEFAULT_QUALITY_TAGS.into(),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.into(),
            custom_tags: String::new(),
            weight_emphasis: String::new(),
        }
    }
}

/// Positive/negative prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPrompt {
    pub positive: String,
    pub negative: String,
}

/// Assemble the positive prompt and resolve the negative prompt.
pub fn generate(request: &PromptRequest) -> GeneratedPrompt {
    let mut parts = PromptParts::new();

    // Character identity goes first.
    parts.push(&request.character_count);
    parts.push(&request.character.character_type);

    request.character.push_appearance(&mut parts);

    parts.push_opt(camera_angle_fragment(&request.camera_angle));
    parts.push(&request.composition);

    parts.push(&request.location);
    parts.push(&request.background_detail);
    parts.push(&request.lighting);
    parts.push(&request.time_of_day);

    parts.push(&request.art_style);
    parts.push(&request.quality_tags);

    parts.push(&request.custom_tags);
    parts.push(&request.weight_emphasis);

    GeneratedPrompt {
        positive: parts.join(),
        negative: resolve_negative_prompt(&request.negative_prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_ordered_prompt() {
        let out = generate(&PromptRequest::default());
        assert_eq!(
            out.positive,
            "1girl, black hair, long, straight hair, blue eyes, slim, school uniform, \
             standing, looking at viewer, smiling, bedroom, soft lighting, daytime, anime, \
             high quality, masterpiece, detailed"
        );
        assert_eq!(out.negative, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn setting_and_tail_fields_follow_declared_order() {
        let request = PromptRequest {
            character_count: "2girls".into(),
            character: CharacterFields {
                character_type: "maid".into(),
                ..CharacterFields::default()
            },
            camera_angle: "high angle".into(),
            composition: "centered".into(),
            location: "garden".into(),
            background_detail: "roses".into(),
            lighting: "".into(),
            time_of_day: "sunset".into(),
            art_style: "manga".into(),
            quality_tags: "".into(),
            negative_prompt: "".into(),
            custom_tags: "sparkles".into(),
            weight_emphasis: "(cute:1.2)".into(),
        };
        let out = generate(&request);
        assert_eq!(
            out.positive,
            "2girls, maid, high angle view, centered, garden, roses, sunset, manga, \
             sparkles, (cute:1.2)"
        );
        assert_eq!(out.negative, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn eye_level_camera_emits_nothing() {
        let out = generate(&PromptRequest::default());
        assert!(!out.positive.split(", ").any(|f| f.ends_with(" view")));
        assert!(out.positive.contains("looking at viewer"));
    }

    #[test]
    fn special_traits_are_left_to_the_character_builder() {
        let request = PromptRequest {
            character: CharacterFields {
                special_traits: "blushing".into(),
                ..PromptRequest::default().character
            },
            ..PromptRequest::default()
        };
        assert!(!generate(&request).positive.contains("blushing"));
    }

    #[test]
    fn custom_negative_prompt_is_kept() {
        let request = PromptRequest {
            negative_prompt: "bad anatomy".into(),
            ..PromptRequest::default()
        };
        assert_eq!(generate(&request).negative, "bad anatomy");
    }

    #[test]
    fn blank_fields_never_leave_empty_tokens() {
        let request = PromptRequest {
            character: CharacterFields::default(),
            location: " ".into(),
            lighting: "".into(),
            time_of_day: "".into(),
            quality_tags: "  ".into(),
            ..PromptRequest::default()
        };
        let out = generate(&request);
        assert_eq!(out.positive, "1girl, anime");
        assert!(!out.positive.contains(", , "));
    }
}
