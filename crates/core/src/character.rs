//! Single-character description builder.
//!
//! Produces the appearance/pose part of a prompt for one character. The
//! output is meant to be fed into the multi-character generator, which adds
//! the character count and scene fragments.

use crate::prompt::{clothing_fragment, eye_fragment, hair_fragment, PromptParts};

/// Per-character appearance and pose fields.
///
/// `Default` yields an all-blank record, which renders to an empty
/// description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFields {
    /// Free-text type, e.g. `"girl"`, `"elf girl"`, `"demon"`.
    pub character_type: String,
    pub hair_color: String,
    pub hair_length: String,
    pub hair_style: String,
    pub eye_color: String,
    pub eye_shape: String,
    pub body_type: String,
    pub body_feature: String,
    pub clothing: String,
    pub clothing_color: String,
    pub accessories: String,
    pub pose: String,
    pub action: String,
    pub expression: String,
    /// Extra tags such as `"blushing"`, emitted last.
    pub special_traits: String,
}

impl CharacterFields {
    /// Field values the character builder node starts from.
    pub fn builder_defaults() -> Self {
        Self {
            character_type: "girl".into(),
            hair_color: "black".into(),
            hair_length: "long".into(),
            hair_style: "straight".into(),
            eye_color: "blue".into(),
            body_type: "slim".into(),
            clothing: "school uniform".into(),
            pose: "standing".into(),
            action: "looking at viewer".into(),
            expression: "smiling".into(),
            ..Self::default()
        }
    }

    /// Push the appearance groups (hair through expression) onto `parts`.
    ///
    /// Shared with the single-character prompt generator, which places its
    /// own fragments around these.
    pub(crate) fn push_appearance(&self, parts: &mut PromptParts) {
        parts.push(&hair_fragment(
            &self.hair_color,
            &self.hair_length,
            &self.hair_style,
        ));
        parts.push(&eye_fragment(&self.eye_color, &self.eye_shape));
        parts.push(&self.body_type);
        parts.push(&self.body_feature);
        parts.push(&clothing_fragment(&self.clothing, &self.clothing_color));
        parts.push(&self.accessories);
        parts.push(&self.pose);
        parts.push(&self.action);
        parts.push(&self.expression);
    }
}

/// Build a comma-joined description for one character.
///
/// Order: type, hair, eyes, body, clothing, accessories, pose, action,
/// expression, special traits.
pub fn build_description(fields: &CharacterFields) -> String {
    let mut parts = PromptParts::new();
    parts.push(&fields.character_type);
    fields.push_appearance(&mut parts);
    parts.push(&fields.special_traits);
    parts.join()
}
