use kpu_core::character::CharacterFields;
use kpu_core::multi_character::{
    generate_from_groups, generate_from_pairs, CharacterSlot, SceneSettings, CHARACTER_TYPES,
    DEFAULT_FIRST_DESCRIPTION, MAX_CHARACTERS,
};
use kpu_core::prompt::{ART_STYLES, CAMERA_ANGLES, DEFAULT_CAMERA_ANGLE};
use kpu_core::prompt_generator::GeneratedPrompt;

use super::character_builder::{character_field_specs, character_fields};
use super::text;
use crate::error::NodeError;
use crate::node::Node;
use crate::schema::{FieldSpec, InputSchema, OutputSpec};
use crate::value::{NodeInputs, NodeValue};

// ---------------------------------------------------------------------------
// Shared scene fields
// ---------------------------------------------------------------------------

fn required_scene_fields() -> Vec<FieldSpec> {
    let defaults = SceneSettings::default();
    vec![
        FieldSpec::text("location", &defaults.location),
        FieldSpec::text("lighting", &defaults.lighting),
        FieldSpec::text("time_of_day", &defaults.time_of_day),
        FieldSpec::choice("camera_angle", CAMERA_ANGLES, Some(DEFAULT_CAMERA_ANGLE)),
        FieldSpec::choice("art_style", ART_STYLES, Some(defaults.art_style.as_str())),
        FieldSpec::text("quality_tags", &defaults.quality_tags),
    ]
}

fn optional_scene_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("composition", ""),
        FieldSpec::multiline("scene_description", ""),
        FieldSpec::multiline("negative_prompt", &SceneSettings::default().negative_prompt),
    ]
}

fn scene_settings(inputs: &NodeInputs) -> Result<SceneSettings, NodeError> {
    Ok(SceneSettings {
        camera_angle: text(inputs, "camera_angle")?,
        composition: text(inputs, "composition")?,
        location: text(inputs, "location")?,
        lighting: text(inputs, "lighting")?,
        time_of_day: text(inputs, "time_of_day")?,
        scene_description: text(inputs, "scene_description")?,
        art_style: text(inputs, "art_style")?,
        quality_tags: text(inputs, "quality_tags")?,
        negative_prompt: text(inputs, "negative_prompt")?,
    })
}

fn prompt_outputs() -> Vec<OutputSpec> {
    vec![
        OutputSpec::string("positive_prompt"),
        OutputSpec::string("negative_prompt"),
    ]
}

fn into_values(prompt: GeneratedPrompt) -> Vec<NodeValue> {
    vec![
        NodeValue::String(prompt.positive),
        NodeValue::String(prompt.negative),
    ]
}

fn slot_prefix(slot: usize) -> String {
    format!("character_{slot}_")
}

// ---------------------------------------------------------------------------
// Description + type tag pairs
// ---------------------------------------------------------------------------

/// Combines pre-built character descriptions into a scene prompt.
pub struct MultiCharacterNode;

impl Node for MultiCharacterNode {
    fn name(&self) -> &'static str {
        "WailustriousMultiCharacterGenerator"
    }

    fn display_name(&self) -> &'static str {
        "Wailustrious Multi-Character Generator"
    }

    fn input_schema(&self) -> InputSchema {
        let mut required = vec![
            FieldSpec::multiline("character_1_desc", DEFAULT_FIRST_DESCRIPTION),
            FieldSpec::choice("character_1_type", CHARACTER_TYPES, Some("girl")),
        ];
        required.extend(required_scene_fields());

        let mut optional_types = vec![""];
        optional_types.extend_from_slice(CHARACTER_TYPES);

        let mut optional = Vec::new();
        for slot in 2..=MAX_CHARACTERS {
            optional.push(FieldSpec::multiline(&format!("character_{slot}_desc"), ""));
            optional.push(FieldSpec::choice(
                &format!("character_{slot}_type"),
                &optional_types,
                Some(""),
            ));
        }
        optional.extend(optional_scene_fields());

        InputSchema::new(required, optional)
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        prompt_outputs()
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        let slots = (1..=MAX_CHARACTERS)
            .map(|slot| {
                Ok(CharacterSlot {
                    description: text(inputs, &format!("character_{slot}_desc"))?,
                    type_tag: text(inputs, &format!("character_{slot}_type"))?,
                })
            })
            .collect::<Result<Vec<_>, NodeError>>()?;
        let scene = scene_settings(inputs)?;
        Ok(into_values(generate_from_pairs(&slots, &scene)))
    }
}

// ---------------------------------------------------------------------------
// Full per-character field groups
// ---------------------------------------------------------------------------

/// Scene prompt from five full character field groups.
pub struct MultiCharacterFieldsNode;

impl Node for MultiCharacterFieldsNode {
    fn name(&self) -> &'static str {
        "WailustriousMultiCharacterFieldsGenerator"
    }

    fn display_name(&self) -> &'static str {
        "Wailustrious Multi-Character Generator (Fields)"
    }

    fn input_schema(&self) -> InputSchema {
        let mut required = character_field_specs(&slot_prefix(1), &CharacterFields::builder_defaults());
        required.extend(required_scene_fields());

        let mut optional = vec![FieldSpec::text("character_1_special_traits", "")];
        for slot in 2..=MAX_CHARACTERS {
            let prefix = slot_prefix(slot);
            optional.extend(character_field_specs(&prefix, &CharacterFields::default()));
            optional.push(FieldSpec::text(&format!("{prefix}special_traits"), ""));
        }
        optional.extend(optional_scene_fields());

        InputSchema::new(required, optional)
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        prompt_outputs()
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        let groups = (1..=MAX_CHARACTERS)
            .map(|slot| character_fields(inputs, &slot_prefix(slot)))
            .collect::<Result<Vec<_>, NodeError>>()?;
        let scene = scene_settings(inputs)?;
        Ok(into_values(generate_from_groups(&groups, &scene)))
    }
}
