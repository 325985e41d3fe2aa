use kpu_core::character::{build_description, CharacterFields};
use kpu_core::prompt::HAIR_LENGTHS;

use super::text;
use crate::error::NodeError;
use crate::node::Node;
use crate::schema::{FieldSpec, InputSchema, OutputSpec};
use crate::value::{NodeInputs, NodeValue};

/// Builds one character description for the multi-character generator.
pub struct CharacterBuilderNode;

/// Appearance and pose fields for one character, named `{prefix}{field}`.
///
/// `special_traits` is not included; callers decide where it goes.
pub(crate) fn character_field_specs(prefix: &str, defaults: &CharacterFields) -> Vec<FieldSpec> {
    let name = |field: &str| format!("{prefix}{field}");
    // Blank-by-default slots need a blank choice.
    let mut hair_lengths = Vec::with_capacity(HAIR_LENGTHS.len() + 1);
    if defaults.hair_length.is_empty() {
        hair_lengths.push("");
    }
    hair_lengths.extend_from_slice(HAIR_LENGTHS);
    vec![
        FieldSpec::text(&name("character_type"), &defaults.character_type),
        FieldSpec::text(&name("hair_color"), &defaults.hair_color),
        FieldSpec::choice(&name("hair_length"), &hair_lengths, Some(defaults.hair_length.as_str())),
        FieldSpec::text(&name("hair_style"), &defaults.hair_style),
        FieldSpec::text(&name("eye_color"), &defaults.eye_color),
        FieldSpec::text(&name("eye_shape"), &defaults.eye_shape),
        FieldSpec::text(&name("body_type"), &defaults.body_type),
        FieldSpec::text(&name("body_feature"), &defaults.body_feature),
        FieldSpec::text(&name("clothing"), &defaults.clothing),
        FieldSpec::text(&name("clothing_color"), &defaults.clothing_color),
        FieldSpec::text(&name("accessories"), &defaults.accessories),
        FieldSpec::text(&name("pose"), &defaults.pose),
        FieldSpec::text(&name("action"), &defaults.action),
        FieldSpec::text(&name("expression"), &defaults.expression),
    ]
}

/// Read a [`CharacterFields`] record from inputs named `{prefix}{field}`.
pub(crate) fn character_fields(inputs: &NodeInputs, prefix: &str) -> Result<CharacterFields, NodeError> {
    let get = |field: &str| text(inputs, &format!("{prefix}{field}"));
    Ok(CharacterFields {
        character_type: get("character_type")?,
        hair_color: get("hair_color")?,
        hair_length: get("hair_length")?,
        hair_style: get("hair_style")?,
        eye_color: get("eye_color")?,
        eye_shape: get("eye_shape")?,
        body_type: get("body_type")?,
        body_feature: get("body_feature")?,
        clothing: get("clothing")?,
        clothing_color: get("clothing_color")?,
        accessories: get("accessories")?,
        pose: get("pose")?,
        action: get("action")?,
        expression: get("expression")?,
        special_traits: get("special_traits")?,
    })
}

impl Node for CharacterBuilderNode {
    fn name(&self) -> &'static str {
        "WailustriousCharacterBuilder"
    }

    fn display_name(&self) -> &'static str {
        "Wailustrious Character Builder"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(
            character_field_specs("", &CharacterFields::builder_defaults()),
            vec![FieldSpec::text("special_traits", "")],
        )
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        vec![OutputSpec::string("character_description")]
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        let fields = character_fields(inputs, "")?;
        Ok(vec![NodeValue::String(build_description(&fields))])
    }
}
