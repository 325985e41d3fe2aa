use kpu_core::prompt::{ART_STYLES, CAMERA_ANGLES, DEFAULT_CAMERA_ANGLE};
use kpu_core::prompt_generator::{generate, PromptRequest, CHARACTER_COUNTS};

use super::character_builder::{character_field_specs, character_fields};
use super::text;
use crate::error::NodeError;
use crate::node::Node;
use crate::schema::{FieldSpec, InputSchema, OutputSpec};
use crate::value::{NodeInputs, NodeValue};

/// Structured single-character prompt generator.
pub struct PromptGeneratorNode;

impl Node for PromptGeneratorNode {
    fn name(&self) -> &'static str {
        "WailustriousPromptGenerator"
    }

    fn display_name(&self) -> &'static str {
        "Wailustrious Prompt Generator"
    }

    fn input_schema(&self) -> InputSchema {
        let defaults = PromptRequest::default();

        let mut required = vec![FieldSpec::choice("character_count", CHARACTER_COUNTS, None)];
        required.extend(character_field_specs("", &defaults.character));
        required.extend([
            FieldSpec::choice("camera_angle", CAMERA_ANGLES, Some(DEFAULT_CAMERA_ANGLE)),
            FieldSpec::text("composition", &defaults.composition),
            FieldSpec::text("location", &defaults.location),
            FieldSpec::text("lighting", &defaults.lighting),
            FieldSpec::text("time_of_day", &defaults.time_of_day),
            FieldSpec::text("background_detail", &defaults.background_detail),
            FieldSpec::choice("art_style", ART_STYLES, Some(defaults.art_style.as_str())),
            FieldSpec::text("quality_tags", &defaults.quality_tags),
        ]);

        let optional = vec![
            FieldSpec::multiline("negative_prompt", &defaults.negative_prompt),
            FieldSpec::text("custom_tags", ""),
            FieldSpec::text("weight_emphasis", ""),
        ];

        InputSchema::new(required, optional)
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        vec![
            OutputSpec::string("positive_prompt"),
            OutputSpec::string("negative_prompt"),
        ]
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        let request = PromptRequest {
            character_count: text(inputs, "character_count")?,
            character: character_fields(inputs, "")?,
            camera_angle: text(inputs, "camera_angle")?,
            composition: text(inputs, "composition")?,
            location: text(inputs, "location")?,
            lighting: text(inputs, "lighting")?,
            time_of_day: text(inputs, "time_of_day")?,
            background_detail: text(inputs, "background_detail")?,
            art_style: text(inputs, "art_style")?,
            quality_tags: text(inputs, "quality_tags")?,
            negative_prompt: text(inputs, "negative_prompt")?,
            custom_tags: text(inputs, "custom_tags")?,
            weight_emphasis: text(inputs, "weight_emphasis")?,
        };
        let prompt = generate(&request);
        Ok(vec![
            NodeValue::String(prompt.positive),
            NodeValue::String(prompt.negative),
        ])
    }
}
