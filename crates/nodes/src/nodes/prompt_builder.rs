use kpu_core::preset::{build, preset_names};
use kpu_core::prompt::{CAMERA_ANGLES, DEFAULT_CAMERA_ANGLE};

use super::text;
use crate::error::NodeError;
use crate::node::Node;
use crate::schema::{FieldSpec, InputSchema, OutputSpec};
use crate::value::{NodeInputs, NodeValue};

/// Prompt from a named preset plus camera angle and extra tags.
pub struct PromptBuilderNode;

impl Node for PromptBuilderNode {
    fn name(&self) -> &'static str {
        "WailustriousPromptBuilder"
    }

    fn display_name(&self) -> &'static str {
        "Wailustrious Prompt Builder"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(
            vec![
                FieldSpec::choice("preset", &preset_names(), None),
                FieldSpec::choice("camera_angle", CAMERA_ANGLES, Some(DEFAULT_CAMERA_ANGLE)),
                FieldSpec::text("modify", ""),
            ],
            Vec::new(),
        )
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        vec![OutputSpec::string("prompt")]
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        let prompt = build(
            &text(inputs, "preset")?,
            &text(inputs, "camera_angle")?,
            &text(inputs, "modify")?,
        );
        Ok(vec![NodeValue::String(prompt)])
    }
}
