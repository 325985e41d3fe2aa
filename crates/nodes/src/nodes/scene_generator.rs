use kpu_core::scene::{
    generate, text_slot_name, validate_slot_count, DEFAULT_TEXT_SLOTS, MAX_TEXT_SLOTS,
    MIN_TEXT_SLOTS,
};

use super::text;
use crate::error::NodeError;
use crate::node::Node;
use crate::schema::{FieldSpec, InputSchema, OutputSpec};
use crate::value::{NodeInputs, NodeValue};

/// Name of the slot-count input.
pub const NUM_TEXTS: &str = "num_texts";

/// Joins a host-chosen number of free-text slots into a scene prompt.
pub struct SceneGeneratorNode;

impl SceneGeneratorNode {
    fn slot_count(inputs: &NodeInputs) -> Result<usize, NodeError> {
        let count = inputs.int(NUM_TEXTS)?;
        Ok(validate_slot_count(count.clamp(MIN_TEXT_SLOTS, MAX_TEXT_SLOTS))?)
    }
}

impl Node for SceneGeneratorNode {
    fn name(&self) -> &'static str {
        "KPUSceneGenerator"
    }

    fn display_name(&self) -> &'static str {
        "KPU Scene Generator"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(
            vec![FieldSpec::int(
                NUM_TEXTS,
                DEFAULT_TEXT_SLOTS,
                MIN_TEXT_SLOTS,
                MAX_TEXT_SLOTS,
            )],
            Vec::new(),
        )
    }

    /// Adds optional `text_1..text_n` slots for `n = num_texts`.
    fn dynamic_input_schema(&self, required: &NodeInputs) -> InputSchema {
        let mut schema = self.input_schema();
        let count = Self::slot_count(required).unwrap_or(0);
        schema.optional = (1..=count)
            .map(|i| FieldSpec::multiline(&text_slot_name(i), ""))
            .collect();
        schema
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        vec![
            OutputSpec::string("positive_prompt"),
            OutputSpec::string("negative_prompt"),
        ]
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        let count = Self::slot_count(inputs)?;
        let texts = (1..=count)
            .map(|i| text(inputs, &text_slot_name(i)))
            .collect::<Result<Vec<_>, NodeError>>()?;
        let (positive, negative) = generate(&texts);
        Ok(vec![NodeValue::String(positive), NodeValue::String(negative)])
    }
}
