use kpu_core::grayscale::{to_grayscale, GrayscaleOutcome};

use crate::error::NodeError;
use crate::node::Node;
use crate::schema::{FieldSpec, InputSchema, OutputSpec};
use crate::value::{NodeInputs, NodeValue};

/// Converts an image to single-channel grayscale.
pub struct GrayscaleNode;

impl Node for GrayscaleNode {
    fn name(&self) -> &'static str {
        "KPUExampleNode"
    }

    fn display_name(&self) -> &'static str {
        "KPU Grayscale"
    }

    fn input_schema(&self) -> InputSchema {
        InputSchema::new(vec![FieldSpec::image("image")], Vec::new())
    }

    fn outputs(&self) -> Vec<OutputSpec> {
        vec![OutputSpec::image("IMAGE")]
    }

    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        let image = inputs.image("image")?.clone();
        let outcome = to_grayscale(image);
        let status = match &outcome {
            GrayscaleOutcome::Converted(_) => "converted",
            GrayscaleOutcome::AlreadyGray(_) => "already_gray",
            GrayscaleOutcome::Recovered { .. } => "passed_through",
        };
        tracing::debug!(node = self.name(), status, "Grayscale finished");
        Ok(vec![NodeValue::Image(outcome.into_image())])
    }
}
