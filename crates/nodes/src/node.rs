//! The node contract shared by every KPU node.

use crate::error::NodeError;
use crate::schema::{InputSchema, OutputSpec};
use crate::value::{NodeInputs, NodeValue};

/// Category every KPU node is listed under.
pub const CATEGORY: &str = "KPU Utils";

/// A host-registered unit with a declared schema and one execution
/// function.
pub trait Node: Send + Sync {
    /// Stable identifier the host registers the node under.
    fn name(&self) -> &'static str;

    /// Human-readable title.
    fn display_name(&self) -> &'static str;

    fn category(&self) -> &'static str {
        CATEGORY
    }

    /// Static input schema.
    fn input_schema(&self) -> InputSchema;

    /// Schema given the resolved values of the static required fields.
    ///
    /// Only nodes whose optional fields depend on another input override
    /// this.
    fn dynamic_input_schema(&self, _required: &NodeInputs) -> InputSchema {
        self.input_schema()
    }

    /// Ordered output slots.
    fn outputs(&self) -> Vec<OutputSpec>;

    /// Run the node on inputs already resolved against its schema.
    ///
    /// The returned values match [`Node::outputs`] one to one.
    fn execute(&self, inputs: &NodeInputs) -> Result<Vec<NodeValue>, NodeError>;
}

/// Resolve `raw` against the node's (possibly dynamic) schema and execute.
pub fn run_node(node: &dyn Node, raw: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
    let static_schema = node.input_schema();
    let required_only = InputSchema::new(static_schema.required, Vec::new());
    let required = NodeInputs::resolve(&required_only, raw)?;

    let schema = node.dynamic_input_schema(&required);
    let inputs = NodeInputs::resolve(&schema, raw)?;

    tracing::debug!(node = node.name(), inputs = inputs.len(), "Executing node");
    let outputs = node.execute(&inputs)?;

    let declared = node.outputs();
    if outputs.len() != declared.len() {
        return Err(NodeError::Schema(format!(
            "Node {} returned {} outputs, declared {}",
            node.name(),
            outputs.len(),
            declared.len()
        )));
    }
    Ok(outputs)
}
