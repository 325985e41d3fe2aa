//! Harness subcommands: list nodes, print schemas, run a node.

use std::path::Path;

use kpu_nodes::{NodeInputs, NodeRegistry};
use serde_json::{json, Value};

use crate::config::CliConfig;
use crate::convert::{inputs_from_json, outputs_to_json};

/// Summary of every registered node.
pub fn list(registry: &NodeRegistry) -> Value {
    let nodes: Vec<Value> = registry
        .iter()
        .map(|node| {
            json!({
                "name": node.name(),
                "display_name": node.display_name(),
                "category": node.category(),
                "outputs": node.outputs(),
            })
        })
        .collect();
    Value::Array(nodes)
}

/// Host schema of `node`, computed from `inputs` when given.
pub fn schema(
    registry: &NodeRegistry,
    node: &str,
    inputs: Option<&Value>,
    base_dir: &Path,
) -> anyhow::Result<Value> {
    let node = registry.require(node)?;
    let schema = match inputs {
        Some(raw) => {
            let raw = inputs_from_json(raw, base_dir)?;
            let required_only = kpu_nodes::InputSchema::new(node.input_schema().required, Vec::new());
            let required = NodeInputs::resolve(&required_only, &raw)?;
            node.dynamic_input_schema(&required)
        }
        None => node.input_schema(),
    };
    Ok(json!({
        "name": node.name(),
        "category": node.category(),
        "input": schema.to_host_json(),
        "output": node.outputs(),
    }))
}

/// Run `node` on JSON `inputs` and render its outputs.
pub fn run(
    registry: &NodeRegistry,
    config: &CliConfig,
    node: &str,
    inputs: &Value,
    base_dir: &Path,
) -> anyhow::Result<Value> {
    let raw = inputs_from_json(inputs, base_dir)?;
    let values = registry.invoke(node, &raw)?;
    let specs = registry.require(node)?.outputs();
    tracing::info!(node, outputs = values.len(), "Node finished");
    outputs_to_json(node, &specs, values, &config.output_dir)
}
