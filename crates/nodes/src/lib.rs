//! Host-facing node layer for the KPU utilities.
//!
//! Describes each node the way a node-graph host expects: typed input
//! fields (optionally computed from other inputs), ordered named outputs,
//! and one execution function. Domain logic lives in `kpu-core`; the
//! adapters in [`nodes`] only map resolved inputs onto it.

pub mod error;
pub mod node;
pub mod nodes;
pub mod registry;
pub mod schema;
pub mod value;

pub use error::NodeError;
pub use node::{run_node, Node, CATEGORY};
pub use registry::NodeRegistry;
pub use schema::{FieldKind, FieldSpec, InputSchema, OutputKind, OutputSpec};
pub use value::{NodeInputs, NodeValue};
