//! Registry of every node this package provides.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::NodeError;
use crate::node::{run_node, Node};
use crate::nodes::{
    CharacterBuilderNode, GrayscaleNode, MultiCharacterFieldsNode, MultiCharacterNode,
    PromptBuilderNode, PromptGeneratorNode, SceneGeneratorNode,
};
use crate::value::{NodeInputs, NodeValue};

/// Nodes keyed by their registered name, kept in registration order.
#[derive(Clone, Default)]
pub struct NodeRegistry {
    order: Vec<&'static str>,
    nodes: HashMap<&'static str, Arc<dyn Node>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding all KPU nodes.
    pub fn register_nodes() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GrayscaleNode));
        registry.register(Arc::new(PromptGeneratorNode));
        registry.register(Arc::new(PromptBuilderNode));
        registry.register(Arc::new(CharacterBuilderNode));
        registry.register(Arc::new(MultiCharacterNode));
        registry.register(Arc::new(MultiCharacterFieldsNode));
        registry.register(Arc::new(SceneGeneratorNode));
        registry
    }

    /// Add a node; a node with the same name replaces the earlier one.
    pub fn register(&mut self, node: Arc<dyn Node>) {
        let name = node.name();
        if self.nodes.insert(name, node).is_none() {
            self.order.push(name);
        } else {
            tracing::warn!(node = name, "Replacing previously registered node");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Node>> {
        self.nodes.get(name)
    }

    /// Like [`NodeRegistry::get`], but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<&Arc<dyn Node>, NodeError> {
        self.get(name)
            .ok_or_else(|| NodeError::UnknownNode(name.to_string()))
    }

    /// Registered node names in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    /// Nodes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Node>> {
        self.order.iter().filter_map(|name| self.nodes.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up `name` and run it on `raw` inputs.
    pub fn invoke(&self, name: &str, raw: &NodeInputs) -> Result<Vec<NodeValue>, NodeError> {
        run_node(self.require(name)?.as_ref(), raw)
    }
}
