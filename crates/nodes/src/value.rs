//! Typed values passed into and out of nodes.

use std::collections::BTreeMap;

use kpu_core::grayscale::ImageBuffer;

use crate::error::NodeError;
use crate::schema::{FieldKind, InputSchema};

/// A single input or output value.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    String(String),
    Int(i64),
    Image(ImageBuffer),
}

impl NodeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "STRING",
            Self::Int(_) => "INT",
            Self::Image(_) => "IMAGE",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<ImageBuffer> for NodeValue {
    fn from(value: ImageBuffer) -> Self {
        Self::Image(value)
    }
}

/// Named input values for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: BTreeMap<String, NodeValue>,
}

impl NodeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<NodeValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<NodeValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&NodeValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve raw host values against `schema`.
    ///
    /// - present values must match the field type; integers are clamped to
    ///   the declared bounds;
    /// - absent fields take their declared default;
    /// - a required field with no value and no default is an error;
    /// - values for fields the schema does not declare are kept as given.
    pub fn resolve(schema: &InputSchema, raw: &NodeInputs) -> Result<Self, NodeError> {
        let mut resolved = raw.clone();

        let groups = [(&schema.required, true), (&schema.optional, false)];
        for (fields, required) in groups {
            for field in fields {
                match raw.get(&field.name) {
                    Some(value) => {
                        let value = check_value(&field.name, &field.kind, value)?;
                        resolved.values.insert(field.name.clone(), value);
                    }
                    None => match default_value(&field.kind) {
                        Some(value) => {
                            resolved.values.insert(field.name.clone(), value);
                        }
                        None if required => {
                            return Err(NodeError::MissingInput(field.name.clone()))
                        }
                        None => {}
                    },
                }
            }
        }

        Ok(resolved)
    }

    /* ---------------------------- typed getters --------------------------- */

    pub fn string(&self, name: &str) -> Result<&str, NodeError> {
        match self.get(name) {
            Some(NodeValue::String(s)) => Ok(s),
            Some(other) => Err(mismatch(name, "STRING", other)),
            None => Err(NodeError::MissingInput(name.to_string())),
        }
    }

    /// String value, or `""` when absent.
    pub fn string_or_empty(&self, name: &str) -> Result<&str, NodeError> {
        match self.get(name) {
            None => Ok(""),
            Some(_) => self.string(name),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64, NodeError> {
        match self.get(name) {
            Some(NodeValue::Int(n)) => Ok(*n),
            Some(other) => Err(mismatch(name, "INT", other)),
            None => Err(NodeError::MissingInput(name.to_string())),
        }
    }

    pub fn image(&self, name: &str) -> Result<&ImageBuffer, NodeError> {
        match self.get(name) {
            Some(NodeValue::Image(image)) => Ok(image),
            Some(other) => Err(mismatch(name, "IMAGE", other)),
            None => Err(NodeError::MissingInput(name.to_string())),
        }
    }
}

fn mismatch(field: &str, expected: &'static str, actual: &NodeValue) -> NodeError {
    NodeError::TypeMismatch {
        field: field.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

fn check_value(name: &str, kind: &FieldKind, value: &NodeValue) -> Result<NodeValue, NodeError> {
    match (kind, value) {
        (FieldKind::String { .. }, NodeValue::String(_))
        | (FieldKind::Choice { .. }, NodeValue::String(_))
        | (FieldKind::Image, NodeValue::Image(_)) => Ok(value.clone()),
        (FieldKind::Int { min, max, .. }, NodeValue::Int(n)) => {
            let clamped = (*n).clamp(*min, *max);
            if clamped != *n {
                tracing::debug!(field = name, value = n, clamped, "Integer input clamped to bounds");
            }
            Ok(NodeValue::Int(clamped))
        }
        (kind, other) => Err(mismatch(name, kind.type_name(), other)),
    }
}

fn default_value(kind: &FieldKind) -> Option<NodeValue> {
    match kind {
        FieldKind::String { default, .. } => default.clone().map(NodeValue::String),
        FieldKind::Int { default, .. } => Some(NodeValue::Int(*default)),
        FieldKind::Choice { options, default } => default
            .clone()
            .or_else(|| options.first().cloned())
            .map(NodeValue::String),
        FieldKind::Image => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use assert_matches::assert_matches;

    fn schema() -> InputSchema {
        InputSchema::new(
            vec![
                FieldSpec::int("count", 1, 0, 3),
                FieldSpec::choice("style", &["anime", "manga"], None),
            ],
            vec![FieldSpec::text("tags", "")],
        )
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let resolved = NodeInputs::resolve(&schema(), &NodeInputs::new()).unwrap();
        assert_eq!(resolved.int("count").unwrap(), 1);
        assert_eq!(resolved.string("style").unwrap(), "anime");
        assert_eq!(resolved.string("tags").unwrap(), "");
    }

    #[test]
    fn integers_are_clamped() {
        let raw = NodeInputs::new().with("count", 9i64);
        let resolved = NodeInputs::resolve(&schema(), &raw).unwrap();
        assert_eq!(resolved.int("count").unwrap(), 3);

        let raw = NodeInputs::new().with("count", -4i64);
        let resolved = NodeInputs::resolve(&schema(), &raw).unwrap();
        assert_eq!(resolved.int("count").unwrap(), 0);
    }

    #[test]
    fn type_mismatch_is_reported() {
        let raw = NodeInputs::new().with("count", "three");
        let err = NodeInputs::resolve(&schema(), &raw).unwrap_err();
        assert_matches!(err, NodeError::TypeMismatch { expected: "INT", actual: "STRING", .. });
    }

    #[test]
    fn required_image_without_value_is_missing() {
        let schema = InputSchema::new(vec![FieldSpec::image("image")], vec![]);
        let err = NodeInputs::resolve(&schema, &NodeInputs::new()).unwrap_err();
        assert_matches!(err, NodeError::MissingInput(ref name) if name == "image");
    }

    #[test]
    fn undeclared_values_are_kept() {
        let raw = NodeInputs::new().with("extra", "x");
        let resolved = NodeInputs::resolve(&schema(), &raw).unwrap();
        assert_eq!(resolved.string("extra").unwrap(), "x");
    }

    #[test]
    fn string_or_empty_handles_absent_field() {
        let inputs = NodeInputs::new();
        assert_eq!(inputs.string_or_empty("missing").unwrap(), "");
    }
}
