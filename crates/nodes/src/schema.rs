//! Input and output descriptors declared to the host.
//!
//! [`InputSchema::to_host_json`] renders the ComfyUI-style shape
//! `{"required": {"name": ["STRING", {"default": ""}]}, "optional": {...}}`.

use serde::Serialize;
use serde_json::{json, Map, Value};

/* --------------------------------------------------------------------------
   Input fields
   -------------------------------------------------------------------------- */

/// Type and constraints of one input field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text. `None` default means the host must supply a value.
    String {
        default: Option<String>,
        multiline: bool,
    },
    /// Bounded integer.
    Int { default: i64, min: i64, max: i64 },
    /// One string out of a fixed list. Without an explicit default the first
    /// option is used.
    Choice {
        options: Vec<String>,
        default: Option<String>,
    },
    /// Image buffer; never has a default.
    Image,
}

impl FieldKind {
    /// Host type tag (`STRING`, `INT`, `COMBO`, `IMAGE`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String { .. } => "STRING",
            Self::Int { .. } => "INT",
            Self::Choice { .. } => "COMBO",
            Self::Image => "IMAGE",
        }
    }
}

/// A named input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::String {
                default: Some(default.to_string()),
                multiline: false,
            },
        }
    }

    pub fn multiline(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::String {
                default: Some(default.to_string()),
                multiline: true,
            },
        }
    }

    pub fn int(name: &str, default: i64, min: i64, max: i64) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Int { default, min, max },
        }
    }

    pub fn choice(name: &str, options: &[&str], default: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
                default: default.map(str::to_string),
            },
        }
    }

    pub fn image(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::Image,
        }
    }

    fn to_host_json(&self) -> Value {
        match &self.kind {
            FieldKind::String { default, multiline } => {
                let mut opts = Map::new();
                if let Some(default) = default {
                    opts.insert("default".into(), json!(default));
                }
                if *multiline {
                    opts.insert("multiline".into(), json!(true));
                }
                json!(["STRING", opts])
            }
            FieldKind::Int { default, min, max } => {
                json!(["INT", {"default": default, "min": min, "max": max}])
            }
            FieldKind::Choice { options, default } => match default {
                Some(default) => json!([options, {"default": default}]),
                None => json!([options]),
            },
            FieldKind::Image => json!(["IMAGE"]),
        }
    }
}

/// Required and optional input fields of a node, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    pub required: Vec<FieldSpec>,
    pub optional: Vec<FieldSpec>,
}

impl InputSchema {
    pub fn new(required: Vec<FieldSpec>, optional: Vec<FieldSpec>) -> Self {
        Self { required, optional }
    }

    /// Find a field by name in either group.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .find(|f| f.name == name)
    }

    /// Field names in declaration order, required first.
    pub fn field_names(&self) -> Vec<&str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Render in the host's `INPUT_TYPES` JSON shape.
    pub fn to_host_json(&self) -> Value {
        let group = |fields: &[FieldSpec]| {
            fields
                .iter()
                .map(|f| (f.name.clone(), f.to_host_json()))
                .collect::<Map<String, Value>>()
        };
        json!({
            "required": group(&self.required),
            "optional": group(&self.optional),
        })
    }
}

/* --------------------------------------------------------------------------
   Outputs
   -------------------------------------------------------------------------- */

/// Output value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputKind {
    String,
    Image,
}

/// A named output slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub name: &'static str,
    pub kind: OutputKind,
}

impl OutputSpec {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: OutputKind::String,
        }
    }

    pub const fn image(name: &'static str) -> Self {
        Self {
            name,
            kind: OutputKind::Image,
        }
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_json_matches_expected_shape() {
        let schema = InputSchema::new(
            vec![
                FieldSpec::image("image"),
                FieldSpec::int("count", 1, 0, 3),
                FieldSpec::choice("style", &["anime", "manga"], Some("anime")),
            ],
            vec![FieldSpec::text("tags", "")],
        );
        let rendered = schema.to_host_json();
        assert_eq!(rendered["required"]["image"], json!(["IMAGE"]));
        assert_eq!(
            rendered["required"]["count"],
            json!(["INT", {"default": 1, "min": 0, "max": 3}])
        );
        assert_eq!(
            rendered["required"]["style"],
            json!([["anime", "manga"], {"default": "anime"}])
        );
        assert_eq!(rendered["optional"]["tags"], json!(["STRING", {"default": ""}]));
    }

    #[test]
    fn host_json_keeps_declaration_order() {
        let schema = InputSchema::new(
            vec![FieldSpec::text("zeta", ""), FieldSpec::text("alpha", "")],
            vec![],
        );
        let rendered = schema.to_host_json();
        let keys: Vec<_> = rendered["required"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn choice_without_default_has_no_options_object() {
        let field = FieldSpec::choice("preset", &["a", "b"], None);
        assert_eq!(field.to_host_json(), json!([["a", "b"]]));
    }

    #[test]
    fn field_lookup_spans_both_groups() {
        let schema = InputSchema::new(
            vec![FieldSpec::text("a", "")],
            vec![FieldSpec::multiline("b", "")],
        );
        assert!(schema.field("b").is_some());
        assert!(schema.field("c").is_none());
        assert_eq!(schema.field_names(), vec!["a", "b"]);
        assert_eq!(schema.field("a").unwrap().kind.type_name(), "STRING");
    }
}
