//! JSON <-> node value conversion for the harness.
//!
//! Inputs are a JSON object mapping field names to values:
//!
//! - strings and integers map to `STRING` / `INT`;
//! - `{"path": "in.png"}` loads a native image from disk;
//! - nested numeric lists are passed as raw image buffers and coerced by
//!   the grayscale converter.
//!
//! Image outputs are written as PNG files (native images) or rendered as
//! `{"dtype", "shape", "data"}` objects (sample arrays).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use kpu_core::grayscale::{ImageBuffer, SampleArray};
use kpu_nodes::{NodeInputs, NodeValue, OutputSpec};
use serde_json::{json, Value};

/// Parse a `--inputs` argument: inline JSON, or `@path` to a JSON file.
pub fn read_inputs_arg(arg: &str) -> anyhow::Result<Value> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read inputs file {path}"))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text).context("Inputs are not valid JSON")
}

/// Convert a JSON object into node inputs.
///
/// Relative image paths are resolved against `base_dir`.
pub fn inputs_from_json(value: &Value, base_dir: &Path) -> anyhow::Result<NodeInputs> {
    let Some(object) = value.as_object() else {
        bail!("Inputs must be a JSON object");
    };

    let mut inputs = NodeInputs::new();
    for (name, raw) in object {
        let value = value_from_json(raw, base_dir)
            .with_context(|| format!("Invalid value for input '{name}'"))?;
        inputs.insert(name, value);
    }
    Ok(inputs)
}

fn value_from_json(raw: &Value, base_dir: &Path) -> anyhow::Result<NodeValue> {
    match raw {
        Value::String(s) => Ok(NodeValue::String(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(NodeValue::Int(i)),
            None => bail!("Only integer numbers are accepted, got {n}"),
        },
        Value::Array(_) => Ok(NodeValue::Image(ImageBuffer::Raw(raw.clone()))),
        Value::Object(map) => match map.get("path").and_then(Value::as_str) {
            Some(path) => {
                let path = resolve_path(base_dir, path);
                let image = image::open(&path)
                    .with_context(|| format!("Failed to load image {}", path.display()))?;
                Ok(NodeValue::Image(ImageBuffer::Native(image)))
            }
            None => bail!("Image objects must have a string \"path\""),
        },
        Value::Bool(_) | Value::Null => bail!("Unsupported input value {raw}"),
    }
}

fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Convert node outputs into a JSON object keyed by output name.
///
/// Native images are saved as `{node}_{output}.png` under `output_dir`.
pub fn outputs_to_json(
    node: &str,
    specs: &[OutputSpec],
    values: Vec<NodeValue>,
    output_dir: &Path,
) -> anyhow::Result<Value> {
    let mut object = serde_json::Map::new();
    for (spec, value) in specs.iter().zip(values) {
        let rendered = match value {
            NodeValue::String(s) => Value::String(s),
            NodeValue::Int(n) => json!(n),
            NodeValue::Image(image) => image_to_json(node, spec.name, image, output_dir)?,
        };
        object.insert(spec.name.to_string(), rendered);
    }
    Ok(Value::Object(object))
}

fn image_to_json(
    node: &str,
    output: &str,
    image: ImageBuffer,
    output_dir: &Path,
) -> anyhow::Result<Value> {
    match image {
        ImageBuffer::Native(img) => {
            std::fs::create_dir_all(output_dir).with_context(|| {
                format!("Failed to create output directory {}", output_dir.display())
            })?;
            let path = output_dir.join(format!("{node}_{output}.png"));
            img.save(&path)
                .with_context(|| format!("Failed to save image {}", path.display()))?;
            tracing::info!(path = %path.display(), "Image output written");
            Ok(json!({ "path": path.display().to_string() }))
        }
        ImageBuffer::Array(arr) => Ok(array_to_json(&arr)),
        ImageBuffer::Raw(value) => Ok(value),
    }
}

fn array_to_json(arr: &SampleArray) -> Value {
    let data: Vec<Value> = match arr {
        SampleArray::F32(a) => a.iter().map(|v| json!(v)).collect(),
        SampleArray::U8(a) => a.iter().map(|v| json!(v)).collect(),
    };
    json!({
        "dtype": arr.dtype(),
        "shape": arr.shape(),
        "data": data,
    })
}
