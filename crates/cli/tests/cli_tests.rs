//! Harness commands exercised against the real registry and a temp output dir.

use assert_matches::assert_matches;
use kpu_cli::commands;
use kpu_cli::config::CliConfig;
use kpu_nodes::NodeRegistry;
use serde_json::json;

fn config_in(dir: &std::path::Path) -> CliConfig {
    CliConfig {
        output_dir: dir.to_path_buf(),
        pretty: false,
    }
}

#[test]
fn list_reports_every_node() {
    let listed = commands::list(&NodeRegistry::register_nodes());
    let nodes = listed.as_array().unwrap();
    assert_eq!(nodes.len(), 7);
    assert_eq!(nodes[0]["name"], "KPUExampleNode");
    assert_eq!(nodes[0]["outputs"][0]["kind"], "IMAGE");
    assert!(nodes.iter().all(|n| n["category"] == "KPU Utils"));
}

#[test]
fn schema_without_inputs_is_static() {
    let dir = tempfile::tempdir().unwrap();
    let schema = commands::schema(
        &NodeRegistry::register_nodes(),
        "KPUSceneGenerator",
        None,
        dir.path(),
    )
    .unwrap();
    assert!(schema["input"]["optional"].as_object().unwrap().is_empty());
    assert_eq!(schema["input"]["required"]["num_texts"][0], "INT");
    assert_eq!(schema["input"]["required"]["num_texts"][1]["max"], 3);
}

#[test]
fn schema_follows_num_texts() {
    let dir = tempfile::tempdir().unwrap();
    let schema = commands::schema(
        &NodeRegistry::register_nodes(),
        "KPUSceneGenerator",
        Some(&json!({ "num_texts": 2 })),
        dir.path(),
    )
    .unwrap();
    let optional = schema["input"]["optional"].as_object().unwrap();
    assert_eq!(optional.keys().collect::<Vec<_>>(), vec!["text_1", "text_2"]);
}

#[test]
fn schema_of_unknown_node_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = commands::schema(&NodeRegistry::register_nodes(), "Missing", None, dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("Missing"));
}

#[test]
fn run_writes_native_grayscale_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    image::RgbImage::from_pixel(3, 2, image::Rgb([255, 0, 0]))
        .save(&input)
        .unwrap();

    let out = commands::run(
        &NodeRegistry::register_nodes(),
        &config_in(dir.path()),
        "KPUExampleNode",
        &json!({ "image": { "path": "in.png" } }),
        dir.path(),
    )
    .unwrap();

    let written = out["IMAGE"]["path"].as_str().unwrap();
    let gray = image::open(written).unwrap();
    assert_matches!(gray, image::DynamicImage::ImageLuma8(ref g) if g.dimensions() == (3, 2));
    assert_eq!(gray.to_luma8().get_pixel(0, 0)[0], 76);
}

#[test]
fn run_renders_array_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let out = commands::run(
        &NodeRegistry::register_nodes(),
        &config_in(dir.path()),
        "KPUExampleNode",
        &json!({ "image": [[[255, 255, 255], [0, 0, 0]]] }),
        dir.path(),
    )
    .unwrap();
    assert_eq!(out["IMAGE"]["dtype"], "u8");
    assert_eq!(out["IMAGE"]["shape"], json!([1, 2, 1]));
    assert_eq!(out["IMAGE"]["data"], json!([255, 0]));
}

#[test]
fn run_text_node_returns_named_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let out = commands::run(
        &NodeRegistry::register_nodes(),
        &config_in(dir.path()),
        "KPUSceneGenerator",
        &json!({ "num_texts": 2, "text_1": "rain", "text_2": "neon signs" }),
        dir.path(),
    )
    .unwrap();
    assert_eq!(out["positive_prompt"], "rain\nneon signs");
    assert!(out["negative_prompt"].as_str().unwrap().contains("lowres"));
}

#[test]
fn run_rejects_missing_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::run(
        &NodeRegistry::register_nodes(),
        &config_in(dir.path()),
        "KPUExampleNode",
        &json!({ "image": { "path": "nope.png" } }),
        dir.path(),
    );
    assert!(result.is_err());
}
