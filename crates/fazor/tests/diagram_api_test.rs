//! Integration tests for the Diagram API
//!
//! These tests exercise the public surface end to end: declarative input,
//! rendering, and export to all supported formats.

use fazor::input::DiagramInput;
use fazor::{Diagram, ExportError, FazorError};

const RL_CIRCUIT: &str = r#"{
    "title": "RL series circuit",
    "groups": [
        [[3.0, 0.0, "U_R", "green"], [4.0, 90.0, "U_L", "blue"],
         [5.0, 53.13, "U", "pink"], "V"],
        [[0.53, 0.0, "I", "red"], "A"]
    ],
    "angle_links": [[0, 1, "gray"]]
}"#;

fn rl_circuit() -> Diagram {
    let input: DiagramInput = serde_json::from_str(RL_CIRCUIT).expect("valid input JSON");
    input.into_diagram().expect("valid diagram")
}

#[test]
fn test_render_produces_complete_svg() {
    let diagram = rl_circuit();
    let figure = diagram.render().expect("render should succeed");

    let svg = figure.svg();
    assert!(svg.contains("<svg"), "output should contain SVG tag");
    assert!(svg.contains("</svg>"), "output should be complete SVG");
}

#[test]
fn test_svg_contains_all_labels_and_units() {
    let diagram = rl_circuit();
    let svg = diagram.render().expect("render should succeed").svg().to_string();

    for label in ["U", "R", "L", "I"] {
        assert!(svg.contains(label), "missing label {label}");
    }
    // Scale legend rows carry physical magnitudes and units
    assert!(svg.contains("5 V"));
    assert!(svg.contains("0.53 A"));
    // Title is drawn
    assert!(svg.contains("RL series circuit"));
    // The angle link produces a wedge label
    assert!(svg.contains("φ"));
}

#[test]
fn test_render_twice_returns_the_same_figure() {
    let diagram = rl_circuit();
    let first = diagram.render().expect("first render").svg().to_string();
    let second = diagram.render().expect("second render").svg().to_string();
    assert_eq!(first, second);
}

#[test]
fn test_export_before_render_is_detected() {
    let diagram = rl_circuit();
    let err = diagram.export_bytes("png").unwrap_err();
    assert!(matches!(err, FazorError::Export(ExportError::NotRendered)));
}

#[test]
fn test_png_export_has_png_signature() {
    let diagram = rl_circuit();
    diagram.render().expect("render should succeed");

    let bytes = diagram.export_bytes("png").expect("png export");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn test_jpeg_export_has_jpeg_signature() {
    let diagram = rl_circuit();
    diagram.render().expect("render should succeed");

    let bytes = diagram.export_bytes("jpeg").expect("jpeg export");
    assert!(bytes.starts_with(&[0xFF, 0xD8]));
}

#[test]
fn test_unknown_format_is_rejected() {
    let diagram = rl_circuit();
    diagram.render().expect("render should succeed");

    let err = diagram.export_bytes("webp").unwrap_err();
    assert!(matches!(
        err,
        FazorError::Export(ExportError::UnsupportedFormat(f)) if f == "webp"
    ));
}

#[test]
fn test_export_file_writes_bytes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("diagram.svg");

    let diagram = rl_circuit();
    diagram.render().expect("render should succeed");
    diagram.export_file(&path, "svg").expect("file export");

    let written = std::fs::read_to_string(&path).expect("read back");
    assert!(written.contains("<svg"));
}

#[test]
fn test_negative_magnitude_is_flipped_not_rejected() {
    let input: DiagramInput = serde_json::from_str(
        r#"{"groups": [[[-2.0, 0.0, "U_C", "orange"], [2.0, 0.0, "R", "red"], "V"]]}"#,
    )
    .expect("valid input JSON");

    let diagram = input.into_diagram().expect("valid diagram");
    let entry = &diagram.groups()[0].chain()[0];
    assert_eq!(entry.magnitude(), 2.0);
    assert!((entry.angle_degrees() - 180.0).abs() < 1e-4);
}
