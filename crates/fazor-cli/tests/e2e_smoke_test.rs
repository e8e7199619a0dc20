use std::fs;

use tempfile::tempdir;

use fazor_cli::{Args, run};

const RL_CIRCUIT: &str = r#"{
    "title": "RL series circuit",
    "groups": [
        [[3.0, 0.0, "U_R", "green"], [4.0, 90.0, "U_L", "blue"],
         [5.0, 53.13, "U", "pink"], "V"],
        [[0.53, 0.0, "I", "red"], "A"]
    ],
    "angle_links": [[0, 1, "gray"]]
}"#;

fn args(input: &str, output: &str, format: Option<&str>) -> Args {
    Args {
        input: input.to_string(),
        output: output.to_string(),
        format: format.map(str::to_string),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_svg_export() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("diagram.json");
    let output_path = temp_dir.path().join("diagram.svg");
    fs::write(&input_path, RL_CIRCUIT).expect("Failed to write input");

    run(&args(
        &input_path.to_string_lossy(),
        &output_path.to_string_lossy(),
        None,
    ))
    .expect("CLI run should succeed");

    let svg = fs::read_to_string(&output_path).expect("Output should exist");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("RL series circuit"));
}

#[test]
fn e2e_png_export_inferred_from_extension() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("diagram.json");
    let output_path = temp_dir.path().join("diagram.png");
    fs::write(&input_path, RL_CIRCUIT).expect("Failed to write input");

    run(&args(
        &input_path.to_string_lossy(),
        &output_path.to_string_lossy(),
        None,
    ))
    .expect("CLI run should succeed");

    let bytes = fs::read(&output_path).expect("Output should exist");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.svg");

    let result = run(&args(
        "/no/such/input.json",
        &output_path.to_string_lossy(),
        None,
    ));
    assert!(result.is_err());
}

#[test]
fn e2e_malformed_group_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("bad.json");
    let output_path = temp_dir.path().join("out.svg");

    // Group without a trailing unit label
    fs::write(&input_path, r#"{"groups": [[[1.0, 0.0, "I", "red"]]]}"#)
        .expect("Failed to write input");

    let result = run(&args(
        &input_path.to_string_lossy(),
        &output_path.to_string_lossy(),
        None,
    ));
    assert!(result.is_err());
}
