//! CLI logic for the Fazor phasor diagram tool.
//!
//! Reads a JSON diagram description, renders it, and writes the result in
//! the requested format.

mod args;
mod config;

pub use args::Args;

use std::{fs, io, path::Path};

use log::info;

use fazor::{DiagramInput, FazorError};

/// Run the Fazor CLI application
///
/// Processes the input JSON through the Fazor pipeline and writes the
/// rendered diagram to the output file.
///
/// # Errors
///
/// Returns `FazorError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input (JSON syntax, group structure, colors, links)
/// - Rendering and export errors
pub fn run(args: &Args) -> Result<(), FazorError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let text = fs::read_to_string(&args.input)?;
    let input: DiagramInput = serde_json::from_str(&text)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let diagram = input.into_diagram()?.with_config(app_config);
    diagram.render()?;

    let format = resolve_format(args);
    diagram.export_file(&args.output, &format)?;

    info!(output_file = args.output, format = format; "Diagram exported successfully");

    Ok(())
}

/// Picks the export format: explicit flag first, then the output file
/// extension, then SVG.
fn resolve_format(args: &Args) -> String {
    if let Some(format) = &args.format {
        return format.clone();
    }

    Path::new(&args.output)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("svg")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: &str, format: Option<&str>) -> Args {
        Args {
            input: "in.json".to_string(),
            output: output.to_string(),
            format: format.map(str::to_string),
            config: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_explicit_format_wins_over_extension() {
        assert_eq!(resolve_format(&args("out.svg", Some("png"))), "png");
    }

    #[test]
    fn test_format_inferred_from_output_extension() {
        assert_eq!(resolve_format(&args("diagram.jpeg", None)), "jpeg");
        assert_eq!(resolve_format(&args("diagram.png", None)), "png");
    }

    #[test]
    fn test_format_defaults_to_svg() {
        assert_eq!(resolve_format(&args("diagram", None)), "svg");
    }
}
