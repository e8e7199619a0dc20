//! Export backends for rendered diagrams.
//!
//! The `svg` submodule turns a computed layout into an SVG document; the
//! `raster` submodule re-renders that document into PNG or JPEG bytes.

pub mod raster;
pub mod svg;

use std::{io, str::FromStr};

use thiserror::Error;

/// Errors raised while exporting a diagram.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("diagram has not been rendered; call render() before exporting")]
    NotRendered,

    #[error("invalid style configuration: {0}")]
    InvalidStyle(String),

    #[error("failed to parse generated SVG")]
    SvgParse,

    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,

    #[error("failed to encode PNG")]
    PngEncode,

    #[error("failed to encode JPEG")]
    JpegEncode,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
