//! Configuration types for phasor diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are styled and rasterized. All types implement [`serde::Deserialize`]
//! for flexible loading from external sources.
//!
//! # Example
//!
//! ```
//! # use fazor::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use fazor_core::color::Color;

/// Top-level application configuration combining style and raster settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Raster export configuration section.
    #[serde(default)]
    raster: RasterConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(style: StyleConfig, raster: RasterConfig) -> Self {
        Self { style, raster }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the raster export configuration.
    pub fn raster(&self) -> &RasterConfig {
        &self.raster
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for the diagram, as a color string.
    /// `None` leaves the background transparent.
    #[serde(default)]
    background_color: Option<String>,

    /// Font size for annotations, in SVG user units.
    #[serde(default = "default_font_size")]
    font_size: u16,

    /// Stroke width for phasor arrows.
    #[serde(default = "default_stroke_width")]
    stroke_width: f32,
}

fn default_font_size() -> u16 {
    10
}

fn default_stroke_width() -> f32 {
    1.5
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            font_size: default_font_size(),
            stroke_width: default_stroke_width(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the annotation font size.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the arrow stroke width.
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }
}

/// Raster export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RasterConfig {
    /// Raster scale factor relative to the SVG user unit size.
    #[serde(default = "default_raster_scale")]
    scale: f32,

    /// JPEG encoding quality (1-100).
    #[serde(default = "default_jpeg_quality")]
    jpeg_quality: u8,
}

fn default_raster_scale() -> f32 {
    2.0
}

fn default_jpeg_quality() -> u8 {
    90
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            scale: default_raster_scale(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl RasterConfig {
    /// Returns the raster scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the JPEG encoding quality.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_background() {
        let config = AppConfig::default();
        assert!(config.style().background_color().unwrap().is_none());
        assert_eq!(config.style().font_size(), 10);
    }

    #[test]
    fn test_invalid_background_color_reports_error() {
        let style: StyleConfig =
            serde_json::from_str(r#"{"background_color": "definitely-wrong"}"#).unwrap();
        assert!(style.background_color().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"style": {"font_size": 12}}"#).unwrap();
        assert_eq!(config.style().font_size(), 12);
        assert_eq!(config.style().stroke_width(), default_stroke_width());
        assert_eq!(config.raster().jpeg_quality(), 90);
    }
}
