//! Color handling for phasor diagrams.
//!
//! Phasor input data names colors as CSS strings ("green", "#ff00aa",
//! "rgb(255, 0, 0)"). This module wraps the `DynamicColor` type from the
//! color crate and adds the conversions the renderer needs.

use color::{DynamicColor, Srgb};
use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)", or "red".
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }

    /// Returns the alpha component in the `0.0..=1.0` range.
    pub fn alpha(&self) -> f32 {
        self.color.to_alpha_color::<Srgb>().components[3]
    }

    /// Converts to 8-bit sRGB components `(r, g, b, a)`.
    ///
    /// Used by the raster backend, which fills pixmaps with concrete pixel
    /// values rather than CSS strings.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        (rgba.r, rgba.g, rgba.b, rgba.a)
    }

    /// Get the sanitized ID-safe string for this color (for use in markers)
    pub fn to_id_safe_string(&self) -> String {
        let color_str = self.to_string();
        // Replace invalid ID characters with underscores
        let mut sanitized = color_str
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%'], "_");

        // Ensure the ID starts with a letter (required for valid SVG IDs)
        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").unwrap()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_color_parses() {
        let color = Color::new("green").unwrap();
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result = Color::new("not-a-color-at-all");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not-a-color-at-all"));
    }

    #[test]
    fn test_to_rgba8_for_named_color() {
        let (r, g, b, a) = Color::new("red").unwrap().to_rgba8();
        assert_eq!((r, g, b, a), (255, 0, 0, 255));
    }

    #[test]
    fn test_to_rgba8_for_hex_color() {
        let (r, g, b, _) = Color::new("#102030").unwrap().to_rgba8();
        assert_eq!((r, g, b), (16, 32, 48));
    }

    #[test]
    fn test_id_safe_string_has_no_invalid_characters() {
        let id = Color::new("rgb(255, 0, 0)").unwrap().to_id_safe_string();
        assert!(!id.contains('('));
        assert!(!id.contains(')'));
        assert!(!id.contains(','));
        assert!(!id.contains(' '));
        assert!(!id.contains('#'));
    }

    #[test]
    fn test_id_safe_string_starts_with_letter() {
        let id = Color::new("#123456").unwrap().to_id_safe_string();
        assert!(id.chars().next().unwrap().is_ascii_alphabetic());
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(Color::default(), Color::new("black").unwrap());
    }
}
