//! The [`Diagram`] type: groups in, rendered figure out.
//!
//! A diagram owns its groups, title, angle links, and configuration.
//! [`Diagram::render`] runs the layout pass and SVG assembly exactly once
//! and caches the resulting [`Figure`]; exports always read the cache, so
//! exporting before rendering is a detectable error rather than an implicit
//! re-render.

use std::cell::OnceCell;
use std::fs;
use std::path::Path;

use log::info;

use fazor_core::{
    color::Color,
    geometry::{Bounds, Size},
    model::{AngleLink, Group},
};

use crate::config::{AppConfig, RasterConfig};
use crate::error::FazorError;
use crate::export::{ExportError, ExportFormat, raster, svg as svg_export};
use crate::layout;

/// A rendered diagram: the SVG document plus the metadata raster export
/// needs.
#[derive(Debug, Clone)]
pub struct Figure {
    svg: String,
    size: Size,
    bounds: Bounds,
    background: Option<Color>,
}

impl Figure {
    /// The SVG document text.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// World-coordinate plot bounds, margin included.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Canvas size of the SVG document, in SVG user units.
    pub fn size(&self) -> Size {
        self.size
    }

    fn to_bytes(&self, format: ExportFormat, raster: &RasterConfig) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Svg => Ok(self.svg.clone().into_bytes()),
            ExportFormat::Png => {
                raster::svg_to_png(&self.svg, self.size, raster, self.background.as_ref())
            }
            ExportFormat::Jpeg => {
                raster::svg_to_jpeg(&self.svg, self.size, raster, self.background.as_ref())
            }
        }
    }
}

/// A phasor diagram assembled from vector groups.
#[derive(Debug)]
pub struct Diagram {
    groups: Vec<Group>,
    title: String,
    angle_links: Vec<AngleLink>,
    config: AppConfig,
    figure: OnceCell<Figure>,
}

impl Diagram {
    /// Creates a diagram from already-validated groups.
    pub fn new(groups: Vec<Group>, title: impl Into<String>) -> Self {
        Self {
            groups,
            title: title.into(),
            angle_links: Vec::new(),
            config: AppConfig::default(),
            figure: OnceCell::new(),
        }
    }

    /// Registers angle wedges between pairs of group resultants.
    ///
    /// # Errors
    ///
    /// Returns [`FazorError::InvalidReference`] if any link names a group
    /// index the diagram does not have.
    pub fn with_angle_links(mut self, links: Vec<AngleLink>) -> Result<Self, FazorError> {
        for link in &links {
            for index in [link.a(), link.b()] {
                if index >= self.groups.len() {
                    return Err(FazorError::InvalidReference {
                        index,
                        groups: self.groups.len(),
                    });
                }
            }
        }
        self.angle_links = links;
        Ok(self)
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// The diagram's groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The diagram title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Runs layout and SVG assembly, caching the result.
    ///
    /// The first call does the work; every later call returns the cached
    /// [`Figure`].
    pub fn render(&self) -> Result<&Figure, FazorError> {
        if let Some(figure) = self.figure.get() {
            return Ok(figure);
        }

        info!(
            groups = self.groups.len(),
            links = self.angle_links.len();
            "Rendering diagram"
        );

        let layout = layout::compute(&self.groups, &self.title, &self.angle_links);
        let (document, size) = svg_export::render_document(&layout, self.config.style())?;
        let background = self
            .config
            .style()
            .background_color()
            .map_err(ExportError::InvalidStyle)?;

        let figure = Figure {
            svg: document.to_string(),
            size,
            bounds: layout.bounds(),
            background,
        };

        Ok(self.figure.get_or_init(|| figure))
    }

    /// Exports the rendered figure as bytes in the given format.
    ///
    /// Formats: `svg`, `png`, `jpeg` (alias `jpg`), case-insensitive.
    ///
    /// # Errors
    ///
    /// [`ExportError::NotRendered`] if [`render`](Self::render) has not
    /// been called, [`ExportError::UnsupportedFormat`] for unknown format
    /// strings.
    pub fn export_bytes(&self, format: &str) -> Result<Vec<u8>, FazorError> {
        let format: ExportFormat = format.parse().map_err(FazorError::Export)?;
        let figure = self.figure.get().ok_or(ExportError::NotRendered)?;
        Ok(figure.to_bytes(format, self.config.raster())?)
    }

    /// Exports the rendered figure to a file.
    pub fn export_file(&self, path: impl AsRef<Path>, format: &str) -> Result<(), FazorError> {
        let bytes = self.export_bytes(format)?;
        let path = path.as_ref();
        fs::write(path, bytes)?;
        info!(path = path.display().to_string(), format = format; "Diagram exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fazor_core::model::GroupItem;

    fn voltage_groups() -> Vec<Group> {
        Group::from_list(&[vec![
            GroupItem::Entry(3.0, 0.0, "A".to_string(), "green".to_string()),
            GroupItem::Entry(4.0, 90.0, "B".to_string(), "blue".to_string()),
            GroupItem::Entry(5.0, 53.13, "R".to_string(), "pink".to_string()),
            GroupItem::Unit("V".to_string()),
        ]])
        .unwrap()
    }

    #[test]
    fn test_render_is_idempotent() {
        let diagram = Diagram::new(voltage_groups(), "Test");
        let first = diagram.render().unwrap().svg().to_string();
        let second = diagram.render().unwrap().svg().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_before_render_fails() {
        let diagram = Diagram::new(voltage_groups(), "Test");
        let err = diagram.export_bytes("svg").unwrap_err();
        assert!(matches!(
            err,
            FazorError::Export(ExportError::NotRendered)
        ));
    }

    #[test]
    fn test_unknown_format_is_rejected_before_cache_lookup() {
        let diagram = Diagram::new(voltage_groups(), "Test");
        let err = diagram.export_bytes("tiff").unwrap_err();
        assert!(matches!(
            err,
            FazorError::Export(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_angle_link_out_of_range_is_reported() {
        let links = vec![AngleLink::new(0, 5, Color::default())];
        let err = Diagram::new(voltage_groups(), "")
            .with_angle_links(links)
            .unwrap_err();
        assert!(matches!(
            err,
            FazorError::InvalidReference { index: 5, groups: 1 }
        ));
    }

    #[test]
    fn test_svg_export_round_trips_document_text() {
        let diagram = Diagram::new(voltage_groups(), "Test");
        diagram.render().unwrap();

        let bytes = diagram.export_bytes("svg").unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("</svg>"));
    }
}
