//! Raster (PNG/JPEG) export of a rendered SVG document.
//!
//! The SVG text is re-parsed with `usvg` and rendered through `resvg` into
//! a `tiny_skia::Pixmap`. The pixmap size comes from the canvas size the
//! SVG renderer computed, multiplied by the configured raster scale.

use log::debug;

use fazor_core::{color::Color, geometry::Size};

use crate::config::RasterConfig;
use crate::export::ExportError;

/// Encodes the SVG text as PNG bytes.
pub(crate) fn svg_to_png(
    svg_text: &str,
    size: Size,
    raster: &RasterConfig,
    background: Option<&Color>,
) -> Result<Vec<u8>, ExportError> {
    let pixmap = svg_to_pixmap(svg_text, size, raster.scale(), background)?;
    pixmap.encode_png().map_err(|_| ExportError::PngEncode)
}

/// Encodes the SVG text as JPEG bytes.
///
/// JPEG has no alpha channel, so a missing or transparent background falls
/// back to opaque white before the alpha channel is dropped.
pub(crate) fn svg_to_jpeg(
    svg_text: &str,
    size: Size,
    raster: &RasterConfig,
    background: Option<&Color>,
) -> Result<Vec<u8>, ExportError> {
    let white = Color::new("white").map_err(ExportError::InvalidStyle)?;
    let background = match background {
        Some(color) if color.alpha() == 1.0 => color,
        _ => &white,
    };

    let pixmap = svg_to_pixmap(svg_text, size, raster.scale(), Some(background))?;
    let (width, height) = (pixmap.width(), pixmap.height());

    // The background fill is opaque, so every pixel's alpha is 255 and the
    // channel can be dropped without blending.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (width as usize) * (height as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst[..3].copy_from_slice(&src[..3]);
    }

    let mut out = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, raster.jpeg_quality());
    encoder
        .encode(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|_| ExportError::JpegEncode)?;
    Ok(out)
}

fn svg_to_pixmap(
    svg_text: &str,
    size: Size,
    scale: f32,
    background: Option<&Color>,
) -> Result<tiny_skia::Pixmap, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    options.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg_text, &options).map_err(|_| ExportError::SvgParse)?;

    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;
    debug!(width = width_px, height = height_px; "Rasterizing SVG document");

    let mut pixmap =
        tiny_skia::Pixmap::new(width_px, height_px).ok_or(ExportError::PixmapAlloc)?;

    if let Some(color) = background {
        let (r, g, b, a) = color.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 10"><rect width="20" height="10" fill="green"/></svg>"#;

    #[test]
    fn test_png_bytes_start_with_signature() {
        let bytes = svg_to_png(
            SAMPLE,
            Size::new(20.0, 10.0),
            &RasterConfig::default(),
            None,
        )
        .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn test_jpeg_bytes_start_with_signature() {
        let bytes = svg_to_jpeg(
            SAMPLE,
            Size::new(20.0, 10.0),
            &RasterConfig::default(),
            None,
        )
        .unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn test_raster_scale_multiplies_pixel_size() {
        let pixmap = svg_to_pixmap(SAMPLE, Size::new(20.0, 10.0), 2.0, None).unwrap();
        assert_eq!(pixmap.width(), 40);
        assert_eq!(pixmap.height(), 20);
    }

    #[test]
    fn test_malformed_svg_reports_parse_error() {
        let err = svg_to_pixmap("not an svg", Size::new(10.0, 10.0), 1.0, None).unwrap_err();
        assert!(matches!(err, ExportError::SvgParse));
    }
}
