//! Bitmap rendering of glyph documents using resvg/usvg.
//!
//! The editor displays the SVG files directly; bitmaps are for surfaces that
//! only take raster images, such as previews in settings pages.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use super::RenderedGlyph;

impl RenderedGlyph {
    /// Rasterizes the glyph into a `size x size` RGBA image.
    ///
    /// Returns `None` if the document cannot be parsed or `size` is zero.
    pub fn rasterize(&self, size: u32) -> Option<RgbaImage> {
        render_svg(&self.document, size)
    }
}

/// Renders an SVG string to an RGBA image at the specified size.
///
/// The SVG is scaled to fit within `size x size` pixels while preserving
/// aspect ratio (the larger dimension will be `size`).
pub fn render_svg(svg_data: &str, size: u32) -> Option<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts).ok()?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let Some(src) = pixmap.pixel(x, y) else {
            continue;
        };
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *pixel = Rgba([r, g, b, a]);
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::render_glyph;

    #[test]
    fn rasterizes_plain_circle_in_its_color() {
        let glyph = render_glyph("circle", "ff0000", "");
        let img = glyph.rasterize(32).expect("circle document should parse");
        assert_eq!(img.dimensions(), (32, 32));

        let expected = glyph.color.to_srgba();
        let center = img.get_pixel(16, 16);
        assert!(center[3] > 200, "center should be opaque: {center:?}");
        assert_eq!(center[0], expected.red);
        assert!(center[1] < 16 && center[2] < 16);

        // The corner lies outside the circle.
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn rasterize_scales_to_requested_size() {
        let img = render_glyph("star", "00ff00", "").rasterize(64).unwrap();
        assert_eq!(img.dimensions(), (64, 64));
    }

    #[test]
    fn every_template_parses() {
        for shape in crate::ShapeKind::ALL {
            let with_text = render_glyph(shape.as_str(), "123456", "A");
            assert!(render_svg(&with_text.document, 16).is_some(), "{shape} with text");

            let plain = render_glyph(shape.as_str(), "123456", "");
            assert!(render_svg(&plain.document, 16).is_some(), "{shape} plain");
        }
    }

    #[test]
    fn invalid_document_yields_none() {
        assert!(render_svg("not svg", 16).is_none());
        assert!(render_glyph("circle", "fff", "").rasterize(0).is_none());
    }
}
