//! Glyph rasterizer: turns one text unit into one glyph image per character.
//!
//! ```text
//! TextUnit "Hi"  →  [GlyphRasterizer]  →  GlyphImage('H'), GlyphImage('i')
//!                    per char:
//!                      fresh DrawingContext (bg-filled, w x h)
//!                      FontFace::draw at (0, baseline)
//! ```
//!
//! Every glyph image in a run has the same `CellGeometry`, so glyphs line up
//! on one baseline once the compositor places them side by side. Repeated
//! characters are rasterized again each time; there is no glyph cache.

pub mod context;
pub mod font_face;
pub mod headless_face;
pub mod truetype_face;

use crate::error::{RenderError, Result};
use crate::splitter::TextUnit;
use context::{ContextParams, DrawingContext, Point};
use font_face::FontFace;
use image::RgbaImage;
use log::*;
use std::sync::Arc;

/// Size of every glyph image and the baseline row glyphs sit on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub width: u32,
    pub height: u32,
    pub baseline: f32,
}

impl CellGeometry {
    /// Work out the cell size for `face`.
    ///
    /// Non-zero `width`/`height` are used as given. A zero height becomes
    /// ascent + descent; a zero width becomes the advance of `reference`.
    ///
    /// # Errors
    /// `Geometry` if the width must be derived and `face` has no usable advance
    /// for `reference`, or if a derived dimension rounds to zero.
    pub fn resolve<F: FontFace + ?Sized>(
        face: &F,
        width: u32,
        height: u32,
        reference: char,
    ) -> Result<Self> {
        let metrics = face.metrics();

        let height = if height == 0 {
            (metrics.ascent + metrics.descent).ceil().max(0.0) as u32
        } else {
            height
        };

        let width = if width == 0 {
            match face.advance(reference) {
                Some(advance) if advance > 0.0 => advance.round() as u32,
                _ => {
                    error!(
                        "CellGeometry: Could not get glyph width for reference '{}'",
                        reference
                    );
                    return Err(RenderError::Geometry { reference });
                }
            }
        } else {
            width
        };

        if width == 0 || height == 0 {
            return Err(RenderError::Geometry { reference });
        }

        let geometry = CellGeometry {
            width,
            height,
            baseline: metrics.ascent.ceil(),
        };
        info!(
            "CellGeometry: Resolved {}x{} px cells, baseline at {}",
            geometry.width, geometry.height, geometry.baseline
        );
        Ok(geometry)
    }
}

/// One character drawn into its own cell-sized buffer.
#[derive(Debug, Clone)]
pub struct GlyphImage {
    ch: char,
    pixels: RgbaImage,
}

impl GlyphImage {
    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Rasterizes characters with a shared, read-only font face.
pub struct GlyphRasterizer<F: FontFace + ?Sized> {
    face: Arc<F>,
    geometry: CellGeometry,
    params: ContextParams,
}

impl<F: FontFace + ?Sized> GlyphRasterizer<F> {
    pub fn new(face: Arc<F>, geometry: CellGeometry, params: ContextParams) -> Self {
        Self {
            face,
            geometry,
            params,
        }
    }

    /// Draw `ch` into a fresh background-filled cell.
    pub fn rasterize_char(&self, ch: char) -> GlyphImage {
        let mut ctx = DrawingContext::new(self.params, self.geometry.width, self.geometry.height);
        let mut buf = [0u8; 4];
        self.face
            .draw(&mut ctx, ch.encode_utf8(&mut buf), Point::new(0.0, self.geometry.baseline));
        trace!("GlyphRasterizer: Rendered '{}' (U+{:04X})", ch, ch as u32);
        GlyphImage {
            ch,
            pixels: ctx.into_image(),
        }
    }

    /// One glyph image per character of `unit`, in order.
    pub fn rasterize_unit(&self, unit: &TextUnit) -> Vec<GlyphImage> {
        let glyphs: Vec<GlyphImage> = unit.chars().map(|ch| self.rasterize_char(ch)).collect();
        debug!(
            "GlyphRasterizer: Unit {} '{}' -> {} glyphs",
            unit.index(),
            unit.text(),
            glyphs.len()
        );
        glyphs
    }
}

#[cfg(test)]
mod tests {
    use super::headless_face::HeadlessFace;
    use super::*;
    use crate::color::{ColorMode, Palette, BLACK, WHITE};
    use context::Hinting;

    fn params(mode: ColorMode) -> ContextParams {
        ContextParams {
            palette: Palette::for_mode(mode),
            dpi: 72.0,
            pts: 12.0,
            hinting: Hinting::Full,
        }
    }

    #[test]
    fn geometry_derives_from_metrics() {
        let face = HeadlessFace::new(9.6, 11.2, 3.1);
        let geometry = CellGeometry::resolve(&face, 0, 0, '$').unwrap();
        assert_eq!(geometry.width, 10);
        assert_eq!(geometry.height, 15);
        assert_eq!(geometry.baseline, 12.0);
    }

    #[test]
    fn explicit_geometry_wins() {
        let face = HeadlessFace::default();
        let geometry = CellGeometry::resolve(&face, 20, 30, '$').unwrap();
        assert_eq!((geometry.width, geometry.height), (20, 30));
    }

    #[test]
    fn missing_reference_glyph_is_fatal() {
        let face = HeadlessFace::default().with_missing(['$']);
        let err = CellGeometry::resolve(&face, 0, 16, '$').unwrap_err();
        assert!(matches!(err, RenderError::Geometry { reference: '$' }));
    }

    #[test]
    fn missing_reference_glyph_is_irrelevant_with_explicit_width() {
        let face = HeadlessFace::default().with_missing(['$']);
        assert!(CellGeometry::resolve(&face, 8, 0, '$').is_ok());
    }

    #[test]
    fn zero_advance_is_fatal() {
        let face = HeadlessFace::new(0.0, 12.0, 4.0);
        assert!(matches!(
            CellGeometry::resolve(&face, 0, 0, '0'),
            Err(RenderError::Geometry { .. })
        ));
    }

    #[test_log::test]
    fn unit_yields_one_cell_per_char() {
        let face = Arc::new(HeadlessFace::default());
        let geometry = CellGeometry::resolve(face.as_ref(), 0, 0, '$').unwrap();
        let rasterizer = GlyphRasterizer::new(face, geometry, params(ColorMode::Dark));

        let glyphs = rasterizer.rasterize_unit(&TextUnit::new(0, "there"));
        let chars: Vec<char> = glyphs.iter().map(GlyphImage::ch).collect();
        assert_eq!(chars, vec!['t', 'h', 'e', 'r', 'e']);
        assert!(glyphs.iter().all(|g| g.width() == 8 && g.height() == 16));
    }

    #[test]
    fn cell_uses_palette_for_background_and_ink() {
        let face = Arc::new(HeadlessFace::default());
        let geometry = CellGeometry::resolve(face.as_ref(), 0, 0, '$').unwrap();

        let light = GlyphRasterizer::new(face.clone(), geometry, params(ColorMode::Light));
        let glyph = light.rasterize_char('x');
        assert_eq!(*glyph.pixels().get_pixel(0, 0), WHITE);
        assert_eq!(*glyph.pixels().get_pixel(3, 6), BLACK);

        let dark = GlyphRasterizer::new(face, geometry, params(ColorMode::Dark));
        let glyph = dark.rasterize_char('x');
        assert_eq!(*glyph.pixels().get_pixel(0, 0), BLACK);
        assert_eq!(*glyph.pixels().get_pixel(3, 6), WHITE);
    }

    #[test]
    fn repeated_chars_render_identically() {
        let face = Arc::new(HeadlessFace::default());
        let geometry = CellGeometry::resolve(face.as_ref(), 0, 0, '$').unwrap();
        let rasterizer = GlyphRasterizer::new(face, geometry, params(ColorMode::Dark));

        let glyphs = rasterizer.rasterize_unit(&TextUnit::new(0, "ee"));
        assert_eq!(glyphs[0].pixels(), glyphs[1].pixels());
    }
}
