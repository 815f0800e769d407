//! TrueType/OpenType font face backed by `ab_glyph`.

use super::context::{DrawingContext, Hinting, Point};
use super::font_face::{FaceMetrics, FontFace};
use crate::error::{RenderError, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use log::*;
use std::fs;
use std::path::Path;

const POINTS_PER_INCH: f32 = 72.0;

/// A parsed font file.
///
/// `metrics` and `advance` answer at the size given to `from_path`. `draw`
/// sizes glyphs from the context's point size and DPI.
pub struct TrueTypeFace {
    font: FontVec,
    // ab_glyph scales by ascent-descent height, not by em size
    height_per_em: f32,
    scale: PxScale,
}

impl TrueTypeFace {
    /// Read and parse the font at `path`.
    ///
    /// # Errors
    /// `FontRead` if the file cannot be read, `FontParse` if it is not a
    /// usable font, `InvalidScale` if the font has no units-per-em.
    pub fn from_path(path: impl AsRef<Path>, pts: f32, dpi: f32) -> Result<Self> {
        let path = path.as_ref();
        info!("TrueTypeFace: Loading '{}' at {} pt, {} dpi", path.display(), pts, dpi);

        let data = fs::read(path).map_err(|source| RenderError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|source| RenderError::FontParse {
            path: path.to_path_buf(),
            source,
        })?;

        let face = Self::with_font(font, pts, dpi)?;
        debug!("TrueTypeFace: Loaded with metrics {:?}", face.metrics());
        Ok(face)
    }

    fn with_font(font: FontVec, pts: f32, dpi: f32) -> Result<Self> {
        let units_per_em = font
            .units_per_em()
            .ok_or(RenderError::InvalidScale { pts, dpi })?;
        let height_per_em = font.height_unscaled() / units_per_em;
        Ok(Self {
            font,
            height_per_em,
            scale: px_scale(height_per_em, pts, dpi),
        })
    }
}

/// `ab_glyph` scale for `pts` at `dpi`.
fn px_scale(height_per_em: f32, pts: f32, dpi: f32) -> PxScale {
    let px_per_em = pts * dpi / POINTS_PER_INCH;
    PxScale::from(px_per_em * height_per_em)
}

impl FontFace for TrueTypeFace {
    fn metrics(&self) -> FaceMetrics {
        let scaled = self.font.as_scaled(self.scale);
        FaceMetrics {
            ascent: scaled.ascent(),
            descent: -scaled.descent(),
            line_height: scaled.height() + scaled.line_gap(),
        }
    }

    fn advance(&self, ch: char) -> Option<f32> {
        let id = self.font.glyph_id(ch);
        if id.0 == 0 {
            // .notdef
            return None;
        }
        Some(self.font.as_scaled(self.scale).h_advance(id))
    }

    fn draw(&self, ctx: &mut DrawingContext, text: &str, origin: Point) {
        let scale = px_scale(self.height_per_em, ctx.pts(), ctx.dpi());
        let scaled = self.font.as_scaled(scale);
        let line_height = scaled.height() + scaled.line_gap();
        let hinting = ctx.hinting();
        let mut caret = origin.x;
        let mut baseline = origin.y;

        for ch in text.chars() {
            if ch == '\n' {
                caret = origin.x;
                baseline += line_height;
                continue;
            }
            let mut glyph = scaled.scaled_glyph(ch);
            let advance = scaled.h_advance(glyph.id);
            glyph.position = match hinting {
                Hinting::Full => ab_glyph::point(caret.round(), baseline.round()),
                Hinting::None => ab_glyph::point(caret, baseline),
            };

            match self.font.outline_glyph(glyph) {
                Some(outlined) => {
                    let bounds = outlined.px_bounds();
                    let (left, top) = (bounds.min.x as i64, bounds.min.y as i64);
                    outlined.draw(|x, y, coverage| {
                        ctx.plot(left + x as i64, top + y as i64, coverage);
                    });
                }
                None => {
                    if !ch.is_whitespace() {
                        trace!("TrueTypeFace: No outline for '{}' (U+{:04X})", ch, ch as u32);
                    }
                }
            }
            caret += advance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorMode, Palette, BLACK};
    use crate::rasterizer::context::ContextParams;
    use crate::rasterizer::CellGeometry;
    use image::RgbaImage;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");

    fn fixture(pts: f32, dpi: f32) -> TrueTypeFace {
        TrueTypeFace::from_path(FIXTURE, pts, dpi).unwrap()
    }

    fn params(pts: f32, dpi: f32, hinting: Hinting) -> ContextParams {
        ContextParams {
            palette: Palette::for_mode(ColorMode::Dark),
            dpi,
            pts,
            hinting,
        }
    }

    fn render(
        face: &TrueTypeFace,
        params: ContextParams,
        (width, height): (u32, u32),
        text: &str,
        origin: Point,
    ) -> RgbaImage {
        let mut ctx = DrawingContext::new(params, width, height);
        face.draw(&mut ctx, text, origin);
        ctx.into_image()
    }

    fn ink(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| **p != BLACK).count()
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = TrueTypeFace::from_path("/definitely/not/here.ttf", 20.0, 72.0)
            .err()
            .unwrap();
        assert!(matches!(err, RenderError::FontRead { .. }), "got {:?}", err);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "glyph-strip-garbage-{}.ttf",
            std::process::id()
        ));
        fs::write(&path, b"this is not a font").unwrap();
        let result = TrueTypeFace::from_path(&path, 20.0, 72.0);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(RenderError::FontParse { .. })));
    }

    #[test]
    fn metrics_and_advance_follow_the_size() {
        let face = fixture(20.0, 72.0);
        let metrics = face.metrics();
        assert!(metrics.ascent > 0.0 && metrics.descent > 0.0, "{:?}", metrics);
        // 20pt at 72dpi is a 20px em; ascent + descent spans a bit more
        let span = metrics.ascent + metrics.descent;
        assert!(span > 20.0 && span < 30.0, "span {}", span);

        let advance = face.advance('$').unwrap();
        assert!(advance > 0.0);
        // Doubling the dpi doubles every pixel measure
        let doubled = fixture(20.0, 144.0);
        assert!((doubled.advance('$').unwrap() - 2.0 * advance).abs() < 0.01);
        assert!((doubled.metrics().ascent - 2.0 * metrics.ascent).abs() < 0.01);
    }

    #[test]
    fn uncovered_char_has_no_advance() {
        assert_eq!(fixture(20.0, 72.0).advance('\u{10FFFD}'), None);
    }

    #[test]
    fn descender_fits_inside_the_cell() {
        let face = fixture(20.0, 72.0);
        let geometry = CellGeometry::resolve(&face, 0, 0, '$').unwrap();
        let origin = Point::new(0.0, geometry.baseline);
        let params = params(20.0, 72.0, Hinting::Full);

        let cell = render(&face, params, (geometry.width, geometry.height), "g", origin);
        let roomy = render(&face, params, (geometry.width + 20, geometry.height + 20), "g", origin);

        assert!(ink(&cell) > 0);
        assert_eq!(ink(&cell), ink(&roomy), "glyph was clipped by the cell");
        let baseline_row = geometry.baseline as u32;
        let below = (baseline_row..geometry.height)
            .flat_map(|y| (0..geometry.width).map(move |x| (x, y)))
            .filter(|&(x, y)| *cell.get_pixel(x, y) != BLACK)
            .count();
        assert!(below > 0, "descender of 'g' should reach below the baseline");
    }

    #[test]
    fn draw_uses_the_context_size() {
        let face = fixture(20.0, 72.0);
        let origin = Point::new(0.0, 40.0);
        let size = (60, 60);

        let small = render(&face, params(20.0, 72.0, Hinting::Full), size, "H", origin);
        let large = render(&face, params(40.0, 72.0, Hinting::Full), size, "H", origin);
        let high_dpi = render(&face, params(20.0, 144.0, Hinting::Full), size, "H", origin);

        assert!(ink(&large) > 2 * ink(&small), "{} vs {}", ink(&large), ink(&small));
        assert_eq!(large, high_dpi);
    }

    #[test]
    fn newline_moves_down_one_line_height() {
        let face = fixture(20.0, 72.0);
        let line_height = face.metrics().line_height;
        let full = params(20.0, 72.0, Hinting::Full);
        let size = (24, 60);
        let origin = Point::new(0.0, 19.0);

        let one = render(&face, full, size, "H", origin);
        let two = render(&face, full, size, "H\nH", origin);
        assert_eq!(ink(&two), 2 * ink(&one));

        let blank_row = |y: u32| (0..size.0).all(|x| *two.get_pixel(x, y) == BLACK);
        let next_baseline = (19.0 + line_height).round() as u32;
        assert!(next_baseline < size.1);
        assert!(!blank_row(next_baseline - 1), "second line should sit on its baseline");
        assert!((20..next_baseline).any(blank_row), "lines should not touch");
    }

    #[test]
    fn full_hinting_snaps_fractional_origins() {
        let face = fixture(20.0, 72.0);
        let size = (24, 24);
        let whole = Point::new(0.0, 19.0);
        let fractional = Point::new(0.4, 19.3);

        let full = params(20.0, 72.0, Hinting::Full);
        assert_eq!(
            render(&face, full, size, "H", fractional),
            render(&face, full, size, "H", whole)
        );

        let none = params(20.0, 72.0, Hinting::None);
        assert_ne!(
            render(&face, none, size, "H", fractional),
            render(&face, none, size, "H", whole)
        );
    }
}
