//! Headless font face: deterministic monospace block glyphs.
//!
//! Every non-whitespace character is drawn as a solid box one pixel inside its
//! cell, from the ascent line down to the baseline. Whitespace draws nothing.
//! Used by tests and by `--headless` dry runs where no font file is available.
//! Glyph size is fixed at construction; the context's point size and DPI are
//! not consulted.

use super::context::{DrawingContext, Point};
use super::font_face::{FaceMetrics, FontFace};

#[derive(Debug, Clone)]
pub struct HeadlessFace {
    advance: f32,
    ascent: f32,
    descent: f32,
    missing: Vec<char>,
}

impl HeadlessFace {
    pub fn new(advance: f32, ascent: f32, descent: f32) -> Self {
        Self {
            advance,
            ascent,
            descent,
            missing: Vec::new(),
        }
    }

    /// Pretend the face has no glyph for any of `chars`.
    pub fn with_missing(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.missing.extend(chars);
        self
    }
}

impl Default for HeadlessFace {
    fn default() -> Self {
        Self::new(8.0, 12.0, 4.0)
    }
}

impl FontFace for HeadlessFace {
    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            ascent: self.ascent,
            descent: self.descent,
            line_height: self.ascent + self.descent,
        }
    }

    fn advance(&self, ch: char) -> Option<f32> {
        if self.missing.contains(&ch) {
            None
        } else {
            Some(self.advance)
        }
    }

    fn draw(&self, ctx: &mut DrawingContext, text: &str, origin: Point) {
        let advance = self.advance.round() as i64;
        let line_height = self.metrics().line_height.round() as i64;
        let mut top = (origin.y - self.ascent).round() as i64 + 1;
        let mut bottom = origin.y.round() as i64;
        let mut left = origin.x.round() as i64;

        for ch in text.chars() {
            if ch == '\n' {
                left = origin.x.round() as i64;
                top += line_height;
                bottom += line_height;
                continue;
            }
            if !ch.is_whitespace() && !self.missing.contains(&ch) {
                for y in top..bottom {
                    for x in (left + 1)..(left + advance - 1) {
                        ctx.plot(x, y, 1.0);
                    }
                }
            }
            left += advance;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorMode, Palette, BLACK, WHITE};
    use crate::rasterizer::context::{ContextParams, Hinting};

    fn context(width: u32, height: u32) -> DrawingContext {
        DrawingContext::new(
            ContextParams {
                palette: Palette::for_mode(ColorMode::Dark),
                dpi: 72.0,
                pts: 12.0,
                hinting: Hinting::None,
            },
            width,
            height,
        )
    }

    #[test]
    fn draws_a_box_inside_the_cell() {
        let face = HeadlessFace::default();
        let mut ctx = context(8, 16);
        face.draw(&mut ctx, "H", Point::new(0.0, 12.0));
        let img = ctx.into_image();

        // Columns 1..7, rows 1..12
        assert_eq!(*img.get_pixel(1, 1), WHITE);
        assert_eq!(*img.get_pixel(6, 11), WHITE);
        assert_eq!(*img.get_pixel(0, 5), BLACK);
        assert_eq!(*img.get_pixel(7, 5), BLACK);
        assert_eq!(*img.get_pixel(3, 0), BLACK);
        assert_eq!(*img.get_pixel(3, 12), BLACK);
        assert_eq!(img.pixels().filter(|p| **p == WHITE).count(), 6 * 11);
    }

    #[test]
    fn whitespace_draws_nothing() {
        let face = HeadlessFace::default();
        let mut ctx = context(8, 16);
        face.draw(&mut ctx, " ", Point::new(0.0, 12.0));
        assert!(ctx.into_image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn newline_starts_a_new_line() {
        let face = HeadlessFace::default();
        let mut ctx = context(16, 32);
        face.draw(&mut ctx, "ab\nc", Point::new(0.0, 12.0));
        let img = ctx.into_image();

        assert_eq!(img.pixels().filter(|p| **p == WHITE).count(), 3 * 66);
        // 'c' sits one 16px line below 'a'
        assert_eq!(*img.get_pixel(1, 17), WHITE);
        assert_eq!(*img.get_pixel(9, 17), BLACK);
    }

    #[test]
    fn missing_glyphs_have_no_advance() {
        let face = HeadlessFace::default().with_missing(['$']);
        assert_eq!(face.advance('$'), None);
        assert_eq!(face.advance('0'), Some(8.0));
    }
}
