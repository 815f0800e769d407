//! Font face abstraction.
//!
//! This module defines the `FontFace` trait, the narrow surface the rasterizer
//! needs from a font engine: sized metrics, per-character advances, and a draw
//! primitive that renders a string into a `DrawingContext`.

use super::context::{DrawingContext, Point};

/// Vertical metrics of a sized face, in pixels.
///
/// `descent` is stored as a positive distance below the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    pub ascent: f32,
    pub descent: f32,
    /// Baseline-to-baseline distance.
    pub line_height: f32,
}

/// A loaded font at a fixed rendering size.
///
/// Implementors must be safe to share read-only between pipeline stages.
pub trait FontFace: Send + Sync {
    /// Vertical metrics at the face's size.
    fn metrics(&self) -> FaceMetrics;

    /// Horizontal advance of `ch` in pixels.
    ///
    /// # Returns
    /// `None` if the face has no glyph for `ch`.
    fn advance(&self, ch: char) -> Option<f32>;

    /// Draw `text` with the context's foreground color, starting at `origin`
    /// (`origin.y` is the baseline). A `'\n'` returns to `origin.x` one line
    /// height further down. Drawing is clipped to the context's clip
    /// rectangle.
    fn draw(&self, ctx: &mut DrawingContext, text: &str, origin: Point);
}
