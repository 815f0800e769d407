// src/compositor.rs

//! Strip compositor: lays the glyph images of one unit side by side.
//!
//! The strip is allocated once at its final size and each glyph is copied
//! opaquely (source replaces destination) at the running x offset, so there
//! is no overlap and no gap between neighbours.

use crate::error::{RenderError, Result};
use crate::rasterizer::GlyphImage;
use image::{imageops, RgbaImage};
use log::*;

/// The composed image for one text unit.
#[derive(Debug, Clone)]
pub struct StripImage {
    index: usize,
    text: String,
    glyphs: Vec<char>,
    image: RgbaImage,
}

impl StripImage {
    /// Sequence index of the unit this strip was built from.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Characters in the order their cells appear, left to right.
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Concatenate `glyphs` left to right into one strip.
///
/// # Errors
/// `EmptyStrip` if `glyphs` is empty, `MismatchedGlyphHeight` if the glyphs
/// are not all the same height.
pub fn compose(index: usize, text: impl Into<String>, glyphs: Vec<GlyphImage>) -> Result<StripImage> {
    let height = match glyphs.first() {
        Some(first) => first.height(),
        None => return Err(RenderError::EmptyStrip),
    };

    let mut width = 0u32;
    for (i, glyph) in glyphs.iter().enumerate() {
        if glyph.height() != height {
            return Err(RenderError::MismatchedGlyphHeight {
                index: i,
                expected: height,
                found: glyph.height(),
            });
        }
        width += glyph.width();
    }

    let mut image = RgbaImage::new(width, height);
    let mut x_offset = 0i64;
    for glyph in &glyphs {
        imageops::replace(&mut image, glyph.pixels(), x_offset, 0);
        x_offset += glyph.width() as i64;
    }

    let text = text.into();
    debug!(
        "Compositor: Strip {} '{}' composed from {} glyphs ({}x{} px)",
        index,
        text,
        glyphs.len(),
        width,
        height
    );

    Ok(StripImage {
        index,
        text,
        glyphs: glyphs.iter().map(GlyphImage::ch).collect(),
        image,
    })
}
