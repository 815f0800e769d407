//! Per-glyph drawing context.
//!
//! A `DrawingContext` owns its destination buffer. It is created already
//! filled with the background color, handed to the font face for exactly one
//! draw call, then consumed into the finished glyph pixels.

use crate::color::{blend, Palette};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Glyph pixel snapping. Passed through to the font face untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Hinting {
    None,
    #[default]
    Full,
}

impl FromStr for Hinting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Hinting::None),
            "full" => Ok(Hinting::Full),
            _ => Err(format!(
                "unknown hinting \"{s}\": expected \"none\" or \"full\""
            )),
        }
    }
}

impl fmt::Display for Hinting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hinting::None => write!(f, "none"),
            Hinting::Full => write!(f, "full"),
        }
    }
}

/// A point in destination pixel space. `y` is the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Region of the destination that drawing may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ClipRect {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64
            && y >= self.y as i64
            && x < self.x as i64 + self.width as i64
            && y < self.y as i64 + self.height as i64
    }
}

/// The immutable part of every drawing context in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextParams {
    pub palette: Palette,
    pub dpi: f32,
    pub pts: f32,
    pub hinting: Hinting,
}

#[derive(Debug)]
pub struct DrawingContext {
    params: ContextParams,
    dst: RgbaImage,
    clip: ClipRect,
}

impl DrawingContext {
    /// Allocate a `width` x `height` destination filled with the background
    /// color, clipped to its own bounds.
    pub fn new(params: ContextParams, width: u32, height: u32) -> Self {
        let dst = RgbaImage::from_pixel(width, height, params.palette.bg());
        Self {
            params,
            dst,
            clip: ClipRect {
                x: 0,
                y: 0,
                width,
                height,
            },
        }
    }

    pub fn fg(&self) -> Rgba<u8> {
        self.params.palette.fg()
    }

    pub fn dpi(&self) -> f32 {
        self.params.dpi
    }

    pub fn pts(&self) -> f32 {
        self.params.pts
    }

    pub fn hinting(&self) -> Hinting {
        self.params.hinting
    }

    /// Blend the foreground into the pixel at (`x`, `y`) by `coverage`.
    /// Pixels outside the clip rectangle are ignored.
    pub fn plot(&mut self, x: i64, y: i64, coverage: f32) {
        if coverage <= 0.0 || !self.clip.contains(x, y) {
            return;
        }
        let fg = self.fg();
        let pixel = self.dst.get_pixel_mut(x as u32, y as u32);
        *pixel = blend(fg, *pixel, coverage);
    }

    pub fn into_image(self) -> RgbaImage {
        self.dst
    }
}
