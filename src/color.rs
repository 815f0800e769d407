// src/color.rs

//! Foreground/background color selection.
//!
//! Strips are always drawn with one of two contrasting pairs: white-on-black
//! (dark mode, the default) or black-on-white (light mode). `Palette` can only
//! be built from a `ColorMode`, so an equal foreground/background pair cannot
//! exist.

use image::Rgba;
use serde::{Deserialize, Serialize};

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Light or dark rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// White glyphs on a black background.
    #[default]
    Dark,
    /// Black glyphs on a white background.
    Light,
}

impl ColorMode {
    pub fn from_light_flag(light: bool) -> Self {
        if light {
            ColorMode::Light
        } else {
            ColorMode::Dark
        }
    }
}

/// A contrasting foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    fg: Rgba<u8>,
    bg: Rgba<u8>,
}

impl Palette {
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Dark => Palette { fg: WHITE, bg: BLACK },
            ColorMode::Light => Palette { fg: BLACK, bg: WHITE },
        }
    }

    pub fn fg(&self) -> Rgba<u8> {
        self.fg
    }

    pub fn bg(&self) -> Rgba<u8> {
        self.bg
    }
}

/// Blend `fg` over `bg` by glyph coverage (0.0 = background, 1.0 = foreground).
///
/// The result is always opaque.
pub fn blend(fg: Rgba<u8>, bg: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let alpha = coverage.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (f as f32 * alpha + b as f32 * (1.0 - alpha)).round() as u8;
    Rgba([
        mix(fg.0[0], bg.0[0]),
        mix(fg.0[1], bg.0[1]),
        mix(fg.0[2], bg.0[2]),
        255,
    ])
}
