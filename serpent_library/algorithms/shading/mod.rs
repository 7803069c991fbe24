//! Segment colouring
//!
//! Each segment gets its colour once, when it buds; the scheme only decides
//! how the green channel varies with the segment's index.
//!
//! # Example
//!
//! ```rust
//! use serpent_library::algorithms::shading::{Shading, HEAD_COLOR};
//!
//! let second = Shading::SineWave.segment_color(1);
//! assert_eq!(second.r, 0);
//! assert_eq!(Shading::Solid.segment_color(12), HEAD_COLOR);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn green(g: u8) -> Self {
        Self::rgb(0, g, 0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {:.2})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

pub const HEAD_COLOR: Rgba = Rgba::green(125);
pub const FOOD_COLOR: Rgba = Rgba::rgb(0, 0, 255);

const GRADIENT_START: u8 = 200;
const GRADIENT_FLOOR: u8 = 60;
const GRADIENT_STEP: usize = 5;

/// How trailing segments are coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Green oscillating between 50 and 200 with a period of 20 segments
    #[default]
    SineWave,
    /// Green fading from bright near the head to dark towards the tail
    Gradient,
    /// Every segment shares the head colour
    Solid,
}

impl Shading {
    /// Colour for the segment that buds at `index` (the body length before feeding)
    pub fn segment_color(self, index: usize) -> Rgba {
        match self {
            Shading::SineWave => {
                let phase = (index as f64 + 1.0) * PI / 10.0;
                let green = ((phase.sin() + 1.0) / 2.0 * 150.0 + 50.0).floor();
                Rgba::green(green as u8)
            }
            Shading::Gradient => {
                let fade = index.saturating_mul(GRADIENT_STEP);
                let span = (GRADIENT_START - GRADIENT_FLOOR) as usize;
                Rgba::green(GRADIENT_START - fade.min(span) as u8)
            }
            Shading::Solid => HEAD_COLOR,
        }
    }
}

impl fmt::Display for Shading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shading::SineWave => "sine_wave",
            Shading::Gradient => "gradient",
            Shading::Solid => "solid",
        };
        f.write_str(name)
    }
}
