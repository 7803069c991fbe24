use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use serpent_core::error::{SerpentError, SerpentResult};

/// The rectangle the snake lives in, fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayfield")]
pub struct Playfield {
    width: f64,
    height: f64,
}

impl Playfield {
    pub fn new(width: f64, height: f64) -> SerpentResult<Self> {
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(SerpentError::config(format!(
                "playfield must have a positive size, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Where the head spawns after every reset
    pub fn start_position(&self) -> Point2<f64> {
        Point2::new(self.width * 3.0 / 4.0, self.height / 2.0)
    }
}

#[derive(Deserialize)]
struct RawPlayfield {
    width: f64,
    height: f64,
}

impl TryFrom<RawPlayfield> for Playfield {
    type Error = SerpentError;

    fn try_from(raw: RawPlayfield) -> SerpentResult<Self> {
        Playfield::new(raw.width, raw.height)
    }
}
