use crate::algorithms::shading::Rgba;
use serde::{Deserialize, Serialize};
use serpent_core::core::LogSummary;

/// A circle of the body as the renderer should draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgba,
}

/// Everything a presentation layer needs for one frame
///
/// Segments are ordered head first. Renderers that want later segments
/// drawn underneath earlier ones paint the list in reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Ticks since the game was created
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub segments: Vec<SegmentView>,
    pub food: FoodView,
    /// Resets since the game was created
    pub deaths: u64,
    /// Longest body seen this session
    pub longest: usize,
}

impl FrameSnapshot {
    pub fn head(&self) -> Option<&SegmentView> {
        self.segments.first()
    }

    pub fn length(&self) -> usize {
        self.segments.len()
    }
}

impl LogSummary for FrameSnapshot {
    fn log_summary(&self) -> String {
        match self.head() {
            Some(head) => format!(
                "Frame(tick:{}, len:{}, head:({:.1}, {:.1}), food:({:.1}, {:.1}))",
                self.tick,
                self.length(),
                head.x,
                head.y,
                self.food.x,
                self.food.y
            ),
            None => format!("Frame(tick:{}, empty)", self.tick),
        }
    }
}
