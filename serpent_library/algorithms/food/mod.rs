//! Food capture and placement
//!
//! Food is captured when the head's circle and the food's circle overlap
//! (`distance < food_radius + segment_radius`). New food lands uniformly in
//! the playfield shrunk by `margin` of each dimension on every side, so with
//! the default margin of 0.1 it appears between 10 % and 90 % of the width
//! and of the height.

use nalgebra::Point2;
use rand::distributions::Open01;
use rand::Rng;

pub const DEFAULT_MARGIN: f64 = 0.1;

pub fn is_captured(
    food: &Point2<f64>,
    head: &Point2<f64>,
    food_radius: f64,
    segment_radius: f64,
) -> bool {
    nalgebra::distance(food, head) < food_radius + segment_radius
}

/// Uniform position strictly inside the inset rectangle
///
/// `margin` must lie in `[0, 0.5)`; callers validate it once up front.
/// Sampling from the open interval keeps food off the edges even when
/// `margin` is zero.
pub fn relocate<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, margin: f64) -> Point2<f64> {
    let span = 1.0 - 2.0 * margin;
    Point2::new(
        rng.sample::<f64, _>(Open01) * width * span + width * margin,
        rng.sample::<f64, _>(Open01) * height * span + height * margin,
    )
}

/// Where food sits right after a reset
pub fn start_position(width: f64, height: f64) -> Point2<f64> {
    Point2::new(width / 4.0, height / 2.0)
}
