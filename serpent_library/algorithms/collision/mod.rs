//! Terminal-condition checks
//!
//! Both checks are pure and only look at the head:
//!
//! - **Bounds**: the head is out when it lies strictly outside
//!   `[0, width] x [0, height]`. Touching an edge is still alive.
//! - **Self-overlap**: the head dies when it is strictly closer than
//!   `1.5 * radius` to any segment from index 2 on. Segment 1 always sits
//!   next to the head and is never tested.

use crate::algorithms::segment_chain::Body;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a tick ended the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    OutOfBounds,
    SelfCollision,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeathCause::OutOfBounds => f.write_str("left the playfield"),
            DeathCause::SelfCollision => f.write_str("ran into itself"),
        }
    }
}

pub fn is_out_of_bounds(point: &Point2<f64>, width: f64, height: f64) -> bool {
    point.x < 0.0 || point.x > width || point.y < 0.0 || point.y > height
}

pub fn has_self_collision(body: &Body, segment_radius: f64) -> bool {
    let head = body.head().position;
    let threshold = 1.5 * segment_radius;
    body.iter()
        .skip(2)
        .any(|segment| nalgebra::distance(&head, &segment.position) < threshold)
}

/// Bounds first, then self-overlap
pub fn check(body: &Body, width: f64, height: f64, segment_radius: f64) -> Option<DeathCause> {
    if is_out_of_bounds(&body.head().position, width, height) {
        Some(DeathCause::OutOfBounds)
    } else if has_self_collision(body, segment_radius) {
        Some(DeathCause::SelfCollision)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::segment_chain::{bud, ChainParams};
    use crate::algorithms::shading::{Shading, HEAD_COLOR};

    const RADIUS: f64 = 10.0;

    /// Head at the origin followed by segments at the given points
    fn body_with(points: &[(f64, f64)]) -> Body {
        let params = ChainParams::new(4.0, RADIUS);
        let mut body = Body::new(Point2::new(0.0, 0.0), 0.0, HEAD_COLOR);
        for _ in points {
            bud(&mut body, Shading::SineWave, &params);
        }
        for (segment, &(x, y)) in body.segments_mut()[1..].iter_mut().zip(points) {
            segment.position = Point2::new(x, y);
        }
        body
    }

    #[test]
    fn test_edges_are_inside() {
        assert!(!is_out_of_bounds(&Point2::new(0.0, 0.0), 400.0, 300.0));
        assert!(!is_out_of_bounds(&Point2::new(400.0, 300.0), 400.0, 300.0));
        assert!(!is_out_of_bounds(&Point2::new(400.0 - 1e-9, 150.0), 400.0, 300.0));
    }

    #[test]
    fn test_beyond_each_edge_is_out() {
        assert!(is_out_of_bounds(&Point2::new(-0.001, 10.0), 400.0, 300.0));
        assert!(is_out_of_bounds(&Point2::new(400.001, 10.0), 400.0, 300.0));
        assert!(is_out_of_bounds(&Point2::new(10.0, -0.001), 400.0, 300.0));
        assert!(is_out_of_bounds(&Point2::new(10.0, 300.001), 400.0, 300.0));
    }

    #[test]
    fn test_threshold_distance_is_alive() {
        let body = body_with(&[(100.0, 0.0), (1.5 * RADIUS, 0.0)]);
        assert!(!has_self_collision(&body, RADIUS));
    }

    #[test]
    fn test_just_inside_threshold_is_dead() {
        let body = body_with(&[(100.0, 0.0), (1.5 * RADIUS - 1e-6, 0.0)]);
        assert!(has_self_collision(&body, RADIUS));
        assert_eq!(check(&body, 400.0, 400.0, RADIUS), Some(DeathCause::SelfCollision));
    }

    #[test]
    fn test_second_segment_is_exempt() {
        let body = body_with(&[(0.0, 0.0)]);
        assert!(!has_self_collision(&body, RADIUS));
    }

    #[test]
    fn test_bounds_take_precedence() {
        let mut body = body_with(&[(100.0, 0.0), (1.0, 0.0)]);
        body.segments_mut()[0].position = Point2::new(-1.0, 0.0);
        assert_eq!(check(&body, 400.0, 400.0, RADIUS), Some(DeathCause::OutOfBounds));
    }

    #[test]
    fn test_single_head_is_alive() {
        let body = Body::new(Point2::new(200.0, 200.0), 0.0, HEAD_COLOR);
        assert_eq!(check(&body, 400.0, 400.0, RADIUS), None);
    }
}
