//! Segment Chain
//!
//! The snake's body as an ordered chain of circles. Index 0 is the head and
//! is the only segment steered directly; every other segment derives its
//! motion from the one in front of it.
//!
//! # Follow modes
//!
//! - **Spring** (default): a follower moves straight towards its leader by
//!   however far the gap exceeds `speed + 1.5 * radius`. Inside that
//!   dead-zone it rests.
//! - **Rigid**: a follower copies the heading its leader had on the previous
//!   tick and moves at full speed. A newly budded segment waits
//!   `ceil(1.5 * radius / speed)` ticks first so the chain opens a gap.
//!
//! Followers are processed in index order and see their leader's position
//! as already updated this tick.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::Point2;
//! use serpent_library::algorithms::segment_chain::{advance, bud, Body, ChainParams};
//! use serpent_library::algorithms::shading::{Shading, HEAD_COLOR};
//!
//! let params = ChainParams::new(4.0, 10.0);
//! let mut body = Body::new(Point2::new(300.0, 200.0), std::f64::consts::PI, HEAD_COLOR);
//!
//! bud(&mut body, Shading::SineWave, &params);
//! advance(&mut body, 0.0, &params);
//!
//! assert_eq!(body.len(), 2);
//! assert!((body.head().position.x - 296.0).abs() < 1e-9);
//! ```

use crate::algorithms::shading::{Rgba, Shading};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How trailing segments follow their leader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowMode {
    #[default]
    Spring,
    Rigid,
}

impl fmt::Display for FollowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowMode::Spring => f.write_str("spring"),
            FollowMode::Rigid => f.write_str("rigid"),
        }
    }
}

/// One circle of the body
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub position: Point2<f64>,
    /// Direction of travel (radians); for the head this is the snake's heading
    pub heading: f64,
    pub color: Rgba,
    /// Ticks left before a freshly budded rigid follower starts moving
    pub settle_ticks: u32,
}

/// Motion constants shared by every segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainParams {
    pub speed: f64,
    pub segment_radius: f64,
    pub follow_mode: FollowMode,
}

impl ChainParams {
    pub fn new(speed: f64, segment_radius: f64) -> Self {
        Self {
            speed,
            segment_radius,
            follow_mode: FollowMode::Spring,
        }
    }

    pub fn with_follow_mode(mut self, follow_mode: FollowMode) -> Self {
        self.follow_mode = follow_mode;
        self
    }

    /// Gap a spring follower keeps from its leader without moving
    pub fn dead_zone(&self) -> f64 {
        self.speed + 1.5 * self.segment_radius
    }

    /// Ticks a rigid follower waits after budding
    pub fn settle_ticks(&self) -> u32 {
        (1.5 * self.segment_radius / self.speed).ceil() as u32
    }
}

/// Ordered, never-empty chain of segments
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    segments: Vec<Segment>,
}

#[allow(clippy::len_without_is_empty)]
impl Body {
    /// A body made of a single head segment
    pub fn new(head: Point2<f64>, heading: f64, color: Rgba) -> Self {
        Self {
            segments: vec![Segment {
                position: head,
                heading,
                color,
                settle_ticks: 0,
            }],
        }
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn heading(&self) -> f64 {
        self.head().heading
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Mutable access for tools and tests that need to stage a layout
    pub fn segments_mut(&mut self) -> &mut [Segment] {
        &mut self.segments
    }
}

impl<'a> IntoIterator for &'a Body {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

fn unit(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}

/// Advance the whole chain by one tick
///
/// `turn` is added to the head's heading before the head moves `speed`
/// pixels along it.
pub fn advance(body: &mut Body, turn: f64, params: &ChainParams) {
    let (head, followers) = body.segments.split_at_mut(1);
    let head = &mut head[0];

    // Rigid followers need the headings from before this tick
    let mut leader_heading = head.heading;

    head.heading += turn;
    head.position += unit(head.heading) * params.speed;

    let mut leader = head.position;
    for segment in followers.iter_mut() {
        match params.follow_mode {
            FollowMode::Spring => spring_follow(segment, leader, params),
            FollowMode::Rigid => {
                let previous = segment.heading;
                rigid_follow(segment, leader_heading, params);
                leader_heading = previous;
            }
        }
        leader = segment.position;
    }
}

fn spring_follow(segment: &mut Segment, leader: Point2<f64>, params: &ChainParams) {
    let offset = leader - segment.position;
    let distance = offset.norm();
    let velocity = (distance - params.dead_zone()).max(0.0);
    if velocity > 0.0 {
        let angle = offset.y.atan2(offset.x);
        segment.position += unit(angle) * velocity;
        segment.heading = angle;
    }
}

fn rigid_follow(segment: &mut Segment, leader_heading: f64, params: &ChainParams) {
    if segment.settle_ticks > 0 {
        segment.settle_ticks -= 1;
        return;
    }
    segment.heading = leader_heading;
    segment.position += unit(segment.heading) * params.speed;
}

/// Grow the body by one segment placed on the current tail
///
/// Returns the new length.
pub fn bud(body: &mut Body, shading: Shading, params: &ChainParams) -> usize {
    let index = body.len();
    let tail = body.tail();
    let settle_ticks = match params.follow_mode {
        FollowMode::Spring => 0,
        FollowMode::Rigid => params.settle_ticks(),
    };

    let segment = Segment {
        position: tail.position,
        heading: tail.heading,
        color: shading.segment_color(index),
        settle_ticks,
    };
    body.segments.push(segment);
    body.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::shading::HEAD_COLOR;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn params() -> ChainParams {
        ChainParams::new(4.0, 10.0)
    }

    fn body_at(x: f64, y: f64, heading: f64) -> Body {
        Body::new(Point2::new(x, y), heading, HEAD_COLOR)
    }

    #[test]
    fn test_head_moves_along_heading() {
        let mut body = body_at(300.0, 200.0, PI);
        advance(&mut body, 0.0, &params());

        assert_relative_eq!(body.head().position.x, 296.0, epsilon = 1e-9);
        assert_relative_eq!(body.head().position.y, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_turn_is_applied_before_moving() {
        let mut body = body_at(0.0, 0.0, 0.0);
        advance(&mut body, PI / 2.0, &params());

        assert_relative_eq!(body.heading(), PI / 2.0);
        assert_relative_eq!(body.head().position.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(body.head().position.y, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_follower_rests_inside_dead_zone() {
        let params = params();
        let mut body = body_at(100.0, 100.0, 0.0);
        bud(&mut body, Shading::SineWave, &params);
        // Leader ends up exactly dead_zone ahead after moving
        body.segments_mut()[1].position = Point2::new(100.0 + 4.0 - params.dead_zone(), 100.0);

        advance(&mut body, 0.0, &params);
        assert_relative_eq!(body.segments()[1].position.x, 104.0 - params.dead_zone());
    }

    #[test]
    fn test_follower_closes_excess_gap() {
        let params = params();
        let mut body = body_at(100.0, 100.0, 0.0);
        bud(&mut body, Shading::SineWave, &params);
        body.segments_mut()[1].position = Point2::new(50.0, 100.0);

        advance(&mut body, 0.0, &params);

        // Leader at 104, gap 54, dead-zone 19 -> moves 35
        assert_relative_eq!(body.segments()[1].position.x, 85.0, epsilon = 1e-9);
        assert_relative_eq!(
            body.head().position.x - body.segments()[1].position.x,
            params.dead_zone(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_followers_see_updated_leader() {
        let params = params();
        let mut body = body_at(100.0, 0.0, 0.0);
        bud(&mut body, Shading::SineWave, &params);
        bud(&mut body, Shading::SineWave, &params);
        body.segments_mut()[1].position = Point2::new(60.0, 0.0);
        body.segments_mut()[2].position = Point2::new(0.0, 0.0);

        advance(&mut body, 0.0, &params);

        // Segment 1 moves to 104 - 19 = 85; segment 2 chases 85, not 60
        assert_relative_eq!(body.segments()[1].position.x, 85.0, epsilon = 1e-9);
        assert_relative_eq!(body.segments()[2].position.x, 66.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bud_copies_tail_position() {
        let params = params();
        let mut body = body_at(10.0, 20.0, 0.0);
        bud(&mut body, Shading::SineWave, &params);
        body.segments_mut()[1].position = Point2::new(3.0, 4.0);

        let tail_before = body.tail().position;
        let length = bud(&mut body, Shading::SineWave, &params);

        assert_eq!(length, 3);
        assert_eq!(body.tail().position, tail_before);
        assert_eq!(body.tail().color, Shading::SineWave.segment_color(2));
        assert_eq!(body.tail().settle_ticks, 0);
    }

    #[test]
    fn test_rigid_bud_settles_first() {
        let params = params().with_follow_mode(FollowMode::Rigid);
        assert_eq!(params.settle_ticks(), 4); // ceil(15 / 4)

        let mut body = body_at(100.0, 100.0, 0.0);
        bud(&mut body, Shading::Solid, &params);

        for _ in 0..4 {
            advance(&mut body, 0.0, &params);
            assert_relative_eq!(body.segments()[1].position.x, 100.0);
        }
        advance(&mut body, 0.0, &params);
        assert_relative_eq!(body.segments()[1].position.x, 104.0, epsilon = 1e-9);
        // Gap opened while settling is kept
        assert_relative_eq!(
            body.head().position.x - body.segments()[1].position.x,
            16.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_rigid_follower_lags_one_tick_in_heading() {
        let params = params().with_follow_mode(FollowMode::Rigid);
        let mut body = body_at(100.0, 100.0, 0.0);
        bud(&mut body, Shading::Solid, &params);
        body.segments_mut()[1].settle_ticks = 0;
        body.segments_mut()[1].position = Point2::new(84.0, 100.0);

        advance(&mut body, PI / 2.0, &params);
        // Follower still uses the head's old heading (0)
        assert_relative_eq!(body.segments()[1].heading, 0.0);
        assert_relative_eq!(body.segments()[1].position.x, 88.0, epsilon = 1e-9);

        advance(&mut body, 0.0, &params);
        assert_relative_eq!(body.segments()[1].heading, PI / 2.0);
        assert_relative_eq!(body.segments()[1].position.y, 104.0, epsilon = 1e-9);
    }

    #[test]
    fn test_body_iteration_is_head_first() {
        let params = params();
        let mut body = body_at(1.0, 1.0, 0.0);
        bud(&mut body, Shading::Solid, &params);
        let colors: Vec<Rgba> = (&body).into_iter().map(|s| s.color).collect();
        assert_eq!(colors[0], HEAD_COLOR);
        assert_eq!(body.iter().count(), 2);
    }
}
