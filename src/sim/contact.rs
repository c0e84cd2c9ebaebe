//! Contact resolution and overlap tests
//!
//! Bodies are axis-aligned rectangles, the bird is a circle. What a contact
//! means for the run is decided by an explicit table over body tags.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::BodyKind;

/// What a contact between two bodies means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Bird entered a gap's score region
    Score,
    /// Bird hit a wall or the ground
    Crash,
    Ignore,
}

/// Pairwise contact table. Any pair involving a score zone scores, whatever
/// the other body is.
pub fn resolve_contact(a: BodyKind, b: BodyKind) -> ContactOutcome {
    use BodyKind::*;
    match (a, b) {
        (ScoreZone, _) | (_, ScoreZone) => ContactOutcome::Score,
        (Bird, Ground | Wall) | (Ground | Wall, Bird) => ContactOutcome::Crash,
        _ => ContactOutcome::Ignore,
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Strict overlap with a circle (touching edges do not count)
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        center.distance_squared(closest) < radius * radius
    }
}

/// Smallest translation that moves the circle out of the rectangle, if they
/// overlap
pub fn circle_rect_push(center: Vec2, radius: f32, rect: &Rect) -> Option<Vec2> {
    let closest = center.clamp(rect.min, rect.max);
    let delta = center - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius * radius {
        return None;
    }

    if dist_sq > f32::EPSILON {
        let dist = dist_sq.sqrt();
        return Some(delta / dist * (radius - dist));
    }

    // Centre inside the rectangle: exit through the nearest side
    let exits = [
        (center.x - rect.min.x, Vec2::NEG_X),
        (rect.max.x - center.x, Vec2::X),
        (center.y - rect.min.y, Vec2::NEG_Y),
        (rect.max.y - center.y, Vec2::Y),
    ];
    let (depth, dir) = exits
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, Vec2::Y));
    Some(dir * (depth + radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_table() {
        use BodyKind::*;
        assert_eq!(resolve_contact(Bird, ScoreZone), ContactOutcome::Score);
        assert_eq!(resolve_contact(ScoreZone, Bird), ContactOutcome::Score);
        assert_eq!(resolve_contact(Wall, ScoreZone), ContactOutcome::Score);
        assert_eq!(resolve_contact(Bird, Wall), ContactOutcome::Crash);
        assert_eq!(resolve_contact(Ground, Bird), ContactOutcome::Crash);
        assert_eq!(resolve_contact(Wall, Ground), ContactOutcome::Ignore);
        assert_eq!(resolve_contact(Bird, Bird), ContactOutcome::Ignore);
    }

    #[test]
    fn test_circle_overlap_is_strict() {
        let rect = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(rect.intersects_circle(Vec2::new(12.0, 5.0), 3.0));
        assert!(!rect.intersects_circle(Vec2::new(13.0, 5.0), 3.0));
        // Corner region uses true distance
        assert!(!rect.intersects_circle(Vec2::new(12.5, 12.5), 3.0));
    }

    #[test]
    fn test_push_out_of_edge() {
        let ground = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 80.0));
        let push = circle_rect_push(Vec2::new(50.0, 90.0), 15.0, &ground).unwrap();
        assert!(push.abs_diff_eq(Vec2::new(0.0, 5.0), 1e-4));
        assert!(circle_rect_push(Vec2::new(50.0, 95.0), 15.0, &ground).is_none());
    }

    #[test]
    fn test_push_from_inside_uses_nearest_side() {
        let wall = Rect::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(60.0, 400.0));
        let push = circle_rect_push(Vec2::new(-25.0, 0.0), 10.0, &wall).unwrap();
        assert!(push.abs_diff_eq(Vec2::new(-15.0, 0.0), 1e-4));
    }
}
