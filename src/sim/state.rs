//! Core simulation types
//!
//! Events flow from the scene into the game core, commands flow back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::Rect;

/// Run lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Bird alive, world scrolling
    Playing,
    /// Crashed; restart waits for the death effect to finish
    Ended,
}

/// Tag carried by every physical body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Bird,
    Ground,
    Wall,
    /// Invisible region next to a gap; entering it scores
    ScoreZone,
}

/// Identity of a body in the world (used to detect contact begins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

impl BodyId {
    pub const GROUND: BodyId = BodyId(0);
}

/// Which bodies physically stop the bird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionMask {
    pub ground: bool,
    pub walls: bool,
}

impl CollisionMask {
    pub const FULL: CollisionMask = CollisionMask {
        ground: true,
        walls: true,
    };
    /// After a crash the bird falls through walls and settles on the ground
    pub const GROUND_ONLY: CollisionMask = CollisionMask {
        ground: true,
        walls: false,
    };

    pub fn collides_with(&self, kind: BodyKind) -> bool {
        match kind {
            BodyKind::Ground => self.ground,
            BodyKind::Wall => self.walls,
            BodyKind::Bird | BodyKind::ScoreZone => false,
        }
    }
}

/// Descriptor of one wall pair and its gap, as produced by the generator.
/// Coordinates are at spawn time; the world scrolls them left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    /// Horizontal centre of both walls at spawn
    pub spawn_x: f32,
    /// Vertical centre of the lower wall
    pub under_wall_y: f32,
    /// Vertical centre of the gap
    pub gap_center_y: f32,
    pub gap_height: f32,
    /// Wall sprite size
    pub wall_size: Vec2,
    /// Region that scores on entry, at spawn position
    pub score_trigger: Rect,
}

impl ObstacleSpec {
    pub fn gap_bottom(&self) -> f32 {
        self.under_wall_y + self.wall_size.y / 2.0
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_bottom() + self.gap_height
    }

    /// Vertical centre of the upper wall
    pub fn upper_wall_y(&self) -> f32 {
        self.under_wall_y + self.wall_size.y + self.gap_height
    }

    pub fn lower_wall_at(&self, x: f32) -> Rect {
        Rect::from_center_size(Vec2::new(x, self.under_wall_y), self.wall_size)
    }

    pub fn upper_wall_at(&self, x: f32) -> Rect {
        Rect::from_center_size(Vec2::new(x, self.upper_wall_y()), self.wall_size)
    }
}

/// A wall pair living in the scrolling world
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Id of the lower wall; upper wall and score zone follow it
    pub first_body: BodyId,
    pub spec: ObstacleSpec,
    /// Distance scrolled since spawn
    pub travelled: f32,
}

impl Obstacle {
    /// Current horizontal centre of the walls
    pub fn x(&self) -> f32 {
        self.spec.spawn_x - self.travelled
    }

    pub fn score_zone(&self) -> Rect {
        self.spec
            .score_trigger
            .translate(Vec2::new(-self.travelled, 0.0))
    }

    /// Every body of this obstacle with its id, tag and current bounds
    pub fn bodies(&self) -> [(BodyId, BodyKind, Rect); 3] {
        let x = self.x();
        let id = self.first_body.0;
        [
            (BodyId(id), BodyKind::Wall, self.spec.lower_wall_at(x)),
            (BodyId(id + 1), BodyKind::Wall, self.spec.upper_wall_at(x)),
            (BodyId(id + 2), BodyKind::ScoreZone, self.score_zone()),
        ]
    }
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False once the death effect has finished (non-interactive)
    pub alive: bool,
    /// Roll angle in radians
    pub rotation: f32,
    pub mask: CollisionMask,
    /// Flap animation frame (0 or 1)
    pub flap_frame: u8,
    #[serde(skip)]
    pub flap_timer: f32,
}

impl Bird {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            alive: true,
            rotation: 0.0,
            mask: CollisionMask::FULL,
            flap_frame: 0,
            flap_timer: 0.0,
        }
    }

    /// Back to the spawn point, at rest and interactive. The collision mask
    /// is left alone.
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.alive = true;
        self.rotation = 0.0;
        self.flap_frame = 0;
        self.flap_timer = 0.0;
    }
}

/// Events delivered by the scene to the game core
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Tap,
    /// Two bodies began touching
    Contact(BodyKind, BodyKind),
    /// Periodic spawn timer fired
    SpawnTick,
    /// Completion signal of `Command::PlayDeathEffect`
    DeathEffectFinished,
}

/// Commands issued by the game core to the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set the bird's velocity (replaces, never adds)
    ImpulseBird(Vec2),
    /// Stop scrolling and spawning
    FreezeWorld,
    ResumeWorld,
    RestrictBirdCollisionToGround,
    RestoreBirdCollisionMask,
    /// Start the death roll; the scene answers with `DeathEffectFinished`
    PlayDeathEffect,
    ResetBirdPosition,
    ClearObstacles,
    SpawnObstacle(ObstacleSpec),
}
