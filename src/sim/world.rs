//! Headless scene driver
//!
//! Plays the host engine's part: bird kinematics, scrolling walls and
//! scenery, the spawn timer, the death roll and contact detection. Events
//! are queued in order and drained by the caller; commands from the game
//! core are applied through `apply`.

use std::collections::{BTreeSet, VecDeque};

use glam::Vec2;

use super::contact::{Rect, circle_rect_push};
use super::state::{Bird, BodyId, BodyKind, CollisionMask, Command, Obstacle, ObstacleSpec, SceneEvent};
use crate::settings::Settings;

/// A horizontally wrapping background layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLayer {
    pub tile_width: f32,
    /// Seconds to scroll one tile
    pub period: f32,
    /// Current leftward offset in `[0, tile_width)`
    pub offset: f32,
}

impl ScrollLayer {
    pub fn new(tile_width: f32, period: f32) -> Self {
        Self {
            tile_width,
            period,
            offset: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.offset = (self.offset + self.tile_width / self.period * dt).rem_euclid(self.tile_width);
    }

    /// Tiles needed to cover a viewport while scrolling
    pub fn tiles_for(&self, viewport_width: f32) -> u32 {
        2 + (viewport_width / self.tile_width) as u32
    }
}

/// Death roll in progress
#[derive(Debug, Clone, Copy, PartialEq)]
struct DeathEffect {
    elapsed: f32,
    duration: f32,
    from: f32,
    by: f32,
}

/// The scrolling world
#[derive(Debug, Clone)]
pub struct World {
    settings: Settings,
    bird: Bird,
    obstacles: Vec<Obstacle>,
    frozen: bool,
    /// Seconds until the next spawn tick
    spawn_timer: f32,
    ground_layer: ScrollLayer,
    cloud_layer: ScrollLayer,
    death_effect: Option<DeathEffect>,
    /// Bodies overlapping the bird after the last step
    touching: BTreeSet<BodyId>,
    events: VecDeque<SceneEvent>,
    next_body: u32,
    time: f32,
}

impl World {
    /// Fresh world: bird at its spawn point, first spawn due immediately
    pub fn new(settings: &Settings) -> Self {
        Self {
            bird: Bird::new(settings.bird_spawn(), settings.bird_radius),
            obstacles: Vec::new(),
            frozen: false,
            spawn_timer: 0.0,
            ground_layer: ScrollLayer::new(settings.ground_tile_width, settings.ground_scroll_period),
            cloud_layer: ScrollLayer::new(settings.cloud_tile_width, settings.cloud_scroll_period),
            death_effect: None,
            touching: BTreeSet::new(),
            events: VecDeque::new(),
            next_body: BodyId::GROUND.0 + 1,
            time: 0.0,
            settings: settings.clone(),
        }
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn ground_layer(&self) -> &ScrollLayer {
        &self.ground_layer
    }

    pub fn cloud_layer(&self) -> &ScrollLayer {
        &self.cloud_layer
    }

    pub fn death_effect_running(&self) -> bool {
        self.death_effect.is_some()
    }

    /// Seconds simulated so far
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn ground_rect(&self) -> Rect {
        Rect::new(
            Vec2::ZERO,
            Vec2::new(self.settings.viewport_width, self.settings.ground_height),
        )
    }

    /// Height of the bird's spawn point
    pub fn bird_spawn_height(&self) -> f32 {
        self.settings.bird_spawn().y
    }

    /// First obstacle whose walls the bird has not yet cleared
    pub fn next_obstacle(&self) -> Option<&Obstacle> {
        let bird_left = self.bird.pos.x - self.bird.radius;
        self.obstacles
            .iter()
            .find(|o| o.x() + o.spec.wall_size.x / 2.0 >= bird_left)
    }

    pub fn push_event(&mut self, event: SceneEvent) {
        self.events.push_back(event);
    }

    pub fn pop_event(&mut self) -> Option<SceneEvent> {
        self.events.pop_front()
    }

    /// Advance by one fixed timestep, queueing any events that occur
    pub fn step(&mut self, dt: f32) {
        self.time += dt;

        if !self.frozen {
            self.advance_spawn_timer(dt);
            self.scroll(dt);
        }

        self.bird.vel.y += self.settings.gravity * dt;
        self.bird.pos += self.bird.vel * dt;

        // Contacts are reported on penetration, before bodies push apart
        self.detect_contacts();
        self.resolve_collisions();

        self.advance_death_effect(dt);
        self.animate_flap(dt);
    }

    /// Apply a command from the game core
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ImpulseBird(vel) => self.bird.vel = vel,
            Command::FreezeWorld => self.frozen = true,
            Command::ResumeWorld => self.frozen = false,
            Command::RestrictBirdCollisionToGround => self.bird.mask = CollisionMask::GROUND_ONLY,
            Command::RestoreBirdCollisionMask => self.bird.mask = CollisionMask::FULL,
            Command::PlayDeathEffect => {
                self.death_effect = Some(DeathEffect {
                    elapsed: 0.0,
                    duration: self.settings.death_roll_duration,
                    from: self.bird.rotation,
                    by: std::f32::consts::PI * self.bird.pos.y * self.settings.death_roll_factor,
                });
            }
            Command::ResetBirdPosition => {
                self.bird.respawn(self.settings.bird_spawn());
                self.death_effect = None;
            }
            Command::ClearObstacles => {
                self.obstacles.clear();
                self.touching.retain(|id| *id == BodyId::GROUND);
            }
            Command::SpawnObstacle(spec) => self.spawn(spec),
        }
    }

    fn spawn(&mut self, spec: ObstacleSpec) {
        let first_body = BodyId(self.next_body);
        self.next_body += 3;
        self.obstacles.push(Obstacle {
            first_body,
            spec,
            travelled: 0.0,
        });
    }

    fn advance_spawn_timer(&mut self, dt: f32) {
        self.spawn_timer -= dt;
        while self.spawn_timer <= 0.0 {
            self.events.push_back(SceneEvent::SpawnTick);
            self.spawn_timer += self.settings.spawn_interval;
        }
    }

    fn scroll(&mut self, dt: f32) {
        let dx = self.settings.scroll_speed() * dt;
        let distance = self.settings.viewport_width + self.settings.wall_width;
        for obstacle in &mut self.obstacles {
            obstacle.travelled += dx;
        }
        self.obstacles.retain(|o| o.travelled < distance);

        self.ground_layer.advance(dt);
        self.cloud_layer.advance(dt);
    }

    fn detect_contacts(&mut self) {
        let (center, radius) = (self.bird.pos, self.bird.radius);
        let mut now = BTreeSet::new();
        let mut begun = Vec::new();

        if self.ground_rect().intersects_circle(center, radius) {
            now.insert(BodyId::GROUND);
            if !self.touching.contains(&BodyId::GROUND) {
                begun.push((BodyId::GROUND, BodyKind::Ground));
            }
        }
        for obstacle in &self.obstacles {
            for (id, kind, rect) in obstacle.bodies() {
                if rect.intersects_circle(center, radius) {
                    now.insert(id);
                    if !self.touching.contains(&id) {
                        begun.push((id, kind));
                    }
                }
            }
        }

        // Score zones first, then by body id
        begun.sort_by_key(|&(id, kind)| (kind != BodyKind::ScoreZone, id));
        for (id, kind) in begun {
            log::debug!("Contact began: bird/{kind:?} ({id:?})");
            self.events.push_back(SceneEvent::Contact(BodyKind::Bird, kind));
        }
        self.touching = now;
    }

    fn resolve_collisions(&mut self) {
        let mask = self.bird.mask;
        let mut solids = Vec::new();
        if mask.collides_with(BodyKind::Ground) {
            solids.push(self.ground_rect());
        }
        if mask.collides_with(BodyKind::Wall) {
            for obstacle in &self.obstacles {
                solids.extend(
                    obstacle
                        .bodies()
                        .into_iter()
                        .filter(|(_, kind, _)| *kind == BodyKind::Wall)
                        .map(|(_, _, rect)| rect),
                );
            }
        }

        for rect in solids {
            if let Some(push) = circle_rect_push(self.bird.pos, self.bird.radius, &rect) {
                self.bird.pos += push;
                // Drop the velocity component driving into the surface
                let normal = push.normalize_or_zero();
                let into = self.bird.vel.dot(normal);
                if into < 0.0 {
                    self.bird.vel -= normal * into;
                }
            }
        }
    }

    fn advance_death_effect(&mut self, dt: f32) {
        let Some(effect) = self.death_effect.as_mut() else {
            return;
        };
        effect.elapsed += dt;
        let t = (effect.elapsed / effect.duration).min(1.0);
        self.bird.rotation = effect.from + effect.by * t;
        if t >= 1.0 {
            self.death_effect = None;
            self.bird.alive = false;
            self.events.push_back(SceneEvent::DeathEffectFinished);
        }
    }

    fn animate_flap(&mut self, dt: f32) {
        if !self.bird.alive {
            return;
        }
        self.bird.flap_timer += dt;
        while self.bird.flap_timer >= self.settings.flap_frame_time {
            self.bird.flap_timer -= self.settings.flap_frame_time;
            self.bird.flap_frame ^= 1;
        }
    }
}
