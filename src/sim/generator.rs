//! Obstacle generator
//!
//! One wall pair per spawn tick. The lower wall's centre is drawn uniformly
//! from `lowY + [0, R)` in whole points, where
//! `lowY = floor(H/2 - w/2 - R/2)`. No difficulty ramp; generators share
//! nothing but their seeded RNG stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::contact::Rect;
use super::state::ObstacleSpec;
use crate::settings::ConfigError;

/// Generator parameters (points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Height of the ground strip at the bottom of the viewport
    pub ground_height: f32,
    pub wall_width: f32,
    pub wall_height: f32,
    /// R: vertical jitter range
    pub jitter_range: f32,
    pub gap_height: f32,
    /// Offsets the score region so it trails the walls
    pub bird_radius: f32,
}

impl GeneratorConfig {
    /// Reject parameters that would make a gap unplaceable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport_height", self.viewport_height),
            ("wall_width", self.wall_width),
            ("wall_height", self.wall_height),
            ("gap_height", self.gap_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.gap_height >= self.viewport_height {
            return Err(ConfigError::GapTooTall {
                gap_height: self.gap_height,
                viewport_height: self.viewport_height,
            });
        }
        if self.jitter_steps() == 0 {
            return Err(ConfigError::JitterTooSmall {
                jitter_range: self.jitter_range,
            });
        }
        let bottom = self.lowest_gap_bottom();
        if bottom < self.ground_height {
            return Err(ConfigError::GapBelowGround {
                bottom,
                ground_height: self.ground_height,
            });
        }
        let top = self.highest_gap_top();
        if top > self.viewport_height {
            return Err(ConfigError::GapOutOfBounds {
                top,
                viewport_height: self.viewport_height,
            });
        }
        Ok(())
    }

    /// Number of integer offsets in `[0, R)`
    pub fn jitter_steps(&self) -> u32 {
        if self.jitter_range >= 1.0 {
            self.jitter_range as u32
        } else {
            0
        }
    }

    /// Lowest possible lower-wall centre, in whole points
    pub fn low_y(&self) -> f32 {
        (self.viewport_height / 2.0 - self.wall_height / 2.0 - self.jitter_range / 2.0).floor()
    }

    pub fn lowest_gap_bottom(&self) -> f32 {
        self.low_y() + self.wall_height / 2.0
    }

    pub fn highest_gap_top(&self) -> f32 {
        let max_offset = self.jitter_steps().saturating_sub(1) as f32;
        self.low_y() + max_offset + self.wall_height / 2.0 + self.gap_height
    }

    /// Wall centre x at spawn: just beyond the right edge
    pub fn spawn_x(&self) -> f32 {
        self.viewport_width + self.wall_width / 2.0
    }
}

/// Seeded obstacle generator
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    config: GeneratorConfig,
    rng: Pcg32,
    spawned: u64,
}

impl ObstacleGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            spawned: 0,
        })
    }

    /// Obstacles generated so far
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Draw the lower wall's centre
    pub fn draw_under_wall_y(&mut self) -> f32 {
        let offset = self.rng.random_range(0..self.config.jitter_steps());
        self.config.low_y() + offset as f32
    }

    /// Produce the next obstacle descriptor
    pub fn generate(&mut self) -> ObstacleSpec {
        let cfg = self.config;
        let under_wall_y = self.draw_under_wall_y();
        let spawn_x = cfg.spawn_x();
        let gap_bottom = under_wall_y + cfg.wall_height / 2.0;

        // Full-height region trailing the walls by a bird radius
        let score_trigger = Rect::from_center_size(
            Vec2::new(
                spawn_x + cfg.wall_width + cfg.bird_radius,
                cfg.viewport_height / 2.0,
            ),
            Vec2::new(cfg.wall_width, cfg.viewport_height),
        );

        self.spawned += 1;
        ObstacleSpec {
            spawn_x,
            under_wall_y,
            gap_center_y: gap_bottom + cfg.gap_height / 2.0,
            gap_height: cfg.gap_height,
            wall_size: Vec2::new(cfg.wall_width, cfg.wall_height),
            score_trigger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(h: f32, w: f32, r: f32) -> GeneratorConfig {
        GeneratorConfig {
            viewport_width: 375.0,
            viewport_height: h,
            ground_height: 0.0,
            wall_width: 60.0,
            wall_height: w,
            jitter_range: r,
            gap_height: h / 5.0,
            bird_radius: 15.0,
        }
    }

    #[test]
    fn test_bounds_and_uniformity() {
        // H = 500, w = 50, R = 40 → lowY = 205, draws in [205, 245)
        let cfg = config(500.0, 50.0, 40.0);
        assert_eq!(cfg.low_y(), 205.0);
        let mut generator = ObstacleGenerator::new(cfg, 42).unwrap();

        let trials = 10_000;
        let mut counts = [0u32; 40];
        for _ in 0..trials {
            let y = generator.draw_under_wall_y();
            assert!((205.0..245.0).contains(&y), "out of range: {y}");
            assert_eq!(y.fract(), 0.0);
            counts[(y - 205.0) as usize] += 1;
        }

        // Chi-square, 39 degrees of freedom, p = 0.001
        let expected = trials as f64 / 40.0;
        let chi_sq: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        assert!(chi_sq < 72.05, "chi-square {chi_sq} rejects uniformity");
    }

    #[test]
    fn test_gap_geometry() {
        let cfg = config(500.0, 50.0, 40.0);
        let mut generator = ObstacleGenerator::new(cfg, 7).unwrap();
        let spec = generator.generate();

        assert_eq!(spec.gap_height, 100.0);
        assert_eq!(spec.gap_top() - spec.gap_bottom(), 100.0);
        assert_eq!(spec.upper_wall_y(), spec.under_wall_y + 50.0 + 100.0);
        assert_eq!(spec.spawn_x, 405.0);

        // Walls bound the gap exactly
        let x = spec.spawn_x;
        assert_eq!(spec.lower_wall_at(x).max.y, spec.gap_bottom());
        assert_eq!(spec.upper_wall_at(x).min.y, spec.gap_top());

        // Score region: full height, wall-wide, clear of the walls
        let zone = spec.score_trigger;
        assert_eq!(zone.min.y, 0.0);
        assert_eq!(zone.max.y, 500.0);
        assert_eq!(zone.size().x, 60.0);
        assert!(zone.min.x > spec.lower_wall_at(x).max.x);
        assert_eq!(generator.spawned(), 1);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let cfg = config(667.0, 400.0, 166.75);
        let mut a = ObstacleGenerator::new(cfg, 99).unwrap();
        let mut b = ObstacleGenerator::new(cfg, 99).unwrap();
        for _ in 0..50 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_unplaceable_gap_is_config_error() {
        let tall = GeneratorConfig {
            gap_height: 500.0,
            ..config(500.0, 50.0, 40.0)
        };
        assert!(matches!(
            ObstacleGenerator::new(tall, 1),
            Err(ConfigError::GapTooTall { .. })
        ));

        let no_jitter = config(500.0, 50.0, 0.5);
        assert!(matches!(
            ObstacleGenerator::new(no_jitter, 1),
            Err(ConfigError::JitterTooSmall { .. })
        ));

        let overflow = GeneratorConfig {
            gap_height: 400.0,
            ..config(500.0, 50.0, 200.0)
        };
        assert!(matches!(
            overflow.validate(),
            Err(ConfigError::GapOutOfBounds { .. })
        ));

        // lowY = 205, lowest gap bottom = 230
        let buried = GeneratorConfig {
            ground_height: 240.0,
            ..config(500.0, 50.0, 40.0)
        };
        assert!(matches!(
            buried.validate(),
            Err(ConfigError::GapBelowGround { bottom, ground_height })
                if bottom == 230.0 && ground_height == 240.0
        ));
        let clear = GeneratorConfig {
            ground_height: 230.0,
            ..config(500.0, 50.0, 40.0)
        };
        assert!(clear.validate().is_ok());
    }

    #[test]
    fn test_low_y_is_whole_points() {
        // Default viewport: 667/2 - 400/2 - 166.75/2 = 50.125
        let cfg = config(667.0, 400.0, 166.75);
        assert_eq!(cfg.low_y(), 50.0);
        let mut generator = ObstacleGenerator::new(cfg, 3).unwrap();
        for _ in 0..100 {
            let y = generator.draw_under_wall_y();
            assert_eq!(y.fract(), 0.0);
            assert!((50.0..216.0).contains(&y), "out of range: {y}");
        }
    }

    proptest! {
        #[test]
        fn prop_draws_stay_in_range(seed in any::<u64>(), r in 1.0f32..200.0) {
            let cfg = config(667.0, 300.0, r);
            let mut generator = ObstacleGenerator::new(cfg, seed).unwrap();
            for _ in 0..32 {
                let spec = generator.generate();
                prop_assert!(spec.under_wall_y >= cfg.low_y());
                prop_assert!(spec.under_wall_y < cfg.low_y() + r);
                prop_assert!(spec.gap_top() <= cfg.highest_gap_top() + 1e-3);
            }
        }
    }
}
