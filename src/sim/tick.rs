//! Fixed timestep simulation tick
//!
//! One tick: queue input, step the world, then drain the event queue into
//! the game core and apply every command it returns, in order.

use super::game::Game;
use super::state::{RunStatus, SceneEvent};
use super::world::World;
use crate::persistence::KeyValueStore;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap (click/touch/space)
    pub tap: bool,
    /// Idle/demo mode - the autopilot taps
    pub autopilot: bool,
}

/// Advance the world and game core by one fixed timestep
pub fn tick<S: KeyValueStore>(world: &mut World, game: &mut Game<S>, input: &TickInput, dt: f32) {
    let tap = input.tap || (input.autopilot && autopilot_wants_tap(world, game));
    if tap {
        world.push_event(SceneEvent::Tap);
    }

    world.step(dt);

    while let Some(event) = world.pop_event() {
        for command in game.handle(event) {
            world.apply(command);
        }
    }
}

/// Flap when the bird sinks into the lower part of the next gap; restart as
/// soon as that is allowed
fn autopilot_wants_tap<S: KeyValueStore>(world: &World, game: &Game<S>) -> bool {
    match game.status() {
        RunStatus::Ended => game.run().can_restart(),
        RunStatus::Playing => {
            let bird = world.bird();
            let threshold = match world.next_obstacle() {
                Some(obstacle) => obstacle.spec.gap_center_y - obstacle.spec.gap_height * 0.3,
                None => world.bird_spawn_height(),
            };
            bird.vel.y <= 0.0 && bird.pos.y < threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::persistence::MemoryStore;
    use crate::settings::Settings;

    fn setup(best: u32) -> (World, Game<MemoryStore>, Settings) {
        let settings = Settings::default();
        let world = World::new(&settings);
        let game = Game::new(&settings, MemoryStore::with_best_score(best)).unwrap();
        (world, game, settings)
    }

    #[test]
    fn test_first_tick_spawns_an_obstacle() {
        let (mut world, mut game, _) = setup(0);
        tick(&mut world, &mut game, &TickInput::default(), SIM_DT);
        assert_eq!(world.obstacles().len(), 1);
        assert_eq!(game.generator().spawned(), 1);
    }

    #[test]
    fn test_tap_replaces_vertical_velocity() {
        let (mut world, mut game, settings) = setup(0);
        for _ in 0..30 {
            tick(&mut world, &mut game, &TickInput::default(), SIM_DT);
        }
        assert!(world.bird().vel.y < 0.0);

        let tap = TickInput {
            tap: true,
            ..Default::default()
        };
        tick(&mut world, &mut game, &tap, SIM_DT);
        assert_eq!(world.bird().vel.y, settings.flap_speed);
    }

    #[test]
    fn test_crash_restart_cycle() {
        let (mut world, mut game, settings) = setup(0);
        let idle = TickInput::default();
        let tap = TickInput {
            tap: true,
            ..Default::default()
        };

        // Never flap: the bird falls onto the ground
        let mut ticks = 0;
        while game.status() == RunStatus::Playing {
            tick(&mut world, &mut game, &idle, SIM_DT);
            ticks += 1;
            assert!(ticks < 120 * 3, "bird never crashed");
        }
        assert!(world.is_frozen());
        assert!(world.death_effect_running());

        // Tap during the death roll is ignored
        tick(&mut world, &mut game, &tap, SIM_DT);
        assert_eq!(game.status(), RunStatus::Ended);

        // Let the roll finish
        for _ in 0..(120 * 2) {
            tick(&mut world, &mut game, &idle, SIM_DT);
        }
        assert!(game.run().can_restart());
        assert!(!world.bird().alive);
        let obstacles_before = world.obstacles().len();
        assert!(obstacles_before > 0);

        tick(&mut world, &mut game, &tap, SIM_DT);
        assert_eq!(game.status(), RunStatus::Playing);
        assert_eq!(game.score(), 0);
        assert!(!world.is_frozen());
        assert!(world.bird().alive);
        assert!(world.obstacles().is_empty());
        assert_eq!(world.bird().pos, settings.bird_spawn());
        assert_eq!(world.bird().vel.y, 0.0);
    }

    #[test]
    fn test_no_spawns_while_ended() {
        let (mut world, mut game, _) = setup(0);
        let idle = TickInput::default();
        while game.status() == RunStatus::Playing {
            tick(&mut world, &mut game, &idle, SIM_DT);
        }
        let spawned = game.generator().spawned();
        for _ in 0..(120 * 6) {
            tick(&mut world, &mut game, &idle, SIM_DT);
        }
        assert_eq!(game.generator().spawned(), spawned);
    }

    #[test]
    fn test_autopilot_keeps_restarting() {
        let (mut world, mut game, _) = setup(0);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..(120 * 60) {
            let armed = game.run().can_restart();
            tick(&mut world, &mut game, &input, SIM_DT);
            if armed {
                assert_eq!(game.status(), RunStatus::Playing);
                assert_eq!(game.score(), 0);
            }
            assert!(game.best_score() >= game.score());
        }
    }
}
