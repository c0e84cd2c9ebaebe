//! Frame-driven session: fixed-step accumulator over `tick`

use super::game::Game;
use super::state::RunStatus;
use super::tick::{TickInput, tick};
use super::world::World;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::hud::HudText;
use crate::persistence::KeyValueStore;
use crate::settings::{ConfigError, Settings};

/// A world, its game core and the frame accumulator
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    pub world: World,
    pub game: Game<S>,
    accumulator: f32,
    input: TickInput,
    ticks: u64,
}

impl<S: KeyValueStore> Session<S> {
    /// Validate settings and start the first run
    pub fn new(settings: &Settings, store: S) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            world: World::new(settings),
            game: Game::new(settings, store)?,
            accumulator: 0.0,
            input: TickInput::default(),
            ticks: 0,
        })
    }

    /// Queue a tap for the next tick
    pub fn tap(&mut self) {
        self.input.tap = true;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Ticks simulated so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the number run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.world, &mut self.game, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.tap = false;
        }
        substeps
    }

    pub fn hud(&self) -> HudText {
        HudText::new(
            self.game.score(),
            self.game.best_score(),
            self.game.status() == RunStatus::Ended,
            self.game.run().can_restart(),
        )
    }
}
