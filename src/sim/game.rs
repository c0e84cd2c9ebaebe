//! Game core: run state machine + obstacle generator behind one entry point

use super::generator::ObstacleGenerator;
use super::run::Run;
use super::state::{Command, RunStatus, SceneEvent};
use crate::highscores::BestScore;
use crate::persistence::KeyValueStore;
use crate::settings::{ConfigError, Settings};

/// Everything the scene talks to
#[derive(Debug)]
pub struct Game<S: KeyValueStore> {
    run: Run<S>,
    generator: ObstacleGenerator,
}

impl<S: KeyValueStore> Game<S> {
    /// Build the core from validated settings and an injected store
    pub fn new(settings: &Settings, store: S) -> Result<Self, ConfigError> {
        let generator = ObstacleGenerator::new(settings.generator_config(), settings.seed)?;
        let run = Run::new(BestScore::load(store), settings.flap_speed);
        Ok(Self { run, generator })
    }

    /// Dispatch one scene event
    pub fn handle(&mut self, event: SceneEvent) -> Vec<Command> {
        match event {
            SceneEvent::Tap => self.run.on_tap(),
            SceneEvent::Contact(a, b) => self.run.on_contact(a, b),
            SceneEvent::DeathEffectFinished => self.run.on_death_effect_finished(),
            SceneEvent::SpawnTick => {
                if !self.run.is_playing() {
                    return Vec::new();
                }
                let spec = self.generator.generate();
                log::debug!(
                    "Spawn #{}: gap centre {:.1}",
                    self.generator.spawned(),
                    spec.gap_center_y
                );
                vec![Command::SpawnObstacle(spec)]
            }
        }
    }

    pub fn run(&self) -> &Run<S> {
        &self.run
    }

    pub fn generator(&self) -> &ObstacleGenerator {
        &self.generator
    }

    pub fn status(&self) -> RunStatus {
        self.run.status()
    }

    pub fn score(&self) -> u32 {
        self.run.score()
    }

    pub fn best_score(&self) -> u32 {
        self.run.best_score()
    }
}
