//! Run state machine
//!
//! Owns the score and lifecycle of a run and turns scene events into
//! commands. Restart is gated on the death effect's completion signal.

use glam::Vec2;

use super::contact::{ContactOutcome, resolve_contact};
use super::state::{BodyKind, Command, RunStatus};
use crate::highscores::BestScore;
use crate::persistence::KeyValueStore;

/// A run: score, status and the persisted best score
#[derive(Debug)]
pub struct Run<S: KeyValueStore> {
    score: u32,
    status: RunStatus,
    /// Ended and the death effect has finished
    restart_armed: bool,
    best: BestScore<S>,
    flap_speed: f32,
    /// Runs started in this session (the first one included)
    runs: u32,
}

impl<S: KeyValueStore> Run<S> {
    /// Start the first run: playing, score 0
    pub fn new(best: BestScore<S>, flap_speed: f32) -> Self {
        log::info!("Run 1 started (best {})", best.get());
        Self {
            score: 0,
            status: RunStatus::Playing,
            restart_armed: false,
            best,
            flap_speed,
            runs: 1,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.get()
    }

    pub fn best(&self) -> &BestScore<S> {
        &self.best
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == RunStatus::Playing
    }

    /// True once a tap would restart
    pub fn can_restart(&self) -> bool {
        self.status == RunStatus::Ended && self.restart_armed
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Tap: flap while playing, restart once the death effect is over
    pub fn on_tap(&mut self) -> Vec<Command> {
        match self.status {
            RunStatus::Playing => vec![Command::ImpulseBird(Vec2::new(0.0, self.flap_speed))],
            RunStatus::Ended if self.restart_armed => self.restart(),
            RunStatus::Ended => {
                log::debug!("Tap ignored during death effect");
                Vec::new()
            }
        }
    }

    /// Two bodies began touching
    pub fn on_contact(&mut self, a: BodyKind, b: BodyKind) -> Vec<Command> {
        if self.status != RunStatus::Playing {
            return Vec::new();
        }

        match resolve_contact(a, b) {
            ContactOutcome::Score => {
                self.score += 1;
                log::debug!("Score {}", self.score);
                if self.best.record(self.score) {
                    log::info!("New best score {}", self.score);
                }
                Vec::new()
            }
            ContactOutcome::Crash => {
                log::info!("Game over: hit {a:?}/{b:?} with score {}", self.score);
                self.status = RunStatus::Ended;
                self.restart_armed = false;
                vec![
                    Command::FreezeWorld,
                    Command::RestrictBirdCollisionToGround,
                    Command::PlayDeathEffect,
                ]
            }
            ContactOutcome::Ignore => Vec::new(),
        }
    }

    /// The death effect finished; the bird is now non-interactive
    pub fn on_death_effect_finished(&mut self) -> Vec<Command> {
        if self.status == RunStatus::Ended {
            self.restart_armed = true;
        }
        Vec::new()
    }

    fn restart(&mut self) -> Vec<Command> {
        self.score = 0;
        self.status = RunStatus::Playing;
        self.restart_armed = false;
        self.runs += 1;
        log::info!("Run {} started (best {})", self.runs, self.best.get());
        vec![
            Command::ResetBirdPosition,
            Command::RestoreBirdCollisionMask,
            Command::ClearObstacles,
            Command::ResumeWorld,
        ]
    }
}
