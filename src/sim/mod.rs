//! Deterministic simulation module
//!
//! The game core (run state machine + obstacle generator) never touches the
//! scene directly: the scene delivers `SceneEvent`s, the core answers with
//! `Command`s. `World` is the headless scene that plays the host engine's
//! part:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Events drained in queue order

pub mod contact;
pub mod game;
pub mod generator;
pub mod run;
pub mod session;
pub mod state;
pub mod tick;
pub mod world;

pub use contact::{ContactOutcome, Rect, circle_rect_push, resolve_contact};
pub use game::Game;
pub use generator::{GeneratorConfig, ObstacleGenerator};
pub use run::Run;
pub use session::Session;
pub use state::{
    Bird, BodyId, BodyKind, CollisionMask, Command, Obstacle, ObstacleSpec, RunStatus, SceneEvent,
};
pub use tick::{TickInput, tick};
pub use world::{ScrollLayer, World};
