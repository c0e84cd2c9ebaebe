//! Flappy Slit entry point
//!
//! Runs a headless session with the autopilot and logs the run lifecycle.
//!
//! Usage: `flappy-slit [--settings PATH] [--store PATH] [--seconds N] [--seed N]`

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use flappy_slit::Settings;
use flappy_slit::consts::SIM_DT;
use flappy_slit::persistence::JsonFileStore;
use flappy_slit::sim::{RunStatus, Session};

#[derive(Debug)]
struct Args {
    settings: PathBuf,
    store: PathBuf,
    seconds: f32,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        settings: PathBuf::from("flappy-settings.json"),
        store: PathBuf::from("flappy-best.json"),
        seconds: 60.0,
        seed: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .ok_or_else(|| anyhow!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--settings" => args.settings = PathBuf::from(value()?),
            "--store" => args.store = PathBuf::from(value()?),
            "--seconds" => {
                args.seconds = value()?.parse().context("--seconds expects a number")?;
            }
            "--seed" => {
                args.seed = Some(value()?.parse().context("--seed expects an integer")?);
            }
            other => return Err(anyhow!("unknown argument {other}")),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy Slit (headless) starting...");

    let args = parse_args()?;
    let mut settings = Settings::load(&args.settings).context("loading settings")?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let store = JsonFileStore::new(&args.store);
    log::info!("Best score store: {}", store.path().display());
    let mut session = Session::new(&settings, store).context("invalid settings")?;
    session.set_autopilot(true);
    log::info!("Game initialized with seed: {}", settings.seed);

    // Drive at 60 fps; the session substeps at the fixed rate
    let frame_dt = SIM_DT * 2.0;
    let frames = (args.seconds / frame_dt).ceil() as u64;
    let mut last_status = session.game.status();
    let mut crashes = 0u32;
    for _ in 0..frames {
        session.update(frame_dt);

        let status = session.game.status();
        if status != last_status {
            if status == RunStatus::Ended {
                crashes += 1;
                let hud = session.hud();
                log::info!("{} / {}", hud.score, hud.best);
            }
            last_status = status;
        }
    }

    let hud = session.hud();
    log::info!(
        "Simulated {:.1}s over {} ticks: {} runs, {} crashes, {} / {}",
        session.world.time(),
        session.ticks(),
        session.game.run().runs(),
        crashes,
        hud.score,
        hud.best
    );
    Ok(())
}
