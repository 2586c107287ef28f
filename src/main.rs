//! Bounce Runner entry point
//!
//! Headless frame loop: feeds per-tick input from a replay script (or a
//! simple autopilot) into the fixed-step simulation and reports what
//! happens. Window, drawing and audio live elsewhere; `--trace` prints the
//! per-frame render snapshot as JSON lines for them.
//!
//! Usage: bounce-runner [--config <settings.json>] [--ticks <n>]
//!                      [--script <inputs.txt>] [--realtime] [--trace]
//!                      [--write-config <settings.json>]
//!
//! `--write-config` saves the effective settings (defaults merged with
//! `--config`) and exits without simulating.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use thiserror::Error;

use bounce_runner::consts::*;
use bounce_runner::sim::{GameEvent, Session, TickInput, tick};
use bounce_runner::{FrameView, LevelError, LevelSet, Settings, SettingsError};

#[derive(Debug, Error)]
enum RunError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("failed to read script {path}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode frame: {0}")]
    Trace(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    ticks: Option<u64>,
    script: Option<PathBuf>,
    realtime: bool,
    trace: bool,
    write_config: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, RunError> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config = Some(value(&mut args, "--config")?.into()),
            "--script" => options.script = Some(value(&mut args, "--script")?.into()),
            "--write-config" => {
                options.write_config = Some(value(&mut args, "--write-config")?.into());
            }
            "--ticks" => {
                let n = value(&mut args, "--ticks")?;
                let n = n
                    .parse::<u64>()
                    .map_err(|_| RunError::Usage(format!("--ticks expects a number, got {n:?}")))?;
                options.ticks = Some(n);
            }
            "--realtime" => options.realtime = true,
            "--trace" => options.trace = true,
            other => return Err(RunError::Usage(format!("unknown argument {other:?}"))),
        }
    }
    Ok(options)
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, RunError> {
    match args.next() {
        Some(value) => Ok(value),
        None => Err(RunError::Usage(format!("{flag} needs a value"))),
    }
}

/// Where per-tick input comes from
enum InputSource {
    /// One line per tick: any of `L` `R` `J` `G` `Q` (left, right, jump,
    /// force goal, quit). The session quits when the script runs out.
    Script(std::vec::IntoIter<TickInput>),
    /// Hold right and jump whenever possible
    Autopilot,
}

impl InputSource {
    fn next(&mut self) -> TickInput {
        match self {
            InputSource::Script(lines) => lines.next().unwrap_or(TickInput {
                quit: true,
                ..Default::default()
            }),
            InputSource::Autopilot => TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
        }
    }
}

fn parse_script(src: &str) -> Vec<TickInput> {
    src.lines()
        .map(|line| {
            let has = |c: char| line.contains(c) || line.contains(c.to_ascii_lowercase());
            TickInput {
                move_left: has('L'),
                move_right: has('R'),
                jump: has('J'),
                force_reach_goal: has('G'),
                quit: has('Q'),
            }
        })
        .collect()
}

fn run(options: &Options) -> Result<(), RunError> {
    let settings = match &options.config {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    if let Some(path) = &options.write_config {
        settings.save(path)?;
        return Ok(());
    }

    let levels = match &settings.level_dir {
        Some(dir) => LevelSet::from_dir(dir)?,
        None => LevelSet::builtin()?,
    };

    let mut input = match &options.script {
        Some(path) => {
            let src = fs::read_to_string(path).map_err(|source| RunError::Script {
                path: path.clone(),
                source,
            })?;
            InputSource::Script(parse_script(&src).into_iter())
        }
        None => InputSource::Autopilot,
    };

    let max_substeps = settings.max_substeps.max(1);
    let mut session = Session::new(levels, settings)?;
    let step = Duration::from_secs_f32(SIM_DT);
    let mut last = Instant::now();
    let mut accumulator = Duration::ZERO;

    while session.is_running() {
        if options.ticks.is_some_and(|n| session.time_ticks >= n) {
            break;
        }

        // Realtime mode paces ticks against the wall clock; otherwise one
        // tick per loop, as fast as possible
        let mut substeps = 0;
        if options.realtime {
            let now = Instant::now();
            accumulator += (now - last).min(Duration::from_millis(100));
            last = now;
        } else {
            accumulator = step;
        }

        while accumulator >= step && substeps < max_substeps && session.is_running() {
            let events = tick(&mut session, &input.next())?;
            for event in &events {
                report(&session, event);
            }
            if options.trace {
                println!("{}", serde_json::to_string(&FrameView::capture(&session))?);
            }
            accumulator -= step;
            substeps += 1;
        }

        if options.realtime {
            std::thread::sleep(step.saturating_sub(accumulator));
        }
    }

    let view = FrameView::capture(&session);
    log::info!("Finished after {} ticks: {}", view.tick, view.hud_text());
    Ok(())
}

fn report(session: &Session, event: &GameEvent) {
    match event {
        GameEvent::LevelComplete { from, to, wrapped } => {
            log::info!(
                "[tick {}] level {} -> {}{}",
                session.time_ticks,
                from,
                to,
                if *wrapped { " (wrapped)" } else { "" }
            );
        }
        GameEvent::FellOffscreen { health, score } => {
            log::info!("[tick {}] fell: health {}, score {}", session.time_ticks, health, score);
        }
        GameEvent::Landed | GameEvent::Bounced => {
            log::trace!("[tick {}] {:?}", session.time_ticks, event);
        }
        GameEvent::Stopped => log::info!("[tick {}] quit", session.time_ticks),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Bounce Runner starting...");

    let result = parse_args(std::env::args().skip(1)).and_then(|options| run(&options));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("bounce-runner: {e}");
            ExitCode::FAILURE
        }
    }
}
