//! Ball Chaser entry point
//!
//! Native builds run a headless demo: the autopilot plays a few sessions at
//! the configured tick rate while draw calls go to the log (`RUST_LOG=trace`).

use std::process::ExitCode;

use ball_chaser::platform::{AutopilotInput, FixedRatePacer, HeadlessRenderer};
use ball_chaser::sim::GameState;
use ball_chaser::{FrameDriver, GameConfig};

/// Demo length: restarts before quitting, and a hard cap on input polls
const DEMO_RESTARTS: u32 = 3;
const DEMO_MAX_POLLS: u64 = 60 * 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Ball Chaser (native) starting...");

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("ball-chaser: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pacer = FixedRatePacer::new(config.tick_rate);
    let state = GameState::new(config);
    let driver = FrameDriver::new(
        state,
        HeadlessRenderer::default(),
        AutopilotInput::new(DEMO_RESTARTS, DEMO_MAX_POLLS),
        pacer,
    );

    let (summary, renderer) = driver.run();
    log::info!("Rendered {} frames", renderer.frames);
    drop(renderer);

    println!(
        "sessions: {}, best score: {}, ticks: {}",
        summary.sessions, summary.best_score, summary.ticks
    );
    ExitCode::SUCCESS
}
