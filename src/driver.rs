//! Fixed-rate frame loop
//!
//! The driver owns the game state and talks to the outside world through
//! three narrow seams: a [`Renderer`] for output, an [`InputSource`] for
//! keys and a [`Pacer`] for frame timing. All of it runs on the caller's
//! thread; nothing here spawns or blocks except the pacer.

use std::fmt;

use glam::Vec2;

use crate::sim::{GameEvent, GameState, Rect, TickInput, tick};

/// RGB color
pub type Color = [u8; 3];

/// Scene palette
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0, 0, 0];
    pub const BASKET: Color = [255, 0, 0];
    pub const BALL: Color = [255, 255, 0];
    pub const OBSTACLE: Color = [0, 255, 0];
    pub const TEXT: Color = [255, 255, 255];
}

/// Prompt shown while waiting for a restart
pub const GAME_OVER_PROMPT: &str = "Game Over! Press R to Restart";

/// Output surface. Draw calls are fire-and-forget; only `present` can fail.
pub trait Renderer {
    type Error: fmt::Debug;

    fn clear(&mut self, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Everything read from the input device in one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolledInput {
    /// Movement keys and launch for the simulation
    pub keys: TickInput,
    /// Restart pressed (edge)
    pub restart: bool,
    /// Window closed / quit requested
    pub quit: bool,
}

/// Input device, polled once per tick and once per restart-wait iteration
pub trait InputSource {
    /// `state` is read-only context; keyboard-backed sources ignore it.
    fn poll(&mut self, state: &GameState) -> PolledInput;
}

/// Frame pacing
pub trait Pacer {
    /// Block until the next tick is due
    fn wait_next_tick(&mut self);
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn poll(&mut self, state: &GameState) -> PolledInput {
        (**self).poll(state)
    }
}

impl<T: Pacer + ?Sized> Pacer for &mut T {
    fn wait_next_tick(&mut self) {
        (**self).wait_next_tick()
    }
}

/// What a run amounted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Simulation ticks across all sessions
    pub ticks: u64,
    /// Sessions played, counting the one in progress at quit
    pub sessions: u32,
    pub best_score: u32,
    /// Score of the last session when the run ended
    pub last_score: u32,
}

enum WaitOutcome {
    Restarted,
    Quit,
}

/// Owns one game and drives it until quit
pub struct FrameDriver<R, I, P> {
    state: GameState,
    renderer: R,
    input: I,
    pacer: P,
    summary: RunSummary,
}

impl<R: Renderer, I: InputSource, P: Pacer> FrameDriver<R, I, P> {
    pub fn new(state: GameState, renderer: R, input: I, pacer: P) -> Self {
        Self {
            state,
            renderer,
            input,
            pacer,
            summary: RunSummary::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run until a quit signal arrives
    ///
    /// Returns the summary and hands the renderer back so the caller decides
    /// when to tear it down.
    pub fn run(mut self) -> (RunSummary, R) {
        log::info!(
            "Session start: {} variant, seed {}",
            self.state.config.variant_name(),
            self.state.rng.seed
        );

        loop {
            self.draw_scene();
            let game_over = self.state.session.is_game_over();
            if game_over {
                self.draw_game_over_prompt();
            }
            self.present();

            if game_over {
                match self.await_restart() {
                    WaitOutcome::Restarted => continue,
                    WaitOutcome::Quit => break,
                }
            }

            let polled = self.input.poll(&self.state);
            if polled.quit {
                break;
            }

            let events = tick(&mut self.state, &polled.keys);
            self.summary.ticks += 1;
            self.record(&events);

            self.pacer.wait_next_tick();
        }

        self.finish()
    }

    /// Poll until restart or quit; no simulation time passes here
    fn await_restart(&mut self) -> WaitOutcome {
        loop {
            let polled = self.input.poll(&self.state);
            if polled.quit {
                return WaitOutcome::Quit;
            }
            if polled.restart {
                if let Some(event) = self.state.restart() {
                    self.record(&[event]);
                }
                return WaitOutcome::Restarted;
            }
            self.pacer.wait_next_tick();
        }
    }

    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Scored { score } => {
                    self.summary.best_score = self.summary.best_score.max(*score);
                }
                GameEvent::GameOver(_) => {
                    self.summary.last_score = self.state.score();
                }
                _ => {}
            }
            log::trace!("{:?}", event);
        }
    }

    fn draw_scene(&mut self) {
        let state = &self.state;
        let r = &mut self.renderer;

        r.clear(colors::BACKGROUND);
        r.draw_circle(state.basket.center(), state.basket.radius, colors::BASKET);
        r.draw_circle(state.ball.pos, state.ball.radius, colors::BALL);
        for obstacle in &state.obstacles {
            r.draw_rect(obstacle.rect(), colors::OBSTACLE);
        }
        r.draw_text(
            &format!("Score: {}", state.score()),
            Vec2::new(10.0, 10.0),
            colors::TEXT,
        );
    }

    fn draw_game_over_prompt(&mut self) {
        let config = &self.state.config;
        let pos = Vec2::new(
            (config.width as i32 / 3) as f32,
            (config.height as i32 / 2) as f32,
        );
        self.renderer.draw_text(GAME_OVER_PROMPT, pos, colors::TEXT);
    }

    fn present(&mut self) {
        if let Err(e) = self.renderer.present() {
            log::warn!("Render error: {:?}", e);
        }
    }

    fn finish(mut self) -> (RunSummary, R) {
        self.summary.sessions = self.state.sessions_started;
        self.summary.last_score = self.state.score();
        self.summary.best_score = self.summary.best_score.max(self.summary.last_score);
        log::info!(
            "Quit after {} ticks, {} session(s), best score {}",
            self.summary.ticks,
            self.summary.sessions,
            self.summary.best_score
        );
        (self.summary, self.renderer)
    }
}
