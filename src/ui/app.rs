use std::io;
use std::time::{Duration, Instant};

use crate::config::UiConfig;
use crate::game::{Dimensions, GameController, GameState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::{info, warn};

use super::TerminalRenderer;

const IDLE_POLL: Duration = Duration::from_millis(100);

pub struct App {
    controller: GameController<TerminalRenderer>,
    selected_column: usize,
    start_column: usize,
    tick: Duration,
    last_tick: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(dimensions: Dimensions, ui: &UiConfig) -> Self {
        let start_column = ui
            .start_column
            .filter(|&column| column < dimensions.width())
            .unwrap_or(dimensions.width() / 2); // Start in middle
        App {
            controller: GameController::new(
                GameState::with_dimensions(dimensions),
                TerminalRenderer::new(dimensions),
            ),
            selected_column: start_column,
            start_column,
            tick: Duration::from_millis(ui.animation_tick_ms),
            last_tick: Instant::now(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    pub fn renderer(&self) -> &TerminalRenderer {
        self.controller.renderer()
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!(
            width = self.state().grid().width(),
            height = self.state().grid().height(),
            "terminal ui started"
        );
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        info!("terminal ui stopped");
        Ok(())
    }

    /// Handle keyboard events, then advance the drop animation by however
    /// much time has passed
    fn handle_events(&mut self) -> io::Result<()> {
        let timeout = if self.renderer().is_animating() {
            self.tick.saturating_sub(self.last_tick.elapsed())
        } else {
            IDLE_POLL
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        self.advance_animation(Instant::now());
        Ok(())
    }

    /// Move a falling piece one row per elapsed tick up to `now`.
    fn advance_animation(&mut self, now: Instant) {
        if !self.renderer().is_animating() {
            self.last_tick = now;
            return;
        }
        while now.saturating_duration_since(self.last_tick) >= self.tick {
            self.last_tick += self.tick;
            if !self.controller.renderer_mut().tick() {
                self.last_tick = now;
                break;
            }
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let width = self.state().grid().width();

        match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = (c as usize) - ('1' as usize);
                if column < width {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Char('r' | 'R') => {
                self.controller.reset_game();
                self.selected_column = self.start_column;
            }
            _ => {}
        }
    }

    /// Drop piece in selected column. Full columns and input after the game
    /// ended are ignored without comment.
    fn drop_piece(&mut self) {
        let Ok(column) = isize::try_from(self.selected_column) else {
            return;
        };
        match self.controller.select_column(column) {
            Ok(placement) => {
                self.last_tick = Instant::now();
                if placement.outcome.is_some() {
                    if let Some(line) = self.controller.state().winning_line() {
                        self.controller.renderer_mut().set_highlight(&line);
                    }
                }
            }
            Err(err) if err.is_rejection() => {}
            Err(err) => warn!(%err, "selected column rejected"),
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, self.state(), self.renderer(), self.selected_column);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Dimensions::STANDARD, &UiConfig::default())
    }
}
