//! Terminal UI: a playable board drawn with ratatui, fed by renderer
//! notifications from the game controller.

mod app;
mod game_view;
mod terminal_renderer;

pub use app::App;
pub use terminal_renderer::TerminalRenderer;
