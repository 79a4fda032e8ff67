//! Core Connect Four game logic: grid, players, the turn state machine, and
//! the controller that reports changes to a renderer.

mod controller;
mod grid;
mod player;
mod renderer;
mod state;

pub use crate::error::MoveError;
pub use controller::GameController;
pub use grid::{Cell, Dimensions, Grid, Position, HEIGHT, MAX_DIMENSION, RUN_LENGTH, WIDTH};
pub use player::Player;
pub use renderer::{NullRenderer, Renderer};
pub use state::{GameOutcome, GameState, GameStatus, Placement};
