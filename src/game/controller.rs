use tracing::{debug, info, warn};

use super::{Dimensions, GameState, Placement, Renderer};
use crate::error::MoveError;

/// Routes input into a [`GameState`] and reports every change to a
/// [`Renderer`].
#[derive(Debug)]
pub struct GameController<R> {
    state: GameState,
    renderer: R,
}

impl<R: Renderer> GameController<R> {
    pub fn new(state: GameState, renderer: R) -> Self {
        GameController { state, renderer }
    }

    pub fn with_dimensions(dimensions: Dimensions, renderer: R) -> Self {
        Self::new(GameState::with_dimensions(dimensions), renderer)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (GameState, R) {
        (self.state, self.renderer)
    }

    /// Drop the current player's piece into `column`.
    ///
    /// The renderer hears about the placed piece first and then, if the drop
    /// ended the game, about the outcome. Errors notify nothing.
    pub fn select_column(&mut self, column: isize) -> Result<Placement, MoveError> {
        let placement = match self.state.drop_piece(column) {
            Ok(placement) => placement,
            Err(err) => {
                if err.is_rejection() {
                    debug!(column, %err, "drop ignored");
                } else {
                    warn!(column, %err, "drop rejected");
                }
                return Err(err);
            }
        };

        debug!(
            row = placement.row,
            column = placement.column,
            player = placement.player.number(),
            "piece placed"
        );
        self.renderer
            .on_piece_placed(placement.row, placement.column, placement.player);

        if let Some(outcome) = placement.outcome {
            info!(?outcome, "game ended");
            self.renderer.on_game_ended(outcome);
        }

        Ok(placement)
    }

    /// Start a new game on the same board.
    pub fn reset_game(&mut self) {
        self.state.reset();
        info!("game reset");
        self.renderer.on_reset();
    }
}
