use super::{Dimensions, Grid, Player, Position, RUN_LENGTH};
use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won(Player),
    Tied,
}

/// Where the turn state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

/// A piece that was accepted and where it came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
    /// Set when this placement ended the game.
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state on a 7x6 grid
    pub fn initial() -> Self {
        Self::with_dimensions(Dimensions::STANDARD)
    }

    pub fn with_dimensions(dimensions: Dimensions) -> Self {
        GameState {
            grid: Grid::new(dimensions),
            current_player: Player::One, // One starts
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            None => GameStatus::InProgress,
            Some(GameOutcome::Won(player)) => GameStatus::Won(player),
            Some(GameOutcome::Tied) => GameStatus::Tied,
        }
    }

    /// Check if game is over
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Lowest empty row of `column`, or `None` when it is full.
    pub fn find_landing_row(&self, column: usize) -> Option<usize> {
        self.grid.find_landing_row(column)
    }

    /// Drop the current player's piece into `column`.
    ///
    /// On success exactly one cell changes. The win check runs before the
    /// tie check; a terminal placement leaves the mover as current player,
    /// any other placement hands the turn over. On error nothing changes.
    pub fn drop_piece(&mut self, column: isize) -> Result<Placement, MoveError> {
        let width = self.grid.width();
        let index = usize::try_from(column)
            .ok()
            .filter(|&c| c < width)
            .ok_or(MoveError::InvalidColumn { column, width })?;

        if self.is_over() {
            return Err(MoveError::GameAlreadyOver);
        }

        let player = self.current_player;
        let row = self
            .grid
            .drop_piece(index, player)
            .ok_or(MoveError::ColumnFull { column: index })?;

        if self.check_for_win() {
            self.outcome = Some(GameOutcome::Won(player));
        } else if self.check_for_tie() {
            self.outcome = Some(GameOutcome::Tied);
        } else {
            self.current_player = player.other();
        }

        Ok(Placement {
            row,
            column: index,
            player,
            outcome: self.outcome,
        })
    }

    /// Whether the current player has four in a row anywhere on the grid.
    pub fn check_for_win(&self) -> bool {
        self.grid.has_four_in_a_row(self.current_player)
    }

    /// The winning run, once the game has been won.
    pub fn winning_line(&self) -> Option<[Position; RUN_LENGTH]> {
        match self.outcome {
            Some(GameOutcome::Won(player)) => self.grid.winning_line(player),
            _ => None,
        }
    }

    /// Full grid with no win for the current player.
    pub fn check_for_tie(&self) -> bool {
        self.grid.is_full() && !self.check_for_win()
    }

    /// Back to an empty grid of the same size with Player One to move.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.current_player = Player::One;
        self.outcome = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
