use crate::game::{Cell, Dimensions, GameOutcome, Player, Position, Renderer};

/// A piece on its way down to its landing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FallingPiece {
    row: usize,
    target_row: usize,
    column: usize,
    player: Player,
}

/// Terminal view model. Mirrors the board only through renderer
/// notifications and owns the cosmetic falling animation.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    falling: Option<FallingPiece>,
    message: Option<String>,
    game_over: bool,
    highlight: Vec<Position>,
}

impl TerminalRenderer {
    pub fn new(dimensions: Dimensions) -> Self {
        TerminalRenderer {
            dimensions,
            cells: vec![Cell::Empty; dimensions.cell_count()],
            falling: None,
            message: None,
            game_over: false,
            highlight: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_animating(&self) -> bool {
        self.falling.is_some()
    }

    /// Cells to draw in the winning colour.
    pub fn set_highlight(&mut self, line: &[Position]) {
        self.highlight = line.to_vec();
    }

    pub fn is_highlighted(&self, row: usize, column: usize) -> bool {
        self.highlight.contains(&Position::new(row, column))
    }

    /// What to draw at a cell right now. A falling piece is shown at its
    /// current row and its landing cell stays empty until it arrives.
    pub fn display_cell(&self, row: usize, column: usize) -> Cell {
        if let Some(piece) = self.falling {
            if piece.column == column {
                if piece.row == row {
                    return Cell::Occupied(piece.player);
                }
                if piece.target_row == row {
                    return Cell::Empty;
                }
            }
        }
        self.cells[row * self.dimensions.width() + column]
    }

    /// Advance the animation one row. Returns whether a piece is still
    /// falling.
    pub fn tick(&mut self) -> bool {
        if let Some(piece) = self.falling.as_mut() {
            piece.row += 1;
            if piece.row >= piece.target_row {
                self.falling = None;
            }
        }
        self.is_animating()
    }
}

impl Renderer for TerminalRenderer {
    fn on_piece_placed(&mut self, row: usize, column: usize, player: Player) {
        let width = self.dimensions.width();
        self.cells[row * width + column] = Cell::Occupied(player);
        self.message = None;
        self.falling = (row > 0).then_some(FallingPiece {
            row: 0,
            target_row: row,
            column,
            player,
        });
    }

    fn on_game_ended(&mut self, outcome: GameOutcome) {
        self.game_over = true;
        self.message = Some(match outcome {
            GameOutcome::Won(player) => format!("{} won! Press 'r' to play again.", player.name()),
            GameOutcome::Tied => "It's a tie! Press 'r' to play again.".to_string(),
        });
    }

    fn on_reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.falling = None;
        self.game_over = false;
        self.highlight.clear();
        self.message = Some("New game started!".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_falls_to_landing_row() {
        let mut renderer = TerminalRenderer::new(Dimensions::STANDARD);
        renderer.on_piece_placed(5, 2, Player::One);

        assert!(renderer.is_animating());
        assert_eq!(renderer.display_cell(0, 2), Cell::Occupied(Player::One));
        assert_eq!(renderer.display_cell(5, 2), Cell::Empty);

        let mut ticks = 0;
        while renderer.tick() {
            ticks += 1;
        }
        assert_eq!(ticks, 4);
        assert_eq!(renderer.display_cell(0, 2), Cell::Empty);
        assert_eq!(renderer.display_cell(5, 2), Cell::Occupied(Player::One));
    }

    #[test]
    fn test_top_row_piece_does_not_animate() {
        let mut renderer = TerminalRenderer::new(Dimensions::new(3, 1).unwrap());
        renderer.on_piece_placed(0, 1, Player::Two);
        assert!(!renderer.is_animating());
        assert_eq!(renderer.display_cell(0, 1), Cell::Occupied(Player::Two));
    }

    #[test]
    fn test_game_end_and_reset() {
        let mut renderer = TerminalRenderer::new(Dimensions::STANDARD);
        renderer.on_piece_placed(5, 0, Player::One);
        renderer.on_game_ended(GameOutcome::Won(Player::One));
        renderer.set_highlight(&[Position::new(5, 0)]);

        assert!(renderer.is_game_over());
        assert!(renderer.is_highlighted(5, 0));
        assert_eq!(
            renderer.message(),
            Some("Player 1 won! Press 'r' to play again.")
        );

        renderer.on_reset();
        assert!(!renderer.is_game_over());
        assert!(!renderer.is_highlighted(5, 0));
        assert!(!renderer.is_animating());
        assert_eq!(renderer.display_cell(5, 0), Cell::Empty);
        assert_eq!(renderer.message(), Some("New game started!"));
    }

    #[test]
    fn test_tie_message() {
        let mut renderer = TerminalRenderer::new(Dimensions::STANDARD);
        renderer.on_game_ended(GameOutcome::Tied);
        assert_eq!(
            renderer.message(),
            Some("It's a tie! Press 'r' to play again.")
        );
    }
}
