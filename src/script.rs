//! Headless play: feed a list of columns through a controller and narrate
//! the game as plain text.

use std::io::{self, Write};

use crate::error::ScriptError;
use crate::game::{GameController, GameOutcome, Grid, Player, Renderer};

/// Parse `"3,3,4"` or `"3 3 4"` into columns. Negative numbers are kept so
/// the game can reject them.
pub fn parse_moves(input: &str) -> Result<Vec<isize>, ScriptError> {
    let moves = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token.parse::<isize>().map_err(|_| ScriptError::NotAColumn {
                index,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if moves.is_empty() {
        return Err(ScriptError::Empty);
    }
    Ok(moves)
}

/// Writes one line per notification. Write failures are remembered rather
/// than raised, since [`Renderer`] methods cannot fail.
pub struct TextRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer { out, error: None }
    }

    fn line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{text}") {
            self.error = Some(e);
        }
    }

    /// Print the board, top row first.
    pub fn print_grid(&mut self, grid: &Grid) -> io::Result<()> {
        write!(self.out, "{grid}")
    }

    /// The first write error seen, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn on_piece_placed(&mut self, row: usize, column: usize, player: Player) {
        self.line(&format!("{player} -> row {row}, column {column}"));
    }

    fn on_game_ended(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Won(player) => self.line(&format!("{player} won!")),
            GameOutcome::Tied => self.line("It's a tie!"),
        }
    }

    fn on_reset(&mut self) {
        self.line("Board reset");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptSummary {
    pub placed: usize,
    pub ignored: usize,
    pub outcome: Option<GameOutcome>,
}

/// Play `moves` in order. Moves the game rejects are counted as ignored,
/// and so is everything after the game ends.
pub fn play_script<R: Renderer>(
    controller: &mut GameController<R>,
    moves: &[isize],
) -> ScriptSummary {
    let mut summary = ScriptSummary::default();

    for (index, &column) in moves.iter().enumerate() {
        if controller.state().is_over() {
            summary.ignored += moves.len() - index;
            break;
        }
        match controller.select_column(column) {
            Ok(_) => summary.placed += 1,
            Err(_) => summary.ignored += 1,
        }
    }

    summary.outcome = controller.state().outcome();
    summary
}
