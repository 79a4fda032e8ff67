use super::{GameOutcome, Player};

/// Receives board changes from a [`GameController`](super::GameController).
///
/// Implementors own all presentation: drawing pieces, animating them,
/// announcing results. The core never reads anything back.
pub trait Renderer {
    /// A piece came to rest at `(row, column)`.
    fn on_piece_placed(&mut self, row: usize, column: usize, player: Player);

    /// The game reached a terminal state; input should be suspended.
    fn on_game_ended(&mut self, outcome: GameOutcome);

    /// The board was cleared; drop all pieces and any end-of-game message.
    fn on_reset(&mut self);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn on_piece_placed(&mut self, row: usize, column: usize, player: Player) {
        (**self).on_piece_placed(row, column, player);
    }

    fn on_game_ended(&mut self, outcome: GameOutcome) {
        (**self).on_game_ended(outcome);
    }

    fn on_reset(&mut self) {
        (**self).on_reset();
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn on_piece_placed(&mut self, row: usize, column: usize, player: Player) {
        (**self).on_piece_placed(row, column, player);
    }

    fn on_game_ended(&mut self, outcome: GameOutcome) {
        (**self).on_game_ended(outcome);
    }

    fn on_reset(&mut self) {
        (**self).on_reset();
    }
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn on_piece_placed(&mut self, _row: usize, _column: usize, _player: Player) {}

    fn on_game_ended(&mut self, _outcome: GameOutcome) {}

    fn on_reset(&mut self) {}
}
