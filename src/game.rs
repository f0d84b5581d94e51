use enum_map::enum_map;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::board::{Board, MoveError};
use crate::coord::{Col, Coord, Row, Square};
use crate::force::Force;
use crate::grid::{CornerSlots, Grid};
use crate::piece::{self, PieceKind, PieceOnBoard};
use crate::variant::Variant;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VictoryReason {
    Checkmate,
    Resignation,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DrawReason {
    Stalemate,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Victory(Force, VictoryReason),
    Draw(DrawReason),
}

// A full game: a board plus turn order and outcome. All move validation lives
// in `Board`; `Game` adds whose-turn bookkeeping and end-of-game detection.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    active_force: Force,
    move_count: u32,
    status: GameStatus,
}

impl Game {
    pub fn new(variant: Variant) -> Self {
        let board = Board::new(variant, starting_grid(variant), starting_corners(variant));
        Game { board, active_force: Force::White, move_count: 0, status: GameStatus::Active }
    }

    // Starts mid-position. Intended for analysis and tests; the position is
    // taken as given, including an immediate mate or stalemate.
    pub fn from_position(board: Board, active_force: Force) -> Self {
        let mut game = Game { board, active_force, move_count: 0, status: GameStatus::Active };
        game.refresh_status();
        game
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn variant(&self) -> Variant { self.board.variant() }
    pub fn active_force(&self) -> Force { self.active_force }
    pub fn move_count(&self) -> u32 { self.move_count }
    pub fn status(&self) -> GameStatus { self.status }
    pub fn is_game_over(&self) -> bool { self.status != GameStatus::Active }

    pub fn piece_at(&self, square: Square) -> Option<PieceOnBoard> { self.board.piece_at(square) }

    pub fn captured_pieces(&self, force: Force) -> &[PieceOnBoard] {
        self.board.captured_pieces(force)
    }

    pub fn is_king_in_check(&self, force: Force) -> bool { self.board.is_king_in_check(force) }

    pub fn is_move_legal(&self, from: Square, to: Square) -> bool {
        !self.is_game_over() && self.board.is_move_legal(from, to, self.active_force)
    }

    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::PieceMissing)?;
        if piece.force != self.active_force {
            return Err(MoveError::WrongTurnOrder);
        }
        self.board.make_move(from, to)?;
        self.move_count += 1;
        self.active_force = self.active_force.opponent();
        self.refresh_status();
        Ok(())
    }

    // Rolls back the last move and the turn order together, so the two can
    // never drift apart. Finished games are frozen.
    pub fn undo_last_move(&mut self) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        self.board.undo_last_move()?;
        // `from_position` may start with history already on the board, so the
        // counter can legitimately sit at zero. Clamp rather than underflow.
        self.move_count = self.move_count.saturating_sub(1);
        self.active_force = self.active_force.opponent();
        Ok(())
    }

    // Swaps a pawn that has reached its promotion row for `kind`. The caller
    // detects promotion (e.g. via `is_promotion_square`); calling this with
    // anything but a promotable pawn on its promotion row is a logic error.
    pub fn promote_pawn(&mut self, pos: Coord, kind: PieceKind) {
        let Some(pawn) = self.board.piece_at(pos.into()) else {
            panic!("no piece to promote at {pos:?}");
        };
        assert_eq!(pawn.kind, PieceKind::Pawn, "cannot promote a {:?}", pawn.kind);
        assert_eq!(
            pos.row,
            self.variant().promotion_row(pawn.force),
            "{pos:?} is not a promotion square for {:?}",
            pawn.force
        );
        assert!(
            piece::can_promote_to(kind, self.variant()),
            "cannot promote to {kind:?} in {:?}",
            self.variant()
        );
        self.board.replace_piece(pos.into(), PieceOnBoard::moved(kind, pawn.force));
        info!("{:?} pawn at {pos:?} promoted to {kind:?}", pawn.force);
        self.refresh_status();
    }

    pub fn is_promotion_square(&self, pos: Coord, force: Force) -> bool {
        pos.row == self.variant().promotion_row(force)
    }

    pub fn promotion_kinds(&self) -> &'static [PieceKind] { self.variant().promotion_kinds() }

    pub fn surrender(&mut self, force: Force) {
        assert!(!self.is_game_over(), "cannot resign a finished game");
        info!("{force:?} resigned");
        self.status = GameStatus::Victory(force.opponent(), VictoryReason::Resignation);
    }

    pub fn declare_mate(&mut self, winner: Force) {
        info!("checkmate, {winner:?} wins");
        self.status = GameStatus::Victory(winner, VictoryReason::Checkmate);
    }

    pub fn declare_stalemate(&mut self) {
        info!("stalemate");
        self.status = GameStatus::Draw(DrawReason::Stalemate);
    }

    // A pawn that has reached its promotion row and not yet been exchanged.
    pub fn promotion_pending(&self) -> bool {
        self.board.history().last().is_some_and(|s| {
            s.is_promotion
                && self
                    .board
                    .piece_at(s.to.into())
                    .is_some_and(|piece| piece.kind == PieceKind::Pawn)
        })
    }

    fn refresh_status(&mut self) {
        let defender = self.active_force;
        if self.board.is_king_in_check(defender) {
            debug!("{defender:?} is in check");
        }
        // The verdict depends on what the pawn becomes; wait for the exchange.
        if self.promotion_pending() {
            return;
        }
        if self.board.is_checkmate(defender) {
            self.declare_mate(defender.opponent());
        } else if self.board.is_stalemate(defender) {
            self.declare_stalemate();
        }
    }
}

fn starting_grid(variant: Variant) -> Grid {
    let back_row_kinds: &[PieceKind] = {
        use PieceKind::*;
        match variant {
            Variant::Classic => &[Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook],
            Variant::Omega => {
                &[Champion, Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook, Champion]
            }
        }
    };
    let mut grid = Grid::new(variant.shape());
    for force in Force::iter() {
        let back = variant.back_row(force);
        let pawn_row = Row::from_zero_based(
            (back.to_zero_based() as i8 + force.direction_forward()) as u8,
        );
        for (idx, &kind) in back_row_kinds.iter().enumerate() {
            let col = Col::from_zero_based(idx as u8);
            grid[Coord::new(back, col)] = Some(PieceOnBoard::new(kind, force));
            grid[Coord::new(pawn_row, col)] = Some(PieceOnBoard::new(PieceKind::Pawn, force));
        }
    }
    grid
}

fn starting_corners(variant: Variant) -> CornerSlots {
    if variant.has_corners() {
        enum_map! { corner => Some(PieceOnBoard::new(PieceKind::Wizard, corner.owner())) }
    } else {
        enum_map! { _ => None }
    }
}
