use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Row};
use crate::force::Force;
use crate::piece::PieceKind;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Variant {
    // Standard 8x8 chess.
    Classic,
    // 10x10 board with four corner cells, champions and wizards.
    Omega,
}

impl Variant {
    pub fn board_size(self) -> u8 {
        match self {
            Variant::Classic => 8,
            Variant::Omega => 10,
        }
    }

    pub fn shape(self) -> BoardShape {
        BoardShape { size: self.board_size() }
    }

    // How far a pawn may advance on its first move.
    pub fn pawn_initial_max_steps(self) -> u8 {
        match self {
            Variant::Classic => 2,
            Variant::Omega => 3,
        }
    }

    pub fn has_corners(self) -> bool {
        matches!(self, Variant::Omega)
    }

    // En passant exists only in the classic rules.
    pub fn allows_en_passant(self) -> bool {
        matches!(self, Variant::Classic)
    }

    pub fn promotion_kinds(self) -> &'static [PieceKind] {
        use PieceKind::*;
        match self {
            Variant::Classic => &[Queen, Rook, Bishop, Knight],
            Variant::Omega => &[Queen, Rook, Bishop, Knight, Champion, Wizard],
        }
    }

    // The row a force's pieces start on.
    pub fn back_row(self, force: Force) -> Row {
        match force {
            Force::White => Row::from_zero_based(0),
            Force::Black => Row::from_zero_based(self.board_size() - 1),
        }
    }

    // The row on which a force's pawns promote.
    pub fn promotion_row(self, force: Force) -> Row {
        self.back_row(force.opponent())
    }
}
