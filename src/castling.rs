use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coord::{Col, Coord, Row};
use crate::force::Force;
use crate::piece::PieceKind;
use crate::variant::Variant;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CastleSide {
    Short,
    Long,
}

// One castling option: fixed squares for a given variant, force and side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CastlingInfo {
    pub force: Force,
    pub side: CastleSide,
    pub king_from: Coord,
    pub king_to: Coord,
    pub rook_from: Coord,
    pub rook_to: Coord,
}

impl CastlingInfo {
    pub fn all_for(variant: Variant, force: Force) -> [CastlingInfo; 2] {
        let row = variant.back_row(force);
        let at = |col| Coord::new(row, col);
        match variant {
            Variant::Classic => [
                CastlingInfo {
                    force,
                    side: CastleSide::Short,
                    king_from: at(Col::E),
                    king_to: at(Col::G),
                    rook_from: at(Col::H),
                    rook_to: at(Col::F),
                },
                CastlingInfo {
                    force,
                    side: CastleSide::Long,
                    king_from: at(Col::E),
                    king_to: at(Col::C),
                    rook_from: at(Col::A),
                    rook_to: at(Col::D),
                },
            ],
            // Omega: king on the f-file, rooks on b and i.
            Variant::Omega => [
                CastlingInfo {
                    force,
                    side: CastleSide::Short,
                    king_from: at(Col::F),
                    king_to: at(Col::H),
                    rook_from: at(Col::I),
                    rook_to: at(Col::G),
                },
                CastlingInfo {
                    force,
                    side: CastleSide::Long,
                    king_from: at(Col::F),
                    king_to: at(Col::D),
                    rook_from: at(Col::B),
                    rook_to: at(Col::E),
                },
            ],
        }
    }

    pub fn all(variant: Variant) -> impl Iterator<Item = CastlingInfo> {
        Self::all_for(variant, Force::White)
            .into_iter()
            .chain(Self::all_for(variant, Force::Black))
    }

    // Squares strictly between king and rook. All must be empty.
    pub fn squares_between(&self) -> impl Iterator<Item = Coord> + '_ {
        let row = self.king_from.row;
        let min = self.king_from.col.min(self.rook_from.col).to_zero_based() + 1;
        let max = self.king_from.col.max(self.rook_from.col).to_zero_based();
        (min..max).map(move |col| Coord::new(row, Col::from_zero_based(col)))
    }

    // Every square the king crosses, start and destination included. None may
    // be attacked by the opponent.
    pub fn king_path(&self) -> impl Iterator<Item = Coord> + '_ {
        let row = self.king_from.row;
        let min = self.king_from.col.min(self.king_to.col).to_zero_based();
        let max = self.king_from.col.max(self.king_to.col).to_zero_based();
        (min..=max).map(move |col| Coord::new(row, Col::from_zero_based(col)))
    }

    // All castling preconditions against a committed board state: king and
    // rook on their home squares and unmoved, empty span, king neither in
    // check now nor transiting an attacked square.
    pub fn is_allowed(&self, board: &Board) -> bool {
        let king_ok = board.grid()[self.king_from]
            .is_some_and(|p| p.kind == PieceKind::King && p.force == self.force && !p.has_moved);
        if !king_ok {
            return false;
        }
        let rook_ok = board.grid()[self.rook_from]
            .is_some_and(|p| p.kind == PieceKind::Rook && p.force == self.force && !p.has_moved);
        if !rook_ok {
            return false;
        }
        if self.squares_between().any(|sq| board.grid()[sq].is_some()) {
            return false;
        }
        if board.is_king_in_check(self.force) {
            return false;
        }
        let opponent = self.force.opponent();
        !self.king_path().any(|sq| board.is_square_attacked_by(sq, opponent))
    }
}
