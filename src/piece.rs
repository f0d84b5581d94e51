use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::force::Force;
use crate::variant::Variant;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Champion,
    Wizard,
}

impl PieceKind {
    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::Champion => 'C',
            PieceKind::Wizard => 'W',
        }
    }

    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            'C' => Some(PieceKind::Champion),
            'W' => Some(PieceKind::Wizard),
            _ => None,
        }
    }

    // Kinds whose "has moved" flag carries rule weight: castling eligibility
    // for king and rook, initial multi-step eligibility for pawn.
    pub fn tracks_has_moved(self) -> bool {
        use PieceKind::*;
        matches!(self, Pawn | Rook | King)
    }
}

pub fn can_promote_to(kind: PieceKind, variant: Variant) -> bool {
    variant.promotion_kinds().contains(&kind)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub force: Force,
    #[new(value = "false")]
    pub has_moved: bool,
}

impl PieceOnBoard {
    pub fn moved(kind: PieceKind, force: Force) -> Self {
        PieceOnBoard { kind, force, has_moved: true }
    }

    pub fn is_opponent(self, other: PieceOnBoard) -> bool {
        self.force != other.force
    }
}

// Unicode glyph for terminal display. The Omega pieces have no codepoints, so
// they fall back to letters.
pub fn piece_to_pictogram(piece_kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, piece_kind) {
        (White, Pawn) => '♙',
        (White, Knight) => '♘',
        (White, Bishop) => '♗',
        (White, Rook) => '♖',
        (White, Queen) => '♕',
        (White, King) => '♔',
        // No unicode glyphs exist for the Omega pieces.
        (White, Champion) => 'C',
        (White, Wizard) => 'W',
        (Black, Pawn) => '♟',
        (Black, Knight) => '♞',
        (Black, Bishop) => '♝',
        (Black, Rook) => '♜',
        (Black, Queen) => '♛',
        (Black, King) => '♚',
        (Black, Champion) => 'c',
        (Black, Wizard) => 'w',
    }
}


#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn algebraic_round_trip() {
        for kind in PieceKind::iter() {
            assert_eq!(PieceKind::from_algebraic_char(kind.to_full_algebraic()), Some(kind));
        }
        assert_eq!(PieceKind::from_algebraic_char('X'), None);
    }

    #[test]
    fn pictograms_are_distinct_per_force() {
        for kind in PieceKind::iter() {
            assert_ne!(
                piece_to_pictogram(kind, Force::White),
                piece_to_pictogram(kind, Force::Black)
            );
        }
    }
}
