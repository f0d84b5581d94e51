#![allow(dead_code)]

use enum_map::enum_map;
use omega_chess::grid::CornerSlots;
use omega_chess::{Board, Coord, Force, Game, Grid, PieceKind, PieceOnBoard, Variant};

pub fn white(kind: PieceKind) -> PieceOnBoard {
    PieceOnBoard::new(kind, Force::White)
}

pub fn black(kind: PieceKind) -> PieceOnBoard {
    PieceOnBoard::new(kind, Force::Black)
}

pub fn white_moved(kind: PieceKind) -> PieceOnBoard {
    PieceOnBoard::moved(kind, Force::White)
}

pub fn black_moved(kind: PieceKind) -> PieceOnBoard {
    PieceOnBoard::moved(kind, Force::Black)
}

pub fn board_with(variant: Variant, pieces: &[(Coord, PieceOnBoard)]) -> Board {
    let mut grid = Grid::new(variant.shape());
    for &(pos, piece) in pieces {
        grid[pos] = Some(piece);
    }
    Board::new(variant, grid, enum_map! { _ => None })
}

pub fn play(game: &mut Game, moves: &[(Coord, Coord)]) {
    for &(from, to) in moves {
        game.make_move(from.into(), to.into())
            .unwrap_or_else(|err| panic!("{from:?} -> {to:?} failed: {err:?}"));
    }
}

// Everything that defines a position. Undo tests compare these before and
// after a move/undo pair; the piece values include their "has moved" flags.
#[derive(PartialEq, Debug)]
pub struct PositionFingerprint {
    grid: Grid,
    corners: CornerSlots,
    en_passant_target: Option<Coord>,
    captured_white: Vec<PieceOnBoard>,
    captured_black: Vec<PieceOnBoard>,
}

pub fn fingerprint(board: &Board) -> PositionFingerprint {
    PositionFingerprint {
        grid: board.grid().clone(),
        corners: *board.corners(),
        en_passant_target: board.en_passant_target(),
        captured_white: board.captured_pieces(Force::White).to_vec(),
        captured_black: board.captured_pieces(Force::Black).to_vec(),
    }
}
