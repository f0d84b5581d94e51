//! Raw candidate-move generation. Pure and king-safety-blind: everything here
//! answers "where could this piece go geometrically", not "is that legal".
//! King safety and castling filters live on `Board`.

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::coord::{Coord, Corner, Point, Square};
use crate::grid::{CornerSlots, Grid};
use crate::piece::{PieceKind, PieceOnBoard};
use crate::variant::Variant;


pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

// Diagonal single steps plus {1,3} jumps. Every offset shifts coordinate
// parity by an even amount, which is what binds a wizard to squares of its
// starting color.
const WIZARD_OFFSETS: [(i8, i8); 12] = [
    (-1, -1), (-1, 1), (1, -1), (1, 1),
    (-3, -1), (-3, 1), (-1, -3), (-1, 3),
    (1, -3), (1, 3), (3, -1), (3, 1),
];

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];


// Read-only view of a piece placement, committed or hypothetical.
pub struct BoardView<'a> {
    pub grid: &'a Grid,
    pub corners: &'a CornerSlots,
    pub variant: Variant,
    pub en_passant_target: Option<Coord>,
}

impl<'a> BoardView<'a> {
    pub fn piece_at(&self, square: Square) -> Option<PieceOnBoard> {
        match square {
            Square::Board(coord) => self.grid.get(coord),
            Square::Corner(corner) => self.corners[corner],
        }
    }

    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, PieceOnBoard)> + '_ {
        let on_board = self
            .variant
            .shape()
            .coords()
            .filter_map(|coord| self.grid.get(coord).map(|piece| (Square::Board(coord), piece)));
        let in_corners = Corner::iter()
            .filter_map(|corner| self.corners[corner].map(|piece| (Square::Corner(corner), piece)));
        on_board.chain(in_corners)
    }

    fn target(&self, origin: Point, offset: (i8, i8)) -> Option<Coord> {
        Coord::from_point((origin.0 + offset.0, origin.1 + offset.1), self.variant.shape())
    }
}

// Candidate destinations for the piece at `from`, in generation order,
// ignoring king safety. Castling destinations are not included; the board
// layer unions them in for the king.
pub fn candidate_moves(view: &BoardView, from: Square) -> Vec<Coord> {
    let Some(piece) = view.piece_at(from) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(view, from, piece),
        PieceKind::Knight => offset_moves(view, from, piece, &KNIGHT_OFFSETS),
        PieceKind::Bishop => sliding_moves(view, from, piece, &BISHOP_DIRS),
        PieceKind::Rook => sliding_moves(view, from, piece, &ROOK_DIRS),
        PieceKind::Queen => {
            let mut moves = sliding_moves(view, from, piece, &ROOK_DIRS);
            moves.extend(sliding_moves(view, from, piece, &BISHOP_DIRS));
            moves
        }
        PieceKind::King => offset_moves(view, from, piece, &KING_OFFSETS),
        PieceKind::Champion => {
            let mut moves = offset_moves(view, from, piece, &KNIGHT_OFFSETS);
            moves.extend(offset_moves(view, from, piece, &KING_OFFSETS));
            moves
        }
        PieceKind::Wizard => offset_moves(view, from, piece, &WIZARD_OFFSETS),
    }
}

// Squares the piece at `from` threatens. Defaults to its candidate moves;
// a pawn only threatens its two capture diagonals (it cannot capture where it
// walks), and a king never threatens via castling.
pub fn attacking_squares(view: &BoardView, from: Square) -> Vec<Coord> {
    let Some(piece) = view.piece_at(from) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => {
            let origin = from.point();
            let dir = piece.force.direction_forward();
            [(dir, -1), (dir, 1)]
                .into_iter()
                .filter_map(|offset| view.target(origin, offset))
                .collect_vec()
        }
        _ => candidate_moves(view, from),
    }
}

fn offset_moves(
    view: &BoardView, from: Square, piece: PieceOnBoard, offsets: &[(i8, i8)],
) -> Vec<Coord> {
    let origin = from.point();
    offsets
        .iter()
        .filter_map(|&offset| view.target(origin, offset))
        .filter(|&to| match view.grid.get(to) {
            None => true,
            Some(target) => piece.is_opponent(target),
        })
        .collect_vec()
}

fn sliding_moves(
    view: &BoardView, from: Square, piece: PieceOnBoard, dirs: &[(i8, i8)],
) -> Vec<Coord> {
    let origin = from.point();
    let mut moves = Vec::new();
    for &dir in dirs {
        let mut pos = origin;
        loop {
            pos = (pos.0 + dir.0, pos.1 + dir.1);
            let Some(to) = Coord::from_point(pos, view.variant.shape()) else {
                break;
            };
            match view.grid.get(to) {
                None => moves.push(to),
                Some(target) => {
                    if piece.is_opponent(target) {
                        moves.push(to);
                    }
                    break;
                }
            }
        }
    }
    moves
}

fn pawn_moves(view: &BoardView, from: Square, piece: PieceOnBoard) -> Vec<Coord> {
    let mut moves = Vec::new();
    let origin = from.point();
    let dir = piece.force.direction_forward();

    // Forward advances: blocked by the first occupant, which is never taken.
    let max_steps = if piece.has_moved { 1 } else { view.variant.pawn_initial_max_steps() };
    for step in 1..=(max_steps as i8) {
        match view.target(origin, (dir * step, 0)) {
            Some(to) if view.grid.get(to).is_none() => moves.push(to),
            _ => break,
        }
    }

    // Diagonal captures.
    for offset in [(dir, -1), (dir, 1)] {
        if let Some(to) = view.target(origin, offset) {
            if view.grid.get(to).is_some_and(|target| piece.is_opponent(target)) {
                moves.push(to);
            }
        }
    }

    // En passant: classic rules only; the stored target must be one row ahead
    // on a horizontally adjacent file.
    if view.variant.allows_en_passant() {
        if let Some(target) = view.en_passant_target {
            let (d_row, d_col) = (
                target.point().0 - origin.0,
                target.point().1 - origin.1,
            );
            if d_row == dir && d_col.abs() == 1 {
                moves.push(target);
            }
        }
    }

    moves
}


#[cfg(test)]
mod tests {
    use enum_map::enum_map;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::force::Force;

    fn white(kind: PieceKind) -> Option<PieceOnBoard> {
        Some(PieceOnBoard::new(kind, Force::White))
    }
    fn black(kind: PieceKind) -> Option<PieceOnBoard> {
        Some(PieceOnBoard::new(kind, Force::Black))
    }

    fn sorted(mut moves: Vec<Coord>) -> Vec<Coord> {
        moves.sort();
        moves
    }

    #[test]
    fn knight_in_the_corner() {
        let mut grid = Grid::new(Variant::Classic.shape());
        grid[Coord::A1] = white(PieceKind::Knight);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Classic,
            en_passant_target: None,
        };
        assert_eq!(
            sorted(candidate_moves(&v, Coord::A1.into())),
            vec![Coord::C2, Coord::B3],
        );
    }

    #[test]
    fn rook_blocked_by_friend_captures_enemy() {
        let mut grid = Grid::new(Variant::Classic.shape());
        grid[Coord::A1] = white(PieceKind::Rook);
        grid[Coord::A4] = white(PieceKind::Pawn);
        grid[Coord::D1] = black(PieceKind::Bishop);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Classic,
            en_passant_target: None,
        };
        assert_eq!(
            sorted(candidate_moves(&v, Coord::A1.into())),
            vec![Coord::B1, Coord::C1, Coord::D1, Coord::A2, Coord::A3],
        );
    }

    #[test]
    fn pawn_first_move_steps() {
        let mut grid = Grid::new(Variant::Classic.shape());
        grid[Coord::E2] = white(PieceKind::Pawn);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Classic,
            en_passant_target: None,
        };
        assert_eq!(
            sorted(candidate_moves(&v, Coord::E2.into())),
            vec![Coord::E3, Coord::E4],
        );
    }

    #[test]
    fn pawn_blocked_at_second_square() {
        let mut grid = Grid::new(Variant::Classic.shape());
        grid[Coord::E2] = white(PieceKind::Pawn);
        grid[Coord::E4] = black(PieceKind::Knight);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Classic,
            en_passant_target: None,
        };
        // The knight blocks the double step but is not capturable forward.
        assert_eq!(candidate_moves(&v, Coord::E2.into()), vec![Coord::E3]);
    }

    #[test]
    fn pawn_attacks_diagonals_only() {
        let mut grid = Grid::new(Variant::Classic.shape());
        grid[Coord::E2] = white(PieceKind::Pawn);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Classic,
            en_passant_target: None,
        };
        assert_eq!(
            sorted(attacking_squares(&v, Coord::E2.into())),
            vec![Coord::D3, Coord::F3],
        );
    }

    #[test]
    fn omega_pawn_triple_step() {
        let mut grid = Grid::new(Variant::Omega.shape());
        grid[Coord::C2] = white(PieceKind::Pawn);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Omega,
            en_passant_target: None,
        };
        assert_eq!(
            sorted(candidate_moves(&v, Coord::C2.into())),
            vec![Coord::C3, Coord::C4, Coord::C5],
        );
    }

    #[test]
    fn champion_unions_knight_and_king_offsets() {
        let mut grid = Grid::new(Variant::Omega.shape());
        grid[Coord::E5] = white(PieceKind::Champion);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Omega,
            en_passant_target: None,
        };
        let moves = candidate_moves(&v, Coord::E5.into());
        assert_eq!(moves.len(), 16);
        assert!(moves.contains(&Coord::D3)); // knight-wise
        assert!(moves.contains(&Coord::D4)); // king-wise
    }

    #[test]
    fn wizard_preserves_square_color() {
        let mut grid = Grid::new(Variant::Omega.shape());
        grid[Coord::E5] = white(PieceKind::Wizard);
        let corners = enum_map! { _ => None };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Omega,
            en_passant_target: None,
        };
        let moves = candidate_moves(&v, Coord::E5.into());
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|to| to.is_light() == Coord::E5.is_light()));
        assert!(moves.contains(&Coord::D4)); // diagonal step
        assert!(moves.contains(&Coord::H6)); // (1, 3) jump
        assert!(moves.contains(&Coord::B4)); // (-1, -3) jump
    }

    #[test]
    fn wizard_leaves_its_corner() {
        let mut grid = Grid::new(Variant::Omega.shape());
        grid[Coord::A1] = white(PieceKind::Champion);
        let corners = enum_map! {
            Corner::WhiteQueenside => Some(PieceOnBoard::new(PieceKind::Wizard, Force::White)),
            _ => None,
        };
        let v = BoardView {
            grid: &grid,
            corners: &corners,
            variant: Variant::Omega,
            en_passant_target: None,
        };
        // From (-1,-1) the diagonal step lands on the friendly champion at a1;
        // the (1,3) and (3,1) jumps reach c1 and a3.
        let moves = candidate_moves(&v, Square::Corner(Corner::WhiteQueenside));
        assert_eq!(sorted(moves), vec![Coord::C1, Coord::A3]);
    }
}
