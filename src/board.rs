use enum_map::{enum_map, EnumMap};
use log::info;

use crate::attack::AttackMap;
use crate::castling::CastlingInfo;
use crate::coord::{Coord, Square};
use crate::force::Force;
use crate::grid::{CornerSlots, Grid};
use crate::moves::{self, BoardView};
use crate::piece::{PieceKind, PieceOnBoard};
use crate::variant::Variant;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    GameOver,
    PieceMissing,
    WrongTurnOrder,
    InvalidDestination,
    ImpossibleTrajectory,
    FriendlyFire,
    UnprotectedKing,
    CastlingForbidden,
    EmptyHistory,
}

// Everything needed to reverse one committed move exactly: the moved piece as
// it was before the move (including its "has moved" flag), the capture, the
// prior en-passant target, and the prior flags of both kings and of the rooks
// on their castling home squares.
#[derive(Clone, Debug)]
pub struct MoveSnapshot {
    pub piece: PieceOnBoard,
    pub from: Square,
    pub to: Coord,
    pub captured: Option<(Coord, PieceOnBoard)>,
    pub en_passant_before: Option<Coord>,
    pub king_moved_before: EnumMap<Force, bool>,
    pub rook_moved_before: Vec<(Coord, Force, bool)>,
    pub castling: Option<CastlingInfo>,
    pub is_en_passant: bool,
    // The move carried a pawn onto its promotion row.
    pub is_promotion: bool,
}

// Result of the fallible validation phase: the full post-move placement plus
// the bookkeeping the commit phase needs. Applying it cannot fail.
struct MoveOutcome {
    piece: PieceOnBoard,
    to: Coord,
    grid: Grid,
    corners: CornerSlots,
    capture: Option<(Coord, PieceOnBoard)>,
    castling: Option<CastlingInfo>,
    is_en_passant: bool,
    new_en_passant_target: Option<Coord>,
}

#[derive(Clone, Debug)]
pub struct Board {
    variant: Variant,
    grid: Grid,
    corners: CornerSlots,
    attacks: EnumMap<Force, AttackMap>,
    history: Vec<MoveSnapshot>,
    en_passant_target: Option<Coord>,
    captured: EnumMap<Force, Vec<PieceOnBoard>>,
}

impl Board {
    pub fn new(variant: Variant, grid: Grid, corners: CornerSlots) -> Self {
        let mut board = Board {
            variant,
            grid,
            corners,
            attacks: enum_map! { _ => AttackMap::default() },
            history: Vec::new(),
            en_passant_target: None,
            captured: enum_map! { _ => Vec::new() },
        };
        board.recompute_attacks();
        board
    }

    pub fn empty(variant: Variant) -> Self {
        Self::new(variant, Grid::new(variant.shape()), enum_map! { _ => None })
    }

    pub fn variant(&self) -> Variant { self.variant }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn corners(&self) -> &CornerSlots { &self.corners }
    pub fn en_passant_target(&self) -> Option<Coord> { self.en_passant_target }
    pub fn captured_pieces(&self, force: Force) -> &[PieceOnBoard] { &self.captured[force] }
    pub fn history(&self) -> &[MoveSnapshot] { &self.history }

    pub fn piece_at(&self, square: Square) -> Option<PieceOnBoard> {
        match square {
            Square::Board(coord) => self.grid.get(coord),
            Square::Corner(corner) => self.corners[corner],
        }
    }

    // For setting up positions. Not meant for use during play: the undo
    // history does not record it.
    pub fn place_piece(&mut self, square: Square, piece: Option<PieceOnBoard>) {
        assert!(square.is_valid(self.variant), "{square:?} is not on a {:?} board", self.variant);
        self.set_piece(square, piece);
        self.recompute_attacks();
    }

    // Swaps the piece at `square` for another one of the same force.
    // Promotion uses this; the pawn is discarded, not captured.
    pub fn replace_piece(&mut self, square: Square, piece: PieceOnBoard) {
        assert!(square.is_valid(self.variant), "{square:?} is not on a {:?} board", self.variant);
        self.set_piece(square, Some(piece));
        self.recompute_attacks();
    }

    fn set_piece(&mut self, square: Square, piece: Option<PieceOnBoard>) {
        match square {
            Square::Board(coord) => self.grid[coord] = piece,
            Square::Corner(corner) => self.corners[corner] = piece,
        }
    }

    fn view(&self) -> BoardView<'_> {
        BoardView {
            grid: &self.grid,
            corners: &self.corners,
            variant: self.variant,
            en_passant_target: self.en_passant_target,
        }
    }

    fn recompute_attacks(&mut self) {
        self.attacks = enum_map! {
            force => AttackMap::compute(&self.grid, &self.corners, self.variant, force),
        };
    }

    // ---------- Attack queries ----------

    pub fn is_square_attacked_by(&self, square: Coord, force: Force) -> bool {
        self.attacks[force].is_attacked(square)
    }

    pub fn attackers_of(&self, square: Coord, force: Force) -> &[Square] {
        self.attacks[force].attackers_of(square)
    }

    pub fn find_king(&self, force: Force) -> Option<Coord> {
        find_king_in(&self.grid, force)
    }

    pub fn is_king_in_check(&self, force: Force) -> bool {
        match self.find_king(force) {
            Some(king_pos) => self.is_square_attacked_by(king_pos, force.opponent()),
            None => false,
        }
    }

    pub fn is_checkmate(&self, force: Force) -> bool {
        self.is_king_in_check(force) && !self.has_legal_moves(force)
    }

    pub fn is_stalemate(&self, force: Force) -> bool {
        !self.is_king_in_check(force) && !self.has_legal_moves(force)
    }

    pub fn has_legal_moves(&self, force: Force) -> bool {
        let occupied: Vec<_> = self
            .view()
            .occupied_squares()
            .filter(|(_, piece)| piece.force == force)
            .map(|(square, _)| square)
            .collect();
        for from in occupied {
            for to in self.candidate_moves(from) {
                if self.validate_move(from, to.into(), force).is_ok() {
                    return true;
                }
            }
        }
        false
    }

    // ---------- Candidate moves and legality ----------

    // Raw candidate destinations, castling destinations included for a king.
    pub fn candidate_moves(&self, from: Square) -> Vec<Coord> {
        let mut candidates = moves::candidate_moves(&self.view(), from);
        if let Some(piece) = self.piece_at(from) {
            if piece.kind == PieceKind::King {
                candidates
                    .extend(self.possible_castlings(piece.force).into_iter().map(|c| c.king_to));
            }
        }
        candidates
    }

    pub fn possible_castlings(&self, force: Force) -> Vec<CastlingInfo> {
        CastlingInfo::all_for(self.variant, force)
            .into_iter()
            .filter(|castling| castling.is_allowed(self))
            .collect()
    }

    pub fn is_move_legal(&self, from: Square, to: Square, force: Force) -> bool {
        self.validate_move(from, to, force).is_ok()
    }

    pub fn validate_move(&self, from: Square, to: Square, force: Force) -> Result<(), MoveError> {
        let piece = self.piece_at(from).ok_or(MoveError::PieceMissing)?;
        if piece.force != force {
            return Err(MoveError::WrongTurnOrder);
        }
        self.move_outcome(from, to).map(|_| ())
    }

    // Validation phase: checks every precondition and computes the post-move
    // placement on a structural copy. `self` is never mutated, so a failure
    // at any point leaves the board untouched.
    fn move_outcome(&self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        let piece = self.piece_at(from).ok_or(MoveError::PieceMissing)?;
        let to = to
            .board_coord()
            .filter(|&coord| self.variant.shape().contains(coord))
            .ok_or(MoveError::InvalidDestination)?;

        if piece.kind == PieceKind::King {
            let matching = CastlingInfo::all_for(self.variant, piece.force)
                .into_iter()
                .find(|c| Square::Board(c.king_from) == from && c.king_to == to);
            if let Some(castling) = matching {
                return self.castling_outcome(piece, castling);
            }
        }

        if !moves::candidate_moves(&self.view(), from).contains(&to) {
            let friendly_target =
                self.grid.get(to).is_some_and(|target| target.force == piece.force);
            return Err(if friendly_target {
                MoveError::FriendlyFire
            } else {
                MoveError::ImpossibleTrajectory
            });
        }

        let is_en_passant = piece.kind == PieceKind::Pawn
            && self.variant.allows_en_passant()
            && Some(to) == self.en_passant_target;

        // En passant takes the pawn one row behind the target square; it is
        // never on the destination itself.
        let capture = if is_en_passant {
            let dir = piece.force.direction_forward();
            Coord::from_point((to.point().0 - dir, to.point().1), self.variant.shape())
                .and_then(|pos| self.grid.get(pos).map(|victim| (pos, victim)))
                .filter(|(_, victim)| {
                    victim.kind == PieceKind::Pawn && victim.force != piece.force
                })
        } else {
            self.grid.get(to).map(|victim| (to, victim))
        };

        let mut grid = self.grid.clone();
        let mut corners = self.corners;
        if let Some((pos, _)) = capture {
            grid[pos] = None;
        }
        match from {
            Square::Board(coord) => grid[coord] = None,
            Square::Corner(corner) => corners[corner] = None,
        }
        let mut moved = piece;
        if piece.kind.tracks_has_moved() {
            moved.has_moved = true;
        }
        grid[to] = Some(moved);

        // A first-move advance of exactly the variant's full step count opens
        // the en-passant window on the square right behind the pawn.
        // Recorded for any variant; only classic move generation consumes it.
        let mut new_en_passant_target = None;
        if let (PieceKind::Pawn, false, Square::Board(from_coord)) =
            (piece.kind, piece.has_moved, from)
        {
            let (d_row, d_col) = to - from_coord;
            if d_col == 0 && d_row.unsigned_abs() == self.variant.pawn_initial_max_steps() {
                let dir = piece.force.direction_forward();
                new_en_passant_target =
                    Coord::from_point((to.point().0 - dir, to.point().1), self.variant.shape());
            }
        }

        // Simulate: would the mover's own king stand attacked afterwards?
        let king_pos = if piece.kind == PieceKind::King {
            Some(to)
        } else {
            find_king_in(&grid, piece.force)
        };
        if let Some(king_pos) = king_pos {
            let enemy_attacks =
                AttackMap::compute(&grid, &corners, self.variant, piece.force.opponent());
            if enemy_attacks.is_attacked(king_pos) {
                return Err(MoveError::UnprotectedKing);
            }
        }

        Ok(MoveOutcome {
            piece,
            to,
            grid,
            corners,
            capture,
            castling: None,
            is_en_passant,
            new_en_passant_target,
        })
    }

    fn castling_outcome(
        &self, piece: PieceOnBoard, castling: CastlingInfo,
    ) -> Result<MoveOutcome, MoveError> {
        if !castling.is_allowed(self) {
            return Err(MoveError::CastlingForbidden);
        }
        let mut grid = self.grid.clone();
        grid[castling.king_from] = None;
        grid[castling.king_to] = Some(PieceOnBoard::moved(PieceKind::King, piece.force));
        grid[castling.rook_from] = None;
        grid[castling.rook_to] = Some(PieceOnBoard::moved(PieceKind::Rook, piece.force));
        // `is_allowed` checks the king path against pre-move attack maps. The
        // rook vacating its square can open a fresh line onto the destination
        // (possible on a 10-wide back rank), so the castled placement gets the
        // same self-check test as any other move.
        let enemy_attacks =
            AttackMap::compute(&grid, &self.corners, self.variant, piece.force.opponent());
        if enemy_attacks.is_attacked(castling.king_to) {
            return Err(MoveError::CastlingForbidden);
        }
        Ok(MoveOutcome {
            piece,
            to: castling.king_to,
            grid,
            corners: self.corners,
            capture: None,
            castling: Some(castling),
            is_en_passant: false,
            new_en_passant_target: None,
        })
    }

    // ---------- Execution ----------

    // The sole committing mutator. All-or-nothing: any failed precondition
    // returns the error with the board unmodified.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        let outcome = self.move_outcome(from, to)?;
        let snapshot = self.snapshot_before(from, &outcome);
        if let Some((pos, victim)) = outcome.capture {
            info!(
                "{:?} {:?} captured on {:?}{}",
                victim.force,
                victim.kind,
                pos,
                if outcome.is_en_passant { " (en passant)" } else { "" }
            );
            self.captured[victim.force].push(victim);
        }
        info!("{:?} {:?}: {:?} -> {:?}", outcome.piece.force, outcome.piece.kind, from, outcome.to);
        self.grid = outcome.grid;
        self.corners = outcome.corners;
        self.en_passant_target = outcome.new_en_passant_target;
        self.history.push(snapshot);
        self.recompute_attacks();
        Ok(())
    }

    fn snapshot_before(&self, from: Square, outcome: &MoveOutcome) -> MoveSnapshot {
        let king_moved_before = enum_map! {
            force => self
                .find_king(force)
                .and_then(|pos| self.grid.get(pos))
                .is_some_and(|king| king.has_moved),
        };
        let rook_moved_before = CastlingInfo::all(self.variant)
            .map(|c| {
                let moved = self
                    .grid
                    .get(c.rook_from)
                    .is_some_and(|p| p.kind == PieceKind::Rook && p.force == c.force && p.has_moved);
                (c.rook_from, c.force, moved)
            })
            .collect();
        MoveSnapshot {
            piece: outcome.piece,
            from,
            to: outcome.to,
            captured: outcome.capture,
            en_passant_before: self.en_passant_target,
            king_moved_before,
            rook_moved_before,
            castling: outcome.castling,
            is_en_passant: outcome.is_en_passant,
            is_promotion: outcome.piece.kind == PieceKind::Pawn
                && outcome.to.row == self.variant.promotion_row(outcome.piece.force),
        }
    }

    // Reverses the last committed move exactly. The caller (Game) is
    // responsible for reverting its own turn counter in the same breath.
    pub fn undo_last_move(&mut self) -> Result<(), MoveError> {
        let snapshot = self.history.pop().ok_or(MoveError::EmptyHistory)?;

        if let Some((pos, victim)) = snapshot.captured {
            if pos != snapshot.to {
                self.grid[snapshot.to] = None;
            }
            self.grid[pos] = Some(victim);
            let list = &mut self.captured[victim.force];
            if let Some(idx) = list.iter().rposition(|piece| *piece == victim) {
                list.remove(idx);
            }
        } else {
            self.grid[snapshot.to] = None;
        }

        self.set_piece(snapshot.from, Some(snapshot.piece));

        if let Some(castling) = snapshot.castling {
            self.grid[castling.rook_to] = None;
            self.grid[castling.rook_from] =
                Some(PieceOnBoard::new(PieceKind::Rook, castling.force));
        }

        for (force, moved_before) in snapshot.king_moved_before {
            if let Some(pos) = find_king_in(&self.grid, force) {
                if let Some(king) = &mut self.grid[pos] {
                    king.has_moved = moved_before;
                }
            }
        }
        for &(home, force, moved_before) in &snapshot.rook_moved_before {
            if let Some(piece) = &mut self.grid[home] {
                if piece.kind == PieceKind::Rook && piece.force == force {
                    piece.has_moved = moved_before;
                }
            }
        }

        self.en_passant_target = snapshot.en_passant_before;
        self.recompute_attacks();
        info!(
            "undid {:?} {:?}: {:?} -> {:?}",
            snapshot.piece.force, snapshot.piece.kind, snapshot.from, snapshot.to
        );
        Ok(())
    }
}

fn find_king_in(grid: &Grid, force: Force) -> Option<Coord> {
    grid.shape().coords().find(|&pos| {
        grid.get(pos)
            .is_some_and(|piece| piece.kind == PieceKind::King && piece.force == force)
    })
}
