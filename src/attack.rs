use std::collections::HashMap;

use crate::coord::{Coord, Square};
use crate::force::Force;
use crate::grid::{CornerSlots, Grid};
use crate::moves::{self, BoardView};
use crate::variant::Variant;


// Index from a board square to the pieces of one force currently able to
// capture there. Always rebuilt by a full scan; never updated incrementally,
// so a rebuild over the same placement is idempotent.
#[derive(Clone, Debug, Default)]
pub struct AttackMap {
    attackers: HashMap<Coord, Vec<Square>>,
}

impl AttackMap {
    pub fn compute(grid: &Grid, corners: &CornerSlots, variant: Variant, force: Force) -> Self {
        let view = BoardView { grid, corners, variant, en_passant_target: None };
        let mut attackers: HashMap<Coord, Vec<Square>> = HashMap::new();
        for (from, piece) in view.occupied_squares() {
            if piece.force != force {
                continue;
            }
            for attacked in moves::attacking_squares(&view, from) {
                attackers.entry(attacked).or_default().push(from);
            }
        }
        AttackMap { attackers }
    }

    pub fn is_attacked(&self, square: Coord) -> bool {
        self.attackers.get(&square).is_some_and(|list| !list.is_empty())
    }

    pub fn attackers_of(&self, square: Coord) -> &[Square] {
        self.attackers.get(&square).map_or(&[], |list| list.as_slice())
    }
}
