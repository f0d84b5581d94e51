use std::{fmt, ops};

use enum_map::EnumMap;
use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{BoardShape, Coord, Corner};
use crate::piece::PieceOnBoard;


// The four Omega corner cells. Always present; all `None` under Classic.
pub type CornerSlots = EnumMap<Corner, Option<PieceOnBoard>>;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    data: Array2<Option<PieceOnBoard>>,
}

impl Grid {
    pub fn new(shape: BoardShape) -> Self {
        Grid {
            data: Array::from_elem((shape.size as usize, shape.size as usize), None),
        }
    }

    pub fn shape(&self) -> BoardShape {
        BoardShape { size: self.data.shape()[0] as u8 }
    }

    pub fn contains(&self, coord: Coord) -> bool { self.shape().contains(coord) }

    pub fn get(&self, coord: Coord) -> Option<PieceOnBoard> {
        self.data.get(coord_to_index(coord)).copied().flatten()
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<PieceOnBoard>;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Self::Output {
        let shape = self.shape();
        self.data
            .get(coord_to_index(pos))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, shape)))
    }
}

impl ops::IndexMut<Coord> for Grid {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        let shape = self.shape();
        self.data
            .get_mut(coord_to_index(pos))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos, shape)))
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [
        pos.row.to_zero_based() as usize,
        pos.col.to_zero_based() as usize,
    ]
}

fn out_of_bound_message(pos: Coord, shape: BoardShape) -> String {
    format!("{pos:?} is out of bound for a {shape:?} board")
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.shape().coords().filter_map(|coord| {
                self[coord].map(|piece| {
                    (format!("{coord:?}"), format!("{:?}-{:?}", piece.force, piece.kind))
                })
            }))
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::Force;
    use crate::piece::PieceKind;
    use crate::variant::Variant;

    #[test]
    fn grid_index_round_trip() {
        let mut g = Grid::new(Variant::Classic.shape());
        assert_eq!(g[Coord::A1], None);
        g[Coord::A1] = Some(PieceOnBoard::new(PieceKind::Queen, Force::White));
        g[Coord::B2] = Some(PieceOnBoard::new(PieceKind::King, Force::Black));
        assert_eq!(g[Coord::A1].unwrap().kind, PieceKind::Queen);
        assert_eq!(g.get(Coord::B2).unwrap().force, Force::Black);
        g[Coord::A1] = None;
        assert_eq!(g.get(Coord::A1), None);
    }

    #[test]
    fn shape_matches_variant() {
        assert_eq!(Grid::new(Variant::Omega.shape()).shape().size, 10);
        assert!(!Grid::new(Variant::Classic.shape()).contains(Coord::J10));
    }
}
