use std::{fmt, ops};

use enum_map::Enum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::force::Force;
use crate::variant::Variant;


// Largest board any variant uses (Omega). Per-variant validity is checked
// against `BoardShape`, not here.
pub const MAX_BOARD_SIZE: u8 = 10;

// A point in the signed coordinate plane the board is embedded into. May lie
// outside the board; corner cells live at their sentinel points. Only move
// generation works with points directly.
pub type Point = (i8, i8);


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < MAX_BOARD_SIZE);
        Self { idx }
    }
    pub const fn from_one_based(idx: u8) -> Self {
        Self::from_zero_based(idx - 1)
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_one_based(self) -> u8 { self.idx + 1 }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < MAX_BOARD_SIZE);
        Self { idx }
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoardShape {
    pub size: u8, // boards are always square
}

impl BoardShape {
    pub fn contains_point(self, (row, col): Point) -> bool {
        (0..self.size as i8).contains(&row) && (0..self.size as i8).contains(&col)
    }
    pub fn contains(self, coord: Coord) -> bool { self.contains_point(coord.point()) }
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.size)
            .cartesian_product(0..self.size)
            .map(|(row, col)| Coord::new(Row::from_zero_based(row), Col::from_zero_based(col)))
    }
}

impl fmt::Debug for BoardShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.size, self.size)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self {
        Self { row, col }
    }
    pub fn point(self) -> Point {
        (self.row.to_zero_based() as i8, self.col.to_zero_based() as i8)
    }
    pub fn from_point((row, col): Point, shape: BoardShape) -> Option<Self> {
        shape.contains_point((row, col)).then(|| {
            Coord::new(Row::from_zero_based(row as u8), Col::from_zero_based(col as u8))
        })
    }
    // Light squares have odd coordinate parity, like h1.
    pub fn is_light(self) -> bool {
        (self.row.to_zero_based() + self.col.to_zero_based()) % 2 == 1
    }
}

impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output {
        (self.row - other.row, self.col - other.col)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_one_based())
    }
}


// The four extra cells outside the main Omega board. Explicit variants instead
// of the sentinel coordinates the cells are embedded at: a corner is a corner,
// not a (-1, -1) that happens to compare equal to nothing on the board.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Corner {
    WhiteQueenside,
    WhiteKingside,
    BlackQueenside,
    BlackKingside,
}

impl Corner {
    // Where the cell sits in the coordinate plane around the 10x10 board.
    pub fn point(self) -> Point {
        match self {
            Corner::WhiteQueenside => (-1, -1),
            Corner::WhiteKingside => (-1, MAX_BOARD_SIZE as i8),
            Corner::BlackQueenside => (MAX_BOARD_SIZE as i8, -1),
            Corner::BlackKingside => (MAX_BOARD_SIZE as i8, MAX_BOARD_SIZE as i8),
        }
    }

    pub fn owner(self) -> Force {
        match self {
            Corner::WhiteQueenside | Corner::WhiteKingside => Force::White,
            Corner::BlackQueenside | Corner::BlackKingside => Force::Black,
        }
    }
}


// A cell a piece can stand on: a main-board square or, under Omega, one of the
// four corner cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    Board(Coord),
    Corner(Corner),
}

impl Square {
    pub fn point(self) -> Point {
        match self {
            Square::Board(coord) => coord.point(),
            Square::Corner(corner) => corner.point(),
        }
    }

    pub fn board_coord(self) -> Option<Coord> {
        match self {
            Square::Board(coord) => Some(coord),
            Square::Corner(_) => None,
        }
    }

    pub fn is_valid(self, variant: Variant) -> bool {
        match self {
            Square::Board(coord) => variant.shape().contains(coord),
            Square::Corner(_) => variant.has_corners(),
        }
    }
}

impl From<Coord> for Square {
    fn from(coord: Coord) -> Self {
        Square::Board(coord)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Square::Board(coord) => write!(f, "{coord:?}"),
            Square::Corner(corner) => write!(f, "{corner:?}"),
        }
    }
}


impl Row {
    #![allow(dead_code)]
    pub const _1: Row = Row::from_one_based(1);
    pub const _2: Row = Row::from_one_based(2);
    pub const _3: Row = Row::from_one_based(3);
    pub const _4: Row = Row::from_one_based(4);
    pub const _5: Row = Row::from_one_based(5);
    pub const _6: Row = Row::from_one_based(6);
    pub const _7: Row = Row::from_one_based(7);
    pub const _8: Row = Row::from_one_based(8);
    pub const _9: Row = Row::from_one_based(9);
    pub const _10: Row = Row::from_one_based(10);
}

impl Col {
    #![allow(dead_code)]
    pub const A: Col = Col::from_zero_based(0);
    pub const B: Col = Col::from_zero_based(1);
    pub const C: Col = Col::from_zero_based(2);
    pub const D: Col = Col::from_zero_based(3);
    pub const E: Col = Col::from_zero_based(4);
    pub const F: Col = Col::from_zero_based(5);
    pub const G: Col = Col::from_zero_based(6);
    pub const H: Col = Col::from_zero_based(7);
    pub const I: Col = Col::from_zero_based(8);
    pub const J: Col = Col::from_zero_based(9);
}

impl Coord {
    #![allow(dead_code)]
    pub const A1: Coord = Coord::new(Row::_1, Col::A);
    pub const A2: Coord = Coord::new(Row::_2, Col::A);
    pub const A3: Coord = Coord::new(Row::_3, Col::A);
    pub const A4: Coord = Coord::new(Row::_4, Col::A);
    pub const A5: Coord = Coord::new(Row::_5, Col::A);
    pub const A6: Coord = Coord::new(Row::_6, Col::A);
    pub const A7: Coord = Coord::new(Row::_7, Col::A);
    pub const A8: Coord = Coord::new(Row::_8, Col::A);
    pub const A9: Coord = Coord::new(Row::_9, Col::A);
    pub const A10: Coord = Coord::new(Row::_10, Col::A);
    pub const B1: Coord = Coord::new(Row::_1, Col::B);
    pub const B2: Coord = Coord::new(Row::_2, Col::B);
    pub const B3: Coord = Coord::new(Row::_3, Col::B);
    pub const B4: Coord = Coord::new(Row::_4, Col::B);
    pub const B5: Coord = Coord::new(Row::_5, Col::B);
    pub const B6: Coord = Coord::new(Row::_6, Col::B);
    pub const B7: Coord = Coord::new(Row::_7, Col::B);
    pub const B8: Coord = Coord::new(Row::_8, Col::B);
    pub const B9: Coord = Coord::new(Row::_9, Col::B);
    pub const B10: Coord = Coord::new(Row::_10, Col::B);
    pub const C1: Coord = Coord::new(Row::_1, Col::C);
    pub const C2: Coord = Coord::new(Row::_2, Col::C);
    pub const C3: Coord = Coord::new(Row::_3, Col::C);
    pub const C4: Coord = Coord::new(Row::_4, Col::C);
    pub const C5: Coord = Coord::new(Row::_5, Col::C);
    pub const C6: Coord = Coord::new(Row::_6, Col::C);
    pub const C7: Coord = Coord::new(Row::_7, Col::C);
    pub const C8: Coord = Coord::new(Row::_8, Col::C);
    pub const C9: Coord = Coord::new(Row::_9, Col::C);
    pub const C10: Coord = Coord::new(Row::_10, Col::C);
    pub const D1: Coord = Coord::new(Row::_1, Col::D);
    pub const D2: Coord = Coord::new(Row::_2, Col::D);
    pub const D3: Coord = Coord::new(Row::_3, Col::D);
    pub const D4: Coord = Coord::new(Row::_4, Col::D);
    pub const D5: Coord = Coord::new(Row::_5, Col::D);
    pub const D6: Coord = Coord::new(Row::_6, Col::D);
    pub const D7: Coord = Coord::new(Row::_7, Col::D);
    pub const D8: Coord = Coord::new(Row::_8, Col::D);
    pub const D9: Coord = Coord::new(Row::_9, Col::D);
    pub const D10: Coord = Coord::new(Row::_10, Col::D);
    pub const E1: Coord = Coord::new(Row::_1, Col::E);
    pub const E2: Coord = Coord::new(Row::_2, Col::E);
    pub const E3: Coord = Coord::new(Row::_3, Col::E);
    pub const E4: Coord = Coord::new(Row::_4, Col::E);
    pub const E5: Coord = Coord::new(Row::_5, Col::E);
    pub const E6: Coord = Coord::new(Row::_6, Col::E);
    pub const E7: Coord = Coord::new(Row::_7, Col::E);
    pub const E8: Coord = Coord::new(Row::_8, Col::E);
    pub const E9: Coord = Coord::new(Row::_9, Col::E);
    pub const E10: Coord = Coord::new(Row::_10, Col::E);
    pub const F1: Coord = Coord::new(Row::_1, Col::F);
    pub const F2: Coord = Coord::new(Row::_2, Col::F);
    pub const F3: Coord = Coord::new(Row::_3, Col::F);
    pub const F4: Coord = Coord::new(Row::_4, Col::F);
    pub const F5: Coord = Coord::new(Row::_5, Col::F);
    pub const F6: Coord = Coord::new(Row::_6, Col::F);
    pub const F7: Coord = Coord::new(Row::_7, Col::F);
    pub const F8: Coord = Coord::new(Row::_8, Col::F);
    pub const F9: Coord = Coord::new(Row::_9, Col::F);
    pub const F10: Coord = Coord::new(Row::_10, Col::F);
    pub const G1: Coord = Coord::new(Row::_1, Col::G);
    pub const G2: Coord = Coord::new(Row::_2, Col::G);
    pub const G3: Coord = Coord::new(Row::_3, Col::G);
    pub const G4: Coord = Coord::new(Row::_4, Col::G);
    pub const G5: Coord = Coord::new(Row::_5, Col::G);
    pub const G6: Coord = Coord::new(Row::_6, Col::G);
    pub const G7: Coord = Coord::new(Row::_7, Col::G);
    pub const G8: Coord = Coord::new(Row::_8, Col::G);
    pub const G9: Coord = Coord::new(Row::_9, Col::G);
    pub const G10: Coord = Coord::new(Row::_10, Col::G);
    pub const H1: Coord = Coord::new(Row::_1, Col::H);
    pub const H2: Coord = Coord::new(Row::_2, Col::H);
    pub const H3: Coord = Coord::new(Row::_3, Col::H);
    pub const H4: Coord = Coord::new(Row::_4, Col::H);
    pub const H5: Coord = Coord::new(Row::_5, Col::H);
    pub const H6: Coord = Coord::new(Row::_6, Col::H);
    pub const H7: Coord = Coord::new(Row::_7, Col::H);
    pub const H8: Coord = Coord::new(Row::_8, Col::H);
    pub const H9: Coord = Coord::new(Row::_9, Col::H);
    pub const H10: Coord = Coord::new(Row::_10, Col::H);
    pub const I1: Coord = Coord::new(Row::_1, Col::I);
    pub const I2: Coord = Coord::new(Row::_2, Col::I);
    pub const I3: Coord = Coord::new(Row::_3, Col::I);
    pub const I4: Coord = Coord::new(Row::_4, Col::I);
    pub const I5: Coord = Coord::new(Row::_5, Col::I);
    pub const I6: Coord = Coord::new(Row::_6, Col::I);
    pub const I7: Coord = Coord::new(Row::_7, Col::I);
    pub const I8: Coord = Coord::new(Row::_8, Col::I);
    pub const I9: Coord = Coord::new(Row::_9, Col::I);
    pub const I10: Coord = Coord::new(Row::_10, Col::I);
    pub const J1: Coord = Coord::new(Row::_1, Col::J);
    pub const J2: Coord = Coord::new(Row::_2, Col::J);
    pub const J3: Coord = Coord::new(Row::_3, Col::J);
    pub const J4: Coord = Coord::new(Row::_4, Col::J);
    pub const J5: Coord = Coord::new(Row::_5, Col::J);
    pub const J6: Coord = Coord::new(Row::_6, Col::J);
    pub const J7: Coord = Coord::new(Row::_7, Col::J);
    pub const J8: Coord = Coord::new(Row::_8, Col::J);
    pub const J9: Coord = Coord::new(Row::_9, Col::J);
    pub const J10: Coord = Coord::new(Row::_10, Col::J);
}
