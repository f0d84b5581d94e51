#![forbid(unsafe_code)]

pub mod attack;
pub mod board;
pub mod castling;
pub mod coord;
pub mod force;
pub mod game;
pub mod grid;
pub mod moves;
pub mod piece;
pub mod variant;

pub use attack::AttackMap;
pub use board::{Board, MoveError, MoveSnapshot};
pub use castling::{CastleSide, CastlingInfo};
pub use coord::{Col, Coord, Corner, Row, Square};
pub use force::Force;
pub use game::{DrawReason, Game, GameStatus, VictoryReason};
pub use grid::Grid;
pub use piece::{PieceKind, PieceOnBoard};
pub use variant::Variant;
