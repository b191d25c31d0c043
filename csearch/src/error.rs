use thiserror::Error;

use crate::dims::Pos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid maze size {rows}x{cols}, both dimensions must be positive")]
    InvalidSize { rows: usize, cols: usize },
    #[error("Cell {pos} is outside of the {rows}x{cols} grid")]
    OutOfBounds { pos: Pos, rows: usize, cols: usize },
    #[error("Unknown search algorithm: {0}")]
    UnknownAlgorithm(String),
}
