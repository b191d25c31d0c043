//! Core of tsearch: perfect maze generation and step by step path searching.

pub mod array;
pub mod dims;
mod error;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod search;

pub use error::Error;
pub use maze::Maze;
pub use search::{Algorithm, Event, Search};
