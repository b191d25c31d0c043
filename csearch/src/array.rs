use std::ops;

use crate::dims::Pos;

/// Dense row-major buffer addressed by [`Pos`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2D<T> {
    /// Returns `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Pos) -> Option<usize> {
        let Pos(row, col) = pos;
        if row >= self.rows || col >= self.cols {
            return None;
        }

        Some(row * self.cols + col)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Pos> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Pos(idx / self.cols, idx % self.cols))
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }

        Some(&self.buf[row * self.cols..(row + 1) * self.cols])
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, cols: usize) -> Self {
        Self {
            buf: vec![item; rows * cols],
            rows,
            cols,
        }
    }

    pub fn fill(&mut self, item: T) {
        self.buf.fill(item);
    }
}

impl<T> ops::Index<Pos> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {index}"))
    }
}

impl<T> ops::IndexMut<Pos> for Array2D<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {index}"))
    }
}
