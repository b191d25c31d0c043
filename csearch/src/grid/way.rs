use crate::dims::Pos;

/// Compass direction of a cell's wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Way {
    North,
    South,
    West,
    East,
}

impl Way {
    /// Fixed order used by every adjacency query, so results are deterministic.
    pub const fn in_order() -> [Way; 4] {
        [Way::North, Way::South, Way::West, Way::East]
    }

    pub fn reverse(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Direction leading from `from` to `to`, if the cells are adjacent.
    pub fn between(from: Pos, to: Pos) -> Option<Way> {
        let Pos(fr, fc) = from;
        let Pos(tr, tc) = to;

        if fc == tc {
            if tr + 1 == fr {
                return Some(Way::North);
            } else if fr + 1 == tr {
                return Some(Way::South);
            }
        } else if fr == tr {
            if tc + 1 == fc {
                return Some(Way::West);
            } else if fc + 1 == tc {
                return Some(Way::East);
            }
        }

        None
    }
}
