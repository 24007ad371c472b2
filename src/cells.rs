use crate::units::RegionId;

/// A single block of the maze lattice.
///
/// Walls block movement. Ways are open and carry the id of the connected region they belong to;
/// two ways share an id exactly when a path of ways joins them.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Cell {
    Wall,
    Way(RegionId),
}

impl Cell {
    #[inline]
    pub fn is_wall(&self) -> bool {
        match *self {
            Cell::Wall => true,
            Cell::Way(_) => false,
        }
    }

    #[inline]
    pub fn is_way(&self) -> bool {
        !self.is_wall()
    }

    #[inline]
    pub fn region(&self) -> Option<RegionId> {
        match *self {
            Cell::Wall => None,
            Cell::Way(region) => Some(region),
        }
    }

    /// Single character text rendering of the cell.
    #[inline]
    pub fn glyph(&self) -> char {
        match *self {
            Cell::Wall => '0',
            Cell::Way(_) => ' ',
        }
    }
}
