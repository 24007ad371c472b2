use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

/// Inline storage for the components of a coordinate, heap allocating beyond 4 dimensions.
pub type ComponentsSmallVec = SmallVec<[usize; 4]>;

/// Up to 2 neighbours per axis inline, enough for 4 dimensions.
pub type CoordinateSmallVec = SmallVec<[Coordinate; 8]>;

/// Position of a cell within an N dimensional hyper-rectangle.
#[derive(Hash, Eq, PartialEq, Clone, Debug, Ord, PartialOrd, Default)]
pub struct Coordinate(ComponentsSmallVec);

impl Coordinate {
    pub fn new(components: &[usize]) -> Coordinate {
        Coordinate(components.iter().cloned().collect())
    }

    #[inline]
    pub fn dimensionality(&self) -> usize {
        self.0.len()
    }

    /// Coordinates one step away along each axis, in axis order with the decrement first.
    ///
    /// Bounds against a grid shape are left to the caller. A decrement below zero has no
    /// representation and is skipped, so a coordinate yields between N and 2N candidates.
    pub fn neighbour_coordinates(&self) -> CoordinateSmallVec {
        let mut neighbours = CoordinateSmallVec::new();
        for axis in 0..self.0.len() {
            if let Some(lower) = self.0[axis].checked_sub(1) {
                neighbours.push(self.with_component(axis, lower));
            }
            neighbours.push(self.with_component(axis, self.0[axis] + 1));
        }
        neighbours
    }

    /// Rooms of the maze lattice sit where every component is odd; everything else starts as wall.
    #[inline]
    pub fn is_all_odd(&self) -> bool {
        self.0.iter().all(|&component| component % 2 == 1)
    }

    fn with_component(&self, axis: usize, value: usize) -> Coordinate {
        let mut components = self.0.clone();
        components[axis] = value;
        Coordinate(components)
    }
}

impl Deref for Coordinate {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl<'a> From<&'a [usize]> for Coordinate {
    fn from(components: &'a [usize]) -> Coordinate {
        Coordinate::new(components)
    }
}

impl From<Vec<usize>> for Coordinate {
    fn from(components: Vec<usize>) -> Coordinate {
        Coordinate(ComponentsSmallVec::from_vec(components))
    }
}

impl FromIterator<usize> for Coordinate {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Coordinate {
        Coordinate(iter.into_iter().collect())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", component)?;
        }
        write!(f, ")")
    }
}
