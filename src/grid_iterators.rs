use std::fmt;

use crate::coordinates::Coordinate;
use crate::grid_dimensions::GridDimensions;

/// Visits every coordinate of a hyper-rectangle exactly once, in linear index order.
#[derive(Clone)]
pub struct CoordinateIter {
    dimensions: GridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CoordinateIter {
    pub fn new(dimensions: &GridDimensions) -> CoordinateIter {
        CoordinateIter {
            dimensions: dimensions.clone(),
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for CoordinateIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CoordinateIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CoordinateIter {} // default impl using size_hint()
impl Iterator for CoordinateIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.index_to_coordinate(self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// One 2D slice of a grid: the higher axis components held fixed, and the coordinates of the
/// slice laid out as rows of increasing axis 1, each row of increasing axis 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    pub fixed: Coordinate,
    pub rows: Vec<Vec<Coordinate>>,
}

/// Slices a grid into its 2D planes, walking the fixed higher axes with axis 2 varying fastest.
///
/// A 2D grid is a single plane with nothing fixed. A 1D grid is a single plane of one row.
#[derive(Clone, Debug)]
pub struct PlaneIter {
    planar_axes: usize,
    row_length: usize,
    rows_count: usize,
    fixed_axes: CoordinateIter,
}

impl PlaneIter {
    pub fn new(dimensions: &GridDimensions) -> PlaneIter {
        let shape = dimensions.shape();
        PlaneIter {
            planar_axes: shape.len().min(2),
            row_length: shape[0],
            rows_count: shape.get(1).cloned().unwrap_or(1),
            fixed_axes: CoordinateIter::new(&dimensions.trailing_axes(2)),
        }
    }

    fn plane_coordinate(&self, x: usize, y: usize, fixed: &Coordinate) -> Coordinate {
        [x, y][..self.planar_axes]
            .iter()
            .chain(fixed.iter())
            .cloned()
            .collect()
    }
}

impl ExactSizeIterator for PlaneIter {}
impl Iterator for PlaneIter {
    type Item = Plane;

    fn next(&mut self) -> Option<Self::Item> {
        self.fixed_axes.next().map(|fixed| {
            let rows = (0..self.rows_count)
                .map(|y| (0..self.row_length).map(|x| self.plane_coordinate(x, y, &fixed)).collect())
                .collect();
            Plane { fixed: fixed, rows: rows }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fixed_axes.size_hint()
    }
}
