use crate::cells::Cell;
use crate::errors::*;
use crate::grid_iterators::CoordinateIter;

/// Read only access to a finished grid, enough for exporting it in other forms.
pub trait GridView {
    fn shape(&self) -> &[usize];

    /// Is the coordinate inside the grid's shape?
    fn contains(&self, coord: &[usize]) -> bool;

    /// Fails with `OutOfRange` for coordinates outside the grid's shape.
    fn cell(&self, coord: &[usize]) -> Result<Cell>;

    /// Every coordinate of the grid, each exactly once.
    fn coordinates(&self) -> CoordinateIter;
}
