use itertools::Itertools;
use std::fmt;

use crate::generators::Maze;
use crate::grid::{Grid, IndexType};
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{Plane, PlaneIter};
use crate::grid_traits::GridView;

/// Text rendering of a grid as a series of 2D planes.
///
/// Each plane starts with a label line naming its fixed higher axis components, e.g. `(., ., 3)`,
/// followed by one line per axis 1 value with the cell glyphs along axis 0 separated by a space.
/// A wall is `0`, a way is a space. Planes are separated by an empty line.
pub struct PlanarText<'a, V: GridView + ?Sized + 'a>(pub &'a V);

impl<'a, V: GridView + ?Sized> PlanarText<'a, V> {
    fn write_plane(&self, f: &mut fmt::Formatter, plane: &Plane) -> fmt::Result {
        writeln!(f, "{}", plane_label(self.0.shape().len(), plane))?;
        for row in &plane.rows {
            let glyphs = row.iter()
                .map(|coord| self.0.cell(coord).map(|cell| cell.glyph()).map_err(|_| fmt::Error))
                .collect::<Result<Vec<char>, fmt::Error>>()?;
            writeln!(f, "{}", glyphs.iter().join(" "))?;
        }
        Ok(())
    }
}

impl<'a, V: GridView + ?Sized> fmt::Display for PlanarText<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dimensions = GridDimensions::new(self.0.shape()).map_err(|_| fmt::Error)?;
        for (index, plane) in PlaneIter::new(&dimensions).enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            self.write_plane(f, &plane)?;
        }
        Ok(())
    }
}

fn plane_label(dimensionality: usize, plane: &Plane) -> String {
    let planar = std::iter::repeat(String::from(".")).take(dimensionality.min(2));
    let fixed = plane.fixed.iter().map(|component| component.to_string());
    format!("({})", planar.chain(fixed).join(", "))
}

impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", PlanarText(self))
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", PlanarText(self))
    }
}
