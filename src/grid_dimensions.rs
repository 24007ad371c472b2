use error_chain::bail;
use smallvec::SmallVec;

use crate::coordinates::{ComponentsSmallVec, Coordinate};
use crate::errors::*;
use crate::units::{EdgesCount, NodesCount};

/// The extent of a hyper-rectangular grid along each of its axes.
///
/// Cells are numbered linearly with axis 0 varying fastest, so `[x, y, z]` has index
/// `x + y * shape[0] + z * shape[0] * shape[1]`.
#[derive(Hash, Eq, PartialEq, Debug, Clone)]
pub struct GridDimensions {
    shape: ComponentsSmallVec,
    strides: ComponentsSmallVec,
    size: usize,
}

impl GridDimensions {
    pub fn new(shape: &[usize]) -> Result<GridDimensions> {
        if shape.is_empty() {
            bail!(ErrorKind::InvalidParameter("shape", String::from("at least one axis is required")));
        }
        if let Some(axis) = shape.iter().position(|&extent| extent == 0) {
            bail!(ErrorKind::InvalidParameter("shape",
                                              format!("axis {} has zero extent, extents must be positive", axis)));
        }

        let mut strides = SmallVec::with_capacity(shape.len());
        let mut size: usize = 1;
        for &extent in shape {
            strides.push(size);
            size = size.checked_mul(extent)
                .ok_or_else(|| ErrorKind::InvalidParameter("shape", String::from("cell count overflows usize")))?;
        }

        Ok(GridDimensions {
            shape: shape.iter().cloned().collect(),
            strides: strides,
            size: size,
        })
    }

    /// A shape with no axes at all, holding the single empty coordinate.
    /// Only used for walking the (possibly absent) higher axes of a planar slicing.
    pub(crate) fn point() -> GridDimensions {
        GridDimensions {
            shape: SmallVec::new(),
            strides: SmallVec::new(),
            size: 1,
        }
    }

    /// Dimensions of the axes from `first_axis` onwards, or a `point` when there are none.
    pub(crate) fn trailing_axes(&self, first_axis: usize) -> GridDimensions {
        if first_axis >= self.shape.len() {
            GridDimensions::point()
        } else {
            let shape = &self.shape[first_axis..];
            let mut strides = SmallVec::with_capacity(shape.len());
            let mut size = 1;
            for &extent in shape {
                strides.push(size);
                size *= extent;
            }
            GridDimensions {
                shape: shape.iter().cloned().collect(),
                strides: strides,
                size: size,
            }
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn dimensionality(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.size)
    }

    /// Number of adjacent cell pairs: each axis contributes `extent - 1` pairs per line of cells.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let edges = self.shape
            .iter()
            .map(|&extent| (extent - 1) * (self.size / extent))
            .sum();
        (self.size(), EdgesCount(edges))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: &[usize]) -> bool {
        coord.len() == self.shape.len() &&
        coord.iter().zip(self.shape.iter()).all(|(&component, &extent)| component < extent)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    pub fn coordinate_to_index(&self, coord: &[usize]) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.iter().zip(self.strides.iter()).map(|(&component, &stride)| component * stride).sum())
        } else {
            None
        }
    }

    /// Panics if the index is not in the range 0..size.
    pub fn index_to_coordinate(&self, index: usize) -> Coordinate {
        assert!(index < self.size, "index {} out of range for {} cells", index, self.size);
        self.shape
            .iter()
            .zip(self.strides.iter())
            .map(|(&extent, &stride)| (index / stride) % extent)
            .collect()
    }

    #[inline]
    pub fn is_boundary_component(&self, axis: usize, component: usize) -> bool {
        component == 0 || component == self.shape[axis] - 1
    }

    /// How many of the coordinate's components lie on the first or last slice of their axis.
    pub fn boundary_axes_count(&self, coord: &[usize]) -> usize {
        coord.iter()
            .enumerate()
            .filter(|&(axis, &component)| self.is_boundary_component(axis, component))
            .count()
    }
}
