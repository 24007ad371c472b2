use error_chain::bail;
use petgraph::graph::NodeIndex;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;
use std::fmt;

use crate::cells::Cell;
use crate::coordinates::{Coordinate, CoordinateSmallVec};
use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::grid_iterators::{CoordinateIter, PlaneIter};
use crate::grid_traits::GridView;
use crate::units::{EdgesCount, NodesCount, RegionId};

/// Linear indices of the cells adjacent to one cell, 2 per axis inline for up to 4 dimensions.
pub type NeighbourIndices = SmallVec<[usize; 8]>;

/// An N dimensional grid of wall and way cells.
///
/// Each cell is a node of an undirected graph whose edges join cells one step apart along a
/// single axis. Nodes are indexed by the linear index of their coordinate (axis 0 varying fastest),
/// so the adjacency never changes once built; breaking a wall swaps the node's `Cell` in place
/// and the new way keeps every neighbour the wall had.
pub struct Grid<GridIndexType: IndexType = u32> {
    graph: Graph<Cell, (), Undirected, GridIndexType>,
    dimensions: GridDimensions,
}

pub type SmallGrid = Grid<u8>;
pub type MediumGrid = Grid<u16>;
pub type LargeGrid = Grid<u32>;

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, shape: {:?}", self.graph, self.shape())
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    /// Builds every cell in one pass over the linear indices.
    ///
    /// A coordinate starts as a way iff all its components are odd, each way in a region of its own
    /// numbered from 1 in visiting order. Every cell is linked to the in-bounds neighbours that were
    /// created before it, so each adjacent pair is linked exactly once.
    pub fn new(dimensions: GridDimensions) -> Result<Grid<GridIndexType>> {
        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();
        let max = <GridIndexType as IndexType>::max().index();
        if nodes > max || edges > max {
            bail!(ErrorKind::GridTooLarge(nodes, max));
        }

        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges),
            dimensions: dimensions,
        };

        let mut next_region = 1;
        for index in 0..nodes {
            let coord = grid.dimensions.index_to_coordinate(index);
            let cell = if coord.is_all_odd() {
                next_region += 1;
                Cell::Way(RegionId(next_region - 1))
            } else {
                Cell::Wall
            };
            let _ = grid.graph.add_node(cell);

            for neighbour in coord.neighbour_coordinates().iter() {
                if let Some(neighbour_index) = grid.dimensions.coordinate_to_index(neighbour) {
                    if neighbour_index < index {
                        grid.link_indices(index, neighbour_index);
                    }
                }
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.dimensions.shape()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    /// Number of adjacent cell pairs.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Is the grid coordinate valid for this grid - within the grid's shape
    #[inline]
    pub fn is_valid_coordinate(&self, coord: &[usize]) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: &[usize]) -> Option<usize> {
        self.dimensions.coordinate_to_index(coord)
    }

    pub fn cell(&self, coord: &[usize]) -> Result<Cell> {
        let index = self.checked_index(coord)?;
        Ok(self.cell_at(index))
    }

    /// Cells one step away along a single axis, whether wall or way.
    pub fn neighbours(&self, coord: &[usize]) -> Result<CoordinateSmallVec> {
        let index = self.checked_index(coord)?;
        Ok(self.neighbour_indices(index)
            .into_iter()
            .map(|neighbour_index| self.coordinate_of(neighbour_index))
            .collect())
    }

    /// Are two cells registered as neighbours of one another?
    pub fn is_neighbour(&self, a: &[usize], b: &[usize]) -> bool {
        match (self.grid_coordinate_to_index(a), self.grid_coordinate_to_index(b)) {
            (Some(a_index), Some(b_index)) => self.is_neighbour_index(a_index, b_index),
            _ => false,
        }
    }

    /// Register two cells as neighbours of each other. Linking an already linked pair is a no-op.
    pub fn link(&mut self, a: &[usize], b: &[usize]) -> Result<()> {
        let a_index = self.checked_index(a)?;
        let b_index = self.checked_index(b)?;
        if a_index == b_index {
            bail!(ErrorKind::SelfLink(Coordinate::new(a)));
        }
        self.link_indices(a_index, b_index);
        Ok(())
    }

    /// Replace the wall at `coord` with a way in `region`, keeping all the wall's neighbours.
    ///
    /// Regions are not merged, see `regions::break_wall` for that.
    pub fn convert_to_way(&mut self, coord: &[usize], region: RegionId) -> Result<Cell> {
        let index = self.checked_index(coord)?;
        self.convert_index_to_way(index, region)
    }

    #[inline]
    pub fn iter(&self) -> CoordinateIter {
        CoordinateIter::new(&self.dimensions)
    }

    #[inline]
    pub fn iter_planes(&self) -> PlaneIter {
        PlaneIter::new(&self.dimensions)
    }

    pub fn ways_count(&self) -> usize {
        self.graph.raw_nodes().iter().filter(|node| node.weight.is_way()).count()
    }

    pub(crate) fn checked_index(&self, coord: &[usize]) -> Result<usize> {
        self.grid_coordinate_to_index(coord)
            .ok_or_else(|| ErrorKind::OutOfRange(Coordinate::new(coord)).into())
    }

    #[inline]
    pub(crate) fn coordinate_of(&self, index: usize) -> Coordinate {
        self.dimensions.index_to_coordinate(index)
    }

    #[inline]
    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        self.graph[NodeIndex::new(index)]
    }

    /// Overwrite the region of a way. Walls are left untouched.
    pub(crate) fn set_region_at(&mut self, index: usize, region: RegionId) {
        let cell = &mut self.graph[NodeIndex::new(index)];
        if let Cell::Way(ref mut current) = *cell {
            *current = region;
        }
    }

    pub(crate) fn neighbour_indices(&self, index: usize) -> NeighbourIndices {
        self.graph
            .neighbors(NodeIndex::new(index))
            .map(|node| node.index())
            .collect()
    }

    #[inline]
    pub(crate) fn is_neighbour_index(&self, a: usize, b: usize) -> bool {
        self.graph.find_edge(NodeIndex::new(a), NodeIndex::new(b)).is_some()
    }

    pub(crate) fn convert_index_to_way(&mut self, index: usize, region: RegionId) -> Result<Cell> {
        let node = NodeIndex::new(index);
        if self.graph[node].is_way() {
            bail!(ErrorKind::WrongVariant(self.coordinate_of(index), "wall"));
        }
        self.graph[node] = Cell::Way(region);
        Ok(self.graph[node])
    }

    fn link_indices(&mut self, a: usize, b: usize) {
        let _ = self.graph.update_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
}

impl<GridIndexType: IndexType> GridView for Grid<GridIndexType> {
    fn shape(&self) -> &[usize] {
        Grid::shape(self)
    }

    fn contains(&self, coord: &[usize]) -> bool {
        self.is_valid_coordinate(coord)
    }

    fn cell(&self, coord: &[usize]) -> Result<Cell> {
        Grid::cell(self, coord)
    }

    fn coordinates(&self) -> CoordinateIter {
        self.iter()
    }
}
