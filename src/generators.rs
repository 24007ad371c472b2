//! Randomised carving of a perfect (or braided) maze into an N dimensional grid.
//!
//! Generation runs through ordered phases:
//! 1. Build the grid, every way a region of its own.
//! 2. Exits: break up to `exits` randomly chosen boundary walls facing a way.
//! 3. Spanning: draw internal walls at random, breaking those that join two different regions and
//!    setting aside those that would close a loop, until one region remains. This is Kruskal's
//!    algorithm over the graph of ways, so the passages form a spanning tree.
//! 4. Braiding: break up to `internal_breaks` of the walls left over, each adding a loop.

use error_chain::bail;
use rand::Rng;
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, trace};

use crate::cells::Cell;
use crate::coordinates::Coordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_iterators::CoordinateIter;
use crate::grid_traits::GridView;
use crate::parameters::MazeParameters;
use crate::regions;
use crate::units::RegionId;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Phase {
    Exits,
    Spanning,
    Braiding,
    Finished,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarveKind {
    Exit,
    Passage,
    Braid,
}

/// The result of one generator step.
#[derive(Eq, PartialEq, Clone, Debug)]
pub enum Carving {
    Broken {
        kind: CarveKind,
        wall: Coordinate,
        region: RegionId,
    },
    /// An internal wall between two ways already in the same region, kept back for braiding.
    Deferred(Coordinate),
}

/// How many walls each phase broke.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CarveCounts {
    pub exits: usize,
    pub passages: usize,
    pub braids: usize,
}

/// Carves a maze one wall at a time.
///
/// `new` builds the grid; each `step` then draws one candidate wall from the current phase's pool.
/// The region ids of the grid describe its connectivity exactly between any two steps.
pub struct MazeGenerator<R: Rng> {
    grid: Grid,
    rng: R,
    phase: Phase,
    exits_remaining: usize,
    braids_remaining: usize,
    exit_candidates: Vec<usize>,
    internal_candidates: Vec<usize>,
    deferred: Vec<usize>,
    regions: usize,
    counts: CarveCounts,
}

impl<R: Rng> fmt::Debug for MazeGenerator<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "MazeGenerator :: phase: {:?}, regions: {:?}, counts: {:?}",
               self.phase,
               self.regions,
               self.counts)
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn new(parameters: &MazeParameters, rng: R) -> Result<MazeGenerator<R>> {
        let grid = Grid::new(parameters.dimensions()?)?;

        // One scan sorts the walls into the candidate pools for every phase.
        let mut exit_candidates = vec![];
        let mut internal_candidates = vec![];
        for index in 0..grid.size() {
            if grid.cell_at(index).is_way() || way_neighbours(&grid, index).is_empty() {
                continue;
            }
            let coord = grid.coordinate_of(index);
            match grid.dimensions().boundary_axes_count(&coord) {
                0 => internal_candidates.push(index),
                1 if is_exit_candidate(&grid, &coord) => exit_candidates.push(index),
                _ => {}
            }
        }

        let regions = grid.ways_count();
        debug!(shape = ?parameters.shape,
               ways = regions,
               exit_candidates = exit_candidates.len(),
               internal_candidates = internal_candidates.len(),
               "built grid");

        Ok(MazeGenerator {
            grid: grid,
            rng: rng,
            phase: Phase::Exits,
            exits_remaining: parameters.exits,
            braids_remaining: parameters.internal_breaks,
            exit_candidates: exit_candidates,
            internal_candidates: internal_candidates,
            deferred: vec![],
            regions: regions,
            counts: CarveCounts::default(),
        })
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Distinct region ids currently among the ways.
    #[inline]
    pub fn regions_count(&self) -> usize {
        self.regions
    }

    #[inline]
    pub fn counts(&self) -> CarveCounts {
        self.counts
    }

    /// Draw and process one candidate wall, moving through the phases as each one completes.
    /// Returns None once generation has finished.
    pub fn step(&mut self) -> Result<Option<Carving>> {
        loop {
            match self.phase {
                Phase::Exits => {
                    if self.exits_remaining > 0 {
                        if let Some(wall) = take_random(&mut self.exit_candidates, &mut self.rng) {
                            self.exits_remaining -= 1;
                            return self.carve_exit(wall).map(Some);
                        }
                    }
                    self.advance(Phase::Spanning);
                }
                Phase::Spanning => {
                    if self.regions > 1 {
                        match take_random(&mut self.internal_candidates, &mut self.rng) {
                            Some(wall) => return self.carve_passage(wall).map(Some),
                            None => bail!(ErrorKind::Unspannable(self.regions)),
                        }
                    }
                    self.internal_candidates.append(&mut self.deferred);
                    self.advance(Phase::Braiding);
                }
                Phase::Braiding => {
                    if self.braids_remaining > 0 {
                        if let Some(wall) = take_random(&mut self.internal_candidates, &mut self.rng) {
                            self.braids_remaining -= 1;
                            return self.carve_braid(wall).map(Some);
                        }
                    }
                    self.advance(Phase::Finished);
                }
                Phase::Finished => return Ok(None),
            }
        }
    }

    /// Run every remaining step.
    pub fn run(mut self) -> Result<Maze> {
        while self.step()?.is_some() {}
        Ok(Maze {
            grid: self.grid,
            counts: self.counts,
        })
    }

    fn advance(&mut self, next: Phase) {
        debug!(from = ?self.phase,
               to = ?next,
               regions = self.regions,
               exits = self.counts.exits,
               passages = self.counts.passages,
               braids = self.counts.braids,
               candidates = self.internal_candidates.len(),
               "phase complete");
        self.phase = next;
    }

    fn carve_exit(&mut self, wall: usize) -> Result<Carving> {
        let way = way_neighbours(&self.grid, wall)[0];
        let merge = regions::break_wall_at(&mut self.grid, way, wall)?;
        self.regions -= merge.absorbed_regions;
        self.counts.exits += 1;
        Ok(self.broken(CarveKind::Exit, wall, merge.region))
    }

    fn carve_passage(&mut self, wall: usize) -> Result<Carving> {
        let ways = way_neighbours(&self.grid, wall);
        let first_region = self.grid.cell_at(ways[0]).region();
        let joins_regions = ways.iter().any(|&way| self.grid.cell_at(way).region() != first_region);

        if joins_regions {
            let merge = regions::break_wall_at(&mut self.grid, ways[0], wall)?;
            self.regions -= merge.absorbed_regions;
            self.counts.passages += 1;
            Ok(self.broken(CarveKind::Passage, wall, merge.region))
        } else {
            self.deferred.push(wall);
            let coord = self.grid.coordinate_of(wall);
            trace!(wall = %coord, "deferred wall");
            Ok(Carving::Deferred(coord))
        }
    }

    fn carve_braid(&mut self, wall: usize) -> Result<Carving> {
        let ways = way_neighbours(&self.grid, wall);
        let way = ways[self.rng.gen_range(0..ways.len())];
        let merge = regions::break_wall_at(&mut self.grid, way, wall)?;
        self.regions -= merge.absorbed_regions;
        self.counts.braids += 1;
        Ok(self.broken(CarveKind::Braid, wall, merge.region))
    }

    fn broken(&self, kind: CarveKind, wall: usize, region: RegionId) -> Carving {
        Carving::Broken {
            kind: kind,
            wall: self.grid.coordinate_of(wall),
            region: region,
        }
    }
}

/// A finished maze, no longer modifiable.
#[derive(Debug)]
pub struct Maze {
    grid: Grid,
    counts: CarveCounts,
}

impl Maze {
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn counts(&self) -> CarveCounts {
        self.counts
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

impl GridView for Maze {
    fn shape(&self) -> &[usize] {
        self.grid.shape()
    }

    fn contains(&self, coord: &[usize]) -> bool {
        self.grid.is_valid_coordinate(coord)
    }

    fn cell(&self, coord: &[usize]) -> Result<Cell> {
        self.grid.cell(coord)
    }

    fn coordinates(&self) -> CoordinateIter {
        self.grid.iter()
    }
}

/// Generate a maze with all phases run to completion, drawing every random choice from `rng`.
pub fn generate<R: Rng>(parameters: &MazeParameters, rng: R) -> Result<Maze> {
    MazeGenerator::new(parameters, rng)?.run()
}

/// An exit sits on exactly one boundary, every other component odd so it faces a way across it.
fn is_exit_candidate(grid: &Grid, coord: &[usize]) -> bool {
    coord.iter()
        .enumerate()
        .filter(|&(axis, &component)| !grid.dimensions().is_boundary_component(axis, component))
        .all(|(_, &component)| component % 2 == 1)
}

fn way_neighbours(grid: &Grid, index: usize) -> SmallVec<[usize; 8]> {
    grid.neighbour_indices(index)
        .into_iter()
        .filter(|&neighbour| grid.cell_at(neighbour).is_way())
        .collect()
}

/// Remove a uniformly chosen element. The order of the remaining elements is not preserved.
fn take_random<T, R: Rng>(pool: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if pool.is_empty() {
        None
    } else {
        let index = rng.gen_range(0..pool.len());
        Some(pool.swap_remove(index))
    }
}
