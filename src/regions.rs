//! Merging of passable regions as walls are broken.
//!
//! Every way carries the id of its connected region. Breaking a wall turns it into a way in the
//! region of the way it was broken from, then floods that id across everything the new opening
//! connects, so region ids always describe connectivity exactly.

use error_chain::bail;
use tracing::trace;

use crate::cells::Cell;
use crate::errors::*;
use crate::grid::{Grid, IndexType};
use crate::units::RegionId;
use crate::utils::{self, FnvHashSet};

/// Outcome of breaking one wall.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Merge {
    /// The way that replaced the wall.
    pub way: Cell,
    /// Region now shared by everything connected to the opening.
    pub region: RegionId,
    /// How many other regions were joined into `region`.
    pub absorbed_regions: usize,
}

/// Break `wall` on behalf of the neighbouring `way`, merging every region the opening connects.
///
/// Fails with `NotAdjacent` if `wall` is not a neighbour of `way` and with `WrongVariant` if
/// `way` is not a way or `wall` is not a wall. Nothing is modified on failure.
pub fn break_wall<GridIndexType>(grid: &mut Grid<GridIndexType>,
                                 way: &[usize],
                                 wall: &[usize])
                                 -> Result<Merge>
    where GridIndexType: IndexType
{
    let way_index = grid.checked_index(way)?;
    let wall_index = grid.checked_index(wall)?;
    break_wall_at(grid, way_index, wall_index)
}

pub(crate) fn break_wall_at<GridIndexType>(grid: &mut Grid<GridIndexType>,
                                           way_index: usize,
                                           wall_index: usize)
                                           -> Result<Merge>
    where GridIndexType: IndexType
{
    let region = match grid.cell_at(way_index) {
        Cell::Way(region) => region,
        Cell::Wall => bail!(ErrorKind::WrongVariant(grid.coordinate_of(way_index), "way")),
    };
    if !grid.is_neighbour_index(way_index, wall_index) {
        bail!(ErrorKind::NotAdjacent(grid.coordinate_of(way_index), grid.coordinate_of(wall_index)));
    }

    let way = grid.convert_index_to_way(wall_index, region)?;
    let absorbed_regions = propagate_region(grid, wall_index, region);
    trace!(wall = %grid.coordinate_of(wall_index), %region, absorbed_regions, "broke wall");

    Ok(Merge {
        way: way,
        region: region,
        absorbed_regions: absorbed_regions,
    })
}

/// Spread `region` from `start` to every way reachable through ways that disagrees with it.
/// Returns the number of distinct regions overwritten.
///
/// Only ways not yet holding `region` are visited, so the cost is the size of the absorbed regions.
fn propagate_region<GridIndexType>(grid: &mut Grid<GridIndexType>,
                                   start: usize,
                                   region: RegionId)
                                   -> usize
    where GridIndexType: IndexType
{
    let mut absorbed: FnvHashSet<RegionId> = utils::fnv_hashset(4);
    let mut frontier = vec![start];

    while let Some(index) = frontier.pop() {
        for neighbour in grid.neighbour_indices(index) {
            if let Cell::Way(current) = grid.cell_at(neighbour) {
                if current != region {
                    let _ = absorbed.insert(current);
                    grid.set_region_at(neighbour, region);
                    frontier.push(neighbour);
                }
            }
        }
    }

    absorbed.len()
}

/// Number of distinct region ids among all the ways of the grid.
pub fn regions_count<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> usize {
    let mut regions: FnvHashSet<RegionId> = utils::fnv_hashset(grid.size() / 2);
    for index in 0..grid.size() {
        if let Some(region) = grid.cell_at(index).region() {
            let _ = regions.insert(region);
        }
    }
    regions.len()
}

#[cfg(test)]
pub(crate) mod tests {

    use std::collections::HashMap;

    use super::*;
    use crate::grid::LargeGrid;
    use crate::grid_dimensions::GridDimensions;

    fn grid(shape: &[usize]) -> LargeGrid {
        LargeGrid::new(GridDimensions::new(shape).expect("valid shape")).expect("grid fits index type")
    }

    fn region_at(g: &LargeGrid, coord: &[usize]) -> RegionId {
        g.cell(coord).unwrap().region().expect("cell is a way")
    }

    /// Panics unless two ways share a region id exactly when a path of ways joins them.
    pub(crate) fn assert_region_consistency<GridIndexType: IndexType>(g: &Grid<GridIndexType>) {
        let mut component_of: HashMap<usize, usize> = HashMap::new();
        let mut component_regions: Vec<RegionId> = Vec::new();

        for start in 0..g.size() {
            let start_region = match g.cell_at(start) {
                Cell::Way(region) => region,
                Cell::Wall => continue,
            };
            if component_of.contains_key(&start) {
                continue;
            }

            let component = component_regions.len();
            component_regions.push(start_region);
            let _ = component_of.insert(start, component);
            let mut frontier = vec![start];
            while let Some(index) = frontier.pop() {
                for neighbour in g.neighbour_indices(index) {
                    if let Cell::Way(region) = g.cell_at(neighbour) {
                        assert_eq!(region, start_region,
                                   "connected ways {} and {} disagree on region",
                                   g.coordinate_of(start), g.coordinate_of(neighbour));
                        if !component_of.contains_key(&neighbour) {
                            let _ = component_of.insert(neighbour, component);
                            frontier.push(neighbour);
                        }
                    }
                }
            }
        }

        let mut distinct = component_regions.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), component_regions.len(), "disconnected ways share a region id");
    }

    #[test]
    fn fresh_grid_is_consistent() {
        let g = grid(&[7, 5, 3]);
        assert_region_consistency(&g);
        assert_eq!(regions_count(&g), g.ways_count());
    }

    #[test]
    fn breaking_between_two_ways_merges_them() {
        let mut g = grid(&[5, 5]);
        let merge = break_wall(&mut g, &[1, 1], &[2, 1]).unwrap();

        assert_eq!(merge.way, Cell::Way(RegionId(1)));
        assert_eq!(merge.region, RegionId(1));
        assert_eq!(merge.absorbed_regions, 1);
        assert_eq!(region_at(&g, &[2, 1]), RegionId(1));
        assert_eq!(region_at(&g, &[3, 1]), RegionId(1));
        assert_eq!(regions_count(&g), 3);
        assert_region_consistency(&g);
    }

    #[test]
    fn breaking_takes_the_breaking_way_region() {
        let mut g = grid(&[5, 5]);
        let merge = break_wall(&mut g, &[3, 1], &[2, 1]).unwrap();
        assert_eq!(merge.region, RegionId(2));
        assert_eq!(region_at(&g, &[1, 1]), RegionId(2));
        assert_region_consistency(&g);
    }

    #[test]
    fn breaking_an_exit_absorbs_nothing() {
        let mut g = grid(&[5, 5]);
        let merge = break_wall(&mut g, &[1, 1], &[0, 1]).unwrap();
        assert_eq!(merge.absorbed_regions, 0);
        assert_eq!(region_at(&g, &[0, 1]), RegionId(1));
        assert_eq!(regions_count(&g), 4);
        assert_region_consistency(&g);
    }

    #[test]
    fn merge_floods_through_whole_region() {
        let mut g = grid(&[9]);
        // ways at 1, 3, 5, 7 in regions 1 to 4
        assert_eq!(break_wall(&mut g, &[1], &[2]).unwrap().absorbed_regions, 1);
        assert_eq!(break_wall(&mut g, &[7], &[6]).unwrap().absorbed_regions, 1);
        assert_eq!(region_at(&g, &[5]), RegionId(4));
        assert_eq!(regions_count(&g), 2);

        let merge = break_wall(&mut g, &[3], &[4]).unwrap();
        assert_eq!(merge.absorbed_regions, 1);
        for x in 1..8 {
            assert_eq!(region_at(&g, &[x]), RegionId(1));
        }
        assert_eq!(regions_count(&g), 1);
        assert_region_consistency(&g);
    }

    #[test]
    fn breaking_a_cycle_absorbs_nothing() {
        let mut g = grid(&[5, 5]);
        let _ = break_wall(&mut g, &[1, 1], &[2, 1]).unwrap();
        let _ = break_wall(&mut g, &[3, 1], &[3, 2]).unwrap();
        let _ = break_wall(&mut g, &[3, 3], &[2, 3]).unwrap();
        assert_eq!(regions_count(&g), 1);
        let merge = break_wall(&mut g, &[1, 1], &[1, 2]).unwrap();
        assert_eq!(merge.absorbed_regions, 0);
        assert_region_consistency(&g);
    }

    #[test]
    fn wall_must_neighbour_the_way() {
        let mut g = grid(&[5, 5]);
        match *break_wall(&mut g, &[1, 1], &[2, 3]).unwrap_err().kind() {
            ErrorKind::NotAdjacent(ref way, ref wall) => {
                assert_eq!(&**way, &[1, 1]);
                assert_eq!(&**wall, &[2, 3]);
            }
            ref other => panic!("unexpected error {:?}", other),
        }
        assert!(g.cell(&[2, 3]).unwrap().is_wall());
    }

    #[test]
    fn target_must_be_a_wall() {
        let mut g = grid(&[5, 5]);
        let _ = break_wall(&mut g, &[1, 1], &[2, 1]).unwrap();
        match *break_wall(&mut g, &[1, 1], &[2, 1]).unwrap_err().kind() {
            ErrorKind::WrongVariant(ref coord, expected) => {
                assert_eq!(&**coord, &[2, 1]);
                assert_eq!(expected, "wall");
            }
            ref other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn breaker_must_be_a_way() {
        let mut g = grid(&[5, 5]);
        match *break_wall(&mut g, &[2, 2], &[2, 1]).unwrap_err().kind() {
            ErrorKind::WrongVariant(ref coord, expected) => {
                assert_eq!(&**coord, &[2, 2]);
                assert_eq!(expected, "way");
            }
            ref other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn breaking_outside_the_grid_is_out_of_range() {
        let mut g = grid(&[5, 5]);
        match *break_wall(&mut g, &[1, 1], &[1, 7]).unwrap_err().kind() {
            ErrorKind::OutOfRange(_) => {}
            ref other => panic!("unexpected error {:?}", other),
        }
    }
}
