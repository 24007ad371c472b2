//! **hypermaze** generates random perfect and braid mazes over N dimensional grids.
//!
//! Cells with all coordinate components odd start as ways (rooms), everything else as walls. The
//! generator opens boundary exits, joins every room with a randomised spanning tree of passages and
//! optionally breaks extra walls to add loops.

pub mod cells;
pub mod coordinates;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod matrix;
pub mod parameters;
pub mod regions;
pub mod units;
mod utils;
