// The `error_chain!` macro creates the Error, ErrorKind, ResultExt, and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`.
// Other modules `use crate::errors::*;` to get access to everything it creates.
#![allow(deprecated)]

use error_chain::error_chain;

use crate::coordinates::Coordinate;

error_chain! {
    errors {
        NotAdjacent(way: Coordinate, wall: Coordinate) {
            description("wall is not a neighbour of the way breaking it")
            display("wall {} is not a neighbour of way {}", wall, way)
        }

        WrongVariant(coord: Coordinate, expected: &'static str) {
            description("cell is not of the expected variant")
            display("cell {} is not a {}", coord, expected)
        }

        OutOfRange(coord: Coordinate) {
            description("coordinate is outside the grid shape")
            display("coordinate {} is outside the grid shape", coord)
        }

        SelfLink(coord: Coordinate) {
            description("a cell cannot be linked to itself")
            display("cell {} cannot be linked to itself", coord)
        }

        InvalidParameter(name: &'static str, reason: String) {
            description("invalid maze parameter")
            display("invalid `{}`: {}", name, reason)
        }

        GridTooLarge(cells: usize, max: usize) {
            description("grid has more cells than the index type can address")
            display("grid of {} cells exceeds the index type limit of {}", cells, max)
        }

        Unspannable(regions: usize) {
            description("ran out of internal walls before the maze was connected")
            display("no internal walls left to break with {} regions still apart", regions)
        }
    }
}
