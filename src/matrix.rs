use ndarray::{ArrayD, IxDyn};
use num::traits::{One, Zero};

use crate::cells::Cell;
use crate::errors::*;
use crate::grid_traits::GridView;

/// Dense N dimensional array of the grid with the same shape, `one` for a wall and `zero` for a way.
pub fn to_array<T, V>(view: &V) -> Result<ArrayD<T>>
    where T: Zero + One + Clone,
          V: GridView + ?Sized
{
    let mut array = ArrayD::from_elem(IxDyn(view.shape()), T::zero());
    for coord in view.coordinates() {
        if let Cell::Wall = view.cell(&coord)? {
            array[IxDyn(&coord)] = T::one();
        }
    }
    Ok(array)
}
