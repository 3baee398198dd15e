use ndarray::Array2;

/// Single coordinate axis, also used for the side length of the square board.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Shape of a square grid with side `size`.
pub const fn square(size: Coord) -> [usize; 2] {
    [size as usize, size as usize]
}

pub const fn area(size: Coord) -> CellCount {
    let side = size as CellCount;
    side.saturating_mul(side)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, _) = self.dim();
        NeighborIter::new(center, Coord::try_from(rows).unwrap_or(Coord::MAX))
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays inside a `size`×`size` board.
fn apply_delta(coords: Coord2, delta: (i8, i8), size: Coord) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(delta.0)?;
    if next_x >= size {
        return None;
    }

    let next_y = coords.1.checked_add_signed(delta.1)?;
    if next_y >= size {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the Moore neighborhood of a cell, clipped at the board edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.size) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), 3).collect();

        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn edge_and_center_are_clipped_to_board() {
        assert_eq!(NeighborIter::new((1, 0), 3).count(), 5);
        assert_eq!(NeighborIter::new((1, 1), 3).count(), 8);
        assert_eq!(NeighborIter::new((2, 2), 3).count(), 3);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), 1).count(), 0);
    }

    #[test]
    fn max_coordinate_does_not_wrap() {
        let neighbors: Vec<_> = NeighborIter::new((Coord::MAX - 1, 0), Coord::MAX).collect();

        assert!(neighbors.iter().all(|&(x, _)| x < Coord::MAX));
        assert_eq!(neighbors.len(), 3);
    }
}
