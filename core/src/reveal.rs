use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

/// Reveals the region opened by a click on `start` and returns it in discovery order.
///
/// A zero cell expands depth-first through its Moore neighborhood: zero neighbors keep expanding, numbered neighbors
/// are revealed but end the expansion. A numbered start reveals only itself. Mines are never part of the region, and
/// flagged cells act as barriers, so a mine or flagged start yields an empty region.
///
/// Every cell of the region appears exactly once.
pub fn flood_reveal(start: Coord2, board: &Board, store: &mut VisibilityMap) -> Result<Vec<Coord2>> {
    let start = board.validate_coords(start)?;
    if store.size() != board.size() {
        return Err(GameError::OutOfBoundsAction);
    }

    if board[start].is_mine() || store.at(start) == Visibility::Flagged {
        log::trace!("Nothing to flood from {:?}", start);
        return Ok(Vec::new());
    }

    let mut region = Vec::new();
    let mut visited: HashSet<Coord2> = HashSet::from([start]);
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        store.reveal_unchecked(coords);
        region.push(coords);

        // numbered cells are the border of the region
        if !board[coords].is_zero() {
            continue;
        }

        for neighbor in board.iter_neighbors(coords) {
            if board[neighbor].is_mine() || store.at(neighbor) == Visibility::Flagged {
                continue;
            }
            if visited.insert(neighbor) {
                log::trace!("Flood reaches {:?} from {:?}", neighbor, coords);
                to_visit.push(neighbor);
            }
        }
    }

    log::debug!("Revealed {} cells from {:?}", region.len(), start);
    Ok(region)
}
