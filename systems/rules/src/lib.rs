#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement and attack legality for Forest Siege units.
//!
//! A unit walks outward along each of the eight king directions, up to its
//! move range. Empty cells are destinations and the walk continues past them.
//! The first occupied cell stops the walk; it is itself a destination only
//! when the unit may strike its occupant. The single combined set therefore
//! serves both moving and attacking, and the caller tells them apart by the
//! occupancy of the chosen cell.

use std::collections::BTreeSet;

use forest_siege_core::{BoardView, CellCoord, Rejection, Side, Unit};

/// Column and row deltas of the eight compass and diagonal directions.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Computes the legal destinations of the unit standing on `origin`.
///
/// An empty origin yields an empty set.
#[must_use]
pub fn legal_destinations(board: BoardView<'_>, origin: CellCoord) -> BTreeSet<CellCoord> {
    board
        .unit_at(origin)
        .map(|unit| destinations_for(board, origin, unit))
        .unwrap_or_default()
}

/// Computes the legal destinations of `unit` as if it stood on `origin`.
#[must_use]
pub fn destinations_for(
    board: BoardView<'_>,
    origin: CellCoord,
    unit: &Unit,
) -> BTreeSet<CellCoord> {
    let mut destinations = BTreeSet::new();
    let range = i32::try_from(unit.stats.move_range).unwrap_or(i32::MAX);

    for (column_step, row_step) in DIRECTIONS {
        for distance in 1..=range {
            let Some(cell) = origin.offset(column_step * distance, row_step * distance) else {
                break;
            };
            if !board.contains(cell) {
                break;
            }

            match board.unit_at(cell) {
                None => {
                    let _ = destinations.insert(cell);
                }
                Some(occupant) => {
                    if can_strike(unit, occupant) {
                        let _ = destinations.insert(cell);
                    }
                    break;
                }
            }
        }
    }

    destinations
}

/// Reports whether `attacker` may damage `defender` in melee.
///
/// Castle-only units never strike units, allies are never targets, and
/// ground units cannot reach flyers. Flyers can strike anything.
#[must_use]
pub fn can_strike(attacker: &Unit, defender: &Unit) -> bool {
    attacker.owner != defender.owner
        && !attacker.stats.castle_only
        && (attacker.stats.airborne || !defender.stats.airborne)
}

/// Checks whether `attacker`, standing on `origin`, may assault `castle`.
///
/// Castles sit off the board next to their owner's home row, so only a
/// hostile unit on that row can reach one.
pub fn castle_assault(
    rows: u32,
    origin: CellCoord,
    attacker: &Unit,
    castle: Side,
) -> Result<(), Rejection> {
    if attacker.owner == castle {
        return Err(Rejection::OwnCastle);
    }
    if origin.row() != castle.home_row(rows) {
        return Err(Rejection::CastleOutOfReach);
    }
    Ok(())
}
