#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Forest Siege engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports the committed change as [`Event`]
//! values. A command the world refuses is answered with a [`Rejection`] and
//! leaves the match untouched. Systems read immutable snapshots and respond
//! exclusively with new command batches.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod board;
mod config;
mod units;

pub use board::{BoardView, CastleSnapshot, MatchSnapshot, Mode, PerSide};
pub use config::{
    ConfigError, MatchConfig, BOARD_COLUMNS, BOARD_ROWS, CASTLE_MAX_HEALTH, ELIXIR_CAP,
    FIREBALL_CHARGES, FIREBALL_DAMAGE, MAX_BOARD_CELLS, STARTING_ELIXIR,
};
pub use units::{Unit, UnitKind, UnitStats, UnitTemplate, UnknownUnitKind, UNIT_TEMPLATES};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Forest Siege.";

/// One of the two competing players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Side whose castle sits below the last row of the board.
    Blue,
    /// Side whose castle sits above row zero of the board.
    Red,
}

impl Side {
    /// Both sides in turn order of a default match.
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];

    /// Returns the competing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Blue => Self::Red,
            Self::Red => Self::Blue,
        }
    }

    /// Row adjacent to this side's castle, where the side summons units.
    ///
    /// Blue guards the last row of a board with `rows` rows and Red guards
    /// row zero.
    #[must_use]
    pub const fn home_row(self, rows: u32) -> u32 {
        match self {
            Self::Blue => rows.saturating_sub(1),
            Self::Red => 0,
        }
    }

    /// Human readable label of the side.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Red => "Red",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a side.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown side `{0}`, expected `blue` or `red`")]
pub struct UnknownSide(pub String);

impl FromStr for Side {
    type Err = UnknownSide;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Self::Blue),
            "red" => Ok(Self::Red),
            _ => Err(UnknownSide(value.to_owned())),
        }
    }
}

/// Unique identifier assigned to a unit when it is summoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the cell displaced by the provided signed offsets.
    ///
    /// Yields `None` when either axis would leave the non-negative range;
    /// the upper bound is checked by the board that owns the cell.
    #[must_use]
    pub fn offset(self, column_delta: i32, row_delta: i32) -> Option<Self> {
        let column = self.column.checked_add_signed(column_delta)?;
        let row = self.row.checked_add_signed(row_delta)?;
        Some(Self::new(column, row))
    }

    /// Number of king steps separating two cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column
            .abs_diff(other.column)
            .max(self.row.abs_diff(other.row))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Target of a special attack: any board cell or either castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeTarget {
    /// Strike the unit standing on the cell, if any.
    Cell(CellCoord),
    /// Strike the castle owned by the side.
    Castle(Side),
}

/// Commands that express all permissible match mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Discards the current match and starts a fresh one from the configuration.
    NewMatch,
    /// Selects the friendly unit on the cell, or clears the selection otherwise.
    SelectUnit {
        /// Cell the player clicked.
        cell: CellCoord,
    },
    /// Moves the selected unit onto an empty destination or attacks its occupant.
    MoveOrAttack {
        /// Cell drawn from the cached legal destination set.
        destination: CellCoord,
    },
    /// Strikes a castle with the selected unit.
    AttackCastle {
        /// Side owning the targeted castle.
        castle: Side,
    },
    /// Enters summon mode for the kind, or leaves it when already pending.
    ToggleSummon {
        /// Kind of unit the player intends to summon.
        kind: UnitKind,
    },
    /// Summons a unit of the pending kind onto the acting side's home row.
    Summon {
        /// Kind of unit to summon; must match the pending summon mode.
        kind: UnitKind,
        /// Empty cell on the acting side's home row.
        cell: CellCoord,
    },
    /// Enters special-attack mode, or leaves it when already pending.
    ToggleSpecialAttack,
    /// Launches the special attack at the provided target.
    CastSpecialAttack {
        /// Cell or castle receiving the fixed damage.
        target: StrikeTarget,
    },
    /// Returns to idle, dropping any selection or pending mode.
    CancelMode,
}

/// Events reported by the world after committing a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Announces that a new match began.
    MatchStarted {
        /// Side taking the first turn.
        first: Side,
    },
    /// Announces that the input mode changed.
    ModeChanged {
        /// Mode that became active.
        mode: Mode,
    },
    /// Confirms that a friendly unit was selected.
    UnitSelected {
        /// Identifier of the selected unit.
        unit: UnitId,
        /// Cell the unit occupies.
        origin: CellCoord,
        /// Legal destinations cached for the selection, in ascending order.
        destinations: Vec<CellCoord>,
    },
    /// Confirms that the previous selection was dropped.
    SelectionCleared,
    /// Confirms that a unit relocated between two cells.
    UnitMoved {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Cell the unit occupied before moving.
        from: CellCoord,
        /// Cell the unit occupies after moving.
        to: CellCoord,
    },
    /// Confirms that a unit attacked an adjacent or reachable enemy.
    UnitAttacked {
        /// Identifier of the attacking unit.
        attacker: UnitId,
        /// Identifier of the defending unit.
        defender: UnitId,
        /// Cell the defender occupied when struck.
        cell: CellCoord,
    },
    /// Reports damage dealt to a unit.
    UnitDamaged {
        /// Identifier of the damaged unit.
        unit: UnitId,
        /// Cell the unit occupies.
        cell: CellCoord,
        /// Damage subtracted from the unit's health.
        damage: u32,
        /// Health left after the damage, floored at zero.
        remaining: u32,
    },
    /// Reports that a unit dropped to zero health and left the board.
    UnitDefeated {
        /// Identifier of the defeated unit.
        unit: UnitId,
        /// Cell vacated by the unit.
        cell: CellCoord,
    },
    /// Confirms that a unit was summoned onto the board.
    UnitSummoned {
        /// Identifier assigned to the new unit.
        unit: UnitId,
        /// Kind of the new unit.
        kind: UnitKind,
        /// Side owning the new unit.
        owner: Side,
        /// Cell the unit occupies.
        cell: CellCoord,
    },
    /// Reports elixir deducted from a side's pool.
    ElixirSpent {
        /// Side that paid.
        side: Side,
        /// Elixir deducted.
        amount: u32,
        /// Elixir left in the pool.
        remaining: u32,
    },
    /// Confirms that a special attack was launched.
    FireballCast {
        /// Side that cast the attack.
        side: Side,
        /// Cell or castle struck.
        target: StrikeTarget,
        /// Charges the side has left.
        charges_remaining: u32,
    },
    /// Reports damage dealt to a castle.
    CastleDamaged {
        /// Side owning the castle.
        side: Side,
        /// Damage subtracted from the castle's health.
        damage: u32,
        /// Health left after the damage, floored at zero.
        remaining: u32,
    },
    /// Announces that the turn passed to a new side.
    TurnPassed {
        /// Side now acting.
        side: Side,
        /// Elixir held by the acting side after the turn bonus.
        elixir: u32,
    },
    /// Announces that a castle fell and the match ended.
    MatchWon {
        /// Side whose opponent's castle fell.
        winner: Side,
    },
}

/// Reasons the world may refuse a command.
///
/// A refused command never mutates the match and never emits events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum Rejection {
    /// A winner exists; only a new match is accepted.
    #[error("the match is over")]
    MatchOver,
    /// The command does not apply to the active input mode.
    #[error("the command is not available in the current mode")]
    InvalidMode,
    /// The referenced cell lies outside the board.
    #[error("the cell lies outside the board")]
    OutOfBounds,
    /// The destination is not part of the cached legal set.
    #[error("the selected unit cannot reach that cell")]
    IllegalDestination,
    /// Summons must land on the acting side's home row.
    #[error("units can only be summoned onto the home row")]
    NotHomeRow,
    /// The target cell already holds a unit.
    #[error("the cell is already occupied")]
    CellOccupied,
    /// The acting side cannot pay for the summon.
    #[error("summoning requires {required} elixir but only {available} is available")]
    InsufficientElixir {
        /// Elixir cost of the template.
        required: u32,
        /// Elixir held by the acting side.
        available: u32,
    },
    /// The acting side spent all special-attack charges.
    #[error("no special-attack charges remain")]
    NoChargesRemaining,
    /// A unit cannot assault its own side's castle.
    #[error("units cannot attack their own castle")]
    OwnCastle,
    /// The selected unit is not on the row adjacent to the castle.
    #[error("the castle is out of reach")]
    CastleOutOfReach,
    /// The summoned kind differs from the pending summon mode.
    #[error("the summon does not match the pending unit kind")]
    SummonKindMismatch,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Command, Rejection, Side, StrikeTarget, UnitKind};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn opponent_is_an_involution() {
        for side in Side::ALL {
            assert_ne!(side.opponent(), side);
            assert_eq!(side.opponent().opponent(), side);
        }
    }

    #[test]
    fn home_rows_sit_at_opposite_edges() {
        assert_eq!(Side::Blue.home_row(7), 6);
        assert_eq!(Side::Red.home_row(7), 0);
        assert_eq!(Side::Blue.home_row(0), 0);
    }

    #[test]
    fn sides_parse_case_insensitively() {
        assert_eq!(" RED ".parse::<Side>(), Ok(Side::Red));
        assert_eq!("blue".parse::<Side>(), Ok(Side::Blue));
        assert!("green".parse::<Side>().is_err());
    }

    #[test]
    fn offset_refuses_negative_coordinates() {
        let corner = CellCoord::new(0, 3);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, -1), Some(CellCoord::new(1, 2)));
    }

    #[test]
    fn chebyshev_distance_counts_diagonals_once() {
        let origin = CellCoord::new(1, 1);
        assert_eq!(origin.chebyshev_distance(CellCoord::new(4, 3)), 3);
        assert_eq!(origin.chebyshev_distance(CellCoord::new(2, 2)), 1);
        assert_eq!(origin.chebyshev_distance(origin), 0);
    }

    #[test]
    fn rejection_reports_elixir_shortfall() {
        let rejection = Rejection::InsufficientElixir {
            required: 5,
            available: 2,
        };
        assert_eq!(
            rejection.to_string(),
            "summoning requires 5 elixir but only 2 is available"
        );
    }

    #[test]
    fn commands_round_trip_through_bincode() {
        assert_round_trip(&Command::Summon {
            kind: UnitKind::SkyValkyrie,
            cell: CellCoord::new(3, 6),
        });
        assert_round_trip(&Command::CastSpecialAttack {
            target: StrikeTarget::Castle(Side::Red),
        });
    }

    #[test]
    fn rejection_round_trips_through_bincode() {
        assert_round_trip(&Rejection::InsufficientElixir {
            required: 4,
            available: 1,
        });
    }
}
