//! Match configuration and its defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Side;

/// Default number of board columns.
pub const BOARD_COLUMNS: u32 = 7;
/// Default number of board rows.
pub const BOARD_ROWS: u32 = 7;
/// Largest board a configuration may describe, in cells.
pub const MAX_BOARD_CELLS: u64 = 4096;
/// Default castle health at the start of a match.
pub const CASTLE_MAX_HEALTH: u32 = 5000;
/// Default damage dealt by the special attack.
pub const FIREBALL_DAMAGE: u32 = 70;
/// Default special-attack charges granted to each side.
pub const FIREBALL_CHARGES: u32 = 5;
/// Default upper bound of an elixir pool.
pub const ELIXIR_CAP: u32 = 10;
/// Default elixir held by each side when the match starts.
pub const STARTING_ELIXIR: u32 = 5;

/// Tunable parameters of a match.
///
/// Every field is optional when deserialising; missing fields take the
/// defaults above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Castle health at the start of a match.
    pub castle_max_health: u32,
    /// Damage dealt by each special attack.
    pub fireball_damage: u32,
    /// Special-attack charges granted to each side.
    pub fireball_charges: u32,
    /// Upper bound of each elixir pool.
    pub elixir_cap: u32,
    /// Elixir held by each side when the match starts.
    pub starting_elixir: u32,
    /// Side taking the first turn.
    pub first_side: Side,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            columns: BOARD_COLUMNS,
            rows: BOARD_ROWS,
            castle_max_health: CASTLE_MAX_HEALTH,
            fireball_damage: FIREBALL_DAMAGE,
            fireball_charges: FIREBALL_CHARGES,
            elixir_cap: ELIXIR_CAP,
            starting_elixir: STARTING_ELIXIR,
            first_side: Side::Blue,
        }
    }
}

impl MatchConfig {
    /// Checks that the configuration describes a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.rows < 2 {
            return Err(ConfigError::TooFewRows { rows: self.rows });
        }
        let cells = u64::from(self.columns) * u64::from(self.rows);
        if cells > MAX_BOARD_CELLS {
            return Err(ConfigError::BoardTooLarge { cells });
        }
        if self.castle_max_health == 0 {
            return Err(ConfigError::CastleWithoutHealth);
        }
        if self.starting_elixir > self.elixir_cap {
            return Err(ConfigError::StartingElixirAboveCap {
                starting: self.starting_elixir,
                cap: self.elixir_cap,
            });
        }
        Ok(())
    }
}

/// Reasons a [`MatchConfig`] may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The board must have at least one column.
    #[error("the board needs at least one column")]
    NoColumns,
    /// Each side needs its own home row.
    #[error("the board needs at least two rows, got {rows}")]
    TooFewRows {
        /// Configured row count.
        rows: u32,
    },
    /// The board would hold more than [`MAX_BOARD_CELLS`] cells.
    #[error("the board holds {cells} cells, more than the limit of {MAX_BOARD_CELLS}")]
    BoardTooLarge {
        /// Configured column count times row count.
        cells: u64,
    },
    /// Castles must start with positive health.
    #[error("castles must start with positive health")]
    CastleWithoutHealth,
    /// The starting pool would exceed its own cap.
    #[error("starting elixir {starting} exceeds the cap of {cap}")]
    StartingElixirAboveCap {
        /// Configured starting elixir.
        starting: u32,
        /// Configured elixir cap.
        cap: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(MatchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn single_row_boards_are_refused() {
        let config = MatchConfig {
            rows: 1,
            ..MatchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooFewRows { rows: 1 }));
    }

    #[test]
    fn oversized_boards_are_refused() {
        let config = MatchConfig {
            columns: u32::MAX,
            rows: u32::MAX,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooLarge {
                cells: u64::from(u32::MAX) * u64::from(u32::MAX)
            })
        );

        let largest = MatchConfig {
            columns: 64,
            rows: 64,
            ..MatchConfig::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }

    #[test]
    fn starting_elixir_cannot_exceed_cap() {
        let config = MatchConfig {
            starting_elixir: 11,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartingElixirAboveCap {
                starting: 11,
                cap: 10
            })
        );
    }
}
