//! Read-only views over the match state shared with systems and adapters.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use serde::{Deserialize, Serialize};

use crate::{CellCoord, Side, Unit, UnitKind};

/// Active input mode of the match.
///
/// `UnitSelected`, `SummonPending` and `SpecialAttackPending` are mutually
/// exclusive; `MatchOver` is terminal until a new match starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Nothing is selected or pending.
    #[default]
    Idle,
    /// A friendly unit is selected and its destinations are cached.
    UnitSelected {
        /// Cell occupied by the selected unit.
        origin: CellCoord,
    },
    /// The acting side chose a unit kind and awaits a home-row cell.
    SummonPending {
        /// Kind that will be summoned.
        kind: UnitKind,
    },
    /// The acting side armed the special attack and awaits a target.
    SpecialAttackPending,
    /// A castle fell; only a new match is accepted.
    MatchOver {
        /// Side that won the match.
        winner: Side,
    },
}

impl Mode {
    /// Reports whether the match has ended.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::MatchOver { .. })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::UnitSelected { origin } => write!(f, "unit selected at {origin}"),
            Self::SummonPending { kind } => write!(f, "summoning {kind}"),
            Self::SpecialAttackPending => f.write_str("fireball armed"),
            Self::MatchOver { winner } => write!(f, "{winner} wins"),
        }
    }
}

/// Pair of values indexed by [`Side`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PerSide<T> {
    blue: T,
    red: T,
}

impl<T> PerSide<T> {
    /// Creates a pair from explicit per-side values.
    #[must_use]
    pub const fn new(blue: T, red: T) -> Self {
        Self { blue, red }
    }
}

impl<T: Clone> PerSide<T> {
    /// Creates a pair holding the same value for both sides.
    #[must_use]
    pub fn uniform(value: T) -> Self {
        Self {
            blue: value.clone(),
            red: value,
        }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
        }
    }
}

/// Read-only view into the dense board grid.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    cells: &'a [Option<Unit>],
    columns: u32,
    rows: u32,
}

impl<'a> BoardView<'a> {
    /// Captures a new board view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [Option<Unit>], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Returns the unit occupying the provided cell, if any.
    #[must_use]
    pub fn unit_at(&self, cell: CellCoord) -> Option<&'a Unit> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell lies on the board and holds no unit.
    #[must_use]
    pub fn is_vacant(&self, cell: CellCoord) -> bool {
        self.contains(cell) && self.unit_at(cell).is_none()
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Iterator over occupied cells in row-major order.
    pub fn units(&self) -> impl Iterator<Item = (CellCoord, &'a Unit)> + 'a {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| {
                let unit = slot.as_ref()?;
                let index = u32::try_from(index).ok()?;
                Some((CellCoord::new(index % columns, index / columns), unit))
            })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Health of a single castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastleSnapshot {
    /// Current health, within `0..=max_health`.
    pub health: u32,
    /// Health the castle started the match with.
    pub max_health: u32,
}

/// Immutable copy of the full match state, taken after each accepted command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Row-major board contents.
    pub cells: Vec<Option<Unit>>,
    /// Health of both castles.
    pub castles: PerSide<CastleSnapshot>,
    /// Side whose turn it is.
    pub current: Side,
    /// Active input mode.
    pub mode: Mode,
    /// Cached legal destinations of the selected unit, in ascending order.
    pub destinations: Vec<CellCoord>,
    /// Elixir held by each side.
    pub elixir: PerSide<u32>,
    /// Upper bound of each elixir pool.
    pub elixir_cap: u32,
    /// Special-attack charges held by each side.
    pub charges: PerSide<u32>,
    /// Winner of the match, once a castle falls.
    pub winner: Option<Side>,
}

impl MatchSnapshot {
    /// Read-only view over the captured board.
    #[must_use]
    pub fn board(&self) -> BoardView<'_> {
        BoardView::new(&self.cells, self.columns, self.rows)
    }

    /// Selected cell and unit, when a unit is selected.
    #[must_use]
    pub fn selected(&self) -> Option<(CellCoord, &Unit)> {
        match self.mode {
            Mode::UnitSelected { origin } => {
                self.board().unit_at(origin).map(|unit| (origin, unit))
            }
            _ => None,
        }
    }

    /// Reports whether the cell belongs to the cached destination set.
    #[must_use]
    pub fn is_destination(&self, cell: CellCoord) -> bool {
        self.destinations.binary_search(&cell).is_ok()
    }
}
