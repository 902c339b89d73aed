//! Authoritative board and castle storage.
//!
//! Nothing here checks legality; callers validate before mutating.

use forest_siege_core::{BoardView, CastleSnapshot, CellCoord, Side, Unit, UnitId, UnitKind};

/// Dense row-major grid holding at most one unit per cell.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    columns: u32,
    rows: u32,
    cells: Vec<Option<Unit>>,
    next_unit_id: UnitId,
}

impl Board {
    /// Creates an empty board with a reset identifier counter.
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
            next_unit_id: UnitId::new(0),
        }
    }

    pub(crate) fn view(&self) -> BoardView<'_> {
        BoardView::new(&self.cells, self.columns, self.rows)
    }

    pub(crate) const fn rows(&self) -> u32 {
        self.rows
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    pub(crate) fn unit_at(&self, cell: CellCoord) -> Option<&Unit> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Spawns a full-health unit on the cell and returns its identifier.
    ///
    /// An occupied or off-board cell leaves the board untouched.
    pub(crate) fn spawn(
        &mut self,
        cell: CellCoord,
        owner: Side,
        kind: UnitKind,
    ) -> Option<UnitId> {
        let id = self.next_unit_id;
        let slot = self.slot_mut(cell)?;
        if slot.is_some() {
            return None;
        }
        *slot = Some(Unit::spawn(id, owner, kind));
        self.next_unit_id = UnitId::new(id.get().saturating_add(1));
        Some(id)
    }

    /// Moves the unit on `from` onto the empty cell `to`, preserving identity.
    pub(crate) fn relocate(&mut self, from: CellCoord, to: CellCoord) -> bool {
        if self.unit_at(to).is_some() || !self.contains(to) {
            return false;
        }
        let Some(unit) = self.remove(from) else {
            return false;
        };
        if let Some(slot) = self.slot_mut(to) {
            *slot = Some(unit);
        }
        true
    }

    /// Subtracts damage from the unit on the cell and returns its remaining health.
    pub(crate) fn damage(&mut self, cell: CellCoord, amount: u32) -> Option<u32> {
        self.slot_mut(cell)?
            .as_mut()
            .map(|unit| unit.apply_damage(amount))
    }

    pub(crate) fn remove(&mut self, cell: CellCoord) -> Option<Unit> {
        self.slot_mut(cell)?.take()
    }

    pub(crate) fn cells(&self) -> &[Option<Unit>] {
        &self.cells
    }

    fn slot_mut(&mut self, cell: CellCoord) -> Option<&mut Option<Unit>> {
        let index = self.index(cell)?;
        self.cells.get_mut(index)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Off-board structure guarding one side; health stays within `0..=max_health`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Castle {
    health: u32,
    max_health: u32,
}

impl Castle {
    pub(crate) const fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }

    pub(crate) const fn health(&self) -> u32 {
        self.health
    }

    /// Subtracts damage, flooring at zero, and returns the remaining health.
    pub(crate) fn damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    #[cfg(any(test, feature = "scenario_scaffolding"))]
    pub(crate) fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    pub(crate) const fn is_fallen(&self) -> bool {
        self.health == 0
    }

    pub(crate) const fn snapshot(&self) -> CastleSnapshot {
        CastleSnapshot {
            health: self.health,
            max_health: self.max_health,
        }
    }
}
