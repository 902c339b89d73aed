//! Immutable unit catalog and the unit records spawned from it.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Side, UnitId};

/// Kinds of units that can be summoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    /// Siege knight that only ever damages castles.
    Paladin,
    /// Flying unit that ground units cannot strike.
    SkyValkyrie,
    /// Fast, cheap scout.
    Rogue,
    /// Heavy-hitting ground warrior.
    Berserker,
    /// Durable spell caster.
    Witch,
}

impl UnitKind {
    /// Every kind in catalog order.
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Paladin,
        UnitKind::SkyValkyrie,
        UnitKind::Rogue,
        UnitKind::Berserker,
        UnitKind::Witch,
    ];

    /// Catalog entry describing the kind.
    #[must_use]
    pub const fn template(self) -> &'static UnitTemplate {
        match self {
            Self::Paladin => &PALADIN,
            Self::SkyValkyrie => &SKY_VALKYRIE,
            Self::Rogue => &ROGUE,
            Self::Berserker => &BERSERKER,
            Self::Witch => &WITCH,
        }
    }

    /// Display name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.template().name
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown unit kind `{0}`")]
pub struct UnknownUnitKind(pub String);

impl FromStr for UnitKind {
    type Err = UnknownUnitKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(value);
        Self::ALL
            .into_iter()
            .find(|kind| normalize(kind.name()) == wanted)
            .ok_or_else(|| UnknownUnitKind(value.to_owned()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Combat and movement attributes shared by a template and its spawned units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitStats {
    /// Health of a freshly summoned unit.
    pub max_health: u32,
    /// Damage dealt per strike.
    pub attack: u32,
    /// Maximum number of steps along any of the eight directions.
    pub move_range: u32,
    /// Whether the unit flies; ground units cannot strike flyers.
    pub airborne: bool,
    /// Whether the unit may only damage castles.
    pub castle_only: bool,
}

/// Immutable catalog entry; the only source of truth for summon stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitTemplate {
    /// Kind described by the entry.
    pub kind: UnitKind,
    /// Display name.
    pub name: &'static str,
    /// Attributes copied onto every spawned unit.
    pub stats: UnitStats,
    /// Elixir spent to summon the unit.
    pub cost: u32,
    /// Glyph drawn on the board.
    pub glyph: &'static str,
    /// One-line flavour text.
    pub description: &'static str,
}

/// The five summonable templates.
pub const UNIT_TEMPLATES: [UnitTemplate; 5] = [PALADIN, SKY_VALKYRIE, ROGUE, BERSERKER, WITCH];

const PALADIN: UnitTemplate = UnitTemplate {
    kind: UnitKind::Paladin,
    name: "Paladin",
    stats: UnitStats {
        max_health: 900,
        attack: 400,
        move_range: 1,
        airborne: false,
        castle_only: true,
    },
    cost: 5,
    glyph: "🛡️",
    description: "Siege Knight. Attacks ONLY castles.",
};

const SKY_VALKYRIE: UnitTemplate = UnitTemplate {
    kind: UnitKind::SkyValkyrie,
    name: "Sky Valkyrie",
    stats: UnitStats {
        max_health: 200,
        attack: 100,
        move_range: 2,
        airborne: true,
        castle_only: false,
    },
    cost: 2,
    glyph: "🦅",
    description: "Air unit. Can attack anyone, but ground units cannot hit it.",
};

const ROGUE: UnitTemplate = UnitTemplate {
    kind: UnitKind::Rogue,
    name: "Rogue",
    stats: UnitStats {
        max_health: 150,
        attack: 150,
        move_range: 4,
        airborne: false,
        castle_only: false,
    },
    cost: 1,
    glyph: "🗡️",
    description: "Fast scout and assassin.",
};

const BERSERKER: UnitTemplate = UnitTemplate {
    kind: UnitKind::Berserker,
    name: "Berserker",
    stats: UnitStats {
        max_health: 500,
        attack: 200,
        move_range: 2,
        airborne: false,
        castle_only: false,
    },
    cost: 3,
    glyph: "🪓",
    description: "High damage warrior.",
};

const WITCH: UnitTemplate = UnitTemplate {
    kind: UnitKind::Witch,
    name: "Witch",
    stats: UnitStats {
        max_health: 300,
        attack: 110,
        move_range: 1,
        airborne: false,
        castle_only: false,
    },
    cost: 4,
    glyph: "🧙",
    description: "Elite spell caster.",
};

/// A unit standing on the board.
///
/// Identity and owner never change after spawning; only health is mutated
/// by combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    /// Identifier assigned by the world at summon time.
    pub id: UnitId,
    /// Catalog kind the unit was spawned from.
    pub kind: UnitKind,
    /// Side controlling the unit.
    pub owner: Side,
    /// Current health, never above `stats.max_health`.
    pub health: u32,
    /// Snapshot of the template attributes.
    pub stats: UnitStats,
}

impl Unit {
    /// Spawns a full-health unit from the kind's template.
    #[must_use]
    pub fn spawn(id: UnitId, owner: Side, kind: UnitKind) -> Self {
        let stats = kind.template().stats;
        Self {
            id,
            kind,
            owner,
            health: stats.max_health,
            stats,
        }
    }

    /// Subtracts damage from the unit's health, flooring at zero.
    ///
    /// Returns the remaining health.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Reports whether the unit has no health left.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Glyph drawn for the unit.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        self.kind.template().glyph
    }
}
