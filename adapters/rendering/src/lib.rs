#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Forest Siege adapters.

use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use forest_siege_core::{CellCoord, MatchSnapshot, Mode, PerSide, Side, UnitKind};
use forest_siege_system_input::Affordances;

/// Health expressed in basis points of the maximum.
pub const FULL_HEALTH_BASIS_POINTS: u32 = 10_000;

/// Emphasis drawn on a board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Plain cell.
    #[default]
    None,
    /// Cell of the selected unit.
    Selected,
    /// Empty cell the selected unit can move to.
    Destination,
    /// Occupied cell the selected unit can strike.
    Target,
}

/// Unit drawn on a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitPresentation {
    /// Kind of the unit.
    pub kind: UnitKind,
    /// Side owning the unit.
    pub owner: Side,
    /// Remaining health in basis points of the unit's maximum.
    pub health_basis_points: u32,
    /// Catalog glyph.
    pub glyph: &'static str,
}

/// Single board cell of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPresentation {
    /// Location of the cell.
    pub cell: CellCoord,
    /// Occupant, if any.
    pub unit: Option<UnitPresentation>,
    /// Emphasis to draw.
    pub highlight: Highlight,
}

/// Castle panel drawn beside the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlePresentation {
    /// Current health.
    pub health: u32,
    /// Starting health.
    pub max_health: u32,
    /// Whether the selected unit or an armed fireball can strike it.
    pub targetable: bool,
}

/// Summon button of the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummonButton {
    /// Kind offered.
    pub kind: UnitKind,
    /// Elixir cost.
    pub cost: u32,
    /// Whether the button may be pressed.
    pub enabled: bool,
    /// Whether this kind's summon is pending.
    pub active: bool,
}

/// Status panel of the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Side whose turn it is.
    pub current: Side,
    /// Elixir held by each side.
    pub elixir: PerSide<u32>,
    /// Upper bound of each pool.
    pub elixir_cap: u32,
    /// Fireball charges held by each side.
    pub charges: PerSide<u32>,
    /// Active mode.
    pub mode: Mode,
    /// Winner, once the match ended.
    pub winner: Option<Side>,
    /// Summon buttons in catalog order.
    pub summons: Vec<SummonButton>,
    /// Whether the fireball button may be pressed.
    pub fireball_enabled: bool,
}

/// Complete description of a frame, derived from a match snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Number of board columns.
    pub columns: u32,
    /// Number of board rows.
    pub rows: u32,
    /// Row-major board cells.
    pub cells: Vec<CellPresentation>,
    /// Castle panels.
    pub castles: PerSide<CastlePresentation>,
    /// Status panel.
    pub hud: Hud,
}

impl Scene {
    /// Builds the scene for a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Self {
        let affordances = Affordances::from_snapshot(snapshot);
        let board = snapshot.board();
        let selected = snapshot.selected().map(|(cell, _)| cell);

        let mut cells = Vec::with_capacity(snapshot.cells.len());
        for row in 0..snapshot.rows {
            for column in 0..snapshot.columns {
                let cell = CellCoord::new(column, row);
                let unit = board.unit_at(cell);
                let highlight = if selected == Some(cell) {
                    Highlight::Selected
                } else if snapshot.is_destination(cell) {
                    if unit.is_some() {
                        Highlight::Target
                    } else {
                        Highlight::Destination
                    }
                } else {
                    Highlight::None
                };
                cells.push(CellPresentation {
                    cell,
                    unit: unit.map(|unit| UnitPresentation {
                        kind: unit.kind,
                        owner: unit.owner,
                        health_basis_points: basis_points(unit.health, unit.stats.max_health),
                        glyph: unit.glyph(),
                    }),
                    highlight,
                });
            }
        }

        let armed = snapshot.mode == Mode::SpecialAttackPending;
        let castle = |side: Side| {
            let castle = snapshot.castles[side];
            CastlePresentation {
                health: castle.health,
                max_health: castle.max_health,
                targetable: armed || affordances.assailable_castle == Some(side),
            }
        };

        Self {
            columns: snapshot.columns,
            rows: snapshot.rows,
            cells,
            castles: PerSide::new(castle(Side::Blue), castle(Side::Red)),
            hud: Hud {
                current: snapshot.current,
                elixir: snapshot.elixir,
                elixir_cap: snapshot.elixir_cap,
                charges: snapshot.charges,
                mode: snapshot.mode,
                winner: snapshot.winner,
                summons: affordances
                    .summons
                    .iter()
                    .map(|entry| SummonButton {
                        kind: entry.kind,
                        cost: entry.cost,
                        enabled: entry.affordable,
                        active: entry.active,
                    })
                    .collect(),
                fireball_enabled: affordances.fireball_enabled,
            },
        }
    }

    /// Cells of one board row, left to right.
    pub fn row(&self, row: u32) -> impl Iterator<Item = &CellPresentation> {
        self.cells.iter().filter(move |cell| cell.cell.row() == row)
    }
}

fn basis_points(value: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let scaled = u64::from(value.min(max)) * u64::from(FULL_HEALTH_BASIS_POINTS) / u64::from(max);
    u32::try_from(scaled).unwrap_or(FULL_HEALTH_BASIS_POINTS)
}

/// Output surface able to show scenes.
pub trait Presenter {
    /// Shows the scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Presenter writing scenes as plain text.
///
/// Blue units print in upper case and Red units in lower case. Selection is
/// bracketed, reachable cells show `*`, and strikeable units are wrapped in
/// `<` `>`.
#[derive(Debug)]
pub struct TextPresenter<W> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    /// Wraps an output stream.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Releases the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn castle_line(&mut self, scene: &Scene, side: Side) -> AnyResult<()> {
        let castle = scene.castles[side];
        let marker = if castle.targetable { " <target>" } else { "" };
        writeln!(
            self.out,
            "{side} castle {health}/{max}{marker}",
            health = castle.health,
            max = castle.max_health
        )?;
        Ok(())
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        self.castle_line(scene, Side::Red)?;

        write!(self.out, "   ")?;
        for column in 0..scene.columns {
            write!(self.out, "{column:^3}")?;
        }
        writeln!(self.out)?;
        for row in 0..scene.rows {
            write!(self.out, "{row:>2} ")?;
            for cell in scene.row(row) {
                write!(self.out, "{}", cell_token(cell))?;
            }
            writeln!(self.out)?;
        }

        self.castle_line(scene, Side::Blue)?;

        let hud = &scene.hud;
        for side in Side::ALL {
            let turn = if hud.current == side { "> " } else { "  " };
            writeln!(
                self.out,
                "{turn}{side}: elixir {elixir}/{cap}, fireballs {charges}",
                elixir = hud.elixir[side],
                cap = hud.elixir_cap,
                charges = hud.charges[side]
            )?;
        }

        let summons: Vec<String> = hud
            .summons
            .iter()
            .map(|button| {
                let state = match (button.active, button.enabled) {
                    (true, _) => "*",
                    (false, true) => "+",
                    (false, false) => "-",
                };
                format!("{}{}({})", state, button.kind, button.cost)
            })
            .collect();
        writeln!(self.out, "summon: {}", summons.join(" "))?;
        let fireball = if hud.fireball_enabled { "ready" } else { "spent" };
        writeln!(self.out, "fireball: {fireball}; mode: {}", hud.mode)?;
        if let Some(winner) = hud.winner {
            writeln!(self.out, "{winner} wins!")?;
        }

        self.out.flush().context("failed to flush scene output")
    }
}

fn unit_letter(kind: UnitKind) -> char {
    match kind {
        UnitKind::Paladin => 'P',
        UnitKind::SkyValkyrie => 'V',
        UnitKind::Rogue => 'R',
        UnitKind::Berserker => 'B',
        UnitKind::Witch => 'W',
    }
}

fn cell_token(cell: &CellPresentation) -> String {
    let letter = cell.unit.map(|unit| {
        let letter = unit_letter(unit.kind);
        match unit.owner {
            Side::Blue => letter,
            Side::Red => letter.to_ascii_lowercase(),
        }
    });
    match (cell.highlight, letter) {
        (Highlight::Selected, Some(letter)) => format!("[{letter}]"),
        (Highlight::Target, Some(letter)) => format!("<{letter}>"),
        (Highlight::Destination, None) => " * ".to_owned(),
        (_, Some(letter)) => format!(" {letter} "),
        (_, None) => " . ".to_owned(),
    }
}
