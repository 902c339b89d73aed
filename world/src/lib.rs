#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative match state management for Forest Siege.
//!
//! The [`World`] is the single owner of the match. It changes only through
//! [`apply`], which either commits a command and reports [`Event`]s or
//! refuses it with a [`Rejection`] and leaves every field untouched.

use std::collections::BTreeSet;

use forest_siege_core::{
    CellCoord, Command, ConfigError, Event, MatchConfig, Mode, PerSide, Rejection, Side,
    StrikeTarget, UnitKind, WELCOME_BANNER,
};
use forest_siege_system_rules as rules;
use tracing::{debug, info};

mod board;

use board::{Board, Castle};

/// Represents the authoritative Forest Siege match state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: MatchConfig,
    board: Board,
    castles: PerSide<Castle>,
    current: Side,
    mode: Mode,
    destinations: BTreeSet<CellCoord>,
    elixir: PerSide<u32>,
    charges: PerSide<u32>,
    winner: Option<Side>,
}

impl World {
    /// Creates a new match using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_config(MatchConfig::default())
    }

    /// Creates a new match using the provided configuration.
    pub fn with_config(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: MatchConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            board: Board::new(config.columns, config.rows),
            castles: PerSide::uniform(Castle::new(config.castle_max_health)),
            current: config.first_side,
            mode: Mode::Idle,
            destinations: BTreeSet::new(),
            elixir: PerSide::uniform(config.starting_elixir),
            charges: PerSide::uniform(config.fireball_charges),
            winner: None,
        }
    }

    fn reset(&mut self) {
        *self = Self::from_valid_config(self.config);
    }

    fn set_mode(&mut self, mode: Mode, out_events: &mut Vec<Event>) {
        if self.mode == mode {
            return;
        }
        if matches!(self.mode, Mode::UnitSelected { .. }) {
            self.destinations.clear();
            out_events.push(Event::SelectionCleared);
        }
        self.mode = mode;
        out_events.push(Event::ModeChanged { mode });
    }

    fn pass_turn(&mut self, out_events: &mut Vec<Event>) {
        self.current = self.current.opponent();
        let pool = &mut self.elixir[self.current];
        *pool = pool.saturating_add(1).min(self.config.elixir_cap);
        out_events.push(Event::TurnPassed {
            side: self.current,
            elixir: *pool,
        });
    }

    fn check_win(&mut self, damaged: Side, out_events: &mut Vec<Event>) {
        if !self.castles[damaged].is_fallen() {
            return;
        }
        let winner = damaged.opponent();
        self.winner = Some(winner);
        self.set_mode(Mode::MatchOver { winner }, out_events);
        out_events.push(Event::MatchWon { winner });
        info!(winner = %winner, "castle fell, match over");
    }

    fn select(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) -> Result<(), Rejection> {
        if !self.board.contains(cell) {
            return Err(Rejection::OutOfBounds);
        }

        let friendly = self
            .board
            .unit_at(cell)
            .filter(|unit| unit.owner == self.current)
            .map(|unit| unit.id);
        let Some(unit) = friendly else {
            self.set_mode(Mode::Idle, out_events);
            return Ok(());
        };

        let destinations = rules::legal_destinations(self.board.view(), cell);
        self.set_mode(Mode::UnitSelected { origin: cell }, out_events);
        out_events.push(Event::UnitSelected {
            unit,
            origin: cell,
            destinations: destinations.iter().copied().collect(),
        });
        self.destinations = destinations;
        Ok(())
    }

    fn move_or_attack(
        &mut self,
        destination: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<(), Rejection> {
        let Mode::UnitSelected { origin } = self.mode else {
            return Err(Rejection::InvalidMode);
        };
        if !self.board.contains(destination) {
            return Err(Rejection::OutOfBounds);
        }
        if !self.destinations.contains(&destination) {
            return Err(Rejection::IllegalDestination);
        }
        let attacker = *self.board.unit_at(origin).ok_or(Rejection::InvalidMode)?;

        match self.board.unit_at(destination).copied() {
            None => {
                let _ = self.board.relocate(origin, destination);
                out_events.push(Event::UnitMoved {
                    unit: attacker.id,
                    from: origin,
                    to: destination,
                });
            }
            Some(defender) => {
                if !rules::can_strike(&attacker, &defender) {
                    return Err(Rejection::IllegalDestination);
                }
                out_events.push(Event::UnitAttacked {
                    attacker: attacker.id,
                    defender: defender.id,
                    cell: destination,
                });
                let damage = attacker.stats.attack;
                let remaining = self.board.damage(destination, damage).unwrap_or(0);
                out_events.push(Event::UnitDamaged {
                    unit: defender.id,
                    cell: destination,
                    damage,
                    remaining,
                });
                if remaining == 0 {
                    let _ = self.board.remove(destination);
                    out_events.push(Event::UnitDefeated {
                        unit: defender.id,
                        cell: destination,
                    });
                    let _ = self.board.relocate(origin, destination);
                    out_events.push(Event::UnitMoved {
                        unit: attacker.id,
                        from: origin,
                        to: destination,
                    });
                }
            }
        }

        self.set_mode(Mode::Idle, out_events);
        self.pass_turn(out_events);
        Ok(())
    }

    fn attack_castle(
        &mut self,
        castle: Side,
        out_events: &mut Vec<Event>,
    ) -> Result<(), Rejection> {
        let Mode::UnitSelected { origin } = self.mode else {
            return Err(Rejection::InvalidMode);
        };
        let attacker = *self.board.unit_at(origin).ok_or(Rejection::InvalidMode)?;
        rules::castle_assault(self.board.rows(), origin, &attacker, castle)?;

        let damage = attacker.stats.attack;
        let remaining = self.castles[castle].damage(damage);
        out_events.push(Event::CastleDamaged {
            side: castle,
            damage,
            remaining,
        });

        self.set_mode(Mode::Idle, out_events);
        self.pass_turn(out_events);
        self.check_win(castle, out_events);
        Ok(())
    }

    fn toggle_summon(&mut self, kind: UnitKind, out_events: &mut Vec<Event>) {
        let next = if self.mode == (Mode::SummonPending { kind }) {
            Mode::Idle
        } else {
            Mode::SummonPending { kind }
        };
        self.set_mode(next, out_events);
    }

    fn summon(
        &mut self,
        kind: UnitKind,
        cell: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<(), Rejection> {
        let Mode::SummonPending { kind: pending } = self.mode else {
            return Err(Rejection::InvalidMode);
        };
        if pending != kind {
            return Err(Rejection::SummonKindMismatch);
        }
        if !self.board.contains(cell) {
            return Err(Rejection::OutOfBounds);
        }
        if cell.row() != self.current.home_row(self.board.rows()) {
            return Err(Rejection::NotHomeRow);
        }
        if self.board.unit_at(cell).is_some() {
            return Err(Rejection::CellOccupied);
        }
        let cost = kind.template().cost;
        let available = self.elixir[self.current];
        if available < cost {
            return Err(Rejection::InsufficientElixir {
                required: cost,
                available,
            });
        }

        let unit = self
            .board
            .spawn(cell, self.current, kind)
            .ok_or(Rejection::CellOccupied)?;
        let remaining = available - cost;
        self.elixir[self.current] = remaining;
        out_events.push(Event::ElixirSpent {
            side: self.current,
            amount: cost,
            remaining,
        });
        out_events.push(Event::UnitSummoned {
            unit,
            kind,
            owner: self.current,
            cell,
        });

        self.set_mode(Mode::Idle, out_events);
        self.pass_turn(out_events);
        Ok(())
    }

    fn toggle_special_attack(&mut self, out_events: &mut Vec<Event>) -> Result<(), Rejection> {
        if self.mode == Mode::SpecialAttackPending {
            self.set_mode(Mode::Idle, out_events);
            return Ok(());
        }
        if self.charges[self.current] == 0 {
            return Err(Rejection::NoChargesRemaining);
        }
        self.set_mode(Mode::SpecialAttackPending, out_events);
        Ok(())
    }

    fn cast_special_attack(
        &mut self,
        target: StrikeTarget,
        out_events: &mut Vec<Event>,
    ) -> Result<(), Rejection> {
        if self.charges[self.current] == 0 {
            return Err(Rejection::NoChargesRemaining);
        }
        if self.mode != Mode::SpecialAttackPending {
            return Err(Rejection::InvalidMode);
        }
        if let StrikeTarget::Cell(cell) = target {
            if !self.board.contains(cell) {
                return Err(Rejection::OutOfBounds);
            }
        }

        let side = self.current;
        let charges_remaining = self.charges[side] - 1;
        self.charges[side] = charges_remaining;
        out_events.push(Event::FireballCast {
            side,
            target,
            charges_remaining,
        });

        let damage = self.config.fireball_damage;
        let mut damaged_castle = None;
        match target {
            StrikeTarget::Cell(cell) => {
                if let Some(unit) = self.board.unit_at(cell).map(|unit| unit.id) {
                    let remaining = self.board.damage(cell, damage).unwrap_or(0);
                    out_events.push(Event::UnitDamaged {
                        unit,
                        cell,
                        damage,
                        remaining,
                    });
                    if remaining == 0 {
                        let _ = self.board.remove(cell);
                        out_events.push(Event::UnitDefeated { unit, cell });
                    }
                }
            }
            StrikeTarget::Castle(castle) => {
                let remaining = self.castles[castle].damage(damage);
                out_events.push(Event::CastleDamaged {
                    side: castle,
                    damage,
                    remaining,
                });
                damaged_castle = Some(castle);
            }
        }

        self.set_mode(Mode::Idle, out_events);
        self.pass_turn(out_events);
        if let Some(castle) = damaged_castle {
            self.check_win(castle, out_events);
        }
        Ok(())
    }

    #[cfg(any(test, feature = "scenario_scaffolding"))]
    fn place_unit(
        &mut self,
        cell: CellCoord,
        owner: Side,
        kind: UnitKind,
    ) -> Option<forest_siege_core::UnitId> {
        self.board.spawn(cell, owner, kind)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// A refused command returns its [`Rejection`], pushes no events and leaves
/// the world exactly as it was.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), Rejection> {
    let mut generated = Vec::new();
    let result = dispatch(world, &command, &mut generated);
    match result {
        Ok(()) => {
            debug!(?command, events = generated.len(), "command applied");
            out_events.append(&mut generated);
        }
        Err(reason) => {
            debug!(?command, %reason, "command rejected");
        }
    }
    result
}

fn dispatch(
    world: &mut World,
    command: &Command,
    out_events: &mut Vec<Event>,
) -> Result<(), Rejection> {
    if world.mode.is_terminal() && *command != Command::NewMatch {
        return Err(Rejection::MatchOver);
    }

    match *command {
        Command::NewMatch => {
            world.reset();
            out_events.push(Event::MatchStarted {
                first: world.current,
            });
            info!(first = %world.current, "match started");
            Ok(())
        }
        Command::SelectUnit { cell } => world.select(cell, out_events),
        Command::MoveOrAttack { destination } => world.move_or_attack(destination, out_events),
        Command::AttackCastle { castle } => world.attack_castle(castle, out_events),
        Command::ToggleSummon { kind } => {
            world.toggle_summon(kind, out_events);
            Ok(())
        }
        Command::Summon { kind, cell } => world.summon(kind, cell, out_events),
        Command::ToggleSpecialAttack => world.toggle_special_attack(out_events),
        Command::CastSpecialAttack { target } => world.cast_special_attack(target, out_events),
        Command::CancelMode => {
            world.set_mode(Mode::Idle, out_events);
            Ok(())
        }
    }
}

/// Test scaffolding that stages positions without playing them out.
#[cfg(any(test, feature = "scenario_scaffolding"))]
pub mod scaffolding {
    use forest_siege_core::{CellCoord, Side, UnitId, UnitKind};

    use super::World;

    /// Places a full-health unit directly onto the board, bypassing summoning.
    pub fn place_unit(
        world: &mut World,
        cell: CellCoord,
        owner: Side,
        kind: UnitKind,
    ) -> Option<UnitId> {
        world.place_unit(cell, owner, kind)
    }

    /// Overwrites a side's elixir pool, clamped to the configured cap.
    pub fn set_elixir(world: &mut World, side: Side, elixir: u32) {
        world.elixir[side] = elixir.min(world.config.elixir_cap);
    }

    /// Overwrites a side's remaining special-attack charges.
    pub fn set_charges(world: &mut World, side: Side, charges: u32) {
        world.charges[side] = charges;
    }

    /// Overwrites a castle's health, clamped to its maximum.
    pub fn set_castle_health(world: &mut World, side: Side, health: u32) {
        world.castles[side].set_health(health);
    }

    /// Hands the turn to the provided side without any other effect.
    pub fn set_current_side(world: &mut World, side: Side) {
        world.current = side;
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use super::World;
    use forest_siege_core::{
        BoardView, CellCoord, MatchConfig, MatchSnapshot, Mode, PerSide, Side, Unit,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the match was started with.
    #[must_use]
    pub fn config(world: &World) -> &MatchConfig {
        &world.config
    }

    /// Exposes a read-only view of the board.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView<'_> {
        world.board.view()
    }

    /// Returns the unit standing on the cell, if any.
    #[must_use]
    pub fn unit_at(world: &World, cell: CellCoord) -> Option<&Unit> {
        world.board.unit_at(cell)
    }

    /// Side whose turn it is.
    #[must_use]
    pub fn current_side(world: &World) -> Side {
        world.current
    }

    /// Active input mode.
    #[must_use]
    pub fn mode(world: &World) -> Mode {
        world.mode
    }

    /// Legal destinations cached for the selected unit; empty without a selection.
    #[must_use]
    pub fn legal_destinations(world: &World) -> &BTreeSet<CellCoord> {
        &world.destinations
    }

    /// Current health of the side's castle.
    #[must_use]
    pub fn castle_health(world: &World, side: Side) -> u32 {
        world.castles[side].health()
    }

    /// Elixir held by the side.
    #[must_use]
    pub fn elixir(world: &World, side: Side) -> u32 {
        world.elixir[side]
    }

    /// Special-attack charges held by the side.
    #[must_use]
    pub fn charges(world: &World, side: Side) -> u32 {
        world.charges[side]
    }

    /// Winner of the match, once a castle has fallen.
    #[must_use]
    pub fn winner(world: &World) -> Option<Side> {
        world.winner
    }

    /// Captures an immutable copy of the full match state.
    #[must_use]
    pub fn snapshot(world: &World) -> MatchSnapshot {
        MatchSnapshot {
            columns: world.config.columns,
            rows: world.config.rows,
            cells: world.board.cells().to_vec(),
            castles: PerSide::new(
                world.castles[Side::Blue].snapshot(),
                world.castles[Side::Red].snapshot(),
            ),
            current: world.current,
            mode: world.mode,
            destinations: world.destinations.iter().copied().collect(),
            elixir: world.elixir,
            elixir_cap: world.config.elixir_cap,
            charges: world.charges,
            winner: world.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forest_siege_core::UnitId;

    fn apply_ok(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events).expect("command accepted");
        events
    }

    #[test]
    fn new_world_matches_default_configuration() {
        let world = World::new();

        assert_eq!(query::current_side(&world), Side::Blue);
        assert_eq!(query::mode(&world), Mode::Idle);
        for side in Side::ALL {
            assert_eq!(query::castle_health(&world, side), 5000);
            assert_eq!(query::elixir(&world, side), 5);
            assert_eq!(query::charges(&world, side), 5);
        }
        assert!(query::board_view(&world).units().next().is_none());
        assert_eq!(query::winner(&world), None);
    }

    #[test]
    fn invalid_configuration_is_refused() {
        let config = MatchConfig {
            columns: 0,
            ..MatchConfig::default()
        };
        assert_eq!(
            World::with_config(config).err(),
            Some(ConfigError::NoColumns)
        );

        let huge = MatchConfig {
            columns: 100_000,
            rows: 100_000,
            ..MatchConfig::default()
        };
        assert_eq!(
            World::with_config(huge).err(),
            Some(ConfigError::BoardTooLarge {
                cells: 10_000_000_000
            })
        );
    }

    #[test]
    fn selecting_friendly_unit_caches_destinations() {
        let mut world = World::new();
        let cell = CellCoord::new(3, 6);
        let id = world.place_unit(cell, Side::Blue, UnitKind::Witch);

        let events = apply_ok(&mut world, Command::SelectUnit { cell });

        assert_eq!(query::mode(&world), Mode::UnitSelected { origin: cell });
        let expected = vec![
            CellCoord::new(2, 5),
            CellCoord::new(2, 6),
            CellCoord::new(3, 5),
            CellCoord::new(4, 5),
            CellCoord::new(4, 6),
        ];
        let cached: Vec<_> = query::legal_destinations(&world).iter().copied().collect();
        assert_eq!(cached, expected);
        assert_eq!(
            events,
            vec![
                Event::ModeChanged {
                    mode: Mode::UnitSelected { origin: cell }
                },
                Event::UnitSelected {
                    unit: id.expect("placed"),
                    origin: cell,
                    destinations: expected,
                },
            ]
        );
    }

    #[test]
    fn clicking_enemy_or_empty_cell_deselects() {
        let mut world = World::new();
        let own = CellCoord::new(0, 6);
        let enemy = CellCoord::new(0, 0);
        let _ = world.place_unit(own, Side::Blue, UnitKind::Rogue);
        let _ = world.place_unit(enemy, Side::Red, UnitKind::Rogue);

        let _ = apply_ok(&mut world, Command::SelectUnit { cell: own });
        let events = apply_ok(&mut world, Command::SelectUnit { cell: enemy });

        assert_eq!(query::mode(&world), Mode::Idle);
        assert!(query::legal_destinations(&world).is_empty());
        assert_eq!(
            events,
            vec![
                Event::SelectionCleared,
                Event::ModeChanged { mode: Mode::Idle }
            ]
        );

        let events = apply_ok(&mut world, Command::SelectUnit { cell: CellCoord::new(3, 3) });
        assert!(events.is_empty(), "deselecting while idle is a quiet no-op");
    }

    #[test]
    fn selecting_off_board_is_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();
        assert_eq!(
            apply(
                &mut world,
                Command::SelectUnit {
                    cell: CellCoord::new(7, 0)
                },
                &mut events
            ),
            Err(Rejection::OutOfBounds)
        );
        assert!(events.is_empty());
    }

    #[test]
    fn moving_to_empty_cell_relocates_and_passes_turn() {
        let mut world = World::new();
        let from = CellCoord::new(2, 6);
        let to = CellCoord::new(2, 3);
        let id = world.place_unit(from, Side::Blue, UnitKind::Rogue);

        let _ = apply_ok(&mut world, Command::SelectUnit { cell: from });
        let events = apply_ok(&mut world, Command::MoveOrAttack { destination: to });

        assert!(query::unit_at(&world, from).is_none());
        assert_eq!(query::unit_at(&world, to).map(|unit| unit.id), id);
        assert_eq!(query::current_side(&world), Side::Red);
        assert_eq!(query::elixir(&world, Side::Red), 6);
        assert_eq!(query::elixir(&world, Side::Blue), 5);
        assert_eq!(
            events.last(),
            Some(&Event::TurnPassed {
                side: Side::Red,
                elixir: 6
            })
        );
    }

    #[test]
    fn lethal_attack_removes_defender_and_advances_attacker() {
        let mut world = World::new();
        let attacker_cell = CellCoord::new(3, 4);
        let defender_cell = CellCoord::new(3, 3);
        let attacker = world
            .place_unit(attacker_cell, Side::Blue, UnitKind::Berserker)
            .expect("placed");
        let defender = world
            .place_unit(defender_cell, Side::Red, UnitKind::Rogue)
            .expect("placed");

        let _ = apply_ok(&mut world, Command::SelectUnit { cell: attacker_cell });
        let events = apply_ok(
            &mut world,
            Command::MoveOrAttack {
                destination: defender_cell,
            },
        );

        assert!(query::unit_at(&world, attacker_cell).is_none());
        let occupant = query::unit_at(&world, defender_cell).expect("attacker advanced");
        assert_eq!(occupant.id, attacker);
        assert_eq!(occupant.health, 500, "attacker takes no counter damage");
        assert!(events.contains(&Event::UnitDefeated {
            unit: defender,
            cell: defender_cell
        }));
    }

    #[test]
    fn survivable_attack_leaves_both_units_in_place() {
        let mut world = World::new();
        let attacker_cell = CellCoord::new(3, 4);
        let defender_cell = CellCoord::new(4, 3);
        let attacker = world
            .place_unit(attacker_cell, Side::Blue, UnitKind::Rogue)
            .expect("placed");
        let _ = world.place_unit(defender_cell, Side::Red, UnitKind::Berserker);

        let _ = apply_ok(&mut world, Command::SelectUnit { cell: attacker_cell });
        let _ = apply_ok(
            &mut world,
            Command::MoveOrAttack {
                destination: defender_cell,
            },
        );

        assert_eq!(
            query::unit_at(&world, attacker_cell).map(|unit| unit.id),
            Some(attacker)
        );
        assert_eq!(
            query::unit_at(&world, defender_cell).map(|unit| unit.health),
            Some(350)
        );
        assert_eq!(query::current_side(&world), Side::Red);
    }

    #[test]
    fn unreachable_destination_is_rejected_without_side_effects() {
        let mut world = World::new();
        let origin = CellCoord::new(0, 6);
        let _ = world.place_unit(origin, Side::Blue, UnitKind::Witch);
        let _ = apply_ok(&mut world, Command::SelectUnit { cell: origin });
        let before = query::snapshot(&world);

        let mut events = Vec::new();
        let result = apply(
            &mut world,
            Command::MoveOrAttack {
                destination: CellCoord::new(0, 3),
            },
            &mut events,
        );

        assert_eq!(result, Err(Rejection::IllegalDestination));
        assert!(events.is_empty());
        assert_eq!(query::snapshot(&world), before);
    }

    #[test]
    fn move_without_selection_is_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();
        assert_eq!(
            apply(
                &mut world,
                Command::MoveOrAttack {
                    destination: CellCoord::new(1, 1)
                },
                &mut events
            ),
            Err(Rejection::InvalidMode)
        );
    }

    #[test]
    fn summon_toggle_cancels_on_second_press() {
        let mut world = World::new();
        let kind = UnitKind::Rogue;

        let _ = apply_ok(&mut world, Command::ToggleSummon { kind });
        assert_eq!(query::mode(&world), Mode::SummonPending { kind });

        let _ = apply_ok(&mut world, Command::ToggleSummon { kind });
        assert_eq!(query::mode(&world), Mode::Idle);
    }

    #[test]
    fn entering_summon_mode_drops_the_selection() {
        let mut world = World::new();
        let cell = CellCoord::new(1, 6);
        let _ = world.place_unit(cell, Side::Blue, UnitKind::Rogue);
        let _ = apply_ok(&mut world, Command::SelectUnit { cell });

        let events = apply_ok(
            &mut world,
            Command::ToggleSummon {
                kind: UnitKind::Witch,
            },
        );

        assert!(query::legal_destinations(&world).is_empty());
        assert_eq!(events[0], Event::SelectionCleared);
    }

    #[test]
    fn summon_spends_elixir_and_spawns_on_home_row() {
        let mut world = World::new();
        let cell = CellCoord::new(4, 6);
        let _ = apply_ok(
            &mut world,
            Command::ToggleSummon {
                kind: UnitKind::Berserker,
            },
        );
        let events = apply_ok(
            &mut world,
            Command::Summon {
                kind: UnitKind::Berserker,
                cell,
            },
        );

        let unit = query::unit_at(&world, cell).expect("summoned");
        assert_eq!(unit.kind, UnitKind::Berserker);
        assert_eq!(unit.owner, Side::Blue);
        assert_eq!(unit.health, 500);
        assert_eq!(unit.id, UnitId::new(0));
        assert_eq!(query::elixir(&world, Side::Blue), 2);
        assert_eq!(query::elixir(&world, Side::Red), 6);
        assert_eq!(query::mode(&world), Mode::Idle);
        assert!(events.contains(&Event::ElixirSpent {
            side: Side::Blue,
            amount: 3,
            remaining: 2
        }));
    }

    #[test]
    fn summon_kind_must_match_pending_mode() {
        let mut world = World::new();
        let _ = apply_ok(
            &mut world,
            Command::ToggleSummon {
                kind: UnitKind::Rogue,
            },
        );
        let mut events = Vec::new();
        assert_eq!(
            apply(
                &mut world,
                Command::Summon {
                    kind: UnitKind::Witch,
                    cell: CellCoord::new(0, 6)
                },
                &mut events
            ),
            Err(Rejection::SummonKindMismatch)
        );
    }

    #[test]
    fn special_attack_toggle_requires_charges() {
        let mut world = World::new();
        scaffolding::set_charges(&mut world, Side::Blue, 0);
        let mut events = Vec::new();
        assert_eq!(
            apply(&mut world, Command::ToggleSpecialAttack, &mut events),
            Err(Rejection::NoChargesRemaining)
        );
        assert_eq!(query::mode(&world), Mode::Idle);
    }

    #[test]
    fn fireball_on_empty_cell_still_consumes_a_charge() {
        let mut world = World::new();
        let _ = apply_ok(&mut world, Command::ToggleSpecialAttack);
        let _ = apply_ok(
            &mut world,
            Command::CastSpecialAttack {
                target: StrikeTarget::Cell(CellCoord::new(3, 3)),
            },
        );

        assert_eq!(query::charges(&world, Side::Blue), 4);
        assert_eq!(query::current_side(&world), Side::Red);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut world = World::new();
        let _ = apply_ok(&mut world, Command::ToggleSpecialAttack);
        let events = apply_ok(&mut world, Command::CancelMode);
        assert_eq!(query::mode(&world), Mode::Idle);
        assert_eq!(events, vec![Event::ModeChanged { mode: Mode::Idle }]);
    }

    #[test]
    fn new_match_restores_configuration_defaults() {
        let mut world = World::new();
        let _ = world.place_unit(CellCoord::new(0, 0), Side::Red, UnitKind::Rogue);
        scaffolding::set_castle_health(&mut world, Side::Red, 10);
        scaffolding::set_elixir(&mut world, Side::Blue, 0);

        let events = apply_ok(&mut world, Command::NewMatch);

        assert_eq!(events, vec![Event::MatchStarted { first: Side::Blue }]);
        assert!(query::board_view(&world).units().next().is_none());
        assert_eq!(query::castle_health(&world, Side::Red), 5000);
        assert_eq!(query::elixir(&world, Side::Blue), 5);
    }
}
