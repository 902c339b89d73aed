#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating pointer clicks into match commands.
//!
//! The controller never inspects the world directly. It follows the mode and
//! the cached destination set through the events the world reports, and
//! turns each click into at most one command for the current mode.

use std::collections::BTreeSet;

use forest_siege_core::{
    CellCoord, Command, Event, MatchSnapshot, Mode, Side, StrikeTarget, UnitKind, UNIT_TEMPLATES,
};
use forest_siege_system_rules as rules;

/// Discrete pointer input delivered by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerInput {
    /// The player clicked a board cell.
    Cell(CellCoord),
    /// The player clicked a castle panel.
    Castle(Side),
    /// The player pressed the summon button of a unit kind.
    SummonButton(UnitKind),
    /// The player pressed the fireball button.
    FireballButton,
    /// The player dismissed the active mode.
    Cancel,
    /// The player asked for a fresh match.
    Restart,
}

/// Mode-aware controller that emits commands for pointer input.
#[derive(Clone, Debug, Default)]
pub struct Controller {
    mode: Mode,
    destinations: BTreeSet<CellCoord>,
}

impl Controller {
    /// Creates a controller for a match that has just started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller that resumes from a captured snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Self {
        Self {
            mode: snapshot.mode,
            destinations: snapshot.destinations.iter().copied().collect(),
        }
    }

    /// Mode the controller believes is active.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Consumes world events, then translates the optional input into commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: Option<PointerInput>,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            self.observe(event);
        }

        if let Some(input) = input {
            if let Some(command) = self.translate(input) {
                out.push(command);
            }
        }
    }

    fn observe(&mut self, event: &Event) {
        match event {
            Event::MatchStarted { .. } => {
                self.mode = Mode::Idle;
                self.destinations.clear();
            }
            Event::ModeChanged { mode } => self.mode = *mode,
            Event::UnitSelected { destinations, .. } => {
                self.destinations = destinations.iter().copied().collect();
            }
            Event::SelectionCleared => self.destinations.clear(),
            _ => {}
        }
    }

    fn translate(&self, input: PointerInput) -> Option<Command> {
        match input {
            PointerInput::Restart => Some(Command::NewMatch),
            _ if self.mode.is_terminal() => None,
            PointerInput::SummonButton(kind) => Some(Command::ToggleSummon { kind }),
            PointerInput::FireballButton => Some(Command::ToggleSpecialAttack),
            PointerInput::Cancel => Some(Command::CancelMode),
            PointerInput::Cell(cell) => Some(self.click_cell(cell)),
            PointerInput::Castle(castle) => self.click_castle(castle),
        }
    }

    fn click_cell(&self, cell: CellCoord) -> Command {
        match self.mode {
            Mode::UnitSelected { .. } if self.destinations.contains(&cell) => {
                Command::MoveOrAttack { destination: cell }
            }
            Mode::SummonPending { kind } => Command::Summon { kind, cell },
            Mode::SpecialAttackPending => Command::CastSpecialAttack {
                target: StrikeTarget::Cell(cell),
            },
            _ => Command::SelectUnit { cell },
        }
    }

    fn click_castle(&self, castle: Side) -> Option<Command> {
        match self.mode {
            Mode::UnitSelected { .. } => Some(Command::AttackCastle { castle }),
            Mode::SpecialAttackPending => Some(Command::CastSpecialAttack {
                target: StrikeTarget::Castle(castle),
            }),
            _ => None,
        }
    }
}

/// Summon button state for one catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummonAffordance {
    /// Kind offered by the button.
    pub kind: UnitKind,
    /// Elixir the summon costs.
    pub cost: u32,
    /// Whether the acting side can pay for it.
    pub affordable: bool,
    /// Whether summon mode is pending for this kind.
    pub active: bool,
}

/// Which controls an adapter should enable for the acting side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Affordances {
    /// One entry per catalog template, in catalog order.
    pub summons: Vec<SummonAffordance>,
    /// Whether the fireball button may be pressed.
    pub fireball_enabled: bool,
    /// Whether the fireball is armed.
    pub fireball_active: bool,
    /// Castle the selected unit can strike from where it stands.
    pub assailable_castle: Option<Side>,
}

impl Affordances {
    /// Derives control states from a match snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Self {
        let playing = !snapshot.mode.is_terminal();
        let elixir = snapshot.elixir[snapshot.current];

        let summons = UNIT_TEMPLATES
            .iter()
            .map(|template| SummonAffordance {
                kind: template.kind,
                cost: template.cost,
                affordable: playing && elixir >= template.cost,
                active: snapshot.mode == (Mode::SummonPending { kind: template.kind }),
            })
            .collect();

        let assailable_castle = snapshot.selected().and_then(|(origin, unit)| {
            let castle = unit.owner.opponent();
            rules::castle_assault(snapshot.rows, origin, unit, castle)
                .ok()
                .map(|()| castle)
        });

        Self {
            summons,
            fireball_enabled: playing && snapshot.charges[snapshot.current] > 0,
            fireball_active: snapshot.mode == Mode::SpecialAttackPending,
            assailable_castle,
        }
    }

    /// Looks up the summon button of a kind.
    #[must_use]
    pub fn summon(&self, kind: UnitKind) -> Option<&SummonAffordance> {
        self.summons.iter().find(|entry| entry.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_in(mode: Mode) -> Controller {
        let mut controller = Controller::new();
        controller.handle(&[Event::ModeChanged { mode }], None, &mut Vec::new());
        controller
    }

    fn click(controller: &mut Controller, input: PointerInput) -> Vec<Command> {
        let mut commands = Vec::new();
        controller.handle(&[], Some(input), &mut commands);
        commands
    }

    #[test]
    fn idle_clicks_select() {
        let mut controller = Controller::new();
        let cell = CellCoord::new(2, 3);
        assert_eq!(
            click(&mut controller, PointerInput::Cell(cell)),
            vec![Command::SelectUnit { cell }]
        );
        assert!(click(&mut controller, PointerInput::Castle(Side::Red)).is_empty());
    }

    #[test]
    fn pending_summon_targets_clicked_cell() {
        let kind = UnitKind::Witch;
        let mut controller = controller_in(Mode::SummonPending { kind });
        let cell = CellCoord::new(0, 6);
        assert_eq!(
            click(&mut controller, PointerInput::Cell(cell)),
            vec![Command::Summon { kind, cell }]
        );
    }

    #[test]
    fn armed_fireball_strikes_cells_and_castles() {
        let mut controller = controller_in(Mode::SpecialAttackPending);
        assert_eq!(
            click(&mut controller, PointerInput::Castle(Side::Blue)),
            vec![Command::CastSpecialAttack {
                target: StrikeTarget::Castle(Side::Blue)
            }]
        );
        assert_eq!(
            click(&mut controller, PointerInput::Cell(CellCoord::new(1, 1))),
            vec![Command::CastSpecialAttack {
                target: StrikeTarget::Cell(CellCoord::new(1, 1))
            }]
        );
    }

    #[test]
    fn finished_match_only_restarts() {
        let mut controller = controller_in(Mode::MatchOver { winner: Side::Red });
        assert!(click(&mut controller, PointerInput::FireballButton).is_empty());
        assert!(click(&mut controller, PointerInput::Cell(CellCoord::new(0, 0))).is_empty());
        assert_eq!(
            click(&mut controller, PointerInput::Restart),
            vec![Command::NewMatch]
        );
    }
}
