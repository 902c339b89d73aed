//! Line-oriented match driver shared by interactive play and scripts.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use forest_siege_core::{CellCoord, Event, Side, StrikeTarget, UnitKind};
use forest_siege_rendering::{Presenter, Scene, TextPresenter};
use forest_siege_system_input::{Controller, PointerInput};
use forest_siege_world::{self as world, query, World};
use tracing::warn;

/// One parsed script line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScriptCommand {
    Input(PointerInput),
    Show,
    Quit,
}

/// Parses a script line; blank lines and `#` comments yield `None`.
pub(crate) fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "click" => {
            let (Some(column), Some(row), None) = (words.next(), words.next(), words.next()) else {
                bail!("usage: click COLUMN ROW");
            };
            let column = column.parse().with_context(|| format!("bad column `{column}`"))?;
            let row = row.parse().with_context(|| format!("bad row `{row}`"))?;
            ScriptCommand::Input(PointerInput::Cell(CellCoord::new(column, row)))
        }
        "castle" => {
            let (Some(side), None) = (words.next(), words.next()) else {
                bail!("usage: castle blue|red");
            };
            ScriptCommand::Input(PointerInput::Castle(side.parse::<Side>()?))
        }
        "summon" => {
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                bail!("usage: summon KIND");
            }
            ScriptCommand::Input(PointerInput::SummonButton(name.parse::<UnitKind>()?))
        }
        "fireball" => ScriptCommand::Input(PointerInput::FireballButton),
        "cancel" => ScriptCommand::Input(PointerInput::Cancel),
        "new" | "restart" => ScriptCommand::Input(PointerInput::Restart),
        "show" => ScriptCommand::Show,
        "quit" | "exit" => ScriptCommand::Quit,
        other => bail!("unknown command `{other}`"),
    };
    Ok(Some(command))
}

/// Drives the world with commands read from `input`, writing boards to `out`.
pub(crate) fn run<R: BufRead, W: Write>(world: &mut World, input: R, out: &mut W) -> Result<()> {
    let mut controller = Controller::from_snapshot(&query::snapshot(world));
    let mut pending: Vec<Event> = Vec::new();
    present(world, out)?;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read command")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = index + 1, error = %err, "unrecognised command");
                writeln!(out, "? {err}")?;
                continue;
            }
        };

        match command {
            ScriptCommand::Quit => break,
            ScriptCommand::Show => present(world, out)?,
            ScriptCommand::Input(input) => {
                let mut commands = Vec::new();
                controller.handle(&pending, Some(input), &mut commands);
                pending.clear();
                if commands.is_empty() {
                    writeln!(out, "nothing to do")?;
                    continue;
                }

                for command in commands {
                    if let Err(reason) = world::apply(world, command, &mut pending) {
                        writeln!(out, "rejected: {reason}")?;
                    }
                }
                for event in &pending {
                    if let Some(line) = narrate(event) {
                        writeln!(out, "{line}")?;
                    }
                }
                if !pending.is_empty() {
                    present(world, out)?;
                }
            }
        }
    }

    Ok(())
}

fn present<W: Write>(world: &World, out: &mut W) -> Result<()> {
    let scene = Scene::from_snapshot(&query::snapshot(world));
    TextPresenter::new(out).present(&scene)
}

fn narrate(event: &Event) -> Option<String> {
    let line = match event {
        Event::MatchStarted { first } => format!("New match, {first} moves first."),
        Event::UnitMoved { from, to, .. } => format!("Unit moved {from} -> {to}."),
        Event::UnitDamaged {
            cell,
            damage,
            remaining,
            ..
        } => format!("Unit at {cell} took {damage} damage ({remaining} left)."),
        Event::UnitDefeated { cell, .. } => format!("Unit at {cell} was defeated."),
        Event::UnitSummoned {
            kind, owner, cell, ..
        } => format!("{owner} summoned a {kind} at {cell}."),
        Event::FireballCast { side, target, .. } => match target {
            StrikeTarget::Cell(cell) => format!("{side} hurled a fireball at {cell}."),
            StrikeTarget::Castle(castle) => {
                format!("{side} hurled a fireball at the {castle} castle.")
            }
        },
        Event::CastleDamaged {
            side,
            damage,
            remaining,
        } => format!("{side} castle took {damage} damage ({remaining} left)."),
        Event::MatchWon { winner } => format!("{winner} wins the match!"),
        _ => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str) -> (World, String) {
        let mut world = World::new();
        let mut out = Vec::new();
        run(&mut world, script.as_bytes(), &mut out).expect("script runs");
        (world, String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn lines_parse_into_pointer_input() {
        assert_eq!(
            parse_line("click 2 6").expect("valid"),
            Some(ScriptCommand::Input(PointerInput::Cell(CellCoord::new(2, 6))))
        );
        assert_eq!(
            parse_line("summon sky valkyrie").expect("valid"),
            Some(ScriptCommand::Input(PointerInput::SummonButton(
                UnitKind::SkyValkyrie
            )))
        );
        assert_eq!(
            parse_line("CASTLE red").expect("valid"),
            Some(ScriptCommand::Input(PointerInput::Castle(Side::Red)))
        );
        assert_eq!(parse_line("   # note").expect("valid"), None);
        assert!(parse_line("click 1").is_err());
        assert!(parse_line("summon dragon").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn scripted_summon_and_move() {
        let (world, output) = run_script(
            "summon rogue\nclick 3 6\nsummon rogue\nclick 3 0\n\
             click 3 6\nclick 3 2\nquit\nclick 0 0\n",
        );

        assert!(output.contains("Blue summoned a Rogue at (3, 6)."));
        assert!(output.contains("Red summoned a Rogue at (3, 0)."));
        assert!(output.contains("Unit moved (3, 6) -> (3, 2)."));
        assert_eq!(
            query::unit_at(&world, CellCoord::new(3, 2)).map(|unit| unit.owner),
            Some(Side::Blue)
        );
        assert_eq!(query::current_side(&world), Side::Red);
    }

    #[test]
    fn rejections_and_typos_are_reported_without_stopping() {
        let (world, output) = run_script("summon paladin\nclick 0 0\nbogus\nfireball\n");

        assert!(output.contains("rejected: "));
        assert!(output.contains("? unknown command `bogus`"));
        assert_eq!(
            query::mode(&world),
            forest_siege_core::Mode::SpecialAttackPending
        );
    }
}
