use forest_siege_core::{BoardView, CellCoord, Side, Unit, UnitId, UnitKind};
use forest_siege_system_rules::legal_destinations;

fn place(cells: &mut [Option<Unit>], cell: CellCoord, id: u32, owner: Side, kind: UnitKind) {
    cells[(cell.row() * 7 + cell.column()) as usize] =
        Some(Unit::spawn(UnitId::new(id), owner, kind));
}

#[test]
fn paladin_cannot_target_adjacent_rogue() {
    let mut cells = vec![None; 49];
    let paladin_cell = CellCoord::new(3, 3);
    let rogue_cell = CellCoord::new(4, 3);
    place(&mut cells, paladin_cell, 1, Side::Blue, UnitKind::Paladin);
    place(&mut cells, rogue_cell, 2, Side::Red, UnitKind::Rogue);

    let destinations = legal_destinations(BoardView::new(&cells, 7, 7), paladin_cell);

    assert!(!destinations.contains(&rogue_cell));
    assert_eq!(destinations.len(), 7, "every other neighbour stays open");
}

#[test]
fn valkyrie_targets_both_air_and_ground_enemies() {
    let mut cells = vec![None; 49];
    let origin = CellCoord::new(3, 3);
    place(&mut cells, origin, 1, Side::Blue, UnitKind::SkyValkyrie);
    place(&mut cells, CellCoord::new(3, 2), 2, Side::Red, UnitKind::SkyValkyrie);
    place(&mut cells, CellCoord::new(5, 5), 3, Side::Red, UnitKind::Berserker);

    let destinations = legal_destinations(BoardView::new(&cells, 7, 7), origin);

    assert!(destinations.contains(&CellCoord::new(3, 2)));
    assert!(destinations.contains(&CellCoord::new(5, 5)));
    assert!(!destinations.contains(&CellCoord::new(3, 1)));
}

#[test]
fn ground_unit_is_blocked_by_enemy_flyer() {
    let mut cells = vec![None; 49];
    let origin = CellCoord::new(0, 6);
    place(&mut cells, origin, 1, Side::Blue, UnitKind::Rogue);
    place(&mut cells, CellCoord::new(0, 4), 2, Side::Red, UnitKind::SkyValkyrie);

    let destinations = legal_destinations(BoardView::new(&cells, 7, 7), origin);

    assert!(destinations.contains(&CellCoord::new(0, 5)));
    assert!(!destinations.contains(&CellCoord::new(0, 4)));
    assert!(!destinations.contains(&CellCoord::new(0, 3)));
}
