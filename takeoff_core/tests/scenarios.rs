//! End-to-end takeoff scenarios through the public API.

use takeoff_core::calculations::geometry::perimeter_ft;
use takeoff_core::calculations::partitions::total_partition_ft;
use takeoff_core::file_io::{load_project_or_input, save_project};
use takeoff_core::input::{Axis, Opening, PartitionWalls, RoofConfig, Room};
use takeoff_core::units::FeetInches;
use takeoff_core::{calculate_takeoff, MaterialItem, MaterialUnit, ProjectInput, TakeoffProject};

fn ft(feet: f64) -> FeetInches {
    FeetInches::new(feet, 0.0)
}

/// 20' x 15' room, 8' ceiling, no partitions, no roof
fn garage() -> ProjectInput {
    ProjectInput::single_room(ft(20.0), ft(15.0))
}

fn find<'a>(items: &'a [MaterialItem], needle: &str) -> &'a MaterialItem {
    items
        .iter()
        .find(|i| i.description.contains(needle))
        .unwrap_or_else(|| panic!("no line item containing {:?}", needle))
}

#[test]
fn single_room_floor_only() {
    let items = calculate_takeoff(&garage());

    let joists = find(&items, "floor joists");
    assert_eq!(joists.description, "2x10 x 22' floor joists");
    assert_eq!(joists.quantity, 13);
    assert_eq!(joists.unit, MaterialUnit::Pieces);

    let rim = find(&items, "rim joist");
    assert_eq!(rim.quantity, 70);
    assert_eq!(rim.unit, MaterialUnit::LinealFeet);

    let subfloor = find(&items, "subfloor");
    assert_eq!(subfloor.quantity, 11);
    assert_eq!(subfloor.unit, MaterialUnit::Sheets);

    assert!(items.iter().all(|i| !i.description.contains("rafters")));
    assert!(items.iter().all(|i| !i.description.contains("partition")));
}

#[test]
fn default_gable_roof_over_single_room() {
    let input = garage().with_roof(RoofConfig::included());
    let items = calculate_takeoff(&input);

    let rafters = find(&items, "rafters");
    assert_eq!(rafters.description, "2x8 x 10' rafters");
    assert_eq!(rafters.quantity, 32);

    let ridge = find(&items, "ridge board");
    assert_eq!(ridge.quantity, 20);
    assert_eq!(ridge.unit, MaterialUnit::LinealFeet);

    assert_eq!(items.last().map(|i| i.description.as_str()), Some("2x6 x 16' ceiling joists"));
}

#[test]
fn door_gets_header_and_king_jack_only() {
    let input = garage().with_opening(Opening::door(ft(3.0), FeetInches::new(6.0, 8.0)));
    let items = calculate_takeoff(&input);

    let header = find(&items, "door opening");
    assert_eq!(header.description, "door opening 3'0\" × 6'8\" - 2-ply 2x12 header");
    assert_eq!(header.quantity, 2);

    assert_eq!(find(&items, "King studs").quantity, 4);
    assert!(items.iter().all(|i| !i.description.contains("Cripple")));
    assert!(items.iter().all(|i| !i.description.contains("sill plate")));
}

#[test]
fn repeated_windows_get_cripples_and_sill_plate() {
    let window = Opening::window(ft(3.0), ft(4.0), ft(3.0)).with_quantity(2);
    let items = calculate_takeoff(&garage().with_opening(window));

    let header = find(&items, "window opening");
    assert!(header.description.starts_with("2× window opening"));
    assert_eq!(header.quantity, 4);

    assert_eq!(find(&items, "King studs").quantity, 8);
    assert_eq!(find(&items, "Cripple studs below sill").quantity, 8);

    let sill = find(&items, "sill plate");
    assert_eq!(sill.quantity, 7);
    assert_eq!(sill.unit, MaterialUnit::LinealFeet);
    assert!(sill.is_sub_item());
}

#[test]
fn perimeter_invariant() {
    assert_eq!(perimeter_ft(20.0, 15.0, false, Axis::Length), 70.0);
    assert_eq!(perimeter_ft(20.0, 15.0, true, Axis::Length), 50.0);
    assert_eq!(perimeter_ft(20.0, 15.0, true, Axis::Width), 55.0);
}

#[test]
fn partitions_symmetric_in_room_order() {
    let rooms = vec![
        Room::new(ft(16.0), ft(11.0)).with_partitions(PartitionWalls::One),
        Room::new(ft(9.0), ft(11.0)).with_partitions(PartitionWalls::Two),
        Room::new(ft(12.0), ft(12.0)),
    ];
    let mut reversed = rooms.clone();
    reversed.reverse();
    assert_eq!(total_partition_ft(&rooms), total_partition_ft(&reversed));

    let forward = calculate_takeoff(&garage().with_rooms(rooms));
    let backward = calculate_takeoff(&garage().with_rooms(reversed));
    assert_eq!(
        find(&forward, "partition wall studs").quantity,
        find(&backward, "partition wall studs").quantity
    );
}

#[test]
fn repeated_calls_are_identical() {
    let input = garage()
        .with_roof(RoofConfig::included())
        .with_opening(Opening::door(ft(3.0), FeetInches::new(6.0, 8.0)));
    assert_eq!(calculate_takeoff(&input), calculate_takeoff(&input));
}

#[test]
fn sheet_counts_grow_with_waste() {
    let mut input = garage().with_roof(RoofConfig::included());
    let sheet_totals = |input: &ProjectInput| -> Vec<u32> {
        calculate_takeoff(input)
            .iter()
            .filter(|i| i.unit == MaterialUnit::Sheets)
            .map(|i| i.quantity)
            .collect()
    };

    let mut previous = sheet_totals(&input);
    for pct in [15.0, 25.0, 40.0, 50.0] {
        input.waste_factor_pct = pct;
        let current = sheet_totals(&input);
        assert!(current.iter().zip(&previous).all(|(now, before)| now >= before));
        previous = current;
    }
}

#[test]
fn second_floor_doubles_wall_framing() {
    let single = calculate_takeoff(&garage());
    let mut input = garage();
    input.include_second_floor = true;
    let double = calculate_takeoff(&input);

    assert_eq!(
        find(&double, "exterior wall studs").quantity,
        2 * find(&single, "exterior wall studs").quantity
    );
    assert!(double.iter().any(|i| i.description == "2x10 x 22' 2nd floor joists"));
}

#[test]
fn project_file_round_trip_matches_direct_takeoff() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garage.lbr");

    let input = garage().with_roof(RoofConfig::included());
    let expected = calculate_takeoff(&input);
    save_project(&TakeoffProject::new("Pat", "26-014").with_input(input), &path).unwrap();

    let loaded = load_project_or_input(&path).unwrap();
    assert_eq!(loaded.calculate(), expected);
}

#[test]
fn bare_form_json_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.json");
    std::fs::write(
        &path,
        r#"{
            "rooms": [{ "lengthFt": 20, "widthFt": 15 }],
            "overallLengthFt": 20,
            "overallWidthFt": 15
        }"#,
    )
    .unwrap();

    let project = load_project_or_input(&path).unwrap();
    project.input.validate().unwrap();
    assert_eq!(project.calculate(), calculate_takeoff(&garage()));
}

#[test]
fn legacy_stud_spacing_applies_to_every_member() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.json");
    std::fs::write(
        &path,
        r#"{
            "rooms": [{ "id": "r1", "lengthFt": 20, "widthFt": 15 }],
            "overallLengthFt": 20,
            "overallWidthFt": 15,
            "studSpacing": 12
        }"#,
    )
    .unwrap();

    let items = load_project_or_input(&path).unwrap().calculate();
    let joists = find(&items, "floor joists");
    // ceil(180 / 12) + 1
    assert_eq!(joists.quantity, 16);
    assert_eq!(joists.notes.as_deref(), Some("12\" OC, span table dependent"));
    assert_eq!(find(&items, "exterior wall studs").notes.as_deref(), Some("12\" OC, perimeter"));
}

#[test]
fn wider_spacing_needs_fewer_members() {
    use takeoff_core::input::FramingSpacing;

    let counts: Vec<(u32, u32)> = FramingSpacing::ALL
        .iter()
        .map(|&spacing| {
            let items = calculate_takeoff(&garage().with_spacing(spacing));
            (find(&items, "floor joists").quantity, find(&items, "exterior wall studs").quantity)
        })
        .collect();

    for pair in counts.windows(2) {
        assert!(pair[1].0 < pair[0].0);
        assert!(pair[1].1 < pair[0].1);
    }
}
