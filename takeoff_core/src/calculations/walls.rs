//! Wall framing: exterior 2x6 and interior partition 2x4 walls.
//!
//! Studs are cut to the tallest ceiling in the plan (never under 8').
//! Plates are a double top plate plus a bottom plate, three courses per
//! story, ordered as 8' members.

use crate::input::MIN_CEILING_HEIGHT_FT;
use crate::materials::LumberSize;

use super::partitions::total_partition_ft;
use super::{ceil_count, MaterialItem, TakeoffContext};

/// Studs added per wall run for corners and ends
const CORNER_STUDS: u32 = 4;

/// Double top plate + single bottom plate
const PLATE_COURSES_PER_STORY: u32 = 3;

/// Stock length plates are ordered in (feet)
const PLATE_STOCK_FT: f64 = 8.0;

/// Stud and plate counts for one run of wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallFraming {
    pub stud_count: u32,
    pub plate_pieces: u32,
}

impl WallFraming {
    /// Frame `lineal_ft` of wall at `spacing_in` OC for `stories` stories.
    pub fn compute(lineal_ft: f64, spacing_in: f64, stories: u32) -> Self {
        let studs_per_story = ceil_count(lineal_ft * 12.0 / spacing_in) + CORNER_STUDS;
        let courses = PLATE_COURSES_PER_STORY * stories;
        WallFraming {
            stud_count: studs_per_story * stories,
            plate_pieces: ceil_count(lineal_ft * f64::from(courses) / PLATE_STOCK_FT),
        }
    }
}

/// Tallest room ceiling, floored at 8'.
pub fn stud_length_ft(ctx: &TakeoffContext<'_>) -> f64 {
    ctx.input
        .rooms
        .iter()
        .map(|room| room.ceiling_height_ft)
        .fold(MIN_CEILING_HEIGHT_FT, f64::max)
}

pub fn takeoff(ctx: &TakeoffContext<'_>) -> Vec<MaterialItem> {
    let mut items = Vec::with_capacity(4);
    let spacing = ctx.input.wall_spacing();
    let stories = ctx.stories();
    let stud_ft = stud_length_ft(ctx);
    let two_story = ctx.has_second_floor();
    let addition = ctx.input.is_addition;

    let exterior = WallFraming::compute(ctx.geometry.perimeter_ft, spacing.inches(), stories);

    let stud_notes = match (addition, two_story) {
        (true, true) => format!("{}\" OC, 2 stories, 3 walls (addition)", spacing),
        (true, false) => format!("{}\" OC, 3 walls (addition)", spacing),
        (false, true) => format!("{}\" OC, 2 stories", spacing),
        (false, false) => format!("{}\" OC, perimeter", spacing),
    };
    items.push(
        MaterialItem::pieces(
            format!("{} x {}' exterior wall studs", LumberSize::L2x6, stud_ft),
            exterior.stud_count,
        )
        .with_notes(stud_notes),
    );

    let plate_notes = match (addition, two_story) {
        (true, true) => "Double top plate, 2 stories, 3 walls (addition)",
        (true, false) => "Double top plate, 3 walls (addition)",
        (false, true) => "Double top plate, 2 stories",
        (false, false) => "Double top plate",
    };
    items.push(
        MaterialItem::pieces(
            format!("{} x 8' exterior top & bottom plates", LumberSize::L2x6),
            exterior.plate_pieces,
        )
        .with_notes(plate_notes),
    );

    let partition_ft = total_partition_ft(&ctx.input.rooms);
    tracing::debug!(partition_ft, "partition estimate");
    if partition_ft > 0.0 {
        let partitions = WallFraming::compute(partition_ft, spacing.inches(), stories);
        let story_note = if two_story { ", 2 stories" } else { "" };

        items.push(
            MaterialItem::pieces(
                format!("{} x {}' partition wall studs", LumberSize::L2x4, stud_ft),
                partitions.stud_count,
            )
            .with_notes(format!("{}\" OC, interior partitions{}", spacing, story_note)),
        );
        items.push(
            MaterialItem::pieces(
                format!("{} x 8' partition top & bottom plates", LumberSize::L2x4),
                partitions.plate_pieces,
            )
            .with_notes(format!("Double top plate{}", story_note)),
        );
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FramingSpacing, PartitionWalls, ProjectInput, Room};
    use crate::materials::LumberCatalog;
    use crate::units::FeetInches;

    fn garage() -> ProjectInput {
        ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0))
    }

    fn run(input: &ProjectInput) -> Vec<MaterialItem> {
        let catalog = LumberCatalog::default();
        takeoff(&TakeoffContext::new(input, &catalog))
    }

    fn two_rooms(first: PartitionWalls, second: PartitionWalls) -> Vec<Room> {
        vec![
            Room::new(FeetInches::new(12.0, 0.0), FeetInches::new(10.0, 0.0)).with_partitions(first),
            Room::new(FeetInches::new(12.0, 0.0), FeetInches::new(10.0, 0.0)).with_partitions(second),
        ]
    }

    #[test]
    fn test_exterior_single_story() {
        let items = run(&garage());
        assert_eq!(items.len(), 2);

        // 840" / 16 = 52.5 -> 53, + 4 corners
        assert_eq!(items[0].description, "2x6 x 8' exterior wall studs");
        assert_eq!(items[0].quantity, 57);
        assert_eq!(items[0].notes.as_deref(), Some("16\" OC, perimeter"));

        // 70 * 3 / 8 = 26.25 -> 27
        assert_eq!(items[1].description, "2x6 x 8' exterior top & bottom plates");
        assert_eq!(items[1].quantity, 27);
        assert_eq!(items[1].notes.as_deref(), Some("Double top plate"));
    }

    #[test]
    fn test_exterior_two_story_addition() {
        let mut input = garage();
        input.include_second_floor = true;
        input.is_addition = true;
        let items = run(&input);

        // perimeter 55' = 660" / 16 = 41.25 -> 42 + 4 = 46, x2
        assert_eq!(items[0].quantity, 92);
        assert_eq!(items[0].notes.as_deref(), Some("16\" OC, 2 stories, 3 walls (addition)"));
        // 55 * 6 / 8 = 41.25 -> 42
        assert_eq!(items[1].quantity, 42);
        assert_eq!(
            items[1].notes.as_deref(),
            Some("Double top plate, 2 stories, 3 walls (addition)")
        );
    }

    #[test]
    fn test_stud_length_uses_tallest_ceiling() {
        let mut input = garage();
        input.rooms = vec![
            Room::new(FeetInches::new(10.0, 0.0), FeetInches::new(10.0, 0.0)).with_ceiling_height(9.5),
            Room::new(FeetInches::new(10.0, 0.0), FeetInches::new(10.0, 0.0)).with_ceiling_height(8.0),
        ];
        let items = run(&input);
        assert_eq!(items[0].description, "2x6 x 9.5' exterior wall studs");
    }

    #[test]
    fn test_stud_length_never_below_eight() {
        let mut input = garage();
        input.rooms[0].ceiling_height_ft = 7.0;
        assert_eq!(stud_length_ft(&TakeoffContext::new(&input, &LumberCatalog::default())), 8.0);
    }

    #[test]
    fn test_partitions() {
        let input = garage().with_rooms(two_rooms(PartitionWalls::One, PartitionWalls::One));
        let items = run(&input);
        assert_eq!(items.len(), 4);

        // 10' shared wall: 120" / 16 = 7.5 -> 8 + 4 = 12
        assert_eq!(items[2].description, "2x4 x 8' partition wall studs");
        assert_eq!(items[2].quantity, 12);
        assert_eq!(items[2].notes.as_deref(), Some("16\" OC, interior partitions"));
        // 10 * 3 / 8 = 3.75 -> 4
        assert_eq!(items[3].description, "2x4 x 8' partition top & bottom plates");
        assert_eq!(items[3].quantity, 4);
    }

    #[test]
    fn test_partitions_two_story_24_oc() {
        let mut input = garage().with_rooms(two_rooms(PartitionWalls::Two, PartitionWalls::None));
        input.include_second_floor = true;
        input.wall_spacing = Some(FramingSpacing::Oc24);
        let items = run(&input);

        // (12 + 10) / 2 = 11' = 132" / 24 = 5.5 -> 6 + 4 = 10, x2
        assert_eq!(items[2].quantity, 20);
        assert_eq!(items[2].notes.as_deref(), Some("24\" OC, interior partitions, 2 stories"));
        // 11 * 6 / 8 = 8.25 -> 9
        assert_eq!(items[3].quantity, 9);
        assert_eq!(items[3].notes.as_deref(), Some("Double top plate, 2 stories"));
    }

    #[test]
    fn test_partition_totals_independent_of_room_order() {
        let forward = run(&garage().with_rooms(two_rooms(PartitionWalls::One, PartitionWalls::Two)));
        let reverse = run(&garage().with_rooms(two_rooms(PartitionWalls::Two, PartitionWalls::One)));
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_wall_framing_compute() {
        let framing = WallFraming::compute(70.0, 16.0, 1);
        assert_eq!(framing, WallFraming { stud_count: 57, plate_pieces: 27 });
    }
}
