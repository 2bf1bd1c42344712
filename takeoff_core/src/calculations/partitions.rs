//! Interior partition estimate.
//!
//! Each room reports a coarse partition count instead of real wall
//! geometry. A wall between two rooms is reported by both, so the sum over
//! all rooms is halved.

use crate::input::{PartitionWalls, Room};

/// Partition lineal feet attributed to one room.
pub fn room_partition_ft(room: &Room) -> f64 {
    let length_ft = room.length().to_feet().value();
    let width_ft = room.width().to_feet().value();
    match room.partition_walls {
        PartitionWalls::None => 0.0,
        PartitionWalls::One => length_ft.min(width_ft),
        PartitionWalls::Two => length_ft + width_ft,
    }
}

/// Total partition lineal feet across the plan, each shared wall counted once.
pub fn total_partition_ft(rooms: &[Room]) -> f64 {
    rooms.iter().map(room_partition_ft).sum::<f64>() / 2.0
}
