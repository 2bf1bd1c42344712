//! Door and window framing.
//!
//! Every opening gets a 2-ply 2x12 header and a king + jack stud on each
//! side. Openings with a sill above the floor also get cripples below the
//! sill and a sill plate. Doors are simply openings with a zero sill.

use crate::input::Opening;
use crate::materials::LumberSize;

use super::{ceil_count, MaterialItem, SUB_ITEM_INDENT};

/// Header and sill plate length past the rough opening (inches)
const BEARING_ALLOWANCE_IN: f64 = 6.0;

/// Plies in a built-up header
const HEADER_PLIES: u32 = 2;

/// Two kings plus two jacks
const KING_JACK_STUDS: u32 = 4;

pub fn takeoff(ctx: &super::TakeoffContext<'_>) -> Vec<MaterialItem> {
    let spacing_in = ctx.input.wall_spacing().inches();
    ctx.input
        .openings
        .iter()
        .flat_map(|opening| opening_items(opening, spacing_in))
        .collect()
}

/// Line items for one opening, scaled by its quantity.
pub fn opening_items(opening: &Opening, wall_spacing_in: f64) -> Vec<MaterialItem> {
    let qty = opening.effective_quantity();
    let width_in = opening.width().total_inches().value();
    let sill_in = opening.sill_height().total_inches().value();
    let rough_in = width_in + BEARING_ALLOWANCE_IN;

    let qty_label = if qty > 1 { format!("{}× ", qty) } else { String::new() };
    let header = LumberSize::L2x12;

    let mut items = vec![
        MaterialItem::pieces(
            format!(
                "{}{} opening {} × {} - {}-ply {} header",
                qty_label,
                opening.kind,
                opening.width(),
                opening.height(),
                HEADER_PLIES,
                header
            ),
            HEADER_PLIES * qty,
        )
        .with_notes(format!("Two {}s, {}\" rough", header, rough_in)),
        MaterialItem::pieces(
            format!("{}King studs (2) + Jack studs (2)", SUB_ITEM_INDENT),
            KING_JACK_STUDS * qty,
        ),
    ];

    if sill_in > 0.0 {
        let cripples = ceil_count(width_in / wall_spacing_in) + 1;
        items.push(
            MaterialItem::pieces(format!("{}Cripple studs below sill", SUB_ITEM_INDENT), cripples * qty)
                .with_notes(format!("Sill {} from floor", opening.sill_height())),
        );
        items.push(MaterialItem::lineal_feet(
            format!("{}{} sill plate", SUB_ITEM_INDENT, LumberSize::L2x4),
            ceil_count(rough_in / 12.0 * f64::from(qty)),
        ));
    }

    items
}
