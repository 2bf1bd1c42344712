//! Floor framing: joists, rim joist, and subfloor.
//!
//! A second floor is assumed to share the first floor's footprint, so its
//! lines repeat the first floor's quantities with "2nd floor" labels.

use crate::materials::LumberSize;

use super::{ceil_count, MaterialItem, TakeoffContext};

/// Bearing allowance added to the joist span before rounding to stock length
const JOIST_BEARING_ALLOWANCE_IN: f64 = 6.0;

const ADDITION_NOTE: &str = "3 walls (addition)";

/// Quantities shared by every floor level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorFraming {
    pub joist_count: u32,
    pub joist_length_ft: u32,
    pub rim_lineal_ft: u32,
    pub subfloor_sheets: u32,
}

impl FloorFraming {
    pub fn compute(ctx: &TakeoffContext<'_>) -> Self {
        let geo = &ctx.geometry;
        let spacing_in = ctx.input.floor_spacing().inches();

        FloorFraming {
            joist_count: ceil_count(geo.run_in / spacing_in) + 1,
            joist_length_ft: ctx
                .catalog
                .order_length_ft((geo.span_in + JOIST_BEARING_ALLOWANCE_IN) / 12.0),
            rim_lineal_ft: ceil_count(geo.perimeter_ft),
            subfloor_sheets: ctx.catalog.sheets_for_area(geo.area_sq_ft, ctx.waste_pct()),
        }
    }
}

/// Labels and rim treatment for one floor level.
struct Level<'a> {
    /// Prefix for the rim and subfloor lines, e.g. "1st floor "
    label: &'a str,
    /// Tail of the joist line, e.g. "2nd floor joists"
    joists: String,
    pt_rim: bool,
    rim_notes: Option<String>,
}

pub fn takeoff(ctx: &TakeoffContext<'_>) -> Vec<MaterialItem> {
    let framing = FloorFraming::compute(ctx);
    let pt_rim = ctx.input.pt_rim_joist_at_grade;

    let first_label = if ctx.has_second_floor() { "1st floor " } else { "" };
    let first = Level {
        label: first_label,
        joists: format!("{}floor joists", first_label),
        pt_rim,
        rim_notes: if pt_rim {
            Some("Pressure-treated, at grade".to_string())
        } else {
            addition_note(ctx)
        },
    };

    let mut items = Vec::with_capacity(6);
    level_items(ctx, &framing, &first, &mut items);

    if ctx.has_second_floor() {
        // Only the first-floor rim sits at grade
        let second = Level {
            label: "2nd floor ",
            joists: "2nd floor joists".to_string(),
            pt_rim: false,
            rim_notes: addition_note(ctx),
        };
        level_items(ctx, &framing, &second, &mut items);
    }

    items
}

fn level_items(ctx: &TakeoffContext<'_>, framing: &FloorFraming, level: &Level<'_>, items: &mut Vec<MaterialItem>) {
    let joist = LumberSize::L2x10;

    items.push(
        MaterialItem::pieces(
            format!("{} x {}' {}", joist, framing.joist_length_ft, level.joists),
            framing.joist_count,
        )
        .with_notes(format!("{}\" OC, span table dependent", ctx.input.floor_spacing())),
    );

    let pt = if level.pt_rim { "PT " } else { "" };
    items.push(
        MaterialItem::lineal_feet(format!("{} {}{}rim joist", joist, pt, level.label), framing.rim_lineal_ft)
            .with_optional_notes(level.rim_notes.clone()),
    );

    items.push(
        MaterialItem::sheets(format!("4x8 OSB/plywood {}subfloor", level.label), framing.subfloor_sheets)
            .with_notes(format!("3/4\" T&G, ~{}% waste", ctx.waste_pct())),
    );
}

fn addition_note(ctx: &TakeoffContext<'_>) -> Option<String> {
    ctx.input.is_addition.then(|| ADDITION_NOTE.to_string())
}
