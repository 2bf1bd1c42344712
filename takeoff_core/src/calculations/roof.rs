//! # Roof Framing
//!
//! Stick-framed shed and gable roofs.
//!
//! ## Geometry
//!
//! The ridge runs along one footprint axis; rafters span the other. A gable
//! has two faces, each covering half the span, so rafter runs are half as
//! long and twice as many. A shed is a single face spanning the full width.
//!
//! ```text
//! gable run = span / 2 + overhang        shed run = span + overhang
//! rafter length = run * sqrt(1 + (pitch / 12)^2)
//! ```
//!
//! With `reverse_gable` the ridge follows the floor joists instead of the
//! configured ridge direction, turning the rafters perpendicular to them.
//!
//! Sheathing is computed from the unrounded rafter length; rafters are
//! ordered at the next stock length.

use once_cell::sync::Lazy;

use crate::input::{Axis, CeilingType, JoistDirection, RoofPitch, RoofType};
use crate::materials::LumberSize;

use super::{ceil_count, MaterialItem, TakeoffContext};

/// Rafter length per unit of run, indexed by [`RoofPitch::index`]
static PITCH_MULTIPLIERS: Lazy<[f64; 4]> = Lazy::new(|| {
    RoofPitch::ALL.map(|pitch| {
        let slope = pitch.rise() / 12.0;
        (1.0 + slope * slope).sqrt()
    })
});

/// Rafter length per foot of horizontal run for a pitch.
pub fn pitch_multiplier(pitch: RoofPitch) -> f64 {
    PITCH_MULTIPLIERS[pitch.index()]
}

/// Axis the ridge actually runs along.
pub fn effective_ridge_direction(ctx: &TakeoffContext<'_>) -> Axis {
    let roof = &ctx.input.roof;
    if roof.reverse_gable {
        match ctx.input.joist_direction {
            JoistDirection::AlongWidth => Axis::Width,
            JoistDirection::AlongLength => Axis::Length,
        }
    } else {
        roof.ridge_direction
    }
}

/// Derived roof dimensions and counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofFraming {
    /// Footprint dimension perpendicular to the ridge
    pub span_ft: f64,
    /// Footprint dimension parallel to the ridge
    pub ridge_length_ft: f64,
    pub rafter_run_ft: f64,
    /// Unrounded sloped rafter length
    pub rafter_length_ft: f64,
    pub rafter_order_length_ft: u32,
    pub rafter_count: u32,
    pub sheathing_area_sq_ft: f64,
}

impl RoofFraming {
    pub fn compute(ctx: &TakeoffContext<'_>) -> Self {
        let geo = &ctx.geometry;
        let roof = &ctx.input.roof;

        let (span_ft, ridge_length_ft) = match effective_ridge_direction(ctx) {
            Axis::Length => (geo.width_ft, geo.length_ft),
            Axis::Width => (geo.length_ft, geo.width_ft),
        };

        let rafters_per_face = rafters_along(ridge_length_ft, ctx.input.roof_spacing().inches());
        let (rafter_run_ft, faces) = match roof.roof_type {
            RoofType::Gable => (span_ft / 2.0 + roof.overhang.feet(), 2),
            RoofType::Shed => (span_ft + roof.overhang.feet(), 1),
        };

        let rafter_length_ft = rafter_run_ft * pitch_multiplier(roof.pitch);

        RoofFraming {
            span_ft,
            ridge_length_ft,
            rafter_run_ft,
            rafter_length_ft,
            rafter_order_length_ft: ctx.catalog.order_length_ft(rafter_length_ft),
            rafter_count: rafters_per_face * faces,
            sheathing_area_sq_ft: f64::from(faces) * rafter_length_ft * ridge_length_ft,
        }
    }
}

/// Members spaced along a ridge line, one at each end.
fn rafters_along(ridge_length_ft: f64, spacing_in: f64) -> u32 {
    ceil_count(ridge_length_ft * 12.0 / spacing_in) + 1
}

pub fn takeoff(ctx: &TakeoffContext<'_>) -> Vec<MaterialItem> {
    let roof = &ctx.input.roof;
    let spacing = ctx.input.roof_spacing();
    let framing = RoofFraming::compute(ctx);
    tracing::debug!(?framing, "roof framing");

    let mut items = Vec::with_capacity(4);

    let reverse = if roof.reverse_gable { ", reverse gable" } else { "" };
    items.push(
        MaterialItem::pieces(
            format!("{} x {}' rafters", roof.rafter_size.lumber(), framing.rafter_order_length_ft),
            framing.rafter_count,
        )
        .with_notes(format!("{}, {}/12, {}\" OC{}", roof.roof_type, roof.pitch, spacing, reverse)),
    );

    if roof.roof_type == RoofType::Gable && roof.ridge_board {
        items.push(MaterialItem::lineal_feet(
            format!("{} ridge board", roof.rafter_size.ridge_board()),
            ceil_count(framing.ridge_length_ft),
        ));
    }

    items.push(
        MaterialItem::sheets(
            "4x8 roof sheathing (OSB/plywood)",
            ctx.catalog.sheets_for_area(framing.sheathing_area_sq_ft, ctx.waste_pct()),
        )
        .with_notes(format!("~{}% waste", ctx.waste_pct())),
    );

    if roof.ceiling_type == CeilingType::Flat {
        let joist_length_ft = ctx.catalog.order_length_ft(framing.span_ft);
        items.push(
            MaterialItem::pieces(
                format!("{} x {}' ceiling joists", LumberSize::L2x6, joist_length_ft),
                rafters_along(framing.ridge_length_ft, spacing.inches()),
            )
            .with_notes(format!("{}\" OC, flat ceiling", spacing)),
        );
    }

    items
}
