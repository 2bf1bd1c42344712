//! Footprint geometry.
//!
//! An addition ties into an existing building along one side, so that wall
//! is not framed and drops out of the perimeter:
//!
//! ```text
//! standalone:            2(L + W)
//! tie-in along length:   L + 2W
//! tie-in along width:    2L + W
//! ```

use serde::{Deserialize, Serialize};

use crate::input::{Axis, JoistDirection, ProjectInput};
use crate::units::Feet;

/// Dimensions derived once per takeoff and shared by every framing stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub length_in: f64,
    pub width_in: f64,
    pub length_ft: f64,
    pub width_ft: f64,
    pub area_sq_ft: f64,
    /// Framed exterior wall length (three walls for an addition)
    pub perimeter_ft: f64,
    /// Distance each floor joist spans
    pub span_in: f64,
    /// Distance across which joists are spaced out
    pub run_in: f64,
}

impl Geometry {
    pub fn derive(input: &ProjectInput) -> Self {
        let length_in = input.overall_length().total_inches();
        let width_in = input.overall_width().total_inches();
        let length_ft = Feet::from(length_in);
        let width_ft = Feet::from(width_in);

        let perimeter_ft = perimeter_ft(
            length_ft.value(),
            width_ft.value(),
            input.is_addition,
            input.tie_in_direction,
        );

        let (span_in, run_in) = match input.joist_direction {
            JoistDirection::AlongWidth => (length_in, width_in),
            JoistDirection::AlongLength => (width_in, length_in),
        };

        Geometry {
            length_in: length_in.value(),
            width_in: width_in.value(),
            length_ft: length_ft.value(),
            width_ft: width_ft.value(),
            area_sq_ft: (length_ft * width_ft).value(),
            perimeter_ft,
            span_in: span_in.value(),
            run_in: run_in.value(),
        }
    }
}

/// Framed perimeter in feet, excluding the tie-in wall of an addition.
pub fn perimeter_ft(length_ft: f64, width_ft: f64, is_addition: bool, tie_in: Axis) -> f64 {
    if !is_addition {
        return 2.0 * (length_ft + width_ft);
    }
    match tie_in {
        Axis::Length => length_ft + 2.0 * width_ft,
        Axis::Width => 2.0 * length_ft + width_ft,
    }
}
