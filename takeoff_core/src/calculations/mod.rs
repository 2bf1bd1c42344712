//! # Takeoff Calculations
//!
//! The framing takeoff engine. One call turns a [`ProjectInput`] into an
//! ordered list of [`MaterialItem`]s:
//!
//! 1. [`geometry`] derives length, width, area, perimeter, and joist span/run
//! 2. [`floor`] appends joists, rim joist, and subfloor (twice for two stories)
//! 3. [`walls`] appends exterior and partition studs and plates
//! 4. [`openings`] appends headers, king/jack, cripples, and sills per opening
//! 5. [`roof`] appends rafters, ridge board, sheathing, and ceiling joists
//!
//! Every stage reads only the input and the derived geometry, never another
//! stage's output. The engine is a pure function: no I/O, no shared state,
//! and no failure path.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::calculate_takeoff;
//! use takeoff_core::input::ProjectInput;
//! use takeoff_core::units::FeetInches;
//!
//! let input = ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0));
//! let items = calculate_takeoff(&input);
//!
//! assert_eq!(items[0].description, "2x10 x 22' floor joists");
//! assert_eq!(items[0].quantity, 13);
//! ```

pub mod floor;
pub mod geometry;
pub mod openings;
pub mod partitions;
pub mod roof;
pub mod walls;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::ProjectInput;
use crate::materials::LumberCatalog;

pub use geometry::Geometry;

/// Unit of measure for a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialUnit {
    #[serde(rename = "pcs")]
    Pieces,
    #[serde(rename = "lin ft")]
    LinealFeet,
    #[serde(rename = "sheets")]
    Sheets,
}

impl MaterialUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialUnit::Pieces => "pcs",
            MaterialUnit::LinealFeet => "lin ft",
            MaterialUnit::Sheets => "sheets",
        }
    }
}

impl fmt::Display for MaterialUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One line of the bill of materials.
///
/// A description starting with two spaces is a sub-item of the line above
/// it (e.g. the studs that go with an opening's header).
///
/// ## JSON Example
///
/// ```json
/// { "description": "2x10 rim joist", "quantity": 70, "unit": "lin ft" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialItem {
    pub description: String,
    pub quantity: u32,
    pub unit: MaterialUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Indent marking a sub-item in a description
pub const SUB_ITEM_INDENT: &str = "  ";

impl MaterialItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit: MaterialUnit) -> Self {
        MaterialItem {
            description: description.into(),
            quantity,
            unit,
            notes: None,
        }
    }

    pub fn pieces(description: impl Into<String>, quantity: u32) -> Self {
        Self::new(description, quantity, MaterialUnit::Pieces)
    }

    pub fn lineal_feet(description: impl Into<String>, quantity: u32) -> Self {
        Self::new(description, quantity, MaterialUnit::LinealFeet)
    }

    pub fn sheets(description: impl Into<String>, quantity: u32) -> Self {
        Self::new(description, quantity, MaterialUnit::Sheets)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attach notes only when there are any.
    pub fn with_optional_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn is_sub_item(&self) -> bool {
        self.description.starts_with(SUB_ITEM_INDENT)
    }
}

/// Shared read-only state handed to each framing stage.
#[derive(Debug, Clone, Copy)]
pub struct TakeoffContext<'a> {
    pub input: &'a ProjectInput,
    pub geometry: Geometry,
    pub catalog: &'a LumberCatalog,
}

impl<'a> TakeoffContext<'a> {
    pub fn new(input: &'a ProjectInput, catalog: &'a LumberCatalog) -> Self {
        TakeoffContext {
            input,
            geometry: Geometry::derive(input),
            catalog,
        }
    }

    pub fn has_second_floor(&self) -> bool {
        self.input.include_second_floor
    }

    /// 2 with a second floor, otherwise 1
    pub fn stories(&self) -> u32 {
        if self.has_second_floor() {
            2
        } else {
            1
        }
    }

    pub fn waste_pct(&self) -> f64 {
        self.input.waste_factor_pct
    }
}

/// `ceil` into a count. Negative and NaN results clamp to zero.
pub(crate) fn ceil_count(value: f64) -> u32 {
    value.ceil() as u32
}

/// Run a takeoff with the standard lumber catalog.
pub fn calculate_takeoff(input: &ProjectInput) -> Vec<MaterialItem> {
    calculate_takeoff_with(input, &LumberCatalog::default())
}

/// Run a takeoff with a project-specific catalog.
pub fn calculate_takeoff_with(input: &ProjectInput, catalog: &LumberCatalog) -> Vec<MaterialItem> {
    let ctx = TakeoffContext::new(input, catalog);
    tracing::debug!(
        length_ft = ctx.geometry.length_ft,
        width_ft = ctx.geometry.width_ft,
        perimeter_ft = ctx.geometry.perimeter_ft,
        area_sq_ft = ctx.geometry.area_sq_ft,
        "derived footprint geometry"
    );

    let mut items = Vec::new();

    items.extend(floor::takeoff(&ctx));
    tracing::debug!("floor framing: {} items", items.len());

    let before = items.len();
    items.extend(walls::takeoff(&ctx));
    tracing::debug!("wall framing: {} items", items.len() - before);

    let before = items.len();
    items.extend(openings::takeoff(&ctx));
    tracing::debug!("opening framing: {} items", items.len() - before);

    if input.roof.include_roof {
        let before = items.len();
        items.extend(roof::takeoff(&ctx));
        tracing::debug!("roof framing: {} items", items.len() - before);
    }

    tracing::info!(
        rooms = input.rooms.len(),
        openings = input.openings.len(),
        "takeoff complete: {} line items",
        items.len()
    );
    items
}
