//! Ordering rules for lumber lengths and sheet goods.
//!
//! Yards sell dimension lumber in even-foot lengths and sheathing in 4x8
//! sheets. Every "round this up to something you can buy" decision in the
//! takeoff goes through [`LumberCatalog`] so the policy lives in one place.

use serde::{Deserialize, Serialize};

/// Area of one 4x8 sheet in square feet
pub const SHEET_AREA_SQ_FT: f64 = 32.0;

/// Nominal-length catalog used to turn a required length into an order length.
///
/// ## JSON Example
///
/// ```json
/// { "increment_ft": 2, "fallback_length_ft": 10, "sheet_area_sq_ft": 32.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LumberCatalog {
    /// Stock lengths come in multiples of this many feet
    pub increment_ft: u32,

    /// Length ordered when the computed length rounds to zero
    pub fallback_length_ft: u32,

    /// Coverage of one sheet of sheathing or subfloor
    pub sheet_area_sq_ft: f64,
}

impl Default for LumberCatalog {
    fn default() -> Self {
        LumberCatalog {
            increment_ft: 2,
            fallback_length_ft: 10,
            sheet_area_sq_ft: SHEET_AREA_SQ_FT,
        }
    }
}

impl LumberCatalog {
    /// Round a required member length up to the next stock length.
    ///
    /// A computed length of zero (or NaN from a degenerate footprint) orders
    /// the fallback length instead.
    ///
    /// ```rust
    /// use takeoff_core::materials::LumberCatalog;
    ///
    /// let catalog = LumberCatalog::default();
    /// assert_eq!(catalog.order_length_ft(9.75), 10);
    /// assert_eq!(catalog.order_length_ft(20.5), 22);
    /// assert_eq!(catalog.order_length_ft(0.0), 10);
    /// ```
    pub fn order_length_ft(&self, required_ft: f64) -> u32 {
        let increment = f64::from(self.increment_ft.max(1));
        let length = (required_ft / increment).ceil() * increment;
        if length == 0.0 || length.is_nan() {
            self.fallback_length_ft
        } else {
            length as u32
        }
    }

    /// Sheets needed to cover `area_sq_ft` with `waste_pct` percent extra.
    pub fn sheets_for_area(&self, area_sq_ft: f64, waste_pct: f64) -> u32 {
        let waste_factor = 1.0 + waste_pct / 100.0;
        ((area_sq_ft * waste_factor) / self.sheet_area_sq_ft).ceil() as u32
    }
}
