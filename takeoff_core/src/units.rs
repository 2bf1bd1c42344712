//! # Unit Types
//!
//! Type-safe wrappers for the handful of units a framing takeoff needs.
//! Field measurements arrive as feet plus inches; framing math runs in
//! inches (spacing is on-center inches) and is reported in decimal feet.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Feet, FeetInches, Inches};
//!
//! let wall = FeetInches::new(6.0, 8.0);
//! assert_eq!(wall.total_inches(), Inches(80.0));
//!
//! let ft: Feet = Inches(180.0).into();
//! assert_eq!(ft.0, 15.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl Mul<Feet> for Feet {
    type Output = SqFt;
    fn mul(self, rhs: Feet) -> SqFt {
        SqFt(self.0 * rhs.0)
    }
}

// ============================================================================
// Feet + Inches
// ============================================================================

/// A measurement as entered on a tape: whole feet plus inches.
///
/// Neither part is normalized; `5' 18"` is a legal value equal to `6' 6"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: f64,
    pub inches: f64,
}

impl FeetInches {
    pub fn new(feet: f64, inches: f64) -> Self {
        Self { feet, inches }
    }

    /// Total length in inches (`ft * 12 + in`)
    pub fn total_inches(self) -> Inches {
        Inches::from(Feet(self.feet)) + Inches(self.inches)
    }

    /// Total length in decimal feet
    pub fn to_feet(self) -> Feet {
        self.total_inches().into()
    }
}

impl fmt::Display for FeetInches {
    /// Renders as `3'0"`, the way openings are labeled on a takeoff.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqFt);
