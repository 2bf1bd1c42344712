//! Standard Lumber Sizes
//!
//! Nominal dimension-lumber designations used on a framing takeoff.
//! Only the 2x series appears in stick framing: studs and plates (2x4, 2x6),
//! joists and rafters (2x6 through 2x10), and built-up headers (2x12).

use serde::{Deserialize, Serialize};

/// Standard 2x lumber size designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LumberSize {
    /// 2x4 - partition studs and plates, sills
    #[serde(rename = "2x4")]
    L2x4,
    /// 2x6 - exterior studs and plates, ceiling joists
    #[serde(rename = "2x6")]
    L2x6,
    /// 2x8
    #[serde(rename = "2x8")]
    L2x8,
    /// 2x10 - floor joists and rim
    #[default]
    #[serde(rename = "2x10")]
    L2x10,
    /// 2x12 - opening headers
    #[serde(rename = "2x12")]
    L2x12,
}

impl LumberSize {
    /// Get display name (e.g., "2x10")
    pub fn display_name(&self) -> &'static str {
        match self {
            LumberSize::L2x4 => "2x4",
            LumberSize::L2x6 => "2x6",
            LumberSize::L2x8 => "2x8",
            LumberSize::L2x10 => "2x10",
            LumberSize::L2x12 => "2x12",
        }
    }
}

impl std::fmt::Display for LumberSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
