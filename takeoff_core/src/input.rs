//! # Project Input
//!
//! The takeoff engine's sole input: footprint, rooms, framing options,
//! openings, and an optional roof. The JSON shape uses camelCase keys so a
//! form front-end can post its state as-is.
//!
//! Optional fields fall back to the documented defaults on deserialize:
//! 10% waste, 16" OC for every spacing (or the legacy `studSpacing` when
//! present), sill height 0, quantity 1, and `false` for every flag. Room and
//! opening ids are any string; a fresh UUID is generated when absent.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "projectName": "Garage addition",
//!   "rooms": [
//!     { "lengthFt": 20, "lengthIn": 0, "widthFt": 15, "widthIn": 0,
//!       "ceilingHeightFt": 8, "partitionWalls": 0 }
//!   ],
//!   "overallLengthFt": 20, "overallLengthIn": 0,
//!   "overallWidthFt": 15, "overallWidthIn": 0,
//!   "isAddition": false,
//!   "tieInDirection": "width",
//!   "floorSpacing": 16, "wallSpacing": 16, "roofSpacing": 24,
//!   "joistDirection": "along-width",
//!   "roof": { "includeRoof": true, "roofType": "gable", "pitch": 5,
//!             "ridgeDirection": "length", "overhang": 18, "rafterSize": "2x8",
//!             "ridgeBoard": true, "ceilingType": "flat" },
//!   "openings": [
//!     { "type": "door", "widthFt": 3, "widthIn": 0, "heightFt": 6, "heightIn": 8,
//!       "sillHeightFt": 0, "sillHeightIn": 0, "quantity": 1 }
//!   ],
//!   "wasteFactorPct": 10
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TakeoffError, TakeoffResult};
use crate::materials::LumberSize;
use crate::units::FeetInches;

/// Default waste allowance applied to sheet goods (percent)
pub const DEFAULT_WASTE_PCT: f64 = 10.0;

/// Upper bound on the waste allowance (percent)
pub const MAX_WASTE_PCT: f64 = 50.0;

/// Minimum stud length ordered, regardless of room ceiling heights (feet)
pub const MIN_CEILING_HEIGHT_FT: f64 = 8.0;

/// Tallest ceiling height the form offers (feet)
pub const MAX_CEILING_HEIGHT_FT: f64 = 12.0;

// ============================================================================
// Enumerated options
// ============================================================================

/// On-center spacing for joists, studs, or rafters. Serialized as inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FramingSpacing {
    Oc12,
    #[default]
    Oc16,
    Oc24,
}

impl FramingSpacing {
    pub const ALL: [FramingSpacing; 3] = [FramingSpacing::Oc12, FramingSpacing::Oc16, FramingSpacing::Oc24];

    pub fn inches(self) -> f64 {
        f64::from(u32::from(self))
    }
}

impl From<FramingSpacing> for u32 {
    fn from(spacing: FramingSpacing) -> u32 {
        match spacing {
            FramingSpacing::Oc12 => 12,
            FramingSpacing::Oc16 => 16,
            FramingSpacing::Oc24 => 24,
        }
    }
}

impl TryFrom<u32> for FramingSpacing {
    type Error = String;

    fn try_from(inches: u32) -> Result<Self, Self::Error> {
        match inches {
            12 => Ok(FramingSpacing::Oc12),
            16 => Ok(FramingSpacing::Oc16),
            24 => Ok(FramingSpacing::Oc24),
            other => Err(format!("spacing must be 12, 16, or 24 inches, got {}", other)),
        }
    }
}

impl fmt::Display for FramingSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u32::from(*self))
    }
}

/// A footprint axis. Used for the tie-in wall of an addition and for the
/// ridge line of the roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Length,
    #[default]
    Width,
}

/// Which footprint dimension the floor joists run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoistDirection {
    AlongLength,
    #[default]
    AlongWidth,
}

/// Coarse count of interior walls a room contributes. Serialized as 0, 1, or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PartitionWalls {
    /// No interior walls
    #[default]
    None,
    /// One typical wall, sized to the shorter room dimension
    One,
    /// An L-shaped pair, sized to length + width
    Two,
}

impl From<PartitionWalls> for u8 {
    fn from(walls: PartitionWalls) -> u8 {
        match walls {
            PartitionWalls::None => 0,
            PartitionWalls::One => 1,
            PartitionWalls::Two => 2,
        }
    }
}

impl TryFrom<u8> for PartitionWalls {
    type Error = String;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        match count {
            0 => Ok(PartitionWalls::None),
            1 => Ok(PartitionWalls::One),
            2 => Ok(PartitionWalls::Two),
            other => Err(format!("partitionWalls must be 0, 1, or 2, got {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    #[default]
    Door,
    Window,
}

impl fmt::Display for OpeningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningType::Door => write!(f, "door"),
            OpeningType::Window => write!(f, "window"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofType {
    Shed,
    #[default]
    Gable,
}

impl fmt::Display for RoofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoofType::Shed => write!(f, "shed"),
            RoofType::Gable => write!(f, "gable"),
        }
    }
}

/// Roof slope as inches of rise per 12 of run. Serialized as the rise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoofPitch {
    P3,
    P4,
    #[default]
    P5,
    P6,
}

impl RoofPitch {
    pub const ALL: [RoofPitch; 4] = [RoofPitch::P3, RoofPitch::P4, RoofPitch::P5, RoofPitch::P6];

    /// Rise in inches per 12 inches of run
    pub fn rise(self) -> f64 {
        f64::from(u8::from(self))
    }

    /// Position in [`RoofPitch::ALL`]
    pub fn index(self) -> usize {
        match self {
            RoofPitch::P3 => 0,
            RoofPitch::P4 => 1,
            RoofPitch::P5 => 2,
            RoofPitch::P6 => 3,
        }
    }
}

impl From<RoofPitch> for u8 {
    fn from(pitch: RoofPitch) -> u8 {
        match pitch {
            RoofPitch::P3 => 3,
            RoofPitch::P4 => 4,
            RoofPitch::P5 => 5,
            RoofPitch::P6 => 6,
        }
    }
}

impl TryFrom<u8> for RoofPitch {
    type Error = String;

    fn try_from(rise: u8) -> Result<Self, Self::Error> {
        match rise {
            3 => Ok(RoofPitch::P3),
            4 => Ok(RoofPitch::P4),
            5 => Ok(RoofPitch::P5),
            6 => Ok(RoofPitch::P6),
            other => Err(format!("pitch must be 3 through 6 (per 12), got {}", other)),
        }
    }
}

impl fmt::Display for RoofPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Rafter tail overhang past the wall. Serialized as inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Overhang {
    In12,
    #[default]
    In18,
    In24,
}

impl Overhang {
    pub fn feet(self) -> f64 {
        f64::from(u32::from(self)) / 12.0
    }
}

impl From<Overhang> for u32 {
    fn from(overhang: Overhang) -> u32 {
        match overhang {
            Overhang::In12 => 12,
            Overhang::In18 => 18,
            Overhang::In24 => 24,
        }
    }
}

impl TryFrom<u32> for Overhang {
    type Error = String;

    fn try_from(inches: u32) -> Result<Self, Self::Error> {
        match inches {
            12 => Ok(Overhang::In12),
            18 => Ok(Overhang::In18),
            24 => Ok(Overhang::In24),
            other => Err(format!("overhang must be 12, 18, or 24 inches, got {}", other)),
        }
    }
}

/// Rafter stock offered for stick-framed roofs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RafterSize {
    #[serde(rename = "2x6")]
    R2x6,
    #[default]
    #[serde(rename = "2x8")]
    R2x8,
    #[serde(rename = "2x10")]
    R2x10,
}

impl RafterSize {
    pub fn lumber(self) -> LumberSize {
        match self {
            RafterSize::R2x6 => LumberSize::L2x6,
            RafterSize::R2x8 => LumberSize::L2x8,
            RafterSize::R2x10 => LumberSize::L2x10,
        }
    }

    /// Ridge board stock: one size deeper than 2x6 rafters, 2x10 otherwise.
    pub fn ridge_board(self) -> LumberSize {
        match self {
            RafterSize::R2x6 => LumberSize::L2x8,
            RafterSize::R2x8 | RafterSize::R2x10 => LumberSize::L2x10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CeilingType {
    #[default]
    Flat,
    Cathedral,
}

// ============================================================================
// Rooms and openings
// ============================================================================

/// One room of the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Client-assigned key; any string, a fresh UUID when absent
    #[serde(default = "new_id")]
    pub id: String,
    pub length_ft: f64,
    #[serde(default)]
    pub length_in: f64,
    pub width_ft: f64,
    #[serde(default)]
    pub width_in: f64,
    /// One of 8.0, 8.5, ... 12.0
    #[serde(default = "default_ceiling_height")]
    pub ceiling_height_ft: f64,
    #[serde(default)]
    pub partition_walls: PartitionWalls,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_ceiling_height() -> f64 {
    MIN_CEILING_HEIGHT_FT
}

impl Room {
    /// A room with an 8' ceiling and no partitions.
    pub fn new(length: FeetInches, width: FeetInches) -> Self {
        Room {
            id: new_id(),
            length_ft: length.feet,
            length_in: length.inches,
            width_ft: width.feet,
            width_in: width.inches,
            ceiling_height_ft: MIN_CEILING_HEIGHT_FT,
            partition_walls: PartitionWalls::None,
        }
    }

    pub fn with_ceiling_height(mut self, height_ft: f64) -> Self {
        self.ceiling_height_ft = height_ft;
        self
    }

    pub fn with_partitions(mut self, partitions: PartitionWalls) -> Self {
        self.partition_walls = partitions;
        self
    }

    pub fn length(&self) -> FeetInches {
        FeetInches::new(self.length_ft, self.length_in)
    }

    pub fn width(&self) -> FeetInches {
        FeetInches::new(self.width_ft, self.width_in)
    }
}

/// A door or window, possibly repeated `quantity` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    /// Client-assigned key; any string, a fresh UUID when absent
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OpeningType,
    pub width_ft: f64,
    #[serde(default)]
    pub width_in: f64,
    pub height_ft: f64,
    #[serde(default)]
    pub height_in: f64,
    /// Zero for doors
    #[serde(default)]
    pub sill_height_ft: f64,
    #[serde(default)]
    pub sill_height_in: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Opening {
    /// A single door with no sill.
    pub fn door(width: FeetInches, height: FeetInches) -> Self {
        Opening {
            id: new_id(),
            kind: OpeningType::Door,
            width_ft: width.feet,
            width_in: width.inches,
            height_ft: height.feet,
            height_in: height.inches,
            sill_height_ft: 0.0,
            sill_height_in: 0.0,
            quantity: 1,
        }
    }

    /// A single window set `sill` above the floor.
    pub fn window(width: FeetInches, height: FeetInches, sill: FeetInches) -> Self {
        Opening {
            kind: OpeningType::Window,
            sill_height_ft: sill.feet,
            sill_height_in: sill.inches,
            ..Opening::door(width, height)
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn width(&self) -> FeetInches {
        FeetInches::new(self.width_ft, self.width_in)
    }

    pub fn height(&self) -> FeetInches {
        FeetInches::new(self.height_ft, self.height_in)
    }

    pub fn sill_height(&self) -> FeetInches {
        FeetInches::new(self.sill_height_ft, self.sill_height_in)
    }

    /// Quantity with 0 read as 1
    pub fn effective_quantity(&self) -> u32 {
        if self.quantity == 0 {
            1
        } else {
            self.quantity
        }
    }
}

// ============================================================================
// Roof
// ============================================================================

/// Stick-framed roof options. Ignored unless `include_roof` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoofConfig {
    pub include_roof: bool,
    pub roof_type: RoofType,
    pub pitch: RoofPitch,
    pub ridge_direction: Axis,
    /// Ridge follows the floor joists instead of `ridge_direction`
    pub reverse_gable: bool,
    pub overhang: Overhang,
    pub rafter_size: RafterSize,
    /// Gable roofs only
    pub ridge_board: bool,
    pub ceiling_type: CeilingType,
}

impl Default for RoofConfig {
    fn default() -> Self {
        RoofConfig {
            include_roof: false,
            roof_type: RoofType::Gable,
            pitch: RoofPitch::P5,
            ridge_direction: Axis::Length,
            reverse_gable: false,
            overhang: Overhang::In18,
            rafter_size: RafterSize::R2x8,
            ridge_board: true,
            ceiling_type: CeilingType::Flat,
        }
    }
}

impl RoofConfig {
    /// The default roof, switched on.
    pub fn included() -> Self {
        RoofConfig {
            include_roof: true,
            ..RoofConfig::default()
        }
    }
}

// ============================================================================
// ProjectInput
// ============================================================================

/// Everything the takeoff engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    pub rooms: Vec<Room>,

    /// Footprint used for floor and roof framing
    pub overall_length_ft: f64,
    #[serde(default)]
    pub overall_length_in: f64,
    pub overall_width_ft: f64,
    #[serde(default)]
    pub overall_width_in: f64,

    /// Ties into an existing building on one side
    #[serde(default)]
    pub is_addition: bool,
    /// The side that ties in; excluded from the exterior perimeter
    #[serde(default)]
    pub tie_in_direction: Axis,

    /// Per-member spacing; unset falls back to `stud_spacing`, then 16" OC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_spacing: Option<FramingSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_spacing: Option<FramingSpacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_spacing: Option<FramingSpacing>,
    /// Single spacing for every member, as older forms submit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stud_spacing: Option<FramingSpacing>,

    #[serde(default)]
    pub joist_direction: JoistDirection,

    #[serde(default)]
    pub roof: RoofConfig,

    #[serde(default)]
    pub openings: Vec<Opening>,

    #[serde(default = "default_waste_pct")]
    pub waste_factor_pct: f64,

    #[serde(default)]
    pub include_second_floor: bool,
    #[serde(default)]
    pub pt_rim_joist_at_grade: bool,
}

fn default_waste_pct() -> f64 {
    DEFAULT_WASTE_PCT
}

impl Default for ProjectInput {
    /// An empty form: one zero-size room, 16" OC, 10% waste, no roof.
    fn default() -> Self {
        ProjectInput {
            project_name: None,
            rooms: vec![Room::new(FeetInches::default(), FeetInches::default())],
            overall_length_ft: 0.0,
            overall_length_in: 0.0,
            overall_width_ft: 0.0,
            overall_width_in: 0.0,
            is_addition: false,
            tie_in_direction: Axis::Width,
            floor_spacing: None,
            wall_spacing: None,
            roof_spacing: None,
            stud_spacing: None,
            joist_direction: JoistDirection::AlongWidth,
            roof: RoofConfig::default(),
            openings: Vec::new(),
            waste_factor_pct: DEFAULT_WASTE_PCT,
            include_second_floor: false,
            pt_rim_joist_at_grade: false,
        }
    }
}

impl ProjectInput {
    /// A single-room building whose footprint matches the room.
    ///
    /// ```rust
    /// use takeoff_core::input::ProjectInput;
    /// use takeoff_core::units::FeetInches;
    ///
    /// let input = ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0));
    /// assert_eq!(input.rooms.len(), 1);
    /// assert!(input.validate().is_ok());
    /// ```
    pub fn single_room(length: FeetInches, width: FeetInches) -> Self {
        ProjectInput {
            rooms: vec![Room::new(length, width)],
            ..ProjectInput::default()
        }
        .with_footprint(length, width)
    }

    pub fn with_footprint(mut self, length: FeetInches, width: FeetInches) -> Self {
        self.overall_length_ft = length.feet;
        self.overall_length_in = length.inches;
        self.overall_width_ft = width.feet;
        self.overall_width_in = width.inches;
        self
    }

    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.openings.push(opening);
        self
    }

    pub fn with_roof(mut self, roof: RoofConfig) -> Self {
        self.roof = roof;
        self
    }

    /// Set floor, wall, and roof spacing together.
    pub fn with_spacing(mut self, spacing: FramingSpacing) -> Self {
        self.floor_spacing = Some(spacing);
        self.wall_spacing = Some(spacing);
        self.roof_spacing = Some(spacing);
        self
    }

    /// Joist spacing in effect.
    pub fn floor_spacing(&self) -> FramingSpacing {
        self.resolve_spacing(self.floor_spacing)
    }

    /// Stud spacing in effect.
    pub fn wall_spacing(&self) -> FramingSpacing {
        self.resolve_spacing(self.wall_spacing)
    }

    /// Rafter and ceiling joist spacing in effect.
    pub fn roof_spacing(&self) -> FramingSpacing {
        self.resolve_spacing(self.roof_spacing)
    }

    fn resolve_spacing(&self, member: Option<FramingSpacing>) -> FramingSpacing {
        member.or(self.stud_spacing).unwrap_or_default()
    }

    pub fn overall_length(&self) -> FeetInches {
        FeetInches::new(self.overall_length_ft, self.overall_length_in)
    }

    pub fn overall_width(&self) -> FeetInches {
        FeetInches::new(self.overall_width_ft, self.overall_width_in)
    }

    /// Copy with the waste factor clamped into `0..=50`.
    pub fn normalized(&self) -> Self {
        let mut input = self.clone();
        input.waste_factor_pct = if input.waste_factor_pct.is_finite() {
            input.waste_factor_pct.clamp(0.0, MAX_WASTE_PCT)
        } else {
            DEFAULT_WASTE_PCT
        };
        input
    }

    /// Check the input the way the entry form does before a takeoff is run.
    ///
    /// The engine never calls this; it trusts its input.
    pub fn validate(&self) -> TakeoffResult<()> {
        if self.rooms.is_empty() {
            return Err(TakeoffError::missing_field("rooms"));
        }

        check_positive("overallLength", self.overall_length())?;
        check_positive("overallWidth", self.overall_width())?;

        for (i, room) in self.rooms.iter().enumerate() {
            check_positive(&format!("rooms[{}].length", i), room.length())?;
            check_positive(&format!("rooms[{}].width", i), room.width())?;
            check_ceiling_height(&format!("rooms[{}].ceilingHeightFt", i), room.ceiling_height_ft)?;
        }

        for (i, opening) in self.openings.iter().enumerate() {
            check_positive(&format!("openings[{}].width", i), opening.width())?;
            check_positive(&format!("openings[{}].height", i), opening.height())?;
            check_inches(&format!("openings[{}].sillHeightIn", i), opening.sill_height_in)?;
            if opening.sill_height_ft < 0.0 {
                return Err(TakeoffError::invalid_input(
                    format!("openings[{}].sillHeightFt", i),
                    opening.sill_height_ft.to_string(),
                    "Sill height cannot be negative",
                ));
            }
        }

        if !(0.0..=MAX_WASTE_PCT).contains(&self.waste_factor_pct) {
            return Err(TakeoffError::invalid_input(
                "wasteFactorPct",
                self.waste_factor_pct.to_string(),
                "Waste factor must be between 0 and 50 percent",
            ));
        }

        Ok(())
    }
}

fn check_positive(field: &str, dim: FeetInches) -> TakeoffResult<()> {
    if dim.feet < 0.0 || !dim.feet.is_finite() {
        return Err(TakeoffError::invalid_input(
            format!("{}Ft", field),
            dim.feet.to_string(),
            "Feet must be zero or greater",
        ));
    }
    check_inches(&format!("{}In", field), dim.inches)?;
    if dim.total_inches().value() <= 0.0 {
        return Err(TakeoffError::invalid_input(
            field,
            dim.to_string(),
            "Length and width must be greater than zero",
        ));
    }
    Ok(())
}

fn check_inches(field: &str, inches: f64) -> TakeoffResult<()> {
    if !(0.0..12.0).contains(&inches) {
        return Err(TakeoffError::invalid_input(
            field,
            inches.to_string(),
            "Inches must be at least 0 and less than 12",
        ));
    }
    Ok(())
}

fn check_ceiling_height(field: &str, height_ft: f64) -> TakeoffResult<()> {
    let in_range = (MIN_CEILING_HEIGHT_FT..=MAX_CEILING_HEIGHT_FT).contains(&height_ft);
    let half_step = (height_ft * 2.0).fract() == 0.0;
    if !(in_range && half_step) {
        return Err(TakeoffError::invalid_input(
            field,
            height_ft.to_string(),
            "Ceiling height must be 8' to 12' in 6\" steps",
        ));
    }
    Ok(())
}
