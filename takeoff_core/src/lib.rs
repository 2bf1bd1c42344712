//! # takeoff_core - Stick-Framing Material Takeoff Engine
//!
//! `takeoff_core` is the computational heart of Lumberly. It turns a
//! description of a stick-framed building (footprint, rooms, openings,
//! optional roof) into an ordered bill of materials an estimator can price.
//! It is a quick, repeatable takeoff, not a structural design: there are no
//! span tables and no code checks.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the engine is a pure function of its input
//! - **JSON-First**: every input and output type implements Serialize/Deserialize
//! - **Infallible core**: validation and I/O errors live outside the engine
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::{calculate_takeoff, ProjectInput};
//! use takeoff_core::units::FeetInches;
//!
//! let input = ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0));
//! input.validate().unwrap();
//!
//! for item in calculate_takeoff(&input) {
//!     println!("{:>5} {:<7} {}", item.quantity, item.unit, item.description);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`input`] - Project input, options, and validation
//! - [`calculations`] - The takeoff engine (geometry, floor, walls, openings, roof)
//! - [`materials`] - Lumber sizes and the stock-length catalog
//! - [`units`] - Feet / inches conversions
//! - [`project`] - Project file container and metadata
//! - [`file_io`] - Atomic saves and file locking
//! - [`export`] - CSV, text table, and JSON report output
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod input;
pub mod materials;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_takeoff, calculate_takeoff_with, MaterialItem, MaterialUnit};
pub use errors::{TakeoffError, TakeoffResult};
pub use file_io::{load_project, save_project, FileLock};
pub use input::ProjectInput;
pub use project::{ProjectMetadata, TakeoffProject};
