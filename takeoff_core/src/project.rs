//! # Project Files
//!
//! A `TakeoffProject` wraps one [`ProjectInput`] with the metadata an
//! estimating office needs to file it. Projects serialize to `.lbr` files
//! as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! TakeoffProject
//! ├── meta: ProjectMetadata (schema version, estimator, job id, timestamps)
//! ├── settings: ProjectSettings (lumber catalog)
//! └── input: ProjectInput (what the engine reads)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::project::TakeoffProject;
//! use takeoff_core::input::ProjectInput;
//! use takeoff_core::units::FeetInches;
//!
//! let input = ProjectInput::single_room(FeetInches::new(20.0, 0.0), FeetInches::new(15.0, 0.0));
//! let project = TakeoffProject::new("Pat Estimator", "26-014").with_input(input);
//!
//! let items = project.calculate();
//! assert!(!items.is_empty());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{calculate_takeoff_with, MaterialItem};
use crate::input::ProjectInput;
use crate::materials::LumberCatalog;

/// Current schema version for .lbr files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// File extension for project files
pub const PROJECT_EXTENSION: &str = "lbr";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeoffProject {
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: ProjectSettings,

    pub input: ProjectInput,
}

impl TakeoffProject {
    /// Create a project around an empty input form.
    pub fn new(estimator: impl Into<String>, job_id: impl Into<String>) -> Self {
        let now = Utc::now();
        TakeoffProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            input: ProjectInput::default(),
        }
    }

    /// Wrap a bare input (e.g. posted by a form) in fresh metadata.
    pub fn from_input(input: ProjectInput) -> Self {
        TakeoffProject::new("", "").with_input(input)
    }

    pub fn with_input(mut self, input: ProjectInput) -> Self {
        self.input = input;
        self.touch();
        self
    }

    /// Display name for reports and export files.
    pub fn name(&self) -> Option<&str> {
        self.input
            .project_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Run the takeoff with this project's catalog.
    pub fn calculate(&self) -> Vec<MaterialItem> {
        calculate_takeoff_with(&self.input, &self.settings.catalog)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for TakeoffProject {
    fn default() -> Self {
        TakeoffProject::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Who ran the takeoff
    pub estimator: String,

    /// Job/bid number
    pub job_id: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Per-project settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Stock lengths and sheet size used for rounding
    #[serde(default)]
    pub catalog: LumberCatalog,
}
