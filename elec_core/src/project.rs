//! # Project Data Structures
//!
//! A `Project` groups labelled calculations for one job so they can be
//! serialized together and evaluated in one pass. The library never writes
//! projects anywhere; callers decide what to do with the JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, designer, job info, timestamps)
//! ├── settings: ProjectSettings (code edition, unit system)
//! └── items: BTreeMap<Uuid, CalculationItem>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use elec_core::project::Project;
//!
//! let project = Project::new("Jane Designer", "25-042", "ACME Homes");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::errors::CalcResult;
use crate::tables::CODE_EDITION;
use crate::units::UnitSystem;

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items live in a UUID-keyed ordered map, so iteration (and therefore
/// [`Project::calculate_all`]) has a stable order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    #[serde(default)]
    pub settings: ProjectSettings,

    /// All calculation items, keyed by UUID
    #[serde(default)]
    pub items: BTreeMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use elec_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.designer, "John Doe");
    /// assert_eq!(project.item_count(), 0);
    /// ```
    pub fn new(designer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                designer: designer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            items: BTreeMap::new(),
        }
    }

    /// Add a calculation item. Returns the UUID assigned to it.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Mutable access to an item. Marks the project as modified when found.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Evaluate every item independently, in key order.
    ///
    /// A failing item does not stop the others; each entry carries its own
    /// result or error.
    pub fn calculate_all(&self) -> Vec<ItemOutcome> {
        self.items
            .iter()
            .map(|(id, item)| {
                let result = item.calculate();
                debug!(%id, calc_type = item.calc_type(), ok = result.is_ok(), "project item");
                ItemOutcome {
                    id: *id,
                    label: item.label().to_string(),
                    calc_type: item.calc_type(),
                    result,
                }
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Outcome of one item in [`Project::calculate_all`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemOutcome {
    pub id: Uuid,
    pub label: String,
    pub calc_type: &'static str,
    pub result: CalcResult<CalculationOutput>,
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Person responsible for the design
    pub designer: String,

    /// Job/project number
    pub job_id: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// Project-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Wiring code edition the tables come from
    pub code: String,

    /// Preferred unit system for display
    pub unit_system: UnitSystem,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            code: CODE_EDITION.to_string(),
            unit_system: UnitSystem::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::range::{RangeInput, RangePolicy};
    use crate::calculations::voltage_drop::VoltageDropInput;
    use crate::loads::{ApplianceKind, ApplianceRow};

    fn range_item(label: &str, kw: f64) -> CalculationItem {
        CalculationItem::Range(RangeInput {
            label: label.to_string(),
            appliances: vec![ApplianceRow::new(ApplianceKind::Range, kw, 1)],
            voltage: 240.0,
            policy: RangePolicy::default(),
        })
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("Test Designer", "25-001", "Test Client");
        assert_eq!(project.meta.designer, "Test Designer");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.code, CODE_EDITION);
        assert!(project.items.is_empty());
    }

    #[test]
    fn test_add_and_remove_item() {
        let mut project = Project::default();
        let id = project.add_item(range_item("R-1", 12.0));
        assert!(project.get_item(&id).is_some());
        assert!(project.get_item_mut(&id).is_some());
        assert!(project.remove_item(&id).is_some());
        assert!(project.remove_item(&id).is_none());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_calculate_all_is_independent_and_ordered() {
        let mut project = Project::default();
        project.add_item(range_item("good", 12.0));
        project.add_item(range_item("too big", 30.0));
        project.add_item(CalculationItem::VoltageDrop(VoltageDropInput {
            label: "empty".to_string(),
            unit_system: UnitSystem::Metric,
            circuits: vec![],
        }));

        let outcomes = project.calculate_all();
        assert_eq!(outcomes.len(), 3);
        let ids: Vec<Uuid> = outcomes.iter().map(|o| o.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        let failed: Vec<&str> = outcomes.iter().filter(|o| o.result.is_err()).map(|o| o.label.as_str()).collect();
        assert_eq!(failed, vec!["too big"]);

        // Same project, same answers
        assert_eq!(outcomes, project.calculate_all());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Designer", "25-002", "Client");
        project.add_item(range_item("R-1", 14.0));
        let json = serde_json::to_string_pretty(&project).unwrap();
        let restored: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.item_count(), 1);
        assert_eq!(restored.meta.job_id, "25-002");
        assert_eq!(restored.items.values().next().unwrap().label(), "R-1");
    }
}
