//! Nested controller report: controller id → section name → field → value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field label → raw trimmed value, within one section.
pub type FieldMap = BTreeMap<String, String>;

/// Section name → fields, within one controller.
pub type SectionMap = BTreeMap<String, FieldMap>;

/// Section hierarchy recovered from the adapter information report.
///
/// Keys are kept sorted so serialized output is deterministic.
///
/// # Examples
///
/// ```
/// use megaraid_core::SectionTree;
///
/// let mut tree = SectionTree::default();
/// tree.open_controller("0");
/// tree.open_section("0", "Versions");
/// tree.insert_field("0", "Versions", "FW Package Build", "23.34.0-0019");
///
/// assert_eq!(tree.field("0", "Versions", "FW Package Build"), Some("23.34.0-0019"));
/// assert!(tree.controller("1").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionTree {
    controllers: BTreeMap<String, SectionMap>,
}

impl SectionTree {
    /// Starts a controller with an empty section map, replacing any earlier
    /// controller with the same id.
    pub fn open_controller(&mut self, id: &str) {
        self.controllers.insert(id.to_string(), SectionMap::new());
    }

    /// Opens `section` under controller `id` with an empty field map.
    ///
    /// A repeated section name starts over: the last opened section wins.
    pub fn open_section(&mut self, id: &str, section: &str) {
        self.controllers
            .entry(id.to_string())
            .or_default()
            .insert(section.to_string(), FieldMap::new());
    }

    pub fn insert_field(&mut self, id: &str, section: &str, field: &str, value: &str) {
        self.controllers
            .entry(id.to_string())
            .or_default()
            .entry(section.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    /// Returns the section map of one controller.
    pub fn controller(&self, id: &str) -> Option<&SectionMap> {
        self.controllers.get(id)
    }

    pub fn field(&self, id: &str, section: &str, field: &str) -> Option<&str> {
        self.controllers
            .get(id)?
            .get(section)?
            .get(field)
            .map(String::as_str)
    }

    pub fn controller_ids(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
