//! Component configuration
//!
//! A component config is a small JSON or YAML document describing one
//! component instance. [`load`] reads and normalizes it into a
//! [`ComponentConfig`]; `dashtable` components use [`ComponentConfig::dashtable`]
//! instead since they have no config file.

mod loader;

pub use loader::{load, sanitize_topic};

use std::collections::BTreeMap;

/// Fixed name of the dashtable container component
pub const DASHTABLE_NAME: &str = "Dashtable";

pub const DEFAULT_ICON: &str = "Activity";
pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 2000;

/// Normalized component settings, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentConfig {
    pub component_name: String,
    pub mqtt_topic: String,
    pub label: String,
    pub unit: String,
    pub icon: String,
    pub polling_interval: u64,
    pub setpoint: Option<serde_yaml::Number>,
    pub max_deviation: Option<serde_yaml::Number>,
    /// `schema` serialized as pretty-printed JSON
    pub schema: String,
    /// Remaining top-level keys, already converted to text
    pub extra: BTreeMap<String, String>,
}

impl ComponentConfig {
    /// Config for a component that only has a name, with every default applied
    pub fn named(name: impl Into<String>) -> Self {
        let component_name = name.into();
        Self {
            label: component_name.clone(),
            component_name,
            mqtt_topic: String::new(),
            unit: String::new(),
            icon: DEFAULT_ICON.to_string(),
            polling_interval: DEFAULT_POLLING_INTERVAL_MS,
            setpoint: None,
            max_deviation: None,
            schema: "{}".to_string(),
            extra: BTreeMap::new(),
        }
    }

    pub fn dashtable() -> Self {
        Self::named(DASHTABLE_NAME)
    }

    pub fn component_name_lower(&self) -> String {
        self.component_name.to_lowercase()
    }
}
