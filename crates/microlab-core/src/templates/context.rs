//! Values available to template placeholders

use crate::config::ComponentConfig;
use std::collections::BTreeMap;

/// Flat placeholder name to text mapping for one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context for a component: every config field plus the
    /// derived `componentNameLower` and `componentApi`.
    pub fn for_component(config: &ComponentConfig) -> Self {
        let mut context = Self::new();

        // Passthrough keys first so named fields always win
        for (key, value) in &config.extra {
            context.insert(key.as_str(), value.as_str());
        }

        let lower = config.component_name_lower();
        context.insert("componentName", config.component_name.as_str());
        context.insert("componentNameLower", lower.as_str());
        context.insert("componentApi", lower);
        context.insert("mqttTopic", config.mqtt_topic.as_str());
        context.insert("label", config.label.as_str());
        context.insert("unit", config.unit.as_str());
        context.insert("icon", config.icon.as_str());
        context.insert("pollingInterval", config.polling_interval.to_string());
        context.insert("schema", config.schema.as_str());
        if let Some(setpoint) = &config.setpoint {
            context.insert("setpoint", setpoint.to_string());
        }
        if let Some(max_deviation) = &config.max_deviation {
            context.insert("maxDeviation", max_deviation.to_string());
        }

        context
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
