//! Component type selection

use crate::error::GenerateError;
use std::fmt;
use std::str::FromStr;

/// Supported component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    State,
    Deviation,
    Stats,
    Toggle,
    Chart,
    Dashtable,
}

impl ComponentType {
    /// All types, in the order they are offered to the user
    pub const ALL: [ComponentType; 6] = [
        ComponentType::State,
        ComponentType::Deviation,
        ComponentType::Stats,
        ComponentType::Toggle,
        ComponentType::Chart,
        ComponentType::Dashtable,
    ];

    /// Identifier used on the command line and in template names
    pub fn id(&self) -> &'static str {
        match self {
            ComponentType::State => "state",
            ComponentType::Deviation => "deviation",
            ComponentType::Stats => "stats",
            ComponentType::Toggle => "toggle",
            ComponentType::Chart => "chart",
            ComponentType::Dashtable => "dashtable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ComponentType::State => "State Component (for real-time values)",
            ComponentType::Deviation => "Deviation Component (for deviation control)",
            ComponentType::Stats => "Statistics Component (watching stats)",
            ComponentType::Toggle => "Toggle Component (for boolean controls)",
            ComponentType::Chart => "Chart Component (for time-series data)",
            ComponentType::Dashtable => "Dashtable Container (for layout)",
        }
    }

    /// Whether this type is generated from a user config file
    pub fn needs_config(&self) -> bool {
        !matches!(self, ComponentType::Dashtable)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ComponentType {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GenerateError::UnknownComponentType(s.to_string()))
    }
}
