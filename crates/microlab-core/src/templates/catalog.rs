//! Fixed table of templates per component type

use crate::component::ComponentType;
use std::fmt;

/// Kind of file an artifact becomes in the host project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// UI component under the components directory
    Component,
    /// Next.js API route
    Api,
}

impl ArtifactKind {
    pub fn key(&self) -> &'static str {
        match self {
            ArtifactKind::Component => "component",
            ArtifactKind::Api => "api",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Template identifiers required by one component type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSpec {
    pub component: &'static str,
    pub api: Option<&'static str>,
}

impl TemplateSpec {
    /// Artifacts in generation order: component first, then api
    pub fn artifacts(&self) -> Vec<(ArtifactKind, &'static str)> {
        let mut artifacts = vec![(ArtifactKind::Component, self.component)];
        if let Some(api) = self.api {
            artifacts.push((ArtifactKind::Api, api));
        }
        artifacts
    }

    pub fn template_for(&self, kind: ArtifactKind) -> Option<&'static str> {
        match kind {
            ArtifactKind::Component => Some(self.component),
            ArtifactKind::Api => self.api,
        }
    }
}

pub fn template_spec(component_type: ComponentType) -> TemplateSpec {
    match component_type {
        ComponentType::State => TemplateSpec {
            component: "state-component.js",
            api: Some("state-api.js"),
        },
        ComponentType::Deviation => TemplateSpec {
            component: "deviation-component.js",
            api: Some("deviation-api.js"),
        },
        ComponentType::Stats => TemplateSpec {
            component: "stats-component.js",
            api: Some("stats-api.js"),
        },
        ComponentType::Toggle => TemplateSpec {
            component: "toggle-component.js",
            api: Some("toggle-api.js"),
        },
        ComponentType::Chart => TemplateSpec {
            component: "chart-component.js",
            api: Some("chart-api.js"),
        },
        ComponentType::Dashtable => TemplateSpec {
            component: "dashtable-component.js",
            api: None,
        },
    }
}

/// Artifact keys and template identifiers for a component type
pub fn artifacts_for(component_type: ComponentType) -> Vec<(ArtifactKind, &'static str)> {
    template_spec(component_type).artifacts()
}
