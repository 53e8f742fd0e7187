//! Destination paths for generated artifacts
//!
//! Paths are relative to the host project root and depend only on the
//! component type, the artifact kind and the component name.

use crate::component::ComponentType;
use crate::config::DASHTABLE_NAME;
use crate::templates::ArtifactKind;
use std::path::PathBuf;

/// Directory for generated UI components
pub const COMPONENT_DIR: &str = "src/components/microlab";
/// Directory for generated API routes
pub const API_DIR: &str = "src/app/api/microlab";

const EXTENSION: &str = "js";
const STATS_SUFFIX: &str = "Statistics";
const STATS_SEGMENT: &str = "statistics";

/// File stem of the UI component, also used as its import name
pub fn component_stem(component_type: ComponentType, component_name: &str) -> String {
    match component_type {
        ComponentType::Dashtable => DASHTABLE_NAME.to_string(),
        ComponentType::Stats => format!("{}{}", component_name, STATS_SUFFIX),
        _ => component_name.to_string(),
    }
}

/// URL path of the API route, e.g. `/api/microlab/boiler/statistics`.
/// `None` for types without an API artifact.
pub fn api_endpoint(component_type: ComponentType, component_name: &str) -> Option<String> {
    api_segments(component_type, component_name)
        .map(|segments| format!("/api/microlab/{}", segments.join("/")))
}

/// Relative destination of an artifact, or `None` when the type has no such
/// artifact
pub fn resolve(
    component_type: ComponentType,
    kind: ArtifactKind,
    component_name: &str,
) -> Option<PathBuf> {
    match kind {
        ArtifactKind::Component => {
            let stem = component_stem(component_type, component_name);
            Some(PathBuf::from(COMPONENT_DIR).join(format!("{}.{}", stem, EXTENSION)))
        }
        ArtifactKind::Api => {
            let mut path = PathBuf::from(API_DIR);
            path.extend(api_segments(component_type, component_name)?);
            Some(path.join(format!("route.{}", EXTENSION)))
        }
    }
}

/// Route segments below the API directory. Statistics routes are a
/// sub-resource of the component route.
fn api_segments(component_type: ComponentType, component_name: &str) -> Option<Vec<String>> {
    let lower = component_name.to_lowercase();
    match component_type {
        ComponentType::Dashtable => None,
        ComponentType::Stats => Some(vec![lower, STATS_SEGMENT.to_string()]),
        _ => Some(vec![lower]),
    }
}
