//! Template asset lookup, from the templates built into the binary or from a
//! local directory

use crate::error::{GenerateError, Result};
use std::path::PathBuf;
use tokio::fs;

/// Environment variable that points the CLI at a local template directory
pub const TEMPLATE_DIR_ENV: &str = "MICROLAB_TEMPLATE_DIR";

/// Templates compiled into the binary, keyed by template identifier
const EMBEDDED: &[(&str, &str)] = &[
    ("state-component.js", include_str!("../../templates/state-component.js")),
    ("state-api.js", include_str!("../../templates/state-api.js")),
    ("deviation-component.js", include_str!("../../templates/deviation-component.js")),
    ("deviation-api.js", include_str!("../../templates/deviation-api.js")),
    ("stats-component.js", include_str!("../../templates/stats-component.js")),
    ("stats-api.js", include_str!("../../templates/stats-api.js")),
    ("toggle-component.js", include_str!("../../templates/toggle-component.js")),
    ("toggle-api.js", include_str!("../../templates/toggle-api.js")),
    ("chart-component.js", include_str!("../../templates/chart-component.js")),
    ("chart-api.js", include_str!("../../templates/chart-api.js")),
    ("dashtable-component.js", include_str!("../../templates/dashtable-component.js")),
];

/// Where template text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    Local(PathBuf),
}

impl TemplateSource {
    /// Use `dir` if given, then `MICROLAB_TEMPLATE_DIR`, then the built-in templates
    pub fn resolve(dir: Option<PathBuf>) -> Self {
        dir.or_else(|| std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from))
            .map(Self::Local)
            .unwrap_or(Self::Embedded)
    }

    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Fetch the raw text of a template
    pub async fn read(&self, template: &str) -> Result<String> {
        match self {
            TemplateSource::Embedded => EMBEDDED
                .iter()
                .find(|(name, _)| *name == template)
                .map(|(_, text)| text.to_string())
                .ok_or_else(|| GenerateError::TemplateRead {
                    template: template.to_string(),
                    reason: "not a built-in template".to_string(),
                }),
            TemplateSource::Local(dir) => {
                let path = dir.join(template);
                fs::read_to_string(&path)
                    .await
                    .map_err(|e| GenerateError::TemplateRead {
                        template: template.to_string(),
                        reason: format!("{}: {}", path.display(), e),
                    })
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded => "built-in templates".to_string(),
            TemplateSource::Local(dir) => format!("local templates from {}", dir.display()),
        }
    }
}
