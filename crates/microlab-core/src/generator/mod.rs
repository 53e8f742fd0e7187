//! The generation pipeline
//!
//! For one component: resolve the templates for its type, render each with
//! the component's context, write it to its destination, then reconcile the
//! host project's dependencies once. Artifacts are handled one at a time.
//!
//! A template that cannot be read skips only its artifact. A write failure
//! aborts the run.

pub mod materialize;
pub mod summary;

pub use materialize::{write_artifact, GeneratedArtifact};
pub use summary::next_steps;

use crate::component::ComponentType;
use crate::config::{self, ComponentConfig};
use crate::deps::{self, DependencyReport, DependencySet, Installer};
use crate::error::{GenerateError, Result};
use crate::output;
use crate::templates::{self, ArtifactKind, RenderContext, TemplateSource};
use std::path::{Path, PathBuf};

/// Where and how to generate
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root of the host project
    pub project_dir: PathBuf,
    pub templates: TemplateSource,
    pub delimiter: String,
    pub dependencies: DependencySet,
}

impl GenerateOptions {
    pub fn new(project_dir: PathBuf, templates: TemplateSource) -> Self {
        Self {
            project_dir,
            templates,
            delimiter: templates::DEFAULT_DELIMITER.to_string(),
            dependencies: deps::required_dependencies(),
        }
    }
}

/// A file written by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub kind: ArtifactKind,
    pub template: &'static str,
    /// Path relative to the project root
    pub relative: PathBuf,
    pub path: PathBuf,
}

/// An artifact left out because its template could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArtifact {
    pub kind: ArtifactKind,
    pub template: &'static str,
    pub reason: String,
}

impl SkippedArtifact {
    pub fn warning(&self) -> String {
        format!("Skipped {} ({}): {}", self.kind, self.template, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub component_type: ComponentType,
    pub config: ComponentConfig,
    pub written: Vec<GeneratedFile>,
    pub skipped: Vec<SkippedArtifact>,
    pub dependencies: DependencyReport,
}

impl GenerationReport {
    /// No file was generated. The run itself still counts as finished.
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    pub fn file(&self, kind: ArtifactKind) -> Option<&GeneratedFile> {
        self.written.iter().find(|f| f.kind == kind)
    }

    /// Every non-fatal problem of the run, in the order it happened
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self.skipped.iter().map(SkippedArtifact::warning).collect();
        warnings.extend(
            self.dependencies
                .conflicts
                .iter()
                .map(|c| format!("Dependency conflict: {}", c)),
        );
        warnings.extend(self.dependencies.warning());
        warnings
    }
}

/// Load the config for a component type. `dashtable` never reads a file.
pub async fn load_config(
    component_type: ComponentType,
    config_path: Option<&Path>,
) -> Result<ComponentConfig> {
    if !component_type.needs_config() {
        return Ok(ComponentConfig::dashtable());
    }
    let path = config_path.ok_or(GenerateError::ConfigRequired(component_type))?;
    config::load(path).await
}

/// Destinations the component would be written to, relative to the project root
pub fn planned_outputs(component_type: ComponentType, component_name: &str) -> Vec<(ArtifactKind, PathBuf)> {
    templates::artifacts_for(component_type)
        .into_iter()
        .filter_map(|(kind, _)| {
            output::resolve(component_type, kind, component_name).map(|path| (kind, path))
        })
        .collect()
}

/// Render and write every artifact of the component.
///
/// Returns the written files and the artifacts skipped for unreadable
/// templates.
pub async fn generate_files(
    component_type: ComponentType,
    config: &ComponentConfig,
    options: &GenerateOptions,
) -> Result<(Vec<GeneratedFile>, Vec<SkippedArtifact>)> {
    let context = RenderContext::for_component(config);
    let mut written = Vec::new();
    let mut skipped = Vec::new();

    for (kind, template) in templates::artifacts_for(component_type) {
        let Some(relative) = output::resolve(component_type, kind, &config.component_name) else {
            continue;
        };

        let text = match options.templates.read(template).await {
            Ok(text) => text,
            Err(e) => {
                skipped.push(SkippedArtifact {
                    kind,
                    template,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let artifact = GeneratedArtifact {
            kind,
            path: relative.clone(),
            content: templates::render(&text, &context, &options.delimiter),
        };
        let path = write_artifact(&options.project_dir, &artifact).await?;

        written.push(GeneratedFile {
            kind,
            template,
            relative,
            path,
        });
    }

    Ok((written, skipped))
}

/// Generate a component and reconcile the host project's dependencies.
///
/// `installer` is `None` to update `package.json` without installing.
pub async fn generate<I: Installer>(
    component_type: ComponentType,
    config: &ComponentConfig,
    options: &GenerateOptions,
    installer: Option<&I>,
) -> Result<GenerationReport> {
    let (written, skipped) = generate_files(component_type, config, options).await?;

    let dependencies =
        deps::ensure_dependencies(&options.project_dir, &options.dependencies, installer).await;

    Ok(GenerationReport {
        component_type,
        config: config.clone(),
        written,
        skipped,
        dependencies,
    })
}
