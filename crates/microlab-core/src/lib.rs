//! Microlab Core - component generation for Next.js dashboards
//!
//! This library renders Microlab component templates (a UI component and,
//! for most types, an API route) into a host project's source tree and makes
//! sure the project declares the packages the generated code imports.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Config loading, template catalog and
//!   rendering, output paths, writing files, dependency reconciliation
//! - **Layer 2: Workflow Orchestration** - [`generator::generate`] runs one
//!   component through the whole pipeline and returns a report
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use microlab_core::{generator, ComponentType, CommandInstaller, GenerateOptions, TemplateSource};
//!
//! let config = generator::load_config(ComponentType::Chart, Some(path)).await?;
//! let options = GenerateOptions::new(project_dir, TemplateSource::Embedded);
//! let report = generator::generate(ComponentType::Chart, &config, &options, Some(&CommandInstaller::new())).await?;
//! ```

pub mod component;
pub mod config;
pub mod deps;
pub mod error;
pub mod generator;
pub mod output;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use component::ComponentType;
pub use config::ComponentConfig;
pub use deps::{CommandInstaller, DependencyReport, Installer};
pub use error::GenerateError;
pub use generator::{GenerateOptions, GenerationReport};
pub use templates::{render, ArtifactKind, RenderContext, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
