//! Template lookup and rendering
//!
//! This module provides:
//! - The fixed catalog of templates per component type
//! - Template sources (built-in or a local directory)
//! - The render context built from a component config
//! - Single-pass placeholder substitution

pub mod catalog;
pub mod context;
pub mod render;
pub mod store;

pub use catalog::{artifacts_for, template_spec, ArtifactKind, TemplateSpec};
pub use context::RenderContext;
pub use render::{render, DEFAULT_DELIMITER};
pub use store::{TemplateSource, TEMPLATE_DIR_ENV};
