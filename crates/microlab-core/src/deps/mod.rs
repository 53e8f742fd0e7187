//! Host project dependency handling
//!
//! Generated components import packages the host project may not declare
//! yet. [`ensure_dependencies`] adds what is missing to `package.json` and
//! runs an install. Nothing here can fail a generation run: problems end up
//! as warnings on the returned [`DependencyReport`].

pub mod installer;
pub mod reconcile;

pub use installer::{CommandInstaller, Installer, PackageManager};
pub use reconcile::{
    reconcile, required_dependencies, Conflict, DependencySet, Reconciliation, Requirement,
    Section,
};

use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

/// What happened to the host project's dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    /// Every requirement was already declared
    UpToDate,
    /// Requirements were added and the install command succeeded
    Installed { command: String },
    /// Requirements were added but installing was turned off
    InstallSkipped { command: String },
    /// The manifest could not be read, parsed or written
    ManifestFailed { reason: String },
    /// Requirements were added but the install command failed
    InstallFailed { command: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyReport {
    pub added: Vec<Requirement>,
    pub conflicts: Vec<Conflict>,
    pub status: DependencyStatus,
}

impl DependencyReport {
    /// Warning to surface to the user, if any
    pub fn warning(&self) -> Option<String> {
        match &self.status {
            DependencyStatus::ManifestFailed { reason } => Some(format!(
                "Failed to update dependencies: {}. You may need to install dependencies manually",
                reason
            )),
            DependencyStatus::InstallFailed { command, reason } => Some(format!(
                "Failed to install dependencies: {}. Run `{}` manually",
                reason, command
            )),
            DependencyStatus::InstallSkipped { command } => Some(format!(
                "Dependencies were added to {} but not installed. Run `{}`",
                MANIFEST_FILE, command
            )),
            DependencyStatus::UpToDate | DependencyStatus::Installed { .. } => None,
        }
    }
}

/// Reconcile `required` against the project's manifest, then install when
/// something was added. `installer` is `None` to skip the install step.
pub async fn ensure_dependencies<I: Installer>(
    project_dir: &Path,
    required: &DependencySet,
    installer: Option<&I>,
) -> DependencyReport {
    let manifest_path = project_dir.join(MANIFEST_FILE);

    let reconciliation = match reconcile(required, &manifest_path).await {
        Ok(reconciliation) => reconciliation,
        Err(e) => {
            return DependencyReport {
                added: Vec::new(),
                conflicts: Vec::new(),
                status: DependencyStatus::ManifestFailed {
                    reason: e.to_string(),
                },
            }
        }
    };

    let status = if !reconciliation.changed() {
        DependencyStatus::UpToDate
    } else {
        match installer {
            None => DependencyStatus::InstallSkipped {
                command: PackageManager::detect(project_dir).install_command(),
            },
            Some(installer) => {
                let command = installer.command(project_dir);
                match installer.install(project_dir).await {
                    Ok(()) => DependencyStatus::Installed { command },
                    Err(e) => DependencyStatus::InstallFailed {
                        command,
                        reason: format!("{:#}", e),
                    },
                }
            }
        }
    };

    DependencyReport {
        added: reconciliation.added,
        conflicts: reconciliation.conflicts,
        status,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeInstaller;
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_installs_after_change() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        let installer = FakeInstaller::default();

        let report = ensure_dependencies(dir.path(), &required_dependencies(), Some(&installer)).await;
        assert_eq!(report.added.len(), 6);
        assert_eq!(
            report.status,
            DependencyStatus::Installed {
                command: "fake install".to_string()
            }
        );
        assert_eq!(installer.calls.get(), 1);
        assert!(report.warning().is_none());

        // Second run finds nothing to add and does not install again
        let report = ensure_dependencies(dir.path(), &required_dependencies(), Some(&installer)).await;
        assert_eq!(report.status, DependencyStatus::UpToDate);
        assert_eq!(installer.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_install_failure_is_a_warning() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        let installer = FakeInstaller {
            fail: true,
            ..Default::default()
        };

        let report = ensure_dependencies(dir.path(), &required_dependencies(), Some(&installer)).await;
        assert!(matches!(report.status, DependencyStatus::InstallFailed { .. }));
        assert!(report.warning().unwrap().contains("registry unreachable"));

        // The manifest was still updated
        let manifest = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert!(manifest.contains("\"mqtt\""));
    }

    #[tokio::test]
    async fn test_missing_manifest_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let installer = FakeInstaller::default();

        let report = ensure_dependencies(dir.path(), &required_dependencies(), Some(&installer)).await;
        assert!(matches!(report.status, DependencyStatus::ManifestFailed { .. }));
        assert!(report.warning().unwrap().contains("manually"));
        assert_eq!(installer.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_skip_install() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();

        let report =
            ensure_dependencies::<FakeInstaller>(dir.path(), &required_dependencies(), None).await;
        assert_eq!(
            report.status,
            DependencyStatus::InstallSkipped {
                command: "npm install".to_string()
            }
        );
    }
}
