//! Running the host project's package manager
//!
//! The package manager is picked from the lockfile in the project root and
//! invoked as a subprocess with streamed output.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a package install (10 minutes)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Package managers recognized by their lockfile, in detection order
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Detect from lockfiles in `project_dir`, defaulting to npm
    pub fn detect(project_dir: &Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| project_dir.join(lockfile).exists())
            .map(|(_, manager)| *manager)
            .unwrap_or(PackageManager::Npm)
    }

    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.binary())
    }

    /// Check if the package manager is available in PATH
    pub fn is_available(&self) -> bool {
        std::process::Command::new(self.binary())
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Installs the dependencies declared in a project's manifest
#[allow(async_fn_in_trait)]
pub trait Installer {
    /// Command shown to the user, also used in manual-install guidance
    fn command(&self, project_dir: &Path) -> String;

    async fn install(&self, project_dir: &Path) -> Result<()>;
}

/// Runs `<package manager> install` in the project directory
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    timeout: Duration,
}

impl Default for CommandInstaller {
    fn default() -> Self {
        Self {
            timeout: INSTALL_TIMEOUT,
        }
    }
}

impl CommandInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Installer for CommandInstaller {
    fn command(&self, project_dir: &Path) -> String {
        PackageManager::detect(project_dir).install_command()
    }

    async fn install(&self, project_dir: &Path) -> Result<()> {
        let manager = PackageManager::detect(project_dir);
        if !manager.is_available() {
            anyhow::bail!("{} is not installed or not in PATH", manager);
        }

        let cmd = manager.install_command();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new(manager.binary())
            .arg("install")
            .current_dir(project_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", cmd))?;

        let stdout = child.stdout.take().context("Failed to capture stdout")?;
        let stderr = child.stderr.take().context("Failed to capture stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        // Stream output until both pipes close
        let output_task = async {
            let mut stdout_open = true;
            let mut stderr_open = true;
            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_reader.next_line(), if stdout_open => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line),
                            Ok(None) => stdout_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_open = false;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if stderr_open => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_open = false,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_open = false;
                            }
                        }
                    }
                }
            }
        };

        if timeout(self.timeout, output_task).await.is_err() {
            let _ = child.kill().await;
            println!();
            anyhow::bail!(
                "{} timed out after {} seconds",
                cmd,
                self.timeout.as_secs()
            );
        }

        let status = match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(status) => status.with_context(|| format!("Failed to wait for {}", cmd))?,
            Err(_) => {
                let _ = child.kill().await;
                anyhow::bail!("{} did not exit after closing its output", cmd);
            }
        };

        println!();
        if !status.success() {
            anyhow::bail!(
                "{} failed with exit code: {}",
                cmd,
                status.code().unwrap_or(-1)
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_defaults_to_npm() {
        let dir = TempDir::new().unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Npm);
    }

    #[test]
    fn test_detect_from_lockfile() {
        for (lockfile, expected) in [
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("bun.lockb", PackageManager::Bun),
            ("bun.lock", PackageManager::Bun),
            ("package-lock.json", PackageManager::Npm),
        ] {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join(lockfile), "").unwrap();
            assert_eq!(PackageManager::detect(dir.path()), expected, "{}", lockfile);
        }
    }

    #[test]
    fn test_install_command() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(CommandInstaller::new().command(dir.path()), "yarn install");
    }
}
