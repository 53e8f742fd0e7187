//! Merging required dependencies into a host `package.json`

use crate::error::{GenerateError, Result};
use semver::{Op, Version, VersionReq};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use tokio::fs;

/// Section of the manifest a dependency belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dependencies,
    DevDependencies,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Dependencies => "dependencies",
            Section::DevDependencies => "devDependencies",
        }
    }
}

/// One package the generated code needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub section: Section,
    pub name: String,
    pub version: String,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A dependency already declared with a range that does not reach the
/// required version. Left untouched, reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,
    pub declared: String,
    pub required: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is declared as {} but generated code expects {}",
            self.name, self.declared, self.required
        )
    }
}

/// Declarative set of required packages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    requirements: Vec<Requirement>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, section: Section, name: &str, version: &str) -> Self {
        self.requirements.push(Requirement {
            section,
            name: name.to_string(),
            version: version.to_string(),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter()
    }
}

/// Packages used by the generated components and API routes
pub fn required_dependencies() -> DependencySet {
    DependencySet::new()
        .with(Section::Dependencies, "mqtt", "^5.3.5")
        .with(Section::Dependencies, "mongoose", "^8.1.1")
        .with(Section::Dependencies, "recharts", "^2.12.0")
        .with(Section::DevDependencies, "tailwindcss", "^4.0.0")
        .with(Section::DevDependencies, "autoprefixer", "^10.4.17")
        .with(Section::DevDependencies, "postcss", "^8.4.35")
}

/// Result of a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub added: Vec<Requirement>,
    pub conflicts: Vec<Conflict>,
}

impl Reconciliation {
    pub fn changed(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Insert every requirement missing from its section of the manifest.
///
/// Declared entries are never modified. The manifest is only rewritten when
/// something was added, so running this twice leaves the file unchanged the
/// second time.
pub async fn reconcile(required: &DependencySet, manifest_path: &Path) -> Result<Reconciliation> {
    let content = fs::read_to_string(manifest_path)
        .await
        .map_err(|e| manifest_error(manifest_path, e))?;
    let mut manifest: Value =
        serde_json::from_str(&content).map_err(|e| manifest_error(manifest_path, e))?;

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| manifest_error(manifest_path, "top level is not an object"))?;

    let outcome = merge(root, required).map_err(|e| manifest_error(manifest_path, e))?;

    if outcome.changed() {
        let mut text =
            serde_json::to_string_pretty(&manifest).map_err(|e| manifest_error(manifest_path, e))?;
        text.push('\n');
        fs::write(manifest_path, text)
            .await
            .map_err(|e| manifest_error(manifest_path, e))?;
    }

    Ok(outcome)
}

fn merge(root: &mut Map<String, Value>, required: &DependencySet) -> std::result::Result<Reconciliation, String> {
    let mut outcome = Reconciliation::default();

    for requirement in required.iter() {
        let section = root
            .entry(requirement.section.key())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| format!("'{}' is not an object", requirement.section.key()))?;

        match section.get(&requirement.name).cloned() {
            Some(Value::String(declared)) if !declared.is_empty() => {
                if !range_reaches(&declared, &requirement.version) {
                    outcome.conflicts.push(Conflict {
                        name: requirement.name.clone(),
                        declared,
                        required: requirement.version.clone(),
                    });
                }
            }
            Some(Value::Null) | Some(Value::String(_)) | None => {
                section.insert(
                    requirement.name.clone(),
                    Value::String(requirement.version.clone()),
                );
                outcome.added.push(requirement.clone());
            }
            // Non-string specs (e.g. objects) are someone else's business
            Some(_) => {}
        }
    }

    Ok(outcome)
}

/// Whether the lowest version admitted by `declared` satisfies `required`.
/// Ranges semver cannot parse (tags, urls, workspace protocols) are trusted.
fn range_reaches(declared: &str, required: &str) -> bool {
    let (Ok(declared), Ok(required)) = (VersionReq::parse(declared), VersionReq::parse(required))
    else {
        return true;
    };
    match lowest_version(&declared) {
        Some(lowest) => required.matches(&lowest),
        None => true,
    }
}

fn lowest_version(req: &VersionReq) -> Option<Version> {
    let comparator = req.comparators.first()?;
    match comparator.op {
        Op::Exact | Op::GreaterEq | Op::Tilde | Op::Caret | Op::Wildcard => {
            let mut version = Version::new(
                comparator.major,
                comparator.minor.unwrap_or(0),
                comparator.patch.unwrap_or(0),
            );
            version.pre = comparator.pre.clone();
            Some(version)
        }
        _ => None,
    }
}

fn manifest_error(path: &Path, reason: impl ToString) -> GenerateError {
    GenerateError::Manifest {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("package.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_adds_missing_dependencies() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            &dir,
            r#"{"name":"plant-ui","dependencies":{"next":"14.1.0","mqtt":"^5.4.0"}}"#,
        );

        let outcome = reconcile(&required_dependencies(), &path).await.unwrap();
        let added: Vec<_> = outcome.added.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            added,
            vec!["mongoose", "recharts", "tailwindcss", "autoprefixer", "postcss"]
        );
        assert!(outcome.conflicts.is_empty());

        let manifest: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(manifest["dependencies"]["mqtt"], "^5.4.0");
        assert_eq!(manifest["dependencies"]["next"], "14.1.0");
        assert_eq!(manifest["dependencies"]["mongoose"], "^8.1.1");
        assert_eq!(manifest["devDependencies"]["postcss"], "^8.4.35");
    }

    #[tokio::test]
    async fn test_reconcile_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"name":"plant-ui","version":"0.1.0"}"#);

        let first = reconcile(&required_dependencies(), &path).await.unwrap();
        assert!(first.changed());
        let after_first = std::fs::read_to_string(&path).unwrap();

        let second = reconcile(&required_dependencies(), &path).await.unwrap();
        assert!(!second.changed());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after_first);
    }

    #[tokio::test]
    async fn test_unchanged_manifest_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let compact = r#"{"dependencies":{"a":"1.0.0"}}"#;
        let path = write_manifest(&dir, compact);

        let required = DependencySet::new().with(Section::Dependencies, "a", "^1.0.0");
        let outcome = reconcile(&required, &path).await.unwrap();
        assert!(!outcome.changed());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), compact);
    }

    #[tokio::test]
    async fn test_preserves_key_order_and_formatting() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"name":"x","scripts":{"dev":"next dev"}}"#);

        let required = DependencySet::new().with(Section::Dependencies, "mqtt", "^5.3.5");
        reconcile(&required, &path).await.unwrap();

        let expected = "{\n  \"name\": \"x\",\n  \"scripts\": {\n    \"dev\": \"next dev\"\n  },\n  \"dependencies\": {\n    \"mqtt\": \"^5.3.5\"\n  }\n}\n";
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_reports_conflicting_range() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"dependencies":{"mqtt":"^4.3.7"}}"#);

        let required = DependencySet::new().with(Section::Dependencies, "mqtt", "^5.3.5");
        let outcome = reconcile(&required, &path).await.unwrap();
        assert!(!outcome.changed());
        assert_eq!(
            outcome.conflicts,
            vec![Conflict {
                name: "mqtt".to_string(),
                declared: "^4.3.7".to_string(),
                required: "^5.3.5".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_section_is_checked_individually() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"devDependencies":{"mqtt":"^5.3.5"}}"#);

        let required = DependencySet::new().with(Section::Dependencies, "mqtt", "^5.3.5");
        let outcome = reconcile(&required, &path).await.unwrap();
        assert!(outcome.changed());
    }

    #[tokio::test]
    async fn test_missing_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = reconcile(&required_dependencies(), &dir.path().join("package.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Manifest { .. }));
    }

    #[tokio::test]
    async fn test_non_object_section_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, r#"{"dependencies":["mqtt"]}"#);
        let err = reconcile(&required_dependencies(), &path).await.unwrap_err();
        assert!(matches!(err, GenerateError::Manifest { .. }));
    }

    #[test]
    fn test_range_reaches() {
        assert!(range_reaches("^5.4.0", "^5.3.5"));
        assert!(range_reaches("5.3.5", "^5.3.5"));
        assert!(!range_reaches("^4.0.0", "^5.3.5"));
        assert!(!range_reaches("~5.1.0", "^5.3.5"));
        assert!(range_reaches("latest", "^5.3.5"));
        assert!(range_reaches("workspace:*", "^5.3.5"));
    }
}
