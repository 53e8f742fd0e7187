//! Charm-style CLI prompts using cliclack

use crate::component::ComponentType;
use crate::config::ComponentConfig;
use crate::deps::{CommandInstaller, DependencyStatus};
use crate::generator::{self, GenerateOptions, GenerationReport};
use crate::templates::TemplateSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Config file extensions accepted by the config prompt
const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// CLI arguments for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Component type; prompted for when missing
    pub component_type: Option<String>,

    /// Component config file; prompted for when missing and the type needs one
    pub config: Option<PathBuf>,

    /// Root of the host project (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Local directory to read templates from instead of the built-in ones
    pub template_dir: Option<PathBuf>,

    /// Update package.json without running the package manager
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: GenerateArgs) -> Result<()> {
    cliclack::intro("Microlab")?;

    // Step 1: Select component type
    let component_type = select_component_type(&args)?;

    // Step 2: Select config file (dashtable has none)
    let config_path = if component_type.needs_config() {
        Some(select_config_path(&args)?)
    } else {
        None
    };

    // Step 3: Resolve project directory and template source
    let project_dir = select_directory(&args)?;
    let templates = TemplateSource::resolve(args.template_dir.clone());
    cliclack::log::info(format!("Using {}", templates.describe()))?;

    // Step 4: Load config
    let config = generator::load_config(component_type, config_path.as_deref()).await?;
    if let Some(path) = &config_path {
        cliclack::log::info(describe_config(path, &config))?;
    }

    // Step 5: Confirm overwriting earlier output
    confirm_overwrite(&project_dir, component_type, &config, &args)?;

    // Step 6: Generate
    let options = GenerateOptions::new(project_dir, templates);
    let report = generate(component_type, &config, &options, args.skip_install).await?;

    // Step 7: Show results and next steps
    print_report(&report)?;
    print_next_steps(&report)?;

    Ok(())
}

fn select_component_type(args: &GenerateArgs) -> Result<ComponentType> {
    if let Some(name) = &args.component_type {
        let component_type: ComponentType = name.parse()?;
        cliclack::log::info(format!("Component type: {}", component_type.description()))?;
        return Ok(component_type);
    }

    let mut select = cliclack::select("What type of component would you like to create?");
    for component_type in ComponentType::ALL {
        select = select.item(component_type, component_type.description(), component_type.id());
    }

    Ok(select.interact()?)
}

fn select_config_path(args: &GenerateArgs) -> Result<PathBuf> {
    if let Some(path) = &args.config {
        return Ok(path.clone());
    }

    let input: String = cliclack::input("Enter the path to your configuration file:")
        .placeholder("./microlab.config.json")
        .validate(|input: &String| validate_config_path(input))
        .interact()?;

    Ok(PathBuf::from(input))
}

fn validate_config_path(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Err("Config file path is required".to_string());
    }

    let path = Path::new(input);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if !extension.is_some_and(|e| CONFIG_EXTENSIONS.contains(&e.as_str())) {
        return Err(format!(
            "Config file must be one of: {}",
            CONFIG_EXTENSIONS
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    if !path.exists() {
        return Err("Config file does not exist".to_string());
    }

    Ok(())
}

fn select_directory(args: &GenerateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !path.is_dir() {
        anyhow::bail!("Project directory does not exist: {}", path.display());
    }

    Ok(path)
}

fn describe_config(path: &Path, config: &ComponentConfig) -> String {
    let mut lines = vec![
        format!("Config: {}", path.display()),
        format!("Component: {}", config.component_name),
        format!("MQTT Topic: {}", config.mqtt_topic),
        format!("Label: {}", config.label),
        format!("Unit: {}", config.unit),
        format!("Polling Interval: {}ms", config.polling_interval),
    ];
    if let Some(setpoint) = &config.setpoint {
        lines.push(format!("Setpoint: {}", setpoint));
    }
    lines.join("\n")
}

fn confirm_overwrite(
    project_dir: &Path,
    component_type: ComponentType,
    config: &ComponentConfig,
    args: &GenerateArgs,
) -> Result<()> {
    let existing: Vec<PathBuf> = generator::planned_outputs(component_type, &config.component_name)
        .into_iter()
        .map(|(_, relative)| relative)
        .filter(|relative| project_dir.join(relative).exists())
        .collect();

    if existing.is_empty() {
        return Ok(());
    }

    let listing: Vec<String> = existing
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect();
    cliclack::log::warning(format!(
        "These files will be overwritten:\n{}",
        listing.join("\n")
    ))?;

    // Auto-confirm with --yes flag
    let confirm = if args.yes {
        true
    } else {
        cliclack::confirm("Continue anyway?")
            .initial_value(true)
            .interact()?
    };

    if !confirm {
        anyhow::bail!("Generation cancelled.");
    }

    Ok(())
}

async fn generate(
    component_type: ComponentType,
    config: &ComponentConfig,
    options: &GenerateOptions,
    skip_install: bool,
) -> Result<GenerationReport> {
    cliclack::log::step(format!("Generating {} component...", component_type))?;

    let installer = CommandInstaller::new();
    let installer = (!skip_install).then_some(&installer);

    generator::generate(component_type, config, options, installer)
        .await
        .with_context(|| format!("Failed to generate {} component", component_type))
}

fn print_report(report: &GenerationReport) -> Result<()> {
    for file in &report.written {
        cliclack::log::success(format!("{} created: {}", file.kind, file.relative.display()))?;
    }

    if !report.dependencies.added.is_empty() {
        let added: Vec<String> = report
            .dependencies
            .added
            .iter()
            .map(|r| r.to_string())
            .collect();
        cliclack::log::info(format!("Added to package.json: {}", added.join(", ")))?;
    }
    match &report.dependencies.status {
        DependencyStatus::Installed { command } => {
            cliclack::log::success(format!("Dependencies installed ({})", command))?
        }
        DependencyStatus::UpToDate => cliclack::log::info("Dependencies already declared")?,
        _ => {}
    }

    for warning in report.warnings() {
        cliclack::log::warning(warning)?;
    }

    if report.is_empty() {
        cliclack::log::warning("No files were generated. Check that the template source has this component's templates")?;
    }

    Ok(())
}

fn print_next_steps(report: &GenerationReport) -> Result<()> {
    let steps = generator::next_steps(report);

    if !steps.is_empty() {
        println!();
        println!("  Next steps");
        println!();

        for (i, step) in steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step);
        }
    }

    cliclack::outro(outro_message(report))?;

    Ok(())
}

fn outro_message(report: &GenerationReport) -> &'static str {
    if report.is_empty() {
        "No component files were generated."
    } else if report.skipped.is_empty() {
        "Component generated successfully!"
    } else {
        "Component generated with warnings."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_config_path() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("boiler.json");
        std::fs::write(&json, "{}").unwrap();
        let js = dir.path().join("boiler.js");
        std::fs::write(&js, "").unwrap();

        assert!(validate_config_path(json.to_str().unwrap()).is_ok());
        assert_eq!(
            validate_config_path("").unwrap_err(),
            "Config file path is required"
        );
        assert!(validate_config_path(js.to_str().unwrap())
            .unwrap_err()
            .contains(".json"));
        assert_eq!(
            validate_config_path(dir.path().join("missing.yaml").to_str().unwrap()).unwrap_err(),
            "Config file does not exist"
        );
    }

    #[test]
    fn test_outro_message_follows_report() {
        use crate::deps::{DependencyReport, DependencyStatus};
        use crate::generator::{GeneratedFile, SkippedArtifact};
        use crate::templates::ArtifactKind;

        let mut report = GenerationReport {
            component_type: ComponentType::Chart,
            config: ComponentConfig::named("Boiler"),
            written: Vec::new(),
            skipped: vec![SkippedArtifact {
                kind: ArtifactKind::Component,
                template: "chart-component.js",
                reason: "not found".to_string(),
            }],
            dependencies: DependencyReport {
                added: Vec::new(),
                conflicts: Vec::new(),
                status: DependencyStatus::UpToDate,
            },
        };
        assert_eq!(outro_message(&report), "No component files were generated.");

        report.written.push(GeneratedFile {
            kind: ArtifactKind::Api,
            template: "chart-api.js",
            relative: PathBuf::from("src/app/api/microlab/boiler/route.js"),
            path: PathBuf::from("/project/src/app/api/microlab/boiler/route.js"),
        });
        assert_eq!(outro_message(&report), "Component generated with warnings.");

        report.skipped.clear();
        assert_eq!(outro_message(&report), "Component generated successfully!");
    }

    #[test]
    fn test_describe_config() {
        let mut config = ComponentConfig::named("Boiler");
        config.mqtt_topic = "plant/boiler".to_string();
        let text = describe_config(Path::new("boiler.json"), &config);
        assert!(text.contains("Component: Boiler"));
        assert!(text.contains("MQTT Topic: plant/boiler"));
        assert!(text.contains("Polling Interval: 2000ms"));
    }
}
