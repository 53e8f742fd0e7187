//! Follow-up instructions shown after a component is generated

use super::GenerationReport;
use crate::output;
use crate::templates::ArtifactKind;

/// Environment variables the generated API routes read
pub const REQUIRED_ENV_VARS: &[(&str, &str)] = &[
    ("MQTT_HOST", "your_mqtt_broker_host"),
    ("MQTT_USERNAME", "your_mqtt_username"),
    ("MQTT_PASSWORD", "your_mqtt_password"),
    ("MONGODB_URI", "your_mongodb_connection_string"),
];

/// Generate the "next steps" instructions for a finished run
pub fn next_steps(report: &GenerationReport) -> Vec<String> {
    let mut steps = Vec::new();
    let name = &report.config.component_name;

    // Step 1: Environment for the API route
    if report.file(ArtifactKind::Api).is_some() {
        let vars: Vec<String> = REQUIRED_ENV_VARS
            .iter()
            .map(|(key, example)| format!("   {}={}", key, example))
            .collect();
        steps.push(format!(
            "Make sure your .env file has the required environment variables:\n{}",
            vars.join("\n")
        ));
    }

    // Step 2: Import the component
    if report.file(ArtifactKind::Component).is_some() {
        let stem = output::component_stem(report.component_type, name);
        steps.push(format!(
            "Import and use your component in your Next.js app:\n   import {} from '@/components/microlab/{}'",
            stem, stem
        ));
    }

    // Step 3: Where the API lives
    if let (Some(api), Some(endpoint)) = (
        report.file(ArtifactKind::Api),
        output::api_endpoint(report.component_type, name),
    ) {
        steps.push(format!(
            "API endpoint: {}\n   File location: {}",
            endpoint,
            api.relative.display()
        ));
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;
    use crate::config::ComponentConfig;
    use crate::deps::{DependencyReport, DependencyStatus};
    use crate::generator::GeneratedFile;
    use std::path::PathBuf;

    fn report(component_type: ComponentType, name: &str) -> GenerationReport {
        let config = match component_type {
            ComponentType::Dashtable => ComponentConfig::dashtable(),
            _ => ComponentConfig::named(name),
        };
        let written = crate::generator::planned_outputs(component_type, &config.component_name)
            .into_iter()
            .map(|(kind, relative)| GeneratedFile {
                kind,
                template: "t.js",
                path: PathBuf::from("/project").join(&relative),
                relative,
            })
            .collect();
        GenerationReport {
            component_type,
            config,
            written,
            skipped: Vec::new(),
            dependencies: DependencyReport {
                added: Vec::new(),
                conflicts: Vec::new(),
                status: DependencyStatus::UpToDate,
            },
        }
    }

    #[test]
    fn test_stats_steps() {
        let steps = next_steps(&report(ComponentType::Stats, "Boiler"));
        assert_eq!(steps.len(), 3);
        assert!(steps[0].contains("MONGODB_URI="));
        assert!(steps[1].contains("import BoilerStatistics from '@/components/microlab/BoilerStatistics'"));
        assert!(steps[2].contains("/api/microlab/boiler/statistics"));
        assert!(steps[2].contains("src/app/api/microlab/boiler/statistics/route.js"));
    }

    #[test]
    fn test_dashtable_steps() {
        let steps = next_steps(&report(ComponentType::Dashtable, "ignored"));
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("import Dashtable from '@/components/microlab/Dashtable'"));
    }
}
