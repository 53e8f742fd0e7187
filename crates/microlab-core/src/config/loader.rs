//! Config file loading and normalization

use super::{ComponentConfig, DEFAULT_ICON, DEFAULT_POLLING_INTERVAL_MS};
use crate::error::{GenerateError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// On-disk shape of a component config. Unknown keys land in `extra`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    component_name: Option<String>,
    mqtt_topic: Option<String>,
    label: Option<String>,
    unit: Option<String>,
    icon: Option<String>,
    polling_interval: Option<u64>,
    setpoint: Option<serde_yaml::Number>,
    max_deviation: Option<serde_yaml::Number>,
    schema: Option<serde_yaml::Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

/// Read a JSON or YAML config file and apply defaults.
///
/// The file is read fresh on every call.
pub async fn load(path: &Path) -> Result<ComponentConfig> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(GenerateError::ConfigNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(invalid(path, e)),
    };

    let raw: RawConfig = serde_yaml::from_str(&content).map_err(|e| invalid(path, e))?;

    let component_name = raw
        .component_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| GenerateError::ConfigMissingField {
            path: path.to_path_buf(),
            field: "componentName",
        })?;

    // The name becomes part of output file paths
    if component_name.contains(['/', '\\']) || component_name == "." || component_name == ".."
    {
        return Err(invalid(
            path,
            format!("componentName '{}' must not be a path", component_name),
        ));
    }

    let schema = match &raw.schema {
        Some(value) => serde_json::to_string_pretty(value).map_err(|e| invalid(path, e))?,
        None => "{}".to_string(),
    };

    let mut extra = BTreeMap::new();
    for (key, value) in &raw.extra {
        if let Some(text) = value_to_text(value).map_err(|e| invalid(path, e))? {
            extra.insert(key.clone(), text);
        }
    }

    Ok(ComponentConfig {
        mqtt_topic: raw.mqtt_topic.as_deref().map(sanitize_topic).unwrap_or_default(),
        label: raw
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| component_name.clone()),
        unit: raw.unit.unwrap_or_default(),
        icon: raw
            .icon
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string()),
        polling_interval: raw
            .polling_interval
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_POLLING_INTERVAL_MS),
        setpoint: raw.setpoint,
        max_deviation: raw.max_deviation,
        schema,
        extra,
        component_name,
    })
}

/// Decode escaped slashes and drop angle brackets from an MQTT topic.
///
/// Topics are embedded verbatim in generated source, and rendering does no
/// escaping. Dropping brackets can rejoin an escape (`&#x2<>F;`), so the
/// escape is decoded again afterwards.
pub fn sanitize_topic(topic: &str) -> String {
    topic
        .replace("&#x2F;", "/")
        .replace(['<', '>'], "")
        .replace("&#x2F;", "/")
}

/// Text form of a passthrough value; `None` for null.
fn value_to_text(value: &serde_yaml::Value) -> std::result::Result<Option<String>, serde_json::Error> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        other => Some(serde_json::to_string(other)?),
    })
}

fn invalid(path: &Path, reason: impl ToString) -> GenerateError {
    GenerateError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
