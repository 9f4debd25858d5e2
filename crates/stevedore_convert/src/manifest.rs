//! Compose v3 manifest codec.
//!
//! Typed serde model for the subset of the compose schema the converter
//! round-trips: services (image, command, ports, volumes, environment,
//! networks, restart) plus top-level external network declarations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::ConvertError;
use crate::Result;

/// A parsed compose manifest. Field order here is emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeFile {
    /// Kept untyped: the converter never reads it, and real files write it
    /// as either a string or a bare number (`version: 3.8`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default)]
    pub services: IndexMap<String, ServiceSpec>,
    /// Top-level network declarations, kept untyped for leniency on read.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub networks: IndexMap<String, Value>,
}

/// One service entry. Unknown keys are ignored on read; empty fields are
/// omitted on write.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "CommandField::is_none")]
    pub command: CommandField,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    #[serde(default, skip_serializing_if = "EnvField::is_none")]
    pub environment: EnvField,
    #[serde(default, skip_serializing_if = "NetworksField::is_none")]
    pub networks: NetworksField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
}

/// command field can be a shell string or an exec-form sequence
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandField {
    #[default]
    None,
    Shell(String),
    Exec(Vec<String>),
}

impl CommandField {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// environment field can be a map or a list of KEY=VALUE strings
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvField {
    #[default]
    None,
    Map(IndexMap<String, ScalarString>),
    List(Vec<String>),
}

impl EnvField {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten to `KEY=VALUE` strings in stored order.
    pub fn to_pairs(&self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::Map(m) => m.iter().map(|(k, v)| format!("{}={}", k, v.0)).collect(),
            Self::List(v) => v.clone(),
        }
    }
}

/// Any YAML scalar, coerced to its string form on read.
///
/// Env-map values are written unquoted often enough (`PORT: 8080`,
/// `DEBUG: true`) that a plain `String` would reject real manifests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScalarString(pub String);

impl<'de> Deserialize<'de> for ScalarString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            _ => return Err(serde::de::Error::custom("expected a scalar value")),
        };
        Ok(Self(text))
    }
}

/// service-level networks: scalar name or list of names
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworksField {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl NetworksField {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn first(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::One(name) => Some(name),
            Self::Many(names) => names.first().map(String::as_str),
        }
    }
}

/// Parse a manifest string into a `ComposeFile`.
///
/// Unparseable YAML is `ManifestParse`; well-formed YAML that is not a
/// mapping with a non-empty `services` mapping is `InvalidStructure`.
pub fn parse(text: &str) -> Result<ComposeFile> {
    let value: Value = serde_yaml::from_str(text)?;
    if !has_services(&value) {
        return Err(ConvertError::InvalidStructure);
    }
    Ok(serde_yaml::from_value(value)?)
}

/// Serialize a `ComposeFile` back to YAML.
pub fn render(file: &ComposeFile) -> Result<String> {
    Ok(serde_yaml::to_string(file)?)
}

/// Cheap structural probe used by the input classifier. Never errors.
pub fn looks_like_manifest(text: &str) -> bool {
    serde_yaml::from_str::<Value>(text)
        .map(|value| has_services(&value))
        .unwrap_or(false)
}

fn has_services(value: &Value) -> bool {
    if !value.is_mapping() {
        return false;
    }
    value
        .get("services")
        .and_then(Value::as_mapping)
        .is_some_and(|services| !services.is_empty())
}

/// The `{external: true}` declaration emitted for a named network.
pub fn external_network_decl() -> Value {
    let mut decl = serde_yaml::Mapping::new();
    decl.insert(Value::from("external"), Value::from(true));
    Value::Mapping(decl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_list_form() {
        let file = parse("services:\n  web:\n    image: nginx\n    environment:\n      - A=1\n      - B=2\n").unwrap();
        let spec = &file.services["web"];
        assert_eq!(spec.environment.to_pairs(), vec!["A=1", "B=2"]);
    }

    #[test]
    fn test_parse_env_map_form_keeps_order() {
        let file = parse("services:\n  web:\n    image: nginx\n    environment:\n      ZED: last\n      ALPHA: first\n").unwrap();
        let spec = &file.services["web"];
        assert_eq!(spec.environment.to_pairs(), vec!["ZED=last", "ALPHA=first"]);
    }

    #[test]
    fn test_parse_env_map_scalar_values_coerced() {
        let file = parse("services:\n  web:\n    image: nginx\n    environment:\n      PORT: 8080\n      DEBUG: true\n").unwrap();
        let spec = &file.services["web"];
        assert_eq!(spec.environment.to_pairs(), vec!["PORT=8080", "DEBUG=true"]);
    }

    #[test]
    fn test_parse_unquoted_numeric_version() {
        let file = parse("version: 3.8\nservices:\n  web:\n    image: nginx\n").unwrap();
        assert!(file.version.is_some());
        assert!(file.services.contains_key("web"));
    }

    #[test]
    fn test_parse_scalar_networks() {
        let file = parse("services:\n  web:\n    image: nginx\n    networks: backend\n").unwrap();
        assert_eq!(file.services["web"].networks.first(), Some("backend"));
    }

    #[test]
    fn test_parse_command_forms() {
        let shell = parse("services:\n  a:\n    image: i\n    command: echo hi\n").unwrap();
        assert_eq!(
            shell.services["a"].command,
            CommandField::Shell("echo hi".to_string())
        );

        let exec = parse("services:\n  a:\n    image: i\n    command: [echo, hi]\n").unwrap();
        assert_eq!(
            exec.services["a"].command,
            CommandField::Exec(vec!["echo".to_string(), "hi".to_string()])
        );
    }

    #[test]
    fn test_parse_missing_services_is_structure_error() {
        let err = parse("version: '3.8'\n").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidStructure));
    }

    #[test]
    fn test_parse_empty_services_is_structure_error() {
        let err = parse("services: {}\n").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidStructure));
    }

    #[test]
    fn test_parse_garbage_is_parse_error() {
        let err = parse(": : :\n  - ][").unwrap_err();
        assert!(matches!(err, ConvertError::ManifestParse(_)));
    }

    #[test]
    fn test_services_preserve_document_order() {
        let file = parse("services:\n  zeta:\n    image: z\n  alpha:\n    image: a\n").unwrap();
        let names: Vec<&String> = file.services.keys().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_render_skips_empty_fields() {
        let mut services = IndexMap::new();
        services.insert(
            "web".to_string(),
            ServiceSpec {
                image: Some("nginx".to_string()),
                ..Default::default()
            },
        );
        let file = ComposeFile {
            version: Some(Value::from("3.8")),
            services,
            networks: IndexMap::new(),
        };
        let yaml = render(&file).unwrap();
        assert!(yaml.contains("image: nginx"));
        assert!(!yaml.contains("ports"));
        assert!(!yaml.contains("environment"));
        assert!(!yaml.contains("networks"));
    }

    #[test]
    fn test_looks_like_manifest() {
        assert!(looks_like_manifest("services:\n  web:\n    image: nginx\n"));
        assert!(!looks_like_manifest("services: {}\n"));
        assert!(!looks_like_manifest("not: [valid"));
        assert!(!looks_like_manifest("just a sentence"));
    }
}
