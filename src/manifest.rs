//! Agent descriptor types rendered by the capability viewer
//!
//! The manifest is a pass-through contract: deserialized and displayed
//! as-is, with no validation, transformation, or persistence. Every field
//! defaults individually so partial documents still load; missing data
//! degrades to placeholder text at render time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Static descriptor of an agent's identity, capabilities, and tools
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentManifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    /// Capability flags and settings, rendered in key order
    pub capabilities: BTreeMap<String, Value>,
    pub tools: Vec<ToolManifest>,
}

/// Tool entry with JSON-Schema-shaped parameter descriptors
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolManifest {
    pub name: String,
    pub description: String,
    /// JSON Schema for input parameters
    pub input_schema: Value,
    /// JSON Schema for the result, when the agent declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

impl AgentManifest {
    /// Deserialize a manifest from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and deserialize a manifest file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Preferred display label: name, falling back to id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl ToolManifest {
    /// Parameter names declared under the input schema's `properties`
    pub fn parameter_names(&self) -> Vec<String> {
        self.input_schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_partial_document_deserializes() {
        let manifest = AgentManifest::from_json(r#"{"name": "scribe"}"#).unwrap();
        assert_eq!(manifest.name, "scribe");
        assert!(manifest.id.is_empty());
        assert!(manifest.capabilities.is_empty());
        assert!(manifest.tools.is_empty());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let manifest = AgentManifest {
            id: "agent-7".to_string(),
            ..Default::default()
        };
        assert_eq!(manifest.display_name(), "agent-7");

        let named = AgentManifest {
            id: "agent-7".to_string(),
            name: "Scribe".to_string(),
            ..Default::default()
        };
        assert_eq!(named.display_name(), "Scribe");
    }

    #[test]
    fn test_parameter_names_from_schema() {
        let tool: ToolManifest = serde_json::from_value(json!({
            "name": "search",
            "description": "Full-text search",
            "input_schema": {
                "type": "object",
                "properties": {
                    "query": {"type": "string"},
                    "limit": {"type": "integer"}
                },
                "required": ["query"]
            }
        }))
        .unwrap();

        let mut names = tool.parameter_names();
        names.sort();
        assert_eq!(names, vec!["limit", "query"]);
    }

    #[test]
    fn test_parameter_names_tolerate_missing_schema() {
        let tool = ToolManifest {
            name: "ping".to_string(),
            ..Default::default()
        };
        assert!(tool.parameter_names().is_empty());
    }

    #[test]
    fn test_from_file_round_trip() {
        let manifest = AgentManifest {
            id: "agent-7".to_string(),
            name: "Scribe".to_string(),
            version: "1.2.0".to_string(),
            capabilities: BTreeMap::from([
                ("streaming".to_string(), json!(true)),
                ("sandbox".to_string(), json!(false)),
            ]),
            tools: vec![ToolManifest {
                name: "search".to_string(),
                description: "Full-text search".to_string(),
                input_schema: json!({"type": "object"}),
                output_schema: Some(json!({"type": "array"})),
            }],
            ..Default::default()
        };

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&manifest).unwrap().as_bytes())
            .unwrap();

        let loaded = AgentManifest::from_file(file.path()).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let err = AgentManifest::from_json("{").unwrap_err();
        assert!(matches!(err, crate::error::ArgusError::Serialization(_)));
    }
}
