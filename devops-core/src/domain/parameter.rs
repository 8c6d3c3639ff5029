//! Job input parameters

use serde::{Deserialize, Serialize};

/// A job input parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    /// Default value. For `choice` this is the newline separated list of
    /// options; `file` parameters have none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,
}

/// Kind of a job parameter
///
/// Kinds the engine knows but this crate does not are kept verbatim in
/// `Unknown`, so a document carrying them still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterType {
    String,
    Text,
    Boolean,
    Password,
    Choice,
    File,
    Unknown(String),
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::String => "string",
            ParameterType::Text => "text",
            ParameterType::Boolean => "boolean",
            ParameterType::Password => "password",
            ParameterType::Choice => "choice",
            ParameterType::File => "file",
            ParameterType::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for ParameterType {
    fn from(s: &str) -> Self {
        match s {
            "string" => ParameterType::String,
            "text" => ParameterType::Text,
            "boolean" => ParameterType::Boolean,
            "password" => ParameterType::Password,
            "choice" => ParameterType::Choice,
            "file" => ParameterType::File,
            other => ParameterType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ParameterType {
    fn from(s: String) -> Self {
        ParameterType::from(s.as_str())
    }
}

impl From<ParameterType> for String {
    fn from(param_type: ParameterType) -> Self {
        match param_type {
            ParameterType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_type_from_str() {
        assert_eq!(ParameterType::from("choice"), ParameterType::Choice);
        assert_eq!(ParameterType::from("file"), ParameterType::File);
        assert_eq!(
            ParameterType::from("hudson.model.RunParameterDefinition"),
            ParameterType::Unknown("hudson.model.RunParameterDefinition".to_string())
        );
    }

    #[test]
    fn test_parameter_type_json() {
        let param: Parameter = serde_json::from_str(
            r#"{"name": "env", "description": "target", "type": "choice", "default_value": "dev\nprod"}"#,
        )
        .unwrap();
        assert_eq!(param.param_type, ParameterType::Choice);
        assert_eq!(param.default_value, "dev\nprod");

        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "choice");
    }

    #[test]
    fn test_unknown_parameter_type_keeps_raw_name() {
        let param_type = ParameterType::from("credentials".to_string());
        assert!(matches!(param_type, ParameterType::Unknown(_)));
        assert_eq!(String::from(param_type), "credentials");
    }
}
