//! Service model IR
//!
//! The generator never reflects over SDK assemblies itself. Instead it reads a
//! service model file (YAML or JSON) that describes the operations, request
//! properties, enums, and response types of one AWS service.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Root structure of a service model file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceModel {
    /// Service identifier used for emitter lookups (e.g., "S3")
    pub service_id: String,
    /// SDK namespace of the service (e.g., "Amazon.S3")
    pub namespace: String,
    /// SDK client interface (e.g., "IAmazonS3")
    pub client_interface: String,
    /// Cmdlet noun prefix (e.g., "S3")
    #[serde(default)]
    pub noun_prefix: Option<String>,
    /// SDK assembly version the model was taken from
    #[serde(default)]
    pub sdk_version: String,
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    #[serde(default)]
    pub operations: Vec<OperationDefinition>,
}

/// SDK constant class or enum with its legal member names
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnumDefinition {
    pub type_name: String,
    pub members: Vec<String>,
}

/// Response type and the names of its public properties
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<String>,
}

/// One service API operation, emitted as one cmdlet
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperationDefinition {
    /// SDK operation name (e.g., "PutObject")
    pub name: String,
    /// PowerShell verb (e.g., "Write")
    pub verb: String,
    /// Cmdlet noun without the service prefix (e.g., "Object")
    pub noun: String,
    /// Fully-qualified request type
    pub request_type: String,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    #[serde(default)]
    pub pagination: Option<PaginationDefinition>,
    /// Parameters summarized in the confirmation prompt; non-empty marks the
    /// operation as mutating
    #[serde(default)]
    pub confirm_parameters: Vec<String>,
    /// Per-property customizations keyed by SDK property name
    #[serde(default)]
    pub customizations: BTreeMap<String, ParamCustomization>,
}

impl OperationDefinition {
    /// Whether the generated cmdlet must prompt before running
    pub fn is_mutating(&self) -> bool {
        !self.confirm_parameters.is_empty()
    }

    /// Customization record for a property, if any
    pub fn customization(&self, property: &str) -> Option<&ParamCustomization> {
        self.customizations.get(property)
    }
}

/// Request property metadata handed to parameter emitters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PropertyInfo {
    pub name: String,
    /// Fully-qualified declared type (e.g., "System.String", "Amazon.S3.HttpVerb")
    pub type_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PropertyInfo {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            required: false,
            default_value: None,
            description: None,
        }
    }

    /// Mark the property as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_string_type(&self) -> bool {
        matches!(self.type_name.as_str(), "System.String" | "string" | "String")
    }

    /// Required with no default value means the cmdlet parameter is mandatory
    pub fn is_mandatory(&self) -> bool {
        self.required && self.default_value.is_none()
    }
}

/// Hand-authored overrides for one emitted parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParamCustomization {
    /// Parameter name to use instead of the property name
    #[serde(default)]
    pub new_name: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Continuation-token shape of a paginated operation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationDefinition {
    /// Request member holding the continuation token
    pub token_property: String,
    /// Response member holding the next token (defaults to `token_property`)
    #[serde(default)]
    pub next_token_property: Option<String>,
    /// Request member bounding the page size
    #[serde(default)]
    pub limit_property: Option<String>,
    /// Response member holding the result batch
    pub items_property: String,
    /// Largest page size the service accepts
    #[serde(default)]
    pub page_size_cap: Option<usize>,
}

impl PaginationDefinition {
    pub fn next_token_property(&self) -> &str {
        self.next_token_property
            .as_deref()
            .unwrap_or(&self.token_property)
    }
}

impl ServiceModel {
    /// Load a service model from a YAML or JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read service model {:?}: {}", path, e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Noun prefix for generated cmdlets, falling back to the service id
    pub fn noun_prefix(&self) -> &str {
        self.noun_prefix.as_deref().unwrap_or(&self.service_id)
    }

    pub fn find_enum(&self, type_name: &str) -> Option<&EnumDefinition> {
        self.enums.iter().find(|e| e.type_name == type_name)
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL_YAML: &str = r#"
service_id: S3
namespace: Amazon.S3
client_interface: IAmazonS3
sdk_version: 3.7.0
enums:
  - type_name: Amazon.S3.HttpVerb
    members: [GET, HEAD, PUT, DELETE]
types:
  - name: Amazon.S3.Model.S3Bucket
    properties: [BucketName, CreationDate]
operations:
  - name: GetPreSignedURL
    verb: Get
    noun: PreSignedURL
    request_type: Amazon.S3.Model.GetPreSignedUrlRequest
    properties:
      - name: Verb
        type_name: Amazon.S3.HttpVerb
        required: true
  - name: ListObjectsV2
    verb: Get
    noun: ObjectV2
    request_type: Amazon.S3.Model.ListObjectsV2Request
    pagination:
      token_property: ContinuationToken
      next_token_property: NextContinuationToken
      limit_property: MaxKeys
      items_property: S3Objects
      page_size_cap: 1000
"#;

    #[test]
    fn test_parse_yaml_model() {
        let model = ServiceModel::from_yaml(MODEL_YAML).unwrap();

        assert_eq!(model.service_id, "S3");
        assert_eq!(model.noun_prefix(), "S3");
        assert_eq!(model.operations.len(), 2);
        assert_eq!(
            model.find_enum("Amazon.S3.HttpVerb").unwrap().members,
            vec!["GET", "HEAD", "PUT", "DELETE"]
        );
        assert!(model.find_type("Amazon.S3.Model.S3Bucket").is_some());

        let paginated = &model.operations[1];
        let pagination = paginated.pagination.as_ref().unwrap();
        assert_eq!(pagination.next_token_property(), "NextContinuationToken");
        assert_eq!(pagination.page_size_cap, Some(1000));
        assert!(!paginated.is_mutating());
    }

    #[test]
    fn test_property_mandatory_rules() {
        let prop = PropertyInfo::new("BucketName", "System.String").required();
        assert!(prop.is_mandatory());
        assert!(prop.is_string_type());

        let mut with_default = prop.clone();
        with_default.default_value = Some("GET".to_string());
        assert!(!with_default.is_mandatory());

        assert!(!PropertyInfo::new("Verb", "Amazon.S3.HttpVerb").is_string_type());
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("s3.json");
        fs::write(
            &json_path,
            r#"{"service_id":"S3","namespace":"Amazon.S3","client_interface":"IAmazonS3"}"#,
        )
        .unwrap();

        let model = ServiceModel::load(&json_path).unwrap();
        assert_eq!(model.client_interface, "IAmazonS3");
        assert!(model.operations.is_empty());

        let missing = ServiceModel::load(&dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(GeneratorError::Parse(_))));
    }
}
