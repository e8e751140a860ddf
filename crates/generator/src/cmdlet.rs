//! Per-operation cmdlet source generation

use crate::emitters::{parameter_name, EmitterRegistry, ParamEmitter};
use crate::writer::SourceWriter;
use pscmdlet_generator_common::{GeneratorError, OperationDefinition, Result, ServiceModel};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

/// Indent of parameter declarations inside the cmdlet class
const PARAMETER_INDENT: usize = 2;

/// Indent of statements inside `ProcessRecord`
const STATEMENT_INDENT: usize = 3;

/// Name of the context variable the emitted binding code assigns onto
const CONTEXT_VARIABLE: &str = "context";

/// Rendered source for one cmdlet
#[derive(Debug, Clone)]
pub struct GeneratedCmdlet {
    /// C# class name (e.g., `WriteS3ObjectCmdlet`)
    pub class_name: String,
    /// PowerShell command name (e.g., `Write-S3Object`)
    pub cmdlet_name: String,
    pub source: String,
}

impl GeneratedCmdlet {
    pub fn file_name(&self) -> String {
        format!("{}.cs", self.class_name)
    }
}

#[derive(Debug, Serialize)]
struct ContextProperty<'a> {
    name: &'a str,
    type_name: &'a str,
}

#[derive(Debug, Serialize)]
struct PaginationContext<'a> {
    token_property: &'a str,
    token_parameter: &'a str,
    next_token_property: &'a str,
    limit_property: Option<&'a str>,
    limit_parameter: Option<&'a str>,
    items_property: &'a str,
    page_size_cap: Option<usize>,
}

/// Cmdlet generator
///
/// Walks every operation of a service model and renders one cmdlet class per
/// operation, delegating each request property to the emitter the registry
/// resolves for it.
pub struct CmdletGenerator<'a> {
    model: &'a ServiceModel,
    registry: EmitterRegistry,
    tera: Tera,
    verbose: bool,
}

impl<'a> CmdletGenerator<'a> {
    /// Create a generator using the built-in emitter overrides
    pub fn new(model: &'a ServiceModel) -> Result<Self> {
        Ok(Self {
            model,
            registry: EmitterRegistry::builtin(),
            tera: crate::templates::load_templates()?,
            verbose: false,
        })
    }

    /// Replace the emitter registry
    pub fn with_registry(mut self, registry: EmitterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("  → {}", message);
        }
    }

    /// Render every operation of the model
    pub fn generate(&self) -> Result<Vec<GeneratedCmdlet>> {
        self.model
            .operations
            .iter()
            .map(|operation| self.generate_operation(operation))
            .collect()
    }

    /// Render one operation
    pub fn generate_operation(&self, operation: &OperationDefinition) -> Result<GeneratedCmdlet> {
        let service_id = &self.model.service_id;
        let noun = format!("{}{}", self.model.noun_prefix(), operation.noun);
        let class_name = format!("{}{}Cmdlet", operation.verb, noun);
        let cmdlet_name = format!("{}-{}", operation.verb, noun);
        self.log(&format!("Generating {} ({})", cmdlet_name, operation.name));

        let mut parameters = SourceWriter::with_indent(PARAMETER_INDENT);
        let mut context_members = SourceWriter::with_indent(STATEMENT_INDENT);
        let mut context_properties = Vec::new();

        for property in &operation.properties {
            let emitter = self
                .registry
                .resolve(service_id, &operation.name, &property.name);
            let customization = operation.customization(&property.name);
            if emitter != ParamEmitter::Default {
                self.log(&format!(
                    "{}.{} uses {:?} emitter",
                    operation.name, property.name, emitter
                ));
            }

            emitter.write_params(&mut parameters, self.model, property, customization)?;
            parameters.blank_line();
            emitter.write_context_members(
                &mut context_members,
                self.model,
                CONTEXT_VARIABLE,
                property,
                customization,
            )?;

            if !matches!(emitter, ParamEmitter::Accelerate | ParamEmitter::Dualstack) {
                context_properties.push(ContextProperty {
                    name: &property.name,
                    type_name: &property.type_name,
                });
            }
        }

        let pagination = match &operation.pagination {
            Some(pagination) => Some(self.pagination_context(operation, pagination)?),
            None => None,
        };

        let mut context = tera::Context::new();
        context.insert("service_id", service_id);
        context.insert("namespace", &self.model.namespace);
        context.insert("sdk_version", &self.model.sdk_version);
        context.insert("operation", &operation.name);
        context.insert("request_type", &operation.request_type);
        context.insert("verb", &operation.verb);
        context.insert("noun", &noun);
        context.insert("class_name", &class_name);
        context.insert("cmdlet_name", &cmdlet_name);
        context.insert("is_mutating", &operation.is_mutating());
        context.insert("confirm_parameters", &operation.confirm_parameters);
        context.insert(
            "confirm_action",
            &format!("{} ({})", cmdlet_name, operation.name),
        );
        context.insert("parameters", parameters.as_str());
        context.insert("context_members", context_members.as_str());
        context.insert("context_properties", &context_properties);
        context.insert("pagination", &pagination);

        let source = self
            .tera
            .render("cmdlet.cs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))?;

        Ok(GeneratedCmdlet {
            class_name,
            cmdlet_name,
            source,
        })
    }

    fn pagination_context<'o>(
        &self,
        operation: &'o OperationDefinition,
        pagination: &'o pscmdlet_generator_common::PaginationDefinition,
    ) -> Result<PaginationContext<'o>> {
        let find = |name: &str| {
            operation
                .properties
                .iter()
                .find(|p| p.name == name)
                .ok_or_else(|| {
                    GeneratorError::Generation(format!(
                        "Paginated operation {} has no request property {}",
                        operation.name, name
                    ))
                })
        };

        let token = find(&pagination.token_property)?;
        let limit = match &pagination.limit_property {
            Some(name) => Some(find(name)?),
            None => None,
        };

        Ok(PaginationContext {
            token_property: &pagination.token_property,
            token_parameter: parameter_name(token, operation.customization(&token.name)),
            next_token_property: pagination.next_token_property(),
            limit_property: pagination.limit_property.as_deref(),
            limit_parameter: limit
                .map(|limit| parameter_name(limit, operation.customization(&limit.name))),
            items_property: &pagination.items_property,
            page_size_cap: pagination.page_size_cap,
        })
    }

    /// Write one `<Class>.cs` file per operation into `output_dir`
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir).map_err(|e| {
            GeneratorError::Generation(format!("Failed to create output directory: {}", e))
        })?;

        let mut written = Vec::new();
        for cmdlet in self.generate()? {
            let output_path = output_dir.join(cmdlet.file_name());
            fs::write(&output_path, &cmdlet.source).map_err(|e| {
                GeneratorError::Generation(format!(
                    "Failed to write {}: {}",
                    cmdlet.file_name(),
                    e
                ))
            })?;
            written.push(output_path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"
service_id: S3
namespace: Amazon.S3
client_interface: IAmazonS3
sdk_version: 3.7.0
enums:
  - type_name: Amazon.S3.HttpVerb
    members: [GET, HEAD, PUT, DELETE]
operations:
  - name: GetPreSignedURL
    verb: Get
    noun: PreSignedURL
    request_type: Amazon.S3.Model.GetPreSignedUrlRequest
    properties:
      - name: BucketName
        type_name: System.String
        required: true
      - name: Verb
        type_name: Amazon.S3.HttpVerb
      - name: UseAccelerateEndpoint
        type_name: System.Boolean
"#;

    #[test]
    fn test_names_follow_verb_prefix_noun() {
        let model = ServiceModel::from_yaml(MODEL).unwrap();
        let generator = CmdletGenerator::new(&model).unwrap();

        let cmdlets = generator.generate().unwrap();

        assert_eq!(cmdlets.len(), 1);
        assert_eq!(cmdlets[0].class_name, "GetS3PreSignedURLCmdlet");
        assert_eq!(cmdlets[0].cmdlet_name, "Get-S3PreSignedURL");
        assert_eq!(cmdlets[0].file_name(), "GetS3PreSignedURLCmdlet.cs");
    }

    #[test]
    fn test_registry_selects_emitters() {
        let model = ServiceModel::from_yaml(MODEL).unwrap();
        let source = CmdletGenerator::new(&model)
            .unwrap()
            .generate()
            .unwrap()
            .remove(0)
            .source;

        assert!(source.contains("public System.String Verb { get; set; }"));
        assert!(source.contains("allowable values: GET, HEAD, PUT, DELETE"));
        assert!(source.contains(
            "public System.Management.Automation.SwitchParameter UseAccelerateEndpoint { get; set; }"
        ));
        assert!(!source.contains("public System.Boolean UseAccelerateEndpoint"));
        assert!(source.contains("            context.BucketName = this.BucketName;"));
    }

    #[test]
    fn test_empty_registry_uses_default_emission() {
        let model = ServiceModel::from_yaml(MODEL).unwrap();
        let source = CmdletGenerator::new(&model)
            .unwrap()
            .with_registry(EmitterRegistry::new())
            .generate()
            .unwrap()
            .remove(0)
            .source;

        assert!(source.contains("public Amazon.S3.HttpVerb Verb { get; set; }"));
        assert!(source.contains("[AWSConstantClassSource(\"Amazon.S3.HttpVerb\")]"));
        assert!(!source.contains("System.Enum.Parse"));
    }

    #[test]
    fn test_missing_pagination_property_is_error() {
        let mut model = ServiceModel::from_yaml(MODEL).unwrap();
        model.operations[0].pagination = Some(pscmdlet_generator_common::PaginationDefinition {
            token_property: "Marker".to_string(),
            next_token_property: None,
            limit_property: None,
            items_property: "Items".to_string(),
            page_size_cap: None,
        });

        let result = CmdletGenerator::new(&model).unwrap().generate();

        assert!(matches!(result, Err(GeneratorError::Generation(_))));
    }
}
