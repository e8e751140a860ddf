//! Parameter emitters
//!
//! Most request properties map onto one cmdlet parameter of the same type and
//! one assignment onto the cmdlet context. A handful of SDK shapes do not map
//! cleanly and get a dedicated emitter instead; [`EmitterRegistry`] decides
//! which emitter handles a given (service, operation, property).

mod default;
mod endpoint_switch;
mod enum_string;
mod registry;
mod storage_class;

pub use registry::{EmitterRegistry, ANY_OPERATION};

use crate::analyzer::TypeAnalyzer;
use crate::writer::SourceWriter;
use pscmdlet_generator_common::{ParamCustomization, PropertyInfo, Result};

/// Emission strategy for one request property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParamEmitter {
    /// Parameter typed as the property, assigned straight onto the context
    #[default]
    Default,
    /// `-UseAccelerateEndpoint` switch consumed through the client config
    Accelerate,
    /// `-UseDualstackEndpoint` switch consumed through the client config
    Dualstack,
    /// String parameter parsed into the S3 `HttpVerb` enum
    HttpVerb,
    /// String parameter parsed into the S3 `Protocol` enum
    Protocol,
    /// `-StandardStorage` / `-ReducedRedundancyStorage` switch pair
    S3StorageClass,
}

impl ParamEmitter {
    /// Emit the cmdlet parameter declaration(s) for `property`
    pub fn write_params(
        &self,
        writer: &mut SourceWriter,
        analyzer: &dyn TypeAnalyzer,
        property: &PropertyInfo,
        customization: Option<&ParamCustomization>,
    ) -> Result<()> {
        match self {
            ParamEmitter::Default => {
                default::write_params(writer, analyzer, property, customization)
            }
            ParamEmitter::Accelerate => endpoint_switch::write_params(
                writer,
                &endpoint_switch::ACCELERATE,
                property,
                customization,
            ),
            ParamEmitter::Dualstack => endpoint_switch::write_params(
                writer,
                &endpoint_switch::DUALSTACK,
                property,
                customization,
            ),
            ParamEmitter::HttpVerb => {
                enum_string::write_params(writer, &enum_string::HTTP_VERB, property, customization)
            }
            ParamEmitter::Protocol => {
                enum_string::write_params(writer, &enum_string::PROTOCOL, property, customization)
            }
            ParamEmitter::S3StorageClass => storage_class::write_params(writer),
        }
        Ok(())
    }

    /// Emit the code that moves the bound value(s) onto `context_var`
    pub fn write_context_members(
        &self,
        writer: &mut SourceWriter,
        analyzer: &dyn TypeAnalyzer,
        context_var: &str,
        property: &PropertyInfo,
        customization: Option<&ParamCustomization>,
    ) -> Result<()> {
        match self {
            ParamEmitter::Default => {
                default::write_context_members(writer, context_var, property, customization);
                Ok(())
            }
            // Read by the client config builder, never placed on the context
            ParamEmitter::Accelerate | ParamEmitter::Dualstack => Ok(()),
            ParamEmitter::HttpVerb | ParamEmitter::Protocol => enum_string::write_context_members(
                writer,
                analyzer,
                context_var,
                property,
                customization,
            ),
            ParamEmitter::S3StorageClass => {
                storage_class::write_context_members(writer, context_var, property);
                Ok(())
            }
        }
    }
}

/// Name of the emitted parameter for `property`
pub(crate) fn parameter_name<'a>(
    property: &'a PropertyInfo,
    customization: Option<&'a ParamCustomization>,
) -> &'a str {
    customization
        .and_then(|c| c.new_name.as_deref())
        .unwrap_or(&property.name)
}

/// Aliases for the emitted parameter; a renamed parameter keeps its property
/// name as an alias
pub(crate) fn parameter_aliases(
    property: &PropertyInfo,
    customization: Option<&ParamCustomization>,
) -> Vec<String> {
    let mut aliases = Vec::new();
    if parameter_name(property, customization) != property.name {
        aliases.push(property.name.clone());
    }
    if let Some(customization) = customization {
        for alias in &customization.aliases {
            if !aliases.contains(alias) {
                aliases.push(alias.clone());
            }
        }
    }
    aliases
}

/// Shape of one emitted cmdlet parameter
pub(crate) struct ParameterDeclaration<'a> {
    pub name: &'a str,
    pub type_name: &'a str,
    pub summary: &'a str,
    pub mandatory: bool,
    pub allow_empty_string: bool,
    pub aliases: Vec<String>,
    pub extra_attributes: Vec<String>,
}

impl ParameterDeclaration<'_> {
    pub fn write(&self, writer: &mut SourceWriter) {
        writer.region(&format!("Parameter {}", self.name), |w| {
            w.write_line("/// <summary>");
            w.write_line("/// <para>");
            for line in self.summary.lines() {
                w.write_line(&format!("/// {}", line.trim()));
            }
            w.write_line("/// </para>");
            w.write_line("/// </summary>");

            if self.mandatory {
                w.write_line(
                    "[System.Management.Automation.Parameter(ValueFromPipelineByPropertyName = true, Mandatory = true)]",
                );
                if self.allow_empty_string {
                    w.write_line("[System.Management.Automation.AllowEmptyString]");
                }
            } else {
                w.write_line(
                    "[System.Management.Automation.Parameter(ValueFromPipelineByPropertyName = true)]",
                );
            }

            for attribute in &self.extra_attributes {
                w.write_line(attribute);
            }

            if !self.aliases.is_empty() {
                let quoted: Vec<String> =
                    self.aliases.iter().map(|a| format!("\"{a}\"")).collect();
                w.write_line(&format!("[Alias({})]", quoted.join(",")));
            }

            w.write_line(&format!(
                "public {} {} {{ get; set; }}",
                self.type_name, self.name
            ));
        });
    }
}

/// Summary text for a property, falling back to a generic sentence
pub(crate) fn property_summary(property: &PropertyInfo) -> String {
    property
        .description
        .clone()
        .unwrap_or_else(|| format!("The value for the {} property.", property.name))
}
