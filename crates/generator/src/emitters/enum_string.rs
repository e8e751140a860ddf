//! String parameters parsed into an SDK enum at execution time

use super::{parameter_aliases, parameter_name, ParameterDeclaration};
use crate::analyzer::TypeAnalyzer;
use crate::writer::{csharp_string_literal, SourceWriter};
use pscmdlet_generator_common::{GeneratorError, ParamCustomization, PropertyInfo, Result};
use pscmdlet_generator_runtime::invalid_value_message;

pub(super) struct EnumString {
    pub summary: &'static str,
}

pub(super) const HTTP_VERB: EnumString = EnumString {
    summary: "The verb for the presigned url.",
};

pub(super) const PROTOCOL: EnumString = EnumString {
    summary: "The protocol (http or https) for the generated url.",
};

pub(super) fn write_params(
    writer: &mut SourceWriter,
    kind: &EnumString,
    property: &PropertyInfo,
    customization: Option<&ParamCustomization>,
) {
    let mandatory = property.is_mandatory();
    ParameterDeclaration {
        name: parameter_name(property, customization),
        type_name: "System.String",
        summary: kind.summary,
        mandatory,
        allow_empty_string: mandatory && property.is_string_type(),
        aliases: parameter_aliases(property, customization),
        extra_attributes: vec![],
    }
    .write(writer);
}

/// Case-insensitive `Enum.Parse` with the legal member names baked into the
/// error message
pub(super) fn write_context_members(
    writer: &mut SourceWriter,
    analyzer: &dyn TypeAnalyzer,
    context_var: &str,
    property: &PropertyInfo,
    customization: Option<&ParamCustomization>,
) -> Result<()> {
    let members = analyzer.enum_members(&property.type_name).ok_or_else(|| {
        GeneratorError::Generation(format!(
            "Enum type {} for property {} not found in {} service model",
            property.type_name,
            property.name,
            analyzer.service_id()
        ))
    })?;
    if members.is_empty() {
        return Err(GeneratorError::Generation(format!(
            "Enum type {} declares no members",
            property.type_name
        )));
    }

    let param = parameter_name(property, customization);
    let enum_type = &property.type_name;

    writer.write_line(&format!("if (!string.IsNullOrEmpty(this.{param}))"));
    writer.open_block();
    writer.write_line("try");
    writer.open_block();
    writer.write_line(&format!(
        "{context_var}.{} = ({enum_type})System.Enum.Parse(typeof({enum_type}), this.{param}, true);",
        property.name
    ));
    writer.close_block();
    writer.write_line("catch (System.ArgumentException)");
    writer.open_block();
    writer.write_line(&format!(
        "throw new System.ArgumentException({}, {});",
        csharp_string_literal(&invalid_value_message(members)),
        csharp_string_literal(param)
    ));
    writer.close_block();
    writer.close_block();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::ParamEmitter;
    use pscmdlet_generator_common::{EnumDefinition, ParamCustomization, ServiceModel};

    fn model() -> ServiceModel {
        let mut model = ServiceModel::from_yaml(
            "service_id: S3\nnamespace: Amazon.S3\nclient_interface: IAmazonS3\n",
        )
        .unwrap();
        model.enums = vec![
            EnumDefinition {
                type_name: "Amazon.S3.HttpVerb".to_string(),
                members: vec!["GET".into(), "HEAD".into(), "PUT".into(), "DELETE".into()],
            },
            EnumDefinition {
                type_name: "Amazon.S3.Protocol".to_string(),
                members: vec!["HTTPS".into(), "HTTP".into()],
            },
        ];
        model
    }

    #[test]
    fn test_declares_string_parameter() {
        let property = PropertyInfo::new("Verb", "Amazon.S3.HttpVerb").required();
        let mut writer = SourceWriter::new();
        ParamEmitter::HttpVerb
            .write_params(&mut writer, &model(), &property, None)
            .unwrap();
        let source = writer.into_string();

        assert!(source.contains("public System.String Verb { get; set; }"));
        assert!(source.contains("Mandatory = true"));
        // The property itself is an enum, so empty strings stay disallowed
        assert!(!source.contains("AllowEmptyString"));
    }

    #[test]
    fn test_optional_when_default_present() {
        let mut property = PropertyInfo::new("Protocol", "Amazon.S3.Protocol").required();
        property.default_value = Some("HTTPS".to_string());
        let mut writer = SourceWriter::new();
        ParamEmitter::Protocol
            .write_params(&mut writer, &model(), &property, None)
            .unwrap();

        assert!(!writer.as_str().contains("Mandatory"));
    }

    #[test]
    fn test_allow_empty_string_for_string_properties() {
        let property = PropertyInfo::new("Verb", "System.String").required();
        let mut writer = SourceWriter::new();
        ParamEmitter::HttpVerb
            .write_params(&mut writer, &model(), &property, None)
            .unwrap();

        assert!(writer
            .as_str()
            .contains("[System.Management.Automation.AllowEmptyString]"));
    }

    #[test]
    fn test_binding_bakes_allowable_values() {
        let property = PropertyInfo::new("Verb", "Amazon.S3.HttpVerb");
        let mut writer = SourceWriter::new();
        ParamEmitter::HttpVerb
            .write_context_members(&mut writer, &model(), "context", &property, None)
            .unwrap();
        let source = writer.into_string();

        assert!(source.contains("if (!string.IsNullOrEmpty(this.Verb))"));
        assert!(source.contains(
            "context.Verb = (Amazon.S3.HttpVerb)System.Enum.Parse(typeof(Amazon.S3.HttpVerb), this.Verb, true);"
        ));
        assert!(source.contains(
            "throw new System.ArgumentException(\"Invalid parameter value; allowable values: GET, HEAD, PUT, DELETE\", \"Verb\");"
        ));
    }

    #[test]
    fn test_binding_uses_renamed_parameter() {
        let property = PropertyInfo::new("Protocol", "Amazon.S3.Protocol");
        let customization = ParamCustomization {
            new_name: Some("UrlProtocol".to_string()),
            aliases: vec![],
        };
        let mut writer = SourceWriter::new();
        ParamEmitter::Protocol
            .write_context_members(
                &mut writer,
                &model(),
                "context",
                &property,
                Some(&customization),
            )
            .unwrap();
        let source = writer.into_string();

        assert!(source.contains("this.UrlProtocol, true"));
        assert!(source.contains("allowable values: HTTPS, HTTP"));
        assert!(source.contains("\"UrlProtocol\");"));
    }

    #[test]
    fn test_unknown_enum_is_generation_error() {
        let property = PropertyInfo::new("Verb", "Amazon.S3.Unknown");
        let mut writer = SourceWriter::new();
        let result = ParamEmitter::HttpVerb.write_context_members(
            &mut writer,
            &model(),
            "context",
            &property,
            None,
        );

        assert!(matches!(result, Err(GeneratorError::Generation(_))));
    }
}
