//! Parameter typed as its property, assigned as-is

use super::{parameter_aliases, parameter_name, property_summary, ParameterDeclaration};
use crate::analyzer::TypeAnalyzer;
use crate::writer::SourceWriter;
use pscmdlet_generator_common::{ParamCustomization, PropertyInfo};

pub(super) fn write_params(
    writer: &mut SourceWriter,
    analyzer: &dyn TypeAnalyzer,
    property: &PropertyInfo,
    customization: Option<&ParamCustomization>,
) {
    let summary = property_summary(property);
    let mut extra_attributes = Vec::new();
    if analyzer.is_enum(&property.type_name) {
        extra_attributes.push(format!(
            "[AWSConstantClassSource(\"{}\")]",
            property.type_name
        ));
    }

    ParameterDeclaration {
        name: parameter_name(property, customization),
        type_name: &property.type_name,
        summary: &summary,
        mandatory: property.is_mandatory(),
        allow_empty_string: property.is_mandatory() && property.is_string_type(),
        aliases: parameter_aliases(property, customization),
        extra_attributes,
    }
    .write(writer);
}

pub(super) fn write_context_members(
    writer: &mut SourceWriter,
    context_var: &str,
    property: &PropertyInfo,
    customization: Option<&ParamCustomization>,
) {
    writer.write_line(&format!(
        "{context_var}.{} = this.{};",
        property.name,
        parameter_name(property, customization)
    ));
}
