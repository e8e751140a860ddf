//! Client-config switches that never reach the request object

use super::{parameter_aliases, parameter_name, ParameterDeclaration};
use crate::writer::SourceWriter;
use pscmdlet_generator_common::{ParamCustomization, PropertyInfo};

pub(super) struct EndpointSwitch {
    pub summary: &'static str,
}

pub(super) const ACCELERATE: EndpointSwitch = EndpointSwitch {
    summary: "Enables S3 accelerate by sending requests to the accelerate endpoint instead of the regular region endpoint.\n\
              To use this feature, the bucket name must be DNS compliant and must not contain periods (.).",
};

pub(super) const DUALSTACK: EndpointSwitch = EndpointSwitch {
    summary: "Configures the request to Amazon S3 to use the dualstack endpoint for a region.\n\
              S3 supports dualstack endpoints which return both IPv6 and IPv4 values.",
};

pub(super) fn write_params(
    writer: &mut SourceWriter,
    switch: &EndpointSwitch,
    property: &PropertyInfo,
    customization: Option<&ParamCustomization>,
) {
    ParameterDeclaration {
        name: parameter_name(property, customization),
        type_name: "System.Management.Automation.SwitchParameter",
        summary: switch.summary,
        mandatory: false,
        allow_empty_string: false,
        aliases: parameter_aliases(property, customization),
        extra_attributes: vec![],
    }
    .write(writer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitters::ParamEmitter;
    use pscmdlet_generator_common::ServiceModel;

    fn model() -> ServiceModel {
        ServiceModel::from_yaml(
            "service_id: S3\nnamespace: Amazon.S3\nclient_interface: IAmazonS3\n",
        )
        .unwrap()
    }

    #[test]
    fn test_switch_declared_without_context_assignment() {
        let property = PropertyInfo::new("UseAccelerateEndpoint", "System.Boolean");
        let model = model();

        for emitter in [ParamEmitter::Accelerate, ParamEmitter::Dualstack] {
            let mut params = SourceWriter::new();
            emitter.write_params(&mut params, &model, &property, None).unwrap();
            let params = params.into_string();
            assert!(params.contains(
                "public System.Management.Automation.SwitchParameter UseAccelerateEndpoint { get; set; }"
            ));
            assert!(!params.contains("Mandatory"));

            let mut context = SourceWriter::new();
            emitter
                .write_context_members(&mut context, &model, "context", &property, None)
                .unwrap();
            assert!(context.is_empty());
        }
    }

    #[test]
    fn test_dualstack_summary() {
        let property = PropertyInfo::new("UseDualstackEndpoint", "System.Boolean");
        let mut writer = SourceWriter::new();
        ParamEmitter::Dualstack
            .write_params(&mut writer, &model(), &property, None)
            .unwrap();
        assert!(writer
            .as_str()
            .contains("/// Configures the request to Amazon S3 to use the dualstack endpoint"));
    }
}
