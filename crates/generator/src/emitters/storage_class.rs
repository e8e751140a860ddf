//! S3 storage class exposed as a pair of switches

use super::ParameterDeclaration;
use crate::writer::SourceWriter;
use pscmdlet_generator_common::PropertyInfo;
use pscmdlet_generator_runtime::{
    S3StorageClass, REDUCED_REDUNDANCY_STORAGE_PARAMETER, STANDARD_STORAGE_PARAMETER,
};

const SWITCH_TYPE: &str = "System.Management.Automation.SwitchParameter";

pub(super) fn write_params(writer: &mut SourceWriter) {
    let switches = [
        (
            STANDARD_STORAGE_PARAMETER,
            "Specifies the STANDARD storage class, which is the default storage class for S3 objects.\n\
             Provides a 99.999999999% durability guarantee.",
        ),
        (
            REDUCED_REDUNDANCY_STORAGE_PARAMETER,
            "Specifies S3 should use REDUCED_REDUNDANCY storage class for the object.\n\
             This provides a reduced (99.99%) durability guarantee at a lower cost as compared to the STANDARD storage class.",
        ),
    ];

    for (name, summary) in switches {
        ParameterDeclaration {
            name,
            type_name: SWITCH_TYPE,
            summary,
            mandatory: false,
            allow_empty_string: false,
            aliases: vec![],
            extra_attributes: vec![],
        }
        .write(writer);
    }
}

/// Standard is tested first; with neither switch present the property is left
/// unset
pub(super) fn write_context_members(
    writer: &mut SourceWriter,
    context_var: &str,
    property: &PropertyInfo,
) {
    let branches = [
        ("if", STANDARD_STORAGE_PARAMETER, S3StorageClass::Standard),
        (
            "else if",
            REDUCED_REDUNDANCY_STORAGE_PARAMETER,
            S3StorageClass::ReducedRedundancy,
        ),
    ];

    for (keyword, switch, class) in branches {
        writer.write_line(&format!("{keyword} (this.{switch}.IsPresent)"));
        writer.open_block();
        writer.write_line(&format!(
            "{context_var}.{} = {}.{};",
            property.name,
            property.type_name,
            class.sdk_member()
        ));
        writer.close_block();
    }
}
