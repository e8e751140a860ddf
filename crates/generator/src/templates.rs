//! Template loading and management

use crate::writer::csharp_string_literal;
use pscmdlet_generator_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("cs_string", cs_string_filter);

    tera.add_raw_template("cmdlet.cs", include_str!("../templates/cmdlet.cs.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load cmdlet.cs template: {}", e))
        })?;

    tera.add_raw_template(
        "format.ps1xml",
        include_str!("../templates/format.ps1xml.tera"),
    )
    .map_err(|e| {
        GeneratorError::Generation(format!("Failed to load format.ps1xml template: {}", e))
    })?;

    Ok(tera)
}

/// Filter to quote a value as a C# string literal
fn cs_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("cs_string filter expects a string"))?;

    Ok(Value::String(csharp_string_literal(s)))
}
