//! Cmdlet and display format generation
//!
//! This crate turns a service model into C# cmdlet sources and turns the
//! display configuration into a `.format.ps1xml` document. Request properties
//! whose SDK shape has no direct parameter mapping are handled by the
//! [`ParamEmitter`] variants selected through an [`EmitterRegistry`].

mod analyzer;
mod cmdlet;
mod emitters;
mod formats;
mod templates;
mod writer;

pub use analyzer::TypeAnalyzer;
pub use cmdlet::{CmdletGenerator, GeneratedCmdlet};
pub use emitters::{EmitterRegistry, ParamEmitter, ANY_OPERATION};
pub use formats::{FormatGenerator, TableView, ViewColumn, MASKED_SCRIPT_BLOCK};
pub use writer::{csharp_string_literal, SourceWriter};

use pscmdlet_generator_common::{Result, ServiceModel};
use pscmdlet_generator_config::ConfigModelCollection;
use std::path::{Path, PathBuf};

/// Generate one cmdlet source file per operation (convenience function)
pub fn generate_cmdlets(model: &ServiceModel, output_dir: &Path) -> Result<Vec<PathBuf>> {
    CmdletGenerator::new(model)?.generate_to_directory(output_dir)
}

/// Generate the format document for a service (convenience function)
///
/// Custom format documents under `config_root` are loaded first, restricted to
/// the `filter` subfolder when one is given.
pub fn generate_formats(
    model: &ServiceModel,
    configs: &ConfigModelCollection,
    config_root: &Path,
    filter: Option<&str>,
    output_path: &Path,
) -> Result<()> {
    configs.load_custom_format_documents(config_root, filter)?;
    FormatGenerator::new(model, configs)?.generate_to_file(output_path)
}
