//! Display format (`.format.ps1xml`) generation

use pscmdlet_generator_common::{GeneratorError, Result, ServiceModel};
use pscmdlet_generator_config::{
    ColumnConfig, ConfigModelCollection, CustomFormatDocument, HeaderAlignment,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::Tera;

/// Script block shown in place of a sensitive column's value
pub const MASKED_SCRIPT_BLOCK: &str = "'********'";

/// One table view of the generated document
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub type_name: String,
    pub columns: Vec<ViewColumn>,
}

/// One column of a table view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewColumn {
    pub label: String,
    pub width: u32,
    pub alignment: String,
    pub property_name: String,
    pub script_block: Option<String>,
}

impl ViewColumn {
    fn from_config(config: &ColumnConfig) -> Self {
        let property_name = config
            .property_name
            .clone()
            .unwrap_or_else(|| config.header().to_string());
        let script_block = if config.sensitive {
            Some(MASKED_SCRIPT_BLOCK.to_string())
        } else {
            config.script_block.clone()
        };
        let alignment = match config.header_alignment {
            HeaderAlignment::None => "",
            HeaderAlignment::Left => "Left",
            HeaderAlignment::Right => "Right",
        };

        Self {
            label: config.header().to_string(),
            width: config.header_width,
            alignment: alignment.to_string(),
            property_name,
            script_block,
        }
    }
}

/// Format document generator
///
/// Produces one table view per eligible service type that has at least one
/// configured column, followed by the views of the custom format documents
/// loaded into the configuration. Custom format documents must be loaded
/// first: their types are excluded from generation.
pub struct FormatGenerator<'a> {
    model: &'a ServiceModel,
    configs: &'a ConfigModelCollection,
    tera: Tera,
    verbose: bool,
}

impl<'a> FormatGenerator<'a> {
    pub fn new(model: &'a ServiceModel, configs: &'a ConfigModelCollection) -> Result<Self> {
        Ok(Self {
            model,
            configs,
            tera: crate::templates::load_templates()?,
            verbose: false,
        })
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

    /// Custom format documents, failing if they have not been loaded yet
    fn custom_documents(&self) -> Result<&'a [CustomFormatDocument]> {
        self.configs.custom_format_documents().ok_or_else(|| {
            GeneratorError::Generation(
                "Custom format documents must be loaded before generating formats".to_string(),
            )
        })
    }

    /// Table views for every eligible type, in model order
    pub fn views(&self) -> Result<Vec<TableView>> {
        self.custom_documents()?;

        let mut views = Vec::new();
        for type_def in &self.model.types {
            if !self.configs.is_type_eligible(&type_def.name) {
                self.log(&format!("Skipping {}", type_def.name));
                continue;
            }

            let columns: Vec<ViewColumn> = self
                .configs
                .columns_for_type(&type_def.name, self.model)
                .iter()
                .map(ViewColumn::from_config)
                .collect();
            if columns.is_empty() {
                self.log(&format!("No columns configured for {}", type_def.name));
                continue;
            }

            views.push(TableView {
                type_name: type_def.name.clone(),
                columns,
            });
        }
        Ok(views)
    }

    /// Render the complete format document
    pub fn render(&self) -> Result<String> {
        let views = self.views()?;
        let custom_views: Vec<&str> = self
            .custom_documents()?
            .iter()
            .flat_map(|doc| doc.views.iter().map(String::as_str))
            .collect();
        self.log(&format!(
            "Rendering {} generated and {} custom views",
            views.len(),
            custom_views.len()
        ));

        let mut context = tera::Context::new();
        context.insert("service_id", &self.model.service_id);
        context.insert("views", &views);
        context.insert("custom_views", &custom_views);

        self.tera
            .render("format.ps1xml", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))
    }

    /// Render and write the document to `output_path`
    pub fn generate_to_file(&self, output_path: &Path) -> Result<()> {
        let rendered = self.render()?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GeneratorError::Generation(format!("Failed to create output directory: {}", e))
            })?;
        }
        fs::write(output_path, rendered).map_err(|e| {
            GeneratorError::Generation(format!(
                "Failed to write {}: {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
