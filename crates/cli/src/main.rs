//! PowerShell Cmdlet Generator CLI
//!
//! Command-line interface for generating cmdlet sources and display formats
//! from a service model and a display configuration folder.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use pscmdlet_generator_common::ServiceModel;
use pscmdlet_generator_config::{load_all_configs, ConfigModelCollection};
use pscmdlet_generator_generator::{CmdletGenerator, FormatGenerator};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pscmdlet-generator")]
#[command(
    version,
    about = "Generate PowerShell cmdlets and display formats from SDK service models",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the display configuration and summarize it
    #[command(after_help = "EXAMPLES:\n  \
        # Summarize the manifest only\n  \
        pscmdlet-generator show-config --config-dir ./generator/Configs\n\n  \
        # Include the S3 custom format documents and column layouts\n  \
        pscmdlet-generator show-config \\\n    \
        --config-dir ./generator/Configs \\\n    \
        --filter S3 \\\n    \
        --model s3.yaml")]
    ShowConfig {
        /// Folder holding Configs.xml and the CustomFormats folder
        #[arg(short, long)]
        config_dir: PathBuf,

        /// Subfolder of CustomFormats to load custom format documents from
        #[arg(short, long)]
        filter: Option<String>,

        /// Service model used to resolve eligible types and their columns
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Generate the display format document for a service
    #[command(after_help = "EXAMPLES:\n  \
        pscmdlet-generator generate-formats \\\n    \
        --config-dir ./generator/Configs \\\n    \
        --model s3.yaml \\\n    \
        --filter S3 \\\n    \
        --output ./output/AWS.S3.format.ps1xml")]
    GenerateFormats {
        /// Folder holding Configs.xml and the CustomFormats folder
        #[arg(short, long)]
        config_dir: PathBuf,

        /// Service model (YAML or JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Subfolder of CustomFormats to merge into the document
        #[arg(short, long)]
        filter: Option<String>,

        /// Output file (defaults to ./output/AWS.<service>.format.ps1xml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate one cmdlet source file per service operation
    #[command(after_help = "EXAMPLES:\n  \
        pscmdlet-generator generate-cmdlets \\\n    \
        --model s3.yaml \\\n    \
        --output ./output/Cmdlets/S3")]
    GenerateCmdlets {
        /// Service model (YAML or JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::ShowConfig {
            config_dir,
            filter,
            model,
        } => {
            show_config_command(
                config_dir.as_path(),
                filter.as_deref(),
                model.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::GenerateFormats {
            config_dir,
            model,
            filter,
            output,
        } => {
            generate_formats_command(
                config_dir.as_path(),
                model.as_path(),
                filter.as_deref(),
                output.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::GenerateCmdlets { model, output } => {
            generate_cmdlets_command(model.as_path(), output.as_path(), cli.verbose)?;
        }
    }

    Ok(())
}

fn load_configs(
    config_dir: &Path,
    filter: Option<&str>,
    verbose: bool,
) -> Result<ConfigModelCollection> {
    println!(
        "{} Loading display configuration from: {}",
        "→".cyan(),
        config_dir.display()
    );
    let configs = load_all_configs(config_dir, verbose)
        .context("Failed to load display configuration")?
        .verbose(verbose);

    // Without a filter every subfolder of CustomFormats/ is scanned
    let documents = configs
        .load_custom_format_documents(config_dir, filter)
        .context("Failed to load custom format documents")?;
    println!(
        "{} Loaded {} custom format documents for {}",
        "✓".green(),
        documents.len(),
        filter.unwrap_or("all services").yellow()
    );

    Ok(configs)
}

fn load_model(model_path: &Path) -> Result<ServiceModel> {
    println!(
        "{} Loading service model: {}",
        "→".cyan(),
        model_path.display()
    );
    let model = ServiceModel::load(model_path)
        .with_context(|| format!("Failed to load service model {}", model_path.display()))?;
    println!(
        "{} Loaded {} ({} operations, {} types)",
        "✓".green(),
        model.service_id.yellow(),
        model.operations.len(),
        model.types.len()
    );
    Ok(model)
}

fn show_config_command(
    config_dir: &Path,
    filter: Option<&str>,
    model_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let configs = load_configs(config_dir, filter, verbose)?;

    println!("\n{}", "Display Configuration:".bold());
    println!(
        "  Namespaces excluded: {}",
        configs.namespace_exclusion_set().len()
    );
    println!("  Types included: {}", configs.type_inclusion_set().len());
    println!(
        "  Types excluded: {} ({} including custom formats)",
        configs.type_exclusion_set().len(),
        configs.effective_type_exclusions().len()
    );
    println!("  Config blocks: {}", configs.configs.len());

    if verbose {
        println!("\n{}", "Config blocks:".bold());
        for config in &configs.configs {
            println!(
                "  • {} ({} columns{})",
                config.applicable_types.join(", ").cyan(),
                config.columns.len(),
                if config.reflect_over_type() {
                    ", reflects over type"
                } else {
                    ""
                }
            );
        }
    }

    if let Some(model_path) = model_path {
        let model = load_model(model_path)?;
        println!("\n{}", "Types:".bold());
        for type_def in &model.types {
            if !configs.is_type_eligible(&type_def.name) {
                println!("  {} {} (not eligible)", "-".yellow(), type_def.name);
                continue;
            }
            let columns = configs.columns_for_type(&type_def.name, &model);
            let headers: Vec<&str> = columns.iter().map(|c| c.header()).collect();
            println!(
                "  • {}: {}",
                type_def.name.cyan(),
                if headers.is_empty() {
                    "(no columns)".to_string()
                } else {
                    headers.join(", ")
                }
            );
        }
    }

    Ok(())
}

fn generate_formats_command(
    config_dir: &Path,
    model_path: &Path,
    filter: Option<&str>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let configs = load_configs(config_dir, filter, verbose)?;
    let model = load_model(model_path)?;

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from("./output").join(format!("AWS.{}.format.ps1xml", model.service_id))
    });

    if verbose {
        println!("  Service: {}", model.service_id);
        println!("  Output: {}", output.display());
    }

    println!("{} Generating format document...", "→".cyan());
    let generator = FormatGenerator::new(&model, &configs)
        .context("Failed to create format generator")?
        .verbose(verbose);
    let views = generator.views().context("Failed to resolve table views")?;
    generator
        .generate_to_file(&output)
        .context("Failed to generate format document")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("  Generated views: {}", views.len());
    println!("  📄 {}", output.display());

    Ok(())
}

fn generate_cmdlets_command(model_path: &Path, output: &Path, verbose: bool) -> Result<()> {
    let model = load_model(model_path)?;

    if verbose {
        println!("  Service: {}", model.service_id);
        println!("  Noun prefix: {}", model.noun_prefix());
        println!("  Output: {}", output.display());
    }

    println!("{} Generating cmdlets...", "→".cyan());
    let generator = CmdletGenerator::new(&model)
        .context("Failed to create cmdlet generator")?
        .verbose(verbose);
    let written = generator
        .generate_to_directory(output)
        .context("Failed to generate cmdlets")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    for path in &written {
        println!("  📄 {}", path.display());
    }

    Ok(())
}
