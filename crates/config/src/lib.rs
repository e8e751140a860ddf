//! Display-format configuration for the PowerShell cmdlet generator
//!
//! Loads the `Configs.xml` manifest describing which SDK response types get
//! generated table views and which columns they show, and layers hand-written
//! custom format documents on top of it.
//!
//! # Examples
//!
//! ```no_run
//! use pscmdlet_generator_config::load_all_configs;
//! use std::path::Path;
//!
//! let configs = load_all_configs(Path::new("./generator/Configs"), true)
//!     .expect("manifest should load");
//! let custom = configs
//!     .load_custom_format_documents(Path::new("./generator/Configs"), Some("S3"))
//!     .expect("custom formats should parse");
//!
//! println!("{} custom documents", custom.len());
//! assert!(!configs.is_type_eligible("Amazon.S3.Internal.S3Signer"));
//! ```

mod column;
mod custom_formats;
mod model;
mod resolver;

pub use column::{ColumnConfig, HeaderAlignment};
pub use custom_formats::CustomFormatDocument;
pub use model::{load_all_configs, ConfigModel, ConfigModelCollection};
pub use resolver::{namespace_of, TypeCatalog};

/// Manifest file name inside the configurations folder
pub const CONFIGS_FILE_NAME: &str = "Configs.xml";

/// Subfolder of the configurations folder holding custom format documents
pub const CUSTOM_FORMATS_FOLDER: &str = "CustomFormats";

/// Extension of custom format documents
pub const CUSTOM_FORMAT_EXTENSION: &str = "ps1xml";

/// Namespace segment that marks SDK-internal types
pub const INTERNAL_NAMESPACE_MARKER: &str = "Internal";
