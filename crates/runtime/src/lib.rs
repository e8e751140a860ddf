//! Runtime helpers for generated PowerShell cmdlets
//!
//! Generated cmdlet bodies stay thin; the behavior they share lives here:
//! - auto-iteration over paginated service operations
//! - confirmation-prompt summaries of bound parameters
//! - case-insensitive validation of string parameters against SDK enums
//! - resolution of the S3 storage-class switch pair

pub mod auto_iteration;
pub mod confirmation;
mod enum_values;
mod error;
mod storage_class;

pub use auto_iteration::{
    AutoIterationOptions, AutoIterator, CancellationFlag, ErrorRecord, IterationState,
    IterationSummary, Page, PageService, PaginatedRequest, PipelineSink, ProgressRecord,
    ServiceError,
};
pub use confirmation::{
    format_parameter_values_for_confirmation, try_format_parameter_values, BoundParameters,
    BoundValue, FormattingFailure,
};
pub use enum_values::{invalid_value_message, EnumValues};
pub use error::{Result, RuntimeError};
pub use storage_class::{
    resolve_storage_class, S3StorageClass, StorageClassSwitches,
    REDUCED_REDUNDANCY_STORAGE_PARAMETER, STANDARD_STORAGE_PARAMETER,
};
