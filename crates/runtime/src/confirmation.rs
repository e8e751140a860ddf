//! Confirmation-prompt summaries of bound parameter values
//!
//! Mutating cmdlets describe the resources they are about to touch before
//! asking for confirmation. Building that text must never fail the cmdlet,
//! so [`try_format_parameter_values`] reports failures as
//! [`FormattingFailure`] and [`format_parameter_values_for_confirmation`]
//! turns them into a generic description.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Elements of a sequence value shown before the remainder is summarized
pub const MAX_SEQUENCE_ELEMENTS: usize = 10;

/// Longest multi-parameter summary kept before truncation
pub const MAX_MESSAGE_LENGTH: usize = 100;

type DisplayValue = Box<dyn fmt::Display + Send + Sync>;

/// A value bound to one cmdlet parameter
pub enum BoundValue {
    Null,
    Scalar(DisplayValue),
    /// Array-like value; `None` elements are nulls
    Sequence(Vec<Option<DisplayValue>>),
}

impl BoundValue {
    pub fn scalar<T: fmt::Display + Send + Sync + 'static>(value: T) -> Self {
        BoundValue::Scalar(Box::new(value))
    }

    pub fn sequence<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display + Send + Sync + 'static,
    {
        BoundValue::Sequence(
            values
                .into_iter()
                .map(|v| Some(Box::new(v) as DisplayValue))
                .collect(),
        )
    }

    pub fn sequence_with_nulls<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<T>>,
        T: fmt::Display + Send + Sync + 'static,
    {
        BoundValue::Sequence(
            values
                .into_iter()
                .map(|v| v.map(|v| Box::new(v) as DisplayValue))
                .collect(),
        )
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, BoundValue::Sequence(_))
    }
}

impl fmt::Debug for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Null => write!(f, "Null"),
            BoundValue::Scalar(_) => write!(f, "Scalar(..)"),
            BoundValue::Sequence(items) => write!(f, "Sequence(len = {})", items.len()),
        }
    }
}

/// Parameters bound on the current invocation, keyed by parameter name
pub type BoundParameters = HashMap<String, BoundValue>;

/// A bound value could not be converted to text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to render the value bound to parameter {parameter}")]
pub struct FormattingFailure {
    pub parameter: String,
}

impl FormattingFailure {
    /// Description used in place of the value
    pub fn fallback_message(&self) -> String {
        format!("the values bound to the parameter {}", self.parameter)
    }
}

/// Summarize `names` for a confirmation prompt; never fails
pub fn format_parameter_values_for_confirmation(
    names: &[&str],
    bound: Option<&BoundParameters>,
) -> String {
    try_format_parameter_values(names, bound).unwrap_or_else(|failure| failure.fallback_message())
}

/// Summarize `names` for a confirmation prompt.
///
/// A single name renders its value; sequences are joined with `", "` and cut
/// after [`MAX_SEQUENCE_ELEMENTS`]. Several scalar names are joined with `-`
/// and cut after [`MAX_MESSAGE_LENGTH`] characters. If any of several names
/// holds a sequence, only the first name is rendered.
pub fn try_format_parameter_values(
    names: &[&str],
    bound: Option<&BoundParameters>,
) -> Result<String, FormattingFailure> {
    let (Some(bound), Some(first)) = (bound, names.first()) else {
        return Ok(String::new());
    };

    if names.len() == 1
        || names
            .iter()
            .any(|n| bound.get(*n).is_some_and(BoundValue::is_sequence))
    {
        return format_single(first, bound);
    }

    let mut parts = Vec::with_capacity(names.len());
    for name in names {
        if let Some(BoundValue::Scalar(value)) = bound.get(*name) {
            parts.push(render(name, value.as_ref())?);
        }
    }

    let joined = parts.join("-");
    if joined.chars().count() > MAX_MESSAGE_LENGTH {
        let truncated: String = joined.chars().take(MAX_MESSAGE_LENGTH).collect();
        return Ok(format!("{truncated}..."));
    }
    Ok(joined)
}

fn format_single(name: &str, bound: &BoundParameters) -> Result<String, FormattingFailure> {
    match bound.get(name) {
        None | Some(BoundValue::Null) => Ok(String::new()),
        Some(BoundValue::Scalar(value)) => render(name, value.as_ref()),
        Some(BoundValue::Sequence(items)) => {
            let shown = items
                .iter()
                .take(MAX_SEQUENCE_ELEMENTS)
                .map(|item| match item {
                    Some(value) => render(name, value.as_ref()),
                    None => Ok("null".to_string()),
                })
                .collect::<Result<Vec<_>, _>>()?;

            let mut text = shown.join(", ");
            if items.len() > MAX_SEQUENCE_ELEMENTS {
                text.push_str(&format!(
                    " (plus {} more)",
                    items.len() - MAX_SEQUENCE_ELEMENTS
                ));
            }
            Ok(text)
        }
    }
}

fn render(
    name: &str,
    value: &(dyn fmt::Display + Send + Sync),
) -> Result<String, FormattingFailure> {
    let mut text = String::new();
    fmt::write(&mut text, format_args!("{value}")).map_err(|_| FormattingFailure {
        parameter: name.to_string(),
    })?;
    Ok(text)
}
