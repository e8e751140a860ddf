//! String-to-enum validation for parameters declared as strings

use crate::{Result, RuntimeError};

/// Message raised when a value matches none of `allowed`.
///
/// The generator bakes this exact text into emitted binding code.
pub fn invalid_value_message<S: AsRef<str>>(allowed: &[S]) -> String {
    let names: Vec<&str> = allowed.iter().map(|s| s.as_ref()).collect();
    format!(
        "Invalid parameter value; allowable values: {}",
        names.join(", ")
    )
}

/// Legal member names of an SDK enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValues {
    type_name: String,
    members: Vec<String>,
}

impl EnumValues {
    pub fn new<I, S>(type_name: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: type_name.to_string(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn invalid_value_message(&self) -> String {
        invalid_value_message(self.members.as_slice())
    }

    /// Match `value` case-insensitively, returning the canonical member name
    pub fn parse(&self, parameter: &str, value: &str) -> Result<&str> {
        self.members
            .iter()
            .find(|m| m.eq_ignore_ascii_case(value))
            .map(String::as_str)
            .ok_or_else(|| RuntimeError::InvalidEnumValue {
                parameter: parameter.to_string(),
                value: value.to_string(),
                allowed: self.members.clone(),
            })
    }
}
