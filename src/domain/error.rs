use std::collections::BTreeMap;

use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamMemberAPIError {
    #[error("Team member not found: {0}")]
    IDNotFoundError(String),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationErrors),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}

/// Validation failures keyed by the name of the offending field.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("Validation failed for fields: {fields:?}")]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, error: ValidationError) {
        self.fields
            .entry(field.to_owned())
            .or_default()
            .push(error.0);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }
}
