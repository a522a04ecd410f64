//! Document validation errors.
//!
//! Drafts are checked field by field before any store call. All field errors
//! are collected so one failure reports every offending path, in declaration
//! order.

use std::fmt;

use crate::domain::DocumentId;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A required field was missing or empty.
    #[error("Path `{path}` is required.")]
    Required {
        /// Field path.
        path: &'static str,
    },

    /// A reference field did not hold a well-formed identifier.
    #[error("Cast to DocumentId failed for value \"{value}\" (type string) at path \"{path}\"")]
    Cast {
        /// Field path.
        path: &'static str,
        /// Offending raw value.
        value: String,
    },
}

impl FieldError {
    /// Get the path of the offending field.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Required { path } | Self::Cast { path, .. } => path,
        }
    }
}

/// Validation failure for a whole document or partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    model: Option<&'static str>,
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Start collecting errors for a new document of `model`.
    #[must_use]
    pub const fn for_model(model: &'static str) -> Self {
        Self {
            model: Some(model),
            errors: Vec::new(),
        }
    }

    /// Start collecting errors for a partial update.
    #[must_use]
    pub const fn for_update() -> Self {
        Self {
            model: None,
            errors: Vec::new(),
        }
    }

    /// Model name, if this failure belongs to a new document.
    #[must_use]
    pub const fn model(&self) -> Option<&'static str> {
        self.model
    }

    /// All collected field errors.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether no field error was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a field error.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Check a required string field.
    pub fn required(&mut self, path: &'static str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value.is_empty() => Some(value),
            _ => {
                self.push(FieldError::Required { path });
                None
            }
        }
    }

    /// Check a string field of a partial update. Absent is fine, empty is not.
    pub fn present(&mut self, path: &'static str, value: Option<String>) -> Option<String> {
        value.and_then(|value| self.required(path, Some(value)))
    }

    /// Check a required reference field.
    pub fn required_reference(
        &mut self,
        path: &'static str,
        value: Option<String>,
    ) -> Option<DocumentId> {
        let raw = self.required(path, value)?;
        match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                self.push(FieldError::Cast { path, value: raw });
                None
            }
        }
    }

    /// Check a reference field of a partial update.
    pub fn present_reference(
        &mut self,
        path: &'static str,
        value: Option<String>,
    ) -> Option<DocumentId> {
        value.and_then(|value| self.required_reference(path, Some(value)))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model {
            Some(model) => write!(f, "{model} validation failed: ")?,
            None => write!(f, "Validation failed: ")?,
        }

        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {error}", error.path())?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}
