//! User (student) documents referenced by subjects.

use serde::{Deserialize, Serialize};

use crate::domain::{Document, DocumentId};
use crate::error::ValidationError;

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Document for User {
    const MODEL: &'static str = "User";
    const COLLECTION: &'static str = "users";

    fn id(&self) -> DocumentId {
        self.id
    }
}

/// Unvalidated create request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDraft {
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

impl UserDraft {
    /// Validate the draft into a user ready to persist.
    ///
    /// # Errors
    ///
    /// Returns every missing or empty field.
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        let mut errors = ValidationError::for_model(User::MODEL);

        let name = errors.required("name", self.name);
        let email = errors.required("email", self.email);

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(NewUser { name, email }),
            _ => Err(errors),
        }
    }
}

/// A validated user without an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl NewUser {
    /// Attach a store-generated identifier.
    #[must_use]
    pub fn into_user(self, id: DocumentId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_email() {
        let err = UserDraft {
            name: Some("Ada".to_string()),
            email: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "User validation failed: email: Path `email` is required."
        );
    }

    #[test]
    fn test_valid_user() {
        let id = DocumentId::generate();
        let user = UserDraft {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        }
        .validate()
        .unwrap()
        .into_user(id);
        assert_eq!(user.id, id);
        assert_eq!(user.email, "ada@example.com");
    }
}
