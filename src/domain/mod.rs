//! Domain models for the subjects API.
//!
//! This module contains the persisted document types, the request drafts that
//! are validated before any store call, and the store acknowledgements.

pub mod dto;
pub mod id;
pub mod subject;
pub mod user;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use dto::{DeleteResult, ErrorBody, UpdateResult};
pub use id::DocumentId;
pub use subject::{
    NewSubject, PopulatedSubject, Subject, SubjectChanges, SubjectDraft, SubjectPatch,
};
pub use user::{NewUser, User, UserDraft};

/// A record persisted in a document store collection.
pub trait Document: Send + Sync + Clone + Serialize + DeserializeOwned + 'static {
    /// Model name used in error messages.
    const MODEL: &'static str;

    /// Collection the documents live in.
    const COLLECTION: &'static str;

    /// Get the store-generated identifier.
    fn id(&self) -> DocumentId;
}
