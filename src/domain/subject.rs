//! Subject documents.

use serde::{Deserialize, Serialize};

use crate::domain::{Document, DocumentId, User};
use crate::error::ValidationError;

/// A persisted subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Store-generated identifier.
    #[serde(rename = "_id")]
    pub id: DocumentId,

    /// Subject name.
    pub name: String,

    /// Teacher in charge.
    pub teacher: String,

    /// Reference to the enrolled student.
    pub alumni: DocumentId,
}

impl Document for Subject {
    const MODEL: &'static str = "Subject";
    const COLLECTION: &'static str = "subjects";

    fn id(&self) -> DocumentId {
        self.id
    }
}

/// Unvalidated create request body.
///
/// Every field is optional at the wire level so that missing fields surface
/// as validation failures rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectDraft {
    /// Subject name.
    pub name: Option<String>,
    /// Teacher in charge.
    pub teacher: Option<String>,
    /// Raw student reference.
    pub alumni: Option<String>,
}

impl SubjectDraft {
    /// Validate the draft into a subject ready to persist.
    ///
    /// # Errors
    ///
    /// Returns every missing or empty field, and a cast error if `alumni` is
    /// not a well-formed identifier.
    pub fn validate(self) -> Result<NewSubject, ValidationError> {
        let mut errors = ValidationError::for_model(Subject::MODEL);

        let name = errors.required("name", self.name);
        let teacher = errors.required("teacher", self.teacher);
        let alumni = errors.required_reference("alumni", self.alumni);

        match (name, teacher, alumni) {
            (Some(name), Some(teacher), Some(alumni)) if errors.is_empty() => Ok(NewSubject {
                name,
                teacher,
                alumni,
            }),
            _ => Err(errors),
        }
    }
}

/// A validated subject without an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    /// Subject name.
    pub name: String,
    /// Teacher in charge.
    pub teacher: String,
    /// Reference to the enrolled student.
    pub alumni: DocumentId,
}

impl NewSubject {
    /// Attach a store-generated identifier.
    #[must_use]
    pub fn into_subject(self, id: DocumentId) -> Subject {
        Subject {
            id,
            name: self.name,
            teacher: self.teacher,
            alumni: self.alumni,
        }
    }
}

/// Unvalidated partial update body.
///
/// Unknown fields are ignored and `null` counts as not supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectPatch {
    /// New subject name.
    pub name: Option<String>,
    /// New teacher.
    pub teacher: Option<String>,
    /// New raw student reference.
    pub alumni: Option<String>,
}

impl SubjectPatch {
    /// Validate the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied field is empty or `alumni` is malformed.
    pub fn validate(self) -> Result<SubjectChanges, ValidationError> {
        let mut errors = ValidationError::for_update();

        let changes = SubjectChanges {
            name: errors.present("name", self.name),
            teacher: errors.present("teacher", self.teacher),
            alumni: errors.present_reference("alumni", self.alumni),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }
}

/// Validated field changes for a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectChanges {
    /// New subject name.
    pub name: Option<String>,
    /// New teacher.
    pub teacher: Option<String>,
    /// New student reference.
    pub alumni: Option<DocumentId>,
}

impl SubjectChanges {
    /// Apply the changes in place.
    ///
    /// Returns `true` if any stored value actually changed.
    pub fn apply(&self, subject: &mut Subject) -> bool {
        let mut modified = false;

        if let Some(name) = &self.name
            && subject.name != *name
        {
            subject.name.clone_from(name);
            modified = true;
        }

        if let Some(teacher) = &self.teacher
            && subject.teacher != *teacher
        {
            subject.teacher.clone_from(teacher);
            modified = true;
        }

        if let Some(alumni) = self.alumni
            && subject.alumni != alumni
        {
            subject.alumni = alumni;
            modified = true;
        }

        modified
    }
}

/// A subject with its `alumni` reference expanded, as returned by the store.
///
/// `alumni` is `None` when the referenced user no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulatedSubject {
    /// Subject identifier.
    pub id: DocumentId,
    /// Subject name.
    pub name: String,
    /// Teacher in charge.
    pub teacher: String,
    /// Expanded student.
    pub alumni: Option<User>,
}

impl PopulatedSubject {
    /// Combine a subject with the user its reference resolved to.
    #[must_use]
    pub fn new(subject: Subject, alumni: Option<User>) -> Self {
        Self {
            id: subject.id,
            name: subject.name,
            teacher: subject.teacher,
            alumni,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: Option<&str>, teacher: Option<&str>, alumni: Option<String>) -> SubjectDraft {
        SubjectDraft {
            name: name.map(str::to_string),
            teacher: teacher.map(str::to_string),
            alumni,
        }
    }

    fn stored() -> Subject {
        Subject {
            id: DocumentId::generate(),
            name: "Algebra".to_string(),
            teacher: "Ms. Noether".to_string(),
            alumni: DocumentId::generate(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let alumni = DocumentId::generate();
        let new = draft(Some("Algebra"), Some("Ms. Noether"), Some(alumni.to_string()))
            .validate()
            .unwrap();
        assert_eq!(new.name, "Algebra");
        assert_eq!(new.alumni, alumni);
    }

    #[test]
    fn test_missing_teacher() {
        let err = draft(Some("Algebra"), None, Some(DocumentId::generate().to_string()))
            .validate()
            .unwrap_err();
        assert_eq!(err.model(), Some("Subject"));
        assert_eq!(
            err.to_string(),
            "Subject validation failed: teacher: Path `teacher` is required."
        );
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let err = SubjectDraft::default().validate().unwrap_err();
        let paths: Vec<_> = err.errors().iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["name", "teacher", "alumni"]);
    }

    #[test]
    fn test_malformed_alumni() {
        let err = draft(Some("Algebra"), Some("Ms. Noether"), Some("42".to_string()))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Cast to DocumentId failed"));
    }

    #[test]
    fn test_patch_applies_only_supplied_fields() {
        let mut subject = stored();
        let before = subject.clone();

        let changes = SubjectPatch {
            name: Some("Geometry".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert!(changes.apply(&mut subject));
        assert_eq!(subject.name, "Geometry");
        assert_eq!(subject.teacher, before.teacher);
        assert_eq!(subject.alumni, before.alumni);
    }

    #[test]
    fn test_patch_same_value_not_modified() {
        let mut subject = stored();
        let changes = SubjectPatch {
            teacher: Some(subject.teacher.clone()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert!(!changes.apply(&mut subject));
    }

    #[test]
    fn test_patch_rejects_empty_name() {
        let err = SubjectPatch {
            name: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.model(), None);
    }

    #[test]
    fn test_patch_ignores_unknown_and_null_fields() {
        let patch: SubjectPatch =
            serde_json::from_str(r#"{"name": null, "description": "x"}"#).unwrap();
        assert_eq!(patch.validate().unwrap(), SubjectChanges::default());
    }

    #[test]
    fn test_subject_wire_format() {
        let subject = stored();
        let value = serde_json::to_value(&subject).unwrap();
        assert_eq!(value["_id"], subject.id.to_string());
        assert_eq!(value["alumni"], subject.alumni.to_string());
        assert!(value.get("id").is_none());
    }
}
