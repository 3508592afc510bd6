//! Teacher record.

use serde::Serialize;

use super::Fields;
use crate::errors::AppError;

/// A teacher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: u64,
    pub name: String,
    pub subject: String,
    pub image: Option<String>,
}

/// Validated input for creating a teacher.
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: String,
    pub subject: String,
    pub image: Option<String>,
}

impl NewTeacher {
    /// Both `name` and `subject` are required; the image is optional.
    pub fn from_fields(fields: &Fields) -> Result<Self, AppError> {
        Ok(Self {
            name: fields.required("name")?,
            subject: fields.required("subject")?,
            image: None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub subject: Option<String>,
}

impl TeacherPatch {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            name: fields.text("name"),
            subject: fields.text("subject"),
        }
    }
}

impl Teacher {
    pub fn new(id: u64, draft: NewTeacher) -> Self {
        Self {
            id,
            name: draft.name,
            subject: draft.subject,
            image: draft.image,
        }
    }

    pub fn apply(&mut self, patch: TeacherPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
    }
}
