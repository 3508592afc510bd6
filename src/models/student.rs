//! Student record.

use serde::Serialize;
use serde_json::Value;

use super::Fields;

/// A student. Fields are stored exactly as submitted; `age` keeps its JSON type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Public path of the uploaded image, if one was attached at creation.
    pub image: Option<String>,
}

/// Validated input for creating a student.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub name: Option<String>,
    pub age: Option<Value>,
    pub class_name: Option<String>,
    pub image: Option<String>,
}

impl NewStudent {
    /// Students have no required fields.
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            name: fields.text("name"),
            age: fields.value("age"),
            class_name: fields.text("className"),
            image: None,
        }
    }
}

/// Editable student fields; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<Value>,
    pub class_name: Option<String>,
}

impl StudentPatch {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            name: fields.text("name"),
            age: fields.value("age"),
            class_name: fields.text("className"),
        }
    }
}

impl Student {
    pub fn new(id: u64, draft: NewStudent) -> Self {
        Self {
            id,
            name: draft.name,
            age: draft.age,
            class_name: draft.class_name,
            image: draft.image,
        }
    }

    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
        if let Some(class_name) = patch.class_name {
            self.class_name = Some(class_name);
        }
    }
}
