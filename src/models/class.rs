//! Class record.

use serde::Serialize;

use super::Fields;
use crate::errors::AppError;

/// A class. `students` is a plain headcount, not a link to student records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: u64,
    pub class_name: String,
    pub students: u32,
}

/// Validated input for creating a class.
#[derive(Debug, Clone)]
pub struct NewClass {
    pub class_name: String,
    pub students: u32,
}

impl NewClass {
    /// `className` is required; a missing or non-numeric headcount becomes zero.
    pub fn from_fields(fields: &Fields) -> Result<Self, AppError> {
        Ok(Self {
            class_name: fields.required("className")?,
            students: fields.count("students").unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassPatch {
    pub class_name: Option<String>,
    pub students: Option<u32>,
}

impl ClassPatch {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            class_name: fields.text("className"),
            students: fields.count("students"),
        }
    }
}

impl Class {
    pub fn new(id: u64, draft: NewClass) -> Self {
        Self {
            id,
            class_name: draft.class_name,
            students: draft.students,
        }
    }

    pub fn apply(&mut self, patch: ClassPatch) {
        if let Some(class_name) = patch.class_name {
            self.class_name = class_name;
        }
        if let Some(students) = patch.students {
            self.students = students;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_students_defaults_to_zero() {
        let fields: Fields = [("className", "3B")].into_iter().collect();
        let draft = NewClass::from_fields(&fields).unwrap();
        assert_eq!(draft.students, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let fields: Fields = [("className", "3B"), ("students", "25")]
            .into_iter()
            .collect();
        let class = Class::new(1, NewClass::from_fields(&fields).unwrap());
        assert_eq!(
            serde_json::to_value(&class).unwrap(),
            json!({ "id": 1, "className": "3B", "students": 25 })
        );
    }

    #[test]
    fn test_patch_without_students_keeps_headcount() {
        let mut class = Class::new(
            1,
            NewClass {
                class_name: "3B".into(),
                students: 25,
            },
        );
        let fields: Fields = [("className", "4B")].into_iter().collect();
        class.apply(ClassPatch::from_fields(&fields));
        assert_eq!(class.class_name, "4B");
        assert_eq!(class.students, 25);
    }
}
