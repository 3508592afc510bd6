//! Kind-tagged wrappers used by the generic `/api/{type}` handlers.

use serde::Serialize;

use super::{
    Class, ClassPatch, EntityKind, Fields, NewClass, NewStudent, NewTeacher, Student,
    StudentPatch, Teacher, TeacherPatch,
};
use crate::errors::AppError;

/// A single stored record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Student(Student),
    Teacher(Teacher),
    Class(Class),
}

impl Entity {
    pub fn id(&self) -> u64 {
        match self {
            Entity::Student(s) => s.id,
            Entity::Teacher(t) => t.id,
            Entity::Class(c) => c.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Student(_) => EntityKind::Students,
            Entity::Teacher(_) => EntityKind::Teachers,
            Entity::Class(_) => EntityKind::Classes,
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            Entity::Student(s) => s.image.as_deref(),
            Entity::Teacher(t) => t.image.as_deref(),
            Entity::Class(_) => None,
        }
    }
}

/// A whole collection, serialized as a plain JSON array.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EntityList {
    Students(Vec<Student>),
    Teachers(Vec<Teacher>),
    Classes(Vec<Class>),
}

impl EntityList {
    pub fn len(&self) -> usize {
        match self {
            EntityList::Students(v) => v.len(),
            EntityList::Teachers(v) => v.len(),
            EntityList::Classes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validated creation input; the variant selects the target collection.
#[derive(Debug, Clone)]
pub enum EntityDraft {
    Student(NewStudent),
    Teacher(NewTeacher),
    Class(NewClass),
}

impl EntityDraft {
    /// Build and validate a draft for `kind` from submitted fields.
    pub fn from_fields(kind: EntityKind, fields: &Fields) -> Result<Self, AppError> {
        Ok(match kind {
            EntityKind::Students => EntityDraft::Student(NewStudent::from_fields(fields)),
            EntityKind::Teachers => EntityDraft::Teacher(NewTeacher::from_fields(fields)?),
            EntityKind::Classes => EntityDraft::Class(NewClass::from_fields(fields)?),
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityDraft::Student(_) => EntityKind::Students,
            EntityDraft::Teacher(_) => EntityKind::Teachers,
            EntityDraft::Class(_) => EntityKind::Classes,
        }
    }

    /// Attach an uploaded image path. Classes have no image and ignore it.
    pub fn with_image(mut self, path: String) -> Self {
        match &mut self {
            EntityDraft::Student(s) => s.image = Some(path),
            EntityDraft::Teacher(t) => t.image = Some(path),
            EntityDraft::Class(_) => {}
        }
        self
    }
}

/// Editable fields for one kind.
#[derive(Debug, Clone)]
pub enum EntityPatch {
    Student(StudentPatch),
    Teacher(TeacherPatch),
    Class(ClassPatch),
}

impl EntityPatch {
    pub fn from_fields(kind: EntityKind, fields: &Fields) -> Self {
        match kind {
            EntityKind::Students => EntityPatch::Student(StudentPatch::from_fields(fields)),
            EntityKind::Teachers => EntityPatch::Teacher(TeacherPatch::from_fields(fields)),
            EntityKind::Classes => EntityPatch::Class(ClassPatch::from_fields(fields)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityPatch::Student(_) => EntityKind::Students,
            EntityPatch::Teacher(_) => EntityKind::Teachers,
            EntityPatch::Class(_) => EntityKind::Classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation_follows_kind() {
        let empty = Fields::new();
        assert!(EntityDraft::from_fields(EntityKind::Students, &empty).is_ok());
        assert!(matches!(
            EntityDraft::from_fields(EntityKind::Teachers, &empty),
            Err(AppError::MissingField("name"))
        ));
        assert!(matches!(
            EntityDraft::from_fields(EntityKind::Classes, &empty),
            Err(AppError::MissingField("className"))
        ));
    }

    #[test]
    fn test_with_image_ignored_for_classes() {
        let fields: Fields = [("className", "3B")].into_iter().collect();
        let draft = EntityDraft::from_fields(EntityKind::Classes, &fields)
            .unwrap()
            .with_image("/uploads/1.png".into());
        assert_eq!(draft.kind(), EntityKind::Classes);
    }

    #[test]
    fn test_list_serializes_as_array() {
        let list = EntityList::Classes(vec![]);
        assert_eq!(serde_json::to_string(&list).unwrap(), "[]");
        assert!(list.is_empty());
    }
}
