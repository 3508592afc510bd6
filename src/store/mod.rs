//! In-memory entity store.
//!
//! Holds the student, teacher and class collections for the lifetime of the
//! process. Nothing is persisted; every record is lost on restart.

mod clock;
mod collection;

pub use clock::*;
pub use collection::*;

use std::sync::Arc;

use crate::models::{
    Class, Entity, EntityDraft, EntityKind, EntityList, EntityPatch, Student, Teacher,
};

/// Collection sizes, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub students: usize,
    pub teachers: usize,
    pub classes: usize,
}

/// The three record collections.
///
/// Students take time-derived identifiers from the shared clock; teachers and
/// classes count up from 1.
#[derive(Debug)]
pub struct Store {
    students: Collection<Student>,
    teachers: Collection<Teacher>,
    classes: Collection<Class>,
}

impl Store {
    pub fn new(clock: Arc<MonotonicClock>) -> Self {
        Self {
            students: Collection::new(IdSource::Clock(clock)),
            teachers: Collection::new(IdSource::sequence()),
            classes: Collection::new(IdSource::sequence()),
        }
    }

    /// Store a new record and return it with its assigned identifier.
    pub async fn create(&self, draft: EntityDraft) -> Entity {
        let entity = match draft {
            EntityDraft::Student(d) => Entity::Student(
                self.students
                    .insert_with(|id| Student::new(id, d))
                    .await,
            ),
            EntityDraft::Teacher(d) => Entity::Teacher(
                self.teachers
                    .insert_with(|id| Teacher::new(id, d))
                    .await,
            ),
            EntityDraft::Class(d) => {
                Entity::Class(self.classes.insert_with(|id| Class::new(id, d)).await)
            }
        };
        tracing::debug!("Created {} {}", entity.kind().singular(), entity.id());
        entity
    }

    pub async fn list(&self, kind: EntityKind) -> EntityList {
        match kind {
            EntityKind::Students => EntityList::Students(self.students.list().await),
            EntityKind::Teachers => EntityList::Teachers(self.teachers.list().await),
            EntityKind::Classes => EntityList::Classes(self.classes.list().await),
        }
    }

    pub async fn get(&self, kind: EntityKind, id: u64) -> Option<Entity> {
        match kind {
            EntityKind::Students => self.students.get(id).await.map(Entity::Student),
            EntityKind::Teachers => self.teachers.get(id).await.map(Entity::Teacher),
            EntityKind::Classes => self.classes.get(id).await.map(Entity::Class),
        }
    }

    /// Apply a patch to the record with `id` in the patch's collection.
    pub async fn update(&self, id: u64, patch: EntityPatch) -> Option<Entity> {
        let kind = patch.kind();
        let updated = match patch {
            EntityPatch::Student(p) => self.students.update(id, p).await.map(Entity::Student),
            EntityPatch::Teacher(p) => self.teachers.update(id, p).await.map(Entity::Teacher),
            EntityPatch::Class(p) => self.classes.update(id, p).await.map(Entity::Class),
        };
        if updated.is_some() {
            tracing::debug!("Updated {} {}", kind.singular(), id);
        }
        updated
    }

    /// Remove the record with `id`. Removing a missing record is not an error.
    pub async fn remove(&self, kind: EntityKind, id: u64) -> usize {
        let removed = match kind {
            EntityKind::Students => self.students.remove(id).await,
            EntityKind::Teachers => self.teachers.remove(id).await,
            EntityKind::Classes => self.classes.remove(id).await,
        };
        tracing::debug!("Removed {} {} record(s) with id {}", removed, kind, id);
        removed
    }

    pub async fn counts(&self) -> StoreCounts {
        StoreCounts {
            students: self.students.len().await,
            teachers: self.teachers.len().await,
            classes: self.classes.len().await,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Arc::new(MonotonicClock::new()))
    }
}
