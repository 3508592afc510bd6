//! One ordered, lock-guarded record collection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::MonotonicClock;
use crate::models::{Class, ClassPatch, Student, StudentPatch, Teacher, TeacherPatch};

/// A record that lives in a [`Collection`].
pub trait Record: Clone + Send + Sync {
    type Patch;

    fn id(&self) -> u64;

    /// Overwrite editable fields. Never changes the identifier or image.
    fn apply_patch(&mut self, patch: Self::Patch);
}

impl Record for Student {
    type Patch = StudentPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn apply_patch(&mut self, patch: StudentPatch) {
        self.apply(patch);
    }
}

impl Record for Teacher {
    type Patch = TeacherPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn apply_patch(&mut self, patch: TeacherPatch) {
        self.apply(patch);
    }
}

impl Record for Class {
    type Patch = ClassPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn apply_patch(&mut self, patch: ClassPatch) {
        self.apply(patch);
    }
}

/// How a collection assigns identifiers to new records.
#[derive(Debug)]
pub enum IdSource {
    /// Time-derived identifiers shared with the upload sink.
    Clock(Arc<MonotonicClock>),
    /// 1, 2, 3, ... Never reused, even after deletions.
    Sequence(AtomicU64),
}

impl IdSource {
    pub fn sequence() -> Self {
        IdSource::Sequence(AtomicU64::new(0))
    }

    fn next(&self) -> u64 {
        match self {
            IdSource::Clock(clock) => clock.next(),
            IdSource::Sequence(counter) => counter.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }
}

/// Records of one kind in insertion order.
#[derive(Debug)]
pub struct Collection<T> {
    records: RwLock<Vec<T>>,
    ids: IdSource,
}

impl<T: Record> Collection<T> {
    pub fn new(ids: IdSource) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            ids,
        }
    }

    /// Assign the next identifier and append the record built from it.
    pub async fn insert_with(&self, build: impl FnOnce(u64) -> T) -> T {
        let mut records = self.records.write().await;
        let record = build(self.ids.next());
        records.push(record.clone());
        record
    }

    pub async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: u64) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    pub async fn update(&self, id: u64, patch: T::Patch) -> Option<T> {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.id() == id)?;
        record.apply_patch(patch);
        Some(record.clone())
    }

    /// Remove every record with this identifier; returns how many went.
    pub async fn remove(&self, id: u64) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        before - records.len()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}
