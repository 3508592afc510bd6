//! Record models for students, teachers and classes.
//!
//! JSON field names are camelCase to match the browser client.

mod class;
mod entity;
mod fields;
mod kind;
mod student;
mod teacher;

pub use class::*;
pub use entity::*;
pub use fields::*;
pub use kind::*;
pub use student::*;
pub use teacher::*;
