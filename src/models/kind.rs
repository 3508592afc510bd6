//! Entity kind selected by the `/api/{type}` path segment.

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// The three record collections the API multiplexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Students,
    Teachers,
    Classes,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Students,
        EntityKind::Teachers,
        EntityKind::Classes,
    ];

    /// Plural path segment, as used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Students => "students",
            EntityKind::Teachers => "teachers",
            EntityKind::Classes => "classes",
        }
    }

    /// Singular display name used in error messages.
    pub fn singular(&self) -> &'static str {
        match self {
            EntityKind::Students => "student",
            EntityKind::Teachers => "teacher",
            EntityKind::Classes => "class",
        }
    }

    /// Whether create requests for this kind may carry an image.
    pub fn accepts_upload(&self) -> bool {
        matches!(self, EntityKind::Students | EntityKind::Teachers)
    }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "students" => Ok(EntityKind::Students),
            "teachers" => Ok(EntityKind::Teachers),
            "classes" => Ok(EntityKind::Classes),
            other => Err(AppError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
