//! Tracker errors.

use std::fmt;

use uuid::Uuid;

/// One of the tracker's indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Type,
    Uuid,
    Spatial,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Type => "type",
            Self::Uuid => "uuid",
            Self::Spatial => "spatial",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("an entity with id {0} is already registered")]
    DuplicateId(i32),
    #[error("an entity with uuid {0} is already registered")]
    DuplicateUuid(Uuid),
    /// The indexes disagree about a registered entity.
    #[error("entity {id} is missing from the {index} index")]
    MissingIndexEntry { id: i32, index: IndexKind },
}
