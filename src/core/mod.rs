pub mod matcher;
pub mod normalizer;

pub use crate::domain::model::{CourseReference, RawReferenceEntry};
pub use crate::domain::ports::ReferencePattern;
pub use matcher::{find_match, matches};
pub use normalizer::{normalize, normalize_entry};
