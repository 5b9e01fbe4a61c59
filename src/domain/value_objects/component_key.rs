//! Component identity key
//!
//! Two components describe the same logical element exactly when their keys
//! are equal, regardless of which paths they were discovered from.

use std::fmt;

use crate::domain::entities::MetadataType;

/// `(type id, full name)` identity of a component
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey {
    type_id: String,
    full_name: String,
}

impl ComponentKey {
    pub fn new(type_id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            full_name: full_name.into(),
        }
    }

    pub fn of(ty: &MetadataType, full_name: impl Into<String>) -> Self {
        Self::new(ty.id.clone(), full_name)
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Key matching every component of the type
    pub fn wildcard(type_id: impl Into<String>) -> Self {
        Self::new(type_id, "*")
    }

    pub fn is_wildcard(&self) -> bool {
        self.full_name == "*"
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_id, self.full_name)
    }
}
