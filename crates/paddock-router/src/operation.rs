//! Logical resource operations.

use std::fmt;
use std::str::FromStr;

/// A logical operation on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// List the collection.
    Index,
    /// Show one object.
    Show,
    /// Create an object.
    Create,
    /// Update one object.
    Update,
    /// Destroy one object.
    Destroy,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 5] = [
        Self::Index,
        Self::Show,
        Self::Create,
        Self::Update,
        Self::Destroy,
    ];

    /// Returns the operation name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }

    /// Returns true for operations addressing a single object by `id`.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Self::Show | Self::Update | Self::Destroy)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown operation: {s}"))
    }
}
