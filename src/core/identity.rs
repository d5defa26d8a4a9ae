//! Item identity system using type-tagged identifiers
//!
//! Parts and assemblies share one identifier namespace. The first character
//! of an identifier is its type tag (`P` or `A`), so the kind of an item can
//! be recovered from its id alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum identifier length in characters, tag included
pub const MAX_ID_LEN: usize = 11;

/// Item kinds, each with its own identifier tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Raw part, never manufactured
    Part,
    /// Manufacturable assembly with a recipe
    Assembly,
}

impl ItemKind {
    /// The leading character every id of this kind carries
    pub fn tag(&self) -> char {
        match self {
            ItemKind::Part => 'P',
            ItemKind::Assembly => 'A',
        }
    }

    /// Get the lowercase name used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Part => "part",
            ItemKind::Assembly => "assembly",
        }
    }

    /// Get all item kinds
    pub fn all() -> &'static [ItemKind] {
        &[ItemKind::Part, ItemKind::Assembly]
    }

    /// Determine the kind from an identifier's tag
    pub fn from_id(id: &str) -> Option<Self> {
        let first = id.chars().next()?;
        Self::all().iter().copied().find(|kind| kind.tag() == first)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated item identifier
///
/// Ordering is plain byte-wise string ordering, which is the order reports
/// are sorted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId {
    kind: ItemKind,
    id: String,
}

impl ItemId {
    /// Parse an identifier of either kind
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }

    /// Parse an identifier that must carry the given kind's tag
    pub fn of_kind(s: &str, kind: ItemKind) -> Result<Self, IdParseError> {
        if !s.starts_with(kind.tag()) {
            return Err(IdParseError::WrongTag {
                id: s.to_string(),
                kind,
            });
        }
        if s.len() > MAX_ID_LEN {
            return Err(IdParseError::TooLong {
                id: s.to_string(),
                kind,
            });
        }
        Ok(Self {
            kind,
            id: s.to_string(),
        })
    }

    /// Parse a part identifier
    pub fn part(s: &str) -> Result<Self, IdParseError> {
        Self::of_kind(s, ItemKind::Part)
    }

    /// Parse an assembly identifier
    pub fn assembly(s: &str) -> Result<Self, IdParseError> {
        Self::of_kind(s, ItemKind::Assembly)
    }

    /// Get the item kind encoded in the tag
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl Ord for ItemId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for ItemId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pass through the formatter so width/alignment flags apply
        f.pad(&self.id)
    }
}

impl FromStr for ItemId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ItemKind::from_id(s) {
            Some(kind) => Self::of_kind(s, kind),
            None if s.is_empty() => Err(IdParseError::Empty),
            None => Err(IdParseError::UnknownTag(s.to_string())),
        }
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.id)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing item IDs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("empty ID")]
    Empty,

    #[error("{0}: ID must start with 'P' or 'A'")]
    UnknownTag(String),

    #[error("{id}: {kind} ID must start with '{tag}'", tag = .kind.tag())]
    WrongTag { id: String, kind: ItemKind },

    #[error("{id}: {kind} ID too long")]
    TooLong { id: String, kind: ItemKind },
}
