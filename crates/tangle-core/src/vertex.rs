//! Vertex identities.
//!
//! A [`Vertex`] is nothing but a name. Two vertices are equal iff their names
//! are equal, and a vertex carries no payload. Callers that need to attach
//! data keep a side map keyed by name.
//!
//! Inside the crate every name is interned to a dense [`VertexId`] the first
//! time it appears, so adjacency and degree tables are plain index-addressed
//! vectors. Ids never leave the crate.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use crate::error::GraphError;

/// An identity-only graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Vertex(String);

impl Vertex {
    /// Create a vertex from a non-empty name.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyVertexName`] for the empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, GraphError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GraphError::EmptyVertexName);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_name(self) -> String {
        self.0
    }
}

impl Borrow<str> for Vertex {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Vertex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Vertex {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Vertex {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<&str> for Vertex {
    type Error = GraphError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<String> for Vertex {
    type Error = GraphError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dense slot index of an interned vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct VertexId(usize);

impl VertexId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> usize {
        self.0
    }
}
