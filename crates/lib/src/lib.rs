//!
//! Doctree: a mutable, hierarchical property-list document model.
//! This library provides the canonical in-memory representation used to
//! build and inspect structured configuration and handshake data.
//!
//! ## Core Concepts
//!
//! * **Documents (`doc::Doc`)**: An arena of typed nodes. Nodes are created
//!   detached through typed constructors and wired into containers with the
//!   array/dictionary mutators.
//! * **Handles (`NodeId`)**: Copyable, generation-tagged references to nodes.
//!   Freeing a subtree makes every handle into it inert rather than
//!   dangling.
//! * **Values (`doc::Value`, `doc::Kind`)**: Seven scalar kinds (bool,
//!   unsigned int, real, text, bytes, date, UID) plus the two container
//!   kinds, array and dictionary. Dictionaries preserve pair insertion
//!   order.
//! * **Tree engine (`tree`)**: The generic ordered arena the document model
//!   is built on. Documents never expose it; it is available for payloads
//!   of your own.
//!
//! Codecs and transport layers consume this model through the `Doc`
//! surface: they build control messages with the constructors and mutators,
//! and extract fields with `access_path`, the dictionary cursor, and the
//! typed getters, treating absent results as "field missing".

pub mod doc;
pub mod tree;

/// Re-export the core document types for easier access.
pub use doc::{Doc, DocError, Kind, Value};
pub use tree::NodeId;

/// Result type used throughout the doctree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the doctree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured document errors from the doc module
    #[error(transparent)]
    Doc(doc::DocError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Doc(_) => "doc",
        }
    }

    /// Check if this error indicates a missing element.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_not_found(),
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_type_error(),
        }
    }

    /// Check if this error is related to embedded JSON handling.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_serialization_error(),
        }
    }
}
