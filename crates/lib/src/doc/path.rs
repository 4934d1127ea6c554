//! Typed path steps for multi-level document access.
//!
//! A path is a sequence of [`Step`]s walked from a starting node: an
//! [`Step::Index`] selects a child of an array, a [`Step::Key`] selects the
//! value of a dictionary pair. The [`path!`](crate::path) macro builds a
//! step array from mixed literals:
//!
//! ```
//! use doctree::{Doc, path};
//!
//! let mut doc = Doc::new();
//! let root = doc.new_dict();
//! let users = doc.new_array();
//! doc.dict_set(root, "users", users);
//! let user = doc.new_dict();
//! doc.array_push(users, user);
//! let name = doc.new_text("Al");
//! doc.dict_set(user, "name", name);
//!
//! let found = doc.access_path(root, &path!["users", 0, "name"]);
//! assert_eq!(found, Some(name));
//! ```

use std::fmt;

/// One step of a typed access path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Child position within an array
    Index(usize),
    /// Pair key within a dictionary
    Key(&'a str),
}

impl From<usize> for Step<'_> {
    fn from(index: usize) -> Self {
        Step::Index(index)
    }
}

impl<'a> From<&'a str> for Step<'a> {
    fn from(key: &'a str) -> Self {
        Step::Key(key)
    }
}

impl<'a> From<&'a String> for Step<'a> {
    fn from(key: &'a String) -> Self {
        Step::Key(key)
    }
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Index(index) => write!(f, "[{index}]"),
            Step::Key(key) => write!(f, "{key}"),
        }
    }
}

/// Builds a fixed-size array of [`Step`]s from mixed index/key literals.
///
/// Unsuffixed integer literals become [`Step::Index`], string values become
/// [`Step::Key`]:
///
/// ```
/// use doctree::{doc::Step, path};
///
/// let steps = path!["users", 1, "name"];
/// assert_eq!(steps[1], Step::Index(1));
/// ```
#[macro_export]
macro_rules! path {
    () => {{
        let steps: [$crate::doc::Step<'static>; 0] = [];
        steps
    }};
    ($($step:expr),+ $(,)?) => {
        [$($crate::doc::Step::from($step)),+]
    };
}
