//! Items managed by the list controller.

use std::sync::{PoisonError, RwLock};

/// Trait for types that can be held by a [`ListController`](crate::ListController).
///
/// The identifier is used for ordering and for fuzzy filtering. It is stored
/// case-sensitively but always compared case-insensitively. Identity (for
/// pinning the current item) is pointer identity of the shared `Arc`, never
/// equality of identifiers.
///
/// # Example
///
/// ```ignore
/// struct Spider {
///     id: String,
///     start_urls: Vec<String>,
/// }
///
/// impl sieve_list::Item for Spider {
///     fn id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait Item: Send + Sync + 'static {
    /// Identifier used for sorting and filtering.
    fn id(&self) -> &str;
}

impl Item for String {
    fn id(&self) -> &str {
        self
    }
}

impl Item for &'static str {
    fn id(&self) -> &str {
        self
    }
}

/// An item with an identifier and an independently editable display name.
///
/// The display name lives behind a lock so a renamed item keeps its identity
/// while it is shared between the host and the controller.
#[derive(Debug)]
pub struct NamedItem {
    id: String,
    name: RwLock<String>,
}

impl NamedItem {
    /// Create an item whose display name starts out equal to its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = RwLock::new(id.clone());
        Self { id, name }
    }

    /// Set the initial display name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Current display name.
    pub fn name(&self) -> String {
        self.name
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the display name. The identifier is unchanged.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.write().unwrap_or_else(PoisonError::into_inner) = name.into();
    }

    /// Reset the display name back to the identifier.
    pub fn revert_name(&self) {
        self.set_name(self.id.clone());
    }
}

impl Item for NamedItem {
    fn id(&self) -> &str {
        &self.id
    }
}
