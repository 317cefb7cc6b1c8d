//! Element abstraction layer
//!
//! The effects only need a handful of DOM operations:
//! - Toggle a class
//! - Append a new child element
//! - Set an inline style property
//! - Query elements by selector
//!
//! `web` implements them on web-sys types (wasm32 only); `memory` is a small
//! in-memory tree used by tests and the native demo.

use std::fmt::Debug;

#[cfg(test)]
pub(crate) mod faulty;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryElement, MemoryPage};

/// A handle to one element. Clones refer to the same node.
pub trait Element: Clone {
    /// Failure reported by the backing document
    type Error: Debug;

    /// Add (`on == true`) or remove a class
    fn set_class(&self, class: &str, on: bool) -> Result<(), Self::Error>;

    /// Whether the element currently carries a class
    fn has_class(&self, class: &str) -> bool;

    /// Create a `tag` element with `class`, append it as the last child, and return it
    fn append_new(&self, tag: &str, class: &str) -> Result<Self, Self::Error>;

    /// Set one inline style property (CSS property name, e.g. `animation-delay`)
    fn set_style(&self, property: &str, value: &str) -> Result<(), Self::Error>;
}

/// A document that can be queried for elements
pub trait Page {
    type Element: Element;

    /// All matching elements in document order
    fn select_all(&self, selector: &str) -> Vec<Self::Element>;

    /// First matching element, if any
    fn select(&self, selector: &str) -> Option<Self::Element>;
}
