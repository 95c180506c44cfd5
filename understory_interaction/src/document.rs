// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: everything the engine needs to read and mutate a document.
//!
//! The engine never owns nodes. It holds node keys ([`Document::Node`]) and
//! asks the host to read attributes, flip classes, and pin the body. A browser
//! binding would implement this over the real DOM; tests and demos use
//! [`MemoryDocument`](crate::memory::MemoryDocument).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Point;

/// A mutable view of a host document.
///
/// Node keys are compared by identity: two keys are equal exactly when they
/// refer to the same node. Keys may outlive the node they refer to; use
/// [`Document::contains`] to tell whether a key still resolves.
pub trait Document {
    /// Node identity used as the ledger key.
    type Node: Copy + Eq + Debug;

    /// Returns the parent of `node`, or `None` for a root or detached key.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether `node` still refers to a live, attached node.
    fn contains(&self, node: Self::Node) -> bool;

    /// Returns the value of attribute `name` on `node`, if present.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    /// Set attribute `name` on `node` to `value`, replacing any previous value.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    /// Remove attribute `name` from `node` (no-op if absent).
    fn remove_attribute(&mut self, node: Self::Node, name: &str);

    /// Whether `node` carries class `class`.
    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Add class `class` to `node` (no-op if present).
    fn add_class(&mut self, node: Self::Node, class: &str);

    /// Remove class `class` from `node` (no-op if absent).
    fn remove_class(&mut self, node: Self::Node, class: &str);

    /// All nodes matching `selector`, in document order.
    ///
    /// Selectors the host does not understand match nothing.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Node>;

    /// The document body, which the scroll lock pins in place.
    fn body(&self) -> Option<Self::Node>;

    /// Set an inline style property on `node`.
    fn set_style(&mut self, node: Self::Node, property: &str, value: &str);

    /// Remove an inline style property from `node`.
    fn remove_style(&mut self, node: Self::Node, property: &str);

    /// Current viewport scroll offset.
    fn scroll_position(&self) -> Point;

    /// Scroll the viewport to `position`.
    fn scroll_to(&mut self, position: Point);

    /// Whether `node` carries attribute `name`.
    fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// First node matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Option<Self::Node> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Walk from `node` up through its ancestors and return the first one
    /// (including `node` itself) that carries attribute `name`.
    fn closest(&self, node: Self::Node, name: &str) -> Option<Self::Node> {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if self.has_attribute(n, name) {
                return Some(n);
            }
            cur = self.parent(n);
        }
        None
    }
}
