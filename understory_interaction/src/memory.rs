// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Document`] for tests, demos, and headless hosts.
//!
//! Nodes live in a slot arena addressed by generational [`NodeId`]s, so a key
//! for a removed node stops resolving instead of aliasing a newer node.
//!
//! Selector support is a small subset: type selectors, `#id`, `.class`,
//! `[attr]`, `[attr=value]`, compounds of these (`button.primary[aria-expanded]`),
//! and comma-separated lists. Combinators and pseudo-classes match nothing.
//!
//! ```
//! use understory_interaction::document::Document;
//! use understory_interaction::memory::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.root();
//! let menu = doc.append_element(body, "nav");
//! doc.set_attribute(menu, "id", "menu");
//! doc.add_class(menu, "closed");
//!
//! assert_eq!(doc.query_selector("nav#menu.closed"), Some(menu));
//! assert_eq!(doc.query_selector("nav > a"), None);
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;

use crate::document::Document;

/// Identifier for a node in a [`MemoryDocument`] (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: HashMap<String, String>,
    classes: Vec<String>,
    styles: HashMap<String, String>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            styles: HashMap::new(),
        }
    }
}

/// A mutable element tree rooted at a `body` element.
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    slots: Vec<Option<Element>>,
    generations: Vec<u32>,
    free: Vec<u32>,
    root: NodeId,
    scroll: Point,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document holding only its `body` root.
    pub fn new() -> Self {
        Self {
            slots: alloc::vec![Some(Element::new("body", None))],
            generations: alloc::vec![0],
            free: Vec::new(),
            root: NodeId(0, 0),
            scroll: Point::ZERO,
        }
    }

    /// The root (`body`) element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a `tag` element as the last child of `parent`.
    ///
    /// A stale `parent` yields a detached element with no parent.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let parent = self.contains(parent).then_some(parent);
        let el = Element::new(tag, parent);
        let id = if let Some(idx) = self.free.pop() {
            let i = idx as usize;
            self.slots[i] = Some(el);
            NodeId(idx, self.generations[i])
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Some(el));
            self.generations.push(0);
            NodeId(idx, 0)
        };
        if let Some(p) = parent.and_then(|p| self.get_mut(p)) {
            p.children.push(id);
        }
        id
    }

    /// Remove `node` and its subtree. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.contains(node) {
            return;
        }
        if let Some(parent) = self.get(node).and_then(|el| el.parent) {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|c| *c != node);
            }
        }
        let mut stack = alloc::vec![node];
        while let Some(n) = stack.pop() {
            let i = n.idx();
            if let Some(el) = self.slots[i].take() {
                stack.extend(el.children);
                self.generations[i] = self.generations[i].wrapping_add(1);
                self.free.push(n.0);
            }
        }
    }

    /// Classes on `node` in the order they were added.
    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.get(node)
            .map(|el| el.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Inline style `property` on `node`, if set.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.get(node)?.styles.get(property).map(String::as_str)
    }

    /// Number of inline style properties on `node`.
    pub fn style_count(&self, node: NodeId) -> usize {
        self.get(node).map_or(0, |el| el.styles.len())
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        if self.generations.get(node.idx()) != Some(&node.1) {
            return None;
        }
        self.slots.get(node.idx())?.as_ref()
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        if self.generations.get(node.idx()) != Some(&node.1) {
            return None;
        }
        self.slots.get_mut(node.idx())?.as_mut()
    }

    fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = alloc::vec![self.root];
        while let Some(n) = stack.pop() {
            if let Some(el) = self.get(n) {
                out.push(n);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, node: NodeId, sel: &Compound) -> bool {
        let Some(el) = self.get(node) else {
            return false;
        };
        if sel.tag.as_ref().is_some_and(|t| !t.eq_ignore_ascii_case(&el.tag)) {
            return false;
        }
        if sel
            .id
            .as_ref()
            .is_some_and(|id| el.attributes.get("id") != Some(id))
        {
            return false;
        }
        if !sel.classes.iter().all(|c| el.classes.contains(c)) {
            return false;
        }
        sel.attrs.iter().all(|(name, value)| {
            match (self.attribute(node, name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == *expected,
                (None, _) => false,
            }
        })
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let el = self.get(node)?;
        if name == "class" {
            return (!el.classes.is_empty()).then(|| el.classes.join(" "));
        }
        el.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(el) = self.get_mut(node) else {
            return;
        };
        if name == "class" {
            el.classes = value.split_whitespace().map(ToString::to_string).collect();
        } else {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let Some(el) = self.get_mut(node) else {
            return;
        };
        if name == "class" {
            el.classes.clear();
        } else {
            el.attributes.remove(name);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(list) = parse_selector_list(selector) else {
            return Vec::new();
        };
        self.document_order()
            .into_iter()
            .filter(|n| list.iter().any(|c| self.matches(*n, c)))
            .collect()
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.root)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(el) = self.get_mut(node) {
            el.styles.remove(property);
        }
    }

    fn scroll_position(&self) -> Point {
        self.scroll
    }

    fn scroll_to(&mut self, position: Point) {
        self.scroll = position;
    }
}

#[derive(Clone, Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

fn parse_selector_list(selector: &str) -> Option<Vec<Compound>> {
    selector.split(',').map(|s| parse_compound(s.trim())).collect()
}

fn parse_compound(s: &str) -> Option<Compound> {
    if s.is_empty() {
        return None;
    }
    let mut c = Compound::default();
    let mut rest = s;
    if let Some(r) = rest.strip_prefix('*') {
        rest = r;
    } else {
        let n = ident_len(rest);
        if n > 0 {
            c.tag = Some(rest[..n].to_string());
            rest = &rest[n..];
        }
    }
    while let Some(ch) = rest.chars().next() {
        match ch {
            '#' | '.' => {
                let n = ident_len(&rest[1..]);
                if n == 0 {
                    return None;
                }
                let name = rest[1..1 + n].to_string();
                if ch == '#' {
                    c.id = Some(name);
                } else {
                    c.classes.push(name);
                }
                rest = &rest[1 + n..];
            }
            '[' => {
                let end = rest.find(']')?;
                let inner = rest[1..end].trim();
                let (name, value) = match inner.split_once('=') {
                    Some((n, v)) => (n.trim(), Some(unquote(v.trim()).to_string())),
                    None => (inner, None),
                };
                if name.is_empty() {
                    return None;
                }
                c.attrs.push((name.to_string(), value));
                rest = &rest[end + 1..];
            }
            // Combinators, pseudo-classes, and anything else.
            _ => return None,
        }
    }
    Some(c)
}

fn ident_len(s: &str) -> usize {
    s.find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'))
        .unwrap_or(s.len())
}

fn unquote(v: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = v.strip_prefix(q).and_then(|r| r.strip_suffix(q)) {
            return inner;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryDocument, NodeId, NodeId, NodeId) {
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        let nav = doc.append_element(body, "nav");
        doc.set_attribute(nav, "id", "menu");
        let a = doc.append_element(nav, "a");
        doc.add_class(a, "link");
        let b = doc.append_element(body, "a");
        doc.add_class(b, "link");
        doc.set_attribute(b, "data-kind", "external");
        (doc, nav, a, b)
    }

    #[test]
    fn selectors_match_in_document_order() {
        let (doc, nav, a, b) = sample();
        assert_eq!(doc.query_selector_all(".link"), [a, b]);
        assert_eq!(doc.query_selector_all("#menu"), [nav]);
        assert_eq!(doc.query_selector_all("a[data-kind='external']"), [b]);
        assert_eq!(doc.query_selector_all("[data-kind]"), [b]);
        assert_eq!(doc.query_selector_all("#menu, a.link"), [nav, a, b]);
        assert_eq!(doc.query_selector_all("*").len(), 4);
    }

    #[test]
    fn unsupported_selectors_match_nothing() {
        let (doc, ..) = sample();
        assert!(doc.query_selector_all("nav a").is_empty());
        assert!(doc.query_selector_all("a:hover").is_empty());
        assert!(doc.query_selector_all("").is_empty());
        assert!(doc.query_selector_all("#").is_empty());
        assert!(doc.query_selector_all("[unterminated").is_empty());
    }

    #[test]
    fn removed_ids_go_stale() {
        let (mut doc, nav, a, b) = sample();
        doc.remove(nav);
        assert!(!doc.contains(nav));
        assert!(!doc.contains(a));
        assert!(doc.contains(b));
        let fresh = doc.append_element(doc.root(), "div");
        assert_ne!(fresh, nav);
        assert_ne!(fresh, a);
        assert!(!doc.has_class(a, "link"));
        assert_eq!(doc.query_selector_all(".link"), [b]);
    }

    #[test]
    fn class_attribute_mirrors_class_list() {
        let (mut doc, _, a, _) = sample();
        doc.add_class(a, "active");
        assert_eq!(doc.attribute(a, "class").as_deref(), Some("link active"));
        doc.set_attribute(a, "class", "x  y");
        assert_eq!(doc.classes(a), ["x", "y"]);
        doc.remove_attribute(a, "class");
        assert!(doc.classes(a).is_empty());
        assert_eq!(doc.attribute(a, "class"), None);
    }

    #[test]
    fn closest_includes_self() {
        let (doc, nav, a, _) = sample();
        assert_eq!(doc.closest(a, "id"), Some(nav));
        assert_eq!(doc.closest(nav, "id"), Some(nav));
        assert_eq!(doc.closest(a, "data-missing"), None);
    }
}
