// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class toggler.
//!
//! Applies a class set to one or more nodes under a [`ToggleMode`] and
//! reports exactly which classes changed on each node, so the change can be
//! reversed later without disturbing classes set by anyone else.

use alloc::vec::Vec;

use crate::document::Document;
use crate::error::InteractionError;
use crate::request::ToggleMode;
use crate::tokens::TokenList;

/// Classes actually added to and removed from one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDelta<N> {
    /// The mutated node.
    pub node: N,
    /// Classes that were absent and are now present.
    pub added: TokenList,
    /// Classes that were present and are now absent.
    pub removed: TokenList,
}

impl<N> ClassDelta<N> {
    /// Whether applying the set changed nothing on this node.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Apply `classes` to `node` under `mode`.
///
/// `Add` and `Remove` force a direction and are idempotent; `Toggle` flips
/// each class independently of the others.
pub fn apply<D: Document>(
    doc: &mut D,
    node: D::Node,
    classes: &TokenList,
    mode: ToggleMode,
) -> ClassDelta<D::Node> {
    let mut delta = ClassDelta {
        node,
        added: TokenList::new(),
        removed: TokenList::new(),
    };
    for class in classes.iter() {
        let present = doc.has_class(node, class);
        let add = match mode {
            ToggleMode::Add => true,
            ToggleMode::Remove => false,
            ToggleMode::Toggle => !present,
        };
        if add && !present {
            doc.add_class(node, class);
            delta.added.insert(class);
        } else if !add && present {
            doc.remove_class(node, class);
            delta.removed.insert(class);
        }
    }
    log::trace!("classes on {node:?}: +{:?} -{:?}", delta.added, delta.removed);
    delta
}

/// Apply the same class set to every node in `nodes`.
pub fn apply_all<D: Document>(
    doc: &mut D,
    nodes: &[D::Node],
    classes: &TokenList,
    mode: ToggleMode,
) -> Vec<ClassDelta<D::Node>> {
    nodes
        .iter()
        .map(|&node| apply(doc, node, classes, mode))
        .collect()
}

/// Reverse `delta`: remove what was added and restore what was removed.
pub fn invert<D: Document>(
    doc: &mut D,
    delta: &ClassDelta<D::Node>,
) -> Result<(), InteractionError<D::Node>> {
    if !doc.contains(delta.node) {
        return Err(InteractionError::Detached(delta.node));
    }
    for class in delta.added.iter() {
        doc.remove_class(delta.node, class);
    }
    for class in delta.removed.iter() {
        doc.add_class(delta.node, class);
    }
    Ok(())
}
