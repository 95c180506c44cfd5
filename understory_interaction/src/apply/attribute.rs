// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute toggler.
//!
//! `Attach` never clobbers an attribute someone else already set, and
//! `Detach` never touches an absent one. Only a change that actually happened
//! is recorded, together with the value needed to reverse it.

use alloc::string::String;

use crate::document::Document;
use crate::error::InteractionError;
use crate::request::{AttributeChange, AttributeDirection};

/// What the toggler did, and how to take it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeInversion<N> {
    /// Node carrying the attribute.
    pub node: N,
    /// Attribute name.
    pub name: String,
    /// The value we attached, or the value we removed.
    pub value: String,
    /// `true` if we attached the attribute, `false` if we detached it.
    pub was_attached_by_us: bool,
}

/// Apply `change` to `node`.
///
/// Returns `None` when the attribute was already in the requested state.
pub fn apply<D: Document>(
    doc: &mut D,
    node: D::Node,
    change: &AttributeChange,
) -> Option<AttributeInversion<D::Node>> {
    match change.direction {
        AttributeDirection::Attach => {
            if doc.has_attribute(node, &change.name) {
                return None;
            }
            let value = change.value.clone().unwrap_or_default();
            doc.set_attribute(node, &change.name, &value);
            log::trace!("attached {}={value:?} on {node:?}", change.name);
            Some(AttributeInversion {
                node,
                name: change.name.clone(),
                value,
                was_attached_by_us: true,
            })
        }
        AttributeDirection::Detach => {
            let value = doc.attribute(node, &change.name)?;
            doc.remove_attribute(node, &change.name);
            log::trace!("detached {} from {node:?}", change.name);
            Some(AttributeInversion {
                node,
                name: change.name.clone(),
                value,
                was_attached_by_us: false,
            })
        }
    }
}

/// Reverse a recorded change by applying the opposite direction.
pub fn invert<D: Document>(
    doc: &mut D,
    inversion: &AttributeInversion<D::Node>,
) -> Result<(), InteractionError<D::Node>> {
    if !doc.contains(inversion.node) {
        return Err(InteractionError::Detached(inversion.node));
    }
    let direction = if inversion.was_attached_by_us {
        AttributeDirection::Detach
    } else {
        AttributeDirection::Attach
    };
    let _ = apply(
        doc,
        inversion.node,
        &AttributeChange {
            name: inversion.name.clone(),
            value: Some(inversion.value.clone()),
            direction,
        },
    );
    Ok(())
}
