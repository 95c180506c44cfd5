// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation appliers.
//!
//! Each mutation kind is one variant of [`Mutation`], and [`plan`] lays a
//! request out as a fixed-order pipeline: primary classes, self classes,
//! scroll, attribute. [`run`] applies one step and returns an [`Applied`]
//! record holding exactly what is needed to reverse it.

pub mod attribute;
pub mod class;
pub mod scroll;

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::document::Document;
use crate::error::InteractionError;
use crate::request::{AttributeChange, InteractionRequest, ScrollAction, ToggleMode};
use crate::tokens::TokenList;

use self::attribute::AttributeInversion;
use self::class::ClassDelta;
use self::scroll::{ScrollLock, ScrollTransition};

bitflags::bitflags! {
    /// Which kinds of mutation changed something during one interaction.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Mutations: u8 {
        /// Classes changed on the primary target.
        const CLASSES      = 0b0000_0001;
        /// Classes changed on the trigger itself.
        const SELF_CLASSES = 0b0000_0010;
        /// The scroll lock changed state.
        const SCROLL       = 0b0000_0100;
        /// An attribute was attached or detached.
        const ATTRIBUTE    = 0b0000_1000;
    }
}

/// Whose class set a [`Mutation::Classes`] step carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassRole {
    /// The primary (possibly redirected) target.
    Primary,
    /// The trigger element, when the primary target is redirected.
    SelfNode,
}

/// One step of the mutation pipeline.
#[derive(Clone, Debug)]
pub enum Mutation<'a, N> {
    /// Apply a class set to every node in `nodes`.
    Classes {
        /// Which class set this is.
        role: ClassRole,
        /// Nodes receiving the set.
        nodes: SmallVec<[N; 1]>,
        /// Classes to apply.
        classes: &'a TokenList,
        /// Resolved toggle mode.
        mode: ToggleMode,
    },
    /// Change the scroll lock.
    Scroll(ScrollAction),
    /// Change one attribute on `node`.
    Attribute {
        /// Node carrying the attribute.
        node: N,
        /// Requested change.
        change: &'a AttributeChange,
    },
}

/// The reversible record of one applied [`Mutation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied<N> {
    /// Per-node class changes.
    Classes(ClassRole, Vec<ClassDelta<N>>),
    /// The lock transition taken.
    Scroll(ScrollTransition),
    /// The attribute change made.
    Attribute(AttributeInversion<N>),
}

impl<N> Applied<N> {
    /// The flag describing this record, or empty if it changed nothing.
    pub fn mutations(&self) -> Mutations {
        match self {
            Self::Classes(_, deltas) if deltas.iter().all(ClassDelta::is_empty) => {
                Mutations::empty()
            }
            Self::Classes(ClassRole::Primary, _) => Mutations::CLASSES,
            Self::Classes(ClassRole::SelfNode, _) => Mutations::SELF_CLASSES,
            Self::Scroll(_) => Mutations::SCROLL,
            Self::Attribute(_) => Mutations::ATTRIBUTE,
        }
    }
}

/// Lay out `request` as pipeline steps in application order.
///
/// `targets` is the resolved primary target set. `attribute_host` is the node
/// whose attribute changes, if one resolved.
pub fn plan<'a, N: Copy>(
    request: &'a InteractionRequest<N>,
    targets: &[N],
    attribute_host: Option<N>,
) -> SmallVec<[Mutation<'a, N>; 4]> {
    let mut steps = SmallVec::new();
    if !request.toggle_classes.is_empty() {
        steps.push(Mutation::Classes {
            role: ClassRole::Primary,
            nodes: targets.iter().copied().collect(),
            classes: &request.toggle_classes,
            mode: request.mode,
        });
    }
    if let Some(own) = request.self_toggle_classes.as_ref().filter(|c| !c.is_empty()) {
        steps.push(Mutation::Classes {
            role: ClassRole::SelfNode,
            nodes: SmallVec::from_elem(request.trigger, 1),
            classes: own,
            mode: request.mode,
        });
    }
    if let Some(action) = request.scroll_action {
        steps.push(Mutation::Scroll(action));
    }
    if let (Some(change), Some(node)) = (request.attribute_change.as_ref(), attribute_host) {
        steps.push(Mutation::Attribute { node, change });
    }
    steps
}

/// Apply one pipeline step.
///
/// Returns `Ok(None)` when the step had nothing to record (an attribute
/// already in the requested state, a scroll request matching the current lock).
pub fn run<D: Document>(
    doc: &mut D,
    scroll: &mut ScrollLock,
    step: Mutation<'_, D::Node>,
) -> Result<Option<Applied<D::Node>>, InteractionError<D::Node>> {
    Ok(match step {
        Mutation::Classes {
            role,
            nodes,
            classes,
            mode,
        } => Some(Applied::Classes(
            role,
            class::apply_all(doc, &nodes, classes, mode),
        )),
        Mutation::Scroll(action) => scroll.apply(doc, action)?.map(Applied::Scroll),
        Mutation::Attribute { node, change } => {
            attribute::apply(doc, node, change).map(Applied::Attribute)
        }
    })
}
