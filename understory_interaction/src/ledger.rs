// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reset ledger: the ordered record of interactions waiting to be undone.
//!
//! ## Overview
//!
//! Every applied interaction that names at least one reset tag leaves one
//! [`ResetEntry`] here. An entry holds the exact changes made (not the request
//! that caused them), so [`ResetEntry::invert`] can put every touched node
//! back the way it was without re-deriving intent.
//!
//! ## Ordering
//!
//! Entries keep insertion order. Tag queries return matches in that order,
//! and group queries return the first match, which is what keeps a group
//! boundary down to a single active entry.
//!
//! ## Lifetime
//!
//! The ledger is an ordinary value owned by whoever drives the engine,
//! usually a [`Resolver`](crate::resolver::Resolver). Entries whose nodes have
//! since left the document are still removed when inverted; only the
//! inversion steps for the missing nodes are skipped.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::apply::attribute::{self, AttributeInversion};
use crate::apply::class::{self, ClassDelta};
use crate::apply::scroll::{ScrollLock, ScrollTransition};
use crate::apply::{Applied, ClassRole};
use crate::document::Document;
use crate::error::InteractionError;
use crate::tokens::TokenList;

/// Stable handle for a ledger entry.
///
/// Ids are never reused within one ledger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

/// Everything needed to undo one applied interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetEntry<N> {
    id: EntryId,
    /// The node or nodes the primary class set was applied to (identity key).
    pub target: SmallVec<[N; 1]>,
    /// The trigger, when it received its own class set.
    pub self_node: Option<N>,
    /// Primary class set as requested.
    pub applied_classes: TokenList,
    /// Trigger class set as requested.
    pub applied_self_classes: Option<TokenList>,
    /// Per-node class changes actually made, primary nodes first.
    pub class_deltas: Vec<ClassDelta<N>>,
    /// Tags that invert this entry.
    pub reset_tags: TokenList,
    /// Group boundary this entry belongs to.
    pub group_scope: Option<N>,
    /// Scroll lock transition actually taken.
    pub scroll_taken: Option<ScrollTransition>,
    /// Attribute change actually made.
    pub attribute_inversion: Option<AttributeInversion<N>>,
}

impl<N: Copy + Eq + core::fmt::Debug> ResetEntry<N> {
    /// Create an entry for `target` with nothing recorded yet.
    pub fn new(target: &[N], reset_tags: TokenList) -> Self {
        Self {
            id: EntryId(0),
            target: target.iter().copied().collect(),
            self_node: None,
            applied_classes: TokenList::new(),
            applied_self_classes: None,
            class_deltas: Vec::new(),
            reset_tags,
            group_scope: None,
            scroll_taken: None,
            attribute_inversion: None,
        }
    }

    /// The id assigned on insertion.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Record the class sets as requested, for introspection.
    pub fn set_requested_classes(&mut self, role: ClassRole, classes: &TokenList) {
        match role {
            ClassRole::Primary => self.applied_classes = classes.clone(),
            ClassRole::SelfNode => self.applied_self_classes = Some(classes.clone()),
        }
    }

    /// Fold one applied pipeline step into the entry.
    pub fn record(&mut self, applied: Applied<N>) {
        match applied {
            Applied::Classes(_, deltas) => self.class_deltas.extend(deltas),
            Applied::Scroll(t) => self.scroll_taken = Some(t),
            Applied::Attribute(inv) => self.attribute_inversion = Some(inv),
        }
    }

    /// Whether `tag` (compared case-insensitively) inverts this entry.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.reset_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Undo every recorded change.
    ///
    /// Steps run independently: a node that has left the document skips only
    /// its own step. The skipped steps are returned.
    pub fn invert<D: Document<Node = N>>(
        &self,
        doc: &mut D,
        scroll: &mut ScrollLock,
    ) -> SmallVec<[InteractionError<N>; 2]> {
        let mut skipped = SmallVec::new();
        for delta in &self.class_deltas {
            if let Err(e) = class::invert(doc, delta) {
                skipped.push(e);
            }
        }
        if let Some(t) = self.scroll_taken {
            if let Err(e) = scroll.transition(doc, t.inverse()) {
                skipped.push(e);
            }
        }
        if let Some(inv) = &self.attribute_inversion {
            if let Err(e) = attribute::invert(doc, inv) {
                skipped.push(e);
            }
        }
        skipped
    }
}

/// Ordered collection of [`ResetEntry`] values.
#[derive(Clone, Debug)]
pub struct Ledger<N> {
    entries: Vec<ResetEntry<N>>,
    next_id: u64,
    namespace: String,
}

impl<N: Copy + Eq + core::fmt::Debug> Ledger<N> {
    /// Create an empty ledger labeled `namespace` for introspection.
    pub fn new(namespace: &str) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            namespace: namespace.to_string(),
        }
    }

    /// The label this ledger is exposed under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Append `entry`, assigning it a fresh id.
    pub fn insert(&mut self, mut entry: ResetEntry<N>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        entry.id = id;
        self.entries.push(entry);
        id
    }

    /// Remove and return the entry with `id`.
    pub fn remove(&mut self, id: EntryId) -> Option<ResetEntry<N>> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// The entry with `id`, if present.
    pub fn get(&self, id: EntryId) -> Option<&ResetEntry<N>> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The first entry, in insertion order, whose target shares a node with
    /// `target`.
    pub fn find_by_target(&self, target: &[N]) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|e| e.target.iter().any(|n| target.contains(n)))
            .map(ResetEntry::id)
    }

    /// The first entry, in insertion order, inside group boundary `scope`.
    pub fn first_in_group(&self, scope: N) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|e| e.group_scope == Some(scope))
            .map(ResetEntry::id)
    }

    /// Every entry carrying `tag`, in insertion order.
    pub fn with_tag(&self, tag: &str) -> Vec<EntryId> {
        self.entries
            .iter()
            .filter(|e| e.has_tag(tag))
            .map(ResetEntry::id)
            .collect()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResetEntry<N>> + '_ {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry without inverting anything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<N: Copy + Eq + core::fmt::Debug> Default for Ledger<N> {
    fn default() -> Self {
        Self::new("BasicInteractions")
    }
}
