// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction resolver: one trigger in, one coherent set of mutations out.
//!
//! ## Cycle
//!
//! [`Resolver::handle`] runs each invocation through the same stages:
//!
//! 1) Parse: find the nearest trigger-marked ancestor of the origin and read
//!    its request. No trigger, or a target selector matching nothing, ends
//!    the cycle with no change.
//! 2) Undo: if a ledger entry's target shares a node with the resolved
//!    target, the trigger is an undo signal. The entry is inverted and
//!    removed, and nothing new is applied.
//! 3) Group reset: inside a group boundary, the first ledger entry of the same
//!    group is inverted before anything else happens, so a group has at most
//!    one active entry.
//!
//! Undo deliberately runs before the group reset: re-triggering the active
//! entry of a group closes it instead of closing and reopening it.
//! 4) Mutate: primary classes, self classes, scroll, attribute, in that order.
//! 5) Record: a request with reset tags leaves exactly one ledger entry; one
//!    without leaves none.
//!
//! ## Dismissal
//!
//! [`Resolver::handle_dismissal`] inverts every entry carrying a tag, in
//! insertion order. [`Resolver::handle_group_dismissal`] inverts only the
//! first entry of a group. Both always remove what they invert, even when a
//! node has left the document and its step is skipped.
//!
//! Nothing here returns an error: failures are logged and the cycle carries on.

use smallvec::SmallVec;

use crate::apply::{self, Mutations};
use crate::apply::scroll::ScrollLock;
use crate::document::Document;
use crate::keys::AttributeKeys;
use crate::ledger::{EntryId, Ledger, ResetEntry};
use crate::request::{self, InteractionRequest};

/// What one call to [`Resolver::handle`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No trigger, or no target; nothing changed.
    Ignored,
    /// Mutations were applied.
    Applied {
        /// The ledger entry created, if the request had reset tags.
        entry: Option<EntryId>,
        /// Which kinds of mutation changed something.
        mutations: Mutations,
    },
    /// The target already had an entry; it was inverted and removed.
    Undone(EntryId),
}

/// Drives interactions against a [`Document`] and owns their undo state.
#[derive(Clone, Debug)]
pub struct Resolver<N> {
    keys: AttributeKeys,
    ledger: Ledger<N>,
    scroll: ScrollLock,
}

impl<N: Copy + Eq + core::fmt::Debug> Default for Resolver<N> {
    fn default() -> Self {
        Self::new(AttributeKeys::default())
    }
}

impl<N: Copy + Eq + core::fmt::Debug> Resolver<N> {
    /// Create a resolver with a fresh ledger named after `keys.namespace`.
    pub fn new(keys: AttributeKeys) -> Self {
        let ledger = Ledger::new(&keys.namespace);
        Self::with_ledger(keys, ledger)
    }

    /// Create a resolver around an existing ledger.
    pub fn with_ledger(keys: AttributeKeys, ledger: Ledger<N>) -> Self {
        let scroll = ScrollLock::with_classes(keys.scroll_lock_classes.clone());
        Self {
            keys,
            ledger,
            scroll,
        }
    }

    /// Attribute names in use.
    pub fn keys(&self) -> &AttributeKeys {
        &self.keys
    }

    /// The reset ledger, for introspection.
    pub fn ledger(&self) -> &Ledger<N> {
        &self.ledger
    }

    /// The scroll lock state.
    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll
    }

    /// Give up the resolver and keep its ledger.
    pub fn into_ledger(self) -> Ledger<N> {
        self.ledger
    }

    /// Run one interaction cycle for an event that originated at `origin`.
    pub fn handle<D: Document<Node = N>>(&mut self, doc: &mut D, origin: N) -> Outcome {
        let Some(request) = request::parse(doc, &self.keys, origin) else {
            log::debug!("{origin:?} has no trigger ancestor");
            return Outcome::Ignored;
        };
        let Some(targets) = Self::resolve_targets(doc, &request) else {
            log::debug!("target selector {:?} matched nothing", request.target_selector);
            return Outcome::Ignored;
        };

        if let Some(id) = self.ledger.find_by_target(&targets) {
            log::debug!("re-trigger of {targets:?} undoes {id:?}");
            self.invert_entry(doc, id);
            return Outcome::Undone(id);
        }

        if let Some(scope) = request.group_scope {
            self.handle_group_dismissal(doc, scope);
        }

        let attribute_host = match &request.attribute_target {
            Some(sel) => doc.query_selector(sel),
            None => Some(request.trigger),
        };
        let mut entry = ResetEntry::new(&targets, request.reset_tags.clone());
        entry.group_scope = request.group_scope;
        let mut mutations = Mutations::empty();
        for step in apply::plan(&request, &targets, attribute_host) {
            if let apply::Mutation::Classes { role, classes, .. } = &step {
                entry.set_requested_classes(*role, classes);
            }
            match apply::run(doc, &mut self.scroll, step) {
                Ok(Some(applied)) => {
                    mutations |= applied.mutations();
                    entry.record(applied);
                }
                Ok(None) => {}
                Err(e) => log::warn!("mutation skipped: {e}"),
            }
        }
        if request.self_toggle_classes.is_some() {
            entry.self_node = Some(request.trigger);
        }

        if request.reset_tags.is_empty() {
            return Outcome::Applied {
                entry: None,
                mutations,
            };
        }
        let id = self.ledger.insert(entry);
        log::debug!("{}: recorded {id:?} for {targets:?}", self.ledger.namespace());
        Outcome::Applied {
            entry: Some(id),
            mutations,
        }
    }

    /// Invert every entry tagged `tag`, in insertion order.
    ///
    /// Returns the number of entries inverted.
    pub fn handle_dismissal<D: Document<Node = N>>(&mut self, doc: &mut D, tag: &str) -> usize {
        let ids = self.ledger.with_tag(tag);
        if !ids.is_empty() {
            log::debug!("dismissal {tag:?} inverts {} entries", ids.len());
        }
        for &id in &ids {
            self.invert_entry(doc, id);
        }
        ids.len()
    }

    /// Invert the first entry inside group boundary `scope`.
    ///
    /// Returns whether an entry was inverted.
    pub fn handle_group_dismissal<D: Document<Node = N>>(
        &mut self,
        doc: &mut D,
        scope: N,
    ) -> bool {
        let Some(id) = self.ledger.first_in_group(scope) else {
            return false;
        };
        log::debug!("group {scope:?} closes {id:?}");
        self.invert_entry(doc, id)
    }

    /// Invert `id` and remove it from the ledger.
    fn invert_entry<D: Document<Node = N>>(&mut self, doc: &mut D, id: EntryId) -> bool {
        let Some(entry) = self.ledger.get(id) else {
            return false;
        };
        for e in entry.invert(doc, &mut self.scroll) {
            log::warn!("inversion step of {id:?} skipped: {e}");
        }
        self.ledger.remove(id);
        true
    }

    fn resolve_targets<D: Document<Node = N>>(
        doc: &D,
        request: &InteractionRequest<N>,
    ) -> Option<SmallVec<[N; 1]>> {
        match &request.target_selector {
            None => Some(SmallVec::from_elem(request.trigger, 1)),
            Some(sel) => {
                let found: SmallVec<[N; 1]> = doc.query_selector_all(sel).into_iter().collect();
                (!found.is_empty()).then_some(found)
            }
        }
    }
}
