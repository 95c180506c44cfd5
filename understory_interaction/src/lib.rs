// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_interaction --heading-base-level=0

//! Understory Interaction: declarative micro-interactions with exact undo.
//!
//! ## Overview
//!
//! Markup annotates a trigger element with what should happen when it is
//! activated: classes to toggle (on itself or on elements picked by a
//! selector), an attribute to attach or detach, and whether to lock page
//! scroll. It can also name reset tags (such as `escape` or `resize`) that
//! should later reverse the whole interaction.
//!
//! This crate is the engine behind that. It reads the annotations, applies
//! the mutations, and keeps a [`Ledger`](crate::ledger::Ledger) of what it
//! changed so every change can be reversed precisely. It does not attach
//! listeners or run timers. A host feeds it events, either directly through
//! [`Resolver`](crate::resolver::Resolver) or through the
//! [`Driver`](crate::driver::Driver) helper.
//!
//! ## Layering
//!
//! - [`document`]: the host seam. Implement [`Document`](crate::document::Document)
//!   over your DOM; [`memory::MemoryDocument`] is a ready-made in-memory one.
//! - [`keys`]: attribute names, all overridable.
//! - [`request`]: reads a trigger's attributes into an
//!   [`InteractionRequest`](crate::request::InteractionRequest).
//! - [`apply`]: class, attribute, and scroll-lock appliers, run as a fixed-order pipeline.
//! - [`ledger`]: ordered reset entries and their inversion.
//! - [`resolver`]: one interaction cycle, dismissal by tag, dismissal by group.
//! - [`driver`] and [`debounce`]: click/escape/resize routing, startup auto-runs.
//!
//! ## Semantics
//!
//! - A request with reset tags leaves exactly one ledger entry; one without leaves none.
//! - Triggering the same target again while its entry is live undoes the entry.
//! - Inside a group boundary, triggering a new interaction first reverses the
//!   group's active one, so each group has at most one active entry.
//! - Entry points never fail. Missing nodes and malformed attributes degrade
//!   to no-ops and are reported through the `log` facade.
//!
//! ## Example
//!
//! ```
//! use understory_interaction::document::Document;
//! use understory_interaction::memory::MemoryDocument;
//! use understory_interaction::resolver::{Outcome, Resolver};
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.root();
//! let button = doc.append_element(body, "button");
//! doc.set_attribute(button, "data-toggle", "open active");
//! doc.set_attribute(button, "data-reset", "escape");
//!
//! let mut resolver = Resolver::default();
//! let out = resolver.handle(&mut doc, button);
//! assert!(matches!(out, Outcome::Applied { entry: Some(_), .. }));
//! assert_eq!(doc.classes(button), ["open", "active"]);
//!
//! // Pressing Escape reverses it.
//! assert_eq!(resolver.handle_dismissal(&mut doc, "escape"), 1);
//! assert!(doc.classes(button).is_empty());
//! assert!(resolver.ledger().is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for `kurbo`'s floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod apply;
pub mod debounce;
pub mod document;
pub mod driver;
pub mod error;
pub mod keys;
pub mod ledger;
pub mod memory;
pub mod request;
pub mod resolver;
pub mod tokens;
