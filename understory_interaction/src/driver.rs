// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event driver: the thin layer between host events and the [`Resolver`].
//!
//! A host wires three kinds of events into the driver (clicks, key presses,
//! viewport resizes) and calls [`Driver::poll`] from its timer. The driver
//! itself owns no clock and no listeners; every time-dependent call takes the
//! current monotonic time in milliseconds.
//!
//! - Clicks run a full interaction cycle at the click origin.
//! - `Escape` dismisses every entry tagged `escape`.
//! - Resizes are debounced (trailing edge). When the window elapses and the
//!   ledger is non-empty, every entry tagged `resize` is dismissed.
//! - [`Driver::start`] runs every element carrying the auto-run key once,
//!   immediately or after the delay given in its value.
//!
//! ```
//! use understory_interaction::document::Document;
//! use understory_interaction::driver::Driver;
//! use understory_interaction::memory::MemoryDocument;
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.root();
//! let menu = doc.append_element(body, "button");
//! doc.set_attribute(menu, "data-toggle", "open");
//! doc.set_attribute(menu, "data-reset", "resize");
//!
//! let mut driver = Driver::default();
//! driver.on_click(&mut doc, menu);
//! assert!(doc.has_class(menu, "open"));
//!
//! driver.on_resize(1_000);
//! driver.on_resize(1_100);
//! assert_eq!(driver.next_deadline(), Some(1_400));
//! assert_eq!(driver.poll(&mut doc, 1_400), 1);
//! assert!(!doc.has_class(menu, "open"));
//! ```

use alloc::format;
use alloc::vec::Vec;

use crate::debounce::Debounce;
use crate::document::Document;
use crate::keys::AttributeKeys;
use crate::resolver::{Outcome, Resolver};

/// Default quiet window for resize notifications, in milliseconds.
pub const RESIZE_WINDOW_MS: u64 = 300;

/// Reset tag dispatched by `Escape`.
pub const ESCAPE_TAG: &str = "escape";

/// Reset tag dispatched after a debounced resize.
pub const RESIZE_TAG: &str = "resize";

#[derive(Copy, Clone, Debug)]
struct Scheduled<N> {
    due: u64,
    seq: u64,
    node: N,
}

/// Routes host events into a [`Resolver`] and runs deferred work.
#[derive(Clone, Debug)]
pub struct Driver<N> {
    resolver: Resolver<N>,
    resize: Debounce,
    pending: Vec<Scheduled<N>>,
    next_seq: u64,
}

impl<N: Copy + Eq + core::fmt::Debug> Default for Driver<N> {
    fn default() -> Self {
        Self::new(Resolver::default())
    }
}

impl<N: Copy + Eq + core::fmt::Debug> Driver<N> {
    /// Wrap `resolver` with the default resize window.
    pub fn new(resolver: Resolver<N>) -> Self {
        Self {
            resolver,
            resize: Debounce::new(RESIZE_WINDOW_MS),
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Create a driver over a fresh resolver using `keys`.
    pub fn with_keys(keys: AttributeKeys) -> Self {
        Self::new(Resolver::new(keys))
    }

    /// Replace the resize quiet window. Drops any pending resize.
    #[must_use]
    pub fn with_resize_window(mut self, window: u64) -> Self {
        self.resize = Debounce::new(window);
        self
    }

    /// The wrapped resolver.
    pub fn resolver(&self) -> &Resolver<N> {
        &self.resolver
    }

    /// Mutable access to the wrapped resolver, for direct calls.
    pub fn resolver_mut(&mut self) -> &mut Resolver<N> {
        &mut self.resolver
    }

    /// Run every auto-run element, now or after its delay.
    ///
    /// A missing, unparsable, or non-positive delay runs the element
    /// synchronously. Returns the number of elements run immediately.
    pub fn start<D: Document<Node = N>>(&mut self, doc: &mut D, now: u64) -> usize {
        let key = self.resolver.keys().on_load.clone();
        let nodes = doc.query_selector_all(&format!("[{key}]"));
        let mut ran = 0;
        for node in nodes {
            match parse_delay(doc.attribute(node, &key).as_deref()) {
                Some(delay) => {
                    log::debug!("auto-run {node:?} in {delay}ms");
                    self.pending.push(Scheduled {
                        due: now.saturating_add(delay),
                        seq: self.next_seq,
                        node,
                    });
                    self.next_seq += 1;
                }
                None => {
                    let _ = self.resolver.handle(doc, node);
                    ran += 1;
                }
            }
        }
        ran
    }

    /// A primary trigger event (click or equivalent) at `origin`.
    pub fn on_click<D: Document<Node = N>>(&mut self, doc: &mut D, origin: N) -> Outcome {
        self.resolver.handle(doc, origin)
    }

    /// A key press. Only `Escape` does anything.
    ///
    /// Returns the number of entries dismissed.
    pub fn on_key<D: Document<Node = N>>(&mut self, doc: &mut D, key: &str) -> usize {
        if key == "Escape" {
            self.resolver.handle_dismissal(doc, ESCAPE_TAG)
        } else {
            0
        }
    }

    /// A viewport resize notification at `now`.
    pub fn on_resize(&mut self, now: u64) {
        self.resize.trigger(now);
    }

    /// The earliest time at which [`Driver::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        let auto = self.pending.iter().map(|s| s.due).min();
        match (auto, self.resize.deadline()) {
            (Some(a), Some(r)) => Some(a.min(r)),
            (a, r) => a.or(r),
        }
    }

    /// Run everything due at `now`: delayed auto-runs first, in due order,
    /// then the debounced resize.
    ///
    /// Returns the number of actions fired.
    pub fn poll<D: Document<Node = N>>(&mut self, doc: &mut D, now: u64) -> usize {
        let mut due: Vec<Scheduled<N>> = Vec::new();
        self.pending.retain(|s| {
            if s.due <= now {
                due.push(*s);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|s| (s.due, s.seq));
        let mut fired = due.len();
        for s in due {
            let _ = self.resolver.handle(doc, s.node);
        }

        if self.resize.fire(now) {
            fired += 1;
            if !self.resolver.ledger().is_empty() {
                let _ = self.resolver.handle_dismissal(doc, RESIZE_TAG);
            }
        }
        fired
    }
}

// Accepts integer or fractional milliseconds; fractions round down, with a
// floor of 1ms for positive values.
fn parse_delay(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    if let Ok(ms) = raw.parse::<u64>() {
        return (ms > 0).then_some(ms);
    }
    let ms: f64 = raw.parse().ok()?;
    if !(ms.is_finite() && ms > 0.0) {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "positive finite value; float-to-int casts saturate"
    )]
    let whole = ms as u64;
    Some(whole.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, NodeId};

    fn auto(doc: &mut MemoryDocument, delay: Option<&str>, class: &str) -> NodeId {
        let body = doc.root();
        let n = doc.append_element(body, "div");
        doc.set_attribute(n, "data-toggle", class);
        doc.set_attribute(n, "data-on-load", delay.unwrap_or(""));
        n
    }

    #[test]
    fn delay_parsing() {
        assert_eq!(parse_delay(None), None);
        assert_eq!(parse_delay(Some("")), None);
        assert_eq!(parse_delay(Some("abc")), None);
        assert_eq!(parse_delay(Some("0")), None);
        assert_eq!(parse_delay(Some("-5")), None);
        assert_eq!(parse_delay(Some(" 250 ")), Some(250));
        assert_eq!(parse_delay(Some("12.7")), Some(12));
        assert_eq!(parse_delay(Some("0.2")), Some(1));
        assert_eq!(parse_delay(Some("NaN")), None);
    }

    #[test]
    fn start_runs_immediate_and_schedules_delayed() {
        let mut doc = MemoryDocument::new();
        let now = auto(&mut doc, None, "a");
        let later = auto(&mut doc, Some("200"), "b");
        let sooner = auto(&mut doc, Some("100"), "c");
        let mut d = Driver::default();

        assert_eq!(d.start(&mut doc, 1_000), 1);
        assert!(doc.has_class(now, "a"));
        assert!(!doc.has_class(later, "b"));
        assert_eq!(d.next_deadline(), Some(1_100));

        assert_eq!(d.poll(&mut doc, 1_150), 1);
        assert!(doc.has_class(sooner, "c"));
        assert!(!doc.has_class(later, "b"));
        assert_eq!(d.poll(&mut doc, 1_200), 1);
        assert!(doc.has_class(later, "b"));
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn escape_key_dismisses_escape_entries() {
        let mut doc = MemoryDocument::new();
        let b = doc.append_element(doc.root(), "button");
        doc.set_attribute(b, "data-toggle", "open");
        doc.set_attribute(b, "data-reset", "escape");
        let mut d = Driver::default();
        let _ = d.on_click(&mut doc, b);

        assert_eq!(d.on_key(&mut doc, "Enter"), 0);
        assert!(doc.has_class(b, "open"));
        assert_eq!(d.on_key(&mut doc, "Escape"), 1);
        assert!(!doc.has_class(b, "open"));
    }

    #[test]
    fn resize_with_empty_ledger_still_consumes_the_pending_call() {
        let mut doc: MemoryDocument = MemoryDocument::new();
        let mut d: Driver<NodeId> = Driver::default().with_resize_window(50);
        d.on_resize(0);
        assert_eq!(d.poll(&mut doc, 49), 0);
        assert_eq!(d.poll(&mut doc, 50), 1);
        assert_eq!(d.poll(&mut doc, 100), 0);
    }

    #[test]
    fn custom_on_load_key() {
        let keys = AttributeKeys::default().with_on_load("data-auto");
        let mut doc = MemoryDocument::new();
        let n = doc.append_element(doc.root(), "div");
        doc.set_attribute(n, "data-toggle", "ready");
        doc.set_attribute(n, "data-auto", "");
        let mut d = Driver::with_keys(keys);
        assert_eq!(d.start(&mut doc, 0), 1);
        assert!(doc.has_class(n, "ready"));
    }
}
