// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll locker.
//!
//! One lock exists per engine no matter how many triggers reference it.
//! Locking captures the current scroll offset and pins the body with fixed
//! positioning at the negated offset; unlocking removes the pin and scrolls
//! back. Lock classes the host had already put on the body are left in place
//! on unlock. Requests that would not change the lock state are no-ops, so the
//! captured offset is only ever taken on a fresh transition into the locked
//! state.

use alloc::format;

use kurbo::Point;

use crate::document::Document;
use crate::error::InteractionError;
use crate::request::ScrollAction;
use crate::tokens::TokenList;

const PIN_PROPERTIES: [&str; 5] = ["position", "overflow", "top", "left", "right"];

/// A lock state change that actually happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollTransition {
    /// Unlocked → locked.
    Lock,
    /// Locked → unlocked.
    Unlock,
}

impl ScrollTransition {
    /// The transition that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Lock => Self::Unlock,
            Self::Unlock => Self::Lock,
        }
    }
}

/// Page scroll lock state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollLock {
    locked: bool,
    captured: Point,
    classes: TokenList,
    /// Lock classes the body did not already carry when the lock engaged.
    added: TokenList,
}

impl ScrollLock {
    /// Create an unlocked state with no body classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unlocked state that adds `classes` to the body while locked.
    pub fn with_classes(classes: TokenList) -> Self {
        Self {
            classes,
            ..Self::default()
        }
    }

    /// Whether the page is currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Offset captured by the most recent lock.
    pub fn captured(&self) -> Point {
        self.captured
    }

    /// Resolve `action` against the current state and perform it.
    ///
    /// Returns the transition taken, or `None` if the lock was already in the
    /// requested state.
    pub fn apply<D: Document>(
        &mut self,
        doc: &mut D,
        action: ScrollAction,
    ) -> Result<Option<ScrollTransition>, InteractionError<D::Node>> {
        let transition = match (action, self.locked) {
            (ScrollAction::Disable | ScrollAction::Toggle, false) => ScrollTransition::Lock,
            (ScrollAction::Enable | ScrollAction::Toggle, true) => ScrollTransition::Unlock,
            (ScrollAction::Disable, true) | (ScrollAction::Enable, false) => return Ok(None),
        };
        self.transition(doc, transition)
    }

    /// Perform `transition` if it changes the lock state.
    pub fn transition<D: Document>(
        &mut self,
        doc: &mut D,
        transition: ScrollTransition,
    ) -> Result<Option<ScrollTransition>, InteractionError<D::Node>> {
        let want_locked = transition == ScrollTransition::Lock;
        if want_locked == self.locked {
            return Ok(None);
        }
        let body = doc.body().ok_or(InteractionError::MissingBody)?;
        if want_locked {
            self.captured = doc.scroll_position();
            doc.set_style(body, "position", "fixed");
            doc.set_style(body, "overflow", "hidden");
            doc.set_style(body, "top", &format!("-{}px", self.captured.y));
            doc.set_style(body, "left", "0");
            doc.set_style(body, "right", "0");
            self.added = TokenList::new();
            for class in self.classes.iter() {
                if !doc.has_class(body, class) {
                    doc.add_class(body, class);
                    self.added.insert(class);
                }
            }
        } else {
            for property in PIN_PROPERTIES {
                doc.remove_style(body, property);
            }
            for class in self.added.iter() {
                doc.remove_class(body, class);
            }
            self.added = TokenList::new();
            doc.scroll_to(self.captured);
        }
        self.locked = want_locked;
        log::trace!("scroll {transition:?} at {:?}", self.captured);
        Ok(Some(transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;

    #[test]
    fn lock_pins_body_at_negative_offset() {
        let mut doc = MemoryDocument::new();
        doc.scroll_to(Point::new(0.0, 120.0));
        let mut lock = ScrollLock::with_classes(TokenList::parse("no-scroll"));
        let t = lock.apply(&mut doc, ScrollAction::Disable).expect("body");
        assert_eq!(t, Some(ScrollTransition::Lock));
        let body = doc.root();
        assert_eq!(doc.style(body, "position"), Some("fixed"));
        assert_eq!(doc.style(body, "top"), Some("-120px"));
        assert!(doc.has_class(body, "no-scroll"));
        assert!(lock.is_locked());
    }

    #[test]
    fn repeated_disable_keeps_first_offset() {
        let mut doc = MemoryDocument::new();
        let mut lock = ScrollLock::new();
        doc.scroll_to(Point::new(0.0, 300.0));
        let _ = lock.apply(&mut doc, ScrollAction::Disable);
        doc.scroll_to(Point::new(0.0, 10.0));
        let again = lock.apply(&mut doc, ScrollAction::Disable).expect("body");
        assert_eq!(again, None);
        assert_eq!(lock.captured(), Point::new(0.0, 300.0));

        let t = lock.apply(&mut doc, ScrollAction::Enable).expect("body");
        assert_eq!(t, Some(ScrollTransition::Unlock));
        assert_eq!(doc.scroll_position(), Point::new(0.0, 300.0));
        assert_eq!(doc.style_count(doc.root()), 0);
        assert!(!lock.is_locked());
    }

    #[test]
    fn toggle_flips_and_enable_when_unlocked_is_noop() {
        let mut doc = MemoryDocument::new();
        let mut lock = ScrollLock::new();
        assert_eq!(lock.apply(&mut doc, ScrollAction::Enable), Ok(None));
        assert_eq!(
            lock.apply(&mut doc, ScrollAction::Toggle),
            Ok(Some(ScrollTransition::Lock))
        );
        assert_eq!(
            lock.apply(&mut doc, ScrollAction::Toggle),
            Ok(Some(ScrollTransition::Unlock))
        );
    }

    #[test]
    fn unlock_keeps_body_classes_set_by_the_host() {
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        doc.add_class(body, "locked");
        let mut lock = ScrollLock::with_classes(TokenList::parse("locked frozen"));

        let _ = lock.apply(&mut doc, ScrollAction::Disable).expect("body");
        assert!(doc.has_class(body, "locked") && doc.has_class(body, "frozen"));
        let _ = lock.apply(&mut doc, ScrollAction::Enable).expect("body");
        assert_eq!(doc.classes(body), ["locked"]);
    }

    #[test]
    fn inverse_round_trips() {
        assert_eq!(ScrollTransition::Lock.inverse(), ScrollTransition::Unlock);
        assert_eq!(ScrollTransition::Unlock.inverse().inverse(), ScrollTransition::Unlock);
    }
}
