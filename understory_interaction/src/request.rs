// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute reader: turn a trigger element's attributes into an [`InteractionRequest`].
//!
//! Reading is best-effort. Missing or garbled attributes degrade to the most
//! conservative value (an empty token list, no action) and never fail.

use alloc::string::{String, ToString};

use crate::document::Document;
use crate::keys::AttributeKeys;
use crate::tokens::TokenList;

/// How a class set is applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToggleMode {
    /// Force every class on.
    Add,
    /// Force every class off.
    Remove,
    /// Invert each class independently.
    #[default]
    Toggle,
}

impl ToggleMode {
    /// Match `raw` case-insensitively against `add` and `remove`; anything else is `Toggle`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("add") => Self::Add,
            Some(v) if v.eq_ignore_ascii_case("remove") => Self::Remove,
            _ => Self::Toggle,
        }
    }
}

/// Requested change to the page scroll lock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAction {
    /// Release the lock.
    Enable,
    /// Engage the lock.
    Disable,
    /// Flip the current lock state.
    Toggle,
}

impl ScrollAction {
    /// `enable` and `disable` (case-insensitive) map to themselves; any other
    /// present value is `Toggle`; an absent attribute is no action.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let v = raw?.trim();
        Some(if v.eq_ignore_ascii_case("enable") {
            Self::Enable
        } else if v.eq_ignore_ascii_case("disable") {
            Self::Disable
        } else {
            Self::Toggle
        })
    }
}

/// Direction of an attribute change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeDirection {
    /// Set the attribute if it is absent.
    Attach,
    /// Remove the attribute if it is present.
    Detach,
}

/// A requested attribute change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeChange {
    /// Attribute name.
    pub name: String,
    /// Value to attach; `None` attaches an empty value.
    pub value: Option<String>,
    /// Which way to change it.
    pub direction: AttributeDirection,
}

/// Everything one trigger asks for, read once per invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionRequest<N> {
    /// The element carrying the trigger marker.
    pub trigger: N,
    /// Classes toggled on the primary target.
    pub toggle_classes: TokenList,
    /// Classes toggled on the trigger itself when the primary target is redirected.
    pub self_toggle_classes: Option<TokenList>,
    /// Resolved toggle mode, shared by both class sets.
    pub mode: ToggleMode,
    /// Selector redirecting class mutations away from the trigger.
    pub target_selector: Option<String>,
    /// Requested attribute change.
    pub attribute_change: Option<AttributeChange>,
    /// Selector for the element whose attribute changes; the trigger when absent.
    pub attribute_target: Option<String>,
    /// Requested scroll lock change.
    pub scroll_action: Option<ScrollAction>,
    /// Dismissal tags that later invert this interaction. Empty means never.
    pub reset_tags: TokenList,
    /// Nearest ancestor (or self) marked as a group boundary.
    pub group_scope: Option<N>,
}

/// Find the trigger for an event that originated at `origin` and read its request.
///
/// Returns `None` when neither `origin` nor any ancestor carries the trigger marker.
pub fn parse<D: Document>(
    doc: &D,
    keys: &AttributeKeys,
    origin: D::Node,
) -> Option<InteractionRequest<D::Node>> {
    let trigger = doc.closest(origin, &keys.trigger)?;
    Some(read(doc, keys, trigger))
}

/// Read the request carried by `trigger`.
pub fn read<D: Document>(
    doc: &D,
    keys: &AttributeKeys,
    trigger: D::Node,
) -> InteractionRequest<D::Node> {
    let attr = |name: &str| doc.attribute(trigger, name);
    let non_empty = |name: &str| {
        attr(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let own_classes = TokenList::parse_opt(attr(&keys.trigger).as_deref());
    let target_selector = non_empty(&keys.target);
    let (toggle_classes, self_toggle_classes) = if target_selector.is_some() {
        let target_classes = TokenList::parse_opt(attr(&keys.target_classes).as_deref());
        (target_classes, Some(own_classes))
    } else {
        (own_classes, None)
    };

    InteractionRequest {
        trigger,
        toggle_classes,
        self_toggle_classes,
        mode: ToggleMode::parse(attr(&keys.mode).as_deref()),
        target_selector,
        attribute_change: attribute_change(
            non_empty(&keys.attach),
            attr(&keys.attach_value),
            non_empty(&keys.detach),
        ),
        attribute_target: non_empty(&keys.attribute_target),
        scroll_action: ScrollAction::parse(attr(&keys.scroll).as_deref()),
        reset_tags: TokenList::parse_opt(attr(&keys.reset).as_deref()),
        group_scope: doc.closest(trigger, &keys.group),
    }
}

// An attach carrying an explicit value outranks a detach on the same element.
fn attribute_change(
    attach: Option<String>,
    value: Option<String>,
    detach: Option<String>,
) -> Option<AttributeChange> {
    match (attach, value, detach) {
        (Some(name), Some(value), _) => Some(AttributeChange {
            name,
            value: Some(value),
            direction: AttributeDirection::Attach,
        }),
        (_, _, Some(name)) => Some(AttributeChange {
            name,
            value: None,
            direction: AttributeDirection::Detach,
        }),
        (Some(name), None, None) => Some(AttributeChange {
            name,
            value: None,
            direction: AttributeDirection::Attach,
        }),
        (None, _, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;
    use alloc::vec::Vec;

    fn classes(t: &TokenList) -> Vec<&str> {
        t.iter().collect()
    }

    #[test]
    fn mode_is_case_insensitive_and_defaults_to_toggle() {
        assert_eq!(ToggleMode::parse(Some("ADD")), ToggleMode::Add);
        assert_eq!(ToggleMode::parse(Some(" Remove ")), ToggleMode::Remove);
        assert_eq!(ToggleMode::parse(Some("sideways")), ToggleMode::Toggle);
        assert_eq!(ToggleMode::parse(None), ToggleMode::Toggle);
    }

    #[test]
    fn scroll_action_parse() {
        assert_eq!(ScrollAction::parse(None), None);
        assert_eq!(ScrollAction::parse(Some("Disable")), Some(ScrollAction::Disable));
        assert_eq!(ScrollAction::parse(Some("enable")), Some(ScrollAction::Enable));
        assert_eq!(ScrollAction::parse(Some("")), Some(ScrollAction::Toggle));
    }

    #[test]
    fn parse_walks_up_to_trigger() {
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        let button = doc.append_element(body, "button");
        doc.set_attribute(button, "data-toggle", "Open active");
        doc.set_attribute(button, "data-reset", "escape");
        let icon = doc.append_element(button, "span");

        let req = parse(&doc, &AttributeKeys::default(), icon).expect("trigger ancestor");
        assert_eq!(req.trigger, button);
        assert_eq!(classes(&req.toggle_classes), ["open", "active"]);
        assert_eq!(req.self_toggle_classes, None);
        assert_eq!(req.mode, ToggleMode::Toggle);
        assert_eq!(classes(&req.reset_tags), ["escape"]);
        assert_eq!(req.group_scope, None);
    }

    #[test]
    fn parse_without_trigger_is_none() {
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        let div = doc.append_element(body, "div");
        assert!(parse(&doc, &AttributeKeys::default(), div).is_none());
    }

    #[test]
    fn redirect_splits_target_and_self_classes() {
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        let button = doc.append_element(body, "button");
        doc.set_attribute(button, "data-toggle", "pressed");
        doc.set_attribute(button, "data-toggle-target", "#menu");
        doc.set_attribute(button, "data-toggle-target-class", "visible");

        let req = read(&doc, &AttributeKeys::default(), button);
        assert_eq!(req.target_selector.as_deref(), Some("#menu"));
        assert_eq!(classes(&req.toggle_classes), ["visible"]);
        assert_eq!(req.self_toggle_classes.as_ref().map(classes), Some(alloc::vec!["pressed"]));
    }

    #[test]
    fn attach_with_value_outranks_detach() {
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        let b = doc.append_element(body, "button");
        doc.set_attribute(b, "data-toggle", "");
        doc.set_attribute(b, "data-attr-attach", "aria-expanded");
        doc.set_attribute(b, "data-attr-value", "true");
        doc.set_attribute(b, "data-attr-detach", "hidden");

        let change = read(&doc, &AttributeKeys::default(), b)
            .attribute_change
            .expect("attribute change");
        assert_eq!(change.name, "aria-expanded");
        assert_eq!(change.value.as_deref(), Some("true"));
        assert_eq!(change.direction, AttributeDirection::Attach);
    }

    #[test]
    fn bare_detach_outranks_valueless_attach() {
        let change = attribute_change(Some("a".into()), None, Some("b".into())).expect("change");
        assert_eq!(change.name, "b");
        assert_eq!(change.direction, AttributeDirection::Detach);

        let change = attribute_change(Some("a".into()), None, None).expect("change");
        assert_eq!(change.direction, AttributeDirection::Attach);
        assert_eq!(change.value, None);

        assert_eq!(attribute_change(None, Some("v".into()), None), None);
    }

    #[test]
    fn group_scope_is_nearest_boundary() {
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        let outer = doc.append_element(body, "div");
        doc.set_attribute(outer, "data-group-reset", "");
        let inner = doc.append_element(outer, "ul");
        doc.set_attribute(inner, "data-group-reset", "");
        let item = doc.append_element(inner, "li");
        doc.set_attribute(item, "data-toggle", "open");

        let req = read(&doc, &AttributeKeys::default(), item);
        assert_eq!(req.group_scope, Some(inner));
    }

    #[test]
    fn custom_keys_are_honored() {
        let keys = AttributeKeys::default().with_trigger("x-toggle").with_reset("x-reset");
        let mut doc = MemoryDocument::new();
        let body = doc.root();
        let b = doc.append_element(body, "button");
        doc.set_attribute(b, "x-toggle", "on");
        doc.set_attribute(b, "x-reset", "resize escape");
        doc.set_attribute(b, "data-reset", "ignored");

        let req = parse(&doc, &keys, b).expect("trigger");
        assert_eq!(classes(&req.reset_tags), ["resize", "escape"]);
        assert!(parse(&doc, &AttributeKeys::default(), b).is_none());
    }
}
