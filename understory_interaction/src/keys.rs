// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute-name configuration.
//!
//! Every attribute the engine reads is named here, and each name can be
//! overridden at construction. This is the only customization point: the
//! engine's behavior is otherwise fixed.
//!
//! ```
//! use understory_interaction::keys::AttributeKeys;
//!
//! let keys = AttributeKeys::default()
//!     .with_trigger("data-ui-toggle")
//!     .with_reset("data-ui-reset");
//! assert_eq!(keys.trigger, "data-ui-toggle");
//! assert_eq!(keys.group, "data-group-reset");
//! ```

use alloc::string::{String, ToString};

use crate::tokens::TokenList;

/// Names of the declarative attributes read from trigger elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeKeys {
    /// Marks a trigger element. Its value lists classes toggled on the trigger.
    pub trigger: String,
    /// Selector redirecting class mutations to other elements.
    pub target: String,
    /// Classes toggled on redirected targets.
    pub target_classes: String,
    /// Toggle mode: `add`, `remove`, or anything else for toggle.
    pub mode: String,
    /// Whitespace-separated reset tags (for example `escape resize`).
    pub reset: String,
    /// Marks an ancestor as a group boundary.
    pub group: String,
    /// Scroll action: `enable`, `disable`, or anything else for toggle.
    pub scroll: String,
    /// Attribute name to attach.
    pub attach: String,
    /// Value used when attaching.
    pub attach_value: String,
    /// Attribute name to detach.
    pub detach: String,
    /// Selector for the element whose attribute is changed (defaults to the trigger).
    pub attribute_target: String,
    /// Marks elements that run once at startup; the value is an optional delay in milliseconds.
    pub on_load: String,
    /// Classes added to the body while scroll is locked.
    pub scroll_lock_classes: TokenList,
    /// Label the ledger is exposed under for introspection.
    pub namespace: String,
}

impl Default for AttributeKeys {
    fn default() -> Self {
        Self {
            trigger: "data-toggle".to_string(),
            target: "data-toggle-target".to_string(),
            target_classes: "data-toggle-target-class".to_string(),
            mode: "data-toggle-action".to_string(),
            reset: "data-reset".to_string(),
            group: "data-group-reset".to_string(),
            scroll: "data-toggle-scroll".to_string(),
            attach: "data-attr-attach".to_string(),
            attach_value: "data-attr-value".to_string(),
            detach: "data-attr-detach".to_string(),
            attribute_target: "data-attr-target".to_string(),
            on_load: "data-on-load".to_string(),
            scroll_lock_classes: TokenList::new(),
            namespace: "BasicInteractions".to_string(),
        }
    }
}

macro_rules! with_key {
    ($($(#[$doc:meta])* $fn:ident => $field:ident;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $fn(mut self, name: &str) -> Self {
                self.$field = name.to_string();
                self
            }
        )*
    };
}

impl AttributeKeys {
    with_key! {
        /// Override the trigger marker attribute.
        with_trigger => trigger;
        /// Override the target-selector attribute.
        with_target => target;
        /// Override the target-classes attribute.
        with_target_classes => target_classes;
        /// Override the toggle-mode attribute.
        with_mode => mode;
        /// Override the reset-tags attribute.
        with_reset => reset;
        /// Override the group-boundary attribute.
        with_group => group;
        /// Override the scroll-toggle attribute.
        with_scroll => scroll;
        /// Override the attribute-attach attribute.
        with_attach => attach;
        /// Override the attach-value attribute.
        with_attach_value => attach_value;
        /// Override the attribute-detach attribute.
        with_detach => detach;
        /// Override the attribute-target selector attribute.
        with_attribute_target => attribute_target;
        /// Override the auto-run-on-load attribute.
        with_on_load => on_load;
        /// Override the introspection namespace.
        with_namespace => namespace;
    }

    /// Override the classes added to the body while scroll is locked.
    #[must_use]
    pub fn with_scroll_lock_classes(mut self, classes: &str) -> Self {
        self.scroll_lock_classes = TokenList::parse(classes);
        self
    }
}
