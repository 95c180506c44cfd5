// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, duplicate-free token lists for class names and reset tags.

use alloc::string::{String, ToString};

use smallvec::SmallVec;

/// An ordered set of lower-cased tokens.
///
/// Built from whitespace-separated attribute values such as `"open  Active"`.
/// Empty tokens are dropped and later duplicates are ignored, so insertion
/// order is the order of first appearance.
///
/// ```
/// use understory_interaction::tokens::TokenList;
///
/// let t = TokenList::parse("Open  active open");
/// assert_eq!(t.iter().collect::<Vec<_>>(), ["open", "active"]);
/// assert!(TokenList::parse("   ").is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList(SmallVec<[String; 4]>);

impl TokenList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Split `raw` on whitespace, lower-case each token, and drop duplicates.
    pub fn parse(raw: &str) -> Self {
        let mut out = Self::new();
        for token in raw.split_whitespace() {
            out.insert(&token.to_lowercase());
        }
        out
    }

    /// Parse an optional attribute value; absence yields an empty list.
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Append `token` unless it is empty or already present.
    ///
    /// Returns `true` if the list changed.
    pub fn insert(&mut self, token: &str) -> bool {
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.0.push(token.to_string());
        true
    }

    /// Whether `token` is in the list.
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for TokenList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut out = Self::new();
        for token in iter {
            out.insert(token);
        }
        out
    }
}
