// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Internal failure reasons.
//!
//! None of these reach the caller of [`Resolver`](crate::resolver::Resolver):
//! the resolver logs them and moves on. They are public so hosts driving the
//! appliers or [`ResetEntry::invert`](crate::ledger::ResetEntry::invert)
//! directly can inspect what was skipped.

use core::fmt::Debug;

/// Why a mutation or inversion step was skipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError<N: Debug> {
    /// The node no longer belongs to the document.
    #[error("node {0:?} is no longer part of the document")]
    Detached(N),
    /// The scroll lock needs a body element and the document has none.
    #[error("document has no body to pin")]
    MissingBody,
}
