// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark diffs emitted by scene joins.

use alloc::boxed::Box;

use crate::mark::{Mark, MarkId, MarkKind};
use crate::scene::LayerId;

/// A change to the retained mark set.
///
/// Backends keep their own element map keyed by [`MarkId`] and apply diffs in order.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark was created.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Owning layer.
        layer: LayerId,
        /// Mark kind.
        kind: MarkKind,
        /// The new mark.
        new: Box<Mark>,
    },
    /// A retained mark was re-encoded with different attributes.
    Update {
        /// Mark id.
        id: MarkId,
        /// Owning layer.
        layer: LayerId,
        /// Mark kind after the update.
        kind: MarkKind,
        /// The previous mark.
        old: Box<Mark>,
        /// The new mark.
        new: Box<Mark>,
    },
    /// A mark was removed.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Owning layer.
        layer: LayerId,
        /// Mark kind.
        kind: MarkKind,
        /// The removed mark.
        old: Box<Mark>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// Returns the layer of the affected mark.
    pub fn layer(&self) -> LayerId {
        match self {
            Self::Enter { layer, .. } | Self::Update { layer, .. } | Self::Exit { layer, .. } => {
                *layer
            }
        }
    }

    /// Returns `true` for [`MarkDiff::Enter`].
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    /// Returns `true` for [`MarkDiff::Update`].
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    /// Returns `true` for [`MarkDiff::Exit`].
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}
