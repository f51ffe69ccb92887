// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity and kind.

use core::fmt;

/// Sentinel value indicating "no node" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`NodeStore`](super::NodeStore).
///
/// Carries a slot index and a generation counter so that stale handles are
/// detected after a node is destroyed and its slot reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

/// What a node is, which decides how it renders and whether it may hold
/// children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a displayed tree, found with
    /// [`NodeStore::stage_of`](super::NodeStore::stage_of). World space is
    /// the frame of the parentless root, whatever its kind.
    Stage,
    /// Groups children without drawing content of its own.
    Container,
    /// Draws an image.
    Sprite,
    /// Draws vector content.
    Shape,
    /// Draws a run of text.
    Text,
}

impl NodeKind {
    /// Whether nodes of this kind may have children.
    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Stage | Self::Container)
    }

    /// Stable lowercase name, used by trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::Container => "container",
            Self::Sprite => "sprite",
            Self::Shape => "shape",
            Self::Text => "text",
        }
    }
}
