// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-wide configuration.

use crate::hit::HitTestMode;

/// Configuration for a [`NodeStore`](crate::scene::NodeStore).
///
/// Passed to [`NodeStore::with_config`](crate::scene::NodeStore::with_config).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneConfig {
    /// Test used when deciding whether a `MouseOut`/`TouchOut` should bubble
    /// to the parent. The event stops at the parent while the parent still
    /// contains the pointer under this mode.
    pub pointer_out_hit_mode: HitTestMode,
    /// Fire a synthesized `MouseOver` the first time a `MouseMove` reaches a
    /// node after the pointer entered it.
    pub synthesize_pointer_over: bool,
}

impl SceneConfig {
    /// Exact polygon tests and pointer-over synthesis.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            pointer_out_hit_mode: HitTestMode::Polygon,
            synthesize_pointer_over: true,
        }
    }

    /// Like [`standard`](Self::standard), but `MouseOut` suppression only
    /// checks the parent's bounding box.
    #[must_use]
    pub const fn coarse() -> Self {
        Self {
            pointer_out_hit_mode: HitTestMode::BoundingBox,
            synthesize_pointer_over: true,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::standard()
    }
}
