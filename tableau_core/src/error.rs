// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for geometric queries.

use core::fmt;

use crate::scene::NodeId;

/// Errors from bounds and hit-test queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// The node has an explicitly empty custom bounds polygon, so no bounds
    /// can be derived for it.
    InvalidGeometry {
        /// The node whose polygon is empty.
        node: NodeId,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { node } => {
                write!(f, "invalid geometry: {node:?} has an empty bounds area")
            }
        }
    }
}

impl core::error::Error for GeometryError {}
