// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform composition along the parent chain.

use kurbo::{Point, Vec2};

use crate::matrix::Matrix2d;

use super::id::{INVALID, NodeId, NodeKind};
use super::store::NodeStore;

impl NodeStore {
    /// Returns the transform from `id`'s local space into the space of
    /// `ancestor`, or into world space when `ancestor` is `None`.
    ///
    /// Each node on the way contributes its pivot offset, then its scale and
    /// rotation, then its position. The walk stops at `ancestor` or at the
    /// first node without a parent; neither of those contributes. A
    /// parentless root therefore defines world space, and a node queried
    /// against itself yields the identity.
    ///
    /// If `ancestor` is not actually an ancestor, the result is the same as
    /// for `None`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    #[must_use]
    pub fn concatenated_matrix(&self, id: NodeId, ancestor: Option<NodeId>) -> Matrix2d {
        self.validate(id);
        let stop = match ancestor {
            Some(a) => {
                self.validate(a);
                a.idx
            }
            None => INVALID,
        };

        let mut m = Matrix2d::IDENTITY;
        let mut o = id.idx;
        while o != stop && self.parent[o as usize] != INVALID {
            let g = &self.geometry[o as usize];

            let rotation = g.rotation % 360.0;
            let (cos, sin) = if rotation != 0.0 {
                let dir = Vec2::from_angle(rotation.to_radians());
                (dir.x, dir.y)
            } else {
                (1.0, 0.0)
            };

            if g.pivot_x != 0.0 {
                m.tx -= g.pivot_x;
            }
            if g.pivot_y != 0.0 {
                m.ty -= g.pivot_y;
            }
            m.concat(
                cos * g.scale_x,
                sin * g.scale_x,
                -sin * g.scale_y,
                cos * g.scale_y,
                g.x,
                g.y,
            );

            o = self.parent[o as usize];
        }
        m
    }

    /// Maps a point from `id`'s local space to world space.
    #[must_use]
    pub fn local_to_global(&self, id: NodeId, point: Point) -> Point {
        self.concatenated_matrix(id, None)
            .transform_point(point, false, false)
    }

    /// Maps a world-space point into `id`'s local space.
    ///
    /// Returns `None` when the chain is not invertible, e.g. a zero scale
    /// somewhere on the way up.
    #[must_use]
    pub fn global_to_local(&self, id: NodeId, point: Point) -> Option<Point> {
        let inverse = self.concatenated_matrix(id, None).invert()?;
        Some(inverse.transform_point(point, false, false))
    }

    /// Returns the nearest stage at or above `id`.
    #[must_use]
    pub fn stage_of(&self, id: NodeId) -> Option<NodeId> {
        if self.kind(id) == NodeKind::Stage {
            return Some(id);
        }
        self.ancestors(id)
            .find(|&a| self.kind[a.idx as usize] == NodeKind::Stage)
    }
}
