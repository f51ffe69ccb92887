// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene tree data model.
//!
//! A *node* is a display object in a 2D scene tree. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed.
//! - A [`NodeKind`]. [`Stage`](NodeKind::Stage) marks the root of a displayed
//!   tree; stages and containers hold children, the other kinds are leaves.
//! - Topology: parent, first-child, and sibling links forming an ordered
//!   tree. Later children sit on top of earlier ones.
//! - **Local properties** set by the caller: [`Geometry`] (position, size,
//!   rotation, pivot, scale), an optional custom bounds polygon, visibility,
//!   alpha, and pointer picking.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.
//!
//! # Queries
//!
//! Nothing is cached. [`concatenated_matrix`](NodeStore::concatenated_matrix),
//! [`bounds`](NodeStore::bounds), and the hit tests recompute from the
//! current properties on every call, walking the parent chain.
//!
//! # Frame work
//!
//! [`render`](NodeStore::render) drives a [`Renderer`](crate::render::Renderer)
//! over a subtree, and [`dispatch_event`](NodeStore::dispatch_event) bubbles
//! a pointer event from its target toward the root.

mod compose;
mod dispatch;
mod draw;
mod id;
mod query;
mod store;
mod traverse;

pub use id::{INVALID, NodeId, NodeKind};
pub use store::{Geometry, NodeStore};
pub use traverse::{Ancestors, Children};
