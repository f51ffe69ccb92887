// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry core for 2D scene-graph display objects.
//!
//! `tableau_core` composes per-node transforms along a parent chain, derives
//! world-space bounds, and answers point and shape hit tests, including exact
//! polygon tests by ray casting and the separating-axis theorem. It is
//! `no_std` compatible (with `alloc`) and keeps nodes in struct-of-arrays
//! storage addressed by generational handles.
//!
//! # Architecture
//!
//! ```text
//!   NodeStore (geometry, topology)
//!       │
//!       ▼
//!   concatenated_matrix() ──► Matrix2d ──► bounds() ──► Bounds
//!                                                          │
//!                 ┌────────────────────────────────────────┤
//!                 ▼                                        ▼
//!   hit_test_point / view_at_point          hit_test_shape (SAT)
//!                 │
//!                 ▼
//!   dispatch_event() ──► EventListener::fire()
//!
//!   render() ──► UpdateHook::on_update() ──► Renderer::{start_draw, …}
//! ```
//!
//! **[`matrix`]**: [`Matrix2d`], the 2D affine transform with
//! concatenation and point mapping.
//!
//! **[`scene`]**: [`NodeStore`] and [`NodeId`]: node properties, topology,
//! and all tree-walking queries.
//!
//! **[`bounds`]**: [`Bounds`], a transformed polygon plus its enclosing box.
//!
//! **[`hit`]**: point-in-polygon and separating-axis primitives.
//!
//! **[`event`]**: [`PointerEvent`](event::PointerEvent) and the
//! [`EventListener`](event::EventListener) capability used by bubbling.
//!
//! **[`render`]**: the [`Renderer`](render::Renderer) and
//! [`UpdateHook`](render::UpdateHook) capabilities used by render dispatch.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! **[`config`]**: [`SceneConfig`].
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod bounds;
pub mod config;
pub mod error;
pub mod event;
pub mod hit;
pub mod matrix;
pub mod render;
pub mod scene;
pub mod trace;

pub use bounds::Bounds;
pub use config::SceneConfig;
pub use error::GeometryError;
pub use hit::HitTestMode;
pub use matrix::Matrix2d;
pub use scene::{NodeId, NodeKind, NodeStore};
