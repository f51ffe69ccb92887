// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-plan recording for tableau scene trees.
//!
//! This crate sits between [`tableau_core`]'s render dispatch and a drawing
//! backend. [`PlanRenderer`] implements
//! [`Renderer`](tableau_core::render::Renderer) by recording one
//! [`RenderItem`] per drawn node into a [`RenderPlan`], which a backend can
//! replay in back-to-front order.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod plan;

pub use plan::{PlanRenderer, RenderItem, RenderPlan};
