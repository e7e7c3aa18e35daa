// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained scene runtime for `chartkit`.
//!
//! This crate owns the part of chart rendering that is independent of any display surface:
//! - **Marks** are the visual primitives (rects, paths, text) a chart emits.
//! - **Layers** group marks that share a class and a translation (an SVG `<g>`).
//! - **Joins** bind an ordered data sequence to the marks of a layer by key, producing
//!   enter/update/exit [`MarkDiff`]s that a backend applies to its retained elements.
//!
//! The keyed matching itself is exposed as the pure [`reconcile`] function so it can be tested
//! without a scene.
//!
//! Scale math, tick layout and styling live downstream in `chartkit_charts`.

#![no_std]

extern crate alloc;

mod diff;
mod mark;
mod mount;
mod reconcile;
mod scene;

pub use diff::MarkDiff;
pub use mark::{
    Classes, Mark, MarkBuilder, MarkId, MarkKind, MarkPayload, PathMark, RectMark, TextAnchor,
    TextBaseline, TextMark,
};
pub use mount::MountPoint;
pub use reconcile::{Entered, Exited, Reconciliation, Updated, reconcile};
pub use scene::{Layer, LayerId, MarkGroup, Scene, index_key, value_key};
