// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Layers paint in id order; within a layer marks sort by `(z_index, MarkId)`. These values keep
//! mixed-kind layers (axis rules and labels, legend swatches and labels) in a fixed order.

/// Reference lines drawn behind series.
pub const GUIDE_LINES: i32 = -50;

/// Filled series marks (heatmap cells).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (lines).
pub const SERIES_STROKE: i32 = 10;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title backgrounds.
pub const AXIS_TITLE_BOXES: i32 = 45;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
