// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heatmap and line chart components built on `chartkit_core`.
//!
//! This crate is the layer above the scene runtime:
//! - **Scales** map data values into plot coordinates; **axes** and the **color legend** are
//!   guides generated as keyed marks.
//! - **Components** ([`Heatmap`], [`Linechart`]) own a mount point and a retained scene. Each
//!   render recomputes scales from the new data and joins it against the existing marks,
//!   returning the [`chartkit_core::MarkDiff`]s a backend needs to apply.
//!
//! Records are JSON objects ([`Record`]); options load from camelCase JSON or are built with
//! `with_*` methods. Text is unshaped; boxes around text are sized with a [`TextMeasurer`].

mod axis;
mod color_map;
mod curve;
mod error;
mod format;
pub mod heatmap;
mod layout;
mod legend;
mod line_mark;
pub mod linechart;
mod measure;
mod options;
mod record;
mod rect_mark;
mod rule_mark;
mod scale;
mod text_mark;
mod z_order;

#[cfg(test)]
mod component_tests;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle, TickFormatter};
pub use color_map::{ColorMap, ColorMapEntry, parse_css_color};
pub use curve::monotone_x;
pub use error::{Axis, ChartError, Result};
pub use format::{format_number, format_tick_with_step};
pub use heatmap::{
    HEATMAP_LEGEND_BAND, HEATMAP_MARGINS, Heatmap, HeatmapDiffs, MAX_HEAT_ALPHA, heat_color,
};
pub use layout::{Margins, PlotLayout};
pub use legend::{ColorLegendSpec, LegendAnnotation};
pub use line_mark::{LineMarkSpec, default_line_stroke};
pub use linechart::{LINECHART_MARGINS, Linechart};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use options::{
    CellClickFn, ColorFn, FilterDataFn, HeatmapOptions, LinechartOptions, StrokeFn,
};
pub use record::{Record, extent, field_extent, field_f64, records_from_json};
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleLinear, resolve_domain, resolve_domain_of, resolve_interval_domain};
pub use text_mark::TextMarkSpec;
pub use z_order::*;
