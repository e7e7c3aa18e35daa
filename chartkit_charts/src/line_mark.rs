// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

use chartkit_core::Mark;
use kurbo::Point;
use peniko::Color;

use crate::axis::StrokeStyle;
use crate::curve::monotone_x;
use crate::scale::ScaleLinear;

/// A line mark through data points.
///
/// This generates a single [`chartkit_core::MarkKind::Path`] mark interpolated with
/// [`monotone_x`].
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// X scale mapping data x into layer x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into layer y.
    pub y_scale: ScaleLinear,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Rendering order hint (`chartkit_core::Mark::z_index`).
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a line mark spec with a black stroke at width 1.
    pub fn new(x_scale: ScaleLinear, y_scale: ScaleLinear) -> Self {
        Self {
            x_scale,
            y_scale,
            stroke: StrokeStyle::default(),
            z_index: crate::z_order::SERIES_STROKE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the path mark for `(x, y)` data points.
    ///
    /// Points are ordered by x (ties keep their input order) before interpolation.
    pub fn mark(&self, points: &[(f64, f64)]) -> Mark {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mapped: Vec<Point> = sorted
            .iter()
            .map(|&(x, y)| Point::new(self.x_scale.map(x), self.y_scale.map(y)))
            .collect();

        Mark::builder()
            .path()
            .class("chart-linePath")
            .z_index(self.z_index)
            .path_data(monotone_x(&mapped))
            .fill(None)
            .stroke(Some(self.stroke.brush.clone()))
            .stroke_width(self.stroke.stroke_width)
            .build()
    }
}

/// Stroke used for line series: `rgb(0, 0, 255)` at width 2.
pub fn default_line_stroke() -> StrokeStyle {
    StrokeStyle::solid(Color::from_rgb8(0, 0, 255), 2.0)
}
