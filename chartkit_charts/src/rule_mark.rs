// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A "rule" is a straight stroked segment: axis domains, tick marks and guide lines.

use std::borrow::Cow;

use chartkit_core::Mark;
use kurbo::BezPath;
use peniko::Brush;
use peniko::color::palette::css;

use crate::z_order;

/// A rule mark spec (a stroked line segment).
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Start point x in layer coordinates.
    pub x0: f64,
    /// Start point y in layer coordinates.
    pub y0: f64,
    /// End point x in layer coordinates.
    pub x1: f64,
    /// End point y in layer coordinates.
    pub y1: f64,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
    /// Class attributes.
    pub classes: Vec<Cow<'static, str>>,
    /// Rendering order hint (`chartkit_core::Mark::z_index`).
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// Creates a black 1px rule between two points.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stroke: css::BLACK.into(),
            stroke_width: 1.0,
            classes: Vec::new(),
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Creates a horizontal rule.
    pub fn horizontal(y: f64, x0: f64, x1: f64) -> Self {
        Self::new(x0, y, x1, y)
    }

    /// Creates a vertical rule.
    pub fn vertical(x: f64, y0: f64, y1: f64) -> Self {
        Self::new(x, y0, x, y1)
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Appends a class.
    pub fn with_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mut p = BezPath::new();
        p.move_to((self.x0, self.y0));
        p.line_to((self.x1, self.y1));
        let mut b = Mark::builder()
            .path()
            .path_data(p)
            .z_index(self.z_index)
            .fill(None)
            .stroke(Some(self.stroke.clone()))
            .stroke_width(self.stroke_width);
        for class in &self.classes {
            b = b.class(class.clone());
        }
        b.build()
    }
}
