// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation.

use std::borrow::Cow;

use chartkit_core::Mark;
use kurbo::Rect;
use peniko::Brush;

/// A rectangle mark spec.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Rectangle geometry in layer coordinates.
    pub rect: Rect,
    /// Fill paint; `None` is no fill.
    pub fill: Option<Brush>,
    /// Stroke paint; `None` is no stroke.
    pub stroke: Option<Brush>,
    /// Stroke width.
    pub stroke_width: f64,
    /// Class attribute.
    pub class: Cow<'static, str>,
    /// Bound datum index.
    pub datum: Option<usize>,
    /// Rendering order hint (`chartkit_core::Mark::z_index`).
    pub z_index: i32,
}

impl RectMarkSpec {
    /// Creates an unpainted rectangle spec.
    pub fn new(class: impl Into<Cow<'static, str>>, rect: Rect) -> Self {
        Self {
            rect,
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            class: class.into(),
            datum: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: Option<Brush>) -> Self {
        self.fill = fill;
        self
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: Option<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = stroke_width;
        self
    }

    /// Binds the rectangle to a datum.
    pub fn with_datum(mut self, index: usize) -> Self {
        self.datum = Some(index);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut b = Mark::builder()
            .rect()
            .class(self.class.clone())
            .z_index(self.z_index)
            .x(self.rect.x0)
            .y(self.rect.y0)
            .w(self.rect.width())
            .h(self.rect.height())
            .fill(self.fill.clone())
            .stroke(self.stroke.clone())
            .stroke_width(self.stroke_width);
        if let Some(i) = self.datum {
            b = b.datum(i);
        }
        b.build()
    }
}
