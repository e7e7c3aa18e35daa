// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

use std::borrow::Cow;

use chartkit_core::{Mark, TextAnchor, TextBaseline};
use kurbo::{Point, Vec2};
use peniko::Brush;
use peniko::color::palette::css;

/// A text mark spec.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Anchor position in layer coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Rotation in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Offset applied after anchoring (SVG `dx`/`dy`).
    pub offset: Vec2,
    /// Fill paint.
    pub fill: Brush,
    /// Class attributes.
    pub classes: Vec<Cow<'static, str>>,
    /// Rendering order hint (`chartkit_core::Mark::z_index`).
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a new text mark spec with default styling.
    pub fn new(pos: Point, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
            font_size: 10.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            offset: Vec2::ZERO,
            fill: css::BLACK.into(),
            classes: Vec::new(),
            z_index: crate::z_order::AXIS_LABELS,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the post-anchor offset.
    pub fn with_offset(mut self, dx: f64, dy: f64) -> Self {
        self.offset = Vec2::new(dx, dy);
        self
    }

    /// Sets the text rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
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

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut b = Mark::builder()
            .text()
            .z_index(self.z_index)
            .x(self.pos.x)
            .y(self.pos.y)
            .content(self.text.clone())
            .font_size(self.font_size)
            .fill(Some(self.fill.clone()))
            .anchor(self.anchor)
            .baseline(self.baseline)
            .offset(self.offset.x, self.offset.y)
            .angle(self.angle);
        for class in &self.classes {
            b = b.class(class.clone());
        }
        b.build()
    }
}
