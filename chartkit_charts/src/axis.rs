// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An axis is a single [`AxisSpec`] with an `orient` of `top`, `bottom`, `left`, or `right`.
//! Marks are generated in the axis layer's own coordinates: the domain line runs along the
//! origin and ticks extend outward from it, so the layer offset places the axis next to the
//! plot. Ticks are joined by value, so re-rendering with the same domain touches nothing.

use std::sync::Arc;

use chartkit_core::{
    LayerId, Mark, MarkDiff, MarkGroup, Scene, TextAnchor, TextBaseline, value_key,
};
use kurbo::BezPath;
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::smallvec;

use crate::format::format_tick_with_step;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::ScaleLinear;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, guide lines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area; ticks point up.
    Top,
    /// A horizontal axis placed below the plot area; ticks point down.
    Bottom,
    /// A vertical axis placed to the left of the plot area; ticks point left.
    Left,
    /// A vertical axis placed to the right of the plot area; ticks point right.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `-1` for ticks pointing up/left, `1` for down/right.
    fn direction(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }
}

/// Formats a tick value into its label.
pub type TickFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// An axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of generated ticks.
    pub tick_count: usize,
    /// Explicit tick values, used verbatim instead of generated ticks.
    pub tick_values: Option<Vec<f64>>,
    /// Optional tick label formatter.
    pub tick_formatter: Option<TickFormatter>,
    /// Tick line length.
    pub tick_size: f64,
    /// Length of the ticks at both ends of the domain line.
    pub outer_tick_size: f64,
    /// Gap between the tick end and the tick label.
    pub tick_padding: f64,
    /// Label anchor; defaults depend on the orientation.
    pub label_anchor: Option<TextAnchor>,
    /// Extra label offset `(dx, dy)` applied after anchoring.
    pub label_offset: (f64, f64),
    /// Axis styling.
    pub style: AxisStyle,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_values", &self.tick_values)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .field("tick_size", &self.tick_size)
            .field("outer_tick_size", &self.outer_tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("label_anchor", &self.label_anchor)
            .field("label_offset", &self.label_offset)
            .field("style", &self.style)
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification.
    ///
    /// The returned axis has:
    /// - `tick_count = 10`
    /// - `tick_size = 6` and `outer_tick_size = 6`
    /// - `tick_padding = 3`
    /// - generated tick values and default formatting.
    pub fn new(orient: AxisOrient) -> Self {
        Self {
            orient,
            tick_count: 10,
            tick_values: None,
            tick_formatter: None,
            tick_size: 6.0,
            outer_tick_size: 6.0,
            tick_padding: 3.0,
            label_anchor: None,
            label_offset: (0.0, 0.0),
            style: AxisStyle::default(),
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom() -> Self {
        Self::new(AxisOrient::Bottom)
    }

    /// Convenience constructor for a `top` axis.
    pub fn top() -> Self {
        Self::new(AxisOrient::Top)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left() -> Self {
        Self::new(AxisOrient::Left)
    }

    /// Convenience constructor for a `right` axis.
    pub fn right() -> Self {
        Self::new(AxisOrient::Right)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Use explicit tick values (`None` restores generated ticks).
    pub fn with_tick_values(mut self, values: Option<Vec<f64>>) -> Self {
        self.tick_values = values;
        self
    }

    /// Set a custom tick label formatter (`None` restores default formatting).
    pub fn with_tick_formatter(mut self, f: Option<TickFormatter>) -> Self {
        self.tick_formatter = f;
        self
    }

    /// Set tick size in scene coordinates.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Set tick padding in scene coordinates.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Override the label anchor.
    pub fn with_label_anchor(mut self, anchor: TextAnchor) -> Self {
        self.label_anchor = Some(anchor);
        self
    }

    /// Shift labels by `(dx, dy)` after anchoring.
    pub fn with_label_offset(mut self, dx: f64, dy: f64) -> Self {
        self.label_offset = (dx, dy);
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the tick values for `scale` and the step used to format them.
    pub fn ticks(&self, scale: &ScaleLinear) -> (Vec<f64>, f64) {
        match &self.tick_values {
            Some(values) => {
                let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
                let step = tick_step(&values);
                (values, step)
            }
            None => (scale.ticks(self.tick_count), scale.tick_step(self.tick_count)),
        }
    }

    /// Formats one tick label.
    pub fn format_tick(&self, value: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => f(value),
            None => format_tick_with_step(value, step),
        }
    }

    /// Joins the domain line and ticks of this axis into `layer`.
    ///
    /// Each tick is one datum keyed by its value, encoded as a rule and a label.
    pub fn join(&self, scene: &mut Scene, layer: LayerId, scale: &ScaleLinear) -> Vec<MarkDiff> {
        let (ticks, step) = self.ticks(scale);
        let mut items = Vec::with_capacity(ticks.len() + 1);
        items.push(AxisItem::Domain);
        items.extend(ticks.into_iter().map(AxisItem::Tick));

        scene.join(
            layer,
            &items,
            |_, item| match item {
                AxisItem::Domain => DOMAIN_KEY,
                AxisItem::Tick(v) => value_key(*v),
            },
            |_, item| match item {
                AxisItem::Domain => smallvec![self.domain_mark(scale)],
                AxisItem::Tick(v) => self.tick_group(scale, *v, step),
            },
        )
    }

    fn domain_mark(&self, scale: &ScaleLinear) -> Mark {
        let (r0, r1) = scale.range();
        let outer = self.orient.direction() * self.outer_tick_size;
        let mut p = BezPath::new();
        if self.orient.is_horizontal() {
            p.move_to((r0, outer));
            p.line_to((r0, 0.0));
            p.line_to((r1, 0.0));
            p.line_to((r1, outer));
        } else {
            p.move_to((outer, r0));
            p.line_to((0.0, r0));
            p.line_to((0.0, r1));
            p.line_to((outer, r1));
        }
        Mark::builder()
            .path()
            .class("domain")
            .z_index(z_order::AXIS_RULES)
            .path_data(p)
            .fill(None)
            .stroke(Some(self.style.rule.brush.clone()))
            .stroke_width(self.style.rule.stroke_width)
            .build()
    }

    fn tick_group(&self, scale: &ScaleLinear, value: f64, step: f64) -> MarkGroup {
        let pos = scale.map(value);
        let k = self.orient.direction();
        let tick_end = k * self.tick_size;
        let label_at = k * (self.tick_size.max(0.0) + self.tick_padding);

        let (rule, label_pos, anchor, baseline) = match self.orient {
            AxisOrient::Top | AxisOrient::Bottom => (
                RuleMarkSpec::vertical(pos, 0.0, tick_end),
                (pos, label_at),
                TextAnchor::Middle,
                if self.orient == AxisOrient::Top {
                    TextBaseline::Alphabetic
                } else {
                    TextBaseline::Hanging
                },
            ),
            AxisOrient::Left | AxisOrient::Right => (
                RuleMarkSpec::horizontal(pos, 0.0, tick_end),
                (label_at, pos),
                if self.orient == AxisOrient::Left {
                    TextAnchor::End
                } else {
                    TextAnchor::Start
                },
                TextBaseline::Middle,
            ),
        };
        let rule = rule
            .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
            .with_class("tick")
            .with_z_index(z_order::AXIS_RULES)
            .mark();

        let mut label = TextMarkSpec::new(label_pos.into(), self.format_tick(value, step))
            .with_font_size(self.style.label_font_size)
            .with_anchor(self.label_anchor.unwrap_or(anchor))
            .with_baseline(baseline)
            .with_offset(self.label_offset.0, self.label_offset.1)
            .with_class("tick")
            .with_z_index(z_order::AXIS_LABELS);
        label.fill = self.style.label_fill.clone();

        smallvec![rule, label.mark()]
    }
}

const DOMAIN_KEY: u64 = u64::MAX;

enum AxisItem {
    Domain,
    Tick(f64),
}

/// Smallest gap between consecutive tick values, or `0` for fewer than two ticks.
fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}
