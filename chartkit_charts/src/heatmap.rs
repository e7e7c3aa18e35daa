// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The heatmap component.
//!
//! A heatmap draws one rectangle per record on a numeric 2-D grid, with a top x axis, a left y
//! axis, optional guide lines and axis labels, and a color-scale legend in its own scene. Each
//! [`Heatmap::render`] recomputes scales from the new data and joins it against the retained
//! marks, so unchanged cells produce no diffs and stale cells are removed.

use std::fmt;

use chartkit_core::{
    Layer, MarkDiff, MountPoint, Scene, TextAnchor, TextBaseline, index_key, value_key,
};
use kurbo::{Point, Rect, Size, Vec2};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use smallvec::smallvec;

use crate::axis::AxisSpec;
use crate::error::{Axis, ChartError, Result};
use crate::layout::{Margins, PlotLayout};
use crate::legend::{ColorLegendSpec, LegendAnnotation};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::options::HeatmapOptions;
use crate::record::{Record, count_degraded, field_extent, field_f64, require_fields};
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleLinear, resolve_interval_domain};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Margins around the heatmap plot.
pub const HEATMAP_MARGINS: Margins = Margins::new(40.0, 40.0, 20.0, 4.0);

/// Height taken from the mount point for the legend below the chart.
pub const HEATMAP_LEGEND_BAND: f64 = 60.0;

/// Maximum opacity of the default cell color.
pub const MAX_HEAT_ALPHA: f64 = 0.75;

/// Layers of [`Heatmap::scene`], in paint order.
pub mod layers {
    use chartkit_core::LayerId;

    /// Horizontal guide lines.
    pub const X_GUIDE_LINES: LayerId = LayerId(0);
    /// Vertical guide lines.
    pub const Y_GUIDE_LINES: LayerId = LayerId(1);
    /// Cells.
    pub const CELLS: LayerId = LayerId(2);
    /// Top x axis.
    pub const X_AXIS: LayerId = LayerId(3);
    /// X axis label and its background box.
    pub const X_AXIS_LABEL: LayerId = LayerId(4);
    /// Rotated y axis label.
    pub const Y_AXIS_LABEL: LayerId = LayerId(5);
    /// Left y axis.
    pub const Y_AXIS: LayerId = LayerId(6);

    /// Legend color blocks and labels (in [`super::Heatmap::legend_scene`]).
    pub const LEGEND_BLOCKS: LayerId = LayerId(0);
    /// Legend annotation block (in [`super::Heatmap::legend_scene`]).
    pub const LEGEND_ANNOTATION: LayerId = LayerId(1);
}

use layers::*;

/// Diffs produced by one heatmap render.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeatmapDiffs {
    /// Diffs against [`Heatmap::scene`].
    pub chart: Vec<MarkDiff>,
    /// Diffs against [`Heatmap::legend_scene`].
    pub legend: Vec<MarkDiff>,
}

impl HeatmapDiffs {
    /// Total number of diffs.
    pub fn len(&self) -> usize {
        self.chart.len() + self.legend.len()
    }

    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.chart.is_empty() && self.legend.is_empty()
    }
}

/// The default cell color: red with opacity `0.75 * (value - min) / (max - min)`.
///
/// Missing values get no fill. A degenerate extent (`min == max`) yields opacity 0.
pub fn heat_color(value: Option<f64>, extent: Option<(f64, f64)>) -> Option<Color> {
    let value = value?;
    let t = match extent {
        Some((min, max)) if max != min => (value - min) / (max - min),
        _ => 0.0,
    };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "alpha is clamped to [0, 1] and only needs f32 precision"
    )]
    let alpha = (MAX_HEAT_ALPHA * t).clamp(0.0, 1.0) as f32;
    Some(Color::new([1.0, 0.0, 0.0, alpha]))
}

/// A heatmap bound to a mount point.
pub struct Heatmap {
    mount: MountPoint,
    scene: Scene,
    legend_scene: Scene,
    layout: Option<PlotLayout>,
    measurer: Box<dyn TextMeasurer>,
    x_scale: Option<ScaleLinear>,
    y_scale: Option<ScaleLinear>,
    cell_size: Size,
    records: Vec<Record>,
    options: HeatmapOptions,
    legend: ColorLegendSpec,
}

impl fmt::Debug for Heatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heatmap")
            .field("mount", &self.mount)
            .field("layout", &self.layout)
            .field("x_scale", &self.x_scale)
            .field("y_scale", &self.y_scale)
            .field("cell_size", &self.cell_size)
            .field("records", &self.records.len())
            .field("marks", &self.scene.len())
            .finish_non_exhaustive()
    }
}

/// Inputs of one render after validation.
struct Prepared {
    layout: PlotLayout,
    records: Vec<Record>,
    x_scale: ScaleLinear,
    y_scale: ScaleLinear,
    value_extent: Option<(f64, f64)>,
    cell_size: Size,
}

impl Heatmap {
    /// Creates a heatmap that will draw into `mount`.
    ///
    /// Nothing is measured until the first render.
    pub fn new(mount: MountPoint) -> Self {
        Self {
            mount,
            scene: Scene::new(),
            legend_scene: Scene::new(),
            layout: None,
            measurer: Box::new(HeuristicTextMeasurer),
            x_scale: None,
            y_scale: None,
            cell_size: Size::ZERO,
            records: Vec::new(),
            options: HeatmapOptions::default(),
            legend: ColorLegendSpec::default(),
        }
    }

    /// Replaces the text measurer used to size the x axis label box.
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    /// Renders `data` and returns the changes to the chart and legend scenes.
    ///
    /// Cells are placed at `(x_field, y_field)` and sized to one `x_interval` by one
    /// `y_interval`. `value_field` drives the default color. Calling this again with new data
    /// updates the retained scenes in place. On error nothing is changed.
    pub fn render(
        &mut self,
        data: &[Record],
        x_field: &str,
        y_field: &str,
        value_field: &str,
        x_interval: f64,
        y_interval: f64,
        options: HeatmapOptions,
    ) -> Result<HeatmapDiffs> {
        let prepared = self.prepare(
            data,
            [x_field, y_field, value_field],
            (x_interval, y_interval),
            &options,
        )?;

        if self.layout.is_none() {
            prepared.layout.apply_to_mount(&mut self.mount, "chart-heatmap");
            self.layout = Some(prepared.layout);
        }
        self.x_scale = Some(prepared.x_scale);
        self.y_scale = Some(prepared.y_scale);
        self.cell_size = prepared.cell_size;
        self.records = prepared.records;
        self.options = options;
        self.legend = ColorLegendSpec::default()
            .with_annotation(self.options.legend_annotation.clone().map(LegendAnnotation::new));

        let chart = self.draw(
            &prepared.layout,
            [x_field, y_field, value_field],
            prepared.value_extent,
        );
        let legend = self.draw_legend();

        log::debug!(
            "heatmap render: {} records, x {:?}, y {:?}, cell {}x{}, {} chart diffs ({} enter, {} exit), {} legend diffs",
            self.records.len(),
            prepared.x_scale.domain(),
            prepared.y_scale.domain(),
            self.cell_size.width,
            self.cell_size.height,
            chart.len(),
            chart.iter().filter(|d| d.is_enter()).count(),
            chart.iter().filter(|d| d.is_exit()).count(),
            legend.len()
        );
        Ok(HeatmapDiffs { chart, legend })
    }

    /// Hit-tests the cells at `point` (mount coordinates).
    ///
    /// Returns the index of the hit record in the filtered data and invokes the `on_cell_click`
    /// option with it.
    pub fn click(&self, point: Point) -> Option<usize> {
        let index = self.scene.hit_test(CELLS, point)?;
        let record = self.records.get(index)?;
        if let Some(on_click) = &self.options.on_cell_click {
            on_click(index, record);
        }
        Some(index)
    }

    /// The mount point, with the classes and styles applied by rendering.
    pub fn mount(&self) -> &MountPoint {
        &self.mount
    }

    /// Mutable access to the mount point.
    ///
    /// Changing its bounding box after the first render has no effect on the layout.
    pub fn mount_mut(&mut self) -> &mut MountPoint {
        &mut self.mount
    }

    /// The chart scene (cells, axes, guides, labels).
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The legend scene.
    pub fn legend_scene(&self) -> &Scene {
        &self.legend_scene
    }

    /// The layout measured on the first successful render.
    pub fn layout(&self) -> Option<&PlotLayout> {
        self.layout.as_ref()
    }

    /// The x scale of the last render.
    pub fn x_scale(&self) -> Option<&ScaleLinear> {
        self.x_scale.as_ref()
    }

    /// The y scale of the last render.
    pub fn y_scale(&self) -> Option<&ScaleLinear> {
        self.y_scale.as_ref()
    }

    /// Width and height shared by every cell.
    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// Size of the legend container.
    pub fn legend_size(&self) -> Size {
        let entries = self.options.color_map.as_ref().map_or(0, |m| m.len());
        self.legend.size(entries)
    }

    /// The filtered records of the last render, in cell order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn prepare(
        &self,
        data: &[Record],
        [x_field, y_field, value_field]: [&str; 3],
        (x_interval, y_interval): (f64, f64),
        options: &HeatmapOptions,
    ) -> Result<Prepared> {
        if options.color_map.is_none() {
            return Err(ChartError::MissingColorMap);
        }
        for (axis, size) in [(Axis::X, x_interval), (Axis::Y, y_interval)] {
            if !(size.is_finite() && size > 0.0) {
                return Err(ChartError::InvalidInterval { axis, size });
            }
        }
        let layout = match self.layout {
            Some(layout) => layout,
            None => PlotLayout::measure(
                self.mount.bounding_box(),
                HEATMAP_MARGINS,
                HEATMAP_LEGEND_BAND,
            )?,
        };

        let records = match &options.filter_data_function {
            Some(filter) => filter(data),
            None => data.to_vec(),
        };
        let fields = [x_field, y_field, value_field];
        if options.strict {
            require_fields(&records, &fields)?;
        } else {
            let degraded = count_degraded(&records, &fields);
            if degraded > 0 {
                log::warn!(
                    "heatmap: {degraded} of {} records lack a numeric {x_field}/{y_field}/{value_field}",
                    records.len()
                );
            }
        }

        let x_domain =
            resolve_interval_domain(Axis::X, options.x_domain, &records, x_field, x_interval)?;
        let y_domain =
            resolve_interval_domain(Axis::Y, options.y_domain, &records, y_field, y_interval)?;
        let x_scale = ScaleLinear::new(x_domain, (0.0, layout.plot.width));
        let y_scale = ScaleLinear::new(y_domain, (layout.plot.height, 0.0));
        let cell_size = Size::new(
            x_scale.span(x_interval).floor(),
            y_scale.span(y_interval).floor(),
        );
        let value_extent = field_extent(&records, value_field);

        Ok(Prepared {
            layout,
            records,
            x_scale,
            y_scale,
            value_extent,
            cell_size,
        })
    }

    fn ensure_layers(&mut self, layout: &PlotLayout) {
        let origin = layout.plot_origin();
        let plot = layout.plot;
        let s = &mut self.scene;
        s.ensure_layer(X_GUIDE_LINES, Layer::new("xGuideLines").with_offset(origin));
        s.ensure_layer(Y_GUIDE_LINES, Layer::new("yGuideLines").with_offset(origin));
        s.ensure_layer(CELLS, Layer::new("chart-cells").with_offset(origin));
        s.ensure_layer(
            X_AXIS,
            Layer::new("xAxis chart-axis chart-heatmapXAxis").with_offset(origin),
        );
        s.ensure_layer(
            X_AXIS_LABEL,
            Layer::new("chart-xAxisLabel chart-axisLabel")
                .with_offset(origin + Vec2::new(plot.width / 2.0, plot.height + 40.0)),
        );
        s.ensure_layer(Y_AXIS_LABEL, Layer::new("chart-yAxisLabels").with_offset(origin));
        s.ensure_layer(
            Y_AXIS,
            Layer::new("yAxis chart-axis chart-heatmapYAxis").with_offset(origin),
        );

        let l = &mut self.legend_scene;
        l.ensure_layer(LEGEND_BLOCKS, Layer::new("chart-colorScale").with_offset((2.0, 2.0)));
        l.ensure_layer(
            LEGEND_ANNOTATION,
            Layer::new("chart-colorScaleAnnotation").with_offset((2.0, 2.0)),
        );
    }

    fn draw(
        &mut self,
        layout: &PlotLayout,
        [x_field, y_field, value_field]: [&str; 3],
        value_extent: Option<(f64, f64)>,
    ) -> Vec<MarkDiff> {
        self.ensure_layers(layout);
        let (Some(xs), Some(ys)) = (self.x_scale, self.y_scale) else {
            return Vec::new();
        };
        let plot = layout.plot;
        let cell = self.cell_size;
        let mut diffs = Vec::new();

        let x_guides = self.options.x_guide_lines.clone().unwrap_or_default();
        diffs.extend(self.scene.join(
            X_GUIDE_LINES,
            &x_guides,
            |_, v| value_key(*v),
            |_, v| {
                let y = ys.map(*v);
                smallvec![
                    RuleMarkSpec::horizontal(y, 0.0, plot.width)
                        .with_class("xGuideLine")
                        .with_class("guideLine")
                        .with_z_index(z_order::GUIDE_LINES)
                        .mark()
                ]
            },
        ));
        let y_guides = self.options.y_guide_lines.clone().unwrap_or_default();
        diffs.extend(self.scene.join(
            Y_GUIDE_LINES,
            &y_guides,
            |_, v| value_key(*v),
            |_, v| {
                let x = xs.map(*v);
                smallvec![
                    RuleMarkSpec::vertical(x, plot.height, 0.0)
                        .with_class("yGuideLine")
                        .with_class("guideLine")
                        .with_z_index(z_order::GUIDE_LINES)
                        .mark()
                ]
            },
        ));

        let color = self.options.color.clone();
        let stroke = self.options.stroke_function.clone();
        diffs.extend(self.scene.join(
            CELLS,
            &self.records,
            |i, _| index_key(i),
            |i, r| {
                let x = xs.map(field_f64(r, x_field).unwrap_or(f64::NAN));
                let y = ys.map(field_f64(r, y_field).unwrap_or(f64::NAN));
                let fill = match &color {
                    Some(f) => f(r),
                    None => heat_color(field_f64(r, value_field), value_extent),
                };
                let outline = stroke.as_ref().and_then(|f| f(r));
                let rect = Rect::new(x, y, x + cell.width, y + cell.height);
                smallvec![
                    RectMarkSpec::new("chart-cell", rect)
                        .with_fill(fill.map(Brush::Solid))
                        .with_stroke(outline.map(Brush::Solid), 2.0)
                        .with_datum(i)
                        .mark()
                ]
            },
        ));

        let x_axis = AxisSpec::top()
            .with_tick_values(self.options.x_tick_values.clone())
            .with_tick_formatter(self.options.x_tick_label_function.clone())
            .with_label_anchor(TextAnchor::Start)
            .with_label_offset(2.0, 0.0);
        diffs.extend(x_axis.join(&mut self.scene, X_AXIS, &xs));

        diffs.extend(self.draw_axis_labels(plot));

        let y_axis = AxisSpec::left()
            .with_tick_values(self.options.y_tick_values.clone())
            .with_tick_formatter(self.options.y_tick_label_function.clone())
            .with_label_offset(0.0, cell.height / 2.0);
        diffs.extend(y_axis.join(&mut self.scene, Y_AXIS, &ys));

        diffs
    }

    /// Axis labels are rebuilt from scratch on every draw.
    fn draw_axis_labels(&mut self, plot: Size) -> Vec<MarkDiff> {
        let mut diffs = self.scene.clear_layer(X_AXIS_LABEL);
        diffs.extend(self.scene.clear_layer(Y_AXIS_LABEL));

        let x_label = self.options.x_axis_label.clone().unwrap_or_default();
        let font_size = 11.0;
        let label_box = self.measurer.label_box(&x_label, font_size, 2.0);
        diffs.extend(self.scene.join_one(X_AXIS_LABEL, || {
            smallvec![
                RectMarkSpec::new("chart-axisLabelBox", label_box)
                    .with_fill(Some(css::WHITE.into()))
                    .with_z_index(z_order::AXIS_TITLE_BOXES)
                    .mark(),
                TextMarkSpec::new(Point::ZERO, x_label)
                    .with_font_size(font_size)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .with_class("chart-axisLabelText")
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            ]
        }));

        let y_label = self.options.y_axis_label.clone().unwrap_or_default();
        diffs.extend(self.scene.join_one(Y_AXIS_LABEL, || {
            smallvec![
                TextMarkSpec::new(Point::new(-40.0, plot.height / 2.0), y_label)
                    .with_font_size(font_size)
                    .with_angle(-90.0)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .with_class("chart-yAxisLabel")
                    .with_class("chart-axisLabel")
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            ]
        }));
        diffs
    }

    fn draw_legend(&mut self) -> Vec<MarkDiff> {
        let Some(map) = &self.options.color_map else {
            return Vec::new();
        };
        self.legend.join(
            &mut self.legend_scene,
            LEGEND_BLOCKS,
            LEGEND_ANNOTATION,
            map,
            self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_color_scales_alpha_over_the_extent() {
        let extent = Some((0.0, 10.0));
        let alpha = |v: f64| heat_color(Some(v), extent).map(|c| c.components[3]);
        assert_eq!(alpha(0.0), Some(0.0), "minimum is transparent");
        assert_eq!(alpha(10.0), Some(0.75), "maximum is three quarters opaque");
        assert!(alpha(2.0) < alpha(8.0), "alpha grows with the value");
        assert_eq!(heat_color(None, extent), None, "missing values are unfilled");
        assert_eq!(
            heat_color(Some(3.0), Some((3.0, 3.0))).map(|c| c.components[3]),
            Some(0.0),
            "a single value has nothing to compare against"
        );
    }
}
