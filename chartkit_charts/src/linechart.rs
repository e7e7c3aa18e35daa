// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The line chart component.
//!
//! A line chart owns exactly one path, bound as a single datum so every render replaces its
//! geometry in place, plus a bottom x axis and a left y axis.

use chartkit_core::{Layer, MarkDiff, MarkPayload, MountPoint, Scene};
use kurbo::{BezPath, Vec2};
use smallvec::smallvec;

use crate::axis::AxisSpec;
use crate::error::{Axis, Result};
use crate::layout::{Margins, PlotLayout};
use crate::line_mark::{LineMarkSpec, default_line_stroke};
use crate::options::LinechartOptions;
use crate::record::{Record, field_f64, require_fields};
use crate::scale::{ScaleLinear, resolve_domain_of};

/// Margins around the line chart plot.
pub const LINECHART_MARGINS: Margins = Margins::uniform(32.0);

/// Layers of [`Linechart::scene`], in paint order.
pub mod layers {
    use chartkit_core::LayerId;

    /// The line path.
    pub const LINE: LayerId = LayerId(0);
    /// Bottom x axis.
    pub const X_AXIS: LayerId = LayerId(1);
    /// Left y axis.
    pub const Y_AXIS: LayerId = LayerId(2);
}

use layers::*;

/// A line chart bound to a mount point.
#[derive(Debug)]
pub struct Linechart {
    mount: MountPoint,
    scene: Scene,
    layout: Option<PlotLayout>,
    x_scale: Option<ScaleLinear>,
    y_scale: Option<ScaleLinear>,
    options: LinechartOptions,
}

impl Linechart {
    /// Creates a line chart that will draw into `mount`.
    pub fn new(mount: MountPoint) -> Self {
        Self {
            mount,
            scene: Scene::new(),
            layout: None,
            x_scale: None,
            y_scale: None,
            options: LinechartOptions::default(),
        }
    }

    /// Renders `data` as a monotone line through `(x_field, y_field)` ordered by x.
    ///
    /// Returns the changes to [`Linechart::scene`]. On error nothing is changed.
    pub fn render(
        &mut self,
        data: &[Record],
        x_field: &str,
        y_field: &str,
        options: LinechartOptions,
    ) -> Result<Vec<MarkDiff>> {
        let layout = match self.layout {
            Some(layout) => layout,
            None => PlotLayout::measure(self.mount.bounding_box(), LINECHART_MARGINS, 0.0)?,
        };
        if options.strict {
            require_fields(data, &[x_field, y_field])?;
        }
        let points: Vec<(f64, f64)> = data
            .iter()
            .filter_map(|r| Some((field_f64(r, x_field)?, field_f64(r, y_field)?)))
            .collect();
        if points.len() < data.len() {
            log::warn!(
                "linechart: skipping {} of {} records without a numeric {x_field}/{y_field}",
                data.len() - points.len(),
                data.len()
            );
        }
        // Axes cover the drawn points only, not records skipped above.
        let x_domain =
            resolve_domain_of(Axis::X, options.x_domain, points.iter().map(|p| p.0), x_field)?;
        let y_domain =
            resolve_domain_of(Axis::Y, options.y_domain, points.iter().map(|p| p.1), y_field)?;
        let x_scale = ScaleLinear::new(x_domain, (0.0, layout.plot.width));
        let y_scale = ScaleLinear::new(y_domain, (layout.plot.height, 0.0));

        if self.layout.is_none() {
            layout.apply_to_mount(&mut self.mount, "chart-linechart");
            self.layout = Some(layout);
        }
        self.x_scale = Some(x_scale);
        self.y_scale = Some(y_scale);
        self.options = options;

        let diffs = self.draw(&layout, &points, &x_scale, &y_scale);
        log::debug!(
            "linechart render: {} points, x {x_domain:?}, y {y_domain:?}, {} diffs",
            points.len(),
            diffs.len()
        );
        Ok(diffs)
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

    /// The chart scene (line and axes).
    pub fn scene(&self) -> &Scene {
        &self.scene
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

    /// Geometry of the line, once rendered.
    pub fn path(&self) -> Option<&BezPath> {
        self.scene
            .layer_marks(LINE)
            .into_iter()
            .find_map(|(_, m)| match &m.payload {
                MarkPayload::Path(p) => Some(&p.path),
                _ => None,
            })
    }

    fn draw(
        &mut self,
        layout: &PlotLayout,
        points: &[(f64, f64)],
        xs: &ScaleLinear,
        ys: &ScaleLinear,
    ) -> Vec<MarkDiff> {
        let origin = layout.plot_origin();
        self.scene
            .ensure_layer(LINE, Layer::new("chart-linechartPlot").with_offset(origin));
        self.scene.ensure_layer(
            X_AXIS,
            Layer::new("xAxis chart-axis")
                .with_offset(origin + Vec2::new(0.0, layout.plot.height)),
        );
        self.scene
            .ensure_layer(Y_AXIS, Layer::new("yAxis chart-axis").with_offset(origin));

        let line = LineMarkSpec::new(*xs, *ys).with_stroke(default_line_stroke());
        let mut diffs = self
            .scene
            .join_one(LINE, || smallvec![line.mark(points)]);

        let x_axis = AxisSpec::bottom()
            .with_tick_values(self.options.x_tick_values.clone())
            .with_tick_formatter(self.options.x_tick_label_function.clone());
        diffs.extend(x_axis.join(&mut self.scene, X_AXIS, xs));
        diffs.extend(AxisSpec::left().join(&mut self.scene, Y_AXIS, ys));
        diffs
    }
}
