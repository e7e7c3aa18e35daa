// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render options for the chart components.
//!
//! Option structs are plain data with `with_*` builders. The serializable parts load from
//! camelCase JSON (`{"colorMap": {"0": "blue"}, "xDomain": [0, 24]}`); callbacks can only be
//! set from Rust.

use std::fmt;
use std::sync::Arc;

use peniko::Color;
use serde::Deserialize;

use crate::axis::TickFormatter;
use crate::color_map::ColorMap;
use crate::record::Record;

/// Picks a cell color for a record; `None` leaves the cell unfilled.
pub type ColorFn = Arc<dyn Fn(&Record) -> Option<Color> + Send + Sync>;

/// Picks a cell outline color for a record; `None` draws no outline.
pub type StrokeFn = Arc<dyn Fn(&Record) -> Option<Color> + Send + Sync>;

/// Selects the records to plot from the full dataset.
pub type FilterDataFn = Arc<dyn Fn(&[Record]) -> Vec<Record> + Send + Sync>;

/// Called with the index (in the filtered data) and record of a clicked cell.
pub type CellClickFn = Arc<dyn Fn(usize, &Record) + Send + Sync>;

/// Options for [`crate::Heatmap::render`].
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatmapOptions {
    /// Legend buckets. Required.
    pub color_map: Option<ColorMap>,
    /// Explicit x domain; derived from the data when absent.
    pub x_domain: Option<(f64, f64)>,
    /// Explicit y domain; derived from the data when absent.
    pub y_domain: Option<(f64, f64)>,
    /// Explicit x tick values.
    pub x_tick_values: Option<Vec<f64>>,
    /// Explicit y tick values.
    pub y_tick_values: Option<Vec<f64>>,
    /// X tick label formatter.
    #[serde(skip)]
    pub x_tick_label_function: Option<TickFormatter>,
    /// Y tick label formatter.
    #[serde(skip)]
    pub y_tick_label_function: Option<TickFormatter>,
    /// Dataset filter applied before anything else.
    #[serde(skip)]
    pub filter_data_function: Option<FilterDataFn>,
    /// Cell color; defaults to red with opacity proportional to the value.
    #[serde(skip)]
    pub color: Option<ColorFn>,
    /// Cell outline color; defaults to none.
    #[serde(skip)]
    pub stroke_function: Option<StrokeFn>,
    /// Y values at which horizontal guide lines span the plot.
    pub x_guide_lines: Option<Vec<f64>>,
    /// X values at which vertical guide lines span the plot.
    pub y_guide_lines: Option<Vec<f64>>,
    /// Text under the plot.
    pub x_axis_label: Option<String>,
    /// Text left of the plot, rotated.
    pub y_axis_label: Option<String>,
    /// Cell click handler.
    #[serde(skip)]
    pub on_cell_click: Option<CellClickFn>,
    /// Text for the legend's single-cell annotation block; no block when absent.
    pub legend_annotation: Option<String>,
    /// Fail on records missing a numeric field instead of degrading them.
    pub strict: bool,
}

impl fmt::Debug for HeatmapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatmapOptions")
            .field("color_map", &self.color_map)
            .field("x_domain", &self.x_domain)
            .field("y_domain", &self.y_domain)
            .field("x_tick_values", &self.x_tick_values)
            .field("y_tick_values", &self.y_tick_values)
            .field("x_tick_label_function", &self.x_tick_label_function.is_some())
            .field("y_tick_label_function", &self.y_tick_label_function.is_some())
            .field("filter_data_function", &self.filter_data_function.is_some())
            .field("color", &self.color.is_some())
            .field("stroke_function", &self.stroke_function.is_some())
            .field("x_guide_lines", &self.x_guide_lines)
            .field("y_guide_lines", &self.y_guide_lines)
            .field("x_axis_label", &self.x_axis_label)
            .field("y_axis_label", &self.y_axis_label)
            .field("on_cell_click", &self.on_cell_click.is_some())
            .field("legend_annotation", &self.legend_annotation)
            .field("strict", &self.strict)
            .finish()
    }
}

impl HeatmapOptions {
    /// Options with the given color map and everything else defaulted.
    pub fn new(color_map: ColorMap) -> Self {
        Self::default().with_color_map(color_map)
    }

    /// Set the legend color map.
    pub fn with_color_map(mut self, color_map: ColorMap) -> Self {
        self.color_map = Some(color_map);
        self
    }

    /// Set an explicit x domain.
    pub fn with_x_domain(mut self, min: f64, max: f64) -> Self {
        self.x_domain = Some((min, max));
        self
    }

    /// Set an explicit y domain.
    pub fn with_y_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = Some((min, max));
        self
    }

    /// Set explicit x tick values.
    pub fn with_x_tick_values(mut self, values: Vec<f64>) -> Self {
        self.x_tick_values = Some(values);
        self
    }

    /// Set explicit y tick values.
    pub fn with_y_tick_values(mut self, values: Vec<f64>) -> Self {
        self.y_tick_values = Some(values);
        self
    }

    /// Set the x tick label formatter.
    pub fn with_x_tick_label_function(
        mut self,
        f: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.x_tick_label_function = Some(Arc::new(f));
        self
    }

    /// Set the y tick label formatter.
    pub fn with_y_tick_label_function(
        mut self,
        f: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.y_tick_label_function = Some(Arc::new(f));
        self
    }

    /// Set the dataset filter.
    pub fn with_filter_data_function(
        mut self,
        f: impl Fn(&[Record]) -> Vec<Record> + Send + Sync + 'static,
    ) -> Self {
        self.filter_data_function = Some(Arc::new(f));
        self
    }

    /// Set the cell color function.
    pub fn with_color(
        mut self,
        f: impl Fn(&Record) -> Option<Color> + Send + Sync + 'static,
    ) -> Self {
        self.color = Some(Arc::new(f));
        self
    }

    /// Set the cell outline function.
    pub fn with_stroke_function(
        mut self,
        f: impl Fn(&Record) -> Option<Color> + Send + Sync + 'static,
    ) -> Self {
        self.stroke_function = Some(Arc::new(f));
        self
    }

    /// Set horizontal guide lines (y values).
    pub fn with_x_guide_lines(mut self, values: Vec<f64>) -> Self {
        self.x_guide_lines = Some(values);
        self
    }

    /// Set vertical guide lines (x values).
    pub fn with_y_guide_lines(mut self, values: Vec<f64>) -> Self {
        self.y_guide_lines = Some(values);
        self
    }

    /// Set the x axis label.
    pub fn with_x_axis_label(mut self, label: impl Into<String>) -> Self {
        self.x_axis_label = Some(label.into());
        self
    }

    /// Set the y axis label.
    pub fn with_y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = Some(label.into());
        self
    }

    /// Set the cell click handler.
    pub fn with_on_cell_click(mut self, f: impl Fn(usize, &Record) + Send + Sync + 'static) -> Self {
        self.on_cell_click = Some(Arc::new(f));
        self
    }

    /// Add a legend annotation block with the given text.
    pub fn with_legend_annotation(mut self, label: impl Into<String>) -> Self {
        self.legend_annotation = Some(label.into());
        self
    }

    /// Enable or disable strict field checking.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Options for [`crate::Linechart::render`].
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinechartOptions {
    /// Explicit x domain; derived from the data when absent.
    pub x_domain: Option<(f64, f64)>,
    /// Explicit y domain; derived from the data when absent.
    pub y_domain: Option<(f64, f64)>,
    /// Explicit x tick values.
    pub x_tick_values: Option<Vec<f64>>,
    /// X tick label formatter.
    #[serde(skip)]
    pub x_tick_label_function: Option<TickFormatter>,
    /// Fail on records missing a numeric field instead of skipping them.
    pub strict: bool,
}

impl fmt::Debug for LinechartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinechartOptions")
            .field("x_domain", &self.x_domain)
            .field("y_domain", &self.y_domain)
            .field("x_tick_values", &self.x_tick_values)
            .field("x_tick_label_function", &self.x_tick_label_function.is_some())
            .field("strict", &self.strict)
            .finish()
    }
}

impl LinechartOptions {
    /// Set an explicit x domain.
    pub fn with_x_domain(mut self, min: f64, max: f64) -> Self {
        self.x_domain = Some((min, max));
        self
    }

    /// Set an explicit y domain.
    pub fn with_y_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = Some((min, max));
        self
    }

    /// Set explicit x tick values.
    pub fn with_x_tick_values(mut self, values: Vec<f64>) -> Self {
        self.x_tick_values = Some(values);
        self
    }

    /// Set the x tick label formatter.
    pub fn with_x_tick_label_function(
        mut self,
        f: impl Fn(f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.x_tick_label_function = Some(Arc::new(f));
        self
    }

    /// Enable or disable strict field checking.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heatmap_options_load_from_camel_case_json() {
        let opts: HeatmapOptions = serde_json::from_str(
            r#"{
                "colorMap": {"0": "blue", "10": "red"},
                "xDomain": [0, 24],
                "yTickValues": [1, 2, 3],
                "xGuideLines": [5],
                "xAxisLabel": "Hour",
                "legendAnnotation": "= 1 unit",
                "somethingElse": true
            }"#,
        )
        .unwrap();
        assert_eq!(opts.color_map.as_ref().map(ColorMap::len), Some(2));
        assert_eq!(opts.x_domain, Some((0.0, 24.0)));
        assert_eq!(opts.y_tick_values, Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(opts.x_guide_lines, Some(vec![5.0]));
        assert_eq!(opts.x_axis_label.as_deref(), Some("Hour"));
        assert_eq!(opts.legend_annotation.as_deref(), Some("= 1 unit"));
        assert!(!opts.strict, "lenient by default");
        assert!(opts.color.is_none(), "callbacks are never deserialized");
    }

    #[test]
    fn linechart_options_default_to_derived_domains() {
        let opts: LinechartOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.x_domain, None);
        assert_eq!(opts.y_domain, None);
        let opts = opts.with_y_domain(0.0, 5.0).with_strict(true);
        assert_eq!(opts.y_domain, Some((0.0, 5.0)));
        assert!(opts.strict);
        assert!(format!("{opts:?}").contains("x_tick_label_function: false"));
    }
}
