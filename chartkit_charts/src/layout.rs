// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plot-area layout from a measured mount point.
//!
//! Components measure their mount point once, subtract fixed margins, and keep the resulting
//! plot size for the rest of their lifetime.

use chartkit_core::MountPoint;
use kurbo::{Size, Vec2};

use crate::error::{ChartError, Result};
use crate::format::format_number;

/// Fixed space around the plot area, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Space left of the plot (y axis).
    pub left: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space above the plot.
    pub top: f64,
    /// Space below the plot.
    pub bottom: f64,
}

impl Margins {
    /// Creates margins from explicit sides.
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same margin on all four sides.
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

/// The measured layout of a component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    /// Margins around the plot.
    pub margins: Margins,
    /// Plot area size.
    pub plot: Size,
}

impl PlotLayout {
    /// Derives the plot size from a mount bounding box.
    ///
    /// `reserved_bottom` is taken from the height in addition to the margins, for content placed
    /// below the chart (the heatmap legend).
    pub fn measure(bounds: Size, margins: Margins, reserved_bottom: f64) -> Result<Self> {
        let width = bounds.width - margins.left - margins.right;
        let height = bounds.height - margins.top - margins.bottom - reserved_bottom;
        if !(width > 0.0 && height > 0.0) {
            return Err(ChartError::MountTooSmall {
                width: bounds.width,
                height: bounds.height,
            });
        }
        Ok(Self {
            margins,
            plot: Size::new(width, height),
        })
    }

    /// Plot size plus margins.
    pub fn outer_size(&self) -> Size {
        Size::new(
            self.plot.width + self.margins.left + self.margins.right,
            self.plot.height + self.margins.top + self.margins.bottom,
        )
    }

    /// Offset of the plot area inside the outer box.
    pub fn plot_origin(&self) -> Vec2 {
        Vec2::new(self.margins.left, self.margins.top)
    }

    /// Tags `mount` with `class` and pins its inline size to [`PlotLayout::outer_size`].
    pub fn apply_to_mount(&self, mount: &mut MountPoint, class: &str) {
        let outer = self.outer_size();
        mount.add_class(class);
        mount.set_style("width", format!("{}px", format_number(outer.width)));
        mount.set_style("height", format!("{}px", format_number(outer.height)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_and_reserved_space_are_subtracted() {
        let layout =
            PlotLayout::measure(Size::new(480.0, 384.0), Margins::new(40.0, 40.0, 20.0, 4.0), 60.0)
                .unwrap();
        assert_eq!(layout.plot, Size::new(400.0, 300.0));
        assert_eq!(layout.outer_size(), Size::new(480.0, 324.0), "reserve is not part of the svg");
        assert_eq!(layout.plot_origin(), Vec2::new(40.0, 20.0));

        let mut mount = MountPoint::new(480.0, 384.0);
        layout.apply_to_mount(&mut mount, "chart-heatmap");
        assert!(mount.has_class("chart-heatmap"));
        assert_eq!(mount.style("width"), Some("480px"));
        assert_eq!(mount.style("height"), Some("324px"));
    }

    #[test]
    fn tiny_mounts_are_rejected() {
        assert_eq!(
            PlotLayout::measure(Size::new(60.0, 60.0), Margins::uniform(32.0), 0.0),
            Err(ChartError::MountTooSmall {
                width: 60.0,
                height: 60.0
            })
        );
        assert!(
            PlotLayout::measure(Size::new(f64::NAN, 100.0), Margins::uniform(0.0), 0.0).is_err(),
            "NaN sizes never produce a plot"
        );
    }
}
