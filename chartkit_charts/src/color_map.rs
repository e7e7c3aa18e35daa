// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete color maps for heatmap legends.

use std::collections::BTreeMap;

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::format::format_number;

/// One color map entry: values up to `bucket` use `color`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMapEntry {
    /// Upper bound of the bucket.
    pub bucket: f64,
    /// Bucket color.
    pub color: Color,
}

/// An ordered mapping from upper-bound buckets to colors.
///
/// Entries are kept in ascending bucket order. In JSON a color map is an object of bucket to
/// CSS color, e.g. `{"0": "blue", "10": "#ff0000"}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct ColorMap {
    entries: Vec<ColorMapEntry>,
    label_span: f64,
}

impl ColorMap {
    /// Default width of the range shown in legend labels.
    pub const DEFAULT_LABEL_SPAN: f64 = 4.0;

    /// Creates a color map from `(bucket, color)` pairs in any order.
    ///
    /// Duplicate buckets keep the first color given.
    pub fn new(entries: impl IntoIterator<Item = (f64, Color)>) -> Result<Self> {
        let mut out = Vec::new();
        for (bucket, color) in entries {
            if !bucket.is_finite() {
                return Err(ChartError::InvalidBucket(bucket.to_string()));
            }
            out.push(ColorMapEntry { bucket, color });
        }
        out.sort_by(|a, b| a.bucket.total_cmp(&b.bucket));
        out.dedup_by(|b, a| a.bucket == b.bucket);
        Ok(Self {
            entries: out,
            label_span: Self::DEFAULT_LABEL_SPAN,
        })
    }

    /// Creates a color map from `(bucket, css color)` pairs.
    pub fn from_css<'a>(entries: impl IntoIterator<Item = (f64, &'a str)>) -> Result<Self> {
        let parsed = entries
            .into_iter()
            .map(|(bucket, css)| parse_css_color(css).map(|c| (bucket, c)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(parsed)
    }

    /// Sets how far below each bucket its legend label starts.
    pub fn with_label_span(mut self, label_span: f64) -> Self {
        self.label_span = label_span;
        self
    }

    /// Entries in ascending bucket order.
    pub fn entries(&self) -> &[ColorMapEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Legend label for `bucket`: `"0"` for the zero bucket, otherwise `"{bucket - span} - {bucket}"`.
    pub fn label(&self, bucket: f64) -> String {
        if bucket == 0.0 {
            "0".to_string()
        } else {
            format!(
                "{} - {}",
                format_number(bucket - self.label_span),
                format_number(bucket)
            )
        }
    }

    /// Color of the first bucket whose upper bound is at least `value`.
    ///
    /// Values above the last bucket use the last color; `None` only for an empty map or NaN.
    pub fn color_for(&self, value: f64) -> Option<Color> {
        if value.is_nan() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| value <= e.bucket)
            .or_else(|| self.entries.last())
            .map(|e| e.color)
    }
}

impl TryFrom<BTreeMap<String, String>> for ColorMap {
    type Error = ChartError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self> {
        let mut entries = Vec::with_capacity(raw.len());
        for (key, css) in &raw {
            let bucket: f64 = key
                .trim()
                .parse()
                .map_err(|_| ChartError::InvalidBucket(key.clone()))?;
            entries.push((bucket, parse_css_color(css)?));
        }
        Self::new(entries)
    }
}

/// Parses a CSS color string (named, hex, `rgb()`, `hsl()`, ...).
pub fn parse_css_color(css: &str) -> Result<Color> {
    parse_color(css)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ChartError::InvalidColor(css.to_string()))
}
