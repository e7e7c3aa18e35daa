// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color-scale legend mark generation.
//!
//! The legend is a horizontal row of equally sized color blocks, one per [`ColorMap`] entry in
//! ascending bucket order, each with its range label underneath. An optional annotation block
//! follows the row; it is drawn at the current heatmap cell size so it reads as "one cell".

use chartkit_core::{LayerId, Mark, MarkDiff, Scene, TextAnchor, TextBaseline, value_key};
use kurbo::{Point, Rect, Size};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use smallvec::smallvec;

use crate::color_map::{ColorMap, ColorMapEntry};
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// An extra legend block explaining what a single outlined cell means.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendAnnotation {
    /// Text drawn next to the block.
    pub label: String,
    /// Block fill.
    pub fill: Color,
    /// Block outline.
    pub stroke: Color,
    /// Outline width.
    pub stroke_width: f64,
}

impl LegendAnnotation {
    /// A white block with a 2px black outline.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fill: css::WHITE,
            stroke: css::BLACK,
            stroke_width: 2.0,
        }
    }
}

/// Color-scale legend layout.
#[derive(Clone, Debug)]
pub struct ColorLegendSpec {
    /// Width of one color block.
    pub block_width: f64,
    /// Height of one color block.
    pub block_height: f64,
    /// Vertical position of the labels (top of the text).
    pub label_y: f64,
    /// Space reserved to the right of the blocks for the annotation.
    pub trailing_space: f64,
    /// Total legend height.
    pub height: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Optional annotation block.
    pub annotation: Option<LegendAnnotation>,
}

impl Default for ColorLegendSpec {
    fn default() -> Self {
        Self {
            block_width: 36.0,
            block_height: 24.0,
            label_y: 28.0,
            trailing_space: 130.0,
            height: 48.0,
            font_size: 10.0,
            text_fill: css::BLACK.into(),
            annotation: None,
        }
    }
}

impl ColorLegendSpec {
    /// Sets the annotation block.
    pub fn with_annotation(mut self, annotation: Option<LegendAnnotation>) -> Self {
        self.annotation = annotation;
        self
    }

    /// Size of the legend container for `entries` color blocks.
    pub fn size(&self, entries: usize) -> Size {
        Size::new(
            entries as f64 * self.block_width + self.trailing_space,
            self.height,
        )
    }

    /// Joins blocks and labels into `blocks`, keyed by bucket, and the annotation into
    /// `annotation`.
    ///
    /// `cell` is the current heatmap cell size.
    pub fn join(
        &self,
        scene: &mut Scene,
        blocks: LayerId,
        annotation: LayerId,
        map: &ColorMap,
        cell: Size,
    ) -> Vec<MarkDiff> {
        let mut diffs = scene.join(
            blocks,
            map.entries(),
            |_, e| value_key(e.bucket),
            |i, e| self.entry_marks(map, i, e),
        );

        let annotation_marks: Vec<[Mark; 2]> = self
            .annotation
            .iter()
            .map(|a| self.annotation_marks(a, map.len(), cell))
            .collect();
        diffs.extend(scene.join(
            annotation,
            &annotation_marks,
            |_, _| 0,
            |_, marks| smallvec![marks[0].clone(), marks[1].clone()],
        ));
        diffs
    }

    fn entry_marks(&self, map: &ColorMap, i: usize, e: &ColorMapEntry) -> chartkit_core::MarkGroup {
        let x = i as f64 * self.block_width;
        let block = RectMarkSpec::new(
            "chart-colorScaleBlock",
            Rect::new(x, 0.0, x + self.block_width, self.block_height),
        )
        .with_fill(Some(Brush::Solid(e.color)))
        .with_datum(i)
        .with_z_index(z_order::LEGEND_SWATCHES)
        .mark();

        let mut label = TextMarkSpec::new(
            Point::new(x + self.block_width * 0.5, self.label_y),
            map.label(e.bucket),
        )
        .with_font_size(self.font_size)
        .with_anchor(TextAnchor::Middle)
        .with_baseline(TextBaseline::Hanging)
        .with_class("chart-colorScaleLabel")
        .with_z_index(z_order::LEGEND_LABELS);
        label.fill = self.text_fill.clone();

        smallvec![block, label.mark()]
    }

    fn annotation_marks(&self, a: &LegendAnnotation, entries: usize, cell: Size) -> [Mark; 2] {
        let row_end = entries as f64 * self.block_width;
        let x = row_end + self.block_width;
        let block = RectMarkSpec::new(
            "chart-colorScaleBlock",
            Rect::new(x, 0.0, x + cell.width, self.block_height),
        )
        .with_fill(Some(Brush::Solid(a.fill)))
        .with_stroke(Some(Brush::Solid(a.stroke)), a.stroke_width)
        .with_z_index(z_order::LEGEND_SWATCHES)
        .mark();

        let mut label = TextMarkSpec::new(
            Point::new(row_end + 20.0 + cell.width + 24.0, cell.height * 0.5),
            a.label.clone(),
        )
        .with_font_size(self.font_size)
        .with_anchor(TextAnchor::Middle)
        .with_baseline(TextBaseline::Middle)
        .with_class("chart-colorScaleLabel")
        .with_class("chart-colorScaleSpecialModifier")
        .with_z_index(z_order::LEGEND_LABELS);
        label.fill = self.text_fill.clone();

        [block, label.mark()]
    }
}

#[cfg(test)]
mod tests {
    use chartkit_core::{Layer, MarkPayload};

    use super::*;

    const BLOCKS: LayerId = LayerId(0);
    const NOTE: LayerId = LayerId(1);

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.ensure_layer(BLOCKS, Layer::new("legend"));
        scene.ensure_layer(NOTE, Layer::new("legend-annotation"));
        scene
    }

    fn texts(scene: &Scene, layer: LayerId) -> Vec<String> {
        scene
            .layer_marks(layer)
            .into_iter()
            .filter_map(|(_, m)| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn one_block_and_label_per_entry() {
        let mut scene = scene();
        let map = ColorMap::from_css([(10.0, "red"), (0.0, "blue"), (5.0, "lime")]).unwrap();
        let spec = ColorLegendSpec::default();
        spec.join(&mut scene, BLOCKS, NOTE, &map, Size::new(20.0, 20.0));

        assert_eq!(scene.marks_with_class("chart-colorScaleBlock").len(), 3);
        assert_eq!(texts(&scene, BLOCKS), vec!["0", "1 - 5", "6 - 10"]);
        assert!(scene.layer_marks(NOTE).is_empty(), "no annotation by default");
        assert_eq!(spec.size(map.len()), Size::new(3.0 * 36.0 + 130.0, 48.0));
    }

    #[test]
    fn annotation_tracks_cell_size() {
        let mut scene = scene();
        let map = ColorMap::from_css([(0.0, "blue"), (10.0, "red")]).unwrap();
        let spec = ColorLegendSpec::default().with_annotation(Some(LegendAnnotation::new("= 1h")));
        spec.join(&mut scene, BLOCKS, NOTE, &map, Size::new(20.0, 10.0));
        assert_eq!(texts(&scene, NOTE), vec!["= 1h"]);

        let diffs = spec.join(&mut scene, BLOCKS, NOTE, &map, Size::new(30.0, 10.0));
        assert_eq!(diffs.len(), 2, "the annotation block and text move");
        assert!(diffs.iter().all(MarkDiff::is_update));
        let rect = scene
            .layer_marks(NOTE)
            .into_iter()
            .find_map(|(_, m)| match &m.payload {
                MarkPayload::Rect(r) => Some(r.rect),
                _ => None,
            })
            .expect("annotation block");
        assert_eq!(rect, Rect::new(108.0, 0.0, 138.0, 24.0));
    }
}
