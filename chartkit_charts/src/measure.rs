// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement for label backgrounds.
//!
//! Text is unshaped in the scene. The heatmap's x axis label sits on a white box that masks the
//! axis behind it, and that box is sized here.

use kurbo::Rect;

/// Estimates the extent of a run of text.
pub trait TextMeasurer {
    /// Returns `(width, height)` in scene units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);

    /// Returns a box centered on the origin that covers `text`, widened by `pad_x` on each side.
    ///
    /// The half width is rounded to whole pixels so the box edges stay crisp.
    fn label_box(&self, text: &str, font_size: f64, pad_x: f64) -> Rect {
        let (w, h) = self.measure(text, font_size);
        let half = (w / 2.0).round() + pad_x;
        Rect::new(-half, -h / 2.0, half, h / 2.0)
    }
}

/// Assumes an average glyph width of 0.6em and a height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        #[allow(
            clippy::cast_precision_loss,
            reason = "label lengths are far below 2^52"
        )]
        let glyphs = text.chars().count() as f64;
        (0.6 * font_size * glyphs, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_box_is_centered_and_padded() {
        // 10 glyphs at 11px: 66 wide, 11 tall.
        let b = HeuristicTextMeasurer.label_box("Hour (UTC)", 11.0, 2.0);
        assert_eq!(b, Rect::new(-35.0, -5.5, 35.0, 5.5));
    }

    #[test]
    fn empty_label_keeps_the_padding() {
        let b = HeuristicTextMeasurer.label_box("", 11.0, 2.0);
        assert_eq!(b.width(), 4.0, "only the padding remains");
        assert_eq!(b.height(), 11.0);
    }
}
