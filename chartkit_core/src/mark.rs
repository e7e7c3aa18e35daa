// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark types and the mark builder.

use alloc::borrow::Cow;
use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;
use smallvec::SmallVec;

/// Stable identity of a mark inside a [`crate::Scene`].
///
/// Ids are allocated by the scene when a mark enters and are never reused while the mark is
/// alive, so backends can use them as element handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// The primitive kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Stroked and/or filled path.
    Path,
    /// Unshaped text.
    Text,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Anchor point is the vertical middle of the text.
    #[default]
    Middle,
    /// Anchor point is the alphabetic baseline.
    Alphabetic,
    /// Anchor point is the top of the text.
    Hanging,
    /// Anchor point is the ideographic baseline.
    Ideographic,
}

/// CSS-style class list carried by a mark.
pub type Classes = SmallVec<[Cow<'static, str>; 3]>;

/// Rectangle geometry and paint.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle in layer coordinates.
    pub rect: Rect,
    /// Fill paint, `None` renders as `fill="none"`.
    pub fill: Option<Brush>,
    /// Stroke paint, `None` renders as `stroke="none"`.
    pub stroke: Option<Brush>,
    /// Stroke width.
    pub stroke_width: f64,
}

/// Path geometry and paint.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path in layer coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Option<Brush>,
    /// Stroke paint.
    pub stroke: Option<Brush>,
    /// Stroke width.
    pub stroke_width: f64,
}

/// Unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in layer coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Horizontal offset applied after anchoring.
    pub dx: f64,
    /// Vertical offset applied after anchoring.
    pub dy: f64,
    /// Fill paint.
    pub fill: Option<Brush>,
}

/// The resolved geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectMark),
    /// Path.
    Path(PathMark),
    /// Text.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds in layer coordinates.
    ///
    /// Text has no bounds here since it is unshaped.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect.abs()),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }
}

/// A visual primitive, optionally bound to the index of the datum it was encoded from.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Class list (`class` attribute).
    pub classes: Classes,
    /// Paint order within a layer; ties break by [`MarkId`].
    pub z_index: i32,
    /// Index of the bound datum in the joined sequence.
    pub datum: Option<usize>,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark. The builder defaults to a rectangle.
    pub fn builder() -> MarkBuilder {
        MarkBuilder::default()
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns `true` if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Builder for [`Mark`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    kind: MarkKind,
    classes: Classes,
    z_index: i32,
    datum: Option<usize>,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    path: BezPath,
    text: String,
    font_size: f64,
    angle: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    dx: f64,
    dy: f64,
    fill: Option<Brush>,
    stroke: Option<Brush>,
    stroke_width: f64,
}

impl Default for MarkBuilder {
    fn default() -> Self {
        Self {
            kind: MarkKind::Rect,
            classes: Classes::new(),
            z_index: 0,
            datum: None,
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            path: BezPath::new(),
            text: String::new(),
            font_size: 10.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            dx: 0.0,
            dy: 0.0,
            fill: None,
            stroke: None,
            stroke_width: 0.0,
        }
    }
}

impl MarkBuilder {
    /// Build a rectangle.
    pub fn rect(mut self) -> Self {
        self.kind = MarkKind::Rect;
        self
    }

    /// Build a path.
    pub fn path(mut self) -> Self {
        self.kind = MarkKind::Path;
        self
    }

    /// Build a text mark.
    pub fn text(mut self) -> Self {
        self.kind = MarkKind::Text;
        self
    }

    /// Appends a class.
    pub fn class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Binds the mark to a datum index.
    pub fn datum(mut self, index: usize) -> Self {
        self.datum = Some(index);
        self
    }

    /// Sets x (rect origin or text anchor).
    pub fn x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Sets y (rect origin or text anchor).
    pub fn y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Sets rect width.
    pub fn w(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets rect height.
    pub fn h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Sets path geometry.
    pub fn path_data(mut self, path: BezPath) -> Self {
        self.path = path;
        self
    }

    /// Sets text content.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the rotation angle in degrees.
    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the text anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the text offset.
    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Sets the fill paint (`None` is `fill="none"`).
    pub fn fill(mut self, fill: Option<Brush>) -> Self {
        self.fill = fill;
        self
    }

    /// Sets a fill paint.
    pub fn fill_brush(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    /// Sets the stroke paint (`None` is `stroke="none"`).
    pub fn stroke(mut self, stroke: Option<Brush>) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the stroke width.
    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        let payload = match self.kind {
            MarkKind::Rect => MarkPayload::Rect(RectMark {
                rect: Rect::new(self.x, self.y, self.x + self.w, self.y + self.h),
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
            }),
            MarkKind::Path => MarkPayload::Path(PathMark {
                path: self.path,
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width,
            }),
            MarkKind::Text => MarkPayload::Text(TextMark {
                pos: Point::new(self.x, self.y),
                text: self.text,
                font_size: self.font_size,
                angle: self.angle,
                anchor: self.anchor,
                baseline: self.baseline,
                dx: self.dx,
                dy: self.dy,
                fill: self.fill,
            }),
        };
        Mark {
            classes: self.classes,
            z_index: self.z_index,
            datum: self.datum,
            payload,
        }
    }
}
