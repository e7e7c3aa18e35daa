// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG backend for `chartkit`.
//!
//! [`SvgScene`] is a retained element map: it consumes the [`MarkDiff`] stream of a
//! `chartkit_core::Scene` (enter inserts, update replaces, exit removes) and serializes the
//! current elements as SVG, one `<g>` per layer. [`mount_html`] wraps rendered SVG in the
//! mount point's element with the classes and inline styles a component applied.

use std::fmt::Write as _;

use chartkit_core::{
    Layer, LayerId, Mark, MarkDiff, MarkId, MarkPayload, MountPoint, TextAnchor, TextBaseline,
};
use hashbrown::HashMap;
use peniko::Brush;

/// Retained SVG elements built from mark diffs.
#[derive(Debug, Default)]
pub struct SvgScene {
    layers: Vec<(LayerId, Layer)>,
    marks: HashMap<MarkId, (LayerId, Mark)>,
}

impl SvgScene {
    /// Creates an empty SVG scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layer groups with `layers` (as returned by `Scene::layers`).
    pub fn sync_layers<'a>(&mut self, layers: impl IntoIterator<Item = (LayerId, &'a Layer)>) {
        self.layers = layers.into_iter().map(|(id, l)| (id, l.clone())).collect();
        self.layers.sort_by_key(|(id, _)| *id);
    }

    /// Applies a diff stream.
    pub fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter { id, layer, new, .. } | MarkDiff::Update { id, layer, new, .. } => {
                    self.marks.insert(*id, (*layer, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    /// Number of retained elements.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no elements are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Serializes the scene as an `<svg>` element of the given size and class.
    pub fn to_svg_string(&self, width: f64, height: f64, class: &str) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}""#
        );
        write_class_attr(&mut out, class);
        out.push_str(">\n");

        for (layer_id, layer) in &self.layers {
            let mut ids: Vec<(i32, MarkId)> = self
                .marks
                .iter()
                .filter(|(_, (l, _))| l == layer_id)
                .map(|(id, (_, m))| (m.z_index, *id))
                .collect();
            ids.sort_unstable();

            out.push_str("<g");
            write_class_attr(&mut out, &layer.class);
            if layer.offset.x != 0.0 || layer.offset.y != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="translate({},{})""#,
                    layer.offset.x, layer.offset.y
                );
            }
            out.push_str(">\n");
            for (_, id) in ids {
                if let Some((_, mark)) = self.marks.get(&id) {
                    write_mark(&mut out, mark);
                }
            }
            out.push_str("</g>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

/// Wraps rendered children in a `<div>` carrying the mount point's classes and inline styles.
pub fn mount_html(mount: &MountPoint, children: &[String]) -> String {
    let mut out = String::from("<div");
    write_class_attr(&mut out, &mount.classes().join(" "));
    if !mount.styles().is_empty() {
        let style: Vec<String> = mount
            .styles()
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        let _ = write!(out, r#" style="{}""#, escape_xml(&style.join("; ")));
    }
    out.push_str(">\n");
    for child in children {
        out.push_str(child);
    }
    out.push_str("</div>\n");
    out
}

fn write_mark(out: &mut String, mark: &Mark) {
    let class = mark.classes.join(" ");
    match &mark.payload {
        MarkPayload::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            );
            write_class_attr(out, &class);
            write_paint_attr(out, "fill", r.fill.as_ref());
            write_stroke(out, r.stroke.as_ref(), r.stroke_width);
            out.push_str("/>\n");
        }
        MarkPayload::Path(p) => {
            let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
            write_class_attr(out, &class);
            write_paint_attr(out, "fill", p.fill.as_ref());
            write_stroke(out, p.stroke.as_ref(), p.stroke_width);
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" alignment-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            );
            if t.dx != 0.0 {
                let _ = write!(out, r#" dx="{}""#, t.dx);
            }
            if t.dy != 0.0 {
                let _ = write!(out, r#" dy="{}""#, t.dy);
            }
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_class_attr(out, &class);
            write_paint_attr(out, "fill", t.fill.as_ref());
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
    }
}

fn write_class_attr(out: &mut String, class: &str) {
    if !class.is_empty() {
        let _ = write!(out, r#" class="{}""#, escape_xml(class));
    }
}

fn write_stroke(out: &mut String, stroke: Option<&Brush>, width: f64) {
    write_paint_attr(out, "stroke", stroke);
    if stroke.is_some() && width > 0.0 {
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: Option<&Brush>) {
    let Some(brush) = brush else {
        let _ = write!(out, r#" {name}="none""#);
        return;
    };
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
