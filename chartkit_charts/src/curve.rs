// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotone cubic interpolation in x.
//!
//! The curve passes through every point and never overshoots between neighbors when the data
//! is monotone in y, which keeps line charts from inventing extrema. Tangents follow
//! Steffen's method ("A Simple Method for Monotonic Interpolation in One Dimension", 1990).

use kurbo::{BezPath, Point};

/// Builds a monotone-x cubic path through `points`, assumed sorted by x.
///
/// Consecutive coincident points are skipped. One point yields a lone `MoveTo`, two points a
/// straight segment, and `n > 2` points a `MoveTo` followed by `n - 1` cubic segments.
pub fn monotone_x(points: &[Point]) -> BezPath {
    let mut curve = MonotoneX::default();
    for p in points {
        curve.push(*p);
    }
    curve.finish()
}

struct MonotoneX {
    path: BezPath,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
    state: u8,
}

impl Default for MonotoneX {
    fn default() -> Self {
        Self {
            path: BezPath::new(),
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
            t0: f64::NAN,
            state: 0,
        }
    }
}

impl MonotoneX {
    fn push(&mut self, p: Point) {
        let Point { x, y } = p;
        if x == self.x1 && y == self.y1 {
            return;
        }
        let mut t1 = f64::NAN;
        match self.state {
            0 => {
                self.state = 1;
                self.path.move_to(p);
            }
            1 => self.state = 2,
            2 => {
                self.state = 3;
                t1 = self.slope3(x, y);
                self.segment(self.slope2(t1), t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.segment(self.t0, t1);
            }
        }
        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn finish(mut self) -> BezPath {
        match self.state {
            2 => self.path.line_to((self.x1, self.y1)),
            3 => self.segment(self.t0, self.slope2(self.t0)),
            _ => {}
        }
        self.path
    }

    /// Cubic from `(x0, y0)` to `(x1, y1)` with end tangents `t0` and `t1`.
    fn segment(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        self.path.curve_to(
            (self.x0 + dx, self.y0 + dx * t0),
            (self.x1 - dx, self.y1 - dx * t1),
            (self.x1, self.y1),
        );
    }

    /// Tangent at `(x1, y1)` given the following point.
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let s0 = (self.y1 - self.y0) / nonzero_or_signed_zero(h0, h1);
        let s1 = (y2 - self.y1) / nonzero_or_signed_zero(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * min3(s0.abs(), s1.abs(), 0.5 * p.abs());
        if t.is_nan() { 0.0 } else { t }
    }

    /// One-sided tangent at an end point, from the neighboring tangent `t`.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h == 0.0 || h.is_nan() {
            t
        } else {
            (3.0 * (self.y1 - self.y0) / h - t) / 2.0
        }
    }
}

/// `h` if nonzero, otherwise a zero signed so a vertical step keeps its direction.
fn nonzero_or_signed_zero(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 { -1.0 } else { 1.0 }
}

/// Minimum that propagates NaN, unlike `f64::min`.
fn min3(a: f64, b: f64, c: f64) -> f64 {
    if a.is_nan() || b.is_nan() || c.is_nan() {
        f64::NAN
    } else {
        a.min(b).min(c)
    }
}
