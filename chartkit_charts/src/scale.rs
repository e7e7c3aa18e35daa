// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scales and domain resolution.

use crate::error::{Axis, ChartError, Result};
use crate::record::{Record, extent, field_f64};

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return (r0 + r1) * 0.5;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the pixel length covered by `len` domain units.
    pub fn span(&self, len: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.0;
        }
        (len / denom * (r1 - r0)).abs()
    }

    /// Returns the domain as authored.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the step between the ticks returned by [`ScaleLinear::ticks`].
    pub fn tick_step(&self, count: usize) -> f64 {
        let (min, max) = ordered(self.domain);
        nice_step((max - min) / count.max(1) as f64)
    }
}

/// Resolves an axis domain: the override verbatim if present, else the field extent.
pub fn resolve_domain(
    axis: Axis,
    domain_override: Option<(f64, f64)>,
    records: &[Record],
    field: &str,
) -> Result<(f64, f64)> {
    let values = records.iter().filter_map(|r| field_f64(r, field));
    resolve_domain_of(axis, domain_override, values, field)
}

/// Like [`resolve_domain`], deriving the extent from already extracted `values`.
///
/// `field` only names the source in errors.
pub fn resolve_domain_of(
    axis: Axis,
    domain_override: Option<(f64, f64)>,
    values: impl IntoIterator<Item = f64>,
    field: &str,
) -> Result<(f64, f64)> {
    let (min, max) = match domain_override {
        Some(d) => d,
        None => extent(values.into_iter().map(Some)).ok_or_else(|| ChartError::EmptyDomain {
            axis,
            field: field.to_string(),
        })?,
    };
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidDomain { axis, min, max });
    }
    Ok((min, max))
}

/// Resolves the domain of a grid axis whose marks span one `interval` from their value.
///
/// A derived single-valued extent is widened to exactly one interval, laid out the way cells
/// extend: rightward from the value on x, downward from it on y. Overrides stay verbatim.
pub fn resolve_interval_domain(
    axis: Axis,
    domain_override: Option<(f64, f64)>,
    records: &[Record],
    field: &str,
    interval: f64,
) -> Result<(f64, f64)> {
    let (min, max) = resolve_domain(axis, domain_override, records, field)?;
    if domain_override.is_some() || min != max {
        return Ok((min, max));
    }
    log::debug!("{axis} domain collapses to {min}; widening by one interval");
    Ok(match axis {
        Axis::X => (min, min + interval),
        Axis::Y => (min - interval, min),
    })
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let reversed = min > max;
    let (min, max) = ordered((min, max));
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    // Sub-unit steps divide by the inverse so ticks land on exact decimals.
    let (scale, inverse) = if step < 1.0 {
        ((1.0 / step).round(), true)
    } else {
        (step, false)
    };
    let (start, stop) = if inverse {
        ((min * scale).ceil(), (max * scale).floor())
    } else {
        ((min / scale).ceil(), (max / scale).floor())
    };
    let n = stop - start;
    if !n.is_finite() || n < 0.0 || n > 10_000.0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by finite/non-negative checks and capped at 10k"
    )]
    let n = n as u32;
    let mut out: Vec<f64> = (0..=n)
        .map(|i| {
            let k = start + f64::from(i);
            if inverse { k / scale } else { k * scale }
        })
        .collect();
    if reversed {
        out.reverse();
    }
    out
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}
