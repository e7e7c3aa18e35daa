// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render errors.

use core::fmt;

use thiserror::Error;

/// A chart axis, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Errors returned by chart rendering and option parsing.
///
/// A render that fails leaves the retained scene as it was.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ChartError {
    /// The heatmap was rendered without a color map.
    #[error("heatmap rendering requires a color map")]
    MissingColorMap,
    /// A color map key is not a number.
    #[error("color map bucket `{0}` is not a number")]
    InvalidBucket(String),
    /// A color string could not be parsed.
    #[error("`{0}` is not a valid CSS color")]
    InvalidColor(String),
    /// No domain override and no numeric values to derive one from.
    #[error("cannot derive the {axis} domain: no numeric `{field}` values")]
    EmptyDomain {
        /// Affected axis.
        axis: Axis,
        /// Field the domain was derived from.
        field: String,
    },
    /// A domain bound is not finite.
    #[error("invalid {axis} domain [{min}, {max}]")]
    InvalidDomain {
        /// Affected axis.
        axis: Axis,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// An interval size is not a positive finite number.
    #[error("{axis} interval size must be positive and finite, got {size}")]
    InvalidInterval {
        /// Affected axis.
        axis: Axis,
        /// Rejected size.
        size: f64,
    },
    /// A record has no numeric value for a field (strict mode only).
    #[error("record {row} has no numeric value for field `{field}`")]
    MissingField {
        /// Index of the record in the filtered data.
        row: usize,
        /// Field name.
        field: String,
    },
    /// The mount point is too small to hold the margins.
    #[error("mount point of {width}x{height} leaves no plotting area")]
    MountTooSmall {
        /// Measured width.
        width: f64,
        /// Measured height.
        height: f64,
    },
}

/// Result alias for chart operations.
pub type Result<T, E = ChartError> = core::result::Result<T, E>;
