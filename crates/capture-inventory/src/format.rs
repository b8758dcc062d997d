// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Unified frame format model.
//!
//! Platforms report frame-size capabilities in three shapes: one exact
//! resolution, a min/max range reachable in driver-defined steps, or a
//! min/max range with no step expressed at all ("continuous"). This module
//! collapses all three into the [`Format`] variant pair: continuous ranges
//! are normalized to stepwise with a unit step, decided here and nowhere
//! else.

use std::fmt;

/// A frame format a capture device can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// One exact resolution.
    Discrete {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// A rectangular range of resolutions. Every width of the form
    /// `min_width + n * step_width` up to `max_width` is supported, and
    /// likewise for heights.
    Stepwise {
        /// Minimum width in pixels.
        min_width: u32,
        /// Maximum width in pixels.
        max_width: u32,
        /// Width step in pixels.
        step_width: u32,
        /// Minimum height in pixels.
        min_height: u32,
        /// Maximum height in pixels.
        max_height: u32,
        /// Height step in pixels.
        step_height: u32,
    },
}

impl Format {
    /// One exact resolution.
    pub fn discrete(width: u32, height: u32) -> Self {
        Format::Discrete { width, height }
    }

    /// One exact resolution reported with signed dimensions. Some
    /// platforms encode scan-line order in the sign of the height; the
    /// reportable dimension is the magnitude.
    pub fn from_signed(width: i32, height: i32) -> Self {
        Format::Discrete {
            width: width.unsigned_abs(),
            height: height.unsigned_abs(),
        }
    }

    /// A stepwise range as reported by the platform.
    pub fn stepwise(
        min_width: u32,
        max_width: u32,
        step_width: u32,
        min_height: u32,
        max_height: u32,
        step_height: u32,
    ) -> Self {
        Format::Stepwise {
            min_width,
            max_width,
            step_width,
            min_height,
            max_height,
            step_height,
        }
    }

    /// A continuous range, normalized to stepwise with a unit step in
    /// both axes.
    pub fn continuous(min_width: u32, max_width: u32, min_height: u32, max_height: u32) -> Self {
        Format::Stepwise {
            min_width,
            max_width,
            step_width: 1,
            min_height,
            max_height,
            step_height: 1,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Discrete { width, height } => write!(f, "{}x{}", width, height),
            Format::Stepwise {
                min_width,
                max_width,
                step_width,
                min_height,
                max_height,
                step_height,
            } => write!(
                f,
                "{}->{} step {} x {}->{} step {}",
                min_width, max_width, step_width, min_height, max_height, step_height
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous_normalizes_to_unit_step() {
        let fmt = Format::continuous(320, 1920, 240, 1080);
        assert_eq!(fmt, Format::stepwise(320, 1920, 1, 240, 1080, 1));
    }

    #[test]
    fn test_signed_height_reports_magnitude() {
        // Top-down frames carry a negative height on Windows.
        assert_eq!(Format::from_signed(1920, -1080), Format::discrete(1920, 1080));
        assert_eq!(Format::from_signed(640, 480), Format::discrete(640, 480));
    }

    #[test]
    fn test_display_discrete() {
        assert_eq!(format!("{}", Format::discrete(1920, 1080)), "1920x1080");
    }

    #[test]
    fn test_display_stepwise() {
        let fmt = Format::stepwise(320, 1920, 16, 240, 1080, 9);
        assert_eq!(format!("{}", fmt), "320->1920 step 16 x 240->1080 step 9");
    }
}
