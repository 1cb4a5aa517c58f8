// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar width and margin resolution.

use crate::error::LayoutError;

/// Uniform bar width and inter-bar margin for one layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarSizing {
    /// Width of every bar.
    pub width: f64,
    /// Horizontal space allotted around each bar (half on either side).
    ///
    /// May be negative in fixed-width mode when the bars do not fit; bars then
    /// overlap instead of being squeezed.
    pub margin: f64,
}

impl BarSizing {
    /// Whether the bars come out inverted or overlapping.
    ///
    /// Dynamic mode yields a negative width once `available_width / data_size`
    /// drops below the configured margin; fixed mode yields a negative margin
    /// once the bars overflow. Neither is clamped.
    pub fn is_degenerate(&self) -> bool {
        self.width < 0.0 || self.margin < 0.0
    }

    /// Horizontal extent of `count` bars laid out with this sizing.
    pub fn content_width(&self, count: usize) -> f64 {
        (self.width + self.margin) * count as f64
    }
}

/// Resolves bar width and margin from the chart width and bar count.
///
/// - Dynamic mode (`fixed_width == false`): the configured margin is kept and
///   the width is `available_width / data_size - configured_margin`.
/// - Fixed mode: the configured width is kept and the leftover space is shared
///   as margin, `(available_width - configured_width * data_size) / data_size`.
///   The result is not clamped and goes negative when the bars overflow.
///
/// In dynamic mode the width goes negative when there is less than one margin
/// of space per bar. The resulting rectangles have `x1 < x0`; callers that
/// draw them should check [`BarSizing::is_degenerate`].
///
/// `visible_bars` is accepted for API stability but does not affect either
/// formula.
pub fn resolve_bar_sizing(
    data_size: usize,
    available_width: f64,
    configured_width: f64,
    configured_margin: f64,
    fixed_width: bool,
    visible_bars: usize,
) -> Result<BarSizing, LayoutError> {
    let _ = visible_bars;
    if data_size == 0 {
        return Err(LayoutError::InvalidInput("bar count is zero"));
    }
    if !available_width.is_finite() || available_width < 0.0 {
        return Err(LayoutError::InvalidInput(
            "available width must be finite and non-negative",
        ));
    }
    if !configured_width.is_finite() || configured_width < 0.0 {
        return Err(LayoutError::InvalidInput(
            "bar width must be finite and non-negative",
        ));
    }
    if !configured_margin.is_finite() || configured_margin < 0.0 {
        return Err(LayoutError::InvalidInput(
            "bar margin must be finite and non-negative",
        ));
    }

    let n = data_size as f64;
    let sizing = if fixed_width {
        BarSizing {
            width: configured_width,
            margin: (available_width - configured_width * n) / n,
        }
    } else {
        BarSizing {
            width: available_width / n - configured_margin,
            margin: configured_margin,
        }
    };
    if sizing.is_degenerate() {
        tracing::debug!(
            data_size,
            width = sizing.width,
            margin = sizing.margin,
            fixed_width,
            "bars do not fit the available width"
        );
    }
    Ok(sizing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_width_divides_available_space() {
        let s = resolve_bar_sizing(6, 600.0, 32.0, 12.0, false, 6).unwrap();
        assert_eq!(s.width, 88.0);
        assert_eq!(s.margin, 12.0);
    }

    #[test]
    fn fixed_width_shares_leftover_as_margin() {
        let s = resolve_bar_sizing(5, 600.0, 32.0, 12.0, true, 6).unwrap();
        assert_eq!(s.width, 32.0);
        assert_eq!(s.margin, 88.0);
        assert_eq!(s.content_width(5), 600.0);
    }

    #[test]
    fn fixed_width_margin_goes_negative_when_bars_overflow() {
        // 30 bars of 32px need 960px; only 600px are available.
        let s = resolve_bar_sizing(30, 600.0, 32.0, 12.0, true, 6).unwrap();
        assert_eq!(s.width, 32.0);
        assert_eq!(s.margin, -12.0);
    }

    #[test]
    fn dynamic_width_goes_negative_when_margins_do_not_fit() {
        // 10 bars in 100px leave 10px per bar, less than the 12px margin.
        let s = resolve_bar_sizing(10, 100.0, 32.0, 12.0, false, 6).unwrap();
        assert_eq!(s.width, -2.0);
        assert_eq!(s.margin, 12.0);
        assert!(s.is_degenerate());
        assert!(!resolve_bar_sizing(6, 600.0, 32.0, 12.0, false, 6).unwrap().is_degenerate());
    }

    #[test]
    fn visible_bars_does_not_change_the_result() {
        let a = resolve_bar_sizing(4, 400.0, 32.0, 12.0, true, 1).unwrap();
        let b = resolve_bar_sizing(4, 400.0, 32.0, 12.0, true, 40).unwrap();
        assert_eq!(a, b);
        let a = resolve_bar_sizing(4, 400.0, 32.0, 12.0, false, 1).unwrap();
        let b = resolve_bar_sizing(4, 400.0, 32.0, 12.0, false, 40).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_bars_is_invalid_input() {
        let err = resolve_bar_sizing(0, 600.0, 32.0, 12.0, false, 6).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput(_)));
    }

    #[test]
    fn negative_dimensions_are_invalid_input() {
        assert!(resolve_bar_sizing(3, -1.0, 32.0, 12.0, false, 6).is_err());
        assert!(resolve_bar_sizing(3, 100.0, -32.0, 12.0, true, 6).is_err());
        assert!(resolve_bar_sizing(3, 100.0, 32.0, f64::NAN, false, 6).is_err());
    }
}
