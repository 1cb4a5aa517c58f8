// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment geometry for stacked bars.
//!
//! Bars are placed left to right. Each bar gets `margin / 2` of space on
//! either side, so adjacent bars are exactly one margin apart. Within a bar the
//! usable height is split between segments in proportion to their values.
//!
//! Layout space has the first segment nearest `y = 0`, so for every series
//! `segments[i].bounds.y1 == segments[i + 1].bounds.y0`. The paint pass flips
//! this to draw the first segment at the visual bottom of the bar.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Rect;
use stackviz_text::{TextMeasurer, TextStyle};

use crate::error::LayoutError;
use crate::format::ValueFormat;
use crate::model::StackedSeries;
use crate::sizing::BarSizing;

/// Value labels need this much vertical room relative to their text height.
const LABEL_HEIGHT_FACTOR: f64 = 1.5;
/// Value labels need this much horizontal room relative to their text width.
const LABEL_WIDTH_FACTOR: f64 = 1.1;

/// Per-pass inputs shared by every series.
#[derive(Clone, Copy)]
pub struct SegmentLayoutContext<'a> {
    /// Height available for the bars (the graph area, legend excluded).
    pub usable_height: f64,
    /// Height of the legend slot below each bar.
    pub legend_height: f64,
    /// Formatting policy for value labels.
    pub value_format: ValueFormat,
    /// Style of value labels.
    pub value_style: &'a TextStyle,
    /// Measures value labels.
    pub measurer: &'a dyn TextMeasurer,
}

impl Debug for SegmentLayoutContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SegmentLayoutContext")
            .field("usable_height", &self.usable_height)
            .field("legend_height", &self.legend_height)
            .field("value_format", &self.value_format)
            .field("value_style", &self.value_style)
            .field("measurer", &"<dyn TextMeasurer>")
            .finish()
    }
}

/// Strategy that turns resolved bar sizing into per-series geometry.
///
/// A chart holds one of these and runs it on every relayout.
pub trait BarLayout {
    /// Lays out `series` in place.
    ///
    /// Must overwrite all derived segment geometry and every series'
    /// `legend_bounds`. Returns non-fatal per-series diagnostics; a failing
    /// series must not prevent the others from being laid out.
    fn layout(
        &self,
        series: &mut [StackedSeries],
        sizing: BarSizing,
        ctx: &SegmentLayoutContext<'_>,
    ) -> Vec<LayoutError>;
}

/// The stacked bar layout: one full-height bar per series.
#[derive(Clone, Copy, Debug, Default)]
pub struct StackedBarLayout;

impl BarLayout for StackedBarLayout {
    fn layout(
        &self,
        series: &mut [StackedSeries],
        sizing: BarSizing,
        ctx: &SegmentLayoutContext<'_>,
    ) -> Vec<LayoutError> {
        let mut issues = Vec::new();
        let mut cursor = 0.0;

        for (index, s) in series.iter_mut().enumerate() {
            cursor += sizing.margin / 2.0;

            match validate(index, s) {
                Ok(()) if !s.total().is_finite() => {
                    let err = LayoutError::TotalOverflow { series: index };
                    tracing::warn!(series = index, %err, "laying out series as empty");
                    collapse_segments(s, cursor, sizing.width);
                    issues.push(err);
                }
                Ok(()) => {
                    let total = s.total();
                    if total == 0.0 && !s.segments.is_empty() {
                        tracing::debug!(series = index, "zero total, collapsing segments");
                        issues.push(LayoutError::DegenerateLayout { series: index });
                    }
                    layout_segments(s, cursor, total, sizing.width, ctx);
                }
                Err(err) => {
                    tracing::warn!(series = index, %err, "laying out series as empty");
                    collapse_segments(s, cursor, sizing.width);
                    issues.push(err);
                }
            }

            s.legend_bounds = Rect::new(cursor, 0.0, cursor + sizing.width, ctx.legend_height);
            cursor += sizing.width + sizing.margin / 2.0;
        }

        issues
    }
}

fn validate(index: usize, series: &StackedSeries) -> Result<(), LayoutError> {
    for (segment, s) in series.segments.iter().enumerate() {
        if !s.value.is_finite() || s.value < 0.0 {
            return Err(LayoutError::InvalidSegmentValue {
                series: index,
                segment,
                value: s.value,
            });
        }
    }
    Ok(())
}

fn layout_segments(
    series: &mut StackedSeries,
    left: f64,
    total: f64,
    bar_width: f64,
    ctx: &SegmentLayoutContext<'_>,
) {
    let right = left + bar_width;
    let mut last_y = 0.0;

    for segment in &mut series.segments {
        let new_y = if total > 0.0 {
            segment.value / total * ctx.usable_height + last_y
        } else {
            last_y
        };
        let height = new_y - last_y;

        let text = ctx.value_format.format(segment.value);
        let text_bounds = ctx.measurer.text_bounds(&text, ctx.value_style);
        let fits = text_bounds.height * LABEL_HEIGHT_FACTOR < height
            && text_bounds.width * LABEL_WIDTH_FACTOR < bar_width;

        segment.bounds = Rect::new(left, last_y, right, new_y);
        segment.label_fits = fits;
        segment.label_bounds = fits.then_some(text_bounds);
        last_y = new_y;
    }
}

fn collapse_segments(series: &mut StackedSeries, left: f64, bar_width: f64) {
    for segment in &mut series.segments {
        segment.reset_geometry();
        segment.bounds = Rect::new(left, 0.0, left + bar_width, 0.0);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use stackviz_text::{MeasureFn, TextBounds};

    use super::*;
    use crate::model::argb;

    const GREEN: u32 = 0xFF63_CBB0;
    const BLUE: u32 = 0xFF56_B7F1;

    fn measurer(text: &str, _style: &TextStyle) -> TextBounds {
        TextBounds::new(6.0 * text.len() as f64, 8.0)
    }

    fn run(series: &mut [StackedSeries], sizing: BarSizing, usable_height: f64) -> Vec<LayoutError> {
        let style = TextStyle::new(12.0);
        let m = MeasureFn(measurer);
        let ctx = SegmentLayoutContext {
            usable_height,
            legend_height: 58.0,
            value_format: ValueFormat::INTEGER,
            value_style: &style,
            measurer: &m,
        };
        StackedBarLayout.layout(series, sizing, &ctx)
    }

    #[test]
    fn heights_are_proportional_to_values() {
        let mut series = vec![
            StackedSeries::new("a")
                .with_segment(50.0, argb(GREEN))
                .with_segment(20.0, argb(BLUE)),
        ];
        let issues = run(&mut series, BarSizing { width: 40.0, margin: 10.0 }, 140.0);
        assert!(issues.is_empty());

        let segs = &series[0].segments;
        assert!((segs[0].height() - 100.0).abs() < 1e-9);
        assert!((segs[1].height() - 40.0).abs() < 1e-9);
        assert_eq!(segs[0].bounds.y1, segs[1].bounds.y0);
        assert_eq!(segs[0].bounds.x0, 5.0);
        assert_eq!(segs[0].bounds.x1, 45.0);
    }

    #[test]
    fn bars_advance_by_width_plus_margin() {
        let mut series = vec![
            StackedSeries::new("a").with_segment(1.0, argb(GREEN)),
            StackedSeries::new("b").with_segment(1.0, argb(GREEN)),
            StackedSeries::new("c").with_segment(1.0, argb(GREEN)),
        ];
        run(&mut series, BarSizing { width: 20.0, margin: 8.0 }, 100.0);

        let xs: Vec<f64> = series.iter().map(|s| s.legend_bounds.x0).collect();
        assert_eq!(xs, vec![4.0, 32.0, 60.0]);
        for pair in series.windows(2) {
            assert_eq!(pair[0].legend_bounds.x1 + 8.0, pair[1].legend_bounds.x0);
        }
        assert_eq!(series[0].legend_bounds.height(), 58.0);
    }

    #[test]
    fn label_fit_uses_height_and_width_slack() {
        // "50" measures 12x8: fits in 100px tall and 40px wide.
        // "5" measures 6x8: 8 * 1.5 = 12 is not < 10, so it does not fit.
        let mut series = vec![
            StackedSeries::new("a")
                .with_segment(50.0, argb(GREEN))
                .with_segment(5.0, argb(BLUE)),
        ];
        run(&mut series, BarSizing { width: 40.0, margin: 0.0 }, 110.0);

        let segs = &series[0].segments;
        assert!(segs[0].label_fits);
        assert_eq!(segs[0].label_bounds, Some(TextBounds::new(12.0, 8.0)));
        assert!(!segs[1].label_fits);
        assert_eq!(segs[1].label_bounds, None);
    }

    #[test]
    fn narrow_bars_hide_labels() {
        // "50" is 12px wide; 12 * 1.1 = 13.2 is not < 13.
        let mut series = vec![StackedSeries::new("a").with_segment(50.0, argb(GREEN))];
        run(&mut series, BarSizing { width: 13.0, margin: 0.0 }, 200.0);
        assert!(!series[0].segments[0].label_fits);
    }

    #[test]
    fn zero_total_collapses_without_dividing() {
        let mut series = vec![
            StackedSeries::new("zero")
                .with_segment(0.0, argb(GREEN))
                .with_segment(0.0, argb(BLUE)),
        ];
        let issues = run(&mut series, BarSizing { width: 20.0, margin: 4.0 }, 100.0);

        assert_eq!(issues, vec![LayoutError::DegenerateLayout { series: 0 }]);
        for seg in &series[0].segments {
            assert_eq!(seg.height(), 0.0);
            assert!(seg.bounds.y0.is_finite());
            assert!(!seg.label_fits);
        }
    }

    #[test]
    fn invalid_series_is_isolated() {
        let mut series = vec![
            StackedSeries::new("ok").with_segment(3.0, argb(GREEN)),
            StackedSeries::new("bad")
                .with_segment(2.0, argb(GREEN))
                .with_segment(-1.0, argb(BLUE)),
            StackedSeries::new("ok too").with_segment(7.0, argb(GREEN)),
        ];
        let issues = run(&mut series, BarSizing { width: 20.0, margin: 10.0 }, 100.0);

        assert_eq!(
            issues,
            vec![LayoutError::InvalidSegmentValue {
                series: 1,
                segment: 1,
                value: -1.0
            }]
        );
        assert_eq!(series[0].segments[0].height(), 100.0);
        assert_eq!(series[1].bounds().height(), 0.0);
        assert_eq!(series[1].legend_bounds.x0, 35.0);
        assert_eq!(series[2].segments[0].height(), 100.0);
    }

    #[test]
    fn huge_finite_values_keep_heights_finite() {
        let mut series = vec![
            StackedSeries::new("big")
                .with_segment(1e306, argb(GREEN))
                .with_segment(3e306, argb(BLUE)),
            StackedSeries::new("near max").with_segment(1e308, argb(GREEN)),
        ];
        let issues = run(&mut series, BarSizing { width: 20.0, margin: 10.0 }, 600.0);

        assert!(issues.is_empty());
        let segs = &series[0].segments;
        assert!((segs[0].height() - 150.0).abs() < 1e-9);
        assert!((segs[1].height() - 450.0).abs() < 1e-9);
        assert_eq!(series[1].segments[0].height(), 600.0);
    }

    #[test]
    fn overflowing_total_is_reported_and_collapsed() {
        let mut series = vec![
            StackedSeries::new("sum overflows")
                .with_segment(1e308, argb(GREEN))
                .with_segment(1e308, argb(BLUE)),
            StackedSeries::new("ok").with_segment(2.0, argb(GREEN)),
        ];
        let issues = run(&mut series, BarSizing { width: 20.0, margin: 10.0 }, 600.0);

        assert_eq!(issues, vec![LayoutError::TotalOverflow { series: 0 }]);
        for seg in &series[0].segments {
            assert_eq!(seg.height(), 0.0);
            assert!(seg.bounds.y1.is_finite());
        }
        assert_eq!(series[1].segments[0].height(), 600.0);
    }

    #[test]
    fn relayout_clears_stale_label_fit() {
        let mut series = vec![StackedSeries::new("a").with_segment(50.0, argb(GREEN))];
        run(&mut series, BarSizing { width: 40.0, margin: 0.0 }, 200.0);
        assert!(series[0].segments[0].label_fits);

        run(&mut series, BarSizing { width: 40.0, margin: 0.0 }, 10.0);
        assert!(!series[0].segments[0].label_fits);
        assert_eq!(series[0].segments[0].label_bounds, None);
    }
}
