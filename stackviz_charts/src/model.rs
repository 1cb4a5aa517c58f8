// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked series data model.
//!
//! Callers own the values, colors and legend labels. Every other field is
//! derived geometry that the layout pass overwrites; it is only meaningful after
//! the owning chart has been laid out.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;
use stackviz_text::TextBounds;

/// Builds a color from a packed `0xAARRGGBB` value.
pub fn argb(packed: u32) -> Color {
    let [a, r, g, b] = packed.to_be_bytes();
    Color::from_rgba8(r, g, b, a)
}

/// One colored value slice within a stacked bar.
#[derive(Clone, Debug)]
pub struct Segment {
    /// Data value. Expected to be finite and `>= 0`.
    pub value: f64,
    /// Fill color.
    pub color: Color,
    /// Segment rectangle in layout space (`y0` is nearer the stack start).
    pub bounds: Rect,
    /// Whether the formatted value fits inside the segment.
    pub label_fits: bool,
    /// Measured value text, set when `label_fits` is true.
    pub label_bounds: Option<TextBounds>,
}

impl Segment {
    /// Creates an unlaid-out segment.
    pub fn new(value: f64, color: Color) -> Self {
        Self {
            value,
            color,
            bounds: Rect::ZERO,
            label_fits: false,
            label_bounds: None,
        }
    }

    /// Vertical span of the laid-out segment.
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub(crate) fn reset_geometry(&mut self) {
        self.bounds = Rect::ZERO;
        self.label_fits = false;
        self.label_bounds = None;
    }
}

/// One stacked bar: an ordered list of segments plus its legend label.
///
/// Segment order is stacking order: the first segment starts the stack.
#[derive(Clone, Debug)]
pub struct StackedSeries {
    /// Caption drawn below the bar.
    pub legend_label: String,
    /// Segments in stacking order.
    pub segments: Vec<Segment>,
    /// Legend slot below the bar, in legend-area coordinates.
    pub legend_bounds: Rect,
    /// Whether the legend label survived placement.
    pub show_label: bool,
    /// Left x of the legend label, truncated to whole pixels.
    pub legend_label_position: i32,
    /// Measured legend label.
    pub text_bounds: TextBounds,
}

impl StackedSeries {
    /// Creates an empty series with a legend label.
    pub fn new(legend_label: impl Into<String>) -> Self {
        Self {
            legend_label: legend_label.into(),
            segments: Vec::new(),
            legend_bounds: Rect::ZERO,
            show_label: false,
            legend_label_position: 0,
            text_bounds: TextBounds::ZERO,
        }
    }

    /// Appends a segment on top of the stack.
    pub fn push(&mut self, value: f64, color: Color) {
        self.segments.push(Segment::new(value, color));
    }

    /// Builder form of [`StackedSeries::push`].
    #[must_use]
    pub fn with_segment(mut self, value: f64, color: Color) -> Self {
        self.push(value, color);
        self
    }

    /// Sum of all segment values.
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.value).sum()
    }

    /// Bounding rectangle of the whole stack.
    ///
    /// Spans from the first segment's left/top corner to the last segment's
    /// right/bottom corner, or [`Rect::ZERO`] for a series without segments.
    pub fn bounds(&self) -> Rect {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => Rect::new(
                first.bounds.x0,
                first.bounds.y0,
                last.bounds.x1,
                last.bounds.y1,
            ),
            _ => Rect::ZERO,
        }
    }

    pub(crate) fn reset_geometry(&mut self) {
        for segment in &mut self.segments {
            segment.reset_geometry();
        }
        self.legend_bounds = Rect::ZERO;
        self.show_label = false;
        self.legend_label_position = 0;
        self.text_bounds = TextBounds::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_channels() {
        let c = argb(0x8012_3456).to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (0x12, 0x34, 0x56, 0x80));
    }

    #[test]
    fn bounds_of_empty_series_is_zero() {
        assert_eq!(StackedSeries::new("x").bounds(), Rect::ZERO);
    }

    #[test]
    fn total_sums_segment_values() {
        let s = StackedSeries::new("a")
            .with_segment(1.5, argb(0xFF00_0000))
            .with_segment(2.5, argb(0xFF00_0000));
        assert_eq!(s.total(), 4.0);
        assert_eq!(s.segments.len(), 2);
    }
}
