// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend-agnostic draw list for a laid-out chart.
//!
//! Everything here is in widget coordinates. Bars are flipped so the first
//! segment of each series sits at the visual bottom of its bar, and both the
//! graph and the legend are shifted by the viewport's horizontal offset.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use stackviz_text::{TextMeasurer, max_text_height};

use crate::chart::StackedBarChart;
use crate::stacked_layout::BarLayout;

/// One drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintItem {
    /// A filled segment rectangle.
    BarRect {
        /// Series index.
        series: usize,
        /// Segment index within the series.
        segment: usize,
        /// Rectangle to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// A value label, horizontally centered on `anchor.x` with its baseline at `anchor.y`.
    ValueLabel {
        /// Formatted value.
        text: String,
        /// Center/baseline point.
        anchor: Point,
        /// Font size in pixels.
        font_size: f64,
        /// Text color.
        color: Color,
    },
    /// A legend caption, left-aligned at `position.x` with its baseline at `position.y`.
    LegendLabel {
        /// Caption text.
        text: String,
        /// Left/baseline point.
        position: Point,
        /// Font size in pixels.
        font_size: f64,
        /// Text color.
        color: Color,
    },
    /// Placeholder text shown when there is no data, centered on `anchor`.
    EmptyText {
        /// Placeholder text.
        text: String,
        /// Center/baseline point.
        anchor: Point,
        /// Font size in pixels.
        font_size: f64,
        /// Text color.
        color: Color,
    },
}

/// Ordered draw list: bars first, then value labels, then legend labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaintList {
    /// Items in paint order.
    pub items: Vec<PaintItem>,
}

impl PaintList {
    /// Iterates over the items in paint order.
    pub fn iter(&self) -> core::slice::Iter<'_, PaintItem> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a PaintList {
    type Item = &'a PaintItem;
    type IntoIter = core::slice::Iter<'a, PaintItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<M: TextMeasurer, L: BarLayout> StackedBarChart<M, L> {
    /// Builds the draw list for the current layout.
    pub fn paint_list(&self) -> PaintList {
        let style = self.style();
        let resolved = style.resolve();
        let graph = self.graph_rect();
        let legend = self.legend_rect();
        let viewport = self.layout_state().viewport;
        let mut items = Vec::new();

        if self.series().is_empty() {
            let text = &style.empty_data_text;
            let bounds = self.measurer().text_bounds(text, &resolved.legend_text);
            let center = graph.center();
            items.push(PaintItem::EmptyText {
                text: text.clone(),
                anchor: Point::new(center.x, center.y + bounds.height / 2.0),
                font_size: resolved.legend_text.font_size,
                color: style.legend_color,
            });
            return PaintList { items };
        }

        let dx = graph.x0 - viewport.x0;
        let bottom = graph.y0 + viewport.height();
        let mut labels = Vec::new();

        for (series, s) in self.series().iter().enumerate() {
            for (segment, seg) in s.segments.iter().enumerate() {
                let rect = Rect::new(
                    seg.bounds.x0 + dx,
                    bottom - seg.bounds.y1,
                    seg.bounds.x1 + dx,
                    bottom - seg.bounds.y0,
                );
                items.push(PaintItem::BarRect {
                    series,
                    segment,
                    rect,
                    color: seg.color,
                });

                if style.show_values
                    && let Some(text_bounds) = seg.label_bounds
                {
                    let mid = rect.center();
                    labels.push(PaintItem::ValueLabel {
                        text: resolved.value_format.format(seg.value),
                        anchor: Point::new(mid.x, mid.y + text_bounds.height / 2.0),
                        font_size: resolved.value_text.font_size,
                        color: style.value_color,
                    });
                }
            }
        }
        items.append(&mut labels);

        let max_font_height = max_text_height(self.measurer(), &resolved.legend_text);
        let legend_dx = legend.x0 - viewport.x0;
        for s in self.series().iter().filter(|s| s.show_label) {
            items.push(PaintItem::LegendLabel {
                text: s.legend_label.clone(),
                position: Point::new(
                    f64::from(s.legend_label_position) + legend_dx,
                    legend.y0 + s.legend_bounds.y1 - max_font_height,
                ),
                font_size: resolved.legend_text.font_size,
                color: style.legend_color,
            });
        }

        PaintList { items }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use stackviz_text::{MeasureFn, TextBounds, TextStyle};

    use super::*;
    use crate::model::{StackedSeries, argb};

    type Measure = fn(&str, &TextStyle) -> TextBounds;

    fn measure(text: &str, _style: &TextStyle) -> TextBounds {
        TextBounds::new(5.0 * text.len() as f64, 8.0)
    }

    fn chart() -> StackedBarChart<MeasureFn<Measure>> {
        let mut chart = StackedBarChart::new(MeasureFn(measure as Measure));
        chart.on_resize(200.0, 158.0).unwrap();
        chart
    }

    fn bars(list: &PaintList) -> Vec<Rect> {
        list.iter()
            .filter_map(|item| match item {
                PaintItem::BarRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_chart_paints_placeholder_only() {
        let list = chart().paint_list();
        assert_eq!(list.len(), 1);
        let PaintItem::EmptyText { text, anchor, .. } = &list.items[0] else {
            panic!("expected empty text, got {list:?}");
        };
        assert_eq!(text, "No Data available");
        assert_eq!(*anchor, Point::new(100.0, 54.0));
    }

    #[test]
    fn first_segment_is_painted_at_the_bottom() {
        let mut chart = chart();
        chart.set_series(vec![
            StackedSeries::new("a")
                .with_segment(3.0, argb(0xFF63_CBB0))
                .with_segment(1.0, argb(0xFF56_B7F1)),
        ]);

        // Graph is 200x100; one bar 188px wide at x 6..194.
        let rects = bars(&chart.paint_list());
        assert_eq!(rects[0], Rect::new(6.0, 25.0, 194.0, 100.0));
        assert_eq!(rects[1], Rect::new(6.0, 0.0, 194.0, 25.0));
    }

    #[test]
    fn value_labels_follow_fit_and_visibility() {
        let mut chart = chart();
        chart.set_series(vec![
            StackedSeries::new("a")
                .with_segment(3.0, argb(0xFF63_CBB0))
                .with_segment(1.0, argb(0xFF56_B7F1)),
        ]);

        let labels: Vec<(String, Point)> = chart
            .paint_list()
            .iter()
            .filter_map(|item| match item {
                PaintItem::ValueLabel { text, anchor, .. } => Some((text.clone(), *anchor)),
                _ => None,
            })
            .collect();
        // Both segments are tall enough (75 and 25 > 12).
        assert_eq!(
            labels,
            vec![
                (String::from("3"), Point::new(100.0, 66.5)),
                (String::from("1"), Point::new(100.0, 16.5)),
            ]
        );

        chart.set_show_values(false);
        assert!(
            chart
                .paint_list()
                .iter()
                .all(|item| !matches!(item, PaintItem::ValueLabel { .. }))
        );
    }

    #[test]
    fn legend_labels_sit_above_the_legend_bottom() {
        let mut chart = chart();
        chart.set_series(vec![StackedSeries::new("13.4").with_segment(1.0, argb(0xFF63_CBB0))]);

        let legend: Vec<Point> = chart
            .paint_list()
            .iter()
            .filter_map(|item| match item {
                PaintItem::LegendLabel { position, .. } => Some(*position),
                _ => None,
            })
            .collect();
        // "13.4" is 20px wide, centered under the bar at x 100.
        assert_eq!(legend, vec![Point::new(90.0, 100.0 + 58.0 - 8.0)]);
    }
}
