// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stacked bar chart widget model.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};
use peniko::Color;
use stackviz_text::TextMeasurer;

use crate::error::LayoutError;
use crate::hit_test::{hit_test, to_content_space};
use crate::legend::place_legend_labels;
use crate::model::StackedSeries;
use crate::sizing::resolve_bar_sizing;
use crate::stacked_layout::{BarLayout, SegmentLayoutContext, StackedBarLayout};
use crate::style::{ChartStyle, ResolvedStyle};

/// Geometry derived by the last layout pass.
///
/// Recomputed on every size, style or data change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutState {
    /// Width of the graph area.
    pub available_width: f64,
    /// Height of the graph area.
    pub available_height: f64,
    /// Resolved bar width in pixels.
    pub bar_width: f64,
    /// Resolved bar margin in pixels. Negative when fixed-width bars overflow.
    pub bar_margin: f64,
    /// Preferred number of visible bars, as configured.
    pub visible_bars: usize,
    /// Whether the bar width was kept fixed.
    pub fixed_bar_width: bool,
    /// Horizontal extent of all bars.
    pub content_width: f64,
    /// Visible part of the content, in content coordinates.
    pub viewport: Rect,
}

/// A stacked bar chart: owns the data, the style and the derived layout.
///
/// The widget is split vertically into a graph area holding the bars and a
/// legend strip of `legend_height` below it, both inset by the padding.
/// Any change that affects geometry runs a layout pass immediately; purely
/// cosmetic changes only raise the redraw flag.
#[derive(Debug)]
pub struct StackedBarChart<M, L = StackedBarLayout> {
    measurer: M,
    layout: L,
    style: ChartStyle,
    padding: Insets,
    size: Size,
    series: Vec<StackedSeries>,
    state: LayoutState,
    issues: Vec<LayoutError>,
    needs_redraw: bool,
}

impl<M: TextMeasurer> StackedBarChart<M> {
    /// Creates an empty chart with the default style and stacked layout.
    pub fn new(measurer: M) -> Self {
        Self::with_layout(measurer, StackedBarLayout)
    }
}

impl<M: TextMeasurer, L: BarLayout> StackedBarChart<M, L> {
    /// Creates an empty chart using a custom layout strategy.
    pub fn with_layout(measurer: M, layout: L) -> Self {
        Self {
            measurer,
            layout,
            style: ChartStyle::default(),
            padding: Insets::ZERO,
            size: Size::ZERO,
            series: Vec::new(),
            state: LayoutState::default(),
            issues: Vec::new(),
            needs_redraw: true,
        }
    }

    /// Builder form of [`StackedBarChart::set_style`].
    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Replaces the data and lays the chart out.
    pub fn set_series(&mut self, series: Vec<StackedSeries>) {
        self.series = series;
        self.relayout();
    }

    /// Appends series after the existing ones and lays the chart out.
    pub fn append_series(&mut self, series: impl IntoIterator<Item = StackedSeries>) {
        self.series.extend(series);
        self.relayout();
    }

    /// Removes all data.
    pub fn clear(&mut self) {
        self.series.clear();
        self.relayout();
    }

    /// Lays the chart out again, e.g. after mutating [`StackedBarChart::series_mut`].
    pub fn update(&mut self) {
        self.relayout();
    }

    /// Sets the widget size in pixels.
    ///
    /// Rejects negative or non-finite sizes and keeps the previous layout.
    pub fn on_resize(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(LayoutError::InvalidInput(
                "widget size must be finite and non-negative",
            ));
        }
        self.size = Size::new(width, height);
        self.relayout();
        Ok(())
    }

    /// Sets the padding around the graph and legend areas.
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.relayout();
    }

    /// Replaces the whole style.
    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
        self.relayout();
    }

    /// Sets the bar width in density-independent units.
    pub fn set_bar_width(&mut self, bar_width: f64) {
        self.style.bar_width = bar_width;
        self.relayout();
    }

    /// Sets the bar margin in density-independent units.
    pub fn set_bar_margin(&mut self, bar_margin: f64) {
        self.style.bar_margin = bar_margin;
        self.relayout();
    }

    /// Selects fixed-width or dynamic-width bar sizing.
    pub fn set_fixed_bar_width(&mut self, fixed_bar_width: bool) {
        self.style.fixed_bar_width = fixed_bar_width;
        self.relayout();
    }

    /// Sets the preferred number of visible bars.
    pub fn set_visible_bars(&mut self, visible_bars: usize) {
        self.style.visible_bars = visible_bars;
        self.relayout();
    }

    /// Sets the value label text size; label fit is measured again.
    pub fn set_value_text_size(&mut self, size: f64) {
        self.style.value_text_size = size;
        self.relayout();
    }

    /// Sets the legend strip height.
    pub fn set_legend_height(&mut self, legend_height: f64) {
        self.style.legend_height = legend_height;
        self.relayout();
    }

    /// Sets the legend label text size; labels are placed again.
    pub fn set_legend_text_size(&mut self, size: f64) {
        self.style.legend_text_size = size;
        self.relayout();
    }

    /// Keeps or drops decimals in value labels; label fit is measured again.
    pub fn set_show_decimal(&mut self, show_decimal: bool) {
        self.style.show_decimal = show_decimal;
        self.relayout();
    }

    /// Shows or hides value labels.
    pub fn set_show_values(&mut self, show_values: bool) {
        self.style.show_values = show_values;
        self.needs_redraw = true;
    }

    /// Sets the legend label color.
    pub fn set_legend_color(&mut self, color: Color) {
        self.style.legend_color = color;
        self.needs_redraw = true;
    }

    /// Sets the text shown when there is no data.
    pub fn set_empty_data_text(&mut self, text: impl Into<String>) {
        self.style.empty_data_text = text.into();
        self.needs_redraw = true;
    }

    /// The data, with geometry from the last layout pass.
    pub fn series(&self) -> &[StackedSeries] {
        &self.series
    }

    /// Mutable access to the data. Call [`StackedBarChart::update`] afterwards.
    pub fn series_mut(&mut self) -> &mut [StackedSeries] {
        &mut self.series
    }

    /// The current style.
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// The text measurer.
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// The widget size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Graph area in widget coordinates.
    pub fn graph_rect(&self) -> Rect {
        self.graph_rect_for(&self.style.resolve())
    }

    /// Legend strip in widget coordinates.
    pub fn legend_rect(&self) -> Rect {
        let legend_height = self.style.resolve().legend_height;
        let p = self.padding;
        Rect::new(
            p.x0,
            self.size.height - legend_height - p.y1,
            self.size.width - p.x1,
            self.size.height - p.y1,
        )
    }

    /// Geometry derived by the last layout pass.
    pub fn layout_state(&self) -> &LayoutState {
        &self.state
    }

    /// Diagnostics collected by the last layout pass.
    pub fn layout_issues(&self) -> &[LayoutError] {
        &self.issues
    }

    /// Union rectangle of every bar, in content coordinates.
    pub fn series_bounds(&self) -> Vec<Rect> {
        self.series.iter().map(StackedSeries::bounds).collect()
    }

    /// Returns the index of the bar under a widget-space point.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        if self.series.is_empty() {
            return None;
        }
        let graph = self.graph_rect();
        let content = to_content_space(point, graph.origin(), self.state.viewport);
        hit_test(&self.series_bounds(), content)
    }

    /// Whether something changed since the last [`StackedBarChart::take_redraw`].
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::replace(&mut self.needs_redraw, false)
    }

    fn graph_rect_for(&self, resolved: &ResolvedStyle) -> Rect {
        let p = self.padding;
        Rect::new(
            p.x0,
            p.y0,
            self.size.width - p.x1,
            self.size.height - resolved.legend_height - p.y1,
        )
    }

    fn reset_layout(&mut self, resolved: &ResolvedStyle) {
        for s in &mut self.series {
            s.reset_geometry();
        }
        self.state = LayoutState {
            visible_bars: resolved.visible_bars,
            fixed_bar_width: resolved.fixed_bar_width,
            ..LayoutState::default()
        };
    }

    fn relayout(&mut self) {
        self.issues.clear();
        self.needs_redraw = true;

        let resolved = self.style.resolve();
        let graph = self.graph_rect_for(&resolved);
        if self.series.is_empty() || graph.width() <= 0.0 || graph.height() <= 0.0 {
            self.reset_layout(&resolved);
            return;
        }

        let sizing = match resolve_bar_sizing(
            self.series.len(),
            graph.width(),
            resolved.bar_width,
            resolved.bar_margin,
            resolved.fixed_bar_width,
            resolved.visible_bars,
        ) {
            Ok(sizing) => sizing,
            Err(err) => {
                tracing::warn!(%err, "bar sizing failed, chart left empty");
                self.reset_layout(&resolved);
                self.issues.push(err);
                return;
            }
        };

        let ctx = SegmentLayoutContext {
            usable_height: graph.height(),
            legend_height: resolved.legend_height,
            value_format: resolved.value_format,
            value_style: &resolved.value_text,
            measurer: &self.measurer,
        };
        self.issues = self.layout.layout(&mut self.series, sizing, &ctx);

        let content_width = sizing.content_width(self.series.len());
        place_legend_labels(
            &mut self.series,
            0.0,
            content_width,
            resolved.legend_text_margin,
            &resolved.legend_text,
            &self.measurer,
        );

        self.state = LayoutState {
            available_width: graph.width(),
            available_height: graph.height(),
            bar_width: sizing.width,
            bar_margin: sizing.margin,
            visible_bars: resolved.visible_bars,
            fixed_bar_width: resolved.fixed_bar_width,
            content_width,
            viewport: Rect::new(0.0, 0.0, graph.width(), graph.height()),
        };

        tracing::debug!(
            series = self.series.len(),
            bar_width = sizing.width,
            bar_margin = sizing.margin,
            issues = self.issues.len(),
            "stacked bar layout"
        );
    }
}
