// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked bar chart layout.
//!
//! This crate turns a list of [`StackedSeries`] and a widget size into
//! geometry:
//! - **Bar sizing** resolves a uniform bar width and margin from the available
//!   width, either keeping the configured margin (dynamic width) or the
//!   configured width (fixed width).
//! - **Segment layout** splits each bar's height between its segments in
//!   proportion to their values and decides which value labels fit.
//! - **Legend placement** centers a caption under every bar and drops captions
//!   that would collide with an earlier one.
//! - **Hit testing** maps a widget-space point back to a bar index.
//!
//! [`StackedBarChart`] ties these together and keeps the layout current as data,
//! size and style change. [`StackedBarChart::paint_list`] produces a
//! backend-agnostic list of rectangles and text runs; rasterization is left to
//! the caller.
//!
//! Text is measured through [`TextMeasurer`], so layout works with anything
//! from [`HeuristicTextMeasurer`] to a real shaping engine.
//!
//! ```
//! use stackviz_charts::{HeuristicTextMeasurer, StackedBarChart, StackedSeries, argb};
//!
//! let mut chart = StackedBarChart::new(HeuristicTextMeasurer);
//! chart.on_resize(600.0, 358.0).unwrap();
//! chart.set_series(vec![
//!     StackedSeries::new("13.4")
//!         .with_segment(1.1, argb(0xFF63CBB0))
//!         .with_segment(2.7, argb(0xFF56B7F1)),
//! ]);
//!
//! assert_eq!(chart.layout_state().available_height, 300.0);
//! assert_eq!(chart.hit_test(kurbo::Point::new(300.0, 150.0)), Some(0));
//! ```

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod chart;
mod error;
mod format;
mod legend;
mod model;
mod paint;
mod sizing;
mod stacked_layout;
mod style;

pub use chart::{LayoutState, StackedBarChart};
pub use error::LayoutError;
pub use format::ValueFormat;
pub use hit_test::{hit_test, to_content_space};
pub use legend::place_legend_labels;
pub use model::{Segment, StackedSeries, argb};
pub use paint::{PaintItem, PaintList};
pub use sizing::{BarSizing, resolve_bar_sizing};
pub use stacked_layout::{BarLayout, SegmentLayoutContext, StackedBarLayout};
pub use style::{
    ChartStyle, DEFAULT_BAR_MARGIN, DEFAULT_BAR_WIDTH, DEFAULT_EMPTY_DATA_TEXT,
    DEFAULT_LEGEND_COLOR, DEFAULT_LEGEND_HEIGHT, DEFAULT_LEGEND_TEXT_MARGIN,
    DEFAULT_LEGEND_TEXT_SIZE, DEFAULT_VALUE_COLOR, DEFAULT_VALUE_TEXT_SIZE,
    DEFAULT_VISIBLE_BARS, ResolvedStyle,
};

pub use stackviz_text::{
    FontFamily, HeuristicTextMeasurer, MeasureFn, TextBounds, TextMeasurer, TextStyle,
};
