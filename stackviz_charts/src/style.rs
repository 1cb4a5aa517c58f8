// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart styling and sizing configuration.
//!
//! Lengths are stored in density-independent units and converted to pixels
//! with an explicit `density` factor when a layout pass starts, so nothing
//! reads display metrics from global state.

extern crate alloc;

use alloc::string::String;

use peniko::Color;
use stackviz_text::TextStyle;

use crate::format::ValueFormat;
use crate::model::argb;

/// Default bar width.
pub const DEFAULT_BAR_WIDTH: f64 = 32.0;
/// Default margin between bars.
pub const DEFAULT_BAR_MARGIN: f64 = 12.0;
/// Default number of visible bars.
pub const DEFAULT_VISIBLE_BARS: usize = 6;
/// Default value label text size.
pub const DEFAULT_VALUE_TEXT_SIZE: f64 = 12.0;
/// Default legend area height.
pub const DEFAULT_LEGEND_HEIGHT: f64 = 58.0;
/// Default legend label text size.
pub const DEFAULT_LEGEND_TEXT_SIZE: f64 = 12.0;
/// Default legend label color, packed as `0xAARRGGBB`.
pub const DEFAULT_LEGEND_COLOR: u32 = 0xFF89_8989;
/// Default value label color, packed as `0xAARRGGBB`.
pub const DEFAULT_VALUE_COLOR: u32 = 0xFFFF_FFFF;
/// Default minimum gap between legend labels.
pub const DEFAULT_LEGEND_TEXT_MARGIN: f64 = 10.0;
/// Default text shown when the chart has no data.
pub const DEFAULT_EMPTY_DATA_TEXT: &str = "No Data available";

/// Visual configuration of a stacked bar chart.
///
/// Use [`ChartStyle::resolve`] to obtain pixel values.
#[derive(Clone, Debug)]
pub struct ChartStyle {
    /// Bar width, used as-is in fixed-width mode.
    pub bar_width: f64,
    /// Margin between bars, used as-is in dynamic-width mode.
    pub bar_margin: f64,
    /// Keep `bar_width` and derive the margin instead of the other way around.
    pub fixed_bar_width: bool,
    /// Preferred number of bars on screen.
    ///
    /// Stored and reported but not used by the sizing formulas.
    pub visible_bars: usize,
    /// Draw value labels inside segments that can fit them.
    pub show_values: bool,
    /// Keep the fractional part of value labels.
    pub show_decimal: bool,
    /// Value label text size.
    pub value_text_size: f64,
    /// Value label color.
    pub value_color: Color,
    /// Height of the legend area below the bars.
    pub legend_height: f64,
    /// Legend label text size.
    pub legend_text_size: f64,
    /// Legend label color.
    pub legend_color: Color,
    /// Minimum gap between legend labels.
    pub legend_text_margin: f64,
    /// Text shown in place of the bars when there is no data.
    pub empty_data_text: String,
    /// Pixels per density-independent unit.
    pub density: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            bar_margin: DEFAULT_BAR_MARGIN,
            fixed_bar_width: false,
            visible_bars: DEFAULT_VISIBLE_BARS,
            show_values: true,
            show_decimal: false,
            value_text_size: DEFAULT_VALUE_TEXT_SIZE,
            value_color: argb(DEFAULT_VALUE_COLOR),
            legend_height: DEFAULT_LEGEND_HEIGHT,
            legend_text_size: DEFAULT_LEGEND_TEXT_SIZE,
            legend_color: argb(DEFAULT_LEGEND_COLOR),
            legend_text_margin: DEFAULT_LEGEND_TEXT_MARGIN,
            empty_data_text: String::from(DEFAULT_EMPTY_DATA_TEXT),
            density: 1.0,
        }
    }
}

impl ChartStyle {
    /// Sets the bar width.
    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    /// Sets the bar margin.
    #[must_use]
    pub fn with_bar_margin(mut self, bar_margin: f64) -> Self {
        self.bar_margin = bar_margin;
        self
    }

    /// Selects fixed-width (`true`) or dynamic-width (`false`) sizing.
    #[must_use]
    pub fn with_fixed_bar_width(mut self, fixed_bar_width: bool) -> Self {
        self.fixed_bar_width = fixed_bar_width;
        self
    }

    /// Sets the preferred number of visible bars.
    #[must_use]
    pub fn with_visible_bars(mut self, visible_bars: usize) -> Self {
        self.visible_bars = visible_bars;
        self
    }

    /// Shows or hides value labels.
    #[must_use]
    pub fn with_show_values(mut self, show_values: bool) -> Self {
        self.show_values = show_values;
        self
    }

    /// Keeps or drops the fractional part of value labels.
    #[must_use]
    pub fn with_show_decimal(mut self, show_decimal: bool) -> Self {
        self.show_decimal = show_decimal;
        self
    }

    /// Sets the value label text size.
    #[must_use]
    pub fn with_value_text_size(mut self, size: f64) -> Self {
        self.value_text_size = size;
        self
    }

    /// Sets the legend area height.
    #[must_use]
    pub fn with_legend_height(mut self, legend_height: f64) -> Self {
        self.legend_height = legend_height;
        self
    }

    /// Sets the legend label text size.
    #[must_use]
    pub fn with_legend_text_size(mut self, size: f64) -> Self {
        self.legend_text_size = size;
        self
    }

    /// Sets the legend label color.
    #[must_use]
    pub fn with_legend_color(mut self, color: Color) -> Self {
        self.legend_color = color;
        self
    }

    /// Sets the text shown when there is no data.
    #[must_use]
    pub fn with_empty_data_text(mut self, text: impl Into<String>) -> Self {
        self.empty_data_text = text.into();
        self
    }

    /// Sets the pixel density.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Converts density-independent lengths to pixels.
    ///
    /// A non-finite or non-positive density falls back to `1.0`.
    pub fn resolve(&self) -> ResolvedStyle {
        let density = if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            1.0
        };
        ResolvedStyle {
            bar_width: self.bar_width * density,
            bar_margin: self.bar_margin * density,
            fixed_bar_width: self.fixed_bar_width,
            visible_bars: self.visible_bars,
            value_format: ValueFormat {
                show_decimal: self.show_decimal,
            },
            value_text: TextStyle::new(self.value_text_size * density),
            legend_height: self.legend_height * density,
            legend_text: TextStyle::new(self.legend_text_size * density),
            legend_text_margin: self.legend_text_margin * density,
        }
    }
}

/// Pixel-space layout inputs derived from a [`ChartStyle`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    /// Bar width in pixels.
    pub bar_width: f64,
    /// Bar margin in pixels.
    pub bar_margin: f64,
    /// Fixed-width sizing.
    pub fixed_bar_width: bool,
    /// Preferred number of visible bars.
    pub visible_bars: usize,
    /// Value label formatting.
    pub value_format: ValueFormat,
    /// Value label text style.
    pub value_text: TextStyle,
    /// Legend area height in pixels.
    pub legend_height: f64,
    /// Legend label text style.
    pub legend_text: TextStyle,
    /// Minimum gap between legend labels in pixels.
    pub legend_text_margin: f64,
}
