// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text bounds measurement for chart layout.
//!
//! Bar layout needs to know how large a piece of text is before anything is
//! drawn: value labels are only shown when they fit inside their segment, and
//! legend labels are dropped when they would collide with a neighbour. Shaping
//! and glyph rendering stay downstream, so the layout code depends on this
//! small measurement interface only.
//!
//! Measurements are *tight* bounds of the inked text (like a platform
//! `getTextBounds` call), not line boxes. All lengths are in the caller's
//! pixel space.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::sync::Arc;

/// Sample string used to measure the tallest glyph extent of a style.
///
/// It mixes capitals, ascenders and descenders so the measured height covers
/// any label drawn with the same style.
pub const MAX_HEIGHT_SAMPLE: &str = "MgHITasger";

/// Measures the bounds of a single line of text.
pub trait TextMeasurer {
    /// Returns the tight bounds of `text` rendered with `style`.
    ///
    /// `text` is treated as a single line.
    fn text_bounds(&self, text: &str, style: &TextStyle) -> TextBounds;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn text_bounds(&self, text: &str, style: &TextStyle) -> TextBounds {
        (**self).text_bounds(text, style)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn text_bounds(&self, text: &str, style: &TextStyle) -> TextBounds {
        (**self).text_bounds(text, style)
    }
}

/// Adapts a closure into a [`TextMeasurer`].
///
/// Handy for tests and for hosts that already own a measuring callback.
#[derive(Clone, Copy, Debug)]
pub struct MeasureFn<F>(pub F);

impl<F> TextMeasurer for MeasureFn<F>
where
    F: Fn(&str, &TextStyle) -> TextBounds,
{
    fn text_bounds(&self, text: &str, style: &TextStyle) -> TextBounds {
        (self.0)(text, style)
    }
}

/// Width and height of measured text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBounds {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl TextBounds {
    /// Empty bounds.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates bounds from a width and height.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// Preferred font family.
    pub font_family: FontFamily,
    /// Whether the text is set in a bold weight.
    pub bold: bool,
}

impl TextStyle {
    /// Creates a regular sans-serif style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            bold: false,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the bold flag.
    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Generic sans-serif family.
    SansSerif,
    /// Generic monospace family.
    Monospace,
    /// A named family such as `"Roboto"`.
    Named(Arc<str>),
}

/// Height of the tallest text drawn with `style`.
///
/// Legend labels are positioned using this value so a row of labels shares a
/// baseline regardless of which glyphs each label contains.
pub fn max_text_height<M: TextMeasurer + ?Sized>(measurer: &M, style: &TextStyle) -> f64 {
    measurer.text_bounds(MAX_HEIGHT_SAMPLE, style).height
}

/// A heuristic measurer for demos and tests.
///
/// Glyphs advance ~0.6em. Height is the cap height (~0.72em), extended by
/// ~0.22em when the text contains a descender.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn text_bounds(&self, text: &str, style: &TextStyle) -> TextBounds {
        if text.is_empty() {
            return TextBounds::ZERO;
        }
        let em = style.font_size.max(0.0);
        let advance = if style.bold { 0.64 } else { 0.6 };
        let width = advance * em * text.chars().count() as f64;
        let descends = text.chars().any(|c| matches!(c, 'g' | 'j' | 'p' | 'q' | 'y' | ','));
        let height = if descends { 0.94 * em } else { 0.72 * em };
        TextBounds { width, height }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_is_empty_for_empty_text() {
        let b = HeuristicTextMeasurer.text_bounds("", &TextStyle::new(12.0));
        assert_eq!(b, TextBounds::ZERO);
    }

    #[test]
    fn heuristic_width_scales_with_char_count() {
        let style = TextStyle::new(10.0);
        let one = HeuristicTextMeasurer.text_bounds("8", &style);
        let four = HeuristicTextMeasurer.text_bounds("12.5", &style);
        assert!((four.width - 4.0 * one.width).abs() < 1e-9);
        assert!((one.height - 7.2).abs() < 1e-9);
    }

    #[test]
    fn max_height_sample_includes_descenders() {
        let style = TextStyle::new(10.0);
        let digits = HeuristicTextMeasurer.text_bounds("42", &style);
        assert!(max_text_height(&HeuristicTextMeasurer, &style) > digits.height);
    }

    #[test]
    fn closures_and_boxes_measure() {
        let m = MeasureFn(|text: &str, style: &TextStyle| {
            TextBounds::new(text.len() as f64, style.font_size)
        });
        let boxed: Box<dyn TextMeasurer> = Box::new(m);
        let b = boxed.text_bounds("abc", &TextStyle::new(9.0));
        assert_eq!(b, TextBounds::new(3.0, 9.0));
    }
}
