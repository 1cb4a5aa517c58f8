// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement.
//!
//! Implements [`stackviz_text::TextMeasurer`] with shaped line metrics so value
//! and legend labels are laid out against real font data instead of a
//! per-glyph estimate.
//!
//! Parley exposes line metrics rather than ink extents, so the reported
//! height is `ascent + descent`. That is slightly taller than the inked glyphs,
//! which errs towards hiding a value label rather than letting it overflow its
//! segment.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{FontContext, FontWeight, LayoutContext};
use stackviz_text::{FontFamily, TextBounds, TextMeasurer, TextStyle};

/// A [`TextMeasurer`] backed by Parley.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
    density: f32,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("density", &self.density)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer using the system font collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
            density: 1.0,
        }
    }

    /// Sets the display density used while shaping.
    ///
    /// Font sizes handed to [`TextMeasurer::text_bounds`] are already in
    /// pixels; the density only affects hinting and is divided back out of the
    /// returned bounds.
    #[must_use]
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density.max(0.0);
        self
    }

    fn font_stack(family: &FontFamily) -> FontStack<'_> {
        let family = match family {
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        };
        FontStack::from(family)
    }

    fn font_size_f32(font_size: f64) -> f32 {
        if !font_size.is_finite() || font_size <= 0.0 {
            return 0.0;
        }
        if font_size >= f64::from(f32::MAX) {
            f32::MAX
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Value is clamped to f32::MAX above"
            )]
            {
                font_size as f32
            }
        }
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn text_bounds(&self, text: &str, style: &TextStyle) -> TextBounds {
        let text = text.split('\n').next().unwrap_or("");
        let font_size = Self::font_size_f32(style.font_size);
        if text.is_empty() || font_size == 0.0 {
            return TextBounds::ZERO;
        }

        let scale = self.density.max(1.0e-6);
        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, scale, true);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::FontStack(Self::font_stack(
            &style.font_family,
        )));
        let weight = if style.bold { 700.0 } else { 400.0 };
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(weight)));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let Some(line) = layout.lines().next() else {
            return TextBounds::ZERO;
        };
        let m = line.metrics();
        let scale = f64::from(scale);
        TextBounds {
            width: f64::from(m.advance) / scale,
            height: f64::from(m.ascent + m.descent) / scale,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn longer_labels_measure_wider() {
        let m = ParleyTextMeasurer::new();
        let style = TextStyle::new(12.0);
        let short = m.text_bounds("1.5", &style);
        let long = m.text_bounds("1234.5", &style);
        assert!(long.width > short.width);
        assert!(short.height > 0.0);
    }

    #[test]
    fn empty_text_has_no_extent() {
        let m = ParleyTextMeasurer::new();
        assert_eq!(m.text_bounds("", &TextStyle::new(12.0)), TextBounds::ZERO);
    }
}
