// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend label placement.
//!
//! Each bar has a caption centered under it. Captions are wider than bars
//! surprisingly often, so placement walks left to right and keeps a running
//! right edge of the last visible label:
//!
//! - a label that would run past the right edge of the drawable area is hidden,
//! - a label that would overlap its left neighbour is shifted right to just
//!   after that neighbour if it still starts before its own bar, and hidden
//!   otherwise,
//! - every other label is centered under its bar.
//!
//! Earlier labels always win; later labels are dropped rather than pushing
//! earlier ones around.

use stackviz_text::{TextMeasurer, TextStyle};

use crate::model::StackedSeries;

/// Places legend labels for `series` between `start_x` and `end_x`.
///
/// Reads each series' `legend_bounds` (so segment layout must run first) and
/// writes `text_bounds`, `show_label` and `legend_label_position`.
/// `text_margin` is the minimum horizontal gap kept between labels and before
/// the right edge, in pixels.
pub fn place_legend_labels<M: TextMeasurer + ?Sized>(
    series: &mut [StackedSeries],
    start_x: f64,
    end_x: f64,
    text_margin: f64,
    style: &TextStyle,
    measurer: &M,
) {
    let mut last_x = start_x;

    for s in series.iter_mut() {
        let text = measurer.text_bounds(&s.legend_label, style);
        s.text_bounds = text;

        let center_x = s.legend_bounds.center().x;
        let centered = center_x - text.width / 2.0;
        let text_start = centered - text_margin;

        if centered + text.width > end_x - text_margin {
            s.show_label = false;
        } else if text_start < last_x {
            if last_x + text_margin < s.legend_bounds.x0 {
                s.show_label = true;
                s.legend_label_position = truncate(last_x + text_margin);
                last_x = last_x + text_margin + text.width;
            } else {
                s.show_label = false;
            }
        } else {
            s.show_label = true;
            s.legend_label_position = truncate(centered);
            last_x = center_x + text.width / 2.0;
        }
    }
}

fn truncate(x: f64) -> i32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "label positions are whole pixels; `as` saturates out-of-range values"
    )]
    let px = x as i32;
    px
}
