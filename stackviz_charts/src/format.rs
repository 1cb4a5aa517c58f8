// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment value text.

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// How segment values are turned into label text.
///
/// Output is plain ASCII with no locale grouping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValueFormat {
    /// Keep the fractional part.
    ///
    /// When set, values use the shortest decimal that round-trips and integral
    /// values keep a trailing `.0` (`50.0`, `2.3`). When unset, values are
    /// truncated toward zero (`50`, `2`).
    pub show_decimal: bool,
}

impl ValueFormat {
    /// Formats with the fractional part.
    pub const DECIMAL: Self = Self { show_decimal: true };
    /// Formats truncated to an integer.
    pub const INTEGER: Self = Self {
        show_decimal: false,
    };

    /// Formats `value` according to this policy.
    pub fn format(self, value: f64) -> String {
        if !value.is_finite() {
            return format!("{value}");
        }
        if self.show_decimal {
            let mut text = format!("{value}");
            if !text.contains('.') {
                text.push_str(".0");
            }
            text
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "truncation toward zero is the integer display policy"
            )]
            let whole = value as i64;
            format!("{whole}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_keeps_minimal_digits() {
        assert_eq!(ValueFormat::DECIMAL.format(2.3), "2.3");
        assert_eq!(ValueFormat::DECIMAL.format(50.0), "50.0");
        assert_eq!(ValueFormat::DECIMAL.format(0.7), "0.7");
        assert_eq!(ValueFormat::DECIMAL.format(1234567.0), "1234567.0");
    }

    #[test]
    fn integer_truncates_toward_zero() {
        assert_eq!(ValueFormat::INTEGER.format(32.9), "32");
        assert_eq!(ValueFormat::INTEGER.format(0.7), "0");
        assert_eq!(ValueFormat::INTEGER.format(-2.5), "-2");
    }

    #[test]
    fn default_drops_the_fraction() {
        assert_eq!(ValueFormat::default().format(12.5), "12");
    }
}
