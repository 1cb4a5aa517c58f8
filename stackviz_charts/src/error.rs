// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout errors.

use thiserror::Error;

/// Errors and diagnostics produced while laying out a chart.
///
/// [`LayoutError::InvalidInput`] is returned by the bar sizing step and aborts
/// that layout pass. The per-series variants are collected by the chart and
/// never stop other series from being laid out.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A sizing input was zero, negative or not finite.
    #[error("invalid layout input: {0}")]
    InvalidInput(&'static str),
    /// A segment value was negative or not finite; the series is laid out empty.
    #[error("series {series} segment {segment} has invalid value {value}")]
    InvalidSegmentValue {
        /// Index of the offending series.
        series: usize,
        /// Index of the offending segment within the series.
        segment: usize,
        /// The rejected value.
        value: f64,
    },
    /// Segment values are finite but their sum is not; the series is laid out empty.
    #[error("series {series} total overflows; segments collapse to zero height")]
    TotalOverflow {
        /// Index of the series.
        series: usize,
    },
    /// Every segment value of a series is zero; all spans collapse to zero height.
    #[error("series {series} has a zero total; segments collapse to zero height")]
    DegenerateLayout {
        /// Index of the series.
        series: usize,
    },
}

impl LayoutError {
    /// Returns the index of the series this error concerns, if any.
    pub fn series(&self) -> Option<usize> {
        match self {
            Self::InvalidInput(_) => None,
            Self::InvalidSegmentValue { series, .. }
            | Self::TotalOverflow { series }
            | Self::DegenerateLayout { series } => Some(*series),
        }
    }
}
