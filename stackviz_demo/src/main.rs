// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked bar chart demo.
//!
//! Lays out a week of sample readings, runs a few hit tests and writes the
//! result as SVG. Set `RUST_LOG=stackviz_charts=debug` to see layout passes.

mod svg;

use kurbo::{Insets, Point};
use stackviz_charts::{ChartStyle, StackedBarChart, StackedSeries, TextMeasurer, argb};
use tracing_subscriber::EnvFilter;

const WIDTH: f64 = 1080.0;
const HEIGHT: f64 = 720.0;

const COLORS: [u32; 3] = [0xFF63_CBB0, 0xFF56_B7F1, 0xFFCD_A67F];

const READINGS: [(&str, [f64; 3]); 7] = [
    ("13.4", [1.1, 2.7, 0.7]),
    ("14.4", [2.3, 2.0, 3.3]),
    ("15.4", [1.0, 4.2, 2.1]),
    ("16.4", [32.3, 12.0, 22.3]),
    ("17.4", [3.0, 0.7, 1.7]),
    ("18.4", [2.3, 2.0, 3.3]),
    ("19.4", [5.4, 2.7, 3.4]),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let outputs = [
        ("stackviz_demo.svg", ChartStyle::default().with_show_decimal(true)),
        (
            "stackviz_demo_fixed.svg",
            ChartStyle::default()
                .with_fixed_bar_width(true)
                .with_bar_width(48.0),
        ),
        ("stackviz_demo_dense.svg", ChartStyle::default().with_density(2.0)),
    ];

    for (path, style) in outputs {
        let mut chart = StackedBarChart::new(demo_measurer()).with_style(style);
        chart.set_padding(Insets::uniform(16.0));
        chart.on_resize(WIDTH, HEIGHT)?;
        chart.set_series(readings());

        report(&chart);

        let svg = svg::to_svg_string(&chart.paint_list(), WIDTH, HEIGHT);
        std::fs::write(path, svg)?;
        tracing::info!(path, "wrote chart");
    }

    let mut empty = StackedBarChart::new(demo_measurer());
    empty.on_resize(WIDTH, HEIGHT)?;
    std::fs::write(
        "stackviz_demo_empty.svg",
        svg::to_svg_string(&empty.paint_list(), WIDTH, HEIGHT),
    )?;
    tracing::info!(path = "stackviz_demo_empty.svg", "wrote chart");

    Ok(())
}

fn readings() -> Vec<StackedSeries> {
    READINGS
        .iter()
        .map(|(label, values)| {
            let mut series = StackedSeries::new(*label);
            for (value, color) in values.iter().zip(COLORS) {
                series.push(*value, argb(color));
            }
            series
        })
        .collect()
}

fn report(chart: &StackedBarChart<Box<dyn TextMeasurer>>) {
    let state = chart.layout_state();
    tracing::info!(
        bar_width = state.bar_width,
        bar_margin = state.bar_margin,
        content_width = state.content_width,
        "layout"
    );
    for issue in chart.layout_issues() {
        tracing::warn!(%issue, "layout issue");
    }

    let hidden: Vec<&str> = chart
        .series()
        .iter()
        .filter(|s| !s.show_label)
        .map(|s| s.legend_label.as_str())
        .collect();
    if !hidden.is_empty() {
        tracing::info!(?hidden, "legend labels dropped");
    }

    let graph = chart.graph_rect();
    for x in [graph.x0 + 40.0, graph.center().x, graph.x1 - 2.0] {
        let point = Point::new(x, graph.center().y);
        match chart.hit_test(point) {
            Some(index) => {
                tracing::info!(x, series = %chart.series()[index].legend_label, "hit");
            }
            None => tracing::info!(x, "no bar"),
        }
    }
}

fn demo_measurer() -> Box<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Box::new(stackviz_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Box::new(stackviz_charts::HeuristicTextMeasurer)
    }
}
