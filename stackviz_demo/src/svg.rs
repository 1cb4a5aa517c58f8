// Copyright 2025 the stackviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `stackviz_demo`.

use std::fmt::Write as _;

use kurbo::{Point, Rect};
use peniko::Color;
use stackviz_charts::{PaintItem, PaintList};

#[derive(Clone, Copy, Debug)]
enum Anchor {
    Start,
    Middle,
}

/// Renders a paint list into a standalone SVG document of the given size.
pub(crate) fn to_svg_string(list: &PaintList, width: f64, height: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#,
    );
    out.push_str(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
    out.push('\n');

    for item in list {
        match item {
            PaintItem::BarRect { rect, color, .. } => write_rect(&mut out, *rect, *color),
            PaintItem::ValueLabel {
                text,
                anchor,
                font_size,
                color,
            }
            | PaintItem::EmptyText {
                text,
                anchor,
                font_size,
                color,
            } => write_text(&mut out, text, *anchor, Anchor::Middle, *font_size, *color),
            PaintItem::LegendLabel {
                text,
                position,
                font_size,
                color,
            } => write_text(&mut out, text, *position, Anchor::Start, *font_size, *color),
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_rect(out: &mut String, rect: Rect, color: Color) {
    // Zero-height segments still come through; SVG ignores them.
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height(),
    );
    write_paint_attr(out, "fill", color);
    out.push_str("/>\n");
}

fn write_text(
    out: &mut String,
    text: &str,
    at: Point,
    anchor: Anchor,
    font_size: f64,
    color: Color,
) {
    let anchor = match anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{font_size}" font-family="sans-serif" text-anchor="{anchor}""#,
        at.x, at.y,
    );
    write_paint_attr(out, "fill", color);
    out.push('>');
    out.push_str(&escape_xml(text));
    out.push_str("</text>\n");
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    );
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
