use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::ir::Category;
use crate::layout::{Layout, TextBlock};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let tl = &config.timeline;
    let mut svg = String::new();
    let width = layout.width.max(200.0);
    let height = layout.height.max(120.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    if let Some(title) = &layout.title {
        svg.push_str(&text_block_svg(
            width / 2.0,
            layout.title_y,
            title,
            theme,
            config,
        ));
    }

    // Dashed rules under the date ticks, behind everything else.
    for tick in &layout.ticks {
        svg.push_str(&format!(
            "<line x1=\"{0:.2}\" y1=\"{1:.2}\" x2=\"{0:.2}\" y2=\"{2:.2}\" stroke=\"{3}\" stroke-width=\"0.6\" stroke-dasharray=\"5 4\"/>",
            tick.x, layout.rules_top_y, layout.rules_bottom_y, theme.grid_color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            tick.x,
            layout.tick_label_y,
            theme.font_family,
            theme.font_size * 0.85,
            theme.text_color,
            escape_xml(&tick.label)
        ));
    }

    for band in &layout.bands {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"{}\"/>",
            band.x, band.y, band.width, band.height, band.color, tl.band_opacity
        ));
    }

    for label in &layout.group_labels {
        svg.push_str(&text_block_svg(label.x, label.y, &label.text, theme, config));
    }

    // Axis baseline.
    svg.push_str(&format!(
        "<line x1=\"{0:.2}\" y1=\"{1:.2}\" x2=\"{2:.2}\" y2=\"{1:.2}\" stroke=\"{3}\" stroke-width=\"1.4\"/>",
        layout.axis_start_x, layout.axis_y, layout.axis_end_x, theme.line_color
    ));

    for label in &layout.date_labels {
        svg.push_str(&format!(
            "<line x1=\"{0:.2}\" y1=\"{1:.2}\" x2=\"{0:.2}\" y2=\"{2:.2}\" stroke=\"{3}\" stroke-width=\"0.5\"/>",
            label.x, layout.axis_y, label.leader_top_y, theme.line_color
        ));
        let center_y = label.bottom_y - label.text.height / 2.0;
        svg.push_str(&text_block_svg(label.x, center_y, &label.text, theme, config));
    }

    // Markers last so they sit on top of leaders and the axis.
    for moment in &layout.moments {
        match moment.category {
            Category::Contact => {
                svg.push_str(&format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
                    moment.x, moment.y, tl.marker_radius, theme.contact_color
                ));
            }
            Category::Treatment => {
                svg.push_str(&format!(
                    "<polygon points=\"{}\" fill=\"{}\"/>",
                    star_points(moment.x, moment.y, tl.star_radius),
                    theme.treatment_color
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Five-pointed star with one point up, as an SVG polygon point list.
fn star_points(cx: f32, cy: f32, outer: f32) -> String {
    let inner = outer * 0.45;
    let mut points = String::new();
    for i in 0..10 {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = std::f32::consts::PI * (i as f32 / 5.0) - std::f32::consts::FRAC_PI_2;
        if i > 0 {
            points.push(' ');
        }
        points.push_str(&format!(
            "{:.2},{:.2}",
            cx + radius * angle.cos(),
            cy + radius * angle.sin()
        ));
    }
    points
}

fn text_block_svg(x: f32, y: f32, label: &TextBlock, theme: &Theme, config: &LayoutConfig) -> String {
    let total_height = label.lines.len() as f32 * theme.font_size * config.label_line_height;
    let start_y = y - total_height / 2.0 + theme.font_size;
    let mut text = String::new();

    text.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        theme.font_family, theme.font_size, theme.text_color
    ));

    for (idx, line) in label.lines.iter().enumerate() {
        if idx == 0 {
            text.push_str(&format!("<tspan x=\"{x:.2}\" dy=\"0\">{}", escape_xml(line)));
        } else {
            let dy = theme.font_size * config.label_line_height;
            text.push_str(&format!("<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}", escape_xml(line)));
        }
        text.push_str("</tspan>");
    }

    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme.font_family.split(',').next() {
        opt.font_family = family.trim().trim_matches('"').to_string();
    }
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
