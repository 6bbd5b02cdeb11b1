use anyhow::Result;
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::config::RenderOptions;
use crate::geometry::{Point, Rect};
use crate::model::{Circuit, ComponentKind};
use crate::theme::Theme;

/// Drawing capabilities the renderer needs from a 2D target. The routing
/// engine and circuit model never see this trait; presentation technology
/// stays swappable behind it.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32, background: &str);
    fn fill_rect(&mut self, rect: Rect, fill: &str);
    fn stroke_rect(&mut self, rect: Rect, stroke: &str, stroke_width: f32);
    fn draw_circle(&mut self, center: Point, radius: f32, fill: &str);
    fn draw_polyline(&mut self, points: &[Point], stroke: &str, stroke_width: f32);
    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        font_family: &str,
        font_size: f32,
        fill: &str,
    );
}

/// SVG-backed [`Surface`] accumulating markup into a string.
#[derive(Debug, Default)]
pub struct SvgSurface {
    svg: String,
    closed: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> String {
        if !self.closed {
            self.svg.push_str("</svg>");
            self.closed = true;
        }
        self.svg
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, width: f32, height: f32, background: &str) {
        self.svg.clear();
        self.closed = false;
        self.svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        ));
        self.svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{background}\"/>",
        ));
    }

    fn fill_rect(&mut self, rect: Rect, fill: &str) {
        self.svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"4\" ry=\"4\" fill=\"{}\"/>",
            rect.x, rect.y, rect.width, rect.height, fill
        ));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &str, stroke_width: f32) {
        self.svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"4\" ry=\"4\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            rect.x, rect.y, rect.width, rect.height, stroke, stroke_width
        ));
    }

    fn draw_circle(&mut self, center: Point, radius: f32, fill: &str) {
        self.svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            center.x, center.y, radius, fill
        ));
    }

    fn draw_polyline(&mut self, points: &[Point], stroke: &str, stroke_width: f32) {
        if points.is_empty() {
            return;
        }
        let mut d = String::new();
        d.push_str(&format!("M {:.2} {:.2}", points[0].x, points[0].y));
        for point in points.iter().skip(1) {
            d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
        }
        self.svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            d, stroke, stroke_width
        ));
    }

    fn draw_text(
        &mut self,
        position: Point,
        text: &str,
        font_family: &str,
        font_size: f32,
        fill: &str,
    ) {
        self.svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            position.x,
            position.y,
            font_family,
            font_size,
            fill,
            escape_xml(text)
        ));
    }
}

/// Canvas window covering every component footprint and routed path, plus
/// padding. Returns (offset, width, height); the offset translates circuit
/// coordinates into canvas coordinates.
fn canvas_window(circuit: &Circuit, options: &RenderOptions) -> (Point, f32, f32) {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    let mut cover = |point: Point| {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    };
    for component in circuit.components.values() {
        for corner in component.bounds().corners() {
            cover(corner);
        }
    }
    for wire in &circuit.wires {
        for point in &wire.path {
            cover(*point);
        }
    }
    if min_x > max_x {
        return (Point::new(0.0, 0.0), options.padding * 2.0, options.padding * 2.0);
    }
    let offset = Point::new(options.padding - min_x, options.padding - min_y);
    let width = max_x - min_x + options.padding * 2.0;
    let height = max_y - min_y + options.padding * 2.0;
    (offset, width, height)
}

/// Draw a routed circuit onto a surface: component boxes and labels, then
/// wire polylines with optional bend markers and labels, then pin dots
/// colored by kind on top.
pub fn render_circuit(
    circuit: &Circuit,
    theme: &Theme,
    options: &RenderOptions,
    surface: &mut impl Surface,
) {
    let (offset, width, height) = canvas_window(circuit, options);
    let place = |point: Point| Point::new(point.x + offset.x, point.y + offset.y);
    surface.clear(width, height, &theme.background);

    for component in circuit.components.values() {
        let bounds = component.bounds();
        let rect = Rect::new(
            bounds.x + offset.x,
            bounds.y + offset.y,
            bounds.width,
            bounds.height,
        );
        surface.fill_rect(rect, &theme.component_fill);
        surface.stroke_rect(rect, &theme.component_border, 1.4);
        let center = rect.center();
        surface.draw_text(
            center,
            &component.label,
            &theme.font_family,
            theme.font_size,
            &theme.component_text_color,
        );
        if let ComponentKind::Resistor { resistance } = component.kind {
            let below = Point::new(
                center.x,
                center.y + theme.font_size * options.label_line_height,
            );
            surface.draw_text(
                below,
                &format!("{resistance} \u{3a9}"),
                &theme.font_family,
                theme.font_size * 0.8,
                &theme.component_text_color,
            );
        }
    }

    for wire in &circuit.wires {
        if wire.path.len() < 2 {
            continue;
        }
        let points: Vec<Point> = wire.path.iter().map(|p| place(*p)).collect();
        surface.draw_polyline(&points, &theme.wire_color, options.wire_width);
        if options.draw_bend_markers {
            for bend in &points[1..points.len() - 1] {
                surface.draw_circle(*bend, options.bend_marker_radius, &theme.bend_marker_color);
            }
        }
        if let Some(label) = &wire.label {
            let mid = wire_midpoint(&points);
            let approx_width = label.len() as f32 * theme.font_size * 0.6 + 8.0;
            let rect = Rect::new(
                mid.x - approx_width / 2.0,
                mid.y - theme.font_size * 0.75,
                approx_width,
                theme.font_size * 1.5,
            );
            surface.fill_rect(rect, &theme.label_background);
            let baseline = Point::new(mid.x, mid.y + theme.font_size * 0.35);
            surface.draw_text(
                baseline,
                label,
                &theme.font_family,
                theme.font_size,
                &theme.label_text_color,
            );
        }
    }

    for pin in circuit.pins.values() {
        if let Some(position) = circuit.pin_position(&pin.id) {
            surface.draw_circle(place(position), options.pin_radius, theme.pin_color(pin.kind));
        }
    }
}

/// Render straight to an SVG string.
pub fn render_svg(circuit: &Circuit, theme: &Theme, options: &RenderOptions) -> String {
    let mut surface = SvgSurface::new();
    render_circuit(circuit, theme, options, &mut surface);
    surface.finish()
}

fn wire_midpoint(points: &[Point]) -> Point {
    if points.len() >= 4 {
        let a = points[points.len() / 2 - 1];
        let b = points[points.len() / 2];
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    } else {
        let a = points[0];
        let b = points[points.len() - 1];
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }
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
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
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
