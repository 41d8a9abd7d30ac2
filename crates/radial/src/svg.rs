//! SVG export of a [`Scene`].
//!
//! Colors are written as hex triplets plus a separate opacity attribute so the
//! output stays valid SVG 1.1.

use crate::path::{Path, fmt_coord};
use crate::scene::{Primitive, Scene, TextPlacement};
use palette::Srgba;
use std::fmt::Write as _;

/// Renders `scene` as a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut writer = SvgWriter {
        font_family: escape(scene.font_family),
        ..SvgWriter::default()
    };
    writer.write_all(&scene.primitives);

    let size = fmt_coord(scene.size);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">"
    );
    if !writer.defs.is_empty() {
        svg.push_str("<defs>");
        svg.push_str(&writer.defs);
        svg.push_str("</defs>");
    }
    if let Some(bg) = scene.background {
        let _ = write!(
            svg,
            "<rect width=\"{size}\" height=\"{size}\"{}/>",
            paint_attrs("fill", bg)
        );
    }
    svg.push_str(&writer.body);
    svg.push_str("</svg>");
    svg
}

#[derive(Default)]
struct SvgWriter {
    font_family: String,
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgWriter {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn write_all(&mut self, primitives: &[Primitive]) {
        for p in primitives {
            self.write(p);
        }
    }

    fn write(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Fill { path, color, rule } => {
                let _ = write!(
                    self.body,
                    "<path d=\"{}\"{} fill-rule=\"{}\" stroke=\"none\"/>",
                    path.to_svg_data(),
                    paint_attrs("fill", *color),
                    rule.as_svg()
                );
            }
            Primitive::Stroke { path, color, width } => {
                let _ = write!(
                    self.body,
                    "<path d=\"{}\" fill=\"none\"{} stroke-width=\"{}\"/>",
                    path.to_svg_data(),
                    paint_attrs("stroke", *color),
                    fmt_coord(*width)
                );
            }
            Primitive::Line {
                segment,
                color,
                width,
            } => {
                let _ = write!(
                    self.body,
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{} stroke-width=\"{}\"/>",
                    fmt_coord(segment.from.x),
                    fmt_coord(segment.from.y),
                    fmt_coord(segment.to.x),
                    fmt_coord(segment.to.y),
                    paint_attrs("stroke", *color),
                    fmt_coord(*width)
                );
            }
            Primitive::RadialFill {
                path,
                center,
                radius,
                inner,
                outer,
            } => {
                let id = self.fresh_id("gradient");
                let _ = write!(
                    self.defs,
                    "<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" cx=\"{}\" cy=\"{}\" r=\"{}\">",
                    fmt_coord(center.x),
                    fmt_coord(center.y),
                    fmt_coord(*radius)
                );
                write_stop(&mut self.defs, "0%", *inner);
                write_stop(&mut self.defs, "100%", *outer);
                self.defs.push_str("</radialGradient>");

                let _ = write!(
                    self.body,
                    "<path d=\"{}\" fill=\"url(#{id})\"/>",
                    path.to_svg_data()
                );
            }
            Primitive::Text(text) => write_text(&mut self.body, text, &self.font_family),
            Primitive::Clip { path, children } => {
                let id = self.fresh_id("clip");
                write_clip_def(&mut self.defs, &id, path);
                let _ = write!(self.body, "<g clip-path=\"url(#{id})\">");
                self.write_all(children);
                self.body.push_str("</g>");
            }
        }
    }
}

fn write_clip_def(defs: &mut String, id: &str, path: &Path) {
    let _ = write!(
        defs,
        "<clipPath id=\"{id}\" clipPathUnits=\"userSpaceOnUse\"><path d=\"{}\"/></clipPath>",
        path.to_svg_data()
    );
}

fn write_stop(defs: &mut String, offset: &str, color: Srgba<f64>) {
    let (rgb, alpha) = color_to_svg(color);
    let _ = write!(
        defs,
        "<stop offset=\"{offset}\" stop-color=\"{rgb}\" stop-opacity=\"{}\"/>",
        fmt_coord(alpha)
    );
}

fn write_text(out: &mut String, text: &TextPlacement, font_family: &str) {
    let (x, y) = (fmt_coord(text.anchor.x), fmt_coord(text.anchor.y));
    let _ = write!(
        out,
        "<text x=\"{x}\" y=\"{y}\"{} font-family=\"{font_family}\" font-size=\"{}\" font-weight=\"{}\" text-anchor=\"{}\" dominant-baseline=\"middle\" transform=\"rotate({} {x} {y})\">{}</text>",
        paint_attrs("fill", text.color),
        fmt_coord(text.font_size),
        text.weight.as_svg(),
        text.align.as_svg(),
        fmt_coord(text.rotation),
        escape(&text.text)
    );
}

fn paint_attrs(kind: &str, color: Srgba<f64>) -> String {
    let (rgb, alpha) = color_to_svg(color);
    if alpha >= 1.0 {
        format!(" {kind}=\"{rgb}\"")
    } else {
        format!(" {kind}=\"{rgb}\" {kind}-opacity=\"{}\"", fmt_coord(alpha))
    }
}

fn color_to_svg(color: Srgba<f64>) -> (String, f64) {
    let rgb: palette::Srgb<u8> = color.color.into_format();
    (
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue),
        color.alpha.clamp(0.0, 1.0),
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
