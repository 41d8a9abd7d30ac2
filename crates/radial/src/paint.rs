use crate::path::{FillRule, Path, PathCmd};
use crate::scene::{FontWeight, Primitive, Scene, TextAlign, TextPlacement};
use cairo::{Context, FontSlant, RadialGradient};
use palette::Srgba;

/// Paints `scene` onto `cr` in scene coordinates, background included.
pub fn paint(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    if let Some(bg) = scene.background {
        set_source(cr, bg);
        cr.rectangle(0.0, 0.0, scene.size, scene.size);
        cr.fill()?;
    }
    paint_all(cr, &scene.primitives, scene.font_family)
}

fn paint_all(
    cr: &Context,
    primitives: &[Primitive],
    font_family: &str,
) -> Result<(), cairo::Error> {
    for p in primitives {
        paint_primitive(cr, p, font_family)?;
    }
    Ok(())
}

fn paint_primitive(
    cr: &Context,
    primitive: &Primitive,
    font_family: &str,
) -> Result<(), cairo::Error> {
    match primitive {
        Primitive::Fill { path, color, rule } => {
            trace(cr, path);
            cr.set_fill_rule(match rule {
                FillRule::NonZero => cairo::FillRule::Winding,
                FillRule::EvenOdd => cairo::FillRule::EvenOdd,
            });
            set_source(cr, *color);
            cr.fill()
        }
        Primitive::Stroke { path, color, width } => {
            trace(cr, path);
            set_source(cr, *color);
            cr.set_line_width(*width);
            cr.stroke()
        }
        Primitive::Line {
            segment,
            color,
            width,
        } => {
            cr.new_path();
            cr.move_to(segment.from.x, segment.from.y);
            cr.line_to(segment.to.x, segment.to.y);
            set_source(cr, *color);
            cr.set_line_width(*width);
            cr.stroke()
        }
        Primitive::RadialFill {
            path,
            center,
            radius,
            inner,
            outer,
        } => {
            let gradient =
                RadialGradient::new(center.x, center.y, 0.0, center.x, center.y, *radius);
            let (r, g, b, a) = inner.into_components();
            gradient.add_color_stop_rgba(0.0, r, g, b, a);
            let (r, g, b, a) = outer.into_components();
            gradient.add_color_stop_rgba(1.0, r, g, b, a);

            trace(cr, path);
            cr.set_fill_rule(cairo::FillRule::Winding);
            cr.set_source(&gradient)?;
            cr.fill()
        }
        Primitive::Text(text) => paint_text(cr, text, font_family),
        Primitive::Clip { path, children } => {
            cr.save()?;
            trace(cr, path);
            cr.clip();
            paint_all(cr, children, font_family)?;
            cr.restore()
        }
    }
}

fn trace(cr: &Context, path: &Path) {
    cr.new_path();
    for cmd in path.cmds() {
        match *cmd {
            PathCmd::MoveTo(p) => cr.move_to(p.x, p.y),
            PathCmd::LineTo(p) => cr.line_to(p.x, p.y),
            PathCmd::Close => cr.close_path(),
        }
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn paint_text(cr: &Context, text: &TextPlacement, font_family: &str) -> Result<(), cairo::Error> {
    let weight = match text.weight {
        FontWeight::Normal => cairo::FontWeight::Normal,
        FontWeight::SemiBold => cairo::FontWeight::Bold,
    };

    cr.save()?;
    cr.translate(text.anchor.x, text.anchor.y);
    cr.rotate(text.rotation.to_radians());
    cr.select_font_face(font_family, FontSlant::Normal, weight);
    cr.set_font_size(text.font_size);
    set_source(cr, text.color);

    let ext = cr.text_extents(&text.text)?;
    let dx = match text.align {
        TextAlign::Start => 0.0,
        TextAlign::Middle => -ext.x_advance() / 2.0,
        TextAlign::End => -ext.x_advance(),
    };
    // vertically centered on the anchor
    let dy = -(ext.y_bearing() + ext.height() / 2.0);
    cr.move_to(dx, dy);
    cr.show_text(&text.text)?;
    cr.restore()
}
