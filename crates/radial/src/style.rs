use palette::{Srgb, Srgba};

/// Colors, stroke widths and font sizes of the week clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub background: Option<Srgba<f64>>,
    pub grid_line: Srgba<f64>,
    pub grid_line_width: f64,
    pub divider: Srgba<f64>,
    pub divider_width: f64,
    pub hour_text: Srgba<f64>,
    pub hour_font_size: f64,
    pub day_text: Srgba<f64>,
    pub day_font_size: f64,
    pub center_inner: Srgba<f64>,
    pub center_outer: Srgba<f64>,
    pub center_stroke: Srgba<f64>,
    pub center_stroke_width: f64,
    pub font_family: &'static str,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background: Some(opaque(0x1e, 0x1e, 0x1e)),
            grid_line: white(0.28),
            grid_line_width: 1.2,
            divider: white(0.22),
            divider_width: 1.0,
            hour_text: white(0.65),
            hour_font_size: 5.0,
            day_text: white(0.75),
            day_font_size: 13.0,
            center_inner: opaque(0x3a, 0x3a, 0x3a),
            center_outer: opaque(0x1e, 0x1e, 0x1e),
            center_stroke: white(0.2),
            center_stroke_width: 1.0,
            font_family: "Sans",
        }
    }
}

impl Style {
    /// Same style without the background fill, for drawing over other content.
    pub fn transparent(self) -> Self {
        Self {
            background: None,
            ..self
        }
    }
}

fn white(alpha: f64) -> Srgba<f64> {
    Srgba::new(1.0, 1.0, 1.0, alpha)
}

pub(crate) fn opaque(r: u8, g: u8, b: u8) -> Srgba<f64> {
    let c: Srgb<f64> = Srgb::new(r, g, b).into_format();
    Srgba::new(c.red, c.green, c.blue, 1.0)
}
