use palette::{Srgb, Srgba};
use std::fmt;

const PALE_RGB: (f64, f64, f64) = (80.0, 140.0, 200.0);
const RGB_SPAN: (f64, f64, f64) = (50.0, 80.0, 80.0);
const BASE_ALPHA: f64 = 0.35;
const ALPHA_SPAN: f64 = 0.55;

/// Fill of one ring band: 8-bit channels with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandColor {
    pub rgb: Srgb<u8>,
    pub alpha: f64,
}

impl BandColor {
    /// `progress` 0 gives the pale, translucent end of the gradient and 1 the
    /// deep, nearly opaque end.
    pub fn interpolate(progress: f64) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            rgb: Srgb::new(
                channel(PALE_RGB.0 - RGB_SPAN.0 * p),
                channel(PALE_RGB.1 - RGB_SPAN.1 * p),
                channel(PALE_RGB.2 - RGB_SPAN.2 * p),
            ),
            alpha: (BASE_ALPHA + ALPHA_SPAN * p).clamp(0.0, 1.0),
        }
    }

    pub fn to_srgba(self) -> Srgba<f64> {
        let rgb: Srgb<f64> = self.rgb.into_format();
        Srgba::new(rgb.red, rgb.green, rgb.blue, self.alpha)
    }
}

impl fmt::Display for BandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.red, self.rgb.green, self.rgb.blue, self.alpha
        )
    }
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
