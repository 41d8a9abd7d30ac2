pub mod model;
pub mod view;

pub use model::{CubicBezier, Entrance, State};
pub use view::{DrawError, draw};

/// Monitor height at which the clock is drawn at its configured size.
pub const REFERENCE_HEIGHT: f64 = 1440.0;
/// The clock zooms in from this fraction of its size while fading in.
pub const ENTRANCE_SCALE_FROM: f64 = 0.9;
/// Slight overshoot so the zoom settles back to full size.
pub const ENTRANCE_EASING: CubicBezier = CubicBezier::new(0.34, 1.56, 0.64, 1.0);
