//! Polar layout engine for the heptagon week clock.
//!
//! [`RadialLayout`] turns `(sector, ring)` coordinates into points, closed
//! paths and label anchors. [`Scene::week_clock`] assembles those into an
//! ordered list of drawing primitives, which [`svg`] and [`paint`] turn into
//! markup or cairo calls.

mod macros;

pub mod color;
pub mod error;
pub mod layout;
pub mod paint;
pub mod path;
pub mod scene;
pub mod style;
pub mod svg;

pub use color::BandColor;
pub use error::{Axis, LayoutError};
pub use layout::{Bisector, LabelAnchor, LayoutConfig, Point, RadialLayout, Side};
pub use path::{FillRule, Path, PathCmd, Segment};
pub use scene::{ClockLabels, FontWeight, LabelText, Primitive, Scene, TextAlign, TextPlacement};
pub use style::Style;
