use crate::error::LayoutError;
use crate::layout::{LayoutConfig, Point, RadialLayout, Side};
use crate::path::{FillRule, Path, Segment};
use crate::style::Style;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;

/// Half-day dividers stop this many rings short of the rim.
pub const DIVIDER_INSET: usize = 2;
/// Gap between the last full ring and the day names.
pub const DAY_LABEL_GAP: f64 = 2.5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct LabelText(String);

crate::impl_string_newtype!(LabelText);

impl From<&str> for LabelText {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Middle,
    End,
}

impl TextAlign {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    SemiBold,
}

impl FontWeight {
    pub fn as_svg(&self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::SemiBold => 600,
        }
    }
}

/// Text drawn rotated by `rotation` degrees about `anchor`, vertically
/// centered on it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub anchor: Point,
    pub align: TextAlign,
    pub rotation: f64,
    pub text: LabelText,
    pub font_size: f64,
    pub weight: FontWeight,
    pub color: Srgba<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Fill {
        path: Path,
        color: Srgba<f64>,
        rule: FillRule,
    },
    Stroke {
        path: Path,
        color: Srgba<f64>,
        width: f64,
    },
    Line {
        segment: Segment,
        color: Srgba<f64>,
        width: f64,
    },
    /// Fill with a radial gradient from `inner` at `center` to `outer` at `radius`.
    RadialFill {
        path: Path,
        center: Point,
        radius: f64,
        inner: Srgba<f64>,
        outer: Srgba<f64>,
    },
    Text(TextPlacement),
    Clip {
        path: Path,
        children: Vec<Primitive>,
    },
}

/// Day names, one per sector, in sector order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockLabels {
    pub days: Vec<LabelText>,
}

impl Default for ClockLabels {
    fn default() -> Self {
        Self::new(
            [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .map(LabelText::from),
        )
    }
}

impl ClockLabels {
    pub fn new(days: impl IntoIterator<Item = LabelText>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn hour(hour: usize) -> LabelText {
        LabelText::new(format!("{:02}:00", hour % 24))
    }
}

/// Everything needed to draw one frame, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: f64,
    pub background: Option<Srgba<f64>>,
    pub font_family: &'static str,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn week_clock(
        config: &LayoutConfig,
        labels: &ClockLabels,
        style: &Style,
    ) -> Result<Self, LayoutError> {
        let layout = RadialLayout::new(config)?;
        if labels.days.len() != layout.sector_count() {
            return Err(LayoutError::LabelCount {
                expected: layout.sector_count(),
                actual: labels.days.len(),
            });
        }

        let mut primitives = Vec::new();
        primitives.extend(bands(&layout)?);
        primitives.extend(ring_lines(&layout, style)?);
        primitives.extend(spokes(&layout, style)?);
        primitives.extend(dividers(&layout, style)?);
        primitives.push(Primitive::Clip {
            path: layout.polygon_path(layout.ring_count() as f64)?,
            children: hour_labels(&layout, style)?,
        });
        primitives.extend(day_labels(&layout, labels, style)?);
        primitives.extend(center(&layout, style)?);

        log::debug!(
            "Built week clock: {} sectors, {} rings, {} primitives",
            layout.sector_count(),
            layout.ring_count(),
            primitives.len()
        );

        Ok(Self {
            size: config.size,
            background: style.background,
            font_family: style.font_family,
            primitives,
        })
    }

    /// All text placements, including the ones nested in clip groups.
    pub fn texts(&self) -> Vec<&TextPlacement> {
        fn collect<'a>(primitives: &'a [Primitive], out: &mut Vec<&'a TextPlacement>) {
            for p in primitives {
                match p {
                    Primitive::Text(t) => out.push(t),
                    Primitive::Clip { children, .. } => collect(children, out),
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.primitives, &mut out);
        out
    }
}

// outermost band first so inner bands paint over the seams
fn bands(layout: &RadialLayout) -> Result<Vec<Primitive>, LayoutError> {
    layout
        .bands()
        .rev()
        .map(|band| {
            Ok(Primitive::Fill {
                path: layout.band_path(band)?,
                color: layout.band_color(band)?.to_srgba(),
                rule: FillRule::EvenOdd,
            })
        })
        .collect()
}

fn ring_lines(layout: &RadialLayout, style: &Style) -> Result<Vec<Primitive>, LayoutError> {
    layout
        .boundary_rings()
        .map(|ring| {
            Ok(Primitive::Stroke {
                path: layout.polygon_path(ring as f64)?,
                color: style.grid_line,
                width: style.grid_line_width,
            })
        })
        .collect()
}

fn spokes(layout: &RadialLayout, style: &Style) -> Result<Vec<Primitive>, LayoutError> {
    layout
        .sectors()
        .map(|sector| {
            Ok(Primitive::Line {
                segment: layout.spoke(sector)?,
                color: style.grid_line,
                width: style.grid_line_width,
            })
        })
        .collect()
}

fn dividers(layout: &RadialLayout, style: &Style) -> Result<Vec<Primitive>, LayoutError> {
    let outer = layout.ring_count().saturating_sub(DIVIDER_INSET) as f64;
    layout
        .sectors()
        .map(|sector| {
            Ok(Primitive::Line {
                segment: layout.divider(sector, outer)?,
                color: style.divider,
                width: style.divider_width,
            })
        })
        .collect()
}

/// Left of each divider the hours count down from 23 at the hub, right of it
/// they count up from 00.
fn hour_labels(layout: &RadialLayout, style: &Style) -> Result<Vec<Primitive>, LayoutError> {
    let mut out = Vec::with_capacity(2 * layout.sector_count() * layout.ring_count());

    for (side, align) in [(Side::Left, TextAlign::End), (Side::Right, TextAlign::Start)] {
        for sector in layout.sectors() {
            for ring in layout.bands() {
                let anchor = layout.label_anchor(sector, ring as f64, side)?;
                let hour = match side {
                    Side::Left => 23 - ring % 24,
                    Side::Right => ring % 24,
                };
                out.push(Primitive::Text(TextPlacement {
                    anchor: anchor.point,
                    align,
                    rotation: anchor.rotation,
                    text: ClockLabels::hour(hour),
                    font_size: style.hour_font_size,
                    weight: FontWeight::Normal,
                    color: style.hour_text,
                }));
            }
        }
    }
    Ok(out)
}

fn day_labels(
    layout: &RadialLayout,
    labels: &ClockLabels,
    style: &Style,
) -> Result<Vec<Primitive>, LayoutError> {
    let ring = (layout.ring_count() - 1) as f64;
    layout
        .sectors()
        .zip(&labels.days)
        .map(|(sector, day)| {
            let anchor = layout.outward_anchor(sector, ring, DAY_LABEL_GAP)?;
            Ok(Primitive::Text(TextPlacement {
                anchor: anchor.point,
                align: TextAlign::Middle,
                rotation: anchor.rotation,
                text: day.clone(),
                font_size: style.day_font_size,
                weight: FontWeight::SemiBold,
                color: style.day_text,
            }))
        })
        .collect()
}

fn center(layout: &RadialLayout, style: &Style) -> Result<[Primitive; 2], LayoutError> {
    let hub = layout.polygon_path(0.0)?;
    Ok([
        Primitive::RadialFill {
            path: hub.clone(),
            center: layout.center(),
            radius: layout.inner_radius(),
            inner: style.center_inner,
            outer: style.center_outer,
        },
        Primitive::Stroke {
            path: hub,
            color: style.center_stroke,
            width: style.center_stroke_width,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::week_clock(
            &LayoutConfig::default(),
            &ClockLabels::default(),
            &Style::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_draw_order() {
        let scene = scene();
        // 13 bands, 14 ring lines, 7 spokes, 7 dividers, 1 clip, 7 days, hub fill + stroke
        assert_eq!(scene.primitives.len(), 13 + 14 + 7 + 7 + 1 + 7 + 2);
        assert_eq!(scene.size, 600.0);

        let layout = RadialLayout::new(&LayoutConfig::default()).unwrap();
        match &scene.primitives[0] {
            Primitive::Fill { path, color, rule } => {
                assert_eq!(*rule, FillRule::EvenOdd);
                assert_eq!(*path, layout.band_path(12).unwrap());
                assert_eq!(*color, layout.band_color(12).unwrap().to_srgba());
            }
            other => panic!("expected the outermost band first, got {other:?}"),
        }
        assert!(matches!(scene.primitives[13], Primitive::Stroke { .. }));
        assert!(matches!(scene.primitives[27], Primitive::Line { .. }));
        assert!(matches!(scene.primitives[41], Primitive::Clip { .. }));
        assert!(matches!(
            scene.primitives.last(),
            Some(Primitive::Stroke { .. })
        ));
        assert!(matches!(
            scene.primitives[scene.primitives.len() - 2],
            Primitive::RadialFill { .. }
        ));
    }

    #[test]
    fn test_hour_labels() {
        let scene = scene();
        let Primitive::Clip { path, children } = &scene.primitives[41] else {
            panic!("hour labels should be clipped");
        };
        assert_eq!(path.subpaths()[0].len(), 7);
        assert_eq!(children.len(), 2 * 7 * 13);

        let texts: Vec<&TextPlacement> = children
            .iter()
            .filter_map(|p| match p {
                Primitive::Text(t) => Some(t),
                _ => None,
            })
            .collect();

        // left side first: sector 0, rings 0..13
        assert_eq!(texts[0].text.as_str(), "23:00");
        assert_eq!(texts[0].align, TextAlign::End);
        assert_eq!(texts[12].text.as_str(), "11:00");

        let right = &texts[7 * 13..];
        assert_eq!(right[0].text.as_str(), "00:00");
        assert_eq!(right[0].align, TextAlign::Start);
        assert_eq!(right[12].text.as_str(), "12:00");
    }

    #[test]
    fn test_day_labels() {
        let scene = scene();
        let days: Vec<&TextPlacement> = scene
            .texts()
            .into_iter()
            .filter(|t| t.weight == FontWeight::SemiBold)
            .collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].text.as_str(), "Sunday");
        assert_eq!(days[6].text.as_str(), "Saturday");
        assert!(days.iter().all(|d| d.align == TextAlign::Middle));
        // none of them reads upside down
        for d in days {
            let r = d.rotation.rem_euclid(360.0);
            assert!(!(r > 90.0 && r < 270.0), "{} rotated {}", d.text, r);
        }
    }

    #[test]
    fn test_label_count_must_match_sectors() {
        let labels = ClockLabels::new(["Mon", "Tue"].map(LabelText::from));
        let err = Scene::week_clock(&LayoutConfig::default(), &labels, &Style::default())
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::LabelCount {
                expected: 7,
                actual: 2
            }
        );
    }

    #[test]
    fn test_full_day_of_rings() {
        let config = LayoutConfig {
            ring_count: 24,
            ..LayoutConfig::default()
        };
        let scene = Scene::week_clock(&config, &ClockLabels::default(), &Style::default()).unwrap();
        let texts = scene.texts();
        assert_eq!(texts.len(), 2 * 7 * 24 + 7);
        assert_eq!(texts[23].text.as_str(), "00:00");
        assert_eq!(texts[7 * 24 + 23].text.as_str(), "23:00");
    }

    #[test]
    fn test_transparent_style_drops_background() {
        let scene = Scene::week_clock(
            &LayoutConfig::default(),
            &ClockLabels::default(),
            &Style::default().transparent(),
        )
        .unwrap();
        assert_eq!(scene.background, None);
    }

    #[test]
    fn test_invalid_config_propagates() {
        let config = LayoutConfig {
            ring_count: 0,
            ..LayoutConfig::default()
        };
        assert!(Scene::week_clock(&config, &ClockLabels::default(), &Style::default()).is_err());
    }
}
