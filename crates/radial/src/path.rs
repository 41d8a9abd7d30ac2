use crate::layout::Point;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub fn as_svg(&self) -> &'static str {
        match self {
            Self::NonZero => "nonzero",
            Self::EvenOdd => "evenodd",
        }
    }
}

/// A sequence of straight-edged sub-paths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    cmds: Vec<PathCmd>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a closed sub-path through `points`, in the given order.
    pub fn polygon(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        let mut points = points.into_iter();
        if let Some(first) = points.next() {
            self.cmds.push(PathCmd::MoveTo(first));
            self.cmds.extend(points.map(PathCmd::LineTo));
            self.cmds.push(PathCmd::Close);
        }
        self
    }

    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Vertices of every sub-path, in traversal order.
    pub fn subpaths(&self) -> Vec<Vec<Point>> {
        let mut out: Vec<Vec<Point>> = Vec::new();
        for cmd in &self.cmds {
            match *cmd {
                PathCmd::MoveTo(p) => out.push(vec![p]),
                PathCmd::LineTo(p) => match out.last_mut() {
                    Some(current) => current.push(p),
                    None => out.push(vec![p]),
                },
                PathCmd::Close => {}
            }
        }
        out
    }

    /// SVG `d` attribute, e.g. `M300 262L329.7 268.8Z`.
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        for cmd in &self.cmds {
            match cmd {
                PathCmd::MoveTo(p) => {
                    let _ = write!(d, "M{} {}", fmt_coord(p.x), fmt_coord(p.y));
                }
                PathCmd::LineTo(p) => {
                    let _ = write!(d, "L{} {}", fmt_coord(p.x), fmt_coord(p.y));
                }
                PathCmd::Close => d.push('Z'),
            }
        }
        d
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/// Three decimals is well below a device pixel; trailing zeros are trimmed.
pub(crate) fn fmt_coord(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}
