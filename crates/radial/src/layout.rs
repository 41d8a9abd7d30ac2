use crate::color::BandColor;
use crate::error::LayoutError;
use crate::path::{Path, Segment};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Range, RangeInclusive};

pub const SECTOR_COUNT: usize = 7;
pub const RING_COUNT: usize = 13;
/// Upper bounds keep a scene to a few tens of thousands of primitives.
pub const MAX_SECTOR_COUNT: usize = 60;
pub const MAX_RING_COUNT: usize = 1440;
pub const START_OFFSET: f64 = -PI / 2.0; // sector 0 points up
pub const LABEL_NUDGE: f64 = 2.0; // outward from the ring line
pub const LABEL_OFFSET: f64 = 2.5; // perpendicular gap to the divider

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// The point `radius` away from `self` in direction `angle` (radians, y down).
    pub fn polar(self, radius: f64, angle: f64) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fixed by the week; only settable in code.
    #[serde(skip)]
    pub sector_count: usize,
    pub ring_count: usize,
    /// Edge length of the square canvas; the clock is centered in it.
    pub size: f64,
    pub inner_radius: f64,
    /// Outermost ring radius as a fraction of `size`.
    pub radius_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sector_count: SECTOR_COUNT,
            ring_count: RING_COUNT,
            size: 600.0,
            inner_radius: 38.0,
            radius_ratio: 0.44,
        }
    }
}

impl LayoutConfig {
    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }

    pub fn max_radius(&self) -> f64 {
        self.size * self.radius_ratio
    }

    pub fn ring_spacing(&self) -> f64 {
        (self.max_radius() - self.inner_radius) / self.ring_count as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn offset(self) -> f64 {
        match self {
            Self::Left => -LABEL_OFFSET,
            Self::Right => LABEL_OFFSET,
        }
    }
}

/// A point on the angular bisector of a sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisector {
    pub point: Point,
    /// Radians, in `(-π/2, 3π/2)`.
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub point: Point,
    /// Degrees, already corrected by 180 when `flipped`.
    pub rotation: f64,
    pub flipped: bool,
}

/// Polar-to-screen mapping for `sectors` angular divisions and `rings + 1`
/// concentric boundaries.
///
/// Every query is a pure function of the values passed to
/// [`RadialLayout::from_parts`]. Out-of-range indices are rejected with
/// [`LayoutError::InvalidIndex`], never wrapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLayout {
    sectors: usize,
    rings: usize,
    center: Point,
    inner_radius: f64,
    ring_spacing: f64,
}

impl RadialLayout {
    pub fn new(config: &LayoutConfig) -> Result<Self, LayoutError> {
        if !config.size.is_finite() || config.size <= 0.0 {
            return Err(LayoutError::InvalidConfig("size must be a positive number"));
        }
        if !config.radius_ratio.is_finite() || config.radius_ratio <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "radius_ratio must be a positive number",
            ));
        }
        Self::from_parts(
            config.sector_count,
            config.ring_count,
            config.center(),
            config.inner_radius,
            config.ring_spacing(),
        )
    }

    pub fn from_parts(
        sectors: usize,
        rings: usize,
        center: Point,
        inner_radius: f64,
        ring_spacing: f64,
    ) -> Result<Self, LayoutError> {
        if sectors < 3 {
            return Err(LayoutError::InvalidConfig("at least 3 sectors are required"));
        }
        if sectors > MAX_SECTOR_COUNT {
            return Err(LayoutError::InvalidConfig("at most 60 sectors are supported"));
        }
        if rings < 2 {
            return Err(LayoutError::InvalidConfig("at least 2 rings are required"));
        }
        if rings > MAX_RING_COUNT {
            return Err(LayoutError::InvalidConfig("at most 1440 rings are supported"));
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(LayoutError::InvalidConfig("center must be finite"));
        }
        if !inner_radius.is_finite() || inner_radius < 0.0 {
            return Err(LayoutError::InvalidConfig(
                "inner_radius must be a non-negative number",
            ));
        }
        if !ring_spacing.is_finite() || ring_spacing <= 0.0 {
            return Err(LayoutError::InvalidConfig(
                "outer radius must be larger than inner_radius",
            ));
        }

        Ok(Self {
            sectors,
            rings,
            center,
            inner_radius,
            ring_spacing,
        })
    }

    pub fn sector_count(&self) -> usize {
        self.sectors
    }

    pub fn ring_count(&self) -> usize {
        self.rings
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn ring_spacing(&self) -> f64 {
        self.ring_spacing
    }

    pub fn sectors(&self) -> Range<usize> {
        0..self.sectors
    }

    pub fn bands(&self) -> Range<usize> {
        0..self.rings
    }

    pub fn boundary_rings(&self) -> RangeInclusive<usize> {
        0..=self.rings
    }

    fn check_sector(&self, sector: usize) -> Result<(), LayoutError> {
        if sector < self.sectors {
            Ok(())
        } else {
            Err(LayoutError::sector(sector, self.sectors))
        }
    }

    fn check_band(&self, band: usize) -> Result<(), LayoutError> {
        if band < self.rings {
            Ok(())
        } else {
            Err(LayoutError::band(band, self.rings))
        }
    }

    /// Boundary angle of `sector`. `sector == sectors` is allowed and lands a
    /// full turn past sector 0, which keeps bisectors monotonic.
    fn boundary_angle(&self, sector: usize) -> f64 {
        (sector as f64 * 2.0 * PI / self.sectors as f64) + START_OFFSET
    }

    fn bisector_angle(&self, sector: usize) -> f64 {
        (self.boundary_angle(sector) + self.boundary_angle(sector + 1)) / 2.0
    }

    fn vertex(&self, sector: usize, radius: f64) -> Point {
        self.center.polar(radius, self.boundary_angle(sector))
    }

    pub fn sector_angle(&self, sector: usize) -> Result<f64, LayoutError> {
        self.check_sector(sector)?;
        Ok(self.boundary_angle(sector))
    }

    /// Radius of (possibly fractional) ring `ring`. Rings past `ring_count`
    /// are allowed; negative or non-finite ones are not.
    pub fn radius(&self, ring: f64) -> Result<f64, LayoutError> {
        if !ring.is_finite() || ring < 0.0 {
            return Err(LayoutError::ring(ring, self.rings));
        }
        Ok(self.inner_radius + ring * self.ring_spacing)
    }

    pub fn point_at(&self, sector: usize, ring: f64) -> Result<Point, LayoutError> {
        self.check_sector(sector)?;
        Ok(self.vertex(sector, self.radius(ring)?))
    }

    pub fn sector_midpoint(&self, sector: usize, ring: f64) -> Result<Bisector, LayoutError> {
        self.check_sector(sector)?;
        let radius = self.radius(ring)?;
        let angle = self.bisector_angle(sector);
        Ok(Bisector {
            point: self.center.polar(radius, angle),
            angle,
        })
    }

    pub fn polygon_path(&self, ring: f64) -> Result<Path, LayoutError> {
        let radius = self.radius(ring)?;
        Ok(Path::new().polygon(self.sectors().map(|i| self.vertex(i, radius))))
    }

    /// Outline of the band between rings `band` and `band + 1`.
    ///
    /// The inner polygon runs backwards, so the hole survives both even-odd
    /// and nonzero filling.
    pub fn band_path(&self, band: usize) -> Result<Path, LayoutError> {
        self.check_band(band)?;
        let outer = self.radius((band + 1) as f64)?;
        let inner = self.radius(band as f64)?;

        Ok(Path::new()
            .polygon(self.sectors().map(|i| self.vertex(i, outer)))
            .polygon(self.sectors().rev().map(|i| self.vertex(i, inner))))
    }

    /// Band 0 (innermost) is the deep end of the gradient, band `rings - 1`
    /// the pale end.
    pub fn band_color(&self, band: usize) -> Result<BandColor, LayoutError> {
        self.check_band(band)?;
        let progress = 1.0 - band as f64 / (self.rings - 1) as f64;
        Ok(BandColor::interpolate(progress))
    }

    pub fn spoke(&self, sector: usize) -> Result<Segment, LayoutError> {
        Ok(Segment::new(
            self.point_at(sector, 0.0)?,
            self.point_at(sector, self.rings as f64)?,
        ))
    }

    /// Bisector line of `sector` from ring 0 out to `outer_ring`.
    pub fn divider(&self, sector: usize, outer_ring: f64) -> Result<Segment, LayoutError> {
        Ok(Segment::new(
            self.sector_midpoint(sector, 0.0)?.point,
            self.sector_midpoint(sector, outer_ring)?.point,
        ))
    }

    /// Anchor for a label hugging the divider of `sector`, just outside ring
    /// `ring`, on the given side of the divider.
    ///
    /// Labels in the lower half are turned by 180 degrees to stay upright. The
    /// offset is mirrored with them so `Left` stays on the reader's left.
    pub fn label_anchor(
        &self,
        sector: usize,
        ring: f64,
        side: Side,
    ) -> Result<LabelAnchor, LayoutError> {
        self.check_sector(sector)?;
        let radius = self.radius(ring)? + LABEL_NUDGE;
        let angle = self.bisector_angle(sector);
        let base = self.center.polar(radius, angle);

        let rotation = upright_rotation(angle);
        let flipped = is_upside_down(rotation);
        let offset = if flipped { -side.offset() } else { side.offset() };

        Ok(LabelAnchor {
            point: base.polar(offset, angle + PI / 2.0),
            rotation: if flipped { rotation + 180.0 } else { rotation },
            flipped,
        })
    }

    /// Anchor on the bisector of `sector`, `distance` beyond ring `ring`.
    pub fn outward_anchor(
        &self,
        sector: usize,
        ring: f64,
        distance: f64,
    ) -> Result<LabelAnchor, LayoutError> {
        let mid = self.sector_midpoint(sector, ring)?;
        let rotation = upright_rotation(mid.angle);
        let flipped = is_upside_down(rotation);

        Ok(LabelAnchor {
            point: mid.point.polar(distance, mid.angle),
            rotation: if flipped { rotation + 180.0 } else { rotation },
            flipped,
        })
    }
}

fn upright_rotation(angle: f64) -> f64 {
    angle.to_degrees() + 90.0
}

fn is_upside_down(rotation: f64) -> bool {
    rotation > 90.0 && rotation < 270.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;

    const EPS: f64 = 1e-9;

    fn layout() -> RadialLayout {
        RadialLayout::new(&LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_default_config_matches_week_clock() {
        let l = layout();
        assert_eq!(l.sector_count(), 7);
        assert_eq!(l.ring_count(), 13);
        assert_eq!(l.center(), Point::new(300.0, 300.0));
        assert!((l.ring_spacing() - (264.0 - 38.0) / 13.0).abs() < EPS);
    }

    #[test]
    fn test_polygon_vertices_sit_on_ring() {
        let l = layout();
        for ring in [0.0, 0.5, 3.0, 12.25, 13.0] {
            let path = l.polygon_path(ring).unwrap();
            let subpaths = path.subpaths();
            assert_eq!(subpaths.len(), 1);
            assert_eq!(subpaths[0].len(), 7);

            let expected = l.inner_radius() + ring * l.ring_spacing();
            for p in &subpaths[0] {
                assert!((p.distance(l.center()) - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_sector_zero_points_up() {
        let l = layout();
        for ring in [0.5, 1.0, 6.0, 13.0] {
            let p = l.point_at(0, ring).unwrap();
            assert!((p.x - l.center().x).abs() < EPS);
            assert!(p.y < l.center().y);
        }
    }

    #[test]
    fn test_sectors_proceed_clockwise() {
        let l = layout();
        // y grows downwards, so clockwise from the top means rightwards first
        assert!(l.point_at(1, 5.0).unwrap().x > l.center().x);
        assert!(l.point_at(6, 5.0).unwrap().x < l.center().x);
    }

    #[test]
    fn test_band_path_is_outer_forward_inner_reversed() {
        let l = layout();
        for band in l.bands() {
            let band_paths = l.band_path(band).unwrap().subpaths();
            let outer = l.polygon_path((band + 1) as f64).unwrap().subpaths();
            let mut inner = l.polygon_path(band as f64).unwrap().subpaths();
            inner[0].reverse();

            assert_eq!(band_paths.len(), 2);
            assert_eq!(band_paths[0], outer[0]);
            assert_eq!(band_paths[1], inner[0]);
        }
    }

    #[test]
    fn test_band_colors() {
        let l = layout();

        let innermost = l.band_color(0).unwrap();
        assert_eq!(
            (innermost.rgb.red, innermost.rgb.green, innermost.rgb.blue),
            (30, 60, 120)
        );
        assert!((innermost.alpha - 0.90).abs() < EPS);

        let outermost = l.band_color(12).unwrap();
        assert_eq!(
            (outermost.rgb.red, outermost.rgb.green, outermost.rgb.blue),
            (80, 140, 200)
        );
        assert!((outermost.alpha - 0.35).abs() < EPS);

        // alpha falls off monotonically towards the rim
        let alphas: Vec<f64> = l.bands().map(|b| l.band_color(b).unwrap().alpha).collect();
        assert!(alphas.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_bisector_lies_between_boundaries() {
        let l = layout();
        let mid = l.sector_midpoint(3, 4.0).unwrap();
        // sector 3 of 7 straddles straight down
        assert!((mid.angle - PI / 2.0).abs() < EPS);
        assert!((mid.point.x - l.center().x).abs() < EPS);
        assert!(mid.point.y > l.center().y);

        let last = l.sector_midpoint(6, 0.0).unwrap();
        assert!(last.angle > l.sector_angle(6).unwrap());
        assert!(last.angle < 3.0 * PI / 2.0);
    }

    #[test]
    fn test_label_sides_are_five_units_apart() {
        let l = layout();
        for sector in l.sectors() {
            for ring in l.bands() {
                let ring = ring as f64;
                let left = l.label_anchor(sector, ring, Side::Left).unwrap();
                let right = l.label_anchor(sector, ring, Side::Right).unwrap();
                let angle = l.sector_midpoint(sector, ring).unwrap().angle;

                assert!((left.point.distance(right.point) - 5.0).abs() < EPS);

                // separation is perpendicular to the bisector
                let (dx, dy) = (right.point.x - left.point.x, right.point.y - left.point.y);
                assert!((dx * angle.cos() + dy * angle.sin()).abs() < EPS);

                // both straddle the nudged bisector point symmetrically
                let base = l.center().polar(l.radius(ring).unwrap() + LABEL_NUDGE, angle);
                assert!((left.point.distance(base) - 2.5).abs() < EPS);
                assert!((right.point.distance(base) - 2.5).abs() < EPS);
                assert_eq!(left.rotation, right.rotation);
                assert_eq!(left.flipped, right.flipped);
            }
        }
    }

    #[test]
    fn test_lower_half_labels_are_flipped() {
        let l = layout();
        let flipped: Vec<usize> = l
            .sectors()
            .filter(|&s| l.label_anchor(s, 2.0, Side::Left).unwrap().flipped)
            .collect();
        assert_eq!(flipped, vec![2, 3, 4]);

        for sector in l.sectors() {
            let anchor = l.label_anchor(sector, 2.0, Side::Right).unwrap();
            let unflipped = l.sector_midpoint(sector, 2.0).unwrap().angle.to_degrees() + 90.0;
            assert_eq!(anchor.flipped, unflipped > 90.0 && unflipped < 270.0);
            if anchor.flipped {
                let expected = (unflipped + 180.0).rem_euclid(360.0);
                assert!((anchor.rotation.rem_euclid(360.0) - expected).abs() < EPS);
            } else {
                assert_eq!(anchor.rotation, unflipped);
            }
        }
    }

    #[test]
    fn test_flipped_offset_keeps_reading_order() {
        let l = layout();
        let cx = l.center().x;

        // bottom sector: rendered upright after the flip, left stays left
        let left = l.label_anchor(3, 0.0, Side::Left).unwrap();
        let right = l.label_anchor(3, 0.0, Side::Right).unwrap();
        assert!((left.point.x - (cx - 2.5)).abs() < EPS);
        assert!((right.point.x - (cx + 2.5)).abs() < EPS);
    }

    #[test]
    fn test_outward_anchor_pushes_along_bisector() {
        let l = layout();
        let anchor = l.outward_anchor(0, 12.0, 2.5).unwrap();
        let mid = l.sector_midpoint(0, 12.0).unwrap();
        let expected = mid.point.distance(l.center()) + 2.5;
        assert!((anchor.point.distance(l.center()) - expected).abs() < EPS);
        assert!(!anchor.flipped);

        let bottom = l.outward_anchor(3, 12.0, 2.5).unwrap();
        assert!(bottom.flipped);
        assert!((bottom.rotation - 360.0).abs() < EPS);
    }

    #[test]
    fn test_spokes_and_dividers() {
        let l = layout();
        let spoke = l.spoke(2).unwrap();
        assert!((spoke.length() - 13.0 * l.ring_spacing()).abs() < EPS);

        let divider = l.divider(2, 11.0).unwrap();
        assert!((divider.length() - 11.0 * l.ring_spacing()).abs() < EPS);
        assert_eq!(divider.from, l.sector_midpoint(2, 0.0).unwrap().point);
    }

    #[test]
    fn test_ring_boundaries() {
        let l = layout();
        assert_eq!(l.radius(0.0).unwrap(), l.inner_radius());
        assert!((l.radius(13.0).unwrap() - 264.0).abs() < EPS);
        assert_eq!(l.boundary_rings().count(), 14);
        assert_eq!(l.bands().count(), 13);
    }

    #[test]
    fn test_queries_are_reproducible() {
        let a = layout();
        let b = layout();
        assert_eq!(a.band_path(5).unwrap(), b.band_path(5).unwrap());
        assert_eq!(
            a.label_anchor(4, 7.0, Side::Left).unwrap(),
            b.label_anchor(4, 7.0, Side::Left).unwrap()
        );
        assert_eq!(a.point_at(6, 2.5).unwrap(), a.point_at(6, 2.5).unwrap());
    }

    #[test]
    fn test_invalid_indices_are_rejected() {
        let l = layout();
        assert!(matches!(
            l.point_at(7, 0.0),
            Err(LayoutError::InvalidIndex { axis: Axis::Sector, limit: 7, .. })
        ));
        assert!(matches!(
            l.point_at(0, -0.5),
            Err(LayoutError::InvalidIndex { axis: Axis::Ring, .. })
        ));
        assert!(l.polygon_path(f64::NAN).is_err());
        assert!(matches!(
            l.band_path(13),
            Err(LayoutError::InvalidIndex { axis: Axis::Band, limit: 13, .. })
        ));
        assert!(l.band_color(13).is_err());
        assert!(l.label_anchor(9, 1.0, Side::Right).is_err());
        // past the outer ring is still a valid query
        assert!(l.point_at(0, 20.0).is_ok());
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let base = LayoutConfig::default();
        let cases = [
            LayoutConfig { ring_count: 1, ..base },
            LayoutConfig { sector_count: 2, ..base },
            LayoutConfig { sector_count: MAX_SECTOR_COUNT + 1, ..base },
            LayoutConfig { ring_count: MAX_RING_COUNT + 1, ..base },
            LayoutConfig { ring_count: usize::MAX, ..base },
            LayoutConfig { size: 0.0, ..base },
            LayoutConfig { size: f64::INFINITY, ..base },
            LayoutConfig { inner_radius: 300.0, ..base },
            LayoutConfig { inner_radius: -1.0, ..base },
            LayoutConfig { radius_ratio: 0.0, ..base },
        ];
        for config in cases {
            assert!(
                matches!(RadialLayout::new(&config), Err(LayoutError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_ring_count_limit_is_inclusive() {
        let config = LayoutConfig {
            ring_count: MAX_RING_COUNT,
            ..LayoutConfig::default()
        };
        let layout = RadialLayout::new(&config).unwrap();
        assert_eq!(layout.bands().len(), MAX_RING_COUNT);
    }
}
