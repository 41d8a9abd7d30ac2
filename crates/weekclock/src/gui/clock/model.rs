use super::{ENTRANCE_EASING, ENTRANCE_SCALE_FROM, REFERENCE_HEIGHT};
use crate::config::Config;
use radial::{ClockLabels, LayoutError, Scene, Style};
use std::time::{Duration, Instant};

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

const EPSILON: f64 = 1e-7;

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Eased value for progress `x` in `[0, 1]`. May leave `[0, 1]` when the
    /// control points overshoot.
    pub fn apply(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        // Newton first, bisection when the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err.abs() < EPSILON {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while hi - lo > EPSILON {
            let v = Self::sample(self.x1, self.x2, t);
            if (v - x).abs() < EPSILON {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

/// Fade and zoom played each time the overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    started: Instant,
    duration: Duration,
}

impl Entrance {
    pub fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    /// An entrance that has already played out.
    pub fn finished() -> Self {
        Self::new(Instant::now(), Duration::ZERO)
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        ENTRANCE_EASING.apply(self.progress(now)).clamp(0.0, 1.0)
    }

    pub fn scale(&self, now: Instant) -> f64 {
        let eased = ENTRANCE_EASING.apply(self.progress(now));
        ENTRANCE_SCALE_FROM + (1.0 - ENTRANCE_SCALE_FROM) * eased
    }
}

pub struct State {
    pub config: Config,
    pub labels: ClockLabels,
    pub scale_factor: f64,
    pub entrance: Entrance,
    scene: Option<(Style, Scene)>,
}

impl State {
    /// Falls back to the default config when `config` cannot produce a clock.
    pub fn new(config: Config) -> Self {
        let config = match Self::validate(&config) {
            Ok(()) => config,
            Err(e) => {
                log::error!("Invalid clock config, using defaults: {}", e);
                Config::default()
            }
        };
        Self {
            labels: config.clock_labels(),
            config,
            scale_factor: 1.0,
            entrance: Entrance::finished(),
            scene: None,
        }
    }

    fn validate(config: &Config) -> Result<(), LayoutError> {
        Scene::week_clock(&config.layout, &config.clock_labels(), &Style::default()).map(|_| ())
    }

    /// Swaps in `config` if it produces a valid clock. On error the current
    /// clock stays untouched.
    pub fn reload(&mut self, config: Config) -> Result<(), LayoutError> {
        Self::validate(&config)?;
        self.labels = config.clock_labels();
        self.config = config;
        self.scene = None;
        Ok(())
    }

    /// Rescales for the monitor about to show the clock and restarts the entrance.
    pub fn refresh(&mut self, monitor_height: f64, now: Instant) {
        self.scale_factor = if monitor_height > 0.0 {
            monitor_height / REFERENCE_HEIGHT
        } else {
            1.0
        };
        self.entrance = Entrance::new(now, self.config.animation.duration());
    }

    /// The scene for `style`, rebuilt only when the style or config changed.
    pub fn scene(&mut self, style: &Style) -> Result<&Scene, LayoutError> {
        let entry = match self.scene.take() {
            Some((cached, scene)) if cached == *style => (cached, scene),
            _ => (
                *style,
                Scene::week_clock(&self.config.layout, &self.labels, style)?,
            ),
        };
        Ok(&self.scene.insert(entry).1)
    }
}
