use super::model::State;
use cairo::Context;
use radial::{LayoutError, Style};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Draws the clock centered in a `width` x `height` area. The style's
/// background becomes a full-area backdrop; the clock itself is scaled to the
/// monitor and played through the entrance animation.
pub fn draw(
    cr: &Context,
    state: &mut State,
    style: &Style,
    width: f64,
    height: f64,
    now: Instant,
) -> Result<(), DrawError> {
    let opacity = state.entrance.opacity(now);
    if opacity <= 0.0 {
        return Ok(());
    }
    let zoom = state.entrance.scale(now) * state.scale_factor;

    if let Some(bg) = style.background {
        let (r, g, b, a) = bg.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.paint_with_alpha(opacity)?;
    }

    let scene = state.scene(&style.transparent())?;

    cr.save()?;
    cr.translate(width / 2.0, height / 2.0);
    cr.scale(zoom, zoom);
    cr.translate(-scene.size / 2.0, -scene.size / 2.0);

    cr.push_group();
    radial::paint::paint(cr, scene)?;
    cr.pop_group_to_source()?;
    cr.paint_with_alpha(opacity)?;

    cr.restore()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use cairo::{Format, ImageSurface};
    use std::time::Duration;

    fn render(state: &mut State, now: Instant) -> ImageSurface {
        let mut surface = ImageSurface::create(Format::ARgb32, 300, 200).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, state, &Style::default(), 300.0, 200.0, now).unwrap();
        }
        surface.flush();
        surface
    }

    fn alpha_at(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let i = y * stride + x * 4;
        u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]) >> 24
    }

    #[test]
    fn test_draws_backdrop_and_clock() {
        let mut state = State::new(Config::default());
        state.scale_factor = 0.25;
        let mut surface = render(&mut state, Instant::now());
        assert_eq!(alpha_at(&mut surface, 0, 0), 255);
        assert_eq!(alpha_at(&mut surface, 150, 100), 255);
    }

    #[test]
    fn test_nothing_drawn_before_entrance_starts() {
        let mut state = State::new(Config::default());
        let now = Instant::now();
        state.refresh(1440.0, now);
        assert!(state.entrance.is_running(now + Duration::from_millis(10)));
        let mut surface = render(&mut state, now);
        assert_eq!(alpha_at(&mut surface, 150, 100), 0);
    }
}
