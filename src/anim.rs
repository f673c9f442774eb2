//! # Animation Primitives
//!
//! Geometry and timing helpers shared by the focus animator and the renderer.
//!
//! A [`Transition`] describes a pure position change from one [`Rect`] to
//! another over a fixed duration. It knows nothing about terminals: the
//! renderer samples it at the current elapsed time and snaps the result to
//! cells with [`Rect::to_cells`].

use std::time::Duration;

/// A rectangle in fractional terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect of the given size centered inside `container`.
    pub fn centered_in(container: Rect, width: f32, height: f32) -> Self {
        Self {
            x: container.x + (container.width - width) / 2.0,
            y: container.y + (container.height - height) / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Linear interpolation between `self` and `other`, `t` in `[0, 1]`.
    pub fn lerp(&self, other: &Rect, t: f32) -> Rect {
        let t = t.clamp(0.0, 1.0);
        Rect {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            width: self.width + (other.width - self.width) * t,
            height: self.height + (other.height - self.height) * t,
        }
    }

    /// Round to whole cells and clip to `bounds`. Parts outside `bounds`
    /// are cut off, so a rect hanging over the top edge loses its top rows.
    pub fn to_cells(&self, bounds: ratatui::layout::Rect) -> ratatui::layout::Rect {
        let left = self.x.round() as i32;
        let top = self.y.round() as i32;
        let x0 = left.max(i32::from(bounds.x));
        let y0 = top.max(i32::from(bounds.y));
        let x1 = (left + self.width.round() as i32).min(i32::from(bounds.right()));
        let y1 = (top + self.height.round() as i32).min(i32::from(bounds.bottom()));

        if x1 <= x0 || y1 <= y0 {
            return ratatui::layout::Rect::new(bounds.x, bounds.y, 0, 0);
        }
        ratatui::layout::Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
    }
}

impl From<ratatui::layout::Rect> for Rect {
    fn from(r: ratatui::layout::Rect) -> Self {
        Self::new(
            f32::from(r.x),
            f32::from(r.y),
            f32::from(r.width),
            f32::from(r.height),
        )
    }
}

/// CSS-style `ease` approximated with a cubic ease-in-out.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Fraction of `duration` covered by `elapsed`, clamped to `[0, 1]`.
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// A position transition from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Rect,
    pub to: Rect,
    pub duration: Duration,
}

impl Transition {
    pub fn new(from: Rect, to: Rect, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Where the moving rect is after `elapsed`.
    pub fn sample(&self, elapsed: Duration) -> Rect {
        self.from
            .lerp(&self.to, ease_in_out(progress(elapsed, self.duration)))
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_in() {
        let screen = Rect::new(0.0, 0.0, 100.0, 40.0);
        let r = Rect::centered_in(screen, 20.0, 10.0);
        assert_eq!(r, Rect::new(40.0, 15.0, 20.0, 10.0));
        assert_eq!(r.center(), screen.center());
    }

    #[test]
    fn test_transition_endpoints() {
        let from = Rect::new(0.0, 30.0, 20.0, 5.0);
        let to = Rect::new(40.0, 10.0, 20.0, 5.0);
        let t = Transition::new(from, to, Duration::from_millis(800));

        assert_eq!(t.sample(Duration::ZERO), from);
        assert_eq!(t.sample(Duration::from_millis(800)), to);
        assert_eq!(t.sample(Duration::from_secs(5)), to);
        assert!(!t.is_complete(Duration::from_millis(799)));
        assert!(t.is_complete(Duration::from_millis(800)));
    }

    #[test]
    fn test_transition_midpoint_is_between() {
        let from = Rect::new(0.0, 0.0, 10.0, 5.0);
        let to = Rect::new(100.0, 0.0, 10.0, 5.0);
        let t = Transition::new(from, to, Duration::from_millis(800));

        let mid = t.sample(Duration::from_millis(400));
        assert!((mid.x - 50.0).abs() < 0.01);
        assert_eq!(mid.width, 10.0);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_to_cells_clips_to_bounds() {
        let bounds = ratatui::layout::Rect::new(0, 0, 80, 24);
        let r = Rect::new(70.4, 20.6, 20.0, 10.0).to_cells(bounds);
        assert_eq!(r, ratatui::layout::Rect::new(70, 21, 10, 3));

        let above = Rect::new(2.0, -3.0, 10.0, 5.0).to_cells(bounds);
        assert_eq!(above, ratatui::layout::Rect::new(2, 0, 10, 2));

        let outside = Rect::new(90.0, 2.0, 5.0, 5.0).to_cells(bounds);
        assert_eq!(outside.area(), 0);
    }
}
