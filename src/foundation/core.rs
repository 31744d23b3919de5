use crate::foundation::error::{RevealError, RevealResult};

pub use kurbo::{BezPath, PathEl, Point};

/// One full turn, in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Monotonic tick counter advanced by the host driver.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TickIndex(pub u64);

impl TickIndex {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> RevealResult<Self> {
        if width == 0 || height == 0 {
            return Err(RevealError::invalid_configuration(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }

    /// Radius of the largest circle centered on the canvas, scaled by `scale`.
    pub fn inscribed_radius(self, scale: f64) -> f64 {
        f64::from(self.width.min(self.height)) * scale
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Surface size as the `u16` pair the CPU rasterizer accepts.
    pub fn as_u16(self) -> RevealResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| RevealError::render("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| RevealError::render("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Wraps a phase in degrees back into `[0, 360)`.
///
/// A single turn is added or removed first; larger excursions fall back to a euclidean remainder.
pub fn wrap_degrees(phase: f64) -> f64 {
    let mut p = phase;
    if p >= FULL_TURN_DEG {
        p -= FULL_TURN_DEG;
    } else if p < 0.0 {
        p += FULL_TURN_DEG;
    }
    if !(0.0..FULL_TURN_DEG).contains(&p) && p.is_finite() {
        p = p.rem_euclid(FULL_TURN_DEG);
        // rem_euclid of a tiny negative rounds up to exactly one turn.
        if p >= FULL_TURN_DEG {
            p = 0.0;
        }
    }
    p
}
