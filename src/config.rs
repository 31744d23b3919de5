use std::path::Path;

use anyhow::Context as _;

use crate::{
    blob::ring::RingParams,
    foundation::{
        core::{Canvas, FULL_TURN_DEG, Point},
        error::{RevealError, RevealResult},
    },
};

/// Shape of the ring built for each surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    pub point_count: usize,
    pub angular_span_deg: f64,
    pub rotation_offset_deg: f64,
    /// Base radius as a fraction of the shorter surface side.
    pub radius_scale: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            point_count: 5,
            angular_span_deg: FULL_TURN_DEG,
            rotation_offset_deg: 0.0,
            radius_scale: 0.5,
        }
    }
}

impl RingConfig {
    pub fn params_for(&self, canvas: Canvas) -> RingParams {
        RingParams::for_canvas(canvas, self.radius_scale, self.point_count)
            .with_span(self.angular_span_deg)
            .with_rotation(self.rotation_offset_deg)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub ring: RingConfig,
    pub perturb_on_scroll: bool,
    pub show_helpers: bool,
    pub seed: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            ring: RingConfig::default(),
            perturb_on_scroll: true,
            show_helpers: false,
            seed: 1,
        }
    }
}

impl RevealConfig {
    pub fn from_json_str(s: &str) -> RevealResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> RevealResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Checks the ring shape against a unit surface, so problems surface before any canvas
    /// exists.
    pub fn validate(&self) -> RevealResult<()> {
        if !self.ring.radius_scale.is_finite() || self.ring.radius_scale <= 0.0 {
            return Err(RevealError::invalid_configuration(format!(
                "radius_scale must be positive, got {}",
                self.ring.radius_scale
            )));
        }
        RingParams::new(Point::ZERO, 1.0, self.ring.point_count)
            .with_span(self.ring.angular_span_deg)
            .with_rotation(self.ring.rotation_offset_deg)
            .validate()
    }
}
