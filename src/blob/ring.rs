use crate::{
    blob::{
        curve::midpoint_quad_path,
        oscillator::{Character, Oscillator},
    },
    foundation::{
        core::{BezPath, Canvas, FULL_TURN_DEG, Point},
        error::{RevealError, RevealResult},
        rng::UnitSource,
    },
};

/// Fewest points that still describe a closed curve.
pub const MIN_POINTS: usize = 3;

/// Geometry a ring is built from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingParams {
    pub center: Point,
    pub base_radius: f64,
    pub point_count: usize,
    pub angular_span_deg: f64,
    pub rotation_offset_deg: f64,
}

impl RingParams {
    /// Full-turn ring of `point_count` points.
    pub fn new(center: Point, base_radius: f64, point_count: usize) -> Self {
        Self {
            center,
            base_radius,
            point_count,
            angular_span_deg: FULL_TURN_DEG,
            rotation_offset_deg: 0.0,
        }
    }

    /// Ring centered on `canvas` with radius `min(w, h) * radius_scale`.
    pub fn for_canvas(canvas: Canvas, radius_scale: f64, point_count: usize) -> Self {
        Self::new(
            canvas.center(),
            canvas.inscribed_radius(radius_scale),
            point_count,
        )
    }

    pub fn with_span(mut self, angular_span_deg: f64) -> Self {
        self.angular_span_deg = angular_span_deg;
        self
    }

    pub fn with_rotation(mut self, rotation_offset_deg: f64) -> Self {
        self.rotation_offset_deg = rotation_offset_deg;
        self
    }

    pub fn validate(&self) -> RevealResult<()> {
        if self.point_count < MIN_POINTS {
            return Err(RevealError::invalid_configuration(format!(
                "ring needs at least {MIN_POINTS} points, got {}",
                self.point_count
            )));
        }
        if !self.base_radius.is_finite() || self.base_radius <= 0.0 {
            return Err(RevealError::invalid_configuration(format!(
                "ring radius must be positive, got {}",
                self.base_radius
            )));
        }
        if !self.center.is_finite() {
            return Err(RevealError::invalid_configuration(
                "ring center must be finite",
            ));
        }
        if !self.angular_span_deg.is_finite() || !self.rotation_offset_deg.is_finite() {
            return Err(RevealError::invalid_configuration(
                "ring angles must be finite",
            ));
        }
        Ok(())
    }

    /// Angular slot of point `index`, in degrees.
    ///
    /// The step is floored to whole degrees, so spans that do not divide evenly leave a gap
    /// before the first point.
    pub fn slot_deg(&self, index: usize) -> f64 {
        let step = (self.angular_span_deg / self.point_count as f64).floor();
        step * index as f64 + self.rotation_offset_deg
    }
}

/// An ordered ring of oscillating points forming one blob.
#[derive(Clone, Debug)]
pub struct BlobRing {
    params: RingParams,
    points: Vec<Oscillator>,
}

impl BlobRing {
    /// Builds a ring, sampling every point's character from `rng` in ring order.
    pub fn new(params: RingParams, rng: &mut impl UnitSource) -> RevealResult<Self> {
        params.validate()?;
        let points = (0..params.point_count)
            .map(|i| {
                Oscillator::new(
                    params.center,
                    params.base_radius,
                    params.slot_deg(i),
                    &mut *rng,
                )
            })
            .collect();
        tracing::debug!(
            points = params.point_count,
            radius = params.base_radius,
            span = params.angular_span_deg,
            "built blob ring"
        );
        Ok(Self { params, points })
    }

    /// Builds a ring from explicit per-point characters.
    pub fn from_characters(
        params: RingParams,
        characters: impl IntoIterator<Item = Character>,
    ) -> RevealResult<Self> {
        params.validate()?;
        let points = characters
            .into_iter()
            .enumerate()
            .map(|(i, c)| {
                Oscillator::with_character(params.center, params.base_radius, params.slot_deg(i), c)
            })
            .collect::<RevealResult<Vec<_>>>()?;
        if points.len() != params.point_count {
            return Err(RevealError::invalid_configuration(format!(
                "expected {} characters, got {}",
                params.point_count,
                points.len()
            )));
        }
        Ok(Self { params, points })
    }

    pub fn update(&mut self) {
        let center = self.params.center;
        for p in &mut self.points {
            p.update(center);
        }
    }

    pub fn perturb(&mut self, rng: &mut impl UnitSource) {
        for p in &mut self.points {
            p.perturb(&mut *rng);
        }
        tracing::debug!(points = self.points.len(), "perturbed blob ring");
    }

    /// Closed smooth outline through the current point positions.
    pub fn curve_geometry(&self) -> BezPath {
        let positions: Vec<Point> = self.positions().collect();
        midpoint_quad_path(&positions)
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.points.iter().map(Oscillator::position)
    }

    pub fn points(&self) -> &[Oscillator] {
        &self.points
    }

    pub fn params(&self) -> &RingParams {
        &self.params
    }

    pub fn center(&self) -> Point {
        self.params.center
    }

    pub fn base_radius(&self) -> f64 {
        self.params.base_radius
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a valid ring has at least [`MIN_POINTS`] points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
