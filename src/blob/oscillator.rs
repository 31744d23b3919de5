use crate::foundation::{
    core::{Point, wrap_degrees},
    error::{RevealError, RevealResult},
    rng::UnitSource,
};

/// Linear boost decay applied every tick, to both speed and expansion.
pub const DECAY: f64 = 0.001;

/// Range of a point's base speed, in degrees of phase per tick.
pub const SPEED_RANGE: (f64, f64) = (-2.0, 2.0);

/// Range of a point's base expansion, in radius units per tick.
pub const EXPANSION_RANGE: (f64, f64) = (0.05, 0.1);

/// Multiplier applied to a fresh sample when a perturbation fires.
pub const BOOST_FACTOR: f64 = 5.0;

// Subtraction dust left after decaying a boost that is an exact multiple of DECAY.
const DECAY_SNAP: f64 = 1e-9;

/// Persistent per-point oscillation constants.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Character {
    pub speed: f64,
    pub expansion: f64,
}

impl Character {
    pub const ZERO: Self = Self {
        speed: 0.0,
        expansion: 0.0,
    };

    /// Draws speed, then expansion, uniformly from their ranges.
    pub fn sample(rng: &mut impl UnitSource) -> Self {
        let speed = rng.sample_range(SPEED_RANGE.0, SPEED_RANGE.1);
        let expansion = rng.sample_range(EXPANSION_RANGE.0, EXPANSION_RANGE.1);
        Self { speed, expansion }
    }

    pub fn validate(&self) -> RevealResult<()> {
        if !self.speed.is_finite() || !self.expansion.is_finite() {
            return Err(RevealError::invalid_configuration(format!(
                "character must be finite (speed {}, expansion {})",
                self.speed, self.expansion
            )));
        }
        Ok(())
    }
}

/// Transient additive perturbation. Both components are never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Boost {
    pub speed: f64,
    pub expansion: f64,
}

impl Boost {
    pub const ZERO: Self = Self {
        speed: 0.0,
        expansion: 0.0,
    };

    pub fn new(speed: f64, expansion: f64) -> Self {
        Self {
            speed: speed.max(0.0),
            expansion: expansion.max(0.0),
        }
    }

    pub fn is_zero(self) -> bool {
        self.speed == 0.0 && self.expansion == 0.0
    }

    fn decayed(self) -> Self {
        fn step(v: f64) -> f64 {
            let v = v - DECAY;
            if v <= DECAY_SNAP { 0.0 } else { v }
        }

        Self {
            speed: step(self.speed),
            expansion: step(self.expansion),
        }
    }
}

/// One point of a blob ring: a fixed angular slot with an oscillating radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Oscillator {
    angular_position: f64, // radians, fixed
    radius: f64,
    phase_deg: f64, // [0, 360)
    character: Character,
    boost: Boost,
    position: Point,
}

impl Oscillator {
    /// Builds a point at `slot_deg` with a freshly sampled character.
    pub fn new(center: Point, radius: f64, slot_deg: f64, rng: &mut impl UnitSource) -> Self {
        Self::build(center, radius, slot_deg, Character::sample(rng))
    }

    /// Builds a point with an explicit character, rejecting non-finite values.
    pub fn with_character(
        center: Point,
        radius: f64,
        slot_deg: f64,
        character: Character,
    ) -> RevealResult<Self> {
        character.validate()?;
        Ok(Self::build(center, radius, slot_deg, character))
    }

    fn build(center: Point, radius: f64, slot_deg: f64, character: Character) -> Self {
        let angular_position = slot_deg.to_radians();
        Self {
            angular_position,
            radius,
            phase_deg: 0.0,
            character,
            boost: Boost::ZERO,
            position: polar(center, angular_position, radius),
        }
    }

    /// Advances the point by one tick around `center`.
    pub fn update(&mut self, center: Point) {
        let speed = self.character.speed + self.boost.speed;
        let expansion = self.character.expansion + self.boost.expansion;

        self.radius += self.phase_deg.to_radians().cos() * expansion;
        self.position = polar(center, self.angular_position, self.radius);
        self.phase_deg = wrap_degrees(self.phase_deg + speed);
        self.boost = self.boost.decayed();
    }

    /// Replaces the boost with `BOOST_FACTOR` times a fresh character draw.
    pub fn perturb(&mut self, rng: &mut impl UnitSource) {
        let kick = Character::sample(rng);
        self.boost = Boost::new(kick.speed * BOOST_FACTOR, kick.expansion * BOOST_FACTOR);
    }

    pub fn set_boost(&mut self, boost: Boost) {
        self.boost = Boost::new(boost.speed, boost.expansion);
    }

    pub fn angular_position(&self) -> f64 {
        self.angular_position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn phase_deg(&self) -> f64 {
        self.phase_deg
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

fn polar(center: Point, angle: f64, radius: f64) -> Point {
    Point::new(
        angle.cos() * radius + center.x,
        angle.sin() * radius + center.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::rng::{FixedSequence, Rng64};

    const CENTER: Point = Point::new(100.0, 100.0);

    #[test]
    fn non_finite_character_is_rejected() {
        for character in [
            Character {
                speed: f64::NAN,
                expansion: 0.05,
            },
            Character {
                speed: 1.0,
                expansion: f64::INFINITY,
            },
        ] {
            let err = Oscillator::with_character(CENTER, 50.0, 0.0, character).unwrap_err();
            assert!(matches!(err, RevealError::InvalidConfiguration(_)), "{err}");
        }
    }

    #[test]
    fn steady_state_tick_changes_nothing() {
        let mut osc = Oscillator::with_character(CENTER, 50.0, 60.0, Character::ZERO).unwrap();
        let before = osc.clone();
        osc.update(CENTER);
        assert_eq!(osc.radius(), before.radius());
        assert_eq!(osc.phase_deg(), before.phase_deg());
        assert_eq!(osc.position(), before.position());
    }

    #[test]
    fn first_tick_breathes_by_full_expansion() {
        let character = Character {
            speed: 1.5,
            expansion: 0.08,
        };
        let mut osc = Oscillator::with_character(CENTER, 50.0, 0.0, character).unwrap();
        osc.update(CENTER);
        // cos(0) = 1 on the first tick.
        assert!((osc.radius() - 50.08).abs() < 1e-12);
        assert!((osc.position().x - 150.08).abs() < 1e-12);
        assert_eq!(osc.position().y, 100.0);
        assert_eq!(osc.phase_deg(), 1.5);
    }

    #[test]
    fn position_follows_center_passed_in() {
        let mut osc = Oscillator::with_character(CENTER, 10.0, 90.0, Character::ZERO).unwrap();
        osc.update(Point::new(0.0, 0.0));
        assert!((osc.position().x - 0.0).abs() < 1e-9);
        assert!((osc.position().y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn phase_wraps_for_negative_and_boosted_speeds() {
        let mut rng = Rng64::new(42);
        for _ in 0..8 {
            let mut osc = Oscillator::new(CENTER, 40.0, 0.0, &mut rng);
            osc.perturb(&mut rng);
            for _ in 0..2_000 {
                osc.update(CENTER);
                assert!((0.0..360.0).contains(&osc.phase_deg()));
            }
        }

        let mut backwards = Oscillator::with_character(
            CENTER,
            40.0,
            0.0,
            Character {
                speed: -2.0,
                expansion: 0.05,
            },
        ).unwrap();
        backwards.update(CENTER);
        assert_eq!(backwards.phase_deg(), 358.0);
    }

    #[test]
    fn character_sampling_respects_ranges() {
        let mut rng = Rng64::new(7);
        for _ in 0..500 {
            let c = Character::sample(&mut rng);
            assert!((SPEED_RANGE.0..=SPEED_RANGE.1).contains(&c.speed));
            assert!((EXPANSION_RANGE.0..=EXPANSION_RANGE.1).contains(&c.expansion));
        }
    }

    #[test]
    fn perturb_scales_fresh_draws_and_clamps_negative_speed() {
        let mut osc = Oscillator::with_character(CENTER, 50.0, 0.0, Character::ZERO).unwrap();
        let mut seq = FixedSequence::new(vec![1.0, 1.0]).unwrap();
        osc.perturb(&mut seq);
        assert_eq!(osc.boost(), Boost::new(10.0, 0.5));

        let mut seq = FixedSequence::new(vec![0.0, 0.0]).unwrap();
        osc.perturb(&mut seq);
        assert_eq!(osc.boost().speed, 0.0);
        assert_eq!(osc.boost().expansion, 0.25);
        // Character is untouched by perturbation.
        assert_eq!(osc.character(), Character::ZERO);
    }

    #[test]
    fn perturb_replaces_instead_of_stacking() {
        let mut osc = Oscillator::with_character(CENTER, 50.0, 0.0, Character::ZERO).unwrap();
        let mut seq = FixedSequence::constant(1.0).unwrap();
        osc.perturb(&mut seq);
        osc.perturb(&mut seq);
        assert_eq!(osc.boost(), Boost::new(10.0, 0.5));
    }

    #[test]
    fn boost_decays_strictly_then_rests_at_zero() {
        let mut osc = Oscillator::with_character(CENTER, 50.0, 0.0, Character::ZERO).unwrap();
        osc.set_boost(Boost::new(0.05, 0.03));
        let mut prev = osc.boost();
        for _ in 0..200 {
            osc.update(CENTER);
            let b = osc.boost();
            assert!(b.speed >= 0.0 && b.expansion >= 0.0);
            if prev.speed > 0.0 {
                assert!(b.speed < prev.speed);
            } else {
                assert_eq!(b.speed, 0.0);
            }
            if prev.expansion > 0.0 {
                assert!(b.expansion < prev.expansion);
            } else {
                assert_eq!(b.expansion, 0.0);
            }
            prev = b;
        }
        assert!(osc.boost().is_zero());
    }

    #[test]
    fn boost_reaches_exact_zero_after_boost_over_decay_ticks() {
        let mut osc = Oscillator::with_character(CENTER, 50.0, 0.0, Character::ZERO).unwrap();
        osc.set_boost(Boost::new(2.0, 0.5));
        for _ in 0..499 {
            osc.update(CENTER);
        }
        assert!(osc.boost().expansion > 0.0);
        osc.update(CENTER);
        assert_eq!(osc.boost().expansion, 0.0);
        for _ in 500..1_999 {
            osc.update(CENTER);
        }
        assert!(osc.boost().speed > 0.0);
        osc.update(CENTER);
        assert_eq!(osc.boost(), Boost::ZERO);
    }

    #[test]
    fn set_boost_clamps_negative_components() {
        let mut osc = Oscillator::with_character(CENTER, 50.0, 0.0, Character::ZERO).unwrap();
        osc.set_boost(Boost {
            speed: -1.0,
            expansion: 0.2,
        });
        assert_eq!(osc.boost(), Boost::new(0.0, 0.2));
    }
}
