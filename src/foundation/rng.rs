use crate::foundation::error::{RevealError, RevealResult};

/// Source of uniform samples in `[0, 1]`.
///
/// Every random draw in the engine goes through this trait so hosts can seed it and tests can
/// script it.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[lo, hi]`.
    ///
    /// Draws outside `[0, 1]` are clamped and non-finite draws count as 0, so a misbehaving source
    /// can never push a sample out of range.
    fn sample_range(&mut self, lo: f64, hi: f64) -> f64 {
        let u = self.next_unit();
        let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.0 };
        lo + (hi - lo) * u
    }
}

impl<T: UnitSource + ?Sized> UnitSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<T: UnitSource + ?Sized> UnitSource for Box<T> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

impl UnitSource for Rng64 {
    fn next_unit(&mut self) -> f64 {
        self.next_f64_01()
    }
}

/// Replays a fixed list of unit samples, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct FixedSequence {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> RevealResult<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(RevealError::invalid_configuration(
                "fixed sequence needs at least one value",
            ));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(RevealError::invalid_configuration(format!(
                "fixed sequence value {bad} is outside [0, 1]"
            )));
        }
        Ok(Self { values, cursor: 0 })
    }

    /// A sequence that always yields `value`.
    pub fn constant(value: f64) -> RevealResult<Self> {
        Self::new(vec![value])
    }

    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl UnitSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
