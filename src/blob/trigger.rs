use crate::{blob::ring::BlobRing, foundation::rng::UnitSource};

/// External event that may kick a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Stimulus {
    Scroll,
    Manual,
}

/// Turns stimuli into ring-wide perturbations.
///
/// A disabled trigger ignores every stimulus, which leaves boosts at zero for the plain
/// oscillation look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerturbationTrigger {
    enabled: bool,
    fired: u64,
}

impl Default for PerturbationTrigger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PerturbationTrigger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, fired: 0 }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Perturbs `ring` if enabled. Returns whether the ring was touched.
    pub fn fire(
        &mut self,
        ring: &mut BlobRing,
        stimulus: Stimulus,
        rng: &mut impl UnitSource,
    ) -> bool {
        if !self.enabled {
            tracing::trace!(?stimulus, "perturbation trigger disabled, ignoring stimulus");
            return false;
        }
        ring.perturb(rng);
        self.fired = self.fired.saturating_add(1);
        tracing::debug!(?stimulus, fired = self.fired, "stimulus perturbed ring");
        true
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}
