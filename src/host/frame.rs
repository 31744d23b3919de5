use crate::{
    blob::{
        ring::BlobRing,
        trigger::{PerturbationTrigger, Stimulus},
    },
    config::RevealConfig,
    foundation::{
        core::{Canvas, TickIndex},
        error::{RevealError, RevealResult},
        rng::{Rng64, UnitSource},
    },
    render::{FrameRGBA, render_reveal, source::SourceImage},
};

/// One revealed picture: a surface, its blob ring and the image it masks.
///
/// Nothing animates until an image is attached; resizing throws the ring away and builds a new
/// one with fresh characters.
pub struct RevealFrame<R: UnitSource = Rng64> {
    canvas: Canvas,
    config: RevealConfig,
    ring: BlobRing,
    trigger: PerturbationTrigger,
    image: Option<SourceImage>,
    fitted: Option<Vec<u8>>, // image bytes for the current canvas
    rng: R,
    tick: TickIndex,
}

impl RevealFrame<Rng64> {
    /// Frame seeded from `config.seed`.
    pub fn seeded(canvas: Canvas, config: RevealConfig) -> RevealResult<Self> {
        let rng = Rng64::new(config.seed);
        Self::new(canvas, config, rng)
    }
}

impl<R: UnitSource> RevealFrame<R> {
    pub fn new(canvas: Canvas, config: RevealConfig, mut rng: R) -> RevealResult<Self> {
        config.validate()?;
        check_surface(canvas)?;
        let ring = BlobRing::new(config.ring.params_for(canvas), &mut rng)?;
        let trigger = PerturbationTrigger::new(config.perturb_on_scroll);
        Ok(Self {
            canvas,
            config,
            ring,
            trigger,
            image: None,
            fitted: None,
            rng,
            tick: TickIndex(0),
        })
    }

    /// Rebuilds the ring for a new surface size. On error the previous ring stays in place.
    #[tracing::instrument(skip(self), fields(from = ?self.canvas))]
    pub fn resize(&mut self, canvas: Canvas) -> RevealResult<()> {
        check_surface(canvas)?;
        let ring = BlobRing::new(self.config.ring.params_for(canvas), &mut self.rng)?;
        self.ring = ring;
        self.canvas = canvas;
        self.fitted = None;
        Ok(())
    }

    pub fn set_image(&mut self, image: SourceImage) {
        self.image = Some(image);
        self.fitted = None;
    }

    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// Forwards a stimulus to the trigger. Returns whether the ring was perturbed.
    pub fn on_stimulus(&mut self, stimulus: Stimulus) -> bool {
        self.trigger.fire(&mut self.ring, stimulus, &mut self.rng)
    }

    /// Advances one animation tick and renders it. Returns `None` while no image is attached.
    pub fn tick(&mut self) -> RevealResult<Option<FrameRGBA>> {
        if !self.is_ready() {
            return Ok(None);
        }
        self.ring.update();
        self.tick = self.tick.next();
        self.render_current()
    }

    /// Renders the current ring state without advancing it.
    #[tracing::instrument(skip(self), fields(tick = self.tick.0))]
    pub fn render_current(&mut self) -> RevealResult<Option<FrameRGBA>> {
        let Some(image) = &self.image else {
            return Ok(None);
        };
        let canvas = self.canvas;
        let fitted = self
            .fitted
            .get_or_insert_with(|| image.fit_premul(canvas));
        render_reveal(self.canvas, fitted, &self.ring, self.config.show_helpers).map(Some)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn ring(&self) -> &BlobRing {
        &self.ring
    }

    pub fn trigger(&self) -> &PerturbationTrigger {
        &self.trigger
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Ticks advanced since construction. Resizes do not reset it.
    pub fn ticks(&self) -> TickIndex {
        self.tick
    }
}

// The rasterizer addresses pixels with u16, so reject surfaces it could never draw.
fn check_surface(canvas: Canvas) -> RevealResult<()> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(RevealError::invalid_configuration(format!(
            "surface must be non-empty, got {}x{}",
            canvas.width, canvas.height
        )));
    }
    canvas
        .as_u16()
        .map(|_| ())
        .map_err(|e| RevealError::invalid_configuration(format!("surface too large: {e}")))
}
