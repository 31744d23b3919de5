use crate::{
    blob::trigger::Stimulus,
    foundation::{
        core::Canvas,
        error::RevealResult,
        rng::{Rng64, UnitSource},
    },
    host::frame::RevealFrame,
    render::FrameRGBA,
};

/// Every reveal frame a host drives on the same tick.
pub struct Stage<R: UnitSource = Rng64> {
    frames: Vec<RevealFrame<R>>,
}

impl<R: UnitSource> Default for Stage<R> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<R: UnitSource> Stage<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: RevealFrame<R>) -> usize {
        self.frames.push(frame);
        self.frames.len() - 1
    }

    /// Advances every frame once, in insertion order.
    pub fn tick_all(&mut self) -> RevealResult<Vec<Option<FrameRGBA>>> {
        self.frames.iter_mut().map(RevealFrame::tick).collect()
    }

    /// Resizes every frame, stopping at the first failure.
    pub fn resize_all(&mut self, canvas: Canvas) -> RevealResult<()> {
        for frame in &mut self.frames {
            frame.resize(canvas)?;
        }
        Ok(())
    }

    /// Delivers a stimulus to every frame. Returns how many rings were perturbed.
    pub fn stimulus_all(&mut self, stimulus: Stimulus) -> usize {
        self.frames
            .iter_mut()
            .map(|f| f.on_stimulus(stimulus))
            .filter(|&hit| hit)
            .count()
    }

    pub fn frames(&self) -> &[RevealFrame<R>] {
        &self.frames
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut RevealFrame<R>> {
        self.frames.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
