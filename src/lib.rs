//! Liquid reveal: an oscillating blob used as a mask over a still image.
//!
//! # Pipeline overview
//!
//! 1. **Oscillate**: every [`Oscillator`] sits on a fixed angular slot of a [`BlobRing`] and
//!    breathes its radius in and out with its own phase clock.
//! 2. **Smooth**: [`BlobRing::curve_geometry`] turns the points into a closed path of quadratic
//!    segments through edge midpoints.
//! 3. **Mask**: [`render_reveal`] draws the image and keeps it only inside that path.
//!
//! Stimuli such as scrolling reach the ring through a [`PerturbationTrigger`], which kicks every
//! point with a boost that decays back to zero over the following ticks.
//!
//! Randomness is always injected through [`UnitSource`]; a ring built from the same parameters
//! and fed the same calls reproduces its positions bit for bit.
#![forbid(unsafe_code)]

mod blob;
mod config;
mod foundation;
mod host;
mod render;

pub use blob::curve::{midpoint_quad_path, path_endpoints};
pub use blob::oscillator::{
    BOOST_FACTOR, Boost, Character, DECAY, EXPANSION_RANGE, Oscillator, SPEED_RANGE,
};
pub use blob::ring::{BlobRing, MIN_POINTS, RingParams};
pub use blob::trigger::{PerturbationTrigger, Stimulus};
pub use config::{RevealConfig, RingConfig};
pub use foundation::core::{
    BezPath, Canvas, FULL_TURN_DEG, PathEl, Point, TickIndex, wrap_degrees,
};
pub use foundation::error::{RevealError, RevealResult};
pub use foundation::rng::{FixedSequence, Rng64, UnitSource};
pub use host::frame::RevealFrame;
pub use host::stage::Stage;
pub use render::composite::{dest_in, dest_in_in_place, over, over_in_place};
pub use render::raster::{HELPER_DOT_RADIUS, fill_path_rgba8, helper_dots};
pub use render::source::SourceImage;
pub use render::{FrameRGBA, render_reveal};
