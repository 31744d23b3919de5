pub(crate) mod curve;
pub(crate) mod oscillator;
pub(crate) mod ring;
pub(crate) mod trigger;
