//! Signal generator implementations

pub mod engulfing;
pub mod threshold;
