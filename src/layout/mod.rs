//! Placement geometry: the default fit and interactive edits on top of it.

pub mod autofit;
pub mod gesture;
