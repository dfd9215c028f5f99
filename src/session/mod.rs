//! Editing state that outlives a single render.

/// Per-product placements.
pub mod book;
/// Last-write-wins ordering for in-flight renders.
pub mod supersede;
