//! CPU compositing.
//!
//! Every layer is rasterized with `vello_cpu` into a canvas-sized premultiplied RGBA8 buffer and
//! combined with the fixed-point kernels in [`blend`].

pub mod blend;
/// Single-frame compositor.
pub mod compositor;
/// Single-product, multi-product and superseding preview entry points.
pub mod pipeline;
pub(crate) mod raster;
