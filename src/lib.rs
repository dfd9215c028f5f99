//! printmock composites a user's design onto product mockup photographs.
//!
//! The flow for one source image:
//!
//! - Load templates once with [`TemplateAssetStore::prepare`]
//! - Load the design with [`load_source`] and register its size in a [`PlacementBook`]
//! - Auto-fit and adjust placements per product, then [`render_product`] or [`render_all`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
pub mod clip;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod session;

pub use crate::assets::decode::PreparedImage;
pub use crate::assets::store::{ImageSource, PreparedTemplate, TemplateAssetStore, load_source};
pub use crate::catalog::config::{ExportSettings, MockupConfig};
pub use crate::catalog::product::ProductKind;
pub use crate::catalog::template::{TemplateCatalog, TemplateSpec};
pub use crate::encode::raster::{ExportFormat, encode_frame, write_encoded};
pub use crate::foundation::core::{CanvasSize, ImageSize, Placement};
pub use crate::foundation::error::{MockupError, MockupResult};
pub use crate::layout::autofit::{EditorNudge, compute_auto_fit};
pub use crate::layout::gesture::{Gesture, apply_user_transform};
pub use crate::render::compositor::{Compositor, RasterFrame};
pub use crate::render::pipeline::{PreviewOutcome, render_all, render_preview, render_product};
pub use crate::session::book::PlacementBook;
pub use crate::session::supersede::{LatestFrames, RenderTickets, Ticket};
