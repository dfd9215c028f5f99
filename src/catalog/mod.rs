//! Product types, template calibration and configuration.

/// JSON configuration and `PRINTMOCK_*` environment overrides.
pub mod config;
/// Product enumeration.
pub mod product;
/// Per-product template calibration.
pub mod template;
