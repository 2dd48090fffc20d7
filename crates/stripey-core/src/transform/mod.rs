//! Image transformation operations.
//!
//! The only transform a label needs is a quarter-turn rotation, applied
//! after rasterizing. The drawer reuses the same grid rotation to turn
//! individual fields (`^A0R`, `^BCB`, ...) and whole labels (`^POI`).
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Angles are the configured degrees: 0, 90, 180 or 270

mod rotation;

pub use rotation::{rotate_grid, rotate_png, rotated_dimensions, Rotation, TransformError};
