//! Gallery state for the product-detail media viewer.
//!
//! [`GalleryController`] owns the displayed image index for the inline
//! gallery and the full-screen lightbox; [`ZoomState`] is the lightbox's
//! pinch/pan transform machine. Both treat gesture input as untrusted:
//! invalid transitions are ignored, never errors.

pub mod controller;
pub mod zoom;

pub use controller::{GalleryController, ImageChangedCallback, SurfaceId};
pub use zoom::{Transform, ZoomState, MAX_ZOOM};
