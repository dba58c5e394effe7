//! vitrina — resolution and media-viewer engine for a product-detail view.
//!
//! Two cooperating components, both scoped to one detail-view instance:
//! - [`resolver`] decides, under a deadline, whether a navigation renders
//!   with a server-handed-off snapshot, a fresh fetch, or a fallback — the
//!   page never hangs or blanks on a slow backend.
//! - [`gallery`] owns the displayed image index for the inline gallery and
//!   the lightbox overlay, including the lightbox's pinch/pan transform.
//!
//! [`detail`] ties them to a view lifecycle; [`gestures`] is the seam to
//! whatever platform gesture library the embedder runs on. HTTP access and
//! the renderer itself are external collaborators behind narrow traits.

pub mod detail;
pub mod gallery;
pub mod gestures;
pub mod models;
pub mod resolver;

pub use detail::{DetailView, SurfacePresence};
pub use gallery::{GalleryController, SurfaceId, Transform, ZoomState};
pub use gestures::{GestureBinding, GestureEvent, GestureRecognizer, InputCapability};
pub use models::{ImageRef, ProductId, ProductSnapshot};
pub use resolver::{
    ExecutionContext, HandoffStore, ProductFetcher, ResolutionOutcome, ResolutionRace,
};
