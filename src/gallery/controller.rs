use std::sync::Arc;

use tracing::trace;

use super::zoom::ZoomState;
use crate::gestures::GestureEvent;
use crate::models::{ImageRef, ProductSnapshot};

/// Which gallery surface a gesture or navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// Always-visible gallery on the detail page.
    Inline,
    /// Full-screen overlay; exists only while open, and is the only surface
    /// with pinch zoom.
    Lightbox,
}

/// Invoked after every index change so the embedder can refresh page/share
/// metadata. Fire-and-forget; the controller ignores whatever it does.
pub type ImageChangedCallback = Arc<dyn Fn(&ProductSnapshot, &ImageRef) + Send + Sync>;

/// Index/navigation state machine for the two gallery surfaces.
///
/// The inline gallery and the lightbox each keep their own index; the
/// lightbox picks up the inline index when it opens. Navigation wraps
/// modulo the image count, and with no images every operation is a no-op.
/// Swipe convention: swipe-left advances, swipe-right goes back.
pub struct GalleryController {
    product: Option<ProductSnapshot>,
    inline_index: usize,
    lightbox_index: usize,
    lightbox_open: bool,
    zoom: ZoomState,
    on_image_changed: Option<ImageChangedCallback>,
}

impl GalleryController {
    /// Initialize from a resolution outcome's snapshot: index 0, first
    /// image as cover. `None` produces an inert controller for the
    /// unresolved fallback view.
    pub fn new(product: Option<ProductSnapshot>) -> Self {
        Self {
            product,
            inline_index: 0,
            lightbox_index: 0,
            lightbox_open: false,
            zoom: ZoomState::new(),
            on_image_changed: None,
        }
    }

    pub fn with_on_image_changed(mut self, callback: ImageChangedCallback) -> Self {
        self.on_image_changed = Some(callback);
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomState) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn product(&self) -> Option<&ProductSnapshot> {
        self.product.as_ref()
    }

    fn images(&self) -> &[ImageRef] {
        self.product.as_ref().map(|p| p.images.as_slice()).unwrap_or(&[])
    }

    /// Surface navigation currently targets; `None` when there is nothing
    /// to show.
    pub fn active_surface(&self) -> Option<SurfaceId> {
        if self.images().is_empty() {
            None
        } else if self.lightbox_open {
            Some(SurfaceId::Lightbox)
        } else {
            Some(SurfaceId::Inline)
        }
    }

    /// Index on the active surface. Always in range while images exist.
    pub fn current_index(&self) -> usize {
        if self.lightbox_open {
            self.lightbox_index
        } else {
            self.inline_index
        }
    }

    /// Image at the active surface's index; the cover when nothing has been
    /// navigated yet.
    pub fn current_image(&self) -> Option<&ImageRef> {
        self.images().get(self.current_index())
    }

    pub fn lightbox_open(&self) -> bool {
        self.lightbox_open
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// Advance to the next image, wrapping to the first past the end.
    pub fn next(&mut self) {
        let len = self.images().len();
        if len == 0 {
            return;
        }
        let index = (self.current_index() + 1) % len;
        self.set_index(index);
    }

    /// Go back one image, wrapping to the last before the start.
    pub fn prev(&mut self) {
        let len = self.images().len();
        if len == 0 {
            return;
        }
        let index = (self.current_index() + len - 1) % len;
        self.set_index(index);
    }

    /// Jump straight to `index`. Out-of-range requests are ignored.
    pub fn select(&mut self, index: usize) {
        let len = self.images().len();
        if len == 0 || index >= len {
            trace!(index, len, "select out of range, ignoring");
            return;
        }
        self.set_index(index);
    }

    /// Open the overlay at the inline surface's current image.
    pub fn open_lightbox(&mut self) {
        if self.lightbox_open {
            return;
        }
        self.lightbox_open = true;
        self.lightbox_index = self.inline_index;
        self.zoom.reset();
    }

    /// Close the overlay. Zoom never survives a closed lightbox.
    pub fn close_lightbox(&mut self) {
        if !self.lightbox_open {
            return;
        }
        self.lightbox_open = false;
        self.zoom.reset();
    }

    /// Apply one semantic gesture observed on `surface`. Events arrive in
    /// input order and are applied in that order; events for a lightbox
    /// that is no longer open are dropped.
    pub fn handle_gesture(&mut self, surface: SurfaceId, event: GestureEvent) {
        if surface == SurfaceId::Lightbox && !self.lightbox_open {
            return;
        }
        match event {
            GestureEvent::SwipeLeft => self.next(),
            GestureEvent::SwipeRight => self.prev(),
            GestureEvent::DoubleTap if surface == SurfaceId::Lightbox => self.zoom.reset(),
            GestureEvent::PinchStart if surface == SurfaceId::Lightbox => {
                self.zoom.gesture_start()
            }
            GestureEvent::PinchMove {
                scale_factor,
                dx,
                dy,
            } if surface == SurfaceId::Lightbox => self.zoom.gesture_update(scale_factor, dx, dy),
            GestureEvent::PinchEnd if surface == SurfaceId::Lightbox => self.zoom.gesture_end(),
            // Pinch and double-tap are only recognized on the lightbox.
            _ => {}
        }
    }

    fn set_index(&mut self, index: usize) {
        if self.lightbox_open {
            self.lightbox_index = index;
            // Zoom never leaks across images.
            self.zoom.reset();
        } else {
            self.inline_index = index;
        }
        self.notify_image_changed();
    }

    fn notify_image_changed(&self) {
        let (Some(callback), Some(product)) = (&self.on_image_changed, &self.product) else {
            return;
        };
        if let Some(image) = self.current_image() {
            callback(product, image);
        }
    }
}
