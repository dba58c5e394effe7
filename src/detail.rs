//! Detail-view lifecycle glue: navigation, resolution handoff into the
//! render loop, and gesture bindings across render passes.
//!
//! One [`DetailView`] exists per product-detail view instance. `navigate`
//! spawns the resolution race for the requested id; the result crosses back
//! over a channel tagged with a navigation generation, so a late result
//! from an abandoned navigation is discarded before it can touch view
//! state. `after_render` runs once per render pass and picks up whatever
//! became possible since the last one: applying a settled resolution,
//! attaching gesture recognizers to surfaces that have mounted, and
//! draining pending gesture events in arrival order.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::gallery::{GalleryController, ImageChangedCallback, SurfaceId, ZoomState};
use crate::gestures::{
    GestureBinding, GestureEvent, GestureRecognizer, GestureSink, InputCapability,
};
use crate::models::ProductId;
use crate::resolver::{ResolutionOutcome, ResolutionRace};

/// Which surfaces are present in the rendered tree this pass. Surfaces
/// mount asynchronously, so the embedder reports presence on every pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfacePresence {
    pub inline: bool,
    pub lightbox: bool,
}

/// Product-detail view instance: resolution gate, gallery state, and
/// gesture-binding lifecycle, scoped together so navigating away tears all
/// of it down.
pub struct DetailView {
    race: Arc<ResolutionRace>,
    recognizer: Arc<dyn GestureRecognizer>,
    outcome: Option<ResolutionOutcome>,
    gallery: GalleryController,
    on_image_changed: Option<ImageChangedCallback>,
    pan_bounds: Option<(f64, f64)>,
    inline_binding: GestureBinding,
    lightbox_binding: GestureBinding,
    gesture_tx: GestureSink,
    gesture_rx: flume::Receiver<(SurfaceId, GestureEvent)>,
    outcome_tx: async_channel::Sender<(u64, ResolutionOutcome)>,
    outcome_rx: async_channel::Receiver<(u64, ResolutionOutcome)>,
    generation: u64,
    destroyed: bool,
}

impl DetailView {
    pub fn new(
        race: Arc<ResolutionRace>,
        recognizer: Arc<dyn GestureRecognizer>,
        capability: InputCapability,
    ) -> Self {
        let (gesture_tx, gesture_rx) = flume::unbounded();
        let (outcome_tx, outcome_rx) = async_channel::unbounded();
        Self {
            race,
            recognizer,
            outcome: None,
            gallery: GalleryController::new(None),
            on_image_changed: None,
            pan_bounds: None,
            inline_binding: GestureBinding::new(SurfaceId::Inline, false, capability),
            lightbox_binding: GestureBinding::new(SurfaceId::Lightbox, true, capability),
            gesture_tx,
            gesture_rx,
            outcome_tx,
            outcome_rx,
            generation: 0,
            destroyed: false,
        }
    }

    /// Refresh page/share metadata on every image change.
    pub fn with_on_image_changed(mut self, callback: ImageChangedCallback) -> Self {
        self.on_image_changed = Some(callback);
        self
    }

    /// Clamp lightbox pan to a viewport with these half-extents.
    pub fn with_pan_bounds(mut self, half_width: f64, half_height: f64) -> Self {
        self.pan_bounds = Some((half_width, half_height));
        self
    }

    /// `None` while the current navigation is still resolving.
    pub fn outcome(&self) -> Option<&ResolutionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.outcome.is_none() && !self.destroyed
    }

    pub fn gallery(&self) -> &GalleryController {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut GalleryController {
        &mut self.gallery
    }

    /// Start resolving `id`. Supersedes any navigation still in flight; a
    /// result for the old navigation will be discarded when it lands. An
    /// unresolved view may call this again with the same id to retry with a
    /// plain fetch (any handoff slot was already consumed the first time).
    ///
    /// Must run inside a tokio runtime; the race is spawned, never awaited
    /// on the view's own timeline.
    pub fn navigate(&mut self, id: Option<ProductId>) {
        if self.destroyed {
            warn!("navigate on a destroyed view, ignoring");
            return;
        }
        self.generation += 1;
        self.outcome = None;

        let generation = self.generation;
        let race = self.race.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = race.resolve(id.as_ref()).await;
            // Receiver gone means the view was dropped; nothing to apply to.
            let _ = tx.send((generation, outcome)).await;
        });
    }

    /// Run once per render pass: apply a settled resolution, attach gesture
    /// recognizers to surfaces that now exist, and drain pending gestures.
    pub fn after_render(&mut self, presence: SurfacePresence) {
        if self.destroyed {
            return;
        }
        self.poll_resolution();

        self.inline_binding
            .try_attach(self.recognizer.as_ref(), presence.inline, &self.gesture_tx);
        if self.gallery.lightbox_open() {
            self.lightbox_binding.try_attach(
                self.recognizer.as_ref(),
                presence.lightbox,
                &self.gesture_tx,
            );
        }

        self.pump_gestures();
    }

    pub fn open_lightbox(&mut self) {
        // Attachment happens on the next render pass, once the overlay has
        // actually mounted.
        self.gallery.open_lightbox();
    }

    /// Close the overlay: its binding goes away, the inline one persists.
    pub fn close_lightbox(&mut self) {
        self.gallery.close_lightbox();
        self.lightbox_binding.release();
    }

    /// Tear the view down. Releases both bindings and guarantees that an
    /// in-flight resolution can no longer mutate this view.
    pub fn destroy(&mut self) {
        self.generation += 1;
        self.inline_binding.release();
        self.lightbox_binding.release();
        self.destroyed = true;
    }

    /// Drain settled resolutions, applying only the current navigation's.
    fn poll_resolution(&mut self) {
        while let Ok((generation, outcome)) = self.outcome_rx.try_recv() {
            if generation != self.generation {
                debug!(generation, current = self.generation, "discarding resolution for superseded navigation");
                continue;
            }
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: ResolutionOutcome) {
        // The view renders either way; `Unresolved` just means the gallery
        // is inert and the presentation layer shows its fallback.
        let mut zoom = ZoomState::new();
        if let Some((half_width, half_height)) = self.pan_bounds {
            zoom = zoom.with_pan_bounds(half_width, half_height);
        }
        let mut gallery = GalleryController::new(outcome.snapshot().cloned()).with_zoom(zoom);
        if let Some(callback) = &self.on_image_changed {
            gallery = gallery.with_on_image_changed(callback.clone());
        }
        self.gallery = gallery;
        self.outcome = Some(outcome);
    }

    fn pump_gestures(&mut self) {
        while let Ok((surface, event)) = self.gesture_rx.try_recv() {
            self.gallery.handle_gesture(surface, event);
        }
    }
}

impl Drop for DetailView {
    fn drop(&mut self) {
        if !self.destroyed {
            self.destroy();
        }
    }
}
