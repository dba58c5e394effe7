use crate::gallery::SurfaceId;

/// Semantic gestures produced by a recognizer. The raw pointer/touch stream
/// never reaches this crate; a platform adapter translates it into these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    SwipeLeft,
    SwipeRight,
    DoubleTap,
    PinchStart,
    PinchMove {
        /// Scale relative to the pinch start, as platform libraries report it.
        scale_factor: f64,
        dx: f64,
        dy: f64,
    },
    PinchEnd,
}

/// Input capability of the execution environment, injected at construction.
/// A server render pass has no DOM and therefore no pointer input; trying to
/// attach there is skipped silently, never logged as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCapability {
    /// No pointing/touch surface (server rendering, crawlers, tests).
    None,
    /// Pointer or touch input is available.
    PointerTouch,
}

/// Channel end a recognizer delivers events into, tagged with the surface
/// they were observed on. Delivery order is arrival order.
pub type GestureSink = flume::Sender<(SurfaceId, GestureEvent)>;

/// Narrow interface over a platform gesture library: attach handlers to one
/// surface, get back a releasable handle. Everything else the platform
/// offers is out of scope, which keeps concrete libraries swappable.
pub trait GestureRecognizer: Send + Sync {
    /// Attach a recognizer to `surface`. Swipes are always recognized;
    /// `pinch` additionally enables pinch and double-tap.
    fn attach(&self, surface: SurfaceId, pinch: bool, sink: GestureSink) -> RecognizerHandle;
}

/// Ownership handle for one attached recognizer. Releasing (or dropping)
/// detaches it; a second release is a no-op.
pub struct RecognizerHandle {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl RecognizerHandle {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Handle for recognizers with nothing to tear down.
    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for RecognizerHandle {
    fn drop(&mut self) {
        self.release();
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn handle_release_is_idempotent() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        let mut handle = RecognizerHandle::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });

        handle.release();
        handle.release();
        drop(handle);

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_an_unreleased_handle_releases_it() {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        drop(RecognizerHandle::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
