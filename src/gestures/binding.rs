use tracing::{debug, trace};

use super::recognizer::{GestureRecognizer, GestureSink, InputCapability, RecognizerHandle};
use crate::gallery::SurfaceId;

/// Outcome of one attachment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Recognizer attached; the binding is live.
    Attached,
    /// Surface not mounted yet. Recoverable: retry on the next render pass.
    Deferred,
    /// Environment has no pointer input; attachment is permanently skipped.
    Skipped,
    /// A live binding already exists for this surface.
    AlreadyAttached,
}

/// Lifecycle manager for at most one recognizer binding on one surface.
///
/// Surfaces mount asynchronously — the gallery appears only after data
/// resolves, the lightbox only while open — so attachment is a retryable
/// operation rather than a one-shot. Release is idempotent and also runs on
/// drop, so the binding cannot outlive its owner.
pub struct GestureBinding {
    surface: SurfaceId,
    pinch: bool,
    capability: InputCapability,
    handle: Option<RecognizerHandle>,
}

impl GestureBinding {
    pub fn new(surface: SurfaceId, pinch: bool, capability: InputCapability) -> Self {
        Self {
            surface,
            pinch,
            capability,
            handle: None,
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn is_attached(&self) -> bool {
        self.handle.is_some()
    }

    /// Attempt to attach. `mounted` reports whether the surface element is
    /// present in the rendered tree right now; callers re-invoke this on
    /// every render pass until the surface exists.
    pub fn try_attach(
        &mut self,
        recognizer: &dyn GestureRecognizer,
        mounted: bool,
        sink: &GestureSink,
    ) -> AttachOutcome {
        if self.capability == InputCapability::None {
            // No pointer surface exists here (e.g. server rendering).
            return AttachOutcome::Skipped;
        }
        if self.handle.is_some() {
            return AttachOutcome::AlreadyAttached;
        }
        if !mounted {
            trace!(surface = ?self.surface, "surface not mounted yet, deferring attach");
            return AttachOutcome::Deferred;
        }

        self.handle = Some(recognizer.attach(self.surface, self.pinch, sink.clone()));
        debug!(surface = ?self.surface, pinch = self.pinch, "gesture recognizer attached");
        AttachOutcome::Attached
    }

    /// Release the recognizer if attached. Safe to call any number of times,
    /// including on a binding that never attached.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.release();
            debug!(surface = ?self.surface, "gesture recognizer released");
        }
    }
}

impl Drop for GestureBinding {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::super::recognizer::testing::CountingRecognizer;
    use super::*;

    fn sink() -> GestureSink {
        flume::unbounded().0
    }

    #[test]
    fn attach_is_skipped_without_pointer_input() {
        let recognizer = CountingRecognizer::new();
        let mut binding = GestureBinding::new(SurfaceId::Inline, false, InputCapability::None);

        let outcome = binding.try_attach(recognizer.as_ref(), true, &sink());

        assert_eq!(outcome, AttachOutcome::Skipped);
        assert!(!binding.is_attached());
        assert_eq!(recognizer.attach_count(), 0);
    }

    #[test]
    fn attach_defers_until_the_surface_mounts() {
        let recognizer = CountingRecognizer::new();
        let mut binding =
            GestureBinding::new(SurfaceId::Lightbox, true, InputCapability::PointerTouch);
        let sink = sink();

        assert_eq!(
            binding.try_attach(recognizer.as_ref(), false, &sink),
            AttachOutcome::Deferred
        );
        assert_eq!(recognizer.attach_count(), 0);

        // Next render pass: the surface exists now.
        assert_eq!(
            binding.try_attach(recognizer.as_ref(), true, &sink),
            AttachOutcome::Attached
        );
        assert_eq!(recognizer.attach_count(), 1);
    }

    #[test]
    fn at_most_one_live_binding_per_surface() {
        let recognizer = CountingRecognizer::new();
        let mut binding =
            GestureBinding::new(SurfaceId::Inline, false, InputCapability::PointerTouch);
        let sink = sink();

        binding.try_attach(recognizer.as_ref(), true, &sink);
        assert_eq!(
            binding.try_attach(recognizer.as_ref(), true, &sink),
            AttachOutcome::AlreadyAttached
        );
        assert_eq!(recognizer.attach_count(), 1);
    }

    #[test]
    fn double_release_is_a_no_op() {
        let recognizer = CountingRecognizer::new();
        let mut binding =
            GestureBinding::new(SurfaceId::Inline, false, InputCapability::PointerTouch);
        binding.try_attach(recognizer.as_ref(), true, &sink());

        binding.release();
        binding.release();

        assert_eq!(recognizer.release_count(), 1);
    }

    #[test]
    fn releasing_a_never_attached_binding_is_a_no_op() {
        let recognizer = CountingRecognizer::new();
        let mut binding =
            GestureBinding::new(SurfaceId::Lightbox, true, InputCapability::PointerTouch);

        binding.release();

        assert_eq!(recognizer.release_count(), 0);
    }

    #[test]
    fn drop_releases_a_live_binding() {
        let recognizer = CountingRecognizer::new();
        {
            let mut binding =
                GestureBinding::new(SurfaceId::Inline, false, InputCapability::PointerTouch);
            binding.try_attach(recognizer.as_ref(), true, &sink());
        }
        assert_eq!(recognizer.release_count(), 1);
    }

    #[test]
    fn binding_can_reattach_after_release() {
        let recognizer = CountingRecognizer::new();
        let mut binding =
            GestureBinding::new(SurfaceId::Lightbox, true, InputCapability::PointerTouch);
        let sink = sink();

        binding.try_attach(recognizer.as_ref(), true, &sink);
        binding.release();
        assert_eq!(
            binding.try_attach(recognizer.as_ref(), true, &sink),
            AttachOutcome::Attached
        );

        assert_eq!(recognizer.attach_count(), 2);
        assert_eq!(recognizer.release_count(), 1);
    }
}
