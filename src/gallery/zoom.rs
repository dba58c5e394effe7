/// Maximum pinch zoom scale for the lightbox image.
pub const MAX_ZOOM: f64 = 5.0;

/// One (scale, translate) triple. Rendering composes translate first, then
/// scale, every time any of the three values changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// CSS-equivalent value of this transform, translate-then-scale.
    pub fn to_css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Pinch/pan state for the lightbox image.
///
/// A baseline copy of the transform is committed at `gesture_start` and
/// re-committed at `gesture_end`, so successive gestures compose: a second
/// pinch scales from where the first one ended, not from identity.
///
/// Scale is clamped to `[1, MAX_ZOOM]`. Collapsing back to scale 1 zeroes
/// the pan, so a fully zoomed-out image is always centered. Pan is unbounded
/// unless a viewport extent is configured, in which case translate is
/// clamped to the zoomed overhang per axis and the image cannot be stranded
/// off-screen.
#[derive(Debug, Clone)]
pub struct ZoomState {
    current: Transform,
    baseline: Transform,
    pan_bounds: Option<(f64, f64)>,
}

impl ZoomState {
    pub fn new() -> Self {
        Self {
            current: Transform::IDENTITY,
            baseline: Transform::IDENTITY,
            pan_bounds: None,
        }
    }

    /// Clamp pan to the overhang of a viewport with the given half-extents.
    pub fn with_pan_bounds(mut self, half_width: f64, half_height: f64) -> Self {
        self.pan_bounds = Some((half_width, half_height));
        self
    }

    pub fn transform(&self) -> Transform {
        self.current
    }

    pub fn scale(&self) -> f64 {
        self.current.scale
    }

    pub fn is_zoomed(&self) -> bool {
        self.current.scale > 1.0
    }

    /// Commit the current transform as the baseline for the coming gesture.
    pub fn gesture_start(&mut self) {
        self.baseline = self.current;
    }

    /// Apply a pinch/pan update relative to the committed baseline.
    ///
    /// Gesture input is untrusted and high-frequency, so malformed events
    /// are dropped rather than propagated: a non-finite factor or delta is
    /// a no-op.
    pub fn gesture_update(&mut self, scale_factor: f64, dx: f64, dy: f64) {
        if !scale_factor.is_finite() || !dx.is_finite() || !dy.is_finite() {
            return;
        }

        let scale = (self.baseline.scale * scale_factor).clamp(1.0, MAX_ZOOM);
        if scale <= 1.0 {
            // Back at rest; pan collapses with the zoom.
            self.current = Transform::IDENTITY;
            return;
        }

        let (translate_x, translate_y) = self.clamp_pan(
            scale,
            self.baseline.translate_x + dx,
            self.baseline.translate_y + dy,
        );
        self.current = Transform {
            scale,
            translate_x,
            translate_y,
        };
    }

    /// Re-commit the current transform so the next gesture starts from here.
    pub fn gesture_end(&mut self) {
        self.baseline = self.current;
    }

    /// Back to rest: identity transform and identity baseline. Reachable
    /// from any state.
    pub fn reset(&mut self) {
        self.current = Transform::IDENTITY;
        self.baseline = Transform::IDENTITY;
    }

    fn clamp_pan(&self, scale: f64, tx: f64, ty: f64) -> (f64, f64) {
        match self.pan_bounds {
            None => (tx, ty),
            Some((half_width, half_height)) => {
                let max_x = (scale - 1.0) * half_width;
                let max_y = (scale - 1.0) * half_height;
                (tx.clamp(-max_x, max_x), ty.clamp(-max_y, max_y))
            }
        }
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_always_yields_identity() {
        let mut zoom = ZoomState::new();
        zoom.gesture_start();
        zoom.gesture_update(3.0, 40.0, -25.0);
        zoom.gesture_end();

        zoom.reset();

        assert!(zoom.transform().is_identity());
        // The baseline resets too: a new gesture starts from identity.
        zoom.gesture_start();
        zoom.gesture_update(1.0, 0.0, 0.0);
        assert!(zoom.transform().is_identity());
    }

    #[test]
    fn gestures_compose_from_the_committed_baseline() {
        let mut zoom = ZoomState::new();
        zoom.gesture_start();
        zoom.gesture_update(2.0, 0.0, 0.0);
        zoom.gesture_end();

        // A second gesture with factor 1 keeps the first gesture's scale.
        zoom.gesture_start();
        zoom.gesture_update(1.0, 0.0, 0.0);
        assert_eq!(zoom.scale(), 2.0);

        // And factor 1.5 multiplies onto it.
        zoom.gesture_update(1.5, 0.0, 0.0);
        assert_eq!(zoom.scale(), 3.0);
    }

    #[test]
    fn updates_within_one_gesture_do_not_accumulate() {
        let mut zoom = ZoomState::new();
        zoom.gesture_start();
        zoom.gesture_update(2.0, 10.0, 0.0);
        zoom.gesture_update(2.0, 10.0, 0.0);

        // Both updates are relative to the same baseline.
        assert_eq!(zoom.scale(), 2.0);
        assert_eq!(zoom.transform().translate_x, 10.0);
    }

    #[test]
    fn scale_clamps_to_max_zoom() {
        let mut zoom = ZoomState::new();
        zoom.gesture_start();
        zoom.gesture_update(100.0, 0.0, 0.0);
        assert_eq!(zoom.scale(), MAX_ZOOM);
    }

    #[test]
    fn collapsing_to_rest_zeroes_the_pan() {
        let mut zoom = ZoomState::new();
        zoom.gesture_start();
        zoom.gesture_update(2.0, 60.0, 30.0);
        zoom.gesture_end();

        zoom.gesture_start();
        zoom.gesture_update(0.25, 5.0, 5.0);

        assert!(zoom.transform().is_identity());
    }

    #[test]
    fn pan_is_unbounded_by_default() {
        let mut zoom = ZoomState::new();
        zoom.gesture_start();
        zoom.gesture_update(2.0, 10_000.0, -10_000.0);

        assert_eq!(zoom.transform().translate_x, 10_000.0);
        assert_eq!(zoom.transform().translate_y, -10_000.0);
    }

    #[test]
    fn configured_bounds_clamp_pan_to_the_overhang() {
        let mut zoom = ZoomState::new().with_pan_bounds(200.0, 100.0);
        zoom.gesture_start();
        zoom.gesture_update(2.0, 10_000.0, -10_000.0);

        // At scale 2 the overhang is (2 - 1) * half-extent per axis.
        assert_eq!(zoom.transform().translate_x, 200.0);
        assert_eq!(zoom.transform().translate_y, -100.0);
    }

    #[test]
    fn malformed_events_are_dropped() {
        let mut zoom = ZoomState::new();
        zoom.gesture_start();
        zoom.gesture_update(2.0, 10.0, 10.0);

        zoom.gesture_update(f64::NAN, 0.0, 0.0);
        zoom.gesture_update(2.0, f64::INFINITY, 0.0);

        assert_eq!(zoom.scale(), 2.0);
        assert_eq!(zoom.transform().translate_x, 10.0);
    }

    #[test]
    fn transform_composes_translate_then_scale() {
        let transform = Transform {
            scale: 2.5,
            translate_x: 12.0,
            translate_y: -4.0,
        };
        assert_eq!(transform.to_css(), "translate3d(12px, -4px, 0) scale(2.5)");
    }
}
