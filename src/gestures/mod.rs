//! Gesture recognition seam and per-surface binding lifecycle.
//!
//! Platform gesture libraries hide behind the narrow [`GestureRecognizer`]
//! trait; the crate only ever sees semantic [`GestureEvent`]s arriving on a
//! channel in input order. [`GestureBinding`] owns the attach/release
//! lifecycle for one surface and is safe against early attachment (surface
//! not mounted yet), double release, and server execution contexts where no
//! pointer input exists.

pub mod binding;
pub mod recognizer;

pub use binding::{AttachOutcome, GestureBinding};
pub use recognizer::{
    GestureEvent, GestureRecognizer, GestureSink, InputCapability, RecognizerHandle,
};
