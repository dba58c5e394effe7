//! Navigation-time product resolution.
//!
//! This module decides, under a deadline, what a product-detail navigation
//! renders with:
//! - a handoff slot written by a server render pass for the same id,
//! - a fresh fetch, if it settles before the deadline,
//! - or nothing at all, which the view renders as a fallback.
//!
//! The central guarantee is that the caller is never left waiting: every
//! path produces a [`ResolutionOutcome`] within the deadline bound.

pub mod handoff;
pub mod race;

pub use handoff::{global_handoff, HandoffStore};
pub use race::{
    ExecutionContext, FetchError, FetchFuture, ProductFetcher, ResolutionOutcome, ResolutionRace,
    DEFAULT_DEADLINE,
};
