use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::handoff::HandoffStore;
use crate::models::{ProductId, ProductSnapshot};

/// Deadline for the fetch-vs-timer race. The detail view must be allowed to
/// render by this point no matter what the backend is doing.
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(2000);

/// Boxed future returned by [`ProductFetcher::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ProductSnapshot, FetchError>> + Send + 'a>>;

/// The HTTP data-access collaborator, narrowed to the single call the
/// resolver makes.
pub trait ProductFetcher: Send + Sync {
    fn fetch(&self, id: &ProductId) -> FetchFuture<'_>;
}

/// Why a fetch produced no snapshot. None of these escape the resolver;
/// they all collapse to [`ResolutionOutcome::Unresolved`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// Where a resolution is executing. Injected at construction so the resolver
/// is testable under both contexts without a real renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server render pass. Successful fetches are written to the handoff
    /// store for the client pass that follows.
    Server,
    /// Browser render pass.
    Browser,
}

impl ExecutionContext {
    pub fn is_server(self) -> bool {
        matches!(self, Self::Server)
    }
}

/// Result of one resolution. Absence of data is a representable value, not
/// an error: the view gates on this and renders a fallback on `Unresolved`
/// instead of a blank page.
#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
    Resolved(ProductSnapshot),
    Unresolved,
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn snapshot(&self) -> Option<&ProductSnapshot> {
        match self {
            Self::Resolved(snapshot) => Some(snapshot),
            Self::Unresolved => None,
        }
    }
}

/// Fetch-vs-deadline race with a server-to-client handoff fast path.
///
/// Runs once per navigation, before the view renders with data. The fetch
/// and the deadline timer start together; whichever settles first wins and
/// the loser is dropped, so a late-arriving response can never be observed.
pub struct ResolutionRace {
    fetcher: Arc<dyn ProductFetcher>,
    handoff: Arc<HandoffStore>,
    context: ExecutionContext,
    deadline: Duration,
}

impl ResolutionRace {
    pub fn new(
        fetcher: Arc<dyn ProductFetcher>,
        handoff: Arc<HandoffStore>,
        context: ExecutionContext,
    ) -> Self {
        Self {
            fetcher,
            handoff,
            context,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Resolve a snapshot for `id` within the deadline bound.
    ///
    /// Never hangs and never panics past this boundary: no id, a slow
    /// backend, a rejected fetch, and a response for the wrong id all
    /// collapse to `Unresolved`. A handoff slot stored for exactly this id
    /// is consumed without any network call.
    pub async fn resolve(&self, id: Option<&ProductId>) -> ResolutionOutcome {
        let Some(id) = id else {
            // Nothing to load; not an error.
            return ResolutionOutcome::Unresolved;
        };

        if let Some(snapshot) = self.handoff.take(id) {
            debug!(id = %id, "resolution served from handoff slot");
            return ResolutionOutcome::Resolved(snapshot);
        }

        match timeout(self.deadline, self.fetcher.fetch(id)).await {
            Ok(Ok(snapshot)) => {
                if snapshot.id != *id {
                    // The race must never hand the view a different product
                    // than the navigation asked for.
                    warn!(requested = %id, received = %snapshot.id, "discarding snapshot for wrong id");
                    return ResolutionOutcome::Unresolved;
                }
                if self.context.is_server() {
                    self.handoff.put(id.clone(), snapshot.clone());
                }
                ResolutionOutcome::Resolved(snapshot)
            }
            Ok(Err(err)) => {
                warn!(id = %id, error = %err, "product fetch failed");
                ResolutionOutcome::Unresolved
            }
            Err(_) => {
                warn!(id = %id, deadline_ms = self.deadline.as_millis() as u64, "deadline elapsed before fetch settled");
                ResolutionOutcome::Unresolved
            }
        }
    }
}
