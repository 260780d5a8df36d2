//! [`ResourceHook`]: parameter-driven, last-initiated-wins synchronization.

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tradeboard_api::{ApiError, ApiRequest, Transport};

use crate::resource::{FetchError, Resource, StalePolicy};
use crate::state::{RefreshToken, RequestState};

/// Whether a settled fetch was allowed to write state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The fetch was the most recently initiated one; state was updated.
    Applied,
    /// A newer fetch started (or the hook was disposed); the result was dropped.
    Discarded,
}

impl Commit {
    /// Returns `true` for [`Commit::Applied`].
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

struct Slot<R: Resource> {
    state: RequestState<R::Data>,
    // Bumped on every fetch start and on dispose. A fetch may commit only
    // while its captured generation is still the current one.
    generation: u64,
    last_seen: Option<(R::Params, RefreshToken)>,
}

/// Keeps one resource synchronized with its parameters.
///
/// [`observe`](Self::observe) diffs the parameters and refresh token against
/// the last seen values and, when they changed, starts a new fetch by
/// returning a [`PendingFetch`]. Starting a fetch supersedes every earlier
/// one: whatever order responses arrive in, only the most recently initiated
/// fetch commits.
///
/// No state is shared between hooks; each owns its own [`RequestState`].
pub struct ResourceHook<R: Resource> {
    resource: Arc<R>,
    slot: Arc<Mutex<Slot<R>>>,
}

impl<R: Resource> ResourceHook<R> {
    /// Creates a hook in the loading state with the resource's default data.
    #[must_use]
    pub fn new(resource: R) -> Self {
        Self::seeded(resource, RequestState::default())
    }

    /// Creates a hook in the loading state holding the resource's empty data
    /// for `params`.
    #[must_use]
    pub fn with_initial(resource: R, params: &R::Params) -> Self {
        let state = RequestState::new(resource.empty(params));
        Self::seeded(resource, state)
    }

    fn seeded(resource: R, state: RequestState<R::Data>) -> Self {
        Self {
            resource: Arc::new(resource),
            slot: Arc::new(Mutex::new(Slot {
                state,
                generation: 0,
                last_seen: None,
            })),
        }
    }

    /// Returns the resource descriptor.
    #[must_use]
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Compares `params` and `refresh` with the last seen values and starts a
    /// fetch when they differ (or on first call).
    ///
    /// Returns `None` when nothing changed or when the resource has nothing to
    /// fetch for these parameters; in the latter case earlier fetches are
    /// still superseded and `loading` is cleared.
    pub fn observe(&self, params: &R::Params, refresh: RefreshToken) -> Option<PendingFetch<R>> {
        let mut slot = self.slot.lock();
        let unchanged = slot
            .last_seen
            .as_ref()
            .is_some_and(|(seen, token)| seen == params && *token == refresh);
        if unchanged {
            return None;
        }
        slot.last_seen = Some((params.clone(), refresh));
        self.begin(&mut slot, params)
    }

    /// Starts a new fetch with the last seen parameters, regardless of change.
    pub fn refetch(&self) -> Option<PendingFetch<R>> {
        let mut slot = self.slot.lock();
        let (params, _) = slot.last_seen.clone()?;
        self.begin(&mut slot, &params)
    }

    /// Observes and, if a fetch started, runs it to completion.
    pub async fn sync(
        &self,
        transport: &dyn Transport,
        params: &R::Params,
        refresh: RefreshToken,
    ) -> Option<Commit> {
        let pending = self.observe(params, refresh)?;
        Some(pending.execute(transport).await)
    }

    /// Supersedes any outstanding fetch and forgets the last seen parameters.
    ///
    /// Called on unmount; results still in flight are discarded on arrival.
    pub fn dispose(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.last_seen = None;
    }

    /// Returns a snapshot of the state.
    #[must_use]
    pub fn state(&self) -> RequestState<R::Data> {
        self.slot.lock().state.clone()
    }

    /// Reads the state without cloning it.
    pub fn read<T>(&self, f: impl FnOnce(&RequestState<R::Data>) -> T) -> T {
        f(&self.slot.lock().state)
    }

    /// Returns the current fetch generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    fn begin(&self, slot: &mut Slot<R>, params: &R::Params) -> Option<PendingFetch<R>> {
        slot.generation += 1;

        let Some(request) = self.resource.request(params) else {
            slot.state.idle();
            return None;
        };

        if self.resource.on_start() == StalePolicy::Reset {
            slot.state.data = self.resource.empty(params);
        }
        slot.state.begin();

        tracing::debug!(
            resource = self.resource.name(),
            generation = slot.generation,
            path = %request.path,
            "fetch started"
        );

        Some(PendingFetch {
            generation: slot.generation,
            params: params.clone(),
            request,
            resource: Arc::clone(&self.resource),
            slot: Arc::clone(&self.slot),
        })
    }
}

impl<R: Resource> Drop for ResourceHook<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<R: Resource> core::fmt::Debug for ResourceHook<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("ResourceHook")
            .field("resource", &self.resource.name())
            .field("generation", &slot.generation)
            .field("state", &slot.state)
            .finish()
    }
}

/// One started fetch, waiting to be executed and settled.
///
/// Holds the generation captured when it started; [`settle`](Self::settle)
/// writes to the hook only if that generation is still current.
#[must_use = "a pending fetch does nothing until executed or settled"]
pub struct PendingFetch<R: Resource> {
    generation: u64,
    params: R::Params,
    request: ApiRequest,
    resource: Arc<R>,
    slot: Arc<Mutex<Slot<R>>>,
}

impl<R: Resource> PendingFetch<R> {
    /// The generation this fetch belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The request to send.
    #[must_use]
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// The parameters the fetch was started with.
    #[must_use]
    pub fn params(&self) -> &R::Params {
        &self.params
    }

    /// Returns `true` while no newer fetch has started.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.slot.lock().generation == self.generation
    }

    /// Sends the request through `transport` and settles with the result.
    pub async fn execute(self, transport: &dyn Transport) -> Commit {
        let result = transport.send(self.request.clone()).await;
        self.settle(result)
    }

    /// Commits `result` if this fetch is still the authoritative one.
    pub fn settle(self, result: Result<Option<Value>, ApiError>) -> Commit {
        let outcome = result.map_err(FetchError::from).and_then(|payload| {
            self.resource
                .decode(&self.params, payload)
                .map_err(FetchError::from)
        });

        let mut slot = self.slot.lock();
        if slot.generation != self.generation {
            tracing::debug!(
                resource = self.resource.name(),
                generation = self.generation,
                current = slot.generation,
                "discarding stale result"
            );
            return Commit::Discarded;
        }

        match outcome {
            Ok(data) => slot.state.succeed(data),
            Err(err) => {
                tracing::warn!(
                    resource = self.resource.name(),
                    error = %err,
                    "fetch failed"
                );
                if self.resource.on_failure() == StalePolicy::Reset {
                    slot.state.data = self.resource.empty(&self.params);
                }
                slot.state.fail(self.resource.describe_failure(&err));
            }
        }
        Commit::Applied
    }
}

impl<R: Resource> core::fmt::Debug for PendingFetch<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PendingFetch")
            .field("resource", &self.resource.name())
            .field("generation", &self.generation)
            .field("request", &self.request)
            .finish()
    }
}
