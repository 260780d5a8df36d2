//! Per-hook request state and refresh tokens.

/// Lifecycle phase of a [`RequestState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been fetched yet and nothing is in flight.
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// The last authoritative fetch succeeded.
    Ready,
    /// The last authoritative fetch failed.
    Failed,
}

/// Data, loading flag and error of one synchronized resource.
///
/// Starts with the resource's empty data and `loading == true`. Each settled
/// authoritative fetch clears `loading` and either replaces `data` or sets
/// `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    /// Last committed data (or the resource's empty form).
    pub data: T,
    /// Whether a fetch is outstanding.
    pub loading: bool,
    /// Message of the last failure, cleared when a new fetch starts.
    pub error: Option<String>,
    settled: bool,
}

impl<T> RequestState<T> {
    /// Creates a state holding `data` and waiting for its first fetch.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            loading: true,
            error: None,
            settled: false,
        }
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.settled {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Returns `true` once any fetch has settled.
    #[must_use]
    pub fn has_settled(&self) -> bool {
        self.settled
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn idle(&mut self) {
        self.loading = false;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.data = data;
        self.error = None;
        self.loading = false;
        self.settled = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
        self.settled = true;
    }
}

impl<T: Default> Default for RequestState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Counter whose increment forces dependent hooks to fetch again.
///
/// Held by a view; mutations bump it after they succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshToken(u64);

impl RefreshToken {
    /// Advances the token.
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}
