//! Race-safe synchronization of remote resources.
//!
//! A [`ResourceHook`] binds a [`Resource`] descriptor to a parameter tuple.
//! Whenever the parameters or the [`RefreshToken`] change, the hook starts a
//! fetch and exposes `{data, loading, error}` through [`RequestState`].
//!
//! # Ordering
//!
//! Every fetch start bumps a per-hook generation counter. A settling fetch
//! commits only if its generation is still current, so the most recently
//! *initiated* fetch wins regardless of arrival order. Superseded requests are
//! not aborted on the wire; their results are dropped when they arrive.
//!
//! # Example
//!
//! ```
//! use serde_json::{Value, json};
//! use tradeboard_api::ApiRequest;
//! use tradeboard_sync::{Commit, DecodeError, RefreshToken, Resource, ResourceHook};
//!
//! struct Greeting;
//!
//! impl Resource for Greeting {
//!     type Params = String;
//!     type Data = String;
//!
//!     fn name(&self) -> &'static str {
//!         "greeting"
//!     }
//!
//!     fn request(&self, who: &String) -> Option<ApiRequest> {
//!         Some(ApiRequest::get(format!("/hello/{who}")))
//!     }
//!
//!     fn decode(&self, _: &String, payload: Option<Value>) -> Result<String, DecodeError> {
//!         Ok(serde_json::from_value(payload.ok_or(DecodeError::Empty)?)?)
//!     }
//! }
//!
//! let hook = ResourceHook::new(Greeting);
//! let stale = hook.observe(&"ana".to_string(), RefreshToken::default()).unwrap();
//! let fresh = hook.observe(&"luis".to_string(), RefreshToken::default()).unwrap();
//!
//! assert_eq!(fresh.settle(Ok(Some(json!("hola luis")))), Commit::Applied);
//! assert_eq!(stale.settle(Ok(Some(json!("hola ana")))), Commit::Discarded);
//! assert_eq!(hook.state().data, "hola luis");
//! ```

mod hook;
mod resource;
mod state;

pub use hook::{Commit, PendingFetch, ResourceHook};
pub use resource::{DecodeError, FetchError, Resource, StalePolicy};
pub use state::{Phase, RefreshToken, RequestState};
