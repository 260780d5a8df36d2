//! The signed-in user's profile.

use serde_json::Value;
use tradeboard_api::ApiRequest;
use tradeboard_sync::{DecodeError, Resource};

use crate::records::UserProfile;

/// Profile of the session's user; `None` when the body is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Profile;

impl Profile {
    /// Path of the profile endpoint.
    pub const PATH: &'static str = "/api/profile";
}

impl Resource for Profile {
    type Params = ();
    type Data = Option<UserProfile>;

    fn name(&self) -> &'static str {
        "profile"
    }

    fn request(&self, _: &()) -> Option<ApiRequest> {
        Some(ApiRequest::get(Self::PATH))
    }

    fn decode(&self, _: &(), payload: Option<Value>) -> Result<Option<UserProfile>, DecodeError> {
        payload
            .filter(|body| !body.is_null())
            .map(serde_json::from_value)
            .transpose()
            .map_err(DecodeError::from)
    }

    fn fallback_message(&self) -> &'static str {
        "Not signed in."
    }
}
