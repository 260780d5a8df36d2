//! Cookie session against the primary backend.

use serde_json::json;
use std::sync::Arc;
use tradeboard_api::{ApiError, ApiRequest, Transport};
use tradeboard_resources::{Profile, UserProfile};
use tradeboard_sync::Resource;

/// Login path.
pub const LOGIN_PATH: &str = "/api/auth/login";
/// Logout path.
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Current user and the login/logout flows.
///
/// Credentials live in the transport's cookie store; this type only tracks
/// who is signed in. It is passed explicitly to whatever needs it.
pub struct Session {
    transport: Arc<dyn Transport>,
    user: Option<UserProfile>,
    loading: bool,
    checking: bool,
}

impl Session {
    /// Creates a session that has not checked for a user yet.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            user: None,
            loading: false,
            checking: true,
        }
    }

    /// The signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether a login is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the initial profile check has not finished.
    #[must_use]
    pub fn is_checking(&self) -> bool {
        self.checking
    }

    /// Loads the profile of an existing session cookie, if any.
    pub async fn check(&mut self) -> Option<&UserProfile> {
        self.user = self.fetch_profile().await.ok().flatten();
        self.checking = false;
        self.user.as_ref()
    }

    /// Signs in and loads the profile. Returns whether both succeeded.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        self.loading = true;
        let body = json!({ "nombre_usuario": username, "contrasenia": password });
        let outcome = match self
            .transport
            .send(ApiRequest::post(LOGIN_PATH).with_body(body))
            .await
        {
            Ok(_) => self.fetch_profile().await,
            Err(err) => Err(err),
        };
        self.loading = false;

        match outcome {
            Ok(Some(user)) => {
                tracing::info!(user = %user.nombre_usuario, "signed in");
                self.user = Some(user);
                true
            }
            Ok(None) => {
                tracing::warn!(%username, "login returned no profile");
                self.user = None;
                false
            }
            Err(err) => {
                tracing::warn!(%username, error = %err, "login failed");
                self.user = None;
                false
            }
        }
    }

    /// Signs out. The user is cleared even if the backend call fails.
    pub async fn logout(&mut self) {
        if let Err(err) = self.transport.send(ApiRequest::post(LOGOUT_PATH)).await {
            tracing::warn!(error = %err, "logout request failed");
        }
        self.user = None;
    }

    async fn fetch_profile(&self) -> Result<Option<UserProfile>, ApiError> {
        let resource = Profile;
        let Some(request) = resource.request(&()) else {
            return Ok(None);
        };
        let payload = self.transport.send(request).await?;
        // A profile body that does not decode means no usable session.
        Ok(resource.decode(&(), payload).ok().flatten())
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("loading", &self.loading)
            .field("checking", &self.checking)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tradeboard_api::Method;
    use tradeboard_api::testing::{Reply, ScriptedTransport};

    fn backend() -> Arc<ScriptedTransport> {
        Arc::new(ScriptedTransport::default())
    }

    #[tokio::test]
    async fn check_without_cookie() {
        let backend = backend();
        backend.on(Method::GET, Profile::PATH, Reply::Status(401, None));
        let mut session = Session::new(backend.clone());
        assert!(session.is_checking());

        assert!(session.check().await.is_none());
        assert!(!session.is_checking());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_posts_credentials_then_loads_profile() {
        let backend = backend();
        backend.on(Method::POST, LOGIN_PATH, Reply::Empty);
        backend.on_get(Profile::PATH, json!({ "nombre_usuario": "ana" }));
        let mut session = Session::new(backend.clone());

        assert!(session.login("ana", "secreto").await);
        assert_eq!(session.user().unwrap().nombre_usuario, "ana");
        assert!(!session.is_loading());

        let call = backend.last_call(LOGIN_PATH).unwrap();
        assert_eq!(
            call.body,
            Some(json!({ "nombre_usuario": "ana", "contrasenia": "secreto" }))
        );
    }

    #[tokio::test]
    async fn rejected_login() {
        let backend = backend();
        backend.on(
            Method::POST,
            LOGIN_PATH,
            Reply::Status(401, Some(json!({ "message": "Credenciales inválidas" }))),
        );
        let mut session = Session::new(backend.clone());

        assert!(!session.login("ana", "x").await);
        assert!(session.user().is_none());
        assert_eq!(backend.count(&Method::GET, Profile::PATH), 0);
    }

    #[tokio::test]
    async fn logout_clears_user_even_on_failure() {
        let backend = backend();
        backend.on(Method::POST, LOGIN_PATH, Reply::Empty);
        backend.on_get(Profile::PATH, json!({ "nombre_usuario": "ana" }));
        backend.on(Method::POST, LOGOUT_PATH, Reply::Network("reset".into()));
        let mut session = Session::new(backend.clone());
        session.login("ana", "secreto").await;

        session.logout().await;
        assert!(!session.is_authenticated());
        assert_eq!(backend.count(&Method::POST, LOGOUT_PATH), 1);
    }
}
