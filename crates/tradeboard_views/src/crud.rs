//! Create, update and delete flows shared by every page.

use serde_json::Value;
use std::sync::Arc;
use tradeboard_api::{ApiError, ApiRequest, Method, Transport};
use tradeboard_resources::{Forecast, Product, Purchase};
use tradeboard_sync::RefreshToken;

use crate::confirm::ConfirmGate;
use crate::modal::{ModalMode, ModalState};
use crate::notify::Notifier;

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// A record addressable by id under a collection path.
pub trait Record: Clone + Send + Sync {
    /// Id used in the item path.
    fn record_id(&self) -> String;
}

impl Record for Product {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Record for Purchase {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Record for Forecast {
    fn record_id(&self) -> String {
        self.id()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// A mutation did not go through.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    /// The backend rejected the request or could not be reached.
    #[error("{message}")]
    Rejected {
        /// Message shown to the user.
        message: String,
        /// Underlying failure.
        #[source]
        source: ApiError,
    },

    /// Submit was called with the form closed.
    #[error("the form is not open")]
    Closed,

    /// Edit mode without a record to edit.
    #[error("no record selected")]
    NoTarget,
}

impl MutationError {
    /// HTTP status of a rejection.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { source, .. } => source.status(),
            Self::Closed | Self::NoTarget => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// User-facing texts of one collection's mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    /// After a create.
    pub created: &'static str,
    /// After an update.
    pub updated: &'static str,
    /// After a delete.
    pub deleted: &'static str,
    /// When a create or update fails.
    pub save_failed: &'static str,
    /// When a delete fails.
    pub delete_failed: &'static str,
    /// Question asked before deleting.
    pub confirm_delete: &'static str,
}

/// Drives the form dialog, the delete confirmation and the mutations of one
/// collection.
///
/// Mutations go straight to the backend. A success bumps the
/// [`RefreshToken`] so the page's list hooks fetch again; a failure only
/// raises an error notification and leaves every displayed value alone.
pub struct CrudController<T: Record> {
    collection: String,
    messages: Messages,
    notifier: Arc<dyn Notifier>,
    refresh: RefreshToken,
    modal: ModalState<T>,
    confirm: ConfirmGate<String>,
}

impl<T: Record> CrudController<T> {
    /// Creates a controller for `collection`, e.g. `/api/compras`.
    pub fn new(collection: impl Into<String>, messages: Messages, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            collection: collection.into(),
            messages,
            notifier,
            refresh: RefreshToken::default(),
            modal: ModalState::default(),
            confirm: ConfirmGate::new(messages.confirm_delete),
        }
    }

    /// Collection path.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Path of one record, with the id percent-encoded.
    #[must_use]
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection, urlencoding::encode(id))
    }

    /// Token to pass to the hooks showing this collection.
    #[must_use]
    pub fn refresh(&self) -> RefreshToken {
        self.refresh
    }

    /// Forces dependent hooks to fetch again.
    pub fn invalidate(&mut self) {
        self.refresh.bump();
    }

    /// Form state.
    #[must_use]
    pub fn modal(&self) -> &ModalState<T> {
        &self.modal
    }

    /// Opens an empty form.
    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    /// Opens the form for `record`.
    pub fn open_edit(&mut self, record: T) {
        self.modal.open_edit(record);
    }

    /// Opens the regenerate form for `record`.
    pub fn open_regenerate(&mut self, record: T) {
        self.modal.open_regenerate(record);
    }

    /// Closes the form without submitting.
    pub fn close(&mut self) {
        self.modal.close();
    }

    /// Builds the request the form would send for `payload`.
    ///
    /// # Errors
    ///
    /// [`MutationError::Closed`] when the form is not open, and
    /// [`MutationError::NoTarget`] when editing without a record.
    pub fn submission(&self, payload: Value) -> Result<ApiRequest, MutationError> {
        if !self.modal.is_open() {
            return Err(MutationError::Closed);
        }
        let request = match self.modal.mode() {
            ModalMode::Create => ApiRequest::post(self.collection.clone()),
            ModalMode::Edit | ModalMode::Regenerate => {
                let id = self
                    .modal
                    .current()
                    .map(Record::record_id)
                    .filter(|id| !id.is_empty())
                    .ok_or(MutationError::NoTarget)?;
                ApiRequest::put(self.item_path(&id))
            }
        };
        Ok(request.with_body(payload))
    }

    /// Sends the form's `payload`.
    ///
    /// On success the form closes, the refresh token advances and a success
    /// notification is raised. On failure the form stays open and an error
    /// notification is raised.
    ///
    /// # Errors
    ///
    /// Returns a [`MutationError`] when nothing was sent or the backend
    /// rejected the request.
    pub async fn submit(&mut self, transport: &dyn Transport, payload: Value) -> Result<(), MutationError> {
        let request = self.submission(payload)?;
        let success = if request.method == Method::POST {
            self.messages.created
        } else {
            self.messages.updated
        };

        self.send(transport, request, success, self.messages.save_failed)
            .await?;
        self.modal.close();
        Ok(())
    }

    /// Asks for confirmation before deleting `id`. Sends nothing.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.confirm.request(id.into());
    }

    /// Dismisses the confirmation. Sends nothing.
    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    /// Confirmation dialog state.
    #[must_use]
    pub fn confirmation(&self) -> &ConfirmGate<String> {
        &self.confirm
    }

    /// Deletes the record awaiting confirmation.
    ///
    /// Returns the deleted id, or `None` when nothing was awaiting
    /// confirmation (no request is sent then). On failure the dialog stays
    /// open.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Rejected`] when the backend refused.
    pub async fn confirm_delete(&mut self, transport: &dyn Transport) -> Result<Option<String>, MutationError> {
        let Some(id) = self.confirm.pending().cloned() else {
            return Ok(None);
        };

        let request = ApiRequest::delete(self.item_path(&id));
        self.send(transport, request, self.messages.deleted, self.messages.delete_failed)
            .await?;
        self.confirm.cancel();
        Ok(Some(id))
    }

    async fn send(
        &mut self,
        transport: &dyn Transport,
        request: ApiRequest,
        success: &str,
        failure: &str,
    ) -> Result<(), MutationError> {
        let method = request.method.clone();
        let path = request.path.clone();

        match transport.send(request).await {
            Ok(_) => {
                tracing::info!(%method, %path, "mutation applied");
                self.refresh.bump();
                self.notifier.success(success);
                Ok(())
            }
            Err(source) => {
                tracing::warn!(%method, %path, error = %source, "mutation failed");
                self.notifier.error(failure);
                Err(MutationError::Rejected {
                    message: failure.to_string(),
                    source,
                })
            }
        }
    }
}

impl<T: Record> core::fmt::Debug for CrudController<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CrudController")
            .field("collection", &self.collection)
            .field("refresh", &self.refresh)
            .field("modal_open", &self.modal.is_open())
            .field("pending_delete", &self.confirm.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Level, NotificationLog};
    use serde_json::json;
    use tradeboard_api::testing::{Reply, ScriptedTransport};

    const MESSAGES: Messages = Messages {
        created: "Purchase created",
        updated: "Purchase updated",
        deleted: "Purchase deleted",
        save_failed: "Could not save the purchase",
        delete_failed: "Could not delete the purchase",
        confirm_delete: "Delete this purchase?",
    };

    fn controller() -> (CrudController<Purchase>, Arc<NotificationLog>) {
        let log = Arc::new(NotificationLog::new());
        let notifier: Arc<dyn Notifier> = log.clone();
        (CrudController::new("/api/compras", MESSAGES, notifier), log)
    }

    #[tokio::test]
    async fn create_bumps_token_and_closes_form() {
        let backend = ScriptedTransport::default();
        backend.on(Method::POST, "/api/compras", Reply::Json(json!({ "id": 9 })));
        let (mut crud, log) = controller();

        crud.open_create();
        crud.submit(&backend, json!({ "cantidad": 2 })).await.unwrap();

        assert_eq!(crud.refresh().value(), 1);
        assert!(!crud.modal().is_open());
        assert_eq!(log.last().unwrap().message, "Purchase created");
        let call = backend.last_call("/api/compras").unwrap();
        assert_eq!(call.body, Some(json!({ "cantidad": 2 })));
    }

    #[tokio::test]
    async fn edit_puts_to_item_path() {
        let backend = ScriptedTransport::default();
        backend.on(Method::PUT, "/api/compras/8", Reply::Empty);
        let (mut crud, log) = controller();

        crud.open_edit(Purchase {
            id: 8,
            ..Purchase::default()
        });
        crud.submit(&backend, json!({})).await.unwrap();

        assert_eq!(backend.count(&Method::PUT, "/api/compras/8"), 1);
        assert_eq!(log.last().unwrap().message, "Purchase updated");
    }

    #[tokio::test]
    async fn failed_save_keeps_form_open_and_token_unchanged() {
        let backend = ScriptedTransport::default();
        backend.on(
            Method::POST,
            "/api/compras",
            Reply::Status(400, Some(json!({ "message": "cantidad inválida" }))),
        );
        let (mut crud, log) = controller();

        crud.open_create();
        let err = crud.submit(&backend, json!({})).await.unwrap_err();

        assert_eq!(err.to_string(), "Could not save the purchase");
        assert_eq!(err.status(), Some(400));
        assert_eq!(crud.refresh().value(), 0);
        assert!(crud.modal().is_open());
        assert_eq!(log.count(Level::Error), 1);
    }

    #[tokio::test]
    async fn closed_form_sends_nothing() {
        let backend = ScriptedTransport::default();
        let (mut crud, _) = controller();

        let err = crud.submit(&backend, json!({})).await.unwrap_err();
        assert!(matches!(err, MutationError::Closed));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn cancelled_delete_sends_nothing() {
        let backend = ScriptedTransport::default();
        let (mut crud, log) = controller();

        crud.request_delete("8");
        assert!(crud.confirmation().is_open());
        crud.cancel_delete();

        assert_eq!(crud.confirm_delete(&backend).await.unwrap(), None);
        assert!(backend.calls().is_empty());
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete() {
        let backend = ScriptedTransport::default();
        backend.on(Method::DELETE, "/api/compras/8", Reply::Empty);
        let (mut crud, _) = controller();

        crud.request_delete("8");
        assert_eq!(crud.confirm_delete(&backend).await.unwrap(), Some("8".into()));
        assert!(!crud.confirmation().is_open());
        assert_eq!(crud.refresh().value(), 1);
    }

    #[tokio::test]
    async fn failed_delete_keeps_dialog_open() {
        let backend = ScriptedTransport::default();
        let (mut crud, log) = controller();

        crud.request_delete("8");
        assert!(crud.confirm_delete(&backend).await.is_err());

        assert_eq!(crud.confirmation().pending(), Some(&"8".to_string()));
        assert_eq!(crud.refresh().value(), 0);
        assert_eq!(log.last().unwrap().message, "Could not delete the purchase");
    }

    #[test]
    fn ids_are_encoded() {
        let (crud, _) = controller();
        assert_eq!(crud.item_path("a b/c"), "/api/compras/a%20b%2Fc");
    }
}
