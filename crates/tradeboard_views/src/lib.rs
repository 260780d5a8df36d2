//! Page orchestration for tradeboard.
//!
//! Pages assemble [`tradeboard_resources`] hooks, derived metrics and the
//! create/update/delete flows into state a front end can render. Every page
//! follows the same cycle:
//!
//! 1. UI actions change parameters (year, page, search, filters).
//! 2. `sync()` observes each hook and runs the fetches that started.
//! 3. Readers render from the hooks' `{data, loading, error}` state.
//! 4. Mutations go through a [`CrudController`]; a success bumps its
//!    refresh token so the next `sync()` fetches the list again.
//!
//! Collaborators are injected: transports, a [`Notifier`] and a [`Session`]
//! are constructor arguments, never looked up globally.

mod confirm;
mod crud;
mod modal;
mod notify;
mod pages;
mod pagination;
mod session;

pub use confirm::ConfirmGate;
pub use crud::{CrudController, Messages, MutationError, Record};
pub use modal::{ModalMode, ModalState};
pub use notify::{Level, NOTIFICATION_CAPACITY, Notification, NotificationLog, Notifier};
pub use pages::{
    DashboardPage, ForecastsPage, NEWEST_YEAR, OLDEST_YEAR, ProductsPage, PurchasesPage,
    forecast_chart, forecast_years, regenerate_body,
};
pub use pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, Pagination};
pub use session::{LOGIN_PATH, LOGOUT_PATH, Session};
