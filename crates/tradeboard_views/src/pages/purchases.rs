use serde_json::Value;
use std::sync::Arc;
use tradeboard_api::Transport;
use tradeboard_resources::{
    Page, Product, ProductCatalog, Purchase, PurchaseFilter, PurchaseList, PurchaseSummary,
    PurchaseTotals,
};
use tradeboard_sync::{RefreshToken, RequestState, ResourceHook};

use super::run;
use crate::crud::{CrudController, Messages, MutationError};
use crate::notify::Notifier;
use crate::pagination::Pagination;

const PURCHASES_PATH: &str = "/api/compras";

const MESSAGES: Messages = Messages {
    created: "Purchase created",
    updated: "Purchase updated",
    deleted: "Purchase deleted",
    save_failed: "Could not save the purchase",
    delete_failed: "Could not delete the purchase",
    confirm_delete: "Delete this purchase? This cannot be undone.",
};

/// Filterable purchase history with counters and the product catalog.
pub struct PurchasesPage {
    transport: Arc<dyn Transport>,
    list: ResourceHook<PurchaseList>,
    totals: ResourceHook<PurchaseTotals>,
    catalog: ResourceHook<ProductCatalog>,
    month: Option<String>,
    year: Option<i32>,
    product_id: Option<i64>,
    pagination: Pagination,
    crud: CrudController<Purchase>,
}

impl PurchasesPage {
    /// Creates the unfiltered page.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            list: ResourceHook::new(PurchaseList),
            totals: ResourceHook::new(PurchaseTotals),
            catalog: ResourceHook::new(ProductCatalog),
            month: None,
            year: None,
            product_id: None,
            pagination: Pagination::default(),
            crud: CrudController::new(PURCHASES_PATH, MESSAGES, notifier),
        }
    }

    /// Parameters the list is fetched with.
    #[must_use]
    pub fn filter(&self) -> PurchaseFilter {
        PurchaseFilter {
            month: self.month.clone(),
            year: self.year,
            product_id: self.product_id,
            page: self.pagination.page(),
            limit: self.pagination.limit(),
        }
    }

    /// Fetches whatever changed since the last sync.
    ///
    /// The catalog is fetched once; list and counters follow the filters and
    /// every successful mutation.
    pub async fn sync(&mut self) {
        let transport = &*self.transport;
        let refresh = self.crud.refresh();
        futures::join!(
            run(self.list.observe(&self.filter(), refresh), transport),
            run(self.totals.observe(&(), refresh), transport),
            run(self.catalog.observe(&(), RefreshToken::default()), transport),
        );
        self.pagination.set_total(self.list.read(|s| s.data.total));
    }

    /// Filters by month name; blank clears it. Returns to the first page.
    pub fn set_month(&mut self, month: Option<&str>) {
        self.month = month
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_uppercase);
        self.pagination.reset();
    }

    /// Filters by year. Returns to the first page.
    pub fn set_year(&mut self, year: Option<i32>) {
        self.year = year;
        self.pagination.reset();
    }

    /// Filters by product. Returns to the first page.
    pub fn set_product(&mut self, product_id: Option<i64>) {
        self.product_id = product_id;
        self.pagination.reset();
    }

    /// Drops every filter and returns to the first page.
    pub fn clear_filters(&mut self) {
        self.month = None;
        self.year = None;
        self.product_id = None;
        self.pagination.reset();
    }

    /// Pagination state.
    #[must_use]
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Pagination controls.
    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    /// List state.
    #[must_use]
    pub fn list(&self) -> RequestState<Page<Purchase>> {
        self.list.state()
    }

    /// Purchase counters.
    #[must_use]
    pub fn totals(&self) -> RequestState<PurchaseSummary> {
        self.totals.state()
    }

    /// Products available for the form's selector.
    #[must_use]
    pub fn catalog(&self) -> Vec<Product> {
        self.catalog.read(|s| s.data.clone())
    }

    /// Name of a product from the catalog.
    #[must_use]
    pub fn product_name(&self, id: i64) -> Option<String> {
        self.catalog
            .read(|s| s.data.iter().find(|p| p.id == id).map(|p| p.nombre.clone()))
    }

    /// Form and delete flows.
    #[must_use]
    pub fn crud(&self) -> &CrudController<Purchase> {
        &self.crud
    }

    /// Form and delete flows.
    pub fn crud_mut(&mut self) -> &mut CrudController<Purchase> {
        &mut self.crud
    }

    /// Submits the open form.
    ///
    /// # Errors
    ///
    /// See [`CrudController::submit`].
    pub async fn submit(&mut self, payload: Value) -> Result<(), MutationError> {
        self.crud.submit(&*self.transport, payload).await
    }

    /// Deletes the purchase awaiting confirmation.
    ///
    /// # Errors
    ///
    /// See [`CrudController::confirm_delete`].
    pub async fn confirm_delete(&mut self) -> Result<Option<String>, MutationError> {
        self.crud.confirm_delete(&*self.transport).await
    }
}

impl core::fmt::Debug for PurchasesPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PurchasesPage")
            .field("filter", &self.filter())
            .field("crud", &self.crud)
            .finish_non_exhaustive()
    }
}
