use serde_json::Value;
use std::sync::Arc;
use tradeboard_api::Transport;
use tradeboard_resources::{
    LOW_STOCK_THRESHOLD, Page, Product, ProductList, ProductQuery, ProductStats, StockStats,
};
use tradeboard_sync::{RequestState, ResourceHook};

use super::run;
use crate::crud::{CrudController, Messages, MutationError};
use crate::notify::Notifier;
use crate::pagination::Pagination;

const PRODUCTS_PATH: &str = "/api/productos";

const MESSAGES: Messages = Messages {
    created: "Product created",
    updated: "Product updated",
    deleted: "Product deleted",
    save_failed: "Could not save the product",
    delete_failed: "Could not delete the product",
    confirm_delete: "Delete this product? This cannot be undone.",
};

/// Searchable product list with stock statistics.
pub struct ProductsPage {
    transport: Arc<dyn Transport>,
    list: ResourceHook<ProductList>,
    stats: ResourceHook<ProductStats>,
    pagination: Pagination,
    search: String,
    crud: CrudController<Product>,
}

impl ProductsPage {
    /// Creates the page on its first page with no search.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            list: ResourceHook::new(ProductList),
            stats: ResourceHook::with_initial(ProductStats, &LOW_STOCK_THRESHOLD),
            pagination: Pagination::default(),
            search: String::new(),
            crud: CrudController::new(PRODUCTS_PATH, MESSAGES, notifier),
        }
    }

    /// Parameters the list is fetched with.
    #[must_use]
    pub fn query(&self) -> ProductQuery {
        ProductQuery {
            page: self.pagination.page(),
            limit: self.pagination.limit(),
            search: self.search.clone(),
        }
    }

    /// Fetches whatever changed since the last sync.
    pub async fn sync(&mut self) {
        let transport = &*self.transport;
        let refresh = self.crud.refresh();
        futures::join!(
            run(self.list.observe(&self.query(), refresh), transport),
            run(self.stats.observe(&LOW_STOCK_THRESHOLD, refresh), transport),
        );
        self.pagination.set_total(self.list.read(|s| s.data.total));
    }

    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Changes the search text and returns to the first page.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim_start().to_string();
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
    pub fn list(&self) -> RequestState<Page<Product>> {
        self.list.state()
    }

    /// Stock counters; zero while they load.
    #[must_use]
    pub fn stock(&self) -> StockStats {
        self.stats.read(|s| {
            if s.loading {
                StockStats {
                    umbral: s.data.umbral,
                    ..StockStats::default()
                }
            } else {
                s.data
            }
        })
    }

    /// Statistics state, including its error.
    #[must_use]
    pub fn stats(&self) -> RequestState<StockStats> {
        self.stats.state()
    }

    /// Form and delete flows.
    #[must_use]
    pub fn crud(&self) -> &CrudController<Product> {
        &self.crud
    }

    /// Form and delete flows.
    pub fn crud_mut(&mut self) -> &mut CrudController<Product> {
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

    /// Deletes the product awaiting confirmation.
    ///
    /// # Errors
    ///
    /// See [`CrudController::confirm_delete`].
    pub async fn confirm_delete(&mut self) -> Result<Option<String>, MutationError> {
        self.crud.confirm_delete(&*self.transport).await
    }
}

impl core::fmt::Debug for ProductsPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductsPage")
            .field("query", &self.query())
            .field("pagination", &self.pagination)
            .field("crud", &self.crud)
            .finish_non_exhaustive()
    }
}
