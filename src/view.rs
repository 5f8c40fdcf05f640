use crate::api::ProductsApi;
use crate::config::SyncPolicy;
use crate::error::{Error, Result};
use crate::form::{now_timestamp, PlaceholderIds, ProductForm};
use crate::models::Product;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Loading,
    Ready,
}

/// Everything the product screen shows: the loading flag, the list, the form
/// and the row being edited.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListView {
    pub state: ViewState,
    pub products: Vec<Product>,
    pub form: ProductForm,
    pub editing_id: Option<i64>,
}

impl ProductListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.state == ViewState::Loading
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn finish_loading(&mut self, products: Vec<Product>) {
        self.products = products;
        self.state = ViewState::Ready;
    }

    pub fn handle_input_change(&mut self, field: &str, value: impl Into<String>) {
        self.form.handle_input_change(field, value);
    }

    pub fn start_edit(&mut self, product: &Product) {
        self.form = ProductForm::from_product(product);
        self.editing_id = Some(product.id);
    }

    pub fn apply_created(&mut self, product: Product) {
        self.products.push(product);
        self.form = ProductForm::default();
    }

    /// Replaces the row with the same id, if it is still there, and leaves edit mode.
    pub fn apply_updated(&mut self, product: Product) {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
        }
        self.form = ProductForm::default();
        self.editing_id = None;
    }

    pub fn apply_deleted(&mut self, id: i64) {
        self.products.retain(|p| p.id != id);
    }
}

/// Drives the product screen: dispatches requests to the products service and
/// patches the local view once they settle.
///
/// The view lock is only held to read or patch state, never across a request,
/// so several requests can be in flight at once.
#[derive(Debug)]
pub struct ProductListController {
    api: ProductsApi,
    policy: SyncPolicy,
    ids: PlaceholderIds,
    view: Mutex<ProductListView>,
}

impl ProductListController {
    pub fn new(api: ProductsApi, policy: SyncPolicy) -> Self {
        Self {
            api,
            policy,
            ids: PlaceholderIds::new(),
            view: Mutex::new(ProductListView::new()),
        }
    }

    fn view(&self) -> Result<MutexGuard<'_, ProductListView>> {
        self.view.lock().map_err(|_| Error::StatePoisoned)
    }

    pub fn snapshot(&self) -> Result<ProductListView> {
        Ok(self.view()?.clone())
    }

    /// Fetches the full list. A failed first load ends loading with an empty
    /// list; a failed reload keeps the rows already shown.
    pub async fn load(&self) -> Result<()> {
        match self.api.list_products().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "products loaded");
                self.view()?.finish_loading(products);
            }
            Err(e) => {
                let mut view = self.view()?;
                if view.is_loading() {
                    tracing::warn!("could not load products: {e}");
                    view.finish_loading(Vec::new());
                } else {
                    tracing::warn!(count = view.products.len(), "reload failed, keeping current list: {e}");
                }
            }
        }
        Ok(())
    }

    pub fn handle_input_change(&self, field: &str, value: &str) -> Result<()> {
        self.view()?.handle_input_change(field, value);
        Ok(())
    }

    /// Copies the row into the form and marks it as the edit target.
    /// Returns `false` when no row has that id.
    pub fn start_edit(&self, id: i64) -> Result<bool> {
        let mut view = self.view()?;
        let Some(product) = view.product(id).cloned() else {
            return Ok(false);
        };
        view.start_edit(&product);
        Ok(true)
    }

    /// Updates when a row is being edited, creates otherwise.
    pub async fn submit(&self) -> Result<()> {
        let editing = self.view()?.editing_id.is_some();
        if editing {
            self.update().await.map(|_| ())
        } else {
            self.add().await.map(|_| ())
        }
    }

    pub async fn add(&self) -> Result<Product> {
        let payload = {
            let view = self.view()?;
            view.form.to_payload(self.ids.next(), &now_timestamp())
        };

        let outcome = self.api.create_product(&payload).await?;

        let product = match self.policy {
            SyncPolicy::Optimistic => {
                if !outcome.is_success() {
                    tracing::warn!(status = outcome.status, "create not accepted, keeping local entry");
                }
                Product::from(payload)
            }
            SyncPolicy::Confirmed => {
                let outcome = outcome.error_for_status()?;
                match (outcome.server_product(), outcome.server_id()) {
                    (Some(created), _) => created,
                    (None, Some(id)) => Product {
                        id,
                        ..Product::from(payload)
                    },
                    (None, None) => Product::from(payload),
                }
            }
        };

        self.view()?.apply_created(product.clone());
        Ok(product)
    }

    /// Returns `None` without a request when no row is being edited.
    pub async fn update(&self) -> Result<Option<Product>> {
        let (id, payload) = {
            let view = self.view()?;
            let Some(id) = view.editing_id else {
                return Ok(None);
            };
            (id, view.form.to_payload(id, &now_timestamp()))
        };

        let outcome = self.api.update_product(id, &payload).await?;

        match self.policy {
            SyncPolicy::Optimistic => {
                if !outcome.is_success() {
                    tracing::warn!(id, status = outcome.status, "update not accepted, keeping local entry");
                }
            }
            SyncPolicy::Confirmed => {
                outcome.error_for_status()?;
            }
        }

        let product = Product::from(payload);
        self.view()?.apply_updated(product.clone());
        Ok(Some(product))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let outcome = self.api.delete_product(id).await?;

        match self.policy {
            SyncPolicy::Optimistic => {
                if !outcome.is_success() {
                    tracing::warn!(id, status = outcome.status, "delete not accepted, removing anyway");
                }
            }
            SyncPolicy::Confirmed => {
                outcome.error_for_status()?;
            }
        }

        self.view()?.apply_deleted(id);
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        Ok(crate::render::render_view(&*self.view()?))
    }
}
