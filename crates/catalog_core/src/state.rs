use catalog_logging::{catalog_debug, catalog_info, catalog_warn};

use crate::product::{CreatedProduct, DraftError, ListedProduct, Product, ProductDraft};
use crate::routes::{Action, Loader, RouteTable, ViewKind, HOME_PATH};
use crate::view_model::AppViewModel;
use crate::Effect;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub reason: String,
}

impl LoadFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure {
    pub reason: String,
}

impl SubmitFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Outcome of a route's loader as seen by its view.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Resolved(T),
    Failed(LoadFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Pending { request_id: RequestId },
    Failed(SubmitFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListPage {
    pub(crate) request_id: Option<RequestId>,
    pub(crate) products: LoadState<Vec<ListedProduct>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FormPage {
    pub(crate) action: Option<Action>,
    pub(crate) draft: ProductDraft,
    pub(crate) validation: Option<DraftError>,
    pub(crate) submission: SubmitState,
    pub(crate) created: Option<CreatedProduct>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Page {
    Shell,
    ProductList(ListPage),
    ProductForm(FormPage),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    routes: RouteTable,
    location: String,
    page: Page,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_routes(RouteTable::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State showing the shell at `/`; navigate to pick another initial route.
    pub fn with_routes(routes: RouteTable) -> Self {
        Self {
            routes,
            location: HOME_PATH.to_string(),
            page: Page::Shell,
            next_request_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(&self.location, &self.page, self.dirty)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Mounts a fresh view instance for `location`. Every visit starts from
    /// scratch, so a list view always issues a new read.
    pub(crate) fn navigate(&mut self, location: String) -> Vec<Effect> {
        let entry = self.routes.resolve(&location).cloned();
        catalog_info!("Navigate to {} (route found: {})", location, entry.is_some());
        self.location = location;
        self.mark_dirty();

        let Some(entry) = entry else {
            self.page = Page::NotFound;
            return Vec::new();
        };

        match entry.view {
            ViewKind::Shell => {
                self.page = Page::Shell;
                Vec::new()
            }
            ViewKind::ProductList => match entry.on_enter {
                Some(Loader::FetchProducts) => {
                    let request_id = self.allocate_request_id();
                    self.page = Page::ProductList(ListPage {
                        request_id: Some(request_id),
                        products: LoadState::Pending,
                    });
                    vec![Effect::FetchProducts { request_id }]
                }
                None => {
                    self.page = Page::ProductList(ListPage {
                        request_id: None,
                        products: LoadState::Resolved(Vec::new()),
                    });
                    Vec::new()
                }
            },
            ViewKind::ProductForm => {
                self.page = Page::ProductForm(FormPage {
                    action: entry.on_submit,
                    draft: ProductDraft::default(),
                    validation: None,
                    submission: SubmitState::Idle,
                    created: None,
                });
                Vec::new()
            }
        }
    }

    pub(crate) fn apply_products_loaded(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<Product>, LoadFailure>,
    ) {
        let Page::ProductList(page) = &mut self.page else {
            catalog_debug!("Discarding product list {}: list view no longer mounted", request_id);
            return;
        };
        if page.request_id != Some(request_id) || !matches!(page.products, LoadState::Pending) {
            catalog_debug!(
                "Discarding stale product list {} (current {:?})",
                request_id,
                page.request_id
            );
            return;
        }

        page.products = match result {
            Ok(records) => {
                let received = records.len();
                let listed: Vec<ListedProduct> = records
                    .into_iter()
                    .filter_map(Product::into_listed)
                    .collect();
                if listed.len() != received {
                    catalog_warn!(
                        "Dropped {} product(s) without title or thumbnail",
                        received - listed.len()
                    );
                }
                catalog_info!("Product list {} resolved with {} item(s)", request_id, listed.len());
                LoadState::Resolved(listed)
            }
            Err(failure) => {
                catalog_warn!("Product list {} failed: {}", request_id, failure.reason);
                LoadState::Failed(failure)
            }
        };
        self.mark_dirty();
    }

    pub(crate) fn set_title(&mut self, title: String) {
        if let Page::ProductForm(form) = &mut self.page {
            form.draft.title = title;
            if form.validation.as_ref().is_some_and(|err| err.field() == crate::Field::Title) {
                form.validation = None;
            }
            self.dirty = true;
        }
    }

    pub(crate) fn set_price(&mut self, price: String) {
        if let Page::ProductForm(form) = &mut self.page {
            form.draft.price = price;
            if form.validation.as_ref().is_some_and(|err| err.field() == crate::Field::Price) {
                form.validation = None;
            }
            self.dirty = true;
        }
    }

    /// Validates the draft and, when it passes, starts a submission.
    pub(crate) fn submit(&mut self) -> Vec<Effect> {
        let request_id = self.next_request_id;
        let Page::ProductForm(form) = &mut self.page else {
            return Vec::new();
        };
        if let SubmitState::Pending { request_id } = form.submission {
            catalog_debug!("Submit ignored: request {} still outstanding", request_id);
            return Vec::new();
        }
        let Some(Action::CreateProduct) = form.action else {
            catalog_warn!("Submit ignored: route has no action");
            return Vec::new();
        };

        let product = match form.draft.validate().and_then(|()| form.draft.to_new_product()) {
            Ok(product) => product,
            Err(err) => {
                catalog_debug!("Submit rejected by input validation: {}", err);
                form.validation = Some(err);
                self.dirty = true;
                return Vec::new();
            }
        };

        form.validation = None;
        form.submission = SubmitState::Pending { request_id };
        self.next_request_id += 1;
        self.dirty = true;
        catalog_info!("Submitting product {:?} as request {}", product.title, request_id);
        vec![Effect::CreateProduct {
            request_id,
            product,
        }]
    }

    pub(crate) fn apply_created(
        &mut self,
        request_id: RequestId,
        result: Result<CreatedProduct, SubmitFailure>,
    ) {
        let Page::ProductForm(form) = &mut self.page else {
            catalog_debug!("Discarding create result {}: form no longer mounted", request_id);
            return;
        };
        if form.submission != (SubmitState::Pending { request_id }) {
            catalog_debug!("Discarding stale create result {}", request_id);
            return;
        }

        match result {
            Ok(created) => {
                catalog_info!("Product created with id {}", created.id);
                form.created = Some(created);
                form.submission = SubmitState::Idle;
                form.draft.clear();
            }
            Err(failure) => {
                catalog_warn!("Create request {} failed: {}", request_id, failure.reason);
                form.created = None;
                form.submission = SubmitState::Failed(failure);
            }
        }
        self.dirty = true;
    }
}
