//! Catalog core: pure routing/state machine and view-model helpers.
mod effect;
mod msg;
mod product;
mod routes;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use product::{
    CreatedProduct, DraftError, Field, ListedProduct, NewProduct, Product, ProductDraft, ProductId,
};
pub use routes::{
    normalize_path, Action, Loader, RouteEntry, RouteTable, ViewKind, ADD_PRODUCT_PATH, HOME_PATH,
    PRODUCTS_PATH,
};
pub use state::{AppState, LoadFailure, LoadState, RequestId, SubmitFailure, SubmitState};
pub use update::update;
pub use view_model::{
    AppViewModel, ButtonAction, ButtonView, FieldView, ListContent, NotFoundView, PageView,
    ProductFormView, ProductListView, ProductRowView, ShellView, LOADING_PRODUCTS_TEXT,
    LOAD_FAILED_TEXT, SUBMIT_FAILED_TEXT, SUBMIT_IDLE_LABEL, SUBMIT_PENDING_LABEL,
};
