use crate::product::ProductId;
use crate::routes::{ADD_PRODUCT_PATH, HOME_PATH, PRODUCTS_PATH};
use crate::state::{FormPage, ListPage, LoadState, Page, SubmitState};

pub const LOADING_PRODUCTS_TEXT: &str = "Loading products...";
pub const LOAD_FAILED_TEXT: &str = "Failed to load products";
pub const SUBMIT_FAILED_TEXT: &str = "Failed to add product";
pub const SUBMIT_IDLE_LABEL: &str = "Add Product";
pub const SUBMIT_PENDING_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub location: String,
    pub page: PageView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Shell(ShellView),
    ProductList(ProductListView),
    ProductForm(ProductFormView),
    NotFound(NotFoundView),
}

/// What a button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Navigate(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub action: ButtonAction,
    pub enabled: bool,
}

impl ButtonView {
    fn navigate(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Navigate(path.to_string()),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub heading: String,
    pub buttons: Vec<ButtonView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductListView {
    pub buttons: Vec<ButtonView>,
    pub content: ListContent,
}

/// The suspense region of the list view.
#[derive(Debug, Clone, PartialEq)]
pub enum ListContent {
    Loading { message: String },
    Loaded { rows: Vec<ProductRowView> },
    Failed { heading: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRowView {
    pub id: ProductId,
    pub title: String,
    pub thumbnail_src: String,
    /// Accessible label of the thumbnail; always equal to the title.
    pub thumbnail_alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
    pub numeric: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormView {
    pub heading: String,
    pub title_field: FieldView,
    pub price_field: FieldView,
    pub submit: ButtonView,
    pub confirmation: Option<String>,
    pub error: Option<String>,
    pub buttons: Vec<ButtonView>,
}

impl ProductFormView {
    pub fn is_submitting(&self) -> bool {
        !self.submit.enabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundView {
    pub heading: String,
    pub message: String,
    pub buttons: Vec<ButtonView>,
}

impl PageView {
    /// Every button the current page exposes, in display order.
    pub fn buttons(&self) -> Vec<&ButtonView> {
        match self {
            PageView::Shell(view) => view.buttons.iter().collect(),
            PageView::ProductList(view) => view.buttons.iter().collect(),
            PageView::ProductForm(view) => std::iter::once(&view.submit)
                .chain(view.buttons.iter())
                .collect(),
            PageView::NotFound(view) => view.buttons.iter().collect(),
        }
    }
}

impl AppViewModel {
    pub(crate) fn from_state(location: &str, page: &Page, dirty: bool) -> Self {
        let page = match page {
            Page::Shell => PageView::Shell(shell_view()),
            Page::ProductList(list) => PageView::ProductList(list_view(list)),
            Page::ProductForm(form) => PageView::ProductForm(form_view(form)),
            Page::NotFound => PageView::NotFound(NotFoundView {
                heading: "Page not found".to_string(),
                message: format!("No page exists at {location}"),
                buttons: vec![ButtonView::navigate("Go to Home", HOME_PATH)],
            }),
        };
        Self {
            location: location.to_string(),
            page,
            dirty,
        }
    }
}

fn shell_view() -> ShellView {
    ShellView {
        heading: "Home".to_string(),
        buttons: vec![
            ButtonView::navigate("Go to Products", PRODUCTS_PATH),
            ButtonView::navigate("Add Product", ADD_PRODUCT_PATH),
        ],
    }
}

fn list_view(list: &ListPage) -> ProductListView {
    let content = match &list.products {
        LoadState::Pending => ListContent::Loading {
            message: LOADING_PRODUCTS_TEXT.to_string(),
        },
        LoadState::Resolved(products) => ListContent::Loaded {
            rows: products
                .iter()
                .map(|product| ProductRowView {
                    id: product.id(),
                    title: product.title().to_string(),
                    thumbnail_src: product.thumbnail().to_string(),
                    thumbnail_alt: product.title().to_string(),
                })
                .collect(),
        },
        // The panel text stays fixed whatever the underlying reason was.
        LoadState::Failed(_) => ListContent::Failed {
            heading: "Error".to_string(),
            message: LOAD_FAILED_TEXT.to_string(),
        },
    };
    ProductListView {
        buttons: vec![
            ButtonView::navigate("Go to Home", HOME_PATH),
            ButtonView::navigate("Add Product", ADD_PRODUCT_PATH),
        ],
        content,
    }
}

fn form_view(form: &FormPage) -> ProductFormView {
    let submitting = matches!(form.submission, SubmitState::Pending { .. });
    let field_error = |field: crate::Field| {
        form.validation
            .as_ref()
            .filter(|err| err.field() == field)
            .map(ToString::to_string)
    };

    ProductFormView {
        heading: "Add Product".to_string(),
        title_field: FieldView {
            name: "title".to_string(),
            label: "Title:".to_string(),
            placeholder: "Product title".to_string(),
            value: form.draft.title.clone(),
            required: true,
            numeric: false,
            error: field_error(crate::Field::Title),
        },
        price_field: FieldView {
            name: "price".to_string(),
            label: "Price:".to_string(),
            placeholder: "Product price".to_string(),
            value: form.draft.price.clone(),
            required: true,
            numeric: true,
            error: field_error(crate::Field::Price),
        },
        submit: ButtonView {
            label: if submitting {
                SUBMIT_PENDING_LABEL
            } else {
                SUBMIT_IDLE_LABEL
            }
            .to_string(),
            action: ButtonAction::Submit,
            enabled: !submitting,
        },
        confirmation: form
            .created
            .as_ref()
            .map(|created| format!("Product added: {} (ID: {})", created.title, created.id)),
        error: match &form.submission {
            SubmitState::Failed(_) => Some(SUBMIT_FAILED_TEXT.to_string()),
            _ => None,
        },
        buttons: vec![ButtonView::navigate("Go to Home", HOME_PATH)],
    }
}
