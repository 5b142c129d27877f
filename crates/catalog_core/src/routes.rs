//! Declarative route table: which view a path shows and what it loads or submits.

pub const HOME_PATH: &str = "/";
pub const PRODUCTS_PATH: &str = "/products";
pub const ADD_PRODUCT_PATH: &str = "/add-product";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Shell,
    ProductList,
    ProductForm,
}

/// Read operation run when a route becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    FetchProducts,
}

/// Write operation run when the route's form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateProduct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub view: ViewKind,
    pub on_enter: Option<Loader>,
    pub on_submit: Option<Action>,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, view: ViewKind) -> Self {
        Self {
            path: path.into(),
            view,
            on_enter: None,
            on_submit: None,
        }
    }

    pub fn with_loader(mut self, loader: Loader) -> Self {
        self.on_enter = Some(loader);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.on_submit = Some(action);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Finds the entry for a location. Query strings, fragments and a
    /// trailing slash are ignored.
    pub fn resolve(&self, location: &str) -> Option<&RouteEntry> {
        let path = normalize_path(location);
        self.entries.iter().find(|entry| entry.path == path)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(vec![
            RouteEntry::new(HOME_PATH, ViewKind::Shell),
            RouteEntry::new(PRODUCTS_PATH, ViewKind::ProductList).with_loader(Loader::FetchProducts),
            RouteEntry::new(ADD_PRODUCT_PATH, ViewKind::ProductForm)
                .with_action(Action::CreateProduct),
        ])
    }
}

pub fn normalize_path(location: &str) -> &str {
    let location = location.trim();
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        HOME_PATH
    } else {
        path
    }
}
