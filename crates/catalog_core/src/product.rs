use std::fmt;

pub type ProductId = u64;

/// A product record as the remote service reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub thumbnail: Option<String>,
}

impl Product {
    /// Narrows the record to something the list view may display.
    pub fn into_listed(self) -> Option<ListedProduct> {
        ListedProduct::new(self.id, self.title, self.price, self.thumbnail?)
    }
}

/// A product as shown in the list view.
///
/// Only constructed through [`ListedProduct::new`], which refuses entries
/// without a title or thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedProduct {
    id: ProductId,
    title: String,
    price: f64,
    thumbnail: String,
}

impl ListedProduct {
    pub fn new(id: ProductId, title: String, price: f64, thumbnail: String) -> Option<Self> {
        if title.trim().is_empty() || thumbnail.trim().is_empty() {
            return None;
        }
        Some(Self {
            id,
            title,
            price,
            thumbnail,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }
}

/// A product the remote service just created. The id is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
}

impl NewProduct {
    /// Builds the outgoing body from raw form values.
    ///
    /// The title is taken as given. An absent or blank price becomes `0`;
    /// the form path validates first, so this only matters to callers that skip
    /// [`ProductDraft::validate`].
    pub fn from_form(title: &str, price: Option<&str>) -> Result<Self, DraftError> {
        let price = match price.map(str::trim) {
            None | Some("") => 0.0,
            Some(raw) => parse_price(raw)?,
        };
        Ok(Self {
            title: title.to_string(),
            price,
        })
    }
}

/// In-progress form input for the creation view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
}

impl ProductDraft {
    /// Input-level checks run before any request is made.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        let price = self.price.trim();
        if price.is_empty() {
            return Err(DraftError::MissingPrice);
        }
        parse_price(price).map(|_| ())
    }

    pub fn to_new_product(&self) -> Result<NewProduct, DraftError> {
        NewProduct::from_form(&self.title, Some(&self.price))
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.price.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    MissingTitle,
    MissingPrice,
    InvalidPrice(String),
}

impl DraftError {
    pub fn field(&self) -> Field {
        match self {
            DraftError::MissingTitle => Field::Title,
            DraftError::MissingPrice | DraftError::InvalidPrice(_) => Field::Price,
        }
    }
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingTitle => write!(f, "Title is required"),
            DraftError::MissingPrice => write!(f, "Price is required"),
            DraftError::InvalidPrice(raw) => write!(f, "Price must be a number, got {raw:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Price,
}

fn parse_price(raw: &str) -> Result<f64, DraftError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DraftError::InvalidPrice(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{DraftError, ListedProduct, NewProduct, Product, ProductDraft};

    #[test]
    fn absent_or_blank_price_becomes_zero() {
        let product = NewProduct::from_form("No Price", None).unwrap();
        assert_eq!(product.price, 0.0);

        let product = NewProduct::from_form("No Price", Some("  ")).unwrap();
        assert_eq!(product.price, 0.0);
        assert_eq!(product.title, "No Price");
    }

    #[test]
    fn price_is_converted_to_number() {
        let product = NewProduct::from_form("Test", Some("99.99")).unwrap();
        assert_eq!(product.price, 99.99);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let err = NewProduct::from_form("Test", Some("ten")).unwrap_err();
        assert_eq!(err, DraftError::InvalidPrice("ten".to_string()));
        assert!(NewProduct::from_form("Test", Some("NaN")).is_err());
        assert!(NewProduct::from_form("Test", Some("inf")).is_err());
    }

    #[test]
    fn draft_requires_both_fields() {
        let mut draft = ProductDraft::default();
        assert_eq!(draft.validate(), Err(DraftError::MissingTitle));

        draft.title = "Lamp".to_string();
        assert_eq!(draft.validate(), Err(DraftError::MissingPrice));

        draft.price = "12".to_string();
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn listed_product_needs_title_and_thumbnail() {
        assert!(ListedProduct::new(1, String::new(), 0.0, "t.jpg".into()).is_none());
        assert!(ListedProduct::new(1, "Lamp".into(), 0.0, " ".into()).is_none());
        let product = ListedProduct::new(1, "Lamp".into(), 3.5, "t.jpg".into()).unwrap();
        assert_eq!(product.title(), "Lamp");
        assert_eq!(product.thumbnail(), "t.jpg");
    }

    #[test]
    fn record_without_thumbnail_is_not_listed() {
        let record = Product {
            id: 4,
            title: "Chair".into(),
            price: 0.0,
            thumbnail: None,
        };
        assert!(record.into_listed().is_none());
    }
}
