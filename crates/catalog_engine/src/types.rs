use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

pub type RequestId = u64;

/// Body of `GET /products`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Body of `POST /products/add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProductBody {
    pub title: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

/// Answer to `POST /products/add`. A response without `id` fails to decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedProductRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
}

// Largest integer an f64 holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Whole prices go out as JSON integers (`10`, not `10.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ProductsLoaded {
        request_id: RequestId,
        result: Result<ProductPage, ServiceError>,
    },
    ProductCreated {
        request_id: RequestId,
        result: Result<CreatedProductRecord, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CreatedProductRecord, NewProductBody, ProductPage};

    fn body(title: &str, price: f64) -> String {
        serde_json::to_string(&NewProductBody {
            title: title.to_string(),
            price,
        })
        .unwrap()
    }

    #[test]
    fn whole_price_serializes_as_integer() {
        assert_eq!(body("Product 1", 10.0), r#"{"title":"Product 1","price":10}"#);
        assert_eq!(body("No Price", 0.0), r#"{"title":"No Price","price":0}"#);
    }

    #[test]
    fn fractional_price_serializes_as_float() {
        assert_eq!(body("My Product", 99.99), r#"{"title":"My Product","price":99.99}"#);
    }

    #[test]
    fn list_record_defaults_missing_fields() {
        let page: ProductPage =
            serde_json::from_str(r#"{"products":[{"id":3,"title":"Lamp","extra":true}]}"#)
                .unwrap();
        let record = &page.products[0];
        assert_eq!(record.price, 0.0);
        assert_eq!(record.thumbnail, None);
        assert_eq!(page.total, None);
    }

    #[test]
    fn created_record_requires_id() {
        let missing = serde_json::from_str::<CreatedProductRecord>(r#"{"title":"Lamp"}"#);
        assert!(missing.is_err());
    }
}
