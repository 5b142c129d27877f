//! Catalog engine: remote product service client and request execution.
mod engine;
mod service;
mod types;

pub use engine::{ChannelEventSink, EngineError, EngineEvents, EngineHandle, EventSink};
pub use service::{
    ProductService, ReqwestProductService, ServiceSettings, DEFAULT_BASE_URL, DEFAULT_LIST_LIMIT,
};
pub use types::{
    CreatedProductRecord, EngineEvent, FailureKind, NewProductBody, ProductPage, ProductRecord,
    RequestId, ServiceError,
};
