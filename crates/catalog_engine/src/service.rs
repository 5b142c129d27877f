use std::time::Duration;

use catalog_logging::{catalog_debug, catalog_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::{CreatedProductRecord, FailureKind, NewProductBody, ProductPage, ServiceError};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_LIST_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub list_limit: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The single seam through which the remote product service is reached.
#[async_trait::async_trait]
pub trait ProductService: Send + Sync {
    async fn list_products(&self, limit: u32) -> Result<ProductPage, ServiceError>;

    async fn create_product(
        &self,
        product: &NewProductBody,
    ) -> Result<CreatedProductRecord, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProductService {
    settings: ServiceSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestProductService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Appends `segments` to the base url, keeping any path prefix it has.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::new(FailureKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| ServiceError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ProductService for ReqwestProductService {
    async fn list_products(&self, limit: u32) -> Result<ProductPage, ServiceError> {
        let mut url = self.endpoint(&["products"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        catalog_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let page: ProductPage = self.read_json(response).await?;
        catalog_info!("Fetched {} product(s)", page.products.len());
        Ok(page)
    }

    async fn create_product(
        &self,
        product: &NewProductBody,
    ) -> Result<CreatedProductRecord, ServiceError> {
        let url = self.endpoint(&["products", "add"])?;
        let body = serde_json::to_vec(product)
            .map_err(|err| ServiceError::new(FailureKind::Decode, err.to_string()))?;
        catalog_debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let created: CreatedProductRecord = self.read_json(response).await?;
        catalog_info!("Remote service assigned id {}", created.id);
        Ok(created)
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> ServiceError {
    ServiceError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ServiceError::new(FailureKind::Decode, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
