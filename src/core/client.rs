use crate::core::ConfigProvider;
use crate::domain::report::{ApiEnvelope, ErrorResponseBody};
use crate::utils::error::{AsaError, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.searchads.apple.com/api/v4/";

/// Header scoping every call to one organization.
const CONTEXT_HEADER: &str = "X-AP-Context";

/// Authenticated JSON transport for the Search Ads API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    access_token: String,
    org_id: i64,
}

impl ApiClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| AsaError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: parse_base_url(config.base_url())?,
            access_token: config.access_token().to_string(),
            org_id: config.org_id(),
        })
    }

    /// Resolves an endpoint path such as `custom-reports/12` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AsaError::InvalidConfigValue {
                field: "path".to_string(),
                value: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header(CONTEXT_HEADER, format!("orgId={}", self.org_id))
    }

    pub async fn get_json<Q, T>(&self, path: &str, query: Option<&Q>) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned + ApiEnvelope,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let mut request = self.authorized(self.client.get(url));
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        decode_envelope(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + ApiEnvelope,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let response = self
            .authorized(self.client.post(url))
            .json(body)
            .send()
            .await?;
        decode_envelope(response).await
    }

    /// Fetches raw bytes from an absolute URI without API credentials.
    pub async fn get_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let url = Url::parse(uri).map_err(|e| AsaError::Validation {
            field: "downloadUri".to_string(),
            message: format!("Invalid download URI '{}': {}", uri, e),
        })?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AsaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    // 確保以 / 結尾，否則 join 會覆蓋最後一段路徑
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    Url::parse(&normalized).map_err(|e| AsaError::InvalidConfigValue {
        field: "api.base_url".to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

async fn decode_envelope<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned + ApiEnvelope,
{
    let status = response.status();
    let body = response.text().await?;
    tracing::debug!("API response status: {} ({} bytes)", status, body.len());

    if !status.is_success() {
        return Err(status_error(status.as_u16(), body));
    }

    let decoded: T = serde_json::from_str(&body)?;
    if let Some(error) = decoded.api_error() {
        if !error.errors.is_empty() {
            return Err(AsaError::Remote {
                status: status.as_u16(),
                errors: error.errors.clone(),
            });
        }
    }

    Ok(decoded)
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorResponseBody>,
}

fn status_error(status: u16, body: String) -> AsaError {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope { error: Some(error) }) if !error.errors.is_empty() => AsaError::Remote {
            status,
            errors: error.errors,
        },
        _ => AsaError::Status { status, body },
    }
}
