//! Generic client for one REST collection (`<base>/<entity-plural>`).
//!
//! Every operation is an independent request: no coalescing, no caching.
//! Only idempotent `GET`s are retried, and only on connection failures or
//! timeouts.

use std::marker::PhantomData;
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::http::error::ClientError;
use crate::http::query::QueryParams;
use crate::http::upload::{multi_file_form, single_file_form, UploadFile};
use crate::model::Metadata;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

/// An entity addressable by a unique identifier.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(rename = "data", alias = "items")]
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Timeout and retry settings applied to every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestPolicy {
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for RequestPolicy {
    fn from(api: &ApiConfig) -> Self {
        Self {
            timeout: Duration::from_millis(api.timeout_ms),
            retry_attempts: api.retry_attempts,
            retry_delay: Duration::from_millis(api.retry_delay_ms),
        }
    }
}

/// Extra headers and query parameters for [`ResourceClient::custom_request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub params: QueryParams,
}

enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

pub struct ResourceClient<T> {
    http: Client,
    base_url: Url,
    policy: RequestPolicy,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            policy: self.policy,
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(base_url: &str, policy: RequestPolicy) -> Result<Self, ClientError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ClientError::Transport {
                url: base_url.to_string(),
                source: e,
            })?;
        Self::with_client(http, base_url, policy)
    }

    /// Build on a shared connection pool.
    pub fn with_client(
        http: Client,
        base_url: &str,
        policy: RequestPolicy,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::InvalidUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            http,
            base_url,
            policy,
            _entity: PhantomData,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET <base>?<params>`
    pub async fn list(&self, params: &QueryParams) -> Result<Vec<T>, ClientError> {
        let url = self.url(&[], params)?;
        let response = self.send(Method::GET, &url, Payload::Empty, &[]).await?;
        decode(&url, response).await
    }

    /// `GET <base>/paginated?page=&limit=&<params>`, page and limit default to 1 and 10.
    pub async fn paginated(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
        params: &QueryParams,
    ) -> Result<Paginated<T>, ClientError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page == 0 {
            return Err(ClientError::Validation("page must be at least 1".to_string()));
        }
        if limit == 0 {
            return Err(ClientError::Validation("limit must be at least 1".to_string()));
        }

        // Caller filters cannot override the validated page window.
        let mut query = QueryParams::new().with("page", page).with("limit", limit);
        query.extend(params);
        query.set("page", Some(page.into()));
        query.set("limit", Some(limit.into()));
        let url = self.url(&["paginated"], &query)?;
        let response = self.send(Method::GET, &url, Payload::Empty, &[]).await?;
        decode(&url, response).await
    }

    /// `GET <base>/{id}`, failing with `NotFound` when absent.
    pub async fn get_by_id(&self, id: &str) -> Result<T, ClientError> {
        let url = self.url(&[id], &QueryParams::new())?;
        let response = self.send(Method::GET, &url, Payload::Empty, &[]).await?;
        decode(&url, response).await
    }

    /// `POST <base>` with an entity that has no id yet.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T, ClientError> {
        let url = self.url(&[], &QueryParams::new())?;
        let response = self
            .send(Method::POST, &url, Payload::Json(to_json(body)?), &[])
            .await?;
        decode(&url, response).await
    }

    /// `PUT <base>/{id}`; the client never merges locally.
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<T, ClientError> {
        let url = self.url(&[id], &QueryParams::new())?;
        let response = self
            .send(Method::PUT, &url, Payload::Json(to_json(body)?), &[])
            .await?;
        decode(&url, response).await
    }

    /// `PATCH <base>/{id}`
    pub async fn patch<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<T, ClientError> {
        let url = self.url(&[id], &QueryParams::new())?;
        let response = self
            .send(Method::PATCH, &url, Payload::Json(to_json(body)?), &[])
            .await?;
        decode(&url, response).await
    }

    /// `DELETE <base>/{id}`. Deleting twice surfaces `NotFound` the second time.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let url = self.url(&[id], &QueryParams::new())?;
        self.send(Method::DELETE, &url, Payload::Empty, &[]).await?;
        Ok(())
    }

    /// `POST <base>/upload` with a `file` part plus flattened metadata.
    pub async fn upload(&self, file: UploadFile, metadata: &Metadata) -> Result<T, ClientError> {
        let url = self.url(&["upload"], &QueryParams::new())?;
        let form = single_file_form(file, metadata)?;
        let response = self
            .send(Method::POST, &url, Payload::Multipart(form), &[])
            .await?;
        decode(&url, response).await
    }

    /// `POST <base>/upload-multiple` with `files[i]` parts plus flattened metadata.
    pub async fn upload_multiple(
        &self,
        files: Vec<UploadFile>,
        metadata: &Metadata,
    ) -> Result<Vec<T>, ClientError> {
        let url = self.url(&["upload-multiple"], &QueryParams::new())?;
        let form = multi_file_form(files, metadata)?;
        let response = self
            .send(Method::POST, &url, Payload::Multipart(form), &[])
            .await?;
        decode(&url, response).await
    }

    /// `GET <base>/search?q=<query>&<params>`
    pub async fn search(&self, query: &str, params: &QueryParams) -> Result<Vec<T>, ClientError> {
        let mut full = QueryParams::new().with("q", query);
        full.extend(params);
        let url = self.url(&["search"], &full)?;
        let response = self.send(Method::GET, &url, Payload::Empty, &[]).await?;
        decode(&url, response).await
    }

    /// `GET <base>/count?<params>`
    pub async fn count(&self, params: &QueryParams) -> Result<u64, ClientError> {
        let url = self.url(&["count"], params)?;
        let response = self.send(Method::GET, &url, Payload::Empty, &[]).await?;
        let body: CountResponse = decode(&url, response).await?;
        Ok(body.count)
    }

    /// Escape hatch for non-CRUD endpoints under the collection
    /// (`stats`, `{id}/duplicate`, ...).
    pub async fn custom_request<R: DeserializeOwned>(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<R, ClientError> {
        let (url, response) = self.custom(method, endpoint, body, options).await?;
        decode(&url, response).await
    }

    /// Like [`custom_request`](Self::custom_request) but returns the raw body.
    pub async fn custom_bytes(
        &self,
        method: &str,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Vec<u8>, ClientError> {
        let (url, response) = self.custom(method, endpoint, None, options).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport {
                url: url.to_string(),
                source: e,
            })?;
        Ok(bytes.to_vec())
    }

    async fn custom(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        options: &RequestOptions,
    ) -> Result<(Url, Response), ClientError> {
        let method = parse_method(method)?;
        let segments: Vec<&str> = endpoint.split('/').filter(|s| !s.is_empty()).collect();
        let url = self.url(&segments, &options.params)?;
        let payload = match body {
            // GET and DELETE never carry a body
            Some(value) if method != Method::GET && method != Method::DELETE => {
                Payload::Json(value.clone())
            }
            _ => Payload::Empty,
        };
        let response = self.send(method, &url, payload, &options.headers).await?;
        Ok((url, response))
    }

    fn url(&self, segments: &[&str], params: &QueryParams) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ClientError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?;
            path.pop_if_empty().extend(segments);
        }
        let pairs = params.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: &Url,
        payload: Payload,
        headers: &[(String, String)],
    ) -> Result<Response, ClientError> {
        if method != Method::GET {
            return self.send_once(method, url, payload, headers).await;
        }

        let mut attempt = 0;
        loop {
            match self.send_once(Method::GET, url, Payload::Empty, headers).await {
                Err(err) if err.is_retryable() && attempt < self.policy.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        url = %url,
                        attempt,
                        max_attempts = self.policy.retry_attempts,
                        error = %err,
                        "Retrying request"
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
                result => return result,
            }
        }
    }

    async fn send_once(
        &self,
        method: Method,
        url: &Url,
        payload: Payload,
        headers: &[(String, String)],
    ) -> Result<Response, ClientError> {
        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut builder = self
            .http
            .request(method, url.clone())
            .timeout(self.policy.timeout);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder.json(&value),
            Payload::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                // Nothing left the client; a caller mistake, not a network failure.
                ClientError::Validation(format!("invalid request to '{}': {}", url, e))
            } else if e.is_timeout() {
                ClientError::Timeout {
                    url: url.to_string(),
                    duration_ms: self.policy.timeout.as_millis() as u64,
                }
            } else {
                ClientError::Transport {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        check_status(url, response).await
    }
}

fn parse_method(method: &str) -> Result<Method, ClientError> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        _ => Err(ClientError::UnsupportedMethod(method.to_string())),
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body)
        .map_err(|e| ClientError::Validation(format!("payload is not serializable: {}", e)))
}

async fn check_status(url: &Url, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::debug!(url = %url, status = status.as_u16(), "Request rejected");
    match status.as_u16() {
        404 => Err(ClientError::NotFound {
            url: url.to_string(),
        }),
        400 | 422 => Err(ClientError::Validation(if message.is_empty() {
            format!("request to '{}' was rejected", url)
        } else {
            message
        })),
        code => Err(ClientError::Status {
            status: code,
            url: url.to_string(),
            message,
        }),
    }
}

async fn decode<R: DeserializeOwned>(url: &Url, response: Response) -> Result<R, ClientError> {
    let bytes = response.bytes().await.map_err(|e| ClientError::Transport {
        url: url.to_string(),
        source: e,
    })?;
    // An empty body reads as JSON null so unit results decode.
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    serde_json::from_slice(body).map_err(|e| ClientError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
