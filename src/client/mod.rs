//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{BearerToken, MessageId, MessageStatus, SubmitBatch, ValidationError};
use crate::transport::STATUS_ID_PLACEHOLDER;

const DEFAULT_SEND_ENDPOINT: &str =
    "https://api.mts.ru/client-omni-adapter_production/1.0.2/mcom/messageManagement/messages";
const DEFAULT_STATUS_ENDPOINT: &str = "https://api.mts.ru/client-omni-adapter_production/1.0.2/mcom/messageManagement/messages/status?messageIDs=%s";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    token: BearerToken,
    json_body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            let mut builder = builder.bearer_auth(request.token.as_str());
            if let Some(body) = request.json_body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MtsClient`].
///
/// A failed call never leaves partial results behind, with one exception: a
/// [`MtsClient::submit`] that ends in [`MtsError::Api`] has already written the
/// acknowledged message ids into the batch.
pub enum MtsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with an HTTP status other than 200.
    #[error("http status: {status}")]
    HttpStatus { status: u16 },

    /// The gateway reported a non-zero result code.
    ///
    /// Both submit and status queries display as `error: <description>`; status
    /// queries share the submit wording rather than a separate `API error:` prefix.
    #[error("error: {description}")]
    Api {
        code: i64,
        description: String,
        validation_errors: Vec<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The single-id lookup returned no status records.
    #[error("no status found for message ID {message_id}")]
    NotFound { message_id: MessageId },

    /// The request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// A configured endpoint is not usable.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl MtsError {
    /// `true` for network failures, timeouts and non-200 HTTP statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`MtsClient`].
///
/// Use this when you need to customize the endpoints, timeout, or user-agent.
pub struct MtsClientBuilder {
    send_endpoint: String,
    status_endpoint: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for MtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MtsClientBuilder {
    /// Create a builder with the production endpoints and a 10 second timeout.
    pub fn new() -> Self {
        Self {
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            status_endpoint: DEFAULT_STATUS_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the endpoint URL used for submitting messages.
    pub fn send_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = endpoint.into();
        self
    }

    /// Override the status endpoint template.
    ///
    /// The template must contain one `%s` placeholder, replaced with the
    /// comma-separated message ids.
    pub fn status_endpoint(mut self, template: impl Into<String>) -> Self {
        self.status_endpoint = template.into();
        self
    }

    /// Set the timeout applied to each request as a whole.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`MtsClient`].
    pub fn build(self) -> Result<MtsClient, MtsError> {
        validate_endpoint(&self.send_endpoint, &self.send_endpoint)?;
        if !self.status_endpoint.contains(STATUS_ID_PLACEHOLDER) {
            return Err(MtsError::InvalidEndpoint {
                endpoint: self.status_endpoint,
                reason: format!("missing {STATUS_ID_PLACEHOLDER} placeholder"),
            });
        }
        let sample =
            crate::transport::encode_status_url(&self.status_endpoint, &[MessageId::new(0)]);
        validate_endpoint(&self.status_endpoint, &sample)?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| MtsError::Transport(Box::new(err)))?;

        Ok(MtsClient {
            send_endpoint: self.send_endpoint,
            status_endpoint: self.status_endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn validate_endpoint(endpoint: &str, candidate: &str) -> Result<(), MtsError> {
    url::Url::parse(candidate)
        .map(|_| ())
        .map_err(|err| MtsError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: err.to_string(),
        })
}

#[derive(Clone)]
/// High-level client for the MTS SMS gateway.
///
/// Every operation issues exactly one HTTP request (or none, for an empty status
/// query) and waits for it to complete or time out. The client holds no mutable
/// state, so clones can be shared freely between tasks.
pub struct MtsClient {
    send_endpoint: String,
    status_endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl MtsClient {
    /// Create a client with the production endpoints and default timeout.
    ///
    /// For more customization, use [`MtsClient::builder`].
    pub fn new() -> Result<Self, MtsError> {
        MtsClientBuilder::new().build()
    }

    /// Start building a client with custom settings.
    pub fn builder() -> MtsClientBuilder {
        MtsClientBuilder::new()
    }

    /// Submit a batch of messages.
    ///
    /// For every result the gateway returns, the first batch element with the same
    /// msid receives the assigned message id; a per-recipient code other than `OK`
    /// also sets its `send_error` flag.
    ///
    /// Errors:
    /// - [`MtsError::Transport`] / [`MtsError::HttpStatus`] when the call fails,
    /// - [`MtsError::Parse`] for a malformed body,
    /// - [`MtsError::Api`] when the top-level status is non-zero. The batch is
    ///   updated before this check, so inspect it even on error.
    pub async fn submit(
        &self,
        batch: &mut SubmitBatch,
        token: &BearerToken,
    ) -> Result<(), MtsError> {
        let body = crate::transport::encode_submit_json(batch).map_err(MtsError::Encode)?;

        debug!(
            endpoint = %self.send_endpoint,
            messages = batch.submits.len(),
            "submitting message batch"
        );
        let response = self
            .http
            .execute(HttpRequest {
                method: HttpMethod::Post,
                url: self.send_endpoint.clone(),
                token: token.clone(),
                json_body: Some(body),
            })
            .await
            .map_err(MtsError::Transport)?;
        debug!(status = response.status, "submit response received");

        ensure_http_ok(&response)?;

        let parsed = crate::transport::decode_submit_json_response(&response.body)
            .map_err(|err| MtsError::Parse(Box::new(err)))?;

        batch.apply_results(&parsed.results);

        if parsed.status != 0 {
            return Err(MtsError::Api {
                code: parsed.status,
                description: parsed.description,
                validation_errors: parsed.validation_errors,
            });
        }

        Ok(())
    }

    /// Fetch delivery statuses for the given message ids.
    ///
    /// The result is flattened in gateway order (message group first, then
    /// recipient). An empty `message_ids` slice returns an empty list without
    /// contacting the gateway.
    pub async fn message_statuses(
        &self,
        message_ids: &[MessageId],
        token: &BearerToken,
    ) -> Result<Vec<MessageStatus>, MtsError> {
        if message_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = crate::transport::encode_status_url(&self.status_endpoint, message_ids);

        debug!(ids = message_ids.len(), "querying message statuses");
        let response = self
            .http
            .execute(HttpRequest {
                method: HttpMethod::Get,
                url,
                token: token.clone(),
                json_body: None,
            })
            .await
            .map_err(MtsError::Transport)?;
        debug!(status = response.status, "status response received");

        ensure_http_ok(&response)?;

        let parsed = crate::transport::decode_status_json_response(&response.body)
            .map_err(|err| MtsError::Parse(Box::new(err)))?;

        if parsed.code != 0 {
            return Err(MtsError::Api {
                code: parsed.code,
                description: parsed.description,
                validation_errors: parsed.validation_errors,
            });
        }

        Ok(parsed.statuses)
    }

    /// Fetch the delivery status for a single message id.
    ///
    /// Returns [`MtsError::NotFound`] when the gateway reports no recipients for it.
    pub async fn message_status(
        &self,
        message_id: MessageId,
        token: &BearerToken,
    ) -> Result<MessageStatus, MtsError> {
        self.message_statuses(&[message_id], token)
            .await?
            .into_iter()
            .next()
            .ok_or(MtsError::NotFound { message_id })
    }
}

fn ensure_http_ok(response: &HttpResponse) -> Result<(), MtsError> {
    if response.status != 200 {
        return Err(MtsError::HttpStatus {
            status: response.status,
        });
    }
    Ok(())
}
