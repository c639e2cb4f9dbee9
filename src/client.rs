use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;

use crate::config::load_config;
use crate::error::{ApiError, Error, Result};
use crate::util::{status_reason, truncate_body};

/// Default query endpoint.
const ENDPOINT: &str = "https://app.snakequery.com/api/query";

/// Queries can run server-side for a long time; the API caps them at
/// ten minutes and so do we. There is no override surface.
const QUERY_TIMEOUT: Duration = Duration::from_secs(600);

/// Blocking client for the Snake Query API.
///
/// Each call is one stateless request/response round trip: no retries,
/// no pooling beyond what `reqwest` does internally, no per-call state.
/// The instance only holds the API key and the endpoint, both immutable
/// after construction, so it can be shared freely.
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    key: String,
    http: HttpClient,
}

/// Optional inputs to [`Client::query`].
///
/// Exactly one of `data` and `fetch_url` must be set; the client
/// rejects anything else before touching the network.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Inline JSON data to query against.
    pub data: Option<Value>,
    /// Remote resource the service should fetch and query against.
    pub fetch_url: Option<String>,
    /// Expected response shape, typically from [`crate::SchemaBuilder`].
    pub response_schema: Option<Value>,
    /// Asks the service to include debug detail. Always sent on the
    /// wire, defaulting to `false`.
    pub debug: bool,
}

impl QueryOptions {
    /// Options querying inline data.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Options querying a remote URL.
    pub fn with_url(fetch_url: impl Into<String>) -> Self {
        Self {
            fetch_url: Some(fetch_url.into()),
            ..Self::default()
        }
    }

    pub fn response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(rename = "fetchUrl", skip_serializing_if = "Option::is_none")]
    fetch_url: Option<&'a str>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
    debug: bool,
}

impl Client {
    /// Creates a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let key = api_key.into();
        if key.is_empty() {
            return Err(Error::InvalidArgument("API key is required".into()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("snakequery-rs/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("snakequery-rs")),
        );

        let http = HttpClient::builder()
            .default_headers(default_headers)
            .timeout(QUERY_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(anyhow::Error::new(e).context("failed to build HTTP client")))?;

        Ok(Self {
            url: ENDPOINT.to_string(),
            key,
            http,
        })
    }

    /// Creates a client using the `SNAKE_QUERY_API_KEY` environment
    /// variable or a `.snakequeryrc` file (see the crate docs).
    pub fn from_env() -> Result<Self> {
        let cfg = load_config()?;
        let mut client = Self::new(cfg.key)?;
        if let Some(url) = cfg.url {
            client.url = url;
        }
        Ok(client)
    }

    /// Overrides the query endpoint. Intended for self-hosted
    /// deployments and tests.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Runs a natural-language query and returns the result payload
    /// (the envelope's `data` field, with `response` and `usageCount`
    /// passed through untouched).
    ///
    /// Fails with [`Error::InvalidArgument`] before any network call
    /// when `query` is empty or when `options` does not carry exactly
    /// one of `data`/`fetch_url`. Every other failure is an
    /// [`ApiError`]: non-2xx HTTP status, a server-reported
    /// `code != 200`, a non-JSON body, a timeout (status 504) or a
    /// connectivity failure (no status).
    pub fn query(&self, query: &str, options: QueryOptions) -> Result<Value> {
        if query.is_empty() {
            return Err(Error::InvalidArgument("query is required".into()));
        }
        match (&options.data, &options.fetch_url) {
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "either data or fetch_url must be provided".into(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(Error::InvalidArgument(
                    "cannot provide both data and fetch_url, choose one".into(),
                ));
            }
            _ => {}
        }

        let body = QueryRequest {
            query,
            data: options.data.as_ref(),
            fetch_url: options.fetch_url.as_deref(),
            response_schema: options.response_schema.as_ref(),
            debug: options.debug,
        };

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.key)
            .json(&body)
            .send()
            .map_err(transport_error)?;

        classify(resp)
    }

    /// Sugar for querying inline data. Pure forwarding.
    pub fn query_with_data(&self, query: &str, data: Value) -> Result<Value> {
        self.query(query, QueryOptions::with_data(data))
    }

    /// Sugar for querying a remote URL. Pure forwarding.
    pub fn query_with_url(&self, query: &str, fetch_url: &str) -> Result<Value> {
        self.query(query, QueryOptions::with_url(fetch_url))
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        return ApiError {
            message: "Request timeout: Snake Query API took too long to respond (10 minute limit)"
                .into(),
            status: Some(504),
            response: None,
        }
        .into();
    }
    ApiError {
        message: format!("Network error: Unable to connect to Snake Query API. {err}"),
        status: None,
        response: None,
    }
    .into()
}

/// Maps one HTTP response to a result payload or an [`ApiError`],
/// in order: non-JSON body becomes a synthesized fallback object,
/// then a non-2xx status fails, then a server-reported `code != 200`
/// fails, and only then the envelope's `data` is returned.
fn classify(resp: Response) -> Result<Value> {
    let status = resp.status();
    let reason = status_reason(status);
    let text = resp.text().map_err(transport_error)?;

    let result: Value = serde_json::from_str(&text).unwrap_or_else(|_| {
        json!({
            "message": format!("Server returned non-JSON response: {reason}"),
            "statusCode": status.as_u16(),
            "body": truncate_body(&text),
        })
    });

    if !status.is_success() {
        let message = result
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}: {}", status.as_u16(), reason));
        return Err(ApiError {
            message,
            status: Some(status.as_u16()),
            response: Some(result),
        }
        .into());
    }

    let code = result.get("code").and_then(Value::as_i64);
    if code != Some(200) {
        return Err(ApiError {
            message: result.to_string(),
            status: code.and_then(|c| u16::try_from(c).ok()),
            response: Some(result),
        }
        .into());
    }

    Ok(result.get("data").cloned().unwrap_or(Value::Null))
}
