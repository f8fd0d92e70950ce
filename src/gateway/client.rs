//! Gateway client with credential injection and 401 handling

use crate::config::Config;
use crate::gateway::errors::GatewayError;
use crate::gateway::navigation::{Headless, UnauthorizedHandler};
use crate::gateway::request::{FormPayload, RequestBody, RequestDescriptor};
use crate::storage::{CredentialStore, TOKEN_KEY};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Login route: exempt from forced logout, and the navigation target after one
pub const LOGIN_ROUTE: &str = "/login";

pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    on_unauthorized: Arc<dyn UnauthorizedHandler>,
}

impl ApiClient {
    /// Client for `base_url` with no navigation capability
    pub fn new(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().build()?;
        Ok(Self::with_http(http, base_url, store))
    }

    /// Client configured from [`Config`]
    pub fn from_config(config: &Config, store: Arc<dyn CredentialStore>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(&config.http.user_agent);
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http(builder.build()?, &config.api_base_url, store))
    }

    fn with_http(http: Client, base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            on_unauthorized: Arc::new(Headless),
        }
    }

    /// Replace the handler invoked after a forced logout
    pub fn on_unauthorized(mut self, handler: impl UnauthorizedHandler + 'static) -> Self {
        self.on_unauthorized = Arc::new(handler);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Absolute URL for a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Pre-dispatch hook: attach the stored bearer token, if any.
    pub fn authorize(&self, request: &mut RequestDescriptor) {
        let Some(token) = self.store.get(TOKEN_KEY) else {
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("Stored token is not a valid header value, sending {} without it", request),
        }
    }

    /// Post-dispatch hook for failures.
    ///
    /// A 401 on anything but the login route drops the stored token and asks
    /// the host to navigate to the login route. The error is returned as is.
    pub fn intercept_failure(&self, error: GatewayError) -> GatewayError {
        if error.status() != Some(StatusCode::UNAUTHORIZED) {
            return error;
        }

        let Some(request) = error.request() else {
            return error;
        };

        if request.path.ends_with(LOGIN_ROUTE) {
            debug!("401 from {}, leaving the session to the caller", request);
            return error;
        }

        warn!("{} was rejected as unauthorized, clearing stored session", request);
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!("Failed to remove stored token: {}", e);
        }
        if let Err(e) = self.on_unauthorized.navigate(LOGIN_ROUTE) {
            debug!("Navigation to {} skipped: {}", LOGIN_ROUTE, e);
        }

        error
    }

    /// Send a request through both hooks. Non-2xx responses are errors.
    pub async fn send(&self, mut request: RequestDescriptor) -> Result<Response, GatewayError> {
        self.authorize(&mut request);
        self.dispatch(request).await.map_err(|e| self.intercept_failure(e))
    }

    async fn dispatch(&self, request: RequestDescriptor) -> Result<Response, GatewayError> {
        let url = self.url(&request.path);
        debug!("Dispatching {} -> {}", request, url);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(form) => match form.to_multipart() {
                Ok(multipart) => builder.multipart(multipart),
                Err(source) => {
                    return Err(GatewayError::Transport {
                        request: Box::new(request),
                        source,
                    })
                }
            },
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                return Err(GatewayError::Transport {
                    request: Box::new(request),
                    source,
                })
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                request: Box::new(request),
                status,
                body,
            });
        }

        debug!("{} -> {}", request, status);
        Ok(response)
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.send(RequestDescriptor::get(path)).await?;
        decode(path, response).await
    }

    /// POST a JSON body to `path` and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = serde_json::to_value(body).map_err(|source| GatewayError::Encode {
            path: path.to_string(),
            source,
        })?;
        let response = self.send(RequestDescriptor::post(path).with_json(value)).await?;
        decode(path, response).await
    }

    /// POST a multipart form to `path`
    pub async fn post_form(&self, path: &str, form: FormPayload) -> Result<Response, GatewayError> {
        self.send(RequestDescriptor::post(path).with_form(form)).await
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, GatewayError> {
    response.json::<T>().await.map_err(|source| GatewayError::Decode {
        path: path.to_string(),
        source,
    })
}
