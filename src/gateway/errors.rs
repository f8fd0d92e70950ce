//! Gateway error types

use crate::gateway::request::RequestDescriptor;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{} returned {status}", .request)]
    Status {
        request: Box<RequestDescriptor>,
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    #[error("{} failed: {source}", .request)]
    Transport {
        request: Box<RequestDescriptor>,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to encode request body for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Error body returned by the backend, e.g. `{"message": "...", "errors": {...}}`
#[derive(Debug, Default, Deserialize)]
pub struct ErrorPayload {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl GatewayError {
    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Transport { source, .. } => source.status(),
            GatewayError::Encode { .. } | GatewayError::Decode { .. } => None,
        }
    }

    /// The request that failed
    pub fn request(&self) -> Option<&RequestDescriptor> {
        match self {
            GatewayError::Status { request, .. } | GatewayError::Transport { request, .. } => {
                Some(&**request)
            }
            GatewayError::Encode { .. } | GatewayError::Decode { .. } => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    fn payload(&self) -> Option<ErrorPayload> {
        match self {
            GatewayError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// `message` from the response body
    pub fn server_message(&self) -> Option<String> {
        self.payload()
            .and_then(|payload| payload.message)
            .filter(|message| !message.trim().is_empty())
    }

    /// Per-field validation messages from the response body
    pub fn validation_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.payload().map(|payload| payload.errors).unwrap_or_default()
    }

    /// Message to show the user: the server's message, else this error's text
    pub fn user_message(&self) -> String {
        self.server_message().unwrap_or_else(|| self.to_string())
    }
}
