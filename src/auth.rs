//! Login, logout and session status

use crate::gateway::{ApiClient, GatewayError, LOGIN_ROUTE};
use crate::models::{LoginRequest, LoginResponse};
use crate::storage::{CredentialStore, FileStore, StorageError, TOKEN_KEY};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Could not store session: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message to show on the login prompt
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Gateway(e) => e.user_message(),
            AuthError::Storage(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub since: Option<DateTime<Utc>>,
}

/// Exchange credentials for a bearer token and store it
pub async fn login(client: &ApiClient, credentials: &LoginRequest) -> Result<LoginResponse, AuthError> {
    info!("Signing in as {}", credentials.email);

    let response: LoginResponse = client.post_json(LOGIN_ROUTE, credentials).await?;
    client.store().set(TOKEN_KEY, &response.token)?;

    info!("Signed in as {}", credentials.email);
    Ok(response)
}

/// Drop the stored token. Returns whether there was one.
pub fn logout(store: &dyn CredentialStore) -> Result<bool, StorageError> {
    let had_token = store.get(TOKEN_KEY).is_some();
    store.remove(TOKEN_KEY)?;
    Ok(had_token)
}

pub fn session_status(store: &FileStore) -> SessionStatus {
    SessionStatus {
        logged_in: store.get(TOKEN_KEY).is_some(),
        since: store.saved_at(TOKEN_KEY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "admin@resep.test".to_string(),
            password: "rahasia".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(serde_json::json!({"email": "admin@resep.test", "password": "rahasia"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "fresh-token",
                "user": {"name": "Admin"}
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let client = ApiClient::new(format!("{}/api", server.uri()), store.clone()).unwrap();

        let response = login(&client, &credentials()).await.unwrap();
        assert_eq!(response.token, "fresh-token");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("fresh-token"));
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_existing_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Email atau password salah"
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::with_token("previous"));
        let client = ApiClient::new(format!("{}/api", server.uri()), store.clone()).unwrap();

        let err = login(&client, &credentials()).await.unwrap_err();
        assert_eq!(err.user_message(), "Email atau password salah");
        assert_eq!(err.to_string(), "Login failed: POST /login returned 401 Unauthorized");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("previous"));
    }

    #[test]
    fn test_logout_reports_previous_state() {
        let store = MemoryStore::with_token("tok");
        assert!(logout(&store).unwrap());
        assert!(!logout(&store).unwrap());
    }

    #[test]
    fn test_session_status() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("creds.json")).unwrap();
        assert_eq!(
            session_status(&store),
            SessionStatus { logged_in: false, since: None }
        );

        store.set(TOKEN_KEY, "tok").unwrap();
        let status = session_status(&store);
        assert!(status.logged_in);
        assert!(status.since.is_some());
    }
}
