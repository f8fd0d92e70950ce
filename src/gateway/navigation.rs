//! What the host application does when a protected request comes back 401

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Navigation is not available in this context")]
    Unavailable,

    #[error("Navigation to {route} failed: {reason}")]
    Failed { route: String, reason: String },
}

/// Sends the user to the login route after the gateway dropped their session.
pub trait UnauthorizedHandler: Send + Sync {
    fn navigate(&self, route: &str) -> Result<(), NavigationError>;
}

impl<F> UnauthorizedHandler for F
where
    F: Fn(&str) -> Result<(), NavigationError> + Send + Sync,
{
    fn navigate(&self, route: &str) -> Result<(), NavigationError> {
        self(route)
    }
}

/// No navigation capability (library use, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl UnauthorizedHandler for Headless {
    fn navigate(&self, _route: &str) -> Result<(), NavigationError> {
        Err(NavigationError::Unavailable)
    }
}

/// Terminal host: tells the user to log in again
#[derive(Debug, Clone)]
pub struct LoginNotice {
    command: String,
}

impl LoginNotice {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    pub fn message(&self, route: &str) -> String {
        format!(
            "Session expired or invalid ({}). Run `{}` to sign in again.",
            route, self.command
        )
    }
}

impl Default for LoginNotice {
    fn default() -> Self {
        Self::new("resepku login")
    }
}

impl UnauthorizedHandler for LoginNotice {
    fn navigate(&self, route: &str) -> Result<(), NavigationError> {
        warn!("{}", self.message(route));
        Ok(())
    }
}
