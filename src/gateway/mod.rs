//! Authenticated API gateway
//!
//! Every call to the backend goes through [`ApiClient`], which attaches the
//! stored bearer token before dispatch and reacts to authentication failures
//! after it. Errors are never swallowed: the gateway only adds side effects
//! and hands the original failure back to the caller.

pub mod client;
pub mod errors;
pub mod navigation;
pub mod request;

pub use client::{ApiClient, LOGIN_ROUTE};
pub use errors::{ErrorPayload, GatewayError};
pub use navigation::{Headless, LoginNotice, NavigationError, UnauthorizedHandler};
pub use request::{FormPart, FormPayload, RequestBody, RequestDescriptor};
