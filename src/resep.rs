//! Recipe detail for guests

use crate::gateway::{ApiClient, GatewayError};
use crate::models::{ApiEnvelope, Resep};
use tracing::debug;

/// Fetch a recipe by id. `None` when the server answers with `{"data": null}`.
pub async fn fetch(client: &ApiClient, id: u64) -> Result<Option<Resep>, GatewayError> {
    debug!("Fetching recipe {}", id);
    let envelope: ApiEnvelope<Option<Resep>> = client.get_json(&format!("/resep/{}", id)).await?;
    if envelope.data.is_none() {
        debug!("Recipe {} has no data", id);
    }
    Ok(envelope.data)
}
