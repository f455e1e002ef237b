//! Link listing, bulk generation and deletion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use validator::Validate;

use crate::domain::entities::{BulkOutcome, BulkRequest};
use crate::domain::gateways::LinkGateway;
use crate::domain::view_model::{LinkQuery, LinksView};
use crate::error::AppError;
use crate::utils::link_code::validate_link_code;
use crate::utils::target_url::check_target_url;

/// Service for the links page.
///
/// Every view is rebuilt from a fresh backend snapshot; nothing is cached
/// between requests.
pub struct LinkService<G: LinkGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: LinkGateway + ?Sized> LinkService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetches all links and builds the grouped, filtered view.
    ///
    /// # Errors
    ///
    /// Propagates [`AppError::Unauthorized`] and [`AppError::Transport`]
    /// from the gateway.
    pub async fn links_view(&self, access: &str, query: &LinkQuery) -> Result<LinksView, AppError> {
        let links = self.gateway.list_links(access).await?;
        Ok(LinksView::build(&links, query))
    }

    /// Validates a bulk request locally and forwards it to the backend.
    ///
    /// The destination is trimmed before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - the destination is not an absolute HTTP(S) URL
    /// - `count` is outside 1-200 or `code_length` outside 4-32
    /// - `expires_at` is not in the future
    ///
    /// Backend errors are propagated unchanged.
    pub async fn generate(
        &self,
        access: &str,
        mut request: BulkRequest,
        now: DateTime<Utc>,
    ) -> Result<BulkOutcome, AppError> {
        request.target_url = check_target_url(&request.target_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "field": "target_url" }))
        })?;

        request.validate()?;

        if let Some(expires_at) = request.expires_at
            && expires_at <= now
        {
            return Err(AppError::bad_request(
                "Expiry must be in the future",
                json!({ "field": "expires_at", "expires_at": expires_at }),
            ));
        }

        let requested = request.count;
        let outcome = self.gateway.create_links_bulk(access, request).await?;

        if outcome.partial {
            tracing::warn!(
                requested,
                created = outcome.links.len(),
                "Bulk generation created fewer links than requested"
            );
        } else {
            tracing::info!(created = outcome.links.len(), "Bulk generation finished");
        }

        Ok(outcome)
    }

    /// Deletes a link by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code without calling
    /// the backend, otherwise propagates the gateway's error.
    pub async fn delete(&self, access: &str, code: &str) -> Result<(), AppError> {
        validate_link_code(code)?;
        self.gateway.delete_link(access, code).await?;
        tracing::info!(code, "Link deleted");
        Ok(())
    }
}
