//! Gateway trait for the link backend's REST API.

use crate::domain::entities::{BulkOutcome, BulkRequest, Credentials, LinkRecord, LinkStats};
use crate::error::AppError;
use async_trait::async_trait;

/// Client interface for the backend that stores links and records clicks.
///
/// Every call except [`LinkGateway::authenticate`] and
/// [`LinkGateway::refresh_access`] takes the caller's access token and sends
/// it as `Authorization: Bearer <access>`.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLinkGateway`] - reqwest implementation
/// - Test mocks available with `cfg(test)`
///
/// # Errors
///
/// All methods report failures through [`AppError`]:
///
/// - [`AppError::Authentication`] for rejected credentials on the token endpoints
/// - [`AppError::Unauthorized`] for a missing, expired or insufficient access token
/// - [`AppError::Validation`] when the backend rejects a payload
/// - [`AppError::NotFound`] for an unknown link code
/// - [`AppError::Transport`] for network failures and unexpected statuses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkGateway: Send + Sync {
    /// Exchanges a username and password for a token pair.
    async fn authenticate(&self, username: &str, password: &str) -> Result<Credentials, AppError>;

    /// Exchanges a refresh token for a new token pair.
    ///
    /// A backend that rotates refresh tokens blacklists `refresh` and returns
    /// its successor; the returned pair must replace the stored one. When the
    /// backend does not rotate, `refresh` comes back unchanged.
    async fn refresh_access(&self, refresh: &str) -> Result<Credentials, AppError>;

    /// Lists every link owned by the token's user.
    async fn list_links(&self, access: &str) -> Result<Vec<LinkRecord>, AppError>;

    /// Fetches a link with its click total and recent click events.
    async fn fetch_stats(&self, access: &str, code: &str) -> Result<LinkStats, AppError>;

    /// Generates `request.count` links pointing at one target.
    ///
    /// A backend that could create only part of the batch still succeeds,
    /// with [`BulkOutcome::partial`] set.
    async fn create_links_bulk(
        &self,
        access: &str,
        request: BulkRequest,
    ) -> Result<BulkOutcome, AppError>;

    /// Deletes a link by code.
    async fn delete_link(&self, access: &str, code: &str) -> Result<(), AppError>;
}
