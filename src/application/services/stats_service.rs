//! Per-link statistics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::gateways::LinkGateway;
use crate::domain::view_model::StatsView;
use crate::error::AppError;
use crate::utils::link_code::validate_link_code;

/// Service for the stats page of a single link.
pub struct StatsService<G: LinkGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: LinkGateway + ?Sized> StatsService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetches a link's stats and builds the 7-day view ending at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code.
    /// Returns [`AppError::NotFound`] if the backend does not know the code.
    pub async fn stats_view(
        &self,
        access: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<StatsView, AppError> {
        validate_link_code(code)?;
        let stats = self.gateway.fetch_stats(access, code).await?;
        Ok(StatsView::build(stats, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ClickEvent, LinkRecord, LinkStats};
    use crate::domain::gateways::MockLinkGateway;
    use chrono::TimeZone;
    use serde_json::json;

    #[tokio::test]
    async fn test_stats_view_success() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let created = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();

        let mut gateway = MockLinkGateway::new();
        gateway
            .expect_fetch_stats()
            .withf(|access, code| access == "token" && code == "abc123")
            .times(1)
            .returning(move |_, _| {
                Ok(LinkStats {
                    link: LinkRecord::new(1, "abc123", "https://s.test/abc123", "https://a.com", created),
                    total_clicks: 9,
                    recent_clicks: vec![
                        ClickEvent::at(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()),
                        ClickEvent::at(Utc.with_ymd_and_hms(2024, 1, 1, 23, 0, 0).unwrap()),
                    ],
                })
            });

        let service = StatsService::new(Arc::new(gateway));

        let view = service.stats_view("token", "abc123", now).await.unwrap();

        assert_eq!(view.total_clicks, 9);
        assert_eq!(view.series[4].count, 2);
        assert_eq!(view.week_total(), 2);
        assert_eq!(view.status, "Active");
    }

    #[tokio::test]
    async fn test_stats_view_not_found() {
        let mut gateway = MockLinkGateway::new();
        gateway
            .expect_fetch_stats()
            .times(1)
            .returning(|_, code| Err(AppError::not_found("Not found.", json!({ "code": code }))));

        let service = StatsService::new(Arc::new(gateway));

        let result = service.stats_view("token", "missing", Utc::now()).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
