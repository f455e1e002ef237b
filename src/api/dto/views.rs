//! Query DTOs for the JSON view endpoints.

use serde::Deserialize;

use crate::domain::view_model::LinkQuery;

/// `GET /api/view/links` query parameters.
///
/// Both parameters are optional; an empty or `__all__` target selects
/// every destination.
#[derive(Debug, Default, Deserialize)]
pub struct LinksViewParams {
    pub q: Option<String>,
    pub target: Option<String>,
}

impl LinksViewParams {
    pub fn to_query(&self) -> LinkQuery {
        LinkQuery::from_params(self.q.as_deref(), self.target.as_deref())
    }
}
