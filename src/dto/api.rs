//! DTOs exposed by the JSON API.

use serde::Serialize;

use crate::dto::main::{ClientView, IndexPageData};
use crate::services::filters::{StatusFilter, Tab};
use crate::services::score::ScoreReport;

/// Body of `GET /api/v1/clients`.
#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub total: usize,
    pub tab: Tab,
    pub status: StatusFilter,
    pub owner: Option<String>,
    pub clients: Vec<ClientView>,
    pub score: ScoreReport,
}

impl From<IndexPageData> for ClientsResponse {
    fn from(data: IndexPageData) -> Self {
        Self {
            total: data.clients.len(),
            tab: data.tab,
            status: data.status,
            owner: data.owner,
            clients: data.clients,
            score: data.score,
        }
    }
}
