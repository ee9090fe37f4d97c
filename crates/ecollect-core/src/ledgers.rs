// ── Ledger view controller ──
//
// Read-only listings of users and e-waste scans. Shares the fleet
// controller's query semantics (search/filter changes reset pagination)
// but never writes anything.

use std::sync::Arc;

use ecollect_api::AdminClient;
use ecollect_api::types::ListQuery;

use crate::error::CoreError;
use crate::fleet::validate_query;
use crate::model::ledger::{EwasteEntry, User};

/// View-state controller for the user and e-waste ledgers.
pub struct LedgerController {
    client: Arc<AdminClient>,
    query: ListQuery,
}

impl LedgerController {
    pub fn new(client: Arc<AdminClient>) -> Self {
        Self {
            client,
            query: ListQuery::default(),
        }
    }

    pub fn with_query(client: Arc<AdminClient>, query: ListQuery) -> Self {
        Self { client, query }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.page = page;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.page = 1;
    }

    /// Fetch the user ledger page.
    pub async fn users(&self) -> Result<Vec<User>, CoreError> {
        validate_query(&self.query)?;
        let records = self.client.list_users(&self.query).await?;
        Ok(records.into_iter().map(User::from).collect())
    }

    /// Fetch the e-waste scan ledger page.
    pub async fn ewaste(&self) -> Result<Vec<EwasteEntry>, CoreError> {
        validate_query(&self.query)?;
        let records = self.client.list_ewaste(&self.query).await?;
        Ok(records.into_iter().map(EwasteEntry::from).collect())
    }
}
