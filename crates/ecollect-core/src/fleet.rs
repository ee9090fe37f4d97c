// ── Fleet view controller ──
//
// Orchestrates the kiosk list-management workflow: fetch-with-filters,
// create/update/delete, status transitions. Consistency strategy is
// refetch-after-mutation: every write is followed by a full `list()` with
// the current query, and the server's write response is never merged into
// local state. The displayed page therefore always reflects one complete
// round trip with the backend.

use std::sync::Arc;

use chrono::Local;
use tracing::debug;

use ecollect_api::AdminClient;
use ecollect_api::types::{ListQuery, StatusFilter};

use crate::error::{CoreError, Violation};
use crate::geo::{self, Coordinates};
use crate::model::kiosk::{Kiosk, KioskDraft, KioskStatus, StatusPresentation, toggled};

/// A kiosk row with its derived display fields.
#[derive(Debug, Clone, serde::Serialize)]
pub struct KioskView {
    #[serde(flatten)]
    pub kiosk: Kiosk,
    /// Fill percentage, rounded.
    pub capacity_pct: u32,
    /// Open at the moment the page was fetched.
    pub open_now: bool,
    #[serde(skip)]
    pub presentation: StatusPresentation,
}

impl KioskView {
    fn from_record(record: ecollect_api::types::KioskRecord, now: chrono::NaiveTime) -> Self {
        let kiosk = Kiosk::from(record);
        Self {
            capacity_pct: kiosk.capacity_percentage(),
            open_now: kiosk.is_open_at(now),
            presentation: kiosk.presentation(),
            kiosk,
        }
    }
}

/// One fetched page plus the backend's pagination metadata.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FleetPage {
    pub kiosks: Vec<KioskView>,
    pub page: u32,
    pub total_kiosks: u64,
    pub total_pages: u32,
}

/// View-state controller for the kiosk fleet.
///
/// Holds the current query (page, limit, search, status filter). Changing
/// the search or status filter resets pagination to page 1 -- new criteria
/// invalidate any previously fetched offset. Changing only the page does
/// not.
pub struct FleetController {
    client: Arc<AdminClient>,
    query: ListQuery,
}

impl FleetController {
    pub fn new(client: Arc<AdminClient>) -> Self {
        Self {
            client,
            query: ListQuery::default(),
        }
    }

    pub fn with_query(client: Arc<AdminClient>, query: ListQuery) -> Self {
        Self { client, query }
    }

    /// The query the next fetch will use.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    // ── Query state ──────────────────────────────────────────────────

    pub fn set_page(&mut self, page: u32) {
        self.query.page = page;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.page = 1;
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status = filter;
        self.query.page = 1;
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch the current page and normalize every kiosk for display.
    pub async fn list(&self) -> Result<FleetPage, CoreError> {
        validate_query(&self.query)?;

        let page = self.client.list_kiosks(&self.query).await?;
        let now = Local::now().time();

        Ok(FleetPage {
            kiosks: page
                .data
                .into_iter()
                .map(|record| KioskView::from_record(record, now))
                .collect(),
            page: self.query.page,
            total_kiosks: page.pagination.total_kiosks,
            total_pages: page.pagination.total_pages,
        })
    }

    /// Kiosks an end user could walk up to right now: ACTIVE and mapped.
    pub async fn active_with_coordinates(&self) -> Result<Vec<KioskView>, CoreError> {
        let page = self.list().await?;
        Ok(page
            .kiosks
            .into_iter()
            .filter(|view| {
                view.kiosk.status() == Some(KioskStatus::Active)
                    && view.kiosk.coordinates.is_some()
            })
            .collect())
    }

    /// Active, mapped kiosks ordered by distance from `from`, nearest
    /// first. The distance in kilometers rides along with each row.
    pub async fn nearest(&self, from: Coordinates) -> Result<Vec<(KioskView, f64)>, CoreError> {
        let mut rows: Vec<(KioskView, f64)> = self
            .active_with_coordinates()
            .await?
            .into_iter()
            .filter_map(|view| {
                let to = view.kiosk.coordinates?;
                Some((view, geo::distance_km(from, to)))
            })
            .collect();
        rows.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(rows)
    }

    // ── Writes (all resync via list) ─────────────────────────────────

    /// Validate and create a kiosk, then resynchronize.
    ///
    /// On validation failure the backend is never contacted and the
    /// aggregated violations come back as [`CoreError::Validation`].
    pub async fn create(&self, draft: &KioskDraft) -> Result<FleetPage, CoreError> {
        let body = draft.normalize_for_write().map_err(CoreError::Validation)?;
        self.client.create_kiosk(&body).await?;
        debug!(kiosk_number = %body.kiosk_number, "kiosk created, resyncing");
        self.list().await
    }

    /// Validate and update a kiosk, then resynchronize.
    pub async fn update(&self, id: &str, draft: &KioskDraft) -> Result<FleetPage, CoreError> {
        let body = draft.normalize_for_write().map_err(CoreError::Validation)?;
        self.client.update_kiosk(id, &body).await?;
        debug!(%id, "kiosk updated, resyncing");
        self.list().await
    }

    /// Status-only transition, then resynchronize. Idempotent at the
    /// observable level: repeating the same transition yields the same
    /// list state.
    pub async fn set_status(&self, id: &str, status: KioskStatus) -> Result<FleetPage, CoreError> {
        self.client.set_kiosk_status(id, status).await?;
        debug!(%id, %status, "kiosk status changed, resyncing");
        self.list().await
    }

    /// Quick toggle from the listed row: ACTIVE goes inactive, anything
    /// else goes active. The kiosk must be on the current page.
    pub async fn toggle_status(&self, id: &str) -> Result<FleetPage, CoreError> {
        let page = self.list().await?;
        let row = page
            .kiosks
            .iter()
            .find(|view| view.kiosk.id == id)
            .ok_or_else(|| CoreError::KioskNotFound { id: id.to_owned() })?;

        self.set_status(id, toggled(row.kiosk.status())).await
    }

    /// Delete a kiosk, then resynchronize. Operator confirmation is the
    /// caller's responsibility.
    pub async fn remove(&self, id: &str) -> Result<FleetPage, CoreError> {
        self.client.delete_kiosk(id).await?;
        debug!(%id, "kiosk deleted, resyncing");
        self.list().await
    }
}

/// Reject a nonsensical pagination shape before it reaches the wire.
pub(crate) fn validate_query(query: &ListQuery) -> Result<(), CoreError> {
    let mut violations = Vec::new();
    if query.page == 0 {
        violations.push(Violation::new("page", "pages are numbered from 1"));
    }
    if query.limit == 0 || query.limit > 100 {
        violations.push(Violation::new("limit", "page size must be 1-100"));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations))
    }
}
