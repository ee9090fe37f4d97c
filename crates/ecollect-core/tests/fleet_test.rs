// End-to-end tests for the fleet controller's refetch-after-mutation
// protocol, against a wiremock backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ecollect_core::{
    AdminClient, CoreError, FleetController, KioskDraft, KioskStatus, ListQuery, MemoryTokenStore,
    SessionGate, StatusFilter, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, FleetController) {
    let server = MockServer::start().await;
    let gate = SessionGate::new(MemoryTokenStore::with_token("tok-123"));
    let client = AdminClient::new(&server.uri(), gate, &TransportConfig::default())
        .expect("client");
    (server, FleetController::new(Arc::new(client)))
}

fn valid_draft() -> KioskDraft {
    KioskDraft {
        kiosk_number: " k7 ".into(),
        location: " Taguig ".into(),
        latitude: "14.5306".into(),
        longitude: "121.0575".into(),
        status: String::new(),
        capacity_current: 0,
        capacity_max: 40,
        open_time: Some("06:00".into()),
        close_time: Some("22:00".into()),
        description: None,
    }
}

fn kiosk_row(id: &str, number: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "kioskNumber": number,
        "location": "Taguig",
        "coordinates": {"latitude": 14.5306, "longitude": 121.0575},
        "status": status,
        "capacity": {"current": 10, "max": 40},
        "operatingHours": {"open": "06:00", "close": "22:00"}
    })
}

fn page_body(rows: &[serde_json::Value]) -> serde_json::Value {
    json!({
        "data": rows,
        "pagination": {"totalKiosks": rows.len(), "totalPages": 1}
    })
}

// ── Create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_dispatches_then_resyncs_page_one() {
    let (server, fleet) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/kiosks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[kiosk_row("k7", "K7", "ACTIVE")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = fleet.create(&valid_draft()).await.expect("create");

    // The new kiosk is visible after the mandatory resync.
    assert_eq!(page.page, 1);
    assert_eq!(page.kiosks.len(), 1);
    assert_eq!(page.kiosks[0].kiosk.kiosk_number, "K7");
    assert_eq!(page.kiosks[0].capacity_pct, 25);
}

#[tokio::test]
async fn invalid_draft_never_contacts_the_backend() {
    let (server, fleet) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let draft = KioskDraft {
        kiosk_number: String::new(),
        capacity_current: 99,
        capacity_max: 5,
        ..valid_draft()
    };
    let err = fleet.create(&draft).await.expect_err("invalid draft");

    let violations = err.violations().expect("validation error");
    assert!(violations.iter().any(|v| v.field == "kioskNumber"));
    assert!(violations.iter().any(|v| v.field == "capacity"));
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_dispatches_then_resyncs() {
    let (server, fleet) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/kiosks/k7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[])))
        .expect(1)
        .mount(&server)
        .await;

    let page = fleet.remove("k7").await.expect("remove");
    assert!(page.kiosks.is_empty());
    assert_eq!(page.total_kiosks, 0);
}

// ── Status transitions ──────────────────────────────────────────────

#[tokio::test]
async fn set_status_twice_yields_the_same_list_state() {
    let (server, fleet) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/kiosks/k1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[kiosk_row("k1", "K1", "ACTIVE")])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let first = fleet
        .set_status("k1", KioskStatus::Active)
        .await
        .expect("first");
    let second = fleet
        .set_status("k1", KioskStatus::Active)
        .await
        .expect("second");

    assert_eq!(first.kiosks.len(), second.kiosks.len());
    assert_eq!(first.kiosks[0].kiosk.status, second.kiosks[0].kiosk.status);
    assert_eq!(first.total_kiosks, second.total_kiosks);
}

#[tokio::test]
async fn toggle_deactivates_an_active_kiosk() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[kiosk_row("k1", "K1", "ACTIVE")])),
        )
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/kiosks/k1/status"))
        .and(wiremock::matchers::body_json(json!({"status": "INACTIVE"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    fleet.toggle_status("k1").await.expect("toggle");
}

#[tokio::test]
async fn toggle_of_unlisted_kiosk_is_a_local_error() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = fleet.toggle_status("ghost").await.expect_err("not listed");
    assert!(matches!(err, CoreError::KioskNotFound { .. }));
}

// ── Errors surface for display ──────────────────────────────────────

#[tokio::test]
async fn list_failure_surfaces_the_server_message() {
    let (server, fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})),
        )
        .mount(&server)
        .await;

    let err = fleet.list().await.expect_err("backend down");
    match err {
        CoreError::Server { status, message } => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "db down");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn nonsense_pagination_is_rejected_locally() {
    let (server, _) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gate = SessionGate::new(MemoryTokenStore::with_token("tok"));
    let client = AdminClient::new(&server.uri(), gate, &TransportConfig::default())
        .expect("client");
    let fleet = FleetController::with_query(
        Arc::new(client),
        ListQuery {
            page: 0,
            limit: 0,
            ..ListQuery::default()
        },
    );

    let err = fleet.list().await.expect_err("page 0 is invalid");
    assert_eq!(err.violations().map(<[_]>::len), Some(2));
}

// ── Filter composition flows through to the wire ────────────────────

#[tokio::test]
async fn filter_changes_flow_into_the_request() {
    let (server, mut fleet) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .and(query_param("page", "1"))
        .and(query_param("search", "taguig"))
        .and(query_param("status", "INACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[])))
        .expect(1)
        .mount(&server)
        .await;

    fleet.set_page(5);
    fleet.set_search("taguig");
    fleet.set_status_filter(StatusFilter::Only(KioskStatus::Inactive));
    // Both setters reset pagination, so the request goes out for page 1.
    fleet.list().await.expect("filtered list");
}
