// Integration tests for `AdminClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ecollect_api::types::{
    CapacityWrite, CoordinatesDto, KioskStatus, KioskWrite, ListQuery, StatusFilter,
};
use ecollect_api::{AdminClient, Error, ErrorKind, MemoryTokenStore, SessionGate, SessionState};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_authenticated() -> (MockServer, AdminClient) {
    let server = MockServer::start().await;
    let gate = SessionGate::new(MemoryTokenStore::with_token("tok-123"));
    let client =
        AdminClient::from_reqwest(&server.uri(), reqwest::Client::new(), gate).expect("client");
    (server, client)
}

async fn setup_anonymous() -> (MockServer, AdminClient) {
    let server = MockServer::start().await;
    let client = AdminClient::from_reqwest(&server.uri(), reqwest::Client::new(), SessionGate::ephemeral())
        .expect("client");
    (server, client)
}

fn sample_write() -> KioskWrite {
    KioskWrite {
        kiosk_number: "K1".into(),
        location: "Makati".into(),
        coordinates: CoordinatesDto {
            latitude: 14.5995,
            longitude: 120.9842,
        },
        status: KioskStatus::Active,
        capacity: CapacityWrite { current: 0, max: 50 },
        operating_hours: None,
        description: None,
    }
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_establishes_session() {
    let (server, client) = setup_anonymous().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "admin", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-xyz"})))
        .mount(&server)
        .await;

    client
        .login("admin", &SecretString::from("hunter2"))
        .await
        .expect("login should succeed");

    assert_eq!(client.session().state(), SessionState::Authenticated);
    assert!(client.session().bearer_token().is_some());
}

#[tokio::test]
async fn rejected_login_is_invalid_credentials_not_session_expiry() {
    let (server, client) = setup_anonymous().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad creds"})))
        .mount(&server)
        .await;

    let result = client.login("admin", &SecretString::from("wrong")).await;

    assert!(matches!(result, Err(Error::InvalidCredentials)));
    assert_eq!(client.session().state(), SessionState::Anonymous);
}

// ── Bearer attachment ───────────────────────────────────────────────

#[tokio::test]
async fn protected_calls_carry_the_bearer_token() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"users": 3, "kiosks": 2, "ewaste": 9, "kioskStatus": "AVAILABLE"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = client.get_stats().await.expect("stats");
    assert_eq!(stats.users, 3);
    assert_eq!(stats.kiosks, 2);
    assert_eq!(stats.kiosk_status, "AVAILABLE");
}

// ── Query composition ───────────────────────────────────────────────

#[tokio::test]
async fn list_query_omits_all_sentinel_and_empty_search() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "pagination": {"totalKiosks": 0, "totalPages": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_kiosks(&ListQuery::default()).await.expect("list");
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total_kiosks, 0);
}

#[tokio::test]
async fn list_query_sends_status_upper_cased() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/kiosks"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "25"))
        .and(query_param("search", "makati"))
        .and(query_param("status", "MAINTENANCE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "_id": "k9",
                "kioskNumber": "K9",
                "location": "Makati",
                "status": "MAINTENANCE"
            }],
            "pagination": {"totalKiosks": 26, "totalPages": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery {
        page: 2,
        limit: 25,
        search: "makati".into(),
        status: StatusFilter::Only(KioskStatus::Maintenance),
    };
    let page = client.list_kiosks(&query).await.expect("list");

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].kiosk_number, "K9");
    assert_eq!(page.pagination.total_kiosks, 26);
    assert_eq!(page.pagination.total_pages, 2);
}

// ── Forced logout ───────────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_response_forces_the_session_out() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut events = client.session().events();
    let result = client.get_stats().await;

    assert!(matches!(result, Err(Error::SessionExpired)));
    assert_eq!(client.session().state(), SessionState::Anonymous);
    assert!(client.session().bearer_token().is_none());
    assert_eq!(
        events.try_recv(),
        Ok(ecollect_api::SessionEvent::ForcedLogout)
    );
}

#[tokio::test]
async fn forbidden_response_also_forces_the_session_out() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("DELETE"))
        .and(path("/api/admin/kiosks/k1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.delete_kiosk("k1").await;

    assert!(matches!(result, Err(Error::SessionExpired)));
    assert_eq!(client.session().state(), SessionState::Anonymous);
}

// ── Error normalization ─────────────────────────────────────────────

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/kiosks"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"message": "kiosk number already exists"})),
        )
        .mount(&server)
        .await;

    let result = client.create_kiosk(&sample_write()).await;

    match result {
        Err(Error::Server { status, ref message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "kiosk number already exists");
        }
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_payload_falls_back_to_status_text() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.get_stats().await.expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::Server);
    match err {
        Error::Server { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Server error, got: {other:?}"),
    }
}

#[tokio::test]
async fn connection_failure_normalizes_to_network_kind() {
    // Point at a port nothing listens on.
    let gate = SessionGate::ephemeral();
    let client = AdminClient::from_reqwest("http://127.0.0.1:1", reqwest::Client::new(), gate)
        .expect("client");

    let err = client.get_stats().await.expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.is_retryable());
}

// ── Pre-dispatch validation ─────────────────────────────────────────

#[tokio::test]
async fn malformed_id_never_reaches_the_wire() {
    let (server, client) = setup_authenticated().await;

    // Any request hitting the server fails the test.
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .update_kiosk("", &sample_write())
        .await
        .expect_err("empty id must be rejected");
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client
        .delete_kiosk("bad id")
        .await
        .expect_err("id with whitespace must be rejected");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// ── Ledger endpoints ────────────────────────────────────────────────

#[tokio::test]
async fn ewaste_rows_parse_the_populated_user_reference() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/ewaste"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "_id": "e1",
                    "userId": {"_id": "u1", "fullName": "Ana Cruz"},
                    "scannedDate": "2025-03-04T08:30:00Z",
                    "category": "Phone",
                    "phpValue": 120.5,
                    "points": 12
                },
                {
                    "_id": "e2",
                    "userId": null,
                    "scannedDate": "2025-03-05T10:00:00Z",
                    "category": "Laptop",
                    "phpValue": 800.0,
                    "points": 80
                }
            ]
        })))
        .mount(&server)
        .await;

    let rows = client.list_ewaste(&ListQuery::default()).await.expect("ewaste");

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].user.as_ref().map(|u| u.full_name.as_str()),
        Some("Ana Cruz")
    );
    // Scans from deleted accounts keep flowing through.
    assert!(rows[1].user.is_none());
}

#[tokio::test]
async fn ewaste_summary_unwraps_the_envelope() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/ewaste-summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "Phone", "count": 4},
                {"_id": "Laptop", "count": 2}
            ]
        })))
        .mount(&server)
        .await;

    let summary = client.get_ewaste_summary().await.expect("summary");
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].category, "Phone");
    assert_eq!(summary[0].count, 4);
}

#[tokio::test]
async fn status_patch_targets_the_status_subresource() {
    let (server, client) = setup_authenticated().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/kiosks/k1/status"))
        .and(body_json(json!({"status": "INACTIVE"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_kiosk_status("k1", KioskStatus::Inactive)
        .await
        .expect("status patch");
}
