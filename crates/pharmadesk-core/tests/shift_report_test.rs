// Shift report screen against a mocked backend.

#![allow(clippy::unwrap_used)]

use chrono::Month;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharmadesk_api::ApiClient;
use pharmadesk_core::{CoreError, ShiftFilter, ShiftReport};

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let api = ApiClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());
    (server, api)
}

fn shift(id: i64, code: &str) -> Value {
    json!({
        "pharmacy_id": id,
        "pharmacy_code": code,
        "pharmacy_name": format!("Farmacia {id}"),
        "shift_date": "2026-03-14",
        "owner_name": "Ana Rojas",
        "owner_email": "ana@example.com"
    })
}

#[tokio::test]
async fn changing_month_refetches_with_code_and_month() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/codigos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "A1" }, { "id": 2, "name": "B2" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/turnos/filtrados"))
        .and(query_param("codigo", "A1"))
        .and(query_param("mes", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/turnos/filtrados"))
        .and(query_param("codigo", "A1"))
        .and(query_param("mes", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([shift(7, "A1")])))
        .expect(1)
        .mount(&server)
        .await;

    let mut report = ShiftReport::with_filter(ShiftFilter {
        code: None,
        month: Month::February,
    });
    report.load_codes(&api).await.unwrap();
    assert_eq!(report.codes().len(), 2);

    report.set_code(&api, Some("A1".into())).await.unwrap();
    assert!(report.shifts().is_empty());

    report.set_month(&api, Month::March).await.unwrap();
    assert_eq!(report.shifts().len(), 1);
    assert_eq!(report.filter().code.as_deref(), Some("A1"));
    assert_eq!(
        report.shifts()[0].date().map(|d| d.to_string()).as_deref(),
        Some("2026-03-14")
    );
}

#[tokio::test]
async fn sending_with_no_shifts_makes_no_request() {
    let (server, api) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/turnos/enviar-correos"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut report = ShiftReport::new();
    let err = report.send_emails(&api).await.unwrap_err();

    assert!(matches!(err, CoreError::NothingToSend));
    assert_eq!(report.error(), Some("no shifts to send"));
    report.dismiss_error();
    assert!(report.error().is_none());
}

#[tokio::test]
async fn send_posts_displayed_rows_once_and_reports_failures() {
    let (server, api) = setup().await;

    let rows = json!([shift(7, "A1"), shift(8, "A1")]);

    Mock::given(method("GET"))
        .and(path("/api/turnos/filtrados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows.clone()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/turnos/enviar-correos"))
        .and(body_json(json!({ "turnos": rows })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "exitosos": 1,
            "fallidos": 1,
            "message": "Correos enviados",
            "detalles": [{ "email": "ana@example.com", "ok": false }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut report = ShiftReport::new();
    report.refresh(&api).await.unwrap();

    let summary = report.send_emails(&api).await.unwrap();
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.details.len(), 1);
    assert_eq!(report.success(), Some("Correos enviados. 1 failed, see details."));
}

#[tokio::test]
async fn send_posts_rows_exactly_as_received() {
    let (server, api) = setup().await;

    // Numeric code, no owner columns, and an extra backend field.
    let rows = json!([{
        "pharmacy_id": 7,
        "pharmacy_code": 5,
        "pharmacy_name": "Farmacia Sur",
        "shift_date": "2026-03-14T04:00:00.000Z",
        "turno_id": 91
    }]);

    Mock::given(method("GET"))
        .and(path("/api/turnos/filtrados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows.clone()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/turnos/enviar-correos"))
        .and(body_json(json!({ "turnos": rows })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "exitosos": 0,
            "fallidos": 1,
            "message": "Correos enviados"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut report = ShiftReport::new();
    report.refresh(&api).await.unwrap();
    assert_eq!(report.shifts()[0].pharmacy_code, "5");

    let summary = report.send_emails(&api).await.unwrap();
    assert_eq!(summary.failed, 1);
}

#[tokio::test]
async fn send_failure_shows_server_message() {
    let (server, api) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/turnos/filtrados"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([shift(7, "A1")])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/turnos/enviar-correos"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "SMTP no disponible" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut report = ShiftReport::new();
    report.refresh(&api).await.unwrap();

    assert!(report.send_emails(&api).await.is_err());
    assert_eq!(report.error(), Some("SMTP no disponible"));
    assert!(report.success().is_none());
}
