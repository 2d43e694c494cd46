// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharmadesk_api::{ApiClient, Error, OwnerPayload, RecordId, UserPayload};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
    );
    (server, client)
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token_and_sends_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/usuarios/login"))
        .and(body_json(json!({ "gmail": "admin@example.com", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-123" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/duenios"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let token = client
        .login("admin@example.com", &SecretString::from("s3cret".to_owned()))
        .await
        .unwrap();

    assert_eq!(token.expose_secret(), "tok-123");
    assert!(client.has_token());
    assert!(client.list_owners().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_rejected_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/usuarios/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Credenciales inválidas" })),
        )
        .mount(&server)
        .await;

    let result = client
        .login("admin@example.com", &SecretString::from("wrong".to_owned()))
        .await;

    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "Credenciales inválidas"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
    assert!(!client.has_token());
}

// ── Owners ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_owners() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/duenios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ana", "fistLastName": "Rojas", "secondSurname": null,
              "ci": 4455667, "cellphone": "70000000", "gmail": "ana@example.com" },
            { "id": 2, "name": "Luis", "fistLastName": "Vaca", "ci": "991", "cellphone": 7123 }
        ])))
        .mount(&server)
        .await;

    let owners = client.list_owners().await.unwrap();

    assert_eq!(owners.len(), 2);
    assert_eq!(owners[0].first_last_name, "Rojas");
    assert_eq!(owners[0].ci, "4455667");
    assert_eq!(owners[1].id, RecordId::Number(2));
    assert_eq!(owners[1].cellphone, "7123");
    assert!(owners[1].gmail.is_none());
}

#[tokio::test]
async fn test_update_owner_puts_to_id_path() {
    let (server, client) = setup().await;

    let payload = OwnerPayload {
        name: "Ana".into(),
        first_last_name: "Rojas".into(),
        second_surname: Some("Paz".into()),
        ci: "4455667".into(),
        cellphone: "70000000".into(),
        gmail: None,
    };

    Mock::given(method("PUT"))
        .and(path("/api/duenios/1"))
        .and(body_json(json!({
            "name": "Ana", "fistLastName": "Rojas", "secondSurname": "Paz",
            "ci": "4455667", "cellphone": "70000000", "gmail": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "name": "Ana", "fistLastName": "Rojas", "secondSurname": "Paz",
            "ci": "4455667", "cellphone": "70000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client.update_owner("1", &payload).await.unwrap();
    assert_eq!(updated.second_surname.as_deref(), Some("Paz"));
}

#[tokio::test]
async fn test_delete_owner_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/duenios/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_owner("4").await.unwrap();
}

// ── Pharmacies ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_pharmacies_sends_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/farmacias/filtradas"))
        .and(query_param("filtro", "central"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Farmacia Central", "latitude": -17.78, "longitude": -63.18 }
        ])))
        .mount(&server)
        .await;

    let found = client.search_pharmacies("central").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Farmacia Central");
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_user_without_password_omits_field() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/usuarios/9"))
        .and(body_json(json!({ "username": "maria", "gmail": "maria@example.com", "rol": "admin" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9, "username": "maria", "gmail": "maria@example.com", "rol": "admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = UserPayload {
        username: "maria".into(),
        password: None,
        gmail: "maria@example.com".into(),
        rol: "admin".into(),
    };
    let user = client.update_user("9", &body).await.unwrap();
    assert_eq!(user.rol, "admin");
}

// ── Shifts ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_shifts_sends_empty_code_when_unset() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/turnos/filtrados"))
        .and(query_param("codigo", ""))
        .and(query_param("mes", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "pharmacy_id": 3, "pharmacy_code": "A1", "pharmacy_name": "Central",
              "shift_date": "2026-10-03T00:00:00.000Z", "owner_name": "Ana",
              "owner_email": "ana@example.com" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let shifts = client.list_shifts(None, 10).await.unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].pharmacy_code, "A1");
}

#[tokio::test]
async fn test_send_shift_emails_wraps_list() {
    let (server, client) = setup().await;

    let shift = json!({
        "pharmacy_id": 3, "pharmacy_code": "A1", "pharmacy_name": "Central",
        "shift_date": "2026-10-03", "owner_name": "Ana", "owner_email": "ana@example.com"
    });

    Mock::given(method("POST"))
        .and(path("/api/turnos/enviar-correos"))
        .and(body_json(json!({ "turnos": [shift.clone()] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "exitosos": 1, "fallidos": 0, "message": "1 correo enviado", "detalles": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let shifts = vec![serde_json::from_value(shift).unwrap()];
    let report = client.send_shift_emails(&shifts).await.unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.message, "1 correo enviado");
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_error_body_prefers_error_field() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/duenios"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "El CI ya está registrado",
            "message": "Bad Request"
        })))
        .mount(&server)
        .await;

    let payload = OwnerPayload {
        name: "Ana".into(),
        first_last_name: "Rojas".into(),
        second_surname: None,
        ci: "1".into(),
        cellphone: "2".into(),
        gmail: None,
    };
    let err = client.create_owner(&payload).await.unwrap_err();

    match &err {
        Error::Api { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "El CI ya está registrado");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(err.server_message(), Some("El CI ya está registrado"));
}

#[tokio::test]
async fn test_not_found_and_plain_text_errors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/farmacias/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Farmacia no encontrada"))
        .mount(&server)
        .await;

    let err = client.get_pharmacy("99").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("Farmacia no encontrada"));
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/zonas"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.list_zones().await.unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/usuarios"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token inválido" })))
        .mount(&server)
        .await;

    let err = client.list_users().await.unwrap_err();
    assert!(err.is_auth_error());
    assert!(matches!(err, Error::Unauthorized { .. }));
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/codigos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client.list_codes().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>proxy</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
