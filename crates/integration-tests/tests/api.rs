//! End-to-end API tests.
//!
//! Each test runs once per storage backend so both stores are held to the
//! same observable behaviour.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::body::Body;
use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use avukat_ajanda_integration_tests::{Backend, TestApp, build_request};

async fn apps() -> Vec<TestApp> {
    let mut apps = Vec::new();
    for backend in Backend::ALL {
        apps.push(TestApp::new(backend).await.unwrap());
    }
    apps
}

fn client_body(name: &str, email: &str) -> Value {
    json!({ "name": name, "email": email, "phone": "+90 212 555 00 00" })
}

async fn create_client(app: &TestApp, name: &str, email: &str) -> Value {
    let response = app.post_json("/api/clients", &client_body(name, email)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", app.backend);
    response.body
}

async fn create_case(app: &TestApp, body: Value) -> Value {
    let response = app.post_json("/api/cases", &body).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", app.backend);
    response.body
}

// =============================================================================
// Service Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_banner_reports_database() {
    for app in apps().await {
        let response = app.get("/").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "AvukatAjanda API");
        assert_eq!(response.body["status"], "active");
        assert_eq!(response.body["database"], "connected");
    }
}

#[tokio::test]
async fn test_health_and_readiness() {
    for app in apps().await {
        let health = app.get("/health").await;
        assert_eq!(health.status, StatusCode::OK);
        assert_eq!(health.body, json!({ "status": "healthy" }));

        let ready = app.get("/health/ready").await;
        assert_eq!(ready.status, StatusCode::OK);
        assert_eq!(ready.body["status"], "ready");
        let expected = match app.backend {
            Backend::Memory => "memory",
            Backend::Sqlite => "sqlite",
        };
        assert_eq!(ready.body["database"], expected);
    }
}

#[tokio::test]
async fn test_version_reports_environment() {
    for app in apps().await {
        let response = app.get("/api/version").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["name"], "AvukatAjanda API");
        assert_eq!(response.body["environment"], "test");
        assert!(response.body["version"].as_str().is_some_and(|v| !v.is_empty()));
    }
}

#[tokio::test]
async fn test_request_id_is_generated_or_echoed() {
    for app in apps().await {
        let generated = app.get("/health").await;
        let id = generated.headers["x-request-id"].to_str().unwrap();
        assert_eq!(id.len(), 36);

        let request = build_request(
            Method::GET,
            "/health",
            Body::empty(),
            &[("x-request-id", "trace-me-123")],
        );
        let echoed = app.send(request).await;
        assert_eq!(echoed.headers["x-request-id"], "trace-me-123");
    }
}

// =============================================================================
// Clients
// =============================================================================

#[tokio::test]
async fn test_create_then_list_client() {
    for app in apps().await {
        let created = create_client(&app, "Ayşe Yılmaz", "ayse@example.com").await;
        assert!(created["id"].as_i64().unwrap() > 0);
        assert!(created["created_at"].is_string());

        let listed = app.get("/api/clients").await;
        assert_eq!(listed.status, StatusCode::OK);
        assert_eq!(listed.body, json!([created]));
    }
}

#[tokio::test]
async fn test_client_ids_are_fresh() {
    for app in apps().await {
        let first = create_client(&app, "A", "a@example.com").await;
        let second = create_client(&app, "B", "b@example.com").await;

        assert_ne!(first["id"], second["id"]);
        assert!(second["id"].as_i64() > first["id"].as_i64());
    }
}

#[tokio::test]
async fn test_duplicate_email_conflicts_and_keeps_one() {
    for app in apps().await {
        create_client(&app, "First", "same@example.com").await;

        let response = app
            .post_json(
                "/api/clients",
                &json!({ "name": "Second", "email": "SAME@example.com", "phone": "0" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CONFLICT, "{:?}", app.backend);
        assert_eq!(response.body["error"], "a client with this email already exists");

        let listed = app.get("/api/clients").await;
        let clients = listed.body.as_array().unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0]["name"], "First");
    }
}

#[tokio::test]
async fn test_missing_email_is_rejected_and_not_stored() {
    for app in apps().await {
        let response = app
            .post_json("/api/clients", &json!({ "name": "No Mail", "phone": "0555" }))
            .await;

        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body["error"], "Validation failed");
        assert_eq!(response.body["details"][0]["field"], "email");

        let listed = app.get("/api/clients").await;
        assert_eq!(listed.body, json!([]));
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    for app in apps().await {
        let response = app.post_raw("/api/clients", "{\"name\": ").await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.body["error"].is_string());
    }
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported() {
    for app in apps().await {
        let body = client_body("Ayşe", "ayse@example.com").to_string();
        let request = build_request(Method::POST, "/api/clients", Body::from(body), &[]);
        let response = app.send(request).await;

        assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(response.body["error"].is_string());
        assert_eq!(app.get("/api/clients").await.body, json!([]));
    }
}

#[tokio::test]
async fn test_wrong_typed_field_names_the_field() {
    for app in apps().await {
        let response = app
            .post_json(
                "/api/clients",
                &json!({ "name": 5, "email": "five@example.com", "phone": "0555" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body["error"], "Validation failed");
        assert_eq!(response.body["details"][0]["field"], "name");

        let response = app
            .post_json(
                "/api/cases",
                &json!({ "case_no": "F-1", "title": "Dosya", "client_id": 1.5 }),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body["details"][0]["field"], "client_id");

        assert_eq!(app.get("/api/clients").await.body, json!([]));
        assert_eq!(app.get("/api/cases").await.body, json!([]));
    }
}

#[tokio::test]
async fn test_rejected_duplicate_does_not_consume_id() {
    for app in apps().await {
        let first = create_client(&app, "First", "first@example.com").await;

        let duplicate = app
            .post_json("/api/clients", &client_body("Again", "first@example.com"))
            .await;
        assert_eq!(duplicate.status, StatusCode::CONFLICT);

        let next = create_client(&app, "Next", "next@example.com").await;
        assert_eq!(
            next["id"].as_i64().unwrap(),
            first["id"].as_i64().unwrap() + 1,
            "{:?}",
            app.backend
        );
    }
}

#[tokio::test]
async fn test_non_numeric_id_is_json_bad_request() {
    for app in apps().await {
        for path in ["/api/clients/abc", "/api/clients/abc/stats", "/api/cases/abc"] {
            let response = app.get(path).await;

            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{path}");
            assert!(response.body["error"].is_string(), "{path}");
        }
    }
}

#[tokio::test]
async fn test_get_client_and_not_found() {
    for app in apps().await {
        let created = create_client(&app, "Mehmet", "mehmet@example.com").await;
        let id = created["id"].as_i64().unwrap();

        let found = app.get(&format!("/api/clients/{id}")).await;
        assert_eq!(found.status, StatusCode::OK);
        assert_eq!(found.body, created);

        let missing = app.get("/api/clients/9999").await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.body["error"], "Client 9999 not found");
    }
}

#[tokio::test]
async fn test_client_stats() {
    for app in apps().await {
        let client = create_client(&app, "Zeynep", "zeynep@example.com").await;
        let id = client["id"].as_i64().unwrap();
        create_case(&app, json!({ "case_no": "K-1", "title": "Kira", "client_id": id })).await;
        create_case(
            &app,
            json!({ "case_no": "K-2", "title": "Tahliye", "client_id": id, "status": "closed" }),
        )
        .await;

        let stats = app.get(&format!("/api/clients/{id}/stats")).await;
        assert_eq!(stats.status, StatusCode::OK);
        assert_eq!(
            stats.body,
            json!({ "client_id": id, "total_cases": 2, "active_cases": 1 })
        );

        let missing = app.get("/api/clients/4242/stats").await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Cases
// =============================================================================

#[tokio::test]
async fn test_case_status_defaults_to_active() {
    for app in apps().await {
        let case = create_case(
            &app,
            json!({ "case_no": "2026/1", "title": "Alacak davası", "client_id": 1 }),
        )
        .await;

        assert_eq!(case["status"], "active");
        assert_eq!(case["client_id"], 1);
    }
}

#[tokio::test]
async fn test_case_for_unknown_client_is_accepted() {
    for app in apps().await {
        let case = create_case(
            &app,
            json!({ "case_no": "2026/2", "title": "İş davası", "client_id": 777 }),
        )
        .await;
        assert_eq!(case["client_id"], 777);

        let fetched = app.get(&format!("/api/cases/{}", case["id"])).await;
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.body, case);
    }
}

#[tokio::test]
async fn test_duplicate_case_number_conflicts() {
    for app in apps().await {
        let body = json!({ "case_no": "2026/3", "title": "Miras", "client_id": 1 });
        create_case(&app, body.clone()).await;

        let response = app.post_json("/api/cases", &body).await;
        assert_eq!(response.status, StatusCode::CONFLICT);

        let listed = app.get("/api/cases").await;
        assert_eq!(listed.body.as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_case_validation() {
    for app in apps().await {
        let response = app
            .post_json(
                "/api/cases",
                &json!({ "case_no": "2026/4", "title": "Ceza", "client_id": 1, "status": "archived" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body["details"][0]["field"], "status");

        let response = app.post_json("/api/cases", &json!({ "title": "Ceza" })).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = response.body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["case_no", "client_id"]);

        assert_eq!(app.get("/api/cases").await.body, json!([]));
    }
}

#[tokio::test]
async fn test_case_list_status_filter() {
    for app in apps().await {
        for (no, status) in [("A-1", "active"), ("A-2", "pending"), ("A-3", "active")] {
            create_case(
                &app,
                json!({ "case_no": no, "title": "Dosya", "client_id": 1, "status": status }),
            )
            .await;
        }

        let active = app.get("/api/cases?status=active").await;
        assert_eq!(active.status, StatusCode::OK);
        let numbers: Vec<&str> = active
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["case_no"].as_str().unwrap())
            .collect();
        assert_eq!(numbers, ["A-1", "A-3"]);

        let all = app.get("/api/cases").await;
        assert_eq!(all.body.as_array().unwrap().len(), 3);

        let bad = app.get("/api/cases?status=open").await;
        assert_eq!(bad.status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_case_not_found() {
    for app in apps().await {
        let response = app.get("/api/cases/31").await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"], "Case 31 not found");
    }
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_stats() {
    for app in apps().await {
        let empty = app.get("/api/stats").await;
        assert_eq!(
            empty.body,
            json!({ "total_cases": 0, "active_cases": 0, "total_clients": 0, "pending_invoices": 3 })
        );

        let a = create_client(&app, "A", "a@example.com").await;
        let b = create_client(&app, "B", "b@example.com").await;
        create_case(&app, json!({ "case_no": "S-1", "title": "T", "client_id": a["id"] })).await;
        create_case(&app, json!({ "case_no": "S-2", "title": "T", "client_id": b["id"] })).await;
        create_case(
            &app,
            json!({ "case_no": "S-3", "title": "T", "client_id": b["id"], "status": "closed" }),
        )
        .await;

        let stats = app.get("/api/stats").await;
        assert_eq!(stats.status, StatusCode::OK);
        assert_eq!(
            stats.body,
            json!({ "total_cases": 3, "active_cases": 2, "total_clients": 2, "pending_invoices": 3 })
        );
    }
}

#[tokio::test]
async fn test_calendar_is_always_empty() {
    for app in apps().await {
        assert_eq!(app.get("/api/calendar").await.body, json!([]));

        create_client(&app, "A", "a@example.com").await;
        create_case(&app, json!({ "case_no": "C-1", "title": "T", "client_id": 1 })).await;

        let response = app.get("/api/calendar").await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!([]));
    }
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = TestApp::with_env(
        Backend::Memory,
        &[("AJANDA_CORS_ORIGINS", "http://localhost:3000")],
    )
    .await
    .unwrap();

    let request = build_request(
        Method::GET,
        "/health",
        Body::empty(),
        &[("origin", "http://localhost:3000")],
    );
    let response = app.send(request).await;

    assert_eq!(
        response.headers["access-control-allow-origin"],
        "http://localhost:3000"
    );
}
