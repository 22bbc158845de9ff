use actix_web::http::Method;
use actix_web::{test, web, App};

use v_rbac_mock::middleware::cors::CorsMiddleware;
use v_rbac_mock::modules::rbac::catalog::CatalogStore;
use v_rbac_mock::modules::rbac::routes as rbac_routes;
use v_rbac_mock::modules::users::registry::UserRegistry;
use v_rbac_mock::modules::users::routes as user_routes;
use v_rbac_mock::route_registry::not_found;

// 完整装配一个与 bootstrap 相同形状的应用 / assemble an app with the same
// shape the bootstrap builds: CORS outermost, seeded stores, aliased
// routes, 404 default handler.
macro_rules! test_app {
    () => {{
        let catalog = web::Data::new(CatalogStore::seed());
        let registry = web::Data::new(UserRegistry::seed());
        test::init_service(
            App::new()
                .wrap(CorsMiddleware::permissive())
                .app_data(catalog)
                .app_data(registry)
                .route(
                    "/api-doc/openapi.json",
                    web::get().to(v_rbac_mock::api::swagger::openapi_json),
                )
                .configure(rbac_routes::configure_catalog)
                .configure(rbac_routes::configure_health)
                .configure(user_routes::configure)
                .default_service(web::route().to(not_found)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_catalog_counts_match_seed() {
    let app = test_app!();

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/rbac/policies").to_request())
            .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/rbac/plugins").to_request())
            .await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/rbac/permissions").to_request(),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_catalog_gets_are_byte_identical() {
    let app = test_app!();

    for path in ["/api/rbac/policies", "/api/rbac/plugins", "/api/rbac/permissions"] {
        let first =
            test::call_and_read_body(&app, test::TestRequest::get().uri(path).to_request()).await;
        let second =
            test::call_and_read_body(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(first, second, "repeated GET {} must not drift", path);
    }
}

#[actix_web::test]
async fn test_policy_one_has_documented_fields() {
    let app = test_app!();

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/policies").to_request())
            .await;
    let record = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == "1")
        .expect("policy id 1 must be present");

    assert_eq!(record["entityReference"], "user:default/admin");
    assert_eq!(record["permission"], "catalog-entity");
    assert_eq!(record["policy"], "read");
    assert_eq!(record["effect"], "allow");
}

#[actix_web::test]
async fn test_prefixed_and_bare_aliases_agree() {
    let app = test_app!();

    let pairs = [
        ("/api/rbac/policies", "/policies"),
        ("/api/rbac/plugins", "/plugins"),
        ("/api/rbac/permissions", "/permissions"),
    ];
    for (canonical, alias) in pairs {
        let a = test::call_and_read_body(&app, test::TestRequest::get().uri(canonical).to_request())
            .await;
        let b =
            test::call_and_read_body(&app, test::TestRequest::get().uri(alias).to_request()).await;
        assert_eq!(a, b, "{} and {} must serve the same body", canonical, alias);
    }
}

#[actix_web::test]
async fn test_health_reports_status_and_user_count() {
    let app = test_app!();

    for path in ["/api/rbac/health", "/health"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["users"], 1);
        assert!(body["timestamp"].is_string());
        assert!(body["message"].is_string());
    }
}

#[actix_web::test]
async fn test_registration_round_trip() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/rbac/users/register")
            .set_json(serde_json::json!({
                "username": "testuser1",
                "email": "testuser1@example.com",
                "role": "user",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["id"], "user2");
    assert_eq!(body["user"]["username"], "testuser1");
    // createdAt 有意不出现在注册响应里 / intentionally absent from the 201 payload
    assert!(body["user"].get("createdAt").is_none());

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/rbac/users").to_request())
            .await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);

    let matches: Vec<_> = users
        .iter()
        .filter(|u| u["username"] == "testuser1")
        .collect();
    assert_eq!(matches.len(), 1, "new user must appear exactly once");
    assert_eq!(matches[0]["email"], "testuser1@example.com");
    assert_eq!(matches[0]["role"], "user");
    assert!(matches[0]["createdAt"].is_string());
    assert_ne!(matches[0]["id"], users[0]["id"]);
}

#[actix_web::test]
async fn test_duplicate_registration_is_rejected() {
    let app = test_app!();

    let payload = serde_json::json!({
        "username": "testuser1",
        "email": "testuser1@example.com",
    });

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/rbac/users/register")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/rbac/users/register")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "User with this username or email already exists"
    );

    // 注册表大小不得增长 / registry size must not grow
    let body: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/rbac/users").to_request())
            .await;
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_missing_username_is_rejected_without_mutation() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/rbac/users/register")
            .set_json(serde_json::json!({"email": "only@example.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Username and email are required");

    let body: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/rbac/users").to_request())
            .await;
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_default_role_is_user() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/rbac/users/register")
            .set_json(serde_json::json!({
                "username": "norole",
                "email": "norole@example.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["role"], "user");
}

#[actix_web::test]
async fn test_unknown_route_returns_404_with_path() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/does-not-exist").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], "/does-not-exist");
}

#[actix_web::test]
async fn test_preflight_answers_any_path() {
    let app = test_app!();

    for path in ["/api/rbac/policies", "/api/rbac/users/register", "/nowhere"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::default()
                .method(Method::OPTIONS)
                .uri(path)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200, "OPTIONS {} must answer 200", path);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        let body = test::read_body(resp).await;
        assert!(body.is_empty(), "preflight body must be empty");
    }
}

#[actix_web::test]
async fn test_cors_headers_on_ordinary_responses() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/rbac/health").to_request(),
    )
    .await;
    let headers = resp.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-credentials").unwrap(),
        "false"
    );
    assert_eq!(headers.get("access-control-max-age").unwrap(), "86400");
    assert_eq!(headers.get("content-type").unwrap(), "application/json");

    // 错误响应同样携带跨域头 / error responses carry the headers too
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/missing").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[actix_web::test]
async fn test_openapi_document_is_served() {
    let app = test_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api-doc/openapi.json").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["paths"]["/api/rbac/policies"].is_object());
}
