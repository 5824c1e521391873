use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{App, test};
use auditly::models::AuditOptions;
use auditly::server::routes;
use serde_json::{Value, json};

fn bare_website_data() -> Value {
    json!({
        "url": "https://bare.example.com",
        "technical": {"ssl": false, "robotsTxt": true, "sitemap": true, "mobileFriendly": true},
        "title": "",
        "description": "",
        "headings": {"h1": [], "h2": [], "h3": []},
        "images": {"total": 0, "withAlt": 0, "withoutAlt": 0},
        "wordCount": 50
    })
}

#[actix_web::test]
async fn test_health_endpoints() {
    let app = test::init_service(App::new().configure(routes(AuditOptions::default()))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Server is running");

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "API server is running");
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_analyze_returns_report() {
    let app = test::init_service(App::new().configure(routes(AuditOptions::default()))).await;

    let req = test::TestRequest::post()
        .uri("/api/seo-audit/analyze")
        .set_json(json!({ "websiteData": bare_website_data() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let report = &body["seoReport"];
    assert_eq!(report["overall"]["score"], 42);
    assert_eq!(report["technical"]["score"], 75);
    assert_eq!(report["onPage"]["score"], 3);
    assert_eq!(report["content"]["score"], 6);
    assert_eq!(report["pages"][0]["url"], "https://bare.example.com");
    assert!(report["recommendations"].as_array().is_some_and(|recs| !recs.is_empty()));
}

#[actix_web::test]
async fn test_analyze_without_website_data() {
    let app = test::init_service(App::new().configure(routes(AuditOptions::default()))).await;

    for payload in [json!({}), json!({ "websiteData": null })] {
        let req = test::TestRequest::post()
            .uri("/api/seo-audit/analyze")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Website data is required");
    }
}

#[actix_web::test]
async fn test_analyze_rejects_invalid_data() {
    let app = test::init_service(App::new().configure(routes(AuditOptions::default()))).await;

    let invalid = [
        json!({ "websiteData": {"images": {"total": 3, "withAlt": 1, "withoutAlt": 0}} }),
        json!({ "websiteData": {"wordCount": -5} }),
        json!({ "websiteData": "just a string" }),
    ];

    for payload in invalid {
        let req = test::TestRequest::post()
            .uri("/api/seo-audit/analyze")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string(), "{}", payload);
    }
}

#[actix_web::test]
async fn test_analyze_rejects_malformed_json() {
    let app = test::init_service(App::new().configure(routes(AuditOptions::default()))).await;

    let req = test::TestRequest::post()
        .uri("/api/seo-audit/analyze")
        .insert_header(ContentType::json())
        .set_payload("{\"websiteData\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_report_endpoint_renders_html() {
    let app = test::init_service(App::new().configure(routes(AuditOptions::default()))).await;

    let req = test::TestRequest::post()
        .uri("/api/seo-audit/report")
        .set_json(json!({ "websiteData": bare_website_data() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"<div class="score score-low">42</div>"#));
}

#[actix_web::test]
async fn test_exclude_option_reaches_handlers() {
    let options = AuditOptions {
        image_alt_scoring: auditly::models::ImageAltScoring::Exclude,
    };
    let app = test::init_service(App::new().configure(routes(options))).await;

    let req = test::TestRequest::post()
        .uri("/api/seo-audit/analyze")
        .set_json(json!({ "websiteData": bare_website_data() }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["seoReport"]["onPage"]["score"], 4);
}
