use crate::error::AuditError;
use crate::html_report;
use crate::models::{AuditOptions, SeoReport, WebsiteSnapshot};
use crate::seo_analyzer::SeoAnalyzer;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, error, web};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;

/// Snapshots can embed full page text, so allow large bodies
const BODY_LIMIT: usize = 50 * 1024 * 1024;

const ANALYSIS_FAILED: &str = "Failed to analyze SEO";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub website_data: Option<Value>,
}

impl ResponseError for AuditError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_client_error() {
            tracing::warn!(error = %self, "Rejected audit request");
            self.to_string()
        } else {
            tracing::error!(error = %self, "Error analyzing SEO");
            ANALYSIS_FAILED.to_string()
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Register all routes and shared state on an app
pub fn routes(options: AuditOptions) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(options))
            .app_data(json_config())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(api_health))
                    .service(
                        web::scope("/seo-audit")
                            .route("/analyze", web::post().to(analyze))
                            .route("/report", web::post().to(report)),
                    ),
            );
    }
}

pub async fn serve(host: &str, port: u16, options: AuditOptions) -> Result<()> {
    let server = HttpServer::new(move || App::new().configure(routes(options)))
        .bind((host, port))
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    tracing::info!(host, port, "SEO audit server listening");

    server.run().await.context("SEO audit server stopped")?;
    Ok(())
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(|err, _req| {
            let message = err.to_string();
            tracing::warn!(error = %message, "Malformed request body");
            let response = HttpResponse::BadRequest().json(json!({ "error": message }));
            error::InternalError::from_response(err, response).into()
        })
}

fn audit(request: AnalyzeRequest, options: &AuditOptions) -> Result<SeoReport, AuditError> {
    let snapshot = WebsiteSnapshot::from_value(request.website_data.unwrap_or(Value::Null))?;
    SeoAnalyzer::analyze(&snapshot, options)
}

async fn analyze(
    options: web::Data<AuditOptions>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, AuditError> {
    let report = audit(body.into_inner(), &options)?;
    let report = serde_json::to_value(&report).map_err(|e| AuditError::Analysis(e.to_string()))?;

    Ok(HttpResponse::Ok().json(json!({ "seoReport": report })))
}

async fn report(
    options: web::Data<AuditOptions>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, AuditError> {
    let report = audit(body.into_inner(), &options)?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html_report::render_report(&report)))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Server is running",
    }))
}

async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "API server is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
