use anyhow::Context;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api_response::ErrorResponse;
use contracts::usecases::u601_enrich_companies::EnrichResponse;

use crate::shared::app_state::AppState;
use crate::usecases::u601_enrich_companies::extract_companies;

/// Имя поля multipart с файлом
const FILE_FIELD: &str = "file";

/// POST /api/enrich
pub async fn enrich(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match process_upload(state, multipart).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!("Enrichment request failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::processing_failed()),
            )
                .into_response()
        }
    }
}

async fn process_upload(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> anyhow::Result<EnrichResponse> {
    let mut multipart = multipart.context("request is not a multipart upload")?;
    let bytes = read_file_field(&mut multipart).await?;

    let companies = extract_companies(&bytes)?;
    tracing::info!(
        "Upload parsed: {} bytes, {} companies (limit {})",
        bytes.len(),
        companies.len(),
        state.executor.batch_limit()
    );

    // Пакет выполняется в отдельной задаче: отключение клиента его не прерывает
    let executor = state.executor.clone();
    let batch = tokio::spawn(async move { executor.run(companies).await })
        .await
        .context("enrichment batch task failed")?;

    Ok(EnrichResponse::new(batch.summary, batch.rows))
}

async fn read_file_field(multipart: &mut Multipart) -> anyhow::Result<Vec<u8>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field.bytes().await?;
            return Ok(bytes.to_vec());
        }
    }
    anyhow::bail!("multipart upload has no {:?} field", FILE_FIELD)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::configure_routes;
    use crate::shared::app_state::AppState;
    use crate::shared::config::Config;
    use crate::shared::llm::testing::ScriptedProvider;

    const BOUNDARY: &str = "enrich-test-boundary";

    fn app(provider: Arc<ScriptedProvider>) -> Router {
        configure_routes(AppState::with_provider(Config::default(), provider))
    }

    fn multipart_body(field: &str, content: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"companies.csv\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload(field: &str, content: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/enrich")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field, content)))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (u16, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_close(value: &Value, expected: f64) {
        let actual = value.as_f64().unwrap();
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    fn csv_with(count: usize) -> String {
        let mut csv = String::from("company,website\n");
        for i in 0..count {
            csv.push_str(&format!("Company {i},https://c{i}.example\n"));
        }
        csv
    }

    #[tokio::test]
    async fn test_enrich_success() {
        let provider = Arc::new(ScriptedProvider::constant(
            "```json\n{\"industry\":\"Tech\",\"tech_stack\":[\"Rust\"]}\n```",
        ));
        let (status, body) = send(app(provider.clone()), upload("file", csv_with(2).as_bytes())).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_processed"], 2);
        assert_close(&body["estimated_cost"], 2.0 * 0.15);
        assert_close(&body["retail_value"], 20.0);
        assert_close(&body["margin"], 20.0 - 2.0 * 0.15);

        let row = &body["data"][0];
        assert_eq!(row["company"], "Company 0");
        assert_eq!(row["website"], "https://c0.example");
        assert_eq!(row["industry"], "Tech");
        assert_eq!(row["tech_stack"], json!(["Rust"]));
        assert_close(&row["enrichment_cost"], 0.15);
        assert!(row["enriched_at"].as_str().unwrap().ends_with('Z'));
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_enrich_without_companies() {
        let provider = Arc::new(ScriptedProvider::constant("{}"));
        let (status, body) = send(app(provider.clone()), upload("file", b"company\n")).await;

        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "success": true,
                "total_processed": 0,
                "estimated_cost": 0.0,
                "retail_value": 0.0,
                "margin": 0.0,
                "data": []
            })
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_enrich_caps_at_fifty() {
        let provider = Arc::new(ScriptedProvider::constant("{}"));
        let (status, body) = send(app(provider.clone()), upload("file", csv_with(60).as_bytes())).await;

        assert_eq!(status, 200);
        assert_eq!(body["total_processed"], 50);
        assert_eq!(body["data"].as_array().unwrap().len(), 50);
        assert_eq!(provider.calls(), 50);
    }

    #[tokio::test]
    async fn test_unresolvable_rows_are_not_counted() {
        let provider = Arc::new(ScriptedProvider::constant("{}"));
        let csv = "name,city\nAcme,Berlin\n,Paris\nGlobex,Rome\n";
        let (status, body) = send(app(provider), upload("file", csv.as_bytes())).await;

        assert_eq!(status, 200);
        assert_eq!(body["total_processed"], 2);
        assert_eq!(body["data"][1]["name"], "Globex");
    }

    #[tokio::test]
    async fn test_reply_without_json_marks_row() {
        let provider = Arc::new(ScriptedProvider::constant("I don't know this company."));
        let (status, body) = send(app(provider), upload("file", b"company\nAcme\n")).await;

        assert_eq!(status, 200);
        assert_eq!(body["total_processed"], 1);
        assert_eq!(
            body["data"][0],
            json!({"company": "Acme", "error": "Enrichment failed"})
        );
    }

    #[tokio::test]
    async fn test_invalid_file_is_processing_failure() {
        let provider = Arc::new(ScriptedProvider::constant("{}"));
        let (status, body) = send(app(provider.clone()), upload("file", &[0xff, 0xfe, b'\n'])).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({"error": "Processing failed"}));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_field_is_processing_failure() {
        let provider = Arc::new(ScriptedProvider::constant("{}"));
        let (status, body) = send(app(provider), upload("attachment", b"company\nAcme\n")).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({"error": "Processing failed"}));
    }

    #[tokio::test]
    async fn test_non_multipart_request_is_processing_failure() {
        let provider = Arc::new(ScriptedProvider::constant("{}"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/enrich")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let (status, body) = send(app(provider), request).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({"error": "Processing failed"}));
    }

    #[tokio::test]
    async fn test_upload_over_size_limit_is_processing_failure() {
        let provider = Arc::new(ScriptedProvider::constant("{}"));
        let mut config = Config::default();
        config.upload.max_bytes = 64;
        let app = configure_routes(AppState::with_provider(config, provider.clone()));

        let csv = csv_with(20);
        assert!(csv.len() > 64);
        let (status, body) = send(app, upload("file", csv.as_bytes())).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({"error": "Processing failed"}));
        assert_eq!(provider.calls(), 0);
    }
}
