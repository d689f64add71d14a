use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware: метод, путь, статус и время выполнения каждого запроса
pub async fn request_logger(req: Request, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if response.status().is_success() {
        tracing::info!(%method, %path, status, elapsed_ms, "request completed");
    } else {
        tracing::warn!(%method, %path, status, elapsed_ms, "request failed");
    }

    response
}
