use axum::body::Bytes;
use axum::Json;
use contracts::shared::api_response::WebhookAck;

/// POST /api/webhook/stripe
///
/// Заглушка: подпись не проверяется, событие не обрабатывается.
pub async fn stripe(body: Bytes) -> Json<WebhookAck> {
    tracing::info!("Payment webhook received ({} bytes), ignored", body.len());
    Json(WebhookAck { received: true })
}
