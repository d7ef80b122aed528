/// Prometheus metrics for profile-service
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// Upload URL requests (labels: outcome=issued|invalid_format|payload_too_large|signer_error)
    pub static ref UPLOAD_AUTHORIZATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "profile_upload_authorizations_total",
        "Total number of upload URL requests by outcome",
        &["outcome"]
    )
    .unwrap();

    /// Profile operations served (labels: operation=edit|update_photo|get_upload_url|get)
    pub static ref PROFILE_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "profile_requests_total",
        "Total number of profile operations served",
        &["operation"]
    )
    .unwrap();
}

pub fn record_upload_outcome(outcome: &str) {
    UPLOAD_AUTHORIZATIONS_TOTAL
        .with_label_values(&[outcome])
        .inc();
}

pub fn record_request(operation: &str) {
    PROFILE_REQUESTS_TOTAL.with_label_values(&[operation]).inc();
}

/// Render every registered metric in the Prometheus text format
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// GET /metrics
pub async fn metrics_handler() -> HttpResponse {
    match gather_metrics() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(body),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}
