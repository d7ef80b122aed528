use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    database: &'static str,
}

/// GET /api/v1/health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/v1/health/live
pub async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// GET /api/v1/health/ready
///
/// Ready only when Postgres answers a trivial query.
pub async fn readiness_check(pool: Option<web::Data<PgPool>>) -> impl Responder {
    let Some(pool) = pool else {
        return HttpResponse::ServiceUnavailable().json(ReadinessResponse {
            ready: false,
            database: "unconfigured",
        });
    };

    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(ReadinessResponse {
            ready: true,
            database: "healthy",
        }),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            HttpResponse::ServiceUnavailable().json(ReadinessResponse {
                ready: false,
                database: "unhealthy",
            })
        }
    }
}
