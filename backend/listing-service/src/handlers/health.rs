//! Health check endpoints.
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    checks: std::collections::HashMap<String, ComponentCheck>,
    timestamp: String,
}

async fn check_postgres(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| ())
}

/// GET /api/v1/health
pub async fn health_check(pool: web::Data<PgPool>) -> HttpResponse {
    match check_postgres(&pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "listing-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "listing-service"
        })),
    }
}

/// GET /api/v1/health/ready
pub async fn readiness_check(pool: web::Data<PgPool>) -> HttpResponse {
    let mut checks = std::collections::HashMap::new();

    let start = Instant::now();
    let pg_result = check_postgres(&pool).await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    let ready = pg_result.is_ok();
    let check = match pg_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "PostgreSQL connection successful".to_string(),
            latency_ms,
        },
        Err(e) => ComponentCheck {
            status: ComponentStatus::Unhealthy,
            message: format!("PostgreSQL connection failed: {}", e),
            latency_ms,
        },
    };
    checks.insert("postgresql".to_string(), check);

    let response = ReadinessResponse {
        ready,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// GET /api/v1/health/live
pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "alive": true }))
}
