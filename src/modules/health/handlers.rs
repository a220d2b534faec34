use axum::{extract::State, Json};
use serde::Serialize;

use crate::app_state::AppState;
use crate::telemetry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Degraded,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Dependency {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub dependencies: Option<Vec<Dependency>>,
}

/// Health and liveness probe. Pings the database; a failed ping degrades the
/// overall status instead of failing the probe.
pub async fn health_probe(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => Dependency {
            name: "database".to_string(),
            status: HealthStatus::Ok,
            details: None,
        },
        Err(e) => {
            tracing::warn!("Database health check failed: {e}");
            Dependency {
                name: "database".to_string(),
                status: HealthStatus::Error,
                details: Some(e.to_string()),
            }
        }
    };

    let telemetry_status = telemetry::telemetry_health_check();
    let telemetry = Dependency {
        name: "telemetry".to_string(),
        status: if telemetry_status == "healthy" {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        },
        details: Some(telemetry_status.to_string()),
    };

    let status = if database.status == HealthStatus::Ok {
        HealthStatus::Ok
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status,
        service: state.env.app.name.clone(),
        dependencies: Some(vec![database, telemetry]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_serializes_uppercase() {
        assert_eq!(serde_json::to_value(HealthStatus::Ok).unwrap(), "OK");
        assert_eq!(
            serde_json::to_value(HealthStatus::Degraded).unwrap(),
            "DEGRADED"
        );
        assert_eq!(serde_json::to_value(HealthStatus::Error).unwrap(), "ERROR");
    }

    #[test]
    fn dependency_details_are_omitted_when_absent() {
        let dep = Dependency {
            name: "database".to_string(),
            status: HealthStatus::Ok,
            details: None,
        };
        let value = serde_json::to_value(&dep).unwrap();
        assert!(value.get("details").is_none());
    }
}
