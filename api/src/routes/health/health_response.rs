use ai_llm_service::HealthStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub ok: bool,
    pub message: Option<String>,
}

/// Response payload for `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub vector_store: ComponentHealth,
    pub providers: Vec<HealthStatus>,
    /// RFC 3339, UTC.
    pub checked_at: String,
}
