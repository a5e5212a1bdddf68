use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ReviewResult, ServiceStatus},
};
use tracing::{error, info};

mod config;
mod review_engine;
mod standards;

use config::load_settings;
use review_engine::{GeminiModel, ReviewEngine};

#[derive(Clone)]
struct AppState {
    engine: Arc<ReviewEngine>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let api_key = settings.gemini_api_key.clone().ok_or_else(|| {
        anyhow::anyhow!("GEMINI_API_KEY is not set; provide it via the environment or server.toml")
    })?;
    let model = GeminiModel::new(
        api_key,
        settings.gemini_model.clone(),
        settings.gemini_api_base.clone(),
    );
    let state = AppState {
        engine: Arc::new(ReviewEngine::new(Arc::new(model))),
    };
    let app = build_router(state);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "review server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/review", post(review))
        .with_state(state)
}

async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        message: "AI code review service is running".to_string(),
    })
}

async fn review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReviewResult>, (StatusCode, Json<ApiError>)> {
    let mut code_text: Option<String> = None;
    let mut standards_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                ErrorCode::Validation,
                format!("Failed to read upload: {e}"),
            )),
        )
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new(
                    ErrorCode::Validation,
                    format!("Failed to read {name}: {e}"),
                )),
            )
        })?;
        match name.as_str() {
            "code_file" => code_text = Some(String::from_utf8_lossy(&bytes).into_owned()),
            "standards_file" => standards_text = Some(standards::extract_standards_text(&bytes)),
            _ => {}
        }
    }

    let code = code_text.ok_or_else(|| bad_request("Missing code_file upload."))?;
    if code.trim().is_empty() {
        return Err(bad_request("Uploaded code file is empty."));
    }
    let standards_text =
        standards_text.ok_or_else(|| bad_request("Missing standards_file upload."))?;
    if standards_text.trim().is_empty() {
        return Err(bad_request("Standards file is empty."));
    }

    let (review, score) = state
        .engine
        .review(&code, &standards_text)
        .await
        .map_err(review_failed)?;
    let suggested_fix = state
        .engine
        .suggested_fix(&code, &standards_text)
        .await
        .map_err(review_failed)?;

    Ok(Json(ReviewResult {
        review,
        suggested_fix,
        score,
    }))
}

fn bad_request(detail: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new(ErrorCode::Validation, detail)),
    )
}

fn review_failed(error: anyhow::Error) -> (StatusCode, Json<ApiError>) {
    error!(%error, "review pipeline failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(
            ErrorCode::Upstream,
            format!("Review failed: {error:#}"),
        )),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
