//! HTTP server for the Finatic assistant
//!
//! Serves the interactive page (HTML forms) and a JSON twin of both
//! interaction surfaces. Every submission is handled independently.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::conversational::Responder;
use crate::error::FinaticError;
use crate::models::{AskRequest, CalculationRequest, CalculatorMode};
use crate::page::{self, Notice, PageView};

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub responder: Arc<Responder>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub modo: Option<CalculatorMode>,
}

fn status_for(error: &FinaticError) -> StatusCode {
    match error {
        FinaticError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Page Endpoints
/// =============================

async fn index(Query(query): Query<PageQuery>) -> Html<String> {
    let view = PageView::for_mode(query.modo.unwrap_or_default());
    Html(page::render(&view))
}

async fn ask_page(
    State(state): State<ApiState>,
    Form(req): Form<AskRequest>,
) -> (StatusCode, Html<String>) {
    let mut view = PageView::default();
    view.question = req.question.clone();

    if req.question.trim().is_empty() {
        return (StatusCode::OK, Html(page::render(&view)));
    }

    info!("Received question: {}", req.question);

    // The advisor receives the question exactly as typed
    let status = match state.responder.respond(&req.question).await {
        Ok(answer) => {
            view.answer = Some(Notice::Success(answer.text));
            StatusCode::OK
        }
        Err(e) => {
            view.answer = Some(Notice::Error(format!(
                "❌ No se pudo obtener una respuesta del asesor: {}",
                e
            )));
            status_for(&e)
        }
    };

    (status, Html(page::render(&view)))
}

async fn calculate_page(Form(req): Form<CalculationRequest>) -> (StatusCode, Html<String>) {
    info!("Calculator submission: {:?}", req.mode);

    let mut view = PageView::for_mode(req.mode);

    let status = match req.evaluate() {
        Ok(calculation) => {
            view.result = Some(Notice::Success(calculation.message));
            StatusCode::OK
        }
        Err(e) => {
            warn!("Rejected calculator input: {}", e);
            view.result = Some(Notice::Error(format!("❌ {}", e)));
            status_for(&e)
        }
    };

    view.inputs = req;
    (status, Html(page::render(&view)))
}

/// =============================
/// JSON Endpoints
/// =============================

async fn ask_json(
    State(state): State<ApiState>,
    Json(req): Json<AskRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    if req.question.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error("question must not be empty".into())),
        );
    }

    info!("Received API question: {}", req.question);

    match state.responder.respond(&req.question).await {
        Ok(answer) => (StatusCode::OK, Json(ApiResponse::success(answer))),
        Err(e) => (
            status_for(&e),
            Json(ApiResponse::error(format!("Advisor failed: {}", e))),
        ),
    }
}

async fn calculate_json(Json(req): Json<CalculationRequest>) -> (StatusCode, Json<ApiResponse>) {
    match req.evaluate() {
        Ok(calculation) => (StatusCode::OK, Json(ApiResponse::success(calculation))),
        Err(e) => (status_for(&e), Json(ApiResponse::error(e.to_string()))),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(responder: Arc<Responder>) -> Router {
    let state = ApiState { responder };

    Router::new()
        .route("/", get(index))
        .route("/preguntar", post(ask_page))
        .route("/calcular", post(calculate_page))
        .route("/health", get(health))
        .route("/api/ask", post(ask_json))
        .route("/api/calculate", post(calculate_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(responder: Arc<Responder>, port: u16) -> crate::Result<()> {
    let router = create_router(responder);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Finatic listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
