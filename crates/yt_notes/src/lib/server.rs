//! Axum router serving the notes page.
//!
//! - `GET /?url=..`     preview: thumbnail or invalid-URL warning
//! - `POST /`           form submit: full interaction, rendered as HTML
//! - `POST /api/notes`  same interaction, returned as JSON
//! - `GET /health`      liveness probe

use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{render, Error, NotesPage, NotesProcessor, Summarizer, TranscriptApi};

#[derive(Debug, Default, Deserialize)]
pub struct NotesQuery {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("render error: {0}")]
    Render(#[from] Error),
    #[error("failed to generate notes: {0:?}")]
    Generate(anyhow::Error),
}

impl ServerError {
    const CLIENT_MESSAGE: &str = "Something went wrong while generating the notes.";

    fn log(&self) {
        tracing::error!(error = ?self, "Request failed");
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        self.log();

        let body = render::render_error(Self::CLIENT_MESSAGE)
            .unwrap_or_else(|_| Self::CLIENT_MESSAGE.to_string());

        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}

/// Wraps [`ServerError`] for the JSON routes
pub struct ApiError(ServerError);

impl From<ServerError> for ApiError {
    fn from(value: ServerError) -> Self {
        ApiError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.log();

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": ServerError::CLIENT_MESSAGE })),
        )
            .into_response()
    }
}

type AppState<T, S> = Arc<NotesProcessor<T, S>>;

/// Build the complete application router around a shared processor
pub fn router<T, S>(processor: AppState<T, S>) -> Router
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let api = Router::new()
        .route("/notes", post(api_notes::<T, S>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );

    Router::new()
        .route("/", get(preview::<T, S>).post(generate::<T, S>))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(processor)
}

async fn health() -> &'static str {
    "ok"
}

async fn preview<T, S>(
    State(processor): State<AppState<T, S>>,
    Query(query): Query<NotesQuery>,
) -> Result<Html<String>, ServerError>
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let page = processor.preview(&query.url);
    Ok(Html(render::render_page(&page)?))
}

async fn generate<T, S>(
    State(processor): State<AppState<T, S>>,
    Form(form): Form<NotesQuery>,
) -> Result<Html<String>, ServerError>
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let page = run(&processor, &form.url).await?;
    Ok(Html(render::render_page(&page)?))
}

async fn api_notes<T, S>(
    State(processor): State<AppState<T, S>>,
    Json(body): Json<NotesQuery>,
) -> Result<Json<NotesPage>, ApiError>
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    Ok(Json(run(&processor, &body.url).await?))
}

async fn run<T, S>(processor: &NotesProcessor<T, S>, url: &str) -> Result<NotesPage, ServerError>
where
    T: TranscriptApi + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    processor
        .generate(url)
        .await
        .map_err(ServerError::Generate)
}
