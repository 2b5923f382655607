use crate::error::{BookError, ErrorKind};
use crate::models::BookSpec;
use crate::services::llm::TextGenerator;
use crate::services::pipeline::Pipeline;
use axum::{
    Router,
    extract::State,
    response::{Html, Json},
    routing::{get, post},
};
use http::StatusCode;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub struct AppState<G> {
    pipeline: Arc<Pipeline<G>>,
    output_dir: PathBuf,
}

impl<G> AppState<G> {
    pub fn new(pipeline: Pipeline<G>, output_dir: impl Into<PathBuf>) -> Self {
        AppState {
            pipeline: Arc::new(pipeline),
            output_dir: output_dir.into(),
        }
    }
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        AppState {
            pipeline: Arc::clone(&self.pipeline),
            output_dir: self.output_dir.clone(),
        }
    }
}

pub fn router<G: TextGenerator + 'static>(state: AppState<G>) -> Router {
    let downloads = ServeDir::new(&state.output_dir);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/generate", post(generate_book::<G>))
        .nest_service("/download", downloads)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::AllowMethods::any())
                .allow_headers(tower_http::cors::AllowHeaders::any()),
        )
}

pub async fn serve<G: TextGenerator + 'static>(
    addr: SocketAddr,
    state: AppState<G>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Autobiography Generator</title>
    <meta charset="utf-8">
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .info-box { background-color: #f0f8ff; padding: 20px; border-radius: 8px; margin: 20px 0; }
        .endpoint { background-color: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 4px; font-family: monospace; }
    </style>
</head>
<body>
    <h1>Autobiography Generator</h1>

    <div class="info-box">
        <p>Send book details and receive a model-written autobiography, saved as a text or EPUB file.</p>
    </div>

    <h2>Available Endpoints:</h2>
    <div class="endpoint">GET / - This information page</div>
    <div class="endpoint">GET /health - Health check</div>
    <div class="endpoint">POST /generate - JSON {title, subtitle, author, style, language, length}</div>
    <div class="endpoint">GET /download/{file} - Fetch a generated book</div>
</body>
</html>
"#,
    )
}

async fn health_check() -> &'static str {
    "OK"
}

type ApiError = (StatusCode, Json<Value>);

fn status_for(err: &BookError) -> StatusCode {
    match err.kind() {
        ErrorKind::Authentication | ErrorKind::ModelInvocation => StatusCode::BAD_GATEWAY,
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::Io | ErrorKind::Epub | ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(err: BookError) -> ApiError {
    tracing::error!(error = %err, "generation failed");
    (
        status_for(&err),
        Json(json!({ "success": false, "error": err.to_string() })),
    )
}

async fn generate_book<G: TextGenerator + 'static>(
    State(state): State<AppState<G>>,
    Json(spec): Json<BookSpec>,
) -> Result<Json<Value>, ApiError> {
    let file = format!(
        "{}.{}",
        uuid::Uuid::new_v4(),
        state.pipeline.format().extension()
    );
    let path = state.output_dir.join(&file);

    let report = async {
        tokio::fs::create_dir_all(&state.output_dir)
            .await
            .map_err(|e| BookError::io(&state.output_dir, e))?;
        state.pipeline.run_to(&spec, &path).await
    }
    .await
    .map_err(api_error)?;

    Ok(Json(json!({
        "success": true,
        "chunk_count": report.chunk_count,
        "file": file,
        "download_url": format!("/download/{}", file),
        "message": report.message,
    })))
}
