use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use miette::{Context, IntoDiagnostic, Result};
use tower_http::cors::{Any, CorsLayer};

use aaslide::{Config, GeminiClient, ImageClient, PromptStore};

mod routes;

/// Clients and credentials are built once here and treated as immutable for
/// the process lifetime.
pub struct AppState {
    pub llm: GeminiClient,
    pub image: Option<ImageClient>,
    pub prompts: PromptStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let llm = config.gemini.client()?;
    let image = config.image_api_key.clone().map(ImageClient::new);

    let state = Arc::new(AppState {
        llm,
        image,
        prompts: PromptStore::new(&config.prompts_dir),
    });

    let cors = CorsLayer::new()
        // allow `GET` and `POST` when accessing the resource
        .allow_methods([Method::GET, Method::POST])
        // allow requests from any origin
        .allow_origin(Any);

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/api/generate", post(routes::generate))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .into_diagnostic()
        .wrap_err("Could not parse BIND_ADDR")?;
    tracing::info!(%addr, "listening");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .into_diagnostic()?;

    Ok(())
}
