use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tokio::signal;
use tower_http::cors::CorsLayer;

use crate::extract;
use crate::fetch::Fetcher;
use crate::filter::SearchFilter;
use crate::local;

/// Source label attached to scraped redeem codes.
const CODES_SOURCE: &str = "FC Mobile Forum";

/// Upstream locations and the fallback file path, fixed at startup.
pub struct Config {
    /// Base URL of the player-stats site, e.g. "https://renderz.app/24".
    pub upstream: String,
    /// Full URL of the redeem-codes forum page.
    pub codes_url: String,
    /// Local JSON fallback file with a static player array.
    pub data_file: PathBuf,
}

#[derive(Clone)]
struct AppState {
    fetcher: Arc<Fetcher>,
    config: Arc<Config>,
}

/// Route-boundary error. Every failure a handler can hit - upstream fetch,
/// extraction, local file read - converts to HTTP 500 with a uniform
/// `{status:"error", message, details}` body. No partial success: missing
/// fields inside a record are not errors, only a failed request is.
pub struct ApiError {
    message: &'static str,
    source: anyhow::Error,
}

/// Attach a route-specific summary to an underlying error.
fn api_error(message: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |source| ApiError { message, source }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        eprintln!("[server] {} ({:#})", self.message, self.source);

        let body = Json(json!({
            "status": "error",
            "message": self.message,
            "details": self.source.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

fn list_envelope<T: Serialize>(data: &[T]) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "count": data.len(),
        "data": data,
    }))
}

/// Healthcheck; touches nothing upstream.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Scrape the upstream list page and return every player found.
async fn renderz_players(State(state): State<AppState>) -> Result<Response, ApiError> {
    let url = format!("{}/players", state.config.upstream);
    let html = state
        .fetcher
        .get_text(&url)
        .await
        .map_err(api_error("Failed to retrieve or parse data from RenderZ."))?;

    let players = extract::list::extract_players(&html);
    println!("[server] Scraped {} players from {}", players.len(), url);

    Ok(list_envelope(&players).into_response())
}

/// Serve the static fallback player list.
async fn local_players(State(state): State<AppState>) -> Result<Response, ApiError> {
    let players = local::load_players(&state.config.data_file)
        .await
        .map_err(api_error("Failed to read local players file."))?;

    Ok(list_envelope(&players).into_response())
}

/// Scrape the detail page for one player.
async fn player_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let url = format!("{}/player/{}", state.config.upstream, id);
    let html = state.fetcher.get_text(&url).await.map_err(api_error(
        "Failed to retrieve or parse player details from RenderZ.",
    ))?;

    let player = extract::detail::extract_player(&html, &id);

    Ok(Json(json!({
        "status": "success",
        "data": player,
    }))
    .into_response())
}

/// Scrape the list page, then filter it by the supplied query constraints.
async fn search_players(
    State(state): State<AppState>,
    Query(filter): Query<SearchFilter>,
) -> Result<Response, ApiError> {
    let url = format!("{}/players", state.config.upstream);
    let html = state
        .fetcher
        .get_text(&url)
        .await
        .map_err(api_error("Failed to search players."))?;

    let players = filter.apply(extract::list::extract_players(&html));
    println!(
        "[server] Search matched {} players ({:?})",
        players.len(),
        filter
    );

    Ok(list_envelope(&players).into_response())
}

/// Scrape candidate redeem codes from the forum page.
async fn fetch_codes(State(state): State<AppState>) -> Result<Response, ApiError> {
    let html = state
        .fetcher
        .get_text(&state.config.codes_url)
        .await
        .map_err(api_error("Failed to retrieve codes from the forum."))?;

    let codes = extract::codes::extract_codes(&html, CODES_SOURCE);
    println!("[server] Scraped {} candidate codes", codes.len());

    Ok(list_envelope(&codes).into_response())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/renderz-players", get(renderz_players))
        .route("/api/local-players", get(local_players))
        .route("/api/player-details/{id}", get(player_details))
        .route("/api/search-players", get(search_players))
        .route("/api/fetch-codes", get(fetch_codes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C.
pub async fn run_server(
    addr: SocketAddr,
    fetcher: Arc<Fetcher>,
    config: Arc<Config>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(AppState { fetcher, config });

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            println!("\n[server] Shutting down...");
        })
        .await?;

    Ok(())
}
