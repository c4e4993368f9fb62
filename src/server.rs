//! HTTP gateway serving the aggregated headlines.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | Embedded frontend page |
//! | `GET /api/headlines` | JSON [`AggregateResult`](crate::models::AggregateResult), `X-Cache: HIT` or `MISS` |
//!
//! `/api/headlines` always answers 200: failed sources appear as entries
//! with no headlines rather than as an error response.
//!
//! A cache miss refreshes on a detached task, so a client that disconnects
//! mid-aggregation does not cancel the fetches or the cache write.

use crate::aggregator::aggregate;
use crate::cache::ResultCache;
use crate::models::{AggregateResult, SourceResult};
use crate::scrapers::Source;
use axum::{
    Json, Router,
    extract::State,
    http::{Method, Request, header},
    response::{Html, IntoResponse},
    routing::get,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument};

const FRONTEND: &str = include_str!("../static/frontend.html");

/// Response header reporting whether the result cache answered the request.
pub const X_CACHE: &str = "x-cache";

#[derive(Clone)]
pub struct AppState {
    pub sources: Arc<[Arc<dyn Source>]>,
    pub cache: Arc<ResultCache>,
}

impl AppState {
    pub fn new(sources: Vec<Arc<dyn Source>>, cache: Arc<ResultCache>) -> Self {
        Self {
            sources: sources.into(),
            cache,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers([header::LINK])
        .max_age(Duration::from_secs(300));

    Router::new()
        .route("/", get(index))
        .route("/api/headlines", get(headlines))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(CatchPanicLayer::new())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Bind `addr` and serve `router` until Ctrl-C.
pub async fn serve(addr: &str, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn index() -> Html<&'static str> {
    Html(FRONTEND)
}

#[instrument(level = "info", skip_all)]
async fn headlines(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(cached) = state.cache.get() {
        debug!("Serving cached headlines");
        return ([(X_CACHE, "HIT")], Json(cached));
    }

    let task = tokio::spawn(refresh(
        Arc::clone(&state.sources),
        Arc::clone(&state.cache),
    ));
    let results = match task.await {
        Ok(results) => results,
        Err(e) => {
            error!(error = %e, "Headline refresh did not complete");
            state
                .sources
                .iter()
                .map(|source| SourceResult::placeholder(source.metadata()))
                .collect()
        }
    };
    ([(X_CACHE, "MISS")], Json(results))
}

/// Aggregate every source and store the result.
async fn refresh(sources: Arc<[Arc<dyn Source>]>, cache: Arc<ResultCache>) -> AggregateResult {
    let results = aggregate(&sources).await;
    cache.put(results.clone());
    results
}
