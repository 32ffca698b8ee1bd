use crate::{
    assistant,
    config::Config,
    errors::AppError,
    listing::ListingFilters,
    search_query::{Interpreter, ParsedFilters},
};
use axum::{
    extract::{rejection::JsonRejection, RawQuery, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::signal;

#[derive(Clone)]
pub struct SharedState {
    config: Config,
    interpreter: Interpreter,
}

impl SharedState {
    pub fn new(config: Config) -> Self {
        let interpreter = config.interpreter();
        Self {
            config,
            interpreter,
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::warn!("received ctrl-c, shutting down"),
        _ = terminate => log::warn!("received terminate, shutting down"),
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/query/parse", post(parse_query))
        .route("/api/assistant", post(ask_assistant))
        .route("/api/listing/filters", get(listing_filters))
        .route("/api/config", get(get_config))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(Arc::new(state))
}

async fn start_app(state: SharedState, addr: String) -> Result<(), AppError> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn start_daemon(config: Config, addr: String) -> Result<(), AppError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(start_app(SharedState::new(config), addr))
}

#[derive(Debug)]
struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            AppError::Rejection(ref rejection) => rejection.status(),
            AppError::InvalidConfig { .. } | AppError::Json(_) => {
                axum::http::StatusCode::BAD_REQUEST
            }
            AppError::IO(_) | AppError::Yaml(_) | AppError::Other(_) => {
                log::error!("{self:?}");
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

async fn parse_query(
    State(state): State<Arc<SharedState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<ParsedFilters>, HttpError> {
    let Json(payload) = payload?;
    log::debug!("payload: {payload:?}");

    Ok(Json(state.interpreter.parse(&payload.query)))
}

async fn ask_assistant(
    State(state): State<Arc<SharedState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, HttpError> {
    let Json(payload) = payload?;
    log::debug!("payload: {payload:?}");

    let reply = match assistant::respond(&payload.query, &state.interpreter) {
        Some(reply) => serde_json::to_value(reply)?,
        None => json!({"kind": "empty"}),
    };

    Ok(Json(reply))
}

async fn listing_filters(
    State(state): State<Arc<SharedState>>,
    RawQuery(query): RawQuery,
) -> Json<ListingFilters> {
    Json(ListingFilters::from_query(
        query.as_deref().unwrap_or_default(),
        state.config.listing.max_price,
    ))
}

async fn get_config(
    State(state): State<Arc<SharedState>>,
) -> Json<Config> {
    Json(state.config.clone())
}
