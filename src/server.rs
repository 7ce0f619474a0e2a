//! HTTP surface: static site, JSON color lookups and PNG swatches.

use crate::catalog::{Catalog, CatalogError, ColorRecord};
use crate::config::AssetsConfig;
use crate::render::{render_png, RenderError};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

/// Body of every non-2xx API response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Color not found")]
    NotFound,
    #[error("Color catalog is empty")]
    EmptyCatalog,
    #[error("Color catalog unavailable")]
    Catalog(CatalogError),
    #[error("Failed to render color image")]
    Render(#[from] RenderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::EmptyCatalog => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Catalog(_) | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Empty => ApiError::EmptyCatalog,
            other => ApiError::Catalog(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Render(e) => error!(error = %e, "swatch render failed"),
            ApiError::Catalog(e) => error!(error = %e, "catalog failure"),
            _ => {}
        }
        let status = self.status();
        let body = ErrorBody {
            status: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(catalog: Arc<Catalog>, assets: &AssetsConfig) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(assets.index_path()))
        .nest_service("/assets", ServeDir::new(assets.assets_dir()))
        .route("/api/color", get(random_color))
        .route("/api/color/{color_name}", get(color_by_name))
        .route("/api/color/{color_name}/image", get(color_image))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { catalog })
}

fn lookup<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a ColorRecord, ApiError> {
    catalog.find_by_name(name).ok_or_else(|| {
        debug!(color = name, "color not found");
        ApiError::NotFound
    })
}

async fn random_color(State(state): State<AppState>) -> Result<Json<ColorRecord>, ApiError> {
    let color = state.catalog.pick_random()?;
    Ok(Json(color.clone()))
}

async fn color_by_name(
    State(state): State<AppState>,
    Path(color_name): Path<String>,
) -> Result<Json<ColorRecord>, ApiError> {
    lookup(&state.catalog, &color_name).map(|c| Json(c.clone()))
}

async fn color_image(
    State(state): State<AppState>,
    Path(color_name): Path<String>,
) -> Result<Response, ApiError> {
    let color = lookup(&state.catalog, &color_name)?;
    let png = render_png(color)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// Runs until Ctrl-C, then drains in-flight requests.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on http://{addr}");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!("ctrl-c handler unavailable ({e}); running until killed");
            std::future::pending::<()>().await;
        }
    }
}
