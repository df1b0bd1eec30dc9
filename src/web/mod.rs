//! Web API module for Quilt Planner.
//!
//! This module exposes the quilt store over a small REST API so a browser
//! front end can drive the same state the terminal editor uses.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/quilt` - Configuration, dimensions and paint summary
//! - `PUT /api/quilt/config` - Change configuration fields (rebuilds the grid when extents change)
//! - `POST /api/quilt/build` - Rebuild the grid, discarding paint
//! - `POST /api/paint/cell` - Paint or erase one cell
//! - `POST /api/paint/rect` - Paint or erase a rectangle
//! - `GET /api/cells` - Resolved paint instructions for every cell
//! - `GET /api/yardage` - Fabric yardage breakdown
//! - `GET /api/strips` - Strip cutting breakdown
//! - `GET /api/layout` - Export the layout document
//! - `POST /api/layout` - Import a layout document

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::FABRIC_MARKER;
use crate::models::{GridDimensions, QuiltConfig, RgbColor};
use crate::parser::PersistedLayout;
use crate::services::{
    resolve_grid, sanitize, FabricBreakdown, QuiltSize, ResolvedCell, StripBreakdown,
};
use crate::store::{QuiltStore, StoreAction};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Quilt state, shared by all requests
    store: Arc<Mutex<QuiltStore>>,
}

impl AppState {
    /// Wraps an existing store.
    #[must_use]
    pub fn new(store: QuiltStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Creates a fresh quilt seeded from the application configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(QuiltStore::with_config(config))
    }

    fn lock(&self) -> Result<MutexGuard<'_, QuiltStore>, ApiFailure> {
        self.store.lock().map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Quilt state is unavailable")),
            )
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// API error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiFailure = (StatusCode, Json<ApiError>);
type ApiResult<T> = Result<Json<T>, ApiFailure>;

fn bad_request(error: impl Into<String>, details: impl Into<String>) -> ApiFailure {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details(error, details)),
    )
}

/// Quilt summary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuiltResponse {
    /// Current configuration
    pub config: QuiltConfig,
    /// Derived extents
    pub dimensions: GridDimensions,
    /// Paint layer rows
    pub grid_rows: usize,
    /// Paint layer columns
    pub grid_cols: usize,
    /// Cells with any paint
    pub painted_cells: usize,
    /// Cells painted with fabric
    pub fabric_cells: usize,
    /// Whether there are changes since the last export or import
    pub dirty: bool,
}

impl QuiltResponse {
    fn from_store(store: &QuiltStore) -> Self {
        let layer = store.paint_layer();
        Self {
            config: store.config().clone(),
            dimensions: *store.dims(),
            grid_rows: layer.rows(),
            grid_cols: layer.cols(),
            painted_cells: layer.painted_count(),
            fabric_cells: layer.fabric_count(),
            dirty: store.is_dirty(),
        }
    }
}

/// Configuration change request. Omitted fields are left as they are.
///
/// Out-of-range lengths and counts are clamped rather than rejected, except
/// that the resulting grid must still fit.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdateRequest {
    /// Block rows
    pub rows: Option<f64>,
    /// Block columns
    pub cols: Option<f64>,
    /// Block width (inches)
    pub block_width: Option<f64>,
    /// Block height (inches)
    pub block_height: Option<f64>,
    /// Sashing on/off
    pub sashing_enabled: Option<bool>,
    /// Sashing width (inches)
    pub sashing_width: Option<f64>,
    /// Sashing color
    pub sashing_color: Option<String>,
    /// Sashing border on/off
    pub sashing_border_enabled: Option<bool>,
    /// Sashing border width (inches)
    pub sashing_border_width: Option<f64>,
    /// Sashing border color
    pub sashing_border_color: Option<String>,
    /// Outer border width (inches)
    pub border_width: Option<f64>,
    /// Outer border color
    pub border_color: Option<String>,
}

impl ConfigUpdateRequest {
    /// Applies the request to a copy of `current`.
    ///
    /// Colors are validated first so a bad request changes nothing. Numbers
    /// are clamped as numbers, so `10.5` stays `10.5`, and a result whose
    /// grid would be too large is rejected rather than clamped.
    fn into_config(self, current: &QuiltConfig) -> Result<QuiltConfig, ApiFailure> {
        let color = |value: Option<String>| -> Result<Option<String>, ApiFailure> {
            value
                .map(|hex| {
                    RgbColor::normalize(&hex)
                        .map_err(|e| bad_request(format!("Invalid color: {hex}"), e.to_string()))
                })
                .transpose()
        };
        let sashing_color = color(self.sashing_color)?;
        let sashing_border_color = color(self.sashing_border_color)?;
        let border_color = color(self.border_color)?;

        let mut next = current.clone();
        if let Some(v) = self.rows {
            next.rows = sanitize::clamp_count(v);
        }
        if let Some(v) = self.cols {
            next.cols = sanitize::clamp_count(v);
        }
        if let Some(v) = self.block_width {
            next.block_width = sanitize::clamp_block_length(v);
        }
        if let Some(v) = self.block_height {
            next.block_height = sanitize::clamp_block_length(v);
        }
        if let Some(on) = self.sashing_enabled {
            next.sashing_enabled = on;
        }
        if let Some(v) = self.sashing_width {
            next.sashing_width = sanitize::clamp_frame_width(v);
        }
        if let Some(on) = self.sashing_border_enabled {
            next.sashing_border_enabled = on;
        }
        if let Some(v) = self.sashing_border_width {
            next.sashing_border_width = sanitize::clamp_frame_width(v);
        }
        if let Some(v) = self.border_width {
            next.border_width = sanitize::clamp_frame_width(v);
        }
        if let Some(c) = sashing_color {
            next.sashing_color = c;
        }
        if let Some(c) = sashing_border_color {
            next.sashing_border_color = c;
        }
        if let Some(c) = border_color {
            next.border_color = c;
        }

        GridDimensions::compute(&next)
            .ensure_fits()
            .map_err(|e| bad_request("Quilt too large", e.to_string()))?;
        Ok(next)
    }
}

/// Configuration change result.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdateResponse {
    /// Whether the grid was rebuilt (paint discarded)
    pub rebuilt: bool,
    /// Quilt after the change
    pub quilt: QuiltResponse,
}

/// What a paint request puts into cells.
///
/// `fabric` wins over `color`; with neither, the store's active color is
/// used. An empty `color` erases.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brush {
    /// `#rrggbb` / `#rgb`, or empty to erase
    #[serde(default)]
    pub color: Option<String>,
    /// Paint with fabric instead of a color
    #[serde(default)]
    pub fabric: bool,
}

impl Brush {
    fn paint_value(self, store: &QuiltStore) -> Result<String, ApiFailure> {
        if self.fabric {
            return Ok(FABRIC_MARKER.to_string());
        }
        match self.color {
            None => Ok(store.active_color().to_string()),
            Some(color) if color.is_empty() => Ok(String::new()),
            Some(color) => RgbColor::normalize(&color)
                .map_err(|e| bad_request(format!("Invalid color: {color}"), e.to_string())),
        }
    }
}

/// Single-cell paint request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintCellRequest {
    /// Grid row
    pub row: i64,
    /// Grid column
    pub col: i64,
    /// Paint to apply
    #[serde(flatten)]
    pub brush: Brush,
}

/// Rectangle paint request. Corners may be given in any order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintRectRequest {
    /// First corner row
    pub start_row: i64,
    /// First corner column
    pub start_col: i64,
    /// Opposite corner row
    pub end_row: i64,
    /// Opposite corner column
    pub end_col: i64,
    /// Paint to apply
    #[serde(flatten)]
    pub brush: Brush,
}

/// Paint result.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintResponse {
    /// Cells with any paint after the stroke
    pub painted_cells: usize,
    /// Cells painted with fabric after the stroke
    pub fabric_cells: usize,
}

/// Resolved grid.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellsResponse {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// One entry per cell, row by row
    pub cells: Vec<Vec<ResolvedCell>>,
}

/// Fabric yardage result.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YardageResponse {
    /// Finished quilt size
    pub quilt_size: QuiltSize,
    /// Yards per fabric role
    pub fabric: FabricBreakdown,
    /// Text report
    pub report: String,
}

/// Strip cutting result.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripsResponse {
    /// Strip counts and totals
    pub strips: StripBreakdown,
    /// Text report
    pub report: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/quilt - Current quilt summary.
async fn get_quilt(State(state): State<AppState>) -> ApiResult<QuiltResponse> {
    let store = state.lock()?;
    Ok(Json(QuiltResponse::from_store(&store)))
}

/// PUT /api/quilt/config - Update configuration fields.
async fn update_config(
    State(state): State<AppState>,
    Json(request): Json<ConfigUpdateRequest>,
) -> ApiResult<ConfigUpdateResponse> {
    let mut store = state.lock()?;
    let next = request.into_config(store.config())?;
    let rebuilt = store.dispatch(StoreAction::SetConfig(next));
    debug!(rebuilt, "Configuration updated over the API");
    Ok(Json(ConfigUpdateResponse {
        rebuilt,
        quilt: QuiltResponse::from_store(&store),
    }))
}

/// POST /api/quilt/build - Rebuild the grid.
async fn build_grid(State(state): State<AppState>) -> ApiResult<QuiltResponse> {
    let mut store = state.lock()?;
    store.dispatch(StoreAction::BuildGrid);
    Ok(Json(QuiltResponse::from_store(&store)))
}

/// POST /api/paint/cell - Paint one cell. Off-grid cells are ignored.
async fn paint_cell(
    State(state): State<AppState>,
    Json(request): Json<PaintCellRequest>,
) -> ApiResult<PaintResponse> {
    let mut store = state.lock()?;
    let value = request.brush.paint_value(&store)?;
    store.dispatch(StoreAction::PaintCell {
        row: request.row,
        col: request.col,
        value,
    });
    Ok(Json(paint_response(&store)))
}

/// POST /api/paint/rect - Paint a rectangle, clipped to the grid.
async fn paint_rect(
    State(state): State<AppState>,
    Json(request): Json<PaintRectRequest>,
) -> ApiResult<PaintResponse> {
    let mut store = state.lock()?;
    let value = request.brush.paint_value(&store)?;
    store.dispatch(StoreAction::PaintRect {
        min_row: request.start_row.min(request.end_row),
        max_row: request.start_row.max(request.end_row),
        min_col: request.start_col.min(request.end_col),
        max_col: request.start_col.max(request.end_col),
        value,
    });
    Ok(Json(paint_response(&store)))
}

fn paint_response(store: &QuiltStore) -> PaintResponse {
    PaintResponse {
        painted_cells: store.paint_layer().painted_count(),
        fabric_cells: store.paint_layer().fabric_count(),
    }
}

/// GET /api/cells - Resolved paint instructions.
async fn get_cells(State(state): State<AppState>) -> ApiResult<CellsResponse> {
    let store = state.lock()?;
    Ok(Json(CellsResponse {
        rows: store.paint_layer().rows(),
        cols: store.paint_layer().cols(),
        cells: resolve_grid(&store),
    }))
}

/// GET /api/yardage - Fabric yardage breakdown.
async fn get_yardage(State(state): State<AppState>) -> ApiResult<YardageResponse> {
    let store = state.lock()?;
    let fabric = store.fabric_breakdown();
    Ok(Json(YardageResponse {
        quilt_size: store.quilt_size(),
        report: fabric.to_string(),
        fabric,
    }))
}

/// GET /api/strips - Strip cutting breakdown.
async fn get_strips(State(state): State<AppState>) -> ApiResult<StripsResponse> {
    let store = state.lock()?;
    let strips = store.strip_breakdown();
    Ok(Json(StripsResponse {
        report: strips.to_string(),
        strips,
    }))
}

/// GET /api/layout - Export the layout document.
async fn export_layout(State(state): State<AppState>) -> ApiResult<PersistedLayout> {
    let mut store = state.lock()?;
    let layout = store.export_layout();
    store.mark_saved();
    Ok(Json(layout))
}

/// POST /api/layout - Import a layout document.
///
/// The body is read as text so that version and shape errors come from the
/// layout parser. A rejected document leaves the quilt untouched.
async fn import_layout(State(state): State<AppState>, body: String) -> ApiResult<QuiltResponse> {
    let mut store = state.lock()?;
    match store.import_str(&body) {
        Ok(()) => {
            info!(
                rows = store.paint_layer().rows(),
                cols = store.paint_layer().cols(),
                "Layout imported over the API"
            );
            Ok(Json(QuiltResponse::from_store(&store)))
        }
        Err(e) => {
            warn!(error = %e, "Rejected layout import");
            Err(bad_request("Invalid layout", e.to_string()))
        }
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The server is meant to run next to a local front end, so any origin is
    // allowed.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Quilt endpoints
        .route("/api/quilt", get(get_quilt))
        .route("/api/quilt/config", put(update_config))
        .route("/api/quilt/build", post(build_grid))
        // Paint endpoints
        .route("/api/paint/cell", post(paint_cell))
        .route("/api/paint/rect", post(paint_rect))
        .route("/api/cells", get(get_cells))
        // Calculator endpoints
        .route("/api/yardage", get(get_yardage))
        .route("/api/strips", get(get_strips))
        // Layout document
        .route("/api/layout", get(export_layout).post(import_layout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn run_server(config: Config, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(AppState::from_config(&config));

    info!("Starting Quilt Planner web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_update_rejects_bad_color_before_changing_anything() {
        let request = ConfigUpdateRequest {
            rows: Some(5.0),
            border_color: Some("nope".to_string()),
            ..ConfigUpdateRequest::default()
        };
        assert!(request.into_config(&QuiltConfig::default()).is_err());
    }

    #[test]
    fn test_config_update_clamps_numbers() {
        let request = ConfigUpdateRequest {
            rows: Some(0.0),
            cols: Some(2.9),
            block_width: Some(10.5),
            border_width: Some(-3.0),
            ..ConfigUpdateRequest::default()
        };
        let next = request.into_config(&QuiltConfig::default()).unwrap();
        assert_eq!(next.rows, 1);
        assert_eq!(next.cols, 2);
        assert_eq!(next.block_width, 10.5);
        assert_eq!(next.border_width, 0.0);
    }

    #[test]
    fn test_config_update_sets_only_given_fields() {
        let current = QuiltConfig::default();
        let request = ConfigUpdateRequest {
            sashing_enabled: Some(current.sashing_enabled),
            sashing_border_enabled: Some(!current.sashing_border_enabled),
            ..ConfigUpdateRequest::default()
        };
        let next = request.into_config(&current).unwrap();
        assert_eq!(
            next,
            QuiltConfig {
                sashing_border_enabled: !current.sashing_border_enabled,
                ..current
            }
        );
    }

    #[test]
    fn test_config_update_rejects_oversized_grid() {
        let request = ConfigUpdateRequest {
            rows: Some(1e21),
            ..ConfigUpdateRequest::default()
        };
        let (status, Json(body)) = request.into_config(&QuiltConfig::default()).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Quilt too large");
    }

    #[test]
    fn test_brush_values() {
        let store = QuiltStore::default();
        let fabric = Brush {
            color: Some("#fff".to_string()),
            fabric: true,
        };
        assert_eq!(fabric.paint_value(&store).unwrap(), FABRIC_MARKER);

        let erase = Brush {
            color: Some(String::new()),
            fabric: false,
        };
        assert_eq!(erase.paint_value(&store).unwrap(), "");

        let short = Brush {
            color: Some("#ABC".to_string()),
            fabric: false,
        };
        assert_eq!(short.paint_value(&store).unwrap(), "#aabbcc");

        assert_eq!(
            Brush::default().paint_value(&store).unwrap(),
            store.active_color()
        );
    }
}
