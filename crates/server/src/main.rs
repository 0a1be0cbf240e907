// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use alluvia::{
    ActiveProject, BulkEdit, GatewayError, ProjectComparison, Workspace, WorkspaceConfig,
    WorkspaceError,
};
use alluvia_domain::{
    CalculatedReserves, EconomicParams, FieldValue, FinancialResult, GradeStatistics, Project,
    ProjectData, ProjectId, ProjectListItem, ProjectSettings, Sample, SampleField, SampleId,
    ValidationErrors,
};
use alluvia_import::{ImportError, ImportOutcome, import_str};
use alluvia_persistence::SqliteProjectStore;
use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Alluvia Server - HTTP server for the alluvial reserve workspace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Number of sample snapshots kept for undo
    #[arg(long, default_value_t = alluvia::DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,
}

type ServerWorkspace = Workspace<SqliteProjectStore>;

/// Application state shared across handlers.
///
/// The single workspace sits behind a mutex, so lifecycle operations are
/// serialized.
#[derive(Clone)]
struct AppState {
    workspace: Arc<Mutex<ServerWorkspace>>,
}

/// Full view of the workspace returned by most endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceView {
    active_project: ActiveProject,
    projects: Vec<ProjectListItem>,
    data: ProjectData,
    validation_errors: ValidationErrors,
    is_dirty: bool,
    samples_pending: bool,
    can_undo: bool,
    can_redo: bool,
}

/// Response for any request that changes the workspace.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct WriteResponse {
    /// Whether the operation took effect.
    success: bool,
    /// Optional human readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// The workspace after the operation.
    workspace: WorkspaceView,
}

/// API response for listing projects.
#[derive(Debug, Clone, Serialize)]
struct ListProjectsResponse {
    projects: Vec<ProjectListItem>,
}

/// API response for comparing stored projects.
#[derive(Debug, Clone, Serialize)]
struct CompareProjectsResponse {
    projects: Vec<ProjectComparison>,
}

/// API response for the derived reserve figures.
#[derive(Debug, Clone, Serialize)]
struct ReservesResponse {
    reserves: CalculatedReserves,
    financials: FinancialResult,
}

/// API request for setting the total block area.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockAreaApiRequest {
    total_block_area: f64,
}

/// API request for editing one sample field.
#[derive(Debug, Clone, Deserialize)]
struct EditSampleApiRequest {
    field: SampleField,
    value: FieldValue,
}

/// API request for a bulk edit over selected samples.
#[derive(Debug, Clone, Deserialize)]
struct BulkEditApiRequest {
    ids: Vec<SampleId>,
    #[serde(flatten)]
    edit: BulkEdit,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<WorkspaceError> for HttpError {
    fn from(err: WorkspaceError) -> Self {
        let status: StatusCode = match &err {
            WorkspaceError::ProjectNotFound(_) | WorkspaceError::SampleNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            WorkspaceError::Domain(_) | WorkspaceError::DuplicateSampleId(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            WorkspaceError::Gateway(GatewayError::Rejected(_)) => StatusCode::BAD_REQUEST,
            WorkspaceError::Gateway(_) | WorkspaceError::Narrative(_) => {
                error!(error = %err, "Workspace operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ImportError> for HttpError {
    fn from(err: ImportError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

/// Builds the workspace view returned to clients.
fn workspace_view(workspace: &ServerWorkspace) -> WorkspaceView {
    WorkspaceView {
        active_project: workspace.active_project().clone(),
        projects: workspace.projects().to_vec(),
        data: workspace.snapshot(),
        validation_errors: workspace.validation_errors().clone(),
        is_dirty: workspace.is_dirty(),
        samples_pending: workspace.samples_pending(),
        can_undo: workspace.can_undo(),
        can_redo: workspace.can_redo(),
    }
}

fn write_response(
    workspace: &ServerWorkspace,
    success: bool,
    message: Option<String>,
) -> Json<WriteResponse> {
    Json(WriteResponse {
        success,
        message,
        workspace: workspace_view(workspace),
    })
}

/// Handler for GET `/projects` endpoint.
///
/// Re-reads and lists the project index.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListProjectsResponse>, HttpError> {
    info!("Handling list_projects request");

    let mut workspace = app_state.workspace.lock().await;
    let projects: Vec<ProjectListItem> = workspace.refresh_projects().await?.to_vec();
    drop(workspace);

    Ok(Json(ListProjectsResponse { projects }))
}

/// Handler for GET `/projects/compare` endpoint.
async fn handle_compare_projects(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CompareProjectsResponse>, HttpError> {
    info!("Handling compare_projects request");

    let workspace = app_state.workspace.lock().await;
    let projects: Vec<ProjectComparison> = workspace.compare_projects().await?;
    drop(workspace);

    Ok(Json(CompareProjectsResponse { projects }))
}

/// Handler for DELETE `/projects/{id}` endpoint.
async fn handle_delete_project(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(project_id = %id, "Handling delete_project request");

    let project_id: ProjectId = ProjectId::new(id);
    let mut workspace = app_state.workspace.lock().await;
    workspace.delete_project(&project_id).await?;

    info!(project_id = %project_id, "Successfully deleted project");
    Ok(write_response(
        &workspace,
        true,
        Some(format!("Deleted project {project_id}")),
    ))
}

/// Handler for GET `/workspace` endpoint.
async fn handle_get_workspace(AxumState(app_state): AxumState<AppState>) -> Json<WorkspaceView> {
    info!("Handling get_workspace request");

    let workspace = app_state.workspace.lock().await;
    Json(workspace_view(&workspace))
}

/// Handler for POST `/workspace/new` endpoint.
async fn handle_new_project(AxumState(app_state): AxumState<AppState>) -> Json<WriteResponse> {
    info!("Handling new_project request");

    let mut workspace = app_state.workspace.lock().await;
    workspace.start_new_project();
    write_response(&workspace, true, None)
}

/// Handler for POST `/workspace/load/{id}` endpoint.
async fn handle_load_project(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(project_id = %id, "Handling load_project request");

    let project_id: ProjectId = ProjectId::new(id);
    let mut workspace = app_state.workspace.lock().await;
    workspace.load_project(&project_id).await?;

    Ok(write_response(&workspace, true, None))
}

/// Handler for POST `/workspace/save` endpoint.
///
/// Saves every section, creating the project when it is new.
async fn handle_save_project(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling save_project request");

    let mut workspace = app_state.workspace.lock().await;
    let project_id: ProjectId = workspace.save_project_details().await?;

    info!(project_id = %project_id, "Successfully saved project");
    Ok(write_response(
        &workspace,
        true,
        Some(format!("Saved project {project_id}")),
    ))
}

/// Handler for POST `/workspace/discard` endpoint.
async fn handle_discard_changes(AxumState(app_state): AxumState<AppState>) -> Json<WriteResponse> {
    info!("Handling discard_changes request");

    let mut workspace = app_state.workspace.lock().await;
    workspace.discard_changes();
    write_response(&workspace, true, None)
}

/// Handler for PUT `/workspace/project` endpoint.
async fn handle_set_project(
    AxumState(app_state): AxumState<AppState>,
    Json(project): Json<Project>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(name = %project.project_name, "Handling set_project request");

    let mut workspace = app_state.workspace.lock().await;
    workspace.set_project(project)?;
    Ok(write_response(&workspace, true, None))
}

/// Handler for POST `/workspace/project/save` endpoint.
async fn handle_save_geotechnical(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling save_geotechnical request");

    let mut workspace = app_state.workspace.lock().await;
    let saved: bool = workspace.save_geotechnical_params().await?;
    Ok(write_response(&workspace, saved, None))
}

/// Handler for PUT `/workspace/block_area` endpoint.
async fn handle_set_block_area(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BlockAreaApiRequest>,
) -> Json<WriteResponse> {
    info!(
        total_block_area = req.total_block_area,
        "Handling set_block_area request"
    );

    let mut workspace = app_state.workspace.lock().await;
    workspace.set_total_block_area(req.total_block_area);
    write_response(&workspace, true, None)
}

/// Handler for PUT `/workspace/economics` endpoint.
async fn handle_set_economics(
    AxumState(app_state): AxumState<AppState>,
    Json(params): Json<EconomicParams>,
) -> Json<WriteResponse> {
    info!("Handling set_economics request");

    let mut workspace = app_state.workspace.lock().await;
    workspace.set_economic_params(params);
    write_response(&workspace, true, None)
}

/// Handler for POST `/workspace/economics/save` endpoint.
async fn handle_save_economics(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling save_economics request");

    let mut workspace = app_state.workspace.lock().await;
    let saved: bool = workspace.save_economic_params().await?;
    Ok(write_response(&workspace, saved, None))
}

/// Handler for PUT `/workspace/settings` endpoint.
async fn handle_set_settings(
    AxumState(app_state): AxumState<AppState>,
    Json(settings): Json<ProjectSettings>,
) -> Json<WriteResponse> {
    info!(currency = %settings.default_currency, "Handling set_settings request");

    let mut workspace = app_state.workspace.lock().await;
    workspace.set_settings(settings);
    write_response(&workspace, true, None)
}

/// Handler for POST `/workspace/settings/save` endpoint.
async fn handle_save_settings(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling save_settings request");

    let mut workspace = app_state.workspace.lock().await;
    let saved: bool = workspace.save_settings().await?;
    Ok(write_response(&workspace, saved, None))
}

/// Handler for PUT `/workspace/samples` endpoint.
///
/// Replaces the whole sample collection as one undo step.
async fn handle_set_samples(
    AxumState(app_state): AxumState<AppState>,
    Json(samples): Json<Vec<Sample>>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(count = samples.len(), "Handling set_samples request");

    let mut workspace = app_state.workspace.lock().await;
    let changed: bool = workspace.set_samples(samples)?;
    Ok(write_response(&workspace, changed, None))
}

/// Handler for POST `/workspace/samples` endpoint.
async fn handle_add_sample(AxumState(app_state): AxumState<AppState>) -> Json<WriteResponse> {
    info!("Handling add_sample request");

    let mut workspace = app_state.workspace.lock().await;
    let id: SampleId = workspace.add_sample();
    write_response(&workspace, true, Some(format!("Added sample {id}")))
}

/// Handler for PATCH `/workspace/samples/{id}` endpoint.
async fn handle_edit_sample(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<SampleId>,
    Json(req): Json<EditSampleApiRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(sample_id = id, field = %req.field, "Handling edit_sample request");

    let mut workspace = app_state.workspace.lock().await;
    let changed: bool = workspace.edit_sample(id, req.field, req.value)?;
    Ok(write_response(&workspace, changed, None))
}

/// Handler for DELETE `/workspace/samples/{id}` endpoint.
async fn handle_remove_sample(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<SampleId>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(sample_id = id, "Handling remove_sample request");

    let mut workspace = app_state.workspace.lock().await;
    workspace.remove_sample(id)?;
    Ok(write_response(&workspace, true, None))
}

/// Handler for POST `/workspace/samples/bulk` endpoint.
async fn handle_bulk_edit(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BulkEditApiRequest>,
) -> Json<WriteResponse> {
    info!(
        count = req.ids.len(),
        field = %req.edit.field,
        "Handling bulk_edit request"
    );

    let mut workspace = app_state.workspace.lock().await;
    let changed: bool = workspace.bulk_edit(&req.ids, &req.edit);
    write_response(&workspace, changed, None)
}

/// Handler for POST `/workspace/samples/undo` endpoint.
async fn handle_undo(AxumState(app_state): AxumState<AppState>) -> Json<WriteResponse> {
    info!("Handling undo request");

    let mut workspace = app_state.workspace.lock().await;
    let moved: bool = workspace.undo();
    write_response(&workspace, moved, None)
}

/// Handler for POST `/workspace/samples/redo` endpoint.
async fn handle_redo(AxumState(app_state): AxumState<AppState>) -> Json<WriteResponse> {
    info!("Handling redo request");

    let mut workspace = app_state.workspace.lock().await;
    let moved: bool = workspace.redo();
    write_response(&workspace, moved, None)
}

/// Handler for POST `/workspace/samples/validate` endpoint.
///
/// Invalid samples are reported through `validationErrors` with
/// `success: false`, not as an HTTP error.
async fn handle_validate_samples(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!("Handling validate_samples request");

    let mut workspace = app_state.workspace.lock().await;
    let valid: bool = workspace.validate_samples().await?;
    let message: String = if valid {
        String::from("Samples are valid")
    } else {
        format!(
            "{} samples have errors",
            workspace.validation_errors().len()
        )
    };
    Ok(write_response(&workspace, valid, Some(message)))
}

/// Handler for POST `/workspace/samples/import` endpoint.
///
/// The body is comma or semicolon separated text.
async fn handle_import_samples(
    AxumState(app_state): AxumState<AppState>,
    body: String,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(bytes = body.len(), "Handling import_samples request");

    let outcome: ImportOutcome = import_str(&body)?;
    let discarded: usize = outcome.discarded_rows;

    let mut workspace = app_state.workspace.lock().await;
    let imported: usize = workspace.import_samples(outcome.samples);

    info!(imported, discarded, "Imported samples");
    Ok(write_response(
        &workspace,
        imported > 0,
        Some(format!(
            "Imported {imported} samples, discarded {discarded} rows"
        )),
    ))
}

/// Handler for GET `/workspace/reserves` endpoint.
async fn handle_get_reserves(AxumState(app_state): AxumState<AppState>) -> Json<ReservesResponse> {
    info!("Handling get_reserves request");

    let workspace = app_state.workspace.lock().await;
    Json(ReservesResponse {
        reserves: workspace.reserves(),
        financials: workspace.financials(),
    })
}

/// Handler for GET `/workspace/statistics` endpoint.
async fn handle_get_statistics(
    AxumState(app_state): AxumState<AppState>,
) -> Json<GradeStatistics> {
    info!("Handling get_statistics request");

    let workspace = app_state.workspace.lock().await;
    Json(workspace.statistics())
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/projects", get(handle_list_projects))
        .route("/projects/compare", get(handle_compare_projects))
        .route("/projects/{id}", delete(handle_delete_project))
        .route("/workspace", get(handle_get_workspace))
        .route("/workspace/new", post(handle_new_project))
        .route("/workspace/load/{id}", post(handle_load_project))
        .route("/workspace/save", post(handle_save_project))
        .route("/workspace/discard", post(handle_discard_changes))
        .route("/workspace/project", put(handle_set_project))
        .route("/workspace/project/save", post(handle_save_geotechnical))
        .route("/workspace/block_area", put(handle_set_block_area))
        .route("/workspace/economics", put(handle_set_economics))
        .route("/workspace/economics/save", post(handle_save_economics))
        .route("/workspace/settings", put(handle_set_settings))
        .route("/workspace/settings/save", post(handle_save_settings))
        .route(
            "/workspace/samples",
            put(handle_set_samples).post(handle_add_sample),
        )
        .route(
            "/workspace/samples/{id}",
            patch(handle_edit_sample).delete(handle_remove_sample),
        )
        .route("/workspace/samples/bulk", post(handle_bulk_edit))
        .route("/workspace/samples/undo", post(handle_undo))
        .route("/workspace/samples/redo", post(handle_redo))
        .route("/workspace/samples/validate", post(handle_validate_samples))
        .route("/workspace/samples/import", post(handle_import_samples))
        .route("/workspace/reserves", get(handle_get_reserves))
        .route("/workspace/statistics", get(handle_get_statistics))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Alluvia Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let store: SqliteProjectStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteProjectStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteProjectStore::new_in_memory()?
    };

    let mut workspace: ServerWorkspace =
        Workspace::new(store, WorkspaceConfig::new(args.history_limit));
    workspace.initialize().await?;

    let app_state: AppState = AppState {
        workspace: Arc::new(Mutex::new(workspace)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
