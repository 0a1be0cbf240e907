// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for creating, loading, saving, switching and deleting projects.

use crate::tests::helpers::{
    MemoryGateway, create_loaded_workspace, create_test_data, create_test_project,
};
use crate::{
    ActiveProject, GatewayError, NarrativeError, NarrativeGenerator, ProjectComparison,
    ReportRequest, Workspace, WorkspaceConfig, WorkspaceError,
};
use alluvia_domain::{
    FIRST_RUN_PROJECT_NAME, ProjectData, ProjectId, ProjectListItem, Sample, calculate_financials,
    calculate_reserves, default_samples,
};
use async_trait::async_trait;
use std::time::Duration;

fn unavailable() -> GatewayError {
    GatewayError::Unavailable(String::from("store offline"))
}

// ============================================================================
// Initialization
// ============================================================================

#[tokio::test]
async fn test_new_workspace_holds_defaults_without_project() {
    let workspace = Workspace::new(MemoryGateway::new(), WorkspaceConfig::default());
    assert_eq!(workspace.active_project(), &ActiveProject::NoProjectLoaded);
    assert_eq!(workspace.samples(), default_samples().as_slice());
    assert!(!workspace.is_dirty());
    assert!(!workspace.samples_pending());
}

#[tokio::test]
async fn test_initialize_creates_first_project_when_store_is_empty() {
    let mut workspace = Workspace::new(MemoryGateway::new(), WorkspaceConfig::default());
    workspace.initialize().await.unwrap();

    let listed: Vec<ProjectListItem> = workspace.gateway().listed();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, FIRST_RUN_PROJECT_NAME);
    assert_eq!(
        workspace.active_project(),
        &ActiveProject::Loaded(listed[0].id.clone())
    );
    assert_eq!(workspace.project().project_name, FIRST_RUN_PROJECT_NAME);
    assert_eq!(workspace.projects(), listed.as_slice());
    assert_eq!(workspace.gateway().remembered(), Some(listed[0].id.clone()));
    assert!(!workspace.is_dirty());
}

#[tokio::test]
async fn test_initialize_loads_first_project_by_default() {
    let (workspace, first, _) = create_loaded_workspace().await;
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first));
    assert_eq!(workspace.project().project_name, "Cuango North");
    assert_eq!(workspace.projects().len(), 2);
}

#[tokio::test]
async fn test_initialize_prefers_remembered_project() {
    let gateway: MemoryGateway = MemoryGateway::new();
    gateway.seed("Cuango North", create_test_data("Cuango North"));
    let second: ProjectId = gateway.seed("Lunda South", create_test_data("Lunda South"));
    gateway.set_remembered(Some(second.clone()));

    let mut workspace = Workspace::new(gateway, WorkspaceConfig::default());
    workspace.initialize().await.unwrap();
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(second));
}

#[tokio::test]
async fn test_initialize_ignores_remembered_project_that_is_gone() {
    let gateway: MemoryGateway = MemoryGateway::new();
    let first: ProjectId = gateway.seed("Cuango North", create_test_data("Cuango North"));
    gateway.set_remembered(Some(ProjectId::new("proj_deleted")));

    let mut workspace = Workspace::new(gateway, WorkspaceConfig::default());
    workspace.initialize().await.unwrap();
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first));
}

#[tokio::test]
async fn test_initialize_failure_leaves_workspace_untouched() {
    let gateway: MemoryGateway = MemoryGateway::new();
    gateway.fail_with(Some(unavailable()));
    let mut workspace = Workspace::new(gateway, WorkspaceConfig::default());

    let result: Result<(), WorkspaceError> = workspace.initialize().await;
    assert_eq!(result, Err(WorkspaceError::Gateway(unavailable())));
    assert_eq!(workspace.active_project(), &ActiveProject::NoProjectLoaded);
    assert!(workspace.projects().is_empty());
}

// ============================================================================
// New project
// ============================================================================

#[tokio::test]
async fn test_start_new_project_resets_everything() {
    let (mut workspace, _, _) = create_loaded_workspace().await;
    workspace.set_project(create_test_project("Scratch")).unwrap();
    workspace.add_sample();
    workspace.set_samples(Vec::new()).unwrap();

    workspace.start_new_project();

    assert_eq!(workspace.active_project(), &ActiveProject::NewUnsaved);
    assert_eq!(workspace.snapshot(), ProjectData {
        project: workspace.project().clone(),
        ..ProjectData::default()
    });
    assert_eq!(workspace.project().project_name, "New Project");
    assert_eq!(workspace.samples(), default_samples().as_slice());
    assert!(!workspace.is_dirty());
    assert!(!workspace.can_undo());
    assert!(!workspace.can_redo());
    assert!(workspace.validation_errors().is_empty());
}

#[tokio::test]
async fn test_saving_new_project_twice_creates_one_entry() {
    let mut workspace = Workspace::new(MemoryGateway::new(), WorkspaceConfig::default());
    workspace.start_new_project();
    workspace.set_project(create_test_project("Kasai Terrace")).unwrap();

    let first: ProjectId = workspace.save_project_details().await.unwrap();
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first.clone()));
    assert_eq!(workspace.projects().len(), 1);
    assert_eq!(workspace.projects()[0].name, "Kasai Terrace");
    assert!(!workspace.is_dirty());

    let second: ProjectId = workspace.save_project_details().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(MemoryGateway::count(&workspace.gateway().creates), 1);
    assert_eq!(workspace.gateway().listed().len(), 1);
    assert_eq!(workspace.projects().len(), 1);
    assert_eq!(workspace.gateway().remembered(), Some(first));
}

#[tokio::test]
async fn test_abandoned_create_keeps_new_identity() {
    let mut workspace = Workspace::new(MemoryGateway::new(), WorkspaceConfig::default());
    workspace.start_new_project();
    workspace
        .set_project(create_test_project("Kasai Terrace"))
        .unwrap();
    workspace.gateway().stall_remember(true);

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        workspace.save_project_details(),
    )
    .await;
    assert!(outcome.is_err());

    let stored: ProjectListItem = workspace.gateway().listed().remove(0);
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(stored.id.clone()));
    assert_eq!(workspace.projects(), &[stored.clone()]);
    assert!(!workspace.is_dirty());

    workspace.gateway().stall_remember(false);
    let id: ProjectId = workspace.save_project_details().await.unwrap();
    assert_eq!(id, stored.id);
    assert_eq!(MemoryGateway::count(&workspace.gateway().creates), 1);
    assert_eq!(workspace.gateway().listed().len(), 1);
    assert_eq!(workspace.projects().len(), 1);
}

#[tokio::test]
async fn test_failed_create_stays_unsaved_and_dirty() {
    let mut workspace = Workspace::new(MemoryGateway::new(), WorkspaceConfig::default());
    workspace.start_new_project();
    workspace.set_total_block_area(42.0);
    workspace.gateway().fail_with(Some(unavailable()));

    assert!(workspace.save_project_details().await.is_err());
    assert_eq!(workspace.active_project(), &ActiveProject::NewUnsaved);
    assert!(workspace.is_dirty());
    assert!(workspace.projects().is_empty());
}

// ============================================================================
// Full save
// ============================================================================

#[tokio::test]
async fn test_full_save_writes_every_section_and_syncs_name() {
    let (mut workspace, first, _) = create_loaded_workspace().await;
    workspace.set_project(create_test_project("Cuango North II")).unwrap();
    workspace.set_total_block_area(12_345.0);
    workspace.add_sample();

    let saved: ProjectId = workspace.save_project_details().await.unwrap();
    assert_eq!(saved, first);

    let stored: ProjectData = workspace.gateway().stored(&first).unwrap();
    assert_eq!(stored, workspace.snapshot());
    assert_eq!(workspace.gateway().listed()[0].name, "Cuango North II");
    assert_eq!(workspace.projects()[0].name, "Cuango North II");
    assert!(!workspace.is_dirty());
    assert!(!workspace.samples_pending());
}

#[tokio::test]
async fn test_failed_save_keeps_dirty_flag() {
    let (mut workspace, _, _) = create_loaded_workspace().await;
    workspace.set_project(create_test_project("Renamed")).unwrap();
    workspace.gateway().fail_with(Some(unavailable()));

    let result: Result<ProjectId, WorkspaceError> = workspace.save_project_details().await;
    assert_eq!(result, Err(WorkspaceError::Gateway(unavailable())));
    assert!(workspace.is_dirty());
    assert_eq!(workspace.projects()[0].name, "Cuango North");
}

// ============================================================================
// Load
// ============================================================================

#[tokio::test]
async fn test_load_replaces_state_and_discards_history() {
    let (mut workspace, _, second) = create_loaded_workspace().await;
    workspace.add_sample();
    workspace.set_total_block_area(1.0);
    assert!(workspace.can_undo());

    workspace.load_project(&second).await.unwrap();

    let stored: ProjectData = workspace.gateway().stored(&second).unwrap();
    assert_eq!(workspace.snapshot(), stored);
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(second.clone()));
    assert!(!workspace.can_undo());
    assert!(!workspace.can_redo());
    assert!(!workspace.is_dirty());
    assert_eq!(workspace.gateway().remembered(), Some(second));
}

#[tokio::test]
async fn test_load_missing_project_changes_nothing() {
    let (mut workspace, first, _) = create_loaded_workspace().await;
    workspace.add_sample();
    let before: ProjectData = workspace.snapshot();
    let missing: ProjectId = ProjectId::new("proj_missing");

    let result: Result<(), WorkspaceError> = workspace.load_project(&missing).await;
    assert_eq!(result, Err(WorkspaceError::ProjectNotFound(missing)));
    assert_eq!(workspace.snapshot(), before);
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first));
    assert!(workspace.can_undo());
}

#[tokio::test]
async fn test_load_failure_changes_nothing() {
    let (mut workspace, first, second) = create_loaded_workspace().await;
    workspace.set_total_block_area(3.0);
    workspace.gateway().fail_with(Some(unavailable()));

    assert!(workspace.load_project(&second).await.is_err());
    assert_eq!(workspace.total_block_area(), 3.0);
    assert!(workspace.is_dirty());
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first));
}

#[tokio::test]
async fn test_abandoned_load_changes_nothing() {
    let (mut workspace, first, second) = create_loaded_workspace().await;
    let before: ProjectData = workspace.snapshot();
    workspace.gateway().stall_loads(true);

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        workspace.load_project(&second),
    )
    .await;
    assert!(outcome.is_err());

    assert_eq!(workspace.snapshot(), before);
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first.clone()));
    assert_eq!(workspace.gateway().remembered(), Some(first));
}

#[tokio::test]
async fn test_load_abandoned_while_recording_session_is_applied() {
    let (mut workspace, first, second) = create_loaded_workspace().await;
    workspace.gateway().stall_remember(true);

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        workspace.load_project(&second),
    )
    .await;
    assert!(outcome.is_err());

    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(second.clone()));
    assert_eq!(workspace.project().project_name, "Lunda South");
    assert!(!workspace.is_dirty());
    assert_eq!(workspace.gateway().remembered(), Some(first));
}

#[tokio::test]
async fn test_load_clears_validation_errors() {
    let (mut workspace, first, _) = create_loaded_workspace().await;
    let mut samples: Vec<Sample> = workspace.samples().to_vec();
    samples[0].area = 0.0;
    workspace.set_samples(samples).unwrap();
    assert!(!workspace.validate_samples().await.unwrap());
    assert!(!workspace.validation_errors().is_empty());

    workspace.load_project(&first).await.unwrap();
    assert!(workspace.validation_errors().is_empty());
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_deleting_active_project_loads_first_remaining() {
    let (mut workspace, first, second) = create_loaded_workspace().await;
    workspace.delete_project(&first).await.unwrap();

    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(second.clone()));
    assert_eq!(workspace.project().project_name, "Lunda South");
    assert_eq!(workspace.projects().len(), 1);
    assert!(workspace.gateway().stored(&first).is_none());
}

#[tokio::test]
async fn test_deleting_last_project_starts_new_one() {
    let (mut workspace, first, second) = create_loaded_workspace().await;
    workspace.delete_project(&second).await.unwrap();
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first.clone()));

    workspace.delete_project(&first).await.unwrap();
    assert_eq!(workspace.active_project(), &ActiveProject::NewUnsaved);
    assert!(workspace.projects().is_empty());
    assert!(workspace.gateway().listed().is_empty());
    assert_eq!(workspace.samples(), default_samples().as_slice());
}

#[tokio::test]
async fn test_deleting_inactive_project_keeps_live_state() {
    let (mut workspace, first, second) = create_loaded_workspace().await;
    workspace.set_total_block_area(77.0);

    workspace.delete_project(&second).await.unwrap();
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first));
    assert_eq!(workspace.total_block_area(), 77.0);
    assert!(workspace.is_dirty());
}

#[tokio::test]
async fn test_failed_delete_keeps_index() {
    let (mut workspace, first, _) = create_loaded_workspace().await;
    workspace.gateway().fail_with(Some(unavailable()));

    assert!(workspace.delete_project(&first).await.is_err());
    assert_eq!(workspace.projects().len(), 2);
    assert_eq!(workspace.active_project(), &ActiveProject::Loaded(first));
}

// ============================================================================
// Discard
// ============================================================================

#[tokio::test]
async fn test_discard_reverts_sections_but_not_samples() {
    let (mut workspace, _, _) = create_loaded_workspace().await;
    let project_before = workspace.project().clone();
    workspace.set_project(create_test_project("Scratch")).unwrap();
    workspace.set_total_block_area(1.0);
    workspace.add_sample();
    let edited_samples: Vec<Sample> = workspace.samples().to_vec();

    workspace.discard_changes();

    assert_eq!(workspace.project(), &project_before);
    assert_eq!(workspace.total_block_area(), 5_000.0);
    assert!(!workspace.is_dirty());
    assert_eq!(workspace.samples(), edited_samples.as_slice());
    assert!(workspace.samples_pending());
}

// ============================================================================
// Derived figures, comparison and reports
// ============================================================================

#[tokio::test]
async fn test_derived_figures_follow_live_state() {
    let (mut workspace, _, _) = create_loaded_workspace().await;
    let data: ProjectData = workspace.snapshot();
    let expected = calculate_reserves(&data.samples, data.total_block_area, &data.project);
    assert_eq!(workspace.reserves(), expected);
    assert_eq!(
        workspace.financials(),
        calculate_financials(&expected, &data.economic_params)
    );

    workspace.set_total_block_area(0.0);
    assert_eq!(workspace.reserves().in_situ_reserves.estimated_carats, 0.0);
    assert_eq!(workspace.statistics().grades.len(), 3);
}

#[tokio::test]
async fn test_compare_projects_skips_missing_payloads() {
    let (workspace, first, second) = create_loaded_workspace().await;
    let removed: ProjectData = workspace.gateway().remove_payload(&first);
    let third: ProjectId = workspace.gateway().seed("Chicapa", removed);

    let comparisons: Vec<ProjectComparison> = workspace.compare_projects().await.unwrap();
    let ids: Vec<ProjectId> = comparisons.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![second.clone(), third]);

    let stored: ProjectData = workspace.gateway().stored(&second).unwrap();
    let reserves = calculate_reserves(&stored.samples, stored.total_block_area, &stored.project);
    assert_eq!(comparisons[0].name, "Lunda South");
    assert_eq!(comparisons[0].reserves, reserves);
    assert_eq!(
        comparisons[0].financials,
        calculate_financials(&reserves, &stored.economic_params)
    );
}

struct EchoGenerator;

#[async_trait]
impl NarrativeGenerator for EchoGenerator {
    async fn generate(&self, request: &ReportRequest) -> Result<String, NarrativeError> {
        Ok(format!(
            "{} yields {} carats",
            request.data.project.project_name, request.reserves.in_situ_reserves.estimated_carats
        ))
    }
}

struct OfflineGenerator;

#[async_trait]
impl NarrativeGenerator for OfflineGenerator {
    async fn generate(&self, _request: &ReportRequest) -> Result<String, NarrativeError> {
        Err(NarrativeError::Unavailable(String::from("no key")))
    }
}

#[tokio::test]
async fn test_generate_report_passes_live_state() {
    let (mut workspace, _, _) = create_loaded_workspace().await;
    workspace.set_project(create_test_project("Unsaved Name")).unwrap();

    let report: String = workspace.generate_report(&EchoGenerator).await.unwrap();
    let carats: f64 = workspace.reserves().in_situ_reserves.estimated_carats;
    assert_eq!(report, format!("Unsaved Name yields {carats} carats"));
}

#[tokio::test]
async fn test_generate_report_surfaces_generator_failure() {
    let (workspace, _, _) = create_loaded_workspace().await;
    let result: Result<String, WorkspaceError> = workspace.generate_report(&OfflineGenerator).await;
    assert_eq!(
        result,
        Err(WorkspaceError::Narrative(NarrativeError::Unavailable(
            String::from("no key")
        )))
    );
}
