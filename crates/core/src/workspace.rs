// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The project workspace: one project's live editing state.
//!
//! The workspace owns the live project sections, the sample history, the
//! validation error map and the project index, and is the only component that
//! talks to the [`ProjectGateway`].
//!
//! Every async operation applies live state as soon as the gateway call that
//! reads or changes the store succeeds, and only then records the active
//! project for the next session. Dropping one of these futures part way
//! through therefore leaves the workspace either exactly as it was or in step
//! with the store. Because mutating operations take `&mut self`, two of them
//! can never be in flight on the same workspace.

use crate::baseline::{DirtyTracker, Sections};
use crate::comparison::ProjectComparison;
use crate::config::WorkspaceConfig;
use crate::editing::BulkEdit;
use crate::error::WorkspaceError;
use crate::gateway::ProjectGateway;
use crate::history::HistoryStore;
use crate::narrative::{NarrativeGenerator, ReportRequest};
use alluvia_domain::{
    CalculatedReserves, EconomicParams, FIRST_RUN_PROJECT_NAME, FieldValue, FinancialResult,
    GradeStatistics, Project, ProjectData, ProjectId, ProjectListItem, ProjectSettings, Sample,
    SampleDraft, SampleField, SampleId, ValidationErrors, calculate_financials,
    calculate_reserves, clear_field_error, default_samples, grade_statistics, validate_project,
    validate_samples,
};
use std::collections::HashSet;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Identity of the project being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "camelCase")]
pub enum ActiveProject {
    /// Nothing has been started or loaded yet.
    NoProjectLoaded,
    /// A new project that has never been saved.
    NewUnsaved,
    /// A persisted project.
    Loaded(ProjectId),
}

impl ActiveProject {
    /// Returns the identifier of a loaded project.
    #[must_use]
    pub const fn id(&self) -> Option<&ProjectId> {
        match self {
            Self::Loaded(id) => Some(id),
            Self::NoProjectLoaded | Self::NewUnsaved => None,
        }
    }
}

/// One editing session over a single active project.
pub struct Workspace<G> {
    gateway: G,
    config: WorkspaceConfig,
    active: ActiveProject,
    projects: Vec<ProjectListItem>,
    live: Sections,
    tracker: DirtyTracker,
    samples: HistoryStore<Vec<Sample>>,
    persisted_samples: Vec<Sample>,
    validation_errors: ValidationErrors,
    next_sample_id: SampleId,
}

impl<G: ProjectGateway> Workspace<G> {
    /// Creates a workspace holding the default project, with no project
    /// loaded.
    ///
    /// Call [`Workspace::initialize`] to load the session's project.
    #[must_use]
    pub fn new(gateway: G, config: WorkspaceConfig) -> Self {
        let live: Sections = Sections::default();
        let samples: Vec<Sample> = default_samples();
        let mut workspace: Self = Self {
            gateway,
            config,
            active: ActiveProject::NoProjectLoaded,
            projects: Vec::new(),
            tracker: DirtyTracker::new(live.clone()),
            live,
            samples: HistoryStore::with_limit(samples.clone(), config.history_limit),
            persisted_samples: samples.clone(),
            validation_errors: ValidationErrors::new(),
            next_sample_id: 1,
        };
        workspace.observe_sample_ids(&samples);
        workspace
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    #[must_use]
    pub const fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    #[must_use]
    pub const fn active_project(&self) -> &ActiveProject {
        &self.active
    }

    /// The local copy of the project index.
    #[must_use]
    pub fn projects(&self) -> &[ProjectListItem] {
        &self.projects
    }

    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.live.project
    }

    #[must_use]
    pub const fn total_block_area(&self) -> f64 {
        self.live.total_block_area
    }

    #[must_use]
    pub const fn economic_params(&self) -> &EconomicParams {
        &self.live.economic_params
    }

    #[must_use]
    pub const fn settings(&self) -> &ProjectSettings {
        &self.live.settings
    }

    /// The sample collection at the history pointer.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        self.samples.current()
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryStore<Vec<Sample>> {
        &self.samples
    }

    #[must_use]
    pub const fn validation_errors(&self) -> &ValidationErrors {
        &self.validation_errors
    }

    /// Whether the project sections changed since the last save.
    ///
    /// Sample edits are not counted; see [`Workspace::samples_pending`].
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Whether the live samples differ from the last samples known to be
    /// persisted.
    #[must_use]
    pub fn samples_pending(&self) -> bool {
        self.samples.current() != &self.persisted_samples
    }

    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.samples.can_undo()
    }

    #[must_use]
    pub const fn can_redo(&self) -> bool {
        self.samples.can_redo()
    }

    /// Builds the full payload from live state.
    #[must_use]
    pub fn snapshot(&self) -> ProjectData {
        ProjectData {
            project: self.live.project.clone(),
            total_block_area: self.live.total_block_area,
            samples: self.samples.current().clone(),
            economic_params: self.live.economic_params.clone(),
            settings: self.live.settings.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Derived figures
    // ------------------------------------------------------------------

    /// Recomputes the reserve estimate from live state.
    #[must_use]
    pub fn reserves(&self) -> CalculatedReserves {
        calculate_reserves(
            self.samples.current(),
            self.live.total_block_area,
            &self.live.project,
        )
    }

    /// Recomputes the financial result from live state.
    #[must_use]
    pub fn financials(&self) -> FinancialResult {
        calculate_financials(&self.reserves(), &self.live.economic_params)
    }

    #[must_use]
    pub fn statistics(&self) -> GradeStatistics {
        grade_statistics(self.samples.current())
    }

    // ------------------------------------------------------------------
    // Section setters
    // ------------------------------------------------------------------

    /// Replaces the project metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if a swell or dilution factor is negative. Live
    /// state is then unchanged.
    pub fn set_project(&mut self, project: Project) -> Result<(), WorkspaceError> {
        validate_project(&project)?;
        self.live.project = project;
        self.tracker.mark_dirty();
        Ok(())
    }

    pub fn set_total_block_area(&mut self, total_block_area: f64) {
        self.live.total_block_area = total_block_area;
        self.tracker.mark_dirty();
    }

    pub fn set_economic_params(&mut self, params: EconomicParams) {
        self.live.economic_params = params;
        self.tracker.mark_dirty();
    }

    pub fn set_settings(&mut self, settings: ProjectSettings) {
        self.live.settings = settings;
        self.tracker.mark_dirty();
    }

    /// Reverts the project sections to the baseline.
    ///
    /// The sample history is left alone. Samples reach storage through
    /// validation, not through the baseline.
    pub fn discard_changes(&mut self) {
        self.tracker.discard(&mut self.live);
        info!(project = ?self.active, "Discarded unsaved changes");
    }

    // ------------------------------------------------------------------
    // Sample editing
    // ------------------------------------------------------------------

    fn allocate_sample_id(&mut self) -> SampleId {
        let id: SampleId = self.next_sample_id;
        self.next_sample_id += 1;
        id
    }

    /// Keeps the allocator ahead of every identifier it has seen.
    fn observe_sample_ids(&mut self, samples: &[Sample]) {
        if let Some(max) = samples.iter().map(|sample| sample.id).max() {
            self.next_sample_id = self.next_sample_id.max(max.saturating_add(1));
        }
    }

    fn sample_index(&self, id: SampleId) -> Result<usize, WorkspaceError> {
        self.samples
            .current()
            .iter()
            .position(|sample| sample.id == id)
            .ok_or(WorkspaceError::SampleNotFound(id))
    }

    /// Replaces the sample collection as one undo step.
    ///
    /// # Returns
    ///
    /// `false` when the collection is unchanged and nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if two samples share an identifier. Live state is
    /// then unchanged.
    pub fn set_samples(&mut self, samples: Vec<Sample>) -> Result<bool, WorkspaceError> {
        let mut seen: HashSet<SampleId> = HashSet::with_capacity(samples.len());
        if let Some(duplicate) = samples.iter().find(|sample| !seen.insert(sample.id)) {
            return Err(WorkspaceError::DuplicateSampleId(duplicate.id));
        }
        self.observe_sample_ids(&samples);
        Ok(self.samples.set(samples))
    }

    /// Appends a blank sample and returns its identifier.
    pub fn add_sample(&mut self) -> SampleId {
        let id: SampleId = self.allocate_sample_id();
        self.samples.update(|samples| {
            let mut next: Vec<Sample> = samples.clone();
            next.push(Sample::blank(id));
            next
        });
        debug!(sample_id = id, "Added sample");
        id
    }

    /// Removes a sample along with its validation errors.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::SampleNotFound` if no live sample has `id`.
    pub fn remove_sample(&mut self, id: SampleId) -> Result<(), WorkspaceError> {
        self.sample_index(id)?;
        self.samples.update(|samples| {
            samples
                .iter()
                .filter(|sample| sample.id != id)
                .cloned()
                .collect()
        });
        self.validation_errors.remove(&id);
        debug!(sample_id = id, "Removed sample");
        Ok(())
    }

    /// Writes one field of one sample.
    ///
    /// Any error recorded for that field is cleared without re-validating.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No live sample has `id`
    /// - The value kind does not match the field
    pub fn edit_sample(
        &mut self,
        id: SampleId,
        field: SampleField,
        value: FieldValue,
    ) -> Result<bool, WorkspaceError> {
        let index: usize = self.sample_index(id)?;
        let updated: Sample = self.samples.current()[index].with_field(field, value)?;
        let changed: bool = self.samples.update(|samples| {
            let mut next: Vec<Sample> = samples.clone();
            if let Some(slot) = next.get_mut(index) {
                *slot = updated;
            }
            next
        });
        clear_field_error(&mut self.validation_errors, id, field);
        Ok(changed)
    }

    /// Applies one edit to every selected sample as a single undo step.
    ///
    /// Unknown identifiers are ignored. A numeric field given input that is
    /// not a number leaves every sample unchanged.
    ///
    /// # Returns
    ///
    /// `true` if any sample changed.
    pub fn bulk_edit(&mut self, ids: &[SampleId], edit: &BulkEdit) -> bool {
        let mut touched: bool = false;
        let next: Vec<Sample> = self
            .samples
            .current()
            .iter()
            .map(|sample| {
                if !ids.contains(&sample.id) {
                    return sample.clone();
                }
                edit.apply_to(sample).map_or_else(
                    || sample.clone(),
                    |edited| {
                        touched = true;
                        edited
                    },
                )
            })
            .collect();
        if !touched {
            return false;
        }
        let changed: bool = self.samples.set(next);
        debug!(selected = ids.len(), field = %edit.field, changed, "Applied bulk edit");
        changed
    }

    /// Replaces the whole collection with imported drafts.
    ///
    /// Each draft gets a fresh identifier. An empty import leaves the
    /// collection untouched.
    ///
    /// # Returns
    ///
    /// The number of samples imported.
    pub fn import_samples(&mut self, drafts: Vec<SampleDraft>) -> usize {
        if drafts.is_empty() {
            return 0;
        }
        let imported: Vec<Sample> = drafts
            .into_iter()
            .map(|draft| Sample::from_draft(self.allocate_sample_id(), draft))
            .collect();
        let count: usize = imported.len();
        self.samples.set(imported);
        info!(count, "Imported samples");
        count
    }

    pub fn undo(&mut self) -> bool {
        self.samples.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.samples.redo()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Loads the session's starting project.
    ///
    /// Loads the remembered project when it is still listed, otherwise the
    /// first listed project. With no projects at all, a first project is
    /// created from defaults and loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails. Live state is then unchanged.
    pub async fn initialize(&mut self) -> Result<(), WorkspaceError> {
        let mut projects: Vec<ProjectListItem> = self.gateway.list_projects().await?;

        let target: ProjectId = if let Some(first) = projects.first() {
            let remembered: Option<ProjectId> = self.gateway.last_active_project().await?;
            remembered
                .filter(|id| projects.iter().any(|item| &item.id == id))
                .unwrap_or_else(|| first.id.clone())
        } else {
            let data: ProjectData = ProjectData {
                project: Project {
                    project_name: String::from(FIRST_RUN_PROJECT_NAME),
                    ..Project::default()
                },
                ..ProjectData::default()
            };
            let item: ProjectListItem = self.gateway.create_project(&data).await?;
            info!(project_id = %item.id, "Created first project");
            let id: ProjectId = item.id.clone();
            projects.push(item);
            id
        };

        let data: ProjectData = self.fetch(&target).await?;
        self.projects = projects;
        self.apply_loaded(target.clone(), data);
        self.remember(&target).await;
        Ok(())
    }

    /// Re-reads the project index from the gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails.
    pub async fn refresh_projects(&mut self) -> Result<&[ProjectListItem], WorkspaceError> {
        self.projects = self.gateway.list_projects().await?;
        Ok(&self.projects)
    }

    /// Resets every live section and the sample history to defaults.
    ///
    /// The new project is unsaved, and clean relative to its own defaults.
    pub fn start_new_project(&mut self) {
        let samples: Vec<Sample> = default_samples();
        self.live = Sections::default();
        self.observe_sample_ids(&samples);
        self.samples.reset(samples.clone());
        self.persisted_samples = samples;
        self.validation_errors.clear();
        self.active = ActiveProject::NewUnsaved;
        self.tracker.update_baseline(&self.live);
        info!("Started new project");
    }

    /// Replaces live state with a stored project.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The gateway fails
    /// - No payload is stored under `id`
    ///
    /// In both cases live state is unchanged.
    pub async fn load_project(&mut self, id: &ProjectId) -> Result<(), WorkspaceError> {
        let data: ProjectData = self.fetch(id).await?;
        self.apply_loaded(id.clone(), data);
        self.remember(id).await;
        Ok(())
    }

    async fn fetch(&self, id: &ProjectId) -> Result<ProjectData, WorkspaceError> {
        self.gateway
            .get_project_data(id)
            .await?
            .ok_or_else(|| WorkspaceError::ProjectNotFound(id.clone()))
    }

    /// Records the active project. A failure only costs the next session its
    /// starting point, so it is logged rather than returned.
    async fn remember(&self, id: &ProjectId) {
        if let Err(err) = self.gateway.remember_active_project(id).await {
            warn!(project_id = %id, error = %err, "Could not record active project");
        }
    }

    fn apply_loaded(&mut self, id: ProjectId, data: ProjectData) {
        self.live = Sections::from_data(&data);
        self.observe_sample_ids(&data.samples);
        self.samples.reset(data.samples.clone());
        self.persisted_samples = data.samples;
        self.validation_errors.clear();
        self.tracker.update_baseline(&self.live);
        info!(project_id = %id, name = %self.live.project.project_name, "Loaded project");
        self.active = ActiveProject::Loaded(id);
    }

    /// Persists every live section and the live samples.
    ///
    /// An unsaved project is created in the store and becomes the loaded
    /// project. A loaded project is overwritten in place and its index entry
    /// takes the current project name.
    ///
    /// # Returns
    ///
    /// The identifier the project is stored under.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails. The project then stays dirty.
    pub async fn save_project_details(&mut self) -> Result<ProjectId, WorkspaceError> {
        let data: ProjectData = self.snapshot();

        if let ActiveProject::Loaded(id) = &self.active {
            let id: ProjectId = id.clone();
            self.gateway.save_project_data(&id, &data).await?;
            self.sync_list_name(&id, &data.project.project_name);
            self.mark_saved(data.samples);
            info!(project_id = %id, "Saved project");
            return Ok(id);
        }

        let item: ProjectListItem = self.gateway.create_project(&data).await?;
        let id: ProjectId = item.id.clone();
        info!(project_id = %id, name = %item.name, "Created project");
        self.projects.push(item);
        self.active = ActiveProject::Loaded(id.clone());
        self.mark_saved(data.samples);
        self.remember(&id).await;
        Ok(id)
    }

    fn mark_saved(&mut self, samples: Vec<Sample>) {
        self.persisted_samples = samples;
        self.tracker.update_baseline(&self.live);
    }

    fn sync_list_name(&mut self, id: &ProjectId, name: &str) {
        if let Some(item) = self
            .projects
            .iter_mut()
            .find(|item| &item.id == id && item.name != name)
        {
            item.name = name.to_string();
        }
    }

    /// Re-fetches the stored payload, merges one section into it and writes
    /// it back.
    ///
    /// # Returns
    ///
    /// The merged payload, or `None` when there was nothing to merge into.
    async fn save_section<F>(
        &mut self,
        section: &'static str,
        merge: F,
    ) -> Result<Option<ProjectData>, WorkspaceError>
    where
        F: FnOnce(&mut ProjectData) + Send,
    {
        let Some(id) = self.active.id().cloned() else {
            debug!(section, "No stored project to merge into");
            return Ok(None);
        };

        let Some(mut stored) = self.gateway.get_project_data(&id).await? else {
            warn!(project_id = %id, section, "Stored payload missing; section not saved");
            return Ok(None);
        };
        merge(&mut stored);
        self.gateway.save_project_data(&id, &stored).await?;

        debug!(project_id = %id, section, "Merged section into stored project");
        self.tracker.update_baseline(&self.live);
        Ok(Some(stored))
    }

    /// Saves the project metadata into the stored payload.
    ///
    /// Does nothing for an unsaved project.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails.
    pub async fn save_geotechnical_params(&mut self) -> Result<bool, WorkspaceError> {
        let project: Project = self.live.project.clone();
        let saved: Option<ProjectData> = self
            .save_section("geotechnical", move |data| data.project = project)
            .await?;
        if let (Some(data), Some(id)) = (&saved, self.active.id().cloned()) {
            self.sync_list_name(&id, &data.project.project_name);
        }
        Ok(saved.is_some())
    }

    /// Saves the economic parameters into the stored payload.
    ///
    /// Does nothing for an unsaved project.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails.
    pub async fn save_economic_params(&mut self) -> Result<bool, WorkspaceError> {
        let params: EconomicParams = self.live.economic_params.clone();
        let saved: Option<ProjectData> = self
            .save_section("economics", move |data| data.economic_params = params)
            .await?;
        Ok(saved.is_some())
    }

    /// Saves the settings into the stored payload.
    ///
    /// Does nothing for an unsaved project.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails.
    pub async fn save_settings(&mut self) -> Result<bool, WorkspaceError> {
        let settings: ProjectSettings = self.live.settings.clone();
        let saved: Option<ProjectData> = self
            .save_section("settings", move |data| data.settings = settings)
            .await?;
        Ok(saved.is_some())
    }

    /// Validates the live samples and, when they pass, saves them into the
    /// stored payload.
    ///
    /// # Returns
    ///
    /// `false` when validation failed. The errors are then available from
    /// [`Workspace::validation_errors`] and nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails while saving valid samples.
    pub async fn validate_samples(&mut self) -> Result<bool, WorkspaceError> {
        let errors: ValidationErrors = validate_samples(self.samples.current());
        if !errors.is_empty() {
            info!(invalid_samples = errors.len(), "Sample validation failed");
            self.validation_errors = errors;
            return Ok(false);
        }

        let samples: Vec<Sample> = self.samples.current().clone();
        let stored: Vec<Sample> = samples.clone();
        let saved: Option<ProjectData> = self
            .save_section("samples", move |data| data.samples = stored)
            .await?;
        if saved.is_some() {
            self.persisted_samples = samples;
        }
        self.validation_errors.clear();
        Ok(true)
    }

    /// Deletes a stored project.
    ///
    /// Deleting the active project loads the first remaining one, or starts a
    /// new project when none remain.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails. If the delete succeeded but the
    /// replacement could not be loaded, a new project is started before the
    /// error is returned.
    pub async fn delete_project(&mut self, id: &ProjectId) -> Result<(), WorkspaceError> {
        self.gateway.delete_project(id).await?;
        self.projects.retain(|item| &item.id != id);
        info!(project_id = %id, "Deleted project");

        if self.active.id() != Some(id) {
            return Ok(());
        }

        match self.projects.first().map(|item| item.id.clone()) {
            Some(next) => {
                if let Err(err) = self.load_project(&next).await {
                    self.start_new_project();
                    return Err(err);
                }
            }
            None => self.start_new_project(),
        }
        Ok(())
    }

    /// Recomputes reserves and financials for every stored project.
    ///
    /// Projects whose payload is missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails.
    pub async fn compare_projects(&self) -> Result<Vec<ProjectComparison>, WorkspaceError> {
        let projects: Vec<ProjectListItem> = self.gateway.list_projects().await?;
        let mut comparisons: Vec<ProjectComparison> = Vec::with_capacity(projects.len());
        for item in projects {
            match self.gateway.get_project_data(&item.id).await? {
                Some(data) => comparisons.push(ProjectComparison::from_stored(item, &data)),
                None => warn!(project_id = %item.id, "Skipping project without payload"),
            }
        }
        Ok(comparisons)
    }

    /// Asks `generator` for a narrative report on the live project.
    ///
    /// # Errors
    ///
    /// Returns an error if the generator fails.
    pub async fn generate_report<N>(&self, generator: &N) -> Result<String, WorkspaceError>
    where
        N: NarrativeGenerator + ?Sized,
    {
        let reserves: CalculatedReserves = self.reserves();
        let request: ReportRequest = ReportRequest {
            data: self.snapshot(),
            financials: calculate_financials(&reserves, &self.live.economic_params),
            reserves,
        };
        Ok(generator.generate(&request).await?)
    }
}
