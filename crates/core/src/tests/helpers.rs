// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{GatewayError, ProjectGateway, Workspace, WorkspaceConfig};
use alluvia_domain::{Project, ProjectData, ProjectId, ProjectListItem, Sample};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
struct Store {
    index: Vec<ProjectListItem>,
    payloads: HashMap<ProjectId, ProjectData>,
    last_active: Option<ProjectId>,
    next_id: u64,
    failure: Option<GatewayError>,
}

/// In-memory gateway with failure injection and call counters.
#[derive(Default)]
pub struct MemoryGateway {
    store: Mutex<Store>,
    stall_loads: AtomicBool,
    stall_remember: AtomicBool,
    pub gets: AtomicUsize,
    pub saves: AtomicUsize,
    pub creates: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` directly, bypassing the counters.
    pub fn seed(&self, name: &str, mut data: ProjectData) -> ProjectId {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let id: ProjectId = ProjectId::new(format!("proj_{}", store.next_id));
        data.project.project_name = name.to_string();
        store.index.push(ProjectListItem {
            id: id.clone(),
            name: name.to_string(),
        });
        store.payloads.insert(id.clone(), data);
        id
    }

    /// Drops the payload while keeping the index entry.
    pub fn remove_payload(&self, id: &ProjectId) -> ProjectData {
        self.store.lock().unwrap().payloads.remove(id).unwrap()
    }

    /// Makes every call fail with `failure` until cleared with `None`.
    pub fn fail_with(&self, failure: Option<GatewayError>) {
        self.store.lock().unwrap().failure = failure;
    }

    /// Makes `get_project_data` never complete.
    pub fn stall_loads(&self, stall: bool) {
        self.stall_loads.store(stall, Ordering::SeqCst);
    }

    /// Makes `remember_active_project` never complete.
    pub fn stall_remember(&self, stall: bool) {
        self.stall_remember.store(stall, Ordering::SeqCst);
    }

    pub fn stored(&self, id: &ProjectId) -> Option<ProjectData> {
        self.store.lock().unwrap().payloads.get(id).cloned()
    }

    pub fn listed(&self) -> Vec<ProjectListItem> {
        self.store.lock().unwrap().index.clone()
    }

    pub fn remembered(&self) -> Option<ProjectId> {
        self.store.lock().unwrap().last_active.clone()
    }

    pub fn set_remembered(&self, id: Option<ProjectId>) {
        self.store.lock().unwrap().last_active = id;
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), GatewayError> {
        self.store
            .lock()
            .unwrap()
            .failure
            .clone()
            .map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ProjectGateway for MemoryGateway {
    async fn list_projects(&self) -> Result<Vec<ProjectListItem>, GatewayError> {
        self.check()?;
        Ok(self.listed())
    }

    async fn get_project_data(
        &self,
        id: &ProjectId,
    ) -> Result<Option<ProjectData>, GatewayError> {
        if self.stall_loads.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.stored(id))
    }

    async fn save_project_data(
        &self,
        id: &ProjectId,
        data: &ProjectData,
    ) -> Result<ProjectData, GatewayError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut store = self.store.lock().unwrap();
        let item = ProjectListItem {
            id: id.clone(),
            name: data.project.project_name.clone(),
        };
        let existing: Option<usize> = store.index.iter().position(|entry| &entry.id == id);
        match existing {
            Some(position) => store.index[position] = item,
            None => store.index.push(item),
        }
        store.payloads.insert(id.clone(), data.clone());
        Ok(data.clone())
    }

    async fn create_project(&self, data: &ProjectData) -> Result<ProjectListItem, GatewayError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let item = ProjectListItem {
            id: ProjectId::new(format!("proj_{}", store.next_id)),
            name: data.project.project_name.clone(),
        };
        store.index.push(item.clone());
        store.payloads.insert(item.id.clone(), data.clone());
        Ok(item)
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<(), GatewayError> {
        self.check()?;
        let mut store = self.store.lock().unwrap();
        store.index.retain(|item| &item.id != id);
        store.payloads.remove(id);
        Ok(())
    }

    async fn last_active_project(&self) -> Result<Option<ProjectId>, GatewayError> {
        self.check()?;
        Ok(self.remembered())
    }

    async fn remember_active_project(&self, id: &ProjectId) -> Result<(), GatewayError> {
        if self.stall_remember.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.check()?;
        self.set_remembered(Some(id.clone()));
        Ok(())
    }
}

pub fn create_test_workspace() -> Workspace<MemoryGateway> {
    Workspace::new(MemoryGateway::new(), WorkspaceConfig::default())
}

pub fn create_test_project(name: &str) -> Project {
    Project {
        project_name: name.to_string(),
        ..Project::default()
    }
}

pub fn create_test_sample(id: u64, line: &str, pit: &str, area: f64) -> Sample {
    Sample {
        id,
        line: line.to_string(),
        pit: pit.to_string(),
        sterile_depth: 1.0,
        gravel_depth: 0.5,
        area,
        stones: 2.0,
        carats: 1.0,
    }
}

/// A stored project with three valid samples.
pub fn create_test_data(name: &str) -> ProjectData {
    ProjectData {
        project: create_test_project(name),
        total_block_area: 5_000.0,
        samples: vec![
            create_test_sample(10, "L1", "P1", 4.0),
            create_test_sample(11, "L1", "P2", 4.0),
            create_test_sample(12, "L2", "P1", 4.0),
        ],
        ..ProjectData::default()
    }
}

/// A workspace with two seeded projects and the first one loaded.
pub async fn create_loaded_workspace() -> (Workspace<MemoryGateway>, ProjectId, ProjectId) {
    let gateway: MemoryGateway = MemoryGateway::new();
    let first: ProjectId = gateway.seed("Cuango North", create_test_data("Cuango North"));
    let second: ProjectId = gateway.seed("Lunda South", create_test_data("Lunda South"));
    let mut workspace = Workspace::new(gateway, WorkspaceConfig::default());
    workspace.initialize().await.unwrap();
    (workspace, first, second)
}
