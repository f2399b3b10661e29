#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use installsync_core::{
    DynReindexJob, IndexHandle, IndexingEngine, InstallSyncError, InstalledItemRef,
    ItemIdentity, ItemRepository, ReindexJob, ResolvedItem, Result, TaskJob,
};
use installsync_jobs::JobError;

pub fn item(database: &str, item_id: &str, version: u32) -> ResolvedItem {
    ResolvedItem {
        identity: ItemIdentity::new(database, item_id, version),
        path: format!("/content/home/{item_id}"),
        template: "page".to_string(),
    }
}

pub fn item_ref(database: &str, item_id: &str, version: u32) -> InstalledItemRef {
    InstalledItemRef::new(database, item_id, version)
}

#[derive(Default)]
pub struct FakeRepository {
    pub databases: HashSet<String>,
    pub items: HashMap<(String, String, u32), ResolvedItem>,
    pub broken: HashSet<String>,
}

impl FakeRepository {
    pub fn with_databases(databases: &[&str]) -> Self {
        Self {
            databases: databases.iter().map(|db| db.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn insert(mut self, item: ResolvedItem) -> Self {
        let key = (
            item.identity.database.clone(),
            item.identity.item_id.clone(),
            item.identity.version,
        );
        self.items.insert(key, item);
        self
    }

    /// Resolution of `item_id` returns an error instead of an item.
    pub fn break_item(mut self, item_id: &str) -> Self {
        self.broken.insert(item_id.to_string());
        self
    }
}

impl ItemRepository for FakeRepository {
    fn configured_database_names(&self) -> HashSet<String> {
        self.databases.clone()
    }

    fn resolve(
        &self,
        database: &str,
        item_id: &str,
        version: u32,
    ) -> Result<Option<ResolvedItem>> {
        if self.broken.contains(item_id) {
            return Err(InstallSyncError::Repository(format!("{item_id} is locked")));
        }
        Ok(self
            .items
            .get(&(database.to_string(), item_id.to_string(), version))
            .cloned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    Error,
    Panic,
}

/// Job without a completion signal, finished by a background thread.
pub struct PolledJob {
    name: String,
    done: Arc<AtomicBool>,
}

impl ReindexJob for PolledJob {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

pub struct FakeEngine {
    pub routes: HashMap<String, String>,
    pub missing_indexes: HashSet<String>,
    pub rejecting_indexes: HashSet<String>,
    pub failing_jobs: HashSet<String>,
    pub polled_jobs: bool,
    pub job_delay: Duration,
    pub suspend_failure: Failure,
    pub resume_failure: Failure,
    pub submissions: Mutex<Vec<(String, Vec<ItemIdentity>)>>,
    pub jobs: Mutex<Vec<DynReindexJob>>,
    pub suspend_calls: AtomicUsize,
    pub resume_calls: AtomicUsize,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
            missing_indexes: HashSet::new(),
            rejecting_indexes: HashSet::new(),
            failing_jobs: HashSet::new(),
            polled_jobs: false,
            job_delay: Duration::from_millis(20),
            suspend_failure: Failure::None,
            resume_failure: Failure::None,
            submissions: Mutex::new(Vec::new()),
            jobs: Mutex::new(Vec::new()),
            suspend_calls: AtomicUsize::new(0),
            resume_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeEngine {
    pub fn route(mut self, item_id: &str, index_name: &str) -> Self {
        self.routes
            .insert(item_id.to_string(), index_name.to_string());
        self
    }

    pub fn submissions(&self) -> Vec<(String, Vec<ItemIdentity>)> {
        self.submissions.lock().expect("lock poisoned").clone()
    }

    pub fn all_jobs_done(&self) -> bool {
        self.jobs
            .lock()
            .expect("lock poisoned")
            .iter()
            .all(|job| job.is_done())
    }

    pub fn suspend_calls(&self) -> usize {
        self.suspend_calls.load(Ordering::SeqCst)
    }

    pub fn resume_calls(&self) -> usize {
        self.resume_calls.load(Ordering::SeqCst)
    }

    fn toggle(failure: Failure, action: &str) -> Result<()> {
        match failure {
            Failure::None => Ok(()),
            Failure::Error => Err(InstallSyncError::Engine(format!("{action} refused"))),
            Failure::Panic => panic!("{action} blew up"),
        }
    }
}

impl IndexingEngine for FakeEngine {
    fn route_to_index(&self, item: &ResolvedItem) -> Option<String> {
        self.routes.get(&item.identity.item_id).cloned()
    }

    fn get_index(&self, name: &str) -> Result<IndexHandle> {
        if self.missing_indexes.contains(name) {
            return Err(InstallSyncError::IndexNotFound(name.to_string()));
        }
        Ok(IndexHandle::new(name))
    }

    fn submit_forced_incremental_update(
        &self,
        index: &IndexHandle,
        items: Vec<ItemIdentity>,
    ) -> Result<DynReindexJob> {
        if self.rejecting_indexes.contains(&index.name) {
            return Err(InstallSyncError::Engine(format!(
                "{} is rebuilding",
                index.name
            )));
        }

        self.submissions
            .lock()
            .expect("lock poisoned")
            .push((index.name.clone(), items));

        let delay = self.job_delay;
        let job: DynReindexJob = if self.polled_jobs {
            let done = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&done);
            std::thread::spawn(move || {
                std::thread::sleep(delay);
                flag.store(true, Ordering::SeqCst);
            });
            Arc::new(PolledJob {
                name: index.name.clone(),
                done,
            })
        } else {
            let fail = self.failing_jobs.contains(&index.name);
            TaskJob::spawn(index.name.clone(), async move {
                tokio::time::sleep(delay).await;
                if fail {
                    return Err(JobError::Failed("crawler error".to_string()));
                }
                Ok(())
            })
            .into_dyn()
        };

        self.jobs
            .lock()
            .expect("lock poisoned")
            .push(Arc::clone(&job));
        Ok(job)
    }

    fn suspend(&self) -> Result<()> {
        self.suspend_calls.fetch_add(1, Ordering::SeqCst);
        Self::toggle(self.suspend_failure, "suspend")
    }

    fn resume(&self) -> Result<()> {
        self.resume_calls.fetch_add(1, Ordering::SeqCst);
        Self::toggle(self.resume_failure, "resume")
    }
}
