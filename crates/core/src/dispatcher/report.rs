use installsync_jobs::JobOutcome;

/// Why refs did not make it into any group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanStats {
    pub requested: usize,
    pub unconfigured_database: usize,
    pub unresolved: usize,
    pub excluded: usize,
    pub duplicates: usize,
}

impl PlanStats {
    pub fn dropped(&self) -> usize {
        self.unconfigured_database + self.unresolved + self.excluded + self.duplicates
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    pub index_name: String,
    pub item_count: usize,
    pub outcome: JobOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub plan: PlanStats,
    /// Groups whose index could not be opened or whose job was rejected.
    pub skipped_groups: usize,
    pub jobs: Vec<SubmittedJob>,
}

impl ReconcileReport {
    pub fn submitted_items(&self) -> usize {
        self.jobs.iter().map(|job| job.item_count).sum()
    }

    pub fn failed_jobs(&self) -> usize {
        self.jobs.iter().filter(|job| job.outcome.is_failure()).count()
    }
}
