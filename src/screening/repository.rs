use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::domain::{EvaluationStatus, ResumeId, RoleId, ScoreBreakdown, Signal};

/// Stored outcome of one (role, resume) evaluation run. At most one record
/// exists per pair; re-evaluation replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub role_id: RoleId,
    pub resume_id: ResumeId,
    pub status: EvaluationStatus,
    pub breakdown: Option<ScoreBreakdown>,
    pub explanation_text: String,
}

impl EvaluationRecord {
    pub fn ranking_view(&self) -> RankingEntry {
        let (total_score, total_score_pct) = match &self.breakdown {
            Some(breakdown) => (breakdown.total_score, breakdown.total_score_pct),
            None => (0.0, 0.0),
        };
        RankingEntry {
            resume_id: self.resume_id.clone(),
            status: self.status.label(),
            total_score,
            total_score_pct,
            explanation: self.explanation_text.clone(),
        }
    }
}

/// One row of a role's ranked listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub resume_id: ResumeId,
    pub status: &'static str,
    pub total_score: f64,
    pub total_score_pct: f64,
    pub explanation: String,
}

/// Storage abstraction for extracted signals, keyed by resume.
pub trait SignalRepository: Send + Sync {
    /// Replaces the resume's full signal set; signals are regenerated, never
    /// updated in place.
    fn replace_for_resume(
        &self,
        resume_id: &ResumeId,
        signals: Vec<Signal>,
    ) -> Result<(), RepositoryError>;
    fn fetch_for_resume(&self, resume_id: &ResumeId) -> Result<Vec<Signal>, RepositoryError>;
}

/// Storage abstraction for evaluation records, keyed by (role, resume).
pub trait EvaluationRepository: Send + Sync {
    fn upsert(&self, record: EvaluationRecord) -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        role_id: &RoleId,
        resume_id: &ResumeId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError>;
    fn for_role(&self, role_id: &RoleId) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// In-memory signal store backing the CLI and tests.
#[derive(Default)]
pub struct MemorySignalRepository {
    signals: Mutex<HashMap<ResumeId, Vec<Signal>>>,
}

impl SignalRepository for MemorySignalRepository {
    fn replace_for_resume(
        &self,
        resume_id: &ResumeId,
        signals: Vec<Signal>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.insert(resume_id.clone(), signals);
        Ok(())
    }

    fn fetch_for_resume(&self, resume_id: &ResumeId) -> Result<Vec<Signal>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(resume_id).cloned().unwrap_or_default())
    }
}

impl MemorySignalRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<ResumeId, Vec<Signal>>>, RepositoryError> {
        self.signals
            .lock()
            .map_err(|_| RepositoryError::Unavailable("signal store poisoned".to_string()))
    }
}

/// In-memory evaluation store backing the CLI and tests.
#[derive(Default)]
pub struct MemoryEvaluationRepository {
    records: Mutex<HashMap<(RoleId, ResumeId), EvaluationRecord>>,
}

impl EvaluationRepository for MemoryEvaluationRepository {
    fn upsert(&self, record: EvaluationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.insert(
            (record.role_id.clone(), record.resume_id.clone()),
            record,
        );
        Ok(())
    }

    fn fetch(
        &self,
        role_id: &RoleId,
        resume_id: &ResumeId,
    ) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(&(role_id.clone(), resume_id.clone())).cloned())
    }

    fn for_role(&self, role_id: &RoleId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.lock()?;
        let mut records: Vec<EvaluationRecord> = guard
            .values()
            .filter(|record| &record.role_id == role_id)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; give callers a stable base
        // ordering before they re-sort by score.
        records.sort_by(|a, b| a.resume_id.0.cmp(&b.resume_id.0));
        Ok(records)
    }
}

impl MemoryEvaluationRepository {
    #[allow(clippy::type_complexity)]
    fn lock(
        &self,
    ) -> Result<
        std::sync::MutexGuard<'_, HashMap<(RoleId, ResumeId), EvaluationRecord>>,
        RepositoryError,
    > {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("evaluation store poisoned".to_string()))
    }
}
