use std::sync::Arc;

use chrono::NaiveDate;

use super::aggregate::{evaluate_resume, EvaluationError, WeightPolicy};
use super::criteria::{validate_criteria, ConfigValidationError};
use super::domain::{Criterion, EvaluationStatus, ResumeId, RoleId, ScoreBreakdown, Signal};
use super::explain::explain_comparison;
use super::extract::{extract_keyword_matches, extract_signals};
use super::normalize::normalize;
use super::repository::{
    EvaluationRecord, EvaluationRepository, RankingEntry, RepositoryError, SignalRepository,
};

/// Service composing extraction, the scoring engine, and the storage seams.
///
/// The engine itself is pure; this layer owns the policy decisions (weight
/// enforcement) and the persistence choreography (signal regeneration,
/// breakdown upserts).
pub struct ScreeningService<S, E> {
    signals: Arc<S>,
    evaluations: Arc<E>,
    weight_policy: WeightPolicy,
}

impl<S, E> ScreeningService<S, E>
where
    S: SignalRepository + 'static,
    E: EvaluationRepository + 'static,
{
    pub fn new(signals: Arc<S>, evaluations: Arc<E>, weight_policy: WeightPolicy) -> Self {
        Self {
            signals,
            evaluations,
            weight_policy,
        }
    }

    /// Extracts and persists the resume's signals, replacing any prior set.
    /// Optional keywords (typically a role's configured skills) are matched
    /// and stored alongside the date and education signals.
    pub fn ingest(
        &self,
        resume_id: &ResumeId,
        resume_text: &str,
        keywords: &[String],
        today: NaiveDate,
    ) -> Result<Vec<Signal>, ScreeningServiceError> {
        let mut signals = extract_signals(resume_text, today);
        if !keywords.is_empty() {
            let normalized = normalize(resume_text);
            signals.extend(extract_keyword_matches(resume_text, &normalized, keywords));
        }

        self.signals.replace_for_resume(resume_id, signals.clone())?;
        tracing::info!(
            resume = %resume_id.0,
            signal_count = signals.len(),
            "resume signals regenerated"
        );
        Ok(signals)
    }

    /// Scores one resume against a role's criteria and stores the breakdown,
    /// replacing any previous evaluation of the pair.
    pub fn evaluate(
        &self,
        role_id: &RoleId,
        resume_id: &ResumeId,
        criteria: &[Criterion],
        resume_text: &str,
    ) -> Result<ScoreBreakdown, ScreeningServiceError> {
        validate_criteria(criteria)?;

        let signals = self.signals.fetch_for_resume(resume_id)?;

        match evaluate_resume(criteria, resume_text, &signals, self.weight_policy) {
            Ok(breakdown) => {
                let explanation = format!(
                    "Scored {}% based on {} criteria",
                    breakdown.total_score_pct,
                    criteria.len()
                );
                self.evaluations.upsert(EvaluationRecord {
                    role_id: role_id.clone(),
                    resume_id: resume_id.clone(),
                    status: EvaluationStatus::Completed,
                    breakdown: Some(breakdown.clone()),
                    explanation_text: explanation,
                })?;
                Ok(breakdown)
            }
            Err(error) => {
                self.evaluations.upsert(EvaluationRecord {
                    role_id: role_id.clone(),
                    resume_id: resume_id.clone(),
                    status: EvaluationStatus::Failed,
                    breakdown: None,
                    explanation_text: error.to_string(),
                })?;
                Err(error.into())
            }
        }
    }

    /// Completed evaluations for a role, ordered by total score descending.
    /// Ties keep the repository's stable base order.
    pub fn rankings(&self, role_id: &RoleId) -> Result<Vec<RankingEntry>, ScreeningServiceError> {
        let mut records = self.evaluations.for_role(role_id)?;
        records.retain(|record| {
            record.status == EvaluationStatus::Completed && record.breakdown.is_some()
        });
        records.sort_by(|a, b| {
            let left = a.breakdown.as_ref().map_or(0.0, |p| p.total_score);
            let right = b.breakdown.as_ref().map_or(0.0, |p| p.total_score);
            right.total_cmp(&left)
        });
        Ok(records.iter().map(EvaluationRecord::ranking_view).collect())
    }

    /// Fetches two stored breakdowns for the role and renders the comparison.
    pub fn compare(
        &self,
        role_id: &RoleId,
        left_resume_id: &ResumeId,
        right_resume_id: &ResumeId,
    ) -> Result<ResumeComparison, ScreeningServiceError> {
        let left = self.completed_breakdown(role_id, left_resume_id)?;
        let right = self.completed_breakdown(role_id, right_resume_id)?;

        let explanation = explain_comparison(&left, &right);
        Ok(ResumeComparison {
            left_resume_id: left_resume_id.clone(),
            right_resume_id: right_resume_id.clone(),
            left_breakdown: left,
            right_breakdown: right,
            explanation,
        })
    }

    fn completed_breakdown(
        &self,
        role_id: &RoleId,
        resume_id: &ResumeId,
    ) -> Result<ScoreBreakdown, ScreeningServiceError> {
        let record = self
            .evaluations
            .fetch(role_id, resume_id)?
            .ok_or(RepositoryError::NotFound)?;
        record
            .breakdown
            .ok_or(RepositoryError::NotFound)
            .map_err(Into::into)
    }
}

/// Comparison payload: both breakdowns plus the rendered justification.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeComparison {
    pub left_resume_id: ResumeId,
    pub right_resume_id: ResumeId,
    pub left_breakdown: ScoreBreakdown,
    pub right_breakdown: ScoreBreakdown,
    pub explanation: String,
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Config(#[from] ConfigValidationError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
