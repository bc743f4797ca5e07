//! Deterministic resume screening: signal extraction, criterion scoring,
//! weighted aggregation, and comparison explanations.
//!
//! Every component here is a pure, synchronous computation over immutable
//! inputs; identical text, criteria, signals, and reference date always
//! produce identical output. Persistence and transport live behind the
//! `repository` traits and the `router`, so scoring many resumes against a
//! role can fan out across workers with no shared state.

pub mod aggregate;
pub mod criteria;
pub mod domain;
pub mod explain;
pub mod extract;
pub mod normalize;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::{evaluate_resume, weight_total, EvaluationError, WeightPolicy};
pub use criteria::{
    validate_criteria, ConfigValidationError, CriterionConfig, CustomKeywordsConfig,
    EducationLevelConfig, ExperienceYearsConfig, KeywordSkillConfig, MatchMode,
    MAX_CRITERIA_PER_ROLE, MAX_KEYWORDS_PER_CRITERION,
};
pub use domain::{
    Confidence, Criterion, CriterionId, CriterionScoreResult, EducationLevel, EvaluationStatus,
    ResumeId, RoleId, ScoreBreakdown, Signal, SignalKind,
};
pub use explain::explain_comparison;
pub use extract::{extract_keyword_matches, extract_signals};
pub use normalize::normalize;
pub use repository::{
    EvaluationRecord, EvaluationRepository, MemoryEvaluationRepository, MemorySignalRepository,
    RankingEntry, RepositoryError, SignalRepository,
};
pub use router::screening_router;
pub use service::{ResumeComparison, ScreeningService, ScreeningServiceError};
