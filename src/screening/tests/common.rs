use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::screening::aggregate::WeightPolicy;
use crate::screening::criteria::{
    CriterionConfig, CustomKeywordsConfig, EducationLevelConfig, ExperienceYearsConfig,
    KeywordSkillConfig, MatchMode,
};
use crate::screening::domain::{
    Confidence, Criterion, CriterionId, EducationLevel, ResumeId, RoleId, Signal, SignalKind,
};
use crate::screening::repository::{
    MemoryEvaluationRepository, MemorySignalRepository, RepositoryError, SignalRepository,
};
use crate::screening::service::ScreeningService;

pub(super) fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid reference date")
}

pub(super) fn sample_resume_text() -> &'static str {
    "I have extensive Java experience with Spring framework. \
     Software Engineer at Acme, Jan 2018 - Dec 2020. \
     Bachelor of Science in Computer Science."
}

pub(super) fn keyword_criterion(
    id: &str,
    name: &str,
    weight: u8,
    keywords: &[&str],
    match_mode: MatchMode,
) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        name: name.to_string(),
        weight,
        config: CriterionConfig::KeywordSkill(KeywordSkillConfig {
            required_keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
            match_mode,
        }),
    }
}

pub(super) fn custom_keywords_criterion(
    id: &str,
    name: &str,
    weight: u8,
    keywords: &[&str],
    match_mode: MatchMode,
) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        name: name.to_string(),
        weight,
        config: CriterionConfig::CustomKeywords(CustomKeywordsConfig {
            keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
            match_mode,
        }),
    }
}

pub(super) fn experience_criterion(id: &str, weight: u8, required_years: f64) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        name: "Years of experience".to_string(),
        weight,
        config: CriterionConfig::ExperienceYears(ExperienceYearsConfig {
            required_years,
            target_titles: Vec::new(),
        }),
    }
}

pub(super) fn education_criterion(id: &str, weight: u8, minimum_level: EducationLevel) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        name: "Education".to_string(),
        weight,
        config: CriterionConfig::EducationLevel(EducationLevelConfig { minimum_level }),
    }
}

pub(super) fn experience_signals(years: &str, range_snippets: &[&str]) -> Vec<Signal> {
    let mut signals = vec![Signal {
        kind: SignalKind::ExperienceYearsEstimate,
        value: years.to_string(),
        evidence_snippet: range_snippets.first().unwrap_or(&"").to_string(),
        confidence: Confidence::Medium,
    }];
    for snippet in range_snippets {
        signals.push(Signal {
            kind: SignalKind::DateRange,
            value: snippet.to_string(),
            evidence_snippet: snippet.to_string(),
            confidence: Confidence::High,
        });
    }
    signals
}

pub(super) fn education_signal(level: EducationLevel) -> Signal {
    Signal {
        kind: SignalKind::EducationLevelEstimate,
        value: level.label().to_string(),
        evidence_snippet: format!("{} in Computer Science", level.label()),
        confidence: Confidence::High,
    }
}

pub(super) type MemoryService = ScreeningService<MemorySignalRepository, MemoryEvaluationRepository>;

pub(super) fn build_service(
    policy: WeightPolicy,
) -> (
    MemoryService,
    Arc<MemorySignalRepository>,
    Arc<MemoryEvaluationRepository>,
) {
    let signals = Arc::new(MemorySignalRepository::default());
    let evaluations = Arc::new(MemoryEvaluationRepository::default());
    let service = ScreeningService::new(signals.clone(), evaluations.clone(), policy);
    (service, signals, evaluations)
}

pub(super) fn resume(id: &str) -> ResumeId {
    ResumeId(id.to_string())
}

pub(super) fn role(id: &str) -> RoleId {
    RoleId(id.to_string())
}

pub(super) struct UnavailableSignalRepository;

impl SignalRepository for UnavailableSignalRepository {
    fn replace_for_resume(
        &self,
        _resume_id: &ResumeId,
        _signals: Vec<Signal>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }

    fn fetch_for_resume(&self, _resume_id: &ResumeId) -> Result<Vec<Signal>, RepositoryError> {
        Err(RepositoryError::Unavailable("signal store offline".to_string()))
    }
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
