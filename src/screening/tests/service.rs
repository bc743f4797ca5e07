use std::sync::Arc;

use super::common::*;
use crate::screening::aggregate::WeightPolicy;
use crate::screening::criteria::MatchMode;
use crate::screening::domain::{EvaluationStatus, SignalKind};
use crate::screening::repository::{EvaluationRepository, MemoryEvaluationRepository, SignalRepository};
use crate::screening::service::{ScreeningService, ScreeningServiceError};

#[test]
fn ingest_persists_the_regenerated_signal_set() {
    let (service, signal_repo, _) = build_service(WeightPolicy::Ignore);
    let resume_id = resume("r-1");

    let signals = service
        .ingest(&resume_id, sample_resume_text(), &[], fixed_today())
        .expect("ingest succeeds");
    assert!(!signals.is_empty());

    let stored = signal_repo
        .fetch_for_resume(&resume_id)
        .expect("fetch succeeds");
    assert_eq!(stored, signals);
    assert!(stored
        .iter()
        .any(|signal| signal.kind == SignalKind::ExperienceYearsEstimate));
    assert!(stored
        .iter()
        .any(|signal| signal.kind == SignalKind::EducationLevelEstimate));
}

#[test]
fn reingest_replaces_rather_than_appends() {
    let (service, signal_repo, _) = build_service(WeightPolicy::Ignore);
    let resume_id = resume("r-1");

    service
        .ingest(&resume_id, sample_resume_text(), &[], fixed_today())
        .expect("first ingest");
    service
        .ingest(&resume_id, "no dates here", &[], fixed_today())
        .expect("second ingest");

    let stored = signal_repo
        .fetch_for_resume(&resume_id)
        .expect("fetch succeeds");
    assert!(
        stored
            .iter()
            .all(|signal| signal.kind != SignalKind::DateRange),
        "stale date signals must not survive reingestion"
    );
}

#[test]
fn ingest_with_keywords_stores_keyword_matches() {
    let (service, signal_repo, _) = build_service(WeightPolicy::Ignore);
    let resume_id = resume("r-1");

    service
        .ingest(
            &resume_id,
            sample_resume_text(),
            &["Java".to_string(), "Terraform".to_string()],
            fixed_today(),
        )
        .expect("ingest succeeds");

    let stored = signal_repo
        .fetch_for_resume(&resume_id)
        .expect("fetch succeeds");
    let keyword_values: Vec<_> = stored
        .iter()
        .filter(|signal| signal.kind == SignalKind::KeywordMatch)
        .map(|signal| signal.value.as_str())
        .collect();
    assert_eq!(keyword_values, vec!["Java"]);
}

#[test]
fn evaluate_stores_a_completed_record_with_summary_text() {
    let (service, _, evaluation_repo) = build_service(WeightPolicy::Ignore);
    let resume_id = resume("r-1");
    let role_id = role("role-1");
    let criteria = vec![keyword_criterion(
        "kw-1",
        "Backend stack",
        50,
        &["Java", "Spring", "Hibernate"],
        MatchMode::Any,
    )];

    service
        .ingest(&resume_id, sample_resume_text(), &[], fixed_today())
        .expect("ingest succeeds");
    let breakdown = service
        .evaluate(&role_id, &resume_id, &criteria, sample_resume_text())
        .expect("evaluation succeeds");
    assert_eq!(breakdown.total_score_pct, 33.3);

    let record = evaluation_repo
        .fetch(&role_id, &resume_id)
        .expect("fetch succeeds")
        .expect("record stored");
    assert_eq!(record.status, EvaluationStatus::Completed);
    assert_eq!(record.status.label(), "completed");
    assert_eq!(record.explanation_text, "Scored 33.3% based on 1 criteria");
    assert_eq!(record.breakdown, Some(breakdown));
}

#[test]
fn reevaluation_keeps_at_most_one_record_per_pair() {
    let (service, _, evaluation_repo) = build_service(WeightPolicy::Ignore);
    let resume_id = resume("r-1");
    let role_id = role("role-1");

    service
        .ingest(&resume_id, sample_resume_text(), &[], fixed_today())
        .expect("ingest succeeds");

    let strict = vec![keyword_criterion("kw-1", "Stack", 100, &["Rust"], MatchMode::Any)];
    let lenient = vec![keyword_criterion("kw-1", "Stack", 100, &["Java"], MatchMode::Any)];

    service
        .evaluate(&role_id, &resume_id, &strict, sample_resume_text())
        .expect("first evaluation");
    service
        .evaluate(&role_id, &resume_id, &lenient, sample_resume_text())
        .expect("second evaluation");

    let records = evaluation_repo.for_role(&role_id).expect("list succeeds");
    assert_eq!(records.len(), 1, "upsert must replace the prior breakdown");
    let breakdown = records[0].breakdown.as_ref().expect("breakdown stored");
    assert_eq!(breakdown.total_score, 1.0);
}

#[test]
fn invalid_config_is_rejected_before_scoring() {
    let (service, _, evaluation_repo) = build_service(WeightPolicy::Ignore);
    let resume_id = resume("r-1");
    let role_id = role("role-1");
    let criteria = vec![keyword_criterion("kw-1", "Stack", 50, &[], MatchMode::Any)];

    let error = service
        .evaluate(&role_id, &resume_id, &criteria, sample_resume_text())
        .expect_err("empty keyword list must be rejected");
    assert!(matches!(error, ScreeningServiceError::Config(_)));

    let records = evaluation_repo.for_role(&role_id).expect("list succeeds");
    assert!(records.is_empty(), "rejected configs must not leave records");
}

#[test]
fn weight_mismatch_under_enforce_stores_a_failed_record() {
    let (service, _, evaluation_repo) = build_service(WeightPolicy::Enforce);
    let resume_id = resume("r-1");
    let role_id = role("role-1");
    let criteria = vec![keyword_criterion("kw-1", "Stack", 60, &["Java"], MatchMode::Any)];

    let error = service
        .evaluate(&role_id, &resume_id, &criteria, sample_resume_text())
        .expect_err("weight mismatch must fail");
    assert!(matches!(error, ScreeningServiceError::Evaluation(_)));

    let record = evaluation_repo
        .fetch(&role_id, &resume_id)
        .expect("fetch succeeds")
        .expect("failed record stored");
    assert_eq!(record.status, EvaluationStatus::Failed);
    assert!(record.breakdown.is_none());
    assert!(record.explanation_text.contains("sum to 100"));
}

#[test]
fn rankings_order_by_total_score_descending() {
    let (service, _, _) = build_service(WeightPolicy::Ignore);
    let role_id = role("role-1");
    let criteria = vec![keyword_criterion(
        "kw-1",
        "Stack",
        100,
        &["Java", "Spring"],
        MatchMode::Any,
    )];

    for (id, text) in [
        ("r-weak", "Python shop"),
        ("r-strong", "Java and Spring every day"),
        ("r-middle", "some Java exposure"),
    ] {
        let resume_id = resume(id);
        service
            .ingest(&resume_id, text, &[], fixed_today())
            .expect("ingest succeeds");
        service
            .evaluate(&role_id, &resume_id, &criteria, text)
            .expect("evaluation succeeds");
    }

    let rankings = service.rankings(&role_id).expect("rankings succeed");
    let ordered: Vec<_> = rankings
        .iter()
        .map(|entry| entry.resume_id.0.as_str())
        .collect();
    assert_eq!(ordered, vec!["r-strong", "r-middle", "r-weak"]);
    assert!(rankings[0].total_score >= rankings[1].total_score);
    assert_eq!(rankings[0].status, "completed");
}

#[test]
fn rankings_skip_failed_evaluations() {
    let (service, _, _) = build_service(WeightPolicy::Enforce);
    let role_id = role("role-1");

    let balanced = vec![keyword_criterion("kw-1", "Stack", 100, &["Java"], MatchMode::Any)];
    let unbalanced = vec![keyword_criterion("kw-1", "Stack", 60, &["Java"], MatchMode::Any)];

    let good = resume("r-good");
    service
        .ingest(&good, "Java", &[], fixed_today())
        .expect("ingest succeeds");
    service
        .evaluate(&role_id, &good, &balanced, "Java")
        .expect("evaluation succeeds");

    let bad = resume("r-bad");
    service
        .ingest(&bad, "Java", &[], fixed_today())
        .expect("ingest succeeds");
    service
        .evaluate(&role_id, &bad, &unbalanced, "Java")
        .expect_err("weight mismatch fails");

    let rankings = service.rankings(&role_id).expect("rankings succeed");
    assert_eq!(rankings.len(), 1);
    assert_eq!(rankings[0].resume_id.0, "r-good");
}

#[test]
fn compare_renders_the_stored_breakdowns() {
    let (service, _, _) = build_service(WeightPolicy::Ignore);
    let role_id = role("role-1");
    let criteria = vec![keyword_criterion(
        "kw-1",
        "Backend stack",
        100,
        &["Java", "Spring"],
        MatchMode::Any,
    )];

    let strong = resume("r-strong");
    service
        .ingest(&strong, "Java and Spring", &[], fixed_today())
        .expect("ingest succeeds");
    service
        .evaluate(&role_id, &strong, &criteria, "Java and Spring")
        .expect("evaluation succeeds");

    let weak = resume("r-weak");
    service
        .ingest(&weak, "Java only", &[], fixed_today())
        .expect("ingest succeeds");
    service
        .evaluate(&role_id, &weak, &criteria, "Java only")
        .expect("evaluation succeeds");

    let comparison = service
        .compare(&role_id, &strong, &weak)
        .expect("comparison succeeds");
    assert!(comparison
        .explanation
        .starts_with("Resume A scored higher due to: "));
    assert!(comparison.explanation.contains("Backend stack"));

    let mirrored = service
        .compare(&role_id, &weak, &strong)
        .expect("comparison succeeds");
    assert!(mirrored
        .explanation
        .starts_with("Resume B scored higher due to: "));
}

#[test]
fn compare_requires_both_breakdowns() {
    let (service, _, _) = build_service(WeightPolicy::Ignore);
    let role_id = role("role-1");

    let error = service
        .compare(&role_id, &resume("r-x"), &resume("r-y"))
        .expect_err("missing breakdowns must not compare");
    assert!(matches!(error, ScreeningServiceError::Repository(_)));
}

#[test]
fn repository_failures_surface_as_service_errors() {
    let service = ScreeningService::new(
        Arc::new(UnavailableSignalRepository),
        Arc::new(MemoryEvaluationRepository::default()),
        WeightPolicy::Ignore,
    );

    let error = service
        .ingest(&resume("r-1"), "text", &[], fixed_today())
        .expect_err("offline store must error");
    assert!(matches!(error, ScreeningServiceError::Repository(_)));
}
