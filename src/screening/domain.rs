use serde::{Deserialize, Serialize};

/// Identifier wrapper for uploaded resumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResumeId(pub String);

/// Identifier wrapper for hiring roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub String);

/// Identifier wrapper for a role's criteria.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriterionId(pub String);

/// Discrete piece of evidence extracted from resume text.
///
/// Signals are owned by exactly one resume and are regenerated wholesale when
/// its source text changes; they are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub kind: SignalKind,
    pub value: String,
    pub evidence_snippet: String,
    pub confidence: Confidence,
}

/// The evidence categories the extractor can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    DateRange,
    ExperienceYearsEstimate,
    EducationLevelEstimate,
    KeywordMatch,
}

/// Qualitative reliability of an extracted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Education levels on the fixed ordinal scale used for partial credit.
///
/// `Unknown` is only ever produced by extraction; criterion configs must name
/// one of the five concrete levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    Unknown,
    Hs,
    Associate,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::Unknown => "UNKNOWN",
            EducationLevel::Hs => "HS",
            EducationLevel::Associate => "ASSOCIATE",
            EducationLevel::Bachelor => "BACHELOR",
            EducationLevel::Master => "MASTER",
            EducationLevel::Phd => "PHD",
        }
    }

    /// Parses a stored signal value; anything unrecognized is the weakest
    /// evidence rather than an error.
    pub fn from_label(raw: &str) -> Self {
        match raw {
            "HS" => EducationLevel::Hs,
            "ASSOCIATE" => EducationLevel::Associate,
            "BACHELOR" => EducationLevel::Bachelor,
            "MASTER" => EducationLevel::Master,
            "PHD" => EducationLevel::Phd,
            _ => EducationLevel::Unknown,
        }
    }

    /// Position on the partial-credit scale in [0.0, 1.0].
    pub const fn ordinal(self) -> f64 {
        match self {
            EducationLevel::Unknown => 0.0,
            EducationLevel::Hs => 0.25,
            EducationLevel::Associate => 0.45,
            EducationLevel::Bachelor => 0.65,
            EducationLevel::Master => 0.85,
            EducationLevel::Phd => 1.0,
        }
    }
}

/// A weighted, typed rule a resume is scored against. Scoped to one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub weight: u8,
    #[serde(flatten)]
    pub config: super::criteria::CriterionConfig,
}

/// Score and evidence for a single criterion within one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScoreResult {
    pub criterion_id: CriterionId,
    pub criterion_name: String,
    pub weight: u8,
    pub score: f64,
    pub evidence: Vec<String>,
}

/// Full per-criterion and aggregate scoring result for one (role, resume)
/// pair. Re-evaluation replaces the previous breakdown for the pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub criterion_scores: Vec<CriterionScoreResult>,
    pub total_score: f64,
    pub total_score_pct: f64,
}

/// Lifecycle of a stored evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationStatus {
    Created,
    Running,
    Completed,
    Failed,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::Created => "created",
            EvaluationStatus::Running => "running",
            EvaluationStatus::Completed => "completed",
            EvaluationStatus::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn education_labels_round_trip() {
        for level in [
            EducationLevel::Hs,
            EducationLevel::Associate,
            EducationLevel::Bachelor,
            EducationLevel::Master,
            EducationLevel::Phd,
        ] {
            assert_eq!(EducationLevel::from_label(level.label()), level);
        }
        assert_eq!(
            EducationLevel::from_label("BOOTCAMP"),
            EducationLevel::Unknown
        );
    }

    #[test]
    fn ordinal_scale_is_strictly_increasing() {
        let scale = [
            EducationLevel::Unknown,
            EducationLevel::Hs,
            EducationLevel::Associate,
            EducationLevel::Bachelor,
            EducationLevel::Master,
            EducationLevel::Phd,
        ];
        for pair in scale.windows(2) {
            assert!(pair[0].ordinal() < pair[1].ordinal());
        }
    }
}
