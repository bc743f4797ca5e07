use serde::{Deserialize, Serialize};

use super::domain::{Criterion, EducationLevel};

/// Upper bound on keywords a single criterion may configure.
pub const MAX_KEYWORDS_PER_CRITERION: usize = 50;

/// Upper bound on criteria attached to one role.
pub const MAX_CRITERIA_PER_ROLE: usize = 15;

/// Typed configuration payloads, one variant per supported criterion kind.
///
/// The serde tag doubles as the wire-format discriminator, so a payload with
/// an unrecognized `type` is rejected loudly at deserialization time and can
/// never reach the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionConfig {
    KeywordSkill(KeywordSkillConfig),
    CustomKeywords(CustomKeywordsConfig),
    ExperienceYears(ExperienceYearsConfig),
    EducationLevel(EducationLevelConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSkillConfig {
    pub required_keywords: Vec<String>,
    #[serde(default)]
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomKeywordsConfig {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceYearsConfig {
    pub required_years: f64,
    /// Informational only; listed titles are not scored.
    #[serde(default)]
    pub target_titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationLevelConfig {
    pub minimum_level: EducationLevel,
}

/// Declared matching intent for keyword criteria. Both modes score as
/// fractional coverage; see `scoring`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMode {
    #[default]
    Any,
    All,
}

impl CriterionConfig {
    /// Structural validation run at creation/update time, before a config is
    /// persisted or scored. Never re-derives anything from resume content.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match self {
            CriterionConfig::KeywordSkill(config) => {
                validate_keyword_list("requiredKeywords", &config.required_keywords)
            }
            CriterionConfig::CustomKeywords(config) => {
                validate_keyword_list("keywords", &config.keywords)
            }
            CriterionConfig::ExperienceYears(config) => {
                let years = config.required_years;
                if !years.is_finite() || !(0.0..=50.0).contains(&years) {
                    return Err(ConfigValidationError::RequiredYearsOutOfRange { years });
                }
                Ok(())
            }
            CriterionConfig::EducationLevel(config) => {
                if config.minimum_level == EducationLevel::Unknown {
                    return Err(ConfigValidationError::UnknownMinimumLevel);
                }
                Ok(())
            }
        }
    }
}

fn validate_keyword_list(
    field: &'static str,
    keywords: &[String],
) -> Result<(), ConfigValidationError> {
    if keywords.is_empty() || keywords.len() > MAX_KEYWORDS_PER_CRITERION {
        return Err(ConfigValidationError::KeywordCount {
            field,
            count: keywords.len(),
        });
    }
    if keywords.iter().any(|keyword| keyword.trim().is_empty()) {
        return Err(ConfigValidationError::BlankKeyword { field });
    }
    Ok(())
}

/// Validates a role's full criteria set ahead of an evaluation run.
pub fn validate_criteria(criteria: &[Criterion]) -> Result<(), ConfigValidationError> {
    if criteria.len() > MAX_CRITERIA_PER_ROLE {
        return Err(ConfigValidationError::TooManyCriteria {
            count: criteria.len(),
        });
    }
    for criterion in criteria {
        if criterion.weight > 100 {
            return Err(ConfigValidationError::WeightOutOfRange {
                weight: criterion.weight,
            });
        }
        criterion.config.validate()?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("{field} must have 1-{MAX_KEYWORDS_PER_CRITERION} items, got {count}")]
    KeywordCount { field: &'static str, count: usize },
    #[error("{field} must not contain blank entries")]
    BlankKeyword { field: &'static str },
    #[error("requiredYears must be between 0 and 50, got {years}")]
    RequiredYearsOutOfRange { years: f64 },
    #[error("minimumLevel must be one of HS, ASSOCIATE, BACHELOR, MASTER, PHD")]
    UnknownMinimumLevel,
    #[error("criterion weight must be between 0 and 100, got {weight}")]
    WeightOutOfRange { weight: u8 },
    #[error("at most {MAX_CRITERIA_PER_ROLE} criteria allowed per role, got {count}")]
    TooManyCriteria { count: usize },
}
