//! Dropout risk assessment
//!
//! Scores each trainee with additive weighted factors, clamps the result to
//! 0-100, maps it onto fixed risk bands, and derives support recommendations
//! from the triggered factors. All weights are overridable so the scoring
//! policy can be tuned or partially disabled without touching the engine.

use crate::models::{CourseRecord, EducationLevel, EmploymentStatus, Gender, TraineeRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Age below which the young-age factor applies
pub const YOUNG_AGE_CUTOFF: u32 = 20;

/// Age above which the older-age factor applies
pub const OLDER_AGE_CUTOFF: u32 = 35;

/// Substring marking a course as advanced
pub const ADVANCED_COURSE_MARKER: &str = "Advanced";

/// Risk level derived from the clamped score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    NoRisk,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Map a clamped 0-100 score onto its band
    pub fn from_score(score: u32) -> Self {
        match score {
            80..=u32::MAX => RiskLevel::VeryHigh,
            60..=79 => RiskLevel::High,
            40..=59 => RiskLevel::Medium,
            20..=39 => RiskLevel::Low,
            _ => RiskLevel::NoRisk,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::NoRisk => write!(f, "no_risk"),
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::VeryHigh => write!(f, "very_high"),
        }
    }
}

/// Additive score deltas for each risk rule
///
/// Negative deltas are silent adjustments: they lower the score but emit no
/// factor string. The `female` weight encodes a demographic generalization
/// and is an explicit policy parameter; set it to 0 to disable the rule and
/// its factor string entirely pending validation against real outcome data.
#[derive(Debug, Clone)]
pub struct RiskWeights {
    pub young_age: i32,
    pub older_age: i32,
    pub unemployed: i32,
    pub employed: i32,
    pub no_education: i32,
    pub primary_education: i32,
    pub tertiary_education: i32,
    pub female: i32,
    pub advanced_course: i32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            young_age: 25,
            older_age: 15,
            unemployed: 20,
            employed: -10,
            no_education: 30,
            primary_education: 20,
            tertiary_education: -15,
            female: 10,
            advanced_course: 15,
        }
    }
}

/// Risk assessment for a single trainee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropoutRiskAssessment {
    pub trainee_id: String,
    pub trainee_name: String,
    /// Clamped to 0-100 after all deltas are applied
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    /// Unix timestamp of when the assessment was produced
    pub generated_at: i64,
}

/// Scores trainees for dropout risk
pub struct RiskScorer {
    weights: RiskWeights,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self {
            weights: RiskWeights::default(),
        }
    }

    pub fn with_weights(weights: RiskWeights) -> Self {
        Self { weights }
    }

    /// Assess every trainee, preserving input order
    pub fn assess(
        &self,
        trainees: &[TraineeRecord],
        courses: &[CourseRecord],
    ) -> Vec<DropoutRiskAssessment> {
        let titles: HashMap<&str, &str> = courses
            .iter()
            .map(|c| (c.id.as_str(), c.title.as_str()))
            .collect();

        let assessments: Vec<_> = trainees
            .iter()
            .map(|trainee| self.assess_one(trainee, &titles))
            .collect();

        debug!(
            trainees = trainees.len(),
            flagged = assessments
                .iter()
                .filter(|a| a.risk_level >= RiskLevel::High)
                .count(),
            "Assessed dropout risk"
        );

        assessments
    }

    fn assess_one(
        &self,
        trainee: &TraineeRecord,
        titles: &HashMap<&str, &str>,
    ) -> DropoutRiskAssessment {
        let mut score: i32 = 0;
        let mut factors = Vec::new();

        if trainee.age < YOUNG_AGE_CUTOFF {
            score += self.weights.young_age;
            factors.push("Young age (under 20)".to_string());
        } else if trainee.age > OLDER_AGE_CUTOFF {
            score += self.weights.older_age;
            factors.push("Older age (over 35)".to_string());
        }

        match trainee.employment {
            EmploymentStatus::Unemployed => {
                score += self.weights.unemployed;
                factors.push("Unemployed status".to_string());
            }
            EmploymentStatus::Employed => {
                score += self.weights.employed;
            }
            _ => {}
        }

        match trainee.education {
            EducationLevel::None => {
                score += self.weights.no_education;
                factors.push("No formal education".to_string());
            }
            EducationLevel::Primary => {
                score += self.weights.primary_education;
                factors.push("Primary education only".to_string());
            }
            EducationLevel::Tertiary => {
                score += self.weights.tertiary_education;
            }
            _ => {}
        }

        if trainee.gender == Gender::Female && self.weights.female != 0 {
            score += self.weights.female;
            factors.push("Female (higher dropout rate)".to_string());
        }

        let advanced = trainee
            .course_id
            .as_deref()
            .and_then(|id| titles.get(id))
            .map(|title| title.contains(ADVANCED_COURSE_MARKER))
            .unwrap_or(false);
        if advanced {
            score += self.weights.advanced_course;
            factors.push("Advanced course difficulty".to_string());
        }

        let risk_score = score.clamp(0, 100) as u32;
        let risk_level = RiskLevel::from_score(risk_score);
        let recommendations = derive_recommendations(risk_level, &factors);

        DropoutRiskAssessment {
            trainee_id: trainee.id.clone(),
            trainee_name: trainee.full_name.clone(),
            risk_score,
            risk_level,
            factors,
            recommendations,
            generated_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map triggered factors and the overall level onto support recommendations
fn derive_recommendations(level: RiskLevel, factors: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();

    for factor in factors {
        let recommendation = match factor.as_str() {
            "Young age (under 20)" => "Pair with a peer support group",
            "Older age (over 35)" => "Offer flexible scheduling options",
            "Unemployed status" => "Connect with employment support services",
            "No formal education" => "Provide basic literacy support",
            "Primary education only" => "Schedule additional tutoring sessions",
            "Female (higher dropout rate)" => "Check in regularly with support staff",
            "Advanced course difficulty" => "Arrange prerequisite refresher modules",
            _ => continue,
        };
        recommendations.push(recommendation.to_string());
    }

    if level >= RiskLevel::High {
        recommendations.push("Assign a dedicated mentor".to_string());
        recommendations.push("Schedule weekly progress reviews".to_string());
    }

    recommendations
}
