//! Performance optimization targets
//!
//! Gap analysis of four tracked programme metrics against fixed targets.
//! Three of the current values are hard-coded placeholders pending real
//! aggregations; they are public named constants so callers and tests can
//! assert the exact figures until the computations land.

use crate::models::{CentreRecord, CourseRecord, Gender, TraineeRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Placeholder current completion rate, pending a real aggregation over
/// completion flags
pub const COMPLETION_RATE_CURRENT: f64 = 75.0;

/// Placeholder current resource utilization, pending centre-level usage data
pub const RESOURCE_UTILIZATION_CURRENT: f64 = 65.0;

/// Placeholder current employment outcome rate, pending post-programme
/// follow-up data
pub const EMPLOYMENT_OUTCOME_CURRENT: f64 = 60.0;

/// Tracked optimization metrics, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMetric {
    CompletionRate,
    ResourceUtilization,
    GenderBalance,
    EmploymentOutcome,
}

impl std::fmt::Display for OptimizationMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizationMetric::CompletionRate => write!(f, "completion_rate"),
            OptimizationMetric::ResourceUtilization => write!(f, "resource_utilization"),
            OptimizationMetric::GenderBalance => write!(f, "gender_balance"),
            OptimizationMetric::EmploymentOutcome => write!(f, "employment_outcome"),
        }
    }
}

/// Priority assigned to closing a metric's gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Gap analysis result for one tracked metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceOptimization {
    pub metric: OptimizationMetric,
    pub current_value: f64,
    pub target_value: f64,
    /// Signed target-minus-current gap; absolute for gender balance, where
    /// overshooting the 50% target in either direction is equally off
    pub improvement_gap: f64,
    pub recommendations: Vec<String>,
    pub priority: Priority,
}

/// Computes optimization targets for the tracked programme metrics
pub struct Optimizer;

impl Optimizer {
    pub fn new() -> Self {
        Self
    }

    /// Always returns exactly one entry per tracked metric
    pub fn targets(
        &self,
        trainees: &[TraineeRecord],
        _centres: &[CentreRecord],
        _courses: &[CourseRecord],
    ) -> Vec<PerformanceOptimization> {
        let gender_balance = gender_balance_percent(trainees);

        debug!(
            trainees = trainees.len(),
            gender_balance = gender_balance,
            "Computing optimization targets"
        );

        vec![
            gap_metric(
                OptimizationMetric::CompletionRate,
                COMPLETION_RATE_CURRENT,
                85.0,
                10.0,
                Priority::Medium,
                &[
                    "Introduce milestone-based progress tracking",
                    "Identify and support struggling trainees early",
                ],
            ),
            gap_metric(
                OptimizationMetric::ResourceUtilization,
                RESOURCE_UTILIZATION_CURRENT,
                80.0,
                15.0,
                Priority::Medium,
                &[
                    "Rebalance trainee allocation across centres",
                    "Schedule equipment usage in shifts",
                ],
            ),
            balance_metric(gender_balance),
            gap_metric(
                OptimizationMetric::EmploymentOutcome,
                EMPLOYMENT_OUTCOME_CURRENT,
                70.0,
                15.0,
                Priority::Medium,
                &[
                    "Strengthen employer partnership programs",
                    "Add job-readiness workshops to the curriculum",
                ],
            ),
        ]
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentage of female trainees, rounded to two decimals; 0 for an empty
/// cohort rather than a division by zero
pub fn gender_balance_percent(trainees: &[TraineeRecord]) -> f64 {
    if trainees.is_empty() {
        return 0.0;
    }
    let female = trainees.iter().filter(|t| t.gender == Gender::Female).count();
    let percent = 100.0 * female as f64 / trainees.len() as f64;
    (percent * 100.0).round() / 100.0
}

/// Build a metric whose gap is the signed target-minus-current difference
fn gap_metric(
    metric: OptimizationMetric,
    current: f64,
    target: f64,
    threshold: f64,
    below_threshold_priority: Priority,
    recommendations: &[&str],
) -> PerformanceOptimization {
    let gap = target - current;
    let exceeded = gap > threshold;

    PerformanceOptimization {
        metric,
        current_value: current,
        target_value: target,
        improvement_gap: gap,
        recommendations: if exceeded {
            recommendations.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        },
        priority: if exceeded {
            Priority::High
        } else {
            below_threshold_priority
        },
    }
}

/// Gender balance uses an absolute gap and a low fallback priority
fn balance_metric(current: f64) -> PerformanceOptimization {
    let target = 50.0;
    let gap = (target - current).abs();
    let exceeded = gap > 20.0;

    PerformanceOptimization {
        metric: OptimizationMetric::GenderBalance,
        current_value: current,
        target_value: target,
        improvement_gap: gap,
        recommendations: if exceeded {
            vec![
                "Run targeted outreach for the underrepresented gender".to_string(),
                "Review admission pipeline for bias".to_string(),
            ]
        } else {
            Vec::new()
        },
        priority: if exceeded { Priority::High } else { Priority::Low },
    }
}
