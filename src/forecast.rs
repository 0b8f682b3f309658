//! Enrollment forecasting
//!
//! Derives a monthly enrollment series from trainee registration timestamps,
//! fits an ordinary-least-squares trend over it, and projects future periods
//! with a fixed seasonal multiplier cycle. Confidence decays with horizon
//! distance and with trend instability.

use crate::models::TraineeRecord;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Fixed seasonal multiplier cycle, indexed by `(step - 1) % 12`
pub const SEASONAL_FACTORS: [f64; 12] = [
    1.1, 0.9, 0.95, 1.05, 1.0, 0.8, 0.85, 1.2, 1.15, 1.0, 0.9, 1.05,
];

/// Synthetic baseline series used when the trainee data carries no usable
/// temporal signal (fewer than two observed enrollment months).
///
/// Known limitation: forecasts produced from this baseline reflect canned
/// history, not the programme's actual intake.
pub const SYNTHETIC_BASELINE: [f64; 6] = [30.0, 35.0, 32.0, 40.0, 38.0, 45.0];

/// Legacy period label table; the last entry is reused for steps beyond 4
pub const PERIOD_LABELS: [&str; 4] = ["Next Month", "Next Quarter", "Next Semester", "Next Year"];

/// Confidence assigned when the computed value is not finite
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Slope magnitude above which the trend is no longer considered stable
const TREND_SLOPE_THRESHOLD: f64 = 0.1;

/// Direction of the fitted enrollment trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Strategy for naming forecast periods
///
/// `Legacy` reproduces the dashboard's historical 4-entry label table, reusing
/// the last label for every step beyond the fourth. `MonthIndex` labels each
/// step "Month N" instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodLabeling {
    #[default]
    Legacy,
    MonthIndex,
}

impl PeriodLabeling {
    /// Label for forecast step `step` (1-based)
    pub fn label(&self, step: usize) -> String {
        match self {
            PeriodLabeling::Legacy => {
                let idx = step.saturating_sub(1).min(PERIOD_LABELS.len() - 1);
                PERIOD_LABELS[idx].to_string()
            }
            PeriodLabeling::MonthIndex => format!("Month {}", step),
        }
    }
}

/// Configuration for enrollment forecasting
#[derive(Debug, Clone, Default)]
pub struct ForecastConfig {
    /// Period naming strategy (default: legacy label table)
    pub labeling: PeriodLabeling,
}

/// Predicted enrollment for one future period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentForecast {
    pub period: String,
    pub predicted_enrollment: u32,
    pub confidence: f64,
    pub trend: TrendDirection,
    pub factors: Vec<String>,
}

/// Projects future enrollment from historical registration counts
pub struct EnrollmentForecaster {
    config: ForecastConfig,
}

impl EnrollmentForecaster {
    pub fn new() -> Self {
        Self {
            config: ForecastConfig::default(),
        }
    }

    pub fn with_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Produce one forecast entry per requested month
    ///
    /// Returns exactly `horizon_months` entries; an empty vector for a zero
    /// horizon.
    pub fn forecast(&self, trainees: &[TraineeRecord], horizon_months: usize) -> Vec<EnrollmentForecast> {
        let series = self.historical_series(trainees);
        let slope = sanitize(linear_regression_slope(&series));
        let last_observed = series.last().copied().unwrap_or(0.0);

        debug!(
            observed_months = series.len(),
            slope = slope,
            horizon_months = horizon_months,
            "Fitted enrollment trend"
        );

        (1..=horizon_months)
            .map(|step| self.project_step(step, last_observed, slope))
            .collect()
    }

    /// Monthly enrollment counts, or the synthetic baseline when the data
    /// carries no usable temporal signal
    fn historical_series(&self, trainees: &[TraineeRecord]) -> Vec<f64> {
        let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for trainee in trainees {
            let key = (trainee.enrolled_at.year(), trainee.enrolled_at.month());
            *by_month.entry(key).or_insert(0.0) += 1.0;
        }

        if by_month.len() < 2 {
            warn!(
                observed_months = by_month.len(),
                "Insufficient enrollment history, forecasting from synthetic baseline"
            );
            return SYNTHETIC_BASELINE.to_vec();
        }

        by_month.into_values().collect()
    }

    fn project_step(&self, step: usize, last_observed: f64, slope: f64) -> EnrollmentForecast {
        let growth_factor = 1.0 + slope * step as f64 * 0.01;
        let seasonal_factor = SEASONAL_FACTORS[(step - 1) % SEASONAL_FACTORS.len()];

        let raw = last_observed * growth_factor * seasonal_factor;
        let predicted_enrollment = if raw.is_finite() {
            raw.round().max(0.0) as u32
        } else {
            0
        };

        EnrollmentForecast {
            period: self.config.labeling.label(step),
            predicted_enrollment,
            confidence: step_confidence(step, slope),
            trend: classify_trend(slope),
            factors: qualitative_factors(step, slope),
        }
    }
}

impl Default for EnrollmentForecaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordinary least squares slope over an index-ordered series
pub fn linear_regression_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i as f64).powi(2)).sum();
    let denom = n * sum_x2 - sum_x.powi(2);
    if denom.abs() < f64::EPSILON {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denom
}

/// Confidence decays with horizon distance and with trend instability
fn step_confidence(step: usize, slope: f64) -> f64 {
    let horizon_decay = (1.0 - 0.1 * step as f64).max(0.5);
    let stability = (1.0 - 0.5 * slope.abs()).max(0.7);
    let confidence = horizon_decay * stability;
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        FALLBACK_CONFIDENCE
    }
}

fn classify_trend(slope: f64) -> TrendDirection {
    if slope > TREND_SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -TREND_SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

fn qualitative_factors(step: usize, slope: f64) -> Vec<String> {
    let mut factors = Vec::new();
    if slope > 0.0 {
        factors.push("Growing market demand".to_string());
    }
    if step <= 3 {
        factors.push("Seasonal enrollment patterns".to_string());
    }
    if step > 6 {
        factors.push("Long-term trend projection".to_string());
    }
    factors
}

/// Replace non-finite regression output with a flat trend
fn sanitize(slope: f64) -> f64 {
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}
