//! Resource demand prediction
//!
//! Applies fixed per-resource demand ratios to the current trainee count and
//! to the summed enrollment forecast over the requested horizon. Confidence
//! values are fixed per resource type and deliberately decoupled from the
//! forecast's own confidence.

use crate::forecast::EnrollmentForecaster;
use crate::models::{CentreRecord, TraineeRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Resource types tracked by the dashboard, in output order
pub const RESOURCE_TYPES: [ResourceType; 4] = [
    ResourceType::Computers,
    ResourceType::InternetBandwidth,
    ResourceType::PowerConsumption,
    ResourceType::ClassroomSpace,
];

/// Tracked resource categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Computers,
    InternetBandwidth,
    PowerConsumption,
    ClassroomSpace,
}

impl ResourceType {
    /// Fraction of the trainee population assumed to require this resource
    pub fn demand_ratio(&self) -> f64 {
        match self {
            ResourceType::Computers => 0.5,
            ResourceType::InternetBandwidth => 0.8,
            ResourceType::PowerConsumption => 0.6,
            ResourceType::ClassroomSpace => 0.4,
        }
    }

    /// Fixed prediction confidence for this resource
    pub fn confidence(&self) -> f64 {
        match self {
            ResourceType::Computers => 0.85,
            ResourceType::InternetBandwidth => 0.80,
            ResourceType::PowerConsumption => 0.75,
            ResourceType::ClassroomSpace => 0.90,
        }
    }

    /// Canned recommendations emitted when predicted demand exceeds current
    fn scaling_recommendations(&self) -> [&'static str; 2] {
        match self {
            ResourceType::Computers => [
                "Procure additional workstations",
                "Introduce shared lab scheduling",
            ],
            ResourceType::InternetBandwidth => [
                "Upgrade bandwidth capacity",
                "Install backup connectivity",
            ],
            ResourceType::PowerConsumption => [
                "Expand backup power capacity",
                "Audit energy usage across centres",
            ],
            ResourceType::ClassroomSpace => [
                "Secure additional classroom space",
                "Introduce staggered class schedules",
            ],
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Computers => write!(f, "computers"),
            ResourceType::InternetBandwidth => write!(f, "internet_bandwidth"),
            ResourceType::PowerConsumption => write!(f, "power_consumption"),
            ResourceType::ClassroomSpace => write!(f, "classroom_space"),
        }
    }
}

/// Demand projection for one resource type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDemandPrediction {
    pub resource_type: ResourceType,
    pub current_demand: u32,
    pub predicted_demand: u32,
    pub confidence: f64,
    pub period: String,
    pub recommendations: Vec<String>,
}

/// Predicts resource demand from trainee counts and the enrollment forecast
pub struct DemandPredictor;

impl DemandPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Always returns exactly one prediction per tracked resource type
    pub fn predict(
        &self,
        trainees: &[TraineeRecord],
        _centres: &[CentreRecord],
        forecaster: &EnrollmentForecaster,
        horizon_months: usize,
    ) -> Vec<ResourceDemandPrediction> {
        let current_count = trainees.len() as f64;
        // Demand scales with total projected intake across the horizon, not
        // with the final-period value
        let projected_total: f64 = forecaster
            .forecast(trainees, horizon_months)
            .iter()
            .map(|f| f.predicted_enrollment as f64)
            .sum();

        debug!(
            current_trainees = trainees.len(),
            projected_total = projected_total,
            horizon_months = horizon_months,
            "Predicting resource demand"
        );

        let period = format!("Next {} months", horizon_months);

        RESOURCE_TYPES
            .iter()
            .map(|resource| {
                let current_demand = (current_count * resource.demand_ratio()).round() as u32;
                let predicted_demand = (projected_total * resource.demand_ratio()).round() as u32;

                let recommendations = if predicted_demand > current_demand {
                    resource
                        .scaling_recommendations()
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                } else {
                    Vec::new()
                };

                ResourceDemandPrediction {
                    resource_type: *resource,
                    current_demand,
                    predicted_demand,
                    confidence: resource.confidence(),
                    period: period.clone(),
                    recommendations,
                }
            })
            .collect()
    }
}

impl Default for DemandPredictor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, EmploymentStatus, Gender};
    use chrono::{TimeZone, Utc};

    fn trainee(year: i32, month: u32) -> TraineeRecord {
        TraineeRecord {
            id: "t-1".to_string(),
            full_name: "Test Trainee".to_string(),
            age: 25,
            gender: Gender::Male,
            employment: EmploymentStatus::Student,
            education: EducationLevel::Secondary,
            course_id: None,
            enrolled_at: Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap(),
            completed: false,
            dropped_out: false,
        }
    }

    fn cohort(counts_per_month: &[(i32, u32, usize)]) -> Vec<TraineeRecord> {
        counts_per_month
            .iter()
            .flat_map(|(year, month, count)| (0..*count).map(move |_| trainee(*year, *month)))
            .collect()
    }

    #[test]
    fn test_always_four_predictions_in_order() {
        let predictor = DemandPredictor::new();
        let forecaster = EnrollmentForecaster::new();
        let predictions = predictor.predict(&[], &[], &forecaster, 6);

        assert_eq!(predictions.len(), 4);
        assert_eq!(predictions[0].resource_type, ResourceType::Computers);
        assert_eq!(predictions[1].resource_type, ResourceType::InternetBandwidth);
        assert_eq!(predictions[2].resource_type, ResourceType::PowerConsumption);
        assert_eq!(predictions[3].resource_type, ResourceType::ClassroomSpace);
    }

    #[test]
    fn test_current_demand_follows_ratios() {
        let predictor = DemandPredictor::new();
        let forecaster = EnrollmentForecaster::new();
        let trainees = cohort(&[(2026, 1, 50), (2026, 2, 50)]);
        let predictions = predictor.predict(&trainees, &[], &forecaster, 3);

        assert_eq!(predictions[0].current_demand, 50); // 100 * 0.5
        assert_eq!(predictions[1].current_demand, 80); // 100 * 0.8
        assert_eq!(predictions[2].current_demand, 60); // 100 * 0.6
        assert_eq!(predictions[3].current_demand, 40); // 100 * 0.4
    }

    #[test]
    fn test_zero_trainees_uses_synthetic_forecast() {
        let predictor = DemandPredictor::new();
        let forecaster = EnrollmentForecaster::new();
        let predictions = predictor.predict(&[], &[], &forecaster, 3);

        for prediction in &predictions {
            assert_eq!(prediction.current_demand, 0);
            // The synthetic baseline still projects nonzero enrollment, so
            // predicted demand exceeds zero and scaling advice fires. The
            // zero-current invariant is what the dashboard relies on.
            assert!(prediction.predicted_demand > 0);
            assert!(!prediction.recommendations.is_empty());
        }
    }

    #[test]
    fn test_zero_horizon_produces_no_recommendations() {
        let predictor = DemandPredictor::new();
        let forecaster = EnrollmentForecaster::new();
        let predictions = predictor.predict(&[], &[], &forecaster, 0);

        for prediction in &predictions {
            assert_eq!(prediction.current_demand, 0);
            assert_eq!(prediction.predicted_demand, 0);
            assert!(prediction.recommendations.is_empty());
        }
    }

    #[test]
    fn test_confidence_constants_are_fixed() {
        let predictor = DemandPredictor::new();
        let forecaster = EnrollmentForecaster::new();
        // Confidence is decoupled from the forecast's computed confidence:
        // identical across wildly different horizons
        let short = predictor.predict(&[], &[], &forecaster, 1);
        let long = predictor.predict(&[], &[], &forecaster, 24);

        for (a, b) in short.iter().zip(long.iter()) {
            assert_eq!(a.confidence, b.confidence);
        }
        assert_eq!(short[0].confidence, 0.85);
        assert_eq!(short[1].confidence, 0.80);
        assert_eq!(short[2].confidence, 0.75);
        assert_eq!(short[3].confidence, 0.90);
    }

    #[test]
    fn test_predicted_demand_sums_over_horizon() {
        let predictor = DemandPredictor::new();
        let forecaster = EnrollmentForecaster::new();
        let trainees = cohort(&[(2026, 1, 10), (2026, 2, 10), (2026, 3, 10)]);

        let forecast_total: f64 = forecaster
            .forecast(&trainees, 4)
            .iter()
            .map(|f| f.predicted_enrollment as f64)
            .sum();
        let predictions = predictor.predict(&trainees, &[], &forecaster, 4);

        assert_eq!(
            predictions[0].predicted_demand,
            (forecast_total * 0.5).round() as u32
        );
        assert_eq!(predictions[0].period, "Next 4 months");
    }
}
