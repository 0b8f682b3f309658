//! Analytics engine facade
//!
//! Ties the four analysis operations together behind one stateless entry
//! point. Every method is a pure function over the supplied snapshots; the
//! engine keeps no state between calls and can be shared freely across
//! threads.

use crate::demand::{DemandPredictor, ResourceDemandPrediction};
use crate::forecast::{EnrollmentForecast, EnrollmentForecaster, ForecastConfig};
use crate::models::{CentreRecord, CourseRecord, TraineeRecord};
use crate::optimization::{Optimizer, PerformanceOptimization};
use crate::risk::{DropoutRiskAssessment, RiskScorer, RiskWeights};

/// Stateless analytics engine for training-programme snapshots
pub struct AnalyticsEngine {
    forecaster: EnrollmentForecaster,
    scorer: RiskScorer,
    demand: DemandPredictor,
    optimizer: Optimizer,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self {
            forecaster: EnrollmentForecaster::new(),
            scorer: RiskScorer::new(),
            demand: DemandPredictor::new(),
            optimizer: Optimizer::new(),
        }
    }

    /// Override the forecast configuration (period labeling strategy)
    pub fn with_forecast_config(mut self, config: ForecastConfig) -> Self {
        self.forecaster = EnrollmentForecaster::with_config(config);
        self
    }

    /// Override the dropout risk scoring weights
    pub fn with_risk_weights(mut self, weights: RiskWeights) -> Self {
        self.scorer = RiskScorer::with_weights(weights);
        self
    }

    /// Forecast enrollment for the next `horizon_months` periods
    ///
    /// Centre and course snapshots are part of the dashboard contract but the
    /// current trend fit reads only trainee registration timestamps.
    pub fn forecast_enrollment(
        &self,
        trainees: &[TraineeRecord],
        _centres: &[CentreRecord],
        _courses: &[CourseRecord],
        horizon_months: usize,
    ) -> Vec<EnrollmentForecast> {
        self.forecaster.forecast(trainees, horizon_months)
    }

    /// Assess dropout risk for every trainee, preserving input order
    ///
    /// Courses are needed to resolve each trainee's course reference for the
    /// advanced-course difficulty rule.
    pub fn assess_dropout_risk(
        &self,
        trainees: &[TraineeRecord],
        courses: &[CourseRecord],
    ) -> Vec<DropoutRiskAssessment> {
        self.scorer.assess(trainees, courses)
    }

    /// Predict demand for the four tracked resource types
    pub fn predict_resource_demand(
        &self,
        trainees: &[TraineeRecord],
        centres: &[CentreRecord],
        horizon_months: usize,
    ) -> Vec<ResourceDemandPrediction> {
        self.demand
            .predict(trainees, centres, &self.forecaster, horizon_months)
    }

    /// Compute gap analysis for the four tracked performance metrics
    pub fn optimization_targets(
        &self,
        trainees: &[TraineeRecord],
        centres: &[CentreRecord],
        courses: &[CourseRecord],
    ) -> Vec<PerformanceOptimization> {
        self.optimizer.targets(trainees, centres, courses)
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, EmploymentStatus, Gender};
    use chrono::{TimeZone, Utc};

    fn trainees() -> Vec<TraineeRecord> {
        (0..12)
            .map(|i| TraineeRecord {
                id: format!("t-{}", i),
                full_name: format!("Trainee {}", i),
                age: 18 + i as u32 * 2,
                gender: if i % 3 == 0 { Gender::Female } else { Gender::Male },
                employment: if i % 2 == 0 {
                    EmploymentStatus::Unemployed
                } else {
                    EmploymentStatus::Employed
                },
                education: EducationLevel::Secondary,
                course_id: Some("c-1".to_string()),
                enrolled_at: Utc
                    .with_ymd_and_hms(2026, 1 + (i % 4) as u32, 10, 9, 0, 0)
                    .unwrap(),
                completed: false,
                dropped_out: false,
            })
            .collect()
    }

    fn courses() -> Vec<CourseRecord> {
        vec![CourseRecord {
            id: "c-1".to_string(),
            title: "Advanced Data Entry".to_string(),
        }]
    }

    #[test]
    fn test_engine_is_idempotent() {
        let engine = AnalyticsEngine::new();
        let trainees = trainees();
        let courses = courses();

        let first = engine.forecast_enrollment(&trainees, &[], &courses, 6);
        let second = engine.forecast_enrollment(&trainees, &[], &courses, 6);
        assert_eq!(first, second);

        let first = engine.predict_resource_demand(&trainees, &[], 6);
        let second = engine.predict_resource_demand(&trainees, &[], 6);
        assert_eq!(first, second);

        let first = engine.optimization_targets(&trainees, &[], &courses);
        let second = engine.optimization_targets(&trainees, &[], &courses);
        assert_eq!(first, second);

        // Risk assessments carry a wall-clock stamp; everything else must
        // match exactly across calls
        let first = engine.assess_dropout_risk(&trainees, &courses);
        let second = engine.assess_dropout_risk(&trainees, &courses);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.trainee_id, b.trainee_id);
            assert_eq!(a.risk_score, b.risk_score);
            assert_eq!(a.risk_level, b.risk_level);
            assert_eq!(a.factors, b.factors);
            assert_eq!(a.recommendations, b.recommendations);
        }
    }

    #[test]
    fn test_engine_does_not_mutate_inputs() {
        let engine = AnalyticsEngine::new();
        let trainees = trainees();
        let snapshot = trainees.clone();

        engine.forecast_enrollment(&trainees, &[], &[], 6);
        engine.assess_dropout_risk(&trainees, &courses());
        engine.predict_resource_demand(&trainees, &[], 6);
        engine.optimization_targets(&trainees, &[], &[]);

        for (before, after) in snapshot.iter().zip(trainees.iter()) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.age, after.age);
        }
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalyticsEngine>();
    }
}
