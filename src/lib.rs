//! Analytics library for training-programme dashboards
//!
//! This crate provides the heuristic analytics behind the dashboard:
//! - Enrollment forecasting from registration history
//! - Per-trainee dropout risk scoring
//! - Resource demand prediction
//! - Performance optimization targets
//!
//! All operations are pure functions over caller-supplied snapshots: no I/O,
//! no retained state, and defensive defaults instead of errors for malformed
//! input data.

pub mod demand;
pub mod engine;
pub mod forecast;
pub mod models;
pub mod optimization;
pub mod risk;

pub use demand::{DemandPredictor, ResourceDemandPrediction, ResourceType};
pub use engine::AnalyticsEngine;
pub use forecast::{
    EnrollmentForecast, EnrollmentForecaster, ForecastConfig, PeriodLabeling, TrendDirection,
};
pub use models::*;
pub use optimization::{OptimizationMetric, Optimizer, PerformanceOptimization, Priority};
pub use risk::{DropoutRiskAssessment, RiskLevel, RiskScorer, RiskWeights};
