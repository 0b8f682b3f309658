//! Core data models for the analytics engine
//!
//! Input records are snapshots supplied by the caller on every invocation;
//! the engine never mutates or retains them. Categorical fields tolerate
//! unknown values: anything unrecognized maps to the `Unknown` variant and
//! is ignored by the scoring rules.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Trainee gender as recorded at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

/// Employment status at enrollment time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    Student,
    SelfEmployed,
    Unknown,
}

/// Highest completed education level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    None,
    Primary,
    Secondary,
    Tertiary,
    Unknown,
}

// Unrecognized categorical strings map to Unknown on deserialization so that
// records from loosely-typed exports never fail to load. Scoring rules treat
// Unknown as "no match".
macro_rules! lossy_deserialize {
    ($ty:ty) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Ok(raw.parse().unwrap_or(<$ty>::Unknown))
            }
        }
    };
}

lossy_deserialize!(Gender);
lossy_deserialize!(EmploymentStatus);
lossy_deserialize!(EducationLevel);

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentStatus::Employed => write!(f, "employed"),
            EmploymentStatus::Unemployed => write!(f, "unemployed"),
            EmploymentStatus::Student => write!(f, "student"),
            EmploymentStatus::SelfEmployed => write!(f, "self_employed"),
            EmploymentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EducationLevel::None => write!(f, "none"),
            EducationLevel::Primary => write!(f, "primary"),
            EducationLevel::Secondary => write!(f, "secondary"),
            EducationLevel::Tertiary => write!(f, "tertiary"),
            EducationLevel::Unknown => write!(f, "unknown"),
        }
    }
}

/// Error returned when a categorical string has no matching variant
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {field} value: {value}")]
pub struct UnknownCategoryError {
    pub field: &'static str,
    pub value: String,
}

impl FromStr for Gender {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(UnknownCategoryError {
                field: "gender",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for EmploymentStatus {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employed" => Ok(EmploymentStatus::Employed),
            "unemployed" => Ok(EmploymentStatus::Unemployed),
            "student" => Ok(EmploymentStatus::Student),
            "self_employed" => Ok(EmploymentStatus::SelfEmployed),
            other => Err(UnknownCategoryError {
                field: "employment",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for EducationLevel {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(EducationLevel::None),
            "primary" => Ok(EducationLevel::Primary),
            "secondary" => Ok(EducationLevel::Secondary),
            "tertiary" => Ok(EducationLevel::Tertiary),
            other => Err(UnknownCategoryError {
                field: "education",
                value: other.to_string(),
            }),
        }
    }
}

/// Trainee registration record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraineeRecord {
    pub id: String,
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub employment: EmploymentStatus,
    pub education: EducationLevel,
    /// Reference to the assigned course, if any
    pub course_id: Option<String>,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub completed: bool,
    pub dropped_out: bool,
}

/// Training centre record
///
/// Centre fields are accepted for contract compatibility with the dashboard;
/// the current heuristics derive demand from trainee counts only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentreRecord {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub computer_count: u32,
    pub has_power: bool,
    pub has_internet: bool,
}

/// Course catalogue record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    /// Title is matched against "Advanced" for the course-difficulty risk rule
    pub title: String,
}
