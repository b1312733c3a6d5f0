use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("Unknown wedding level: {0}")]
    UnknownLevel(String),

    #[error("Invalid percentage table for level {level}: {details}")]
    InvalidPercentages { level: String, details: String },

    #[error("Allocation drift for level {level}: allocated {actual} against budget {expected} (tolerance {tolerance})")]
    AllocationDrift {
        level: String,
        expected: f64,
        actual: f64,
        tolerance: f64,
    },

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanningError>;
