use crate::input::BackupMode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SizingError {
    #[error("Sizing input was considered invalid: {0}")]
    InvalidInput(String),
    #[error("Bivalence temperature {value}°C is outside the {min}°C..{max}°C range allowed for {mode} operation")]
    BivalenceOutOfRange {
        mode: BackupMode,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Blocked operation time of {blocked_hours} hours per day leaves no runtime for the heat pump")]
    BlockedHoursExhaustRuntime { blocked_hours: u32 },
    #[error("Design outdoor temperature {design_temperature}°C must be strictly below the {limit}°C heating limit")]
    DegenerateDesignTemperature {
        design_temperature: f64,
        limit: f64,
    },
}
