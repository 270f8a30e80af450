//! # boardroom-reports
//!
//! Reporting and attendance-analytics core for the meeting portal.
//!
//! This crate provides:
//! - Reporting date windows (`window` module)
//! - Data models and report row projections (`models` module)
//! - Fetching, aggregation, orchestration and export (`services` module)
//! - Unified error handling (`error` module)

pub mod error;
pub mod models;
pub mod services;
pub mod window;

// Re-exports for convenience
pub use error::{Error, Result};
pub use window::{DateWindow, NavDirection};

// Re-export commonly used types from models
pub use models::{
    AttendanceRow, CancelledRow, DashboardOverview, Meeting, MeetingStatus, ParticipantRow,
    ParticipationRecord, ReportRows, ReportType, StaffMember, SummaryRow,
};

// Re-export commonly used types from services
pub use services::{
    AggregationEngine, ApiClient, ApiConfig, ExcelReportGenerator, JoinStrategy,
    ReportOrchestrator, ReportSource,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_version_format() {
        let v = version();
        // Should be semver format: x.y.z
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "Version should be in x.y.z format");
    }
}
